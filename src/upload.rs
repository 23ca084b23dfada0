//! # Device Upload
//!
//! Pushes an encoded bitmap to a panel that accepts images over HTTP.
//!
//! ## Endpoint Discovery
//! Devices differ in where they listen, so a short list of ports and paths is
//! tried with a GET first. The first candidate answering with any status
//! below 500 marks the port as live. When nothing answers, the upload still
//! goes to the requested port (or 80).
//!
//! ## Upload
//! The image is posted as a multipart form with a single `file` field typed
//! `image/bmp` to `/upload`. Only 200, 201 and 204 count as accepted.

use std::time::Duration;

use reqwest::{multipart, Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::bmp::BMP_CONTENT_TYPE;

pub const DEFAULT_PORT: u16 = 80;
pub const DISCOVERY_PORTS: [u16; 5] = [80, 8080, 8888, 3000, 5000];
pub const DISCOVERY_PATHS: [&str; 6] = [
    "/upload",
    "/api/upload",
    "/",
    "/index.html",
    "/api/image",
    "/display",
];
pub const UPLOAD_PATH: &str = "/upload";

const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(2);
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while pushing an image to a device.
#[derive(Error, Debug)]
pub enum UploadError {
    /// Request could not be built or sent
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Device answered with a status other than 200, 201 or 204
    #[error("device rejected upload: HTTP {0}")]
    Rejected(StatusCode),
}

/// A port and path that answered during discovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub port: u16,
    pub path: &'static str,
}

/// Discovery candidates in request order: every path on one port before the next port.
pub fn candidates(port: Option<u16>) -> Vec<Endpoint> {
    let ports = match port {
        Some(port) => vec![port],
        None => DISCOVERY_PORTS.to_vec(),
    };
    ports
        .into_iter()
        .flat_map(|port| DISCOVERY_PATHS.iter().map(move |&path| Endpoint { port, path }))
        .collect()
}

fn is_responsive(status: StatusCode) -> bool {
    status.as_u16() < 500
}

fn is_accepted(status: StatusCode) -> bool {
    matches!(status.as_u16(), 200 | 201 | 204)
}

// Panels sit on the local network and are reached directly, never through a proxy.
fn client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).no_proxy().build()
}

/// Look for a live endpoint on `host`.
pub async fn discover(host: &str, port: Option<u16>) -> Result<Option<Endpoint>, UploadError> {
    let client = client(DISCOVERY_TIMEOUT)?;
    for endpoint in candidates(port) {
        let url = format!("http://{host}:{}{}", endpoint.port, endpoint.path);
        match client.get(&url).send().await {
            Ok(response) => {
                let status = response.status();
                debug!(%url, %status, "candidate answered");
                if is_responsive(status) {
                    return Ok(Some(endpoint));
                }
            }
            Err(error) if error.is_timeout() => debug!(%url, "candidate timed out"),
            Err(error) => debug!(%url, %error, "candidate unreachable"),
        }
    }
    Ok(None)
}

/// Post `bytes` as `file_name` to `/upload` on `host:port`.
pub async fn upload(
    host: &str,
    port: u16,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<StatusCode, UploadError> {
    let url = format!("http://{host}:{port}{UPLOAD_PATH}");
    let part = multipart::Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(BMP_CONTENT_TYPE)?;
    let form = multipart::Form::new().part("file", part);

    let response = client(UPLOAD_TIMEOUT)?
        .post(&url)
        .multipart(form)
        .send()
        .await?;
    let status = response.status();
    if !is_accepted(status) {
        return Err(UploadError::Rejected(status));
    }
    info!(%url, %status, "image uploaded");
    Ok(status)
}

/// Discover an endpoint on `host` and upload to it.
pub async fn push(
    host: &str,
    port: Option<u16>,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<StatusCode, UploadError> {
    let port = match discover(host, port).await? {
        Some(endpoint) => {
            info!(port = endpoint.port, path = endpoint.path, "found responsive endpoint");
            endpoint.port
        }
        None => {
            warn!(%host, "no endpoint responded, trying default upload");
            port.unwrap_or(DEFAULT_PORT)
        }
    };
    upload(host, port, file_name, bytes).await
}
