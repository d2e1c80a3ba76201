//! Source Adapters
//!
//! Each adapter turns one kind of source (TSV backups, zipped test
//! repositories, GitHub issues, asset file URLs) into in-memory records.
//! Adapters normalize field names only; semantic checks live in the
//! normalizer and the asset schema.

pub mod archive;
pub mod issue;
pub mod remote;
pub mod tsv;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use crate::error::IngestError;

const USER_AGENT: &str = concat!("translator_testgen/", env!("CARGO_PKG_VERSION"));

/// HTTP client shared by the adapters. Follows redirects, which the archive
/// download relies on.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// GET `url` and return the body, failing on any non-2xx status.
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    debug!("Fetching {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to send request to {}", url))?;

    let status = response.status();
    if !status.is_success() {
        return Err(IngestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        }
        .into());
    }

    let body = response.bytes().await.context("Failed to read response body")?;
    Ok(body.to_vec())
}

/// One-shot HTTP responder on a local port.
#[cfg(test)]
pub(crate) mod stub {
    use reqwest::Client;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Client that talks to the stub directly, ignoring proxy settings.
    pub fn client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    /// Serve a single request with `status` and `body`; returns the base URL.
    pub async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }
}
