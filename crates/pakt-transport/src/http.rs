use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

use pakt_constants::{DOWNLOAD_CHUNK_SIZE, MAX_ATTEMPTS, USER_AGENT};
use pakt_error::{PackageManagerError, Result};
use pakt_logger;

use crate::{ProgressFn, Transport};

pub struct HttpTransport {
    client: Client,
    max_attempts: u32,
}

impl HttpTransport {
    #[must_use]
    pub fn new(timeout_secs: u64) -> Self {
        let timeout = Duration::from_secs(timeout_secs.max(1));
        Self {
            client: Client::builder()
                .timeout(timeout)
                .connect_timeout(timeout)
                .tcp_keepalive(Some(Duration::from_secs(60)))
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            max_attempts: MAX_ATTEMPTS,
        }
    }

    fn describe(url: &str, e: &reqwest::Error) -> String {
        if e.is_timeout() {
            format!("Request timeout for {url}")
        } else if e.is_connect() {
            format!("Connection failed for {url}: {e}")
        } else if e.is_status() {
            e.status().map_or_else(
                || format!("HTTP error for {url}: {e}"),
                |status| format!("HTTP {status} for {url}"),
            )
        } else {
            format!("Request error for {url}: {e}")
        }
    }

    fn is_retryable(e: &reqwest::Error) -> bool {
        e.is_timeout()
            || e.is_connect()
            || matches!(
                e.status(),
                Some(
                    StatusCode::TOO_MANY_REQUESTS
                        | StatusCode::INTERNAL_SERVER_ERROR
                        | StatusCode::BAD_GATEWAY
                        | StatusCode::SERVICE_UNAVAILABLE
                )
            )
    }

    fn send(&self, url: &str) -> std::result::Result<Response, reqwest::Error> {
        self.client.get(url).send()?.error_for_status()
    }

    fn stream_to_file(
        mut resp: Response,
        dest: &Path,
        progress: &mut ProgressFn<'_>,
    ) -> std::io::Result<u64> {
        let total = resp.content_length();
        let mut writer = BufWriter::new(File::create(dest)?);
        let mut buf = vec![0u8; DOWNLOAD_CHUNK_SIZE];
        let mut downloaded = 0u64;

        loop {
            let read = resp.read(&mut buf)?;
            if read == 0 {
                break;
            }
            let chunk = buf.get(..read).unwrap_or_default();
            writer.write_all(chunk)?;
            downloaded += read as u64;
            progress(downloaded, total);
        }

        writer.flush()?;
        Ok(downloaded)
    }
}

impl Transport for HttpTransport {
    fn get_text(&self, url: &str) -> Result<String> {
        let mut attempts = 0;

        loop {
            attempts += 1;

            let result = self.send(url).and_then(Response::text);
            match result {
                Ok(text) => return Ok(text),
                Err(e) if attempts < self.max_attempts && Self::is_retryable(&e) => {
                    pakt_logger::debug(&format!(
                        "Attempt {attempts} for {url} failed ({e}), retrying"
                    ));
                    std::thread::sleep(Duration::from_millis(500 * u64::from(attempts)));
                }
                Err(e) => return Err(PackageManagerError::NetworkError(Self::describe(url, &e))),
            }
        }
    }

    fn download(&self, url: &str, dest: &Path, progress: &mut ProgressFn<'_>) -> Result<u64> {
        let resp = self.send(url).map_err(|e| {
            PackageManagerError::DownloadFailed(url.to_string(), Self::describe(url, &e))
        })?;

        match Self::stream_to_file(resp, dest, progress) {
            Ok(bytes) => {
                pakt_logger::debug(&format!("Downloaded {url} ({bytes} bytes)"));
                Ok(bytes)
            }
            Err(e) => {
                let _ = std::fs::remove_file(dest);
                Err(PackageManagerError::DownloadFailed(
                    url.to_string(),
                    e.to_string(),
                ))
            }
        }
    }
}
