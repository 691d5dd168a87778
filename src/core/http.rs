use std::{
    fs::File,
    io::{
        BufWriter,
        Write,
    },
    path::Path,
    thread,
    time::Duration,
};

use log::{
    info,
    warn,
};
use reqwest::{
    blocking::{
        Client,
        Response,
    },
    header::{
        ACCEPT_ENCODING,
        USER_AGENT,
    },
};

use crate::core::BunsekiError;

pub const USER_AGENT_VALUE: &str = "bunseki/0.1 (+reqwest)";

pub fn http_client(timeout: Duration) -> Result<Client, BunsekiError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT_VALUE)
        .build()
        .map_err(|e| BunsekiError::Custom(format!("HTTP client build failed: {e}")))
}

/// Delay before retry number `attempt` (1-based): base, 2*base, 4*base, ...
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * 2u32.saturating_pow(attempt.saturating_sub(1))
}

/// Runs `op` until it succeeds, `max_retries` extra attempts are spent, or
/// `is_retryable` rejects the error. Sleeps with exponential backoff in between.
pub fn with_retry<T, E, F>(
    label: &str,
    max_retries: u32,
    base_delay: Duration,
    is_retryable: impl Fn(&E) -> bool,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Result<T, E>,
    E: std::fmt::Display,
{
    let mut attempt: u32 = 0;
    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt >= max_retries || !is_retryable(&e) {
                    return Err(e);
                }
                attempt += 1;
                let delay = backoff_delay(base_delay, attempt);
                info!(
                    "{} failed ({}), retrying in {:.1}s (attempt {}/{})",
                    label,
                    e,
                    delay.as_secs_f32(),
                    attempt + 1,
                    max_retries + 1
                );
                thread::sleep(delay);
            }
        }
    }
}

pub fn download_to_file(client: &Client, url: &str, path: &Path) -> Result<(), BunsekiError> {
    with_retry(
        "Download",
        2,
        Duration::from_secs(2),
        |_: &BunsekiError| true,
        |_| {
            let mut resp = client
                .get(url)
                .header(USER_AGENT, USER_AGENT_VALUE)
                .header(ACCEPT_ENCODING, "identity")
                .send()?;

            ensure_success(&resp)?;

            let mut writer = BufWriter::new(File::create(path)?);
            let written = resp.copy_to(&mut writer)?;
            writer.flush()?;

            if written == 0 {
                warn!("Empty response body from {}", url);
                return Err(BunsekiError::Custom(format!("Empty download from {}", url)));
            }
            Ok(())
        },
    )
}

fn ensure_success(resp: &Response) -> Result<(), BunsekiError> {
    if !resp.status().is_success() {
        return Err(BunsekiError::Custom(format!(
            "HTTP error {} from {}",
            resp.status(),
            resp.url()
        )));
    }
    Ok(())
}
