//! Remote logo fetch
//!
//! The society hosts its letterhead logo on the public site; reports embed
//! it at render time. A failed or slow fetch must never fail the report, so
//! this returns `None` on any error and the renderers draw without it.

use std::time::Duration;

use crate::config::defaults::LOGO_FETCH_TIMEOUT_SECS;

pub async fn fetch_logo(url: &str) -> Option<Vec<u8>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(LOGO_FETCH_TIMEOUT_SECS))
        .build()
        .ok()?;

    match client.get(url).send().await {
        Ok(resp) if resp.status().is_success() => match resp.bytes().await {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(e) => {
                log::warn!("Logo body read failed for {url}: {e}");
                None
            }
        },
        Ok(resp) => {
            log::warn!("Logo fetch for {url} returned status {}", resp.status());
            None
        }
        Err(e) => {
            log::warn!("Logo fetch failed for {url}: {e}");
            None
        }
    }
}
