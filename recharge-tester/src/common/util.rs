use anyhow::{Context, Result};
use chrono::Utc;
use std::{fs, path::Path};

use crate::browser::StorefrontPage;

pub fn artifacts_dir(base: &str, browser: &str, scenario: &str) -> String {
    let ts = Utc::now().format("%Y%m%dT%H%M%S");
    format!("{base}/{browser}/{scenario}/{ts}")
}

/// Save a screenshot, the DOM, the storefront's localStorage and the error
/// chain for a failed browser scenario.
pub async fn capture_artifacts(
    page: &StorefrontPage<'_>,
    dir: &str,
    err: &anyhow::Error,
) -> Result<()> {
    let driver = page.driver();
    let screenshot = driver.screenshot_as_png().await.ok();
    let source = driver.source().await.ok();
    let storage = page.storage_dump().await.ok();
    let chain = format!("{err:#}");

    write_artifact_files(
        Path::new(dir),
        screenshot.as_deref(),
        source.as_deref(),
        storage.as_ref(),
        &chain,
    )
}

fn write_artifact_files(
    dir: &Path,
    screenshot: Option<&[u8]>,
    source: Option<&str>,
    storage: Option<&serde_json::Value>,
    error_chain: &str,
) -> Result<()> {
    fs::create_dir_all(dir).context("creating artifacts dir")?;

    if let Some(png) = screenshot {
        let _ = fs::write(dir.join("screenshot.png"), png);
    }
    if let Some(src) = source {
        let _ = fs::write(dir.join("dom.html"), src);
    }
    if let Some(storage) = storage {
        let payload = serde_json::to_vec_pretty(storage).unwrap_or_default();
        let _ = fs::write(dir.join("local-storage.json"), payload);
    }
    let _ = fs::write(dir.join("error.txt"), error_chain);

    Ok(())
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}
