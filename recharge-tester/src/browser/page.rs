//! Page object for the storefront, addressing elements by `data-testid`.
use anyhow::{Context, Result};
use std::time::Duration;
use thirtyfour::prelude::*;

const WAIT_TIMEOUT: Duration = Duration::from_secs(5);
const WAIT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct StorefrontPage<'a> {
    driver: &'a WebDriver,
    base_url: String,
}

fn testid_selector(id: &str) -> By {
    By::Css(format!("[data-testid='{id}']"))
}

/// Absolute URL for an in-app route under `base`.
pub fn route_url(base: &str, route: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        route.trim_start_matches('/')
    )
}

impl<'a> StorefrontPage<'a> {
    pub fn new(driver: &'a WebDriver, base_url: impl Into<String>) -> Self {
        Self {
            driver,
            base_url: base_url.into(),
        }
    }

    pub const fn driver(&self) -> &'a WebDriver {
        self.driver
    }

    pub async fn open(&self, route: &str) -> Result<()> {
        let url = route_url(&self.base_url, route);
        self.driver
            .goto(&url)
            .await
            .with_context(|| format!("navigating to {url}"))?;
        Ok(())
    }

    /// Wait until the element with `id` is present and return it.
    pub async fn wait_for(&self, id: &str) -> Result<WebElement> {
        self.driver
            .query(testid_selector(id))
            .wait(WAIT_TIMEOUT, WAIT_INTERVAL)
            .first()
            .await
            .with_context(|| format!("waiting for [data-testid='{id}']"))
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        Ok(!self.driver.find_all(testid_selector(id)).await?.is_empty())
    }

    pub async fn click(&self, id: &str) -> Result<()> {
        self.wait_for(id).await?.click().await?;
        Ok(())
    }

    pub async fn type_into(&self, id: &str, text: &str) -> Result<()> {
        let input = self.wait_for(id).await?;
        input.clear().await?;
        input.send_keys(text).await?;
        Ok(())
    }

    pub async fn value_of(&self, id: &str) -> Result<String> {
        Ok(self.wait_for(id).await?.value().await?.unwrap_or_default())
    }

    pub async fn text_of(&self, id: &str) -> Result<String> {
        Ok(self.wait_for(id).await?.text().await?)
    }

    pub async fn attr_of(&self, id: &str, name: &str) -> Result<Option<String>> {
        Ok(self.wait_for(id).await?.attr(name).await?)
    }

    pub async fn path(&self) -> Result<String> {
        Ok(self.driver.current_url().await?.path().to_string())
    }

    /// Poll until the current path ends with `suffix`.
    pub async fn wait_for_path(&self, suffix: &str) -> Result<String> {
        let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
        loop {
            let path = self.path().await?;
            if path.ends_with(suffix) {
                return Ok(path);
            }
            anyhow::ensure!(
                tokio::time::Instant::now() < deadline,
                "expected path ending in {suffix}, still at {path}"
            );
            tokio::time::sleep(WAIT_INTERVAL).await;
        }
    }

    pub async fn clear_storage(&self) -> Result<()> {
        self.driver
            .execute("window.localStorage.clear();", Vec::new())
            .await?;
        Ok(())
    }

    pub async fn storage_dump(&self) -> Result<serde_json::Value> {
        let ret = self
            .driver
            .execute("return Object.assign({}, window.localStorage);", Vec::new())
            .await?;
        Ok(ret.json().clone())
    }
}
