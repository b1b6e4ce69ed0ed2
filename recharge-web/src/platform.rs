//! Browser implementations of the storefront seams.
//!
//! `WebStore` persists to `window.localStorage`; `WebTransport` talks to the
//! remote API through `window.fetch`.

use recharge_core::{
    ApiRequest, ClientConfig, HttpReply, HttpTransport, LocalStore, Storefront,
};

use crate::dom;

/// Key/value storage backed by `localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct WebStore;

#[derive(Debug, thiserror::Error)]
pub enum WebStoreError {
    #[error("localStorage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

fn storage() -> Result<web_sys::Storage, WebStoreError> {
    dom::local_storage().map_err(|e| WebStoreError::Unavailable(dom::js_error_message(&e)))
}

impl LocalStore for WebStore {
    type Error = WebStoreError;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        storage()?
            .get_item(key)
            .map_err(|e| WebStoreError::Storage(dom::js_error_message(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        storage()?
            .set_item(key, value)
            .map_err(|e| WebStoreError::Storage(dom::js_error_message(&e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        storage()?
            .remove_item(key)
            .map_err(|e| WebStoreError::Storage(dom::js_error_message(&e)))
    }
}

/// HTTP transport over `window.fetch`
#[derive(Debug, Clone, Copy, Default)]
pub struct WebTransport;

#[derive(Debug, thiserror::Error)]
#[error("Network error: {0}")]
pub struct WebFetchError(pub String);

impl HttpTransport for WebTransport {
    type Error = WebFetchError;

    async fn send(&self, request: ApiRequest) -> Result<HttpReply, Self::Error> {
        dom::send_request(&request)
            .await
            .map_err(|e| WebFetchError(dom::js_error_message(&e)))
    }
}

pub type WebStorefront = Storefront<WebTransport, WebStore>;

/// Create a browser storefront with `WebTransport` and `WebStore`
#[must_use]
pub fn create_web_storefront() -> WebStorefront {
    let config = ClientConfig::default_config();
    log::info!("storefront API at {}", config.api_base_url);
    Storefront::new(config, WebTransport, WebStore)
}
