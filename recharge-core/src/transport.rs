//! HTTP seam: request/reply values and the transport trait platforms implement.
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Attach `Authorization: Bearer <token>` when a token is present.
    #[must_use]
    pub fn bearer(self, token: Option<&str>) -> Self {
        match token {
            Some(token) => self.header("Authorization", format!("Bearer {token}")),
            None => self,
        }
    }

    /// Attach a JSON body and its content type.
    #[must_use]
    pub fn json_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self.header("Content-Type", "application/json")
    }

    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// What came back over the wire. The body is kept raw so callers decide how
/// strictly to parse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpReply {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: default_status_text(status).to_string(),
            body: body.into(),
        }
    }

    /// `true` for 2xx statuses.
    #[must_use]
    pub const fn ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

fn default_status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}

/// Trait for abstracting the HTTP client.
/// Platform-specific implementations should provide this; requests are
/// awaited one at a time, never cancelled and never retried.
#[allow(async_fn_in_trait)] // Browser futures are not `Send`; callers run on one thread.
pub trait HttpTransport {
    type Error: std::error::Error + 'static;

    /// Send `request` and wait for the reply.
    ///
    /// # Errors
    ///
    /// Returns an error when no HTTP reply was obtained.
    async fn send(&self, request: ApiRequest) -> Result<HttpReply, Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Transport replaying queued replies and recording every request it sees.
/// Clones share the queue and the log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    replies: Rc<RefCell<VecDeque<Result<HttpReply, TransportError>>>>,
    sent: Rc<RefCell<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply with the given status and JSON body.
    pub fn push_reply(&self, status: u16, body: impl Into<String>) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpReply::new(status, body)));
        self
    }

    /// Queue a transport failure.
    pub fn push_failure(&self, message: impl Into<String>) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError(message.into())));
        self
    }

    /// Every request sent so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.replies.borrow().len()
    }
}

impl HttpTransport for ScriptedTransport {
    type Error = TransportError;

    async fn send(&self, request: ApiRequest) -> Result<HttpReply, Self::Error> {
        let label = format!("{} {}", request.method, request.url);
        self.sent.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError(format!("no scripted reply for {label}"))))
    }
}
