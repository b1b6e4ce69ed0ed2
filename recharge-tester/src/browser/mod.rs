mod page;
mod session;

pub use page::StorefrontPage;
pub use session::{BrowserConfig, BrowserKind, new_session};
