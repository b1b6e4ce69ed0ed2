//! Deployment base path handling for the router.
///
/// When `PUBLIC_URL` is set at compile time (e.g., `/recharge` when served
/// from a subdirectory), the router mounts under it. Local builds without
/// `PUBLIC_URL` mount at the root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Absolute href for an in-app path, honouring the router base.
#[must_use]
pub fn app_href(path: &str) -> String {
    app_href_with_base(path, option_env!("PUBLIC_URL").unwrap_or(""))
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

fn app_href_with_base(path: &str, base: &str) -> String {
    let rel = path.trim_start_matches('/');
    match router_base_with_base(base) {
        Some(base) => format!("{base}/{rel}"),
        None => format!("/{rel}"),
    }
}
