//! Pure decisions about what a route needs and where an action lands.
use recharge_core::{AdminError, MobileEntry, RechargeError, RechargeReceipt, Session};

use crate::components::notice::Notice;
use crate::router::Route;

/// Work to start when a route becomes current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteEntry {
    Idle,
    LoadCatalog,
    LoadHistory,
    /// Dashboard plus the catalog for the plan list.
    LoadDashboard,
    RedirectToLogin,
}

#[must_use]
pub fn entry_for(route: Route, session: &Session) -> RouteEntry {
    if route.admin_only() && !session.is_admin() {
        return RouteEntry::RedirectToLogin;
    }
    match route {
        Route::Plans => RouteEntry::LoadCatalog,
        Route::History => RouteEntry::LoadHistory,
        Route::Admin => RouteEntry::LoadDashboard,
        _ => RouteEntry::Idle,
    }
}

/// Notice and destination after a recharge attempt. `None` keeps the user
/// on the plans view.
#[must_use]
pub fn after_recharge(outcome: &Result<RechargeReceipt, RechargeError>) -> (Notice, Option<Route>) {
    match outcome {
        Ok(receipt) => (Notice::success(receipt.notice()), Some(Route::History)),
        Err(RechargeError::LoginRequired) => (
            Notice::error(RechargeError::LoginRequired.to_string()),
            Some(Route::Login),
        ),
        Err(RechargeError::Remote(err)) => (Notice::error(err.user_message()), None),
    }
}

/// Destination after a valid mobile number was entered on the home view.
#[must_use]
pub fn after_mobile(entry: MobileEntry) -> (Option<Notice>, Route) {
    match entry {
        MobileEntry::Proceed => (None, Route::Plans),
        MobileEntry::LoginRequired => (
            Some(Notice::info("Please login to continue with your recharge.")),
            Route::Login,
        ),
    }
}

/// Notice for a failed admin action; a lost admin session also sends the
/// user back to login.
#[must_use]
pub fn after_admin_error(err: &AdminError) -> (Notice, Option<Route>) {
    match err {
        AdminError::NotAdmin => (Notice::error(err.to_string()), Some(Route::Login)),
        AdminError::Api(api) => (Notice::error(api.user_message()), None),
        AdminError::Validation(_) => (Notice::error(err.to_string()), None),
    }
}
