//! Centralized keys, thresholds and defaults for storefront logic.
//!
//! Storage key names are shared with deployed clients, so renaming any of
//! them orphans data already sitting in users' browsers.

// Local storage keys -------------------------------------------------------
pub const KEY_LOGGED_IN: &str = "loggedIn";
pub const KEY_USER_ROLE: &str = "userRole";
pub const KEY_TOKEN: &str = "token";
pub const KEY_CURRENT_USER: &str = "currentUser";
pub const KEY_CURRENT_MOBILE: &str = "currentMobile";
pub const KEY_GLOBAL_HISTORY: &str = "rechargeHistory";
pub const USER_HISTORY_PREFIX: &str = "rechargeHistory_";
pub const LOGGED_IN_FLAG: &str = "true";

// Classifier thresholds ----------------------------------------------------
pub const SMART_RECHARGE_MAX_DAYS: u32 = 7;
pub const TRULY_UNLIMITED_MIN_DAYS: u32 = 56;

// Form rules ---------------------------------------------------------------
pub const MOBILE_DIGITS: usize = 10;
pub const MIN_PASSWORD_LEN: usize = 6;

// Defaults -----------------------------------------------------------------
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_OPERATOR: &str = "Airtel";
pub const OPERATORS: [&str; 4] = ["Airtel", "Jio", "VI", "BSNL"];
pub const PLACEHOLDER_MOBILE: &str = "0000000000";
pub const DEFAULT_RECORD_STATUS: &str = "SUCCESS";

// Endpoints ----------------------------------------------------------------
pub const PATH_PLANS: &str = "/api/plans";
pub const PATH_LOGIN: &str = "/api/auth/login";
pub const PATH_REGISTER: &str = "/api/auth/register";
pub const PATH_RECHARGE: &str = "/api/recharge";
pub const PATH_HISTORY: &str = "/api/recharge/history";

/// Storage key for a user's local recharge mirror.
#[must_use]
pub fn user_history_key(email: &str) -> String {
    format!("{USER_HISTORY_PREFIX}{email}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_history_key_embeds_email() {
        assert_eq!(
            user_history_key("asha@example.com"),
            "rechargeHistory_asha@example.com"
        );
    }
}
