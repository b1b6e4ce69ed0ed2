//! Recharge Storefront Core
//!
//! Platform-agnostic storefront logic for the mobile recharge app.
//! This crate provides plan classification, session handling, the recharge
//! flow, history retrieval and admin analytics without UI or
//! platform-specific dependencies. Platforms plug in through two traits:
//! [`HttpTransport`] for the remote API and [`LocalStore`] for key/value
//! persistence.

pub mod analytics;
pub mod api;
pub mod category;
pub mod config;
pub mod constants;
pub mod error;
pub mod history;
pub mod numbers;
pub mod plan;
pub mod recharge;
pub mod session;
pub mod storage;
pub mod storefront;
pub mod transport;
pub mod validation;

// Re-export commonly used types
pub use analytics::{DashboardStats, average_amount, compute as compute_dashboard, normalize_date};
pub use api::{ApiClient, LoginResponse, LoginUser, PlanDetails, RechargeRequest};
pub use category::{Category, classify, group_by_category, normalize, plans_in_category};
pub use config::ClientConfig;
pub use error::{AdminError, ApiError, AuthError, RechargeError, ValidationError};
pub use history::{
    HistorySource, HistoryView, RechargeRecord, append_local_record, load_global_history,
    load_user_history,
};
pub use plan::{Plan, PlanDraft};
pub use recharge::{MirrorWrite, RechargeReceipt, RemoteWrite};
pub use session::{CurrentUser, Role, Session};
pub use storage::{LocalStore, MemoryStore, read_json, write_json};
pub use storefront::{AdminDashboard, LoginSuccess, MobileEntry, PlanChange, Storefront};
pub use transport::{
    ApiRequest, HttpReply, HttpTransport, Method, ScriptedTransport, TransportError,
};
pub use validation::{
    Credentials, Registration, is_valid_email, sanitize_mobile_input, validate_login,
    validate_mobile, validate_plan_draft, validate_registration,
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use futures::executor::block_on;

    fn user_session(token: Option<&str>) -> Session {
        Session::logged_in(
            Role::User,
            token.map(ToString::to_string),
            Some(CurrentUser {
                id: "u1".to_string(),
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                role: Role::User,
            }),
        )
    }

    #[test]
    fn storefront_recharges_then_reads_history_back() {
        let transport = ScriptedTransport::new();
        let store = MemoryStore::new();
        let shop = Storefront::new(ClientConfig::default(), transport.clone(), store.clone());
        let session = user_session(None);
        let plan = Plan {
            id: "p1".to_string(),
            price: 199,
            validity: "28 Days".to_string(),
            ..Plan::default()
        };
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap();

        let receipt = block_on(shop.submit_recharge(&session, &plan, now)).unwrap();
        assert_eq!(receipt.remote, RemoteWrite::Skipped);
        assert!(receipt.mirrored());

        let view = block_on(shop.history(&session));
        assert_eq!(view.records().len(), 1);
        assert_eq!(view.records()[0].amount, 199);
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn logged_out_history_asks_for_login() {
        let shop = Storefront::new(
            ClientConfig::default(),
            ScriptedTransport::new(),
            MemoryStore::new(),
        );
        assert_eq!(
            block_on(shop.history(&Session::anonymous())),
            HistoryView::LoginRequired
        );
    }
}
