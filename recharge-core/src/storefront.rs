//! Storefront engine tying the API gateway to the local store.
//!
//! Every operation a view can trigger lives here as one method. Views own the
//! [`Session`] value and hand it in; the engine never reads session keys on
//! its own after [`Storefront::restore_session`].
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::analytics::{DashboardStats, compute};
use crate::api::{ApiClient, RechargeRequest};
use crate::config::ClientConfig;
use crate::constants::{KEY_CURRENT_MOBILE, PLACEHOLDER_MOBILE};
use crate::error::{AdminError, ApiError, AuthError, RechargeError, ValidationError};
use crate::history::{
    HistorySource, HistoryView, RechargeRecord, append_local_record, load_user_history,
};
use crate::plan::{Plan, PlanDraft};
use crate::recharge::{MirrorWrite, RechargeReceipt, RemoteWrite};
use crate::session::{Role, Session};
use crate::storage::LocalStore;
use crate::transport::HttpTransport;
use crate::validation::{
    Credentials, Registration, validate_login, validate_mobile, validate_plan_draft,
    validate_registration,
};

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub session: Session,
    pub message: String,
}

/// What the home view should do after the mobile number is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobileEntry {
    /// Number stored; continue to the plans view.
    Proceed,
    /// Not logged in; send the user to the login view.
    LoginRequired,
}

/// Data backing the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminDashboard {
    pub stats: DashboardStats,
    pub transactions: Vec<RechargeRecord>,
    /// Set when the history fetch failed; the lists are then empty.
    pub fetch_error: Option<String>,
}

/// Outcome of an admin plan write: the server message and the re-fetched catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanChange {
    pub message: String,
    pub plans: Vec<Plan>,
}

/// Main storefront engine
#[derive(Debug, Clone)]
pub struct Storefront<T, S>
where
    T: HttpTransport,
    S: LocalStore,
{
    api: ApiClient<T>,
    store: S,
}

impl<T, S> Storefront<T, S>
where
    T: HttpTransport,
    S: LocalStore,
{
    /// Create a storefront with the provided transport and store
    pub const fn new(config: ClientConfig, transport: T, store: S) -> Self {
        Self {
            api: ApiClient::new(config, transport),
            store,
        }
    }

    pub const fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn config(&self) -> &ClientConfig {
        self.api.config()
    }

    /// Session persisted by an earlier visit, or an anonymous one.
    #[must_use]
    pub fn restore_session(&self) -> Session {
        Session::load(&self.store)
    }

    /// Validate, authenticate and persist a new session.
    ///
    /// # Errors
    ///
    /// Returns the first validation error without sending anything, the API
    /// error when the server refuses, or a storage error if the session could
    /// not be saved.
    pub async fn login(&self, creds: &Credentials) -> Result<LoginSuccess, AuthError> {
        if let Err(errors) = validate_login(creds) {
            let first = errors
                .into_iter()
                .next()
                .unwrap_or(ValidationError::InvalidEmail);
            return Err(AuthError::Validation(first));
        }
        let reply = self.api.login(creds).await?;
        let session = Session::logged_in(reply.role(), reply.token.clone(), reply.current_user());
        session
            .persist(&self.store)
            .map_err(|err| AuthError::Storage(err.to_string()))?;
        log::info!("logged in as {}", session.role.as_str());
        let message = if reply.message.trim().is_empty() {
            "Login successful".to_string()
        } else {
            reply.message
        };
        Ok(LoginSuccess { session, message })
    }

    /// Tear down the persisted session and return an anonymous one.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a session key could not be removed.
    pub fn logout(&self) -> Result<Session, AuthError> {
        Session::clear(&self.store).map_err(|err| AuthError::Storage(err.to_string()))?;
        log::info!("session cleared");
        Ok(Session::anonymous())
    }

    /// Register a user or admin account. Returns the notice to show.
    ///
    /// # Errors
    ///
    /// Validation errors are returned before any request; otherwise the API
    /// error is passed through.
    pub async fn register(&self, form: &Registration) -> Result<String, AuthError> {
        validate_registration(form)?;
        self.api.register(form).await?;
        Ok(match form.user_type {
            Role::Admin => "Admin Account Created Successfully!".to_string(),
            Role::User => "User Account Created Successfully!".to_string(),
        })
    }

    /// Current catalog. A failed fetch degrades to an empty catalog.
    pub async fn catalog(&self) -> Vec<Plan> {
        match self.api.list_plans().await {
            Ok(mut plans) => {
                let fallback = &self.config().default_operator;
                for plan in &mut plans {
                    plan.operator = plan.operator_or(fallback).to_string();
                }
                plans
            }
            Err(err) => {
                log::warn!("plan catalog unavailable: {err}");
                Vec::new()
            }
        }
    }

    /// Accept the mobile number typed on the home view.
    ///
    /// # Errors
    ///
    /// Returns the validation error when the number is not ten digits.
    pub fn enter_mobile(
        &self,
        session: &Session,
        mobile: &str,
    ) -> Result<MobileEntry, ValidationError> {
        validate_mobile(mobile)?;
        if !session.logged_in {
            return Ok(MobileEntry::LoginRequired);
        }
        if let Err(err) = self.store.set_item(KEY_CURRENT_MOBILE, mobile) {
            log::warn!("could not remember mobile number: {err}");
        }
        Ok(MobileEntry::Proceed)
    }

    /// Mobile number captured on the home view, or the placeholder.
    #[must_use]
    pub fn current_mobile(&self) -> String {
        match self.store.get_item(KEY_CURRENT_MOBILE) {
            Ok(Some(mobile)) if !mobile.trim().is_empty() => mobile,
            Ok(_) => PLACEHOLDER_MOBILE.to_string(),
            Err(err) => {
                log::warn!("could not read mobile number: {err}");
                PLACEHOLDER_MOBILE.to_string()
            }
        }
    }

    /// Recharge `plan` for the session's user.
    ///
    /// With a token the remote write happens first and must succeed; without
    /// one it is skipped. Only then is the local mirror appended, when the
    /// session knows the user's email.
    ///
    /// # Errors
    ///
    /// `LoginRequired` when the session is logged out; `Remote` when the
    /// server refused or could not be reached, in which case nothing was
    /// written locally.
    pub async fn submit_recharge(
        &self,
        session: &Session,
        plan: &Plan,
        now: DateTime<Utc>,
    ) -> Result<RechargeReceipt, RechargeError> {
        if !session.logged_in {
            return Err(RechargeError::LoginRequired);
        }

        let remote = if let Some(token) = session.token() {
            let phone = self.current_mobile();
            let request = RechargeRequest::for_plan(
                plan,
                session.user_id(),
                &phone,
                &self.config().default_operator,
            );
            let message = self
                .api
                .submit_recharge(Some(token), &request)
                .await
                .inspect_err(|err| log::error!("recharge rejected: {err}"))?;
            log::info!("recharge of {} committed remotely", plan.price);
            RemoteWrite::Committed { message }
        } else {
            log::warn!("no token held; recharge stored locally only");
            RemoteWrite::Skipped
        };

        let mirror = match session.user_email() {
            Some(email) => {
                let record =
                    RechargeRecord::from_plan(plan, now, &self.config().default_operator);
                match append_local_record(&self.store, email, &record) {
                    Ok(user_key) => MirrorWrite::Written { user_key },
                    Err(err) => {
                        log::warn!("local recharge mirror not written: {err}");
                        MirrorWrite::Failed {
                            reason: err.to_string(),
                        }
                    }
                }
            }
            None => MirrorWrite::NoLocalIdentity,
        };

        Ok(RechargeReceipt { remote, mirror })
    }

    /// History for the session's user, remote first with the local mirror as
    /// fallback.
    pub async fn history(&self, session: &Session) -> HistoryView {
        if !session.logged_in || session.current_user.is_none() {
            return HistoryView::LoginRequired;
        }
        let local = || HistoryView::Loaded {
            records: self.with_operators(
                session
                    .user_email()
                    .map(|email| load_user_history(&self.store, email))
                    .unwrap_or_default(),
            ),
            source: HistorySource::LocalCache,
        };

        let (Some(token), Some(user_id)) = (session.token(), session.user_id()) else {
            return local();
        };
        match self.api.user_history(Some(token), user_id).await {
            Ok(records) => HistoryView::Loaded {
                records: self.with_operators(records),
                source: HistorySource::Remote,
            },
            Err(err) => {
                log::warn!("history fetch failed, using local copy: {err}");
                local()
            }
        }
    }

    /// Transactions and aggregates for the admin dashboard.
    ///
    /// `today` and `tz` define which records count as today's.
    ///
    /// # Errors
    ///
    /// `NotAdmin` unless the session is a logged-in admin. A failed fetch is
    /// not an error: the dashboard comes back empty with `fetch_error` set.
    pub async fn dashboard<Tz: TimeZone>(
        &self,
        session: &Session,
        today: NaiveDate,
        tz: &Tz,
    ) -> Result<AdminDashboard, AdminError> {
        Self::require_admin(session)?;
        match self.api.all_history(session.token()).await {
            Ok(transactions) => {
                let transactions = self.with_operators(transactions);
                Ok(AdminDashboard {
                    stats: compute(&transactions, today, tz),
                    transactions,
                    fetch_error: None,
                })
            }
            Err(err) => {
                log::warn!("admin history fetch failed: {err}");
                Ok(AdminDashboard {
                    fetch_error: Some(err.user_message()),
                    ..AdminDashboard::default()
                })
            }
        }
    }

    /// # Errors
    ///
    /// `NotAdmin`, a draft validation error, or the API error from the write.
    pub async fn create_plan(
        &self,
        session: &Session,
        draft: &PlanDraft,
    ) -> Result<PlanChange, AdminError> {
        Self::require_admin(session)?;
        validate_plan_draft(draft)?;
        let written = self.api.create_plan(session.token(), draft).await;
        self.after_plan_write(written, "Plan added successfully").await
    }

    /// # Errors
    ///
    /// `NotAdmin`, a draft validation error, or the API error from the write.
    pub async fn update_plan(
        &self,
        session: &Session,
        id: &str,
        draft: &PlanDraft,
    ) -> Result<PlanChange, AdminError> {
        Self::require_admin(session)?;
        validate_plan_draft(draft)?;
        let written = self.api.update_plan(session.token(), id, draft).await;
        self.after_plan_write(written, "Plan updated successfully").await
    }

    /// # Errors
    ///
    /// `NotAdmin` or the API error from the delete.
    pub async fn delete_plan(&self, session: &Session, id: &str) -> Result<PlanChange, AdminError> {
        Self::require_admin(session)?;
        let written = self.api.delete_plan(session.token(), id).await;
        self.after_plan_write(written, "Plan deleted successfully").await
    }

    /// Records with a blank operator take the configured default.
    fn with_operators(&self, mut records: Vec<RechargeRecord>) -> Vec<RechargeRecord> {
        let fallback = &self.config().default_operator;
        for record in &mut records {
            record.operator = record.operator_or(fallback).to_string();
        }
        records
    }

    fn require_admin(session: &Session) -> Result<(), AdminError> {
        if session.is_admin() {
            Ok(())
        } else {
            Err(AdminError::NotAdmin)
        }
    }

    async fn after_plan_write(
        &self,
        written: Result<String, ApiError>,
        default_message: &str,
    ) -> Result<PlanChange, AdminError> {
        let message = written?;
        let plans = self.catalog().await;
        Ok(PlanChange {
            message: if message.trim().is_empty() {
                default_message.to_string()
            } else {
                message
            },
            plans,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CurrentUser;
    use crate::storage::MemoryStore;
    use crate::transport::ScriptedTransport;
    use futures::executor::block_on;

    fn storefront() -> (
        Storefront<ScriptedTransport, MemoryStore>,
        ScriptedTransport,
        MemoryStore,
    ) {
        let transport = ScriptedTransport::new();
        let store = MemoryStore::new();
        let config = ClientConfig::default().with_base_url("http://api.test");
        (
            Storefront::new(config, transport.clone(), store.clone()),
            transport,
            store,
        )
    }

    fn admin() -> Session {
        Session::logged_in(
            Role::Admin,
            Some("admin-token".to_string()),
            Some(CurrentUser {
                id: "a1".to_string(),
                name: "Root".to_string(),
                email: "root@example.com".to_string(),
                role: Role::Admin,
            }),
        )
    }

    #[test]
    fn login_validation_sends_nothing() {
        let (shop, transport, store) = storefront();
        let result = block_on(shop.login(&Credentials {
            email: "bad".to_string(),
            password: "secret1".to_string(),
        }));
        assert_eq!(
            result,
            Err(AuthError::Validation(ValidationError::InvalidEmail))
        );
        assert!(transport.sent().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn login_persists_and_logout_clears() {
        let (shop, transport, store) = storefront();
        transport.push_reply(
            200,
            r#"{"success":true,"token":"t1","role":"admin","user":{"_id":"a1","name":"Root","email":"root@example.com"}}"#,
        );
        let ok = block_on(shop.login(&Credentials {
            email: "root@example.com".to_string(),
            password: "secret1".to_string(),
        }))
        .unwrap();
        assert!(ok.session.is_admin());
        assert_eq!(ok.message, "Login successful");
        assert_eq!(shop.restore_session(), ok.session);

        let anonymous = shop.logout().unwrap();
        assert!(!anonymous.logged_in);
        assert!(store.get_item("token").unwrap().is_none());
        assert!(!shop.restore_session().logged_in);
    }

    #[test]
    fn mobile_entry_requires_login_before_storing() {
        let (shop, _, store) = storefront();
        assert!(shop.enter_mobile(&Session::anonymous(), "12345").is_err());
        assert_eq!(
            shop.enter_mobile(&Session::anonymous(), "9876543210"),
            Ok(MobileEntry::LoginRequired)
        );
        assert!(store.is_empty());
        assert_eq!(shop.current_mobile(), "0000000000");
        assert_eq!(
            shop.enter_mobile(&admin(), "9876543210"),
            Ok(MobileEntry::Proceed)
        );
        assert_eq!(shop.current_mobile(), "9876543210");
    }

    #[test]
    fn register_names_the_account_type() {
        let (shop, transport, _) = storefront();
        transport.push_reply(200, r#"{"success":true}"#);
        let form = Registration {
            name: "Root".to_string(),
            email: "root@example.com".to_string(),
            mobile: "9876543210".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            user_type: Role::Admin,
        };
        assert_eq!(
            block_on(shop.register(&form)).unwrap(),
            "Admin Account Created Successfully!"
        );
    }

    #[test]
    fn plan_writes_refetch_catalog() {
        let (shop, transport, _) = storefront();
        transport
            .push_reply(200, r#"{"success":true,"message":""}"#)
            .push_reply(200, r#"{"success":true,"plans":[{"_id":"x","price":10}]}"#);
        let change = block_on(shop.delete_plan(&admin(), "x")).unwrap();
        assert_eq!(change.message, "Plan deleted successfully");
        assert_eq!(change.plans.len(), 1);
        assert_eq!(transport.sent().len(), 2);
    }

    #[test]
    fn catalog_and_history_fill_blank_operators_from_config() {
        let transport = ScriptedTransport::new();
        let config = ClientConfig {
            default_operator: "BSNL".to_string(),
            ..ClientConfig::default()
        }
        .with_base_url("http://api.test");
        let shop = Storefront::new(config, transport.clone(), MemoryStore::new());
        transport
            .push_reply(
                200,
                r#"{"success":true,"plans":[{"_id":"a","price":10},{"_id":"b","operator":"Jio"}]}"#,
            )
            .push_reply(200, r#"{"success":true,"history":[{"amount":49}]}"#);

        let plans = block_on(shop.catalog());
        assert_eq!(plans[0].operator, "BSNL");
        assert_eq!(plans[1].operator, "Jio");

        let HistoryView::Loaded { records, source } = block_on(shop.history(&admin())) else {
            panic!("history should load for a logged-in admin");
        };
        assert_eq!(source, HistorySource::Remote);
        assert_eq!(records[0].operator, "BSNL");
    }

    #[test]
    fn plan_writes_need_admin() {
        let (shop, transport, _) = storefront();
        let user = Session::logged_in(Role::User, Some("t".to_string()), None);
        assert_eq!(
            block_on(shop.delete_plan(&user, "x")),
            Err(AdminError::NotAdmin)
        );
        assert!(transport.sent().is_empty());
    }
}
