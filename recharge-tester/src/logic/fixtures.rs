//! Scripted storefronts and sample data shared by the logic checks.
use chrono::{DateTime, TimeZone, Utc};
use recharge_core::{
    ClientConfig, CurrentUser, MemoryStore, Plan, RechargeRecord, Role, ScriptedTransport,
    Session, Storefront,
};

pub type ScriptedShop = Storefront<ScriptedTransport, MemoryStore>;

pub const USER_EMAIL: &str = "qa.user@example.com";
pub const ADMIN_EMAIL: &str = "qa.admin@example.com";

/// A storefront plus handles to its scripted transport and in-memory store.
pub struct Harness {
    pub shop: ScriptedShop,
    pub transport: ScriptedTransport,
    pub store: MemoryStore,
}

impl Harness {
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let transport = ScriptedTransport::new();
        let store = MemoryStore::new();
        let shop = Storefront::new(config.clone(), transport.clone(), store.clone());
        Self {
            shop,
            transport,
            store,
        }
    }
}

#[must_use]
pub fn user_session(token: Option<&str>) -> Session {
    Session::logged_in(
        Role::User,
        token.map(ToString::to_string),
        Some(CurrentUser {
            id: "qa-user".to_string(),
            name: "QA User".to_string(),
            email: USER_EMAIL.to_string(),
            role: Role::User,
        }),
    )
}

#[must_use]
pub fn admin_session() -> Session {
    Session::logged_in(
        Role::Admin,
        Some("admin-token".to_string()),
        Some(CurrentUser {
            id: "qa-admin".to_string(),
            name: "QA Admin".to_string(),
            email: ADMIN_EMAIL.to_string(),
            role: Role::Admin,
        }),
    )
}

fn plan(id: &str, price: i64, validity: &str, data: &str, call: &str, description: &str) -> Plan {
    Plan {
        id: id.to_string(),
        operator: "Jio".to_string(),
        price,
        validity: validity.to_string(),
        data: data.to_string(),
        call: call.to_string(),
        description: description.to_string(),
        ..Plan::default()
    }
}

/// Catalog covering every tab, paired with the label each plan should get.
#[must_use]
pub fn catalog() -> Vec<(Plan, &'static str)> {
    let mut labelled = plan("exp", 666, "84 Days", "1.5GB/day", "Unlimited", "");
    labelled.category = Some("  smart   recharge ".to_string());
    vec![
        (plan("rec", 299, "28 Days", "1.5GB/day", "Unlimited", "Popular pick"), "RECOMMENDED"),
        (plan("tu", 719, "84 Days", "2GB/day", "Unlimited", "Truly unlimited calls"), "TRULY UNLIMITED"),
        (plan("sr", 19, "1 Day", "1GB", "Unlimited", ""), "SMART RECHARGE"),
        (plan("data", 181, "30 Days", "15GB", "No Calls", "Data add-on"), "DATA"),
        (plan("5g", 349, "28 Days", "2GB/day 5G", "Unlimited", ""), "UNLIMITED 5G"),
        (labelled, "SMART RECHARGE"),
    ]
}

#[must_use]
pub fn recharge_plan() -> Plan {
    plan("p-299", 299, "28 Days", "2GB/day", "Unlimited", "Everyday pack")
}

/// Fixed clock for recharges recorded by the checks.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 15, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

#[must_use]
pub fn record(amount: i64, date: &str) -> RechargeRecord {
    RechargeRecord {
        amount,
        validity: "28 Days".to_string(),
        operator: "Airtel".to_string(),
        date: date.to_string(),
        user_email: Some(USER_EMAIL.to_string()),
        ..RechargeRecord::default()
    }
}
