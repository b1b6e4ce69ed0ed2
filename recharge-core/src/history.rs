//! Recharge records and the local mirror kept in browser storage.
//!
//! Records arrive in two shapes: the remote document shape (`amount`,
//! `createdAt`, `phoneNumber`, nested `userId`, `planDetails`) and the
//! local-mirror shape (`price`, `Validity`, `Type`, `date`, `userEmail`).
//! Both deserialize into [`RechargeRecord`]; records are always written back
//! in the local-mirror shape.
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::category::classify;
use crate::constants::{DEFAULT_RECORD_STATUS, KEY_GLOBAL_HISTORY, user_history_key};
use crate::numbers::{de_lenient_opt_amount, de_lenient_text};
use crate::plan::Plan;
use crate::storage::{LocalStore, read_json, write_json};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecordWire")]
pub struct RechargeRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "price")]
    pub amount: i64,
    #[serde(rename = "Validity")]
    pub validity: String,
    pub data: String,
    pub call: String,
    pub operator: String,
    #[serde(rename = "Type")]
    pub category: String,
    /// RFC 3339 timestamp as stored; may be blank on very old entries.
    pub date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(rename = "phoneNumber", skip_serializing_if = "String::is_empty")]
    pub phone_number: String,
    #[serde(rename = "userEmail", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(skip_serializing)]
    pub user_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlanDetailsWire {
    #[serde(deserialize_with = "de_lenient_text")]
    validity: String,
    #[serde(deserialize_with = "de_lenient_text")]
    data: String,
    #[serde(deserialize_with = "de_lenient_text")]
    call: String,
    #[serde(rename = "type", deserialize_with = "de_lenient_text")]
    kind: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecordWire {
    #[serde(rename = "_id", deserialize_with = "de_lenient_text")]
    document_id: String,
    #[serde(deserialize_with = "de_lenient_opt_amount")]
    amount: Option<i64>,
    #[serde(deserialize_with = "de_lenient_opt_amount")]
    price: Option<i64>,
    #[serde(deserialize_with = "de_lenient_text")]
    validity: String,
    #[serde(rename = "Validity", deserialize_with = "de_lenient_text")]
    validity_legacy: String,
    #[serde(deserialize_with = "de_lenient_text")]
    data: String,
    #[serde(deserialize_with = "de_lenient_text")]
    call: String,
    #[serde(deserialize_with = "de_lenient_text")]
    operator: String,
    #[serde(deserialize_with = "de_lenient_text")]
    category: String,
    #[serde(rename = "Type", deserialize_with = "de_lenient_text")]
    kind_legacy: String,
    #[serde(rename = "type", deserialize_with = "de_lenient_text")]
    kind: String,
    #[serde(deserialize_with = "de_lenient_text")]
    date: String,
    #[serde(rename = "createdAt", deserialize_with = "de_lenient_text")]
    created_at: String,
    #[serde(deserialize_with = "de_lenient_text")]
    status: String,
    #[serde(rename = "phoneNumber", deserialize_with = "de_lenient_text")]
    phone_number: String,
    #[serde(rename = "userEmail", deserialize_with = "de_lenient_text")]
    user_email: String,
    #[serde(rename = "userId")]
    user: Option<serde_json::Value>,
    #[serde(rename = "planDetails")]
    plan_details: Option<PlanDetailsWire>,
}

fn pick(candidates: impl IntoIterator<Item = String>) -> String {
    candidates
        .into_iter()
        .find(|c| !c.trim().is_empty())
        .unwrap_or_default()
}

fn non_blank(text: String) -> Option<String> {
    (!text.trim().is_empty()).then_some(text)
}

fn nested_user_field(user: Option<&serde_json::Value>, field: &str) -> Option<String> {
    user.and_then(|u| u.get(field))
        .and_then(serde_json::Value::as_str)
        .map(ToString::to_string)
        .and_then(non_blank)
}

impl From<RecordWire> for RechargeRecord {
    fn from(wire: RecordWire) -> Self {
        let details = wire.plan_details.unwrap_or_default();
        let user_email = non_blank(wire.user_email)
            .or_else(|| nested_user_field(wire.user.as_ref(), "email"));
        let user_name = nested_user_field(wire.user.as_ref(), "name");
        Self {
            id: non_blank(wire.document_id),
            amount: wire.amount.or(wire.price).unwrap_or(0),
            validity: pick([wire.validity_legacy, wire.validity, details.validity]),
            data: pick([wire.data, details.data]),
            call: pick([wire.call, details.call]),
            operator: wire.operator,
            category: pick([wire.category, wire.kind_legacy, wire.kind, details.kind]),
            date: pick([wire.date, wire.created_at]),
            status: wire.status,
            phone_number: wire.phone_number,
            user_email,
            user_name,
        }
    }
}

impl RechargeRecord {
    /// Local mirror entry for a plan purchased at `now`.
    #[must_use]
    pub fn from_plan(plan: &Plan, now: DateTime<Utc>, default_operator: &str) -> Self {
        Self {
            amount: plan.price,
            validity: plan.validity.clone(),
            data: plan.data.clone(),
            call: plan.call.clone(),
            operator: plan.operator_or(default_operator).to_string(),
            category: classify(plan).label().to_string(),
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn tagged_with(mut self, email: &str) -> Self {
        self.user_email = Some(email.to_string());
        self
    }

    #[must_use]
    pub fn operator_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.operator.trim().is_empty() {
            fallback
        } else {
            &self.operator
        }
    }

    #[must_use]
    pub fn status_or_default(&self) -> &str {
        if self.status.trim().is_empty() {
            DEFAULT_RECORD_STATUS
        } else {
            &self.status
        }
    }

    /// Who made the recharge, for the admin transaction table.
    #[must_use]
    pub fn user_label(&self) -> &str {
        self.user_email
            .as_deref()
            .or(self.user_name.as_deref())
            .unwrap_or("N/A")
    }

    /// Human-readable date: `N/A` when blank, the raw text when unparseable.
    #[must_use]
    pub fn display_date(&self) -> String {
        if self.date.trim().is_empty() {
            return "N/A".to_string();
        }
        DateTime::parse_from_rfc3339(self.date.trim()).map_or_else(
            |_| self.date.clone(),
            |ts| ts.format("%d %b %Y, %H:%M").to_string(),
        )
    }
}

/// Where a history list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySource {
    Remote,
    LocalCache,
}

/// Outcome of loading the history view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryView {
    /// No session; show the login prompt.
    LoginRequired,
    Loaded {
        records: Vec<RechargeRecord>,
        source: HistorySource,
    },
}

impl HistoryView {
    #[must_use]
    pub fn records(&self) -> &[RechargeRecord] {
        match self {
            Self::LoginRequired => &[],
            Self::Loaded { records, .. } => records,
        }
    }
}

/// Per-user mirror for `email`; missing or corrupt lists read as empty.
pub fn load_user_history<S: LocalStore + ?Sized>(store: &S, email: &str) -> Vec<RechargeRecord> {
    read_json(store, &user_history_key(email)).unwrap_or_default()
}

/// Global mirror across every user of this browser.
pub fn load_global_history<S: LocalStore + ?Sized>(store: &S) -> Vec<RechargeRecord> {
    read_json(store, KEY_GLOBAL_HISTORY).unwrap_or_default()
}

/// Append `record` to the per-user list and a tagged copy to the global list.
/// Returns the per-user key written.
///
/// When the global write fails the per-user list is put back as it was, so
/// either both lists gain the record or neither does.
///
/// # Errors
///
/// Returns the store error from the first failing read or write.
pub fn append_local_record<S: LocalStore + ?Sized>(
    store: &S,
    email: &str,
    record: &RechargeRecord,
) -> Result<String, S::Error> {
    let user_key = user_history_key(email);
    let previous = store.get_item(&user_key)?;
    let mut mine = load_user_history(store, email);
    mine.push(record.clone());
    write_json(store, &user_key, &mine)?;

    let mut global = load_global_history(store);
    global.push(record.clone().tagged_with(email));
    if let Err(err) = write_json(store, KEY_GLOBAL_HISTORY, &global) {
        let restored = match previous.as_deref() {
            Some(raw) => store.set_item(&user_key, raw),
            None => store.remove_item(&user_key),
        };
        if let Err(undo) = restored {
            log::error!("could not restore {user_key} after a failed mirror write: {undo}");
        }
        return Err(err);
    }
    Ok(user_key)
}
