//! Recharge plans as served by the remote catalog, plus the admin draft shape.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::category::{Category, normalize};
use crate::constants::DEFAULT_OPERATOR;
use crate::numbers::{de_lenient_amount, de_lenient_text};

static DAYS_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(\d+)\s*DAY").ok());
static BARE_NUMBER_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^(\d+)$").ok());

/// A purchasable recharge offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PlanWire")]
pub struct Plan {
    pub id: String,
    pub operator: String,
    /// Price in whole rupees.
    pub price: i64,
    pub validity: String,
    pub data: String,
    pub call: String,
    pub description: String,
    /// Explicit category as set by an admin; may be stale or free text.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub popular: bool,
}

/// Wire shape tolerating both the document-store and mock catalog spellings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlanWire {
    #[serde(rename = "_id", deserialize_with = "de_lenient_text")]
    document_id: String,
    #[serde(deserialize_with = "de_lenient_text")]
    id: String,
    #[serde(deserialize_with = "de_lenient_text")]
    operator: String,
    #[serde(deserialize_with = "de_lenient_amount")]
    price: i64,
    #[serde(deserialize_with = "de_lenient_text")]
    validity: String,
    #[serde(rename = "Validity", deserialize_with = "de_lenient_text")]
    validity_legacy: String,
    #[serde(deserialize_with = "de_lenient_text")]
    data: String,
    #[serde(deserialize_with = "de_lenient_text")]
    call: String,
    #[serde(deserialize_with = "de_lenient_text")]
    description: String,
    #[serde(rename = "type", deserialize_with = "de_lenient_text")]
    kind: String,
    #[serde(rename = "Type", deserialize_with = "de_lenient_text")]
    kind_legacy: String,
    popular: bool,
}

fn first_non_empty(primary: String, fallback: String) -> String {
    if primary.trim().is_empty() {
        fallback
    } else {
        primary
    }
}

impl From<PlanWire> for Plan {
    fn from(wire: PlanWire) -> Self {
        let kind = first_non_empty(wire.kind, wire.kind_legacy);
        Self {
            id: first_non_empty(wire.document_id, wire.id),
            operator: wire.operator,
            price: wire.price,
            validity: first_non_empty(wire.validity, wire.validity_legacy),
            data: wire.data,
            call: wire.call,
            description: wire.description,
            category: (!kind.trim().is_empty()).then_some(kind),
            popular: wire.popular,
        }
    }
}

impl Plan {
    /// Operator name, or `fallback` when the catalog left it blank.
    #[must_use]
    pub fn operator_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.operator.trim().is_empty() {
            fallback
        } else {
            &self.operator
        }
    }

    /// Validity expressed in days, when the free text carries one.
    ///
    /// Accepts `"28 Days"`, `"1 day"`, `"84days"` and bare numbers like `"56"`.
    #[must_use]
    pub fn validity_days(&self) -> Option<u32> {
        let validity = normalize(&self.validity);
        DAYS_RE
            .as_ref()
            .and_then(|re| re.captures(&validity))
            .or_else(|| BARE_NUMBER_RE.as_ref().and_then(|re| re.captures(&validity)))
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Display category for this plan.
    #[must_use]
    pub fn category(&self) -> Category {
        crate::category::classify(self)
    }
}

/// Form payload used by the admin dashboard to create or update a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDraft {
    pub operator: String,
    pub price: i64,
    pub validity: String,
    pub data: String,
    pub call: String,
    pub description: String,
    #[serde(rename = "type")]
    pub category: String,
    pub popular: bool,
}

impl Default for PlanDraft {
    fn default() -> Self {
        Self::with_operator(DEFAULT_OPERATOR)
    }
}

impl PlanDraft {
    /// Blank draft with `operator` preselected.
    #[must_use]
    pub fn with_operator(operator: &str) -> Self {
        Self {
            operator: operator.to_string(),
            price: 0,
            validity: String::new(),
            data: String::new(),
            call: String::new(),
            description: String::new(),
            category: Category::Recommended.label().to_string(),
            popular: false,
        }
    }

    /// Pre-fill a draft from an existing plan for editing.
    #[must_use]
    pub fn from_plan(plan: &Plan, default_operator: &str) -> Self {
        Self {
            operator: plan.operator_or(default_operator).to_string(),
            price: plan.price,
            validity: plan.validity.clone(),
            data: plan.data.clone(),
            call: plan.call.clone(),
            description: plan.description.clone(),
            category: plan
                .category
                .as_deref()
                .and_then(Category::from_label)
                .unwrap_or(Category::Recommended)
                .label()
                .to_string(),
            popular: plan.popular,
        }
    }
}
