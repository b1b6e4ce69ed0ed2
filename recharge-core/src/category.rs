//! Display categories and the plan classifier.
//!
//! Every plan lands in exactly one of five fixed tabs. An admin-set type wins
//! when it names a known tab; otherwise the free-text fields are inspected in
//! a fixed priority order and anything unrecognised falls back to
//! `Recommended`.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{SMART_RECHARGE_MAX_DAYS, TRULY_UNLIMITED_MIN_DAYS};
use crate::plan::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "RECOMMENDED")]
    Recommended,
    #[serde(rename = "TRULY UNLIMITED")]
    TrulyUnlimited,
    #[serde(rename = "SMART RECHARGE")]
    SmartRecharge,
    #[serde(rename = "DATA")]
    Data,
    #[serde(rename = "UNLIMITED 5G")]
    Unlimited5g,
}

impl Category {
    /// All categories in tab order.
    pub const ALL: [Self; 5] = [
        Self::Recommended,
        Self::TrulyUnlimited,
        Self::SmartRecharge,
        Self::Data,
        Self::Unlimited5g,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recommended => "RECOMMENDED",
            Self::TrulyUnlimited => "TRULY UNLIMITED",
            Self::SmartRecharge => "SMART RECHARGE",
            Self::Data => "DATA",
            Self::Unlimited5g => "UNLIMITED 5G",
        }
    }

    /// Stable slug for element ids and test hooks.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::TrulyUnlimited => "truly-unlimited",
            Self::SmartRecharge => "smart-recharge",
            Self::Data => "data",
            Self::Unlimited5g => "unlimited-5g",
        }
    }

    /// Match free text against the tab labels after normalization.
    #[must_use]
    pub fn from_label(text: &str) -> Option<Self> {
        let wanted = normalize(text);
        Self::ALL.into_iter().find(|cat| cat.label() == wanted)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trim, uppercase and collapse internal whitespace runs to one space.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

// "5G" or "5 G" as a token of its own, so "15GB" and "1.5GB/DAY" stay out.
static FIVE_G_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(^|[^0-9.])5 ?G($|[^A-Z])").ok());

fn mentions_5g(text: &str) -> bool {
    FIVE_G_RE.as_ref().is_some_and(|re| re.is_match(text))
}

fn lacks_voice(description: &str, call: &str) -> bool {
    description.contains("NO CALLS")
        || description.contains("NO VOICE")
        || description.contains("DATA ONLY")
        || call.contains("NO CALLS")
        || call.contains("NO VOICE")
}

fn unlimited_wording(description: &str, data: &str, call: &str) -> bool {
    description.contains("UNLIMITED")
        || description.contains("TRULY")
        || data.contains("UNLIMITED")
        || call.contains("UNLIMITED")
}

/// Assign a plan to exactly one display category.
///
/// Pure and deterministic; unclassifiable plans land in `Recommended`.
#[must_use]
pub fn classify(plan: &Plan) -> Category {
    if let Some(explicit) = plan.category.as_deref().and_then(Category::from_label) {
        return explicit;
    }

    let description = normalize(&plan.description);
    let data = normalize(&plan.data);
    let call = normalize(&plan.call);
    let days = plan.validity_days();

    if mentions_5g(&description) || mentions_5g(&data) {
        return Category::Unlimited5g;
    }
    if days.is_some_and(|d| d <= SMART_RECHARGE_MAX_DAYS) {
        return Category::SmartRecharge;
    }
    if lacks_voice(&description, &call) {
        return Category::Data;
    }
    if unlimited_wording(&description, &data, &call)
        && days.is_some_and(|d| d >= TRULY_UNLIMITED_MIN_DAYS)
    {
        return Category::TrulyUnlimited;
    }
    Category::Recommended
}

/// Plans belonging to the given tab, in catalog order.
#[must_use]
pub fn plans_in_category(plans: &[Plan], category: Category) -> Vec<&Plan> {
    plans.iter().filter(|p| classify(p) == category).collect()
}

/// Group a catalog into all five tabs, preserving tab and catalog order.
/// Empty tabs are kept so the caller can render "no plans" states.
#[must_use]
pub fn group_by_category(plans: &[Plan]) -> Vec<(Category, Vec<&Plan>)> {
    Category::ALL
        .into_iter()
        .map(|cat| (cat, plans_in_category(plans, cat)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(description: &str, data: &str, call: &str, validity: &str) -> Plan {
        Plan {
            description: description.to_string(),
            data: data.to_string(),
            call: call.to_string(),
            validity: validity.to_string(),
            price: 299,
            ..Plan::default()
        }
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("  truly \t unlimited\n"), "TRULY UNLIMITED");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn explicit_category_wins_over_heuristics() {
        for cat in Category::ALL {
            let mut p = plan("5G Unlimited", "2GB/day 5G", "No Calls", "1 Day");
            p.category = Some(format!("  {} ", cat.label().to_lowercase()));
            assert_eq!(classify(&p), cat);
        }
    }

    #[test]
    fn unknown_explicit_category_falls_through() {
        let mut p = plan("", "", "No Calls", "28 Days");
        p.category = Some("festival".to_string());
        assert_eq!(classify(&p), Category::Data);
    }

    #[test]
    fn five_g_wording_maps_to_unlimited_5g() {
        let p = plan("5G Unlimited", "2GB/day 5G", "Unlimited", "28 Days");
        assert_eq!(classify(&p), Category::Unlimited5g);
        let spaced = plan("", "True 5 G data", "", "84 Days");
        assert_eq!(classify(&spaced), Category::Unlimited5g);
        let slashed = plan("True 5G", "", "", "28 Days");
        assert_eq!(classify(&slashed), Category::Unlimited5g);
    }

    #[test]
    fn data_volumes_ending_in_5gb_are_not_5g() {
        for data in ["15GB", "1.5GB/day", "25GB", "2.5 GB", "5GB"] {
            let p = plan("", data, "Unlimited", "28 Days");
            assert_eq!(classify(&p), Category::Recommended, "{data}");
        }
        assert_eq!(
            classify(&plan("", "1.5GB/day", "Unlimited", "84 Days")),
            Category::TrulyUnlimited
        );
    }

    #[test]
    fn short_validity_maps_to_smart_recharge() {
        assert_eq!(
            classify(&plan("", "1GB", "Unlimited", "1 Day")),
            Category::SmartRecharge
        );
        assert_eq!(
            classify(&plan("", "", "No Calls", "7 days")),
            Category::SmartRecharge
        );
        assert_ne!(
            classify(&plan("", "", "", "8 days")),
            Category::SmartRecharge
        );
    }

    #[test]
    fn missing_voice_maps_to_data() {
        assert_eq!(
            classify(&plan("", "12GB", "No Calls", "30 Days")),
            Category::Data
        );
        assert_eq!(
            classify(&plan("Data only booster", "", "", "")),
            Category::Data
        );
    }

    #[test]
    fn long_unlimited_maps_to_truly_unlimited() {
        assert_eq!(
            classify(&plan("", "2GB/day", "Unlimited", "84 Days")),
            Category::TrulyUnlimited
        );
        assert_eq!(
            classify(&plan("", "2GB/day", "Unlimited", "28 Days")),
            Category::Recommended
        );
        assert_eq!(
            classify(&plan("", "2GB/day", "100 mins", "365 Days")),
            Category::Recommended
        );
    }

    #[test]
    fn label_round_trips_through_from_label() {
        for cat in Category::ALL {
            assert_eq!(Category::from_label(cat.label()), Some(cat));
            assert_eq!(cat.to_string(), cat.label());
        }
        assert_eq!(Category::from_label("unknown"), None);
    }

    #[test]
    fn grouping_keeps_every_tab() {
        let plans = vec![
            plan("5G", "", "", ""),
            plan("", "", "No Calls", ""),
            plan("", "", "", ""),
        ];
        let groups = group_by_category(&plans);
        assert_eq!(groups.len(), 5);
        let counts: Vec<usize> = groups.iter().map(|(_, ps)| ps.len()).collect();
        assert_eq!(counts, vec![1, 0, 0, 1, 1]);
    }
}
