use anyhow::{Result, bail};
use thirtyfour::prelude::*;

use super::flows::{self, BrowserFlow};
use super::{BrowserScenario, CombinedScenario, LogicCheck, LogicScenario, ScenarioCtx};
use crate::logic::checks;

/// One named scenario with an optional logic check and browser flow.
#[derive(Debug, Clone, Copy)]
pub struct CatalogScenario {
    key: &'static str,
    description: &'static str,
    check: Option<LogicCheck>,
    flow: Option<BrowserFlow>,
}

impl CatalogScenario {
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }
}

const fn entry(
    key: &'static str,
    description: &'static str,
    check: Option<LogicCheck>,
    flow: Option<BrowserFlow>,
) -> CatalogScenario {
    CatalogScenario {
        key,
        description,
        check,
        flow,
    }
}

fn catalog() -> [CatalogScenario; 12] {
    [
        entry(
            "smoke",
            "Catalog loads and groups into tabs; storefront renders",
            Some(checks::catalog_smoke),
            Some(BrowserFlow::Smoke),
        ),
        entry(
            "classifier",
            "Every plan lands on its expected tab",
            Some(checks::classifier),
            None,
        ),
        entry(
            "mobile-validation",
            "Mobile numbers are digits only and exactly ten long",
            Some(checks::mobile_validation),
            Some(BrowserFlow::MobileValidation),
        ),
        entry(
            "plans-tabs",
            "Plans view switches between category tabs",
            Some(checks::classifier),
            Some(BrowserFlow::PlansTabs),
        ),
        entry(
            "login-required",
            "Logged-out visitors are sent to login",
            Some(checks::login_required),
            Some(BrowserFlow::LoginRequired),
        ),
        entry(
            "recharge-offline",
            "Tokenless recharge writes only the local mirror",
            Some(checks::recharge_offline),
            None,
        ),
        entry(
            "recharge-remote",
            "Token recharge commits remotely, then mirrors",
            Some(checks::recharge_remote),
            None,
        ),
        entry(
            "recharge-rejected",
            "Refused recharge leaves no local record",
            Some(checks::recharge_rejected),
            None,
        ),
        entry(
            "history-fallback",
            "History prefers the server and falls back to the device",
            Some(checks::history_fallback),
            None,
        ),
        entry(
            "admin-analytics",
            "Dashboard aggregates today and all-time recharges",
            Some(checks::admin_analytics),
            None,
        ),
        entry(
            "session-lifecycle",
            "Login persists the session and logout clears it",
            Some(checks::session_lifecycle),
            None,
        ),
        entry(
            "plan-management",
            "Admin plan writes re-fetch the catalog",
            Some(checks::plan_management),
            None,
        ),
    ]
}

#[async_trait::async_trait]
impl BrowserScenario for CatalogScenario {
    async fn run_browser(&self, _driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        match self.flow {
            Some(flow) => flows::run(flow, ctx).await,
            None => bail!("Browser testing not implemented for {}", self.key),
        }
    }
}

impl CombinedScenario for CatalogScenario {
    fn as_logic_scenario(&self) -> Option<LogicScenario> {
        self.check.map(|check| LogicScenario::new(self.key, check))
    }
}

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario>> {
    let key = name.trim().to_lowercase();
    catalog()
        .into_iter()
        .find(|scenario| scenario.key == key)
        .map(|scenario| Box::new(scenario) as _)
}

pub fn scenario_keys() -> Vec<&'static str> {
    catalog().iter().map(CatalogScenario::key).collect()
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog()
        .iter()
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}
