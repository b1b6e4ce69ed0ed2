use anyhow::Result;
use recharge_core::ClientConfig;
use thirtyfour::prelude::*;

use crate::browser::StorefrontPage;

mod catalog;
mod flows;

pub use catalog::{get_scenario, list_scenarios, scenario_keys};

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub page: StorefrontPage<'a>,
    pub verbose: bool,
}

/// A logic check runs against a fresh scripted storefront each time.
pub type LogicCheck = fn(&ClientConfig) -> Result<()>;

// Logic test scenario
#[derive(Debug, Clone)]
pub struct LogicScenario {
    pub name: String,
    pub check: LogicCheck,
}

impl LogicScenario {
    #[must_use]
    pub fn new(name: impl Into<String>, check: LogicCheck) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario + Send + Sync {
    fn as_logic_scenario(&self) -> Option<LogicScenario>;
}
