use colored::Colorize;
use recharge_core::ClientConfig;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::common::scenario::LogicScenario;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

pub struct LogicTester {
    config: ClientConfig,
    verbose: bool,
}

impl LogicTester {
    pub const fn new(config: ClientConfig, verbose: bool) -> Self {
        Self { config, verbose }
    }

    pub fn run_scenario(&self, scenario: &LogicScenario, iterations: usize) -> ScenarioResult {
        if self.verbose {
            println!("🧪 Testing scenario: {}", scenario.name.bright_white());
        }

        let iterations = iterations.max(1);
        let mut failures = Vec::new();
        let mut timings = Vec::new();

        for i in 0..iterations {
            let start = Instant::now();
            match (scenario.check)(&self.config) {
                Ok(()) => {
                    let elapsed = start.elapsed();
                    timings.push(elapsed);
                    if self.verbose {
                        println!("  ✅ Iteration {}/{iterations} passed ({elapsed:?})", i + 1);
                    }
                }
                Err(err) => {
                    let message = format!("Iteration {}: {err:#}", i + 1);
                    if self.verbose {
                        println!("  ❌ {}", message.clone().red());
                    }
                    failures.push(message);
                }
            }
        }

        let average_duration = if timings.is_empty() {
            Duration::ZERO
        } else {
            timings.iter().sum::<Duration>() / u32::try_from(timings.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name.clone(),
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: timings.len(),
            failures,
            average_duration,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}
