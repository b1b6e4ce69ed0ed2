mod browser;
mod common;
mod config;
mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use recharge_core::ClientConfig;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use browser::{BrowserConfig, BrowserKind, StorefrontPage, new_session};
use common::scenario::{
    BrowserScenario, ScenarioCtx, get_scenario, list_scenarios, scenario_keys,
};
use common::{artifacts_dir, capture_artifacts, split_csv};
use config::load_client_config;
use logic::LogicTester;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TestMode {
    /// Scripted storefront checks (fast, no browser)
    Logic,
    /// Browser automation against a served build
    Browser,
    /// Run both logic and browser tests
    Both,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadlessMode {
    /// Run browsers in headless mode
    Headless,
    /// Run browsers with visible windows
    Windowed,
}

impl HeadlessMode {
    const fn is_headless(self) -> bool {
        matches!(self, Self::Headless)
    }
}

#[derive(Debug, Parser)]
#[command(name = "recharge-tester", version)]
#[command(about = "Automated QA for the recharge storefront - scripted logic and browser automation")]
struct Args {
    /// Test mode: logic (fast), browser (visual), or both
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Number of iterations per scenario (logic mode only)
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON client config used by the logic checks
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the API origin the logic checks expect requests against
    #[arg(long)]
    api_url: Option<String>,

    // Browser-specific options
    /// Browsers to run (chrome,edge,firefox,safari) - browser mode only
    #[arg(long, default_value = "chrome")]
    browsers: String,

    /// Base URL the storefront is served from
    #[arg(long, default_value = "http://localhost:8080/")]
    base_url: String,

    /// Artifacts directory for screenshots, DOM and storage dumps
    #[arg(long, default_value = "target/test-artifacts")]
    artifacts_dir: String,

    /// Connect to a Selenium Grid/Appium hub instead of local drivers
    #[arg(long)]
    hub: Option<String>,

    /// Run headless where supported
    #[arg(long, value_enum, default_value_t = HeadlessMode::Headless)]
    headless: HeadlessMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let client_config = load_client_config(args.config.as_deref(), args.api_url.as_deref())?;
    log::debug!("logic checks use API origin {}", client_config.api_base_url);

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);

    let all_results = run_logic_scenarios(&args, &scenarios, &client_config);
    let browser_failures = run_browser_scenarios(&args, &scenarios).await;

    write_reports(&args, &all_results, start_time)?;

    if browser_failures > 0 || all_results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:20} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "📱 Recharge Automated Tester".bright_cyan().bold());
    println!("{}", "============================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s.eq_ignore_ascii_case("all")) {
        scenarios.retain(|s| !s.eq_ignore_ascii_case("all"));
        for key in scenario_keys() {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push(key.to_string());
            }
        }
    }
    scenarios
}

fn build_browser_config(args: &Args) -> BrowserConfig {
    BrowserConfig {
        headless: args.headless.is_headless(),
        implicit_wait_secs: 3,
        remote_hub: args.hub.clone(),
    }
}

fn run_logic_scenarios(
    args: &Args,
    scenarios: &[String],
    client_config: &ClientConfig,
) -> Vec<logic::ScenarioResult> {
    let mut results: Vec<logic::ScenarioResult> = Vec::new();
    if !matches!(args.mode, TestMode::Logic | TestMode::Both) {
        return results;
    }

    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let logic_tester = LogicTester::new(client_config.clone(), args.verbose);

    for scenario_name in scenarios {
        if let Some(combined_scenario) = get_scenario(scenario_name) {
            if let Some(logic_scenario) = combined_scenario.as_logic_scenario() {
                results.push(logic_tester.run_scenario(&logic_scenario, args.iterations));
            } else {
                eprintln!(
                    "⚠️  Scenario {} has no logic test implementation",
                    scenario_name.yellow()
                );
            }
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }

    results
}

/// Runs the browser flows and returns how many failed.
async fn run_browser_scenarios(args: &Args, scenarios: &[String]) -> usize {
    if !matches!(args.mode, TestMode::Browser | TestMode::Both) {
        return 0;
    }

    println!("{}", "🌐 Running Browser Tests".bright_blue().bold());
    println!("{}", "-".repeat(30).blue());

    let mut failures = 0;
    for browser_name in split_csv(&args.browsers) {
        let Some(kind) = BrowserKind::parse(&browser_name) else {
            eprintln!("⚠️  Unknown browser: {}", browser_name.yellow());
            continue;
        };

        let cfg = build_browser_config(args);
        let driver = match new_session(kind, &cfg).await {
            Ok(d) => d,
            Err(e) => {
                eprintln!("❌ Could not start {}: {e:#}", kind.label());
                continue;
            }
        };

        failures += run_browser_scenarios_for_driver(args, scenarios, kind, &driver).await;
        if let Err(e) = driver.quit().await {
            log::warn!("{} session did not quit cleanly: {e}", kind.label());
        }
    }
    failures
}

async fn run_browser_scenarios_for_driver(
    args: &Args,
    scenarios: &[String],
    kind: BrowserKind,
    driver: &thirtyfour::WebDriver,
) -> usize {
    let mut failures = 0;
    for scenario_name in scenarios {
        let Some(scenario) = get_scenario(scenario_name) else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
            continue;
        };
        let ctx = ScenarioCtx {
            page: StorefrontPage::new(driver, args.base_url.clone()),
            verbose: args.verbose,
        };
        let label = kind.label();
        let scenario_start = Instant::now();
        match scenario.run_browser(driver, &ctx).await {
            Ok(()) => {
                println!(
                    "✅ [{}] {} - {:?}",
                    label.green(),
                    scenario_name,
                    scenario_start.elapsed()
                );
            }
            Err(e) => {
                failures += 1;
                eprintln!(
                    "❌ [{}] {} - {:?}: {:#}",
                    label.red(),
                    scenario_name,
                    scenario_start.elapsed(),
                    e
                );
                let dir = artifacts_dir(&args.artifacts_dir, label, scenario_name);
                if let Err(capture) = capture_artifacts(&ctx.page, &dir, &e).await {
                    log::warn!("could not save artifacts to {dir}: {capture:#}");
                }
            }
        }
    }
    failures
}

fn write_reports(
    args: &Args,
    results: &[logic::ScenarioResult],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => {
            if results.is_empty() {
                writeln!(&mut output_target, "[]")?;
            } else {
                logic::reports::generate_json_report(&mut output_target, results)?;
            }
        }
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Recharge Logic Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No logic scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
        }
    }

    if args.report != "json" {
        writeln!(&mut output_target)?;
        writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
