//! Browser walkthroughs driven through the storefront page object.
use anyhow::{Result, ensure};

use super::ScenarioCtx;

const SHORT_MOBILE: &str = "12ab34";
const FULL_MOBILE: &str = "9876543210";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserFlow {
    Smoke,
    MobileValidation,
    PlansTabs,
    LoginRequired,
}

pub async fn run(flow: BrowserFlow, ctx: &ScenarioCtx<'_>) -> Result<()> {
    match flow {
        BrowserFlow::Smoke => smoke(ctx).await,
        BrowserFlow::MobileValidation => mobile_validation(ctx).await,
        BrowserFlow::PlansTabs => plans_tabs(ctx).await,
        BrowserFlow::LoginRequired => login_required(ctx).await,
    }
}

fn trace(ctx: &ScenarioCtx<'_>, step: &str) {
    if ctx.verbose {
        println!("    • {step}");
    }
}

async fn smoke(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let page = &ctx.page;
    page.open("/").await?;
    trace(ctx, "home page loaded");
    page.wait_for("mobile-input").await?;
    for id in ["nav-home", "nav-plans", "nav-login"] {
        ensure!(page.exists(id).await?, "missing navigation link {id}");
    }
    Ok(())
}

async fn mobile_validation(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let page = &ctx.page;
    page.open("/").await?;
    page.clear_storage().await?;
    page.open("/").await?;

    page.type_into("mobile-input", SHORT_MOBILE).await?;
    let value = page.value_of("mobile-input").await?;
    ensure!(
        value.chars().all(|c| c.is_ascii_digit()),
        "mobile input kept non-digits: {value:?}"
    );

    page.click("proceed").await?;
    let error = page.text_of("mobile-error").await?;
    ensure!(error.contains("10 digits"), "unexpected mobile error: {error}");
    trace(ctx, "short number rejected");

    page.type_into("mobile-input", FULL_MOBILE).await?;
    page.click("proceed").await?;
    page.wait_for_path("/login").await?;
    trace(ctx, "anonymous proceed redirected to login");
    Ok(())
}

async fn plans_tabs(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let page = &ctx.page;
    page.open("/plans").await?;
    page.wait_for("tab-recommended").await?;
    page.click("tab-data").await?;
    let selected = page.attr_of("tab-data", "aria-selected").await?;
    ensure!(
        selected.as_deref() == Some("true"),
        "data tab not selected after click: {selected:?}"
    );
    let recommended = page.attr_of("tab-recommended", "aria-selected").await?;
    ensure!(
        recommended.as_deref() == Some("false"),
        "recommended tab still selected"
    );
    Ok(())
}

async fn login_required(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let page = &ctx.page;
    page.open("/").await?;
    page.clear_storage().await?;

    page.open("/history").await?;
    page.wait_for("history-login").await?;
    trace(ctx, "history asks for login");

    page.open("/admin").await?;
    page.wait_for_path("/login").await?;
    page.wait_for("login-email").await?;
    trace(ctx, "admin redirected to login");
    Ok(())
}
