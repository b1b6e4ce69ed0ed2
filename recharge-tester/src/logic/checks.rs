//! Logic checks run against a storefront wired to a scripted transport and
//! an in-memory store. Each check fails with a description of the first
//! broken expectation.
use anyhow::{Context, Result, bail, ensure};
use chrono::{NaiveDate, Utc};
use futures::executor::block_on;
use recharge_core::constants::{
    KEY_CURRENT_MOBILE, KEY_CURRENT_USER, KEY_LOGGED_IN, KEY_TOKEN, KEY_USER_ROLE,
    PLACEHOLDER_MOBILE, user_history_key,
};
use recharge_core::{
    Category, ClientConfig, Credentials, HistorySource, HistoryView, LocalStore, Method,
    MirrorWrite, MobileEntry, PlanDraft, RechargeError, RemoteWrite, Role, Session, classify,
    group_by_category, load_global_history, load_user_history, sanitize_mobile_input,
    write_json,
};

use super::fixtures::{
    Harness, USER_EMAIL, admin_session, catalog, fixed_now, recharge_plan, record, user_session,
};

/// Every fixture plan lands on its expected tab.
pub fn classifier(_config: &ClientConfig) -> Result<()> {
    for (plan, expected) in catalog() {
        let got = classify(&plan).label();
        ensure!(got == expected, "plan {} classified as {got}, expected {expected}", plan.id);
    }
    Ok(())
}

/// Without a token the recharge only touches the local mirror.
pub fn recharge_offline(config: &ClientConfig) -> Result<()> {
    let h = Harness::new(config);
    let receipt = block_on(h.shop.submit_recharge(&user_session(None), &recharge_plan(), fixed_now()))
        .context("tokenless recharge should succeed")?;
    ensure!(receipt.remote == RemoteWrite::Skipped, "remote write was not skipped");
    ensure!(h.transport.sent().is_empty(), "a request was sent without a token");
    ensure!(
        receipt.mirror
            == MirrorWrite::Written {
                user_key: user_history_key(USER_EMAIL)
            },
        "unexpected mirror outcome {:?}",
        receipt.mirror
    );
    let mine = load_user_history(&h.store, USER_EMAIL);
    let global = load_global_history(&h.store);
    ensure!(mine.len() == 1, "expected 1 per-user record, found {}", mine.len());
    ensure!(global.len() == 1, "expected 1 global record, found {}", global.len());
    ensure!(
        global[0].user_email.as_deref() == Some(USER_EMAIL),
        "global record is not tagged with the user email"
    );
    Ok(())
}

/// With a token the server commits first, then the mirror is written.
pub fn recharge_remote(config: &ClientConfig) -> Result<()> {
    let h = Harness::new(config);
    h.store.set_item(KEY_CURRENT_MOBILE, "9876543210")?;
    h.transport
        .push_reply(201, r#"{"success":true,"message":"Recharge done"}"#);
    let receipt = block_on(h.shop.submit_recharge(
        &user_session(Some("user-token")),
        &recharge_plan(),
        fixed_now(),
    ))
    .context("remote recharge should commit")?;

    let sent = h.transport.sent();
    ensure!(sent.len() == 1, "expected one request, saw {}", sent.len());
    let request = &sent[0];
    ensure!(request.method == Method::Post, "recharge must be a POST");
    ensure!(
        request.url == config.endpoint("/api/recharge"),
        "recharge posted to {}",
        request.url
    );
    ensure!(
        request.header_value("Authorization") == Some("Bearer user-token"),
        "bearer header missing"
    );
    let body: serde_json::Value =
        serde_json::from_str(request.body.as_deref().unwrap_or_default())
            .context("recharge body is not JSON")?;
    ensure!(body["phoneNumber"] == "9876543210", "phone number not forwarded");
    ensure!(body["amount"] == 299, "amount not forwarded");
    ensure!(body["planId"].is_null(), "planId should be null");

    match receipt.remote {
        RemoteWrite::Committed { ref message } if message == "Recharge done" => {}
        other => bail!("unexpected remote outcome {other:?}"),
    }
    ensure!(receipt.mirrored(), "mirror was not written after commit");
    Ok(())
}

/// A refusal from the server leaves no local trace.
pub fn recharge_rejected(config: &ClientConfig) -> Result<()> {
    let h = Harness::new(config);
    h.transport
        .push_reply(200, r#"{"success":false,"message":"Plan expired"}"#);
    let outcome = block_on(h.shop.submit_recharge(
        &user_session(Some("user-token")),
        &recharge_plan(),
        fixed_now(),
    ));
    match outcome {
        Err(RechargeError::Remote(err)) => ensure!(
            err.user_message() == "Plan expired",
            "server message lost: {err}"
        ),
        other => bail!("expected a rejected recharge, got {other:?}"),
    }
    ensure!(
        load_user_history(&h.store, USER_EMAIL).is_empty(),
        "per-user mirror written after rejection"
    );
    ensure!(
        load_global_history(&h.store).is_empty(),
        "global mirror written after rejection"
    );

    let anonymous = block_on(h.shop.submit_recharge(
        &Session::anonymous(),
        &recharge_plan(),
        fixed_now(),
    ));
    ensure!(
        anonymous == Err(RechargeError::LoginRequired),
        "logged-out recharge must ask for login"
    );
    Ok(())
}

/// Remote history wins; a failed fetch falls back to the device copy.
pub fn history_fallback(config: &ClientConfig) -> Result<()> {
    let h = Harness::new(config);
    let session = user_session(Some("user-token"));
    write_json(
        &h.store,
        &user_history_key(USER_EMAIL),
        &vec![record(199, "2026-02-01T10:00:00.000Z")],
    )?;

    h.transport.push_reply(
        200,
        r#"{"success":true,"history":[{"_id":"r1","amount":299},{"_id":"r2","amount":"49"}]}"#,
    );
    match block_on(h.shop.history(&session)) {
        HistoryView::Loaded {
            records,
            source: HistorySource::Remote,
        } => ensure!(records.len() == 2, "remote history had {} records", records.len()),
        other => bail!("expected remote history, got {other:?}"),
    }

    h.transport.push_reply(500, r#"{"success":false}"#);
    match block_on(h.shop.history(&session)) {
        HistoryView::Loaded {
            records,
            source: HistorySource::LocalCache,
        } => ensure!(
            records.len() == 1 && records[0].amount == 199,
            "fallback did not read the local mirror"
        ),
        other => bail!("expected local fallback, got {other:?}"),
    }

    let sent = h.transport.sent();
    ensure!(
        sent.iter()
            .all(|r| r.url == config.endpoint("/api/recharge/history/qa-user")),
        "history fetched from the wrong endpoint"
    );
    ensure!(
        block_on(h.shop.history(&Session::anonymous())) == HistoryView::LoginRequired,
        "anonymous history must ask for login"
    );
    Ok(())
}

/// Dashboard aggregates today's and all-time recharges.
pub fn admin_analytics(config: &ClientConfig) -> Result<()> {
    let h = Harness::new(config);
    h.transport.push_reply(
        200,
        r#"{"success":true,"history":[
            {"_id":"a","amount":199,"createdAt":"2026-03-01T08:00:00.000Z","userId":{"email":"a@x.io"}},
            {"_id":"b","amount":"49","createdAt":"2026-03-01T12:30:00.000Z"},
            {"_id":"c","price":599,"date":"2026-02-27T18:00:00.000Z"}
        ]}"#,
    );
    let today = NaiveDate::from_ymd_opt(2026, 3, 1).context("valid date")?;
    let dashboard = block_on(h.shop.dashboard(&admin_session(), today, &Utc))
        .context("admin dashboard should load")?;
    let stats = dashboard.stats;
    ensure!(stats.total_count == 3, "total count {}", stats.total_count);
    ensure!(stats.total_amount == 847, "total amount {}", stats.total_amount);
    ensure!(stats.average_amount == 282, "average {}", stats.average_amount);
    ensure!(stats.today_count == 2, "today count {}", stats.today_count);
    ensure!(stats.today_amount == 248, "today amount {}", stats.today_amount);
    ensure!(dashboard.fetch_error.is_none(), "unexpected fetch error");

    let refused = block_on(h.shop.dashboard(&user_session(Some("t")), today, &Utc));
    ensure!(refused.is_err(), "non-admin sessions must be refused");
    Ok(())
}

/// Login persists the session; logout tears every key down again.
pub fn session_lifecycle(config: &ClientConfig) -> Result<()> {
    let h = Harness::new(config);
    h.transport.push_reply(
        200,
        r#"{"success":true,"message":"Welcome back","token":"tok-1",
            "user":{"_id":"u9","name":"Asha","email":"asha@example.com","role":"admin"}}"#,
    );
    let creds = Credentials {
        email: "asha@example.com".to_string(),
        password: "secret1".to_string(),
    };
    let success = block_on(h.shop.login(&creds)).context("login should succeed")?;
    ensure!(success.message == "Welcome back", "login message {}", success.message);
    ensure!(success.session.role == Role::Admin, "role should fall back to user.role");
    ensure!(
        h.store.get_item(KEY_LOGGED_IN)?.as_deref() == Some("true"),
        "loggedIn flag not stored"
    );
    ensure!(
        h.store.get_item(KEY_TOKEN)?.as_deref() == Some("tok-1"),
        "token not stored"
    );
    ensure!(
        h.shop.restore_session() == success.session,
        "restored session differs from the logged-in one"
    );

    let short = Credentials {
        email: "asha@example.com".to_string(),
        password: "123".to_string(),
    };
    ensure!(
        block_on(h.shop.login(&short)).is_err(),
        "short password must be refused"
    );
    ensure!(h.transport.sent().len() == 1, "invalid login reached the server");

    let anonymous = h.shop.logout()?;
    ensure!(!anonymous.logged_in, "logout left a logged-in session");
    for key in [KEY_LOGGED_IN, KEY_USER_ROLE, KEY_TOKEN, KEY_CURRENT_USER] {
        ensure!(h.store.get_item(key)?.is_none(), "{key} survived logout");
    }
    Ok(())
}

/// Admin writes pass through and are followed by a catalog re-fetch.
pub fn plan_management(config: &ClientConfig) -> Result<()> {
    let h = Harness::new(config);
    let draft = PlanDraft {
        operator: "VI".to_string(),
        price: 155,
        validity: "24 Days".to_string(),
        data: "1GB/day".to_string(),
        call: "Unlimited".to_string(),
        ..PlanDraft::default()
    };
    h.transport
        .push_reply(201, r#"{"success":true,"message":"Plan created"}"#)
        .push_reply(200, r#"{"success":true,"plans":[{"_id":"n1","price":155}]}"#);
    let change = block_on(h.shop.create_plan(&admin_session(), &draft))
        .context("plan creation should succeed")?;
    ensure!(change.plans.len() == 1, "catalog was not re-fetched");
    ensure!(change.message == "Plan created", "message {}", change.message);

    h.transport
        .push_reply(200, r#"{"success":false,"message":"Plan not found"}"#);
    ensure!(
        block_on(h.shop.delete_plan(&admin_session(), "missing")).is_err(),
        "failed delete reported as success"
    );

    let invalid = PlanDraft {
        price: 0,
        ..draft
    };
    ensure!(
        block_on(h.shop.update_plan(&admin_session(), "n1", &invalid)).is_err(),
        "zero price accepted"
    );

    let sent = h.transport.sent();
    ensure!(sent.len() == 3, "expected 3 requests, saw {}", sent.len());
    ensure!(sent[0].method == Method::Post, "create must POST");
    ensure!(sent[2].method == Method::Delete, "delete must DELETE");
    ensure!(
        sent[2].url == config.endpoint("/api/plans/missing"),
        "delete hit {}",
        sent[2].url
    );
    Ok(())
}

/// A catalog reply parses and groups into all five tabs in order.
pub fn catalog_smoke(config: &ClientConfig) -> Result<()> {
    let h = Harness::new(config);
    let plans: Vec<serde_json::Value> = catalog()
        .into_iter()
        .map(|(plan, _)| {
            serde_json::json!({
                "_id": plan.id,
                "operator": plan.operator,
                "price": plan.price.to_string(),
                "Validity": plan.validity,
                "data": plan.data,
                "call": plan.call,
                "description": plan.description,
                "type": plan.category,
            })
        })
        .collect();
    let body = serde_json::json!({ "success": true, "plans": plans }).to_string();
    h.transport.push_reply(200, body);
    let loaded = block_on(h.shop.catalog());
    ensure!(loaded.len() == 6, "catalog returned {} plans", loaded.len());
    ensure!(loaded[0].price == 299, "string price not parsed");
    let groups = group_by_category(&loaded);
    let order: Vec<Category> = groups.iter().map(|(category, _)| *category).collect();
    ensure!(order == Category::ALL, "tab order {order:?}");
    ensure!(
        groups.iter().all(|(_, plans)| !plans.is_empty()),
        "a tab came back empty"
    );

    h.transport.push_failure("connection refused");
    ensure!(
        block_on(h.shop.catalog()).is_empty(),
        "failed fetch should degrade to an empty catalog"
    );
    Ok(())
}

/// Mobile numbers are sanitized and must be exactly ten digits.
pub fn mobile_validation(config: &ClientConfig) -> Result<()> {
    ensure!(sanitize_mobile_input("98-76 5a43210") == "9876543210", "sanitizer kept junk");
    ensure!(
        sanitize_mobile_input("987654321099").len() == 10,
        "sanitizer did not cap the length"
    );
    let h = Harness::new(config);
    let session = user_session(None);
    ensure!(
        h.shop.enter_mobile(&session, "12345").is_err(),
        "short number accepted"
    );
    ensure!(
        h.shop.enter_mobile(&session, "9876543210")? == MobileEntry::Proceed,
        "valid number refused"
    );
    ensure!(
        h.shop.current_mobile() == "9876543210",
        "mobile number not remembered"
    );
    Ok(())
}

/// Logged-out visitors are pointed at the login view everywhere.
pub fn login_required(config: &ClientConfig) -> Result<()> {
    let h = Harness::new(config);
    let anonymous = Session::anonymous();
    ensure!(
        h.shop.enter_mobile(&anonymous, "9876543210")? == MobileEntry::LoginRequired,
        "anonymous mobile entry should require login"
    );
    ensure!(
        h.shop.current_mobile() == PLACEHOLDER_MOBILE,
        "anonymous mobile entry was stored"
    );
    ensure!(
        block_on(h.shop.history(&anonymous)) == HistoryView::LoginRequired,
        "anonymous history should require login"
    );
    ensure!(
        block_on(h.shop.submit_recharge(&anonymous, &recharge_plan(), fixed_now()))
            == Err(RechargeError::LoginRequired),
        "anonymous recharge should require login"
    );
    ensure!(h.transport.sent().is_empty(), "a request was sent while logged out");
    Ok(())
}
