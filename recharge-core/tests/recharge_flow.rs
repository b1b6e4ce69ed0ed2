use chrono::{TimeZone, Utc};
use futures::executor::block_on;

use recharge_core::{
    ApiError, ClientConfig, CurrentUser, LocalStore, MemoryStore, Method, MirrorWrite, Plan,
    RechargeError, RemoteWrite, Role, ScriptedTransport, Session, Storefront, load_global_history,
    load_user_history,
};

const EMAIL: &str = "asha@example.com";

fn shop() -> (
    Storefront<ScriptedTransport, MemoryStore>,
    ScriptedTransport,
    MemoryStore,
) {
    let transport = ScriptedTransport::new();
    let store = MemoryStore::new();
    let config = ClientConfig::default().with_base_url("http://api.test");
    (
        Storefront::new(config, transport.clone(), store.clone()),
        transport,
        store,
    )
}

fn session(token: Option<&str>) -> Session {
    Session::logged_in(
        Role::User,
        token.map(ToString::to_string),
        Some(CurrentUser {
            id: "u1".to_string(),
            name: "Asha".to_string(),
            email: EMAIL.to_string(),
            role: Role::User,
        }),
    )
}

fn plan() -> Plan {
    serde_json::from_str(
        r#"{"_id":"p-299","operator":"Jio","price":299,"validity":"84 Days",
            "data":"2GB/day","call":"Unlimited","description":"Long validity"}"#,
    )
    .unwrap()
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 15, 0).unwrap()
}

#[test]
fn logged_out_recharge_is_refused_without_side_effects() {
    let (shop, transport, store) = shop();
    let result = block_on(shop.submit_recharge(&Session::anonymous(), &plan(), now()));
    assert_eq!(result, Err(RechargeError::LoginRequired));
    assert!(transport.sent().is_empty());
    assert!(store.is_empty());
}

#[test]
fn tokenless_recharge_only_writes_the_local_mirror() {
    let (shop, transport, store) = shop();
    let receipt = block_on(shop.submit_recharge(&session(None), &plan(), now())).unwrap();

    assert_eq!(receipt.remote, RemoteWrite::Skipped);
    assert_eq!(
        receipt.mirror,
        MirrorWrite::Written {
            user_key: format!("rechargeHistory_{EMAIL}")
        }
    );
    assert!(transport.sent().is_empty());

    let mine = load_user_history(&store, EMAIL);
    let global = load_global_history(&store);
    assert_eq!(mine.len(), 1);
    assert_eq!(global.len(), 1);
    assert_eq!(mine[0].category, "TRULY UNLIMITED");
    assert_eq!(mine[0].operator, "Jio");
    assert!(mine[0].user_email.is_none());
    assert_eq!(global[0].user_email.as_deref(), Some(EMAIL));
}

#[test]
fn remote_rejection_aborts_before_the_mirror() {
    let (shop, transport, store) = shop();
    transport.push_reply(200, r#"{"success":false,"message":"Plan expired"}"#);

    let result = block_on(shop.submit_recharge(&session(Some("tok")), &plan(), now()));
    assert_eq!(
        result,
        Err(RechargeError::Remote(ApiError::Rejected(
            "Plan expired".to_string()
        )))
    );
    assert!(load_user_history(&store, EMAIL).is_empty());
    assert!(load_global_history(&store).is_empty());
}

#[test]
fn transport_failure_aborts_before_the_mirror() {
    let (shop, transport, store) = shop();
    transport.push_failure("connection refused");
    let result = block_on(shop.submit_recharge(&session(Some("tok")), &plan(), now()));
    assert!(matches!(
        result,
        Err(RechargeError::Remote(ApiError::Transport(_)))
    ));
    assert!(store.is_empty());
}

#[test]
fn unreadable_success_reply_aborts_before_the_mirror() {
    let (shop, transport, store) = shop();
    transport.push_reply(200, "<html>proxy error page</html>");
    let result = block_on(shop.submit_recharge(&session(Some("tok")), &plan(), now()));
    assert!(matches!(
        result,
        Err(RechargeError::Remote(ApiError::Malformed(_)))
    ));
    assert!(load_user_history(&store, EMAIL).is_empty());
    assert!(load_global_history(&store).is_empty());
}

#[test]
fn committed_recharge_sends_bearer_and_mobile_then_mirrors() {
    let (shop, transport, store) = shop();
    store.set_item("currentMobile", "9876543210").unwrap();
    transport.push_reply(201, r#"{"success":true,"message":"Saved","recharge":{}}"#);

    let receipt = block_on(shop.submit_recharge(&session(Some("tok")), &plan(), now())).unwrap();
    assert_eq!(
        receipt.remote,
        RemoteWrite::Committed {
            message: "Saved".to_string()
        }
    );
    assert!(receipt.mirrored());

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].url, "http://api.test/api/recharge");
    assert_eq!(sent[0].header_value("Authorization"), Some("Bearer tok"));
    let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["phoneNumber"], "9876543210");
    assert_eq!(body["userId"], "u1");
    assert_eq!(body["amount"], 299);
    assert_eq!(load_global_history(&store).len(), 1);
}

#[test]
fn missing_mobile_uses_placeholder() {
    let (shop, transport, _) = shop();
    transport.push_reply(200, "");
    block_on(shop.submit_recharge(&session(Some("tok")), &plan(), now())).unwrap();
    let body: serde_json::Value =
        serde_json::from_str(transport.sent()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["phoneNumber"], "0000000000");
}

#[test]
fn session_without_email_skips_the_mirror() {
    let (shop, _, store) = shop();
    let anonymous_user = Session::logged_in(Role::User, None, None);
    let receipt = block_on(shop.submit_recharge(&anonymous_user, &plan(), now())).unwrap();
    assert_eq!(receipt.mirror, MirrorWrite::NoLocalIdentity);
    assert!(store.is_empty());
}

#[test]
fn blank_operator_takes_the_configured_default() {
    let transport = ScriptedTransport::new();
    let store = MemoryStore::new();
    let config = ClientConfig {
        default_operator: "VI".to_string(),
        ..ClientConfig::default()
    }
    .with_base_url("http://api.test");
    let shop = Storefront::new(config, transport.clone(), store.clone());
    transport.push_reply(201, r#"{"success":true,"message":"Saved"}"#);
    let unnamed = Plan {
        operator: String::new(),
        ..plan()
    };

    block_on(shop.submit_recharge(&session(Some("tok")), &unnamed, now())).unwrap();
    let body: serde_json::Value =
        serde_json::from_str(transport.sent()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["operator"], "VI");
    let mirrored = load_user_history(&store, EMAIL);
    assert_eq!(mirrored.len(), 1);
    assert_eq!(mirrored[0].operator, "VI");
}
