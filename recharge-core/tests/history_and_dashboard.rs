use chrono::{NaiveDate, Utc};
use futures::executor::block_on;

use recharge_core::{
    AdminError, ClientConfig, CurrentUser, HistorySource, HistoryView, MemoryStore,
    RechargeRecord, Role, ScriptedTransport, Session, Storefront, append_local_record,
};

const EMAIL: &str = "asha@example.com";

fn shop() -> (
    Storefront<ScriptedTransport, MemoryStore>,
    ScriptedTransport,
    MemoryStore,
) {
    let transport = ScriptedTransport::new();
    let store = MemoryStore::new();
    (
        Storefront::new(ClientConfig::default(), transport.clone(), store.clone()),
        transport,
        store,
    )
}

fn session(role: Role, token: Option<&str>) -> Session {
    Session::logged_in(
        role,
        token.map(ToString::to_string),
        Some(CurrentUser {
            id: "u1".to_string(),
            name: "Asha".to_string(),
            email: EMAIL.to_string(),
            role,
        }),
    )
}

fn seed_local(store: &MemoryStore, amount: i64) {
    let record = RechargeRecord {
        amount,
        ..RechargeRecord::default()
    };
    append_local_record(store, EMAIL, &record).unwrap();
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

#[test]
fn remote_history_wins_when_accepted() {
    let (shop, transport, store) = shop();
    seed_local(&store, 49);
    transport.push_reply(
        200,
        r#"{"success":true,"history":[{"_id":"r1","amount":299},{"_id":"r2","amount":"199"}]}"#,
    );
    let view = block_on(shop.history(&session(Role::User, Some("tok"))));
    match view {
        HistoryView::Loaded { records, source } => {
            assert_eq!(source, HistorySource::Remote);
            assert_eq!(records.len(), 2);
            assert_eq!(records[1].amount, 199);
        }
        HistoryView::LoginRequired => panic!("expected records"),
    }
    assert_eq!(
        transport.sent()[0].header_value("Authorization"),
        Some("Bearer tok")
    );
}

#[test]
fn failed_remote_history_falls_back_to_local_mirror() {
    for reply in [
        (500, r#"{"success":false}"#),
        (200, r#"{"success":false}"#),
        (200, r#"{"success":true,"history":"nope"}"#),
        (200, "<html>"),
    ] {
        let (shop, transport, store) = shop();
        seed_local(&store, 49);
        transport.push_reply(reply.0, reply.1);
        let view = block_on(shop.history(&session(Role::User, Some("tok"))));
        assert_eq!(
            view,
            HistoryView::Loaded {
                records: vec![RechargeRecord {
                    amount: 49,
                    ..RechargeRecord::default()
                }],
                source: HistorySource::LocalCache,
            },
            "{reply:?}"
        );
    }
}

#[test]
fn tokenless_history_reads_local_without_fetching() {
    let (shop, transport, store) = shop();
    seed_local(&store, 99);
    let view = block_on(shop.history(&session(Role::User, None)));
    assert_eq!(view.records().len(), 1);
    assert!(transport.sent().is_empty());
}

#[test]
fn dashboard_aggregates_remote_transactions() {
    let (shop, transport, _) = shop();
    transport.push_reply(
        200,
        r#"{"success":true,"history":[
            {"amount":199,"createdAt":"2026-03-01T06:00:00Z","userId":{"email":"a@x.io"}},
            {"amount":49,"createdAt":"2026-02-27T06:00:00Z"},
            {"price":"599","date":"2026-03-01T11:00:00.000Z"}
        ]}"#,
    );
    let dashboard = block_on(shop.dashboard(&session(Role::Admin, Some("tok")), today(), &Utc))
        .unwrap();
    assert!(dashboard.fetch_error.is_none());
    assert_eq!(dashboard.transactions.len(), 3);
    assert_eq!(dashboard.stats.total_amount, 847);
    assert_eq!(dashboard.stats.average_amount, 282);
    assert_eq!(dashboard.stats.today_count, 2);
    assert_eq!(dashboard.stats.today_amount, 798);
    assert_eq!(dashboard.transactions[0].user_label(), "a@x.io");
}

#[test]
fn dashboard_fetch_failure_is_empty_with_notice() {
    let (shop, transport, store) = shop();
    seed_local(&store, 49);
    transport.push_failure("offline");
    let dashboard = block_on(shop.dashboard(&session(Role::Admin, Some("tok")), today(), &Utc))
        .unwrap();
    assert!(dashboard.transactions.is_empty());
    assert_eq!(dashboard.stats.average_amount, 0);
    assert!(dashboard.fetch_error.is_some());
}

#[test]
fn dashboard_rejects_non_admins() {
    let (shop, transport, _) = shop();
    let result = block_on(shop.dashboard(&session(Role::User, Some("tok")), today(), &Utc));
    assert_eq!(result, Err(AdminError::NotAdmin));
    let logged_out = block_on(shop.dashboard(&Session::anonymous(), today(), &Utc));
    assert_eq!(logged_out, Err(AdminError::NotAdmin));
    assert!(transport.sent().is_empty());
}
