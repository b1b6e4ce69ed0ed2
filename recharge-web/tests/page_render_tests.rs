use futures::executor::block_on;
use recharge_core::{
    AdminDashboard, DashboardStats, HistorySource, HistoryView, Plan, RechargeRecord,
};
use recharge_web::pages::{
    admin::{AdminPage, Props as AdminProps},
    contact::ContactPage,
    history::{HistoryPage, Props as HistoryProps},
    home::{HomePage, Props as HomeProps},
    login::{LoginPage, Props as LoginProps},
    not_found::{NotFound, Props as NotFoundProps},
    plans::{PlansPage, Props as PlansProps},
    register::{Props as RegisterProps, RegisterPage},
};
use yew::{Callback, LocalServerRenderer};

fn operators() -> Vec<String> {
    ["Airtel", "Jio", "VI", "BSNL"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn plan(id: &str, price: i64, validity: &str, data: &str) -> Plan {
    Plan {
        id: id.to_string(),
        operator: "Jio".to_string(),
        price,
        validity: validity.to_string(),
        data: data.to_string(),
        call: "Unlimited".to_string(),
        ..Plan::default()
    }
}

fn record(amount: i64, date: &str) -> RechargeRecord {
    RechargeRecord {
        amount,
        validity: "28 Days".to_string(),
        data: "2GB/day".to_string(),
        operator: "Airtel".to_string(),
        date: date.to_string(),
        phone_number: "9876543210".to_string(),
        user_email: Some("asha@example.com".to_string()),
        ..RechargeRecord::default()
    }
}

fn testid_count(html: &str, id: &str) -> usize {
    html.matches(&format!("data-testid=\"{id}\"")).count()
}

#[test]
fn home_page_offers_mobile_entry_and_operators() {
    let props = HomeProps {
        operators: operators(),
        initial_mobile: "".into(),
        on_proceed: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<HomePage>::with_props(props).render());
    assert!(html.contains("data-testid=\"mobile-input\""));
    assert!(html.contains("data-testid=\"proceed\""));
    for op in operators() {
        assert!(html.contains(&op), "missing operator {op}");
    }
    assert_eq!(testid_count(&html, "mobile-error"), 0);
}

#[test]
fn plans_page_shows_recommended_tab_first() {
    let props = PlansProps {
        plans: vec![
            plan("p1", 299, "28 Days", "1.5GB/day"),
            plan("p2", 19, "1 Day", "1GB"),
            plan("p3", 349, "28 Days", "2GB/day 5G"),
        ],
        loading: false,
        busy: false,
        mobile: Some("9876543210".into()),
        on_recharge: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<PlansPage>::with_props(props).render());
    assert_eq!(testid_count(&html, "plan-card"), 1);
    assert!(html.contains("data-testid=\"recharge-p1\""));
    assert!(html.contains("Recharging 9876543210"));
    assert!(html.contains("data-testid=\"tab-smart-recharge\""));
}

#[test]
fn plans_page_reports_loading_and_empty_tabs() {
    let loading = PlansProps {
        plans: Vec::new(),
        loading: true,
        busy: false,
        mobile: None,
        on_recharge: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<PlansPage>::with_props(loading).render());
    assert_eq!(testid_count(&html, "plans-loading"), 1);

    let empty = PlansProps {
        plans: vec![plan("p9", 19, "1 Day", "1GB")],
        loading: false,
        busy: false,
        mobile: None,
        on_recharge: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<PlansPage>::with_props(empty).render());
    assert_eq!(testid_count(&html, "plans-empty"), 1);
    assert!(html.contains("No RECOMMENDED plans available right now."));
}

#[test]
fn login_and_register_forms_render_fields() {
    let login = LoginProps {
        busy: false,
        on_login: Callback::noop(),
        on_register: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<LoginPage>::with_props(login).render());
    assert!(html.contains("data-testid=\"login-email\""));
    assert!(html.contains("data-testid=\"login-password\""));
    assert_eq!(testid_count(&html, "login-errors"), 0);

    let register = RegisterProps {
        busy: true,
        on_register: Callback::noop(),
        on_login: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<RegisterPage>::with_props(register).render());
    for id in [
        "register-name",
        "register-email",
        "register-mobile",
        "register-password",
        "register-confirm",
        "register-role",
    ] {
        assert_eq!(testid_count(&html, id), 1, "missing {id}");
    }
    assert!(html.contains("Admin"));
}

#[test]
fn history_page_covers_each_view() {
    let render = |view: Option<HistoryView>| {
        let props = HistoryProps {
            view,
            on_login: Callback::noop(),
        };
        block_on(LocalServerRenderer::<HistoryPage>::with_props(props).render())
    };

    assert_eq!(testid_count(&render(None), "history-loading"), 1);
    assert_eq!(
        testid_count(&render(Some(HistoryView::LoginRequired)), "history-login"),
        1
    );

    let local = render(Some(HistoryView::Loaded {
        records: vec![
            record(199, "2026-03-01T08:30:00.000Z"),
            record(49, "2026-03-02T09:00:00.000Z"),
        ],
        source: HistorySource::LocalCache,
    }));
    assert_eq!(testid_count(&local, "history-card"), 2);
    assert_eq!(testid_count(&local, "history-local"), 1);
    assert!(local.contains("₹199"));
    assert!(local.contains("01 Mar 2026, 08:30"));

    let empty = render(Some(HistoryView::Loaded {
        records: Vec::new(),
        source: HistorySource::Remote,
    }));
    assert_eq!(testid_count(&empty, "history-empty"), 1);
    assert_eq!(testid_count(&empty, "history-local"), 0);
}

#[test]
fn admin_page_shows_stats_transactions_and_plans() {
    let dashboard = AdminDashboard {
        stats: DashboardStats {
            today_count: 2,
            today_amount: 798,
            total_count: 3,
            total_amount: 847,
            average_amount: 282,
        },
        transactions: vec![
            record(199, "2026-03-01T08:30:00.000Z"),
            record(49, "2026-03-01T09:30:00.000Z"),
            record(599, "2026-02-20T09:30:00.000Z"),
        ],
        fetch_error: None,
    };
    let props = AdminProps {
        dashboard: Some(dashboard),
        plans: vec![
            plan("p1", 299, "28 Days", "1.5GB/day"),
            Plan {
                operator: String::new(),
                ..plan("p2", 99, "14 Days", "1GB")
            },
        ],
        operators: operators(),
        default_operator: "BSNL".into(),
        busy: false,
        on_create: Callback::noop(),
        on_update: Callback::noop(),
        on_delete: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<AdminPage>::with_props(props).render());
    assert_eq!(testid_count(&html, "transaction-row"), 3);
    assert!(html.contains("₹847"));
    assert!(html.contains("₹282"));
    assert!(html.contains("asha@example.com"));
    assert!(html.contains("data-testid=\"edit-p1\""));
    assert!(html.contains("data-testid=\"delete-p1\""));
    assert!(html.contains("₹99 · 14 Days · BSNL"));
    assert_eq!(testid_count(&html, "plan-form"), 0);
}

#[test]
fn admin_page_reports_fetch_failure_and_loading() {
    let failed = AdminProps {
        dashboard: Some(AdminDashboard {
            fetch_error: Some("Request failed. Please check if the server is running.".into()),
            ..AdminDashboard::default()
        }),
        plans: Vec::new(),
        operators: operators(),
        default_operator: "Airtel".into(),
        busy: false,
        on_create: Callback::noop(),
        on_update: Callback::noop(),
        on_delete: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<AdminPage>::with_props(failed.clone()).render());
    assert_eq!(testid_count(&html, "dashboard-error"), 1);
    assert_eq!(testid_count(&html, "transactions-empty"), 1);

    let loading = AdminProps {
        dashboard: None,
        ..failed
    };
    let html = block_on(LocalServerRenderer::<AdminPage>::with_props(loading).render());
    assert_eq!(testid_count(&html, "dashboard-loading"), 1);
}

#[test]
fn static_pages_render() {
    let html = block_on(LocalServerRenderer::<ContactPage>::new().render());
    assert_eq!(testid_count(&html, "contact"), 1);

    let props = NotFoundProps {
        on_go_home: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<NotFound>::with_props(props).render());
    assert!(html.contains("Page not found"));
}
