use std::rc::Rc;

use chrono::{Local, Utc};
use recharge_core::{AuthError, Credentials, MobileEntry, Plan, PlanDraft, Registration};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Navigator;

use crate::app::routing::{after_admin_error, after_mobile, after_recharge};
use crate::app::state::AppState;
use crate::components::notice::Notice;
use crate::platform::WebStorefront;
use crate::router::Route;

pub type Shop = Rc<WebStorefront>;

#[derive(Clone)]
pub struct AppHandlers {
    pub navigate: Callback<Route>,
    pub dismiss: Callback<()>,
    pub login: Callback<Credentials>,
    pub logout: Callback<()>,
    pub register: Callback<Registration>,
    pub proceed: Callback<String>,
    pub recharge: Callback<Plan>,
    pub create_plan: Callback<PlanDraft>,
    pub update_plan: Callback<(String, PlanDraft)>,
    pub delete_plan: Callback<String>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState, shop: &Shop, navigator: Option<Navigator>) -> Self {
        Self {
            navigate: build_navigate(state, navigator.clone()),
            dismiss: build_dismiss(state),
            login: build_login(state, shop, navigator.clone()),
            logout: build_logout(state, shop, navigator.clone()),
            register: build_register(state, shop, navigator.clone()),
            proceed: build_proceed(state, shop, navigator.clone()),
            recharge: build_recharge(state, shop, navigator.clone()),
            create_plan: build_create_plan(state, shop, navigator.clone()),
            update_plan: build_update_plan(state, shop, navigator.clone()),
            delete_plan: build_delete_plan(state, shop, navigator),
        }
    }
}

fn go(navigator: Option<&Navigator>, route: Route) {
    if let Some(nav) = navigator {
        nav.push(&route);
    }
}

fn auth_message(err: &AuthError) -> String {
    match err {
        AuthError::Api(api) => api.user_message(),
        other => other.to_string(),
    }
}

pub fn load_catalog(state: &AppState, shop: &Shop) {
    let plans = state.plans.clone();
    let loading = state.plans_loading.clone();
    let shop = Rc::clone(shop);
    loading.set(true);
    spawn_local(async move {
        plans.set(shop.catalog().await);
        loading.set(false);
    });
}

pub fn load_history(state: &AppState, shop: &Shop) {
    let history = state.history.clone();
    let session = (*state.session).clone();
    let shop = Rc::clone(shop);
    history.set(None);
    spawn_local(async move {
        history.set(Some(shop.history(&session).await));
    });
}

pub fn load_dashboard(state: &AppState, shop: &Shop, navigator: Option<Navigator>) {
    let dashboard = state.dashboard.clone();
    let notice = state.notice.clone();
    let session = (*state.session).clone();
    let shop = Rc::clone(shop);
    dashboard.set(None);
    spawn_local(async move {
        let today = Local::now().date_naive();
        match shop.dashboard(&session, today, &Local).await {
            Ok(loaded) => {
                if let Some(err) = &loaded.fetch_error {
                    notice.set(Some(Notice::error(err.clone())));
                }
                dashboard.set(Some(loaded));
            }
            Err(err) => {
                let (message, route) = after_admin_error(&err);
                notice.set(Some(message));
                if let Some(route) = route {
                    go(navigator.as_ref(), route);
                }
            }
        }
    });
}

fn build_navigate(state: &AppState, navigator: Option<Navigator>) -> Callback<Route> {
    let notice = state.notice.clone();
    Callback::from(move |route: Route| {
        notice.set(None);
        go(navigator.as_ref(), route);
    })
}

fn build_dismiss(state: &AppState) -> Callback<()> {
    let notice = state.notice.clone();
    Callback::from(move |()| notice.set(None))
}

fn build_login(state: &AppState, shop: &Shop, navigator: Option<Navigator>) -> Callback<Credentials> {
    let state = state.clone();
    let shop = Rc::clone(shop);
    Callback::from(move |creds: Credentials| {
        let state = state.clone();
        let shop = Rc::clone(&shop);
        let navigator = navigator.clone();
        state.busy.set(true);
        spawn_local(async move {
            match shop.login(&creds).await {
                Ok(success) => {
                    let landing = Route::landing_for(&success.session);
                    state.session.set(success.session);
                    state.notice.set(Some(Notice::success(success.message)));
                    go(navigator.as_ref(), landing);
                }
                Err(err) => state.notice.set(Some(Notice::error(auth_message(&err)))),
            }
            state.busy.set(false);
        });
    })
}

fn build_logout(state: &AppState, shop: &Shop, navigator: Option<Navigator>) -> Callback<()> {
    let state = state.clone();
    let shop = Rc::clone(shop);
    Callback::from(move |()| match shop.logout() {
        Ok(session) => {
            state.session.set(session);
            state.history.set(None);
            state.dashboard.set(None);
            state.mobile.set(None);
            state.notice.set(Some(Notice::info("You have been logged out.")));
            go(navigator.as_ref(), Route::Home);
        }
        Err(err) => state.notice.set(Some(Notice::error(auth_message(&err)))),
    })
}

fn build_register(
    state: &AppState,
    shop: &Shop,
    navigator: Option<Navigator>,
) -> Callback<Registration> {
    let state = state.clone();
    let shop = Rc::clone(shop);
    Callback::from(move |form: Registration| {
        let state = state.clone();
        let shop = Rc::clone(&shop);
        let navigator = navigator.clone();
        state.busy.set(true);
        spawn_local(async move {
            match shop.register(&form).await {
                Ok(message) => {
                    state.notice.set(Some(Notice::success(message)));
                    go(navigator.as_ref(), Route::Login);
                }
                Err(err) => state.notice.set(Some(Notice::error(auth_message(&err)))),
            }
            state.busy.set(false);
        });
    })
}

fn build_proceed(state: &AppState, shop: &Shop, navigator: Option<Navigator>) -> Callback<String> {
    let state = state.clone();
    let shop = Rc::clone(shop);
    Callback::from(move |mobile: String| {
        match shop.enter_mobile(&state.session, &mobile) {
            Ok(entry) => {
                if entry == MobileEntry::Proceed {
                    state.mobile.set(Some(mobile));
                }
                let (notice, route) = after_mobile(entry);
                state.notice.set(notice);
                go(navigator.as_ref(), route);
            }
            Err(err) => state.notice.set(Some(Notice::error(err.to_string()))),
        }
    })
}

fn build_recharge(state: &AppState, shop: &Shop, navigator: Option<Navigator>) -> Callback<Plan> {
    let state = state.clone();
    let shop = Rc::clone(shop);
    Callback::from(move |plan: Plan| {
        if *state.busy {
            return;
        }
        let state = state.clone();
        let shop = Rc::clone(&shop);
        let navigator = navigator.clone();
        let session = (*state.session).clone();
        state.busy.set(true);
        spawn_local(async move {
            let outcome = shop.submit_recharge(&session, &plan, Utc::now()).await;
            let (notice, route) = after_recharge(&outcome);
            state.notice.set(Some(notice));
            state.busy.set(false);
            if let Some(route) = route {
                go(navigator.as_ref(), route);
            }
        });
    })
}

fn build_create_plan(
    state: &AppState,
    shop: &Shop,
    navigator: Option<Navigator>,
) -> Callback<PlanDraft> {
    let state = state.clone();
    let shop = Rc::clone(shop);
    Callback::from(move |draft: PlanDraft| {
        let state = state.clone();
        let shop = Rc::clone(&shop);
        let navigator = navigator.clone();
        let session = (*state.session).clone();
        state.busy.set(true);
        spawn_local(async move {
            let result = shop.create_plan(&session, &draft).await;
            apply_plan_change(&state, navigator.as_ref(), result);
        });
    })
}

fn build_update_plan(
    state: &AppState,
    shop: &Shop,
    navigator: Option<Navigator>,
) -> Callback<(String, PlanDraft)> {
    let state = state.clone();
    let shop = Rc::clone(shop);
    Callback::from(move |(id, draft): (String, PlanDraft)| {
        let state = state.clone();
        let shop = Rc::clone(&shop);
        let navigator = navigator.clone();
        let session = (*state.session).clone();
        state.busy.set(true);
        spawn_local(async move {
            let result = shop.update_plan(&session, &id, &draft).await;
            apply_plan_change(&state, navigator.as_ref(), result);
        });
    })
}

fn build_delete_plan(
    state: &AppState,
    shop: &Shop,
    navigator: Option<Navigator>,
) -> Callback<String> {
    let state = state.clone();
    let shop = Rc::clone(shop);
    Callback::from(move |id: String| {
        let state = state.clone();
        let shop = Rc::clone(&shop);
        let navigator = navigator.clone();
        let session = (*state.session).clone();
        state.busy.set(true);
        spawn_local(async move {
            let result = shop.delete_plan(&session, &id).await;
            apply_plan_change(&state, navigator.as_ref(), result);
        });
    })
}

fn apply_plan_change(
    state: &AppState,
    navigator: Option<&Navigator>,
    result: Result<recharge_core::PlanChange, recharge_core::AdminError>,
) {
    match result {
        Ok(change) => {
            state.plans.set(change.plans);
            state.notice.set(Some(Notice::success(change.message)));
        }
        Err(err) => {
            let (notice, route) = after_admin_error(&err);
            state.notice.set(Some(notice));
            if let Some(route) = route {
                go(navigator, route);
            }
        }
    }
    state.busy.set(false);
}
