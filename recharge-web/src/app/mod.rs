#[cfg(target_arch = "wasm32")]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

#[cfg(target_arch = "wasm32")]
pub mod handlers;
pub mod routing;
#[cfg(target_arch = "wasm32")]
pub mod state;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppInner />
        </BrowserRouter>
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(AppInner)]
pub fn app_inner() -> Html {
    use crate::components::{footer::Footer, header::Header, notice::NoticeBar};
    use crate::pages::{
        admin::AdminPage, contact::ContactPage, history::HistoryPage, home::HomePage,
        login::LoginPage, not_found::NotFound, plans::PlansPage, register::RegisterPage,
    };
    use routing::RouteEntry;

    let shop = use_memo((), |_| crate::platform::create_web_storefront());
    let initial = use_memo((), {
        let shop = shop.clone();
        move |_| shop.restore_session()
    });
    let state = state::use_app_state((*initial).clone());
    let navigator = use_navigator();
    let route = use_route::<Route>().unwrap_or(Route::NotFound);
    let handlers = handlers::AppHandlers::new(&state, &shop, navigator.clone());

    {
        let state = state.clone();
        let shop = shop.clone();
        let navigator = navigator.clone();
        use_effect_with((route, (*state.session).clone()), move |(route, session)| {
            match routing::entry_for(*route, session) {
                RouteEntry::Idle => {}
                RouteEntry::LoadCatalog => handlers::load_catalog(&state, &shop),
                RouteEntry::LoadHistory => handlers::load_history(&state, &shop),
                RouteEntry::LoadDashboard => {
                    handlers::load_catalog(&state, &shop);
                    handlers::load_dashboard(&state, &shop, navigator);
                }
                RouteEntry::RedirectToLogin => {
                    log::warn!("admin view requested without an admin session");
                    if let Some(nav) = navigator {
                        nav.push(&Route::Login);
                    }
                }
            }
            || ()
        });
    }

    let operators = shop.config().operators.clone();
    let go_login = {
        let cb = handlers.navigate.clone();
        Callback::from(move |()| cb.emit(Route::Login))
    };
    let go_register = {
        let cb = handlers.navigate.clone();
        Callback::from(move |()| cb.emit(Route::Register))
    };
    let go_home = {
        let cb = handlers.navigate.clone();
        Callback::from(move |()| cb.emit(Route::Home))
    };

    let view = match route {
        Route::Home => html! {
            <HomePage
                operators={operators}
                initial_mobile={state.mobile.as_deref().map(AttrValue::from).unwrap_or_default()}
                on_proceed={handlers.proceed.clone()}
            />
        },
        Route::Plans => html! {
            <PlansPage
                plans={(*state.plans).clone()}
                loading={*state.plans_loading}
                busy={*state.busy}
                mobile={state.mobile.as_deref().map(AttrValue::from)}
                on_recharge={handlers.recharge.clone()}
            />
        },
        Route::Login => html! {
            <LoginPage busy={*state.busy} on_login={handlers.login.clone()} on_register={go_register} />
        },
        Route::Register => html! {
            <RegisterPage busy={*state.busy} on_register={handlers.register.clone()} on_login={go_login.clone()} />
        },
        Route::History => html! {
            <HistoryPage view={(*state.history).clone()} on_login={go_login} />
        },
        Route::Admin => html! {
            <AdminPage
                dashboard={(*state.dashboard).clone()}
                plans={(*state.plans).clone()}
                operators={operators}
                default_operator={AttrValue::from(shop.config().default_operator.clone())}
                busy={*state.busy}
                on_create={handlers.create_plan.clone()}
                on_update={handlers.update_plan.clone()}
                on_delete={handlers.delete_plan.clone()}
            />
        },
        Route::Contact => html! { <ContactPage /> },
        Route::NotFound => html! { <NotFound on_go_home={go_home} /> },
    };

    html! {
        <>
            <Header
                session={(*state.session).clone()}
                current={route}
                on_navigate={handlers.navigate.clone()}
                on_logout={handlers.logout.clone()}
            />
            <NoticeBar notice={(*state.notice).clone()} on_dismiss={handlers.dismiss.clone()} />
            <main id="main" class="container">{ view }</main>
            <Footer />
        </>
    }
}
