use recharge_core::Session;
use yew::prelude::*;

use crate::paths::app_href;
use crate::router::Route;
use yew_router::Routable;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub session: Session,
    pub current: Route,
    pub on_navigate: Callback<Route>,
    pub on_logout: Callback<()>,
}

fn nav_link(route: Route, current: Route, on_navigate: &Callback<Route>) -> Html {
    let onclick = {
        let cb = on_navigate.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            cb.emit(route);
        })
    };
    let class = if route == current {
        "nav-link nav-link--active"
    } else {
        "nav-link"
    };
    let aria_current = (route == current).then_some("page");
    html! {
        <a href={app_href(&route.to_path())} {class} aria-current={aria_current} {onclick}
            data-testid={format!("nav-{}", route.nav_label().to_lowercase())}>
            { route.nav_label() }
        </a>
    }
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let mut links = vec![Route::Home, Route::Plans, Route::History, Route::Contact];
    if p.session.is_admin() {
        links.push(Route::Admin);
    }
    let logout = {
        let cb = p.on_logout.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <header role="banner" class="site-header">
            <a href="#main" class="sr-only">{ "Skip to content" }</a>
            <div class="header-content">
                <span class="brand">{ "Recharge" }</span>
                <nav aria-label="Main" class="header-left">
                    { for links.into_iter().map(|route| nav_link(route, p.current, &p.on_navigate)) }
                </nav>
                <div class="header-right">
                    if p.session.logged_in {
                        <span class="header-user" data-testid="header-user">
                            { p.session.display_name().unwrap_or("Signed in").to_string() }
                        </span>
                        <button type="button" data-testid="logout" onclick={logout}>{ "Logout" }</button>
                    } else {
                        { nav_link(Route::Login, p.current, &p.on_navigate) }
                        { nav_link(Route::Register, p.current, &p.on_navigate) }
                    }
                </div>
            </div>
        </header>
    }
}
