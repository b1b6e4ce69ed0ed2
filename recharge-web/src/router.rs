use recharge_core::Session;
use yew_router::prelude::*;

#[derive(Clone, Copy, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/plans")]
    Plans,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/history")]
    History,
    #[at("/admin")]
    Admin,
    #[at("/contact")]
    Contact,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    /// Where a freshly logged-in session lands.
    #[must_use]
    pub fn landing_for(session: &Session) -> Self {
        if session.is_admin() {
            Self::Admin
        } else {
            Self::Home
        }
    }

    /// Whether viewing this route needs an admin session.
    #[must_use]
    pub const fn admin_only(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Label used in the navigation bar.
    #[must_use]
    pub const fn nav_label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Plans => "Plans",
            Self::Login => "Login",
            Self::Register => "Register",
            Self::History => "History",
            Self::Admin => "Dashboard",
            Self::Contact => "Contact",
            Self::NotFound => "Not found",
        }
    }
}
