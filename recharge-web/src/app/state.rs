use recharge_core::{AdminDashboard, HistoryView, Plan, Session};
use yew::prelude::*;

use crate::components::notice::Notice;

#[derive(Clone)]
pub struct AppState {
    pub session: UseStateHandle<Session>,
    pub notice: UseStateHandle<Option<Notice>>,
    pub plans: UseStateHandle<Vec<Plan>>,
    pub plans_loading: UseStateHandle<bool>,
    pub history: UseStateHandle<Option<HistoryView>>,
    pub dashboard: UseStateHandle<Option<AdminDashboard>>,
    pub mobile: UseStateHandle<Option<String>>,
    pub busy: UseStateHandle<bool>,
}

#[hook]
pub fn use_app_state(initial: Session) -> AppState {
    AppState {
        session: use_state(move || initial),
        notice: use_state(|| None::<Notice>),
        plans: use_state(Vec::<Plan>::new),
        plans_loading: use_state(|| false),
        history: use_state(|| None::<HistoryView>),
        dashboard: use_state(|| None::<AdminDashboard>),
        mobile: use_state(|| None::<String>),
        busy: use_state(|| false),
    }
}
