use recharge_core::{HistorySource, HistoryView};
use yew::prelude::*;

use crate::components::history_card::HistoryCard;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// `None` while the history request is in flight.
    pub view: Option<HistoryView>,
    pub on_login: Callback<()>,
}

#[function_component(HistoryPage)]
pub fn history_page(p: &Props) -> Html {
    let body = match &p.view {
        None => html! { <p class="muted" role="status" data-testid="history-loading">{ "Loading history..." }</p> },
        Some(HistoryView::LoginRequired) => {
            let onclick = {
                let cb = p.on_login.clone();
                Callback::from(move |_| cb.emit(()))
            };
            html! {
                <div class="history-login" data-testid="history-login">
                    <p>{ "Please login to view your recharge history." }</p>
                    <button type="button" {onclick}>{ "Login" }</button>
                </div>
            }
        }
        Some(HistoryView::Loaded { records, source }) => {
            let origin = match source {
                HistorySource::Remote => None,
                HistorySource::LocalCache => Some("Showing recharges saved on this device."),
            };
            html! {
                <>
                    if let Some(origin) = origin {
                        <p class="muted" data-testid="history-local">{ origin }</p>
                    }
                    if records.is_empty() {
                        <p class="muted" data-testid="history-empty">{ "No recharges yet." }</p>
                    } else {
                        <div class="history-list" data-testid="history-list">
                            { for records.iter().map(|record| html! { <HistoryCard record={record.clone()} /> }) }
                        </div>
                    }
                </>
            }
        }
    };

    html! {
        <section class="panel history" aria-labelledby="history-title">
            <h1 id="history-title">{ "Recharge history" }</h1>
            { body }
        </section>
    }
}
