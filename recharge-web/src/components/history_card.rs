use recharge_core::RechargeRecord;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub record: RechargeRecord,
}

#[function_component(HistoryCard)]
pub fn history_card(p: &Props) -> Html {
    let record = &p.record;
    let summary = match (record.validity.trim(), record.data.trim()) {
        ("", "") => None,
        (validity, "") => Some(validity.to_string()),
        ("", data) => Some(data.to_string()),
        (validity, data) => Some(format!("{validity} • {data}")),
    };
    html! {
        <div class="history-card" data-testid="history-card">
            <div class="history-plan">
                <h3>{ format!("₹{}", record.amount) }</h3>
                if let Some(summary) = summary {
                    <p>{ summary }</p>
                }
                if !record.call.trim().is_empty() {
                    <p>{ record.call.clone() }</p>
                }
                if !record.operator.trim().is_empty() {
                    <p>{ record.operator.clone() }</p>
                }
            </div>
            <div class="history-date">
                <p><strong>{ "Date: " }</strong>{ record.display_date() }</p>
                <p><strong>{ "Status: " }</strong>{ record.status_or_default().to_string() }</p>
            </div>
        </div>
    }
}
