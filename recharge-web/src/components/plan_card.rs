use recharge_core::{Plan, classify};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub plan: Plan,
    pub on_recharge: Callback<Plan>,
    #[prop_or_default]
    pub busy: bool,
}

#[function_component(PlanCard)]
pub fn plan_card(p: &Props) -> Html {
    let plan = &p.plan;
    let onclick = {
        let cb = p.on_recharge.clone();
        let plan = plan.clone();
        Callback::from(move |_| cb.emit(plan.clone()))
    };
    html! {
        <article class="plan-card" data-testid="plan-card" data-category={classify(plan).slug()}>
            if plan.popular {
                <span class="plan-card__badge">{ "Popular" }</span>
            }
            <h3 class="plan-card__price">{ format!("₹{}", plan.price) }</h3>
            <dl class="plan-card__facts">
                <dt>{ "Validity" }</dt><dd>{ plan.validity.clone() }</dd>
                <dt>{ "Data" }</dt><dd>{ plan.data.clone() }</dd>
                <dt>{ "Calls" }</dt><dd>{ plan.call.clone() }</dd>
            </dl>
            if !plan.description.trim().is_empty() {
                <p class="plan-card__description">{ plan.description.clone() }</p>
            }
            <p class="plan-card__operator">{ plan.operator.clone() }</p>
            <button type="button" class="plan-card__cta" disabled={p.busy} {onclick}
                data-testid={format!("recharge-{}", plan.id)}>
                { "Recharge" }
            </button>
        </article>
    }
}
