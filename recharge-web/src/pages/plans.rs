use recharge_core::{Category, Plan, plans_in_category};
use yew::prelude::*;

use crate::components::category_tabs::CategoryTabs;
use crate::components::plan_card::PlanCard;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub plans: Vec<Plan>,
    #[prop_or_default]
    pub loading: bool,
    /// A recharge is in flight; plan buttons are disabled.
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub mobile: Option<AttrValue>,
    pub on_recharge: Callback<Plan>,
}

#[function_component(PlansPage)]
pub fn plans_page(p: &Props) -> Html {
    let active = use_state(|| Category::Recommended);
    let on_select = {
        let active = active.clone();
        Callback::from(move |category: Category| active.set(category))
    };
    let visible = plans_in_category(&p.plans, *active);

    let body = if p.loading {
        html! { <p class="muted" role="status" data-testid="plans-loading">{ "Loading plans..." }</p> }
    } else if visible.is_empty() {
        html! {
            <p class="muted" data-testid="plans-empty">
                { format!("No {} plans available right now.", active.label()) }
            </p>
        }
    } else {
        html! {
            <div class="plan-grid" role="tabpanel" aria-labelledby={format!("tab-{}", active.slug())}>
                { for visible.into_iter().map(|plan| html! {
                    <PlanCard
                        key={plan.id.clone()}
                        plan={plan.clone()}
                        on_recharge={p.on_recharge.clone()}
                        busy={p.busy}
                    />
                }) }
            </div>
        }
    };

    html! {
        <section class="panel plans" aria-labelledby="plans-title">
            <h1 id="plans-title">{ "Recharge plans" }</h1>
            if let Some(mobile) = p.mobile.clone() {
                <p class="muted" data-testid="plans-mobile">{ format!("Recharging {mobile}") }</p>
            }
            <CategoryTabs active={*active} {on_select} />
            { body }
        </section>
    }
}
