use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub title: AttrValue,
    pub value: AttrValue,
    #[prop_or_default]
    pub hint: Option<AttrValue>,
    #[prop_or_default]
    pub test_id: AttrValue,
}

#[function_component(StatCard)]
pub fn stat_card(p: &Props) -> Html {
    html! {
        <div class="stat-card" data-testid={p.test_id.clone()}>
            <p class="stat-card__title">{ p.title.clone() }</p>
            <p class="stat-card__value">{ p.value.clone() }</p>
            if let Some(hint) = p.hint.clone() {
                <p class="stat-card__hint">{ hint }</p>
            }
        </div>
    }
}
