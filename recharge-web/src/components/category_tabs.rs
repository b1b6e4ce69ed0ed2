use recharge_core::Category;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub active: Category,
    pub on_select: Callback<Category>,
}

#[function_component(CategoryTabs)]
pub fn category_tabs(p: &Props) -> Html {
    html! {
        <div class="category-tabs" role="tablist" aria-label="Plan categories">
            { for Category::ALL.into_iter().map(|category| {
                let selected = category == p.active;
                let onclick = {
                    let cb = p.on_select.clone();
                    Callback::from(move |_| cb.emit(category))
                };
                html! {
                    <button
                        type="button"
                        role="tab"
                        id={format!("tab-{}", category.slug())}
                        class={if selected { "tab tab--active" } else { "tab" }}
                        aria-selected={selected.to_string()}
                        data-testid={format!("tab-{}", category.slug())}
                        {onclick}
                    >
                        { category.label() }
                    </button>
                }
            }) }
        </div>
    }
}
