use recharge_core::{Category, PlanDraft, numbers::parse_amount, validate_plan_draft};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub title: AttrValue,
    pub initial: PlanDraft,
    pub operators: Vec<String>,
    pub on_submit: Callback<PlanDraft>,
    pub on_cancel: Callback<()>,
    #[prop_or_default]
    pub busy: bool,
}

fn input_setter(
    draft: &UseStateHandle<PlanDraft>,
    apply: fn(&mut PlanDraft, String),
) -> Callback<InputEvent> {
    let draft = draft.clone();
    Callback::from(move |e: InputEvent| {
        let value = e.target_unchecked_into::<HtmlInputElement>().value();
        let mut next = (*draft).clone();
        apply(&mut next, value);
        draft.set(next);
    })
}

fn select_setter(
    draft: &UseStateHandle<PlanDraft>,
    apply: fn(&mut PlanDraft, String),
) -> Callback<Event> {
    let draft = draft.clone();
    Callback::from(move |e: Event| {
        let value = e.target_unchecked_into::<HtmlSelectElement>().value();
        let mut next = (*draft).clone();
        apply(&mut next, value);
        draft.set(next);
    })
}

/// Modal form used by the dashboard to add or edit a plan.
#[function_component(PlanForm)]
pub fn plan_form(p: &Props) -> Html {
    let draft = use_state(|| p.initial.clone());
    let error = use_state(|| None::<String>);

    let on_operator = select_setter(&draft, |d, v| d.operator = v);
    let on_category = select_setter(&draft, |d, v| d.category = v);
    let on_price = input_setter(&draft, |d, v| d.price = parse_amount(&v).unwrap_or(0));
    let on_validity = input_setter(&draft, |d, v| d.validity = v);
    let on_data = input_setter(&draft, |d, v| d.data = v);
    let on_call = input_setter(&draft, |d, v| d.call = v);
    let on_description = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*draft).clone();
            next.description = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            draft.set(next);
        })
    };
    let on_popular = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let mut next = (*draft).clone();
            next.popular = e.target_unchecked_into::<HtmlInputElement>().checked();
            draft.set(next);
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        let error = error.clone();
        let cb = p.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_plan_draft(&draft) {
                Ok(()) => {
                    error.set(None);
                    cb.emit((*draft).clone());
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        })
    };
    let cancel = {
        let cb = p.on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let price_value = if draft.price > 0 {
        draft.price.to_string()
    } else {
        String::new()
    };

    html! {
        <div class="modal-backdrop" role="presentation">
            <div class="modal" role="dialog" aria-modal="true" aria-labelledby="plan-form-title" data-testid="plan-form">
                <div class="modal__header">
                    <h2 id="plan-form-title">{ p.title.clone() }</h2>
                    <button type="button" class="modal__close" aria-label="Close dialog" onclick={cancel.clone()}>{"X"}</button>
                </div>
                <form class="modal__body plan-form" {onsubmit} novalidate=true>
                    <label for="plan-operator">{ "Operator" }</label>
                    <select id="plan-operator" onchange={on_operator}>
                        { for p.operators.iter().map(|op| html! {
                            <option value={op.clone()} selected={*op == draft.operator}>{ op.clone() }</option>
                        }) }
                    </select>

                    <label for="plan-price">{ "Price (₹)" }</label>
                    <input id="plan-price" type="number" min="1" value={price_value} oninput={on_price} />

                    <label for="plan-validity">{ "Validity" }</label>
                    <input id="plan-validity" placeholder="28 Days" value={draft.validity.clone()} oninput={on_validity} />

                    <label for="plan-data">{ "Data" }</label>
                    <input id="plan-data" placeholder="2GB/day" value={draft.data.clone()} oninput={on_data} />

                    <label for="plan-call">{ "Calls" }</label>
                    <input id="plan-call" placeholder="Unlimited" value={draft.call.clone()} oninput={on_call} />

                    <label for="plan-description">{ "Description" }</label>
                    <textarea id="plan-description" value={draft.description.clone()} oninput={on_description} />

                    <label for="plan-type">{ "Category" }</label>
                    <select id="plan-type" onchange={on_category}>
                        { for Category::ALL.into_iter().map(|c| html! {
                            <option value={c.label()} selected={c.label() == draft.category}>{ c.label() }</option>
                        }) }
                    </select>

                    <label class="plan-form__check">
                        <input type="checkbox" checked={draft.popular} onchange={on_popular} />
                        { "Mark as popular" }
                    </label>

                    if let Some(message) = (*error).clone() {
                        <p class="form-error" role="alert" data-testid="plan-form-error">{ message }</p>
                    }

                    <div class="plan-form__actions">
                        <button type="button" onclick={cancel}>{ "Cancel" }</button>
                        <button type="submit" disabled={p.busy}>{ "Save plan" }</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
