use recharge_core::{sanitize_mobile_input, validate_mobile};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub operators: Vec<String>,
    #[prop_or_default]
    pub initial_mobile: AttrValue,
    /// Receives a mobile number that already passed validation.
    pub on_proceed: Callback<String>,
}

#[function_component(HomePage)]
pub fn home_page(p: &Props) -> Html {
    let mobile = use_state(|| sanitize_mobile_input(&p.initial_mobile));
    let operator = use_state(|| p.operators.first().cloned().unwrap_or_default());
    let error = use_state(|| None::<String>);

    let oninput = {
        let mobile = mobile.clone();
        let error = error.clone();
        Callback::from(move |e: InputEvent| {
            let input = e.target_unchecked_into::<HtmlInputElement>();
            let clean = sanitize_mobile_input(&input.value());
            input.set_value(&clean);
            mobile.set(clean);
            error.set(None);
        })
    };
    let onchange = {
        let operator = operator.clone();
        Callback::from(move |e: Event| {
            operator.set(e.target_unchecked_into::<HtmlSelectElement>().value());
        })
    };
    let onsubmit = {
        let mobile = mobile.clone();
        let error = error.clone();
        let cb = p.on_proceed.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_mobile(&mobile) {
                Ok(()) => cb.emit((*mobile).clone()),
                Err(err) => error.set(Some(err.to_string())),
            }
        })
    };

    html! {
        <section class="panel home" aria-labelledby="home-title">
            <h1 id="home-title">{ "Recharge your mobile" }</h1>
            <p class="muted">{ "Enter your number to see the plans available for it." }</p>
            <form class="mobile-form" {onsubmit} novalidate=true>
                <label for="mobile-input">{ "Mobile number" }</label>
                <input
                    id="mobile-input"
                    type="tel"
                    inputmode="numeric"
                    maxlength="10"
                    placeholder="10 digit mobile number"
                    value={(*mobile).clone()}
                    aria-invalid={error.is_some().to_string()}
                    data-testid="mobile-input"
                    {oninput}
                />
                <label for="operator-select">{ "Operator" }</label>
                <select id="operator-select" data-testid="operator-select" {onchange}>
                    { for p.operators.iter().map(|op| html! {
                        <option value={op.clone()} selected={*op == *operator}>{ op.clone() }</option>
                    }) }
                </select>
                if let Some(message) = (*error).clone() {
                    <p class="form-error" role="alert" data-testid="mobile-error">{ message }</p>
                }
                <button type="submit" data-testid="proceed">{ "View plans" }</button>
            </form>
        </section>
    }
}
