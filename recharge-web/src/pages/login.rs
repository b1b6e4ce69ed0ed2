use recharge_core::{Credentials, validate_login};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub busy: bool,
    pub on_login: Callback<Credentials>,
    pub on_register: Callback<()>,
}

#[function_component(LoginPage)]
pub fn login_page(p: &Props) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let errors = use_state(Vec::<String>::new);

    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            email.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            password.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let errors = errors.clone();
        let cb = p.on_login.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let creds = Credentials {
                email: email.trim().to_string(),
                password: (*password).clone(),
            };
            match validate_login(&creds) {
                Ok(()) => {
                    errors.set(Vec::new());
                    cb.emit(creds);
                }
                Err(found) => errors.set(found.iter().map(ToString::to_string).collect()),
            }
        })
    };
    let go_register = {
        let cb = p.on_register.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            cb.emit(());
        })
    };

    html! {
        <section class="panel auth" aria-labelledby="login-title">
            <h1 id="login-title">{ "Login" }</h1>
            <form class="auth-form" {onsubmit} novalidate=true>
                <label for="login-email">{ "Email" }</label>
                <input id="login-email" type="email" autocomplete="email"
                    value={(*email).clone()} oninput={on_email} data-testid="login-email" />
                <label for="login-password">{ "Password" }</label>
                <input id="login-password" type="password" autocomplete="current-password"
                    value={(*password).clone()} oninput={on_password} data-testid="login-password" />
                if !errors.is_empty() {
                    <ul class="form-error" role="alert" data-testid="login-errors">
                        { for errors.iter().map(|msg| html! { <li>{ msg.clone() }</li> }) }
                    </ul>
                }
                <button type="submit" disabled={p.busy} data-testid="login-submit">{ "Login" }</button>
            </form>
            <p class="muted">
                { "No account yet? " }
                <a href="#" onclick={go_register} data-testid="to-register">{ "Register" }</a>
            </p>
        </section>
    }
}
