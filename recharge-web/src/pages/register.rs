use recharge_core::{Registration, Role, validate_registration};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub busy: bool,
    pub on_register: Callback<Registration>,
    pub on_login: Callback<()>,
}

fn field_setter(
    form: &UseStateHandle<Registration>,
    apply: fn(&mut Registration, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let mut next = (*form).clone();
        apply(&mut next, e.target_unchecked_into::<HtmlInputElement>().value());
        form.set(next);
    })
}

#[function_component(RegisterPage)]
pub fn register_page(p: &Props) -> Html {
    let form = use_state(Registration::default);
    let error = use_state(|| None::<String>);

    let on_name = field_setter(&form, |f, v| f.name = v);
    let on_email = field_setter(&form, |f, v| f.email = v);
    let on_mobile = field_setter(&form, |f, v| f.mobile = v);
    let on_password = field_setter(&form, |f, v| f.password = v);
    let on_confirm = field_setter(&form, |f, v| f.confirm_password = v);
    let on_role = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let mut next = (*form).clone();
            next.user_type = Role::parse(&e.target_unchecked_into::<HtmlSelectElement>().value());
            form.set(next);
        })
    };
    let onsubmit = {
        let form = form.clone();
        let error = error.clone();
        let cb = p.on_register.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_registration(&form) {
                Ok(()) => {
                    error.set(None);
                    cb.emit((*form).clone());
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        })
    };
    let go_login = {
        let cb = p.on_login.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            cb.emit(());
        })
    };

    html! {
        <section class="panel auth" aria-labelledby="register-title">
            <h1 id="register-title">{ "Create an account" }</h1>
            <form class="auth-form" {onsubmit} novalidate=true>
                <label for="reg-name">{ "Name" }</label>
                <input id="reg-name" value={form.name.clone()} oninput={on_name} data-testid="register-name" />
                <label for="reg-email">{ "Email" }</label>
                <input id="reg-email" type="email" value={form.email.clone()} oninput={on_email} data-testid="register-email" />
                <label for="reg-mobile">{ "Mobile" }</label>
                <input id="reg-mobile" type="tel" value={form.mobile.clone()} oninput={on_mobile} data-testid="register-mobile" />
                <label for="reg-password">{ "Password" }</label>
                <input id="reg-password" type="password" value={form.password.clone()} oninput={on_password} data-testid="register-password" />
                <label for="reg-confirm">{ "Confirm password" }</label>
                <input id="reg-confirm" type="password" value={form.confirm_password.clone()} oninput={on_confirm} data-testid="register-confirm" />
                <label for="reg-role">{ "Account type" }</label>
                <select id="reg-role" onchange={on_role} data-testid="register-role">
                    <option value="user" selected={form.user_type == Role::User}>{ "User" }</option>
                    <option value="admin" selected={form.user_type == Role::Admin}>{ "Admin" }</option>
                </select>
                if let Some(message) = (*error).clone() {
                    <p class="form-error" role="alert" data-testid="register-error">{ message }</p>
                }
                <button type="submit" disabled={p.busy} data-testid="register-submit">{ "Register" }</button>
            </form>
            <p class="muted">
                { "Already registered? " }
                <a href="#" onclick={go_login} data-testid="to-login">{ "Login" }</a>
            </p>
        </section>
    }
}
