use yew::prelude::*;

/// Shown when no route matches the current location.
#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_go_home: Callback<()>,
}

#[function_component(NotFound)]
pub fn not_found(props: &Props) -> Html {
    let go_home = {
        let cb = props.on_go_home.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <section class="panel not-found" aria-live="assertive" data-testid="not-found">
            <h1>{ "Page not found" }</h1>
            <p>{ "The page you asked for does not exist." }</p>
            <button type="button" onclick={go_home}>{ "Back to home" }</button>
        </section>
    }
}
