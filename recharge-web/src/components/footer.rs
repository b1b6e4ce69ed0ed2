use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    let year = chrono::Utc::now().format("%Y").to_string();
    html! {
        <footer class="site-footer">
            { format!("© {year} Recharge. Instant mobile recharges for Airtel, Jio, VI and BSNL.") }
        </footer>
    }
}
