use yew::prelude::*;

#[function_component(ContactPage)]
pub fn contact_page() -> Html {
    html! {
        <section class="panel contact" aria-labelledby="contact-title" data-testid="contact">
            <h1 id="contact-title">{ "Contact us" }</h1>
            <p>{ "Questions about a recharge or a plan? Reach the support desk." }</p>
            <ul class="contact-list">
                <li><strong>{ "Email: " }</strong><a href="mailto:support@recharge.example">{ "support@recharge.example" }</a></li>
                <li><strong>{ "Phone: " }</strong>{ "1800-000-0000" }</li>
                <li><strong>{ "Hours: " }</strong>{ "Mon to Sat, 9:00 to 18:00" }</li>
            </ul>
        </section>
    }
}
