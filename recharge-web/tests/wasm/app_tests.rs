#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlElement, HtmlInputElement, InputEvent};
use yew::Renderer;

use recharge_web::app::App;
use recharge_web::dom;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document().expect("document");
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

async fn render_app() {
    dom::local_storage().expect("storage").clear().expect("clear storage");
    Renderer::<App>::with_root(ensure_app_root()).render();
    yew::platform::time::sleep(std::time::Duration::from_millis(50)).await;
}

fn by_testid(id: &str) -> Option<web_sys::Element> {
    dom::document()
        .expect("document")
        .query_selector(&format!("[data-testid='{id}']"))
        .expect("query")
}

#[wasm_bindgen_test]
async fn anonymous_header_offers_login_and_register() {
    render_app().await;
    assert!(by_testid("nav-login").is_some());
    assert!(by_testid("nav-register").is_some());
    assert!(by_testid("logout").is_none());
    let main = dom::document()
        .expect("document")
        .get_element_by_id("main")
        .expect("main landmark");
    assert_eq!(main.tag_name(), "MAIN");
}

#[wasm_bindgen_test]
async fn short_mobile_number_shows_inline_error() {
    render_app().await;
    let input: HtmlInputElement = by_testid("mobile-input")
        .expect("mobile input")
        .dyn_into()
        .expect("input element");
    input.set_value("12345");
    let event = InputEvent::new("input").expect("input event");
    input.dispatch_event(&event).expect("dispatch input");
    yew::platform::time::sleep(std::time::Duration::from_millis(20)).await;

    let proceed: HtmlElement = by_testid("proceed")
        .expect("proceed button")
        .dyn_into()
        .expect("button element");
    proceed.click();
    yew::platform::time::sleep(std::time::Duration::from_millis(20)).await;

    let error = by_testid("mobile-error").expect("inline error");
    assert!(
        error
            .text_content()
            .unwrap_or_default()
            .contains("10 digits")
    );
}
