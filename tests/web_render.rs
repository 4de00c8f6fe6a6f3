#![cfg(all(target_arch = "wasm32", feature = "web"))]

use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::window;
use xylem::{component, web::DomHost, Element, Props, Renderer, Value};

wasm_bindgen_test_configure!(run_in_browser);

static mut LOG_INITIALIZED: bool = false;

fn renderer() -> (web_sys::Element, Renderer<DomHost>) {
	unsafe {
		if !LOG_INITIALIZED {
			//TODO: Fail on warnings or errors.
			tracing_wasm::set_as_global_default();
			LOG_INITIALIZED = true;
		}
	}

	let container = window().unwrap().document().unwrap().create_element("div").unwrap();
	let host = DomHost::new_for_element_child_nodes(container.clone()).unwrap();
	(container, Renderer::new(host))
}

#[wasm_bindgen_test]
fn create_update_remove() {
	let (container, mut renderer) = renderer();
	let vdom = |text: &str, class: Option<&str>| {
		let mut props = Props::new();
		if let Some(class) = class {
			props.insert("class", class);
		}
		Element::host("p", props, vec![Element::text(text)])
	};

	renderer.render(&vdom("Hello", Some("greeting"))).unwrap();
	assert_eq!(container.inner_html(), r#"<p data-xylem-id="r/" class="greeting">Hello</p>"#);

	renderer.render(&vdom("Goodbye", None)).unwrap();
	assert_eq!(container.inner_html(), r#"<p data-xylem-id="r/">Goodbye</p>"#);

	renderer.unmount().unwrap();
	assert_eq!(container.inner_html(), "");
}

#[wasm_bindgen_test]
fn replace_keeps_position() {
	let (container, mut renderer) = renderer();
	let toggle = component("Toggle", |props| {
		let tag = if props.get("on").and_then(Value::as_bool) == Some(true) { "b" } else { "i" };
		Ok(Element::host(tag, Props::new(), Vec::<Element>::new()))
	});
	let vdom = |on: bool| Element::host("div", Props::new(), vec![Element::component(toggle.clone(), Props::new().with("on", on)), Element::text("!")]);

	renderer.render(&vdom(true)).unwrap();
	assert_eq!(container.inner_html(), r#"<div data-xylem-id="r/"><b data-xylem-id="r/0/"></b>!</div>"#);

	renderer.render(&vdom(false)).unwrap();
	assert_eq!(container.inner_html(), r#"<div data-xylem-id="r/"><i data-xylem-id="r/0/"></i>!</div>"#);
}
