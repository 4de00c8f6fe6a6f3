use std::rc::Rc;
use xylem::{component, memo, Element, MemoryHost, Props, Renderer, Value};


#[test]
fn text() {
	test_create_diff_identical_remove(|| Element::text("Hello xylem text!"), 1);
}

#[test]
fn minimal_div() {
	test_create_diff_identical_remove(|| Element::host("div", Props::new(), Vec::<Element>::new()), 1);
}

#[test]
fn attributed_div() {
	test_create_diff_identical_remove(
		|| {
			Element::host(
				"div",
				Props::new().with("id", "test-div").with("tabindex", 0).with("hidden", false).with("opacity", 0.5),
				Vec::<Element>::new(),
			)
		},
		1,
	);
}

#[test]
fn nested() {
	test_create_diff_identical_remove(
		|| {
			Element::host(
				"ul",
				Props::new(),
				vec![
					Element::host("li", Props::new(), vec![Element::text("Hello xylem")]),
					Element::host("li", Props::new(), vec![Element::text(" nested ")]),
					Element::host("li", Props::new(), vec![Element::text("nodes!")]),
				],
			)
		},
		7,
	);
}

#[test]
fn plain_component() {
	let greeting = component("Greeting", |props| Ok(Element::host("p", Props::new(), vec![Element::text(props.get("name").cloned().unwrap_or(Value::from("?")))])));
	test_create_diff_identical_remove(move || Element::component(greeting.clone(), Props::new().with("name", "xylem")), 2);
}

#[test]
fn memoized() {
	let greeting = memo("Greeting", |_| Ok(Element::host("p", Props::new(), vec![Element::text("Hello memoized!")])));
	test_create_diff_identical_remove(move || Element::component(Rc::clone(&greeting), Props::new()), 2);
}

#[test]
fn shared_prop() {
	let shared = Value::shared(String::from("not compared by content"));
	test_create_diff_identical_remove(move || Element::host("canvas", Props::new().with("data", shared.clone()), Vec::<Element>::new()), 1);
}

fn test_create_diff_identical_remove(vdom: impl Fn() -> Element, node_count: usize) {
	log_::init();

	let mut renderer = Renderer::new(MemoryHost::default());

	renderer.render(&vdom()).unwrap();
	assert_eq!(renderer.last_patches().len(), 1);
	assert_eq!(renderer.host().len(), node_count);
	let markup = renderer.host().markup();

	renderer.render(&vdom()).unwrap();
	assert!(renderer.last_patches().is_empty());
	assert_eq!(renderer.host().markup(), markup);

	renderer.unmount().unwrap();
	assert!(renderer.host().is_empty());
	assert_eq!(renderer.host().markup(), "");
}
