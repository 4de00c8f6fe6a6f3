use std::{cell::Cell, rc::Rc};
use xylem::{memo, Element, Memo, Props, Value};


fn counted(calls: &Rc<Cell<usize>>) -> Rc<Memo> {
	let calls = Rc::clone(calls);
	memo("Counted", move |props| {
		calls.set(calls.get() + 1);
		Ok(Element::host("p", props.clone(), Vec::<Element>::new()))
	})
}

#[test]
fn shallow_equal_props_invoke_once() {
	log_::init();
	let calls = Rc::new(Cell::new(0));
	let memo = counted(&calls);

	let first = memo.call(&Props::new().with("a", 1).with("b", "two")).unwrap();
	let second = memo.call(&Props::new().with("b", "two").with("a", 1)).unwrap();

	assert!(!first.from_cache);
	assert!(second.from_cache);
	assert_eq!(calls.get(), 1);
	assert_eq!(second.element.props().get("b"), Some(&Value::from("two")));
}

#[test]
fn changed_props_invoke_again() {
	log_::init();
	let calls = Rc::new(Cell::new(0));
	let memo = counted(&calls);

	memo.call(&Props::new().with("a", 1)).unwrap();
	assert!(!memo.call(&Props::new().with("a", 2)).unwrap().from_cache);
	assert!(!memo.call(&Props::new().with("a", 2).with("b", 3)).unwrap().from_cache);
	assert!(!memo.call(&Props::new()).unwrap().from_cache);
	assert_eq!(calls.get(), 4);
}

#[test]
fn only_consecutive_calls_are_cached() {
	log_::init();
	let calls = Rc::new(Cell::new(0));
	let memo = counted(&calls);

	memo.call(&Props::new().with("a", 1)).unwrap();
	memo.call(&Props::new().with("a", 2)).unwrap();
	assert!(!memo.call(&Props::new().with("a", 1)).unwrap().from_cache);
	assert_eq!(calls.get(), 3);
}

#[test]
fn shared_values_compare_by_identity() {
	log_::init();
	let calls = Rc::new(Cell::new(0));
	let memo = counted(&calls);

	let shared = Value::shared(vec![1, 2, 3]);
	memo.call(&Props::new().with("items", shared.clone())).unwrap();
	assert!(memo.call(&Props::new().with("items", shared)).unwrap().from_cache);

	// Equal content, but a different allocation.
	assert!(!memo.call(&Props::new().with("items", Value::shared(vec![1, 2, 3]))).unwrap().from_cache);
	assert_eq!(calls.get(), 2);
}

#[test]
fn nan_is_never_cached() {
	log_::init();
	let calls = Rc::new(Cell::new(0));
	let memo = counted(&calls);

	memo.call(&Props::new().with("x", f64::NAN)).unwrap();
	assert!(!memo.call(&Props::new().with("x", f64::NAN)).unwrap().from_cache);
	assert_eq!(calls.get(), 2);
}

#[test]
fn reset() {
	log_::init();
	let calls = Rc::new(Cell::new(0));
	let memo = counted(&calls);
	let props = Props::new().with("a", true);

	memo.call(&props).unwrap();
	assert!(memo.is_cached(&props));
	memo.reset();
	assert!(!memo.is_cached(&props));
	assert!(!memo.call(&props).unwrap().from_cache);
	assert_eq!(calls.get(), 2);
}

#[test]
fn failure_keeps_cache() {
	log_::init();
	let memo = memo("Picky", |props| match props.get("ok").and_then(Value::as_bool) {
		Some(true) => Ok(Element::text("fine")),
		_ => Err("not ok".into()),
	});
	let good = Props::new().with("ok", true);

	assert!(!memo.call(&good).unwrap().from_cache);
	assert!(memo.call(&Props::new().with("ok", false)).is_err());
	assert!(memo.call(&good).unwrap().from_cache);
}
