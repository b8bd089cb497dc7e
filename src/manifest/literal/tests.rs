use super::{Indent, LiteralOptions, render, render_value};
use crate::manifest::value::{EntryValue, InterfaceValue, MappingValue, PointerValue, RecordValue, SequenceValue, Value};

fn record(type_name: &str, fields: Vec<(&str, Value)>) -> Value {
	fields
		.into_iter()
		.fold(RecordValue::builder(type_name), |builder, (name, value)| builder.field(name, value))
		.into_value()
}

fn strings(items: &[&str]) -> Value {
	Value::Sequence(SequenceValue::new("[]string", items.iter().map(|item| Value::string(*item)).collect()))
}

#[test]
fn scalar_zero_values_are_empty() {
	assert!(render(&Value::string("")).empty);
	assert!(render(&Value::Bool(false)).empty);
	assert!(render(&Value::Int(0)).empty);
	assert!(render(&Value::Uint(0)).empty);

	assert!(!render(&Value::string("x")).empty);
	assert!(!render(&Value::Bool(true)).empty);
	assert!(!render(&Value::Int(-3)).empty);
	assert!(!render(&Value::Uint(7)).empty);
}

#[test]
fn float_zero_is_never_empty() {
	let out = render(&Value::Float(0.0));
	assert_eq!(out.text, "0");
	assert!(!out.empty);

	assert_eq!(render(&Value::Float(1.5)).text, "1.5");
}

#[test]
fn floats_switch_to_exponent_form_outside_small_range() {
	let cases = [
		(1e6, "1e+06"),
		(1e-7, "1e-07"),
		(1_234_567.0, "1.234567e+06"),
		(-2.5e-5, "-2.5e-05"),
		(1e21, "1e+21"),
		(123_456.0, "123456"),
		(0.0001, "0.0001"),
		(-0.5, "-0.5"),
		(f64::INFINITY, "+Inf"),
		(f64::NAN, "NaN"),
	];
	for (value, expected) in cases {
		assert_eq!(render(&Value::Float(value)).text, expected, "{value:?}");
	}
}

#[test]
fn scalars_render_as_literals() {
	assert_eq!(render(&Value::string("m4.xlarge")).text, "\"m4.xlarge\"");
	assert_eq!(render(&Value::Bool(true)).text, "true");
	assert_eq!(render(&Value::Bool(false)).text, "false");
	assert_eq!(render(&Value::Int(-42)).text, "-42");
	assert_eq!(render(&Value::Uint(u64::MAX)).text, "18446744073709551615");
}

#[test]
fn strings_escape_quotes_and_controls() {
	assert_eq!(render(&Value::string("a\"b\\c")).text, r#""a\"b\\c""#);
	assert_eq!(render(&Value::string("line\nnext\t")).text, r#""line\nnext\t""#);
	assert_eq!(render(&Value::string("\u{1}")).text, r#""\u0001""#);
}

#[test]
fn null_pointer_renders_marker() {
	let out = render(&Value::Pointer(PointerValue::null("*v1.LocalObjectReference")));
	assert_eq!(out.text, "*v1.LocalObjectReference(nil)");
	assert!(out.empty);
}

#[test]
fn record_drops_empty_fields() {
	let out = render(&record("pkg.R", vec![("A", Value::string("")), ("B", Value::string("x"))]));
	assert_eq!(out.text, "pkg.R{\n\tB: \"x\",\n}");
	assert!(!out.empty);
}

#[test]
fn record_with_only_empty_fields_collapses_to_marker() {
	let out = render(&record("pkg.R", vec![("A", Value::string("")), ("B", Value::Int(0))]));
	assert_eq!(out.text, "pkg.R{nil}");
	assert!(out.empty);
}

#[test]
fn record_without_fields_is_marker() {
	let out = render(&record("pkg.Empty", Vec::new()));
	assert_eq!(out.text, "pkg.Empty{nil}");
	assert!(out.empty);
}

#[test]
fn record_keeps_declaration_order_of_survivors() {
	let value = record(
		"pkg.R",
		vec![
			("C", Value::Int(3)),
			("A", Value::Bool(false)),
			("B", Value::string("b")),
			("D", Value::Float(0.0)),
		],
	);
	assert_eq!(render(&value).text, "pkg.R{\n\tC: 3,\n\tB: \"b\",\n\tD: 0,\n}");
}

#[test]
fn nested_records_indent_per_level() {
	let inner = record("pkg.I", vec![("X", Value::Int(1))]);
	let value = record("pkg.R", vec![("Inner", inner)]);
	assert_eq!(render(&value).text, "pkg.R{\n\tInner: pkg.I{\n\t\tX: 1,\n\t},\n}");
}

#[test]
fn nested_empty_record_is_pruned_from_parent() {
	let inner = record("pkg.I", vec![("X", Value::Int(0))]);
	let value = record("pkg.R", vec![("Inner", inner), ("Name", Value::string("n"))]);
	assert_eq!(render(&value).text, "pkg.R{\n\tName: \"n\",\n}");
}

#[test]
fn sequence_drops_empty_elements_in_order() {
	let out = render(&strings(&["", "y", "", "z"]));
	assert_eq!(out.text, "[]string{\n\t\"y\",\n\t\"z\",\n}");
	assert!(!out.empty);
}

#[test]
fn sequence_of_empty_elements_collapses_to_marker() {
	let out = render(&strings(&["", ""]));
	assert_eq!(out.text, "[]string{nil}");
	assert!(out.empty);

	let out = render(&strings(&[]));
	assert_eq!(out.text, "[]string{nil}");
	assert!(out.empty);
}

#[test]
fn mapping_keeps_empty_entries() {
	let value = Value::Mapping(MappingValue::new(
		"map[string]string",
		vec![EntryValue::new("k1", Value::string("")), EntryValue::new("k2", Value::string("v"))],
	));
	let out = render(&value);
	assert_eq!(out.text, "map[string]string{\n\"k1\": \"\",\n\"k2\": \"v\",\n}");
	assert!(!out.empty);
}

#[test]
fn mapping_entries_show_child_markers() {
	let value = Value::Mapping(MappingValue::new(
		"map[string]pkg.R",
		vec![EntryValue::new("k", record("pkg.R", vec![("A", Value::string(""))]))],
	));
	let out = render(&value);
	assert_eq!(out.text, "map[string]pkg.R{\n\"k\": pkg.R{nil},\n}");
	assert!(!out.empty);
}

#[test]
fn empty_mapping_is_marker() {
	let out = render(&Value::Mapping(MappingValue::new("map[string]string", Vec::new())));
	assert_eq!(out.text, "map[string]string{nil}");
	assert!(out.empty);
}

#[test]
fn mapping_inside_record_uses_record_depth() {
	let labels = Value::Mapping(MappingValue::new("map[string]string", vec![EntryValue::new("app", Value::string("web"))]));
	let value = record("v1.ObjectMeta", vec![("Labels", labels)]);
	assert_eq!(render(&value).text, "v1.ObjectMeta{\n\tLabels: map[string]string{\n\t\"app\": \"web\",\n\t},\n}");
}

#[test]
fn pointer_to_empty_record_is_empty_but_wrapped() {
	let target = record("pkg.R", vec![("A", Value::string(""))]);
	let out = render(&Value::Pointer(PointerValue::to("*pkg.R", target)));
	assert_eq!(out.text, "&pkg.R{nil}");
	assert!(out.empty);
}

#[test]
fn pointer_to_populated_record_is_not_empty() {
	let target = record("pkg.R", vec![("B", Value::string("x"))]);
	let out = render(&Value::Pointer(PointerValue::to("*pkg.R", target)));
	assert_eq!(out.text, "&pkg.R{\n\t\tB: \"x\",\n\t}");
	assert!(!out.empty);
}

#[test]
fn pointer_to_false_is_pruned_from_record() {
	let flag = Value::Pointer(PointerValue::to("*bool", Value::Bool(false)));
	let value = record("pkg.R", vec![("PublicIP", flag), ("Name", Value::string("n"))]);
	assert_eq!(render(&value).text, "pkg.R{\n\tName: \"n\",\n}");
}

#[test]
fn interface_unwraps_without_wrapping() {
	let out = render(&Value::Interface(InterfaceValue::of("interface {}", Value::string("x"))));
	assert_eq!(out.text, "\"x\"");
	assert!(!out.empty);

	let out = render(&Value::Interface(InterfaceValue::of("interface {}", Value::Int(0))));
	assert!(out.empty);
}

#[test]
fn nil_interface_is_guarded_marker() {
	let out = render(&Value::Interface(InterfaceValue::nil("interface {}")));
	assert_eq!(out.text, "interface {}(nil)");
	assert!(out.empty);
}

#[test]
fn depth_does_not_change_emptiness() {
	let values = [
		record("pkg.R", vec![("A", Value::string(""))]),
		record("pkg.R", vec![("A", Value::string("a"))]),
		strings(&["", ""]),
		Value::Float(0.0),
	];
	for value in &values {
		let shallow = render(value);
		let deep = render_value(value, 7, &LiteralOptions::default());
		assert_eq!(shallow.empty, deep.empty);
	}
}

#[test]
fn space_indent_is_configurable() {
	let options = LiteralOptions { indent: Indent::Spaces(2) };
	let inner = record("pkg.I", vec![("X", Value::Int(1))]);
	let value = record("pkg.R", vec![("Inner", inner)]);
	assert_eq!(render_value(&value, 0, &options).text, "pkg.R{\n  Inner: pkg.I{\n    X: 1,\n  },\n}");
}

#[test]
fn rendering_is_repeatable_and_does_not_mutate() {
	let value = record(
		"pkg.R",
		vec![("Items", strings(&["a", "", "b"])), ("Ptr", Value::Pointer(PointerValue::null("*pkg.R")))],
	);
	let snapshot = value.clone();
	let first = render(&value);
	let second = render(&value);
	assert_eq!(first, second);
	assert_eq!(value, snapshot);
}
