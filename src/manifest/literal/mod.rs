//! Zero-pruning source literal renderer for decoded values.
//!
//! Records and sequences drop children that render empty and collapse to a
//! `Type{nil}` marker once nothing survives. Mapping entries are always
//! emitted, and floats never count as empty.

use tracing::trace;

use crate::manifest::value::{InterfaceValue, MappingValue, PointerValue, RecordValue, SequenceValue, Value};

/// Indentation unit emitted once per nesting level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Indent {
	/// One tab per level.
	#[default]
	Tab,
	/// `n` spaces per level.
	Spaces(u8),
}

impl Indent {
	fn pad(self, depth: usize) -> String {
		match self {
			Self::Tab => "\t".repeat(depth),
			Self::Spaces(width) => " ".repeat(usize::from(width) * depth),
		}
	}
}

/// Formatting switches for literal rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralOptions {
	/// Indentation unit.
	pub indent: Indent,
}

/// Literal text for one subtree plus its zero-value flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
	/// Literal expression, or a nil marker when the subtree is empty.
	pub text: String,
	/// Whether the whole subtree is a zero value.
	pub empty: bool,
}

impl Rendered {
	fn new(text: String, empty: bool) -> Self {
		Self { text, empty }
	}

	fn nil_ref(type_name: &str) -> Self {
		Self::new(format!("{type_name}(nil)"), true)
	}

	fn nil_aggregate(type_name: &str) -> Self {
		Self::new(format!("{type_name}{{nil}}"), true)
	}
}

/// Render `value` at depth 0 with default options.
pub fn render(value: &Value) -> Rendered {
	render_value(value, 0, &LiteralOptions::default())
}

/// Render one value tree; `depth` only controls indentation.
pub fn render_value(value: &Value, depth: usize, options: &LiteralOptions) -> Rendered {
	match value {
		Value::Pointer(item) => render_pointer(item, depth, options),
		Value::Interface(item) => render_interface(item, depth, options),
		Value::Record(item) => render_record(item, depth, options),
		Value::Sequence(item) => render_sequence(item, depth, options),
		Value::Mapping(item) => render_mapping(item, depth, options),
		Value::String(v) => Rendered::new(quote(v), v.is_empty()),
		Value::Bool(v) => Rendered::new(v.to_string(), !*v),
		Value::Int(v) => Rendered::new(v.to_string(), *v == 0),
		Value::Uint(v) => Rendered::new(v.to_string(), *v == 0),
		Value::Float(v) => Rendered::new(format_float(*v), false),
	}
}

fn render_pointer(item: &PointerValue, depth: usize, options: &LiteralOptions) -> Rendered {
	let Some(target) = item.target() else {
		return Rendered::nil_ref(&item.type_name);
	};
	let inner = render_value(target, depth + 1, options);
	Rendered::new(format!("&{}", inner.text), inner.empty)
}

fn render_interface(item: &InterfaceValue, depth: usize, options: &LiteralOptions) -> Rendered {
	let Some(concrete) = item.concrete() else {
		return Rendered::nil_ref(&item.type_name);
	};
	trace!(interface = %item.type_name, concrete = concrete.kind().as_str(), "unwrapping interface");
	render_value(concrete, depth + 1, options)
}

fn render_record(item: &RecordValue, depth: usize, options: &LiteralOptions) -> Rendered {
	let pad = options.indent.pad(depth + 1);
	let lines = item
		.fields()
		.filter_map(|(name, value)| {
			let child = render_value(value, depth + 1, options);
			(!child.empty).then(|| format!("{pad}{name}: {},", child.text))
		})
		.collect();
	braced(&item.type_name, lines, depth, options)
}

fn render_sequence(item: &SequenceValue, depth: usize, options: &LiteralOptions) -> Rendered {
	let pad = options.indent.pad(depth + 1);
	let lines = item
		.elements()
		.filter_map(|(_, value)| {
			let child = render_value(value, depth + 1, options);
			(!child.empty).then(|| format!("{pad}{},", child.text))
		})
		.collect();
	braced(&item.type_name, lines, depth, options)
}

fn render_mapping(item: &MappingValue, depth: usize, options: &LiteralOptions) -> Rendered {
	// Entries sit at the mapping's own depth and are never pruned.
	let pad = options.indent.pad(depth);
	let lines = item
		.entries()
		.map(|(key, value)| {
			let child = render_value(value, depth, options);
			format!("{pad}{}: {},", quote(key), child.text)
		})
		.collect();
	braced(&item.type_name, lines, depth, options)
}

fn braced(type_name: &str, lines: Vec<String>, depth: usize, options: &LiteralOptions) -> Rendered {
	if lines.is_empty() {
		return Rendered::nil_aggregate(type_name);
	}
	let text = format!("{type_name}{{\n{}\n{}}}", lines.join("\n"), options.indent.pad(depth));
	Rendered::new(text, false)
}

/// Shortest `%g` form: exponent notation once the decimal exponent is below
/// -4 or at least 6, with a signed two-digit minimum exponent.
fn format_float(v: f64) -> String {
	if v.is_nan() {
		return "NaN".to_owned();
	}
	if v.is_infinite() {
		return if v > 0.0 { "+Inf" } else { "-Inf" }.to_owned();
	}

	let sci = format!("{v:e}");
	let Some((mantissa, exp)) = sci.split_once('e') else {
		return v.to_string();
	};
	let exp: i32 = match exp.parse() {
		Ok(exp) => exp,
		Err(_) => return v.to_string(),
	};

	if (-4..6).contains(&exp) {
		return v.to_string();
	}
	let sign = if exp < 0 { '-' } else { '+' };
	format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

fn quote(input: &str) -> String {
	let mut out = String::with_capacity(input.len() + 2);
	out.push('"');
	for ch in input.chars() {
		match ch {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
			c => out.push(c),
		}
	}
	out.push('"');
	out
}

#[cfg(test)]
mod tests;
