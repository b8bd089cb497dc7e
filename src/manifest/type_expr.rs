use std::fmt;

use crate::manifest::{ManifestError, Result};

/// Canonical name of the empty interface type.
pub const INTERFACE_TYPE_NAME: &str = "interface {}";

/// Parsed field type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
	/// `*T`
	Pointer(Box<TypeExpr>),
	/// `interface{}` / `any`
	Interface,
	/// `[]T`
	Sequence(Box<TypeExpr>),
	/// `map[string]T`
	Mapping(Box<TypeExpr>),
	/// Built-in scalar.
	Scalar(Scalar),
	/// Schema-declared record, for example `v1.ObjectMeta`.
	Named(Box<str>),
}

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
	/// `string`
	String,
	/// `bool`
	Bool,
	/// `int`
	Int,
	/// `int8`
	Int8,
	/// `int16`
	Int16,
	/// `int32` / `rune`
	Int32,
	/// `int64`
	Int64,
	/// `uint`
	Uint,
	/// `uint8` / `byte`
	Uint8,
	/// `uint16`
	Uint16,
	/// `uint32`
	Uint32,
	/// `uint64`
	Uint64,
	/// `uintptr`
	Uintptr,
	/// `float32`
	Float32,
	/// `float64`
	Float64,
}

impl Scalar {
	/// Look up a scalar by its type keyword.
	pub fn from_name(name: &str) -> Option<Self> {
		let scalar = match name {
			"string" => Self::String,
			"bool" => Self::Bool,
			"int" => Self::Int,
			"int8" => Self::Int8,
			"int16" => Self::Int16,
			"int32" | "rune" => Self::Int32,
			"int64" => Self::Int64,
			"uint" => Self::Uint,
			"uint8" | "byte" => Self::Uint8,
			"uint16" => Self::Uint16,
			"uint32" => Self::Uint32,
			"uint64" => Self::Uint64,
			"uintptr" => Self::Uintptr,
			"float32" => Self::Float32,
			"float64" => Self::Float64,
			_ => return None,
		};
		Some(scalar)
	}

	/// Canonical keyword.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::String => "string",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Int8 => "int8",
			Self::Int16 => "int16",
			Self::Int32 => "int32",
			Self::Int64 => "int64",
			Self::Uint => "uint",
			Self::Uint8 => "uint8",
			Self::Uint16 => "uint16",
			Self::Uint32 => "uint32",
			Self::Uint64 => "uint64",
			Self::Uintptr => "uintptr",
			Self::Float32 => "float32",
			Self::Float64 => "float64",
		}
	}

	/// Inclusive bounds for signed integer scalars.
	pub fn signed_bounds(self) -> Option<(i64, i64)> {
		match self {
			Self::Int8 => Some((i64::from(i8::MIN), i64::from(i8::MAX))),
			Self::Int16 => Some((i64::from(i16::MIN), i64::from(i16::MAX))),
			Self::Int32 => Some((i64::from(i32::MIN), i64::from(i32::MAX))),
			Self::Int | Self::Int64 => Some((i64::MIN, i64::MAX)),
			_ => None,
		}
	}

	/// Inclusive upper bound for unsigned integer scalars.
	pub fn unsigned_max(self) -> Option<u64> {
		match self {
			Self::Uint8 => Some(u64::from(u8::MAX)),
			Self::Uint16 => Some(u64::from(u16::MAX)),
			Self::Uint32 => Some(u64::from(u32::MAX)),
			Self::Uint | Self::Uint64 | Self::Uintptr => Some(u64::MAX),
			_ => None,
		}
	}
}

impl TypeExpr {
	/// Parse Go-style type syntax.
	pub fn parse(raw: &str) -> Result<Self> {
		parse_expr(raw.trim(), raw)
	}

	/// Record name when this type embeds a record by value.
	pub fn embedded_record(&self) -> Option<&str> {
		match self {
			Self::Named(name) => Some(name),
			_ => None,
		}
	}

	/// Record name reached through any number of wrappers, if any.
	pub fn record_name(&self) -> Option<&str> {
		match self {
			Self::Pointer(inner) | Self::Sequence(inner) | Self::Mapping(inner) => inner.record_name(),
			Self::Named(name) => Some(name),
			Self::Interface | Self::Scalar(_) => None,
		}
	}
}

impl fmt::Display for TypeExpr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Pointer(inner) => write!(f, "*{inner}"),
			Self::Interface => f.write_str(INTERFACE_TYPE_NAME),
			Self::Sequence(inner) => write!(f, "[]{inner}"),
			Self::Mapping(inner) => write!(f, "map[string]{inner}"),
			Self::Scalar(scalar) => f.write_str(scalar.as_str()),
			Self::Named(name) => f.write_str(name),
		}
	}
}

fn parse_expr(expr: &str, raw: &str) -> Result<TypeExpr> {
	if let Some(rest) = expr.strip_prefix('*') {
		return Ok(TypeExpr::Pointer(Box::new(parse_expr(rest.trim_start(), raw)?)));
	}
	if let Some(rest) = expr.strip_prefix("[]") {
		return Ok(TypeExpr::Sequence(Box::new(parse_expr(rest, raw)?)));
	}
	if expr.starts_with('[') {
		return Err(unsupported("array", raw));
	}
	if let Some(rest) = expr.strip_prefix("map[") {
		return parse_mapping(rest, raw);
	}
	if is_interface(expr) {
		return Ok(TypeExpr::Interface);
	}
	if expr == "chan" || expr.starts_with("chan ") || expr.starts_with("chan<-") || expr.starts_with("<-") {
		return Err(unsupported("chan", raw));
	}
	if expr.starts_with("func") && expr[4..].trim_start().starts_with('(') {
		return Err(unsupported("func", raw));
	}
	if expr.starts_with("struct") && expr[6..].trim_start().starts_with('{') {
		return Err(unsupported("struct", raw));
	}
	if expr.starts_with("interface") && expr[9..].trim_start().starts_with('{') {
		return Err(unsupported("interface", raw));
	}

	match expr {
		"complex64" | "complex128" => return Err(unsupported(expr, raw)),
		"unsafe.Pointer" => return Err(unsupported("unsafe pointer", raw)),
		_ => {}
	}

	if let Some(scalar) = Scalar::from_name(expr) {
		return Ok(TypeExpr::Scalar(scalar));
	}
	if is_type_name(expr) {
		return Ok(TypeExpr::Named(expr.into()));
	}

	Err(ManifestError::InvalidTypeExpr { expr: raw.to_owned() })
}

fn parse_mapping(rest: &str, raw: &str) -> Result<TypeExpr> {
	let mut depth = 0_usize;
	let close = rest.char_indices().find_map(|(idx, ch)| match ch {
		'[' => {
			depth += 1;
			None
		}
		']' if depth == 0 => Some(idx),
		']' => {
			depth -= 1;
			None
		}
		_ => None,
	});
	let Some(close) = close else {
		return Err(ManifestError::InvalidTypeExpr { expr: raw.to_owned() });
	};

	let key = rest[..close].trim();
	let key_type = parse_expr(key, raw)?;
	if key_type != TypeExpr::Scalar(Scalar::String) {
		return Err(ManifestError::UnsupportedMapKey {
			key: key.to_owned(),
			expr: raw.to_owned(),
		});
	}

	let elem = parse_expr(rest[close + 1..].trim_start(), raw)?;
	Ok(TypeExpr::Mapping(Box::new(elem)))
}

fn is_interface(expr: &str) -> bool {
	if expr == "any" {
		return true;
	}
	let Some(rest) = expr.strip_prefix("interface") else {
		return false;
	};
	let rest = rest.trim_start();
	rest.strip_prefix('{').is_some_and(|body| body.trim() == "}")
}

fn is_type_name(expr: &str) -> bool {
	!expr.is_empty()
		&& !expr.starts_with('.')
		&& !expr.ends_with('.')
		&& !expr.starts_with(|c: char| c.is_ascii_digit())
		&& expr.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.')
}

fn unsupported(kind: &str, raw: &str) -> ManifestError {
	ManifestError::UnsupportedKind {
		kind: kind.to_owned(),
		expr: raw.to_owned(),
	}
}
