use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::manifest::type_expr::{INTERFACE_TYPE_NAME, Scalar};
use crate::manifest::value::{EntryValue, FieldValue, InterfaceValue, MappingValue, PointerValue, RecordValue, SequenceValue, Value};
use crate::manifest::{ManifestError, Result, Schema, SchemaRecord, TypeExpr, TypeMeta};

const ROOT_PATH: &str = "$";

/// Runtime limits and behavior switches for schema-driven decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting depth of the decoded value graph.
	pub max_depth: u32,
	/// Maximum allowed sequence length.
	pub max_sequence_len: usize,
	/// Reject document keys that the target record does not declare.
	pub strict_fields: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			max_sequence_len: 100_000,
			strict_fields: false,
		}
	}
}

impl DecodeOptions {
	/// Preset that rejects undeclared keys.
	pub fn strict() -> Self {
		Self {
			strict_fields: true,
			..Self::default()
		}
	}
}

/// Pick the root type for `doc` and decode it.
///
/// `type_override` wins over the document's `apiVersion`/`kind`.
pub fn decode_manifest(schema: &Schema, doc: &Json, type_override: Option<&str>, opt: &DecodeOptions) -> Result<(TypeExpr, Value)> {
	let root = match type_override {
		Some(raw) => {
			let ty = TypeExpr::parse(raw)?;
			schema.check_type(&ty)?;
			ty
		}
		None => {
			let meta = TypeMeta::of(doc).ok_or(ManifestError::MissingTypeMeta)?;
			schema.resolve_kind(&meta.api_version, &meta.kind)?.clone()
		}
	};

	let value = decode_document(schema, &root, doc, opt)?;
	Ok((root, value))
}

/// Decode one parsed document as `root`.
///
/// Missing keys and `null` yield the type's zero value.
pub fn decode_document(schema: &Schema, root: &TypeExpr, doc: &Json, opt: &DecodeOptions) -> Result<Value> {
	debug!(root = %root, strict = opt.strict_fields, "decoding document");
	schema.check_type(root)?;
	Decoder { schema, opt }.decode(root, doc, ROOT_PATH, 0)
}

struct Decoder<'a> {
	schema: &'a Schema,
	opt: &'a DecodeOptions,
}

impl Decoder<'_> {
	fn decode(&self, ty: &TypeExpr, node: &Json, path: &str, depth: u32) -> Result<Value> {
		self.check_depth(path, depth)?;
		if node.is_null() {
			return self.zero(ty, path, depth);
		}

		match ty {
			TypeExpr::Pointer(inner) => {
				let target = self.decode(inner, node, path, depth + 1)?;
				Ok(Value::Pointer(PointerValue::to(ty.to_string(), target)))
			}
			TypeExpr::Interface => {
				let concrete = self.dynamic(node, path, depth + 1)?;
				Ok(Value::Interface(InterfaceValue::of(INTERFACE_TYPE_NAME, concrete)))
			}
			TypeExpr::Sequence(elem) => {
				if let (TypeExpr::Scalar(Scalar::Uint8), Json::String(text)) = (&**elem, node) {
					return self.decode_byte_string(ty, text, path);
				}
				let items = self.expect_array(ty, node, path)?;
				let mut out = Vec::with_capacity(items.len());
				for (idx, item) in items.iter().enumerate() {
					out.push(self.decode(elem, item, &format!("{path}[{idx}]"), depth + 1)?);
				}
				Ok(Value::Sequence(SequenceValue::new(ty.to_string(), out)))
			}
			TypeExpr::Mapping(elem) => {
				let object = expect_object(ty, node, path)?;
				let mut entries = Vec::with_capacity(object.len());
				for (key, item) in object {
					let value = self.decode(elem, item, &format!("{path}[{key:?}]"), depth + 1)?;
					entries.push(EntryValue::new(key.as_str(), value));
				}
				Ok(Value::Mapping(MappingValue::new(ty.to_string(), entries)))
			}
			TypeExpr::Scalar(scalar) => decode_scalar(*scalar, node, path),
			TypeExpr::Named(name) => {
				let object = expect_object(ty, node, path)?;
				let record = self.record(name)?;
				Ok(Value::Record(self.decode_record(record, object, path, depth, true)?))
			}
		}
	}

	fn decode_record(&self, record: &SchemaRecord, object: &Map<String, Json>, path: &str, depth: u32, owns_object: bool) -> Result<RecordValue> {
		if owns_object && self.opt.strict_fields {
			self.check_unknown_keys(record, object, path)?;
		}

		let mut fields = Vec::with_capacity(record.fields.len());
		for field in &record.fields {
			let value = if field.inline {
				let name = field.ty.embedded_record().unwrap_or_default();
				let inner = self.record(name)?;
				self.check_depth(path, depth + 1)?;
				Value::Record(self.decode_record(inner, object, path, depth + 1, false)?)
			} else {
				let child_path = format!("{path}.{}", field.key);
				match object.get(field.key.as_ref()) {
					Some(node) => self.decode(&field.ty, node, &child_path, depth + 1)?,
					None => self.zero(&field.ty, &child_path, depth + 1)?,
				}
			};
			fields.push(FieldValue {
				name: field.name.clone(),
				value,
			});
		}

		Ok(RecordValue {
			type_name: record.name.clone(),
			fields,
		})
	}

	/// `[]byte` fields carry standard base64 text, as in Secret `data`.
	fn decode_byte_string(&self, ty: &TypeExpr, text: &str, path: &str) -> Result<Value> {
		let bytes = STANDARD.decode(text).map_err(|source| ManifestError::DecodeBase64 {
			path: path.to_owned(),
			source,
		})?;
		self.check_len(path, bytes.len())?;
		let items = bytes.into_iter().map(|byte| Value::Uint(u64::from(byte))).collect();
		Ok(Value::Sequence(SequenceValue::new(ty.to_string(), items)))
	}

	fn zero(&self, ty: &TypeExpr, path: &str, depth: u32) -> Result<Value> {
		self.check_depth(path, depth)?;
		let value = match ty {
			TypeExpr::Pointer(_) => Value::Pointer(PointerValue::null(ty.to_string())),
			TypeExpr::Interface => Value::Interface(InterfaceValue::nil(INTERFACE_TYPE_NAME)),
			TypeExpr::Sequence(_) => Value::Sequence(SequenceValue::new(ty.to_string(), Vec::new())),
			TypeExpr::Mapping(_) => Value::Mapping(MappingValue::new(ty.to_string(), Vec::new())),
			TypeExpr::Scalar(scalar) => zero_scalar(*scalar),
			TypeExpr::Named(name) => {
				let record = self.record(name)?;
				let mut fields = Vec::with_capacity(record.fields.len());
				for field in &record.fields {
					fields.push(FieldValue {
						name: field.name.clone(),
						value: self.zero(&field.ty, path, depth + 1)?,
					});
				}
				Value::Record(RecordValue {
					type_name: record.name.clone(),
					fields,
				})
			}
		};
		Ok(value)
	}

	/// Untyped decode for `interface{}` slots.
	fn dynamic(&self, node: &Json, path: &str, depth: u32) -> Result<Value> {
		self.check_depth(path, depth)?;
		let value = match node {
			Json::Bool(v) => Value::Bool(*v),
			Json::Number(v) => Value::Float(v.as_f64().unwrap_or_default()),
			Json::String(v) => Value::string(v.as_str()),
			Json::Array(items) => {
				self.check_len(path, items.len())?;
				let mut out = Vec::with_capacity(items.len());
				for (idx, item) in items.iter().enumerate() {
					out.push(self.dynamic_slot(item, &format!("{path}[{idx}]"), depth + 1)?);
				}
				Value::Sequence(SequenceValue::new(format!("[]{INTERFACE_TYPE_NAME}"), out))
			}
			Json::Object(object) => {
				let mut entries = Vec::with_capacity(object.len());
				for (key, item) in object {
					let value = self.dynamic_slot(item, &format!("{path}[{key:?}]"), depth + 1)?;
					entries.push(EntryValue::new(key.as_str(), value));
				}
				Value::Mapping(MappingValue::new(format!("map[string]{INTERFACE_TYPE_NAME}"), entries))
			}
			Json::Null => return Ok(Value::Interface(InterfaceValue::nil(INTERFACE_TYPE_NAME))),
		};
		Ok(value)
	}

	fn dynamic_slot(&self, node: &Json, path: &str, depth: u32) -> Result<Value> {
		if node.is_null() {
			return Ok(Value::Interface(InterfaceValue::nil(INTERFACE_TYPE_NAME)));
		}
		let concrete = self.dynamic(node, path, depth + 1)?;
		Ok(Value::Interface(InterfaceValue::of(INTERFACE_TYPE_NAME, concrete)))
	}

	fn expect_array<'n>(&self, ty: &TypeExpr, node: &'n Json, path: &str) -> Result<&'n Vec<Json>> {
		let items = node.as_array().ok_or_else(|| mismatch(ty, node, path))?;
		self.check_len(path, items.len())?;
		Ok(items)
	}

	fn check_len(&self, path: &str, len: usize) -> Result<()> {
		if len > self.opt.max_sequence_len {
			return Err(ManifestError::DecodeSequenceTooLong {
				path: path.to_owned(),
				len,
				max: self.opt.max_sequence_len,
			});
		}
		Ok(())
	}

	fn check_depth(&self, path: &str, depth: u32) -> Result<()> {
		if depth >= self.opt.max_depth {
			return Err(ManifestError::DecodeDepthExceeded {
				path: path.to_owned(),
				max_depth: self.opt.max_depth,
			});
		}
		Ok(())
	}

	fn check_unknown_keys(&self, record: &SchemaRecord, object: &Map<String, Json>, path: &str) -> Result<()> {
		let mut known = Vec::new();
		self.collect_keys(record, &mut known)?;
		match object.keys().find(|key| !known.contains(&key.as_str())) {
			Some(key) => Err(ManifestError::DecodeUnknownField {
				path: path.to_owned(),
				type_name: record.name.to_string(),
				key: key.clone(),
			}),
			None => Ok(()),
		}
	}

	fn collect_keys<'s>(&'s self, record: &'s SchemaRecord, out: &mut Vec<&'s str>) -> Result<()> {
		for field in &record.fields {
			if field.inline {
				let inner = self.record(field.ty.embedded_record().unwrap_or_default())?;
				self.collect_keys(inner, out)?;
			} else {
				out.push(&field.key);
			}
		}
		Ok(())
	}

	fn record(&self, name: &str) -> Result<&'_ SchemaRecord> {
		self.schema.record(name).ok_or_else(|| ManifestError::SchemaUnknownType { name: name.to_owned() })
	}
}

fn expect_object<'n>(ty: &TypeExpr, node: &'n Json, path: &str) -> Result<&'n Map<String, Json>> {
	node.as_object().ok_or_else(|| mismatch(ty, node, path))
}

fn decode_scalar(scalar: Scalar, node: &Json, path: &str) -> Result<Value> {
	let ty = TypeExpr::Scalar(scalar);
	match scalar {
		Scalar::String => node.as_str().map(Value::string).ok_or_else(|| mismatch(&ty, node, path)),
		Scalar::Bool => node.as_bool().map(Value::Bool).ok_or_else(|| mismatch(&ty, node, path)),
		Scalar::Float32 | Scalar::Float64 => node.as_f64().map(Value::Float).ok_or_else(|| mismatch(&ty, node, path)),
		_ => {
			let Json::Number(number) = node else {
				return Err(mismatch(&ty, node, path));
			};
			if number.is_f64() {
				return Err(mismatch(&ty, node, path));
			}

			let out_of_range = || ManifestError::DecodeIntOutOfRange {
				path: path.to_owned(),
				type_name: scalar.as_str().to_owned(),
				value: number.to_string(),
			};

			if let Some((min, max)) = scalar.signed_bounds() {
				let value = number.as_i64().ok_or_else(out_of_range)?;
				if value < min || value > max {
					return Err(out_of_range());
				}
				return Ok(Value::Int(value));
			}

			let max = scalar.unsigned_max().unwrap_or(u64::MAX);
			let value = number.as_u64().ok_or_else(out_of_range)?;
			if value > max {
				return Err(out_of_range());
			}
			Ok(Value::Uint(value))
		}
	}
}

fn zero_scalar(scalar: Scalar) -> Value {
	match scalar {
		Scalar::String => Value::string(""),
		Scalar::Bool => Value::Bool(false),
		Scalar::Float32 | Scalar::Float64 => Value::Float(0.0),
		_ if scalar.signed_bounds().is_some() => Value::Int(0),
		_ => Value::Uint(0),
	}
}

fn mismatch(ty: &TypeExpr, node: &Json, path: &str) -> ManifestError {
	ManifestError::DecodeTypeMismatch {
		path: path.to_owned(),
		expected: ty.to_string(),
		got: json_kind(node),
	}
}

fn json_kind(node: &Json) -> &'static str {
	match node {
		Json::Null => "null",
		Json::Bool(_) => "bool",
		Json::Number(_) => "number",
		Json::String(_) => "string",
		Json::Array(_) => "array",
		Json::Object(_) => "object",
	}
}
