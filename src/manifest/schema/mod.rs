use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::manifest::input::looks_like_json;
use crate::manifest::{ManifestError, Result, TypeExpr};

/// Record declarations and kind registrations used to type manifest documents.
#[derive(Debug, Default)]
pub struct Schema {
	records: Vec<SchemaRecord>,
	by_name: HashMap<Box<str>, usize>,
	kinds: Vec<KindBinding>,
}

/// One record declaration.
#[derive(Debug)]
pub struct SchemaRecord {
	/// Qualified record name, for example `v1.ObjectMeta`.
	pub name: Box<str>,
	/// Field declarations in source order.
	pub fields: Vec<SchemaField>,
}

/// One record field declaration.
#[derive(Debug)]
pub struct SchemaField {
	/// Field identifier used in rendered literals.
	pub name: Box<str>,
	/// Document key the field is read from.
	pub key: Box<str>,
	/// Parsed field type.
	pub ty: TypeExpr,
	/// Field record is read from the enclosing object.
	pub inline: bool,
}

/// Root type registered for an `apiVersion`/`kind` pair.
#[derive(Debug)]
pub struct KindBinding {
	/// Manifest `apiVersion`.
	pub api_version: Box<str>,
	/// Manifest `kind`.
	pub kind: Box<str>,
	/// Root type decoded for matching documents.
	pub root: TypeExpr,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDoc {
	#[serde(default)]
	types: Vec<RecordDoc>,
	#[serde(default)]
	kinds: Vec<KindDoc>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordDoc {
	name: String,
	#[serde(default)]
	fields: Vec<FieldDoc>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDoc {
	name: String,
	key: Option<String>,
	#[serde(rename = "type")]
	ty: String,
	#[serde(default)]
	inline: bool,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct KindDoc {
	api_version: String,
	kind: String,
	#[serde(rename = "type")]
	ty: String,
}

impl Schema {
	/// Read a schema file, JSON or YAML by content.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let text = fs::read_to_string(path)?;
		if looks_like_json(text.as_bytes()) { Self::from_json(&text) } else { Self::from_yaml(&text) }
	}

	/// Parse a JSON schema document.
	pub fn from_json(text: &str) -> Result<Self> {
		Self::build(serde_json::from_str(text)?)
	}

	/// Parse a YAML schema document.
	pub fn from_yaml(text: &str) -> Result<Self> {
		Self::build(serde_yaml::from_str(text)?)
	}

	fn build(doc: SchemaDoc) -> Result<Self> {
		let mut schema = Self::default();

		for record in doc.types {
			if schema.by_name.contains_key(record.name.as_str()) {
				return Err(ManifestError::SchemaDuplicateType { name: record.name });
			}

			let mut fields: Vec<SchemaField> = Vec::with_capacity(record.fields.len());
			for field in record.fields {
				if fields.iter().any(|item| item.name.as_ref() == field.name) {
					return Err(ManifestError::SchemaDuplicateField {
						type_name: record.name,
						field: field.name,
					});
				}
				let ty = TypeExpr::parse(&field.ty)?;
				if field.inline && ty.embedded_record().is_none() {
					return Err(ManifestError::SchemaInlineNotRecord {
						type_name: record.name,
						field: field.name,
						got: field.ty,
					});
				}
				let key = field.key.unwrap_or_else(|| default_key(&field.name));
				fields.push(SchemaField {
					name: field.name.into_boxed_str(),
					key: key.into_boxed_str(),
					ty,
					inline: field.inline,
				});
			}

			schema.by_name.insert(record.name.clone().into_boxed_str(), schema.records.len());
			schema.records.push(SchemaRecord {
				name: record.name.into_boxed_str(),
				fields,
			});
		}

		for kind in doc.kinds {
			schema.kinds.push(KindBinding {
				api_version: kind.api_version.into_boxed_str(),
				kind: kind.kind.into_boxed_str(),
				root: TypeExpr::parse(&kind.ty)?,
			});
		}

		schema.check_references()?;
		schema.check_embedding_cycles()?;

		debug!(types = schema.records.len(), kinds = schema.kinds.len(), "loaded schema");
		Ok(schema)
	}

	/// Look up a record declaration by name.
	pub fn record(&self, name: &str) -> Option<&SchemaRecord> {
		self.by_name.get(name).map(|idx| &self.records[*idx])
	}

	/// Record declarations in source order.
	pub fn records(&self) -> &[SchemaRecord] {
		&self.records
	}

	/// Kind registrations in source order.
	pub fn kinds(&self) -> &[KindBinding] {
		&self.kinds
	}

	/// Pick the root type registered for `apiVersion`/`kind`.
	pub fn resolve_kind(&self, api_version: &str, kind: &str) -> Result<&TypeExpr> {
		self.kinds
			.iter()
			.find(|item| item.api_version.as_ref() == api_version && item.kind.as_ref() == kind)
			.map(|item| &item.root)
			.ok_or_else(|| ManifestError::KindNotRegistered {
				api_version: api_version.to_owned(),
				kind: kind.to_owned(),
			})
	}

	/// Ensure `ty` only references declared records.
	pub fn check_type(&self, ty: &TypeExpr) -> Result<()> {
		match ty.record_name() {
			Some(name) if self.record(name).is_none() => Err(ManifestError::SchemaUnknownType { name: name.to_owned() }),
			_ => Ok(()),
		}
	}

	fn check_references(&self) -> Result<()> {
		for record in &self.records {
			for field in &record.fields {
				self.check_type(&field.ty)?;
			}
		}
		for kind in &self.kinds {
			self.check_type(&kind.root)?;
		}
		Ok(())
	}

	fn check_embedding_cycles(&self) -> Result<()> {
		#[derive(Clone, Copy, PartialEq, Eq)]
		enum Mark {
			Unvisited,
			Active,
			Done,
		}

		fn visit(schema: &Schema, idx: usize, marks: &mut [Mark]) -> Result<()> {
			match marks[idx] {
				Mark::Done => return Ok(()),
				Mark::Active => {
					return Err(ManifestError::SchemaRecursiveType {
						name: schema.records[idx].name.to_string(),
					});
				}
				Mark::Unvisited => {}
			}

			marks[idx] = Mark::Active;
			for field in &schema.records[idx].fields {
				if let Some(next) = field.ty.embedded_record().and_then(|name| schema.by_name.get(name)) {
					visit(schema, *next, marks)?;
				}
			}
			marks[idx] = Mark::Done;
			Ok(())
		}

		let mut marks = vec![Mark::Unvisited; self.records.len()];
		for idx in 0..self.records.len() {
			visit(self, idx, &mut marks)?;
		}
		Ok(())
	}
}

fn default_key(name: &str) -> String {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) => first.to_lowercase().chain(chars).collect(),
		None => String::new(),
	}
}
