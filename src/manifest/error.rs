use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Errors produced while reading, decoding, and typing manifest data.
#[derive(Debug, Error)]
pub enum ManifestError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Input stream held no bytes after decompression and trimming.
	#[error("empty input")]
	EmptyInput,
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// JSON syntax error in a manifest or schema document.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// YAML syntax error in a manifest or schema document.
	#[error("yaml: {0}")]
	Yaml(#[from] serde_yaml::Error),
	/// CLI indent argument was invalid.
	#[error("invalid indent: {value} (expected 'tab' or a space count 1-8)")]
	InvalidIndent {
		/// User-provided indent string.
		value: String,
	},
	/// Type expression could not be parsed.
	#[error("invalid type expression: {expr:?}")]
	InvalidTypeExpr {
		/// Original type expression text.
		expr: String,
	},
	/// Type expression names a kind the literalizer does not cover.
	#[error("unsupported value kind {kind:?} in type expression {expr:?}")]
	UnsupportedKind {
		/// Offending kind keyword.
		kind: String,
		/// Full type expression text.
		expr: String,
	},
	/// Mapping key type is not `string`.
	#[error("unsupported mapping key type {key:?} in {expr:?} (expected string)")]
	UnsupportedMapKey {
		/// Declared key type.
		key: String,
		/// Full type expression text.
		expr: String,
	},
	/// Record type name was declared more than once.
	#[error("schema declares type {name} twice")]
	SchemaDuplicateType {
		/// Duplicate record type name.
		name: String,
	},
	/// Record field was declared more than once on the same type.
	#[error("schema declares field {field} twice on {type_name}")]
	SchemaDuplicateField {
		/// Record type name.
		type_name: String,
		/// Duplicate field name.
		field: String,
	},
	/// Type expression references an undeclared record.
	#[error("schema references unknown type {name}")]
	SchemaUnknownType {
		/// Undeclared record name.
		name: String,
	},
	/// Record embeds itself without pointer, sequence, or mapping indirection.
	#[error("schema type {name} contains itself without indirection")]
	SchemaRecursiveType {
		/// Record participating in the cycle.
		name: String,
	},
	/// Inline field does not name a record type.
	#[error("inline field {field} on {type_name} must be a record, got {got}")]
	SchemaInlineNotRecord {
		/// Enclosing record type name.
		type_name: String,
		/// Inline field name.
		field: String,
		/// Declared field type.
		got: String,
	},
	/// No registered kind matches the manifest's `apiVersion`/`kind`.
	#[error("no type registered for apiVersion={api_version:?} kind={kind:?}")]
	KindNotRegistered {
		/// Manifest `apiVersion` value.
		api_version: String,
		/// Manifest `kind` value.
		kind: String,
	},
	/// Manifest does not carry the type metadata needed to pick a root type.
	#[error("manifest has no apiVersion/kind; pass --type")]
	MissingTypeMeta,
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded at {path} (max={max_depth})")]
	DecodeDepthExceeded {
		/// Field path where the limit was hit.
		path: String,
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Decoded sequence exceeded configured limit.
	#[error("sequence too long at {path}: len={len}, max={max}")]
	DecodeSequenceTooLong {
		/// Field path of the sequence.
		path: String,
		/// Input sequence length.
		len: usize,
		/// Maximum permitted length.
		max: usize,
	},
	/// Input node does not match the declared type.
	#[error("type mismatch at {path}: expected {expected}, got {got}")]
	DecodeTypeMismatch {
		/// Field path of the mismatching node.
		path: String,
		/// Declared type name.
		expected: String,
		/// Input node kind.
		got: &'static str,
	},
	/// `[]byte` string was not valid base64.
	#[error("invalid base64 at {path}: {source}")]
	DecodeBase64 {
		/// Field path of the byte string.
		path: String,
		/// Underlying decode failure.
		source: base64::DecodeError,
	},
	/// Integer does not fit the declared width.
	#[error("integer out of range at {path}: {value} does not fit {type_name}")]
	DecodeIntOutOfRange {
		/// Field path of the integer.
		path: String,
		/// Declared integer type.
		type_name: String,
		/// Input number as text.
		value: String,
	},
	/// Strict decoding found a key that the record does not declare.
	#[error("unknown field {key:?} at {path} for {type_name}")]
	DecodeUnknownField {
		/// Record path.
		path: String,
		/// Record type name.
		type_name: String,
		/// Undeclared input key.
		key: String,
	},
}
