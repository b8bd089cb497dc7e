mod decode;
mod error;
mod input;
mod literal;
mod reflect;
mod schema;
mod type_expr;
mod value;

/// Schema-driven decoding entry points and options.
pub use decode::{DecodeOptions, decode_document, decode_manifest};
/// Error and result aliases.
pub use error::{ManifestError, Result};
/// Input sniffing, decompression, and type metadata.
pub use input::{Compression, TypeMeta, decode_bytes, looks_like_json, read_document};
/// Zero-pruning literal renderer.
pub use literal::{Indent, LiteralOptions, Rendered, render, render_value};
/// Native Rust to value graph conversion.
pub use reflect::{Any, Reflect};
/// Schema registry types.
pub use schema::{KindBinding, Schema, SchemaField, SchemaRecord};
/// Field type expressions.
pub use type_expr::{INTERFACE_TYPE_NAME, Scalar, TypeExpr};
/// Decoded value types.
pub use value::{EntryValue, FieldValue, InterfaceValue, MappingValue, PointerValue, RecordBuilder, RecordValue, SequenceValue, Value, ValueKind};
