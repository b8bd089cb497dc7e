/// Decoded manifest value; the closed set of kinds the literalizer walks.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Pointer-like node with an optional exclusively owned target.
	Pointer(PointerValue),
	/// Interface-like node holding a value of dynamic concrete type.
	Interface(InterfaceValue),
	/// Record with named fields in declaration order.
	Record(RecordValue),
	/// Ordered sequence of elements.
	Sequence(SequenceValue),
	/// Keyed entries in the order the decoder produced them.
	Mapping(MappingValue),
	/// String scalar.
	String(Box<str>),
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar of any width.
	Int(i64),
	/// Unsigned integer scalar of any width.
	Uint(u64),
	/// Floating-point scalar of any width.
	Float(f64),
}

/// Coarse classification of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
	/// See [`Value::Pointer`].
	Pointer,
	/// See [`Value::Interface`].
	Interface,
	/// See [`Value::Record`].
	Record,
	/// See [`Value::Sequence`].
	Sequence,
	/// See [`Value::Mapping`].
	Mapping,
	/// See [`Value::String`].
	String,
	/// See [`Value::Bool`].
	Bool,
	/// See [`Value::Int`].
	Int,
	/// See [`Value::Uint`].
	Uint,
	/// See [`Value::Float`].
	Float,
}

impl ValueKind {
	/// Render kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Pointer => "pointer",
			Self::Interface => "interface",
			Self::Record => "record",
			Self::Sequence => "sequence",
			Self::Mapping => "mapping",
			Self::String => "string",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Uint => "uint",
			Self::Float => "float",
		}
	}
}

impl Value {
	/// Classify this node.
	pub fn kind(&self) -> ValueKind {
		match self {
			Self::Pointer(_) => ValueKind::Pointer,
			Self::Interface(_) => ValueKind::Interface,
			Self::Record(_) => ValueKind::Record,
			Self::Sequence(_) => ValueKind::Sequence,
			Self::Mapping(_) => ValueKind::Mapping,
			Self::String(_) => ValueKind::String,
			Self::Bool(_) => ValueKind::Bool,
			Self::Int(_) => ValueKind::Int,
			Self::Uint(_) => ValueKind::Uint,
			Self::Float(_) => ValueKind::Float,
		}
	}

	/// Shorthand for a string scalar.
	pub fn string(value: impl Into<Box<str>>) -> Self {
		Self::String(value.into())
	}
}

/// Pointer node; `target` is `None` for a null pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerValue {
	/// Pointer type name, for example `*v1.Secret`.
	pub type_name: Box<str>,
	/// Pointee, when non-null.
	pub target: Option<Box<Value>>,
}

impl PointerValue {
	/// Null pointer of the given type.
	pub fn null(type_name: impl Into<Box<str>>) -> Self {
		Self {
			type_name: type_name.into(),
			target: None,
		}
	}

	/// Non-null pointer owning `target`.
	pub fn to(type_name: impl Into<Box<str>>, target: Value) -> Self {
		Self {
			type_name: type_name.into(),
			target: Some(Box::new(target)),
		}
	}

	/// Dereference, or `None` for a null pointer.
	pub fn target(&self) -> Option<&Value> {
		self.target.as_deref()
	}
}

/// Interface node; `concrete` is `None` for a nil interface.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceValue {
	/// Interface type name, for example `interface {}`.
	pub type_name: Box<str>,
	/// Dynamic concrete value, when present.
	pub concrete: Option<Box<Value>>,
}

impl InterfaceValue {
	/// Nil interface of the given type.
	pub fn nil(type_name: impl Into<Box<str>>) -> Self {
		Self {
			type_name: type_name.into(),
			concrete: None,
		}
	}

	/// Interface holding `concrete`.
	pub fn of(type_name: impl Into<Box<str>>, concrete: Value) -> Self {
		Self {
			type_name: type_name.into(),
			concrete: Some(Box::new(concrete)),
		}
	}

	/// Unwrap to the concrete value, or `None` for a nil interface.
	pub fn concrete(&self) -> Option<&Value> {
		self.concrete.as_deref()
	}
}

/// Decoded record value with field names preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
	/// Record type name from the schema.
	pub type_name: Box<str>,
	/// Field values in declaration order.
	pub fields: Vec<FieldValue>,
}

impl RecordValue {
	/// Start building a record of the given type.
	pub fn builder(type_name: impl Into<Box<str>>) -> RecordBuilder {
		RecordBuilder {
			record: Self {
				type_name: type_name.into(),
				fields: Vec::new(),
			},
		}
	}

	/// Enumerate `(field name, value)` pairs in declaration order.
	pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.fields.iter().map(|field| (field.name.as_ref(), &field.value))
	}

	/// Look up a field by name.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}
}

/// Incremental [`RecordValue`] constructor preserving insertion order.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
	record: RecordValue,
}

impl RecordBuilder {
	/// Append one field.
	pub fn field(mut self, name: impl Into<Box<str>>, value: Value) -> Self {
		self.record.fields.push(FieldValue { name: name.into(), value });
		self
	}

	/// Finish as a [`RecordValue`].
	pub fn build(self) -> RecordValue {
		self.record
	}

	/// Finish as a [`Value::Record`].
	pub fn into_value(self) -> Value {
		Value::Record(self.record)
	}
}

/// Named record field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field identifier.
	pub name: Box<str>,
	/// Field payload.
	pub value: Value,
}

/// Ordered sequence of elements.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceValue {
	/// Sequence type name, for example `[]string`.
	pub type_name: Box<str>,
	/// Elements in order.
	pub items: Vec<Value>,
}

impl SequenceValue {
	/// Sequence of the given type holding `items`.
	pub fn new(type_name: impl Into<Box<str>>, items: Vec<Value>) -> Self {
		Self {
			type_name: type_name.into(),
			items,
		}
	}

	/// Enumerate `(index, element)` pairs in order.
	pub fn elements(&self) -> impl Iterator<Item = (usize, &Value)> {
		self.items.iter().enumerate()
	}
}

/// Keyed entries.
///
/// Entry order is whatever the producer supplied; callers must not rely on it.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingValue {
	/// Mapping type name, for example `map[string]string`.
	pub type_name: Box<str>,
	/// Entries in producer order.
	pub entries: Vec<EntryValue>,
}

impl MappingValue {
	/// Mapping of the given type holding `entries`.
	pub fn new(type_name: impl Into<Box<str>>, entries: Vec<EntryValue>) -> Self {
		Self {
			type_name: type_name.into(),
			entries,
		}
	}

	/// Enumerate `(key, value)` pairs.
	pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.entries.iter().map(|entry| (entry.key.as_ref(), &entry.value))
	}
}

/// One mapping entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryValue {
	/// Entry key.
	pub key: Box<str>,
	/// Entry payload.
	pub value: Value,
}

impl EntryValue {
	/// Build an entry.
	pub fn new(key: impl Into<Box<str>>, value: Value) -> Self {
		Self { key: key.into(), value }
	}
}
