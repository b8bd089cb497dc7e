//! Conversion of native Rust data into [`Value`] graphs.
//!
//! Record types implement [`Reflect`] by hand with
//! [`RecordValue::builder`](crate::manifest::RecordValue::builder);
//! containers and scalars are covered here.

use std::collections::BTreeMap;

use crate::manifest::type_expr::INTERFACE_TYPE_NAME;
use crate::manifest::value::{EntryValue, InterfaceValue, MappingValue, PointerValue, SequenceValue, Value};

/// Types that can describe themselves as a [`Value`].
pub trait Reflect {
	/// Type name used in literal markers, for example `[]string`.
	fn type_name() -> String
	where
		Self: Sized;

	/// Build the value graph for `self`.
	fn reflect(&self) -> Value;
}

/// Dynamically typed slot, the `interface {}` of a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Any(pub Option<Value>);

impl Any {
	/// Slot holding `value`.
	pub fn of(value: impl Reflect) -> Self {
		Self(Some(value.reflect()))
	}
}

impl Reflect for Any {
	fn type_name() -> String {
		INTERFACE_TYPE_NAME.to_owned()
	}

	fn reflect(&self) -> Value {
		Value::Interface(match &self.0 {
			Some(value) => InterfaceValue::of(INTERFACE_TYPE_NAME, value.clone()),
			None => InterfaceValue::nil(INTERFACE_TYPE_NAME),
		})
	}
}

impl<T: Reflect> Reflect for Option<Box<T>> {
	fn type_name() -> String {
		format!("*{}", T::type_name())
	}

	fn reflect(&self) -> Value {
		Value::Pointer(match self {
			Some(target) => PointerValue::to(Self::type_name(), target.reflect()),
			None => PointerValue::null(Self::type_name()),
		})
	}
}

impl<T: Reflect> Reflect for Vec<T> {
	fn type_name() -> String {
		format!("[]{}", T::type_name())
	}

	fn reflect(&self) -> Value {
		Value::Sequence(SequenceValue::new(Self::type_name(), self.iter().map(Reflect::reflect).collect()))
	}
}

impl<T: Reflect> Reflect for BTreeMap<String, T> {
	fn type_name() -> String {
		format!("map[string]{}", T::type_name())
	}

	fn reflect(&self) -> Value {
		let entries = self.iter().map(|(key, value)| EntryValue::new(key.as_str(), value.reflect())).collect();
		Value::Mapping(MappingValue::new(Self::type_name(), entries))
	}
}

impl Reflect for String {
	fn type_name() -> String {
		"string".to_owned()
	}

	fn reflect(&self) -> Value {
		Value::string(self.as_str())
	}
}

impl Reflect for &str {
	fn type_name() -> String {
		"string".to_owned()
	}

	fn reflect(&self) -> Value {
		Value::string(*self)
	}
}

impl Reflect for bool {
	fn type_name() -> String {
		"bool".to_owned()
	}

	fn reflect(&self) -> Value {
		Value::Bool(*self)
	}
}

macro_rules! reflect_scalar {
	($variant:ident, $wide:ty, $($ty:ty => $name:literal),+ $(,)?) => {
		$(
			impl Reflect for $ty {
				fn type_name() -> String {
					$name.to_owned()
				}

				fn reflect(&self) -> Value {
					Value::$variant(<$wide>::from(*self))
				}
			}
		)+
	};
}

reflect_scalar!(Int, i64, i8 => "int8", i16 => "int16", i32 => "int32", i64 => "int64");
reflect_scalar!(Uint, u64, u8 => "uint8", u16 => "uint16", u32 => "uint32", u64 => "uint64");
reflect_scalar!(Float, f64, f32 => "float32", f64 => "float64");

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::{Any, Reflect};
	use crate::manifest::value::{RecordValue, Value};
	use crate::manifest::render;

	struct Filter {
		name: String,
		values: Vec<String>,
	}

	impl Reflect for Filter {
		fn type_name() -> String {
			"v1alpha1.Filter".to_owned()
		}

		fn reflect(&self) -> Value {
			RecordValue::builder(Self::type_name())
				.field("Name", self.name.reflect())
				.field("Values", self.values.reflect())
				.into_value()
		}
	}

	struct Reference {
		id: Option<Box<String>>,
		filters: Vec<Filter>,
		extra: Any,
	}

	impl Reflect for Reference {
		fn type_name() -> String {
			"v1alpha1.AWSResourceReference".to_owned()
		}

		fn reflect(&self) -> Value {
			RecordValue::builder(Self::type_name())
				.field("ID", self.id.reflect())
				.field("Filters", self.filters.reflect())
				.field("Extra", self.extra.reflect())
				.into_value()
		}
	}

	#[test]
	fn container_type_names_compose() {
		assert_eq!(<Vec<Option<Box<Filter>>>>::type_name(), "[]*v1alpha1.Filter");
		assert_eq!(<BTreeMap<String, Vec<u8>>>::type_name(), "map[string][]uint8");
		assert_eq!(Any::type_name(), "interface {}");
	}

	#[test]
	fn native_record_renders_pruned() {
		let reference = Reference {
			id: None,
			filters: vec![
				Filter {
					name: "tag:Name".to_owned(),
					values: vec!["cluster-worker-*".to_owned()],
				},
				Filter {
					name: String::new(),
					values: Vec::new(),
				},
			],
			extra: Any::default(),
		};

		let out = render(&reference.reflect());
		assert_eq!(
			out.text,
			"v1alpha1.AWSResourceReference{\n\tFilters: []v1alpha1.Filter{\n\t\tv1alpha1.Filter{\n\t\t\tName: \"tag:Name\",\n\t\t\tValues: []string{\n\t\t\t\t\"cluster-worker-*\",\n\t\t\t},\n\t\t},\n\t},\n}"
		);
	}

	#[test]
	fn null_pointer_uses_static_type_name() {
		let id: Option<Box<String>> = None;
		assert_eq!(render(&id.reflect()).text, "*string(nil)");

		let id = Some(Box::new("i-123".to_owned()));
		assert_eq!(render(&id.reflect()).text, "&\"i-123\"");
	}

	#[test]
	fn any_slot_unwraps_concrete_value() {
		let out = render(&Any::of(7_u32).reflect());
		assert_eq!(out.text, "7");
		assert!(!out.empty);
		assert!(render(&Any::default().reflect()).empty);
	}
}
