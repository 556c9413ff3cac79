use std::collections::HashMap;
use std::fmt;

use crate::cast::record::Record;
use crate::cast::value::Value;
use crate::cast::Result;

/// Mapping from field name to descriptor for one record type.
pub type FieldTable = HashMap<&'static str, Descriptor>;

/// Scalar target kinds for leaf conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
	/// Boolean.
	Bool,
	/// Signed integer.
	Int,
	/// Unsigned integer.
	UInt,
	/// Floating point.
	Float,
	/// String.
	Str,
	/// Generic mapping with no element typing; passes through unconverted.
	AnyMap,
	/// Generic sequence with no element typing; passes through unconverted.
	AnySeq,
	/// Unparameterized placeholder; passes any value through unconverted.
	Any,
}

impl ScalarKind {
	/// Short kind name for diagnostics.
	pub fn name(&self) -> &'static str {
		match self {
			ScalarKind::Bool => "bool",
			ScalarKind::Int => "int",
			ScalarKind::UInt => "uint",
			ScalarKind::Float => "float",
			ScalarKind::Str => "string",
			ScalarKind::AnyMap => "mapping",
			ScalarKind::AnySeq => "sequence",
			ScalarKind::Any => "any",
		}
	}
}

/// Closed description of an expected shape, used by the decoder and the
/// validator.
#[derive(Debug, Clone)]
pub enum Descriptor {
	/// Scalar leaf kind.
	Scalar(ScalarKind),
	/// Enumeration decoded and encoded by member name.
	Enum(&'static EnumShape),
	/// Nullable wrapper around an inner descriptor.
	Optional(Box<Descriptor>),
	/// Ordered union arms; only "one non-null arm plus null" is decodable.
	Union(Vec<Descriptor>),
	/// Homogeneous sequence; `None` element descriptor passes items through.
	Sequence(Option<Box<Descriptor>>),
	/// String-keyed mapping: key scalar kind plus value descriptor.
	Mapping(ScalarKind, Box<Descriptor>),
	/// Nested record.
	Record(&'static RecordShape),
	/// The absent arm marker inside unions; accepts only null.
	Null,
}

impl Descriptor {
	/// Nullable wrapper around `inner`.
	pub fn optional(inner: Descriptor) -> Descriptor {
		Descriptor::Optional(Box::new(inner))
	}

	/// Sequence of `elem` items.
	pub fn sequence(elem: Descriptor) -> Descriptor {
		Descriptor::Sequence(Some(Box::new(elem)))
	}

	/// String-keyed mapping of `value` entries.
	pub fn mapping(value: Descriptor) -> Descriptor {
		Descriptor::Mapping(ScalarKind::Str, Box::new(value))
	}
}

/// Static member-name table for one enumeration type.
#[derive(Debug)]
pub struct EnumShape {
	/// Enum type name.
	pub name: &'static str,
	/// Member names in declaration order.
	pub members: &'static [&'static str],
}

impl EnumShape {
	/// Look a member up by name.
	pub fn member(&'static self, name: &str) -> Option<EnumMember> {
		self.members.iter().position(|m| *m == name).map(|index| EnumMember { shape: self, index })
	}

	/// Member at a declaration index, for building live enum fields.
	pub fn member_at(&'static self, index: usize) -> Option<EnumMember> {
		(index < self.members.len()).then_some(EnumMember { shape: self, index })
	}
}

/// Handle to one member of an [`EnumShape`].
#[derive(Clone, Copy)]
pub struct EnumMember {
	/// Owning enum shape.
	pub shape: &'static EnumShape,
	/// Position in the shape's member table.
	pub index: usize,
}

impl EnumMember {
	/// Member name; the only representation that crosses the wire.
	pub fn name(&self) -> &'static str {
		self.shape.members[self.index]
	}
}

impl PartialEq for EnumMember {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.shape, other.shape) && self.index == other.index
	}
}

impl fmt::Debug for EnumMember {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}::{}", self.shape.name, self.name())
	}
}

/// Schema-validated model protocol: a record type that carries its own
/// validating constructor and exporter bypasses field-by-field traversal.
#[derive(Clone, Copy)]
pub struct ModelVtable {
	/// Validating "construct from mapping" operation.
	pub from_mapping: fn(&Value) -> Result<Box<dyn Record>>,
	/// "Export to mapping" operation.
	pub to_mapping: fn(&dyn Record) -> Result<Value>,
}

/// Static per-type table describing one record type.
///
/// Shapes are declared as `static` items; identity (the `&'static` address)
/// is what the hint cache and the validator key on.
pub struct RecordShape {
	/// Record type name.
	pub name: &'static str,
	/// Declared field names; unknown-key detection is membership here.
	pub fields: &'static [&'static str],
	/// Default (zero-argument) instance constructor.
	pub new_default: fn() -> Box<dyn Record>,
	/// Field-name to descriptor table; memoized by [`crate::cast::HintCache`].
	pub type_hints: fn() -> FieldTable,
	/// Present when the type implements the schema-validated model protocol.
	pub model: Option<ModelVtable>,
}

impl RecordShape {
	/// True when the record type declares a field of this name.
	pub fn has_field(&self, name: &str) -> bool {
		self.fields.iter().any(|f| *f == name)
	}
}

impl fmt::Debug for RecordShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RecordShape").field("name", &self.name).field("fields", &self.fields).finish()
	}
}
