use std::any::Any;
use std::fmt;

use crate::cast::descriptor::{EnumMember, RecordShape};
use crate::cast::value::Value;
use crate::cast::Result;

/// Reflection surface a record type exposes to the engine.
///
/// A record instance is exclusively owned by the caller across a conversion
/// call; the engine neither stores nor aliases it beyond the call.
pub trait Record: fmt::Debug {
	/// Static shape table for this record type.
	fn shape(&self) -> &'static RecordShape;

	/// Assign one named field from a decoded value.
	fn set_field(&mut self, name: &str, value: Decoded) -> Result<()>;

	/// Live attribute set in declaration order, for encoding.
	fn fields(&self) -> Vec<(&'static str, Decoded)>;

	/// Downcast support for callers that know the concrete type.
	fn as_any(&self) -> &dyn Any;

	/// Boxed clone, so `Box<dyn Record>` is `Clone`.
	fn clone_box(&self) -> Box<dyn Record>;
}

impl Clone for Box<dyn Record> {
	fn clone(&self) -> Self {
		self.clone_box()
	}
}

/// Typed-side value tree produced by the decoder and consumed by the encoder.
#[derive(Debug, Clone)]
pub enum Decoded {
	/// Absent value.
	Null,
	/// Generic value carried through unconverted.
	Value(Value),
	/// Enum member handle.
	Enum(EnumMember),
	/// Ordered sequence of decoded items.
	Seq(Vec<Decoded>),
	/// String-keyed mapping of decoded entries, in input order.
	Map(Vec<(String, Decoded)>),
	/// Live record instance.
	Record(Box<dyn Record>),
}

impl Decoded {
	/// Short kind name for diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Decoded::Null => "null",
			Decoded::Value(v) => v.kind(),
			Decoded::Enum(_) => "enum",
			Decoded::Seq(_) => "sequence",
			Decoded::Map(_) => "mapping",
			Decoded::Record(_) => "record",
		}
	}

	/// Inner bool, when this is a bool scalar.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Decoded::Value(Value::Bool(b)) => Some(*b),
			_ => None,
		}
	}

	/// Inner signed integer, when this is an int scalar.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Decoded::Value(Value::I64(n)) => Some(*n),
			_ => None,
		}
	}

	/// Inner unsigned integer, when this is a uint scalar.
	pub fn as_u64(&self) -> Option<u64> {
		match self {
			Decoded::Value(Value::U64(n)) => Some(*n),
			_ => None,
		}
	}

	/// Inner float, when this is a float scalar.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Decoded::Value(Value::F64(n)) => Some(*n),
			_ => None,
		}
	}

	/// Inner string slice, when this is a string scalar.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Decoded::Value(Value::Str(s)) => Some(s),
			_ => None,
		}
	}

	/// Borrow the record instance, when this is a record.
	pub fn as_record(&self) -> Option<&dyn Record> {
		match self {
			Decoded::Record(rec) => Some(rec.as_ref()),
			_ => None,
		}
	}

	/// Downcast to a concrete record type.
	pub fn downcast_record<T: 'static>(&self) -> Option<&T> {
		self.as_record().and_then(|rec| rec.as_any().downcast_ref::<T>())
	}
}

impl From<Value> for Decoded {
	fn from(value: Value) -> Self {
		Decoded::Value(value)
	}
}

impl From<bool> for Decoded {
	fn from(value: bool) -> Self {
		Decoded::Value(Value::Bool(value))
	}
}

impl From<i64> for Decoded {
	fn from(value: i64) -> Self {
		Decoded::Value(Value::I64(value))
	}
}

impl From<u64> for Decoded {
	fn from(value: u64) -> Self {
		Decoded::Value(Value::U64(value))
	}
}

impl From<f64> for Decoded {
	fn from(value: f64) -> Self {
		Decoded::Value(Value::F64(value))
	}
}

impl From<&str> for Decoded {
	fn from(value: &str) -> Self {
		Decoded::Value(Value::Str(value.to_owned()))
	}
}

impl From<String> for Decoded {
	fn from(value: String) -> Self {
		Decoded::Value(Value::Str(value))
	}
}
