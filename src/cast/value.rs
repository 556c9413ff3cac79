/// Generic nested data: the wire-shape the decoder consumes and the encoder
/// produces.
///
/// Mappings are kept as ordered pairs so that input iteration order is the
/// order the engine observes, including duplicate-free key order round trips.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Absent value.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	I64(i64),
	/// Unsigned integer scalar.
	U64(u64),
	/// Floating point scalar.
	F64(f64),
	/// String scalar.
	Str(String),
	/// Ordered sequence.
	Seq(Vec<Value>),
	/// String-keyed mapping in insertion order.
	Map(Vec<(String, Value)>),
}

impl Value {
	/// Short kind name for diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::I64(_) => "int",
			Value::U64(_) => "uint",
			Value::F64(_) => "float",
			Value::Str(_) => "string",
			Value::Seq(_) => "sequence",
			Value::Map(_) => "mapping",
		}
	}

	/// True when the value is `Null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// First mapping entry with the given key, if this is a mapping.
	pub fn get(&self, key: &str) -> Option<&Value> {
		match self {
			Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
			_ => None,
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::I64(value)
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		Value::U64(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::F64(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Str(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Str(value)
	}
}
