use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::cast::value::Value;
use crate::cast::Result;

/// Parse JSON text into a generic value tree, preserving object key order.
pub fn from_str(text: &str) -> Result<Value> {
	Ok(serde_json::from_str(text)?)
}

/// Render a generic value tree as compact JSON text.
pub fn to_string(value: &Value) -> Result<String> {
	Ok(serde_json::to_string(value)?)
}

/// Render a generic value tree as pretty-printed JSON text.
pub fn to_string_pretty(value: &Value) -> Result<String> {
	Ok(serde_json::to_string_pretty(value)?)
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Value::Null => serializer.serialize_unit(),
			Value::Bool(b) => serializer.serialize_bool(*b),
			Value::I64(n) => serializer.serialize_i64(*n),
			Value::U64(n) => serializer.serialize_u64(*n),
			Value::F64(n) => serializer.serialize_f64(*n),
			Value::Str(s) => serializer.serialize_str(s),
			Value::Seq(items) => serializer.collect_seq(items),
			Value::Map(entries) => serializer.collect_map(entries.iter().map(|(k, v)| (k, v))),
		}
	}
}

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		deserializer.deserialize_any(ValueVisitor)
	}
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
	type Value = Value;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a null, scalar, sequence, or string-keyed mapping")
	}

	fn visit_bool<E>(self, v: bool) -> std::result::Result<Value, E> {
		Ok(Value::Bool(v))
	}

	fn visit_i64<E>(self, v: i64) -> std::result::Result<Value, E> {
		Ok(Value::I64(v))
	}

	fn visit_u64<E>(self, v: u64) -> std::result::Result<Value, E> {
		// Fold into the signed lane when it fits so integers round-trip
		// through text with a stable variant.
		Ok(i64::try_from(v).map_or(Value::U64(v), Value::I64))
	}

	fn visit_f64<E>(self, v: f64) -> std::result::Result<Value, E> {
		Ok(Value::F64(v))
	}

	fn visit_str<E>(self, v: &str) -> std::result::Result<Value, E> {
		Ok(Value::Str(v.to_owned()))
	}

	fn visit_string<E>(self, v: String) -> std::result::Result<Value, E> {
		Ok(Value::Str(v))
	}

	fn visit_unit<E>(self) -> std::result::Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_none<E>(self) -> std::result::Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Value, D::Error> {
		deserializer.deserialize_any(ValueVisitor)
	}

	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
		let mut items = Vec::new();
		while let Some(item) = seq.next_element()? {
			items.push(item);
		}
		Ok(Value::Seq(items))
	}

	fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Value, A::Error> {
		let mut entries = Vec::new();
		while let Some(entry) = map.next_entry::<String, Value>()? {
			entries.push(entry);
		}
		Ok(Value::Map(entries))
	}
}
