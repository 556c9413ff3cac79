use crate::cast::descriptor::{Descriptor, EnumShape, RecordShape, ScalarKind};
use crate::cast::hints::HintCache;
use crate::cast::record::{Decoded, Record};
use crate::cast::value::Value;
use crate::cast::{CastError, Result};

/// Runtime limits for a conversion call.
#[derive(Debug, Clone)]
pub struct CastOptions {
	/// Maximum recursive nesting depth across records, sequences, and
	/// mappings.
	pub max_depth: u32,
}

impl Default for CastOptions {
	fn default() -> Self {
		Self { max_depth: 64 }
	}
}

/// Decode a generic value against a descriptor.
///
/// Dispatch is purely on the descriptor variant; the value's own run-time
/// kind is consulted only for the terminal null short-circuit and for the
/// shape requirements each variant imposes.
pub fn decode_value(hints: &HintCache, key: &str, value: &Value, descriptor: &Descriptor, opt: &CastOptions) -> Result<Decoded> {
	decode_value_impl(hints, key, value, descriptor, opt, 0)
}

/// Decode a generic mapping into a record instance.
pub fn decode_record(hints: &HintCache, data: &Value, shape: &'static RecordShape, opt: &CastOptions) -> Result<Box<dyn Record>> {
	decode_record_impl(hints, data, shape, opt, 0)
}

fn decode_value_impl(hints: &HintCache, key: &str, value: &Value, descriptor: &Descriptor, opt: &CastOptions, depth: u32) -> Result<Decoded> {
	if depth >= opt.max_depth {
		return Err(CastError::DepthExceeded { max_depth: opt.max_depth });
	}

	// Null against a nullable descriptor wins before any other dispatch.
	if value.is_null() && accepts_null(descriptor) {
		return Ok(Decoded::Null);
	}

	match descriptor {
		&Descriptor::Enum(shape) => decode_enum(key, value, shape),
		&Descriptor::Record(shape) => Ok(Decoded::Record(decode_record_impl(hints, value, shape, opt, depth + 1)?)),
		Descriptor::Optional(inner) => decode_value_impl(hints, key, value, inner, opt, depth + 1),
		Descriptor::Sequence(elem) => decode_sequence(hints, key, value, elem.as_deref(), opt, depth),
		Descriptor::Mapping(key_kind, value_desc) => decode_mapping(hints, key, value, *key_kind, value_desc, opt, depth),
		Descriptor::Union(arms) => decode_union(hints, key, value, arms, opt, depth),
		Descriptor::Null => Err(conversion(key, "null", value)),
		Descriptor::Scalar(kind) => decode_scalar(key, value, *kind),
	}
}

fn accepts_null(descriptor: &Descriptor) -> bool {
	match descriptor {
		Descriptor::Optional(_) | Descriptor::Null => true,
		Descriptor::Union(arms) => arms.iter().any(|arm| matches!(arm, Descriptor::Null)),
		_ => false,
	}
}

fn decode_enum(key: &str, value: &Value, shape: &'static EnumShape) -> Result<Decoded> {
	let member = match value {
		Value::Str(name) => shape.member(name),
		_ => None,
	};
	member.map(Decoded::Enum).ok_or_else(|| CastError::InvalidEnumValue {
		key: key.to_owned(),
		value: format!("{value:?}"),
		enum_name: shape.name,
	})
}

fn decode_union(hints: &HintCache, key: &str, value: &Value, arms: &[Descriptor], opt: &CastOptions, depth: u32) -> Result<Decoded> {
	let mut non_null = arms.iter().filter(|arm| !matches!(arm, Descriptor::Null));
	match (non_null.next(), non_null.next()) {
		(Some(&Descriptor::Enum(shape)), None) => decode_enum(key, value, shape),
		(Some(arm), None) => decode_value_impl(hints, key, value, arm, opt, depth + 1),
		_ => Err(CastError::UnsupportedUnion {
			key: key.to_owned(),
			union: format!("{arms:?}"),
		}),
	}
}

fn decode_sequence(hints: &HintCache, key: &str, value: &Value, elem: Option<&Descriptor>, opt: &CastOptions, depth: u32) -> Result<Decoded> {
	let Value::Seq(items) = value else {
		return Err(conversion(key, "sequence", value));
	};

	match elem {
		None => Ok(Decoded::Value(value.clone())),
		Some(&Descriptor::Record(shape)) => {
			let mut out = Vec::with_capacity(items.len());
			for item in items {
				out.push(Decoded::Record(decode_record_impl(hints, item, shape, opt, depth + 1)?));
			}
			Ok(Decoded::Seq(out))
		}
		Some(elem) => {
			let mut out = Vec::with_capacity(items.len());
			for (i, item) in items.iter().enumerate() {
				out.push(decode_value_impl(hints, &format!("{key}[{i}]"), item, elem, opt, depth + 1)?);
			}
			Ok(Decoded::Seq(out))
		}
	}
}

fn decode_mapping(
	hints: &HintCache,
	key: &str,
	value: &Value,
	key_kind: ScalarKind,
	value_desc: &Descriptor,
	opt: &CastOptions,
	depth: u32,
) -> Result<Decoded> {
	if key_kind != ScalarKind::Str {
		return Err(CastError::UnsupportedKeyType {
			key: key.to_owned(),
			kind: key_kind.name(),
		});
	}

	let Value::Map(entries) = value else {
		return Err(conversion(key, "mapping", value));
	};

	// Only record-like entry values are worth re-decoding; simple values
	// already went through decode_value at the call site.
	if matches!(value_desc, Descriptor::Record(_) | Descriptor::Union(_) | Descriptor::Optional(_)) {
		let mut out = Vec::with_capacity(entries.len());
		for (entry_key, entry_value) in entries {
			let decoded = decode_value_impl(hints, &format!("{key}.{entry_key}"), entry_value, value_desc, opt, depth + 1)?;
			out.push((entry_key.clone(), decoded));
		}
		return Ok(Decoded::Map(out));
	}

	Ok(Decoded::Value(value.clone()))
}

fn decode_scalar(key: &str, value: &Value, kind: ScalarKind) -> Result<Decoded> {
	match kind {
		ScalarKind::AnyMap | ScalarKind::AnySeq | ScalarKind::Any => Ok(Decoded::Value(value.clone())),
		ScalarKind::Bool => match value {
			Value::Bool(b) => Ok(Decoded::Value(Value::Bool(*b))),
			_ => Err(conversion(key, kind.name(), value)),
		},
		ScalarKind::Int => decode_int(key, value).map(|n| Decoded::Value(Value::I64(n))),
		ScalarKind::UInt => decode_uint(key, value).map(|n| Decoded::Value(Value::U64(n))),
		ScalarKind::Float => decode_float(key, value).map(|n| Decoded::Value(Value::F64(n))),
		ScalarKind::Str => decode_string(key, value).map(|s| Decoded::Value(Value::Str(s))),
	}
}

fn decode_int(key: &str, value: &Value) -> Result<i64> {
	match value {
		Value::I64(n) => Ok(*n),
		Value::U64(n) => i64::try_from(*n).map_err(|_| conversion(key, "int", value)),
		Value::F64(n) => Ok(*n as i64),
		Value::Str(s) => s.parse().map_err(|_| conversion(key, "int", value)),
		Value::Bool(b) => Ok(i64::from(*b)),
		_ => Err(conversion(key, "int", value)),
	}
}

fn decode_uint(key: &str, value: &Value) -> Result<u64> {
	match value {
		Value::U64(n) => Ok(*n),
		Value::I64(n) => u64::try_from(*n).map_err(|_| conversion(key, "uint", value)),
		Value::F64(n) if *n >= 0.0 => Ok(*n as u64),
		Value::Str(s) => s.parse().map_err(|_| conversion(key, "uint", value)),
		Value::Bool(b) => Ok(u64::from(*b)),
		_ => Err(conversion(key, "uint", value)),
	}
}

fn decode_float(key: &str, value: &Value) -> Result<f64> {
	match value {
		Value::F64(n) => Ok(*n),
		Value::I64(n) => Ok(*n as f64),
		Value::U64(n) => Ok(*n as f64),
		Value::Str(s) => s.parse().map_err(|_| conversion(key, "float", value)),
		_ => Err(conversion(key, "float", value)),
	}
}

fn decode_string(key: &str, value: &Value) -> Result<String> {
	match value {
		Value::Str(s) => Ok(s.clone()),
		Value::Bool(b) => Ok(b.to_string()),
		Value::I64(n) => Ok(n.to_string()),
		Value::U64(n) => Ok(n.to_string()),
		Value::F64(n) => Ok(n.to_string()),
		_ => Err(conversion(key, "string", value)),
	}
}

fn decode_record_impl(hints: &HintCache, data: &Value, shape: &'static RecordShape, opt: &CastOptions, depth: u32) -> Result<Box<dyn Record>> {
	if depth >= opt.max_depth {
		return Err(CastError::DepthExceeded { max_depth: opt.max_depth });
	}

	let Value::Map(entries) = data else {
		return Err(conversion(shape.name, "mapping", data));
	};
	if entries.is_empty() {
		return Err(CastError::EmptyInput { type_name: shape.name });
	}

	if let Some(model) = &shape.model {
		return (model.from_mapping)(data);
	}

	let mut record = (shape.new_default)();
	let table = hints.hints_of(shape);

	for (entry_key, entry_value) in entries {
		if !shape.has_field(entry_key) {
			return Err(CastError::UnknownKey {
				type_name: shape.name,
				key: entry_key.clone(),
			});
		}
		// A declared field without a descriptor keeps its default value.
		if let Some(descriptor) = table.get(entry_key.as_str()) {
			let decoded = decode_value_impl(hints, entry_key, entry_value, descriptor, opt, depth + 1)?;
			record.set_field(entry_key, decoded)?;
		}
	}

	Ok(record)
}

fn conversion(key: &str, target: &str, value: &Value) -> CastError {
	CastError::Conversion {
		key: key.to_owned(),
		target: target.to_owned(),
		value: format!("{value:?}"),
	}
}
