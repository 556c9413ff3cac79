use crate::cast::descriptor::{Descriptor, ScalarKind};
use crate::cast::record::Decoded;
use crate::cast::value::Value;
use crate::cast::{CastError, Result};

/// Check that a live value structurally conforms to a descriptor.
///
/// Called by the encoder before emitting each described record field; never
/// called by the decoder. Checks shape only — no coercion happens here.
pub fn validate(key: &str, value: &Decoded, descriptor: &Descriptor) -> Result<()> {
	match descriptor {
		Descriptor::Null => match value {
			Decoded::Null => Ok(()),
			_ => Err(mismatch(key, descriptor, value)),
		},
		Descriptor::Optional(inner) => match value {
			Decoded::Null => Ok(()),
			_ => validate(key, value, inner),
		},
		Descriptor::Union(arms) => validate_union(key, value, arms),
		Descriptor::Scalar(kind) => validate_scalar(key, value, *kind, descriptor),
		Descriptor::Enum(shape) => match value {
			Decoded::Enum(member) if std::ptr::eq(member.shape, *shape) => Ok(()),
			_ => Err(mismatch(key, descriptor, value)),
		},
		Descriptor::Record(shape) => match value {
			Decoded::Record(record) if std::ptr::eq(record.shape(), *shape) => Ok(()),
			_ => Err(mismatch(key, descriptor, value)),
		},
		Descriptor::Sequence(elem) => validate_sequence(key, value, elem.as_deref(), descriptor),
		Descriptor::Mapping(key_kind, value_desc) => validate_mapping(key, value, *key_kind, value_desc, descriptor),
	}
}

fn validate_union(key: &str, value: &Decoded, arms: &[Descriptor]) -> Result<()> {
	if matches!(value, Decoded::Null) && arms.iter().any(|arm| matches!(arm, Descriptor::Null)) {
		return Ok(());
	}

	let mut non_null = arms.iter().filter(|arm| !matches!(arm, Descriptor::Null));
	match (non_null.next(), non_null.next()) {
		(Some(arm), None) => validate(key, value, arm),
		_ => Err(CastError::UnsupportedUnion {
			key: key.to_owned(),
			union: format!("{arms:?}"),
		}),
	}
}

fn validate_scalar(key: &str, value: &Decoded, kind: ScalarKind, descriptor: &Descriptor) -> Result<()> {
	let ok = match kind {
		ScalarKind::Any => true,
		ScalarKind::Bool => value.as_bool().is_some(),
		ScalarKind::Int => value.as_i64().is_some(),
		ScalarKind::UInt => value.as_u64().is_some(),
		ScalarKind::Float => value.as_f64().is_some(),
		ScalarKind::Str => value.as_str().is_some(),
		ScalarKind::AnyMap => matches!(value, Decoded::Map(_) | Decoded::Value(Value::Map(_))),
		ScalarKind::AnySeq => matches!(value, Decoded::Seq(_) | Decoded::Value(Value::Seq(_))),
	};
	if ok { Ok(()) } else { Err(mismatch(key, descriptor, value)) }
}

fn validate_sequence(key: &str, value: &Decoded, elem: Option<&Descriptor>, descriptor: &Descriptor) -> Result<()> {
	match (value, elem) {
		(Decoded::Seq(_) | Decoded::Value(Value::Seq(_)), None) => Ok(()),
		(Decoded::Seq(items), Some(elem)) => {
			for (i, item) in items.iter().enumerate() {
				validate(&format!("{key}[{i}]"), item, elem)?;
			}
			Ok(())
		}
		_ => Err(mismatch(key, descriptor, value)),
	}
}

fn validate_mapping(key: &str, value: &Decoded, key_kind: ScalarKind, value_desc: &Descriptor, descriptor: &Descriptor) -> Result<()> {
	if key_kind != ScalarKind::Str {
		return Err(CastError::UnsupportedKeyType {
			key: key.to_owned(),
			kind: key_kind.name(),
		});
	}

	match value {
		Decoded::Map(entries) => {
			for (entry_key, entry_value) in entries {
				validate(&format!("{key}.{entry_key}"), entry_value, value_desc)?;
			}
			Ok(())
		}
		Decoded::Value(Value::Map(entries)) => {
			for (entry_key, entry_value) in entries {
				validate(&format!("{key}.{entry_key}"), &Decoded::Value(entry_value.clone()), value_desc)?;
			}
			Ok(())
		}
		_ => Err(mismatch(key, descriptor, value)),
	}
}

fn mismatch(key: &str, descriptor: &Descriptor, value: &Decoded) -> CastError {
	CastError::Validation {
		key: key.to_owned(),
		expected: expected_name(descriptor),
		got: got_name(value),
	}
}

fn expected_name(descriptor: &Descriptor) -> String {
	match descriptor {
		Descriptor::Scalar(kind) => kind.name().to_owned(),
		Descriptor::Enum(shape) => format!("enum {}", shape.name),
		Descriptor::Record(shape) => format!("record {}", shape.name),
		Descriptor::Optional(inner) => format!("optional {}", expected_name(inner)),
		Descriptor::Union(_) => "union".to_owned(),
		Descriptor::Sequence(_) => "sequence".to_owned(),
		Descriptor::Mapping(..) => "mapping".to_owned(),
		Descriptor::Null => "null".to_owned(),
	}
}

fn got_name(value: &Decoded) -> String {
	match value {
		Decoded::Enum(member) => format!("enum {}", member.shape.name),
		Decoded::Record(record) => format!("record {}", record.shape().name),
		other => other.kind().to_owned(),
	}
}
