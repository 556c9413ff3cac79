use crate::cast::hints::HintCache;
use crate::cast::record::Decoded;
use crate::cast::validate::validate;
use crate::cast::value::Value;
use crate::cast::Result;

/// Encode a live value into generic data.
///
/// Structural: the kind is re-derived from the value's own run-time shape,
/// never from a descriptor. Record fields that do have a descriptor are
/// validated before emission; fields without one are still emitted so that
/// hand-added attributes are not silently dropped.
pub fn encode_record(hints: &HintCache, obj: &Decoded) -> Result<Value> {
	match obj {
		Decoded::Null => Ok(Value::Null),
		Decoded::Value(value) => Ok(value.clone()),
		Decoded::Enum(member) => Ok(Value::Str(member.name().to_owned())),
		Decoded::Seq(items) => {
			let mut out = Vec::with_capacity(items.len());
			for item in items {
				out.push(encode_record(hints, item)?);
			}
			Ok(Value::Seq(out))
		}
		Decoded::Map(entries) => {
			let mut out = Vec::with_capacity(entries.len());
			for (key, value) in entries {
				out.push((key.clone(), encode_record(hints, value)?));
			}
			Ok(Value::Map(out))
		}
		Decoded::Record(record) => {
			let shape = record.shape();
			if let Some(model) = &shape.model {
				return (model.to_mapping)(record.as_ref());
			}

			let table = hints.hints_of(shape);
			let mut out = Vec::new();
			for (name, value) in record.fields() {
				if let Some(descriptor) = table.get(name) {
					validate(name, &value, descriptor)?;
				}
				out.push((name.to_owned(), encode_record(hints, &value)?));
			}
			Ok(Value::Map(out))
		}
	}
}
