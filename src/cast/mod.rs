mod decode;
mod descriptor;
mod encode;
mod error;
mod hints;
mod json;
mod record;
mod validate;
mod value;

/// Decoding entry points and options.
pub use decode::{CastOptions, decode_record, decode_value};
/// Shape and descriptor vocabulary shared by both pipelines.
pub use descriptor::{Descriptor, EnumMember, EnumShape, FieldTable, ModelVtable, RecordShape, ScalarKind};
/// Encoding entry point.
pub use encode::encode_record;
/// Error and result aliases.
pub use error::{CastError, Result};
/// Memoized field-table lookup.
pub use hints::HintCache;
/// JSON text helpers for the generic value tree.
pub use json::{from_str, to_string, to_string_pretty};
/// Record reflection trait and the typed-side value tree.
pub use record::{Decoded, Record};
/// Structural conformance check used by the encoder.
pub use validate::validate;
/// Generic value tree.
pub use value::Value;
