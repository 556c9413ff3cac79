use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CastError>;

/// Errors produced while decoding, encoding, and validating record data.
#[derive(Debug, Error)]
pub enum CastError {
	/// Record decoding was handed an empty mapping.
	#[error("empty input mapping for record {type_name}")]
	EmptyInput {
		/// Target record type name.
		type_name: &'static str,
	},
	/// Input mapping contains a key the target record type does not declare.
	#[error("unknown data key for {type_name}: {key}")]
	UnknownKey {
		/// Target record type name.
		type_name: &'static str,
		/// Offending input key.
		key: String,
	},
	/// Input is not a valid member name of the target enum.
	#[error("invalid enum value for key {key}: {value} (enum {enum_name})")]
	InvalidEnumValue {
		/// Field key path being decoded.
		key: String,
		/// Offending input value.
		value: String,
		/// Target enum type name.
		enum_name: &'static str,
	},
	/// Union descriptor has more than one non-null arm.
	#[error("unsupported union for key {key}: {union}")]
	UnsupportedUnion {
		/// Field key path being decoded.
		key: String,
		/// Rendering of the full union descriptor.
		union: String,
	},
	/// Mapping descriptor's key kind is not string.
	#[error("unsupported mapping key kind for key {key}: {kind} (only string keys)")]
	UnsupportedKeyType {
		/// Field key path being decoded.
		key: String,
		/// Offending key kind name.
		kind: &'static str,
	},
	/// A scalar construction or shape requirement failed.
	#[error("conversion failed for key {key}: cannot make {target} from {value}")]
	Conversion {
		/// Field key path being decoded.
		key: String,
		/// Target kind or type name.
		target: String,
		/// Rendering of the offending value.
		value: String,
	},
	/// A value did not structurally match its descriptor during encoding.
	#[error("validation failed for key {key}: expected {expected}, got {got}")]
	Validation {
		/// Field key path being encoded.
		key: String,
		/// Expected shape description.
		expected: String,
		/// Actual value description.
		got: String,
	},
	/// Recursion depth exceeded the configured limit.
	#[error("cast depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// JSON text layer failure at the wire boundary.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
}
