//! Public library API for marshalling typed records to and from generic
//! nested data.

/// Descriptor-driven decoding, structural encoding, validation, and the
/// shape/hint tables they share.
pub mod cast;
