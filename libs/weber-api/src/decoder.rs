use crate::error::CoerceError;
use crate::value::Value;

/// A resolved conversion function.
///
/// Solves one task: write the source's runtime value into the destination
/// slot, coerced to the slot's type. Stateless and shareable: one resolved
/// decoder serves any number of concurrent applications, provided each
/// call targets a distinct destination slot.
///
/// Contract: on failure nothing has been written to the destination. The
/// single exception is the invalid-value decoder, which zeroes the slot by
/// definition.
pub trait Decoder: Send + Sync {
    fn apply(&self, dest: &mut Value, src: &Value) -> Result<(), CoerceError>;
}
