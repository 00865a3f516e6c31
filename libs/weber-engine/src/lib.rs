pub mod registry;
pub mod resolver;

mod numeric;
mod scalar;

use weber_api::decoder::Decoder;
use weber_api::error::CoerceError;
use weber_api::schema::TypeDesc;
use weber_api::value::Value;

/// Resolve and apply in one step, for one-shot conversions.
///
/// Callers converting many values for the same descriptor pair should
/// resolve once (directly or through [`registry::DecoderRegistry`]) and
/// reuse the decoder instead.
pub fn coerce(
    dest_desc: &TypeDesc,
    src_desc: &TypeDesc,
    dest: &mut Value,
    src: &Value,
) -> Result<(), CoerceError> {
    resolver::resolve(dest_desc, src_desc).apply(dest, src)
}
