//! The scalar coercion table: one conversion function per
//! (destination-kind, source-kind) pair over the five scalar kinds.
//!
//! Every function is total over contract-conforming slots. A slot/value
//! pair whose runtime variants do not match the descriptors the decoder
//! was resolved for is reported as an unexpected-type failure — never a
//! panic, never a partial write.

use weber_api::error::CoerceError;
use weber_api::schema::Kind;
use weber_api::value::Value;

use crate::numeric;

/// One entry in the scalar coercion table.
pub(crate) type ScalarFn = fn(&mut Value, &Value) -> Result<(), CoerceError>;

/// Scalar coercion table, indexed `[destination][source]` by scalar
/// ordinal. Row and column order: bool, int, uint, float, string.
pub(crate) static SCALAR_TABLE: [[ScalarFn; 5]; 5] = [
    [bool_as_bool, int_as_bool, uint_as_bool, float_as_bool, str_as_bool],
    [bool_as_int, int_as_int, uint_as_int, float_as_int, str_as_int],
    [bool_as_uint, int_as_uint, uint_as_uint, float_as_uint, str_as_uint],
    [bool_as_float, int_as_float, uint_as_float, float_as_float, str_as_float],
    [bool_as_str, int_as_str, uint_as_str, float_as_str, str_as_str],
];

/// Ordinal of a scalar kind in the table; `None` for non-scalar kinds.
pub(crate) fn scalar_index(kind: Kind) -> Option<usize> {
    match kind {
        Kind::Bool => Some(0),
        Kind::Int => Some(1),
        Kind::Uint => Some(2),
        Kind::Float => Some(3),
        Kind::Str => Some(4),
        _ => None,
    }
}

fn mismatch(dest: &Value, src: &Value) -> CoerceError {
    CoerceError::unexpected(dest.type_name(), src.type_name())
}

// ---------------------------------------------------------------------------
// Boolean destination
// ---------------------------------------------------------------------------

fn bool_as_bool(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.bool_value().ok_or_else(|| mismatch(dest, src))?;
    if dest.set_bool(v) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn int_as_bool(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.int_value().ok_or_else(|| mismatch(dest, src))?;
    if dest.set_bool(v != 0) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn uint_as_bool(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.uint_value().ok_or_else(|| mismatch(dest, src))?;
    if dest.set_bool(v != 0) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn float_as_bool(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.float_value().ok_or_else(|| mismatch(dest, src))?;
    if dest.set_bool(v != 0.0) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn str_as_bool(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let s = src.str_value().ok_or_else(|| mismatch(dest, src))?;
    let parsed = match numeric::parse_bool(s) {
        Ok(v) => v,
        // An empty string reads as the zero value, not a failure.
        Err(_) if s.is_empty() => false,
        Err(e) => {
            return Err(CoerceError::invalid(dest.type_name(), src.type_name(), e));
        }
    };
    if dest.set_bool(parsed) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

// ---------------------------------------------------------------------------
// Signed integer destination
// ---------------------------------------------------------------------------

fn bool_as_int(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.bool_value().ok_or_else(|| mismatch(dest, src))?;
    if dest.set_int(if v { 1 } else { 0 }) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn int_as_int(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.int_value().ok_or_else(|| mismatch(dest, src))?;
    // No overflow check: narrower slots truncate.
    if dest.set_int(v) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn uint_as_int(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.uint_value().ok_or_else(|| mismatch(dest, src))?;
    // Reinterpret: values above i64::MAX change sign.
    if dest.set_int(v as i64) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn float_as_int(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.float_value().ok_or_else(|| mismatch(dest, src))?;
    // Truncates toward zero, saturating at the i64 range.
    if dest.set_int(v as i64) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn str_as_int(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let s = src.str_value().ok_or_else(|| mismatch(dest, src))?;
    let bits = dest.int_bits().ok_or_else(|| mismatch(dest, src))?;
    let v = numeric::parse_int(s, bits)
        .map_err(|e| CoerceError::invalid(dest.type_name(), src.type_name(), e))?;
    dest.set_int(v);
    Ok(())
}

// ---------------------------------------------------------------------------
// Unsigned integer destination
// ---------------------------------------------------------------------------

fn bool_as_uint(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.bool_value().ok_or_else(|| mismatch(dest, src))?;
    if dest.set_uint(if v { 1 } else { 0 }) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn int_as_uint(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.int_value().ok_or_else(|| mismatch(dest, src))?;
    // Reinterpret: negative values become large positives.
    if dest.set_uint(v as u64) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn uint_as_uint(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.uint_value().ok_or_else(|| mismatch(dest, src))?;
    if dest.set_uint(v) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn float_as_uint(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.float_value().ok_or_else(|| mismatch(dest, src))?;
    // Truncate toward zero; negatives reinterpret through the signed form.
    let truncated = if v < 0.0 { (v as i64) as u64 } else { v as u64 };
    if dest.set_uint(truncated) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn str_as_uint(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let s = src.str_value().ok_or_else(|| mismatch(dest, src))?;
    let bits = dest.uint_bits().ok_or_else(|| mismatch(dest, src))?;
    let v = numeric::parse_uint(s, bits)
        .map_err(|e| CoerceError::invalid(dest.type_name(), src.type_name(), e))?;
    dest.set_uint(v);
    Ok(())
}

// ---------------------------------------------------------------------------
// Floating-point destination
// ---------------------------------------------------------------------------

fn bool_as_float(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.bool_value().ok_or_else(|| mismatch(dest, src))?;
    if dest.set_float(if v { 1.0 } else { 0.0 }) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn int_as_float(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.int_value().ok_or_else(|| mismatch(dest, src))?;
    if dest.set_float(v as f64) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn uint_as_float(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.uint_value().ok_or_else(|| mismatch(dest, src))?;
    if dest.set_float(v as f64) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn float_as_float(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.float_value().ok_or_else(|| mismatch(dest, src))?;
    if dest.set_float(v) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn str_as_float(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let s = src.str_value().ok_or_else(|| mismatch(dest, src))?;
    let bits = dest.float_bits().ok_or_else(|| mismatch(dest, src))?;
    let v = numeric::parse_float(s, bits)
        .map_err(|e| CoerceError::invalid(dest.type_name(), src.type_name(), e))?;
    dest.set_float(v);
    Ok(())
}

// ---------------------------------------------------------------------------
// String destination
// ---------------------------------------------------------------------------

fn bool_as_str(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.bool_value().ok_or_else(|| mismatch(dest, src))?;
    if dest.set_str(if v { "1" } else { "0" }.to_string()) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn int_as_str(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.int_value().ok_or_else(|| mismatch(dest, src))?;
    if dest.set_str(v.to_string()) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn uint_as_str(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let v = src.uint_value().ok_or_else(|| mismatch(dest, src))?;
    if dest.set_str(v.to_string()) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn float_as_str(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    // Widen to f64 first, then render the shortest round-trip form of the
    // widened value — an f32 source renders its f64 image.
    let v = src.float_value().ok_or_else(|| mismatch(dest, src))?;
    if dest.set_str(v.to_string()) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}

fn str_as_str(dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
    let s = src.str_value().ok_or_else(|| mismatch(dest, src))?;
    let owned = s.to_string();
    if dest.set_str(owned) {
        Ok(())
    } else {
        Err(mismatch(dest, src))
    }
}
