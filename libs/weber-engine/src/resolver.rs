//! Decoder resolution: map a (destination, source) descriptor pair to a
//! conversion function.
//!
//! Resolution never fails. Pairs with no conversion behavior resolve to a
//! sentinel decoder that reports the failure when applied, so callers can
//! resolve once per pair and apply many times without re-checking
//! feasibility.

use std::sync::Arc;

use weber_api::decoder::Decoder;
use weber_api::error::CoerceError;
use weber_api::schema::{Kind, TypeDesc};
use weber_api::value::Value;

use crate::scalar::{SCALAR_TABLE, ScalarFn, scalar_index};

/// Resolve a conversion function for a (destination, source) descriptor
/// pair.
///
/// Pure in the descriptors: equal pairs always resolve to equivalent
/// decoders, which is what makes caller-side memoization safe.
pub fn resolve(dest: &TypeDesc, src: &TypeDesc) -> Arc<dyn Decoder> {
    // An absent source zeroes any destination.
    if src.kind() == Kind::Null {
        return Arc::new(InvalidValue);
    }

    match dest {
        TypeDesc::Bool
        | TypeDesc::Int(_)
        | TypeDesc::Uint(_)
        | TypeDesc::Float(_)
        | TypeDesc::Str => match (scalar_index(dest.kind()), scalar_index(src.kind())) {
            (Some(d), Some(s)) => Arc::new(Scalar(SCALAR_TABLE[d][s])),
            _ => {
                tracing::debug!(dest = %dest, src = %src, "no coercion rule connects the pair");
                Arc::new(Unconvertible {
                    dest: dest.to_string(),
                    src: src.to_string(),
                })
            }
        },
        TypeDesc::Dynamic(iface) => {
            if iface.admits(src) {
                Arc::new(Passthrough)
            } else {
                tracing::debug!(
                    dest = %dest, src = %src,
                    "source kind outside the destination capability set"
                );
                Arc::new(Unexpected {
                    dest: dest.to_string(),
                    src: src.to_string(),
                })
            }
        }
        TypeDesc::Ptr(elem) => Arc::new(PtrDecoder {
            elem: (**elem).clone(),
            inner: resolve(elem, src),
        }),
        TypeDesc::Struct(_) | TypeDesc::List(_) | TypeDesc::Map(_, _) | TypeDesc::Null => {
            tracing::debug!(dest = %dest, "destination kind is not decodable");
            Arc::new(Unsupported {
                dest: dest.to_string(),
            })
        }
    }
}

/// Adapter putting a scalar-table entry behind the decoder contract.
struct Scalar(ScalarFn);

impl Decoder for Scalar {
    fn apply(&self, dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
        (self.0)(dest, src)
    }
}

/// Zeroes the destination slot; selected when the source is absent.
struct InvalidValue;

impl Decoder for InvalidValue {
    fn apply(&self, dest: &mut Value, _src: &Value) -> Result<(), CoerceError> {
        dest.zero();
        Ok(())
    }
}

/// Assigns the source value into a dynamic destination unchanged.
struct Passthrough;

impl Decoder for Passthrough {
    fn apply(&self, dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
        *dest = src.clone();
        Ok(())
    }
}

/// Pointer decoder: allocate a zero element, delegate into it, publish the
/// populated instance. On delegate failure the destination pointer is
/// never touched.
struct PtrDecoder {
    elem: TypeDesc,
    inner: Arc<dyn Decoder>,
}

impl Decoder for PtrDecoder {
    fn apply(&self, dest: &mut Value, src: &Value) -> Result<(), CoerceError> {
        if !matches!(dest, Value::Ptr(_)) {
            return Err(CoerceError::unexpected(dest.type_name(), src.type_name()));
        }
        let mut elem = Value::zero_of(&self.elem);
        self.inner.apply(&mut elem, src)?;
        *dest = Value::Ptr(Some(Box::new(elem)));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Failure sentinels — always-failing decoders standing in for dispatch
// paths with no conversion behavior.
// ---------------------------------------------------------------------------

struct Unsupported {
    dest: String,
}

impl Decoder for Unsupported {
    fn apply(&self, _dest: &mut Value, _src: &Value) -> Result<(), CoerceError> {
        Err(CoerceError::unsupported(self.dest.clone()))
    }
}

struct Unexpected {
    dest: String,
    src: String,
}

impl Decoder for Unexpected {
    fn apply(&self, _dest: &mut Value, _src: &Value) -> Result<(), CoerceError> {
        Err(CoerceError::unexpected(self.dest.clone(), self.src.clone()))
    }
}

struct Unconvertible {
    dest: String,
    src: String,
}

impl Decoder for Unconvertible {
    fn apply(&self, _dest: &mut Value, _src: &Value) -> Result<(), CoerceError> {
        Err(CoerceError::unconvertible(
            self.dest.clone(),
            self.src.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weber_api::schema::{FloatWidth, IntWidth, InterfaceDesc};

    #[test]
    fn pointer_destination_allocates_and_publishes() {
        let dest_desc = TypeDesc::ptr(TypeDesc::Int(IntWidth::W64));
        let dec = resolve(&dest_desc, &TypeDesc::Str);

        let mut dest = Value::zero_of(&dest_desc);
        dec.apply(&mut dest, &Value::Str("42".into()))
            .expect("parsable literal");
        assert_eq!(dest, Value::Ptr(Some(Box::new(Value::I64(42)))));
    }

    #[test]
    fn pointer_destination_stays_unset_on_failure() {
        let dest_desc = TypeDesc::ptr(TypeDesc::Int(IntWidth::W64));
        let dec = resolve(&dest_desc, &TypeDesc::Str);

        let mut dest = Value::zero_of(&dest_desc);
        let err = dec
            .apply(&mut dest, &Value::Str("abc".into()))
            .expect_err("unparsable literal");
        assert!(matches!(err, CoerceError::Invalid { .. }), "{err:?}");
        assert_eq!(dest, Value::Ptr(None));
    }

    #[test]
    fn pointer_failure_does_not_clobber_previous_pointee() {
        let dest_desc = TypeDesc::ptr(TypeDesc::Int(IntWidth::W64));
        let dec = resolve(&dest_desc, &TypeDesc::Str);

        let mut dest = Value::Ptr(Some(Box::new(Value::I64(7))));
        dec.apply(&mut dest, &Value::Str("oops".into()))
            .expect_err("unparsable literal");
        assert_eq!(dest, Value::Ptr(Some(Box::new(Value::I64(7)))));
    }

    #[test]
    fn dynamic_destination_passes_admitted_sources_through() {
        let iface = TypeDesc::Dynamic(InterfaceDesc::new(
            "numeric",
            vec![Kind::Int, Kind::Uint, Kind::Float],
        ));
        let dec = resolve(&iface, &TypeDesc::Float(FloatWidth::W32));

        let mut dest = Value::zero_of(&iface);
        dec.apply(&mut dest, &Value::F32(1.5)).expect("admitted kind");
        assert_eq!(dest, Value::F32(1.5));
    }

    #[test]
    fn dynamic_destination_rejects_sources_outside_the_capability_set() {
        let iface = TypeDesc::Dynamic(InterfaceDesc::new("numeric", vec![Kind::Int]));
        let dec = resolve(&iface, &TypeDesc::Str);

        let mut dest = Value::Null;
        let err = dec
            .apply(&mut dest, &Value::Str("EURUSD".into()))
            .expect_err("kind outside the set");
        assert!(matches!(err, CoerceError::Unexpected { .. }), "{err:?}");
        assert_eq!(dest, Value::Null);
    }

    #[test]
    fn composite_destinations_are_unsupported_regardless_of_source() {
        let dest_desc = TypeDesc::Struct("Quote".into());
        for src_desc in [
            TypeDesc::Bool,
            TypeDesc::Str,
            TypeDesc::Int(IntWidth::W32),
            TypeDesc::ptr(TypeDesc::Bool),
        ] {
            let dec = resolve(&dest_desc, &src_desc);
            let mut dest = Value::Null;
            let err = dec
                .apply(&mut dest, &Value::zero_of(&src_desc))
                .expect_err("composite destination");
            assert_eq!(
                err,
                CoerceError::unsupported("struct Quote"),
                "source {src_desc}"
            );
        }
    }

    #[test]
    fn non_scalar_source_into_scalar_is_unconvertible() {
        let dec = resolve(&TypeDesc::Int(IntWidth::W32), &TypeDesc::ptr(TypeDesc::Bool));
        let mut dest = Value::I32(0);
        let err = dec
            .apply(&mut dest, &Value::Ptr(None))
            .expect_err("no rule connects the pair");
        assert_eq!(err, CoerceError::unconvertible("i32", "*bool"));
        assert_eq!(dest, Value::I32(0));
    }

    #[test]
    fn absent_source_zeroes_the_destination() {
        let dec = resolve(&TypeDesc::Str, &TypeDesc::Null);
        let mut dest = Value::Str("stale".into());
        dec.apply(&mut dest, &Value::Null).expect("zeroing never fails");
        assert_eq!(dest, Value::Str(String::new()));

        let dec = resolve(&TypeDesc::ptr(TypeDesc::Bool), &TypeDesc::Null);
        let mut dest = Value::Ptr(Some(Box::new(Value::Bool(true))));
        dec.apply(&mut dest, &Value::Null).expect("zeroing never fails");
        assert_eq!(dest, Value::Ptr(None));
    }

    #[test]
    fn resolution_is_deterministic() {
        let dest = TypeDesc::Int(IntWidth::W16);
        let src = TypeDesc::Str;
        let a = resolve(&dest, &src);
        let b = resolve(&dest, &src);

        let mut slot_a = Value::I16(0);
        let mut slot_b = Value::I16(0);
        a.apply(&mut slot_a, &Value::Str("0x10".into())).expect("parsable");
        b.apply(&mut slot_b, &Value::Str("0x10".into())).expect("parsable");
        assert_eq!(slot_a, slot_b);
        assert_eq!(slot_a, Value::I16(16));
    }
}
