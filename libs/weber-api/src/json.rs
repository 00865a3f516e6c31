//! Bridge between JSON documents and the dynamic value model.
//!
//! This is the interface the surrounding codec layer presents: it parses
//! wire bytes into `serde_json::Value` and hands the engine dynamic source
//! values built here.

use crate::value::Value;

impl Value {
    /// Build a dynamic source value from a JSON value.
    ///
    /// Numbers pick the narrowest widened family: anything representable
    /// as i64 → `I64`, else u64 → `U64`, else `F64`. Objects become `Map`
    /// with string keys.
    pub fn from_json(v: &serde_json::Value) -> Value {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::I64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::U64(u)
                } else {
                    // f64 conversion of a JSON number never fails here.
                    Value::F64(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.iter()
                    .map(|(k, v)| (Value::Str(k.clone()), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Render the value back as JSON.
    ///
    /// Non-finite floats have no JSON representation and render as null.
    /// Pointers render through their pointee; an unset pointer is null.
    /// Non-string map keys render through their JSON form's string.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::I8(v) => serde_json::Value::from(*v),
            Value::I16(v) => serde_json::Value::from(*v),
            Value::I32(v) => serde_json::Value::from(*v),
            Value::I64(v) => serde_json::Value::from(*v),
            Value::U8(v) => serde_json::Value::from(*v),
            Value::U16(v) => serde_json::Value::from(*v),
            Value::U32(v) => serde_json::Value::from(*v),
            Value::U64(v) => serde_json::Value::from(*v),
            Value::F32(v) => serde_json::Number::from_f64(*v as f64)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::F64(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(v) => serde_json::Value::String(v.clone()),
            Value::Ptr(Some(elem)) => elem.to_json(),
            Value::Ptr(None) => serde_json::Value::Null,
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => {
                let mut obj = serde_json::Map::new();
                for (k, v) in entries {
                    let key = match k {
                        Value::Str(s) => s.clone(),
                        other => match other.to_json() {
                            serde_json::Value::String(s) => s,
                            rendered => rendered.to_string(),
                        },
                    };
                    obj.insert(key, v.to_json());
                }
                serde_json::Value::Object(obj)
            }
            Value::Null => serde_json::Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_pick_the_widened_family() {
        let doc: serde_json::Value = serde_json::from_str("[-3, 42, 18446744073709551615, 1.5]")
            .expect("valid document");
        let items = match Value::from_json(&doc) {
            Value::List(items) => items,
            other => panic!("expected list, got {other:?}"),
        };
        assert_eq!(items[0], Value::I64(-3));
        assert_eq!(items[1], Value::I64(42));
        assert_eq!(items[2], Value::U64(u64::MAX));
        assert_eq!(items[3], Value::F64(1.5));
    }

    #[test]
    fn scalars_round_trip() {
        for text in ["true", "\"bid\"", "-7", "2.25", "null"] {
            let doc: serde_json::Value = serde_json::from_str(text).expect("valid document");
            assert_eq!(Value::from_json(&doc).to_json(), doc, "{text}");
        }
    }

    #[test]
    fn objects_become_maps_and_back() {
        let doc: serde_json::Value =
            serde_json::from_str(r#"{"symbol":"EURUSD","bid":1.07}"#).expect("valid document");
        let value = Value::from_json(&doc);
        assert_eq!(value.kind(), crate::schema::Kind::Map);
        assert_eq!(value.to_json(), doc);
    }

    #[test]
    fn non_finite_floats_render_as_null() {
        assert_eq!(Value::F64(f64::NAN).to_json(), serde_json::Value::Null);
        assert_eq!(
            Value::F32(f32::INFINITY).to_json(),
            serde_json::Value::Null
        );
    }

    #[test]
    fn pointers_render_through_the_pointee() {
        let v = Value::Ptr(Some(Box::new(Value::U16(9))));
        assert_eq!(v.to_json(), serde_json::Value::from(9));
        assert_eq!(Value::Ptr(None).to_json(), serde_json::Value::Null);
    }
}
