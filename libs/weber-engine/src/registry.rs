use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use weber_api::decoder::Decoder;
use weber_api::schema::TypeDesc;

use crate::resolver;

/// Memoizing cache over [`resolver::resolve`].
///
/// Resolution is a pure function of the descriptor pair, so a resolved
/// decoder can be cached forever and shared. Interior mutability so one
/// registry can serve concurrent pipelines.
pub struct DecoderRegistry {
    cache: RwLock<HashMap<(TypeDesc, TypeDesc), Arc<dyn Decoder>>>,
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve through the cache. First lookup of a pair resolves and
    /// stores; later lookups share the stored decoder.
    pub fn lookup(&self, dest: &TypeDesc, src: &TypeDesc) -> Arc<dyn Decoder> {
        let key = (dest.clone(), src.clone());

        {
            let guard = match self.cache.read() {
                Ok(g) => g,
                Err(poisoned) => {
                    tracing::warn!("decoder cache read lock was poisoned, recovering");
                    poisoned.into_inner()
                }
            };
            if let Some(dec) = guard.get(&key) {
                return Arc::clone(dec);
            }
        }

        let dec = resolver::resolve(dest, src);
        let mut guard = match self.cache.write() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("decoder cache write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        // Two callers may race to resolve the same pair; the first insert
        // wins so every caller shares one decoder.
        Arc::clone(guard.entry(key).or_insert(dec))
    }

    /// Number of distinct descriptor pairs resolved so far.
    pub fn len(&self) -> usize {
        match self.cache.read() {
            Ok(g) => g.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weber_api::schema::IntWidth;
    use weber_api::value::Value;

    #[test]
    fn repeated_lookups_share_one_decoder() {
        let registry = DecoderRegistry::new();
        let dest = TypeDesc::Int(IntWidth::W32);
        let src = TypeDesc::Str;

        let a = registry.lookup(&dest, &src);
        let b = registry.lookup(&dest, &src);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_pairs_resolve_independently() {
        let registry = DecoderRegistry::new();
        let a = registry.lookup(&TypeDesc::Int(IntWidth::W32), &TypeDesc::Str);
        let b = registry.lookup(&TypeDesc::Int(IntWidth::W64), &TypeDesc::Str);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn cached_decoder_still_applies() {
        let registry = DecoderRegistry::new();
        let dest = TypeDesc::Uint(IntWidth::W8);
        let src = TypeDesc::Str;
        registry.lookup(&dest, &src);

        let dec = registry.lookup(&dest, &src);
        let mut slot = Value::zero_of(&dest);
        dec.apply(&mut slot, &Value::Str("200".into())).expect("parsable");
        assert_eq!(slot, Value::U8(200));
    }
}
