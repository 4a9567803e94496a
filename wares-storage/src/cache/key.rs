//! Deterministic cache keys for goods rows.
//!
//! Keys embed the project id so two projects can never collide on the
//! same goods id. Project scoping is still enforced by store queries;
//! the key embedding exists to prevent cross-project leakage through
//! the cache alone.

/// Cache key for a single goods row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GoodsCacheKey {
    project_id: i64,
    goods_id: i64,
}

impl GoodsCacheKey {
    pub fn new(project_id: i64, goods_id: i64) -> Self {
        Self {
            project_id,
            goods_id,
        }
    }

    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    pub fn goods_id(&self) -> i64 {
        self.goods_id
    }

    /// Encode to the wire key, `goods:{project_id}:{goods_id}`.
    pub fn encode(&self) -> String {
        format!("goods:{}:{}", self.project_id, self.goods_id)
    }

    /// Decode a wire key produced by [`encode`](Self::encode).
    ///
    /// Returns `None` for keys with a different prefix, a missing
    /// separator, or non-numeric components.
    pub fn decode(key: &str) -> Option<Self> {
        let rest = key.strip_prefix("goods:")?;
        let (project, goods) = rest.split_once(':')?;
        Some(Self {
            project_id: project.parse().ok()?,
            goods_id: goods.parse().ok()?,
        })
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Encoding then decoding preserves the original key.
        #[test]
        fn prop_encode_decode_roundtrip(project_id in any::<i64>(), goods_id in any::<i64>()) {
            let key = GoodsCacheKey::new(project_id, goods_id);
            let decoded = GoodsCacheKey::decode(&key.encode());
            prop_assert_eq!(decoded, Some(key));
        }

        /// Encoding is injective: distinct (project, goods) pairs never
        /// produce the same wire key, so cross-project collisions are
        /// impossible.
        #[test]
        fn prop_encoding_is_injective(
            a in any::<(i64, i64)>(),
            b in any::<(i64, i64)>(),
        ) {
            let key_a = GoodsCacheKey::new(a.0, a.1);
            let key_b = GoodsCacheKey::new(b.0, b.1);
            if a == b {
                prop_assert_eq!(key_a.encode(), key_b.encode());
            } else {
                prop_assert_ne!(key_a.encode(), key_b.encode());
            }
        }
    }
}
