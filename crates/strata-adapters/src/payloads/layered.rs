//! Stack of payload stores: first hit wins.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use strata_core::{
    application::ports::{PayloadKey, PayloadStore},
    domain::Language,
    error::StrataResult,
};
use tracing::trace;

/// Looks a key up in each layer in order.
///
/// The usual stack is user overrides on top of
/// [`EmbeddedPayloadStore`](super::EmbeddedPayloadStore).
#[derive(Clone, Default)]
pub struct LayeredPayloadStore {
    layers: Vec<Arc<dyn PayloadStore>>,
}

impl LayeredPayloadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer below the existing ones.
    pub fn with_layer(mut self, layer: Arc<dyn PayloadStore>) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn depth(&self) -> usize {
        self.layers.len()
    }
}

impl fmt::Debug for LayeredPayloadStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredPayloadStore")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl PayloadStore for LayeredPayloadStore {
    fn get(&self, key: &PayloadKey) -> StrataResult<Option<String>> {
        for (depth, layer) in self.layers.iter().enumerate() {
            if let Some(source) = layer.get(key)? {
                trace!(%key, depth, "payload resolved");
                return Ok(Some(source));
            }
        }
        Ok(None)
    }

    fn keys(&self, language: Language) -> StrataResult<Vec<PayloadKey>> {
        let mut keys = BTreeSet::new();
        for layer in &self.layers {
            keys.extend(layer.keys(language)?);
        }
        Ok(keys.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payloads::EmbeddedPayloadStore;
    use std::collections::BTreeMap;

    struct Fixed(BTreeMap<PayloadKey, String>);

    impl Fixed {
        fn one(path: &str, source: &str) -> Arc<dyn PayloadStore> {
            let key = PayloadKey {
                language: Language::Go,
                path: path.into(),
            };
            Arc::new(Self(BTreeMap::from([(key, source.to_string())])))
        }
    }

    impl PayloadStore for Fixed {
        fn get(&self, key: &PayloadKey) -> StrataResult<Option<String>> {
            Ok(self.0.get(key).cloned())
        }

        fn keys(&self, language: Language) -> StrataResult<Vec<PayloadKey>> {
            Ok(self
                .0
                .keys()
                .filter(|k| k.language == language)
                .cloned()
                .collect())
        }
    }

    fn key(path: &str) -> PayloadKey {
        PayloadKey {
            language: Language::Go,
            path: path.into(),
        }
    }

    #[test]
    fn upper_layer_shadows_lower() {
        let store = LayeredPayloadStore::new()
            .with_layer(Fixed::one("README.md", "custom"))
            .with_layer(Arc::new(EmbeddedPayloadStore));

        assert_eq!(store.get(&key("README.md")).unwrap().as_deref(), Some("custom"));
        assert!(store.get(&key("bom/go.mod")).unwrap().is_some());
        assert_eq!(store.depth(), 2);
    }

    #[test]
    fn keys_are_the_sorted_union() {
        let store = LayeredPayloadStore::new()
            .with_layer(Fixed::one("zz/extra.txt", "x"))
            .with_layer(Arc::new(EmbeddedPayloadStore));

        let keys = store.keys(Language::Go).unwrap();
        let builtin = EmbeddedPayloadStore.keys(Language::Go).unwrap();
        assert_eq!(keys.len(), builtin.len() + 1);
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_stack_finds_nothing() {
        let store = LayeredPayloadStore::new();
        assert!(store.get(&key("README.md")).unwrap().is_none());
    }
}
