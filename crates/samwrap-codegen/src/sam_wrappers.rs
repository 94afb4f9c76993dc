//! Session-scoped cache of generated SAM wrapper classes.
//!
//! Wrappers are shared per `(interface, file, inline context)`. Sharing within
//! a file keeps the output small. Inline and non-inline code never share a
//! wrapper: inlined code is copied into every caller, so a class referenced
//! from it must be usable from wherever the copy ends up.
//!
//! The cache is owned by the [`GenerationState`](crate::GenerationState) of one
//! session and lives exactly as long as it. Entries are never evicted or
//! replaced.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use samwrap_core::{FileId, SamType};
use tracing::{debug, warn};

/// Descriptor of a generated wrapper, enough to emit code that instantiates it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WrapperClass {
    name: String,
    interface: String,
    constructor_descriptor: String,
}

impl WrapperClass {
    pub fn new(
        name: impl Into<String>,
        interface: impl Into<String>,
        constructor_descriptor: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            interface: interface.into(),
            constructor_descriptor: constructor_descriptor.into(),
        }
    }

    /// Internal name of the generated class.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The SAM interface it implements.
    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn constructor_descriptor(&self) -> &str {
        &self.constructor_descriptor
    }
}

/// Cache key: equal keys always map to the same wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WrapperKey {
    pub sam: SamType,
    pub file: FileId,
    pub inline: bool,
}

impl WrapperKey {
    pub fn new(sam: SamType, file: FileId, inline: bool) -> Self {
        Self { sam, file, inline }
    }
}

/// Counters describing how the cache has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests answered from the cache.
    pub hits: u64,
    /// Requests that ran the factory.
    pub misses: u64,
    /// Misses whose factory failed.
    pub failures: u64,
}

#[derive(Debug, Default)]
pub struct SamWrapperClasses {
    classes: FxHashMap<WrapperKey, WrapperClass>,
    stats: CacheStats,
}

impl SamWrapperClasses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the wrapper for `key`, running `create` only if there is none yet.
    ///
    /// Lookup and insertion are one `entry` operation. The entry is filled only
    /// when `create` succeeds; an error is returned unchanged and leaves the
    /// cache as it was, so a later request for the same key calls `create`
    /// again.
    pub fn get_or_create<E>(
        &mut self,
        key: WrapperKey,
        create: impl FnOnce(&WrapperKey) -> Result<WrapperClass, E>,
    ) -> Result<WrapperClass, E> {
        match self.classes.entry(key) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                debug!(
                    interface = entry.key().sam.interface(),
                    sam_hash = %entry.key().sam.type_hash(),
                    file = %entry.key().file,
                    inline = entry.key().inline,
                    class = entry.get().name(),
                    "SAM wrapper cache hit"
                );
                Ok(entry.get().clone())
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                debug!(
                    interface = entry.key().sam.interface(),
                    file = %entry.key().file,
                    inline = entry.key().inline,
                    "SAM wrapper cache miss"
                );
                match create(entry.key()) {
                    Ok(class) => Ok(entry.insert(class).clone()),
                    Err(err) => {
                        self.stats.failures += 1;
                        warn!(
                            interface = entry.key().sam.interface(),
                            file = %entry.key().file,
                            "SAM wrapper generation failed"
                        );
                        Err(err)
                    }
                }
            }
        }
    }

    pub fn get(&self, key: &WrapperKey) -> Option<&WrapperClass> {
        self.classes.get(key)
    }

    pub fn contains(&self, key: &WrapperKey) -> bool {
        self.classes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&WrapperKey, &WrapperClass)> {
        self.classes.iter()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use samwrap_core::{SamMethod, VOID};

    fn key(interface: &str, file: u32, inline: bool) -> WrapperKey {
        WrapperKey::new(
            SamType::new(interface, SamMethod::new("run", vec![], VOID)),
            FileId::new(file),
            inline,
        )
    }

    fn class(name: &str) -> WrapperClass {
        WrapperClass::new(name, "Runnable", "(Function0)void")
    }

    #[test]
    fn factory_runs_once_per_key() {
        let mut cache = SamWrapperClasses::new();
        let mut calls = 0;
        for _ in 0..5 {
            let wrapper = cache
                .get_or_create(key("Runnable", 0, false), |_| {
                    calls += 1;
                    Ok::<_, ()>(class("A$sam$Runnable$0"))
                })
                .unwrap();
            assert_eq!(wrapper.name(), "A$sam$Runnable$0");
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 4,
                misses: 1,
                failures: 0
            }
        );
    }

    #[test]
    fn each_key_field_separates_entries() {
        let mut cache = SamWrapperClasses::new();
        let keys = [
            key("Runnable", 0, false),
            key("Callable", 0, false),
            key("Runnable", 1, false),
            key("Runnable", 0, true),
        ];
        for (i, k) in keys.iter().enumerate() {
            cache
                .get_or_create(k.clone(), |_| Ok::<_, ()>(class(&format!("W{i}"))))
                .unwrap();
        }
        assert_eq!(cache.len(), 4);
        for (i, k) in keys.iter().enumerate() {
            assert_eq!(cache.get(k).unwrap().name(), format!("W{i}"));
        }
    }

    #[test]
    fn factory_sees_the_requested_key() {
        let mut cache = SamWrapperClasses::new();
        cache
            .get_or_create(key("Runnable", 7, true), |k| {
                assert_eq!(k.file, FileId::new(7));
                assert!(k.inline);
                Ok::<_, ()>(class("W"))
            })
            .unwrap();
    }

    #[test]
    fn failure_inserts_nothing_and_allows_retry() {
        let mut cache = SamWrapperClasses::new();
        let k = key("Runnable", 0, false);

        let err = cache
            .get_or_create(k.clone(), |_| Err::<WrapperClass, _>("boom"))
            .unwrap_err();
        assert_eq!(err, "boom");
        assert!(!cache.contains(&k));
        assert!(cache.is_empty());

        let mut retried = false;
        let wrapper = cache
            .get_or_create(k.clone(), |_| {
                retried = true;
                Ok::<_, &str>(class("W"))
            })
            .unwrap();
        assert!(retried);
        assert_eq!(wrapper.name(), "W");
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 0,
                misses: 2,
                failures: 1
            }
        );
    }

    #[test]
    fn failure_for_one_key_leaves_others_alone() {
        let mut cache = SamWrapperClasses::new();
        let good = key("Runnable", 0, false);
        let bad = key("Callable", 0, false);

        cache
            .get_or_create(good.clone(), |_| Ok::<_, &str>(class("Good")))
            .unwrap();
        assert!(cache.get_or_create(bad.clone(), |_| Err("boom")).is_err());

        let again = cache
            .get_or_create(good.clone(), |_| -> Result<WrapperClass, &str> {
                panic!("cached entry must be reused")
            })
            .unwrap();
        assert_eq!(again.name(), "Good");
        assert!(!cache.contains(&bad));
    }
}
