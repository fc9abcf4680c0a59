use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use crate::error::Result;

pub trait ModelOptions {
    fn cache_key(&self) -> String;
}

// The cache holds WEAK references: a loaded model stays shared while at least
// one pipeline uses it and is freed when the last one drops.
type CacheStorage = HashMap<(TypeId, String), Box<dyn Any + Send + Sync>>;

pub struct ModelCache {
    cache: Mutex<CacheStorage>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn get_or_create<M, F>(&self, key: &str, loader: F) -> Result<Arc<M>>
    where
        M: Send + Sync + 'static,
        F: FnOnce() -> Result<M>,
    {
        let cache_key = (TypeId::of::<M>(), key.to_string());

        {
            let mut cache = self.cache.lock().unwrap();
            if let Some(boxed) = cache.get(&cache_key) {
                if let Some(weak) = boxed.downcast_ref::<Weak<M>>() {
                    if let Some(strong) = weak.upgrade() {
                        return Ok(strong);
                    }
                }
                // Last user dropped the model; forget the stale entry.
                cache.remove(&cache_key);
            }
        }

        let model = Arc::new(loader()?);

        {
            let mut cache = self.cache.lock().unwrap();
            let weak: Weak<M> = Arc::downgrade(&model);
            cache.insert(cache_key, Box::new(weak));
        }

        Ok(model)
    }

    #[allow(dead_code)]
    pub fn clear(&self) {
        self.cache.lock().unwrap().clear();
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.cache.lock().unwrap().is_empty()
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_MODEL_CACHE: once_cell::sync::Lazy<ModelCache> =
    once_cell::sync::Lazy::new(ModelCache::new);

pub fn global_cache() -> &'static ModelCache {
    &GLOBAL_MODEL_CACHE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestModel {
        id: String,
    }

    #[test]
    fn returns_live_instance_for_same_key() {
        let cache = ModelCache::new();
        let first = cache
            .get_or_create::<TestModel, _>("key", || {
                Ok(TestModel {
                    id: "original".into(),
                })
            })
            .unwrap();
        let second = cache
            .get_or_create::<TestModel, _>("key", || Ok(TestModel { id: "new".into() }))
            .unwrap();
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = ModelCache::new();
        #[derive(Clone)]
        struct A;
        let _keep = cache.get_or_create::<A, _>("k", || Ok(A)).unwrap();
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn different_keys_stay_independent() {
        let cache = ModelCache::new();

        let first = cache
            .get_or_create::<TestModel, _>("key1", || Ok(TestModel { id: "first".into() }))
            .unwrap();
        let second = cache
            .get_or_create::<TestModel, _>("key2", || {
                Ok(TestModel {
                    id: "second".into(),
                })
            })
            .unwrap();

        assert_eq!(first.id, "first");
        assert_eq!(second.id, "second");
        assert_eq!(cache.len(), 2);
    }
}
