use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::Mutex;
use tracing::{debug, info};

use tsum_core::{Error, ModelKind, ModelLoader, Result, SummaryModel};

/// Default number of loaded model handles kept before eviction.
pub const DEFAULT_CACHE_CAPACITY: usize = 2;

/// Memoized model handles, shared across all concurrent requests.
///
/// Model load is expensive and is never repeated for a kind while its handle
/// stays cached. Handles are only dropped by LRU eviction when the capacity
/// is exceeded.
pub struct ModelRegistry {
    cache: Mutex<LruCache<ModelKind, Arc<dyn SummaryModel>>>,
    loader: Arc<dyn ModelLoader>,
}

impl ModelRegistry {
    pub fn new(loader: Arc<dyn ModelLoader>, capacity: NonZeroUsize) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            loader,
        }
    }

    pub fn with_default_capacity(loader: Arc<dyn ModelLoader>) -> Self {
        Self::new(loader, NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap())
    }

    /// Look up or lazily create the handle for `kind`.
    ///
    /// The cache lock is held across the load, so exactly one creation wins
    /// any race for the same kind; later callers reuse the cached handle.
    pub async fn resolve(&self, kind: ModelKind) -> Result<Arc<dyn SummaryModel>> {
        let mut cache = self.cache.lock().await;
        if let Some(model) = cache.get(&kind) {
            debug!("Model cache hit: {}", kind);
            return Ok(model.clone());
        }

        info!("🧠 Model cache miss: {} — loading {}", kind, kind.pretrained());
        let loader = self.loader.clone();
        let model = tokio::task::spawn_blocking(move || loader.load(kind))
            .await
            .map_err(|e| Error::Runtime(e.to_string()))??;

        if let Some((evicted, _)) = cache.push(kind, model.clone()) {
            if evicted != kind {
                debug!("Evicted least recently used model: {}", evicted);
            }
        }
        Ok(model)
    }

    /// Kinds currently held in the cache, most recently used first.
    pub async fn loaded(&self) -> Vec<ModelKind> {
        let cache = self.cache.lock().await;
        cache.iter().map(|(kind, _)| *kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tsum_core::GenerationParams;

    struct MockModel {
        kind: ModelKind,
    }

    impl SummaryModel for MockModel {
        fn kind(&self) -> ModelKind {
            self.kind
        }

        fn generate(&self, _text: &str, _params: &GenerationParams) -> Result<String> {
            Ok("summary".to_string())
        }
    }

    struct CountingLoader {
        loads: AtomicUsize,
    }

    impl CountingLoader {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                loads: AtomicUsize::new(0),
            })
        }
    }

    impl ModelLoader for CountingLoader {
        fn load(&self, kind: ModelKind) -> Result<Arc<dyn SummaryModel>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(MockModel { kind }))
        }
    }

    #[tokio::test]
    async fn resolve_loads_each_kind_once() {
        let loader = CountingLoader::new();
        let registry = ModelRegistry::with_default_capacity(loader.clone());

        registry.resolve(ModelKind::Bart).await.unwrap();
        registry.resolve(ModelKind::Bart).await.unwrap();
        registry.resolve(ModelKind::T5).await.unwrap();
        registry.resolve(ModelKind::Bart).await.unwrap();

        assert_eq!(loader.loads.load(Ordering::SeqCst), 2);
        let mut loaded = registry.loaded().await;
        loaded.sort_by_key(|k| k.name());
        assert_eq!(loaded, vec![ModelKind::Bart, ModelKind::T5]);
    }

    #[tokio::test]
    async fn concurrent_resolves_share_one_load() {
        let loader = CountingLoader::new();
        let registry = Arc::new(ModelRegistry::with_default_capacity(loader.clone()));

        let (a, b) = tokio::join!(
            registry.resolve(ModelKind::Bart),
            registry.resolve(ModelKind::Bart)
        );
        a.unwrap();
        b.unwrap();

        assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn capacity_one_evicts_least_recently_used() {
        let loader = CountingLoader::new();
        let registry = ModelRegistry::new(loader.clone(), NonZeroUsize::new(1).unwrap());

        registry.resolve(ModelKind::Bart).await.unwrap();
        registry.resolve(ModelKind::T5).await.unwrap();
        registry.resolve(ModelKind::Bart).await.unwrap();

        assert_eq!(loader.loads.load(Ordering::SeqCst), 3);
        assert_eq!(registry.loaded().await, vec![ModelKind::Bart]);
    }
}
