use crate::adapter::{Confidence, WorkflowAdapter};
use crate::adapters::{LegacyXmlAdapter, MakeYamlAdapter, N8nAdapter};
use crate::error::{ImportError, SerializeError};
use crate::schema::{ParseResult, Workflow};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

/// The collection of known format adapters.
///
/// Adapters accumulate through `register` calls, normally once while the application wires
/// itself up; there is no unregistration. The registry is an ordinary value owned by the
/// composition root and passed by reference to whatever needs detection.
#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
    adapters: Vec<Arc<dyn WorkflowAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in adapters: the n8n JSON adapter first, then the
    /// YAML and XML placeholders.
    pub fn with_default_adapters() -> Self {
        let mut registry = Self::new();
        register_default_adapters(&mut registry);
        registry
    }

    /// Appends an adapter. Registering an id twice keeps both entries in order.
    pub fn register<A: WorkflowAdapter + 'static>(&mut self, adapter: A) {
        self.register_shared(Arc::new(adapter));
    }

    pub fn register_shared(&mut self, adapter: Arc<dyn WorkflowAdapter>) {
        debug!(adapter = adapter.id(), "registering workflow adapter");
        self.adapters.push(adapter);
    }

    /// A snapshot of the registered adapters in registration order.
    pub fn list(&self) -> Vec<Arc<dyn WorkflowAdapter>> {
        self.adapters.clone()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// The first adapter registered under `id`.
    pub fn get(&self, id: &str) -> Option<Arc<dyn WorkflowAdapter>> {
        self.adapters.iter().find(|a| a.id() == id).cloned()
    }

    /// Picks the adapter with the strictly highest positive score for `raw`.
    ///
    /// Ties go to the adapter registered first. Returns `None` if nothing scores above 0.
    pub fn detect_format(&self, raw: &str) -> Option<Arc<dyn WorkflowAdapter>> {
        self.detect_format_scored(raw).map(|(adapter, _)| adapter)
    }

    /// Like [`detect_format`](Self::detect_format), also returning the winning score.
    pub fn detect_format_scored(
        &self,
        raw: &str,
    ) -> Option<(Arc<dyn WorkflowAdapter>, Confidence)> {
        let mut best: Option<(&Arc<dyn WorkflowAdapter>, Confidence)> = None;
        for adapter in &self.adapters {
            // Re-clamp in case an adapter built its score by hand.
            let score = Confidence::new(adapter.detect(raw).value());
            trace!(adapter = adapter.id(), score = score.value(), "detection score");
            if !score.is_detected() {
                continue;
            }
            if best.is_none_or(|(_, current)| score > current) {
                best = Some((adapter, score));
            }
        }

        match &best {
            Some((adapter, score)) => {
                debug!(adapter = adapter.id(), score = score.value(), "format detected")
            }
            None => debug!("no adapter recognised the input"),
        }
        best.map(|(adapter, score)| (Arc::clone(adapter), score))
    }

    /// Detects the format of `raw` and parses it with the winning adapter.
    pub fn import(&self, raw: &str) -> ParseResult {
        match self.detect_format(raw) {
            Some(adapter) => adapter.parse(raw),
            None => ParseResult::failure(ImportError::NoMatchingFormat),
        }
    }

    /// Parses `raw` with a specific adapter, skipping detection.
    pub fn import_with(&self, adapter_id: &str, raw: &str) -> ParseResult {
        match self.get(adapter_id) {
            Some(adapter) => adapter.parse(raw),
            None => ParseResult::failure(ImportError::UnknownAdapter(adapter_id.to_string())),
        }
    }

    /// Serializes `workflow` with a specific adapter.
    pub fn export_with(
        &self,
        adapter_id: &str,
        workflow: &Workflow,
    ) -> Result<String, SerializeError> {
        let adapter = self
            .get(adapter_id)
            .ok_or_else(|| SerializeError::UnknownAdapter {
                adapter: adapter_id.to_string(),
            })?;
        adapter.serialize(workflow)
    }
}

/// Registers every built-in adapter, in detection priority order.
pub fn register_default_adapters(registry: &mut AdapterRegistry) {
    registry.register(N8nAdapter::default());
    registry.register(MakeYamlAdapter);
    registry.register(LegacyXmlAdapter);
}

/// An append-only registry that can be shared across threads.
///
/// Registration takes a lock; detection works on a snapshot taken under the lock, so an
/// adapter added mid-scan never shows up in a half-finished pass.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<AdapterRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: AdapterRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    pub fn register<A: WorkflowAdapter + 'static>(&self, adapter: A) {
        self.lock().register(adapter);
    }

    /// A copy of the current registry contents.
    pub fn snapshot(&self) -> AdapterRegistry {
        self.lock().clone()
    }

    pub fn list(&self) -> Vec<Arc<dyn WorkflowAdapter>> {
        self.lock().list()
    }

    pub fn detect_format(&self, raw: &str) -> Option<Arc<dyn WorkflowAdapter>> {
        self.snapshot().detect_format(raw)
    }

    // Registration only ever appends, so a poisoned list is still consistent.
    fn lock(&self) -> MutexGuard<'_, AdapterRegistry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
