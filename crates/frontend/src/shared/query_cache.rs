use contracts::shared::query_cache::QueryVersions;
use leptos::prelude::*;

/// Реактивный кэш запросов
///
/// Экран читает `version(key)` внутри `Effect`, поэтому перезапрашивает
/// данные после `invalidate(key)` своего ключа и только его.
#[derive(Clone, Copy)]
pub struct QueryCache {
    versions: RwSignal<QueryVersions>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            versions: RwSignal::new(QueryVersions::new()),
        }
    }

    /// Отслеживаемое чтение версии ключа
    pub fn version(&self, key: &str) -> u64 {
        self.versions.with(|v| v.version(key))
    }

    pub fn invalidate(&self, key: &str) {
        log::debug!("query invalidated: {}", key);
        self.versions.update(|v| v.invalidate(key));
    }

    pub fn invalidate_all(&self) {
        self.versions.update(|v| v.invalidate_all());
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_query_cache() -> QueryCache {
    use_context::<QueryCache>().expect("QueryCache not provided in context (provide it in app root)")
}
