//! Версии запросов клиентского кэша.
//!
//! Экран подписывается на версию своего ключа (`"price_configurations"`,
//! `"country"`...). Запись увеличивает версию только названного ключа,
//! и только подписанные на него экраны перезапрашивают данные.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryVersions {
    versions: HashMap<String, u64>,
}

impl QueryVersions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self, key: &str) -> u64 {
        self.versions.get(key).copied().unwrap_or(0)
    }

    pub fn invalidate(&mut self, key: &str) {
        *self.versions.entry(key.to_string()).or_insert(0) += 1;
    }

    pub fn invalidate_all(&mut self) {
        for v in self.versions.values_mut() {
            *v += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_bumps_only_named_key() {
        let mut cache = QueryVersions::new();
        assert_eq!(cache.version("price_configurations"), 0);

        cache.invalidate("price_configurations");
        cache.invalidate("price_configurations");
        cache.invalidate("city");

        assert_eq!(cache.version("price_configurations"), 2);
        assert_eq!(cache.version("city"), 1);
        assert_eq!(cache.version("country"), 0);
    }

    #[test]
    fn test_invalidate_all_touches_known_keys() {
        let mut cache = QueryVersions::new();
        cache.invalidate("ride");
        cache.invalidate_all();
        assert_eq!(cache.version("ride"), 2);
        assert_eq!(cache.version("user"), 0);
    }
}
