use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{default_true, require_text, EntityRecord, RecordMeta};

/// Тип услуги / категория автомобиля (например, "JoltCab X")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceType {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default = "default_seats")]
    pub seats: u32,
    #[serde(default)]
    pub sort_order: i32,
    /// Города, в которых доступен тип услуги
    #[serde(default)]
    pub city_ids: Vec<Uuid>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_seats() -> u32 {
    4
}

impl ServiceType {
    pub fn new_for_insert(name: String) -> Self {
        Self {
            meta: RecordMeta::new(),
            name,
            description: String::new(),
            icon_url: None,
            seats: default_seats(),
            sort_order: 0,
            city_ids: Vec::new(),
            is_active: true,
        }
    }

    pub fn is_available_in(&self, city_id: Uuid) -> bool {
        self.city_ids.contains(&city_id)
    }

    /// Включить/выключить доступность в городе
    pub fn set_city(&mut self, city_id: Uuid, enabled: bool) {
        if enabled {
            if !self.city_ids.contains(&city_id) {
                self.city_ids.push(city_id);
            }
        } else {
            self.city_ids.retain(|id| *id != city_id);
        }
    }
}

impl Default for ServiceType {
    fn default() -> Self {
        Self::new_for_insert(String::new())
    }
}

impl EntityRecord for ServiceType {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), String> {
        require_text(&self.name, "Service type name")?;
        if self.seats == 0 {
            return Err("Seats must be at least 1".to_string());
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "service_type"
    }

    fn element_name() -> &'static str {
        "Service Type"
    }

    fn list_name() -> &'static str {
        "Service Types"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_city_is_idempotent() {
        let mut st = ServiceType::new_for_insert("JoltCab X".into());
        let city = Uuid::new_v4();
        st.set_city(city, true);
        st.set_city(city, true);
        assert_eq!(st.city_ids.len(), 1);
        assert!(st.is_available_in(city));
        st.set_city(city, false);
        assert!(!st.is_available_in(city));
    }
}
