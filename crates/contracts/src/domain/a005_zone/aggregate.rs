use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{default_true, require_text, EntityRecord, GeoPoint, RecordMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    #[default]
    Regular,
    Airport,
}

/// Зона, нарисованная администратором на карте города
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub city_id: Uuid,
    #[serde(default)]
    pub kind: ZoneKind,
    #[serde(default)]
    pub polygon: Vec<GeoPoint>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Zone {
    pub fn new_for_insert(name: String, city_id: Uuid) -> Self {
        Self {
            meta: RecordMeta::new(),
            name,
            city_id,
            kind: ZoneKind::Regular,
            polygon: Vec::new(),
            is_active: true,
        }
    }

    pub fn is_airport(&self) -> bool {
        self.kind == ZoneKind::Airport
    }
}

impl Default for Zone {
    fn default() -> Self {
        Self::new_for_insert(String::new(), Uuid::nil())
    }
}

impl EntityRecord for Zone {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), String> {
        require_text(&self.name, "Zone name")?;
        if self.city_id.is_nil() {
            return Err("City is required".to_string());
        }
        if !self.polygon.is_empty() && self.polygon.len() < 3 {
            return Err("A zone polygon needs at least 3 points".to_string());
        }
        if self.polygon.iter().any(|p| !p.is_valid()) {
            return Err("Coordinates are out of range".to_string());
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "zone"
    }

    fn element_name() -> &'static str {
        "Zone"
    }

    fn list_name() -> &'static str {
        "Zones"
    }
}
