use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{default_true, require_text, EntityRecord, GeoPoint, RecordMeta};

/// Город обслуживания
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(alias = "cityname")]
    pub name: String,
    pub country_id: Uuid,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Радиус зоны обслуживания, км
    #[serde(default)]
    pub radius_km: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl City {
    pub fn new_for_insert(name: String, country_id: Uuid) -> Self {
        Self {
            meta: RecordMeta::new(),
            name,
            country_id,
            latitude: None,
            longitude: None,
            radius_km: None,
            timezone: None,
            is_active: true,
        }
    }

    pub fn location(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }
    }
}

impl Default for City {
    fn default() -> Self {
        Self::new_for_insert(String::new(), Uuid::nil())
    }
}

impl EntityRecord for City {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), String> {
        require_text(&self.name, "City name")?;
        if self.country_id.is_nil() {
            return Err("Country is required".to_string());
        }
        if let Some(point) = self.location() {
            if !point.is_valid() {
                return Err("Coordinates are out of range".to_string());
            }
        }
        if let Some(radius) = self.radius_km {
            if radius <= 0.0 {
                return Err("Radius must be positive".to_string());
            }
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "city"
    }

    fn element_name() -> &'static str {
        "City"
    }

    fn list_name() -> &'static str {
        "Cities"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_country() {
        let city = City::new_for_insert("Lisbon".into(), Uuid::nil());
        assert_eq!(city.validate(), Err("Country is required".to_string()));
    }

    #[test]
    fn test_validate_coordinates() {
        let mut city = City::new_for_insert("Lisbon".into(), Uuid::new_v4());
        city.latitude = Some(38.72);
        city.longitude = Some(-9.14);
        assert!(city.validate().is_ok());
        city.latitude = Some(138.0);
        assert!(city.validate().is_err());
    }
}
