use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::location::LocationFix;
use crate::domain::common::{require_text, EntityRecord, GeoPoint, RecordMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DriverStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Suspended,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Pending => "pending",
            DriverStatus::Approved => "approved",
            DriverStatus::Rejected => "rejected",
            DriverStatus::Suspended => "suspended",
        }
    }

    pub fn all() -> [DriverStatus; 4] {
        [
            DriverStatus::Pending,
            DriverStatus::Approved,
            DriverStatus::Rejected,
            DriverStatus::Suspended,
        ]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|st| st.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DriverStatus::Pending => "Pending",
            DriverStatus::Approved => "Approved",
            DriverStatus::Rejected => "Rejected",
            DriverStatus::Suspended => "Suspended",
        }
    }

    /// Кнопки проверки водителя: (подпись, новый статус)
    pub fn review_actions(&self) -> &'static [(&'static str, DriverStatus)] {
        match self {
            DriverStatus::Pending => &[
                ("Approve", DriverStatus::Approved),
                ("Reject", DriverStatus::Rejected),
            ],
            DriverStatus::Approved => &[("Suspend", DriverStatus::Suspended)],
            DriverStatus::Suspended => &[("Reactivate", DriverStatus::Approved)],
            DriverStatus::Rejected => &[("Approve", DriverStatus::Approved)],
        }
    }
}

/// Профиль водителя
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverProfile {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub license_number: String,
    #[serde(default)]
    pub vehicle_make: String,
    #[serde(default)]
    pub vehicle_model: String,
    #[serde(default)]
    pub vehicle_plate: String,
    #[serde(default)]
    pub vehicle_color: String,
    #[serde(default)]
    pub service_type_id: Option<Uuid>,
    #[serde(default)]
    pub city_id: Option<Uuid>,
    #[serde(default)]
    pub status: DriverStatus,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub current_latitude: Option<f64>,
    #[serde(default)]
    pub current_longitude: Option<f64>,
    #[serde(default)]
    pub last_location_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl DriverProfile {
    pub fn new_for_insert(full_name: String, phone: String) -> Self {
        Self {
            meta: RecordMeta::new(),
            full_name,
            phone,
            email: String::new(),
            user_id: None,
            license_number: String::new(),
            vehicle_make: String::new(),
            vehicle_model: String::new(),
            vehicle_plate: String::new(),
            vehicle_color: String::new(),
            service_type_id: None,
            city_id: None,
            status: DriverStatus::Pending,
            is_online: false,
            current_latitude: None,
            current_longitude: None,
            last_location_update: None,
            rating: None,
        }
    }

    pub fn location(&self) -> Option<GeoPoint> {
        match (self.current_latitude, self.current_longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }
    }

    pub fn apply_location(&mut self, fix: &LocationFix, at: DateTime<Utc>) {
        self.current_latitude = Some(fix.latitude);
        self.current_longitude = Some(fix.longitude);
        self.last_location_update = Some(at);
    }

    pub fn vehicle_label(&self) -> String {
        let parts: Vec<&str> = [
            self.vehicle_color.as_str(),
            self.vehicle_make.as_str(),
            self.vehicle_model.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
        if self.vehicle_plate.is_empty() {
            parts.join(" ")
        } else {
            format!("{} ({})", parts.join(" "), self.vehicle_plate)
        }
    }
}

impl Default for DriverProfile {
    fn default() -> Self {
        Self::new_for_insert(String::new(), String::new())
    }
}

impl EntityRecord for DriverProfile {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), String> {
        require_text(&self.full_name, "Full name")?;
        require_text(&self.phone, "Phone")?;
        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err("Rating must be between 0 and 5".to_string());
            }
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a011"
    }

    fn collection_name() -> &'static str {
        "driver_profile"
    }

    fn element_name() -> &'static str {
        "Driver"
    }

    fn list_name() -> &'static str {
        "Drivers"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_label() {
        let mut driver = DriverProfile::new_for_insert("Ana".into(), "+351900000000".into());
        driver.vehicle_color = "White".into();
        driver.vehicle_make = "Toyota".into();
        driver.vehicle_model = "Prius".into();
        driver.vehicle_plate = "AA-00-BB".into();
        assert_eq!(driver.vehicle_label(), "White Toyota Prius (AA-00-BB)");
    }

    #[test]
    fn test_apply_location() {
        let mut driver = DriverProfile::default();
        let at = Utc::now();
        driver.apply_location(
            &LocationFix {
                latitude: 38.7,
                longitude: -9.1,
                accuracy: Some(5.0),
            },
            at,
        );
        assert_eq!(driver.location(), Some(GeoPoint::new(38.7, -9.1)));
        assert_eq!(driver.last_location_update, Some(at));
    }

    #[test]
    fn test_review_actions() {
        let pending: Vec<DriverStatus> = DriverStatus::Pending
            .review_actions()
            .iter()
            .map(|(_, next)| *next)
            .collect();
        assert_eq!(pending, vec![DriverStatus::Approved, DriverStatus::Rejected]);
        assert_eq!(
            DriverStatus::Suspended.review_actions(),
            &[("Reactivate", DriverStatus::Approved)]
        );
        assert_eq!(DriverStatus::from_str("approved"), Some(DriverStatus::Approved));
        assert_eq!(DriverStatus::from_str("online"), None);
    }
}
