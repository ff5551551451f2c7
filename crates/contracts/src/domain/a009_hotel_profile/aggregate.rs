use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{
    require_email, require_text, EntityRecord, PartnerStatus, RecordMeta,
};

/// Отель-партнёр, заказывающий поездки для гостей
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelProfile {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub hotel_name: String,
    pub email: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city_id: Option<Uuid>,
    /// Комиссия отеля, %
    #[serde(default)]
    pub commission_percent: f64,
    #[serde(default)]
    pub status: PartnerStatus,
}

impl Default for HotelProfile {
    fn default() -> Self {
        Self {
            meta: RecordMeta::new(),
            hotel_name: String::new(),
            email: String::new(),
            contact_name: String::new(),
            phone: String::new(),
            address: String::new(),
            city_id: None,
            commission_percent: 0.0,
            status: PartnerStatus::Pending,
        }
    }
}

impl EntityRecord for HotelProfile {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), String> {
        require_text(&self.hotel_name, "Hotel name")?;
        require_email(&self.email)?;
        if !(0.0..=100.0).contains(&self.commission_percent) {
            return Err("Commission must be between 0 and 100".to_string());
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a009"
    }

    fn collection_name() -> &'static str {
        "hotel_profile"
    }

    fn element_name() -> &'static str {
        "Hotel"
    }

    fn list_name() -> &'static str {
        "Hotels"
    }
}
