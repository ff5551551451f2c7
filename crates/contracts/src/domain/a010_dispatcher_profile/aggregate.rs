use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{
    require_email, require_text, EntityRecord, PartnerStatus, RecordMeta,
};

/// Диспетчер, принимающий заказы по телефону
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatcherProfile {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city_id: Option<Uuid>,
    #[serde(default)]
    pub status: PartnerStatus,
}

impl Default for DispatcherProfile {
    fn default() -> Self {
        Self {
            meta: RecordMeta::new(),
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            city_id: None,
            status: PartnerStatus::Pending,
        }
    }
}

impl EntityRecord for DispatcherProfile {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), String> {
        require_text(&self.full_name, "Full name")?;
        require_email(&self.email)
    }

    fn entity_index() -> &'static str {
        "a010"
    }

    fn collection_name() -> &'static str {
        "dispatcher_profile"
    }

    fn element_name() -> &'static str {
        "Dispatcher"
    }

    fn list_name() -> &'static str {
        "Dispatchers"
    }
}
