use serde::{Deserialize, Serialize};

use crate::domain::common::{
    require_email, require_text, EntityRecord, PartnerStatus, RecordMeta,
};

/// Корпоративный клиент
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorporateProfile {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub company_name: String,
    pub email: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    /// Кредитный лимит в валюте страны
    #[serde(default)]
    pub credit_limit: f64,
    #[serde(default)]
    pub status: PartnerStatus,
}

impl Default for CorporateProfile {
    fn default() -> Self {
        Self {
            meta: RecordMeta::new(),
            company_name: String::new(),
            email: String::new(),
            contact_name: String::new(),
            phone: String::new(),
            address: String::new(),
            credit_limit: 0.0,
            status: PartnerStatus::Pending,
        }
    }
}

impl EntityRecord for CorporateProfile {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), String> {
        require_text(&self.company_name, "Company name")?;
        require_email(&self.email)?;
        if self.credit_limit < 0.0 {
            return Err("Credit limit cannot be negative".to_string());
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a008"
    }

    fn collection_name() -> &'static str {
        "corporate_profile"
    }

    fn element_name() -> &'static str {
        "Corporate Account"
    }

    fn list_name() -> &'static str {
        "Corporate Accounts"
    }
}
