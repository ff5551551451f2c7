use serde::{Deserialize, Serialize};

use super::catalog::CountryInfo;
use crate::domain::common::{default_true, require_text, EntityRecord, RecordMeta};

/// Страна, в которой работает сервис
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Старые записи хранят имя в `countryname`
    #[serde(alias = "countryname")]
    pub name: String,
    /// ISO 3166-1 alpha-2
    #[serde(alias = "countrycode")]
    pub code: String,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub currency_sign: String,
    #[serde(default)]
    pub phone_code: String,
    #[serde(default)]
    pub flag_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Country {
    pub fn new_for_insert(name: String, code: String) -> Self {
        Self {
            meta: RecordMeta::new(),
            name,
            code,
            currency_code: String::new(),
            currency_sign: String::new(),
            phone_code: String::new(),
            flag_url: None,
            is_active: true,
        }
    }

    /// Новая запись из строки каталога
    pub fn from_catalog(info: &CountryInfo) -> Self {
        let mut country = Self::default();
        country.apply_catalog(info);
        country
    }

    /// Перенести поля каталога; флаг не затирается пустым значением
    pub fn apply_catalog(&mut self, info: &CountryInfo) {
        self.name = info.name.clone();
        self.code = info.code.to_uppercase();
        self.currency_code = info.currency_code.clone();
        self.currency_sign = info.currency_sign.clone();
        self.phone_code = info.phone_code.clone();
        if info.flag_url.is_some() {
            self.flag_url = info.flag_url.clone();
        }
    }
}

impl Default for Country {
    fn default() -> Self {
        Self::new_for_insert(String::new(), String::new())
    }
}

impl EntityRecord for Country {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), String> {
        require_text(&self.name, "Country name")?;
        let code = self.code.trim();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err("Country code must be a two-letter ISO code".to_string());
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "country"
    }

    fn element_name() -> &'static str {
        "Country"
    }

    fn list_name() -> &'static str {
        "Countries"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_countryname_alias() {
        let json = r#"{
            "id": "6f1c1b8e-8a53-4c4b-9a53-0f5b3f1d2c11",
            "created_date": "2024-05-01T10:00:00Z",
            "updated_date": "2024-05-01T10:00:00Z",
            "countryname": "Portugal",
            "code": "PT"
        }"#;
        let country: Country = serde_json::from_str(json).unwrap();
        assert_eq!(country.name, "Portugal");
        assert!(country.is_active);
        assert!(country.validate().is_ok());
    }

    #[test]
    fn test_missing_required_field_fails_fast() {
        let json = r#"{
            "id": "6f1c1b8e-8a53-4c4b-9a53-0f5b3f1d2c11",
            "created_date": "2024-05-01T10:00:00Z",
            "updated_date": "2024-05-01T10:00:00Z",
            "code": "PT"
        }"#;
        assert!(serde_json::from_str::<Country>(json).is_err());
    }

    #[test]
    fn test_validate_code() {
        let mut country = Country::new_for_insert("Portugal".into(), "PRT".into());
        assert!(country.validate().is_err());
        country.code = "PT".into();
        assert!(country.validate().is_ok());
    }

    #[test]
    fn test_apply_catalog_keeps_flag_when_missing() {
        let mut info = CountryInfo {
            name: "Portugal".into(),
            code: "pt".into(),
            currency_code: "EUR".into(),
            currency_sign: "€".into(),
            phone_code: "+351".into(),
            flag_url: Some("https://flagcdn.com/w320/pt.png".into()),
        };
        let mut country = Country::from_catalog(&info);
        assert_eq!(country.code, "PT");
        assert!(country.is_active);

        info.flag_url = None;
        country.apply_catalog(&info);
        assert_eq!(
            country.flag_url.as_deref(),
            Some("https://flagcdn.com/w320/pt.png")
        );
    }
}
