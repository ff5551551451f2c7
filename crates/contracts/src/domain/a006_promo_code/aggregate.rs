use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{default_true, require_text, EntityRecord, RecordMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[default]
    Percent,
    Fixed,
}

/// Промокод
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoCode {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    #[serde(default)]
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
    #[serde(default)]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    /// Ограничение по городу (None — везде)
    #[serde(default)]
    pub city_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl PromoCode {
    pub fn new_for_insert(code: String, discount_type: DiscountType, value: f64) -> Self {
        Self {
            meta: RecordMeta::new(),
            code,
            discount_type,
            discount_value: value,
            max_uses: None,
            used_count: 0,
            valid_from: None,
            valid_until: None,
            city_id: None,
            is_active: true,
        }
    }

    /// Можно ли применить код в момент `now`
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active {
            return false;
        }
        if let Some(max) = self.max_uses {
            if self.used_count >= max {
                return false;
            }
        }
        if self.valid_from.is_some_and(|from| now < from) {
            return false;
        }
        if self.valid_until.is_some_and(|until| now > until) {
            return false;
        }
        true
    }

    pub fn discount_label(&self) -> String {
        match self.discount_type {
            DiscountType::Percent => format!("{}%", self.discount_value),
            DiscountType::Fixed => format!("{:.2}", self.discount_value),
        }
    }
}

impl Default for PromoCode {
    fn default() -> Self {
        Self::new_for_insert(String::new(), DiscountType::Percent, 10.0)
    }
}

impl EntityRecord for PromoCode {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), String> {
        require_text(&self.code, "Promo code")?;
        if self.code.chars().any(char::is_whitespace) {
            return Err("Promo code must not contain spaces".to_string());
        }
        if self.discount_value <= 0.0 {
            return Err("Discount must be positive".to_string());
        }
        if self.discount_type == DiscountType::Percent && self.discount_value > 100.0 {
            return Err("Percent discount cannot exceed 100".to_string());
        }
        if let (Some(from), Some(until)) = (self.valid_from, self.valid_until) {
            if from > until {
                return Err("Valid from must be before valid until".to_string());
            }
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "promo_code"
    }

    fn element_name() -> &'static str {
        "Promo Code"
    }

    fn list_name() -> &'static str {
        "Promo Codes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_redeemable_window_and_usage() {
        let now = Utc::now();
        let mut promo = PromoCode::new_for_insert("JOLT10".into(), DiscountType::Percent, 10.0);
        assert!(promo.is_redeemable(now));

        promo.valid_until = Some(now - Duration::days(1));
        assert!(!promo.is_redeemable(now));

        promo.valid_until = None;
        promo.max_uses = Some(3);
        promo.used_count = 3;
        assert!(!promo.is_redeemable(now));
    }

    #[test]
    fn test_validate_percent_limit() {
        let promo = PromoCode::new_for_insert("BIG".into(), DiscountType::Percent, 150.0);
        assert!(promo.validate().is_err());
        let fixed = PromoCode::new_for_insert("BIG".into(), DiscountType::Fixed, 150.0);
        assert!(fixed.validate().is_ok());
    }
}
