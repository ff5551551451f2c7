//! Настройки приложения: оформление и ключи интеграций (`settings.*`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceSettings {
    pub app_name: String,
    pub primary_color: String,
    pub logo_url: Option<String>,
    /// "light" | "dark"
    pub default_theme: String,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            app_name: "JoltCab".to_string(),
            primary_color: "#15B46A".to_string(),
            logo_url: None,
            default_theme: "light".to_string(),
        }
    }
}

impl AppearanceSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.app_name.trim().is_empty() {
            return Err("App name is required".into());
        }
        let hex = self.primary_color.trim_start_matches('#');
        if !self.primary_color.starts_with('#')
            || hex.len() != 6
            || !hex.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err("Primary color must look like #RRGGBB".into());
        }
        if self.default_theme != "light" && self.default_theme != "dark" {
            return Err("Theme must be light or dark".into());
        }
        Ok(())
    }
}

/// Учётные данные сторонних сервисов
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationSettings {
    #[serde(default)]
    pub google_maps_api_key: Option<String>,
    #[serde(default)]
    pub stripe_secret_key: Option<String>,
    #[serde(default)]
    pub stripe_publishable_key: Option<String>,
    #[serde(default)]
    pub twilio_account_sid: Option<String>,
    #[serde(default)]
    pub twilio_auth_token: Option<String>,
    #[serde(default)]
    pub smtp_host: Option<String>,
    #[serde(default)]
    pub smtp_user: Option<String>,
    #[serde(default)]
    pub smtp_password: Option<String>,
    #[serde(default)]
    pub r2_bucket: Option<String>,
}

impl IntegrationSettings {
    /// Копия для отдачи клиенту: секреты заменены маской
    pub fn masked(&self) -> Self {
        Self {
            google_maps_api_key: self.google_maps_api_key.as_deref().map(mask_secret),
            stripe_secret_key: self.stripe_secret_key.as_deref().map(mask_secret),
            stripe_publishable_key: self.stripe_publishable_key.clone(),
            twilio_account_sid: self.twilio_account_sid.clone(),
            twilio_auth_token: self.twilio_auth_token.as_deref().map(mask_secret),
            smtp_host: self.smtp_host.clone(),
            smtp_user: self.smtp_user.clone(),
            smtp_password: self.smtp_password.as_deref().map(mask_secret),
            r2_bucket: self.r2_bucket.clone(),
        }
    }

    /// Применяет обновление; маскированные и пустые значения не затирают сохранённые
    pub fn merge(&mut self, update: IntegrationSettings) {
        fn take(slot: &mut Option<String>, incoming: Option<String>) {
            match incoming {
                Some(v) if v.contains(MASK) => {}
                Some(v) if v.trim().is_empty() => *slot = None,
                Some(v) => *slot = Some(v.trim().to_string()),
                None => {}
            }
        }
        take(&mut self.google_maps_api_key, update.google_maps_api_key);
        take(&mut self.stripe_secret_key, update.stripe_secret_key);
        take(&mut self.stripe_publishable_key, update.stripe_publishable_key);
        take(&mut self.twilio_account_sid, update.twilio_account_sid);
        take(&mut self.twilio_auth_token, update.twilio_auth_token);
        take(&mut self.smtp_host, update.smtp_host);
        take(&mut self.smtp_user, update.smtp_user);
        take(&mut self.smtp_password, update.smtp_password);
        take(&mut self.r2_bucket, update.r2_bucket);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub appearance: AppearanceSettings,
    #[serde(default)]
    pub integrations: IntegrationSettings,
}

const MASK: &str = "••••";

fn mask_secret(value: &str) -> String {
    let tail: String = value
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if value.chars().count() <= 4 {
        MASK.to_string()
    } else {
        format!("{}{}", MASK, tail)
    }
}

/// Состояние одной интеграции для панели статуса
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationStatus {
    pub name: String,
    pub configured: bool,
}

/// Ответ `settings.getConfigStatus`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigStatus {
    pub integrations: Vec<IntegrationStatus>,
    pub checked_at: String,
}

impl ConfigStatus {
    pub fn from_settings(settings: &IntegrationSettings, checked_at: String) -> Self {
        let set = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        let integrations = vec![
            ("Google Maps", set(&settings.google_maps_api_key)),
            (
                "Stripe",
                set(&settings.stripe_secret_key) && set(&settings.stripe_publishable_key),
            ),
            (
                "Twilio",
                set(&settings.twilio_account_sid) && set(&settings.twilio_auth_token),
            ),
            (
                "SMTP",
                set(&settings.smtp_host) && set(&settings.smtp_user) && set(&settings.smtp_password),
            ),
            ("R2 Storage", set(&settings.r2_bucket)),
        ]
        .into_iter()
        .map(|(name, configured)| IntegrationStatus {
            name: name.to_string(),
            configured,
        })
        .collect();

        Self {
            integrations,
            checked_at,
        }
    }

    pub fn configured_count(&self) -> usize {
        self.integrations.iter().filter(|i| i.configured).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_keeps_tail() {
        assert_eq!(mask_secret("sk_live_123456"), "••••3456");
        assert_eq!(mask_secret("abc"), "••••");
    }

    #[test]
    fn test_merge_ignores_masked_values() {
        let mut stored = IntegrationSettings {
            stripe_secret_key: Some("sk_live_123456".into()),
            ..Default::default()
        };
        let mut update = stored.masked();
        update.smtp_host = Some(" smtp.example.com ".into());
        stored.merge(update);
        assert_eq!(stored.stripe_secret_key.as_deref(), Some("sk_live_123456"));
        assert_eq!(stored.smtp_host.as_deref(), Some("smtp.example.com"));
    }

    #[test]
    fn test_merge_clears_on_empty() {
        let mut stored = IntegrationSettings {
            r2_bucket: Some("media".into()),
            ..Default::default()
        };
        stored.merge(IntegrationSettings {
            r2_bucket: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(stored.r2_bucket, None);
    }

    #[test]
    fn test_config_status() {
        let settings = IntegrationSettings {
            google_maps_api_key: Some("key".into()),
            stripe_secret_key: Some("sk".into()),
            ..Default::default()
        };
        let status = ConfigStatus::from_settings(&settings, "now".into());
        assert_eq!(status.integrations.len(), 5);
        assert_eq!(status.configured_count(), 1);
    }

    #[test]
    fn test_appearance_validation() {
        assert!(AppearanceSettings::default().validate().is_ok());
        let bad = AppearanceSettings {
            primary_color: "green".into(),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
