use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use super::RecordMeta;

/// Трейт для всех сущностей, доступных через `entities.<Name>`
///
/// Определяет служебные поля экземпляра и статические метаданные класса:
/// имя коллекции в API, подписи для UI и валидацию перед записью.
pub trait EntityRecord: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    // ============================================================================
    // Методы экземпляра
    // ============================================================================

    /// Служебные поля записи
    fn meta(&self) -> &RecordMeta;

    /// Изменяемые служебные поля
    fn meta_mut(&mut self) -> &mut RecordMeta;

    /// Проверка обязательных полей перед записью
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    // ============================================================================
    // Метаданные класса сущности
    // ============================================================================

    /// Индекс сущности в системе (например, "a001")
    fn entity_index() -> &'static str;

    /// Имя коллекции в API и в хранилище (например, "country")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число)
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число)
    fn list_name() -> &'static str;

    // ============================================================================
    // Методы с реализацией по умолчанию
    // ============================================================================

    fn id(&self) -> Uuid {
        self.meta().id
    }

    /// Ключ кэша списка на клиенте (например, "country_list")
    fn query_key() -> String {
        format!("{}_list", Self::collection_name())
    }
}

/// `#[serde(default = ...)]` для флагов активности
pub fn default_true() -> bool {
    true
}

/// Проверка непустой строки для `validate()`
pub fn require_text(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

/// Простая проверка email для `validate()`
pub fn require_email(value: &str) -> Result<(), String> {
    require_text(value, "Email")?;
    if !value.contains('@') {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_rejects_blank() {
        assert!(require_text("  ", "Name").is_err());
        assert!(require_text("Paris", "Name").is_ok());
    }

    #[test]
    fn test_require_email() {
        assert!(require_email("ops@joltcab.com").is_ok());
        assert_eq!(
            require_email("ops.joltcab.com"),
            Err("Invalid email format".to_string())
        );
    }
}
