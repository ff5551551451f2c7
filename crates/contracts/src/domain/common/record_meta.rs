use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Служебные поля, общие для всех хранимых записей
///
/// Встраивается в записи через `#[serde(flatten)]`, поэтому на проводе
/// поля лежат на верхнем уровне объекта: `id`, `created_date`, `updated_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    /// Уникальный идентификатор записи
    pub id: Uuid,
    /// Дата создания записи (UTC)
    pub created_date: DateTime<Utc>,
    /// Дата последнего обновления (UTC)
    pub updated_date: DateTime<Utc>,
}

impl RecordMeta {
    /// Метаданные для новой записи
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_date: now,
            updated_date: now,
        }
    }

    /// Метаданные с фиксированным временем (загрузка, тесты)
    pub fn at(id: Uuid, created: DateTime<Utc>) -> Self {
        Self {
            id,
            created_date: created,
            updated_date: created,
        }
    }

    /// Обновить timestamp
    pub fn touch(&mut self) {
        self.updated_date = Utc::now();
    }
}

impl Default for RecordMeta {
    fn default() -> Self {
        Self::new()
    }
}
