use std::marker::PhantomData;

use contracts::domain::common::EntityRecord;
use contracts::shared::list_query::ListParams;
use serde::Serialize;
use serde_json::{Map, Value};

use super::http;

/// `entities.<Name>` для типизированной записи
///
/// ```rust,ignore
/// let cities = EntityApi::<City>::new().list(&ListParams::sorted("name")).await?;
/// ```
pub struct EntityApi<T: EntityRecord> {
    _record: PhantomData<T>,
}

impl<T: EntityRecord> Clone for EntityApi<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: EntityRecord> Copy for EntityApi<T> {}

impl<T: EntityRecord> Default for EntityApi<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: EntityRecord> EntityApi<T> {
    pub fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }

    fn base() -> String {
        format!("/api/entities/{}", T::collection_name())
    }

    fn query_string(params: &ListParams) -> String {
        match serde_qs::to_string(params) {
            Ok(qs) if !qs.is_empty() => format!("?{}", qs),
            _ => String::new(),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Vec<T>, String> {
        http::get_json(&format!("{}{}", Self::base(), Self::query_string(params))).await
    }

    pub async fn get(&self, id: &str) -> Result<T, String> {
        http::get_json(&format!("{}/{}", Self::base(), id)).await
    }

    /// Точное совпадение по полям запроса
    pub async fn filter(&self, query: &Map<String, Value>) -> Result<Vec<T>, String> {
        http::post_json(&format!("{}/filter", Self::base()), query).await
    }

    pub async fn create<B: Serialize>(&self, data: &B) -> Result<T, String> {
        http::post_json(&Self::base(), data).await
    }

    pub async fn update<B: Serialize>(&self, id: &str, data: &B) -> Result<T, String> {
        http::put_json(&format!("{}/{}", Self::base(), id), data).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), String> {
        http::delete(&format!("{}/{}", Self::base(), id)).await
    }

    /// Сохранить запись: update для существующей, иначе create
    pub async fn save(&self, record: &T, is_new: bool) -> Result<T, String> {
        record.validate()?;
        if is_new {
            self.create(record).await
        } else {
            self.update(&record.id().to_string(), record).await
        }
    }
}
