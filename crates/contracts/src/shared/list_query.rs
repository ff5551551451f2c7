//! Параметры `list(sort?, limit?)` и `filter(query)` для сущностей.
//!
//! Сортировка и фильтр работают над JSON-представлением записей, чтобы
//! одно хранилище обслуживало все сущности.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Query-параметры `GET /api/entities/{entity}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListParams {
    /// Имя поля; префикс `-` — по убыванию
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl ListParams {
    pub fn sorted(sort: &str) -> Self {
        Self {
            sort: Some(sort.to_string()),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (field, descending) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw.strip_prefix('+').unwrap_or(raw), false),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_string(),
            descending,
        })
    }
}

/// Сравнение значений одного поля; отсутствующие и null всегда в конце
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Number(x), Value::Number(y)) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
            (Value::String(x), Value::String(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => a.to_string().cmp(&b.to_string()),
        },
    }
}

pub fn sort_records(records: &mut [Value], key: &SortKey) {
    records.sort_by(|a, b| {
        let a_val = a.get(&key.field);
        let b_val = b.get(&key.field);
        let both_present = a_val.is_some_and(|v| !v.is_null()) && b_val.is_some_and(|v| !v.is_null());
        let ord = compare_field(a_val, b_val);
        // null в конце при любом направлении
        if key.descending && both_present {
            ord.reverse()
        } else {
            ord
        }
    });
}

/// Применить сортировку и лимит к списку записей
pub fn apply_list_params(mut records: Vec<Value>, params: &ListParams) -> Vec<Value> {
    if let Some(key) = params.sort.as_deref().and_then(SortKey::parse) {
        sort_records(&mut records, &key);
    }
    if let Some(limit) = params.limit {
        records.truncate(limit as usize);
    }
    records
}

/// Точное совпадение всех полей запроса
pub fn matches_filter(record: &Value, query: &Map<String, Value>) -> bool {
    query
        .iter()
        .all(|(field, expected)| record.get(field).unwrap_or(&Value::Null) == expected)
}

/// Поиск подстроки без учёта регистра по одному или нескольким полям
pub fn matches_search(fields: &[&str], term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&term))
}

/// Совпадение по статусу/категории; `None` или "all" — без фильтра
pub fn matches_status(value: &str, selected: Option<&str>) -> bool {
    match selected {
        None | Some("") | Some("all") => true,
        Some(s) => value == s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<Value> {
        vec![
            json!({"id": "a", "name": "lisbon", "created_date": "2024-05-01T10:00:00Z", "fare": 12.5}),
            json!({"id": "b", "name": "Porto", "created_date": "2024-05-03T10:00:00Z", "fare": null}),
            json!({"id": "c", "name": "Braga", "created_date": "2024-05-02T10:00:00Z", "fare": 7}),
        ]
    }

    fn ids(list: &[Value]) -> Vec<&str> {
        list.iter().map(|v| v["id"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(
            SortKey::parse("-created_date"),
            Some(SortKey {
                field: "created_date".into(),
                descending: true
            })
        );
        assert_eq!(SortKey::parse("name").map(|k| k.descending), Some(false));
        assert_eq!(SortKey::parse("-"), None);
    }

    #[test]
    fn test_sort_desc_with_limit() {
        let params = ListParams::sorted("-created_date").with_limit(2);
        let list = apply_list_params(records(), &params);
        assert_eq!(ids(&list), vec!["b", "c"]);
    }

    #[test]
    fn test_sort_case_insensitive_strings() {
        let list = apply_list_params(records(), &ListParams::sorted("name"));
        assert_eq!(ids(&list), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_nulls_last_both_directions() {
        let asc = apply_list_params(records(), &ListParams::sorted("fare"));
        assert_eq!(ids(&asc), vec!["c", "a", "b"]);
        let desc = apply_list_params(records(), &ListParams::sorted("-fare"));
        assert_eq!(ids(&desc), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_no_params_keeps_order() {
        let list = apply_list_params(records(), &ListParams::default());
        assert_eq!(ids(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_matches_filter() {
        let record = json!({"status": "active", "city_id": "x"});
        let mut query = Map::new();
        query.insert("status".into(), json!("active"));
        assert!(matches_filter(&record, &query));
        query.insert("city_id".into(), json!("y"));
        assert!(!matches_filter(&record, &query));
    }

    #[test]
    fn test_matches_search_and_status() {
        assert!(matches_search(&["Hotel Avenida", "ops@avenida.pt"], "AVEN"));
        assert!(!matches_search(&["Hotel Avenida"], "porto"));
        assert!(matches_search(&["anything"], "  "));
        assert!(matches_status("pending", Some("all")));
        assert!(!matches_status("pending", Some("active")));
    }
}
