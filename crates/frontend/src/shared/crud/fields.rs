//! Поля формы, привязанные к черновику записи через геттер и сеттер

use chrono::{DateTime, NaiveDate, Utc};
use leptos::prelude::*;
use uuid::Uuid;

pub fn text_field(
    label: &'static str,
    get: impl Fn() -> String + Send + Sync + 'static,
    set: impl Fn(String) + 'static,
) -> AnyView {
    view! {
        <label class="form__group">
            <span class="form__label">{label}</span>
            <input
                class="form__input"
                type="text"
                prop:value=get
                on:input=move |ev| set(event_target_value(&ev))
            />
        </label>
    }
    .into_any()
}

pub fn password_field(
    label: &'static str,
    get: impl Fn() -> String + Send + Sync + 'static,
    set: impl Fn(String) + 'static,
) -> AnyView {
    view! {
        <label class="form__group">
            <span class="form__label">{label}</span>
            <input
                class="form__input"
                type="password"
                autocomplete="new-password"
                prop:value=get
                on:input=move |ev| set(event_target_value(&ev))
            />
        </label>
    }
    .into_any()
}

/// Необязательная строка: пустое поле даёт None
pub fn optional_text_field(
    label: &'static str,
    get: impl Fn() -> Option<String> + Send + Sync + 'static,
    set: impl Fn(Option<String>) + 'static,
) -> AnyView {
    text_field(
        label,
        move || get().unwrap_or_default(),
        move |v| set((!v.trim().is_empty()).then_some(v)),
    )
}

/// Число; пишется при потере фокуса, нечисловой ввод игнорируется
pub fn number_field(
    label: &'static str,
    get: impl Fn() -> f64 + Send + Sync + 'static,
    set: impl Fn(f64) + 'static,
) -> AnyView {
    view! {
        <label class="form__group">
            <span class="form__label">{label}</span>
            <input
                class="form__input"
                type="number"
                step="any"
                prop:value=move || get().to_string()
                on:change=move |ev| {
                    if let Ok(v) = event_target_value(&ev).trim().parse::<f64>() {
                        set(v);
                    }
                }
            />
        </label>
    }
    .into_any()
}

pub fn optional_number_field(
    label: &'static str,
    get: impl Fn() -> Option<f64> + Send + Sync + 'static,
    set: impl Fn(Option<f64>) + 'static,
) -> AnyView {
    view! {
        <label class="form__group">
            <span class="form__label">{label}</span>
            <input
                class="form__input"
                type="number"
                step="any"
                prop:value=move || get().map(|v| v.to_string()).unwrap_or_default()
                on:change=move |ev| {
                    let raw = event_target_value(&ev);
                    if raw.trim().is_empty() {
                        set(None);
                    } else if let Ok(v) = raw.trim().parse::<f64>() {
                        set(Some(v));
                    }
                }
            />
        </label>
    }
    .into_any()
}

pub fn integer_field(
    label: &'static str,
    get: impl Fn() -> u32 + Send + Sync + 'static,
    set: impl Fn(u32) + 'static,
) -> AnyView {
    number_field(label, move || get() as f64, move |v| set(v.max(0.0).round() as u32))
}

pub fn checkbox_field(
    label: &'static str,
    get: impl Fn() -> bool + Send + Sync + 'static,
    set: impl Fn(bool) + 'static,
) -> AnyView {
    view! {
        <label class="form__check">
            <input
                type="checkbox"
                prop:checked=get
                on:change=move |ev| set(event_target_checked(&ev))
            />
            <span>{label}</span>
        </label>
    }
    .into_any()
}

/// Выпадающий список; `options` — пары (значение, подпись)
pub fn select_field(
    label: &'static str,
    options: impl Fn() -> Vec<(String, String)> + Send + Sync + 'static,
    get: impl Fn() -> String + Send + Sync + 'static,
    set: impl Fn(String) + 'static,
) -> AnyView {
    view! {
        <label class="form__group">
            <span class="form__label">{label}</span>
            <select
                class="form__input"
                prop:value=get
                on:change=move |ev| set(event_target_value(&ev))
            >
                <option value="">"Select..."</option>
                {move || {
                    options()
                        .into_iter()
                        .map(|(value, text)| view! { <option value=value>{text}</option> })
                        .collect_view()
                }}
            </select>
        </label>
    }
    .into_any()
}

/// Выбор ссылки на запись; пустой выбор даёт None
pub fn reference_field(
    label: &'static str,
    options: impl Fn() -> Vec<(String, String)> + Send + Sync + 'static,
    get: impl Fn() -> Option<Uuid> + Send + Sync + 'static,
    set: impl Fn(Option<Uuid>) + 'static,
) -> AnyView {
    select_field(
        label,
        options,
        move || get().map(|id| id.to_string()).unwrap_or_default(),
        move |v| set(Uuid::parse_str(&v).ok()),
    )
}

/// Обязательная ссылка: до выбора хранится nil, его отвергает `validate()`
pub fn required_reference_field(
    label: &'static str,
    options: impl Fn() -> Vec<(String, String)> + Send + Sync + 'static,
    get: impl Fn() -> Uuid + Send + Sync + 'static,
    set: impl Fn(Uuid) + 'static,
) -> AnyView {
    select_field(
        label,
        options,
        move || {
            let id = get();
            if id.is_nil() {
                String::new()
            } else {
                id.to_string()
            }
        },
        move |v| set(Uuid::parse_str(&v).unwrap_or_else(|_| Uuid::nil())),
    )
}

/// Дата без времени; хранится как полночь UTC
pub fn optional_date_field(
    label: &'static str,
    get: impl Fn() -> Option<DateTime<Utc>> + Send + Sync + 'static,
    set: impl Fn(Option<DateTime<Utc>>) + 'static,
) -> AnyView {
    view! {
        <label class="form__group">
            <span class="form__label">{label}</span>
            <input
                class="form__input"
                type="date"
                prop:value=move || get().map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
                on:input=move |ev| set(parse_date(&event_target_value(&ev)))
            />
        </label>
    }
    .into_any()
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let parsed = parse_date("2025-03-09").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-03-09T00:00:00+00:00");
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("09.03.2025"), None);
    }
}
