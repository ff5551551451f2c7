use crate::shared::format::{format_money, format_thousands};
use crate::shared::icons::icon;
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use leptos::prelude::*;

fn format_value(val: f64, fmt: &ValueFormat) -> String {
    match fmt {
        ValueFormat::Money { .. } => format_money(val),
        ValueFormat::Number { decimals } => format!("{:.prec$}", val, prec = *decimals as usize),
        ValueFormat::Percent { decimals } => format!("{:.prec$}%", val, prec = *decimals as usize),
        ValueFormat::Integer => format_thousands(val as i64),
    }
}

/// Карточка показателя дашборда
#[component]
pub fn StatCard(
    label: &'static str,
    icon_name: &'static str,
    /// None: данные загружаются
    #[prop(into)]
    value: Signal<Option<f64>>,
    format: ValueFormat,
    #[prop(into, optional)] status: Signal<IndicatorStatus>,
    #[prop(into, optional)] subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let status_class = move || match status.get() {
        IndicatorStatus::Good => "stat-card stat-card--success",
        IndicatorStatus::Bad => "stat-card stat-card--error",
        IndicatorStatus::Warning => "stat-card stat-card--warning",
        IndicatorStatus::Neutral => "stat-card",
    };

    let formatted = move || match value.get() {
        Some(v) => format_value(v, &format),
        None => "—".to_string(),
    };

    view! {
        <div class=status_class>
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}
