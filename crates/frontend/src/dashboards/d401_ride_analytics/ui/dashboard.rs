use chrono::Utc;
use contracts::dashboards::d401_ride_analytics::analytics::{build_analytics, RideAnalytics};
use contracts::domain::a013_ride::aggregate::Ride;
use contracts::domain::common::EntityRecord;
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use contracts::shared::list_query::ListParams;
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::entities::EntityApi;
use crate::shared::components::badge::StatusBadge;
use crate::shared::components::stat_card::StatCard;
use crate::shared::format::{format_money, format_thousands};
use crate::shared::lookups::use_lookups;
use crate::shared::page_frame::PageFrame;
use crate::shared::query_cache::use_query_cache;

const PERIODS: [usize; 3] = [7, 14, 30];

/// Ширина полоски в процентах от максимума
fn bar_width(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return "0%".to_string();
    }
    format!("{:.0}%", (value / max * 100.0).clamp(0.0, 100.0))
}

/// Аналитика поездок: статусы, города, выручка по дням
#[component]
pub fn RideAnalyticsDashboard() -> impl IntoView {
    let cache = use_query_cache();
    let lookups = use_lookups();

    let rides = RwSignal::new(None::<Vec<Ride>>);
    let days = RwSignal::new(PERIODS[0]);

    Effect::new(move |_| {
        cache.version(&Ride::query_key());
        spawn_local(async move {
            match EntityApi::<Ride>::new().list(&ListParams::sorted("-created_date")).await {
                Ok(list) => rides.set(Some(list)),
                Err(e) => {
                    log::warn!("Analytics: failed to load rides: {}", e);
                    rides.set(Some(Vec::new()));
                }
            }
        });
    });

    let analytics = Memo::new(move |_| {
        let period = days.get();
        rides.with(|r| {
            r.as_ref().map(|r| {
                lookups.with(|l| build_analytics(r, &l.cities, Utc::now(), period))
            })
        })
    });

    let total = Signal::derive(move || rides.with(|r| r.as_ref().map(|r| r.len() as f64)));
    let completion = Signal::derive(move || {
        analytics.with(|a| a.as_ref().and_then(|a| a.completion_rate))
    });
    let completion_status = Signal::derive(move || match completion.get() {
        Some(rate) if rate >= 80.0 => IndicatorStatus::Good,
        Some(rate) if rate >= 50.0 => IndicatorStatus::Warning,
        Some(_) => IndicatorStatus::Bad,
        None => IndicatorStatus::Neutral,
    });
    let average_fare = Signal::derive(move || {
        analytics.with(|a| a.as_ref().and_then(|a| a.average_fare))
    });

    let data = move || analytics.get().unwrap_or_default();

    let period_buttons = PERIODS
        .into_iter()
        .map(|p| {
            view! {
                <button
                    class="button button--small"
                    class:button--primary=move || days.get() == p
                    on:click=move |_| days.set(p)
                >
                    {format!("{} days", p)}
                </button>
            }
        })
        .collect_view();

    view! {
        <PageFrame
            section=AdminSection::Analytics
            actions=view! { <div class="button-group">{period_buttons}</div> }.into_any()
        >
            <div class="dashboard__tiles">
                <StatCard label="Rides Loaded" icon_name="car" value=total format=ValueFormat::Integer />
                <StatCard
                    label="Completion Rate"
                    icon_name="check"
                    value=completion
                    format=ValueFormat::Percent { decimals: 1 }
                    status=completion_status
                />
                <StatCard
                    label="Average Fare"
                    icon_name="dollar-sign"
                    value=average_fare
                    format=ValueFormat::Money { currency: "USD".to_string() }
                />
            </div>

            <div class="dashboard__columns">
                <div>
                    <h3 class="dashboard__section-title">"By Status"</h3>
                    <table class="table__data">
                        <tbody>
                            {move || {
                                data()
                                    .by_status
                                    .into_iter()
                                    .map(|s| {
                                        view! {
                                            <tr>
                                                <td><StatusBadge status=s.status.as_str() label=s.status.label() /></td>
                                                <td class="table__number">{format_thousands(s.count as i64)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </div>
                <div>
                    <h3 class="dashboard__section-title">"By City"</h3>
                    <table class="table__data">
                        <thead>
                            <tr>
                                <th>"City"</th>
                                <th>"Rides"</th>
                                <th>"Completed"</th>
                                <th>"Revenue"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                data()
                                    .by_city
                                    .into_iter()
                                    .map(|c| {
                                        view! {
                                            <tr>
                                                <td>{c.city_name}</td>
                                                <td class="table__number">{c.rides}</td>
                                                <td class="table__number">{c.completed}</td>
                                                <td class="table__number">{format_money(c.revenue)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </div>
            </div>

            <h3 class="dashboard__section-title">"Daily Revenue"</h3>
            <table class="table__data">
                <thead>
                    <tr>
                        <th>"Day"</th>
                        <th>"Rides"</th>
                        <th>"Revenue"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let RideAnalytics { last_days, .. } = data();
                        let max = last_days.iter().map(|d| d.revenue).fold(0.0, f64::max);
                        last_days
                            .into_iter()
                            .map(|d| {
                                let width = bar_width(d.revenue, max);
                                view! {
                                    <tr>
                                        <td>{d.day}</td>
                                        <td class="table__number">{d.rides}</td>
                                        <td class="table__number">{format_money(d.revenue)}</td>
                                        <td class="dashboard__bar-cell">
                                            <div class="dashboard__bar" style:width=width></div>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(5.0, 10.0), "50%");
        assert_eq!(bar_width(3.0, 0.0), "0%");
        assert_eq!(bar_width(12.0, 10.0), "100%");
    }
}
