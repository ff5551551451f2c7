//! Главная панель: плитки "за сегодня" и последние поездки.

use chrono::Utc;
use contracts::dashboards::d400_today_summary::summary::{
    build_summary, created_on, recent_rides, today_key, TodaySummary,
};
use contracts::domain::a011_driver_profile::aggregate::DriverProfile;
use contracts::domain::a012_user::aggregate::User;
use contracts::domain::a013_ride::aggregate::Ride;
use contracts::domain::a014_transaction::aggregate::Transaction;
use contracts::domain::common::EntityRecord;
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use contracts::shared::list_query::ListParams;
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::entities::EntityApi;
use crate::shared::components::badge::StatusBadge;
use crate::shared::components::stat_card::StatCard;
use crate::shared::format::{format_datetime, format_optional_money};
use crate::shared::lookups::use_lookups;
use crate::shared::page_frame::PageFrame;
use crate::shared::query_cache::use_query_cache;

const RECENT_RIDES: usize = 10;

/// Загрузка списка в сигнал; каждый список грузится независимо
fn load_into<T: EntityRecord>(target: RwSignal<Option<Vec<T>>>, params: ListParams) {
    spawn_local(async move {
        match EntityApi::<T>::new().list(&params).await {
            Ok(list) => target.set(Some(list)),
            Err(e) => {
                log::warn!("Dashboard: failed to load {}: {}", T::list_name(), e);
                target.set(Some(Vec::new()));
            }
        }
    });
}

fn money() -> ValueFormat {
    ValueFormat::Money {
        currency: "USD".to_string(),
    }
}

#[component]
pub fn DashboardHome() -> impl IntoView {
    let cache = use_query_cache();
    let lookups = use_lookups();

    let rides = RwSignal::new(None::<Vec<Ride>>);
    let users = RwSignal::new(None::<Vec<User>>);
    let drivers = RwSignal::new(None::<Vec<DriverProfile>>);
    let transactions = RwSignal::new(None::<Vec<Transaction>>);

    Effect::new(move |_| {
        cache.version(&Ride::query_key());
        load_into(rides, ListParams::sorted("-created_date"));
    });
    Effect::new(move |_| {
        cache.version(&User::query_key());
        load_into(users, ListParams::default());
    });
    Effect::new(move |_| {
        cache.version(&DriverProfile::query_key());
        load_into(drivers, ListParams::default());
    });
    Effect::new(move |_| {
        cache.version(&Transaction::query_key());
        load_into(transactions, ListParams::sorted("-created_date"));
    });

    // None, пока не пришли все три списка
    let summary = Memo::new(move |_| {
        let day = today_key(Utc::now());
        rides.with(|r| {
            users.with(|u| {
                drivers.with(|d| match (r, u, d) {
                    (Some(r), Some(u), Some(d)) => Some(build_summary(r, u, d, &day)),
                    _ => None,
                })
            })
        })
    });

    let tile = move |f: fn(&TodaySummary) -> f64| {
        Signal::derive(move || summary.with(|s| s.as_ref().map(f)))
    };

    let cancel_status = Signal::derive(move || {
        summary.with(|s| match s {
            Some(s) => IndicatorStatus::from_ratio(s.cancelled_today, s.today_requests, 0.1, 0.25),
            None => IndicatorStatus::Neutral,
        })
    });
    let pending_subtitle = Signal::derive(move || {
        summary.with(|s| s.as_ref().map(|s| format!("{} pending review", s.pending_drivers)))
    });
    let transactions_today = Signal::derive(move || {
        let day = today_key(Utc::now());
        transactions.with(|t| {
            t.as_ref()
                .map(|t| t.iter().filter(|x| created_on(&x.meta.created_date, &day)).count() as f64)
        })
    });

    let recent = Memo::new(move |_| {
        rides.with(|r| {
            r.as_deref()
                .map(|r| recent_rides(r, RECENT_RIDES).into_iter().cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    });

    view! {
        <PageFrame section=AdminSection::Dashboard subtitle=format!("Today (UTC): {}", today_key(Utc::now()))>
            <div class="dashboard__tiles">
                <StatCard
                    label="Today's Requests"
                    icon_name="navigation"
                    value=tile(|s| s.today_requests as f64)
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Completed Today"
                    icon_name="check"
                    value=tile(|s| s.completed_today as f64)
                    format=ValueFormat::Integer
                    status=IndicatorStatus::Good
                />
                <StatCard
                    label="Cancelled Today"
                    icon_name="x"
                    value=tile(|s| s.cancelled_today as f64)
                    format=ValueFormat::Integer
                    status=cancel_status
                />
                <StatCard
                    label="Scheduled"
                    icon_name="activity"
                    value=tile(|s| s.scheduled as f64)
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Active Now"
                    icon_name="car"
                    value=tile(|s| s.active_now as f64)
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Revenue Today"
                    icon_name="dollar-sign"
                    value=tile(|s| s.revenue_today)
                    format=money()
                />
                <StatCard
                    label="Total Revenue"
                    icon_name="trending-up"
                    value=tile(|s| s.revenue_total)
                    format=money()
                />
                <StatCard
                    label="Users"
                    icon_name="users"
                    value=tile(|s| s.total_users as f64)
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Drivers"
                    icon_name="user-check"
                    value=tile(|s| s.total_drivers as f64)
                    format=ValueFormat::Integer
                    subtitle=pending_subtitle
                />
                <StatCard
                    label="Online Drivers"
                    icon_name="map-pin"
                    value=tile(|s| s.online_drivers as f64)
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Transactions Today"
                    icon_name="credit-card"
                    value=transactions_today
                    format=ValueFormat::Integer
                />
            </div>

            <h3 class="dashboard__section-title">"Recent Rides"</h3>
            <table class="table__data">
                <thead>
                    <tr>
                        <th>"Created"</th>
                        <th>"Pickup"</th>
                        <th>"Dropoff"</th>
                        <th>"City"</th>
                        <th>"Fare"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || recent.with(|r| r.is_empty())>
                        <tr>
                            <td colspan="6" class="table__empty">"No rides yet"</td>
                        </tr>
                    </Show>
                    <For
                        each=move || recent.get()
                        key=|r| (r.id(), r.status)
                        children=move |ride: Ride| {
                            let city = lookups.with(|l| l.city_name(ride.city_id));
                            view! {
                                <tr>
                                    <td>{format_datetime(&ride.meta.created_date)}</td>
                                    <td>{ride.pickup_address.clone()}</td>
                                    <td>{ride.dropoff_address.clone()}</td>
                                    <td>{city}</td>
                                    <td>{format_optional_money(ride.fare)}</td>
                                    <td><StatusBadge status=ride.status.as_str() label=ride.status.label() /></td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </PageFrame>
    }
}
