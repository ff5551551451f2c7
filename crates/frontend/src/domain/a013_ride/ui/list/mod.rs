//! Раздел "Rides": монитор поездок с опросом каждые `RIDES_POLL_MS`.

use std::collections::HashMap;

use contracts::domain::a011_driver_profile::aggregate::DriverProfile;
use contracts::domain::a012_user::aggregate::User;
use contracts::domain::a013_ride::aggregate::{Ride, RideStatus};
use contracts::domain::common::EntityRecord;
use contracts::shared::delete_flow::friendly_error;
use contracts::shared::list_query::{matches_search, matches_status, ListParams};
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::shared::api::entities::EntityApi;
use crate::shared::components::badge::StatusBadge;
use crate::shared::dialogs::confirm;
use crate::shared::format::{format_datetime, format_optional_money};
use crate::shared::list_utils::{selected_filter, SearchInput, StatusFilter};
use crate::shared::lookups::{use_lookups, NONE_LABEL};
use crate::shared::page_frame::PageFrame;
use crate::shared::polling::{use_interval, RIDES_POLL_MS};
use crate::shared::query_cache::use_query_cache;
use crate::shared::toast::use_toast;

/// Сколько поездок держит монитор
const RIDES_LIMIT: u64 = 200;

pub fn visible_rides(rides: &[Ride], search: &str, status: &str) -> Vec<Ride> {
    rides
        .iter()
        .filter(|r| matches_search(&[r.pickup_address.as_str(), r.dropoff_address.as_str()], search))
        .filter(|r| matches_status(r.status.as_str(), selected_filter(status)))
        .cloned()
        .collect()
}

#[component]
pub fn TripsMonitor() -> impl IntoView {
    let cache = use_query_cache();
    let toast = use_toast();
    let lookups = use_lookups();

    let rides = RwSignal::new(Vec::<Ride>::new());
    let loaded = RwSignal::new(false);
    let riders = RwSignal::new(HashMap::<Uuid, String>::new());
    let drivers = RwSignal::new(HashMap::<Uuid, String>::new());
    let search = RwSignal::new(String::new());
    let status = RwSignal::new("all".to_string());

    let reload = move || {
        spawn_local(async move {
            match EntityApi::<Ride>::new()
                .list(&ListParams::sorted("-created_date").with_limit(RIDES_LIMIT))
                .await
            {
                Ok(list) => rides.set(list),
                Err(e) => log::warn!("Failed to poll rides: {}", e),
            }
            loaded.set(true);
        });
    };

    Effect::new(move |_| {
        cache.version(&Ride::query_key());
        reload();
    });
    use_interval(RIDES_POLL_MS, reload);

    Effect::new(move |_| {
        cache.version(&User::query_key());
        spawn_local(async move {
            if let Ok(list) = EntityApi::<User>::new().list(&ListParams::default()).await {
                riders.set(list.into_iter().map(|u| (u.id(), u.full_name)).collect());
            }
        });
    });

    Effect::new(move |_| {
        cache.version(&DriverProfile::query_key());
        spawn_local(async move {
            if let Ok(list) = EntityApi::<DriverProfile>::new().list(&ListParams::default()).await {
                drivers.set(list.into_iter().map(|d| (d.id(), d.full_name)).collect());
            }
        });
    });

    let cancel_ride = move |ride: Ride| {
        if !confirm("Cancel this ride?") {
            return;
        }
        let mut changed = ride;
        changed.status = RideStatus::Cancelled;
        spawn_local(async move {
            match EntityApi::<Ride>::new()
                .update(&changed.id().to_string(), &changed)
                .await
            {
                Ok(_) => {
                    toast.success("Ride cancelled");
                    cache.invalidate(&Ride::query_key());
                }
                Err(e) => toast.error(friendly_error(&e)),
            }
        });
    };

    let visible = Memo::new(move |_| rides.with(|list| visible_rides(list, &search.get(), &status.get())));
    let active_count = move || rides.with(|list| list.iter().filter(|r| r.status.is_active()).count());

    let status_options: Vec<(&'static str, &'static str)> =
        RideStatus::all().iter().map(|s| (s.as_str(), s.label())).collect();

    view! {
        <PageFrame
            section=AdminSection::Rides
            subtitle=format!("Refreshes every {} seconds", RIDES_POLL_MS / 1000)
        >
            <div class="filter-bar">
                <SearchInput
                    value=Signal::derive(move || search.get())
                    on_change=Callback::new(move |v: String| search.set(v))
                    placeholder="Search by address..."
                />
                <StatusFilter value=status options=status_options />
                <span class="filter-bar__count">
                    {move || format!("{} shown · {} active", visible.with(|v| v.len()), active_count())}
                </span>
            </div>
            <Show
                when=move || loaded.get()
                fallback=|| view! { <div class="page__loading">"Loading..."</div> }
            >
                <table class="table__data">
                    <thead>
                        <tr>
                            <th>"Created"</th>
                            <th>"Route"</th>
                            <th>"Rider"</th>
                            <th>"Driver"</th>
                            <th>"Service"</th>
                            <th>"City"</th>
                            <th>"Fare"</th>
                            <th>"Status"</th>
                            <th class="table__actions"></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || visible.get()
                            key=|r| (r.id(), r.meta.updated_date, r.status)
                            children=move |ride: Ride| {
                                let rider = riders.with(|m| m.get(&ride.rider_id).cloned())
                                    .unwrap_or_else(|| NONE_LABEL.to_string());
                                let driver = ride
                                    .driver_id
                                    .and_then(|id| drivers.with(|m| m.get(&id).cloned()))
                                    .unwrap_or_else(|| NONE_LABEL.to_string());
                                let (service, city) = lookups.with(|l| {
                                    (l.service_type_name(ride.service_type_id), l.city_name(ride.city_id))
                                });
                                let when = match ride.scheduled_at {
                                    Some(at) if ride.status == RideStatus::Scheduled => {
                                        format!("for {}", format_datetime(&at))
                                    }
                                    _ => format_datetime(&ride.meta.created_date),
                                };
                                let cancellable = matches!(
                                    ride.status,
                                    RideStatus::Requested | RideStatus::Scheduled
                                ) || ride.status.is_active();
                                let for_cancel = ride.clone();
                                view! {
                                    <tr>
                                        <td>{when}</td>
                                        <td>
                                            <div>{ride.pickup_address.clone()}</div>
                                            <div class="table__muted">{ride.dropoff_address.clone()}</div>
                                        </td>
                                        <td>{rider}</td>
                                        <td>{driver}</td>
                                        <td>{service}</td>
                                        <td>{city}</td>
                                        <td>{format_optional_money(ride.fare)}</td>
                                        <td><StatusBadge status=ride.status.as_str() label=ride.status.label() /></td>
                                        <td class="table__actions">
                                            <Show when=move || cancellable>
                                                <button
                                                    class="button button--small button--danger"
                                                    on:click={
                                                        let ride = for_cancel.clone();
                                                        move |_| cancel_ride(ride.clone())
                                                    }
                                                >
                                                    "Cancel"
                                                </button>
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ride(pickup: &str, status: RideStatus) -> Ride {
        let mut r = Ride::new_for_insert(Uuid::new_v4(), pickup.to_string());
        r.status = status;
        r
    }

    #[test]
    fn test_visible_rides_filters_by_address_and_status() {
        let rides = vec![
            ride("Airport Terminal 1", RideStatus::Requested),
            ride("Central Station", RideStatus::Completed),
            ride("Airport Terminal 2", RideStatus::Completed),
        ];
        assert_eq!(visible_rides(&rides, "airport", "all").len(), 2);
        let done = visible_rides(&rides, "airport", "completed");
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].pickup_address, "Airport Terminal 2");
    }
}
