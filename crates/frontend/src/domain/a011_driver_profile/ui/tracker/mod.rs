//! Раздел "Driver Tracking": запись координат устройства в профиль водителя.
//!
//! Позиция приходит из `navigator.geolocation.watchPosition`. Запись идёт
//! не чаще одного раза за `LOCATION_UPDATE_INTERVAL_MS`: в профиль водителя
//! и, если есть, в его активную поездку. При уходе со страницы наблюдение
//! снимается.

use chrono::{DateTime, Utc};
use contracts::domain::a011_driver_profile::aggregate::DriverProfile;
use contracts::domain::a011_driver_profile::location::{
    FixReport, LocationFix, LocationThrottle, LOCATION_UPDATE_INTERVAL_MS,
};
use contracts::domain::a013_ride::aggregate::Ride;
use contracts::domain::common::EntityRecord;
use contracts::shared::list_query::ListParams;
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{Map, Value};
use uuid::Uuid;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::shared::api::entities::EntityApi;
use crate::shared::format::{format_coords, format_datetime};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::query_cache::use_query_cache;

/// `position.coords` из колбэка watchPosition
fn read_fix(position: &JsValue) -> Option<LocationFix> {
    let coords = js_sys::Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    let number = |name: &str| {
        js_sys::Reflect::get(&coords, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_f64())
    };
    Some(LocationFix {
        latitude: number("latitude")?,
        longitude: number("longitude")?,
        accuracy: number("accuracy"),
    })
}

fn geolocation_error(error: &JsValue) -> String {
    js_sys::Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| "Location unavailable".to_string())
}

async fn write_driver(driver_id: Uuid, fix: &LocationFix, at: DateTime<Utc>) -> Result<(), String> {
    let drivers = EntityApi::<DriverProfile>::new();
    let id = driver_id.to_string();
    let mut driver = drivers.get(&id).await?;
    driver.apply_location(fix, at);
    driver.is_online = true;
    drivers.update(&id, &driver).await.map(|_| ())
}

async fn load_active_ride(driver_id: Uuid, fix: &LocationFix) -> Result<Option<Ride>, String> {
    let mut query = Map::new();
    query.insert("driver_id".to_string(), Value::String(driver_id.to_string()));
    let rides = EntityApi::<Ride>::new().filter(&query).await?;
    Ok(Ride::track_driver(&rides, driver_id, fix.point()))
}

/// Записать координаты водителю и в его активную поездку.
///
/// Записи независимы: сбой одной не мешает другой.
async fn persist_fix(driver_id: Uuid, fix: LocationFix, at: DateTime<Utc>) -> FixReport {
    let mut report = FixReport::default();
    report.driver_written(write_driver(driver_id, &fix, at).await);
    match load_active_ride(driver_id, &fix).await {
        Ok(Some(ride)) => {
            let id = ride.id();
            let result = EntityApi::<Ride>::new()
                .update(&id.to_string(), &ride)
                .await
                .map(|_| ());
            report.ride_written(id, result);
        }
        Ok(None) => {}
        Err(e) => report.ride_lookup_failed(e),
    }
    report
}

type PositionCallback = Closure<dyn FnMut(JsValue)>;

#[component]
pub fn DriverTracker() -> impl IntoView {
    let cache = use_query_cache();

    let drivers = RwSignal::new(Vec::<DriverProfile>::new());
    let selected = RwSignal::new(None::<Uuid>);
    let watch_id = RwSignal::new(None::<i32>);
    let last_fix = RwSignal::new(None::<LocationFix>);
    let last_write = RwSignal::new(None::<DateTime<Utc>>);
    let active_ride = RwSignal::new(None::<Uuid>);
    let error = RwSignal::new(None::<String>);

    let throttle = StoredValue::new(LocationThrottle::default());
    // Колбэки должны жить, пока активно наблюдение
    let callbacks = StoredValue::new_local(None::<(PositionCallback, PositionCallback)>);

    Effect::new(move |_| {
        cache.version(&DriverProfile::query_key());
        spawn_local(async move {
            match EntityApi::<DriverProfile>::new()
                .list(&ListParams::sorted("full_name"))
                .await
            {
                Ok(list) => drivers.set(list),
                Err(e) => error.set(Some(format!("Failed to load drivers: {}", e))),
            }
        });
    });

    let stop = move || {
        if let Some(id) = watch_id.get_untracked() {
            if let Some(geo) = web_sys::window().and_then(|w| w.navigator().geolocation().ok()) {
                geo.clear_watch(id);
            }
            log::info!("Location watch {} cleared", id);
        }
        watch_id.set(None);
        callbacks.set_value(None);
        throttle.update_value(|t| t.reset());
    };

    let start = move || {
        let Some(driver_id) = selected.get_untracked() else {
            error.set(Some("Select a driver first".to_string()));
            return;
        };
        let Some(geo) = web_sys::window().and_then(|w| w.navigator().geolocation().ok()) else {
            error.set(Some("Geolocation is not supported by this browser".to_string()));
            return;
        };
        error.set(None);

        let on_position: PositionCallback = Closure::new(move |position: JsValue| {
            let Some(fix) = read_fix(&position) else {
                return;
            };
            last_fix.set(Some(fix));
            let accepted = throttle
                .try_update_value(|t| t.accept(js_sys::Date::now()))
                .unwrap_or(false);
            if !accepted {
                return;
            }
            spawn_local(async move {
                let at = Utc::now();
                let report = persist_fix(driver_id, fix, at).await;
                if report.driver_saved {
                    last_write.set(Some(at));
                }
                active_ride.set(report.ride_id);
                if let Some(e) = report.error_message() {
                    log::warn!("Failed to store driver location: {}", e);
                    error.set(Some(e));
                }
            });
        });
        let on_error: PositionCallback = Closure::new(move |e: JsValue| {
            error.set(Some(geolocation_error(&e)));
        });

        match geo.watch_position_with_error_callback(
            on_position.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
        ) {
            Ok(id) => {
                log::info!("Tracking driver {} (watch {})", driver_id, id);
                watch_id.set(Some(id));
                callbacks.set_value(Some((on_position, on_error)));
            }
            Err(e) => error.set(Some(geolocation_error(&e))),
        }
    };

    on_cleanup(stop);

    let driver_options = move || {
        drivers
            .get()
            .into_iter()
            .map(|d| {
                let label = format!("{} · {}", d.full_name, d.vehicle_label());
                view! { <option value=d.id().to_string()>{label}</option> }
            })
            .collect_view()
    };

    let tracking = move || watch_id.get().is_some();

    view! {
        <PageFrame
            section=AdminSection::DriverTracking
            subtitle=format!(
                "Device position is stored at most once every {} seconds",
                (LOCATION_UPDATE_INTERVAL_MS / 1000.0) as u32
            )
        >
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <div class="filter-bar">
                <select
                    class="form__input"
                    disabled=tracking
                    prop:value=move || selected.get().map(|id| id.to_string()).unwrap_or_default()
                    on:change=move |ev| selected.set(Uuid::parse_str(&event_target_value(&ev)).ok())
                >
                    <option value="">"Select a driver..."</option>
                    {driver_options}
                </select>
                <Show
                    when=tracking
                    fallback=move || view! {
                        <button class="button button--primary" on:click=move |_| start()>
                            {icon("navigation")}
                            "Start tracking"
                        </button>
                    }
                >
                    <button class="button button--danger" on:click=move |_| stop()>
                        {icon("x")}
                        "Stop tracking"
                    </button>
                </Show>
            </div>
            <div class="tracker">
                <div class="tracker__row">
                    <span class="tracker__label">"Status"</span>
                    <span>{move || if tracking() { "Watching device position" } else { "Idle" }}</span>
                </div>
                <div class="tracker__row">
                    <span class="tracker__label">"Last position"</span>
                    <span>
                        {move || match last_fix.get() {
                            Some(fix) => {
                                let accuracy = fix
                                    .accuracy
                                    .map(|a| format!(" (±{:.0} m)", a))
                                    .unwrap_or_default();
                                format!("{}{}", format_coords(fix.latitude, fix.longitude), accuracy)
                            }
                            None => "—".to_string(),
                        }}
                    </span>
                </div>
                <div class="tracker__row">
                    <span class="tracker__label">"Last saved"</span>
                    <span>{move || last_write.get().as_ref().map(format_datetime).unwrap_or_else(|| "—".to_string())}</span>
                </div>
                <div class="tracker__row">
                    <span class="tracker__label">"Active ride"</span>
                    <span>{move || active_ride.get().map(|id| id.to_string()).unwrap_or_else(|| "None".to_string())}</span>
                </div>
            </div>
        </PageFrame>
    }
}
