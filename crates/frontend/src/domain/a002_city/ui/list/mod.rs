use contracts::domain::a002_city::aggregate::City;
use contracts::shared::sections::AdminSection;
use contracts::system::functions::GeocodeResult;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::{functions, remote};
use crate::shared::components::badge::active_badge;
use crate::shared::crud::fields::{
    checkbox_field, optional_number_field, optional_text_field, required_reference_field,
    text_field,
};
use crate::shared::crud::{crud_screen, CrudResource};
use crate::shared::format::format_coords;
use crate::shared::icons::icon;
use crate::shared::lookups::{Lookups, NONE_LABEL};

/// Координаты по названию: сначала серверная функция `geocode`,
/// при пустом ответе или ошибке — nominatim из браузера
async fn locate_city(query: &str) -> Result<Option<GeocodeResult>, String> {
    match functions::geocode(query).await {
        Ok(response) if !response.results.is_empty() => {
            return Ok(response.results.into_iter().next());
        }
        Ok(_) => log::info!("geocode: no results for '{}', trying nominatim", query),
        Err(e) => log::warn!("geocode failed, trying nominatim: {}", e),
    }
    let results = remote::nominatim_search(query).await?;
    Ok(results.into_iter().next())
}

impl CrudResource for City {
    fn section() -> AdminSection {
        AdminSection::Cities
    }

    fn default_sort() -> &'static str {
        "name"
    }

    fn columns() -> &'static [&'static str] {
        &["City", "Country", "Coordinates", "Radius, km", "Status"]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<AnyView> {
        let coords = self
            .location()
            .map(|p| format_coords(p.lat, p.lng))
            .unwrap_or_else(|| NONE_LABEL.to_string());
        let radius = self
            .radius_km
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| NONE_LABEL.to_string());
        vec![
            view! { <strong>{self.name.clone()}</strong> }.into_any(),
            lookups.country_name(self.country_id).into_any(),
            coords.into_any(),
            radius.into_any(),
            active_badge(self.is_active),
        ]
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn status_value(&self) -> Option<String> {
        Some(if self.is_active { "active" } else { "inactive" }.to_string())
    }

    fn status_options() -> Vec<(&'static str, &'static str)> {
        vec![("active", "Active"), ("inactive", "Inactive")]
    }

    fn display_label(&self) -> String {
        self.name.clone()
    }

    fn form(draft: RwSignal<Self>, lookups: RwSignal<Lookups>) -> AnyView {
        let geocoding = RwSignal::new(false);
        let geo_error = RwSignal::new(None::<String>);

        let on_geocode = move |_| {
            let query = draft.with_untracked(|c| c.name.trim().to_string());
            if query.is_empty() {
                geo_error.set(Some("Enter a city name first".to_string()));
                return;
            }
            geo_error.set(None);
            geocoding.set(true);
            spawn_local(async move {
                match locate_city(&query).await {
                    Ok(Some(hit)) => draft.update(|c| {
                        c.latitude = Some(hit.latitude);
                        c.longitude = Some(hit.longitude);
                    }),
                    Ok(None) => geo_error.set(Some(format!("No location found for '{}'", query))),
                    Err(e) => geo_error.set(Some(e)),
                }
                geocoding.set(false);
            });
        };

        view! {
            {text_field(
                "City name",
                move || draft.with(|d| d.name.clone()),
                move |v| draft.update(|d| d.name = v),
            )}
            {required_reference_field(
                "Country",
                move || lookups.with(|l| l.country_options()),
                move || draft.with(|d| d.country_id),
                move |v| draft.update(|d| d.country_id = v),
            )}
            <div class="form__row form__row--align-end">
                {optional_number_field(
                    "Latitude",
                    move || draft.with(|d| d.latitude),
                    move |v| draft.update(|d| d.latitude = v),
                )}
                {optional_number_field(
                    "Longitude",
                    move || draft.with(|d| d.longitude),
                    move |v| draft.update(|d| d.longitude = v),
                )}
                <button
                    class="button button--secondary"
                    disabled=move || geocoding.get()
                    on:click=on_geocode
                >
                    {icon("map-pin")}
                    {move || if geocoding.get() { "Locating..." } else { "Geocode" }}
                </button>
            </div>
            {move || geo_error.get().map(|e| view! { <div class="form__hint form__hint--error">{e}</div> })}
            <div class="form__row">
                {optional_number_field(
                    "Service radius, km",
                    move || draft.with(|d| d.radius_km),
                    move |v| draft.update(|d| d.radius_km = v),
                )}
                {optional_text_field(
                    "Timezone",
                    move || draft.with(|d| d.timezone.clone()),
                    move |v| draft.update(|d| d.timezone = v),
                )}
            </div>
            {checkbox_field(
                "Active",
                move || draft.with(|d| d.is_active),
                move |v| draft.update(|d| d.is_active = v),
            )}
        }
        .into_any()
    }
}

#[component]
pub fn CitiesManagement() -> impl IntoView {
    crud_screen::<City>()
}
