use contracts::domain::a005_zone::aggregate::{Zone, ZoneKind};
use contracts::domain::common::GeoPoint;
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;

use crate::shared::components::badge::{active_badge, StatusBadge};
use crate::shared::crud::fields::{checkbox_field, required_reference_field, select_field, text_field};
use crate::shared::crud::{crud_screen, CrudResource};
use crate::shared::lookups::Lookups;

fn kind_id(kind: ZoneKind) -> &'static str {
    match kind {
        ZoneKind::Regular => "regular",
        ZoneKind::Airport => "airport",
    }
}

/// Полигон в поле формы: точки `lat,lng` через `;`
pub fn format_polygon(points: &[GeoPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.lat, p.lng))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn parse_polygon(raw: &str) -> Result<Vec<GeoPoint>, String> {
    raw.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (lat, lng) = part
                .split_once(',')
                .ok_or_else(|| format!("'{}' is not a lat,lng pair", part))?;
            let lat: f64 = lat
                .trim()
                .parse()
                .map_err(|_| format!("Invalid latitude in '{}'", part))?;
            let lng: f64 = lng
                .trim()
                .parse()
                .map_err(|_| format!("Invalid longitude in '{}'", part))?;
            Ok(GeoPoint::new(lat, lng))
        })
        .collect()
}

impl CrudResource for Zone {
    fn section() -> AdminSection {
        AdminSection::Zones
    }

    fn default_sort() -> &'static str {
        "name"
    }

    fn columns() -> &'static [&'static str] {
        &["Zone", "City", "Type", "Points", "Status"]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<AnyView> {
        let kind = kind_id(self.kind);
        vec![
            view! { <strong>{self.name.clone()}</strong> }.into_any(),
            lookups.city_name(Some(self.city_id)).into_any(),
            view! { <StatusBadge status=kind /> }.into_any(),
            self.polygon.len().to_string().into_any(),
            active_badge(self.is_active),
        ]
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn status_value(&self) -> Option<String> {
        Some(kind_id(self.kind).to_string())
    }

    fn status_options() -> Vec<(&'static str, &'static str)> {
        vec![("regular", "Regular"), ("airport", "Airport")]
    }

    fn display_label(&self) -> String {
        self.name.clone()
    }

    fn form(draft: RwSignal<Self>, lookups: RwSignal<Lookups>) -> AnyView {
        let polygon_text = RwSignal::new(draft.with_untracked(|z| format_polygon(&z.polygon)));
        let polygon_error = RwSignal::new(None::<String>);

        let on_polygon = move |ev| {
            let raw = event_target_value(&ev);
            match parse_polygon(&raw) {
                Ok(points) => {
                    polygon_error.set(None);
                    draft.update(|z| z.polygon = points);
                }
                Err(e) => polygon_error.set(Some(e)),
            }
            polygon_text.set(raw);
        };

        view! {
            {text_field(
                "Zone name",
                move || draft.with(|d| d.name.clone()),
                move |v| draft.update(|d| d.name = v),
            )}
            {required_reference_field(
                "City",
                move || lookups.with(|l| l.city_options()),
                move || draft.with(|d| d.city_id),
                move |v| draft.update(|d| d.city_id = v),
            )}
            {select_field(
                "Type",
                || vec![
                    ("regular".to_string(), "Regular".to_string()),
                    ("airport".to_string(), "Airport".to_string()),
                ],
                move || kind_id(draft.with(|d| d.kind)).to_string(),
                move |v| draft.update(|d| {
                    d.kind = if v == "airport" { ZoneKind::Airport } else { ZoneKind::Regular }
                }),
            )}
            <label class="form__group">
                <span class="form__label">"Polygon (lat,lng; lat,lng; ...)"</span>
                <textarea
                    class="form__input"
                    rows="3"
                    prop:value=move || polygon_text.get()
                    on:input=on_polygon
                />
            </label>
            {move || polygon_error.get().map(|e| view! { <div class="form__hint form__hint--error">{e}</div> })}
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
pub fn ZonesManagement() -> impl IntoView {
    crud_screen::<Zone>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_polygon() {
        let points = parse_polygon("40.1, -73.5; 40.2,-73.6 ;40.3,-73.4;").unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], GeoPoint::new(40.2, -73.6));
        assert_eq!(format_polygon(&points[..1]), "40.1,-73.5");
    }

    #[test]
    fn test_parse_polygon_rejects_garbage() {
        assert!(parse_polygon("40.1").is_err());
        assert!(parse_polygon("north,-73.5").is_err());
        assert_eq!(parse_polygon("  ").unwrap(), Vec::<GeoPoint>::new());
    }
}
