use contracts::domain::a011_driver_profile::aggregate::{DriverProfile, DriverStatus};
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;

use crate::shared::components::badge::StatusBadge;
use crate::shared::crud::fields::{reference_field, select_field, text_field};
use crate::shared::crud::{crud_screen, CrudResource, RowActions};
use crate::shared::format::format_datetime;
use crate::shared::lookups::{Lookups, NONE_LABEL};

fn review_class(next: DriverStatus) -> &'static str {
    match next {
        DriverStatus::Approved => "button button--small button--success",
        DriverStatus::Suspended => "button button--small button--warning",
        DriverStatus::Rejected | DriverStatus::Pending => "button button--small button--danger",
    }
}

impl CrudResource for DriverProfile {
    fn section() -> AdminSection {
        AdminSection::Drivers
    }

    fn columns() -> &'static [&'static str] {
        &["Driver", "Vehicle", "Service", "City", "Online", "Rating", "Status"]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<AnyView> {
        let online = if self.is_online {
            let seen = self
                .last_location_update
                .as_ref()
                .map(format_datetime)
                .unwrap_or_default();
            view! { <span title=seen><StatusBadge status="online" label="Online" /></span> }.into_any()
        } else {
            view! { <StatusBadge status="offline" label="Offline" /> }.into_any()
        };
        let rating = self
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| NONE_LABEL.to_string());
        vec![
            view! {
                <div>
                    <strong>{self.full_name.clone()}</strong>
                    <div class="table__muted">{self.phone.clone()}</div>
                </div>
            }
            .into_any(),
            self.vehicle_label().into_any(),
            lookups.service_type_name(self.service_type_id).into_any(),
            lookups.city_name(self.city_id).into_any(),
            online,
            rating.into_any(),
            view! { <StatusBadge status=self.status.as_str() label=self.status.label() /> }.into_any(),
        ]
    }

    fn search_text(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.phone.clone(),
            self.vehicle_plate.clone(),
        ]
    }

    fn status_value(&self) -> Option<String> {
        Some(self.status.as_str().to_string())
    }

    fn status_options() -> Vec<(&'static str, &'static str)> {
        DriverStatus::all()
            .iter()
            .map(|s| (s.as_str(), s.label()))
            .collect()
    }

    fn display_label(&self) -> String {
        self.full_name.clone()
    }

    fn form(draft: RwSignal<Self>, lookups: RwSignal<Lookups>) -> AnyView {
        view! {
            <div class="form__row">
                {text_field(
                    "Full name",
                    move || draft.with(|d| d.full_name.clone()),
                    move |v| draft.update(|d| d.full_name = v),
                )}
                {text_field(
                    "Phone",
                    move || draft.with(|d| d.phone.clone()),
                    move |v| draft.update(|d| d.phone = v),
                )}
            </div>
            <div class="form__row">
                {text_field(
                    "Email",
                    move || draft.with(|d| d.email.clone()),
                    move |v| draft.update(|d| d.email = v),
                )}
                {text_field(
                    "License number",
                    move || draft.with(|d| d.license_number.clone()),
                    move |v| draft.update(|d| d.license_number = v),
                )}
            </div>
            <div class="form__row">
                {text_field(
                    "Vehicle make",
                    move || draft.with(|d| d.vehicle_make.clone()),
                    move |v| draft.update(|d| d.vehicle_make = v),
                )}
                {text_field(
                    "Vehicle model",
                    move || draft.with(|d| d.vehicle_model.clone()),
                    move |v| draft.update(|d| d.vehicle_model = v),
                )}
            </div>
            <div class="form__row">
                {text_field(
                    "Plate",
                    move || draft.with(|d| d.vehicle_plate.clone()),
                    move |v| draft.update(|d| d.vehicle_plate = v),
                )}
                {text_field(
                    "Color",
                    move || draft.with(|d| d.vehicle_color.clone()),
                    move |v| draft.update(|d| d.vehicle_color = v),
                )}
            </div>
            <div class="form__row">
                {reference_field(
                    "Service type",
                    move || lookups.with(|l| l.service_type_options()),
                    move || draft.with(|d| d.service_type_id),
                    move |v| draft.update(|d| d.service_type_id = v),
                )}
                {reference_field(
                    "City",
                    move || lookups.with(|l| l.city_options()),
                    move || draft.with(|d| d.city_id),
                    move |v| draft.update(|d| d.city_id = v),
                )}
            </div>
            {select_field(
                "Status",
                || {
                    DriverStatus::all()
                        .iter()
                        .map(|s| (s.as_str().to_string(), s.label().to_string()))
                        .collect()
                },
                move || draft.with(|d| d.status.as_str().to_string()),
                move |v| {
                    if let Some(status) = DriverStatus::from_str(&v) {
                        draft.update(|d| d.status = status);
                    }
                },
            )}
        }
        .into_any()
    }

    fn row_actions(&self, actions: RowActions<Self>) -> Option<AnyView> {
        let buttons = self
            .status
            .review_actions()
            .iter()
            .map(|(label, next)| {
                let mut changed = self.clone();
                changed.status = *next;
                view! {
                    <button
                        class=review_class(*next)
                        on:click=move |_| actions.update.run(changed.clone())
                    >
                        {*label}
                    </button>
                }
            })
            .collect_view();
        Some(buttons.into_any())
    }
}

#[component]
pub fn DriversManagement() -> impl IntoView {
    crud_screen::<DriverProfile>()
}
