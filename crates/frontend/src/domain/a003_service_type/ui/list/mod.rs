use contracts::domain::a003_service_type::aggregate::ServiceType;
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;

use crate::shared::api_utils::asset_url;
use crate::shared::components::badge::active_badge;
use crate::shared::crud::fields::{
    checkbox_field, integer_field, number_field, optional_text_field, text_field,
};
use crate::shared::crud::{crud_screen, CrudResource};
use crate::shared::lookups::Lookups;

impl CrudResource for ServiceType {
    fn section() -> AdminSection {
        AdminSection::ServiceTypes
    }

    fn default_sort() -> &'static str {
        "sort_order"
    }

    fn columns() -> &'static [&'static str] {
        &["", "Name", "Seats", "Cities", "Order", "Status"]
    }

    fn cells(&self, _lookups: &Lookups) -> Vec<AnyView> {
        let icon = self
            .icon_url
            .as_deref()
            .map(|url| view! { <img class="table__thumb" src=asset_url(url) alt="" /> });
        vec![
            icon.into_any(),
            view! {
                <div>
                    <strong>{self.name.clone()}</strong>
                    <div class="table__muted">{self.description.clone()}</div>
                </div>
            }
            .into_any(),
            self.seats.to_string().into_any(),
            self.city_ids.len().to_string().into_any(),
            self.sort_order.to_string().into_any(),
            active_badge(self.is_active),
        ]
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone(), self.description.clone()]
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

    fn form(draft: RwSignal<Self>, _lookups: RwSignal<Lookups>) -> AnyView {
        view! {
            {text_field(
                "Name",
                move || draft.with(|d| d.name.clone()),
                move |v| draft.update(|d| d.name = v),
            )}
            {text_field(
                "Description",
                move || draft.with(|d| d.description.clone()),
                move |v| draft.update(|d| d.description = v),
            )}
            {optional_text_field(
                "Icon URL",
                move || draft.with(|d| d.icon_url.clone()),
                move |v| draft.update(|d| d.icon_url = v),
            )}
            <div class="form__row">
                {integer_field(
                    "Seats",
                    move || draft.with(|d| d.seats),
                    move |v| draft.update(|d| d.seats = v),
                )}
                {number_field(
                    "Sort order",
                    move || draft.with(|d| d.sort_order as f64),
                    move |v| draft.update(|d| d.sort_order = v.round() as i32),
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
pub fn ServiceTypesManagement() -> impl IntoView {
    crud_screen::<ServiceType>()
}
