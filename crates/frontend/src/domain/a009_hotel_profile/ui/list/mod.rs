use contracts::domain::a009_hotel_profile::aggregate::HotelProfile;
use contracts::domain::common::PartnerStatus;
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;

use crate::domain::partner::{
    partner_row_actions, partner_status_badge, partner_status_options, PartnerRecord,
};
use crate::shared::crud::fields::{number_field, reference_field, text_field};
use crate::shared::crud::{crud_screen, CrudResource, RowActions};
use crate::shared::format::format_percent;
use crate::shared::lookups::Lookups;

impl PartnerRecord for HotelProfile {
    fn partner_status(&self) -> PartnerStatus {
        self.status
    }

    fn set_partner_status(&mut self, status: PartnerStatus) {
        self.status = status;
    }
}

impl CrudResource for HotelProfile {
    fn section() -> AdminSection {
        AdminSection::Hotels
    }

    fn columns() -> &'static [&'static str] {
        &["Hotel", "City", "Contact", "Email", "Commission", "Status"]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<AnyView> {
        vec![
            view! { <strong>{self.hotel_name.clone()}</strong> }.into_any(),
            lookups.city_name(self.city_id).into_any(),
            self.contact_name.clone().into_any(),
            self.email.clone().into_any(),
            format_percent(self.commission_percent).into_any(),
            partner_status_badge(self.status),
        ]
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.hotel_name.clone(), self.email.clone()]
    }

    fn status_value(&self) -> Option<String> {
        Some(self.status.as_str().to_string())
    }

    fn status_options() -> Vec<(&'static str, &'static str)> {
        partner_status_options()
    }

    fn display_label(&self) -> String {
        self.hotel_name.clone()
    }

    fn form(draft: RwSignal<Self>, lookups: RwSignal<Lookups>) -> AnyView {
        view! {
            {text_field(
                "Hotel name",
                move || draft.with(|d| d.hotel_name.clone()),
                move |v| draft.update(|d| d.hotel_name = v),
            )}
            {reference_field(
                "City",
                move || lookups.with(|l| l.city_options()),
                move || draft.with(|d| d.city_id),
                move |v| draft.update(|d| d.city_id = v),
            )}
            <div class="form__row">
                {text_field(
                    "Contact name",
                    move || draft.with(|d| d.contact_name.clone()),
                    move |v| draft.update(|d| d.contact_name = v),
                )}
                {text_field(
                    "Phone",
                    move || draft.with(|d| d.phone.clone()),
                    move |v| draft.update(|d| d.phone = v),
                )}
            </div>
            {text_field(
                "Email",
                move || draft.with(|d| d.email.clone()),
                move |v| draft.update(|d| d.email = v),
            )}
            {text_field(
                "Address",
                move || draft.with(|d| d.address.clone()),
                move |v| draft.update(|d| d.address = v),
            )}
            {number_field(
                "Commission, %",
                move || draft.with(|d| d.commission_percent),
                move |v| draft.update(|d| d.commission_percent = v),
            )}
        }
        .into_any()
    }

    fn row_actions(&self, actions: RowActions<Self>) -> Option<AnyView> {
        Some(partner_row_actions(self, actions))
    }
}

#[component]
pub fn HotelsManagement() -> impl IntoView {
    crud_screen::<HotelProfile>()
}
