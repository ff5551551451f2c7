use contracts::domain::a010_dispatcher_profile::aggregate::DispatcherProfile;
use contracts::domain::common::PartnerStatus;
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;

use crate::domain::partner::{
    partner_row_actions, partner_status_badge, partner_status_options, PartnerRecord,
};
use crate::shared::crud::fields::{reference_field, text_field};
use crate::shared::crud::{crud_screen, CrudResource, RowActions};
use crate::shared::lookups::Lookups;

impl PartnerRecord for DispatcherProfile {
    fn partner_status(&self) -> PartnerStatus {
        self.status
    }

    fn set_partner_status(&mut self, status: PartnerStatus) {
        self.status = status;
    }
}

impl CrudResource for DispatcherProfile {
    fn section() -> AdminSection {
        AdminSection::Dispatchers
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Phone", "City", "Status"]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<AnyView> {
        vec![
            view! { <strong>{self.full_name.clone()}</strong> }.into_any(),
            self.email.clone().into_any(),
            self.phone.clone().into_any(),
            lookups.city_name(self.city_id).into_any(),
            partner_status_badge(self.status),
        ]
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.full_name.clone(), self.email.clone()]
    }

    fn status_value(&self) -> Option<String> {
        Some(self.status.as_str().to_string())
    }

    fn status_options() -> Vec<(&'static str, &'static str)> {
        partner_status_options()
    }

    fn display_label(&self) -> String {
        self.full_name.clone()
    }

    fn form(draft: RwSignal<Self>, lookups: RwSignal<Lookups>) -> AnyView {
        view! {
            {text_field(
                "Full name",
                move || draft.with(|d| d.full_name.clone()),
                move |v| draft.update(|d| d.full_name = v),
            )}
            <div class="form__row">
                {text_field(
                    "Email",
                    move || draft.with(|d| d.email.clone()),
                    move |v| draft.update(|d| d.email = v),
                )}
                {text_field(
                    "Phone",
                    move || draft.with(|d| d.phone.clone()),
                    move |v| draft.update(|d| d.phone = v),
                )}
            </div>
            {reference_field(
                "City",
                move || lookups.with(|l| l.city_options()),
                move || draft.with(|d| d.city_id),
                move |v| draft.update(|d| d.city_id = v),
            )}
        }
        .into_any()
    }

    fn row_actions(&self, actions: RowActions<Self>) -> Option<AnyView> {
        Some(partner_row_actions(self, actions))
    }
}

#[component]
pub fn DispatchersManagement() -> impl IntoView {
    crud_screen::<DispatcherProfile>()
}
