use contracts::domain::a008_corporate_profile::aggregate::CorporateProfile;
use contracts::domain::common::PartnerStatus;
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;

use crate::domain::partner::{
    partner_row_actions, partner_status_badge, partner_status_options, PartnerRecord,
};
use crate::shared::crud::fields::{number_field, text_field};
use crate::shared::crud::{crud_screen, CrudResource, RowActions};
use crate::shared::format::format_money;
use crate::shared::lookups::Lookups;

impl PartnerRecord for CorporateProfile {
    fn partner_status(&self) -> PartnerStatus {
        self.status
    }

    fn set_partner_status(&mut self, status: PartnerStatus) {
        self.status = status;
    }
}

impl CrudResource for CorporateProfile {
    fn section() -> AdminSection {
        AdminSection::Corporate
    }

    fn columns() -> &'static [&'static str] {
        &["Company", "Contact", "Email", "Phone", "Credit limit", "Status"]
    }

    fn cells(&self, _lookups: &Lookups) -> Vec<AnyView> {
        vec![
            view! { <strong>{self.company_name.clone()}</strong> }.into_any(),
            self.contact_name.clone().into_any(),
            self.email.clone().into_any(),
            self.phone.clone().into_any(),
            format_money(self.credit_limit).into_any(),
            partner_status_badge(self.status),
        ]
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.company_name.clone(), self.email.clone()]
    }

    fn status_value(&self) -> Option<String> {
        Some(self.status.as_str().to_string())
    }

    fn status_options() -> Vec<(&'static str, &'static str)> {
        partner_status_options()
    }

    fn display_label(&self) -> String {
        self.company_name.clone()
    }

    fn form(draft: RwSignal<Self>, _lookups: RwSignal<Lookups>) -> AnyView {
        view! {
            {text_field(
                "Company name",
                move || draft.with(|d| d.company_name.clone()),
                move |v| draft.update(|d| d.company_name = v),
            )}
            {text_field(
                "Contact name",
                move || draft.with(|d| d.contact_name.clone()),
                move |v| draft.update(|d| d.contact_name = v),
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
            {text_field(
                "Address",
                move || draft.with(|d| d.address.clone()),
                move |v| draft.update(|d| d.address = v),
            )}
            {number_field(
                "Credit limit",
                move || draft.with(|d| d.credit_limit),
                move |v| draft.update(|d| d.credit_limit = v),
            )}
        }
        .into_any()
    }

    fn row_actions(&self, actions: RowActions<Self>) -> Option<AnyView> {
        Some(partner_row_actions(self, actions))
    }
}

/// Раздел "Corporate": корпоративные клиенты и их заявки
#[component]
pub fn CorporateManagement() -> impl IntoView {
    crud_screen::<CorporateProfile>()
}
