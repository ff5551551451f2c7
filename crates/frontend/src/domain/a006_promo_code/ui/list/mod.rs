use chrono::Utc;
use contracts::domain::a006_promo_code::aggregate::{DiscountType, PromoCode};
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;

use crate::shared::components::badge::StatusBadge;
use crate::shared::crud::fields::{
    checkbox_field, number_field, optional_date_field, optional_number_field, reference_field,
    select_field, text_field,
};
use crate::shared::crud::{crud_screen, CrudResource};
use crate::shared::format::format_date;
use crate::shared::lookups::{Lookups, NONE_LABEL};

/// Состояние кода для бейджа и фильтра
fn promo_state(promo: &PromoCode) -> &'static str {
    if !promo.is_active {
        "inactive"
    } else if promo.is_redeemable(Utc::now()) {
        "active"
    } else {
        "expired"
    }
}

fn validity(promo: &PromoCode) -> String {
    let from = promo.valid_from.as_ref().map(format_date);
    let until = promo.valid_until.as_ref().map(format_date);
    match (from, until) {
        (None, None) => "Always".to_string(),
        (Some(f), None) => format!("from {}", f),
        (None, Some(u)) => format!("until {}", u),
        (Some(f), Some(u)) => format!("{} – {}", f, u),
    }
}

impl CrudResource for PromoCode {
    fn section() -> AdminSection {
        AdminSection::PromoCodes
    }

    fn columns() -> &'static [&'static str] {
        &["Code", "Discount", "Usage", "Valid", "City", "Status"]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<AnyView> {
        let usage = match self.max_uses {
            Some(max) => format!("{} / {}", self.used_count, max),
            None => format!("{} / ∞", self.used_count),
        };
        let city = if self.city_id.is_some() {
            lookups.city_name(self.city_id)
        } else {
            NONE_LABEL.to_string()
        };
        let state = promo_state(self);
        vec![
            view! { <code class="promo-code">{self.code.clone()}</code> }.into_any(),
            self.discount_label().into_any(),
            usage.into_any(),
            validity(self).into_any(),
            city.into_any(),
            view! { <StatusBadge status=state /> }.into_any(),
        ]
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.code.clone()]
    }

    fn status_value(&self) -> Option<String> {
        Some(promo_state(self).to_string())
    }

    fn status_options() -> Vec<(&'static str, &'static str)> {
        vec![
            ("active", "Active"),
            ("expired", "Expired"),
            ("inactive", "Inactive"),
        ]
    }

    fn display_label(&self) -> String {
        self.code.clone()
    }

    fn form(draft: RwSignal<Self>, lookups: RwSignal<Lookups>) -> AnyView {
        view! {
            {text_field(
                "Code",
                move || draft.with(|d| d.code.clone()),
                move |v| draft.update(|d| d.code = v.trim().to_uppercase()),
            )}
            <div class="form__row">
                {select_field(
                    "Discount type",
                    || vec![
                        ("percent".to_string(), "Percent".to_string()),
                        ("fixed".to_string(), "Fixed amount".to_string()),
                    ],
                    move || match draft.with(|d| d.discount_type) {
                        DiscountType::Percent => "percent".to_string(),
                        DiscountType::Fixed => "fixed".to_string(),
                    },
                    move |v| draft.update(|d| {
                        d.discount_type = if v == "fixed" { DiscountType::Fixed } else { DiscountType::Percent }
                    }),
                )}
                {number_field(
                    "Discount value",
                    move || draft.with(|d| d.discount_value),
                    move |v| draft.update(|d| d.discount_value = v),
                )}
            </div>
            {optional_number_field(
                "Max uses (empty for unlimited)",
                move || draft.with(|d| d.max_uses.map(f64::from)),
                move |v| draft.update(|d| d.max_uses = v.map(|n| n.max(0.0).round() as u32)),
            )}
            <div class="form__row">
                {optional_date_field(
                    "Valid from",
                    move || draft.with(|d| d.valid_from),
                    move |v| draft.update(|d| d.valid_from = v),
                )}
                {optional_date_field(
                    "Valid until",
                    move || draft.with(|d| d.valid_until),
                    move |v| draft.update(|d| d.valid_until = v),
                )}
            </div>
            {reference_field(
                "City (empty for all cities)",
                move || lookups.with(|l| l.city_options()),
                move || draft.with(|d| d.city_id),
                move |v| draft.update(|d| d.city_id = v),
            )}
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
pub fn PromoCodesManagement() -> impl IntoView {
    crud_screen::<PromoCode>()
}
