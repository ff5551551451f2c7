use contracts::domain::a012_user::aggregate::{User, UserRole, UserStatus};
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;

use crate::shared::components::badge::StatusBadge;
use crate::shared::crud::fields::{reference_field, select_field, text_field};
use crate::shared::crud::{crud_screen, CrudResource, RowActions};
use crate::shared::lookups::Lookups;

fn role_id(role: UserRole) -> &'static str {
    match role {
        UserRole::User => "user",
        UserRole::Driver => "driver",
        UserRole::Admin => "admin",
    }
}

fn status_id(status: UserStatus) -> &'static str {
    match status {
        UserStatus::Active => "active",
        UserStatus::Blocked => "blocked",
    }
}

impl CrudResource for User {
    fn section() -> AdminSection {
        AdminSection::Users
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Phone", "Role", "City", "Status"]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<AnyView> {
        let status = status_id(self.status);
        vec![
            view! { <strong>{self.full_name.clone()}</strong> }.into_any(),
            self.email.clone().into_any(),
            self.phone.clone().into_any(),
            role_id(self.role).into_any(),
            lookups.city_name(self.city_id).into_any(),
            view! { <StatusBadge status=status /> }.into_any(),
        ]
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.full_name.clone(), self.email.clone(), self.phone.clone()]
    }

    fn status_value(&self) -> Option<String> {
        Some(status_id(self.status).to_string())
    }

    fn status_options() -> Vec<(&'static str, &'static str)> {
        vec![("active", "Active"), ("blocked", "Blocked")]
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
            <div class="form__row">
                {select_field(
                    "Role",
                    || {
                        [UserRole::User, UserRole::Driver, UserRole::Admin]
                            .into_iter()
                            .map(|r| (role_id(r).to_string(), role_id(r).to_string()))
                            .collect()
                    },
                    move || role_id(draft.with(|d| d.role)).to_string(),
                    move |v| draft.update(|d| {
                        d.role = match v.as_str() {
                            "driver" => UserRole::Driver,
                            "admin" => UserRole::Admin,
                            _ => UserRole::User,
                        }
                    }),
                )}
                {reference_field(
                    "City",
                    move || lookups.with(|l| l.city_options()),
                    move || draft.with(|d| d.city_id),
                    move |v| draft.update(|d| d.city_id = v),
                )}
            </div>
        }
        .into_any()
    }

    fn row_actions(&self, actions: RowActions<Self>) -> Option<AnyView> {
        let mut changed = self.clone();
        let (label, class) = match self.status {
            UserStatus::Active => {
                changed.status = UserStatus::Blocked;
                ("Block", "button button--small button--danger")
            }
            UserStatus::Blocked => {
                changed.status = UserStatus::Active;
                ("Unblock", "button button--small button--success")
            }
        };
        Some(
            view! {
                <button class=class on:click=move |_| actions.update.run(changed.clone())>
                    {label}
                </button>
            }
            .into_any(),
        )
    }
}

#[component]
pub fn UsersManagement() -> impl IntoView {
    crud_screen::<User>()
}
