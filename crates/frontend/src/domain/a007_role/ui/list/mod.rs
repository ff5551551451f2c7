//! Роли и права: чек-лист разделов админки для каждой роли.

use contracts::domain::a007_role::aggregate::Role;
use contracts::domain::common::EntityRecord;
use contracts::shared::delete_flow::friendly_error;
use contracts::shared::sections::{AdminSection, SectionGroup};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::admins;
use crate::shared::components::badge::StatusBadge;
use crate::shared::crud::fields::text_field;
use crate::shared::crud::{crud_screen, CrudResource, CrudServices};
use crate::shared::icons::icon;
use crate::shared::lookups::Lookups;

/// Чек-лист разделов, сгруппированный как боковое меню
fn permission_checklist(draft: RwSignal<Role>) -> AnyView {
    SectionGroup::all()
        .into_iter()
        .map(|group| {
            view! {
                <fieldset class="permissions__group">
                    <legend>{group.label()}</legend>
                    {group
                        .sections()
                        .into_iter()
                        .map(|section| {
                            view! {
                                <label class="form__check">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || draft.with(|r| r.allows(section))
                                        on:change=move |_| draft.update(|r| r.toggle_permission(section))
                                    />
                                    <span>{section.label()}</span>
                                </label>
                            }
                        })
                        .collect_view()}
                </fieldset>
            }
        })
        .collect_view()
        .into_any()
}

/// Кнопка `Role.seed`
fn seed_button() -> AnyView {
    let CrudServices { cache, toast, .. } = CrudServices::use_services();
    let seeding = RwSignal::new(false);

    let on_seed = move |_| {
        seeding.set(true);
        spawn_local(async move {
            match admins::seed_roles().await {
                Ok(result) => {
                    toast.success(format!("Default roles installed: {} created", result.created));
                    cache.invalidate(&Role::query_key());
                }
                Err(e) => toast.error(friendly_error(&e)),
            }
            seeding.set(false);
        });
    };

    view! {
        <button
            class="button button--secondary"
            disabled=move || seeding.get()
            on:click=on_seed
        >
            {icon("refresh")}
            {move || if seeding.get() { "Seeding..." } else { "Seed default roles" }}
        </button>
    }
    .into_any()
}

impl CrudResource for Role {
    fn section() -> AdminSection {
        AdminSection::Roles
    }

    fn default_sort() -> &'static str {
        "name"
    }

    fn columns() -> &'static [&'static str] {
        &["Role", "Description", "Permissions", "Type"]
    }

    fn cells(&self, _lookups: &Lookups) -> Vec<AnyView> {
        let kind = if self.is_system {
            view! { <StatusBadge status="system" label="System" /> }.into_any()
        } else {
            view! { <StatusBadge status="custom" label="Custom" /> }.into_any()
        };
        vec![
            view! { <strong>{self.name.clone()}</strong> }.into_any(),
            self.description.clone().into_any(),
            format!("{} of {}", self.permissions.len(), AdminSection::all().len()).into_any(),
            kind,
        ]
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone(), self.description.clone()]
    }

    fn display_label(&self) -> String {
        self.name.clone()
    }

    fn can_delete(&self) -> bool {
        !self.is_system
    }

    fn form(draft: RwSignal<Self>, _lookups: RwSignal<Lookups>) -> AnyView {
        view! {
            {text_field(
                "Role name",
                move || draft.with(|d| d.name.clone()),
                move |v| draft.update(|d| d.name = v),
            )}
            {text_field(
                "Description",
                move || draft.with(|d| d.description.clone()),
                move |v| draft.update(|d| d.description = v),
            )}
            <div class="form__group">
                <span class="form__label">"Permissions"</span>
                <div class="permissions">{permission_checklist(draft)}</div>
            </div>
        }
        .into_any()
    }

    fn toolbar() -> Option<AnyView> {
        Some(seed_button())
    }
}

#[component]
pub fn RolesManagement() -> impl IntoView {
    crud_screen::<Role>()
}
