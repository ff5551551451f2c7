use contracts::shared::delete_flow::friendly_error;
use contracts::shared::list_query::matches_search;
use contracts::shared::sections::AdminSection;
use contracts::system::admins::{can_upgrade_to_super_admin, Admin};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::api::admins;
use crate::shared::components::badge::{active_badge, StatusBadge};
use crate::shared::date_utils::format_datetime;
use crate::shared::dialogs::confirm;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::lookups::use_lookups;
use crate::shared::page_frame::PageFrame;
use crate::shared::toast::use_toast;
use crate::system::admins::ui::details::AdminForm;
use crate::system::auth::context::use_auth;

pub fn visible_admins(items: &[Admin], query: &str) -> Vec<Admin> {
    items
        .iter()
        .filter(|a| {
            matches_search(
                &[
                    a.username.as_str(),
                    a.full_name.as_deref().unwrap_or(""),
                    a.email.as_deref().unwrap_or(""),
                ],
                query,
            )
        })
        .cloned()
        .collect()
}

#[component]
pub fn AdminsManagement() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let lookups = use_lookups();

    let all_admins: RwSignal<Vec<Admin>> = RwSignal::new(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let search = RwSignal::new(String::new());
    let (show_form, set_show_form) = signal(false);
    let editing: RwSignal<Option<Admin>> = RwSignal::new(None);

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match admins::list().await {
                Ok(list) => all_admins.set(list),
                Err(e) => set_error.set(Some(format!("Failed to load admins: {}", e))),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load_data());

    let me = move || auth.admin();
    let super_admin_count = move || all_admins.with(|list| list.iter().filter(|a| a.is_super_admin).count());

    let open_create = move || {
        editing.set(None);
        set_show_form.set(true);
    };
    let close_form = move || {
        set_show_form.set(false);
        editing.set(None);
    };
    let on_saved = move || {
        close_form();
        toast.success("Admin saved");
        load_data();
    };

    let sync = move || {
        spawn_local(async move {
            match admins::sync().await {
                Ok(r) => {
                    toast.success(format!("Synced {} admin(s)", r.synced));
                    load_data();
                }
                Err(e) => toast.error(friendly_error(&e)),
            }
        });
    };

    let upgrade = move |admin: Admin| {
        if !confirm(&format!("Grant super admin rights to {}?", admin.username)) {
            return;
        }
        spawn_local(async move {
            match admins::upgrade_to_super_admin(&admin.id).await {
                Ok(_) => {
                    toast.success(format!("{} is now a super admin", admin.username));
                    load_data();
                }
                Err(e) => toast.error(friendly_error(&e)),
            }
        });
    };

    let delete = move |admin: Admin| {
        if !confirm(&format!("Delete admin {}?", admin.username)) {
            return;
        }
        spawn_local(async move {
            match admins::delete(&admin.id).await {
                Ok(()) => {
                    toast.success("Admin deleted");
                    load_data();
                }
                Err(e) => toast.error(friendly_error(&e)),
            }
        });
    };

    let visible = Memo::new(move |_| all_admins.with(|list| visible_admins(list, &search.get())));
    let roles = Signal::derive(move || lookups.with(|l| l.role_options()));

    let actions = view! {
        <Button appearance=ButtonAppearance::Primary on_click=move |_| open_create()>
            {icon("plus")}
            " New Admin"
        </Button>
        <Button appearance=ButtonAppearance::Secondary on_click=move |_| sync()>
            {icon("refresh")}
            " Sync"
        </Button>
        <Button
            appearance=ButtonAppearance::Secondary
            on_click=move |_| load_data()
            disabled=Signal::derive(move || loading.get())
        >
            {move || if loading.get() { "Loading..." } else { "Refresh" }}
        </Button>
    }
    .into_any();

    view! {
        <PageFrame section=AdminSection::Admins actions=actions>
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="filter-bar">
                <SearchInput
                    value=Signal::derive(move || search.get())
                    on_change=Callback::new(move |v: String| search.set(v))
                    placeholder="Search by username, name or email..."
                />
                <Badge>{move || visible.with(|v| v.len()).to_string()}</Badge>
            </div>

            <table class="table__data">
                <thead>
                    <tr>
                        <th>"Username"</th>
                        <th>"Full Name"</th>
                        <th>"Email"</th>
                        <th>"Role"</th>
                        <th>"Status"</th>
                        <th>"Last Login"</th>
                        <th class="table__actions"></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || visible.get()
                        key=|a| (a.id.clone(), a.updated_at.clone(), a.is_super_admin)
                        children=move |admin: Admin| {
                            let role = lookups.with(|l| l.role_name(admin.role_id.as_deref()));
                            let is_me = me().map(|m| m.id == admin.id).unwrap_or(false);
                            let can_upgrade = !admin.is_super_admin
                                && can_upgrade_to_super_admin(
                                    me().map(|m| m.is_super_admin).unwrap_or(false),
                                    super_admin_count(),
                                );
                            let last_login = admin
                                .last_login_at
                                .as_deref()
                                .map(format_datetime)
                                .unwrap_or_else(|| "-".to_string());
                            let for_edit = admin.clone();
                            let for_upgrade = admin.clone();
                            let for_delete = admin.clone();
                            view! {
                                <tr>
                                    <td>
                                        {admin.username.clone()}
                                        {admin
                                            .is_super_admin
                                            .then(|| view! { <StatusBadge status="super" label="Super Admin" /> })}
                                    </td>
                                    <td>{admin.full_name.clone().unwrap_or_default()}</td>
                                    <td>{admin.email.clone().unwrap_or_default()}</td>
                                    <td>{role}</td>
                                    <td>{active_badge(admin.is_active)}</td>
                                    <td>{last_login}</td>
                                    <td class="table__actions">
                                        <button
                                            class="button button--small"
                                            on:click=move |_| {
                                                editing.set(Some(for_edit.clone()));
                                                set_show_form.set(true);
                                            }
                                        >
                                            "Edit"
                                        </button>
                                        <Show when=move || can_upgrade>
                                            <button
                                                class="button button--small"
                                                on:click={
                                                    let admin = for_upgrade.clone();
                                                    move |_| upgrade(admin.clone())
                                                }
                                            >
                                                "Make Super Admin"
                                            </button>
                                        </Show>
                                        <Show when=move || !is_me>
                                            <button
                                                class="button button--small button--danger"
                                                on:click={
                                                    let admin = for_delete.clone();
                                                    move |_| delete(admin.clone())
                                                }
                                            >
                                                "Delete"
                                            </button>
                                        </Show>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <Show when=move || show_form.get()>
                {move || {
                    view! {
                        <AdminForm
                            editing=editing.get_untracked()
                            roles=roles
                            on_close=close_form
                            on_saved=on_saved
                        />
                    }
                }}
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin(username: &str, email: Option<&str>) -> Admin {
        Admin {
            id: username.to_string(),
            username: username.to_string(),
            email: email.map(str::to_string),
            full_name: None,
            role_id: None,
            is_super_admin: false,
            is_active: true,
            permissions: vec![],
            created_at: "2025-01-01T00:00:00Z".into(),
            updated_at: "2025-01-01T00:00:00Z".into(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_visible_admins_searches_email() {
        let items = vec![admin("ops", Some("ops@joltcab.com")), admin("finance", None)];
        assert_eq!(visible_admins(&items, "").len(), 2);
        let found = visible_admins(&items, "JOLTCAB");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username, "ops");
    }
}
