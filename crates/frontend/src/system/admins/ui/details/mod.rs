use contracts::system::admins::{Admin, CreateAdminDto, UpdateAdminDto};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::admins;

/// Поля формы администратора
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminDraft {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
    pub role_id: String,
    pub is_active: bool,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl AdminDraft {
    pub fn new() -> Self {
        Self {
            is_active: true,
            ..Default::default()
        }
    }

    pub fn from_admin(admin: &Admin) -> Self {
        Self {
            username: admin.username.clone(),
            password: String::new(),
            email: admin.email.clone().unwrap_or_default(),
            full_name: admin.full_name.clone().unwrap_or_default(),
            role_id: admin.role_id.clone().unwrap_or_default(),
            is_active: admin.is_active,
        }
    }

    pub fn to_create_dto(&self) -> Result<CreateAdminDto, String> {
        if self.username.trim().is_empty() {
            return Err("Username is required".to_string());
        }
        if self.password.is_empty() {
            return Err("Password is required".to_string());
        }
        Ok(CreateAdminDto {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            email: non_empty(&self.email),
            full_name: non_empty(&self.full_name),
            role_id: non_empty(&self.role_id),
        })
    }

    /// Пустой пароль при редактировании означает "не менять"
    pub fn to_update_dto(&self) -> UpdateAdminDto {
        UpdateAdminDto {
            email: non_empty(&self.email),
            full_name: non_empty(&self.full_name),
            role_id: non_empty(&self.role_id),
            is_active: self.is_active,
            password: (!self.password.is_empty()).then(|| self.password.clone()),
        }
    }
}

#[component]
pub fn AdminForm<F1, F2>(
    /// None: создание нового администратора
    editing: Option<Admin>,
    roles: Signal<Vec<(String, String)>>,
    on_close: F1,
    on_saved: F2,
) -> impl IntoView
where
    F1: Fn() + 'static + Copy + Send + Sync,
    F2: Fn() + 'static + Copy + Send + Sync,
{
    let edit_id = editing.as_ref().map(|a| a.id.clone());
    let is_edit = edit_id.is_some();
    let draft = RwSignal::new(
        editing
            .as_ref()
            .map(AdminDraft::from_admin)
            .unwrap_or_else(AdminDraft::new),
    );
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_saving, set_is_saving) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = draft.get_untracked();
        let edit_id = edit_id.clone();

        let create_dto = match &edit_id {
            Some(_) => None,
            None => match current.to_create_dto() {
                Ok(dto) => Some(dto),
                Err(e) => {
                    set_error_message.set(Some(e));
                    return;
                }
            },
        };

        set_is_saving.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            let result = match (edit_id, create_dto) {
                (Some(id), _) => admins::update(&id, &current.to_update_dto()).await.map(|_| ()),
                (None, Some(dto)) => admins::create(&dto).await.map(|_| ()),
                (None, None) => Ok(()),
            };
            match result {
                Ok(()) => on_saved(),
                Err(e) => {
                    set_error_message.set(Some(format!("Failed to save admin: {}", e)));
                    set_is_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal-content" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h3>{if is_edit { "Edit Admin" } else { "New Admin" }}</h3>
                    <button class="btn-close" on:click=move |_| on_close()>"×"</button>
                </div>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="admin-username">"Username *"</label>
                        <input
                            type="text"
                            id="admin-username"
                            prop:value=move || draft.with(|d| d.username.clone())
                            on:input=move |ev| draft.update(|d| d.username = event_target_value(&ev))
                            disabled=move || is_edit || is_saving.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="admin-password">
                            {if is_edit { "New Password" } else { "Password *" }}
                        </label>
                        <input
                            type="password"
                            id="admin-password"
                            autocomplete="new-password"
                            prop:value=move || draft.with(|d| d.password.clone())
                            on:input=move |ev| draft.update(|d| d.password = event_target_value(&ev))
                            disabled=move || is_saving.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="admin-email">"Email"</label>
                        <input
                            type="email"
                            id="admin-email"
                            prop:value=move || draft.with(|d| d.email.clone())
                            on:input=move |ev| draft.update(|d| d.email = event_target_value(&ev))
                            disabled=move || is_saving.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="admin-full-name">"Full Name"</label>
                        <input
                            type="text"
                            id="admin-full-name"
                            prop:value=move || draft.with(|d| d.full_name.clone())
                            on:input=move |ev| draft.update(|d| d.full_name = event_target_value(&ev))
                            disabled=move || is_saving.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="admin-role">"Role"</label>
                        <select
                            id="admin-role"
                            prop:value=move || draft.with(|d| d.role_id.clone())
                            on:change=move |ev| draft.update(|d| d.role_id = event_target_value(&ev))
                            disabled=move || is_saving.get()
                        >
                            <option value="">"No role"</option>
                            {move || {
                                roles
                                    .get()
                                    .into_iter()
                                    .map(|(id, name)| view! { <option value=id>{name}</option> })
                                    .collect_view()
                            }}
                        </select>
                    </div>

                    <Show when=move || is_edit>
                        <div class="form-group">
                            <label>
                                <input
                                    type="checkbox"
                                    prop:checked=move || draft.with(|d| d.is_active)
                                    on:change=move |ev| draft.update(|d| d.is_active = event_target_checked(&ev))
                                    disabled=move || is_saving.get()
                                />
                                " Active"
                            </label>
                        </div>
                    </Show>

                    <div class="form-actions">
                        <button
                            type="button"
                            class="btn-secondary"
                            on:click=move |_| on_close()
                            disabled=move || is_saving.get()
                        >
                            "Cancel"
                        </button>
                        <button type="submit" class="btn-primary" disabled=move || is_saving.get()>
                            {move || if is_saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dto_requires_credentials() {
        let mut draft = AdminDraft::new();
        assert_eq!(draft.to_create_dto(), Err("Username is required".to_string()));
        draft.username = "  ops ".into();
        assert_eq!(draft.to_create_dto(), Err("Password is required".to_string()));
        draft.password = "s3cret-pass".into();
        draft.email = "  ".into();
        let dto = draft.to_create_dto().unwrap();
        assert_eq!(dto.username, "ops");
        assert_eq!(dto.email, None);
    }

    #[test]
    fn test_update_dto_keeps_password_when_blank() {
        let mut draft = AdminDraft::new();
        draft.role_id = "role-1".into();
        let dto = draft.to_update_dto();
        assert_eq!(dto.password, None);
        assert_eq!(dto.role_id.as_deref(), Some("role-1"));
        assert!(dto.is_active);
    }
}
