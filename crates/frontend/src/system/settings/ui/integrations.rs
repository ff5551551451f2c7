//! Раздел "Integrations": ключи сторонних сервисов и панель их статуса.
//!
//! Сервер отдаёт секреты маской; маска, отправленная обратно, значение не меняет,
//! пустая строка удаляет ключ.

use contracts::shared::sections::AdminSection;
use contracts::system::settings::{AppSettings, ConfigStatus, IntegrationSettings};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::settings;
use crate::shared::components::badge::StatusBadge;
use crate::shared::crud::fields::{password_field, text_field};
use crate::shared::date_utils::format_datetime;
use crate::shared::page_frame::PageFrame;
use crate::shared::polling::{use_interval, CONFIG_STATUS_POLL_MS};
use crate::shared::toast::use_toast;

type Slot = fn(&mut IntegrationSettings) -> &mut Option<String>;

struct CredentialField {
    group: &'static str,
    label: &'static str,
    secret: bool,
    slot: Slot,
}

fn credential_fields() -> Vec<CredentialField> {
    vec![
        CredentialField { group: "Google Maps", label: "API Key", secret: true, slot: |s| &mut s.google_maps_api_key },
        CredentialField { group: "Stripe", label: "Secret Key", secret: true, slot: |s| &mut s.stripe_secret_key },
        CredentialField { group: "Stripe", label: "Publishable Key", secret: false, slot: |s| &mut s.stripe_publishable_key },
        CredentialField { group: "Twilio", label: "Account SID", secret: false, slot: |s| &mut s.twilio_account_sid },
        CredentialField { group: "Twilio", label: "Auth Token", secret: true, slot: |s| &mut s.twilio_auth_token },
        CredentialField { group: "SMTP", label: "Host", secret: false, slot: |s| &mut s.smtp_host },
        CredentialField { group: "SMTP", label: "User", secret: false, slot: |s| &mut s.smtp_user },
        CredentialField { group: "SMTP", label: "Password", secret: true, slot: |s| &mut s.smtp_password },
        CredentialField { group: "R2 Storage", label: "Bucket", secret: false, slot: |s| &mut s.r2_bucket },
    ]
}

fn read_slot(settings: &IntegrationSettings, slot: Slot) -> String {
    let mut copy = settings.clone();
    slot(&mut copy).clone().unwrap_or_default()
}

fn credential_view(draft: RwSignal<IntegrationSettings>, field: CredentialField) -> AnyView {
    let slot = field.slot;
    let get = move || draft.with(|d| read_slot(d, slot));
    let set = move |v: String| draft.update(|d| *slot(d) = Some(v));
    let label: &'static str = field.label;
    let input = if field.secret {
        password_field(label, get, set)
    } else {
        text_field(label, get, set)
    };
    view! {
        <div class="settings__credential">
            <span class="settings__group">{field.group}</span>
            {input}
        </div>
    }
    .into_any()
}

fn status_panel(status: ReadSignal<Option<ConfigStatus>>) -> impl IntoView {
    move || match status.get() {
        None => view! { <div class="page__loading">"Checking configuration..."</div> }.into_any(),
        Some(s) => {
            let summary = format!("{} of {} configured", s.configured_count(), s.integrations.len());
            let checked = format_datetime(&s.checked_at);
            view! {
                <div class="settings__status">
                    <div class="settings__status-header">
                        <strong>{summary}</strong>
                        <span class="table__muted">{format!("Checked {}", checked)}</span>
                    </div>
                    <ul>
                        {s.integrations
                            .into_iter()
                            .map(|i| {
                                let (status, label) = if i.configured {
                                    ("configured", "Configured")
                                } else {
                                    ("missing", "Not configured")
                                };
                                view! {
                                    <li>
                                        <span>{i.name}</span>
                                        <StatusBadge status=status label=label />
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
pub fn IntegrationsSettingsPage() -> impl IntoView {
    let toast = use_toast();

    let loaded = RwSignal::new(None::<AppSettings>);
    let draft = RwSignal::new(IntegrationSettings::default());
    let (status, set_status) = signal(None::<ConfigStatus>);
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        spawn_local(async move {
            match settings::get().await {
                Ok(s) => {
                    draft.set(s.integrations.clone());
                    loaded.set(Some(s));
                }
                Err(e) => set_error.set(Some(format!("Failed to load settings: {}", e))),
            }
        });
    });

    let poll_status = move || {
        spawn_local(async move {
            match settings::config_status().await {
                Ok(s) => set_status.set(Some(s)),
                Err(e) => log::warn!("Config status check failed: {}", e),
            }
        });
    };
    poll_status();
    use_interval(CONFIG_STATUS_POLL_MS, poll_status);

    let save = move |_| {
        let Some(mut current) = loaded.get_untracked() else {
            return;
        };
        current.integrations = draft.get_untracked();
        set_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            match settings::update(&current).await {
                Ok(saved) => {
                    draft.set(saved.integrations.clone());
                    loaded.set(Some(saved));
                    toast.success("Integration settings saved");
                    poll_status();
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_saving.set(false);
        });
    };

    view! {
        <PageFrame
            section=AdminSection::Integrations
            subtitle=format!("Status refreshes every {} seconds", CONFIG_STATUS_POLL_MS / 1000)
        >
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <div class="settings__layout">
                <Show
                    when=move || loaded.with(|s| s.is_some())
                    fallback=|| view! { <div class="page__loading">"Loading..."</div> }
                >
                    <div class="form__grid">
                        {credential_fields()
                            .into_iter()
                            .map(|f| credential_view(draft, f))
                            .collect_view()}
                    </div>
                    <div class="form__actions">
                        <button
                            class="button button--primary"
                            prop:disabled=move || saving.get()
                            on:click=save
                        >
                            {move || if saving.get() { "Saving..." } else { "Save Integrations" }}
                        </button>
                    </div>
                </Show>
                {status_panel(status)}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_slots_cover_every_setting() {
        let mut settings = IntegrationSettings::default();
        for (i, field) in credential_fields().into_iter().enumerate() {
            *(field.slot)(&mut settings) = Some(format!("v{}", i));
        }
        assert_eq!(settings.google_maps_api_key.as_deref(), Some("v0"));
        assert_eq!(settings.r2_bucket.as_deref(), Some("v8"));
        assert_eq!(
            ConfigStatus::from_settings(&settings, String::new()).configured_count(),
            5
        );
        assert_eq!(read_slot(&settings, |s| &mut s.smtp_host), "v5");
    }
}
