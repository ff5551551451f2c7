//! Раздел "Appearance": название, цвет, логотип и тема по умолчанию.

use contracts::shared::sections::AdminSection;
use contracts::system::settings::AppSettings;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::layout::global_context::use_panel;
use crate::shared::api::{functions, settings};
use crate::shared::api_utils::asset_url;
use crate::shared::crud::fields::{select_field, text_field};
use crate::shared::page_frame::PageFrame;
use crate::shared::toast::use_toast;

fn selected_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

#[component]
pub fn AppearanceSettingsPage() -> impl IntoView {
    let ctx = use_panel();
    let toast = use_toast();

    // Весь документ настроек: PUT принимает его целиком, маски секретов сервер пропускает
    let loaded = RwSignal::new(None::<AppSettings>);
    let (saving, set_saving) = signal(false);
    let (uploading, set_uploading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        spawn_local(async move {
            match settings::get().await {
                Ok(s) => loaded.set(Some(s)),
                Err(e) => set_error.set(Some(format!("Failed to load settings: {}", e))),
            }
        });
    });

    let edit = move |f: fn(&mut AppSettings, String), value: String| {
        loaded.update(|s| {
            if let Some(s) = s.as_mut() {
                f(s, value);
            }
        });
    };
    let read = move |f: fn(&AppSettings) -> String| {
        loaded.with(|s| s.as_ref().map(f).unwrap_or_default())
    };

    let on_logo = move |ev: web_sys::Event| {
        let Some(file) = selected_file(&ev) else {
            return;
        };
        set_uploading.set(true);
        spawn_local(async move {
            match functions::upload_file(&file).await {
                Ok(r) => {
                    loaded.update(|s| {
                        if let Some(s) = s.as_mut() {
                            s.appearance.logo_url = Some(r.file_url.clone());
                        }
                    });
                    toast.success("Logo uploaded");
                }
                Err(e) => toast.error(format!("Upload failed: {}", e)),
            }
            set_uploading.set(false);
        });
    };

    let save = move |_| {
        let Some(current) = loaded.get_untracked() else {
            return;
        };
        if let Err(e) = current.appearance.validate() {
            set_error.set(Some(e));
            return;
        }
        set_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            match settings::update(&current).await {
                Ok(saved) => {
                    ctx.appearance.set(saved.appearance.clone());
                    loaded.set(Some(saved));
                    toast.success("Appearance saved");
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_saving.set(false);
        });
    };

    view! {
        <PageFrame section=AdminSection::Appearance subtitle="Branding shown in the admin header">
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <Show
                when=move || loaded.with(|s| s.is_some())
                fallback=|| view! { <div class="page__loading">"Loading..."</div> }
            >
                <div class="form__grid">
                    {text_field(
                        "App Name",
                        move || read(|s| s.appearance.app_name.clone()),
                        move |v| edit(|s, v| s.appearance.app_name = v, v),
                    )}
                    <label class="form__group">
                        <span class="form__label">"Primary Color"</span>
                        <div class="form__inline">
                            <input
                                type="color"
                                prop:value=move || read(|s| s.appearance.primary_color.clone())
                                on:input=move |ev| edit(|s, v| s.appearance.primary_color = v, event_target_value(&ev))
                            />
                            <input
                                class="form__input"
                                type="text"
                                prop:value=move || read(|s| s.appearance.primary_color.clone())
                                on:input=move |ev| edit(|s, v| s.appearance.primary_color = v, event_target_value(&ev))
                            />
                        </div>
                    </label>
                    {select_field(
                        "Default Theme",
                        || vec![
                            ("light".to_string(), "Light".to_string()),
                            ("dark".to_string(), "Dark".to_string()),
                        ],
                        move || read(|s| s.appearance.default_theme.clone()),
                        move |v| edit(|s, v| s.appearance.default_theme = v, v),
                    )}
                    <label class="form__group">
                        <span class="form__label">"Logo"</span>
                        {move || {
                            let url = read(|s| s.appearance.logo_url.clone().unwrap_or_default());
                            (!url.is_empty())
                                .then(|| view! { <img class="settings__logo-preview" src=asset_url(&url) alt="Logo" /> })
                        }}
                        <input type="file" accept="image/*" on:change=on_logo prop:disabled=move || uploading.get() />
                        <Show when=move || uploading.get()>
                            <span class="table__muted">"Uploading..."</span>
                        </Show>
                    </label>
                </div>
                <div class="form__actions">
                    <button
                        class="button button--primary"
                        prop:disabled=move || saving.get()
                        on:click=save
                    >
                        {move || if saving.get() { "Saving..." } else { "Save Appearance" }}
                    </button>
                </div>
            </Show>
        </PageFrame>
    }
}
