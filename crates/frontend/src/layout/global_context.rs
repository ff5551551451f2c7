use contracts::shared::sections::AdminSection;
use contracts::system::settings::AppearanceSettings;
use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use crate::shared::storage::{self, DARK_MODE_KEY, SIDEBAR_COLLAPSED_KEY};

/// Состояние оболочки админки
#[derive(Clone, Copy)]
pub struct AdminPanelContext {
    pub active: RwSignal<AdminSection>,
    pub dark_mode: RwSignal<bool>,
    pub sidebar_collapsed: RwSignal<bool>,
    /// Название, логотип и цвет из `settings`
    pub appearance: RwSignal<AppearanceSettings>,
}

impl AdminPanelContext {
    pub fn new() -> Self {
        let dark = storage::load_flag(DARK_MODE_KEY).unwrap_or_else(storage::prefers_dark);
        let collapsed = storage::load_flag(SIDEBAR_COLLAPSED_KEY).unwrap_or(false);
        Self {
            active: RwSignal::new(AdminSection::Dashboard),
            dark_mode: RwSignal::new(dark),
            sidebar_collapsed: RwSignal::new(collapsed),
            appearance: RwSignal::new(AppearanceSettings::default()),
        }
    }

    /// Синхронизация активного раздела с `?section=` и флагов с localStorage
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(section) = params.get("section").and_then(|id| AdminSection::from_id(id)) {
            self.active.set(section);
        }

        let this = *self;
        Effect::new(move |_| {
            let section = this.active.get();
            let query_string = serde_qs::to_string(&HashMap::from([(
                "section".to_string(),
                section.id().to_string(),
            )]))
            .unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });

        Effect::new(move |_| {
            let dark = this.dark_mode.get();
            storage::save_flag(DARK_MODE_KEY, dark);
            if let Some(root) = window()
                .and_then(|w| w.document())
                .and_then(|d| d.document_element())
            {
                let _ = if dark {
                    root.class_list().add_1("dark")
                } else {
                    root.class_list().remove_1("dark")
                };
            }
        });

        Effect::new(move |_| {
            storage::save_flag(SIDEBAR_COLLAPSED_KEY, this.sidebar_collapsed.get());
        });
    }

    pub fn open(&self, section: AdminSection) {
        log::debug!("open section: {}", section.id());
        self.active.set(section);
    }

    pub fn toggle_dark_mode(&self) {
        self.dark_mode.update(|v| *v = !*v);
    }

    pub fn toggle_sidebar(&self) {
        self.sidebar_collapsed.update(|v| *v = !*v);
    }
}

impl Default for AdminPanelContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_panel() -> AdminPanelContext {
    use_context::<AdminPanelContext>().expect("AdminPanelContext not found")
}
