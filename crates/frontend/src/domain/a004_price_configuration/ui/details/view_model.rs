use contracts::domain::a004_price_configuration::aggregate::PriceConfiguration;
use contracts::domain::a004_price_configuration::editor::{
    EditorMode, EditorTab, PriceEditorState, ERROR_BANNER_MS, SUCCESS_BANNER_MS,
};
use contracts::domain::common::EntityRecord;
use contracts::shared::delete_flow::friendly_error;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::entities::EntityApi;
use crate::shared::components::banner::{BannerMessage, BannerState};
use crate::shared::query_cache::QueryCache;

/// Значение вкладки для thaw `TabList`
pub fn tab_value(tab: EditorTab) -> String {
    format!("{:?}", tab)
}

pub fn tab_from_value(value: &str) -> EditorTab {
    EditorTab::all()
        .into_iter()
        .find(|t| tab_value(*t) == value)
        .unwrap_or(EditorTab::BasicRates)
}

/// ViewModel редактора тарифа
///
/// `state == None` означает, что открыт список, а не редактор.
#[derive(Clone, Copy)]
pub struct PriceEditorViewModel {
    pub state: RwSignal<Option<PriceEditorState>>,
    pub tab: RwSignal<String>,
    pub banner: BannerState,
    pub saving: RwSignal<bool>,
    cache: QueryCache,
}

impl PriceEditorViewModel {
    pub fn new(cache: QueryCache) -> Self {
        Self {
            state: RwSignal::new(None),
            tab: RwSignal::new(tab_value(EditorTab::BasicRates)),
            banner: BannerState::new(),
            saving: RwSignal::new(false),
            cache,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.with(|s| s.is_some())
    }

    pub fn open(&self, state: PriceEditorState) {
        self.tab.set(tab_value(state.active_tab));
        self.banner.clear();
        self.state.set(Some(state));
    }

    /// Сбросить всё локальное состояние и вернуться к списку
    pub fn close(&self) {
        self.state.set(None);
        self.tab.set(tab_value(EditorTab::BasicRates));
        self.saving.set(false);
    }

    pub fn current_tab(&self) -> EditorTab {
        tab_from_value(&self.tab.get())
    }

    pub fn show_error(&self, message: impl Into<String>) {
        self.banner
            .show(BannerMessage::Error(message.into()), ERROR_BANNER_MS);
    }

    /// Изменение черновика без проверки
    pub fn edit(&self, f: impl FnOnce(&mut PriceEditorState)) {
        self.state.update(|s| {
            if let Some(state) = s.as_mut() {
                f(state);
            }
        });
    }

    /// Изменение с проверкой; ошибка уходит в баннер. Возвращает успех.
    pub fn try_edit(&self, f: impl FnOnce(&mut PriceEditorState) -> Result<(), String>) -> bool {
        let mut outcome = Ok(());
        self.state.update(|s| {
            if let Some(state) = s.as_mut() {
                outcome = f(state);
            }
        });
        match outcome {
            Ok(()) => true,
            Err(e) => {
                self.show_error(e);
                false
            }
        }
    }

    /// Одна операция create или update в зависимости от режима редактора
    pub fn save_command(&self) {
        if self.saving.get_untracked() {
            return;
        }
        let Some(state) = self.state.get_untracked() else {
            self.show_error("Please select a city and service type");
            return;
        };
        let payload = match state.build_payload() {
            Ok(p) => p,
            Err(e) => {
                self.show_error(e);
                return;
            }
        };

        let this = *self;
        this.saving.set(true);
        spawn_local(async move {
            let api = EntityApi::<PriceConfiguration>::new();
            let result = match state.mode {
                EditorMode::Create => api.create(&payload).await,
                EditorMode::Update(id) => api.update(&id.to_string(), &payload).await,
            };
            match result {
                Ok(saved) => {
                    log::info!("Price configuration {} saved", saved.id());
                    let text = if state.is_update() {
                        "Price configuration updated successfully"
                    } else {
                        "Price configuration created successfully"
                    };
                    this.banner
                        .show(BannerMessage::Success(text.to_string()), SUCCESS_BANNER_MS);
                    this.cache.invalidate(&PriceConfiguration::query_key());
                    TimeoutFuture::new(SUCCESS_BANNER_MS).await;
                    this.close();
                }
                Err(e) => {
                    this.saving.set(false);
                    this.show_error(friendly_error(&e));
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_value_lookup() {
        for tab in EditorTab::all() {
            assert_eq!(tab_from_value(&tab_value(tab)), tab);
        }
        assert_eq!(tab_from_value("Unknown"), EditorTab::BasicRates);
    }
}
