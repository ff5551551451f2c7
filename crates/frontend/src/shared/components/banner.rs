//! Баннер результата сохранения над формой

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, PartialEq)]
pub enum BannerMessage {
    Success(String),
    Error(String),
}

/// Состояние баннера с автоскрытием
#[derive(Clone, Copy)]
pub struct BannerState {
    message: RwSignal<Option<BannerMessage>>,
    generation: StoredValue<u64>,
}

impl BannerState {
    pub fn new() -> Self {
        Self {
            message: RwSignal::new(None),
            generation: StoredValue::new(0),
        }
    }

    /// Показать на `ms` миллисекунд; более новый баннер отменяет скрытие старого
    pub fn show(&self, message: BannerMessage, ms: u32) {
        let gen = self.generation.get_value() + 1;
        self.generation.set_value(gen);
        self.message.set(Some(message));

        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(ms).await;
            if this.generation.get_value() == gen {
                this.message.set(None);
            }
        });
    }

    pub fn clear(&self) {
        self.message.set(None);
    }
}

impl Default for BannerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Баннер с кнопкой закрытия
#[component]
pub fn Banner(state: BannerState) -> impl IntoView {
    move || {
        state.message.get().map(|m| {
            let (class, text) = match m {
                BannerMessage::Success(text) => ("alert alert--success", text),
                BannerMessage::Error(text) => ("alert alert--error", text),
            };
            view! {
                <div class=class>
                    <span>{text}</span>
                    <button class="alert__close" title="Dismiss" on:click=move |_| state.clear()>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
