use crate::shared::modal_frame::ModalFrame;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

type DialogBody = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;

const BASE_Z_INDEX: i32 = 1000;

#[derive(Clone)]
struct Dialog {
    id: u64,
    title: String,
    width_px: u32,
    body: DialogBody,
}

/// Хэндл открытого диалога: форма закрывает себя через `close()`
#[derive(Clone)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close_later(self.id);
    }
}

/// Диалоги админки: формы записей, выбор страны.
///
/// Escape закрывает только верхний диалог.
#[derive(Clone, Copy)]
pub struct ModalStackService {
    dialogs: RwSignal<Vec<Dialog>>,
    next_id: StoredValue<u64>,
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            dialogs: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn is_open(&self) -> bool {
        self.dialogs.with(|d| !d.is_empty())
    }

    /// Открыть диалог с заголовком поверх уже открытых
    pub fn open<F>(&self, title: impl Into<String>, width_px: u32, body: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        let dialog = Dialog {
            id,
            title: title.into(),
            width_px,
            body: Arc::new(body),
        };
        self.dialogs.update(|d| d.push(dialog));
        ModalHandle { id, svc: *self }
    }

    // Удаление на следующем тике: обработчик клика не должен удалять свой же DOM
    fn close_later(&self, id: u64) {
        let dialogs = self.dialogs;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            dialogs.update(|d| d.retain(|e| e.id != id));
        });
    }

    fn close_top(&self) {
        if let Some(id) = self.dialogs.with_untracked(|d| d.last().map(|e| e.id)) {
            self.close_later(id);
        }
    }

    /// При выходе из админки
    pub fn clear(&self) {
        self.dialogs.set(Vec::new());
    }
}

impl Default for ModalStackService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_modal_stack() -> ModalStackService {
    use_context::<ModalStackService>()
        .expect("ModalStackService not provided in context (provide it in app root)")
}

/// Рендер открытых диалогов; монтируется один раз в корне приложения
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_modal_stack();

    Effect::new(move |_| {
        let on_keydown = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let is_escape = event
                .dyn_ref::<KeyboardEvent>()
                .map(|k| k.key() == "Escape")
                .unwrap_or(false);
            if is_escape {
                svc.close_top();
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
            // живёт столько же, сколько приложение
            on_keydown.forget();
        }
    });

    view! {
        <Show when=move || svc.is_open()>
            <For
                each={move || svc.dialogs.get().into_iter().enumerate().collect::<Vec<_>>()}
                key={|(_, dialog): &(usize, Dialog)| dialog.id}
                children={move |(depth, dialog): (usize, Dialog)| {
                    let id = dialog.id;
                    let on_close = Callback::new(move |_| svc.close_later(id));
                    let body = (dialog.body)(ModalHandle { id, svc });
                    view! {
                        <ModalFrame
                            z_index={BASE_Z_INDEX + depth as i32}
                            on_close=on_close
                            title=dialog.title.clone()
                            width_px=dialog.width_px
                        >
                            {body}
                        </ModalFrame>
                    }
                }}
            />
        </Show>
    }
}
