use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::shared::icons::icon;

fn is_overlay_target(ev: &ev::MouseEvent) -> bool {
    match (ev.target(), ev.current_target()) {
        (Some(t), Some(ct)) => t == ct,
        _ => false,
    }
}

/// Оверлей, шапка с крестиком и тело диалога
#[component]
pub fn ModalFrame(
    on_close: Callback<()>,
    title: String,
    #[prop(default = 1000)] z_index: i32,
    #[prop(default = 560)] width_px: u32,
    children: Children,
) -> impl IntoView {
    // Закрываем, только если и нажатие, и отпускание были на оверлее:
    // выделение текста в форме с отпусканием снаружи не закрывает диалог.
    let pressed_on_overlay = RwSignal::new(false);

    let on_overlay_click = move |ev: ev::MouseEvent| {
        let close = pressed_on_overlay.get_untracked() && is_overlay_target(&ev);
        pressed_on_overlay.set(false);
        if close {
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    view! {
        <div
            class="modal-overlay"
            style=format!("z-index: {};", z_index)
            on:mousedown=move |ev| pressed_on_overlay.set(is_overlay_target(&ev))
            on:click=on_overlay_click
        >
            <div
                class="modal"
                style=format!("position: relative; width: {}px;", width_px)
                on:click=|ev: ev::MouseEvent| ev.stop_propagation()
            >
                <div class="modal__header">
                    <h3 class="modal__title">{title}</h3>
                    <button class="modal__close" title="Close" on:click=move |_| on_close.run(())>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal__body">{children()}</div>
            </div>
        </div>
    }
}
