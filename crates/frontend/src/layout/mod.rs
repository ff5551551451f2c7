pub mod center;
pub mod global_context;
pub mod left;
pub mod top_header;

use leptos::prelude::*;
use leptos::task::spawn_local;
use top_header::TopHeader;

use crate::shared::api::settings;
use global_context::use_panel;

/// Оболочка админки.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |  Sidebar  |          Center              |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell<L, C>(left: L, center: C) -> impl IntoView
where
    L: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
{
    let ctx = use_panel();

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <aside
                    data-zone="left"
                    class="app-sidebar"
                    class:app-sidebar--collapsed=move || ctx.sidebar_collapsed.get()
                >
                    {left()}
                </aside>
                <main class="app-main">
                    <center::Center>{center()}</center::Center>
                </main>
            </div>
        </div>
    }
}

/// Админка после входа: оформление из настроек, меню и активный раздел
#[component]
pub fn AdminPanel() -> impl IntoView {
    let ctx = use_panel();

    spawn_local(async move {
        match settings::get().await {
            Ok(s) => ctx.appearance.set(s.appearance),
            Err(e) => log::warn!("Failed to load appearance settings: {}", e),
        }
    });

    view! {
        <Shell
            left=|| view! { <left::sidebar::Sidebar /> }.into_any()
            center=|| view! { <center::center::SectionContent /> }.into_any()
        />
    }
}
