//! Верхняя панель: название и логотип, переключатели меню и темы, выход.

use crate::layout::global_context::use_panel;
use crate::shared::api_utils::asset_url;
use crate::shared::icons::icon;
use crate::shared::modal_stack::use_modal_stack;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_panel();
    let auth = use_auth();
    let modal = use_modal_stack();

    let logout = move |_| {
        modal.clear();
        spawn_local(async move { auth.logout().await });
    };

    let admin_name = move || {
        auth.admin()
            .map(|a| a.display_name().to_string())
            .unwrap_or_default()
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_sidebar()
                    title=move || if ctx.sidebar_collapsed.get() { "Expand menu" } else { "Collapse menu" }
                >
                    {icon("menu")}
                </button>
                {move || {
                    ctx.appearance
                        .get()
                        .logo_url
                        .map(|url| view! { <img class="top-header__logo" src=asset_url(&url) alt="logo" /> })
                }}
                <span
                    class="top-header__title"
                    style=move || format!("color: {};", ctx.appearance.get().primary_color)
                >
                    {move || format!("{} Admin", ctx.appearance.get().app_name)}
                </span>
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_dark_mode()
                    title=move || if ctx.dark_mode.get() { "Light mode" } else { "Dark mode" }
                >
                    {move || if ctx.dark_mode.get() { icon("sun") } else { icon("moon") }}
                </button>

                <div class="top-header__user">
                    {icon("user")}
                    <span>{admin_name}</span>
                    {move || {
                        auth.admin()
                            .filter(|a| a.is_super_admin)
                            .map(|_| view! { <span class="badge badge--primary">"Super admin"</span> })
                    }}
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Sign out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
