use crate::layout::global_context::use_panel;
use crate::layout::AdminPanel;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

/// Auth gate: без действующей сессии показывается форма входа
#[component]
pub fn AppRoutes() -> impl IntoView {
    let auth = use_auth();
    let ctx = use_panel();

    ctx.init_router_integration();

    view! {
        <Show
            when=move || auth.is_authenticated()
            fallback=|| view! { <LoginPage /> }
        >
            <AdminPanel />
        </Show>
    }
}
