use crate::layout::global_context::AdminPanelContext;
use crate::routes::routes::AppRoutes;
use crate::shared::modal_stack::{ModalHost, ModalStackService};
use crate::shared::query_cache::QueryCache;
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Состояние оболочки: активный раздел, тёмная тема, свёрнутое меню
    provide_context(AdminPanelContext::new());

    provide_context(ModalStackService::new());
    provide_context(QueryCache::new());
    provide_context(ToastService::new());

    view! {
        <AuthProvider>
            <AppRoutes />
            <ModalHost />
            <ToastHost />
        </AuthProvider>
    }
}
