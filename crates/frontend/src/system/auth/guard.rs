use contracts::shared::sections::AdminSection;
use leptos::prelude::*;

use super::context::use_auth;

/// Раздел виден только при наличии права у текущего администратора
#[component]
pub fn RequireSection(section: AdminSection, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || auth.admin().map(|a| a.can_access(section)).unwrap_or(false)
            fallback=|| view! {
                <div class="warning-box">"Access denied. You do not have permission to view this section."</div>
            }
        >
            {children()}
        </Show>
    }
}
