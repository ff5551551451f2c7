//! PageFrame: корневая обёртка каждого раздела админки.
//!
//! Даёт корневому элементу `id="{section}--page"` и стандартный заголовок
//! с местом под кнопки действий.

use contracts::shared::sections::AdminSection;
use leptos::prelude::*;

#[component]
pub fn PageFrame(
    section: AdminSection,
    /// Подзаголовок под названием раздела
    #[prop(optional, into)]
    subtitle: String,
    /// Кнопки справа в заголовке
    #[prop(optional)]
    actions: Option<AnyView>,
    children: Children,
) -> impl IntoView {
    let subtitle = (!subtitle.is_empty()).then(|| view! { <p class="page__subtitle">{subtitle}</p> });

    view! {
        <div id=format!("{}--page", section.id()) class="page" data-section=section.id()>
            <div class="page__header">
                <div>
                    <h2 class="page__title">{section.label()}</h2>
                    {subtitle}
                </div>
                <div class="page__actions">{actions}</div>
            </div>
            <div class="page__content">{children()}</div>
        </div>
    }
}
