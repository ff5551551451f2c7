//! Боковое меню: группы разделов, видимые по правам администратора

use crate::layout::global_context::use_panel;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use contracts::shared::sections::{AdminSection, SectionGroup};
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_panel();
    let auth = use_auth();

    // Раскрыты все группы; свёрнутое меню показывает только иконки
    let collapsed_groups = RwSignal::new(Vec::<&'static str>::new());

    let visible_sections = move |group: SectionGroup| -> Vec<AdminSection> {
        let admin = auth.admin();
        group
            .sections()
            .into_iter()
            .filter(|s| admin.as_ref().map(|a| a.can_access(*s)).unwrap_or(false))
            .collect()
    };

    view! {
        <nav class="app-sidebar__content">
            {SectionGroup::all()
                .into_iter()
                .map(|group| {
                    let group_id = group.id();
                    let is_open = move || !collapsed_groups.get().contains(&group_id);
                    view! {
                        <Show when=move || !visible_sections(group).is_empty()>
                            <div class="app-sidebar__group">
                                <div
                                    class="app-sidebar__group-title"
                                    on:click=move |_| {
                                        collapsed_groups.update(|items| {
                                            if let Some(pos) = items.iter().position(|x| *x == group_id) {
                                                items.remove(pos);
                                            } else {
                                                items.push(group_id);
                                            }
                                        })
                                    }
                                >
                                    {icon(group.icon())}
                                    <span class="app-sidebar__label">{group.label()}</span>
                                    {move || if is_open() { icon("chevron-down") } else { icon("chevron-right") }}
                                </div>
                                <Show when=is_open>
                                    {move || {
                                        visible_sections(group)
                                            .into_iter()
                                            .map(|section| {
                                                view! {
                                                    <div
                                                        class="app-sidebar__item"
                                                        class:app-sidebar__item--active=move || ctx.active.get() == section
                                                        title=section.label()
                                                        on:click=move |_| ctx.open(section)
                                                    >
                                                        {icon(section.icon())}
                                                        <span class="app-sidebar__label">{section.label()}</span>
                                                    </div>
                                                }
                                            })
                                            .collect_view()
                                    }}
                                </Show>
                            </div>
                        </Show>
                    }
                })
                .collect_view()}
        </nav>
    }
}
