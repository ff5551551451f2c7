//! Обобщённый CRUD-экран сущности.
//!
//! Экран параметризуется типом записи (`CrudResource`): колонки таблицы,
//! поля поиска и статуса, форма диалога. Загрузка списка, поиск, диалог
//! создания/редактирования и удаление с подтверждением общие для всех.

pub mod fields;

use contracts::domain::common::EntityRecord;
use contracts::shared::delete_flow::{friendly_error, DeleteOutcome, DeleteRequest};
use contracts::shared::list_query::{matches_search, matches_status, ListParams};
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::entities::EntityApi;
use crate::shared::dialogs::confirm;
use crate::shared::icons::icon;
use crate::shared::list_utils::{selected_filter, SearchInput, StatusFilter};
use crate::shared::lookups::{use_lookups, Lookups};
use crate::shared::modal_stack::{use_modal_stack, ModalHandle, ModalStackService};
use crate::shared::page_frame::PageFrame;
use crate::shared::query_cache::{use_query_cache, QueryCache};
use crate::shared::toast::{use_toast, ToastService};

/// Сервисы приложения, захватываемые обработчиками событий экрана
#[derive(Clone, Copy)]
pub struct CrudServices {
    pub cache: QueryCache,
    pub toast: ToastService,
    pub modal: ModalStackService,
}

impl CrudServices {
    /// Вызывать в теле компонента, не в обработчике события
    pub fn use_services() -> Self {
        Self {
            cache: use_query_cache(),
            toast: use_toast(),
            modal: use_modal_stack(),
        }
    }
}

/// Действия строки для `CrudResource::row_actions`
pub struct RowActions<T: CrudResource> {
    /// Сохранить изменённую копию записи
    pub update: Callback<T>,
    /// Удалить запись (с подтверждением)
    pub delete: Callback<T>,
}

// derive(Copy) потребовал бы T: Copy, а записи не Copy
impl<T: CrudResource> Clone for RowActions<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: CrudResource> Copy for RowActions<T> {}

/// Сущность, управляемая через `crud_screen`
pub trait CrudResource: EntityRecord + Default + PartialEq {
    fn section() -> AdminSection;

    /// Сортировка списка
    fn default_sort() -> &'static str {
        "-created_date"
    }

    fn columns() -> &'static [&'static str];

    fn cells(&self, lookups: &Lookups) -> Vec<AnyView>;

    /// Текстовые поля для поиска
    fn search_text(&self) -> Vec<String>;

    /// Значение для фильтра статуса
    fn status_value(&self) -> Option<String> {
        None
    }

    /// Варианты фильтра статуса; пустой список скрывает фильтр
    fn status_options() -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }

    /// Подпись записи в диалоге удаления
    fn display_label(&self) -> String;

    /// Поля диалога, редактирующие черновик
    fn form(draft: RwSignal<Self>, lookups: RwSignal<Lookups>) -> AnyView;

    /// false скрывает кнопку удаления
    fn can_delete(&self) -> bool {
        true
    }

    /// Дополнительные кнопки строки (жизненный цикл партнёров)
    fn row_actions(&self, _actions: RowActions<Self>) -> Option<AnyView> {
        None
    }

    /// Дополнительные кнопки в заголовке экрана
    fn toolbar() -> Option<AnyView> {
        None
    }
}

/// Фильтрация списка по поиску и статусу
pub fn visible_records<T: CrudResource>(items: &[T], search: &str, status: &str) -> Vec<T> {
    items
        .iter()
        .filter(|r| {
            let texts = r.search_text();
            let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
            matches_search(&refs, search)
        })
        .filter(|r| match r.status_value() {
            Some(value) => matches_status(&value, selected_filter(status)),
            None => true,
        })
        .cloned()
        .collect()
}

/// Удаление с подтверждением: отмена не делает ни одного запроса
pub fn delete_with_confirm<T: CrudResource>(record: &T, services: CrudServices) {
    let CrudServices { cache, toast, .. } = services;
    let request = DeleteRequest::new(record.id().to_string(), record.display_label());
    let confirmed = confirm(&request.confirm_message());
    spawn_local(async move {
        let outcome = request
            .run(
                confirmed,
                |id| async move { EntityApi::<T>::new().delete(&id).await },
                || cache.invalidate(&T::query_key()),
            )
            .await;
        match outcome {
            DeleteOutcome::Deleted => toast.success(format!("{} deleted", T::element_name())),
            DeleteOutcome::Failed(e) => toast.error(friendly_error(&e)),
            DeleteOutcome::Cancelled => {}
        }
    });
}

/// Сохранение записи вне диалога (смена статуса из строки таблицы)
pub fn save_record<T: CrudResource>(record: T, services: CrudServices) {
    let CrudServices { cache, toast, .. } = services;
    spawn_local(async move {
        match EntityApi::<T>::new().save(&record, false).await {
            Ok(_) => {
                toast.success(format!("{} updated", T::element_name()));
                cache.invalidate(&T::query_key());
            }
            Err(e) => toast.error(friendly_error(&e)),
        }
    });
}

/// Открыть диалог создания (`None`) или редактирования записи
pub fn open_entity_dialog<T: CrudResource>(
    existing: Option<T>,
    lookups: RwSignal<Lookups>,
    services: CrudServices,
) {
    let CrudServices { cache, toast, modal } = services;

    let is_new = existing.is_none();
    let draft = RwSignal::new(existing.unwrap_or_default());
    let title = format!("{} {}", if is_new { "Add" } else { "Edit" }, T::element_name());

    modal.open(title, 560, move |handle: ModalHandle| {
        let error = RwSignal::new(None::<String>);
        let saving = RwSignal::new(false);
        let handle_save = handle.clone();

        let on_save = move |_| {
            let record = draft.get_untracked();
            let handle = handle_save.clone();
            saving.set(true);
            error.set(None);
            spawn_local(async move {
                match EntityApi::<T>::new().save(&record, is_new).await {
                    Ok(_) => {
                        cache.invalidate(&T::query_key());
                        toast.success(format!(
                            "{} {}",
                            T::element_name(),
                            if is_new { "created" } else { "saved" }
                        ));
                        handle.close();
                    }
                    Err(e) => error.set(Some(friendly_error(&e))),
                }
                saving.set(false);
            });
        };

        view! {
            <div class="form">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                {T::form(draft, lookups)}
                <div class="form__actions">
                    <button class="button button--secondary" on:click=move |_| handle.close()>
                        "Cancel"
                    </button>
                    <button
                        class="button button--primary"
                        disabled=move || saving.get()
                        on:click=on_save
                    >
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </div>
        }
        .into_any()
    });
}

/// Экран списка сущности с поиском, фильтром, диалогом и удалением
pub fn crud_screen<T: CrudResource>() -> AnyView {
    let services = CrudServices::use_services();
    let CrudServices { cache, toast, .. } = services;
    let lookups = use_lookups();

    let items = RwSignal::new(Vec::<T>::new());
    let loading = RwSignal::new(true);
    let search = RwSignal::new(String::new());
    let status = RwSignal::new("all".to_string());

    Effect::new(move |_| {
        cache.version(&T::query_key());
        spawn_local(async move {
            match EntityApi::<T>::new()
                .list(&ListParams::sorted(T::default_sort()))
                .await
            {
                Ok(list) => items.set(list),
                Err(e) => toast.error(format!("Failed to load {}: {}", T::list_name(), e)),
            }
            loading.set(false);
        });
    });

    let visible = Memo::new(move |_| {
        items.with(|list| visible_records(list, &search.get(), &status.get()))
    });

    let actions = RowActions::<T> {
        update: Callback::new(move |record: T| save_record(record, services)),
        delete: Callback::new(move |record: T| delete_with_confirm(&record, services)),
    };

    let status_options = T::status_options();
    let status_filter = (!status_options.is_empty())
        .then(|| view! { <StatusFilter value=status options=status_options /> });

    let header_actions = view! {
        {T::toolbar()}
        <button
            class="button button--primary"
            on:click={move |_| open_entity_dialog::<T>(None, lookups, services)}
        >
            {icon("plus")}
            {format!("Add {}", T::element_name())}
        </button>
    }
    .into_any();

    view! {
        <PageFrame section=T::section() actions=header_actions>
            <div class="filter-bar">
                <SearchInput
                    value=Signal::derive(move || search.get())
                    on_change=Callback::new(move |v: String| search.set(v))
                />
                {status_filter}
                <span class="filter-bar__count">
                    {move || format!("{} of {}", visible.with(|v| v.len()), items.with(|i| i.len()))}
                </span>
            </div>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="page__loading">"Loading..."</div> }
            >
                <Show
                    when=move || visible.with(|v| !v.is_empty())
                    fallback=|| view! { <div class="page__empty">"No records found"</div> }
                >
                    <table class="table__data">
                        <thead>
                            <tr>
                                {T::columns().iter().map(|c| view! { <th>{*c}</th> }).collect_view()}
                                <th class="table__actions">"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || visible.get()
                                key={|r: &T| (r.id(), r.meta().updated_date)}
                                children=move |record: T| {
                                    let cells = lookups.with(|l| record.cells(l));
                                    let extra = record.row_actions(actions);
                                    let for_edit = record.clone();
                                    let deletable = record.can_delete();
                                    let for_delete = record.clone();
                                    view! {
                                        <tr>
                                            {cells.into_iter().map(|c| view! { <td>{c}</td> }).collect_view()}
                                            <td class="table__actions">
                                                {extra}
                                                <button
                                                    class="button button--icon"
                                                    title="Edit"
                                                    on:click={move |_| open_entity_dialog::<T>(Some(for_edit.clone()), lookups, services)}
                                                >
                                                    {icon("edit")}
                                                </button>
                                                <Show when=move || deletable>
                                                    <button
                                                        class="button button--icon button--danger"
                                                        title="Delete"
                                                        on:click={
                                                            let record = for_delete.clone();
                                                            move |_| actions.delete.run(record.clone())
                                                        }
                                                    >
                                                        {icon("trash")}
                                                    </button>
                                                </Show>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </Show>
        </PageFrame>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_city::aggregate::City;
    use uuid::Uuid;

    fn assert_copy<C: Copy>() {}

    fn city(name: &str, is_active: bool) -> City {
        let mut c = City::new_for_insert(name.to_string(), Uuid::new_v4());
        c.is_active = is_active;
        c
    }

    #[test]
    fn test_row_actions_copy_for_non_copy_records() {
        assert_copy::<RowActions<City>>();
        assert_copy::<EntityApi<City>>();
    }

    #[test]
    fn test_visible_records() {
        let items = vec![city("Miami", true), city("Orlando", false), city("Miami Beach", false)];

        let names = |list: Vec<City>| list.into_iter().map(|c| c.name).collect::<Vec<_>>();
        assert_eq!(names(visible_records(&items, "", "all")).len(), 3);
        assert_eq!(names(visible_records(&items, "miami", "all")), vec!["Miami", "Miami Beach"]);
        assert_eq!(names(visible_records(&items, "miami", "inactive")), vec!["Miami Beach"]);
        assert_eq!(names(visible_records(&items, "", "active")), vec!["Miami"]);
    }
}
