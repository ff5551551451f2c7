//! Диалог выбора страны из внешнего справочника.
//!
//! Справочник грузится при открытии (restcountries v3.1, v2, затем
//! встроенный список); уже добавленные коды не предлагаются.

use contracts::domain::a001_country::aggregate::Country;
use contracts::domain::a001_country::catalog::CountryInfo;
use contracts::domain::common::EntityRecord;
use contracts::shared::delete_flow::friendly_error;
use contracts::shared::list_query::matches_search;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::{countries, remote};
use crate::shared::crud::CrudServices;
use crate::shared::modal_stack::ModalHandle;

/// Страны каталога, которых ещё нет в списке
pub fn available_countries(catalog: &[CountryInfo], existing_codes: &[String], search: &str) -> Vec<CountryInfo> {
    catalog
        .iter()
        .filter(|info| {
            !existing_codes
                .iter()
                .any(|code| code.eq_ignore_ascii_case(&info.code))
        })
        .filter(|info| matches_search(&[info.name.as_str(), info.code.as_str()], search))
        .cloned()
        .collect()
}

pub fn open_country_picker(existing_codes: Vec<String>, services: CrudServices) {
    let CrudServices { cache, toast, modal } = services;

    let catalog = RwSignal::new(None::<Vec<CountryInfo>>);
    let search = RwSignal::new(String::new());
    let picked = RwSignal::new(None::<CountryInfo>);
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    spawn_local(async move {
        catalog.set(Some(remote::load_country_catalog().await));
    });

    modal.open("Add Country", 520, move |handle: ModalHandle| {
        let existing_codes = existing_codes.clone();
        let options = Memo::new(move |_| {
            catalog.with(|c| {
                c.as_deref()
                    .map(|list| available_countries(list, &existing_codes, &search.get()))
                    .unwrap_or_default()
            })
        });

        let handle_save = handle.clone();
        let on_save = move |_| {
            let Some(info) = picked.get_untracked() else {
                error.set(Some("Please select a country".to_string()));
                return;
            };
            let country = Country::from_catalog(&info);
            if let Err(e) = country.validate() {
                error.set(Some(e));
                return;
            }
            let handle = handle_save.clone();
            saving.set(true);
            spawn_local(async move {
                match countries::create(&country).await {
                    Ok(_) => {
                        cache.invalidate(&Country::query_key());
                        toast.success(format!("{} added", country.name));
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
                <input
                    class="form__input"
                    type="text"
                    placeholder="Search countries..."
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <Show
                    when=move || catalog.with(|c| c.is_some())
                    fallback=|| view! { <div class="page__loading">"Loading countries..."</div> }
                >
                    <ul class="picker__list">
                        <For
                            each=move || options.get()
                            key=|info| info.code.clone()
                            children=move |info: CountryInfo| {
                                let code = info.code.clone();
                                let is_picked = move || picked.with(|p| p.as_ref().is_some_and(|p| p.code == code));
                                let flag = info.flag_url.clone().map(|url| view! { <img class="picker__flag" src=url alt="" /> });
                                let label = format!("{} ({})", info.name, info.code);
                                let currency = format!("{} {}", info.currency_code, info.currency_sign);
                                view! {
                                    <li
                                        class="picker__item"
                                        class:picker__item--selected=is_picked
                                        on:click=move |_| picked.set(Some(info.clone()))
                                    >
                                        {flag}
                                        <span>{label}</span>
                                        <span class="table__muted">{currency}</span>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
                <div class="form__actions">
                    <button class="button button--secondary" on:click=move |_| handle.close()>
                        "Cancel"
                    </button>
                    <button
                        class="button button--primary"
                        disabled=move || saving.get() || picked.with(|p| p.is_none())
                        on:click=on_save
                    >
                        {move || if saving.get() { "Saving..." } else { "Add country" }}
                    </button>
                </div>
            </div>
        }
        .into_any()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_country::catalog::fallback_countries;

    #[test]
    fn test_available_countries_hides_existing_codes() {
        let catalog = fallback_countries();
        let total = catalog.len();
        let existing = vec![catalog[0].code.to_lowercase()];
        let available = available_countries(&catalog, &existing, "");
        assert_eq!(available.len(), total - 1);
        assert!(available.iter().all(|c| c.code != catalog[0].code));
    }
}
