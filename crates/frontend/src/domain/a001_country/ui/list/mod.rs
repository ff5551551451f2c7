use contracts::domain::a001_country::aggregate::Country;
use contracts::domain::common::EntityRecord;
use contracts::shared::delete_flow::{friendly_error, DeleteOutcome, DeleteRequest};
use contracts::shared::list_query::matches_search;
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_country::ui::picker::open_country_picker;
use crate::shared::api::entities::EntityApi;
use crate::shared::api::{countries, functions};
use crate::shared::crud::CrudServices;
use crate::shared::dialogs::confirm;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;

#[component]
pub fn CountriesManagement() -> impl IntoView {
    let services = CrudServices::use_services();
    let CrudServices { cache, toast, .. } = services;

    let items = RwSignal::new(Vec::<Country>::new());
    let loading = RwSignal::new(true);
    let syncing = RwSignal::new(false);
    let search = RwSignal::new(String::new());

    Effect::new(move |_| {
        cache.version(&Country::query_key());
        spawn_local(async move {
            match countries::list().await {
                Ok(list) => items.set(list),
                Err(e) => toast.error(format!("Failed to load countries: {}", e)),
            }
            loading.set(false);
        });
    });

    let visible = Memo::new(move |_| {
        let term = search.get();
        items.with(|list| {
            list.iter()
                .filter(|c| matches_search(&[c.name.as_str(), c.code.as_str()], &term))
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    let on_sync = move |_| {
        syncing.set(true);
        spawn_local(async move {
            match functions::sync_countries().await {
                Ok(result) => {
                    toast.success(format!(
                        "Countries synced: {} created, {} updated",
                        result.created, result.updated
                    ));
                    cache.invalidate(&Country::query_key());
                }
                Err(e) => toast.error(friendly_error(&e)),
            }
            syncing.set(false);
        });
    };

    let on_add = move |_| {
        let codes = items.with_untracked(|list| list.iter().map(|c| c.code.clone()).collect());
        open_country_picker(codes, services);
    };

    let toggle_active = move |country: Country| {
        let mut changed = country;
        changed.is_active = !changed.is_active;
        spawn_local(async move {
            match countries::update(&changed).await {
                Ok(_) => cache.invalidate(&Country::query_key()),
                Err(e) => toast.error(friendly_error(&e)),
            }
        });
    };

    let delete_country = move |country: Country| {
        let request = DeleteRequest::new(country.id().to_string(), country.name.clone());
        let confirmed = confirm(&request.confirm_message());
        spawn_local(async move {
            let outcome = request
                .run(
                    confirmed,
                    |id| async move { EntityApi::<Country>::new().delete(&id).await },
                    || cache.invalidate(&Country::query_key()),
                )
                .await;
            match outcome {
                DeleteOutcome::Deleted => toast.success("Country deleted"),
                DeleteOutcome::Failed(e) => toast.error(friendly_error(&e)),
                DeleteOutcome::Cancelled => {}
            }
        });
    };

    let header_actions = view! {
        <button class="button button--secondary" disabled=move || syncing.get() on:click=on_sync>
            {icon("refresh")}
            {move || if syncing.get() { "Syncing..." } else { "Sync countries" }}
        </button>
        <button class="button button--primary" on:click=on_add>
            {icon("plus")}
            "Add Country"
        </button>
    }
    .into_any();

    view! {
        <PageFrame section=AdminSection::Countries actions=header_actions>
            <div class="filter-bar">
                <SearchInput
                    value=Signal::derive(move || search.get())
                    on_change=Callback::new(move |v: String| search.set(v))
                />
                <span class="filter-bar__count">
                    {move || format!("{} of {}", visible.with(|v| v.len()), items.with(|i| i.len()))}
                </span>
            </div>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="page__loading">"Loading..."</div> }
            >
                <table class="table__data">
                    <thead>
                        <tr>
                            <th></th>
                            <th>"Country"</th>
                            <th>"Code"</th>
                            <th>"Currency"</th>
                            <th>"Phone code"</th>
                            <th>"Active"</th>
                            <th class="table__actions"></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || visible.get()
                            key=|c| (c.id(), c.meta.updated_date)
                            children=move |country: Country| {
                                let flag = country
                                    .flag_url
                                    .clone()
                                    .map(|url| view! { <img class="table__flag" src=url alt="" /> });
                                let currency = format!("{} {}", country.currency_code, country.currency_sign);
                                let is_active = country.is_active;
                                let for_toggle = country.clone();
                                let for_delete = country.clone();
                                view! {
                                    <tr>
                                        <td>{flag}</td>
                                        <td><strong>{country.name.clone()}</strong></td>
                                        <td>{country.code.clone()}</td>
                                        <td>{currency}</td>
                                        <td>{country.phone_code.clone()}</td>
                                        <td>
                                            <input
                                                type="checkbox"
                                                prop:checked=is_active
                                                on:change=move |_| toggle_active(for_toggle.clone())
                                            />
                                        </td>
                                        <td class="table__actions">
                                            <button
                                                class="button button--icon button--danger"
                                                title="Delete"
                                                on:click=move |_| delete_country(for_delete.clone())
                                            >
                                                {icon("trash")}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>
        </PageFrame>
    }
}
