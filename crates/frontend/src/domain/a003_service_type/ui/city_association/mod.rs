//! Раздел "Type / City": какие типы услуг доступны в выбранном городе.
//!
//! Переключатель правит `ServiceType.city_ids` и сразу сохраняет запись.

use contracts::domain::a003_service_type::aggregate::ServiceType;
use contracts::domain::common::EntityRecord;
use contracts::shared::delete_flow::friendly_error;
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::shared::api::entities::EntityApi;
use crate::shared::lookups::use_lookups;
use crate::shared::page_frame::PageFrame;
use crate::shared::query_cache::use_query_cache;
use crate::shared::toast::use_toast;

#[component]
pub fn TypeCityAssociation() -> impl IntoView {
    let lookups = use_lookups();
    let cache = use_query_cache();
    let toast = use_toast();

    let selected_city = RwSignal::new(None::<Uuid>);
    // Запись, которая сейчас сохраняется
    let saving = RwSignal::new(None::<Uuid>);

    let toggle = move |service: ServiceType, city_id: Uuid, enabled: bool| {
        let mut changed = service;
        changed.set_city(city_id, enabled);
        saving.set(Some(changed.id()));
        spawn_local(async move {
            let id = changed.id().to_string();
            match EntityApi::<ServiceType>::new().update(&id, &changed).await {
                Ok(_) => cache.invalidate(&ServiceType::query_key()),
                Err(e) => toast.error(friendly_error(&e)),
            }
            saving.set(None);
        });
    };

    let city_select = move || {
        let options = lookups.with(|l| l.city_options());
        view! {
            <select
                class="form__input"
                prop:value=move || selected_city.get().map(|id| id.to_string()).unwrap_or_default()
                on:change=move |ev| selected_city.set(Uuid::parse_str(&event_target_value(&ev)).ok())
            >
                <option value="">"Select a city..."</option>
                {options
                    .into_iter()
                    .map(|(value, text)| view! { <option value=value>{text}</option> })
                    .collect_view()}
            </select>
        }
    };

    let rows = move || {
        let Some(city_id) = selected_city.get() else {
            return view! { <div class="page__empty">"Select a city to manage its service types"</div> }
                .into_any();
        };
        let services = lookups.with(|l| l.service_types.clone());
        if services.is_empty() {
            return view! { <div class="page__empty">"No service types yet"</div> }.into_any();
        }
        view! {
            <table class="table__data">
                <thead>
                    <tr>
                        <th>"Service type"</th>
                        <th>"Seats"</th>
                        <th>"Available"</th>
                    </tr>
                </thead>
                <tbody>
                    {services
                        .into_iter()
                        .map(|service| {
                            let id = service.id();
                            let enabled = service.is_available_in(city_id);
                            let name = service.name.clone();
                            let seats = service.seats;
                            view! {
                                <tr>
                                    <td><strong>{name}</strong></td>
                                    <td>{seats}</td>
                                    <td>
                                        <input
                                            type="checkbox"
                                            prop:checked=enabled
                                            disabled=move || saving.get() == Some(id)
                                            on:change=move |ev| {
                                                toggle(service.clone(), city_id, event_target_checked(&ev))
                                            }
                                        />
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        }
        .into_any()
    };

    view! {
        <PageFrame section=AdminSection::TypeCity subtitle="Choose which service types operate in each city">
            <div class="filter-bar">
                <label class="form__label">"City"</label>
                {city_select}
            </div>
            {rows}
        </PageFrame>
    }
}
