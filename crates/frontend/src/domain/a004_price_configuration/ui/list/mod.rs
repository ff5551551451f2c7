//! Раздел "Pricing": список тарифов и редактор для пары (город, тип услуги).

use contracts::domain::a004_price_configuration::aggregate::{dedupe_by_scope, PriceConfiguration};
use contracts::domain::a004_price_configuration::editor::PriceEditorState;
use contracts::domain::common::EntityRecord;
use contracts::shared::delete_flow::friendly_error;
use contracts::shared::list_query::ListParams;
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::domain::a004_price_configuration::ui::details::{PriceEditor, PriceEditorViewModel};
use crate::shared::api::entities::EntityApi;
use crate::shared::components::badge::active_badge;
use crate::shared::crud::fields::reference_field;
use crate::shared::dialogs::confirm;
use crate::shared::format::{format_datetime, format_money};
use crate::shared::lookups::{use_lookups, Lookups};
use crate::shared::page_frame::PageFrame;
use crate::shared::query_cache::use_query_cache;
use crate::shared::toast::use_toast;

/// Строка таблицы: по одной на пару, самая свежая версия
#[derive(Clone, PartialEq)]
struct PriceRow {
    id: Uuid,
    city_id: Uuid,
    service_type_id: Uuid,
    city: String,
    service: String,
    base_price: f64,
    min_fare: f64,
    unit: &'static str,
    business_status: bool,
    updated: String,
}

fn price_rows(configs: &[PriceConfiguration], lookups: &Lookups) -> Vec<PriceRow> {
    dedupe_by_scope(configs)
        .into_iter()
        .map(|c| PriceRow {
            id: c.id(),
            city_id: c.city_id,
            service_type_id: c.service_type_id,
            city: lookups.city_name(Some(c.city_id)),
            service: lookups.service_type_name(Some(c.service_type_id)),
            base_price: c.rates.base_price,
            min_fare: c.rates.min_fare,
            unit: c.rates.distance_unit.as_str(),
            business_status: c.flags.business_status,
            updated: format_datetime(&c.meta.updated_date),
        })
        .collect()
}

#[component]
pub fn PriceConfigurationScreen() -> impl IntoView {
    let cache = use_query_cache();
    let toast = use_toast();
    let lookups = use_lookups();
    let vm = PriceEditorViewModel::new(cache);

    let configs = RwSignal::new(Vec::<PriceConfiguration>::new());
    let loaded = RwSignal::new(false);
    let city = RwSignal::new(None::<Uuid>);
    let service = RwSignal::new(None::<Uuid>);

    Effect::new(move |_| {
        cache.version(&PriceConfiguration::query_key());
        spawn_local(async move {
            match EntityApi::<PriceConfiguration>::new()
                .list(&ListParams::sorted("-updated_date"))
                .await
            {
                Ok(list) => configs.set(list),
                Err(e) => log::warn!("Failed to load price configurations: {}", e),
            }
            loaded.set(true);
        });
    });

    let open_editor = move |city_id: Option<Uuid>, service_id: Option<Uuid>| {
        let country = city_id.and_then(|id| lookups.with_untracked(|l| l.country_of_city(id)));
        let opened = configs.with_untracked(|list| {
            PriceEditorState::open(country, city_id, service_id, list)
        });
        match opened {
            Ok(state) => vm.open(state),
            Err(e) => toast.error(e),
        }
    };

    let delete_config = move |row: PriceRow| {
        if !confirm(&format!("Delete pricing for {} · {}?", row.city, row.service)) {
            return;
        }
        spawn_local(async move {
            match EntityApi::<PriceConfiguration>::new()
                .delete(&row.id.to_string())
                .await
            {
                Ok(()) => {
                    toast.success("Price configuration deleted");
                    cache.invalidate(&PriceConfiguration::query_key());
                }
                Err(e) => toast.error(friendly_error(&e)),
            }
        });
    };

    let rows = Memo::new(move |_| lookups.with(|l| configs.with(|list| price_rows(list, l))));

    view! {
        <PageFrame
            section=AdminSection::Pricing
            subtitle="One configuration per city and service type"
        >
            <Show
                when=move || !vm.is_open()
                fallback=move || view! { <PriceEditor vm=vm lookups=lookups /> }
            >
                <div class="filter-bar">
                    {reference_field(
                        "City",
                        move || lookups.with(|l| l.city_options()),
                        move || city.get(),
                        move |v| city.set(v),
                    )}
                    {reference_field(
                        "Service Type",
                        move || lookups.with(|l| l.service_type_options()),
                        move || service.get(),
                        move |v| service.set(v),
                    )}
                    <button
                        class="button button--primary"
                        on:click=move |_| open_editor(city.get_untracked(), service.get_untracked())
                    >
                        "Configure"
                    </button>
                </div>
                <Show
                    when=move || loaded.get()
                    fallback=|| view! { <div class="page__loading">"Loading..."</div> }
                >
                    <table class="table__data">
                        <thead>
                            <tr>
                                <th>"City"</th>
                                <th>"Service"</th>
                                <th>"Base Price"</th>
                                <th>"Min Fare"</th>
                                <th>"Unit"</th>
                                <th>"Status"</th>
                                <th>"Updated"</th>
                                <th class="table__actions"></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || rows.with(|r| r.is_empty())>
                                <tr>
                                    <td colspan="8" class="table__empty">"No price configurations yet"</td>
                                </tr>
                            </Show>
                            <For
                                each=move || rows.get()
                                key=|r| (r.id, r.updated.clone(), r.city.clone(), r.service.clone())
                                children=move |row: PriceRow| {
                                    let (city_id, service_id) = (row.city_id, row.service_type_id);
                                    let for_delete = row.clone();
                                    view! {
                                        <tr>
                                            <td>{row.city.clone()}</td>
                                            <td>{row.service.clone()}</td>
                                            <td>{format_money(row.base_price)}</td>
                                            <td>{format_money(row.min_fare)}</td>
                                            <td>{row.unit}</td>
                                            <td>{active_badge(row.business_status)}</td>
                                            <td>{row.updated.clone()}</td>
                                            <td class="table__actions">
                                                <button
                                                    class="button button--small"
                                                    on:click=move |_| open_editor(Some(city_id), Some(service_id))
                                                >
                                                    "Edit"
                                                </button>
                                                <button
                                                    class="button button--small button--danger"
                                                    on:click=move |_| delete_config(for_delete.clone())
                                                >
                                                    "Delete"
                                                </button>
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_price_configuration::aggregate::{PriceFlags, PriceRates};
    use contracts::domain::common::RecordMeta;

    fn config(city: Uuid, service: Uuid, base_price: f64) -> PriceConfiguration {
        let mut rates = PriceRates::default();
        rates.base_price = base_price;
        PriceConfiguration {
            meta: RecordMeta::new(),
            country_id: Uuid::new_v4(),
            city_id: city,
            service_type_id: service,
            rates,
            flags: PriceFlags::default(),
            surge_times: vec![],
            zone_to_zone_prices: vec![],
            airport_to_city_prices: vec![],
            city_to_city_prices: vec![],
            rental_packages: vec![],
            rich_area_surge: vec![],
        }
    }

    #[test]
    fn test_price_rows_one_per_pair() {
        let city = Uuid::new_v4();
        let service = Uuid::new_v4();
        let mut newer = config(city, service, 9.0);
        newer.meta.updated_date = newer.meta.updated_date + chrono::Duration::minutes(1);
        let items = vec![config(city, service, 6.0), newer];

        let rows = price_rows(&items, &Lookups::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].base_price, 9.0);
        assert_eq!(rows[0].unit, "km");
    }
}
