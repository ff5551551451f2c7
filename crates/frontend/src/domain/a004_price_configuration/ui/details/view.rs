use contracts::domain::a004_price_configuration::aggregate::{DistanceUnit, PriceFlags, PriceRates};
use contracts::domain::a004_price_configuration::editor::{
    EditorTab, PriceEditorState, PriceList, RentalPackageDraft,
};
use contracts::domain::a004_price_configuration::payload::PriceDraft;
use contracts::domain::a004_price_configuration::surge::{SurgeTime, Weekday};
use leptos::prelude::*;
use thaw::{Switch, Tab, TabList};
use uuid::Uuid;

use super::view_model::{tab_value, PriceEditorViewModel};
use crate::shared::components::banner::Banner;
use crate::shared::crud::fields::{integer_field, number_field, reference_field, select_field};
use crate::shared::format::format_money;
use crate::shared::lookups::Lookups;

fn read_state<R: Default>(vm: PriceEditorViewModel, f: impl FnOnce(&PriceEditorState) -> R) -> R {
    vm.state.with(|s| s.as_ref().map(f).unwrap_or_default())
}

fn rate_field(
    vm: PriceEditorViewModel,
    label: &'static str,
    read: fn(&PriceRates) -> f64,
    write: fn(&mut PriceRates, f64),
) -> AnyView {
    number_field(
        label,
        move || read_state(vm, |s| read(&s.draft.rates)),
        move |v| vm.edit(|s| write(&mut s.draft.rates, v)),
    )
}

fn rate_count_field(
    vm: PriceEditorViewModel,
    label: &'static str,
    read: fn(&PriceRates) -> u32,
    write: fn(&mut PriceRates, u32),
) -> AnyView {
    integer_field(
        label,
        move || read_state(vm, |s| read(&s.draft.rates)),
        move |v| vm.edit(|s| write(&mut s.draft.rates, v)),
    )
}

/// Переключатель флага; thaw `Switch` работает со своим сигналом
fn flag_switch(
    vm: PriceEditorViewModel,
    label: &'static str,
    read: fn(&PriceFlags) -> bool,
    write: fn(&mut PriceFlags, bool),
) -> AnyView {
    let checked = RwSignal::new(vm.state.with_untracked(|s| {
        s.as_ref().map(|s| read(&s.draft.flags)).unwrap_or_default()
    }));
    Effect::new(move |_| {
        let value = checked.get();
        vm.edit(|s| write(&mut s.draft.flags, value));
    });
    view! { <Switch checked=checked label=label /> }.into_any()
}

fn remove_button(vm: PriceEditorViewModel, list: PriceList, index: usize) -> impl IntoView {
    view! {
        <button
            class="button button--small button--danger"
            on:click=move |_| vm.edit(|s| s.remove_row(list, index))
        >
            "Remove"
        </button>
    }
}

fn empty_row(colspan: u32, text: &'static str) -> AnyView {
    view! {
        <tr>
            <td colspan=colspan class="table__empty">{text}</td>
        </tr>
    }
    .into_any()
}

/// Вкладка с фиксированными ценами между двумя точками
#[derive(Clone, Copy)]
struct PairTab {
    list: PriceList,
    from_label: &'static str,
    to_label: &'static str,
    from_options: fn(&Lookups) -> Vec<(String, String)>,
    to_options: fn(&Lookups) -> Vec<(String, String)>,
    from_name: fn(&Lookups, Uuid) -> String,
    to_name: fn(&Lookups, Uuid) -> String,
    rows: fn(&PriceDraft) -> Vec<(Uuid, Uuid, f64)>,
    add: fn(&mut PriceEditorState, Option<Uuid>, Option<Uuid>, &str) -> Result<(), String>,
}

fn zone_to_zone_tab() -> PairTab {
    PairTab {
        list: PriceList::ZoneToZone,
        from_label: "From Zone",
        to_label: "To Zone",
        from_options: |l| l.zone_options(),
        to_options: |l| l.zone_options(),
        from_name: |l, id| l.zone_name(id),
        to_name: |l, id| l.zone_name(id),
        rows: |d| {
            d.zone_to_zone_prices
                .iter()
                .map(|p| (p.from_zone_id, p.to_zone_id, p.amount))
                .collect()
        },
        add: |s, from, to, amount| s.add_zone_to_zone(from, to, amount),
    }
}

fn airport_to_city_tab() -> PairTab {
    PairTab {
        list: PriceList::AirportToCity,
        from_label: "From Airport",
        to_label: "To City",
        from_options: |l| l.airport_options(),
        to_options: |l| l.city_options(),
        from_name: |l, id| l.zone_name(id),
        to_name: |l, id| l.city_name(Some(id)),
        rows: |d| {
            d.airport_to_city_prices
                .iter()
                .map(|p| (p.from_airport_id, p.to_city_id, p.amount))
                .collect()
        },
        add: |s, from, to, amount| s.add_airport_to_city(from, to, amount),
    }
}

fn city_to_city_tab() -> PairTab {
    PairTab {
        list: PriceList::CityToCity,
        from_label: "From City",
        to_label: "To City",
        from_options: |l| l.city_options(),
        to_options: |l| l.city_options(),
        from_name: |l, id| l.city_name(Some(id)),
        to_name: |l, id| l.city_name(Some(id)),
        rows: |d| {
            d.city_to_city_prices
                .iter()
                .map(|p| (p.from_city_id, p.to_city_id, p.amount))
                .collect()
        },
        add: |s, from, to, amount| s.add_city_to_city(from, to, amount),
    }
}

fn pair_price_tab(vm: PriceEditorViewModel, lookups: RwSignal<Lookups>, tab: PairTab) -> AnyView {
    let from = RwSignal::new(None::<Uuid>);
    let to = RwSignal::new(None::<Uuid>);
    let amount = RwSignal::new(String::new());

    let add = move |_| {
        let added = vm.try_edit(|s| {
            (tab.add)(s, from.get_untracked(), to.get_untracked(), &amount.get_untracked())
        });
        if added {
            amount.set(String::new());
        }
    };

    view! {
        <div class="price-editor__add-row">
            {reference_field(
                tab.from_label,
                move || lookups.with(|l| (tab.from_options)(l)),
                move || from.get(),
                move |v| from.set(v),
            )}
            {reference_field(
                tab.to_label,
                move || lookups.with(|l| (tab.to_options)(l)),
                move || to.get(),
                move |v| to.set(v),
            )}
            <label class="form__group">
                <span class="form__label">"Amount"</span>
                <input
                    class="form__input"
                    type="number"
                    step="any"
                    prop:value=move || amount.get()
                    on:input=move |ev| amount.set(event_target_value(&ev))
                />
            </label>
            <button class="button button--primary" on:click=add>"Add"</button>
        </div>
        <table class="table__data">
            <thead>
                <tr>
                    <th>{tab.from_label}</th>
                    <th>{tab.to_label}</th>
                    <th>"Amount"</th>
                    <th class="table__actions"></th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let rows = read_state(vm, |s| (tab.rows)(&s.draft));
                    if rows.is_empty() {
                        return empty_row(4, "No prices added yet");
                    }
                    rows.into_iter()
                        .enumerate()
                        .map(|(index, (from_id, to_id, value))| {
                            let (from_name, to_name) = lookups.with_untracked(|l| {
                                ((tab.from_name)(l, from_id), (tab.to_name)(l, to_id))
                            });
                            view! {
                                <tr>
                                    <td>{from_name}</td>
                                    <td>{to_name}</td>
                                    <td>{format_money(value)}</td>
                                    <td class="table__actions">{remove_button(vm, tab.list, index)}</td>
                                </tr>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </tbody>
        </table>
    }
    .into_any()
}

fn time_input(
    label: &'static str,
    get: impl Fn() -> String + Send + Sync + 'static,
    set: impl Fn(String) + 'static,
) -> impl IntoView {
    view! {
        <label class="form__group">
            <span class="form__label">{label}</span>
            <input
                class="form__input"
                type="time"
                prop:value=get
                on:input=move |ev| set(event_target_value(&ev))
            />
        </label>
    }
}

/// Часы пик: семь дней, у каждого свой список интервалов
fn surge_hours_editor(vm: PriceEditorViewModel) -> AnyView {
    let selected = Memo::new(move |_| {
        vm.state
            .with(|s| s.as_ref().map(|s| s.selected_day).unwrap_or(Weekday::Monday))
    });
    let day_active = Memo::new(move |_| {
        read_state(vm, |s| s.draft.surge.day(s.selected_day).is_surge)
    });

    let chips = Weekday::all()
        .into_iter()
        .map(|day| {
            let is_surge = move || read_state(vm, |s| s.draft.surge.day(day).is_surge);
            view! {
                <button
                    class="surge-days__chip"
                    class:surge-days__chip--selected=move || selected.get() == day
                    class:surge-days__chip--on=is_surge
                    on:click=move |_| vm.edit(|s| s.selected_day = day)
                >
                    {day.short_name()}
                </button>
            }
        })
        .collect_view();

    let add_time = move |_| {
        vm.try_edit(|s| s.add_surge_time());
    };

    view! {
        <div class="surge-days">
            <div class="surge-days__chips">{chips}</div>
            <label class="form__check">
                <input
                    type="checkbox"
                    prop:checked=move || day_active.get()
                    on:change=move |_| vm.edit(|s| {
                        let day = s.selected_day;
                        s.toggle_day(day);
                    })
                />
                <span>{move || format!("Surge pricing on {}", selected.get().name())}</span>
            </label>
            <div class="price-editor__add-row">
                {time_input(
                    "Start",
                    move || read_state(vm, |s| s.surge_input.start_time.clone()),
                    move |v| vm.edit(|s| s.surge_input.start_time = v),
                )}
                {time_input(
                    "End",
                    move || read_state(vm, |s| s.surge_input.end_time.clone()),
                    move |v| vm.edit(|s| s.surge_input.end_time = v),
                )}
                <label class="form__group">
                    <span class="form__label">"Multiplier"</span>
                    <input
                        class="form__input"
                        type="number"
                        step="0.1"
                        prop:value=move || read_state(vm, |s| s.surge_input.multiplier.clone())
                        on:input=move |ev| {
                            let v = event_target_value(&ev);
                            vm.edit(|s| s.surge_input.multiplier = v);
                        }
                    />
                </label>
                <button class="button button--primary" on:click=add_time>"Add Time"</button>
            </div>
            <ul class="surge-days__times">
                {move || {
                    let day = selected.get();
                    let times: Vec<SurgeTime> = read_state(vm, |s| s.draft.surge.day(day).times.clone());
                    if times.is_empty() {
                        return view! { <li class="table__muted">"No surge times for this day"</li> }.into_any();
                    }
                    times
                        .into_iter()
                        .enumerate()
                        .map(|(index, t)| {
                            view! {
                                <li>
                                    <span>{format!("{} – {} × {}", t.start_time, t.end_time, t.multiplier)}</span>
                                    <button
                                        class="button button--small button--danger"
                                        on:click=move |_| vm.edit(|s| s.remove_surge_time(day, index))
                                    >
                                        "Remove"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </ul>
        </div>
    }
    .into_any()
}

fn basic_rates_tab(vm: PriceEditorViewModel) -> AnyView {
    let surge_enabled = Memo::new(move |_| read_state(vm, |s| s.draft.flags.is_surge_hours));

    view! {
        <div class="form__grid">
            {rate_field(vm, "Provider Profit (%)", |r| r.provider_profit, |r, v| r.provider_profit = v)}
            {rate_field(vm, "Min Fare", |r| r.min_fare, |r, v| r.min_fare = v)}
            {rate_field(vm, "Base Price", |r| r.base_price, |r, v| r.base_price = v)}
            {rate_field(vm, "Distance for Base Price", |r| r.distance_for_base_price, |r, v| r.distance_for_base_price = v)}
            {rate_field(vm, "Price per Unit Distance", |r| r.price_per_unit_distance, |r, v| r.price_per_unit_distance = v)}
            {rate_field(vm, "Price per Unit Time", |r| r.price_per_unit_time, |r, v| r.price_per_unit_time = v)}
            {rate_count_field(
                vm,
                "Waiting Starts After (min)",
                |r| r.waiting_time_start_after_minute,
                |r, v| r.waiting_time_start_after_minute = v,
            )}
            {rate_field(vm, "Price for Waiting Time", |r| r.price_for_waiting_time, |r, v| r.price_for_waiting_time = v)}
            {rate_field(vm, "Cancellation Fee", |r| r.cancellation_fee, |r, v| r.cancellation_fee = v)}
            {rate_field(vm, "Tax", |r| r.tax, |r, v| r.tax = v)}
            {rate_field(vm, "User Tax", |r| r.user_tax, |r, v| r.user_tax = v)}
            {rate_field(vm, "User Miscellaneous Fee", |r| r.user_miscellaneous_fee, |r, v| r.user_miscellaneous_fee = v)}
            {rate_field(vm, "Provider Tax", |r| r.provider_tax, |r, v| r.provider_tax = v)}
            {rate_field(
                vm,
                "Provider Miscellaneous Fee",
                |r| r.provider_miscellaneous_fee,
                |r, v| r.provider_miscellaneous_fee = v,
            )}
            {rate_count_field(vm, "Max Space", |r| r.max_space, |r, v| r.max_space = v)}
            {select_field(
                "Distance Unit",
                || vec![
                    (DistanceUnit::Km.as_str().to_string(), "Kilometers".to_string()),
                    (DistanceUnit::Miles.as_str().to_string(), "Miles".to_string()),
                ],
                move || read_state(vm, |s| s.draft.rates.distance_unit.as_str().to_string()),
                move |v| {
                    if let Some(unit) = DistanceUnit::from_str(&v) {
                        vm.edit(|s| s.draft.rates.distance_unit = unit);
                    }
                },
            )}
        </div>
        <div class="price-editor__flags">
            {flag_switch(vm, "Business Active", |f| f.business_status, |f, v| f.business_status = v)}
            {flag_switch(vm, "Car Rental", |f| f.car_rental_business, |f, v| f.car_rental_business = v)}
            {flag_switch(vm, "Zone Pricing", |f| f.is_zone, |f, v| f.is_zone = v)}
            {flag_switch(vm, "Surge Hours", |f| f.is_surge_hours, |f, v| f.is_surge_hours = v)}
            {flag_switch(vm, "AI Pricing", |f| f.ai_pricing_enabled, |f, v| f.ai_pricing_enabled = v)}
        </div>
        <Show when=move || surge_enabled.get()>
            {surge_hours_editor(vm)}
        </Show>
    }
    .into_any()
}

fn text_input(
    label: &'static str,
    kind: &'static str,
    get: impl Fn() -> String + Send + Sync + 'static,
    set: impl Fn(String) + 'static,
) -> impl IntoView {
    view! {
        <label class="form__group">
            <span class="form__label">{label}</span>
            <input
                class="form__input"
                type=kind
                step="any"
                prop:value=get
                on:input=move |ev| set(event_target_value(&ev))
            />
        </label>
    }
}

fn car_rental_tab(vm: PriceEditorViewModel) -> AnyView {
    let input = RwSignal::new(RentalPackageDraft::default());

    let add = move |_| {
        let draft = input.get_untracked();
        if vm.try_edit(|s| s.add_rental_package(&draft)) {
            input.set(RentalPackageDraft::default());
        }
    };

    view! {
        <div class="form__grid">
            {text_input(
                "Package Name",
                "text",
                move || input.with(|d| d.package_name.clone()),
                move |v| input.update(|d| d.package_name = v),
            )}
            {text_input(
                "Distance for Base Price",
                "number",
                move || input.with(|d| d.distance_for_base_price.clone()),
                move |v| input.update(|d| d.distance_for_base_price = v),
            )}
            {text_input(
                "Hours for Base Price",
                "number",
                move || input.with(|d| d.time_for_base_price.clone()),
                move |v| input.update(|d| d.time_for_base_price = v),
            )}
            {text_input(
                "Base Price",
                "number",
                move || input.with(|d| d.base_price.clone()),
                move |v| input.update(|d| d.base_price = v),
            )}
            {text_input(
                "Price per Unit Distance",
                "number",
                move || input.with(|d| d.price_per_unit_distance.clone()),
                move |v| input.update(|d| d.price_per_unit_distance = v),
            )}
            {text_input(
                "Price per Unit Time",
                "number",
                move || input.with(|d| d.price_per_unit_time.clone()),
                move |v| input.update(|d| d.price_per_unit_time = v),
            )}
        </div>
        <button class="button button--primary" on:click=add>"Add Package"</button>
        <table class="table__data">
            <thead>
                <tr>
                    <th>"Package"</th>
                    <th>"Distance"</th>
                    <th>"Hours"</th>
                    <th>"Base Price"</th>
                    <th>"Per Distance"</th>
                    <th>"Per Time"</th>
                    <th class="table__actions"></th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let packages = read_state(vm, |s| s.draft.rental_packages.clone());
                    if packages.is_empty() {
                        return empty_row(7, "No rental packages yet");
                    }
                    packages
                        .into_iter()
                        .enumerate()
                        .map(|(index, p)| {
                            view! {
                                <tr>
                                    <td>{p.package_name}</td>
                                    <td>{p.distance_for_base_price}</td>
                                    <td>{p.time_for_base_price}</td>
                                    <td>{format_money(p.base_price)}</td>
                                    <td>{format_money(p.price_per_unit_distance)}</td>
                                    <td>{format_money(p.price_per_unit_time)}</td>
                                    <td class="table__actions">
                                        {remove_button(vm, PriceList::RentalPackages, index)}
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </tbody>
        </table>
    }
    .into_any()
}

fn rich_area_surge_tab(vm: PriceEditorViewModel, lookups: RwSignal<Lookups>) -> AnyView {
    let zone = RwSignal::new(None::<Uuid>);
    let multiplier = RwSignal::new(String::new());

    let add = move |_| {
        let value = multiplier.get_untracked();
        if vm.try_edit(|s| s.add_rich_area_surge(zone.get_untracked(), &value)) {
            multiplier.set(String::new());
        }
    };

    view! {
        <div class="price-editor__add-row">
            {reference_field(
                "Zone",
                move || lookups.with(|l| l.zone_options()),
                move || zone.get(),
                move |v| zone.set(v),
            )}
            {text_input(
                "Surge Multiplier",
                "number",
                move || multiplier.get(),
                move |v| multiplier.set(v),
            )}
            <button class="button button--primary" on:click=add>"Add"</button>
        </div>
        <table class="table__data">
            <thead>
                <tr>
                    <th>"Zone"</th>
                    <th>"Multiplier"</th>
                    <th class="table__actions"></th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let rows = read_state(vm, |s| s.draft.rich_area_surge.clone());
                    if rows.is_empty() {
                        return empty_row(3, "No rich area surge configured");
                    }
                    rows.into_iter()
                        .enumerate()
                        .map(|(index, row)| {
                            let name = lookups.with_untracked(|l| l.zone_name(row.zone_id));
                            view! {
                                <tr>
                                    <td>{name}</td>
                                    <td>{format!("× {}", row.surge_multiplier)}</td>
                                    <td class="table__actions">
                                        {remove_button(vm, PriceList::RichAreaSurge, index)}
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </tbody>
        </table>
    }
    .into_any()
}

fn disabled_notice(tab: EditorTab) -> AnyView {
    let flag = match tab {
        EditorTab::CarRental => "Car Rental",
        _ => "Zone Pricing",
    };
    view! {
        <div class="price-editor__notice">
            {format!("Enable \"{}\" on the Basic Rates tab to edit {}.", flag, tab.label())}
        </div>
    }
    .into_any()
}

/// Редактор тарифа для выбранной пары (город, тип услуги)
#[component]
pub fn PriceEditor(vm: PriceEditorViewModel, lookups: RwSignal<Lookups>) -> impl IntoView {
    let current = Memo::new(move |_| vm.current_tab());
    let enabled = Memo::new(move |_| {
        let tab = current.get();
        read_state(vm, |s| s.tab_enabled(tab))
    });
    let title = Memo::new(move |_| {
        let (city, service, update) =
            read_state(vm, |s| (Some(s.draft.city_id), Some(s.draft.service_type_id), s.is_update()));
        let (city, service) =
            lookups.with(|l| (l.city_name(city), l.service_type_name(service)));
        let verb = if update { "Edit pricing" } else { "New pricing" };
        format!("{}: {} · {}", verb, city, service)
    });

    view! {
        <div class="price-editor">
            <div class="price-editor__header">
                <h3>{move || title.get()}</h3>
                <div class="page__actions">
                    <button class="button button--secondary" on:click=move |_| vm.close()>
                        "Back to List"
                    </button>
                    <button
                        class="button button--primary"
                        prop:disabled=move || vm.saving.get()
                        on:click=move |_| vm.save_command()
                    >
                        {move || if vm.saving.get() { "Saving..." } else { "Save Configuration" }}
                    </button>
                </div>
            </div>
            <Banner state=vm.banner />
            <TabList selected_value=vm.tab>
                {EditorTab::all()
                    .into_iter()
                    .map(|tab| view! { <Tab value=tab_value(tab)>{tab.label()}</Tab> })
                    .collect_view()}
            </TabList>
            <div class="price-editor__content">
                {move || {
                    let tab = current.get();
                    if !enabled.get() {
                        return disabled_notice(tab);
                    }
                    match tab {
                        EditorTab::BasicRates => basic_rates_tab(vm),
                        EditorTab::ZoneToZone => pair_price_tab(vm, lookups, zone_to_zone_tab()),
                        EditorTab::AirportToCity => pair_price_tab(vm, lookups, airport_to_city_tab()),
                        EditorTab::CityToCity => pair_price_tab(vm, lookups, city_to_city_tab()),
                        EditorTab::CarRental => car_rental_tab(vm),
                        EditorTab::RichAreaSurge => rich_area_surge_tab(vm, lookups),
                    }
                }}
            </div>
        </div>
    }
}
