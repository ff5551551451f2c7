/// Поиск и фильтры для списков
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Поле поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для подсветки)
    #[prop(into)]
    value: Signal<String>,
    /// Вызывается через 300 мс после последнего ввода
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    // Локальное значение input (до debounce)
    let (input_value, set_input_value) = signal(String::new());
    let debounce_timeout = StoredValue::new(None::<i32>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());

        let Some(window) = web_sys::window() else {
            on_change.run(new_value);
            return;
        };
        if let Some(timeout_id) = debounce_timeout.get_value() {
            window.clear_timeout_with_handle(timeout_id);
        }

        let closure = wasm_bindgen::closure::Closure::once_into_js(move || {
            on_change.run(new_value);
        });
        let timeout_id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.unchecked_ref::<js_sys::Function>(),
                300,
            )
            .ok();
        debounce_timeout.set_value(timeout_id);
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input" class:search-input--active=is_filter_active>
            {crate::shared::icons::icon("search")}
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Выпадающий фильтр по статусу; значение "all" означает без фильтра
#[component]
pub fn StatusFilter(
    value: RwSignal<String>,
    /// Пары (значение, подпись)
    options: Vec<(&'static str, &'static str)>,
) -> impl IntoView {
    view! {
        <select
            class="status-filter"
            prop:value=move || value.get()
            on:change=move |ev| value.set(event_target_value(&ev))
        >
            <option value="all">"All statuses"</option>
            {options
                .into_iter()
                .map(|(v, label)| view! { <option value=v>{label}</option> })
                .collect_view()}
        </select>
    }
}

/// `None` для "all" и пустого значения
pub fn selected_filter(value: &str) -> Option<&str> {
    match value {
        "" | "all" => None,
        v => Some(v),
    }
}
