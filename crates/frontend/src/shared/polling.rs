//! Периодический опрос для экранов с живыми данными (поездки, статус интеграций)

use gloo_timers::callback::Interval;
use leptos::prelude::*;

/// Интервал опроса списка поездок
pub const RIDES_POLL_MS: u32 = 10_000;
/// Интервал опроса статуса интеграций
pub const CONFIG_STATUS_POLL_MS: u32 = 5_000;

/// Вызывать `tick` каждые `ms` миллисекунд, пока жив владелец
///
/// Таймер снимается в `on_cleanup`, поэтому после ухода с экрана запросы прекращаются.
pub fn use_interval<F>(ms: u32, tick: F)
where
    F: Fn() + 'static,
{
    let interval = StoredValue::new_local(Some(Interval::new(ms, tick)));
    on_cleanup(move || {
        interval.update_value(|slot| {
            if let Some(i) = slot.take() {
                i.cancel();
            }
        });
    });
}
