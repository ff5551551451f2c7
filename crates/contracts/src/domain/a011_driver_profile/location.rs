use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::GeoPoint;

/// Минимальный интервал между записями координат, мс
pub const LOCATION_UPDATE_INTERVAL_MS: f64 = 10_000.0;

/// Координаты, полученные от устройства
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy: Option<f64>,
}

impl LocationFix {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Итог записи одной позиции.
///
/// Профиль водителя и активная поездка пишутся независимо: ошибка одной
/// записи не отменяет другую, обе попадают в `errors`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixReport {
    pub driver_saved: bool,
    /// Активная поездка, если нашлась
    pub ride_id: Option<Uuid>,
    pub ride_saved: bool,
    pub errors: Vec<String>,
}

impl FixReport {
    pub fn driver_written(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => self.driver_saved = true,
            Err(e) => self.errors.push(format!("driver: {}", e)),
        }
    }

    pub fn ride_lookup_failed(&mut self, error: String) {
        self.errors.push(format!("ride lookup: {}", error));
    }

    pub fn ride_written(&mut self, ride_id: Uuid, result: Result<(), String>) {
        self.ride_id = Some(ride_id);
        match result {
            Ok(()) => self.ride_saved = true,
            Err(e) => self.errors.push(format!("ride {}: {}", ride_id, e)),
        }
    }

    /// Все ошибки одной строкой
    pub fn error_message(&self) -> Option<String> {
        (!self.errors.is_empty()).then(|| self.errors.join("; "))
    }
}

/// Ограничитель частоты записи координат водителя
///
/// Пропускает не более одного тика за `min_interval_ms`. Время передаётся
/// снаружи (миллисекунды, как `Date.now()`), чтобы логику можно было
/// тестировать без браузера.
#[derive(Debug, Clone)]
pub struct LocationThrottle {
    min_interval_ms: f64,
    last_accepted_ms: Option<f64>,
}

impl LocationThrottle {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            min_interval_ms,
            last_accepted_ms: None,
        }
    }

    /// true — тик принят и отметка времени сдвинута
    pub fn accept(&mut self, now_ms: f64) -> bool {
        match self.last_accepted_ms {
            Some(last) if now_ms - last < self.min_interval_ms => false,
            _ => {
                self.last_accepted_ms = Some(now_ms);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_accepted_ms = None;
    }
}

impl Default for LocationThrottle {
    fn default() -> Self {
        Self::new(LOCATION_UPDATE_INTERVAL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_accepted() {
        let mut throttle = LocationThrottle::default();
        assert!(throttle.accept(1_000.0));
    }

    #[test]
    fn test_at_most_one_tick_per_window() {
        let mut throttle = LocationThrottle::default();
        let ticks = [0.0, 2_000.0, 5_000.0, 9_999.0, 10_000.0, 15_000.0, 20_000.0];
        let accepted: Vec<f64> = ticks
            .into_iter()
            .filter(|t| throttle.accept(*t))
            .collect();
        assert_eq!(accepted, vec![0.0, 10_000.0, 20_000.0]);
    }

    #[test]
    fn test_fix_report_keeps_ride_write_after_driver_failure() {
        let ride = Uuid::new_v4();
        let mut report = FixReport::default();
        report.driver_written(Err("HTTP 500".into()));
        report.ride_written(ride, Ok(()));

        assert!(!report.driver_saved);
        assert!(report.ride_saved);
        assert_eq!(report.ride_id, Some(ride));
        assert_eq!(report.error_message().as_deref(), Some("driver: HTTP 500"));
    }

    #[test]
    fn test_fix_report_collects_both_errors() {
        let ride = Uuid::new_v4();
        let mut report = FixReport::default();
        report.driver_written(Err("timeout".into()));
        report.ride_written(ride, Err("HTTP 409".into()));

        let message = report.error_message().unwrap();
        assert!(message.starts_with("driver: timeout; "));
        assert!(message.ends_with("HTTP 409"));
    }

    #[test]
    fn test_fix_report_clean_run() {
        let mut report = FixReport::default();
        report.driver_written(Ok(()));
        assert!(report.driver_saved);
        assert_eq!(report.ride_id, None);
        assert_eq!(report.error_message(), None);

        report.ride_lookup_failed("offline".into());
        assert_eq!(report.error_message().as_deref(), Some("ride lookup: offline"));
    }

    #[test]
    fn test_reset_accepts_immediately() {
        let mut throttle = LocationThrottle::default();
        assert!(throttle.accept(0.0));
        throttle.reset();
        assert!(throttle.accept(1.0));
    }
}
