//! Плитки главной панели: сводка "за сегодня" по уже загруженным спискам.
//!
//! "Сегодня" определяется текстовым сравнением: запись относится к дню,
//! если её `created_date` в RFC 3339 начинается с `YYYY-MM-DD`. Дата
//! хранится в UTC, а ключ дня берётся из UTC-времени клиента, поэтому
//! около полуночи по местному времени записи относятся к "чужим" суткам.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a011_driver_profile::aggregate::{DriverProfile, DriverStatus};
use crate::domain::a012_user::aggregate::User;
use crate::domain::a013_ride::aggregate::{Ride, RideStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodaySummary {
    pub today_requests: usize,
    pub completed_today: usize,
    pub cancelled_today: usize,
    /// Запланированные поездки независимо от даты создания
    pub scheduled: usize,
    pub active_now: usize,
    pub revenue_today: f64,
    pub revenue_total: f64,
    pub total_users: usize,
    pub total_drivers: usize,
    pub online_drivers: usize,
    pub pending_drivers: usize,
}

/// Ключ дня `YYYY-MM-DD` для момента `now` (UTC)
pub fn today_key(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// Текстовое сравнение префикса даты создания
pub fn created_on(created_date: &DateTime<Utc>, day_key: &str) -> bool {
    created_date.to_rfc3339().starts_with(day_key)
}

pub fn build_summary(
    rides: &[Ride],
    users: &[User],
    drivers: &[DriverProfile],
    day_key: &str,
) -> TodaySummary {
    let today: Vec<&Ride> = rides
        .iter()
        .filter(|r| created_on(&r.meta.created_date, day_key))
        .collect();

    let completed_fare = |r: &&Ride| -> Option<f64> {
        (r.status == RideStatus::Completed)
            .then_some(r.fare)
            .flatten()
    };

    TodaySummary {
        today_requests: today.len(),
        completed_today: today
            .iter()
            .filter(|r| r.status == RideStatus::Completed)
            .count(),
        cancelled_today: today
            .iter()
            .filter(|r| r.status == RideStatus::Cancelled)
            .count(),
        scheduled: rides
            .iter()
            .filter(|r| r.status == RideStatus::Scheduled)
            .count(),
        active_now: rides.iter().filter(|r| r.status.is_active()).count(),
        revenue_today: today.iter().filter_map(completed_fare).sum(),
        revenue_total: rides.iter().filter_map(|r| completed_fare(&r)).sum(),
        total_users: users.len(),
        total_drivers: drivers.len(),
        online_drivers: drivers.iter().filter(|d| d.is_online).count(),
        pending_drivers: drivers
            .iter()
            .filter(|d| d.status == DriverStatus::Pending)
            .count(),
    }
}

/// Последние поездки для таблицы на главной
pub fn recent_rides(rides: &[Ride], limit: usize) -> Vec<&Ride> {
    let mut sorted: Vec<&Ride> = rides.iter().collect();
    sorted.sort_by(|a, b| b.meta.created_date.cmp(&a.meta.created_date));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::RecordMeta;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn ride_at(created: &str, status: RideStatus, fare: Option<f64>) -> Ride {
        let created: DateTime<Utc> = DateTime::parse_from_rfc3339(created)
            .unwrap()
            .with_timezone(&Utc);
        let mut ride = Ride::new_for_insert(Uuid::new_v4(), "Praça do Comércio".into());
        ride.meta = RecordMeta::at(Uuid::new_v4(), created);
        ride.status = status;
        ride.fare = fare;
        if status == RideStatus::Scheduled {
            ride.scheduled_at = Some(created);
        }
        ride
    }

    #[test]
    fn test_today_key() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 23, 45, 0).unwrap();
        assert_eq!(today_key(now), "2024-05-01");
    }

    /// Golden output: текстовое сравнение префикса даты
    ///
    /// Клиент в UTC+3, местное время 2 мая 02:45, в UTC это
    /// 2024-05-01T23:45Z и ключ дня "2024-05-01". В "сегодня" попадают
    /// записи с UTC-датой 1 мая, в том числе 2024-05-01T00:00Z (03:00
    /// местного 1 мая, то есть вчера по местному календарю). Запись
    /// 2024-05-02T00:10Z (03:10 местного 2 мая) не попадает.
    #[test]
    fn test_golden_today_prefix_semantics_across_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 23, 45, 0).unwrap();
        let key = today_key(now);

        let rides = vec![
            ride_at("2024-05-01T00:00:00Z", RideStatus::Completed, Some(10.0)),
            ride_at("2024-05-01T22:30:00+00:00", RideStatus::Completed, Some(15.0)),
            ride_at("2024-05-01T23:59:59Z", RideStatus::Cancelled, None),
            ride_at("2024-05-02T00:10:00Z", RideStatus::Completed, Some(20.0)),
            ride_at("2024-04-30T23:59:59Z", RideStatus::Completed, Some(8.0)),
            // +03:00 в источнике нормализуется в UTC при разборе
            ride_at("2024-05-02T01:30:00+03:00", RideStatus::Requested, None),
        ];

        let summary = build_summary(&rides, &[], &[], &key);
        assert_eq!(summary.today_requests, 4);
        assert_eq!(summary.completed_today, 2);
        assert_eq!(summary.cancelled_today, 1);
        assert_eq!(summary.revenue_today, 25.0);
        assert_eq!(summary.revenue_total, 53.0);

        let texts: Vec<bool> = rides
            .iter()
            .map(|r| created_on(&r.meta.created_date, &key))
            .collect();
        assert_eq!(texts, vec![true, true, true, false, false, true]);
    }

    #[test]
    fn test_driver_and_scheduled_counts() {
        let mut online = DriverProfile::new_for_insert("A".into(), "1".into());
        online.is_online = true;
        online.status = DriverStatus::Approved;
        let pending = DriverProfile::new_for_insert("B".into(), "2".into());

        let rides = vec![
            ride_at("2024-05-03T09:00:00Z", RideStatus::Scheduled, None),
            ride_at("2024-05-01T09:00:00Z", RideStatus::InProgress, None),
        ];
        let users = vec![User::new_for_insert("Rider".into(), "r@x.io".into())];
        let summary = build_summary(&rides, &users, &[online, pending], "2024-05-01");
        assert_eq!(summary.scheduled, 1);
        assert_eq!(summary.active_now, 1);
        assert_eq!(summary.total_users, 1);
        assert_eq!(summary.total_drivers, 2);
        assert_eq!(summary.online_drivers, 1);
        assert_eq!(summary.pending_drivers, 1);
    }

    #[test]
    fn test_recent_rides() {
        let rides = vec![
            ride_at("2024-05-01T09:00:00Z", RideStatus::Completed, None),
            ride_at("2024-05-03T09:00:00Z", RideStatus::Completed, None),
            ride_at("2024-05-02T09:00:00Z", RideStatus::Completed, None),
        ];
        let recent = recent_rides(&rides, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].meta.created_date.to_rfc3339(), "2024-05-03T09:00:00+00:00");
    }
}
