//! Раздел "Analytics": разрезы по уже загруженному списку поездок.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::dashboards::d400_today_summary::summary::{created_on, today_key};
use crate::domain::a002_city::aggregate::City;
use crate::domain::a013_ride::aggregate::{Ride, RideStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: RideStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityBreakdown {
    pub city_name: String,
    pub rides: usize,
    pub completed: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    /// `YYYY-MM-DD`
    pub day: String,
    pub rides: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RideAnalytics {
    pub by_status: Vec<StatusCount>,
    pub by_city: Vec<CityBreakdown>,
    pub last_days: Vec<DailyRevenue>,
    /// Доля завершённых среди завершённых и отменённых, %
    pub completion_rate: Option<f64>,
    pub average_fare: Option<f64>,
}

const UNKNOWN_CITY: &str = "Unassigned";

fn completed_fare(ride: &Ride) -> Option<f64> {
    (ride.status == RideStatus::Completed)
        .then_some(ride.fare)
        .flatten()
}

pub fn build_analytics(
    rides: &[Ride],
    cities: &[City],
    now: DateTime<Utc>,
    days: usize,
) -> RideAnalytics {
    let by_status = RideStatus::all()
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: rides.iter().filter(|r| r.status == status).count(),
        })
        .collect();

    let names: HashMap<Uuid, &str> = cities
        .iter()
        .map(|c| (c.meta.id, c.name.as_str()))
        .collect();
    let mut grouped: HashMap<String, CityBreakdown> = HashMap::new();
    for ride in rides {
        let name = ride
            .city_id
            .and_then(|id| names.get(&id).copied())
            .unwrap_or(UNKNOWN_CITY)
            .to_string();
        let entry = grouped.entry(name.clone()).or_insert_with(|| CityBreakdown {
            city_name: name,
            rides: 0,
            completed: 0,
            revenue: 0.0,
        });
        entry.rides += 1;
        if ride.status == RideStatus::Completed {
            entry.completed += 1;
        }
        entry.revenue += completed_fare(ride).unwrap_or(0.0);
    }
    let mut by_city: Vec<CityBreakdown> = grouped.into_values().collect();
    by_city.sort_by(|a, b| b.rides.cmp(&a.rides).then(a.city_name.cmp(&b.city_name)));

    let last_days = (0..days)
        .rev()
        .map(|offset| {
            let day = today_key(now - Duration::days(offset as i64));
            let on_day: Vec<&Ride> = rides
                .iter()
                .filter(|r| created_on(&r.meta.created_date, &day))
                .collect();
            DailyRevenue {
                rides: on_day.len(),
                revenue: on_day.iter().filter_map(|r| completed_fare(r)).sum(),
                day,
            }
        })
        .collect();

    let completed = rides
        .iter()
        .filter(|r| r.status == RideStatus::Completed)
        .count();
    let cancelled = rides
        .iter()
        .filter(|r| r.status == RideStatus::Cancelled)
        .count();
    let completion_rate = (completed + cancelled > 0)
        .then(|| completed as f64 * 100.0 / (completed + cancelled) as f64);

    let fares: Vec<f64> = rides.iter().filter_map(completed_fare).collect();
    let average_fare = (!fares.is_empty()).then(|| fares.iter().sum::<f64>() / fares.len() as f64);

    RideAnalytics {
        by_status,
        by_city,
        last_days,
        completion_rate,
        average_fare,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::RecordMeta;
    use chrono::TimeZone;

    fn ride(created: DateTime<Utc>, status: RideStatus, fare: Option<f64>, city: Option<Uuid>) -> Ride {
        let mut r = Ride::new_for_insert(Uuid::new_v4(), "Main st".into());
        r.meta = RecordMeta::at(Uuid::new_v4(), created);
        r.status = status;
        r.fare = fare;
        r.city_id = city;
        r
    }

    #[test]
    fn test_build_analytics() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let miami = City::new_for_insert("Miami".into(), Uuid::new_v4());
        let rides = vec![
            ride(now, RideStatus::Completed, Some(10.0), Some(miami.meta.id)),
            ride(now - Duration::days(1), RideStatus::Completed, Some(20.0), Some(miami.meta.id)),
            ride(now - Duration::days(1), RideStatus::Cancelled, None, None),
            ride(now - Duration::days(30), RideStatus::Requested, None, None),
        ];

        let a = build_analytics(&rides, &[miami], now, 7);

        let completed = a.by_status.iter().find(|s| s.status == RideStatus::Completed).unwrap();
        assert_eq!(completed.count, 2);
        assert_eq!(a.by_city[0].city_name, "Miami");
        assert_eq!(a.by_city[0].revenue, 30.0);
        assert_eq!(a.by_city[1].city_name, UNKNOWN_CITY);
        assert_eq!(a.by_city[1].rides, 2);

        assert_eq!(a.last_days.len(), 7);
        assert_eq!(a.last_days[6].day, "2024-05-10");
        assert_eq!(a.last_days[6].revenue, 10.0);
        assert_eq!(a.last_days[5].rides, 2);

        assert!((a.completion_rate.unwrap() - 66.666).abs() < 0.01);
        assert_eq!(a.average_fare, Some(15.0));
    }

    #[test]
    fn test_empty_analytics() {
        let a = build_analytics(&[], &[], Utc::now(), 3);
        assert_eq!(a.completion_rate, None);
        assert_eq!(a.average_fare, None);
        assert!(a.by_city.is_empty());
        assert_eq!(a.last_days.len(), 3);
    }
}
