use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{require_text, EntityRecord, GeoPoint, RecordMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Requested,
    Scheduled,
    Accepted,
    Arriving,
    InProgress,
    Completed,
    Cancelled,
}

impl RideStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Requested => "requested",
            RideStatus::Scheduled => "scheduled",
            RideStatus::Accepted => "accepted",
            RideStatus::Arriving => "arriving",
            RideStatus::InProgress => "in_progress",
            RideStatus::Completed => "completed",
            RideStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RideStatus::Requested => "Requested",
            RideStatus::Scheduled => "Scheduled",
            RideStatus::Accepted => "Accepted",
            RideStatus::Arriving => "Arriving",
            RideStatus::InProgress => "In progress",
            RideStatus::Completed => "Completed",
            RideStatus::Cancelled => "Cancelled",
        }
    }

    pub fn all() -> [RideStatus; 7] {
        [
            RideStatus::Requested,
            RideStatus::Scheduled,
            RideStatus::Accepted,
            RideStatus::Arriving,
            RideStatus::InProgress,
            RideStatus::Completed,
            RideStatus::Cancelled,
        ]
    }

    /// Водитель назначен и поездка ещё не завершена
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            RideStatus::Accepted | RideStatus::Arriving | RideStatus::InProgress
        )
    }
}

/// Поездка
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub rider_id: Uuid,
    pub pickup_address: String,
    pub status: RideStatus,
    #[serde(default)]
    pub driver_id: Option<Uuid>,
    #[serde(default)]
    pub dropoff_address: String,
    #[serde(default)]
    pub service_type_id: Option<Uuid>,
    #[serde(default)]
    pub city_id: Option<Uuid>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fare: Option<f64>,
    /// Расстояние в единицах конфигурации тарифа
    #[serde(default)]
    pub distance: Option<f64>,
    /// Длительность, мин
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub driver_location: Option<GeoPoint>,
}

impl Ride {
    pub fn new_for_insert(rider_id: Uuid, pickup_address: String) -> Self {
        Self {
            meta: RecordMeta::new(),
            rider_id,
            pickup_address,
            status: RideStatus::Requested,
            driver_id: None,
            dropoff_address: String::new(),
            service_type_id: None,
            city_id: None,
            scheduled_at: None,
            fare: None,
            distance: None,
            duration: None,
            payment_method: None,
            driver_location: None,
        }
    }

    /// Активная поездка водителя из списка
    pub fn find_active_for_driver(rides: &[Ride], driver_id: Uuid) -> Option<&Ride> {
        rides
            .iter()
            .filter(|r| r.driver_id == Some(driver_id) && r.status.is_active())
            .max_by_key(|r| r.meta.created_date)
    }

    /// Копия активной поездки водителя с новой позицией; `None`, если поездки нет
    pub fn track_driver(rides: &[Ride], driver_id: Uuid, position: GeoPoint) -> Option<Ride> {
        let mut ride = Self::find_active_for_driver(rides, driver_id)?.clone();
        ride.driver_location = Some(position);
        Some(ride)
    }
}

impl EntityRecord for Ride {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), String> {
        require_text(&self.pickup_address, "Pickup address")?;
        if self.status == RideStatus::Scheduled && self.scheduled_at.is_none() {
            return Err("Scheduled rides need a pickup time".to_string());
        }
        if self.fare.is_some_and(|f| f < 0.0) {
            return Err("Fare cannot be negative".to_string());
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a013"
    }

    fn collection_name() -> &'static str {
        "ride"
    }

    fn element_name() -> &'static str {
        "Ride"
    }

    fn list_name() -> &'static str {
        "Rides"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_find_active_for_driver() {
        let driver = Uuid::new_v4();
        let mut done = Ride::new_for_insert(Uuid::new_v4(), "Rua Augusta 1".into());
        done.driver_id = Some(driver);
        done.status = RideStatus::Completed;

        let mut current = Ride::new_for_insert(Uuid::new_v4(), "Rossio".into());
        current.driver_id = Some(driver);
        current.status = RideStatus::InProgress;
        current.meta.created_date = done.meta.created_date + Duration::minutes(30);

        let rides = vec![done, current.clone()];
        let found = Ride::find_active_for_driver(&rides, driver).unwrap();
        assert_eq!(found.meta.id, current.meta.id);
        assert!(Ride::find_active_for_driver(&rides, Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_track_driver_updates_only_active_ride() {
        let driver = Uuid::new_v4();
        let mut done = Ride::new_for_insert(Uuid::new_v4(), "Rua Augusta 1".into());
        done.driver_id = Some(driver);
        done.status = RideStatus::Completed;
        let mut current = Ride::new_for_insert(Uuid::new_v4(), "Rossio".into());
        current.driver_id = Some(driver);
        current.status = RideStatus::Arriving;

        let rides = vec![done, current.clone()];
        let position = GeoPoint::new(38.71, -9.14);
        let tracked = Ride::track_driver(&rides, driver, position).unwrap();
        assert_eq!(tracked.meta.id, current.meta.id);
        assert_eq!(tracked.driver_location, Some(position));
        // исходный список не меняется
        assert_eq!(rides[1].driver_location, current.driver_location);

        assert!(Ride::track_driver(&rides[..1], driver, position).is_none());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&RideStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }
}
