//! Часы повышенного спроса по дням недели.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn all() -> [Weekday; 7] {
        [
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
            Weekday::Sunday,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn short_name(&self) -> &'static str {
        &self.name()[..3]
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Интервал повышенного тарифа, время в формате `HH:MM`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgeTime {
    pub start_time: String,
    pub end_time: String,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgeDay {
    pub day: Weekday,
    #[serde(default)]
    pub is_surge: bool,
    #[serde(default)]
    pub times: Vec<SurgeTime>,
}

impl SurgeDay {
    fn off(day: Weekday) -> Self {
        Self {
            day,
            is_surge: false,
            times: Vec::new(),
        }
    }
}

/// Ввод нового интервала в редакторе (сырые строки из полей формы)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurgeTimeDraft {
    pub start_time: String,
    pub end_time: String,
    pub multiplier: String,
}

/// Семь фиксированных слотов по дням недели
#[derive(Debug, Clone, PartialEq)]
pub struct SurgeSchedule {
    days: Vec<SurgeDay>,
}

impl SurgeSchedule {
    pub fn new() -> Self {
        Self {
            days: Weekday::all().into_iter().map(SurgeDay::off).collect(),
        }
    }

    /// Разложить сохранённые дни по слотам
    pub fn from_stored(stored: &[SurgeDay]) -> Self {
        let mut schedule = Self::new();
        for day in stored {
            schedule.days[day.day.index()] = day.clone();
        }
        schedule
    }

    pub fn days(&self) -> &[SurgeDay] {
        &self.days
    }

    pub fn day(&self, day: Weekday) -> &SurgeDay {
        &self.days[day.index()]
    }

    /// Включить/выключить день; интервалы дня не удаляются
    pub fn toggle_day(&mut self, day: Weekday) {
        let slot = &mut self.days[day.index()];
        slot.is_surge = !slot.is_surge;
    }

    /// Добавить интервал к дню
    ///
    /// Проверяется только наличие всех трёх полей и число в множителе;
    /// порядок и пересечения проверяются при сохранении.
    pub fn add_time(&mut self, day: Weekday, draft: &SurgeTimeDraft) -> Result<(), String> {
        let start = draft.start_time.trim();
        let end = draft.end_time.trim();
        let multiplier = draft.multiplier.trim();
        if start.is_empty() || end.is_empty() || multiplier.is_empty() {
            return Err("Please fill in start time, end time and multiplier".to_string());
        }
        let multiplier: f64 = multiplier
            .parse()
            .map_err(|_| "Multiplier must be a number".to_string())?;
        self.days[day.index()].times.push(SurgeTime {
            start_time: start.to_string(),
            end_time: end.to_string(),
            multiplier,
        });
        Ok(())
    }

    pub fn remove_time(&mut self, day: Weekday, index: usize) {
        let times = &mut self.days[day.index()].times;
        if index < times.len() {
            times.remove(index);
        }
    }

    /// Дни, попадающие в запрос: включённые и с интервалами
    pub fn payload_days(&self) -> Vec<SurgeDay> {
        self.days
            .iter()
            .filter(|d| d.is_surge && !d.times.is_empty())
            .cloned()
            .collect()
    }
}

impl Default for SurgeSchedule {
    fn default() -> Self {
        Self::new()
    }
}

/// `HH:MM` → минуты от полуночи
pub fn parse_hhmm(value: &str) -> Result<u32, String> {
    let invalid = || format!("Invalid time '{}', expected HH:MM", value);
    let (h, m) = value.trim().split_once(':').ok_or_else(invalid)?;
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(h) || !two_digits(m) {
        return Err(invalid());
    }
    let hours: u32 = h.parse().map_err(|_| invalid())?;
    let minutes: u32 = m.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Проверка дня при сохранении: `start < end`, множитель > 0, без пересечений
///
/// Интервалы, касающиеся границей (10:00–12:00 и 12:00–14:00), допустимы.
pub fn validate_surge_day(day: &SurgeDay) -> Result<(), String> {
    let mut ranges: Vec<(u32, u32)> = Vec::with_capacity(day.times.len());
    for time in &day.times {
        let start = parse_hhmm(&time.start_time)?;
        let end = parse_hhmm(&time.end_time)?;
        if start >= end {
            return Err(format!(
                "{}: start time {} must be before end time {}",
                day.day.name(),
                time.start_time,
                time.end_time
            ));
        }
        if time.multiplier <= 0.0 || !time.multiplier.is_finite() {
            return Err(format!("{}: multiplier must be positive", day.day.name()));
        }
        ranges.push((start, end));
    }
    ranges.sort_unstable();
    if ranges.windows(2).any(|w| w[1].0 < w[0].1) {
        return Err(format!("{}: surge time ranges overlap", day.day.name()));
    }
    Ok(())
}

pub fn validate_surge_days(days: &[SurgeDay]) -> Result<(), String> {
    days.iter().try_for_each(validate_surge_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(start: &str, end: &str, multiplier: &str) -> SurgeTimeDraft {
        SurgeTimeDraft {
            start_time: start.into(),
            end_time: end.into(),
            multiplier: multiplier.into(),
        }
    }

    #[test]
    fn test_seven_slots() {
        let schedule = SurgeSchedule::new();
        assert_eq!(schedule.days().len(), 7);
        assert_eq!(schedule.days()[6].day, Weekday::Sunday);
        assert!(schedule.payload_days().is_empty());
    }

    #[test]
    fn test_toggle_off_and_on_preserves_times() {
        let mut schedule = SurgeSchedule::new();
        schedule.toggle_day(Weekday::Friday);
        schedule
            .add_time(Weekday::Friday, &draft("17:00", "20:00", "1.5"))
            .unwrap();

        schedule.toggle_day(Weekday::Friday);
        assert!(!schedule.day(Weekday::Friday).is_surge);
        assert_eq!(schedule.day(Weekday::Friday).times.len(), 1);

        schedule.toggle_day(Weekday::Friday);
        let friday = schedule.day(Weekday::Friday);
        assert!(friday.is_surge);
        assert_eq!(friday.times[0].start_time, "17:00");
        assert_eq!(friday.times[0].multiplier, 1.5);
    }

    #[test]
    fn test_add_time_requires_all_three_fields() {
        let mut schedule = SurgeSchedule::new();
        let err = schedule
            .add_time(Weekday::Monday, &draft("07:00", "", "1.2"))
            .unwrap_err();
        assert!(err.contains("start time, end time and multiplier"));
        assert!(schedule
            .add_time(Weekday::Monday, &draft("07:00", "09:00", "x"))
            .is_err());
        assert!(schedule.day(Weekday::Monday).times.is_empty());
    }

    #[test]
    fn test_add_time_accepts_unordered_range() {
        // порядок проверяется только при сохранении
        let mut schedule = SurgeSchedule::new();
        assert!(schedule
            .add_time(Weekday::Monday, &draft("09:00", "07:00", "1.2"))
            .is_ok());
        assert!(validate_surge_day(schedule.day(Weekday::Monday)).is_err());
    }

    #[test]
    fn test_payload_days_only_active_with_times() {
        let mut schedule = SurgeSchedule::new();
        schedule.toggle_day(Weekday::Monday);
        schedule
            .add_time(Weekday::Tuesday, &draft("07:00", "09:00", "1.2"))
            .unwrap();
        schedule.toggle_day(Weekday::Saturday);
        schedule
            .add_time(Weekday::Saturday, &draft("22:00", "23:59", "2"))
            .unwrap();

        let days = schedule.payload_days();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day, Weekday::Saturday);
    }

    #[test]
    fn test_from_stored_places_days_in_slots() {
        let stored = vec![SurgeDay {
            day: Weekday::Wednesday,
            is_surge: true,
            times: vec![SurgeTime {
                start_time: "08:00".into(),
                end_time: "10:00".into(),
                multiplier: 1.3,
            }],
        }];
        let schedule = SurgeSchedule::from_stored(&stored);
        assert_eq!(schedule.days().len(), 7);
        assert!(schedule.day(Weekday::Wednesday).is_surge);
        assert!(!schedule.day(Weekday::Monday).is_surge);
    }

    #[test]
    fn test_overlap_rejected_touching_allowed() {
        let mut day = SurgeDay::off(Weekday::Monday);
        day.times = vec![
            SurgeTime {
                start_time: "10:00".into(),
                end_time: "12:00".into(),
                multiplier: 1.2,
            },
            SurgeTime {
                start_time: "12:00".into(),
                end_time: "14:00".into(),
                multiplier: 1.4,
            },
        ];
        assert!(validate_surge_day(&day).is_ok());

        day.times.push(SurgeTime {
            start_time: "13:30".into(),
            end_time: "15:00".into(),
            multiplier: 1.1,
        });
        assert_eq!(
            validate_surge_day(&day),
            Err("Monday: surge time ranges overlap".to_string())
        );
    }

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("07:05"), Ok(425));
        assert!(parse_hhmm("24:00").is_err());
        assert!(parse_hhmm("7:5").is_err());
        assert!(parse_hhmm("noon").is_err());
        // u32::from_str принимает знак, формат HH:MM нет
        assert!(parse_hhmm("+7:00").is_err());
        assert!(parse_hhmm("07:+5").is_err());
        assert!(parse_hhmm("7:00").is_err());
        assert_eq!(parse_hhmm(" 23:59 "), Ok(1439));
    }
}
