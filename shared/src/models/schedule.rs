//! Farming schedule models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{CropType, GrowthStage};

/// Kinds of field work tracked in a schedule
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    SoilPreparation,
    Planting,
    StageMonitoring,
    Irrigation,
    PestScouting,
    Harvest,
}

/// One scheduled or performed action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmingActivity {
    pub activity_type: ActivityType,
    pub description: String,
    pub scheduled_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FarmingActivity {
    pub fn planned(
        activity_type: ActivityType,
        description: impl Into<String>,
        scheduled_date: NaiveDate,
    ) -> Self {
        Self {
            activity_type,
            description: description.into(),
            scheduled_date,
            completed_date: None,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_completed(&self) -> bool {
        self.completed_date.is_some()
    }
}

/// A crop's full activity plan at one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "FarmingScheduleInput")]
pub struct FarmingSchedule {
    crop_type: CropType,
    #[serde(skip_serializing_if = "Option::is_none")]
    location_id: Option<String>,
    planting_date: NaiveDate,
    harvest_date: NaiveDate,
    current_stage: GrowthStage,
    activities: Vec<FarmingActivity>,
    last_updated: DateTime<Utc>,
}

#[derive(Deserialize)]
struct FarmingScheduleInput {
    crop_type: CropType,
    #[serde(default)]
    location_id: Option<String>,
    planting_date: NaiveDate,
    harvest_date: NaiveDate,
    current_stage: GrowthStage,
    activities: Vec<FarmingActivity>,
    last_updated: DateTime<Utc>,
}

impl From<FarmingScheduleInput> for FarmingSchedule {
    fn from(input: FarmingScheduleInput) -> Self {
        FarmingSchedule::new(
            input.crop_type,
            input.location_id,
            input.planting_date,
            input.harvest_date,
            input.current_stage,
            input.activities,
            input.last_updated,
        )
    }
}

impl FarmingSchedule {
    /// Activities are kept ordered by scheduled date
    pub fn new(
        crop_type: CropType,
        location_id: Option<String>,
        planting_date: NaiveDate,
        harvest_date: NaiveDate,
        current_stage: GrowthStage,
        mut activities: Vec<FarmingActivity>,
        now: DateTime<Utc>,
    ) -> Self {
        activities.sort_by_key(|a| a.scheduled_date);
        Self {
            crop_type,
            location_id,
            planting_date,
            harvest_date,
            current_stage,
            activities,
            last_updated: now,
        }
    }

    /// New schedule including `activity`; `last_updated` never moves backwards
    pub fn with_activity(&self, activity: FarmingActivity, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.activities.push(activity);
        next.activities.sort_by_key(|a| a.scheduled_date);
        next.last_updated = self.last_updated.max(now);
        next
    }

    pub fn crop_type(&self) -> CropType {
        self.crop_type
    }

    /// `"lat,lon"` of the field, when the plan was made for known coordinates
    pub fn location_id(&self) -> Option<&str> {
        self.location_id.as_deref()
    }

    pub fn planting_date(&self) -> NaiveDate {
        self.planting_date
    }

    pub fn harvest_date(&self) -> NaiveDate {
        self.harvest_date
    }

    pub fn current_stage(&self) -> GrowthStage {
        self.current_stage
    }

    pub fn activities(&self) -> &[FarmingActivity] {
        &self.activities
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Activities not yet completed, in date order
    pub fn pending(&self) -> impl Iterator<Item = &FarmingActivity> {
        self.activities.iter().filter(|a| !a.is_completed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    fn schedule() -> FarmingSchedule {
        FarmingSchedule::new(
            CropType::Corn,
            Some("45,-122".to_string()),
            date(10),
            date(28),
            GrowthStage::Germination,
            vec![
                FarmingActivity::planned(ActivityType::Harvest, "Harvest", date(28)),
                FarmingActivity::planned(ActivityType::Planting, "Plant", date(10)),
            ],
            Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_activities_sorted_on_construction() {
        let s = schedule();
        let dates: Vec<NaiveDate> = s.activities().iter().map(|a| a.scheduled_date).collect();
        assert_eq!(dates, vec![date(10), date(28)]);
    }

    #[test]
    fn test_with_activity_keeps_order_and_advances_timestamp() {
        let s = schedule();
        let later = s.last_updated() + Duration::hours(2);
        let next = s.with_activity(
            FarmingActivity::planned(ActivityType::SoilPreparation, "Till", date(1)),
            later,
        );

        assert_eq!(next.activities()[0].activity_type, ActivityType::SoilPreparation);
        assert_eq!(next.last_updated(), later);
        assert_eq!(s.activities().len(), 2);
    }

    #[test]
    fn test_last_updated_is_monotonic() {
        let s = schedule();
        let earlier = s.last_updated() - Duration::days(1);
        let next = s.with_activity(
            FarmingActivity::planned(ActivityType::PestScouting, "Scout", date(15)),
            earlier,
        );
        assert_eq!(next.last_updated(), s.last_updated());
    }

    #[test]
    fn test_pending_skips_completed() {
        let mut done = FarmingActivity::planned(ActivityType::Irrigation, "Water", date(12));
        done.completed_date = Some(date(12));
        let s = schedule().with_activity(done, Utc.with_ymd_and_hms(2025, 5, 12, 0, 0, 0).unwrap());
        assert_eq!(s.pending().count(), 2);
    }

    #[test]
    fn test_deserialized_schedule_is_sorted() {
        let json = r#"{
            "crop_type": "wheat",
            "planting_date": "2025-05-10",
            "harvest_date": "2025-05-28",
            "current_stage": "emergence",
            "activities": [
                {"activity_type": "harvest", "description": "Harvest", "scheduled_date": "2025-05-28"},
                {"activity_type": "planting", "description": "Plant", "scheduled_date": "2025-05-10"}
            ],
            "last_updated": "2025-05-01T08:00:00Z"
        }"#;
        let s: FarmingSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(s.activities()[0].activity_type, ActivityType::Planting);
        assert_eq!(s.location_id(), None);
    }
}
