//! Advisory service for the five agronomic endpoints
//!
//! Crop management, soil analysis and pest control are pure table lookups.
//! Irrigation scheduling and harvest timing pull a forecast through the
//! weather client first and inherit its failure modes.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use shared::advisory::compatibility::ranked_soils;
use shared::advisory::forecast::{
    daily_breakdown, irrigation_recommendation, is_field_work_period, summarize,
    IrrigationRecommendation,
};
use shared::advisory::pest::{pest_control_advice, PestControlAdvice, Urgency};
use shared::advisory::planting::{crop_info, growth_timeline, StageWindow};
use shared::advisory::soil::{analyze_soil, SoilAnalysisReport};
use shared::advisory::{
    crop_profile, seasonal_note, soil_compatibility, AdvisoryThresholds, CompatibilityRating,
    CropProfile, ForecastSummary, SeasonalNote, SoilCompatibility,
};
use shared::{
    validate_crop_management, validate_harvest_timing, validate_irrigation_schedule,
    validate_pest_control, validate_soil_analysis, ActivityType, ClimateZone, CropInfo, CropType,
    CropManagementQuery, FarmingActivity, FarmingSchedule, GeoLocation, GrowthStage,
    HarvestTimingQuery, IrrigationMethod, IrrigationScheduleQuery, PestControlQuery, Season,
    SoilAnalysisQuery, SoilType, WeatherForecast,
};

use crate::error::AppResult;
use crate::external::WeatherClient;

/// Days of seedbed preparation ahead of planting
const SOIL_PREPARATION_LEAD_DAYS: i64 = 14;

/// Forecast rainfall (mm) above which irrigation urgency drops to low
const URGENT_IRRIGATION_RAIN_LIMIT: i64 = 10;

/// Advisory service
#[derive(Clone)]
pub struct AdvisoryService {
    thresholds: AdvisoryThresholds,
    weather_client: WeatherClient,
}

// ============================================================================
// Result payloads
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CropManagementPlan {
    pub crop_type: CropType,
    pub soil_type: SoilType,
    pub climate_zone: ClimateZone,
    pub planting_season: Season,
    pub field_size_ha: Decimal,
    pub soil_compatibility: SoilCompatibility,
    pub seasonal_note: SeasonalNote,
    pub planting_guide: CropProfile,
    pub crop: CropInfo,
    pub growth_timeline: Vec<StageWindow>,
    pub schedule: FarmingSchedule,
    /// First open activity on or after today
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_activity: Option<FarmingActivity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_note: Option<String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationAction {
    Irrigate,
    Skip,
    Monitor,
}

/// Irrigation decision for one forecast day
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyIrrigation {
    pub date: NaiveDate,
    pub precipitation: Decimal,
    pub action: IrrigationAction,
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IrrigationSchedule {
    pub location: GeoLocation,
    pub crop_type: CropType,
    pub growth_stage: GrowthStage,
    pub soil_moisture: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irrigation_method: Option<IrrigationMethod>,
    pub urgency: Urgency,
    pub forecast: ForecastSummary,
    pub recommendation: IrrigationRecommendation,
    pub recommendation_message: String,
    pub daily_schedule: Vec<DailyIrrigation>,
    pub stage_note: String,
}

/// Minimum maturity a crop must reach before harvest
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct HarvestRequirements {
    pub min_growing_degree_days: Decimal,
    pub max_grain_moisture: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HarvestReadiness {
    Ready,
    NotReady,
}

#[derive(Debug, Clone, Serialize)]
pub struct HarvestTimingPlan {
    pub location: GeoLocation,
    pub crop_type: CropType,
    pub readiness: HarvestReadiness,
    pub reasons: Vec<String>,
    pub requirements: HarvestRequirements,
    pub days_since_planting: i64,
    pub forecast_precipitation: Decimal,
    pub dry_harvest_windows: Vec<NaiveDate>,
    pub recommendations: Vec<String>,
}

pub fn harvest_requirements(crop: CropType) -> HarvestRequirements {
    let (gdd, moisture) = match crop {
        CropType::Corn => (2700, 25),
        CropType::Wheat => (1500, 18),
        CropType::Sunflower => (2400, 15),
    };
    HarvestRequirements {
        min_growing_degree_days: Decimal::from(gdd),
        max_grain_moisture: Decimal::from(moisture),
    }
}

impl AdvisoryService {
    pub fn new(thresholds: AdvisoryThresholds, weather_client: WeatherClient) -> Self {
        Self {
            thresholds,
            weather_client,
        }
    }

    /// Build a crop management plan
    pub fn crop_management(
        &self,
        query: &CropManagementQuery,
        now: DateTime<Utc>,
    ) -> AppResult<CropManagementPlan> {
        let today = now.date_naive();
        validate_crop_management(query, today)?;

        let crop = query.crop_type;
        let profile = crop_profile(crop);
        let compatibility = soil_compatibility(crop, query.soil_type);
        let note = seasonal_note(crop, query.planting_season);
        let timeline = growth_timeline(crop, query.planting_date);
        let info = crop_info(crop, query.planting_date, today)?;

        let location = match (query.latitude, query.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoLocation::new(latitude, longitude)?),
            _ => None,
        };
        let schedule = stage_follow_ups(query, &timeline)
            .into_iter()
            .fold(
                build_schedule(query, location.as_ref(), &profile, &timeline, &info, now),
                |schedule, activity| schedule.with_activity(activity, now),
            );
        let next_activity = schedule
            .pending()
            .find(|a| a.scheduled_date >= today)
            .cloned();
        let rotation_note = rotation_note(crop, query.previous_crop.as_deref());
        let next_steps = next_steps(query, &profile, &compatibility, &note);

        tracing::debug!(crop = %crop, soil = %query.soil_type, "Built crop management plan");

        Ok(CropManagementPlan {
            crop_type: crop,
            soil_type: query.soil_type,
            climate_zone: query.climate_zone,
            planting_season: query.planting_season,
            field_size_ha: query.field_size_ha,
            soil_compatibility: compatibility,
            seasonal_note: note,
            planting_guide: profile,
            crop: info,
            growth_timeline: timeline,
            schedule,
            next_activity,
            rotation_note,
            next_steps,
        })
    }

    /// Interpret a soil test
    pub fn soil_analysis(&self, query: &SoilAnalysisQuery) -> AppResult<SoilAnalysisReport> {
        validate_soil_analysis(query)?;
        Ok(analyze_soil(query))
    }

    /// Grade an infestation and recommend treatment
    pub fn pest_control(&self, query: &PestControlQuery) -> AppResult<PestControlAdvice> {
        validate_pest_control(query)?;
        Ok(pest_control_advice(query))
    }

    /// Plan irrigation over the forecast window
    pub async fn irrigation_schedule(
        &self,
        query: &IrrigationScheduleQuery,
    ) -> AppResult<IrrigationSchedule> {
        validate_irrigation_schedule(query)?;
        let location = GeoLocation::new(query.latitude, query.longitude)?;
        let forecast = self
            .weather_client
            .get_forecast(&location, query.days)
            .await?;
        plan_irrigation(query, location, &forecast, &self.thresholds)
    }

    /// Decide whether the crop can be harvested in the forecast window
    pub async fn harvest_timing(
        &self,
        query: &HarvestTimingQuery,
        today: NaiveDate,
    ) -> AppResult<HarvestTimingPlan> {
        validate_harvest_timing(query, today)?;
        let location = GeoLocation::new(query.latitude, query.longitude)?;
        let forecast = self
            .weather_client
            .get_forecast(&location, query.days)
            .await?;
        plan_harvest(query, location, &forecast, today, &self.thresholds)
    }
}

// ============================================================================
// Crop management
// ============================================================================

fn build_schedule(
    query: &CropManagementQuery,
    location: Option<&GeoLocation>,
    profile: &CropProfile,
    timeline: &[StageWindow],
    info: &CropInfo,
    now: DateTime<Utc>,
) -> FarmingSchedule {
    let crop = query.crop_type;
    let mut activities = vec![
        FarmingActivity::planned(
            ActivityType::SoilPreparation,
            format!("Prepare {} seedbed: tillage and residue management", query.soil_type),
            query.planting_date - Duration::days(SOIL_PREPARATION_LEAD_DAYS),
        ),
        FarmingActivity::planned(
            ActivityType::Planting,
            format!(
                "Plant {} at {} depth with {} row spacing",
                crop, profile.planting_depth, profile.row_spacing
            ),
            query.planting_date,
        ),
    ];

    for window in timeline {
        let activity = FarmingActivity::planned(
            ActivityType::StageMonitoring,
            format!("Monitor {} stage ({} days)", window.stage, window.duration_days),
            window.start_date,
        );
        activities.push(if window.stage.is_water_critical() {
            activity.with_notes("Water-critical stage: keep soil moisture in the optimal range")
        } else {
            activity
        });
    }

    activities.push(FarmingActivity::planned(
        ActivityType::Harvest,
        format!("Harvest {}", crop),
        info.expected_harvest_date(),
    ));

    FarmingSchedule::new(
        crop,
        location.map(|l| l.location_id()),
        query.planting_date,
        info.expected_harvest_date(),
        info.growth_stage(),
        activities,
        now,
    )
}

/// Scouting and irrigation checks attached to the stages that need them
fn stage_follow_ups(query: &CropManagementQuery, timeline: &[StageWindow]) -> Vec<FarmingActivity> {
    let mut activities = Vec::new();
    for window in timeline {
        if matches!(window.stage, GrowthStage::Emergence | GrowthStage::Flowering) {
            activities.push(FarmingActivity::planned(
                ActivityType::PestScouting,
                format!("Scout for pests and disease during {}", window.stage),
                window.start_date,
            ));
        }
        if let Some(method) = query.irrigation_method.filter(|_| window.stage.is_water_critical()) {
            activities.push(FarmingActivity::planned(
                ActivityType::Irrigation,
                format!("Run {} irrigation through {}", method, window.stage),
                window.start_date,
            ));
        }
    }
    activities
}

fn rotation_note(crop: CropType, previous_crop: Option<&str>) -> Option<String> {
    let previous = previous_crop.map(str::trim).filter(|p| !p.is_empty())?;
    if previous.eq_ignore_ascii_case(crop.as_str()) {
        Some(format!(
            "Planting {} after {} raises pest and disease pressure; rotate with a legume or another crop family",
            crop, previous
        ))
    } else {
        Some(format!("Rotation from {} to {} supports soil health", previous, crop))
    }
}

fn next_steps(
    query: &CropManagementQuery,
    profile: &CropProfile,
    compatibility: &SoilCompatibility,
    note: &SeasonalNote,
) -> Vec<String> {
    let mut steps = vec![format!(
        "Finish seedbed preparation by {}",
        query.planting_date - Duration::days(SOIL_PREPARATION_LEAD_DAYS)
    )];

    if !note.recommended {
        steps.push(format!(
            "Reconsider the {} planting window: {}",
            query.planting_season, note.text
        ));
    }
    if compatibility.rating <= CompatibilityRating::Fair {
        steps.push(format!(
            "Amend the {} soil before planting: {}",
            query.soil_type, compatibility.rationale
        ));
        let better: Vec<&str> = ranked_soils(query.crop_type)
            .into_iter()
            .filter(|(_, c)| c.rating > compatibility.rating)
            .map(|(soil, _)| soil.as_str())
            .collect();
        if !better.is_empty() {
            steps.push(format!(
                "Fields with {} soil suit {} better",
                better.join(" or "),
                query.crop_type
            ));
        }
    }
    steps.push(format!(
        "Confirm soil temperature is at least {}°C before planting",
        profile.min_soil_temperature
    ));
    match query.irrigation_method {
        Some(method) => steps.push(format!("Check the {} irrigation system", method)),
        None => steps.push("Track rainfall closely; no irrigation is planned".to_string()),
    }

    steps
}

// ============================================================================
// Irrigation
// ============================================================================

/// Urgency from current soil moisture and the forecast outlook
pub fn irrigation_urgency(
    soil_moisture: Decimal,
    summary: &ForecastSummary,
    thresholds: &AdvisoryThresholds,
) -> Urgency {
    let dry = soil_moisture < thresholds.min_soil_moisture
        && summary.total_precipitation < Decimal::from(URGENT_IRRIGATION_RAIN_LIMIT);
    if !dry {
        return Urgency::Low;
    }
    if summary.average_temperature > Decimal::from(30) && summary.average_humidity < Decimal::from(50)
    {
        Urgency::High
    } else {
        Urgency::Medium
    }
}

fn stage_note(stage: GrowthStage) -> String {
    match stage {
        s if s.is_water_critical() => format!(
            "Critical stage: {} is highly sensitive to water stress; avoid any deficit",
            s
        ),
        GrowthStage::Maturity => "Reduce irrigation as the crop approaches maturity".to_string(),
        s => format!("Maintain regular irrigation during {}", s),
    }
}

/// Pure part of the irrigation schedule, once the forecast is known
pub fn plan_irrigation(
    query: &IrrigationScheduleQuery,
    location: GeoLocation,
    forecast: &WeatherForecast,
    thresholds: &AdvisoryThresholds,
) -> AppResult<IrrigationSchedule> {
    let summary = summarize(forecast.conditions())?;
    let urgency = irrigation_urgency(query.soil_moisture, &summary, thresholds);
    let recommendation = irrigation_recommendation(summary.total_precipitation);

    let daily_schedule = daily_breakdown(forecast.conditions())
        .into_iter()
        .map(|day| {
            let (action, note) = if day.total_precipitation >= thresholds.recent_rain_threshold {
                (
                    IrrigationAction::Skip,
                    format!("{} mm of rain expected", day.total_precipitation),
                )
            } else if query.soil_moisture < thresholds.irrigation_threshold {
                (
                    IrrigationAction::Irrigate,
                    format!("Soil moisture {}% below {}%", query.soil_moisture, thresholds.irrigation_threshold),
                )
            } else {
                (
                    IrrigationAction::Monitor,
                    "Soil moisture adequate; check again tomorrow".to_string(),
                )
            };
            DailyIrrigation {
                date: day.date,
                precipitation: day.total_precipitation,
                action,
                note,
            }
        })
        .collect();

    Ok(IrrigationSchedule {
        location,
        crop_type: query.crop_type,
        growth_stage: query.growth_stage,
        soil_moisture: query.soil_moisture,
        irrigation_method: query.irrigation_method,
        urgency,
        forecast: summary,
        recommendation,
        recommendation_message: recommendation.to_string(),
        daily_schedule,
        stage_note: stage_note(query.growth_stage),
    })
}

// ============================================================================
// Harvest
// ============================================================================

/// Dates whose every forecast sample allows field work
pub fn dry_harvest_windows(
    forecast: &WeatherForecast,
    thresholds: &AdvisoryThresholds,
) -> Vec<NaiveDate> {
    daily_breakdown(forecast.conditions())
        .into_iter()
        .map(|day| day.date)
        .filter(|date| {
            forecast
                .conditions()
                .iter()
                .filter(|c| c.timestamp().date_naive() == *date)
                .all(|c| is_field_work_period(c, thresholds))
        })
        .collect()
}

/// Pure part of harvest timing, once the forecast is known
pub fn plan_harvest(
    query: &HarvestTimingQuery,
    location: GeoLocation,
    forecast: &WeatherForecast,
    today: NaiveDate,
    thresholds: &AdvisoryThresholds,
) -> AppResult<HarvestTimingPlan> {
    let summary = summarize(forecast.conditions())?;
    let requirements = harvest_requirements(query.crop_type);

    let mut reasons = Vec::new();
    if query.growing_degree_days < requirements.min_growing_degree_days {
        reasons.push(format!(
            "Growing degree days {} below the {} required for {}",
            query.growing_degree_days, requirements.min_growing_degree_days, query.crop_type
        ));
    }
    if let Some(moisture) = query.grain_moisture {
        if moisture > requirements.max_grain_moisture {
            reasons.push(format!(
                "Grain moisture {}% above the {}% harvest maximum",
                moisture, requirements.max_grain_moisture
            ));
        }
    }
    let readiness = if reasons.is_empty() {
        HarvestReadiness::Ready
    } else {
        HarvestReadiness::NotReady
    };

    let windows = dry_harvest_windows(forecast, thresholds);

    let mut recommendations = Vec::new();
    match (readiness, windows.first()) {
        (HarvestReadiness::Ready, Some(first)) => {
            recommendations.push(format!("Harvest during the dry window starting {}", first))
        }
        (HarvestReadiness::Ready, None) => recommendations
            .push("No dry window in the forecast; delay harvest until conditions dry".to_string()),
        (HarvestReadiness::NotReady, _) => {
            recommendations.push("Continue monitoring crop maturity".to_string())
        }
    }
    if query.grain_moisture.is_none() {
        recommendations.push("Test grain moisture before committing to harvest".to_string());
    }
    if readiness == HarvestReadiness::Ready && summary.total_precipitation > Decimal::from(20) {
        recommendations.push(format!(
            "{} mm of rain expected; prioritise harvest ahead of the rainfall",
            summary.total_precipitation
        ));
    }

    Ok(HarvestTimingPlan {
        location,
        crop_type: query.crop_type,
        readiness,
        reasons,
        requirements,
        days_since_planting: (today - query.planting_date).num_days(),
        forecast_precipitation: summary.total_precipitation,
        dry_harvest_windows: windows,
        recommendations,
    })
}
