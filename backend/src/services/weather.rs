//! Weather-derived agricultural insights

use rust_decimal::Decimal;
use serde::Serialize;

use shared::advisory::planting::{growing_conditions, GrowingConditions};
use shared::advisory::soil::{assess_soil, SoilPlantingAssessment};
use shared::advisory::{
    analyze_forecast, crop_calendar, planting_recommendation, AdvisoryThresholds,
    ConditionAssessment, ConditionAssessor, CropCalendar, ForecastAnalysis, PlantingRecommendation,
};
use shared::{CropType, GeoLocation, WeatherCondition, WeatherForecast};

use crate::error::AppResult;
use crate::external::{normalize_soil, SoilSnapshot, WeatherClient};

/// Weather service combining upstream data with the advisory rules
#[derive(Clone)]
pub struct WeatherService {
    client: WeatherClient,
    thresholds: AdvisoryThresholds,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentConditionsReport {
    pub location: GeoLocation,
    pub conditions: WeatherCondition,
    pub agricultural_assessment: ConditionAssessment,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub location: GeoLocation,
    pub forecast: WeatherForecast,
    pub analysis: ForecastAnalysis,
}

#[derive(Debug, Clone, Serialize)]
pub struct SoilConditionsReport {
    pub location: GeoLocation,
    pub raw: serde_json::Value,
    pub soil: SoilSnapshot,
    pub planting_assessment: SoilPlantingAssessment,
}

#[derive(Debug, Clone, Serialize)]
pub struct CropCalendarReport {
    pub location: GeoLocation,
    pub crop_calendar: CropCalendar,
    pub current_conditions: WeatherCondition,
    pub planting_recommendation: PlantingRecommendation,
    pub growing_conditions: GrowingConditions,
}

impl WeatherService {
    pub fn new(client: WeatherClient, thresholds: AdvisoryThresholds) -> Self {
        Self { client, thresholds }
    }

    /// Current conditions with planting, irrigation and field work assessment
    pub async fn current_conditions(
        &self,
        latitude: Decimal,
        longitude: Decimal,
    ) -> AppResult<CurrentConditionsReport> {
        let location = GeoLocation::new(latitude, longitude)?;
        let conditions = self.client.get_current_weather(&location).await?;
        let assessment = ConditionAssessor::new(&self.thresholds).assess(&conditions);

        Ok(CurrentConditionsReport {
            location,
            conditions,
            agricultural_assessment: assessment,
        })
    }

    /// Forecast samples with summary, recommendations and daily breakdown
    pub async fn forecast_analysis(
        &self,
        latitude: Decimal,
        longitude: Decimal,
        days: u32,
    ) -> AppResult<ForecastReport> {
        let location = GeoLocation::new(latitude, longitude)?;
        let forecast = self.client.get_forecast(&location, days).await?;
        let analysis = analyze_forecast(forecast.conditions(), &self.thresholds)?;

        Ok(ForecastReport {
            location,
            forecast,
            analysis,
        })
    }

    /// Measured soil readings and what they mean for planting
    pub async fn soil_conditions(
        &self,
        latitude: Decimal,
        longitude: Decimal,
    ) -> AppResult<SoilConditionsReport> {
        let location = GeoLocation::new(latitude, longitude)?;
        let raw = self.client.get_soil_data(&location).await?;
        let soil = normalize_soil(&raw)?;
        let planting_assessment = assess_soil(
            soil.temperature_celsius.value,
            soil.moisture_percent.value,
        );

        Ok(SoilConditionsReport {
            location,
            raw,
            soil,
            planting_assessment,
        })
    }

    /// Crop calendar checked against the weather at the site
    pub async fn crop_calendar(
        &self,
        crop: CropType,
        latitude: Decimal,
        longitude: Decimal,
    ) -> AppResult<CropCalendarReport> {
        let location = GeoLocation::new(latitude, longitude)?;
        let current = self.client.get_current_weather(&location).await?;

        Ok(CropCalendarReport {
            location,
            crop_calendar: crop_calendar(crop),
            planting_recommendation: planting_recommendation(crop, &current),
            growing_conditions: growing_conditions(crop, &current),
            current_conditions: current,
        })
    }

    /// Whether the weather API is reachable
    pub async fn health(&self) -> bool {
        self.client.health_check().await
    }
}
