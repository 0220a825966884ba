//! Advisory engine
//!
//! Pure, deterministic rules over the domain models. Nothing here performs I/O.

pub mod assessment;
pub mod compatibility;
pub mod forecast;
pub mod knowledge;
pub mod pest;
pub mod planting;
pub mod rules;
pub mod soil;
pub mod thresholds;

pub use assessment::{
    ConditionAssessment, ConditionAssessor, FieldWorkSuitability, IrrigationNeed,
    PlantingSuitability, Verdict,
};
pub use compatibility::{
    seasonal_note, soil_compatibility, CompatibilityRating, SeasonalNote, SoilCompatibility,
};
pub use forecast::{analyze as analyze_forecast, ForecastAnalysis, ForecastSummary};
pub use knowledge::{disease_risks, farming_techniques, protection_measures, DiseaseRisk};
pub use planting::{
    crop_calendar, crop_profile, planting_recommendation, CropCalendar, CropProfile,
    PlantingRecommendation,
};
pub use rules::Classifier;
pub use thresholds::AdvisoryThresholds;
