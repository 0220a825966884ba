//! Crop, soil and climate models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationErrors;
use crate::types::ValueRange;

/// Supported crops
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CropType {
    Corn,
    Wheat,
    Sunflower,
}

impl CropType {
    pub const ALL: [CropType; 3] = [CropType::Corn, CropType::Wheat, CropType::Sunflower];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Corn => "corn",
            CropType::Wheat => "wheat",
            CropType::Sunflower => "sunflower",
        }
    }
}

/// Crop lifecycle phases
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Germination,
    Emergence,
    Tillering,
    StemElongation,
    Heading,
    Flowering,
    GrainFilling,
    Maturity,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 8] = [
        GrowthStage::Germination,
        GrowthStage::Emergence,
        GrowthStage::Tillering,
        GrowthStage::StemElongation,
        GrowthStage::Heading,
        GrowthStage::Flowering,
        GrowthStage::GrainFilling,
        GrowthStage::Maturity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Germination => "germination",
            GrowthStage::Emergence => "emergence",
            GrowthStage::Tillering => "tillering",
            GrowthStage::StemElongation => "stem_elongation",
            GrowthStage::Heading => "heading",
            GrowthStage::Flowering => "flowering",
            GrowthStage::GrainFilling => "grain_filling",
            GrowthStage::Maturity => "maturity",
        }
    }

    /// Stages where water stress costs the most yield
    pub fn is_water_critical(&self) -> bool {
        matches!(self, GrowthStage::Flowering | GrowthStage::GrainFilling)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Clay,
    Loam,
    Sandy,
    Silt,
}

impl SoilType {
    pub const ALL: [SoilType; 4] = [SoilType::Clay, SoilType::Loam, SoilType::Sandy, SoilType::Silt];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Clay => "clay",
            SoilType::Loam => "loam",
            SoilType::Sandy => "sandy",
            SoilType::Silt => "silt",
        }
    }
}

/// Planting season
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Spring, Season::Summer, Season::Fall];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClimateZone {
    Mediterranean,
    Continental,
    Tropical,
    SemiArid,
    HumidSubtropical,
    Oceanic,
    Subarctic,
}

impl ClimateZone {
    pub const ALL: [ClimateZone; 7] = [
        ClimateZone::Mediterranean,
        ClimateZone::Continental,
        ClimateZone::Tropical,
        ClimateZone::SemiArid,
        ClimateZone::HumidSubtropical,
        ClimateZone::Oceanic,
        ClimateZone::Subarctic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClimateZone::Mediterranean => "mediterranean",
            ClimateZone::Continental => "continental",
            ClimateZone::Tropical => "tropical",
            ClimateZone::SemiArid => "semi_arid",
            ClimateZone::HumidSubtropical => "humid_subtropical",
            ClimateZone::Oceanic => "oceanic",
            ClimateZone::Subarctic => "subarctic",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationMethod {
    Drip,
    Sprinkler,
    Flood,
    CenterPivot,
    Subsurface,
}

impl IrrigationMethod {
    pub const ALL: [IrrigationMethod; 5] = [
        IrrigationMethod::Drip,
        IrrigationMethod::Sprinkler,
        IrrigationMethod::Flood,
        IrrigationMethod::CenterPivot,
        IrrigationMethod::Subsurface,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationMethod::Drip => "drip",
            IrrigationMethod::Sprinkler => "sprinkler",
            IrrigationMethod::Flood => "flood",
            IrrigationMethod::CenterPivot => "center_pivot",
            IrrigationMethod::Subsurface => "subsurface",
        }
    }
}

/// Error returned when parsing an unknown enumeration value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Parse a value by matching it against every variant's wire name
fn parse_variant<T: Copy>(
    all: &[T],
    name: impl Fn(&T) -> &'static str,
    kind: &'static str,
    value: &str,
) -> Result<T, UnknownVariant> {
    let wanted = value.trim().to_ascii_lowercase();
    all.iter()
        .copied()
        .find(|variant| name(variant) == wanted)
        .ok_or_else(|| UnknownVariant {
            kind,
            value: value.to_string(),
        })
}

impl FromStr for CropType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(&Self::ALL, Self::as_str, "crop type", s)
    }
}

impl FromStr for GrowthStage {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(&Self::ALL, Self::as_str, "growth stage", s)
    }
}

impl FromStr for SoilType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(&Self::ALL, Self::as_str, "soil type", s)
    }
}

impl FromStr for Season {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(&Self::ALL, Self::as_str, "season", s)
    }
}

impl FromStr for ClimateZone {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(&Self::ALL, Self::as_str, "climate zone", s)
    }
}

impl FromStr for IrrigationMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(&Self::ALL, Self::as_str, "irrigation method", s)
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for IrrigationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one planted crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropInfo {
    crop_type: CropType,
    growth_stage: GrowthStage,
    planting_date: NaiveDate,
    expected_harvest_date: NaiveDate,
    optimal_temperature: ValueRange,
    optimal_soil_moisture: ValueRange,
    optimal_ph: ValueRange,
}

impl CropInfo {
    pub fn new(
        crop_type: CropType,
        growth_stage: GrowthStage,
        planting_date: NaiveDate,
        expected_harvest_date: NaiveDate,
        optimal_temperature: ValueRange,
        optimal_soil_moisture: ValueRange,
        optimal_ph: ValueRange,
    ) -> Result<Self, ValidationErrors> {
        if expected_harvest_date < planting_date {
            return Err(ValidationErrors::single(
                "expected_harvest_date",
                "must not be before planting_date",
            ));
        }

        Ok(Self {
            crop_type,
            growth_stage,
            planting_date,
            expected_harvest_date,
            optimal_temperature,
            optimal_soil_moisture,
            optimal_ph,
        })
    }

    pub fn crop_type(&self) -> CropType {
        self.crop_type
    }

    pub fn growth_stage(&self) -> GrowthStage {
        self.growth_stage
    }

    pub fn planting_date(&self) -> NaiveDate {
        self.planting_date
    }

    pub fn expected_harvest_date(&self) -> NaiveDate {
        self.expected_harvest_date
    }

    pub fn optimal_temperature(&self) -> ValueRange {
        self.optimal_temperature
    }

    pub fn optimal_soil_moisture(&self) -> ValueRange {
        self.optimal_soil_moisture
    }

    pub fn optimal_ph(&self) -> ValueRange {
        self.optimal_ph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_crop_type_parse_and_display() {
        for crop in CropType::ALL {
            assert_eq!(crop.to_string().parse::<CropType>().unwrap(), crop);
        }
        assert_eq!(" Corn ".parse::<CropType>().unwrap(), CropType::Corn);

        let err = "rice".parse::<CropType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown crop type 'rice'");
    }

    #[test]
    fn test_unknown_crop_rejected_by_serde() {
        assert!(serde_json::from_str::<CropType>(r#""rice""#).is_err());
        assert_eq!(
            serde_json::from_str::<GrowthStage>(r#""grain_filling""#).unwrap(),
            GrowthStage::GrainFilling
        );
    }

    #[test]
    fn test_multi_word_wire_names() {
        assert_eq!(
            serde_json::to_string(&ClimateZone::HumidSubtropical).unwrap(),
            r#""humid_subtropical""#
        );
        assert_eq!(
            "center_pivot".parse::<IrrigationMethod>().unwrap(),
            IrrigationMethod::CenterPivot
        );
    }

    #[test]
    fn test_crop_info_rejects_harvest_before_planting() {
        let range = ValueRange::new(Decimal::from(1), Decimal::from(2)).unwrap();
        let planted = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let result = CropInfo::new(
            CropType::Corn,
            GrowthStage::Germination,
            planted,
            planted - chrono::Duration::days(1),
            range,
            range,
            range,
        );
        assert!(result.unwrap_err().has_field("expected_harvest_date"));
    }
}
