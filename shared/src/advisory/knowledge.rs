//! Crop knowledge base: disease risk bands, protection measures and
//! farming techniques

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{ClimateZone, CropType, GrowthStage};
use crate::types::ValueRange;

/// Weather band in which a disease spreads, with its field guidance
#[derive(Debug, Clone, Copy)]
struct DiseaseProfile {
    name: &'static str,
    temperature: (i64, i64),
    humidity: (i64, i64),
    description: &'static str,
    symptoms: &'static [&'static str],
    management: &'static [&'static str],
}

const WHEAT_DISEASES: &[DiseaseProfile] = &[
    DiseaseProfile {
        name: "black_rust",
        temperature: (15, 25),
        humidity: (60, 100),
        description: "High risk when temperature is between 15-25°C with high humidity",
        symptoms: &[
            "Reddish-brown pustules on leaves and stems",
            "Black teliospores form late in season",
            "Reduced grain fill and yield",
        ],
        management: &[
            "Plant resistant varieties",
            "Early planting to avoid peak disease period",
            "Monitor and apply fungicides when necessary",
        ],
    },
    DiseaseProfile {
        name: "smut",
        temperature: (16, 22),
        humidity: (70, 100),
        description: "Risk increases with high humidity and moderate temperatures",
        symptoms: &[
            "Black spores replace grain in heads",
            "Fishy smell in infected grain",
            "Reduced grain quality",
        ],
        management: &[
            "Use certified disease-free seed",
            "Treat seeds with fungicide",
            "Practice crop rotation",
        ],
    },
    DiseaseProfile {
        name: "powdery_mildew",
        temperature: (15, 22),
        humidity: (50, 100),
        description: "Common in dense canopies with high humidity",
        symptoms: &[
            "White powdery growth on leaves",
            "Yellowing and death of leaves",
            "Reduced photosynthesis",
        ],
        management: &[
            "Use resistant varieties",
            "Maintain good air circulation",
            "Apply fungicides preventively in high-risk conditions",
        ],
    },
];

const CORN_DISEASES: &[DiseaseProfile] = &[
    DiseaseProfile {
        name: "northern_leaf_blight",
        temperature: (18, 27),
        humidity: (70, 100),
        description: "Favored by moderate temperatures and high humidity",
        symptoms: &[
            "Long, cigar-shaped lesions",
            "Grayish-green to brown color",
            "Lesions begin on lower leaves",
        ],
        management: &[
            "Plant resistant hybrids",
            "Rotate crops",
            "Apply fungicides at early infection",
        ],
    },
    DiseaseProfile {
        name: "gray_leaf_spot",
        temperature: (22, 30),
        humidity: (85, 100),
        description: "Severe in areas with high humidity and warm temperatures",
        symptoms: &[
            "Rectangular lesions between leaf veins",
            "Gray to tan color",
            "Lesions expand and coalesce",
        ],
        management: &[
            "Use resistant hybrids",
            "Practice crop rotation",
            "Consider fungicide application",
        ],
    },
    DiseaseProfile {
        name: "common_rust",
        temperature: (16, 25),
        humidity: (75, 100),
        description: "Develops rapidly in cool, moist conditions",
        symptoms: &[
            "Small, circular pustules on leaves",
            "Reddish-brown color",
            "Pustules on both leaf surfaces",
        ],
        management: &[
            "Plant resistant hybrids",
            "Monitor fields regularly",
            "Apply fungicides if detected early",
        ],
    },
];

fn diseases(crop: CropType) -> &'static [DiseaseProfile] {
    match crop {
        CropType::Wheat => WHEAT_DISEASES,
        CropType::Corn => CORN_DISEASES,
        // no tracked diseases yet
        CropType::Sunflower => &[],
    }
}

fn band(bounds: (i64, i64)) -> ValueRange {
    ValueRange::from_bounds(Decimal::from(bounds.0), Decimal::from(bounds.1))
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseRiskLevel {
    High,
}

/// A disease whose weather band contains the current conditions
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiseaseRisk {
    pub disease: &'static str,
    pub risk_level: DiseaseRiskLevel,
    pub description: &'static str,
    pub temperature_range: ValueRange,
    pub humidity_range: ValueRange,
    pub symptoms: &'static [&'static str],
    pub management: &'static [&'static str],
}

/// Diseases of `crop` favoured by the given temperature (°C) and humidity (%)
///
/// Both bands are inclusive at either end.
pub fn disease_risks(crop: CropType, temperature: Decimal, humidity: Decimal) -> Vec<DiseaseRisk> {
    diseases(crop)
        .iter()
        .map(|d| (d, band(d.temperature), band(d.humidity)))
        .filter(|(_, t, h)| t.contains(temperature) && h.contains(humidity))
        .map(|(d, temperature_range, humidity_range)| DiseaseRisk {
            disease: d.name,
            risk_level: DiseaseRiskLevel::High,
            description: d.description,
            temperature_range,
            humidity_range,
            symptoms: d.symptoms,
            management: d.management,
        })
        .collect()
}

// ============================================================================
// Protection Measures
// ============================================================================

const CROP_ROTATION: &str = "Rotate crops to break disease cycles";
const SEED_TREATMENT: &str = "Treat seeds with fungicides before planting";
const BENEFICIAL_INSECTS: &str = "Encourage natural predators";
const INSECTICIDES: &str = "Apply insecticides when pest thresholds are exceeded";
const TILLAGE: &str = "Implement appropriate tillage practices";
const HERBICIDES: &str = "Use selective herbicides appropriate for the crop";

/// Protection practices for one growth stage
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProtectionMeasures {
    pub crop_type: CropType,
    pub growth_stage: GrowthStage,
    pub disease_control: Vec<&'static str>,
    pub pest_control: Vec<&'static str>,
    pub weed_control: Vec<&'static str>,
    /// Diseases of this crop worth scouting for
    pub watch_for: Vec<&'static str>,
}

pub fn protection_measures(crop: CropType, stage: GrowthStage) -> ProtectionMeasures {
    let early = matches!(stage, GrowthStage::Emergence | GrowthStage::Tillering);
    let pest_sensitive = matches!(stage, GrowthStage::Emergence | GrowthStage::Flowering);

    ProtectionMeasures {
        crop_type: crop,
        growth_stage: stage,
        disease_control: if early {
            vec![CROP_ROTATION, SEED_TREATMENT]
        } else {
            Vec::new()
        },
        pest_control: if pest_sensitive {
            vec![BENEFICIAL_INSECTS, INSECTICIDES]
        } else {
            Vec::new()
        },
        weed_control: if early {
            vec![TILLAGE, HERBICIDES]
        } else {
            Vec::new()
        },
        watch_for: diseases(crop).iter().map(|d| d.name).collect(),
    }
}

// ============================================================================
// Farming Techniques
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SoilPreparation {
    pub tillage_depth: &'static str,
    pub optimal_ph: &'static str,
    pub organic_matter: &'static str,
    pub drainage: &'static str,
    pub methods: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlantingPractice {
    pub timing: &'static str,
    pub seed_depth: &'static str,
    pub row_spacing: &'static str,
    pub seeding_rate: &'static str,
    pub considerations: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FertilizationPlan {
    pub npk_ratio: &'static str,
    pub nitrogen_total: &'static str,
    pub split_applications: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IrrigationPractice {
    pub critical_periods: &'static [&'static str],
    pub water_requirements: &'static str,
    pub methods: &'static [&'static str],
}

/// Adjustments a climate zone makes to the base techniques
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClimateAdjustment {
    pub climate_zone: ClimateZone,
    pub focus: &'static str,
    pub practices: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FarmingTechniques {
    pub crop_type: CropType,
    pub soil_preparation: SoilPreparation,
    pub planting: PlantingPractice,
    pub fertilization: FertilizationPlan,
    pub irrigation: IrrigationPractice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub climate_adjustment: Option<ClimateAdjustment>,
}

fn climate_adjustment(zone: ClimateZone) -> Option<ClimateAdjustment> {
    let (focus, practices): (&'static str, &'static [&'static str]) = match zone {
        ClimateZone::Mediterranean => (
            "Water conservation during the dry season",
            &[
                "Drip irrigation preferred",
                "Night irrigation to reduce evaporation",
                "Mulch to conserve soil moisture",
                "Drought-tolerant varieties recommended",
            ],
        ),
        ClimateZone::Continental => (
            "Shorter growing season and frost protection",
            &[
                "Use of frost-tolerant varieties",
                "Row covers for early planting",
                "Snow trapping and winter cover crops",
            ],
        ),
        ClimateZone::Tropical => (
            "Fungal disease prevention and wet-season drainage",
            &[
                "Increased plant spacing for airflow",
                "Raised beds and surface drainage",
                "Contour plowing and cover crops during the rainy season",
            ],
        ),
        ClimateZone::SemiArid => (
            "Water conservation is the absolute priority",
            &[
                "Drought-resistant varieties",
                "Mulching and stubble retention",
                "Reduced planting density",
                "Windbreak establishment",
            ],
        ),
        ClimateZone::HumidSubtropical => (
            "Year-round disease and pest pressure",
            &[
                "Preventive fungicide program",
                "Raised beds and subsurface drainage",
                "IPM strategies with regular monitoring",
            ],
        ),
        ClimateZone::Oceanic | ClimateZone::Subarctic => return None,
    };
    Some(ClimateAdjustment {
        climate_zone: zone,
        focus,
        practices,
    })
}

/// Base techniques for `crop`, adjusted for the climate zone when one applies
pub fn farming_techniques(crop: CropType, zone: ClimateZone) -> FarmingTechniques {
    let (soil_preparation, planting, fertilization, irrigation) = match crop {
        CropType::Corn => (
            SoilPreparation {
                tillage_depth: "20-30cm",
                optimal_ph: "6.0-7.0",
                organic_matter: ">2%",
                drainage: "Well-drained soils required",
                methods: &[
                    "Deep plowing for heavy soils",
                    "Conservation tillage for erosion-prone areas",
                    "Minimum tillage in dry regions",
                ],
            },
            PlantingPractice {
                timing: "Soil above 10°C, after the last spring frost",
                seed_depth: "5-7cm",
                row_spacing: "75-100cm",
                seeding_rate: "60,000-70,000 seeds/ha",
                considerations: &[
                    "Ensure soil moisture is adequate",
                    "Consider using starter fertilizer",
                    "Check soil temperature at planting depth",
                ],
            },
            FertilizationPlan {
                npk_ratio: "15-15-15",
                nitrogen_total: "180-200 kg/ha",
                split_applications: &["30% at planting", "40% at V6 stage", "30% at V12 stage"],
            },
            IrrigationPractice {
                critical_periods: &[
                    "Early vegetative growth",
                    "Tasseling to silk emergence",
                    "Grain filling",
                ],
                water_requirements: "500-800mm total",
                methods: &[
                    "Center pivot irrigation",
                    "Drip irrigation for water conservation",
                    "Furrow irrigation in flat areas",
                ],
            },
        ),
        CropType::Wheat => (
            SoilPreparation {
                tillage_depth: "15-20cm",
                optimal_ph: "6.0-7.0",
                organic_matter: ">1.5%",
                drainage: "Moderate to well-drained",
                methods: &[
                    "Minimum tillage for moisture conservation",
                    "No-till in suitable conditions",
                    "Strip tillage for erosion control",
                ],
            },
            PlantingPractice {
                timing: "Winter wheat 6 weeks before frost; spring wheat once soil is above 4°C",
                seed_depth: "3-5cm",
                row_spacing: "15-20cm",
                seeding_rate: "180-250 kg/ha",
                considerations: &[
                    "Ensure good seed-to-soil contact",
                    "Plant winter wheat at proper depth for winter protection",
                    "Avoid planting too deep",
                ],
            },
            FertilizationPlan {
                npk_ratio: "18-46-0",
                nitrogen_total: "100-150 kg/ha",
                split_applications: &["40% at planting", "60% at tillering"],
            },
            IrrigationPractice {
                critical_periods: &["Tillering", "Stem elongation", "Grain filling"],
                water_requirements: "450-650mm total",
                methods: &["Sprinkler irrigation", "Flood irrigation in level fields"],
            },
        ),
        CropType::Sunflower => (
            SoilPreparation {
                tillage_depth: "20-25cm",
                optimal_ph: "6.0-7.5",
                organic_matter: ">1.5%",
                drainage: "Well-drained soils essential",
                methods: &[
                    "Deep tillage to break hardpan",
                    "Seedbed should be firm and level",
                    "Avoid excessive tillage to prevent soil moisture loss",
                ],
            },
            PlantingPractice {
                timing: "Soil above 8°C, after all danger of spring frost",
                seed_depth: "4-6cm",
                row_spacing: "70-100cm",
                seeding_rate: "40,000-50,000 seeds/ha",
                considerations: &[
                    "Plant when soil is moist but not wet",
                    "Consider bee population for pollination",
                    "Avoid planting in areas with bird pressure",
                ],
            },
            FertilizationPlan {
                npk_ratio: "20-40-40",
                nitrogen_total: "60-100 kg/ha",
                split_applications: &["50% at planting", "50% at V4 stage (4 true leaves)"],
            },
            IrrigationPractice {
                critical_periods: &["Germination to emergence", "Flowering", "Seed filling"],
                water_requirements: "400-500mm total",
                methods: &["Center pivot irrigation", "Drip irrigation for water conservation"],
            },
        ),
    };

    FarmingTechniques {
        crop_type: crop,
        soil_preparation,
        planting,
        fertilization,
        irrigation,
        climate_adjustment: climate_adjustment(zone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn names(risks: &[DiseaseRisk]) -> Vec<&'static str> {
        risks.iter().map(|r| r.disease).collect()
    }

    #[test]
    fn test_black_rust_band_edges() {
        assert!(names(&disease_risks(CropType::Wheat, dec("15"), dec("60"))).contains(&"black_rust"));
        assert!(names(&disease_risks(CropType::Wheat, dec("25"), dec("100"))).contains(&"black_rust"));
        assert!(!names(&disease_risks(CropType::Wheat, dec("25.1"), dec("80"))).contains(&"black_rust"));
        assert!(!names(&disease_risks(CropType::Wheat, dec("20"), dec("59.9"))).contains(&"black_rust"));
    }

    #[test]
    fn test_overlapping_wheat_bands() {
        let risks = disease_risks(CropType::Wheat, dec("18"), dec("75"));
        assert_eq!(names(&risks), vec!["black_rust", "smut", "powdery_mildew"]);
        assert!(risks.iter().all(|r| r.risk_level == DiseaseRiskLevel::High));
    }

    #[test]
    fn test_corn_gray_leaf_spot_needs_very_humid_air() {
        assert_eq!(
            names(&disease_risks(CropType::Corn, dec("28"), dec("85"))),
            vec!["gray_leaf_spot"]
        );
        assert!(disease_risks(CropType::Corn, dec("28"), dec("84.9")).is_empty());
    }

    #[test]
    fn test_dry_weather_has_no_risks() {
        for crop in CropType::ALL {
            assert!(disease_risks(crop, dec("20"), dec("30")).is_empty());
        }
    }

    #[test]
    fn test_protection_measures_by_stage() {
        let emergence = protection_measures(CropType::Wheat, GrowthStage::Emergence);
        assert_eq!(emergence.disease_control.len(), 2);
        assert_eq!(emergence.pest_control.len(), 2);
        assert_eq!(emergence.weed_control.len(), 2);

        let flowering = protection_measures(CropType::Wheat, GrowthStage::Flowering);
        assert!(flowering.disease_control.is_empty());
        assert_eq!(flowering.pest_control, vec![BENEFICIAL_INSECTS, INSECTICIDES]);
        assert!(flowering.weed_control.is_empty());

        let maturity = protection_measures(CropType::Corn, GrowthStage::Maturity);
        assert!(maturity.pest_control.is_empty());
        assert_eq!(maturity.watch_for.len(), 3);
    }

    #[test]
    fn test_farming_techniques_with_climate() {
        let corn = farming_techniques(CropType::Corn, ClimateZone::SemiArid);
        assert_eq!(corn.soil_preparation.optimal_ph, "6.0-7.0");
        assert_eq!(corn.fertilization.split_applications.len(), 3);
        assert_eq!(
            corn.climate_adjustment.unwrap().focus,
            "Water conservation is the absolute priority"
        );

        let wheat = farming_techniques(CropType::Wheat, ClimateZone::Oceanic);
        assert!(wheat.climate_adjustment.is_none());
        assert_eq!(wheat.planting.seed_depth, "3-5cm");
    }
}
