//! Advisory engine tests
//!
//! Covers the condition classifiers, forecast aggregation and the
//! validation boundaries of the advisory queries.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::advisory::forecast::{is_optimal_planting_day, optimal_planting_days, summarize};
use shared::advisory::{
    analyze_forecast, seasonal_note, soil_compatibility, AdvisoryThresholds, ConditionAssessor,
    FieldWorkSuitability, IrrigationNeed, PlantingSuitability,
};
use shared::advisory::forecast::IrrigationRecommendation;
use shared::{
    validate_soil_analysis, AdvisoryError, CropType, Season, SoilAnalysisQuery, SoilType,
    WeatherCondition,
};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
}

fn condition_at(offset_hours: i64, temperature: Decimal, precipitation: Decimal) -> WeatherCondition {
    WeatherCondition::new(
        base_time() + Duration::hours(offset_hours),
        temperature,
        dec("55"),
        precipitation,
        dec("4"),
        dec("200"),
    )
    .unwrap()
}

fn soil_query(ph: Decimal) -> SoilAnalysisQuery {
    SoilAnalysisQuery {
        ph_level: ph,
        organic_matter: dec("3.5"),
        nitrogen: dec("40"),
        phosphorus: dec("25"),
        potassium: dec("180"),
        soil_moisture: dec("45"),
        crop_type: None,
        soil_type: None,
    }
}

// ============================================================================
// Scenario Tests
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn compatibility_corn_on_loam() {
        let text = soil_compatibility(CropType::Corn, SoilType::Loam).to_string();
        assert!(text.starts_with("Excellent"));
        assert!(text.contains("ideal growing medium"));
    }

    #[test]
    fn compatibility_wheat_on_sand() {
        let text = soil_compatibility(CropType::Wheat, SoilType::Sandy).to_string();
        assert!(text.starts_with("Poor"));
        assert!(text.contains("may need significant amendments"));
    }

    #[test]
    fn every_pair_has_an_entry() {
        for crop in CropType::ALL {
            for soil in SoilType::ALL {
                assert!(!soil_compatibility(crop, soil).rationale.is_empty());
            }
            for season in Season::ALL {
                assert!(!seasonal_note(crop, season).text.is_empty());
            }
        }
    }

    #[test]
    fn fall_corn_is_not_recommended() {
        assert!(!seasonal_note(CropType::Corn, Season::Fall).recommended);
        assert!(seasonal_note(CropType::Wheat, Season::Fall).recommended);
    }

    #[test]
    fn cold_day_assessment() {
        let condition = condition_at(0, dec("5"), dec("0"))
            .with_measured_soil(None, Some(dec("50")))
            .unwrap();
        let assessment = ConditionAssessor::default().assess(&condition);

        assert_eq!(assessment.planting.status, PlantingSuitability::TooCold);
        assert_eq!(assessment.irrigation.status, IrrigationNeed::Monitor);
        assert_eq!(assessment.field_work.status, FieldWorkSuitability::Suitable);
    }

    #[test]
    fn wet_day_of_eight_samples_needs_minimal_irrigation() {
        let rain = [dec("5"), dec("5"), dec("4"), dec("3"), dec("3"), dec("2"), dec("2"), dec("1")];
        let conditions: Vec<_> = rain
            .iter()
            .enumerate()
            .map(|(i, r)| condition_at(i as i64 * 3, dec("20"), *r))
            .collect();

        let analysis = analyze_forecast(&conditions, &AdvisoryThresholds::default()).unwrap();
        assert_eq!(analysis.summary.total_precipitation, dec("25"));
        assert_eq!(
            analysis.recommendations.irrigation_recommendation,
            IrrigationRecommendation::Minimal
        );
        assert_eq!(
            analysis.recommendations.irrigation_message,
            "Minimal irrigation needed"
        );
        assert_eq!(analysis.daily.len(), 1);
        assert_eq!(analysis.daily[0].samples, 8);
    }

    #[test]
    fn empty_forecast_is_rejected() {
        assert_eq!(
            summarize(&[]).unwrap_err(),
            AdvisoryError::EmptyInput("forecast conditions")
        );
    }

    #[test]
    fn ph_boundaries() {
        assert!(validate_soil_analysis(&soil_query(dec("0"))).is_ok());
        assert!(validate_soil_analysis(&soil_query(dec("14"))).is_ok());

        let low = validate_soil_analysis(&soil_query(dec("-0.01"))).unwrap_err();
        assert!(low.has_field("ph_level"));
        let high = validate_soil_analysis(&soil_query(dec("14.01"))).unwrap_err();
        assert!(high.has_field("ph_level"));
    }

    #[test]
    fn all_violations_are_reported() {
        let mut query = soil_query(dec("15"));
        query.organic_matter = dec("101");
        query.potassium = dec("900");
        let errors = validate_soil_analysis(&query).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;

    fn temperature_strategy() -> impl Strategy<Value = Decimal> {
        (-300i64..=500).prop_map(|v| Decimal::new(v, 1))
    }

    fn precipitation_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=300).prop_map(|v| Decimal::new(v, 1))
    }

    fn moisture_strategy() -> impl Strategy<Value = Option<Decimal>> {
        prop::option::of((0i64..=1000).prop_map(|v| Decimal::new(v, 1)))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Equal inputs always produce equal assessments
        #[test]
        fn prop_assessment_is_deterministic(
            temp in temperature_strategy(),
            rain in precipitation_strategy(),
            moisture in moisture_strategy(),
        ) {
            let condition = condition_at(0, temp, rain)
                .with_measured_soil(None, moisture)
                .unwrap();
            let first = ConditionAssessor::default().assess(&condition);
            let second = ConditionAssessor::new(&AdvisoryThresholds::default())
                .assess(&condition.clone());
            prop_assert_eq!(first, second);
        }

        /// Below the minimum temperature nothing else matters for planting
        #[test]
        fn prop_cold_always_wins(
            temp in (-300i64..100).prop_map(|v| Decimal::new(v, 1)),
            rain in precipitation_strategy(),
            moisture in moisture_strategy(),
        ) {
            let condition = condition_at(0, temp, rain)
                .with_measured_soil(None, moisture)
                .unwrap();
            prop_assert_eq!(
                ConditionAssessor::default().planting(&condition),
                PlantingSuitability::TooCold
            );
        }

        /// At most three optimal days, each within bounds, taken in forecast order
        #[test]
        fn prop_optimal_days_bounded(
            samples in prop::collection::vec((temperature_strategy(), precipitation_strategy()), 1..40)
        ) {
            let conditions: Vec<_> = samples
                .iter()
                .enumerate()
                .map(|(i, (t, r))| condition_at(i as i64 * 3, *t, *r))
                .collect();

            let picked = optimal_planting_days(&conditions);
            prop_assert!(picked.len() <= 3);
            for condition in &picked {
                prop_assert!(condition.temperature() >= dec("15"));
                prop_assert!(condition.temperature() <= dec("30"));
                prop_assert!(condition.precipitation() < dec("5"));
            }

            let expected: Vec<_> = conditions
                .iter()
                .filter(|c| is_optimal_planting_day(c))
                .take(3)
                .cloned()
                .collect();
            prop_assert_eq!(picked, expected);
        }

        /// Averages stay within the sample extremes
        #[test]
        fn prop_summary_average_within_range(
            temps in prop::collection::vec(temperature_strategy(), 1..40)
        ) {
            let conditions: Vec<_> = temps
                .iter()
                .enumerate()
                .map(|(i, t)| condition_at(i as i64 * 3, *t, Decimal::ZERO))
                .collect();
            let summary = summarize(&conditions).unwrap();
            let min = temps.iter().min().copied().unwrap();
            let max = temps.iter().max().copied().unwrap();

            prop_assert_eq!(summary.sample_count, temps.len());
            prop_assert!(summary.average_temperature >= min.round_dp(2) - dec("0.01"));
            prop_assert!(summary.average_temperature <= max.round_dp(2) + dec("0.01"));
        }

        /// Every pH in [0, 14] is accepted
        #[test]
        fn prop_ph_in_range_accepted(ph in (0i64..=1400).prop_map(|v| Decimal::new(v, 2))) {
            prop_assert!(validate_soil_analysis(&soil_query(ph)).is_ok());
        }

        /// Every pH outside [0, 14] is rejected on the ph_level field
        #[test]
        fn prop_ph_out_of_range_rejected(
            ph in prop_oneof![
                (-10000i64..0).prop_map(|v| Decimal::new(v, 2)),
                (1401i64..10000).prop_map(|v| Decimal::new(v, 2)),
            ]
        ) {
            let errors = validate_soil_analysis(&soil_query(ph)).unwrap_err();
            prop_assert!(errors.has_field("ph_level"));
        }
    }
}
