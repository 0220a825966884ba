//! Common types used across the advisory service

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::models::{ClimateZone, SoilType};
use crate::validation::{validate_latitude, validate_longitude};

/// A farm site
///
/// Coordinates are validated on construction, including deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "GeoLocationInput")]
pub struct GeoLocation {
    latitude: Decimal,
    longitude: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    elevation_meters: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    climate_zone: Option<ClimateZone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    soil_type: Option<SoilType>,
}

#[derive(Deserialize)]
struct GeoLocationInput {
    latitude: Decimal,
    longitude: Decimal,
    #[serde(default)]
    elevation_meters: Option<Decimal>,
    #[serde(default)]
    climate_zone: Option<ClimateZone>,
    #[serde(default)]
    soil_type: Option<SoilType>,
}

impl TryFrom<GeoLocationInput> for GeoLocation {
    type Error = ValidationErrors;

    fn try_from(input: GeoLocationInput) -> Result<Self, Self::Error> {
        let location = GeoLocation::new(input.latitude, input.longitude)?;
        let location = match input.elevation_meters {
            Some(elevation) => location.with_elevation(elevation),
            None => location,
        };
        let location = match input.climate_zone {
            Some(zone) => location.with_climate_zone(zone),
            None => location,
        };
        Ok(match input.soil_type {
            Some(soil) => location.with_soil_type(soil),
            None => location,
        })
    }
}

impl GeoLocation {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check("latitude", validate_latitude(latitude));
        errors.check("longitude", validate_longitude(longitude));
        errors.into_result()?;

        Ok(Self {
            latitude,
            longitude,
            elevation_meters: None,
            climate_zone: None,
            soil_type: None,
        })
    }

    pub fn with_elevation(mut self, elevation_meters: Decimal) -> Self {
        self.elevation_meters = Some(elevation_meters);
        self
    }

    pub fn with_climate_zone(mut self, climate_zone: ClimateZone) -> Self {
        self.climate_zone = Some(climate_zone);
        self
    }

    pub fn with_soil_type(mut self, soil_type: SoilType) -> Self {
        self.soil_type = Some(soil_type);
        self
    }

    pub fn latitude(&self) -> Decimal {
        self.latitude
    }

    pub fn longitude(&self) -> Decimal {
        self.longitude
    }

    pub fn elevation_meters(&self) -> Option<Decimal> {
        self.elevation_meters
    }

    pub fn climate_zone(&self) -> Option<ClimateZone> {
        self.climate_zone
    }

    pub fn soil_type(&self) -> Option<SoilType> {
        self.soil_type
    }

    /// Key identifying this site in forecasts and schedules, `"lat,lon"`
    pub fn location_id(&self) -> String {
        format!("{},{}", self.latitude.normalize(), self.longitude.normalize())
    }
}

/// Inclusive numeric range with `min <= max`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "ValueRangeInput")]
pub struct ValueRange {
    min: Decimal,
    max: Decimal,
}

#[derive(Deserialize)]
struct ValueRangeInput {
    min: Decimal,
    max: Decimal,
}

impl TryFrom<ValueRangeInput> for ValueRange {
    type Error = String;

    fn try_from(input: ValueRangeInput) -> Result<Self, Self::Error> {
        ValueRange::new(input.min, input.max)
    }
}

impl ValueRange {
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, String> {
        if min > max {
            return Err(format!("min ({}) must not exceed max ({})", min, max));
        }
        Ok(Self { min, max })
    }

    /// Build a range from table bounds already known to be ordered
    pub(crate) fn from_bounds(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn max(&self) -> Decimal {
        self.max
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }
}

impl std::fmt::Display for ValueRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min.normalize(), self.max.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_geo_location_valid() {
        let location = GeoLocation::new(dec("45.523064"), dec("-122.676483"))
            .unwrap()
            .with_elevation(dec("50"))
            .with_soil_type(SoilType::Loam);

        assert_eq!(location.latitude(), dec("45.523064"));
        assert_eq!(location.elevation_meters(), Some(dec("50")));
        assert_eq!(location.soil_type(), Some(SoilType::Loam));
        assert_eq!(location.climate_zone(), None);
        assert_eq!(location.location_id(), "45.523064,-122.676483");
    }

    #[test]
    fn test_geo_location_rejects_both_coordinates() {
        let errors = GeoLocation::new(dec("90.5"), dec("-181")).unwrap_err();
        assert!(errors.has_field("latitude"));
        assert!(errors.has_field("longitude"));
    }

    #[test]
    fn test_geo_location_deserialize_validates() {
        let ok: GeoLocation =
            serde_json::from_str(r#"{"latitude":"10","longitude":"20","climate_zone":"oceanic"}"#)
                .unwrap();
        assert_eq!(ok.climate_zone(), Some(ClimateZone::Oceanic));

        let bad = serde_json::from_str::<GeoLocation>(r#"{"latitude":"100","longitude":"0"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_value_range() {
        let range = ValueRange::new(dec("6.0"), dec("7.5")).unwrap();
        assert!(range.contains(dec("6.0")));
        assert!(range.contains(dec("7.5")));
        assert!(!range.contains(dec("7.6")));
        assert_eq!(range.to_string(), "6-7.5");
        assert!(ValueRange::new(dec("30"), dec("20")).is_err());
    }

    #[test]
    fn test_value_range_deserialize_rejects_inverted() {
        let bad = serde_json::from_str::<ValueRange>(r#"{"min":"5","max":"1"}"#);
        assert!(bad.is_err());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_coordinates_accepted_in_range(
                lat in -9000i64..=9000,
                lon in -18000i64..=18000,
            ) {
                let location = GeoLocation::new(Decimal::new(lat, 2), Decimal::new(lon, 2));
                prop_assert!(location.is_ok());
            }

            #[test]
            fn prop_latitude_rejected_out_of_range(lat in 9001i64..100000, negative in any::<bool>()) {
                let lat = if negative { -lat } else { lat };
                let errors = GeoLocation::new(Decimal::new(lat, 2), Decimal::ZERO).unwrap_err();
                prop_assert!(errors.has_field("latitude"));
                prop_assert!(!errors.has_field("longitude"));
            }

            #[test]
            fn prop_value_range_requires_ordered_bounds(a in -1000i64..1000, b in -1000i64..1000) {
                let range = ValueRange::new(Decimal::from(a), Decimal::from(b));
                prop_assert_eq!(range.is_ok(), a <= b);
            }
        }
    }
}
