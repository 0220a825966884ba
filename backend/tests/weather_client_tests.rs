//! Weather client tests against a mock upstream
//!
//! Covers response mapping, soil estimates, error classification,
//! the health probe and response caching.

use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use agri_advisory_backend::config::WeatherConfig;
use agri_advisory_backend::external::normalize_soil;
use agri_advisory_backend::{AppError, WeatherClient};
use shared::{DataSource, GeoLocation};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn location() -> GeoLocation {
    GeoLocation::new(dec("45.5"), dec("-122.25")).unwrap()
}

fn client(server: &MockServer) -> WeatherClient {
    WeatherClient::with_base_url("test-key".to_string(), server.uri()).unwrap()
}

fn forecast_item(dt: i64, temp: f64, rain: Option<f64>) -> serde_json::Value {
    let mut item = json!({
        "dt": dt,
        "main": {"temp": temp, "humidity": 70},
        "wind": {"speed": 4.1, "deg": 90},
    });
    if let Some(r) = rain {
        item["rain"] = json!({"3h": r});
    }
    item
}

#[tokio::test]
async fn current_weather_maps_fields_and_estimates_soil() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "45.5"))
        .and(query_param("lon", "-122.25"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dt": 1714564800,
            "main": {"temp": 18.5, "humidity": 60, "pressure": 1013},
            "wind": {"speed": 3.2, "deg": 210},
            "rain": {"1h": 0.5},
            "name": "Portland"
        })))
        .mount(&server)
        .await;

    let condition = client(&server).get_current_weather(&location()).await.unwrap();

    assert_eq!(condition.temperature(), dec("18.5"));
    assert_eq!(condition.humidity(), dec("60"));
    assert_eq!(condition.precipitation(), dec("0.5"));
    assert_eq!(condition.wind_speed(), dec("3.2"));
    assert_eq!(condition.wind_direction(), dec("210"));
    assert_eq!(condition.timestamp().timestamp(), 1714564800);

    let soil_temperature = condition.soil_temperature().unwrap();
    assert_eq!(soil_temperature.value, dec("16.5"));
    assert_eq!(soil_temperature.source, DataSource::Estimated);
    assert_eq!(condition.soil_moisture().unwrap().value, dec("42"));
}

#[tokio::test]
async fn missing_rain_defaults_to_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dt": 1714564800,
            "main": {"temp": 21, "humidity": 40},
            "wind": {"speed": 1.5}
        })))
        .mount(&server)
        .await;

    let condition = client(&server).get_current_weather(&location()).await.unwrap();
    assert_eq!(condition.precipitation(), Decimal::ZERO);
    assert_eq!(condition.wind_direction(), Decimal::ZERO);
}

#[tokio::test]
async fn non_success_status_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&server)
        .await;

    let err = client(&server).get_current_weather(&location()).await.unwrap_err();
    assert!(matches!(err, AppError::Upstream(ref msg) if msg.contains("401")));
}

#[tokio::test]
async fn malformed_body_is_mapping_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dt": 1714564800,
            "main": {"humidity": 60},
            "wind": {"speed": 3.2}
        })))
        .mount(&server)
        .await;

    let err = client(&server).get_current_weather(&location()).await.unwrap_err();
    assert!(matches!(err, AppError::Mapping(_)));
}

#[tokio::test]
async fn unreachable_upstream_is_upstream_error() {
    let client =
        WeatherClient::with_base_url("test-key".to_string(), "http://127.0.0.1:1".to_string())
            .unwrap();
    let err = client.get_current_weather(&location()).await.unwrap_err();
    assert!(matches!(err, AppError::Upstream(_)));
}

#[tokio::test]
async fn forecast_requests_eight_samples_per_day() {
    let server = MockServer::start().await;
    let list: Vec<_> = (0..8)
        .map(|i| forecast_item(1714564800 + i * 10800, 20.0, Some(3.125)))
        .collect();
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("cnt", "8"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cnt": 8, "list": list})))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = client(&server).get_forecast(&location(), 1).await.unwrap();

    assert_eq!(forecast.location_id(), "45.5,-122.25");
    assert_eq!(forecast.conditions().len(), 8);
    let total: Decimal = forecast.conditions().iter().map(|c| c.precipitation()).sum();
    assert_eq!(total, dec("25"));
    assert!(forecast
        .conditions()
        .windows(2)
        .all(|w| w[0].timestamp() < w[1].timestamp()));
}

#[tokio::test]
async fn forecast_sample_count_is_capped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("cnt", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [forecast_item(1714564800, 15.0, None)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = client(&server).get_forecast(&location(), 7).await.unwrap();
    assert_eq!(forecast.conditions().len(), 1);
}

#[tokio::test]
async fn forecast_days_out_of_range_never_calls_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    for days in [0, 8] {
        let err = client.get_forecast(&location(), days).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e.has_field("days")));
    }
}

#[tokio::test]
async fn empty_forecast_is_mapping_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": []})))
        .mount(&server)
        .await;

    let err = client(&server).get_forecast(&location(), 2).await.unwrap_err();
    assert!(matches!(err, AppError::Mapping(_)));
}

#[tokio::test]
async fn soil_data_is_passed_through_and_normalised() {
    let server = MockServer::start().await;
    let payload = json!({"dt": 1714564800, "t0": 290.15, "t10": 285.65, "moisture": 0.275});
    Mock::given(method("GET"))
        .and(path("/soil"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .mount(&server)
        .await;

    let raw = client(&server).get_soil_data(&location()).await.unwrap();
    assert_eq!(raw, payload);

    let soil = normalize_soil(&raw).unwrap();
    assert_eq!(soil.temperature_celsius.value, dec("12.5"));
    assert_eq!(soil.moisture_percent.value, dec("27.5"));
}

#[tokio::test]
async fn soil_payload_without_readings_is_mapping_error() {
    let err = normalize_soil(&json!({"dt": 1714564800})).unwrap_err();
    assert!(matches!(err, AppError::Mapping(_)));
}

#[tokio::test]
async fn health_check_reports_ok_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "0"))
        .and(query_param("lon", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    assert!(client(&server).health_check().await);
}

#[tokio::test]
async fn health_check_reports_error_status_as_false() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(!client(&server).health_check().await);
}

#[tokio::test]
async fn health_check_unreachable_is_false_within_bound() {
    let client =
        WeatherClient::with_base_url("test-key".to_string(), "http://127.0.0.1:1".to_string())
            .unwrap();
    let healthy = tokio::time::timeout(Duration::from_secs(6), client.health_check())
        .await
        .expect("health check exceeded its timeout");
    assert!(!healthy);
}

#[tokio::test]
async fn health_check_times_out_on_slow_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = WeatherClient::new(&WeatherConfig {
        api_endpoint: server.uri(),
        soil_endpoint: server.uri(),
        health_timeout_secs: 1,
        ..WeatherConfig::default()
    })
    .unwrap();
    assert!(!client.health_check().await);
}

#[tokio::test]
async fn repeated_lookups_hit_the_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dt": 1714564800,
            "main": {"temp": 18, "humidity": 50},
            "wind": {"speed": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = WeatherClient::new(&WeatherConfig {
        api_endpoint: server.uri(),
        soil_endpoint: server.uri(),
        cache_ttl_secs: 60,
        ..WeatherConfig::default()
    })
    .unwrap();

    let first = client.get_current_weather(&location()).await.unwrap();
    let second = client.get_current_weather(&location()).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn cache_disabled_with_zero_ttl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dt": 1714564800,
            "main": {"temp": 18, "humidity": 50},
            "wind": {"speed": 2}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    client.get_current_weather(&location()).await.unwrap();
    client.get_current_weather(&location()).await.unwrap();
}
