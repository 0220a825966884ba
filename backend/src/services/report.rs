//! Plain-text rendering of weather resources

use std::fmt::Write;

use shared::{SoilReading, WeatherCondition};

use super::weather::{CropCalendarReport, CurrentConditionsReport, ForecastReport};

fn soil_line(label: &str, reading: Option<SoilReading>, unit: &str) -> String {
    match reading {
        Some(r) if r.is_estimated() => format!("{}: {}{} (estimated)", label, r.value, unit),
        Some(r) => format!("{}: {}{}", label, r.value, unit),
        None => format!("{}: n/a", label),
    }
}

fn write_conditions(out: &mut String, condition: &WeatherCondition) {
    let _ = writeln!(out, "Temperature: {}°C", condition.temperature());
    let _ = writeln!(out, "Humidity: {}%", condition.humidity());
    let _ = writeln!(out, "Precipitation: {} mm", condition.precipitation());
    let _ = writeln!(
        out,
        "Wind: {} m/s from {}°",
        condition.wind_speed(),
        condition.wind_direction()
    );
    let _ = writeln!(
        out,
        "{}",
        soil_line("Soil temperature", condition.soil_temperature(), "°C")
    );
    let _ = writeln!(
        out,
        "{}",
        soil_line("Soil moisture", condition.soil_moisture(), "%")
    );
}

pub fn render_current_weather(report: &CurrentConditionsReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Current weather at {}",
        report.location.location_id()
    );
    let _ = writeln!(
        out,
        "Observed: {}",
        report.conditions.timestamp().format("%Y-%m-%d %H:%M UTC")
    );
    out.push('\n');
    write_conditions(&mut out, &report.conditions);

    let assessment = &report.agricultural_assessment;
    out.push_str("\nAgricultural assessment\n");
    let _ = writeln!(out, "Planting: {}", assessment.planting.message);
    let _ = writeln!(out, "Irrigation: {}", assessment.irrigation.message);
    let _ = writeln!(out, "Field work: {}", assessment.field_work.message);
    out
}

pub fn render_forecast(report: &ForecastReport) -> String {
    let mut out = String::new();
    let summary = &report.analysis.summary;
    let _ = writeln!(
        out,
        "Forecast for {} ({} samples)",
        report.location.location_id(),
        summary.sample_count
    );
    let _ = writeln!(out, "Total precipitation: {} mm", summary.total_precipitation.round_dp(1));
    let _ = writeln!(out, "Average temperature: {}°C", summary.average_temperature.round_dp(1));
    let _ = writeln!(out, "Average humidity: {}%", summary.average_humidity.round_dp(1));

    out.push_str("\nDaily summary\n");
    for day in &report.analysis.daily {
        let _ = writeln!(
            out,
            "{}: {}°C avg, {} mm rain, {}% humidity",
            day.date,
            day.average_temperature.round_dp(1),
            day.total_precipitation.round_dp(1),
            day.average_humidity.round_dp(1)
        );
    }

    let recommendations = &report.analysis.recommendations;
    out.push_str("\nRecommendations\n");
    let _ = writeln!(out, "Irrigation: {}", recommendations.irrigation_message);
    let _ = writeln!(out, "Planting: {}", recommendations.planting_message);
    let _ = writeln!(
        out,
        "Field work periods: {}",
        recommendations.field_work_periods
    );
    let _ = writeln!(out, "Pest risk: {}", recommendations.pest_risk_message);

    if !summary.optimal_planting_days.is_empty() {
        out.push_str("\nOptimal planting periods\n");
        for condition in &summary.optimal_planting_days {
            let _ = writeln!(
                out,
                "{}: {}°C, {} mm",
                condition.timestamp().format("%Y-%m-%d %H:%M"),
                condition.temperature(),
                condition.precipitation()
            );
        }
    }
    out
}

pub fn render_crop_calendar(report: &CropCalendarReport) -> String {
    let mut out = String::new();
    let calendar = &report.crop_calendar;
    let _ = writeln!(
        out,
        "Crop calendar: {} at {}",
        calendar.crop_type,
        report.location.location_id()
    );
    let _ = writeln!(out, "Planting season: {}", calendar.planting_season);
    let _ = writeln!(out, "Optimal temperature: {}°C", calendar.optimal_temperature);
    let _ = writeln!(
        out,
        "Minimum soil temperature: {}°C",
        calendar.min_soil_temperature
    );
    let _ = writeln!(out, "Growing days: {}", calendar.growing_days);

    out.push_str("\nCurrent conditions\n");
    write_conditions(&mut out, &report.current_conditions);

    let _ = writeln!(out, "\nRecommendation: {}", report.planting_recommendation);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use shared::advisory::{
        analyze_forecast, crop_calendar, planting_recommendation, AdvisoryThresholds,
        ConditionAssessor,
    };
    use shared::advisory::planting::growing_conditions;
    use shared::{CropType, GeoLocation, WeatherForecast};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn condition(hour: u32, temp: &str, rain: &str) -> WeatherCondition {
        WeatherCondition::new(
            Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
            dec(temp),
            dec("60"),
            dec(rain),
            dec("3"),
            dec("90"),
        )
        .unwrap()
        .with_estimated_soil()
    }

    #[test]
    fn test_current_weather_flags_estimates() {
        let conditions = condition(12, "22", "0");
        let report = CurrentConditionsReport {
            location: GeoLocation::new(dec("45.5"), dec("-93.25")).unwrap(),
            agricultural_assessment: ConditionAssessor::default().assess(&conditions),
            conditions,
        };
        let text = render_current_weather(&report);
        assert!(text.starts_with("Current weather at 45.5,-93.25"));
        assert!(text.contains("Soil temperature: 20°C (estimated)"));
        assert!(text.contains("Planting: "));
    }

    #[test]
    fn test_forecast_lists_days() {
        let location = GeoLocation::new(dec("45"), dec("-93")).unwrap();
        let conditions = vec![condition(6, "18", "0"), condition(12, "24", "2")];
        let analysis = analyze_forecast(&conditions, &AdvisoryThresholds::default()).unwrap();
        let report = ForecastReport {
            forecast: WeatherForecast::new(&location, conditions, Utc::now()).unwrap(),
            location,
            analysis,
        };
        let text = render_forecast(&report);
        assert!(text.contains("2024-05-01: 21°C avg, 2 mm rain, 60% humidity"));
        assert!(text.contains("Optimal planting periods"));
    }

    #[test]
    fn test_crop_calendar_text() {
        let current = condition(12, "24", "0");
        let report = CropCalendarReport {
            location: GeoLocation::new(dec("45"), dec("-93")).unwrap(),
            crop_calendar: crop_calendar(CropType::Corn),
            planting_recommendation: planting_recommendation(CropType::Corn, &current),
            growing_conditions: growing_conditions(CropType::Corn, &current),
            current_conditions: current,
        };
        let text = render_crop_calendar(&report);
        assert!(text.starts_with("Crop calendar: corn at 45,-93"));
        assert!(text.contains("Minimum soil temperature: 10°C"));
    }
}
