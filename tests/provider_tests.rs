//! Provider clients against a local mock of the OpenWeatherMap and Stormglass APIs

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use coastcast::config::{CoastcastConfig, HttpConfig, OpenWeatherConfig, StormglassConfig};
use coastcast::providers::{
    ForecastProvider, OceanCurrentProvider, OpenWeatherClient, PollutionProvider, StormglassClient,
    WeatherProvider, build_http_client,
};
use coastcast::{BeachReason, CoastcastError, CompassPoint, ReportOptions, ReportService};
use serde_json::json;

const API_KEY: &str = "test_api_key_123";
const STORMGLASS_KEY: &str = "stormglass_key_456";

// latitude prefixes the ocean mock uses to pick a response
const INLAND_LAT: f64 = 42.6977;
const REJECTED_LAT: f64 = 50.0;

type Params = Query<HashMap<String, String>>;

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"cod": 401, "message": "Invalid API key"})),
    )
        .into_response()
}

async fn weather(Query(params): Params) -> Response {
    if params.get("appid").map(String::as_str) != Some(API_KEY) {
        return unauthorized();
    }
    match params.get("q").map(String::as_str) {
        Some("Atlantis") => (
            StatusCode::NOT_FOUND,
            Json(json!({"cod": "404", "message": "city not found"})),
        )
            .into_response(),
        Some("Broken") => Json(json!({"coord": {"lat": 1.0, "lon": 2.0}})).into_response(),
        Some("Sofia") => Json(json!({
            "coord": {"lon": 23.3219, "lat": INLAND_LAT},
            "weather": [{"main": "Clouds", "description": "broken clouds"}],
            "main": {"temp": 18.2},
            "wind": {"speed": 3.0, "deg": 10},
            "name": "Sofia",
            "sys": {"country": "BG"}
        }))
        .into_response(),
        Some(city) => {
            assert_eq!(params.get("units").map(String::as_str), Some("metric"));
            Json(json!({
                "coord": {"lon": 27.9147, "lat": 43.214},
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky"}],
                "main": {"temp": 24.6, "humidity": 61},
                "wind": {"speed": 4.6, "deg": 95},
                "name": city,
                "sys": {"country": "BG"}
            }))
            .into_response()
        }
        None => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn air_pollution(Query(params): Params) -> Response {
    if params.get("appid").map(String::as_str) != Some(API_KEY) {
        return unauthorized();
    }
    let lat: f64 = params["lat"].parse().unwrap();
    if lat == REJECTED_LAT {
        return Json(json!({"coord": {}, "list": []})).into_response();
    }
    Json(json!({
        "coord": {"lon": 27.9147, "lat": 43.214},
        "list": [{
            "main": {"aqi": 1},
            "components": {"co": 210.3, "no2": 1.2, "o3": 68.7, "pm2_5": 3.4, "pm10": 6.1},
            "dt": 1_717_200_000
        }]
    }))
    .into_response()
}

async fn forecast(Query(params): Params) -> Response {
    if params.get("q").map(String::as_str) == Some("Atlantis") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"cod": "404", "message": "city not found"})),
        )
            .into_response();
    }
    Json(json!({
        "cod": "200",
        "cnt": 3,
        "list": [
            {"dt": 1_717_200_000, "main": {"temp": 21.5}, "weather": [{"description": "clear sky"}]},
            {"dt": 1_717_210_800, "main": {"temp": 23.1}, "weather": [{"description": "few clouds"}]},
            {"dt": 1_717_221_600, "main": {"temp": 25.8}, "weather": []}
        ]
    }))
    .into_response()
}

async fn ocean_currents(headers: HeaderMap, Query(params): Params) -> Response {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(STORMGLASS_KEY) {
        return (StatusCode::FORBIDDEN, Json(json!({"errors": {"key": "Unauthorized"}})))
            .into_response();
    }
    assert_eq!(params["params"], "currentSpeed,currentDirection");
    assert_eq!(params["source"], "noaa");
    assert!(DateTime::parse_from_rfc3339(&params["end"]).is_ok());

    let lat: f64 = params["lat"].parse().unwrap();
    if lat == INLAND_LAT {
        return Json(json!({"hours": [], "meta": {"cost": 1}})).into_response();
    }
    if lat == REJECTED_LAT {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"errors": {"lat": "Outside coverage"}})),
        )
            .into_response();
    }
    Json(json!({
        "hours": [
            {"time": "2024-06-01T00:00:00+00:00", "currentSpeed": {"noaa": 0.27}, "currentDirection": {"noaa": 181.0}},
            {"time": "2024-06-01T01:00:00+00:00", "currentSpeed": {"noaa": 0.31}}
        ],
        "meta": {"cost": 1, "dailyQuota": 10}
    }))
    .into_response()
}

async fn spawn_mock() -> String {
    let router = Router::new()
        .route("/data/2.5/weather", get(weather))
        .route("/data/2.5/air_pollution", get(air_pollution))
        .route("/data/2.5/forecast", get(forecast))
        .route("/v2/ocean/currents/point", get(ocean_currents));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn openweather(base_url: &str, api_key: &str) -> OpenWeatherClient {
    let config = OpenWeatherConfig {
        api_key: Some(api_key.to_string()),
        base_url: base_url.to_string(),
    };
    OpenWeatherClient::new(build_http_client(&HttpConfig::default()).unwrap(), &config).unwrap()
}

fn stormglass(base_url: &str, api_key: &str) -> StormglassClient {
    let config = StormglassConfig {
        api_key: Some(api_key.to_string()),
        base_url: base_url.to_string(),
    };
    StormglassClient::new(build_http_client(&HttpConfig::default()).unwrap(), &config).unwrap()
}

#[tokio::test]
async fn test_current_weather() {
    let base_url = spawn_mock().await;
    let client = openweather(&base_url, API_KEY);

    let result = client.current_weather("Varna").await.unwrap();
    assert_eq!(result.location.name, "Varna");
    assert_eq!(result.location.country.as_deref(), Some("BG"));
    assert_eq!(result.weather.temperature_c, 24.6);
    assert_eq!(result.weather.condition, "clear sky");
    assert_eq!(result.weather.wind_bearing_deg, 95.0);
    assert_eq!(result.weather.wind_direction(), CompassPoint::E);
    assert_eq!(result.weather.latitude, 43.214);
}

#[tokio::test]
async fn test_unknown_city_maps_to_invalid_input() {
    let base_url = spawn_mock().await;
    let client = openweather(&base_url, API_KEY);

    let result = client.current_weather("Atlantis").await;
    assert!(matches!(result, Err(CoastcastError::InputInvalid { .. })));

    let result = client.forecast("Atlantis").await;
    assert!(matches!(result, Err(CoastcastError::InputInvalid { .. })));
}

#[tokio::test]
async fn test_rejected_key_maps_to_unavailable() {
    let base_url = spawn_mock().await;
    let client = openweather(&base_url, "wrong_key_0000");

    let result = client.current_weather("Varna").await;
    assert!(matches!(
        result,
        Err(CoastcastError::ProviderUnavailable { status: 401, .. })
    ));
}

#[tokio::test]
async fn test_incomplete_body_maps_to_data_missing() {
    let base_url = spawn_mock().await;
    let client = openweather(&base_url, API_KEY);

    let result = client.current_weather("Broken").await;
    assert!(matches!(
        result,
        Err(CoastcastError::ProviderDataMissing { .. })
    ));
}

#[tokio::test]
async fn test_air_pollution() {
    let base_url = spawn_mock().await;
    let client = openweather(&base_url, API_KEY);

    let sample = client.air_pollution(43.214, 27.9147).await.unwrap();
    assert_eq!(sample.aqi, 1);
    assert_eq!(sample.pm2_5(), Some(3.4));
    assert_eq!(sample.components.len(), 5);

    let result = client.air_pollution(REJECTED_LAT, 10.0).await;
    assert!(matches!(
        result,
        Err(CoastcastError::ProviderDataMissing { .. })
    ));
}

#[tokio::test]
async fn test_forecast_keeps_provider_order() {
    let base_url = spawn_mock().await;
    let client = openweather(&base_url, API_KEY);

    let points = client.forecast("Varna").await.unwrap();
    let epochs: Vec<i64> = points.iter().map(|p| p.epoch_seconds).collect();
    assert_eq!(epochs, vec![1_717_200_000, 1_717_210_800, 1_717_221_600]);
    assert_eq!(points[1].description, "few clouds");
    assert_eq!(points[2].description, "");
}

#[tokio::test]
async fn test_ocean_currents() {
    let base_url = spawn_mock().await;
    let client = stormglass(&base_url, STORMGLASS_KEY);

    let samples = client
        .ocean_currents(43.214, 27.9147, Utc::now())
        .await
        .unwrap();
    // the second hour lacks a direction and is dropped
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].speed_ms, 0.27);
    assert_eq!(samples[0].direction(), CompassPoint::S);
    assert_eq!(samples[0].time.unwrap().timestamp(), 1_717_200_000);

    let inland = client
        .ocean_currents(INLAND_LAT, 23.3219, Utc::now())
        .await
        .unwrap();
    assert!(inland.is_empty());

    let rejected = client.ocean_currents(REJECTED_LAT, 10.0, Utc::now()).await;
    assert!(matches!(
        rejected,
        Err(CoastcastError::ProviderUnavailable { status: 422, .. })
    ));
}

#[tokio::test]
async fn test_ocean_currents_wrong_key() {
    let base_url = spawn_mock().await;
    let client = stormglass(&base_url, "not_the_key_789");

    let result = client.ocean_currents(43.214, 27.9147, Utc::now()).await;
    assert!(matches!(
        result,
        Err(CoastcastError::ProviderUnavailable { status: 403, .. })
    ));
}

fn mock_config(base_url: &str) -> CoastcastConfig {
    let mut config = CoastcastConfig::default();
    config.providers.openweather.api_key = Some(API_KEY.to_string());
    config.providers.openweather.base_url = base_url.to_string();
    config.providers.stormglass.api_key = Some(STORMGLASS_KEY.to_string());
    config.providers.stormglass.base_url = base_url.to_string();
    config
}

#[tokio::test]
async fn test_report_end_to_end() {
    let base_url = spawn_mock().await;
    let service = ReportService::from_config(&mock_config(&base_url)).unwrap();

    let report = service
        .build("Varna", ReportOptions::default())
        .await
        .unwrap();

    assert_eq!(report.location.display_name(), "Varna, BG");
    assert_eq!(report.beach.data().unwrap().reason, BeachReason::Ok);
    assert_eq!(report.air_quality.data().unwrap().label, "Good");
    let ocean = report.ocean.as_ref().unwrap().data().unwrap();
    assert_eq!(ocean.direction, CompassPoint::S);
    let forecast = report.forecast.as_ref().unwrap().data().unwrap();
    assert_eq!(forecast.len(), 3);
    assert_eq!(forecast.points[1].condition, "Few Clouds");
}

#[tokio::test]
async fn test_report_inland_city_has_no_ocean_data() {
    let base_url = spawn_mock().await;
    let service = ReportService::from_config(&mock_config(&base_url)).unwrap();

    let report = service
        .build("Sofia", ReportOptions::default())
        .await
        .unwrap();

    assert_eq!(
        report.ocean.as_ref().unwrap().warning(),
        Some(coastcast::report::NO_OCEAN_DATA)
    );
    // 18.2°C is below the beach range
    assert_eq!(
        report.beach.data().unwrap().reason,
        BeachReason::TempOutOfRange
    );
}

#[tokio::test]
async fn test_report_without_stormglass_key() {
    let base_url = spawn_mock().await;
    let mut config = mock_config(&base_url);
    config.providers.stormglass.api_key = None;
    let service = ReportService::from_config(&config).unwrap();

    let report = service
        .build("Varna", ReportOptions::default())
        .await
        .unwrap();
    assert!(report.ocean.as_ref().unwrap().warning().is_some());
    assert!(report.beach.data().is_some());
}

#[test]
fn test_report_requires_openweather_key() {
    let result = ReportService::from_config(&CoastcastConfig::default());
    assert!(matches!(result, Err(CoastcastError::Config { .. })));
}
