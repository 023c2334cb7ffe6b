//! Live Weather Lookup
//!
//! Fetch "<temp> <humidity>" từ weather endpoint (wttr.in format),
//! parse thành 2 số. Engine chỉ nhận số đã parse, không nhận raw response.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{AgriError, AgriResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// °C
    pub temperature: f64,
    /// Relative humidity, %
    pub humidity: f64,
}

// ============================================================================
// PARSING
// ============================================================================

fn weather_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([+-]?\d+(?:\.\d+)?)\s*°?\s*([CF])?\s+([+-]?\d+(?:\.\d+)?)\s*%?\s*$")
            .expect("weather pattern is valid")
    })
}

/// "+25°C 80%" -> (25.0, 80.0). Fahrenheit is converted to Celsius.
pub fn parse_weather_line(line: &str) -> AgriResult<WeatherReading> {
    let caps = weather_pattern()
        .captures(line)
        .ok_or_else(|| AgriError::Input(format!("unrecognised weather data: {:?}", line.trim())))?;

    let number = |i: usize| -> AgriResult<f64> {
        caps.get(i)
            .map(|m| m.as_str())
            .ok_or_else(|| AgriError::Input(format!("missing field in weather data: {:?}", line)))?
            .parse::<f64>()
            .map_err(|e| AgriError::Input(format!("bad number in weather data: {}", e)))
    };

    let mut temperature = number(1)?;
    let humidity = number(3)?;

    if caps.get(2).map(|m| m.as_str()) == Some("F") {
        temperature = (temperature - 32.0) * 5.0 / 9.0;
    }

    Ok(WeatherReading { temperature, humidity })
}

// ============================================================================
// CLIENT
// ============================================================================

pub struct WeatherClient {
    url: String,
    timeout: Duration,
}

impl WeatherClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self { url: url.into(), timeout }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.weather_url.clone(), config.weather_timeout)
    }

    /// Blocking fetch. No retry: that is the caller's call.
    pub fn fetch(&self) -> AgriResult<WeatherReading> {
        log::debug!("Fetching weather from {}", self.url);

        let response = ureq::get(&self.url)
            .timeout(self.timeout)
            .call()
            .map_err(|e| AgriError::Io(format!("weather endpoint unreachable: {}", e)))?;

        let content = response.into_string()
            .map_err(|e| AgriError::Io(format!("cannot read weather response: {}", e)))?;

        let reading = parse_weather_line(&content)?;
        log::info!("Live weather: {:.1}°C, {:.0}%", reading.temperature, reading.humidity);
        Ok(reading)
    }
}
