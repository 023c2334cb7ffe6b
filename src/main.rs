//! AgriGuard - Command Line Entry Point
//!
//! Thin presentation adapter: collects inputs, calls the engine,
//! prints JSON. All engine errors are reported here, never inside the core.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use agriguard_core::constants::{APP_NAME, APP_VERSION};
use agriguard_core::logic::assessment::{AssessmentRequest, AssessmentService};
use agriguard_core::logic::crops::CropTable;
use agriguard_core::logic::estimator::LinearRiskEstimator;
use agriguard_core::logic::risk::parse_reading;
use agriguard_core::logic::telemetry::PredictionLogger;
use agriguard_core::logic::vision::ImageClassifier;
use agriguard_core::logic::weather::WeatherClient;
use agriguard_core::{AgriError, AgriResult, EngineConfig};

#[derive(Parser)]
#[command(name = "agriguard", version, about = "Crop disease risk predictor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict disease risk from temperature and humidity
    Predict {
        #[arg(long, default_value = "Wheat")]
        crop: String,
        /// °C; omit to use live weather
        #[arg(long)]
        temperature: Option<String>,
        /// %; omit to use live weather
        #[arg(long)]
        humidity: Option<String>,
        #[arg(long)]
        symptom: Option<String>,
    },
    /// Fetch live temperature and humidity
    Weather,
    /// Classify a leaf photo with the pretrained image model
    ClassifyImage {
        path: PathBuf,
    },
    /// List crop profiles
    Crops,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let cli = Cli::parse();
    let config = EngineConfig::from_env();

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &EngineConfig) -> AgriResult<()> {
    match command {
        Command::Predict { crop, temperature, humidity, symptom } => {
            let estimator = LinearRiskEstimator::fit_default()?;
            let table = load_crop_table(config)?;
            let logger = PredictionLogger::new(&config.log_path);
            let service = AssessmentService::new(&estimator, &table, &logger);

            let assessment = match (temperature, humidity) {
                (Some(temperature), Some(humidity)) => service.assess(&AssessmentRequest {
                    crop,
                    symptom,
                    temperature,
                    humidity,
                })?,
                (t, h) => {
                    let t = t.map(|text| parse_reading("temperature", &text)).transpose()?;
                    let h = h.map(|text| parse_reading("humidity", &text)).transpose()?;
                    let live = WeatherClient::from_config(config).fetch()?;
                    service.assess_values(
                        &crop,
                        symptom.as_deref(),
                        t.unwrap_or(live.temperature),
                        h.unwrap_or(live.humidity),
                    )?
                }
            };

            print_json(&assessment)
        }
        Command::Weather => {
            let reading = WeatherClient::from_config(config).fetch()?;
            print_json(&reading)
        }
        Command::ClassifyImage { path } => {
            let classifier = ImageClassifier::from_config(config)?;
            log::debug!("Model: {:?}", classifier.model().metadata());
            let label = classifier.classify(&path)?;
            log::info!("The leaf is classified as: {}", label.predicted_label);
            print_json(&label)
        }
        Command::Crops => {
            let table = load_crop_table(config)?;
            print_json(table.profiles())
        }
    }
}

fn load_crop_table(config: &EngineConfig) -> AgriResult<CropTable> {
    match &config.crops_path {
        Some(path) => CropTable::load(path),
        None => Ok(CropTable::standard()),
    }
}

/// Stdout carries JSON only; human-readable lines go to the log
fn print_json<T: Serialize + ?Sized>(value: &T) -> AgriResult<()> {
    println!("{}", render_json(value)?);
    Ok(())
}

fn render_json<T: Serialize + ?Sized>(value: &T) -> AgriResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AgriError::Data(format!("cannot serialize output: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agriguard_core::logic::vision::ImageLabel;

    #[test]
    fn test_classify_image_output_is_pure_json() {
        let label = ImageLabel {
            source_path: "leaf_photo".to_string(),
            predicted_label: "corn".to_string(),
            class_index: 987,
            confidence: 0.75,
        };

        let out = render_json(&label).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed["predicted_label"], "corn");
        assert_eq!(parsed["class_index"], 987);
        assert!(out.trim_start().starts_with('{'));
    }
}
