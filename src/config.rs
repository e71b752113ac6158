use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::capture::CaptureConfig;
use crate::emit::{MqttEmitterConfig, DEFAULT_TOPIC};

const DEFAULT_SOURCE: &str = "stub://scanner";
const DEFAULT_BROKER_ADDR: &str = "127.0.0.1:1883";
const DEFAULT_CLIENT_ID: &str = "scannerd";
const DEFAULT_DECODER: &str = "rqrr";
const DEFAULT_INTERVAL_MS: u64 = 100;
const DEFAULT_FPS: u32 = 10;
const DEFAULT_WIDTH: u32 = 640;
const DEFAULT_HEIGHT: u32 = 480;

#[derive(Debug, Deserialize, Default)]
struct ScannerConfigFile {
    video: Option<VideoConfigFile>,
    emitter: Option<EmitterConfigFile>,
    decoder: Option<String>,
    interval_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct VideoConfigFile {
    source: Option<String>,
    target_fps: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct EmitterConfigFile {
    broker_addr: Option<String>,
    client_id: Option<String>,
    topic: Option<String>,
}

/// Resolved scanner configuration: file values layered under env overrides.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub capture: CaptureConfig,
    pub emitter: MqttEmitterConfig,
    pub decoder: String,
    pub interval: Duration,
}

impl ScannerConfig {
    /// Load configuration: optional JSON file named by `SCANNER_CONFIG`,
    /// then environment overrides, then validation.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("SCANNER_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: ScannerConfigFile) -> Self {
        let capture = CaptureConfig {
            source: file
                .video
                .as_ref()
                .and_then(|video| video.source.clone())
                .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            target_fps: file
                .video
                .as_ref()
                .and_then(|video| video.target_fps)
                .unwrap_or(DEFAULT_FPS),
            width: file
                .video
                .as_ref()
                .and_then(|video| video.width)
                .unwrap_or(DEFAULT_WIDTH),
            height: file
                .video
                .as_ref()
                .and_then(|video| video.height)
                .unwrap_or(DEFAULT_HEIGHT),
        };
        let emitter = MqttEmitterConfig {
            broker_addr: file
                .emitter
                .as_ref()
                .and_then(|emitter| emitter.broker_addr.clone())
                .unwrap_or_else(|| DEFAULT_BROKER_ADDR.to_string()),
            client_id: file
                .emitter
                .as_ref()
                .and_then(|emitter| emitter.client_id.clone())
                .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
            topic: file
                .emitter
                .and_then(|emitter| emitter.topic)
                .unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
        };
        Self {
            capture,
            emitter,
            decoder: file.decoder.unwrap_or_else(|| DEFAULT_DECODER.to_string()),
            interval: Duration::from_millis(file.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS)),
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(source) = std::env::var("SCANNER_VIDEO_SOURCE") {
            if !source.trim().is_empty() {
                self.capture.source = source;
            }
        }
        if let Ok(addr) = std::env::var("MQTT_BROKER_ADDR") {
            if !addr.trim().is_empty() {
                self.emitter.broker_addr = addr;
            }
        }
        if let Ok(topic) = std::env::var("SCANNER_TOPIC") {
            if !topic.trim().is_empty() {
                self.emitter.topic = topic;
            }
        }
        if let Ok(decoder) = std::env::var("SCANNER_DECODER") {
            if !decoder.trim().is_empty() {
                self.decoder = decoder;
            }
        }
        if let Ok(interval) = std::env::var("SCANNER_INTERVAL_MS") {
            let millis: u64 = interval
                .parse()
                .map_err(|_| anyhow!("SCANNER_INTERVAL_MS must be an integer number of ms"))?;
            self.interval = Duration::from_millis(millis);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(anyhow!("scan interval must be greater than zero"));
        }
        if self.capture.width == 0 || self.capture.height == 0 {
            return Err(anyhow!("frame dimensions must be greater than zero"));
        }
        if self.emitter.topic.trim().is_empty() {
            return Err(anyhow!("emitter topic must not be empty"));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<ScannerConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
