use std::sync::Mutex;

use tempfile::NamedTempFile;

use qr_sensing::config::ScannerConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "SCANNER_CONFIG",
        "SCANNER_VIDEO_SOURCE",
        "MQTT_BROKER_ADDR",
        "SCANNER_TOPIC",
        "SCANNER_DECODER",
        "SCANNER_INTERVAL_MS",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{
        "video": {
            "source": "/dev/video2",
            "target_fps": 12,
            "width": 800,
            "height": 600
        },
        "emitter": {
            "broker_addr": "broker.local:1883",
            "client_id": "scanner-7",
            "topic": "qr-codes"
        },
        "decoder": "rqrr",
        "interval_ms": 250
    }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");

    std::env::set_var("SCANNER_CONFIG", file.path());
    std::env::set_var("SCANNER_VIDEO_SOURCE", "stub://bench");
    std::env::set_var("SCANNER_INTERVAL_MS", "500");

    let cfg = ScannerConfig::load().expect("load config");

    assert_eq!(cfg.capture.source, "stub://bench");
    assert_eq!(cfg.capture.target_fps, 12);
    assert_eq!(cfg.capture.width, 800);
    assert_eq!(cfg.capture.height, 600);
    assert_eq!(cfg.emitter.broker_addr, "broker.local:1883");
    assert_eq!(cfg.emitter.client_id, "scanner-7");
    assert_eq!(cfg.emitter.topic, "qr-codes");
    assert_eq!(cfg.decoder, "rqrr");
    assert_eq!(cfg.interval.as_millis(), 500);

    clear_env();
}

#[test]
fn defaults_apply_without_file_or_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = ScannerConfig::load().expect("load config");

    assert_eq!(cfg.capture.source, "stub://scanner");
    assert_eq!(cfg.capture.width, 640);
    assert_eq!(cfg.capture.height, 480);
    assert_eq!(cfg.emitter.broker_addr, "127.0.0.1:1883");
    assert_eq!(cfg.emitter.topic, "qr-codes");
    assert_eq!(cfg.decoder, "rqrr");
    assert_eq!(cfg.interval.as_millis(), 100);

    clear_env();
}

#[test]
fn rejects_non_numeric_interval_override() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("SCANNER_INTERVAL_MS", "fast");
    assert!(ScannerConfig::load().is_err());

    clear_env();
}

#[test]
fn rejects_zero_interval() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("SCANNER_INTERVAL_MS", "0");
    assert!(ScannerConfig::load().is_err());

    clear_env();
}
