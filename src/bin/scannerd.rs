//! scannerd - QR lane-sensing daemon
//!
//! This daemon:
//! 1. Opens the configured video source (device index, path, or stub)
//! 2. Decodes QR symbols from each frame via the decoder registry
//! 3. Classifies each symbol into a horizontal lane
//! 4. Publishes each non-empty batch to the remote listener
//! 5. Repeats on a fixed cadence until interrupted

use anyhow::{anyhow, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use qr_sensing::{
    capture::open_source, config::ScannerConfig, run_scan_loop, DecoderBackend, DecoderRegistry,
    MqttEmitter, RqrrBackend, ScanOptions, SourceId, SymbolKind,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = ScannerConfig::load()?;

    let mut registry = DecoderRegistry::new();
    registry.register(RqrrBackend::new());
    registry.set_default(&cfg.decoder)?;
    log::debug!("registered decoder backends: {:?}", registry.list());
    let backend = registry
        .default_backend()
        .ok_or_else(|| anyhow!("no decoder backend registered"))?;

    let source_id = SourceId::parse(&cfg.capture.source);
    log::info!(
        "scannerd starting: source={:?} decoder={} interval={:?}",
        source_id,
        cfg.decoder,
        cfg.interval
    );

    let mut source = open_source(&cfg.capture)?;
    let mut emitter = MqttEmitter::connect(&cfg.emitter)?;

    let stop = Arc::new(AtomicBool::new(false));
    let stop_handler = stop.clone();
    ctrlc::set_handler(move || {
        log::info!("interrupt received, stopping scan loop");
        stop_handler.store(true, Ordering::Relaxed);
    })?;

    let options = ScanOptions {
        interval: cfg.interval,
        ..ScanOptions::default()
    };

    {
        let mut decoder = backend
            .lock()
            .map_err(|_| anyhow!("decoder backend lock poisoned"))?;
        if !decoder.supports(SymbolKind::QrCode) {
            return Err(anyhow!(
                "decoder backend '{}' does not decode QR symbols",
                cfg.decoder
            ));
        }
        decoder.warm_up()?;
        run_scan_loop(
            source.as_mut(),
            &mut *decoder,
            &mut emitter,
            &options,
            &stop,
        )?;
    }

    emitter.disconnect()?;
    Ok(())
}
