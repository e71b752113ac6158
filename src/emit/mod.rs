//! Event sinks.
//!
//! The scan loop hands each non-empty batch to an `EventSink`. The real
//! sink publishes the batch as a `qr-codes` event to an MQTT listener over
//! one persistent connection; `RecordingSink` captures batches for tests.

use anyhow::{anyhow, Context, Result};
use rumqttc::v5::{mqttbytes::QoS, Client, Connection, Event, MqttOptions};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::envelope::CodesMessage;

/// Topic the remote listener subscribes to.
pub const DEFAULT_TOPIC: &str = "qr-codes";

/// Pause between reconnection attempts after a transport error.
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Sink for outbound code batches.
pub trait EventSink: Send {
    /// Transmit one batch as a single message.
    fn emit(&mut self, message: &CodesMessage) -> Result<()>;
}

/// Configuration for the MQTT emitter.
#[derive(Clone, Debug)]
pub struct MqttEmitterConfig {
    /// Broker address: `host:port`, optionally `mqtt://` prefixed.
    pub broker_addr: String,
    /// Client identifier presented to the broker.
    pub client_id: String,
    /// Topic the batches are published to.
    pub topic: String,
}

impl Default for MqttEmitterConfig {
    fn default() -> Self {
        Self {
            broker_addr: "127.0.0.1:1883".to_string(),
            client_id: "scannerd".to_string(),
            topic: DEFAULT_TOPIC.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct MqttEndpoint {
    host: String,
    port: u16,
}

fn parse_mqtt_endpoint(addr: &str) -> Result<MqttEndpoint> {
    let mut remainder = addr.trim();

    if let Some((scheme, rest)) = remainder.split_once("://") {
        match scheme {
            "mqtt" | "tcp" => {}
            other => return Err(anyhow!("unsupported MQTT scheme: {}", other)),
        }
        remainder = rest;
    }

    let (host, port) = remainder
        .rsplit_once(':')
        .ok_or_else(|| anyhow!("missing MQTT port in {}", addr))?;
    let port: u16 = port.parse().context("invalid MQTT port")?;
    Ok(MqttEndpoint {
        host: host.to_string(),
        port,
    })
}

/// MQTT emitter with a background connection thread.
///
/// The connection event loop runs on its own thread and keeps retrying
/// after transport errors, so queued publishes go out once the broker is
/// reachable again. The publishing side is this handle, owned exclusively
/// by the scan loop.
pub struct MqttEmitter {
    client: Client,
    topic: String,
    shutdown: Arc<AtomicBool>,
    connection_handle: Option<std::thread::JoinHandle<()>>,
}

impl MqttEmitter {
    /// Open the persistent connection to the listener.
    pub fn connect(config: &MqttEmitterConfig) -> Result<Self> {
        let endpoint = parse_mqtt_endpoint(&config.broker_addr)?;
        log::info!(
            "opening listener connection to mqtt://{}:{}",
            endpoint.host,
            endpoint.port
        );

        let mut options =
            MqttOptions::new(config.client_id.as_str(), endpoint.host.as_str(), endpoint.port);
        options.set_keep_alive(Duration::from_secs(60));
        options.set_clean_start(true);

        let (client, connection) = Client::new(options, 10);
        let shutdown = Arc::new(AtomicBool::new(false));
        Ok(Self {
            client,
            topic: config.topic.clone(),
            shutdown: shutdown.clone(),
            connection_handle: Some(Self::drive_connection(connection, shutdown)),
        })
    }

    fn drive_connection(
        mut connection: Connection,
        shutdown: Arc<AtomicBool>,
    ) -> std::thread::JoinHandle<()> {
        std::thread::spawn(move || {
            for event in connection.iter() {
                if shutdown.load(Ordering::Relaxed) {
                    break;
                }
                match event {
                    Ok(Event::Incoming(_)) | Ok(Event::Outgoing(_)) => {}
                    Err(e) => {
                        log::warn!("MQTT connection error, retrying: {}", e);
                        std::thread::sleep(RECONNECT_DELAY);
                    }
                }
            }
        })
    }

    /// Disconnect and join the connection thread. Joins even when the
    /// broker was never reachable.
    pub fn disconnect(mut self) -> Result<()> {
        self.shutdown.store(true, Ordering::Relaxed);
        let result = self.client.disconnect();
        if let Some(handle) = self.connection_handle.take() {
            let _ = handle.join();
        }
        result.map_err(anyhow::Error::from)
    }
}

impl EventSink for MqttEmitter {
    fn emit(&mut self, message: &CodesMessage) -> Result<()> {
        let payload = serde_json::to_vec(message)?;
        self.client
            .publish(self.topic.as_str(), QoS::AtLeastOnce, false, payload)?;
        Ok(())
    }
}

/// Recording sink for tests: captures batches, optionally failing first.
#[derive(Default)]
pub struct RecordingSink {
    pub messages: Vec<CodesMessage>,
    fail_next: u32,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` emits fail.
    pub fn fail_next(&mut self, count: u32) {
        self.fail_next = count;
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, message: &CodesMessage) -> Result<()> {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(anyhow!("send failed"));
        }
        self.messages.push(message.clone());
        Ok(())
    }
}
