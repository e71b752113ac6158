//! Random event synthesis.
//!
//! For every node and every one of its neighbors, generate a series of
//! jittered timestamps: event `i` lands uniformly inside the window
//! `[spacing * i, spacing * (i + 1))`. Each node's events are merged across
//! its neighbors and sorted by timestamp, then the whole thing is written
//! as one JSON object keyed by node.

use anyhow::{anyhow, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use super::Graph;

/// One synthesized sensing event.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SenseEvent {
    pub node: String,
    pub target: String,
    pub timestamp: f64,
}

/// Synthesis parameters.
#[derive(Clone, Copy, Debug)]
pub struct EventOptions {
    /// Events generated per node/neighbor pair.
    pub events_per_pair: usize,
    /// Window width between consecutive events of one pair, in seconds.
    pub spacing: f64,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self {
            events_per_pair: 50,
            spacing: 10.0,
        }
    }
}

fn random_events<R: Rng + ?Sized>(
    rng: &mut R,
    node: &str,
    target: &str,
    options: &EventOptions,
) -> Vec<SenseEvent> {
    (0..options.events_per_pair)
        .map(|i| SenseEvent {
            node: node.to_string(),
            target: target.to_string(),
            timestamp: options.spacing * (i as f64 + rng.gen_range(0.0..1.0)),
        })
        .collect()
}

/// Events for one node across all of its neighbors, sorted by timestamp.
pub fn node_events<R: Rng + ?Sized>(
    rng: &mut R,
    graph: &Graph,
    node: &str,
    options: &EventOptions,
) -> Vec<SenseEvent> {
    let mut events: Vec<SenseEvent> = graph
        .neighbors(node)
        .iter()
        .flat_map(|adjacent| random_events(rng, node, adjacent, options))
        .collect();
    events.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    events
}

/// Synthesize the full per-node event map for a graph.
pub fn synthesize<R: Rng + ?Sized>(
    rng: &mut R,
    graph: &Graph,
    options: &EventOptions,
) -> BTreeMap<String, Vec<SenseEvent>> {
    graph
        .nodes()
        .map(|node| (node.to_string(), node_events(rng, graph, node, options)))
        .collect()
}

/// Write the event map as 4-space-indented JSON.
pub fn write_events_json(path: &Path, events: &BTreeMap<String, Vec<SenseEvent>>) -> Result<()> {
    let file = std::fs::File::create(path)
        .map_err(|e| anyhow!("failed to create {}: {}", path.display(), e))?;
    let mut writer = std::io::BufWriter::new(file);
    {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        events.serialize(&mut serializer)?;
    }
    writer.flush()?;
    Ok(())
}
