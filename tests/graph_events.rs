use rand::rngs::StdRng;
use rand::SeedableRng;

use qr_sensing::graph::{synthesize, write_events_json, EventOptions, Graph};

#[test]
fn triangular_lattice_events_cover_every_node() {
    let graph = Graph::triangular_lattice(5, 5);
    let mut rng = StdRng::seed_from_u64(1);
    let events = synthesize(&mut rng, &graph, &EventOptions::default());

    assert_eq!(events.len(), graph.node_count());
    for node in graph.nodes() {
        let node_events = &events[node];
        assert_eq!(node_events.len(), graph.neighbors(node).len() * 50);
        assert!(node_events
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(node_events.iter().all(|e| e.node == node));
    }
}

#[test]
fn artifact_is_indented_json_keyed_by_node() {
    let graph = Graph::path(3);
    let mut rng = StdRng::seed_from_u64(2);
    let options = EventOptions {
        events_per_pair: 2,
        spacing: 10.0,
    };
    let events = synthesize(&mut rng, &graph, &options);

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("events.json");
    write_events_json(&path, &events).expect("write artifact");

    let raw = std::fs::read_to_string(&path).expect("read artifact");
    assert!(raw.contains("\n    \"0\": ["));

    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    let map = parsed.as_object().expect("object keyed by node");
    assert_eq!(map.len(), 3);

    let first = map["1"].as_array().expect("event array");
    assert_eq!(first.len(), 4);
    assert!(first[0]["timestamp"].as_f64().is_some());
    assert_eq!(first[0]["node"], "1");
}

#[test]
fn loaded_graph_feeds_synthesis() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("graph.json");
    std::fs::write(&path, r#"{"a": ["b"], "b": ["c"], "c": []}"#).expect("write graph");

    let graph = Graph::load(&path).expect("load graph");
    let mut rng = StdRng::seed_from_u64(3);
    let events = synthesize(&mut rng, &graph, &EventOptions::default());

    assert_eq!(events["b"].len(), 100);
    assert_eq!(events["a"].len(), 50);
    assert_eq!(events["c"].len(), 50);
}
