use pbt_formulation::{LayoutConfig, compute_layout, layout_dump::LayoutDump};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormulationLayoutOptions {
    cell_width: Option<f32>,
    cell_height: Option<f32>,
    region_gap: Option<f32>,
    jitter: Option<f32>,
}

fn build_config(options: FormulationLayoutOptions) -> LayoutConfig {
    let mut config = LayoutConfig::default();
    if let Some(cell_width) = options.cell_width {
        config.cell_width = cell_width;
    }
    if let Some(cell_height) = options.cell_height {
        config.cell_height = cell_height;
    }
    if let Some(region_gap) = options.region_gap {
        config.region_gap = region_gap;
    }
    if let Some(jitter) = options.jitter {
        config.jitter = jitter;
    }
    config
}

/// Computes the region layout for a formulation graph payload and returns it
/// as a JSON layout dump. The payload is the host's canonical position-free
/// shape; positions exist only in the returned dump.
#[wasm_bindgen]
pub fn layout_formulation(payload_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<FormulationLayoutOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        FormulationLayoutOptions::default()
    };
    let config = build_config(options);

    let graph = pbt_formulation::records::parse_payload(payload_json)
        .map_err(|error| JsValue::from_str(&error.to_string()))?
        .into_graph();
    let layout = compute_layout(&graph, &config);
    let dump = LayoutDump::from_layout(&layout, &graph);
    serde_json::to_string(&dump).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use pbt_formulation::{LayoutConfig, compute_layout, records::parse_payload};

    #[test]
    fn lays_out_a_minimal_payload() {
        let payload = r#"{
            "nodes": [
                {"id": "a", "label": "Worry", "category": "Cognitiva", "change": "increased"},
                {"id": "b", "label": "Avoidance", "category": "Comportamental"}
            ],
            "edges": [
                {"source": "a", "target": "b", "relation": "drives", "weight": "strong"}
            ]
        }"#;
        let graph = parse_payload(payload).unwrap().into_graph();
        let layout = compute_layout(&graph, &LayoutConfig::default());
        assert_eq!(layout.regions.len(), 9);
        assert_eq!(layout.nodes.len(), 2);
    }
}
