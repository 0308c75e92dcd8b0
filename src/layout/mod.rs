//! The Layout Engine: maps categorized process nodes onto the fixed 3x3
//! region grid. Pure and deterministic in input order; no force-directed
//! solver, region sizes absorb growth instead.

mod placement;
mod region;
pub(crate) mod types;
pub use types::*;

use placement::place_occupants;
use region::{place_regions, region_occupancy};

use crate::config::LayoutConfig;
use crate::model::Graph;

/// Computes region placeholders and node positions for the whole graph.
/// Always emits all nine regions, including empty ones, so the presentation
/// layer can render the stable background map. Edges are not touched by
/// layout; they stay on the graph.
pub fn compute_layout(graph: &Graph, config: &LayoutConfig) -> Layout {
    let occupancy = region_occupancy(graph);
    let regions = place_regions(&occupancy, config);

    let mut positions: Vec<Option<PositionedNode>> = vec![None; graph.nodes.len()];
    for region in &regions {
        let indices = &occupancy[&region.key];
        let slots = place_occupants(region, indices.len(), config);
        for (&node_idx, (x, y)) in indices.iter().zip(slots) {
            positions[node_idx] = Some(PositionedNode {
                id: graph.nodes[node_idx].id.clone(),
                region: region.key,
                x,
                y,
                width: config.node_width,
                height: config.node_height,
            });
        }
    }
    let nodes: Vec<PositionedNode> = positions
        .into_iter()
        .map(|position| position.expect("every node resolves to a region"))
        .collect();

    let width = regions
        .iter()
        .map(|region| region.x + region.width)
        .fold(0.0f32, f32::max);
    let height = regions
        .iter()
        .map(|region| region.y + region.height)
        .fold(0.0f32, f32::max);

    Layout {
        regions,
        nodes,
        width,
        height,
    }
}
