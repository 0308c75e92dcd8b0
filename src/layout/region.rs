use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::model::Graph;

use super::{RegionKey, RegionLayout};

/// Indices into `graph.nodes`, bucketed by owning region, in input order.
pub(super) fn region_occupancy(graph: &Graph) -> BTreeMap<RegionKey, Vec<usize>> {
    let mut occupancy: BTreeMap<RegionKey, Vec<usize>> = BTreeMap::new();
    for key in RegionKey::ALL {
        occupancy.insert(key, Vec::new());
    }
    for (idx, node) in graph.nodes.iter().enumerate() {
        occupancy
            .entry(node.category.region())
            .or_default()
            .push(idx);
    }
    occupancy
}

/// Region footprint as a step function of occupant count. Dense regions grow
/// to a packed grid of per-node cells, floored at the base cell size.
pub(super) fn region_footprint(count: usize, config: &LayoutConfig) -> (f32, f32) {
    match count {
        0..=2 => (config.cell_width, config.cell_height),
        3..=4 => (
            config.cell_width + config.mid_tier_extra_width,
            config.cell_height + config.mid_tier_extra_height,
        ),
        5..=6 => (
            config.cell_width + config.high_tier_extra_width,
            config.cell_height + config.high_tier_extra_height,
        ),
        _ => {
            let cols = (count as f32).sqrt().ceil().max(1.0);
            let rows = (count as f32 / cols).ceil().max(1.0);
            let width = cols * config.node_width + config.packed_padding;
            let height = rows * config.node_height + config.packed_padding;
            (width.max(config.cell_width), height.max(config.cell_height))
        }
    }
}

/// Lays the nine regions on the 3x3 grid. Row heights and column widths are
/// the maxima of their members' footprints, offsets are cumulative, so
/// unevenly sized regions never overlap.
pub(super) fn place_regions(
    occupancy: &BTreeMap<RegionKey, Vec<usize>>,
    config: &LayoutConfig,
) -> Vec<RegionLayout> {
    let mut footprints: BTreeMap<RegionKey, (f32, f32)> = BTreeMap::new();
    for key in RegionKey::ALL {
        let count = occupancy.get(&key).map(Vec::len).unwrap_or(0);
        footprints.insert(key, region_footprint(count, config));
    }

    let mut col_widths = [0.0f32; 3];
    let mut row_heights = [0.0f32; 3];
    for key in RegionKey::ALL {
        let (row, col) = key.grid_pos();
        let (width, height) = footprints[&key];
        col_widths[col] = col_widths[col].max(width);
        row_heights[row] = row_heights[row].max(height);
    }

    let mut col_offsets = [0.0f32; 3];
    let mut row_offsets = [0.0f32; 3];
    for i in 1..3 {
        col_offsets[i] = col_offsets[i - 1] + col_widths[i - 1] + config.region_gap;
        row_offsets[i] = row_offsets[i - 1] + row_heights[i - 1] + config.region_gap;
    }

    RegionKey::ALL
        .iter()
        .map(|&key| {
            let (row, col) = key.grid_pos();
            let (width, height) = footprints[&key];
            RegionLayout {
                key,
                row,
                col,
                x: col_offsets[col],
                y: row_offsets[row],
                width,
                height,
                occupants: occupancy.get(&key).map(Vec::len).unwrap_or(0),
            }
        })
        .collect()
}
