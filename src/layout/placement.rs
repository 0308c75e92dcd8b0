use std::f32::consts::PI;

use crate::config::LayoutConfig;

use super::RegionLayout;

/// Positions for `count` occupants inside one region, as top-left coordinates
/// relative to the region origin. One occupant sits on the center, two to
/// four spread over a ring, five or more fall back to a grid sub-layout.
pub(super) fn place_occupants(
    region: &RegionLayout,
    count: usize,
    config: &LayoutConfig,
) -> Vec<(f32, f32)> {
    match count {
        0 => Vec::new(),
        1 => vec![centered(region, config)],
        2..=4 => ring_positions(region, count, config),
        _ => grid_positions(region, count, config),
    }
}

fn centered(region: &RegionLayout, config: &LayoutConfig) -> (f32, f32) {
    (
        (region.width - config.node_width) / 2.0,
        (region.height - config.node_height) / 2.0,
    )
}

/// Evenly spaced ring starting at the top. Radius is a third of the smaller
/// available-space dimension, which keeps pairwise separation at
/// 2r*sin(pi/k) by construction.
fn ring_positions(region: &RegionLayout, count: usize, config: &LayoutConfig) -> Vec<(f32, f32)> {
    let (center_x, center_y) = centered(region, config);
    let avail_width = region.width - config.node_width;
    let avail_height = region.height - config.node_height;
    let radius = avail_width.min(avail_height) / config.ring_radius_divisor;
    let step = 2.0 * PI / count as f32;
    (0..count)
        .map(|i| {
            let angle = -PI / 2.0 + i as f32 * step;
            (
                center_x + radius * angle.cos(),
                center_y + radius * angle.sin(),
            )
        })
        .collect()
}

fn grid_positions(region: &RegionLayout, count: usize, config: &LayoutConfig) -> Vec<(f32, f32)> {
    let cols = (count as f32).sqrt().ceil().max(1.0) as usize;
    let rows = count.div_ceil(cols);
    let cell_width = region.width / cols as f32;
    let cell_height = region.height / rows as f32;
    (0..count)
        .map(|i| {
            let col = i % cols;
            let row = i / cols;
            (
                col as f32 * cell_width + (cell_width - config.node_width) / 2.0,
                row as f32 * cell_height + (cell_height - config.node_height) / 2.0,
            )
        })
        .collect()
}
