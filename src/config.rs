use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::records::LoadError;

/// Geometric constants for the region layout and drag-collision resolution.
/// Values are tuned for the host canvas; every constant is overridable from a
/// JSON5 config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Base footprint of a region holding up to two processes.
    pub cell_width: f32,
    pub cell_height: f32,
    /// Footprint reserved per process node.
    pub node_width: f32,
    pub node_height: f32,
    /// Extra region size at 3-4 occupants.
    pub mid_tier_extra_width: f32,
    pub mid_tier_extra_height: f32,
    /// Extra region size at 5-6 occupants.
    pub high_tier_extra_width: f32,
    pub high_tier_extra_height: f32,
    /// Padding added around the packed grid used at 7+ occupants.
    pub packed_padding: f32,
    /// Gap between adjacent regions.
    pub region_gap: f32,
    /// Ring placement radius = min available dimension / this divisor.
    pub ring_radius_divisor: f32,
    /// Random offset applied on add/recategorize so repeated adds do not
    /// stack exactly on the region center.
    pub jitter: f32,
    /// Collision box used after a drag settles.
    pub collision_width: f32,
    pub collision_height: f32,
    pub collision_buffer: f32,
    /// Displacement applied to the colliding neighbor, per overlapping axis.
    pub collision_step: f32,
    /// Minimum distance kept between a pushed node and the region edge.
    pub edge_margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_width: 260.0,
            cell_height: 190.0,
            node_width: 140.0,
            node_height: 90.0,
            mid_tier_extra_width: 80.0,
            mid_tier_extra_height: 60.0,
            high_tier_extra_width: 150.0,
            high_tier_extra_height: 100.0,
            packed_padding: 40.0,
            region_gap: 16.0,
            ring_radius_divisor: 3.0,
            jitter: 20.0,
            collision_width: 140.0,
            collision_height: 80.0,
            collision_buffer: 10.0,
            collision_step: 30.0,
            edge_margin: 10.0,
        }
    }
}

/// Reads a layout config from an optional JSON5 file; absent path means
/// defaults. Unknown keys are ignored, missing keys keep their defaults.
pub fn load_config(path: Option<&Path>) -> Result<LayoutConfig, LoadError> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config: LayoutConfig = json5::from_str(&contents)?;
    Ok(config)
}
