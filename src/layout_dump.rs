use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::layout::Layout;
use crate::model::Graph;

/// JSON-serializable view of a computed layout, for the `pbtf` inspector.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub regions: Vec<RegionDump>,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct RegionDump {
    pub key: String,
    pub row: usize,
    pub col: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub occupants: usize,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub label: String,
    pub category: String,
    pub region: String,
    /// Region-relative position.
    pub x: f32,
    pub y: f32,
    /// Absolute canvas position.
    pub abs_x: f32,
    pub abs_y: f32,
    pub moderator: bool,
    pub target: bool,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub source: String,
    pub target: String,
    pub relation: String,
    pub weight: String,
    pub stroke_width: f32,
    pub polarity: String,
    pub bidirectional: bool,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout, graph: &Graph) -> Self {
        let regions = layout
            .regions
            .iter()
            .map(|region| RegionDump {
                key: region.key.label().to_string(),
                row: region.row,
                col: region.col,
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                occupants: region.occupants,
            })
            .collect();

        let nodes = graph
            .nodes
            .iter()
            .zip(&layout.nodes)
            .map(|(node, position)| {
                let region = layout.region(position.region);
                NodeDump {
                    id: node.id.clone(),
                    label: node.label.clone(),
                    category: node.category.as_token().to_string(),
                    region: position.region.label().to_string(),
                    x: position.x,
                    y: position.y,
                    abs_x: region.x + position.x,
                    abs_y: region.y + position.y,
                    moderator: node.is_moderator,
                    target: node.is_target,
                }
            })
            .collect();

        let edges = graph
            .edges
            .iter()
            .map(|edge| EdgeDump {
                source: edge.source.clone(),
                target: edge.target.clone(),
                relation: edge.relation.clone(),
                weight: edge.weight.as_token().to_string(),
                stroke_width: edge.weight.stroke_width(),
                polarity: edge.polarity.as_token().to_string(),
                bidirectional: edge.bidirectional,
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            regions,
            nodes,
            edges,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout, graph: &Graph) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, graph);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
