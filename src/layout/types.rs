use serde::Serialize;

/// One of the nine fixed screen regions. Every clinical category is pinned to
/// the same slot across sessions so clinicians keep a stable mental map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RegionKey {
    Attentional,
    Cognitive,
    SelfConcept,
    Affective,
    Behavioral,
    Motivational,
    Biophysiological,
    Context,
    Sociocultural,
}

impl RegionKey {
    /// Declared iteration order, row-major over the 3x3 grid. Layout iterates
    /// regions in this order so ties among equal occupancy counts are stable.
    pub const ALL: [RegionKey; 9] = [
        RegionKey::Attentional,
        RegionKey::Cognitive,
        RegionKey::SelfConcept,
        RegionKey::Affective,
        RegionKey::Behavioral,
        RegionKey::Motivational,
        RegionKey::Biophysiological,
        RegionKey::Context,
        RegionKey::Sociocultural,
    ];

    /// Fixed (row, col) slot in the 3x3 grid.
    pub fn grid_pos(self) -> (usize, usize) {
        match self {
            RegionKey::Attentional => (0, 0),
            RegionKey::Cognitive => (0, 1),
            RegionKey::SelfConcept => (0, 2),
            RegionKey::Affective => (1, 0),
            RegionKey::Behavioral => (1, 1),
            RegionKey::Motivational => (1, 2),
            RegionKey::Biophysiological => (2, 0),
            RegionKey::Context => (2, 1),
            RegionKey::Sociocultural => (2, 2),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RegionKey::Attentional => "Attentional",
            RegionKey::Cognitive => "Cognitive",
            RegionKey::SelfConcept => "Self",
            RegionKey::Affective => "Affective",
            RegionKey::Behavioral => "Behavioral",
            RegionKey::Motivational => "Motivational",
            RegionKey::Biophysiological => "Biophysiological",
            RegionKey::Context => "Context",
            RegionKey::Sociocultural => "Sociocultural",
        }
    }
}

/// Background placeholder for one grid slot. Non-interactive; rendered behind
/// the process nodes it contains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionLayout {
    pub key: RegionKey,
    pub row: usize,
    pub col: usize,
    /// Absolute canvas origin of the region.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub occupants: usize,
}

impl RegionLayout {
    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// A process node with a computed position. Coordinates are relative to the
/// owning region's origin; the region is the node's layout parent for
/// drag-collision grouping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub id: String,
    pub region: RegionKey,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Layout Engine output: nine region placeholders plus one positioned node
/// per input node, in input order. Edges are untouched by layout and stay on
/// the source graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub regions: Vec<RegionLayout>,
    pub nodes: Vec<PositionedNode>,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn region(&self, key: RegionKey) -> &RegionLayout {
        self.regions
            .iter()
            .find(|region| region.key == key)
            .expect("all nine regions are always emitted")
    }

    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}
