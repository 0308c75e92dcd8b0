//! The Graph Editor: an owned editing session over one formulation graph.
//! All mutation goes through the session's methods; each committed mutation
//! snapshots the prior state for undo and emits the canonical position-free
//! payload to the injected change listener. The host persists that payload;
//! the session itself holds no durable state.

use rand::Rng;

use crate::config::LayoutConfig;
use crate::history::History;
use crate::layout::{RegionKey, RegionLayout, compute_layout};
use crate::model::{Category, Change, Edge, Graph, Node, Polarity, Weight};
use crate::records::{EdgeRecord, GraphPayload, NodeRecord, edge_record, node_record};

/// A live node: logical fields plus its ephemeral placement. Coordinates are
/// relative to the owning region's origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub node: Node,
    pub region: RegionKey,
    pub x: f32,
    pub y: f32,
}

/// Full editing state: the value snapshotted into history. Region geometry
/// is part of the state so undoing a reorganize restores the old map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<Edge>,
    pub regions: Vec<RegionLayout>,
}

impl SessionState {
    fn to_graph(&self) -> Graph {
        Graph {
            nodes: self.nodes.iter().map(|placed| placed.node.clone()).collect(),
            edges: self.edges.clone(),
        }
    }
}

/// Field-level patch for `edit_node`. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct NodePatch {
    pub label: Option<String>,
    pub category: Option<Category>,
    pub change: Option<Change>,
    pub is_target: Option<bool>,
    pub is_moderator: Option<bool>,
}

/// Field-level patch for `edit_edge`. The reverse fields are doubly optional
/// so a patch can also clear an override back to "follow the forward value".
#[derive(Debug, Clone, Default)]
pub struct EdgePatch {
    pub relation: Option<String>,
    pub weight: Option<Weight>,
    pub polarity: Option<Polarity>,
    pub bidirectional: Option<bool>,
    pub reverse_polarity: Option<Option<Polarity>>,
    pub reverse_weight: Option<Option<Weight>>,
}

/// Host callback receiving the canonical payload after each committed
/// mutation. A single injected handler; there is no event bus.
pub type ChangeListener = Box<dyn FnMut(&[NodeRecord], &[EdgeRecord])>;

pub struct GraphSession {
    state: SessionState,
    history: History<SessionState>,
    config: LayoutConfig,
    on_change: Option<ChangeListener>,
    modal_open: bool,
    node_seq: usize,
    edge_seq: usize,
}

impl GraphSession {
    pub fn new(config: LayoutConfig) -> Self {
        let state = SessionState {
            regions: compute_layout(&Graph::new(), &config).regions,
            ..SessionState::default()
        };
        let mut history = History::new();
        history.set_initial(state.clone());
        Self {
            state,
            history,
            config,
            on_change: None,
            modal_open: false,
            node_seq: 0,
            edge_seq: 0,
        }
    }

    pub fn set_on_change(&mut self, listener: ChangeListener) {
        self.on_change = Some(listener);
    }

    /// Seeds the session from a host payload: normalizes the records, runs a
    /// full layout, and resets history around the loaded state.
    pub fn load(&mut self, payload: GraphPayload) {
        let graph = payload.into_graph();
        let layout = compute_layout(&graph, &self.config);
        self.edge_seq = graph.edges.len();
        self.node_seq = 0;
        self.state = SessionState {
            nodes: graph
                .nodes
                .into_iter()
                .zip(layout.nodes)
                .map(|(node, position)| PlacedNode {
                    node,
                    region: position.region,
                    x: position.x,
                    y: position.y,
                })
                .collect(),
            edges: graph.edges,
            regions: layout.regions,
        };
        self.history.set_initial(self.state.clone());
    }

    /// True while the session has no nodes: a valid, displayable state the
    /// presentation layer shows as "awaiting data" rather than an error.
    pub fn awaiting_data(&self) -> bool {
        self.state.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[PlacedNode] {
        &self.state.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.state.edges
    }

    pub fn regions(&self) -> &[RegionLayout] {
        &self.state.regions
    }

    pub fn payload(&self) -> GraphPayload {
        GraphPayload::from_graph(&self.state.to_graph())
    }

    /// Creates a process with a fresh id, placed at its region's center plus
    /// a small jitter so repeated adds do not stack exactly. Returns the id.
    pub fn add_node(
        &mut self,
        category: Category,
        label: impl Into<String>,
        change: Change,
        is_target: bool,
        is_moderator: Option<bool>,
    ) -> String {
        let id = self.fresh_node_id();
        let region = category.region();
        let (x, y) = self.jittered_center(region);
        self.state.nodes.push(PlacedNode {
            node: Node {
                id: id.clone(),
                label: label.into(),
                category,
                change,
                is_target,
                is_moderator: is_moderator.unwrap_or_else(|| category.moderates_by_default()),
            },
            region,
            x,
            y,
        });
        self.commit();
        id
    }

    /// Applies a patch to a node. A category change moves the node to its new
    /// region, recentered with jitter. Returns false (no-op) on a stale id.
    pub fn edit_node(&mut self, id: &str, patch: NodePatch) -> bool {
        let Some(idx) = self.state.nodes.iter().position(|placed| placed.node.id == id) else {
            return false;
        };
        let recategorized = patch
            .category
            .is_some_and(|category| category != self.state.nodes[idx].node.category);
        {
            let node = &mut self.state.nodes[idx].node;
            if let Some(label) = patch.label {
                node.label = label;
            }
            if let Some(category) = patch.category {
                node.category = category;
            }
            if let Some(change) = patch.change {
                node.change = change;
            }
            if let Some(is_target) = patch.is_target {
                node.is_target = is_target;
            }
            if let Some(is_moderator) = patch.is_moderator {
                node.is_moderator = is_moderator;
            }
        }
        if recategorized {
            let region = self.state.nodes[idx].node.category.region();
            let (x, y) = self.jittered_center(region);
            let placed = &mut self.state.nodes[idx];
            placed.region = region;
            placed.x = x;
            placed.y = y;
        }
        self.commit();
        true
    }

    /// Removes a node and every edge incident on it. Returns false on a
    /// stale id.
    pub fn delete_node(&mut self, id: &str) -> bool {
        let before = self.state.nodes.len();
        self.state.nodes.retain(|placed| placed.node.id != id);
        if self.state.nodes.len() == before {
            return false;
        }
        self.state
            .edges
            .retain(|edge| edge.source != id && edge.target != id);
        self.commit();
        true
    }

    /// Connects two existing processes with the default influence edge.
    /// Self-loops are permitted. Returns the new edge id, or `None` when
    /// either endpoint is missing.
    pub fn connect(&mut self, source: &str, target: &str) -> Option<String> {
        let source_exists = self.state.nodes.iter().any(|placed| placed.node.id == source);
        let target_exists = self.state.nodes.iter().any(|placed| placed.node.id == target);
        if !source_exists || !target_exists {
            return None;
        }
        let id = self.fresh_edge_id();
        self.state.edges.push(Edge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            relation: "Influence".to_string(),
            weight: Weight::Moderate,
            bidirectional: false,
            polarity: Polarity::Positive,
            reverse_polarity: None,
            reverse_weight: None,
        });
        self.commit();
        Some(id)
    }

    /// Applies a patch to an edge. Returns false on a stale id.
    pub fn edit_edge(&mut self, id: &str, patch: EdgePatch) -> bool {
        let Some(edge) = self.state.edges.iter_mut().find(|edge| edge.id == id) else {
            return false;
        };
        if let Some(relation) = patch.relation {
            edge.relation = relation;
        }
        if let Some(weight) = patch.weight {
            edge.weight = weight;
        }
        if let Some(polarity) = patch.polarity {
            edge.polarity = polarity;
        }
        if let Some(bidirectional) = patch.bidirectional {
            edge.bidirectional = bidirectional;
        }
        if let Some(reverse_polarity) = patch.reverse_polarity {
            edge.reverse_polarity = reverse_polarity;
        }
        if let Some(reverse_weight) = patch.reverse_weight {
            edge.reverse_weight = reverse_weight;
        }
        self.commit();
        true
    }

    /// Removes an edge. Returns false on a stale id.
    pub fn delete_edge(&mut self, id: &str) -> bool {
        let before = self.state.edges.len();
        self.state.edges.retain(|edge| edge.id != id);
        if self.state.edges.len() == before {
            return false;
        }
        self.commit();
        true
    }

    /// Full reflow: recomputes region sizes and every node position from the
    /// current graph, discarding manual placement.
    pub fn reorganize(&mut self) {
        let graph = self.state.to_graph();
        let layout = compute_layout(&graph, &self.config);
        for (placed, position) in self.state.nodes.iter_mut().zip(layout.nodes) {
            placed.region = position.region;
            placed.x = position.x;
            placed.y = position.y;
        }
        self.state.regions = layout.regions;
        self.commit();
    }

    /// Visual-only position update while a drag is in flight. Takes no
    /// snapshot and emits nothing; pixel moves must not flood history.
    pub fn set_node_position(&mut self, id: &str, x: f32, y: f32) -> bool {
        let Some(placed) = self
            .state
            .nodes
            .iter_mut()
            .find(|placed| placed.node.id == id)
        else {
            return false;
        };
        placed.x = x;
        placed.y = y;
        true
    }

    /// Collision resolution after a drag settles. The host calls this once
    /// the drag's final position has committed. Single pass: every
    /// same-region neighbor overlapping the dragged node's collision box is
    /// pushed one fixed step away per overlapping axis and kept a margin
    /// inside the region; chained overlaps are left for the next drag.
    /// Emits the canonical payload but takes no snapshot.
    pub fn on_drag_end(&mut self, id: &str) {
        let Some(dragged) = self
            .state
            .nodes
            .iter()
            .find(|placed| placed.node.id == id)
            .map(|placed| (placed.region, placed.x, placed.y))
        else {
            return;
        };
        let (region, dragged_x, dragged_y) = dragged;
        let bounds = self
            .state
            .regions
            .iter()
            .find(|candidate| candidate.key == region)
            .map(|candidate| (candidate.width, candidate.height));
        let config = &self.config;
        let span_x = config.collision_width + config.collision_buffer;
        let span_y = config.collision_height + config.collision_buffer;

        for placed in &mut self.state.nodes {
            if placed.node.id == id || placed.region != region {
                continue;
            }
            let dx = placed.x - dragged_x;
            let dy = placed.y - dragged_y;
            if dx.abs() >= span_x || dy.abs() >= span_y {
                continue;
            }
            placed.x += config.collision_step * if dx < 0.0 { -1.0 } else { 1.0 };
            placed.y += config.collision_step * if dy < 0.0 { -1.0 } else { 1.0 };
            if let Some((width, height)) = bounds {
                let max_x = (width - config.node_width - config.edge_margin)
                    .max(config.edge_margin);
                let max_y = (height - config.node_height - config.edge_margin)
                    .max(config.edge_margin);
                placed.x = placed.x.clamp(config.edge_margin, max_x);
                placed.y = placed.y.clamp(config.edge_margin, max_y);
            }
        }
        self.emit();
    }

    /// Marks an edit/create dialog as open. Undo and redo are ignored while
    /// a dialog is open, so history shortcuts cannot race a form in flight.
    pub fn set_modal_open(&mut self, open: bool) {
        self.modal_open = open;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        if self.modal_open {
            return false;
        }
        let Some(state) = self.history.undo().cloned() else {
            return false;
        };
        self.state = state;
        self.emit();
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.modal_open {
            return false;
        }
        let Some(state) = self.history.redo().cloned() else {
            return false;
        };
        self.state = state;
        self.emit();
        true
    }

    fn commit(&mut self) {
        self.history.snapshot(self.state.clone());
        self.emit();
    }

    fn emit(&mut self) {
        let nodes: Vec<NodeRecord> = self
            .state
            .nodes
            .iter()
            .map(|placed| node_record(&placed.node))
            .collect();
        let edges: Vec<EdgeRecord> = self.state.edges.iter().map(edge_record).collect();
        if let Some(listener) = self.on_change.as_mut() {
            listener(&nodes, &edges);
        }
    }

    fn jittered_center(&self, region: RegionKey) -> (f32, f32) {
        let (width, height) = self
            .state
            .regions
            .iter()
            .find(|candidate| candidate.key == region)
            .map(|candidate| (candidate.width, candidate.height))
            .unwrap_or((self.config.cell_width, self.config.cell_height));
        let center_x = (width - self.config.node_width) / 2.0;
        let center_y = (height - self.config.node_height) / 2.0;
        let mut rng = rand::thread_rng();
        let jitter = self.config.jitter;
        (
            center_x + rng.gen_range(-jitter..=jitter),
            center_y + rng.gen_range(-jitter..=jitter),
        )
    }

    fn fresh_node_id(&mut self) -> String {
        loop {
            self.node_seq += 1;
            let id = format!("p{}", self.node_seq);
            if !self.state.nodes.iter().any(|placed| placed.node.id == id) {
                return id;
            }
        }
    }

    fn fresh_edge_id(&mut self) -> String {
        loop {
            self.edge_seq += 1;
            let id = format!("e{}", self.edge_seq);
            if !self.state.edges.iter().any(|edge| edge.id == id) {
                return id;
            }
        }
    }
}
