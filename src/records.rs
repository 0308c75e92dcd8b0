//! Boundary records exchanged with the host application.
//!
//! The host owns persistence; the engine consumes this position-free shape at
//! load and emits the same shape after every committed mutation. Loading is
//! normalizing, never rejecting: duplicate node ids keep the first occurrence,
//! edges referencing missing nodes are dropped, unknown enum tokens coerce to
//! their fallback values.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Category, Change, Edge, Graph, Node, Polarity, Weight};

/// The only fallible surface of the crate: reading and decoding host files.
/// Core editing operations never fail.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid graph payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config file: {0}")]
    Json5(#[from] json5::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    pub label: String,
    /// Visual kind: "moderator" for fixed contextual factors, "process"
    /// otherwise. Absent means "derive from the category".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_target: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(default = "default_relation")]
    pub relation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidirectional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_polarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_weight: Option<String>,
}

fn default_relation() -> String {
    "Influence".to_string()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphPayload {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl GraphPayload {
    pub fn into_graph(self) -> Graph {
        let mut graph = Graph::new();
        let mut seen: HashSet<String> = HashSet::new();
        for record in self.nodes {
            if !seen.insert(record.id.clone()) {
                continue;
            }
            graph.nodes.push(node_from_record(record));
        }
        let mut edge_seq = 0usize;
        for record in self.edges {
            if !graph.contains_node(&record.source) || !graph.contains_node(&record.target) {
                continue;
            }
            edge_seq += 1;
            graph.edges.push(edge_from_record(record, format!("e{edge_seq}")));
        }
        graph
    }

    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes.iter().map(node_record).collect(),
            edges: graph.edges.iter().map(edge_record).collect(),
        }
    }
}

fn node_from_record(record: NodeRecord) -> Node {
    let category = record
        .category
        .as_deref()
        .map(Category::resolve)
        .unwrap_or(Category::Context);
    let is_moderator = match record.kind.as_deref() {
        Some("moderator") => true,
        Some(_) => false,
        None => category.moderates_by_default(),
    };
    Node {
        id: record.id,
        label: record.label,
        category,
        change: record
            .change
            .as_deref()
            .map(Change::resolve)
            .unwrap_or(Change::Stable),
        is_target: record.is_target.unwrap_or(false),
        is_moderator,
    }
}

fn edge_from_record(record: EdgeRecord, id: String) -> Edge {
    Edge {
        id,
        source: record.source,
        target: record.target,
        relation: record.relation,
        weight: record
            .weight
            .as_deref()
            .map(Weight::resolve)
            .unwrap_or(Weight::Moderate),
        bidirectional: record.bidirectional.unwrap_or(false),
        polarity: record
            .polarity
            .as_deref()
            .map(Polarity::resolve)
            .unwrap_or(Polarity::Positive),
        reverse_polarity: record.reverse_polarity.as_deref().map(Polarity::resolve),
        reverse_weight: record.reverse_weight.as_deref().map(Weight::resolve),
    }
}

pub fn node_record(node: &Node) -> NodeRecord {
    NodeRecord {
        id: node.id.clone(),
        label: node.label.clone(),
        kind: Some(if node.is_moderator { "moderator" } else { "process" }.to_string()),
        change: Some(node.change.as_token().to_string()),
        category: Some(node.category.as_token().to_string()),
        is_target: Some(node.is_target),
    }
}

pub fn edge_record(edge: &Edge) -> EdgeRecord {
    EdgeRecord {
        source: edge.source.clone(),
        target: edge.target.clone(),
        relation: edge.relation.clone(),
        weight: Some(edge.weight.as_token().to_string()),
        bidirectional: Some(edge.bidirectional),
        polarity: Some(edge.polarity.as_token().to_string()),
        reverse_polarity: edge
            .reverse_polarity
            .map(|polarity| polarity.as_token().to_string()),
        reverse_weight: edge.reverse_weight.map(|weight| weight.as_token().to_string()),
    }
}

pub fn parse_payload(input: &str) -> Result<GraphPayload, LoadError> {
    Ok(serde_json::from_str(input)?)
}

pub fn read_payload(path: &Path) -> Result<GraphPayload, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    parse_payload(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_drops_dangling_edges_and_duplicate_ids() {
        let payload: GraphPayload = serde_json::from_str(
            r#"{
                "nodes": [
                    {"id": "a", "label": "Worry", "category": "Cognitiva", "change": "increased"},
                    {"id": "a", "label": "Duplicate", "category": "Afetiva"},
                    {"id": "b", "label": "Avoidance", "category": "Comportamental"}
                ],
                "edges": [
                    {"source": "a", "target": "b", "relation": "feeds"},
                    {"source": "a", "target": "ghost"}
                ]
            }"#,
        )
        .unwrap();
        let graph = payload.into_graph();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].label, "Worry");
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].relation, "feeds");
    }

    #[test]
    fn moderator_defaults_follow_category_unless_overridden() {
        let payload: GraphPayload = serde_json::from_str(
            r#"{
                "nodes": [
                    {"id": "a", "label": "Family", "category": "Contexto"},
                    {"id": "b", "label": "Family", "category": "Contexto", "type": "process"},
                    {"id": "c", "label": "Worry", "category": "Cognitive"}
                ],
                "edges": []
            }"#,
        )
        .unwrap();
        let graph = payload.into_graph();
        assert!(graph.nodes[0].is_moderator);
        assert!(!graph.nodes[1].is_moderator);
        assert!(!graph.nodes[2].is_moderator);
    }

    #[test]
    fn emitted_payload_is_position_free_and_round_trips() {
        let payload: GraphPayload = serde_json::from_str(
            r#"{
                "nodes": [{"id": "a", "label": "Worry", "category": "Cognitiva"}],
                "edges": []
            }"#,
        )
        .unwrap();
        let graph = payload.into_graph();
        let emitted = GraphPayload::from_graph(&graph);
        let json = serde_json::to_string(&emitted).unwrap();
        assert!(!json.contains("\"x\""));
        assert!(json.contains("\"category\":\"Cognitive\""));
        let again = parse_payload(&json).unwrap().into_graph();
        assert_eq!(again, graph);
    }
}
