use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::layout::RegionKey;

/// Clinical domain of a process node. The ten domains of the PBT extended
/// evolutionary meta-model; `Intervention` is a pseudo-domain that shares the
/// behavioral region on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Cognitive,
    Affective,
    Behavioral,
    SelfConcept,
    Context,
    Motivational,
    Sociocultural,
    Attentional,
    Biophysiological,
    Intervention,
}

// Clinical records arrive with English or Portuguese domain labels depending
// on the host locale; both are accepted, lowercased.
static CATEGORY_ALIASES: Lazy<HashMap<&'static str, Category>> = Lazy::new(|| {
    use Category::*;
    let mut map = HashMap::new();
    for (token, category) in [
        ("cognitive", Cognitive),
        ("cognitiva", Cognitive),
        ("affective", Affective),
        ("afetiva", Affective),
        ("behavioral", Behavioral),
        ("comportamental", Behavioral),
        ("self", SelfConcept),
        ("context", Context),
        ("contexto", Context),
        ("motivational", Motivational),
        ("motivacional", Motivational),
        ("sociocultural", Sociocultural),
        ("attentional", Attentional),
        ("atencional", Attentional),
        ("biophysiological", Biophysiological),
        ("biofisiologica", Biophysiological),
        ("biofisiológica", Biophysiological),
        ("intervention", Intervention),
        ("intervencao", Intervention),
        ("intervenção", Intervention),
    ] {
        map.insert(token, category);
    }
    map
});

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Cognitive,
        Category::Affective,
        Category::Behavioral,
        Category::SelfConcept,
        Category::Context,
        Category::Motivational,
        Category::Sociocultural,
        Category::Attentional,
        Category::Biophysiological,
        Category::Intervention,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        CATEGORY_ALIASES.get(token.trim().to_lowercase().as_str()).copied()
    }

    /// Total parse: unrecognized domains coerce to `Context` so a free-typed
    /// record from the host never fails to load.
    pub fn resolve(token: &str) -> Self {
        Self::from_token(token).unwrap_or(Category::Context)
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Category::Cognitive => "Cognitive",
            Category::Affective => "Affective",
            Category::Behavioral => "Behavioral",
            Category::SelfConcept => "Self",
            Category::Context => "Context",
            Category::Motivational => "Motivational",
            Category::Sociocultural => "Sociocultural",
            Category::Attentional => "Attentional",
            Category::Biophysiological => "Biophysiological",
            Category::Intervention => "Intervention",
        }
    }

    /// Screen region this domain is pinned to. Intervention has no slot of
    /// its own and always folds into the behavioral region.
    pub fn region(self) -> RegionKey {
        match self {
            Category::Cognitive => RegionKey::Cognitive,
            Category::Affective => RegionKey::Affective,
            Category::Behavioral | Category::Intervention => RegionKey::Behavioral,
            Category::SelfConcept => RegionKey::SelfConcept,
            Category::Context => RegionKey::Context,
            Category::Motivational => RegionKey::Motivational,
            Category::Sociocultural => RegionKey::Sociocultural,
            Category::Attentional => RegionKey::Attentional,
            Category::Biophysiological => RegionKey::Biophysiological,
        }
    }

    /// Contextual/biological domains render as fixed moderators unless the
    /// record overrides the shape.
    pub fn moderates_by_default(self) -> bool {
        matches!(
            self,
            Category::Context | Category::Sociocultural | Category::Biophysiological
        )
    }
}

/// Direction of change reported for a process across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Change {
    Increased,
    Decreased,
    Stable,
    New,
}

impl Change {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "increased" | "aumentou" => Some(Change::Increased),
            "decreased" | "diminuiu" => Some(Change::Decreased),
            "stable" | "estavel" | "estável" => Some(Change::Stable),
            "new" | "novo" => Some(Change::New),
            _ => None,
        }
    }

    pub fn resolve(token: &str) -> Self {
        Self::from_token(token).unwrap_or(Change::Stable)
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Change::Increased => "increased",
            Change::Decreased => "decreased",
            Change::Stable => "stable",
            Change::New => "new",
        }
    }
}

/// Qualitative influence strength. Purely presentational; the derived stroke
/// width is computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weight {
    Weak,
    Moderate,
    Strong,
}

impl Weight {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "weak" | "fraca" => Some(Weight::Weak),
            "moderate" | "moderada" => Some(Weight::Moderate),
            "strong" | "forte" => Some(Weight::Strong),
            _ => None,
        }
    }

    pub fn resolve(token: &str) -> Self {
        Self::from_token(token).unwrap_or(Weight::Moderate)
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Weight::Weak => "weak",
            Weight::Moderate => "moderate",
            Weight::Strong => "strong",
        }
    }

    pub fn stroke_width(self) -> f32 {
        match self {
            Weight::Weak => 1.0,
            Weight::Moderate => 2.0,
            Weight::Strong => 3.5,
        }
    }
}

/// Sign of an influence: excitatory or inhibitory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "positive" | "positiva" | "+" => Some(Polarity::Positive),
            "negative" | "negativa" | "-" => Some(Polarity::Negative),
            _ => None,
        }
    }

    pub fn resolve(token: &str) -> Self {
        Self::from_token(token).unwrap_or(Polarity::Positive)
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
        }
    }
}

/// A clinical process in the formulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub category: Category,
    pub change: Change,
    pub is_target: bool,
    pub is_moderator: bool,
}

/// A directed influence between two processes. The id is assigned by the
/// engine and stays internal; it never crosses the host boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub relation: String,
    pub weight: Weight,
    pub bidirectional: bool,
    pub polarity: Polarity,
    pub reverse_polarity: Option<Polarity>,
    pub reverse_weight: Option<Weight>,
}

impl Edge {
    /// Polarity of the return direction; falls back to the forward value.
    pub fn effective_reverse_polarity(&self) -> Polarity {
        self.reverse_polarity.unwrap_or(self.polarity)
    }

    /// Strength of the return direction; falls back to the forward value.
    pub fn effective_reverse_weight(&self) -> Weight {
        self.reverse_weight.unwrap_or(self.weight)
    }
}

/// The logical formulation graph, position-free. Node order is authoring
/// order and is preserved through layout so rendering is deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }
}
