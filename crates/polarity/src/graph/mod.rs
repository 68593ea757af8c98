use serde::{Deserialize, Serialize};

mod parse;

pub use parse::parse_edge_list;

/// Edge polarity. Serialized as the literal markers `"+"` / `"-"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    #[serde(rename = "+")]
    Positive,
    #[serde(rename = "-")]
    Negative,
}

impl Sign {
    /// Any strictly positive weight is a positive edge; zero and negative weights are negative.
    pub fn from_weight(weight: i64) -> Self {
        if weight > 0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    pub fn weight(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    /// Normalized spectral coordinate.
    pub original_x: f64,
    /// Stacking rank among nodes sharing `original_x` (1 is the outermost layer).
    pub original_y: usize,
    pub cluster: usize,
    /// Input label carried through from the edge list; not used by the analysis.
    pub group: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl Node {
    pub fn new(id: usize, group: i64) -> Self {
        Self {
            id,
            x: 0.0,
            y: 0.0,
            original_x: 0.0,
            original_y: 0,
            cluster: 0,
            group,
            radius: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// 0-based index of the input line that declared the edge.
    pub id: usize,
    pub source: usize,
    pub target: usize,
    pub sign: Sign,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consecutive: Option<bool>,
}

/// A signed graph whose node ids are contiguous over `0..nodes.len()`.
#[derive(Debug, Clone)]
pub struct CanonicalGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// `original_ids[id]` is the identifier the node had in the input text.
    pub original_ids: Vec<i64>,
}

impl CanonicalGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn original_id(&self, id: usize) -> Option<i64> {
        self.original_ids.get(id).copied()
    }
}
