//! Cluster and coordinate assignment from the normalized spectral vector.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::Node;

/// How the skew coefficient is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DType {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "cluster size")]
    ClusterSize,
}

impl DType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ClusterSize => "cluster size",
        }
    }
}

impl std::str::FromStr for DType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "cluster size" | "cluster-size" | "cluster_size" => Ok(Self::ClusterSize),
            other => Err(format!("unknown dType: {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

/// Returns a copy of `nodes` with coordinates and clusters populated.
///
/// Nodes sharing a vector value stack at `original_y = count, count - 1, ..., 1` in id order, and
/// `cluster` is the first-seen index of the value in the vector.
pub fn assign(nodes: &[Node], eigenvector: &[f64], scale: Scale) -> Result<Vec<Node>> {
    if nodes.len() != eigenvector.len() {
        return Err(Error::invariant(format!(
            "eigenvector has length {}, graph has {} nodes",
            eigenvector.len(),
            nodes.len()
        )));
    }

    let mut remaining: FxHashMap<u64, usize> = FxHashMap::default();
    let mut cluster_of: FxHashMap<u64, usize> = FxHashMap::default();
    for &v in eigenvector {
        let key = value_key(v);
        *remaining.entry(key).or_insert(0) += 1;
        let next = cluster_of.len();
        cluster_of.entry(key).or_insert(next);
    }

    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        let original_x = *eigenvector.get(node.id).ok_or_else(|| {
            Error::invariant(format!("node id {} has no eigenvector component", node.id))
        })?;
        let key = value_key(original_x);
        // Both maps were filled from the same vector, so the key is present.
        let (Some(count), Some(&cluster)) = (remaining.get_mut(&key), cluster_of.get(&key)) else {
            return Err(Error::invariant(format!(
                "eigenvector value {original_x} was not indexed"
            )));
        };
        let original_y = *count;
        *count = count.saturating_sub(1);

        out.push(Node {
            x: original_x * scale.x,
            y: original_y as f64 * scale.y,
            original_x,
            original_y,
            cluster,
            ..node.clone()
        });
    }

    tracing::debug!(
        nodes = out.len(),
        clusters = cluster_of.len(),
        "assigned spectral clusters"
    );
    Ok(out)
}

/// Left/right imbalance of the layout: `(left - right) / n` for [`DType::ClusterSize`], else 0.
/// Nodes at `x == 0` count as right.
pub fn dtype_coefficient(nodes: &[Node], dtype: DType) -> f64 {
    match dtype {
        DType::None => 0.0,
        DType::ClusterSize => {
            if nodes.is_empty() {
                return 0.0;
            }
            let total = nodes.len() as f64;
            let left = nodes.iter().filter(|n| n.x < 0.0).count() as f64;
            let right = total - left;
            left / total - right / total
        }
    }
}

fn value_key(v: f64) -> u64 {
    // Collapse -0.0 onto 0.0.
    if v == 0.0 { 0.0_f64.to_bits() } else { v.to_bits() }
}
