//! Agreement between edge signs and the computed partition.

use serde::{Deserialize, Serialize};

use crate::edges::ClassifiedEdges;
use crate::graph::Sign;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    /// Positive intra-cluster plus negative inter-cluster edges.
    pub agreeing: usize,
    /// Negative intra-cluster plus positive inter-cluster edges.
    pub frustrated: usize,
    /// `frustrated / (agreeing + frustrated)`, 0 without edges.
    pub frustration_ratio: f64,
}

impl BalanceReport {
    pub fn from_edges(edges: &ClassifiedEdges) -> Self {
        let intra_frustrated = edges
            .intra_edges
            .iter()
            .filter(|e| e.sign == Sign::Negative)
            .count();
        let inter_frustrated = edges
            .inter_edges
            .iter()
            .filter(|e| e.sign == Sign::Positive)
            .count();

        let frustrated = intra_frustrated + inter_frustrated;
        let total = edges.len();
        let agreeing = total - frustrated;
        let frustration_ratio = if total == 0 {
            0.0
        } else {
            frustrated as f64 / total as f64
        };

        Self {
            agreeing,
            frustrated,
            frustration_ratio,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.frustrated == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn edge(id: usize, sign: Sign) -> Edge {
        Edge {
            id,
            source: 0,
            target: 1,
            sign,
            consecutive: Some(false),
        }
    }

    #[test]
    fn counts_sign_agreement_per_set() {
        let edges = ClassifiedEdges {
            intra_edges: vec![edge(0, Sign::Positive), edge(1, Sign::Negative)],
            inter_edges: vec![edge(2, Sign::Negative), edge(3, Sign::Negative)],
        };
        let r = BalanceReport::from_edges(&edges);
        assert_eq!(r.agreeing, 3);
        assert_eq!(r.frustrated, 1);
        assert_eq!(r.frustration_ratio, 0.25);
        assert!(!r.is_balanced());
    }

    #[test]
    fn no_edges_is_trivially_balanced() {
        let r = BalanceReport::from_edges(&ClassifiedEdges::default());
        assert_eq!(r, BalanceReport::default());
        assert!(r.is_balanced());
    }
}
