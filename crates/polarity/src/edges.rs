//! Intra/inter cluster edge classification.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{Edge, Node};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedEdges {
    pub intra_edges: Vec<Edge>,
    pub inter_edges: Vec<Edge>,
}

impl ClassifiedEdges {
    pub fn len(&self) -> usize {
        self.intra_edges.len() + self.inter_edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intra_edges.is_empty() && self.inter_edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.intra_edges.iter().chain(self.inter_edges.iter())
    }
}

/// Splits `edges` by cluster membership of their endpoints, producing new oriented records.
///
/// `nodes` must be the clustered node set indexed by id. Arc drawing downstream relies on the
/// exact orientation rule in [`orient`].
pub fn classify(edges: &[Edge], nodes: &[Node]) -> Result<ClassifiedEdges> {
    let mut out = ClassifiedEdges::default();

    for e in edges {
        let source = lookup(nodes, e.source, e.id)?;
        let target = lookup(nodes, e.target, e.id)?;
        let same_cluster = source.cluster == target.cluster;

        let derived = orient(e, source, target);
        if same_cluster {
            out.intra_edges.push(derived);
        } else {
            out.inter_edges.push(derived);
        }
    }

    tracing::debug!(
        intra = out.intra_edges.len(),
        inter = out.inter_edges.len(),
        "classified edges"
    );
    Ok(out)
}

/// Derived copy of `e` with the consecutive flag set and endpoints swapped when
/// `source.x > target.x`, or when the x values tie and `source.y < target.y`.
pub fn orient(e: &Edge, source: &Node, target: &Node) -> Edge {
    let consecutive = source.cluster == target.cluster
        && source.original_y.abs_diff(target.original_y) == 1;

    let swap = source.x > target.x || (source.x == target.x && source.y < target.y);
    let (s, t) = if swap {
        (target.id, source.id)
    } else {
        (source.id, target.id)
    };

    Edge {
        id: e.id,
        source: s,
        target: t,
        sign: e.sign,
        consecutive: Some(consecutive),
    }
}

fn lookup(nodes: &[Node], id: usize, edge_id: usize) -> Result<&Node> {
    match nodes.get(id) {
        Some(n) if n.id == id => Ok(n),
        _ => Err(Error::invariant(format!(
            "edge {edge_id} references node {id}, which is not in the clustered node set"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Sign;

    fn node(id: usize, x: f64, original_y: usize, cluster: usize) -> Node {
        Node {
            x,
            y: original_y as f64,
            original_x: x,
            original_y,
            cluster,
            ..Node::new(id, 0)
        }
    }

    fn edge(id: usize, source: usize, target: usize, sign: Sign) -> Edge {
        Edge {
            id,
            source,
            target,
            sign,
            consecutive: None,
        }
    }

    #[test]
    fn splits_by_cluster_and_keeps_every_edge() {
        let nodes = vec![node(0, 1.0, 2, 0), node(1, 1.0, 1, 0), node(2, -1.0, 1, 1)];
        let edges = vec![
            edge(0, 0, 1, Sign::Positive),
            edge(1, 1, 2, Sign::Negative),
            edge(2, 2, 0, Sign::Positive),
        ];
        let c = classify(&edges, &nodes).expect("classify");
        assert_eq!(c.intra_edges.len(), 1);
        assert_eq!(c.inter_edges.len(), 2);
        assert_eq!(c.len(), edges.len());

        let mut ids: Vec<usize> = c.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn consecutive_requires_same_cluster_and_adjacent_rank() {
        let nodes = vec![
            node(0, 0.5, 3, 0),
            node(1, 0.5, 2, 0),
            node(2, 0.5, 1, 0),
            node(3, -0.5, 2, 1),
        ];
        let c = classify(
            &[
                edge(0, 0, 1, Sign::Positive),
                edge(1, 0, 2, Sign::Positive),
                edge(2, 1, 3, Sign::Negative),
            ],
            &nodes,
        )
        .expect("classify");
        assert_eq!(c.intra_edges[0].consecutive, Some(true));
        assert_eq!(c.intra_edges[1].consecutive, Some(false));
        // Ranks differ by one but the clusters differ.
        assert_eq!(c.inter_edges[0].consecutive, Some(false));
    }

    #[test]
    fn orientation_swaps_on_larger_source_x() {
        let nodes = vec![node(0, 1.0, 1, 0), node(1, -1.0, 1, 1)];
        let c = classify(&[edge(0, 0, 1, Sign::Negative)], &nodes).expect("classify");
        let e = &c.inter_edges[0];
        assert_eq!((e.source, e.target), (1, 0));
    }

    #[test]
    fn orientation_on_equal_x_puts_higher_y_first() {
        let nodes = vec![node(0, 0.25, 1, 0), node(1, 0.25, 2, 0)];
        let c = classify(&[edge(0, 0, 1, Sign::Positive)], &nodes).expect("classify");
        let e = &c.intra_edges[0];
        assert_eq!((e.source, e.target), (1, 0));

        let c = classify(&[edge(0, 1, 0, Sign::Positive)], &nodes).expect("classify");
        let e = &c.intra_edges[0];
        assert_eq!((e.source, e.target), (1, 0));
    }

    #[test]
    fn unknown_endpoint_is_an_invariant_violation() {
        let nodes = vec![node(0, 1.0, 1, 0)];
        let err = classify(&[edge(0, 0, 4, Sign::Positive)], &nodes).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation { .. }), "got {err:?}");
    }
}
