//! Overlap removal for display.
//!
//! Nodes whose spectral coordinates fall into the same narrow x-interval are merged into one
//! representative so the rendered layout stays legible. This is a derived, display-only view: the
//! canonical nodes and edges are left untouched and the merge is reported as an id remap table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::edges::ClassifiedEdges;
use crate::graph::{Edge, Node};
use crate::spectral::round_half_up;

pub const DEFAULT_BIN_WIDTH: f64 = 0.025;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinningOptions {
    pub bin_width: f64,
    /// Start of the first bin.
    pub lower: f64,
    /// End of the last bin, inclusive.
    pub upper: f64,
    /// Applied to a merged bin's midpoint to produce its `x`.
    pub x_scale_factor: f64,
}

impl Default for BinningOptions {
    fn default() -> Self {
        Self {
            bin_width: DEFAULT_BIN_WIDTH,
            lower: -1.0,
            upper: 1.0,
            x_scale_factor: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBin {
    #[serde(flatten)]
    pub node: Node,
    pub replaced_nodes_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinnedLayout {
    /// Display nodes keyed by id (a representative's id for merged bins).
    pub binning_nodes: BTreeMap<usize, RenderBin>,
    pub intra_edges: Vec<Edge>,
    pub inter_edges: Vec<Edge>,
    /// Merged node id -> representative id. Unmerged nodes are absent.
    pub remap: BTreeMap<usize, usize>,
}

impl BinnedLayout {
    pub fn replaced_total(&self) -> usize {
        self.binning_nodes
            .values()
            .map(|b| b.replaced_nodes_count)
            .sum()
    }

    pub fn resolve(&self, id: usize) -> usize {
        self.remap.get(&id).copied().unwrap_or(id)
    }
}

/// A node anchors a bin when it is on the outermost stacking layer, or unconditionally when the
/// layout carries a non-zero skew coefficient.
fn is_bin_eligible(node: &Node, dtype_coefficient: f64) -> bool {
    node.original_y == 1 || dtype_coefficient != 0.0
}

/// Digits used to snap bin positions back onto the decimal grid the coordinates are rounded to.
const SNAP_DIGITS: u32 = 7;

fn bin_count(opts: &BinningOptions) -> usize {
    let span = opts.upper - opts.lower;
    if !(opts.bin_width > 0.0) || !(span > 0.0) {
        return 0;
    }
    round_half_up(span / opts.bin_width, SNAP_DIGITS).ceil() as usize
}

/// Bin `k` covers `[lower + k*w, lower + (k+1)*w)`; the last bin is closed at `upper`.
fn bin_index(original_x: f64, opts: &BinningOptions, bin_count: usize) -> Option<usize> {
    if bin_count == 0 || !(original_x >= opts.lower && original_x <= opts.upper) {
        return None;
    }
    let k = round_half_up((original_x - opts.lower) / opts.bin_width, SNAP_DIGITS).floor() as usize;
    Some(k.min(bin_count - 1))
}

pub fn bin(
    nodes: &[Node],
    edges: &ClassifiedEdges,
    dtype_coefficient: f64,
    opts: &BinningOptions,
) -> BinnedLayout {
    let mut binning_nodes: BTreeMap<usize, RenderBin> = BTreeMap::new();
    let mut remap: BTreeMap<usize, usize> = BTreeMap::new();
    let mut binned = vec![false; nodes.len()];

    let width = opts.bin_width;
    let count = bin_count(opts);

    let mut bins: BTreeMap<usize, Vec<(usize, &Node)>> = BTreeMap::new();
    for (i, n) in nodes.iter().enumerate() {
        if !is_bin_eligible(n, dtype_coefficient) {
            continue;
        }
        if let Some(k) = bin_index(n.original_x, opts, count) {
            bins.entry(k).or_default().push((i, n));
        }
    }

    for (k, members) in &bins {
        let Some(&(_, first)) = members.first() else {
            continue;
        };
        for &(i, _) in members {
            binned[i] = true;
        }

        if members.len() == 1 {
            binning_nodes.insert(
                first.id,
                RenderBin {
                    node: first.clone(),
                    replaced_nodes_count: 1,
                },
            );
            continue;
        }

        let midpoint = round_half_up(opts.lower + (*k as f64 + 0.5) * width, SNAP_DIGITS);
        binning_nodes.insert(
            first.id,
            RenderBin {
                node: Node {
                    x: midpoint * opts.x_scale_factor,
                    original_x: midpoint,
                    ..first.clone()
                },
                replaced_nodes_count: members.len(),
            },
        );
        for &(_, other) in members.iter().skip(1) {
            remap.insert(other.id, first.id);
        }
    }

    for (i, n) in nodes.iter().enumerate() {
        if !binned[i] && n.original_y > 1 {
            binning_nodes.insert(
                n.id,
                RenderBin {
                    node: n.clone(),
                    replaced_nodes_count: 1,
                },
            );
        }
    }

    let rewrite = |e: &Edge| Edge {
        source: remap.get(&e.source).copied().unwrap_or(e.source),
        target: remap.get(&e.target).copied().unwrap_or(e.target),
        ..e.clone()
    };
    let intra_edges = edges.intra_edges.iter().map(rewrite).collect();
    let inter_edges = edges.inter_edges.iter().map(rewrite).collect();

    tracing::debug!(
        nodes = nodes.len(),
        display_nodes = binning_nodes.len(),
        merged = remap.len(),
        "binned overlapping nodes"
    );

    BinnedLayout {
        binning_nodes,
        intra_edges,
        inter_edges,
        remap,
    }
}
