#![forbid(unsafe_code)]

//! Structural balance analysis for signed graphs (headless).
//!
//! The pipeline turns an edge list into a deterministic two-dimensional layout:
//! - `graph`: edge-list ingestion with contiguous node ids
//! - `laplacian`: signed Laplacian construction
//! - `spectral`: minimum singular value partition signal
//! - `cluster`: clusters, coordinates and the skew coefficient
//! - `edges`: intra/inter classification and endpoint orientation
//! - `binning`: optional overlap reduction for display

pub mod balance;
pub mod binning;
pub mod cluster;
pub mod edges;
pub mod error;
pub mod graph;
pub mod laplacian;
mod options;
pub mod spectral;

use serde::{Deserialize, Serialize};

pub use balance::BalanceReport;
pub use binning::{BinnedLayout, BinningOptions, RenderBin};
pub use cluster::{DType, Scale};
pub use edges::ClassifiedEdges;
pub use error::{Error, Result};
pub use graph::{CanonicalGraph, Edge, Node, Sign, parse_edge_list};
pub use laplacian::SignedLaplacian;
pub use options::{AnalysisOptions, DEFAULT_DECIMAL_PRECISION, SvdOptions};
pub use spectral::{SpectralOptions, SpectralResult};

/// Request body accepted by the front ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRequest {
    #[serde(rename = "dType", default)]
    pub dtype: DType,
    pub graph: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub nodes: Vec<Node>,
    pub intra_edges: Vec<Edge>,
    pub inter_edges: Vec<Edge>,
    #[serde(rename = "dTypeCoefficient")]
    pub dtype_coefficient: f64,
    pub eigen_value: f64,
    pub balance: BalanceReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binning: Option<BinnedLayout>,
}

impl Analysis {
    pub fn cluster_count(&self) -> usize {
        let mut seen: Vec<usize> = self.nodes.iter().map(|n| n.cluster).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}

/// Parses `text` and runs the full pipeline.
pub fn analyze(text: &str, opts: &AnalysisOptions) -> Result<Analysis> {
    let graph = parse_edge_list(text)?;
    analyze_graph(&graph, opts)
}

/// Convenience wrapper applying the request's `dType` on top of `opts`.
pub fn analyze_request(request: &GraphRequest, opts: &AnalysisOptions) -> Result<Analysis> {
    analyze(&request.graph, &opts.with_dtype(request.dtype))
}

pub fn analyze_graph(graph: &CanonicalGraph, opts: &AnalysisOptions) -> Result<Analysis> {
    if graph.node_count() == 0 {
        return Err(Error::EmptyGraph);
    }

    let laplacian = SignedLaplacian::build(graph.node_count(), &graph.edges)?;
    let spectral = spectral::partition(&laplacian, &opts.spectral())?;
    let nodes = cluster::assign(&graph.nodes, &spectral.eigenvector, opts.scale())?;
    let dtype_coefficient = cluster::dtype_coefficient(&nodes, opts.dtype);
    let classified = edges::classify(&graph.edges, &nodes)?;
    let balance = BalanceReport::from_edges(&classified);

    let binning = opts.binning.then(|| {
        binning::bin(
            &nodes,
            &classified,
            dtype_coefficient,
            &opts.binning_options(),
        )
    });

    tracing::debug!(
        nodes = nodes.len(),
        edges = classified.len(),
        eigenvalue = spectral.eigenvalue,
        frustrated = balance.frustrated,
        "analysis complete"
    );

    let ClassifiedEdges {
        intra_edges,
        inter_edges,
    } = classified;
    Ok(Analysis {
        nodes,
        intra_edges,
        inter_edges,
        dtype_coefficient,
        eigen_value: spectral.eigenvalue,
        balance,
        binning,
    })
}

/// Builds only the signed Laplacian of `text`.
pub fn laplacian(text: &str) -> Result<SignedLaplacian> {
    let graph = parse_edge_list(text)?;
    SignedLaplacian::build(graph.node_count(), &graph.edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_with_default_dtype() {
        let r: GraphRequest = serde_json::from_str(r#"{"graph":"0,1,1,0,0"}"#).expect("json");
        assert_eq!(r.dtype, DType::None);

        let r: GraphRequest =
            serde_json::from_str(r#"{"dType":"cluster size","graph":""}"#).expect("json");
        assert_eq!(r.dtype, DType::ClusterSize);
    }

    #[test]
    fn analysis_serializes_public_field_names() {
        let a = analyze("0,1,1,1,1\n1,2,-1,1,2\n", &AnalysisOptions::default()).expect("analyze");
        let v = serde_json::to_value(&a).expect("json");
        for key in [
            "nodes",
            "intraEdges",
            "interEdges",
            "dTypeCoefficient",
            "eigenValue",
            "balance",
        ] {
            assert!(v.get(key).is_some(), "missing {key}");
        }
        assert!(v.get("binning").is_none());
        assert!(v["nodes"][0].get("originalX").is_some());
        assert!(v["nodes"][0].get("radius").is_none());
        assert_eq!(v["interEdges"][0]["sign"], "-");
    }

    #[test]
    fn empty_input_is_an_empty_graph() {
        let err = analyze("", &AnalysisOptions::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyGraph));
    }
}
