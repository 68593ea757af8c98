use polarity::{Analysis, AnalysisOptions, CanonicalGraph, DType, SignedLaplacian, parse_edge_list};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/graphs")
}

fn fixtures() -> Vec<(String, String)> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(fixtures_dir()).expect("read fixtures dir") {
        let path = entry.expect("dir entry").path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .expect("utf-8 file name")
            .to_string();
        let text = std::fs::read_to_string(&path).expect("read fixture");
        out.push((name, text));
    }
    out.sort();
    assert!(!out.is_empty(), "no fixtures under {}", fixtures_dir().display());
    out
}

fn option_matrix() -> Vec<AnalysisOptions> {
    let mut out = Vec::new();
    for dtype in [DType::None, DType::ClusterSize] {
        for binning in [false, true] {
            out.push(
                AnalysisOptions::default()
                    .with_dtype(dtype)
                    .with_binning(binning),
            );
        }
    }
    out.push(
        AnalysisOptions::default()
            .with_scale(400.0, 25.0)
            .with_binning(true),
    );
    out
}

fn check_ids_contiguous(name: &str, graph: &CanonicalGraph) {
    for (i, n) in graph.nodes.iter().enumerate() {
        assert_eq!(n.id, i, "{name}: node ids must be contiguous");
    }
    for e in &graph.edges {
        assert!(e.source < graph.node_count(), "{name}: edge {} source", e.id);
        assert!(e.target < graph.node_count(), "{name}: edge {} target", e.id);
    }
    assert_eq!(graph.original_ids.len(), graph.node_count());
}

fn check_laplacian(name: &str, graph: &CanonicalGraph) {
    let l = SignedLaplacian::build(graph.node_count(), &graph.edges).expect("laplacian");
    polarity::laplacian::validate(l.matrix()).unwrap_or_else(|e| panic!("{name}: {e}"));

    let mut degree = vec![0.0; graph.node_count()];
    for e in &graph.edges {
        degree[e.source] += 1.0;
        degree[e.target] += 1.0;
    }
    for (i, d) in degree.iter().enumerate() {
        assert_eq!(l.degree(i), *d, "{name}: diagonal of node {i}");
    }
}

fn check_analysis(name: &str, graph: &CanonicalGraph, a: &Analysis) {
    let n = graph.node_count();
    assert_eq!(a.nodes.len(), n, "{name}: node count");

    let max_abs = a.nodes.iter().fold(0.0_f64, |m, v| m.max(v.original_x.abs()));
    let all_zero = a.nodes.iter().all(|v| v.original_x == 0.0);
    assert!(max_abs == 1.0 || all_zero, "{name}: max |v| = {max_abs}");
    assert!(a.eigen_value.is_finite() && a.eigen_value >= 0.0, "{name}: eigenvalue");

    // Every input edge lands in exactly one set.
    let mut seen = BTreeSet::new();
    for e in a.intra_edges.iter().chain(a.inter_edges.iter()) {
        assert!(seen.insert(e.id), "{name}: edge {} classified twice", e.id);
    }
    let expected: BTreeSet<usize> = graph.edges.iter().map(|e| e.id).collect();
    assert_eq!(seen, expected, "{name}: classified edge ids");

    for e in &a.intra_edges {
        assert_eq!(a.nodes[e.source].cluster, a.nodes[e.target].cluster, "{name}: intra {}", e.id);
    }
    for e in &a.inter_edges {
        assert_ne!(a.nodes[e.source].cluster, a.nodes[e.target].cluster, "{name}: inter {}", e.id);
        assert_eq!(e.consecutive, Some(false), "{name}: inter {} consecutive", e.id);
    }

    for e in a.intra_edges.iter().chain(a.inter_edges.iter()) {
        let (s, t) = (&a.nodes[e.source], &a.nodes[e.target]);
        assert!(s.x <= t.x, "{name}: edge {} not oriented by x", e.id);
        if s.x == t.x {
            assert!(s.y >= t.y, "{name}: edge {} not oriented by y", e.id);
        }
    }

    assert_eq!(
        a.balance.agreeing + a.balance.frustrated,
        graph.edge_count(),
        "{name}: balance totals"
    );

    if let Some(b) = &a.binning {
        assert_eq!(b.replaced_total(), n, "{name}: binning must conserve nodes");
        for e in b.intra_edges.iter().chain(b.inter_edges.iter()) {
            assert!(b.binning_nodes.contains_key(&e.source), "{name}: binned edge {}", e.id);
            assert!(b.binning_nodes.contains_key(&e.target), "{name}: binned edge {}", e.id);
        }
        for (merged, rep) in &b.remap {
            assert!(!b.binning_nodes.contains_key(merged), "{name}: {merged} still displayed");
            assert!(b.binning_nodes.contains_key(rep), "{name}: representative {rep}");
        }
        for (id, r) in &b.binning_nodes {
            assert!(
                (-1.0..=1.0).contains(&r.node.original_x),
                "{name}: display node {id} at {}",
                r.node.original_x
            );
        }
    }
}

#[test]
fn fixtures_satisfy_structural_properties() {
    for (name, text) in fixtures() {
        let graph = parse_edge_list(&text).unwrap_or_else(|e| panic!("{name}: {e}"));
        check_ids_contiguous(&name, &graph);
        check_laplacian(&name, &graph);

        for opts in option_matrix() {
            let a = polarity::analyze_graph(&graph, &opts).unwrap_or_else(|e| panic!("{name}: {e}"));
            check_analysis(&name, &graph, &a);
        }
    }
}

#[test]
fn fixtures_serialize_identically_across_runs() {
    let opts = AnalysisOptions::default()
        .with_dtype(DType::ClusterSize)
        .with_binning(true);
    for (name, text) in fixtures() {
        let first = serde_json::to_string(&polarity::analyze(&text, &opts).expect("analyze"))
            .expect("json");
        let second = serde_json::to_string(&polarity::analyze(&text, &opts).expect("analyze"))
            .expect("json");
        assert_eq!(first, second, "{name}: output must be deterministic");
    }
}

#[test]
fn lower_precision_rounds_the_vector() {
    for (name, text) in fixtures() {
        let a = polarity::analyze(&text, &AnalysisOptions::default().with_decimal_precision(2))
            .expect("analyze");
        for n in &a.nodes {
            let scaled = n.original_x * 100.0;
            assert!(
                (scaled - scaled.round()).abs() < 1e-6,
                "{name}: node {} has {} at precision 2",
                n.id,
                n.original_x
            );
        }
    }
}
