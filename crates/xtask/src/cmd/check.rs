use super::fixtures_dir;
use crate::XtaskError;
use polarity::{AnalysisOptions, DType};
use std::fs;
use std::path::PathBuf;

pub(crate) fn check_fixtures(args: Vec<String>) -> Result<(), XtaskError> {
    let mut dir: Option<PathBuf> = None;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" => {
                i += 1;
                dir = args.get(i).map(PathBuf::from);
            }
            "--json" => json = true,
            "--help" | "-h" => return Err(XtaskError::Usage),
            _ => return Err(XtaskError::Usage),
        }
        i += 1;
    }
    let dir = dir.unwrap_or_else(fixtures_dir);

    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .map_err(|source| XtaskError::ReadFile {
            path: dir.display().to_string(),
            source,
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("txt"))
        .collect();
    paths.sort();

    let opts = AnalysisOptions::default()
        .with_dtype(DType::ClusterSize)
        .with_binning(true);
    let mut failures = Vec::new();
    let mut summary = Vec::new();

    for path in &paths {
        let text = fs::read_to_string(path).map_err(|source| XtaskError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        match polarity::analyze(&text, &opts) {
            Ok(a) => {
                let display_nodes = a.binning.as_ref().map_or(0, |b| b.binning_nodes.len());
                if !json {
                    println!(
                        "{name}: {} nodes, {} clusters, {} edges ({} frustrated, ratio {:.3}), eigenvalue {:.3e}, {display_nodes} display nodes",
                        a.nodes.len(),
                        a.cluster_count(),
                        a.balance.agreeing + a.balance.frustrated,
                        a.balance.frustrated,
                        a.balance.frustration_ratio,
                        a.eigen_value,
                    );
                }
                summary.push(serde_json::json!({
                    "name": name,
                    "nodes": a.nodes.len(),
                    "clusters": a.cluster_count(),
                    "balance": a.balance,
                    "eigenValue": a.eigen_value,
                    "dTypeCoefficient": a.dtype_coefficient,
                    "displayNodes": display_nodes,
                }));
            }
            Err(err) => failures.push(format!("{name}: {err}")),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    if !failures.is_empty() {
        return Err(XtaskError::CheckFailed(failures.join("\n")));
    }
    Ok(())
}
