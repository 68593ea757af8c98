mod cmd;

#[derive(Debug, thiserror::Error)]
enum XtaskError {
    #[error("usage: xtask <command> ...")]
    Usage,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write file {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("graph generation failed: {0}")]
    GenerateFailed(String),
    #[error("fixture check failed:\n{0}")]
    CheckFailed(String),
}

fn print_help(topic: Option<&str>) {
    match topic.map(str::trim).filter(|t| !t.is_empty()) {
        Some("gen-graph") => {
            println!("usage: xtask gen-graph [--nodes <n>] [--faction-size <k>] [--density <d>]");
            println!("                       [--unbalanced <ratio>] [--seed <s>] [--count <c>]");
            println!("                       [--attempts <a>] [--out <dir>|--stdout]");
            println!();
            println!("Writes `graph_<n>_<density>_<ratio>_<i>.txt` edge lists (default: fixtures/graphs).");
            return;
        }
        Some("check-fixtures") => {
            println!("usage: xtask check-fixtures [--dir <dir>] [--json]");
            println!();
            println!("Analyzes every `*.txt` fixture and prints a balance summary.");
            return;
        }
        Some(other) => {
            println!("usage: xtask {other} ...");
            println!();
            println!("See: `crates/xtask/src/main.rs` for the full argument grammar.");
            return;
        }
        None => {}
    }

    println!("usage: xtask <command> ...");
    println!();
    println!("Commands:");
    println!("  gen-graph        generate seeded two-faction signed graphs");
    println!("  check-fixtures   analyze fixtures/graphs/*.txt and report balance");
    println!();
    println!("Tips:");
    println!("  - `cargo run -p xtask -- gen-graph --nodes 30 --density 0.3 --unbalanced 0.1 --seed 7`");
    println!();
    println!("Topics:");
    println!("  xtask help <command>");
}

fn main() -> Result<(), XtaskError> {
    let mut args = std::env::args().skip(1);
    let Some(cmd_name) = args.next() else {
        return Err(XtaskError::Usage);
    };

    if matches!(cmd_name.as_str(), "--help" | "-h") {
        print_help(None);
        return Ok(());
    }
    if cmd_name == "help" {
        print_help(args.next().as_deref());
        return Ok(());
    }

    match cmd_name.as_str() {
        "gen-graph" => cmd::gen_graph(args.collect()),
        "check-fixtures" => cmd::check_fixtures(args.collect()),
        other => Err(XtaskError::UnknownCommand(other.to_string())),
    }
}
