use polarity::{AnalysisOptions, DType, GraphRequest};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Polarity(polarity::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Polarity(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<polarity::Error> for CliError {
    fn from(value: polarity::Error) -> Self {
        Self::Polarity(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Analyze,
    Laplacian,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    /// Input is a JSON `{dType, graph}` request instead of a raw edge list.
    request: bool,
    dtype: Option<DType>,
    options: AnalysisOptions,
}

fn usage() -> &'static str {
    "polarity\n\
\n\
USAGE:\n\
  polarity [analyze] [--dtype none|cluster-size] [--precision <n>] [--x-scale <f>] [--y-scale <f>] [--binning] [--request] [--pretty] [<path>|-]\n\
  polarity laplacian [--request] [--pretty] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is an edge list, one `source,target,weight,groupSource,groupTarget` per line.\n\
  - --request reads a JSON body `{\"dType\": ..., \"graph\": \"...\"}` instead; --dtype overrides its dType.\n\
  - laplacian prints the signed Laplacian as a JSON array of rows.\n\
  - Set RUST_LOG=debug to trace the pipeline stages on stderr.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a str, CliError> {
    it.next()
        .map(String::as_str)
        .ok_or(CliError::Usage(usage()))
}

fn parse_scale(raw: &str) -> Result<f64, CliError> {
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !v.is_finite() {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "analyze" => args.command = Command::Analyze,
            "laplacian" => args.command = Command::Laplacian,
            "--pretty" => args.pretty = true,
            "--request" => args.request = true,
            "--binning" => args.options = args.options.with_binning(true),
            "--dtype" => {
                let raw = next_value(&mut it)?;
                args.dtype = Some(raw.parse::<DType>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--precision" => {
                let raw = next_value(&mut it)?;
                let dp = raw.parse::<u32>().map_err(|_| CliError::Usage(usage()))?;
                if dp == 0 {
                    return Err(CliError::Usage(usage()));
                }
                args.options = args.options.with_decimal_precision(dp);
            }
            "--x-scale" => {
                let x = parse_scale(next_value(&mut it)?)?;
                args.options = args.options.with_scale(x, args.options.y_scale_factor);
            }
            "--y-scale" => {
                let y = parse_scale(next_value(&mut it)?)?;
                args.options = args.options.with_scale(args.options.x_scale_factor, y);
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn load_request(args: &Args) -> Result<GraphRequest, CliError> {
    let text = read_input(args.input.as_deref())?;
    let mut request = if args.request {
        serde_json::from_str::<GraphRequest>(&text)?
    } else {
        GraphRequest {
            graph: text,
            ..GraphRequest::default()
        }
    };
    if let Some(dtype) = args.dtype {
        request.dtype = dtype;
    }
    Ok(request)
}

fn run(args: Args) -> Result<(), CliError> {
    let request = load_request(&args)?;
    tracing::debug!(
        command = ?args.command,
        bytes = request.graph.len(),
        dtype = request.dtype.as_str(),
        "loaded input"
    );

    match args.command {
        Command::Analyze => {
            let analysis = polarity::analyze_request(&request, &args.options)?;
            write_json(&analysis, args.pretty)
        }
        Command::Laplacian => {
            let laplacian = polarity::laplacian(&request.graph)?;
            write_json(&laplacian.to_rows(), args.pretty)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
