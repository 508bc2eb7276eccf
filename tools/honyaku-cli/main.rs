use clap::{Parser, Subcommand, ValueEnum};
use honyaku::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Detect, import and convert third-party workflow definitions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Skip detection and use this adapter id
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// How to treat connections that point at unknown nodes
    #[arg(long, value_enum, default_value_t = UnresolvedCli::Drop, global = true)]
    unresolved: UnresolvedCli,

    /// Export only the fields the canonical model knows about
    #[arg(long, global = true)]
    minimal_export: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered adapters
    Formats,
    /// Report which adapter recognises a file
    Detect { path: PathBuf },
    /// Import a file and print the canonical result as JSON
    Parse { path: PathBuf },
    /// Import a file and write it back out in its own format
    Convert {
        path: PathBuf,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnresolvedCli {
    Drop,
    Warn,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = build_registry(&cli);
    match &cli.command {
        Command::Formats => run_formats(&registry),
        Command::Detect { path } => run_detect(&registry, &read_input(path)),
        Command::Parse { path } => run_parse(&registry, &cli, &read_input(path)),
        Command::Convert { path, output } => {
            run_convert(&registry, &cli, &read_input(path), output.as_ref())
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The default registry, with the n8n adapter configured from the command line.
fn build_registry(cli: &Cli) -> AdapterRegistry {
    let policy = match cli.unresolved {
        UnresolvedCli::Drop => UnresolvedConnectionPolicy::Drop,
        UnresolvedCli::Warn => UnresolvedConnectionPolicy::Warn,
    };
    let mut registry = AdapterRegistry::new();
    registry.register(
        N8nAdapter::builder()
            .unresolved_connections(policy)
            .preserve_source_fields(!cli.minimal_export)
            .build(),
    );
    registry.register(MakeYamlAdapter);
    registry.register(LegacyXmlAdapter);
    registry
}

fn run_formats(registry: &AdapterRegistry) {
    for adapter in registry.list() {
        let export = if adapter.can_serialize() { "import/export" } else { "import" };
        println!("{:<12} {:<14} {}", adapter.id(), adapter.name(), export);
    }
}

fn run_detect(registry: &AdapterRegistry, raw: &str) {
    match registry.detect_format_scored(raw) {
        Some((adapter, score)) => println!("{} (confidence {})", adapter.id(), score),
        None => exit_with_error("No registered adapter recognises this input"),
    }
}

fn run_parse(registry: &AdapterRegistry, cli: &Cli, raw: &str) {
    let result = match select_adapter(registry, cli, raw) {
        Some(adapter) => adapter.parse(raw),
        None => ParseResult::failure(ImportError::NoMatchingFormat),
    };
    for warning in result.warnings() {
        eprintln!("Warning: {}", warning);
    }

    let json = serde_json::to_string_pretty(&result)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode result: {}", e)));
    println!("{}", json);
    if !result.is_parsed() {
        std::process::exit(1);
    }
}

fn run_convert(registry: &AdapterRegistry, cli: &Cli, raw: &str, output: Option<&PathBuf>) {
    let adapter = select_adapter(registry, cli, raw)
        .unwrap_or_else(|| exit_with_error("No registered adapter recognises this input"));

    let result = adapter.parse(raw);
    for warning in result.warnings() {
        eprintln!("Warning: {}", warning);
    }
    let workflow = result.into_result().unwrap_or_else(|errors| {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        exit_with_error(&messages.join("\n"))
    });
    info!(
        adapter = adapter.id(),
        nodes = workflow.nodes.len(),
        edges = workflow.edges.len(),
        "imported workflow"
    );

    let exported = adapter
        .serialize(&workflow)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    match output {
        Some(path) => fs::write(path, exported).unwrap_or_else(|e| {
            exit_with_error(&format!("Could not write '{}': {}", path.display(), e))
        }),
        None => println!("{}", exported),
    }
}

fn select_adapter(
    registry: &AdapterRegistry,
    cli: &Cli,
    raw: &str,
) -> Option<Arc<dyn WorkflowAdapter>> {
    match &cli.format {
        Some(id) => {
            let adapter = registry.get(id).unwrap_or_else(|| {
                exit_with_error(&ImportError::UnknownAdapter(id.clone()).to_string())
            });
            Some(adapter)
        }
        None => {
            let detected = registry.detect_format(raw);
            if let Some(adapter) = &detected {
                debug!(adapter = adapter.id(), "using detected adapter");
            }
            detected
        }
    }
}

fn read_input(path: &PathBuf) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read '{}': {}", path.display(), e))
    })
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
