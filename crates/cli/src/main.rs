use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use command::{CommandAction, CommandHandler, CommandRequest, CommandResponse, ResponseMeta};
use config::{GatewayConfig, LoadedConfig};
use files::PathFilter;
use gitgate_diff::{DiffOp, DiffResult};
use gitgate_graph::DependencyGraph;
use gitgate_protocol::{serialize_json, serialize_json_pretty, ErrorCode};
use gitgate_symbols::{ImportRecord, Language, Symbol};
use serde_json::{json, Value};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

mod command;
mod config;
mod files;

#[derive(Parser)]
#[command(name = "gitgate")]
#[command(about = "Content analysis for repository files: symbols, imports, diffs and line references", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (JSON or TOML); falls back to $GITGATE_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a JSON Command API request
    Command(CommandArgs),

    /// List symbol definitions (or imports) of a local file
    Symbols(SymbolsArgs),

    /// Line diff of two local files; a missing path counts as absent
    Diff(DiffArgs),

    /// Build the import graph of a directory
    Graph(GraphArgs),
}

#[derive(Args)]
struct CommandArgs {
    /// Inline JSON request (mutually exclusive with --file)
    #[arg(long, conflicts_with = "file")]
    json: Option<String>,

    /// Path to file containing the JSON request
    #[arg(long)]
    file: Option<PathBuf>,

    /// Pretty-print JSON response
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct SymbolsArgs {
    /// File to analyse
    file: PathBuf,

    /// Override the language detected from the extension
    #[arg(long)]
    language: Option<String>,

    /// Case-insensitive substring filter on names
    #[arg(long)]
    name: Option<String>,

    /// Only symbols of this kind (function, class, struct, ...)
    #[arg(long)]
    kind: Option<String>,

    /// List imports instead of definitions
    #[arg(long)]
    imports: bool,

    /// Print the Command API response instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DiffArgs {
    /// Old version
    source: PathBuf,

    /// New version
    target: PathBuf,

    /// Print the Command API response instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct GraphArgs {
    /// Directory to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Only paths under these prefixes (repeatable)
    #[arg(long)]
    include: Vec<String>,

    /// Skip paths under these prefixes (repeatable)
    #[arg(long)]
    exclude: Vec<String>,

    /// Glob (`src/*.js`) or plain substring the path must match
    #[arg(long)]
    pattern: Option<String>,

    /// Print the Command API response instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = GatewayConfig::load(cli.config.as_deref());

    match cli.command {
        Commands::Command(args) => run_command(args, config)?,
        Commands::Symbols(args) => run_symbols(args, config?)?,
        Commands::Diff(args) => run_diff(args, config?)?,
        Commands::Graph(args) => run_graph(args, config?)?,
    }

    Ok(())
}

fn run_command(args: CommandArgs, config: Result<LoadedConfig>) -> Result<()> {
    let response = match config {
        Ok(config) => {
            let raw = read_payload(&args)?;
            CommandHandler::new(config).execute_raw(&raw)
        }
        Err(err) => CommandResponse::error_with_code(&err, ErrorCode::ConfigError, ResponseMeta::default()),
    };

    emit(&response, args.pretty)?;
    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn read_payload(args: &CommandArgs) -> Result<String> {
    if let Some(raw) = &args.json {
        return Ok(raw.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON from {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read JSON from stdin")?;

    if buffer.trim().is_empty() {
        anyhow::bail!("Command request is empty. Provide --json, --file, or pipe JSON via stdin.");
    }

    Ok(buffer)
}

fn emit(response: &CommandResponse, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serialize_json_pretty(response)?
    } else {
        serialize_json(response)?
    };
    println!("{rendered}");
    Ok(())
}

/// Run a request built by a subcommand; prints and exits on failure.
fn dispatch(config: LoadedConfig, action: CommandAction, payload: Value, json: bool) -> Result<Option<Value>> {
    let response = CommandHandler::new(config).execute(CommandRequest { action, payload });
    if json {
        emit(&response, true)?;
    }
    if response.is_error() {
        if !json {
            let message = response.message.unwrap_or_default();
            eprintln!("Error: {message}");
        }
        std::process::exit(1);
    }
    Ok((!json).then_some(response.data))
}

fn run_symbols(args: SymbolsArgs, config: LoadedConfig) -> Result<()> {
    let path = display_path(&args.file);
    let content = read_lossy(&args.file)?;
    let language = args
        .language
        .as_deref()
        .map(str::parse::<Language>)
        .transpose()
        .context("Invalid --language")?;

    let (action, payload) = if args.imports {
        (
            CommandAction::Imports,
            json!({ "path": path, "content": content, "language": language }),
        )
    } else {
        (
            CommandAction::Symbols,
            json!({
                "path": path,
                "content": content,
                "language": language,
                "nameFilter": args.name,
                "typeFilter": args.kind,
            }),
        )
    };

    let Some(data) = dispatch(config, action, payload, args.json)? else {
        return Ok(());
    };

    if args.imports {
        let imports: Vec<ImportRecord> = serde_json::from_value(data["imports"].clone())?;
        for import in &imports {
            let names = if import.symbols.is_empty() {
                String::new()
            } else {
                format!(" {{{}}}", import.symbols.join(", "))
            };
            println!("{}:{}\t{}{}", path, import.line_number, import.module, names);
        }
        eprintln!("{} import(s)", imports.len());
    } else {
        let symbols: Vec<Symbol> = serde_json::from_value(data["symbols"].clone())?;
        for symbol in &symbols {
            let kind = serde_json::to_value(symbol.kind)?;
            println!(
                "{}:{}\t{}\t{}",
                path,
                symbol.line_number,
                kind.as_str().unwrap_or_default(),
                symbol.name
            );
        }
        eprintln!("{} symbol(s)", symbols.len());
    }
    Ok(())
}

fn run_diff(args: DiffArgs, config: LoadedConfig) -> Result<()> {
    let source = read_optional(&args.source)?;
    let target = read_optional(&args.target)?;
    let payload = json!({ "source": source, "target": target });

    let Some(data) = dispatch(config, CommandAction::Diff, payload, args.json)? else {
        return Ok(());
    };

    let result: DiffResult = serde_json::from_value(data)?;
    for line in &result.lines {
        let marker = match line.op {
            DiffOp::Add => '+',
            DiffOp::Remove => '-',
        };
        println!("{marker}{:>5} {}", line.line_num, line.line);
    }
    if let Some(total) = result.total_changes {
        eprintln!("... {} more change(s) not shown", total - result.lines.len());
    }
    if let Some(note) = &result.note {
        eprintln!("{note}");
    }
    eprintln!(
        "+{} -{} ={} ({})",
        result.added,
        result.removed,
        result.unchanged,
        serde_json::to_value(result.status)?.as_str().unwrap_or_default()
    );
    Ok(())
}

fn run_graph(args: GraphArgs, config: LoadedConfig) -> Result<()> {
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("Invalid directory {}", args.path.display()))?;
    let filter = PathFilter::new(&args.include, &args.exclude, args.pattern.as_deref());
    let files = files::collect_sources(&root, &filter)?;
    log::info!("Scanning {} source files under {}", files.len(), root.display());

    let payload = json!({ "files": files });
    let Some(data) = dispatch(config, CommandAction::DependencyGraph, payload, args.json)? else {
        return Ok(());
    };

    let graph: DependencyGraph = serde_json::from_value(data)?;
    for edge in &graph.edges {
        println!("{} -> {}", edge.from, edge.to);
    }
    for cycle in &graph.circular {
        eprintln!("cycle: {}", cycle.join(" -> "));
    }
    let stats = graph.stats();
    eprintln!(
        "{} files, {} edges, {} external imports, {} cycle(s)",
        stats.nodes, stats.edges, stats.external_imports, stats.cycles
    );
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        log::debug!("{} does not exist, diffing as absent", path.display());
        return Ok(None);
    }
    read_lossy(path).map(Some)
}
