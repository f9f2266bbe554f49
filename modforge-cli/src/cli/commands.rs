//! Command implementations and argument parsing for the modforge CLI.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use modforge_core::{
    ConfigError, DependencyEdge, GenerationReport, ProjectBlueprint, TopologyKind,
    TopologyParameters, generate,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::config::load_config;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "modforge",
    about = "Plan synthetic multi-module projects for build benchmarking."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build the blueprint of a project from a JSON configuration file.
    Generate(GenerateArgs),
    /// Print the edges a single topology produces.
    Topology(TopologyArgs),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    /// Path to the JSON configuration file.
    pub config: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Options accepted by the `topology` command.
#[derive(Debug, Args, Clone)]
pub struct TopologyArgs {
    /// Topology name, e.g. `random_connected`.
    pub kind: String,

    /// Number of modules in the project.
    #[arg(long)]
    pub modules: usize,

    /// Topology parameter as `key=value`; may be repeated.
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

/// Rendering of the `generate` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Per-module summary followed by the dependency graph.
    #[default]
    Text,
    /// The blueprint and its report as pretty-printed JSON.
    Json,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration file could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The configuration file is not valid JSON or lacks a required key.
    #[error("`{path}` is not a valid configuration: {source}")]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// Parser diagnostic, including line and column.
        #[source]
        source: serde_json::Error,
    },
    /// A configuration value had the right shape but an unusable content.
    #[error("`{path}`: `{field}` is `{value}`, expected {expected}")]
    InvalidValue {
        /// File being parsed.
        path: PathBuf,
        /// JSON path of the value, e.g. `dependencies[1].to`.
        field: String,
        /// Offending value as written.
        value: String,
        /// Description of what was expected.
        expected: &'static str,
    },
    /// The core rejected the configuration.
    #[error(transparent)]
    Core(#[from] ConfigError),
}

/// Result of executing a CLI command, ready to be rendered.
#[derive(Debug, Clone)]
pub enum ExecutionOutput {
    /// Blueprint produced by `generate`.
    Blueprint {
        /// The finished blueprint.
        blueprint: ProjectBlueprint,
        /// How it should be rendered.
        format: OutputFormat,
    },
    /// Edges produced by `topology`, in generation order.
    Edges(Vec<DependencyEdge>),
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    blueprint: &'a ProjectBlueprint,
    report: &'a GenerationReport,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the configuration cannot be loaded or the core
/// rejects it.
///
/// # Examples
/// ```
/// use modforge_cli::cli::{Cli, Command, ExecutionOutput, TopologyArgs, run_cli};
///
/// let cli = Cli {
///     command: Command::Topology(TopologyArgs {
///         kind: "linear".into(),
///         modules: 3,
///         params: Vec::new(),
///     }),
/// };
/// match run_cli(cli).expect("linear takes no parameters") {
///     ExecutionOutput::Edges(edges) => assert_eq!(edges.len(), 2),
///     other => panic!("unexpected output: {other:?}"),
/// }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionOutput, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Generate(args) => {
            span.record("command", field::display("generate"));
            run_generate(&args)
        }
        Command::Topology(args) => {
            span.record("command", field::display("topology"));
            run_topology(args)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(args),
    fields(config = %args.config.display(), format = ?args.format),
)]
pub(super) fn run_generate(args: &GenerateArgs) -> Result<ExecutionOutput, CliError> {
    let config = load_config(&args.config)?;
    let blueprint = ProjectBlueprint::from_config(&config)?;
    info!(
        modules = blueprint.modules().len(),
        edges = blueprint.graph().len(),
        circular = blueprint.has_circular_dependencies(),
        "blueprint generated"
    );
    Ok(ExecutionOutput::Blueprint {
        blueprint,
        format: args.format,
    })
}

#[instrument(
    name = "cli.topology",
    err,
    skip(args),
    fields(kind = %args.kind, modules = args.modules),
)]
pub(super) fn run_topology(args: TopologyArgs) -> Result<ExecutionOutput, CliError> {
    let kind: TopologyKind = args.kind.parse()?;
    let parameters: TopologyParameters = args.params.into_iter().collect();
    let edges = generate(kind, &parameters, args.modules)?;
    info!(edges = edges.len(), "topology generated");
    Ok(ExecutionOutput::Edges(edges))
}

pub(super) fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `key=value`, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("parameter name is empty in `{raw}`"));
    }
    Ok((key.to_owned(), value.trim().to_owned()))
}

/// Renders `output` to `writer`.
///
/// Text output lists one line per module, then the dependency graph and,
/// when the graph is cyclic, a warning line. Edges are written one per line
/// as `from -> to`.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` or JSON serialisation fails.
///
/// # Examples
/// ```
/// use modforge_cli::cli::{ExecutionOutput, render_output};
/// use modforge_core::DependencyEdge;
///
/// let output = ExecutionOutput::Edges(vec![DependencyEdge::new(0, 1)]);
/// let mut buffer = Vec::new();
/// render_output(&output, &mut buffer).expect("writing to a Vec cannot fail");
/// assert_eq!(buffer, b"0 -> 1\n");
/// ```
pub fn render_output(output: &ExecutionOutput, mut writer: impl Write) -> io::Result<()> {
    match output {
        ExecutionOutput::Blueprint {
            blueprint,
            format: OutputFormat::Text,
        } => render_blueprint(blueprint, &mut writer),
        ExecutionOutput::Blueprint {
            blueprint,
            format: OutputFormat::Json,
        } => {
            let json = JsonOutput {
                blueprint,
                report: blueprint.report(),
            };
            serde_json::to_writer_pretty(&mut writer, &json)?;
            writeln!(writer)
        }
        ExecutionOutput::Edges(edges) => {
            for edge in edges {
                writeln!(writer, "{edge}")?;
            }
            Ok(())
        }
    }
}

fn render_blueprint(blueprint: &ProjectBlueprint, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "modules: {}", blueprint.modules().len())?;
    for module in blueprint.modules() {
        let mass = module.code_mass();
        write!(
            writer,
            "{}\tjava {}/{}/{}\tkotlin {}/{}",
            module.name(),
            mass.java_packages,
            mass.java_classes,
            mass.java_methods,
            mass.kotlin_packages,
            mass.kotlin_classes,
        )?;
        if let Some(variants) = module.variants() {
            write!(
                writer,
                "\tandroid activities={} flavors={:?} build_types={}",
                module.activity_count(),
                variants.product_flavors,
                variants.build_types,
            )?;
        }
        writeln!(writer)?;
    }
    write!(writer, "{}", blueprint.report())
}
