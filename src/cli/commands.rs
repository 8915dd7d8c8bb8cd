use crate::config::{load_config, ConfigOverrides, RoutingMethod, ServerType};
use crate::content::ContentStore;
use crate::route::{Route, RouteTable};
use crate::runtime::{HtmlBuffer, LocationSnapshot, MiniJinjaPartials, RenderStatus, Router};
use crate::site::{build_site, load_artifact};
use crate::watch::{rebuild, watch_config};
use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Command-line interface for the documentation-site generator
#[derive(Parser)]
#[command(name = "docsite-gen")]
#[command(about = "Static documentation-site generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build the site described by a configuration file
    Build {
        /// Path to the configuration file (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        #[command(flatten)]
        routing: RoutingArgs,
    },
    /// Print the route table of a built site
    Routes {
        /// Output directory of a previous build
        #[arg(short, long)]
        dest: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = RoutesFormat::Table)]
        format: RoutesFormat,
    },
    /// Resolve a URL against a built site and print the rendered view
    Resolve {
        /// Output directory of a previous build
        #[arg(short, long)]
        dest: PathBuf,

        /// Location to resolve, e.g. `/docs/api/web/` or `/?content=guide`
        #[arg(short, long)]
        url: String,

        /// Route path left by a redirect document, e.g. `api/web/`
        #[arg(long)]
        stored: Option<String>,
    },
    /// Build once, then rebuild whenever the configuration file changes
    Watch {
        /// Path to the configuration file (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        #[command(flatten)]
        routing: RoutingArgs,
    },
}

/// Flags that override the routing section of the configuration file
#[derive(Args, Debug, Clone, Default)]
pub struct RoutingArgs {
    /// Routing method: query or path
    #[arg(long)]
    pub routing_method: Option<RoutingMethod>,

    /// Whether route names are case-sensitive
    #[arg(long)]
    pub case_sensitive: Option<bool>,

    /// Target host: apache, windows, github or static
    #[arg(long)]
    pub server: Option<ServerType>,

    /// Application base path
    #[arg(long)]
    pub base: Option<String>,

    /// Entrance route, e.g. `api`, `api:web`, `content:guide`
    #[arg(long)]
    pub entrance: Option<String>,

    /// Output directory
    #[arg(long)]
    pub dest: Option<PathBuf>,
}

impl From<&RoutingArgs> for ConfigOverrides {
    fn from(args: &RoutingArgs) -> Self {
        Self {
            method: args.routing_method,
            case_sensitive: args.case_sensitive,
            server: args.server,
            base: args.base.clone(),
            entrance: args.entrance.clone(),
            dest: args.dest.clone(),
        }
    }
}

/// Output format of the `routes` command
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RoutesFormat {
    /// Aligned columns
    Table,
    /// The serialized route table
    Json,
}

/// Outcome of resolving one URL against a built site.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub status: RenderStatus,
    pub route: Option<Route>,
    pub html: String,
}

/// Parse the process arguments and execute the command.
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Execute a parsed command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the route table is
/// invalid, any output file cannot be written, or a built site's artifact is
/// missing or was produced by an incompatible generator.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Build { config, routing } => {
            let build_config = load_config(config, &routing.into())?;
            let summary = build_site(&build_config)?;
            println!(
                "✅ Built {} routes ({} api, {} content) → {:?}",
                summary.routes.total(),
                summary.routes.api,
                summary.routes.content,
                summary.dest
            );
            Ok(())
        }
        Commands::Routes { dest, format } => {
            let artifact = load_artifact(dest)?;
            match format {
                RoutesFormat::Table => print!("{}", format_routes(&artifact.routes)),
                RoutesFormat::Json => println!("{}", serde_json::to_string_pretty(&artifact.routes)?),
            }
            Ok(())
        }
        Commands::Resolve { dest, url, stored } => {
            let resolution = resolve_url(dest, url, stored.as_deref())?;
            match &resolution.route {
                Some(route) => println!("✅ {url} → {} ({:?})", route.id, resolution.status),
                None => println!("❌ {url} → not found"),
            }
            println!("{}", resolution.html);
            Ok(())
        }
        Commands::Watch { config, routing } => {
            let overrides = ConfigOverrides::from(routing);
            if let Err(e) = rebuild(config, &overrides) {
                warn!(error = %format!("{e:#}"), "Initial build failed; waiting for changes");
                eprintln!("⚠️  Initial build failed: {e:#}");
            }
            let _watcher = watch_config(config, overrides, |result| match result {
                Ok(summary) => println!("✅ Rebuilt {} routes", summary.routes.total()),
                Err(e) => eprintln!("⚠️  Rebuild failed: {e:#}"),
            })
            .with_context(|| format!("Failed to watch {config:?}"))?;
            loop {
                std::thread::park();
            }
        }
    }
}

/// Run a built site's router against `url`.
pub fn resolve_url(dest: &Path, url: &str, stored: Option<&str>) -> anyhow::Result<Resolution> {
    let artifact = load_artifact(dest)?;
    let mut location = LocationSnapshot::parse(url).with_context(|| format!("Invalid URL '{url}'"))?;
    if let Some(stored) = stored {
        location = location.with_stored_route(stored);
    }
    let mut router = Router::new(
        artifact,
        MiniJinjaPartials::new(),
        HtmlBuffer::new(),
        ContentStore::new(dest),
    );
    let status = router.navigate(&location)?;
    Ok(Resolution {
        status,
        route: router.current_route().cloned(),
        html: router.renderer().container().html().to_string(),
    })
}

/// Render the route table as aligned columns.
#[must_use]
pub fn format_routes(table: &RouteTable) -> String {
    let rows: Vec<[String; 4]> = table
        .iter()
        .map(|r| {
            [
                r.id.clone(),
                r.path.clone(),
                r.content_path.clone().unwrap_or_else(|| "-".to_string()),
                r.source_type.to_string(),
            ]
        })
        .collect();
    let header = ["ID", "PATH", "CONTENT", "SOURCE"].map(str::to_string);
    let mut widths = header.each_ref().map(String::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }
    let mut out = String::new();
    for row in std::iter::once(&header).chain(&rows) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
