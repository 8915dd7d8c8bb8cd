//! # Site Module
//!
//! The build pipeline: configuration in, deployable site out.
//!
//! 1. [`discover`] lists the documented units.
//! 2. Every unit is registered with the [`RouteTableBuilder`]. Validation
//!    happens here, before anything touches the output directory.
//! 3. Api groups are parsed with a [`DocParser`], content units converted
//!    with a [`ContentConverter`].
//! 4. Output is written: `content/{name}.html` fragments, the bootstrap
//!    script embedding the [`SiteArtifact`], the root document and finally
//!    the host scaffold.

mod collaborators;
mod discover;
mod shell;

pub use collaborators::{BasicConverter, ContentConverter, DocParser, JsonDocParser};
pub use discover::{discover, Unit};
pub use shell::{NavLink, ShellTemplateData};

use crate::builder::{RouteCounts, RouteTableBuilder};
use crate::config::BuildConfig;
use crate::route::{RouteKind, SiteArtifact, BOOTSTRAP_SCRIPT};
use crate::scaffold::{write_scaffold, ScaffoldReport};
use anyhow::Context;
use askama::Template;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// What a build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub dest: PathBuf,
    pub routes: RouteCounts,
    pub fragments: usize,
    pub scaffold: ScaffoldReport,
    pub elapsed: Duration,
}

/// Build the site described by `config` with the default collaborators.
pub fn build_site(config: &BuildConfig) -> anyhow::Result<BuildSummary> {
    build_site_with(config, &JsonDocParser, &BasicConverter)
}

/// Build the site described by `config`.
///
/// Any error aborts the build. Validation errors abort before the output
/// directory is touched.
pub fn build_site_with(
    config: &BuildConfig,
    parser: &dyn DocParser,
    converter: &dyn ContentConverter,
) -> anyhow::Result<BuildSummary> {
    let started = Instant::now();
    let units = discover(config)?;

    let mut builder = RouteTableBuilder::new(config.routing.clone());
    let mut registered = Vec::with_capacity(units.len());
    for unit in &units {
        let route = builder
            .add_route(&unit.name, unit.source_type)
            .with_context(|| format!("Invalid documentation unit {:?}", unit.sources))?;
        registered.push((route.clone(), unit));
    }
    let (table, counts) = builder.finish();

    let mut docs = BTreeMap::new();
    let mut fragments = Vec::new();
    for (route, unit) in &registered {
        match route.kind() {
            RouteKind::Api { group } => {
                docs.insert(group.to_string(), parser.parse(&unit.sources)?);
            }
            RouteKind::Content { content_path } => {
                let source = unit
                    .sources
                    .first()
                    .ok_or_else(|| anyhow::anyhow!("Content unit {} has no source", route.id))?;
                fragments.push((content_path.to_string(), converter.convert(source, unit.source_type)?));
            }
        }
    }

    let dest = &config.dest;
    fs::create_dir_all(dest).with_context(|| format!("Failed to create output directory {dest:?}"))?;

    for (content_path, html) in &fragments {
        write_file(&dest.join(content_path), html)?;
    }

    let shell = ShellTemplateData::new(&config.title, &table, &config.routing)?.render()?;
    let artifact = SiteArtifact::new(config.title.clone(), config.routing.clone(), table, docs);
    let script = artifact.to_bootstrap_script()?;
    let script_path = dest.join(BOOTSTRAP_SCRIPT);
    write_file(&script_path, &script)?;
    println!("✅ Wrote route table → {script_path:?}");

    let root_path = dest.join(&config.routing.root_document);
    write_file(&root_path, &shell)?;
    println!("✅ Wrote root document → {root_path:?}");

    let scaffold = write_scaffold(&artifact.routes, &artifact.routing, dest)?;

    let summary = BuildSummary {
        dest: dest.clone(),
        routes: counts,
        fragments: fragments.len(),
        scaffold,
        elapsed: started.elapsed(),
    };
    info!(
        dest = ?summary.dest,
        api_routes = summary.routes.api,
        content_routes = summary.routes.content,
        fragments = summary.fragments,
        scaffold_written = summary.scaffold.written.len(),
        scaffold_kept = summary.scaffold.kept.len(),
        elapsed_ms = whole_millis(summary.elapsed),
        "Site built"
    );
    Ok(summary)
}

/// Read the artifact of a built site back from its bootstrap script.
pub fn load_artifact(dest: &Path) -> anyhow::Result<SiteArtifact> {
    let path = dest.join(BOOTSTRAP_SCRIPT);
    let script = fs::read_to_string(&path).with_context(|| format!("Failed to read {path:?}"))?;
    SiteArtifact::from_bootstrap_script(&script).with_context(|| format!("Invalid site artifact in {path:?}"))
}

/// Milliseconds in `elapsed`, saturating at `u64::MAX`.
fn whole_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {parent:?}"))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {path:?}"))
}
