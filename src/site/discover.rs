use crate::config::BuildConfig;
use crate::route::SourceType;
use std::path::PathBuf;
use tracing::debug;

/// One documented unit, ready to be registered as a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Raw route name; empty for the default api group.
    pub name: String,
    pub source_type: SourceType,
    /// Resolved source files. Content units have exactly one.
    pub sources: Vec<PathBuf>,
}

/// List the units of a build in discovery order: api groups first, then
/// content, each in configuration order.
pub fn discover(config: &BuildConfig) -> anyhow::Result<Vec<Unit>> {
    let mut units = Vec::with_capacity(config.api.len() + config.content.len());

    for group in &config.api {
        units.push(Unit {
            name: group.name.clone().unwrap_or_default(),
            source_type: SourceType::Doc,
            sources: group
                .sources
                .iter()
                .map(|s| config.root_dir.join(s))
                .collect(),
        });
    }

    for entry in &config.content {
        let source_type = SourceType::for_content_file(&entry.path).ok_or_else(|| {
            anyhow::anyhow!(
                "Unsupported content file {:?}: expected .md, .markdown, .txt, .html or .htm",
                entry.path
            )
        })?;
        let name = match &entry.name {
            Some(name) => name.clone(),
            None => entry
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("Cannot derive a route name from {:?}", entry.path))?,
        };
        units.push(Unit {
            name,
            source_type,
            sources: vec![config.root_dir.join(&entry.path)],
        });
    }

    debug!(units_count = units.len(), "Discovered documentation units");
    Ok(units)
}
