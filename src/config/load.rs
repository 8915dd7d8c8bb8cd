use super::types::{normalize_base, BuildConfig, ConfigFile, ConfigOverrides, RoutingConfig};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parse a configuration file, choosing YAML or JSON by extension.
pub fn parse_config_file(path: &Path) -> anyhow::Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {path:?}"))?;
    let is_yaml = path
        .extension()
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);
    let file = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML config {path:?}"))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON config {path:?}"))?
    };
    Ok(file)
}

/// Load a configuration file and apply command-line overrides.
///
/// Relative source paths are resolved against the directory holding the
/// configuration file.
pub fn load_config(path: &Path, overrides: &ConfigOverrides) -> anyhow::Result<BuildConfig> {
    let file = parse_config_file(path)?;
    let root_dir = path
        .parent()
        .map(Path::to_path_buf)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from("."));
    let config = resolve_config(file, overrides, root_dir);
    debug!(
        config = ?path,
        method = %config.routing.method,
        server = %config.routing.server,
        case_sensitive = config.routing.case_sensitive,
        base = %config.routing.base,
        "Loaded build configuration"
    );
    Ok(config)
}

/// Merge a parsed file with overrides into the immutable build configuration.
#[must_use]
pub fn resolve_config(file: ConfigFile, overrides: &ConfigOverrides, root_dir: PathBuf) -> BuildConfig {
    let defaults = RoutingConfig::default();
    let app = file.app;

    let routing = RoutingConfig {
        method: overrides
            .method
            .or(app.routing.method)
            .unwrap_or(defaults.method),
        case_sensitive: overrides
            .case_sensitive
            .or(app.routing.case_sensitive)
            .unwrap_or(defaults.case_sensitive),
        server: overrides.server.or(app.server).unwrap_or(defaults.server),
        base: normalize_base(
            overrides
                .base
                .as_deref()
                .or(app.base.as_deref())
                .unwrap_or(&defaults.base),
        ),
        entrance: overrides
            .entrance
            .clone()
            .or(app.entrance)
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or(defaults.entrance),
        root_document: app
            .root_document
            .map(|d| d.trim().trim_matches('/').to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or(defaults.root_document),
    };

    let dest = overrides
        .dest
        .clone()
        .or(file.dest)
        .map(|d| if d.is_relative() { root_dir.join(d) } else { d })
        .unwrap_or_else(|| root_dir.join("site"));

    BuildConfig {
        title: app.title.unwrap_or_else(|| "Documentation".to_string()),
        routing,
        api: file.api,
        content: file.content,
        root_dir,
        dest,
    }
}
