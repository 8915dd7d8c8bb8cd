use crate::route::SourceType;
use anyhow::Context;
use minijinja::{context, AutoEscape, Environment};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Turns the sources of one api group into documentation data.
pub trait DocParser {
    fn parse(&self, sources: &[PathBuf]) -> anyhow::Result<Value>;
}

/// Turns one narrative file into an HTML fragment.
pub trait ContentConverter {
    fn convert(&self, path: &Path, source_type: SourceType) -> anyhow::Result<String>;
}

/// Reads pre-extracted JSON symbol dumps.
///
/// Every source holds either an array of symbol records or a single record;
/// the records of all sources are concatenated in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocParser;

impl DocParser for JsonDocParser {
    fn parse(&self, sources: &[PathBuf]) -> anyhow::Result<Value> {
        let mut symbols = Vec::new();
        for source in sources {
            let content = fs::read_to_string(source)
                .with_context(|| format!("Failed to read doc source {source:?}"))?;
            let value: Value = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse doc source {source:?}"))?;
            match value {
                Value::Array(items) => symbols.extend(items),
                other => symbols.push(other),
            }
        }
        Ok(Value::Array(symbols))
    }
}

/// Markup passes through untouched; text is escaped into a `<pre>` block.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicConverter;

impl ContentConverter for BasicConverter {
    fn convert(&self, path: &Path, source_type: SourceType) -> anyhow::Result<String> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read content source {path:?}"))?;
        match source_type {
            SourceType::Markup => Ok(source),
            SourceType::Text => {
                let mut env = Environment::new();
                env.set_auto_escape_callback(|_| AutoEscape::Html);
                let html = env
                    .render_str(r#"<pre class="docsite-text">{{ text }}</pre>"#, context! { text => source })
                    .with_context(|| format!("Failed to convert {path:?}"))?;
                Ok(html)
            }
            SourceType::Doc => anyhow::bail!("{path:?} is a doc source, not content"),
        }
    }
}
