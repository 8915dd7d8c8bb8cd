use askama::Template;
use std::fs;
use std::path::Path;

use anyhow::Context;

/// `sessionStorage` key the redirect documents store the requested path under.
pub const REDIRECT_STORAGE_KEY: &str = "docsite:redirect";

/// Template data for a client-side redirect back to the root document.
#[derive(Template)]
#[template(path = "redirect.html")]
pub struct RedirectTemplateData {
    /// Link text and document title
    pub title: String,
    /// Storage key for the requested route path
    pub storage_key: String,
    /// JavaScript expression producing the path to restore
    pub stored_path_js: String,
    /// Root document URL as a JavaScript string literal
    pub root_url_js: String,
    /// Root document URL for the meta refresh and fallback link
    pub root_url: String,
}

/// Template data for Apache `.htaccess` rewrite rules.
#[derive(Template)]
#[template(path = "htaccess.txt", escape = "none")]
pub struct HtaccessTemplateData {
    /// Application base path
    pub base: String,
    /// Root document file name
    pub root_document: String,
    /// Root document name escaped for a regex
    pub root_document_pattern: String,
}

/// Template data for IIS `web.config` rewrite rules.
#[derive(Template)]
#[template(path = "web.config.xml", escape = "none")]
pub struct WebConfigTemplateData {
    /// Application base path
    pub base: String,
    /// Root document file name
    pub root_document: String,
}

/// Quote a string as a JavaScript literal.
pub fn js_string(value: &str) -> anyhow::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Write a redirect document unless one already exists at `path`.
///
/// Returns `false` when an existing document was kept.
pub fn write_redirect(path: &Path, stored_path_js: &str, root_url: &str) -> anyhow::Result<bool> {
    if path.exists() {
        println!("⚠️  Keeping existing document: {path:?}");
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create scaffold directory {parent:?}"))?;
    }
    let rendered = RedirectTemplateData {
        title: "Redirecting".to_string(),
        storage_key: REDIRECT_STORAGE_KEY.to_string(),
        stored_path_js: stored_path_js.to_string(),
        root_url_js: js_string(root_url)?,
        root_url: root_url.to_string(),
    }
    .render()?;
    fs::write(path, rendered).with_context(|| format!("Failed to write redirect {path:?}"))?;
    Ok(true)
}

/// Write `.htaccess` into `dir`.
pub fn write_htaccess(dir: &Path, base: &str, root_document: &str) -> anyhow::Result<()> {
    let rendered = HtaccessTemplateData {
        base: base.to_string(),
        root_document: root_document.to_string(),
        root_document_pattern: regex::escape(root_document),
    }
    .render()?;
    let path = dir.join(".htaccess");
    fs::write(&path, rendered).with_context(|| format!("Failed to write {path:?}"))?;
    println!("✅ Wrote rewrite rules → {path:?}");
    Ok(())
}

/// Write `web.config` into `dir`.
pub fn write_web_config(dir: &Path, base: &str, root_document: &str) -> anyhow::Result<()> {
    let rendered = WebConfigTemplateData {
        base: base.to_string(),
        root_document: root_document.to_string(),
    }
    .render()?;
    let path = dir.join("web.config");
    fs::write(&path, rendered).with_context(|| format!("Failed to write {path:?}"))?;
    println!("✅ Wrote rewrite rules → {path:?}");
    Ok(())
}
