use docsite::cli::resolve_url;
use docsite::config::{load_config, ConfigOverrides, RoutingMethod, ServerType};
use docsite::route::{RouteType, BOOTSTRAP_SCRIPT};
use docsite::runtime::RenderStatus;
use docsite::site::{build_site, load_artifact};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = r#"
app:
  title: Acme
  base: /docs/
  entrance: content:readme
  server: github
  routing:
    method: path
    case_sensitive: false
api:
  - sources: [ doc/core.json ]
  - name: web
    sources: [ doc/web.json ]
content:
  - path: README.md
  - path: docs/guide.html
    name: Guide
dest: out
"#;

fn project(config: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("doc")).unwrap();
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::write(root.join("doc/core.json"), r#"[{"name": "Core", "kind": "module"}]"#).unwrap();
    fs::write(root.join("doc/web.json"), r#"{"name": "Widget", "description": "Renders things"}"#).unwrap();
    fs::write(root.join("README.md"), "# Hello <world>").unwrap();
    fs::write(root.join("docs/guide.html"), "<h1>Guide</h1>").unwrap();
    fs::write(root.join("docsite.yaml"), config).unwrap();
    dir
}

fn build(dir: &TempDir) -> std::path::PathBuf {
    let config = load_config(&dir.path().join("docsite.yaml"), &ConfigOverrides::default()).unwrap();
    assert_eq!(config.routing.method, RoutingMethod::Path);
    assert_eq!(config.routing.server, ServerType::Github);
    let summary = build_site(&config).unwrap();
    assert_eq!(summary.routes.api, 2);
    assert_eq!(summary.routes.content, 2);
    assert_eq!(summary.fragments, 2);
    summary.dest
}

fn assert_files(dest: &Path, files: &[&str]) {
    for file in files {
        assert!(dest.join(file).is_file(), "missing {file}");
    }
}

#[test]
fn test_build_writes_complete_site() {
    let dir = project(CONFIG);
    let dest = build(&dir);
    assert_eq!(dest, dir.path().join("out"));
    assert_files(
        &dest,
        &[
            "index.html",
            BOOTSTRAP_SCRIPT,
            "content/readme.html",
            "content/guide.html",
            "api/index.html",
            "api/web/index.html",
            "readme/index.html",
            "guide/index.html",
            "404.html",
        ],
    );

    let shell = fs::read_to_string(dest.join("index.html")).unwrap();
    assert!(shell.contains("sessionStorage.getItem(\"docsite:redirect\")"));
    assert!(shell.contains("history.replaceState(null, \"\", \"/docs/\" + stored)"));

    let artifact = load_artifact(&dest).unwrap();
    assert_eq!(artifact.title, "Acme");
    assert_eq!(artifact.routing.base, "/docs/");
    let ids: Vec<_> = artifact.routes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["api:_def_", "api:web", "content:readme", "content:guide"]);
    assert_eq!(
        artifact.routes.get(RouteType::Content, "guide").map(|r| r.path.as_str()),
        Some("guide/")
    );
}

#[test]
fn test_built_site_resolves_locations() {
    let dir = project(CONFIG);
    let dest = build(&dir);

    let entrance = resolve_url(&dest, "/docs/", None).unwrap();
    assert_eq!(entrance.status, RenderStatus::Rendered);
    assert_eq!(entrance.route.map(|r| r.id), Some("content:readme".to_string()));
    assert!(entrance.html.contains("Hello &lt;world&gt;"));

    let guide = resolve_url(&dest, "https://example.com/docs/GUIDE/", None).unwrap();
    assert_eq!(guide.route.map(|r| r.id), Some("content:guide".to_string()));
    assert!(guide.html.contains("<h1>Guide</h1>"));

    let restored = resolve_url(&dest, "/docs/index.html", Some("api/web/")).unwrap();
    assert_eq!(restored.route.map(|r| r.id), Some("api:web".to_string()));
    assert!(restored.html.contains("<h2>Widget</h2>"));
    assert!(restored.html.contains("Renders things"));

    let missing = resolve_url(&dest, "/docs/nowhere/", None).unwrap();
    assert_eq!(missing.status, RenderStatus::NotFound);
    assert!(missing.route.is_none());
    assert!(missing.html.contains("docsite-404"));
}

#[test]
fn test_duplicate_names_abort_before_output() {
    let config = r#"
app:
  routing:
    case_sensitive: false
content:
  - path: CHANGELOG.md
  - path: docs/changelog.html
dest: out
"#;
    let dir = project(config);
    fs::write(dir.path().join("CHANGELOG.md"), "1.0").unwrap();
    fs::write(dir.path().join("docs/changelog.html"), "<p>1.0</p>").unwrap();

    let build_config = load_config(&dir.path().join("docsite.yaml"), &ConfigOverrides::default()).unwrap();
    let err = build_site(&build_config).unwrap_err();
    assert!(format!("{err:#}").contains("content:changelog"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_incompatible_artifact_is_rejected() {
    let dir = project(CONFIG);
    let dest = build(&dir);
    let script_path = dest.join(BOOTSTRAP_SCRIPT);
    let script = fs::read_to_string(&script_path).unwrap();
    assert!(script.contains("\"schemaVersion\":1"));
    fs::write(&script_path, script.replace("\"schemaVersion\":1", "\"schemaVersion\":99")).unwrap();

    let err = resolve_url(&dest, "/docs/", None).unwrap_err();
    assert!(format!("{err:#}").contains("schema version 99"));
}

#[test]
fn test_overrides_switch_to_query_routing() {
    let dir = project(CONFIG);
    let overrides = ConfigOverrides {
        method: Some(RoutingMethod::Query),
        ..ConfigOverrides::default()
    };
    let config = load_config(&dir.path().join("docsite.yaml"), &overrides).unwrap();
    let summary = build_site(&config).unwrap();
    assert!(summary.scaffold.written.is_empty());
    assert!(!summary.dest.join("api").exists());

    let web = resolve_url(&summary.dest, "/docs/?api=WEB", None).unwrap();
    assert_eq!(web.route.map(|r| r.id), Some("api:web".to_string()));
}
