use docsite::config::ConfigOverrides;
use docsite::watch::{rebuild, watch_config, DEBOUNCE};
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const CONFIG_V1: &str = "content:\n  - path: a.md\ndest: out\n";
const CONFIG_V2: &str = "content:\n  - path: a.md\n  - path: b.md\ndest: out\n";

type Results = Arc<Mutex<Vec<Result<usize, String>>>>;

fn record(results: &Results) -> impl FnMut(&anyhow::Result<docsite::site::BuildSummary>) + Send + 'static {
    let sink = Arc::clone(results);
    move |result| {
        let entry = match result {
            Ok(summary) => Ok(summary.routes.content),
            Err(e) => Err(format!("{e:#}")),
        };
        sink.lock().unwrap().push(entry);
    }
}

fn wait_for_last(results: &Results, expected: &Result<usize, String>) -> bool {
    for _ in 0..50 {
        if results.lock().unwrap().last() == Some(expected) {
            return true;
        }
        std::thread::sleep(DEBOUNCE / 2);
    }
    false
}

fn project() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.md"), "A").unwrap();
    fs::write(dir.path().join("b.md"), "B").unwrap();
    let config_path = dir.path().join("docsite.yaml");
    fs::write(&config_path, CONFIG_V1).unwrap();
    (dir, config_path)
}

#[test]
fn test_watch_rebuilds_on_config_change() {
    let (dir, config_path) = project();
    let first = rebuild(&config_path, &ConfigOverrides::default()).unwrap();
    assert_eq!(first.routes.content, 1);

    let results: Results = Arc::new(Mutex::new(Vec::new()));
    let watcher = watch_config(&config_path, ConfigOverrides::default(), record(&results)).expect("watch_config");
    std::thread::sleep(Duration::from_millis(100));

    fs::write(&config_path, CONFIG_V2).unwrap();
    assert!(wait_for_last(&results, &Ok(2)), "got {:?}", results.lock().unwrap());
    assert!(dir.path().join("out/content/b.html").is_file());
    drop(watcher);
}

#[test]
fn test_watch_builds_last_save_of_a_burst() {
    let (dir, config_path) = project();
    let results: Results = Arc::new(Mutex::new(Vec::new()));
    let watcher = watch_config(&config_path, ConfigOverrides::default(), record(&results)).expect("watch_config");
    std::thread::sleep(Duration::from_millis(100));

    // A half-written save followed quickly by the complete one.
    fs::write(&config_path, "content:\n  - path: [").unwrap();
    std::thread::sleep(Duration::from_millis(50));
    fs::write(&config_path, CONFIG_V2).unwrap();

    assert!(wait_for_last(&results, &Ok(2)), "got {:?}", results.lock().unwrap());
    assert!(dir.path().join("out/content/b.html").is_file());
    drop(watcher);
}

#[test]
fn test_watch_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = watch_config(dir.path().join("absent.yaml"), ConfigOverrides::default(), |_| {});
    assert!(result.is_err());
}
