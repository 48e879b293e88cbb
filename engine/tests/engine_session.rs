// engine/tests/engine_session.rs
//
// End-to-end sessions: TOML config on disk, sample dictionaries, selection
// learning persisted across engine instances.

use std::fs;
use std::path::{Path, PathBuf};

use hanzi_engine::{Charset, ImeEngine, ImeError, SchemeKind};

fn dicts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("dicts")
}

fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let path = dir.join("hanzi-ime.toml");
    let prefs = dir.join("prefs.json");
    let text = format!(
        "charset = \"simplified\"\ndict_dir = {:?}\npreferences_path = {:?}\n{extra}",
        dicts_dir().display().to_string(),
        prefs.display().to_string(),
    );
    fs::write(&path, text).expect("write config");
    path
}

#[test]
fn learned_selection_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), "");

    let mut engine = ImeEngine::new();
    engine.initialize(&config).expect("init");
    assert_eq!(engine.charset().unwrap(), Charset::Simplified);

    let first = engine.process_input("nihao", "").unwrap();
    assert_eq!(first[0].text, "你好");
    assert_eq!(first[1].text, "你号");
    engine.select_candidate(1).unwrap();
    assert!(engine.save_preferences().unwrap());

    let mut restarted = ImeEngine::new();
    restarted.initialize(&config).expect("init again");
    let again = restarted.process_input("nihao", "").unwrap();
    assert_eq!(again[0].text, "你号");
}

#[test]
fn config_selects_default_scheme() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), "default_scheme = \"bopomofo\"\n");
    let mut engine = ImeEngine::new();
    engine.initialize(&config).expect("init");
    assert_eq!(engine.current_scheme().unwrap(), SchemeKind::Bopomofo);

    let out = engine.process_input("ㄉㄧㄢㄋㄠ", "").unwrap();
    assert_eq!(out[0].text, "电脑");
}

#[test]
fn missing_config_means_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut engine = ImeEngine::new();
    engine.initialize(dir.path().join("absent.toml")).expect("init");
    assert!(engine.is_initialized());
    assert_eq!(engine.charset().unwrap(), Charset::Traditional);
    assert_eq!(engine.current_scheme().unwrap(), SchemeKind::Pinyin);
    assert!(!engine.save_preferences().unwrap());
}

#[test]
fn malformed_config_leaves_engine_uninitialized() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "charset = [1, 2").expect("write");
    let mut engine = ImeEngine::new();
    assert!(matches!(engine.initialize(&path), Err(ImeError::Config(_))));
    assert!(matches!(engine.process_input("ni", ""), Err(ImeError::Uninitialized)));
}

#[test]
fn disabled_scheme_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), "enabled_schemes = [\"pinyin\"]\n");
    let mut engine = ImeEngine::new();
    engine.initialize(&config).expect("init");
    assert!(matches!(engine.set_scheme("bopomofo"), Err(ImeError::UnknownScheme(_))));
    assert!(matches!(
        engine.process_cross_input("ㄋㄧ", "", "bopomofo", "traditional"),
        Err(ImeError::UnknownScheme(_))
    ));
}
