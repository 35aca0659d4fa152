//! Config files on disk: loading, validation failures, registry lookups.

use std::path::Path;

use profile_chooser_core::{
    load_config, ConfigError, IniProfileDirectory, ProfileDirectory, PROFILES_INI,
};

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn loads_config_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "chooser.yml",
        r#"
firefox_binary_path: /opt/firefox/firefox
firefox_config_dir: /home/u/.mozilla/firefox
deciders:
  - rule: { type: url_search_regex, pattern: "^https://(www\\.)?youtube\\.com" }
    opener: { type: ask_from_list, profiles: [media, default] }
  - rule: { type: match_all }
    opener: { type: fixed, profile: default }
"#,
    );

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.engine.rules().len(), 2);
    assert_eq!(
        loaded.engine.settings().binary_path,
        Path::new("/opt/firefox/firefox")
    );
}

#[test]
fn unknown_rule_type_fails_before_anything_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "bad.yml",
        r#"
browser_binary_path: firefox
profiles_dir: /p
deciders:
  - rule: { type: unknown_type }
    opener: { type: fixed, profile: default }
"#,
    );

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
}

#[test]
fn invalid_regex_names_the_rule() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "bad-regex.yml",
        r#"
browser_binary_path: firefox
profiles_dir: /p
deciders:
  - rule: { type: match_all }
    opener: { type: ask_any }
  - rule: { type: url_search_regex, pattern: "([a-z" }
    opener: { type: ask_any }
"#,
    );

    match load_config(&path).unwrap_err() {
        ConfigError::InvalidPattern { rule_index, .. } => assert_eq!(rule_index, 1),
        other => panic!("expected InvalidPattern, got {other:?}"),
    }
}

#[test]
fn empty_ask_from_list_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "empty.yml",
        r#"
browser_binary_path: firefox
profiles_dir: /p
deciders:
  - rule: { type: match_all }
    opener: { type: ask_from_list, profiles: [] }
"#,
    );

    assert!(matches!(
        load_config(&path),
        Err(ConfigError::EmptyProfileList { rule_index: 0 })
    ));
}

#[test]
fn yaml_syntax_error_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "broken.yml", "deciders: [\n  - rule: {");
    assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn registry_next_to_config_is_listed() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        PROFILES_INI,
        "[Profile0]\nName=default\n\n[Profile1]\nName=work\n\n[Profile2]\nName=work\n",
    );

    let names = IniProfileDirectory.list_profiles(dir.path()).unwrap();
    assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["default", "work"]);
}
