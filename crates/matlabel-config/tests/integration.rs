use std::fs;

use matlabel_config::{AppConfig, ConfigError, ENV_HOST_PAPER, load_with_env, read_file};
use matlabel_layout::{Alignment, HostPaper, ScaleMode};

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn partial_file_keeps_defaults_for_missing_fields() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("matlabel.json");
    fs::write(
        &path,
        r#"{
            "database": { "url": "sqlite://plant.db" },
            "typography": { "description_max": 40, "alignment": "left" },
            "host": { "paper": "A4", "scale": "noscale" }
        }"#,
    )?;

    let config = load_with_env(Some(path.as_path()), no_env)?;
    assert_eq!(config.database.url, "sqlite://plant.db");
    assert_eq!(config.typography.description_max, 40);
    assert_eq!(config.typography.description_min, 28);
    assert_eq!(config.typography.alignment, Alignment::Left);
    assert_eq!(config.label, AppConfig::default().label);

    let host = config.host_setup()?;
    assert_eq!(host.paper, HostPaper::A4);
    assert_eq!(host.scale, ScaleMode::NoScale);

    let layout = config.layout()?;
    assert_eq!(layout.typography().description_sizes.max, 40);
    Ok(())
}

#[test]
fn environment_beats_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("matlabel.json");
    fs::write(&path, r#"{ "host": { "paper": "A4" } }"#)?;

    let config = load_with_env(Some(path.as_path()), |key| {
        (key == ENV_HOST_PAPER).then(|| "Letter".to_string())
    })?;
    assert_eq!(config.host_setup()?.paper, HostPaper::Letter);
    Ok(())
}

#[test]
fn unknown_keys_and_bad_json_are_parse_errors() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let typo = dir.path().join("typo.json");
    fs::write(&typo, r#"{ "hosts": {} }"#)?;
    assert!(matches!(read_file(&typo), Err(ConfigError::Parse { .. })));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json")?;
    assert!(matches!(read_file(&broken), Err(ConfigError::Parse { .. })));
    Ok(())
}

#[test]
fn file_values_are_validated() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("matlabel.json");
    fs::write(&path, r#"{ "typography": { "code_min": 0 } }"#)?;
    let err = load_with_env(Some(path.as_path()), no_env)
        .err()
        .ok_or("expected validation failure")?;
    assert!(matches!(
        err,
        ConfigError::InvalidField { ref section, ref field, .. }
            if section == "typography" && field == "code_max"
    ));
    Ok(())
}
