//! XML config loading and RENAMER_CONFIG handling, without touching user state.

use serial_test::serial;
use std::fs;
use tempfile::tempdir;

use renamer::config::{CONFIG_ENV, LoadResult, default_config_path, default_log_path, load_or_init};
use renamer::{LogLevel, load_config_from_xml_path};

struct EnvGuard;

impl EnvGuard {
    fn set(value: &std::path::Path) -> Self {
        unsafe { std::env::set_var(CONFIG_ENV, value) };
        EnvGuard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe { std::env::remove_var(CONFIG_ENV) };
    }
}

#[test]
fn reads_every_field() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    let log = td.path().join("renamer.log");
    let stage = td.path().join("stage");
    fs::write(
        &cfg_path,
        format!(
            r#"
<config>
  <from_separator>_</from_separator>
  <to_separator>space</to_separator>
  <delete_duplicates>true</delete_duplicates>
  <shortcut_suffix>" - Link.lnk"</shortcut_suffix>
  <log_level>debug</log_level>
  <log_file>{}</log_file>
  <sweep_skip>.git, vendor</sweep_skip>
  <sweep_targets>bin,obj</sweep_targets>
  <staging_trash>{}</staging_trash>
</config>
"#,
            log.display(),
            stage.display()
        ),
    )
    .unwrap();

    let cfg = load_config_from_xml_path(&cfg_path).unwrap();

    assert_eq!((cfg.from_separator, cfg.to_separator), ('_', ' '));
    assert!(cfg.delete_duplicates);
    assert_eq!(cfg.shortcut_suffix, " - Link.lnk");
    assert_eq!(cfg.log_level, LogLevel::Debug);
    assert_eq!(cfg.log_file.as_deref(), Some(log.as_path()));
    assert_eq!(cfg.sweep_skip, vec![".git".to_string(), "vendor".to_string()]);
    assert_eq!(cfg.sweep_targets, vec!["bin".to_string(), "obj".to_string()]);
    assert_eq!(cfg.staging_trash.as_deref(), Some(stage.as_path()));
}

#[test]
fn missing_fields_keep_defaults() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><delete_duplicates>true</delete_duplicates></config>").unwrap();

    let cfg = load_config_from_xml_path(&cfg_path).unwrap();

    assert!(cfg.delete_duplicates);
    assert_eq!((cfg.from_separator, cfg.to_separator), (' ', '-'));
    assert_eq!(cfg.shortcut_suffix, " - Shortcut.lnk");
    assert_eq!(cfg.log_file, None);
}

#[test]
fn unknown_and_malformed_input_fail() {
    let td = tempdir().unwrap();
    let unknown = td.path().join("unknown.xml");
    fs::write(&unknown, "<config><download_base>/x</download_base></config>").unwrap();
    assert!(load_config_from_xml_path(&unknown).is_err());

    let broken = td.path().join("broken.xml");
    fs::write(&broken, "<config><log_level>debug</config>").unwrap();
    assert!(load_config_from_xml_path(&broken).is_err());

    let bad_level = td.path().join("level.xml");
    fs::write(&bad_level, "<config><log_level>loud</log_level></config>").unwrap();
    assert!(load_config_from_xml_path(&bad_level).is_err());
}

#[test]
#[serial]
fn env_path_is_used_and_never_templated() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("custom.xml");
    let _env = EnvGuard::set(&cfg_path);

    assert_eq!(default_config_path().unwrap(), cfg_path);
    assert!(matches!(load_or_init().unwrap(), LoadResult::Missing(p) if p == cfg_path));
    assert!(!cfg_path.exists());

    fs::write(&cfg_path, "<config><to_separator>.</to_separator></config>").unwrap();
    match load_or_init().unwrap() {
        LoadResult::Loaded { path, config } => {
            assert_eq!(path, cfg_path);
            assert_eq!(config.to_separator, '.');
        }
        other => panic!("expected Loaded, got {other:?}"),
    }
}

#[test]
#[serial]
fn env_directory_means_config_xml_inside() {
    let td = tempdir().unwrap();
    let _env = EnvGuard::set(td.path());

    assert_eq!(default_config_path().unwrap(), td.path().join("config.xml"));
    assert_eq!(default_log_path().unwrap(), td.path().join("renamer.log"));
}
