// tests/config_env.rs
//
// ENGINE_CONFIG_PATH resolution. Serialized because the tests mutate
// process environment.

use serial_test::serial;
use std::{fs, path::PathBuf};

use evidence_decision_engine::config::{EngineConfig, ENV_ENGINE_CONFIG_PATH};

fn unique_tmp_file(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    dir.push(format!("engine_env_test_{nanos}"));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
#[serial]
fn env_path_override_is_honored() {
    let path = unique_tmp_file("engine.toml");
    fs::write(
        &path,
        "[thresholds]\nweb = 0.9\nrag = 0.1\n\n[merge]\ntopk = 3\n",
    )
    .unwrap();

    std::env::set_var(ENV_ENGINE_CONFIG_PATH, &path);
    let cfg = EngineConfig::from_env_or_default();
    std::env::remove_var(ENV_ENGINE_CONFIG_PATH);

    assert!((cfg.thresholds.web - 0.9).abs() < 1e-6);
    assert!((cfg.thresholds.rag - 0.1).abs() < 1e-6);
    assert_eq!(cfg.merge.topk, 3);

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
#[serial]
fn missing_env_target_falls_back_to_defaults() {
    std::env::set_var(ENV_ENGINE_CONFIG_PATH, "/no/such/engine.toml");
    let cfg = EngineConfig::from_env_or_default();
    std::env::remove_var(ENV_ENGINE_CONFIG_PATH);

    assert!((cfg.thresholds.web - 0.5).abs() < 1e-6);
    assert_eq!(cfg.gate.top_k, 5);
}
