use std::time::Duration;

use webroot::config::{Config, ServerConfig, StaticFilesConfig};

#[test]
fn test_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.server.read_timeout_secs, 5);
    assert_eq!(cfg.static_files.doc_root, "./public");
    assert_eq!(cfg.static_files.index_file, "index.html");
}

#[test]
fn test_read_timeout_conversion() {
    let cfg = Config {
        server: ServerConfig {
            listen_addr: "127.0.0.1:0".to_string(),
            read_timeout_secs: 2,
        },
        static_files: StaticFilesConfig::default(),
    };

    assert_eq!(cfg.read_timeout(), Duration::from_secs(2));
}

#[test]
fn test_yaml_file_partial_override() {
    let yaml = "server:\n  listen_addr: \"0.0.0.0:3000\"\nstatic_files:\n  doc_root: \"/srv/www\"\n";
    let cfg: Config = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.static_files.doc_root, "/srv/www");
    // Unspecified fields keep their defaults.
    assert_eq!(cfg.server.read_timeout_secs, 5);
    assert_eq!(cfg.static_files.index_file, "index.html");
}

// Env-var behavior is covered in one test because tests in this binary run
// in parallel threads sharing the process environment.
#[test]
fn test_load_with_env_overrides() {
    unsafe {
        std::env::set_var("CONFIG", "/nonexistent/webroot-config.yaml");
        std::env::set_var("LISTEN", "0.0.0.0:9999");
        std::env::set_var("DOC_ROOT", "/srv/override");
    }

    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:9999");
    assert_eq!(cfg.static_files.doc_root, "/srv/override");
    // Missing config file falls back to defaults before overrides.
    assert_eq!(cfg.static_files.index_file, "index.html");

    unsafe {
        std::env::remove_var("CONFIG");
        std::env::remove_var("LISTEN");
        std::env::remove_var("DOC_ROOT");
    }
}
