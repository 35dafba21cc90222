use std::collections::HashMap;

use tidewire::config::{DEFAULT_LISTEN_ADDR, DEFAULT_MAX_FRAME_LEN};
use tidewire::{ServerConfig, TidewireError};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_listen_on_kafka_port() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:9092");
    assert_eq!(cfg.listen_addr, DEFAULT_LISTEN_ADDR);
    assert_eq!(cfg.max_frame_len, DEFAULT_MAX_FRAME_LEN);
    assert!(cfg.admin_addr.is_none());
}

#[test]
fn environment_overrides_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("TIDEWIRE_ADDR", "127.0.0.1:19092"),
        ("TIDEWIRE_MAX_FRAME_BYTES", "4096"),
        ("TIDEWIRE_ADMIN_ADDR", "127.0.0.1:9644"),
    ]))
    .unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:19092");
    assert_eq!(cfg.max_frame_len, 4096);
    assert_eq!(cfg.admin_addr.as_deref(), Some("127.0.0.1:9644"));
}

#[test]
fn blank_values_keep_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("TIDEWIRE_ADDR", " "),
        ("TIDEWIRE_ADMIN_ADDR", ""),
    ]))
    .unwrap();
    assert_eq!(cfg.listen_addr, DEFAULT_LISTEN_ADDR);
    assert!(cfg.admin_addr.is_none());
}

#[test]
fn invalid_max_frame_bytes_is_rejected() {
    for bad in ["0", "-5", "lots"] {
        let err = ServerConfig::from_lookup(lookup(&[("TIDEWIRE_MAX_FRAME_BYTES", bad)]))
            .unwrap_err();
        assert!(matches!(err, TidewireError::Config(_)), "{}", bad);
    }
}
