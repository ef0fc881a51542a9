use super::*;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_when_nothing_is_set() {
    let config = AppConfig::from_lookup(lookup(&[])).unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.bind_addr, "127.0.0.1:8080");
    assert_eq!(config.reply_delay, Duration::from_millis(200));
    assert_eq!(config.scoring, Scoring::Standard);
}

#[test]
fn reads_every_variable() {
    let config = AppConfig::from_lookup(lookup(&[
        ("CHESS_BIND_ADDR", "0.0.0.0:9000"),
        ("CHESS_STATIC_DIR", "/srv/chess"),
        ("CHESS_REPLY_DELAY_MS", "50"),
        ("CHESS_SCORING", "side-to-move-loses"),
    ]))
    .unwrap();

    assert_eq!(config.bind_addr, "0.0.0.0:9000");
    assert_eq!(config.static_dir, PathBuf::from("/srv/chess"));
    assert_eq!(config.reply_delay, Duration::from_millis(50));
    assert_eq!(config.scoring, Scoring::SideToMoveLoses);
}

#[test]
fn rejects_bad_delay() {
    let err = AppConfig::from_lookup(lookup(&[("CHESS_REPLY_DELAY_MS", "soon")])).unwrap_err();

    assert_eq!(err.variable, "CHESS_REPLY_DELAY_MS");
    assert!(err.to_string().contains("soon"));
}

#[test]
fn rejects_unknown_scoring() {
    let err = AppConfig::from_lookup(lookup(&[("CHESS_SCORING", "lenient")])).unwrap_err();

    assert_eq!(err.variable, "CHESS_SCORING");
}

#[test]
fn rejects_blank_bind_addr() {
    assert!(AppConfig::from_lookup(lookup(&[("CHESS_BIND_ADDR", "  ")])).is_err());
}
