use super::*;
use std::path::Path;

const SAMPLE: &str = r#"
games = 3
log = "rungame"

[white]
kind = "minimax"
depth = 3

[black]
kind = "uct"
time_budget_seconds = 1.5
parallel_strategy = "split-root"
worker_count = 2
"#;

#[test]
fn test_parse_match_file() {
    let config: MatchConfig = toml::from_str(SAMPLE).unwrap();
    assert_eq!(config.games, 3);
    assert_eq!(config.max_plies, None);
    assert_eq!(config.white, AgentSpec::Minimax(MinimaxConfig { depth: 3 }));
    let AgentSpec::Uct(uct) = &config.black else {
        panic!("black should be uct, got {:?}", config.black);
    };
    assert_eq!(uct.time_budget_seconds, 1.5);
    assert_eq!(uct.worker_count, 2);
    assert_eq!(uct.min_tries_per_node, 10);
}

#[test]
fn test_defaults_and_random_agent() {
    let config: MatchConfig = toml::from_str(
        r#"
        [white]
        kind = "random"
        seed = 4

        [black]
        kind = "minimax"
        "#,
    )
    .unwrap();
    assert_eq!(config.games, 1);
    assert_eq!(config.log, None);
    assert_eq!(config.white, AgentSpec::Random(RandomConfig { seed: Some(4) }));
    assert_eq!(config.black, AgentSpec::Minimax(MinimaxConfig::default()));
}

#[test]
fn test_unknown_kind_or_field_is_rejected() {
    let unknown_kind = "[white]\nkind = \"neural\"\n[black]\nkind = \"random\"\n";
    assert!(toml::from_str::<MatchConfig>(unknown_kind).is_err());
    let typo = "[white]\nkind = \"minimax\"\ndeep = 2\n[black]\nkind = \"random\"\n";
    assert!(toml::from_str::<MatchConfig>(typo).is_err());
    let missing_black = "[white]\nkind = \"random\"\n";
    assert!(toml::from_str::<MatchConfig>(missing_black).is_err());
}

#[test]
fn test_command_line_overrides() {
    let mut config: MatchConfig = toml::from_str(SAMPLE).unwrap();
    config.override_with(None, None, None);
    assert_eq!(config.games, 3);
    assert_eq!(config.log.as_deref(), Some(Path::new("rungame")));

    config.override_with(Some(5), Some(PathBuf::from("out/game")), Some(80));
    assert_eq!(config.games, 5);
    assert_eq!(config.max_plies, Some(80));
    assert_eq!(config.log_path(2), Some(PathBuf::from("out/game_2.txt")));
}

#[test]
fn test_invalid_agent_settings_fail_to_build() {
    let spec = AgentSpec::Minimax(MinimaxConfig { depth: 0 });
    assert!(matches!(spec.build(), Err(SearchError::InvalidConfiguration(_))));
    let spec = AgentSpec::Uct(UctConfig::default().with_time_budget(-1.0));
    assert!(spec.build().is_err());
    assert_eq!(AgentSpec::Random(RandomConfig::default()).build().unwrap().name(), "Random");
}

#[test]
fn test_shipped_match_file_parses() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("match.toml");
    let config = MatchConfig::load(&path).unwrap();
    assert!(matches!(config.white, AgentSpec::Minimax(_)));
    assert!(matches!(config.black, AgentSpec::Uct(_)));
}
