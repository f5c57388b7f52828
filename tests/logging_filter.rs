use rundag::cli::LogLevel;
use rundag::logging::build_filter;
use tracing::level_filters::LevelFilter;

#[test]
fn cli_level_wins_over_environment() {
    let filter = build_filter(Some(LogLevel::Warn), Some("trace"));

    assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
}

#[test]
fn environment_directives_are_used_without_cli_level() {
    let filter = build_filter(None, Some("rundag::dag=debug,info"));

    assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
}

#[test]
fn missing_or_broken_environment_falls_back_to_info() {
    for env in [None, Some(""), Some("   "), Some("rundag=loud")] {
        let filter = build_filter(None, env);
        assert_eq!(
            filter.max_level_hint(),
            Some(LevelFilter::INFO),
            "RUNDAG_LOG={env:?}"
        );
    }
}
