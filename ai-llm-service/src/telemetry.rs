use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Targets emitted by the workspace crates (plus HTTP tracing from `tower_http`).
pub const WORKSPACE_TARGETS: &[&str] = &[
    "rag_qa_backend",
    "api",
    "qa_chain",
    "rag_store",
    "ai_llm_service",
    "tower_http",
];

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        // Keep timestamps compact: no fractional seconds, Z-suffix
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Formatting layer that renders only events emitted by the workspace crates.
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format with `file:line` and target
/// - Span close events (duration of instrumented provider calls)
/// - ANSI colors only when stdout is a terminal
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();

    let only_workspace = filter::filter_fn(|meta| {
        WORKSPACE_TARGETS
            .iter()
            .any(|prefix| meta.target().starts_with(prefix))
    });

    fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
        .with_filter(only_workspace)
}

/// Level directive for every workspace crate, e.g. `qa_chain=debug`.
pub fn level_directives(level: Level) -> Vec<Directive> {
    let lvl = level.as_str().to_lowercase();
    WORKSPACE_TARGETS
        .iter()
        .filter_map(|target| Directive::from_str(&format!("{target}={lvl}")).ok())
        .collect()
}

/// `EnvFilter` from `RUST_LOG` when set; otherwise `default` with `level`
/// applied to the workspace crates.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_directives(level)
            .into_iter()
            .fold(EnvFilter::new(default), |f, d| f.add_directive(d)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_every_workspace_crate() {
        let ds = level_directives(Level::DEBUG);
        assert_eq!(ds.len(), WORKSPACE_TARGETS.len());
        assert!(ds.iter().any(|d| d.to_string() == "qa_chain=debug"));
    }
}
