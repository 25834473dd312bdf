//! Colorful console output for fairslot search events.
//!
//! Provides a custom `tracing` layer that renders option generation and
//! combination search events as single colored lines.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (generation, search start/end, new bests,
//!   periodic progress)
//! - **DEBUG**: Ties with the best score, worker completion
//! - **TRACE**: Rejected orderings (only with `show_failure_reasons`)

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SEARCH_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "verbose-logging")]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::DEBUG;
#[cfg(not(feature = "verbose-logging"))]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and installs the layer; `RUST_LOG` overrides the
/// default level.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive(DEFAULT_LEVEL.into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(FairslotConsoleLayer)
            .try_init();
    });
}

fn mark_search_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SEARCH_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let epoch = EPOCH.get_or_init(Instant::now);
    let start_nanos = SEARCH_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
  __       _          _       _
 / _| __ _(_)_ __ ___| | ___ | |_
| |_ / _` | | '__/ __| |/ _ \| __|
|  _| (_| | | |  \__ \ | (_) | |_
|_|  \__,_|_|_|  |___/_|\___/ \__|
"#;

    let version_line = format!("      v{} - Fair Schedule Search\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats fairslot events with colors.
pub struct FairslotConsoleLayer;

impl<S: Subscriber> Layer<S> for FairslotConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("fairslot") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    strategy: Option<String>,
    combo: Option<String>,
    ordering: Option<String>,
    reason: Option<String>,
    message: Option<String>,
    round: Option<u64>,
    rounds: Option<u64>,
    options: Option<u64>,
    checked: Option<u64>,
    total: Option<u64>,
    valid: Option<u64>,
    evaluated: Option<u64>,
    speed: Option<u64>,
    combo_index: Option<u64>,
    worker_id: Option<u64>,
    workers: Option<u64>,
    duration_ms: Option<u64>,
    score: Option<f64>,
    complete: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "strategy" => self.strategy = Some(s.trim_matches('"').to_string()),
            "combo" => self.combo = Some(s),
            "ordering" => self.ordering = Some(s),
            "reason" => self.reason = Some(s.trim_matches('"').to_string()),
            "message" => self.message = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "round" => self.round = Some(value),
            "rounds" => self.rounds = Some(value),
            "options" => self.options = Some(value),
            "checked" => self.checked = Some(value),
            "total" => self.total = Some(value),
            "valid" => self.valid = Some(value),
            "evaluated" => self.evaluated = Some(value),
            "speed" => self.speed = Some(value),
            "combo_index" => self.combo_index = Some(value),
            "worker_id" => self.worker_id = Some(value),
            "workers" => self.workers = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "score" {
            self.score = Some(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "complete" {
            self.complete = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "strategy" => self.strategy = Some(value.to_string()),
            "reason" => self.reason = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "round_options" => format_round_options(v),
        "round_progress" => format_round_progress(v),
        "lineup_rejected" => format_lineup_rejected(v),
        "options_generated" => format_options_generated(v),
        "search_start" => format_search_start(v),
        "best_improved" => format_best_improved(v),
        "best_tied" => format_best_tied(v),
        "progress" => format_progress(v),
        "worker_complete" => format_worker_complete(v),
        "worker_failed" => format_worker_failed(v),
        "search_end" => format_search_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_round_options(v: &EventVisitor) -> String {
    format!(
        "{} {} Round {} │ {} valid of {} orderings │ {}",
        format_elapsed(),
        "◆".bright_blue(),
        count(v.round).white().bold(),
        count(v.valid).bright_yellow(),
        count(v.checked).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    )
}

fn format_round_progress(v: &EventVisitor) -> String {
    format!(
        "{} {} Round {} │ {} / {} orderings │ {} valid │ {}/s",
        format_elapsed(),
        "⚡".bright_cyan(),
        count(v.round).white().bold(),
        count(v.checked).white(),
        count(v.total).white(),
        count(v.valid).bright_yellow(),
        count(v.speed).bright_magenta().bold(),
    )
}

fn format_lineup_rejected(v: &EventVisitor) -> String {
    format!(
        "{} {} Round {} │ {} │ {}",
        format_elapsed(),
        "·".bright_black(),
        count(v.round).bright_black(),
        v.ordering.as_deref().unwrap_or("").bright_black(),
        v.reason.as_deref().unwrap_or("rejected").bright_black(),
    )
}

fn format_options_generated(v: &EventVisitor) -> String {
    format!(
        "{} {} Options ready │ {} rounds │ {} options │ {}",
        format_elapsed(),
        "■".bright_blue().bold(),
        count(v.rounds).bright_yellow(),
        count(v.options).bright_yellow(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    )
}

fn format_search_start(v: &EventVisitor) -> String {
    mark_search_start();
    let strategy = v.strategy.as_deref().unwrap_or("Unknown");

    let mut output = format!(
        "{} {} {} search │ {} rounds │ {} combinations",
        format_elapsed(),
        "▶".bright_green().bold(),
        strategy.white().bold(),
        count(v.rounds).bright_yellow(),
        count(v.total).bright_yellow(),
    );

    if let Some(start) = v.combo_index.filter(|&i| i > 0) {
        output.push_str(&format!(
            " │ resuming at #{}",
            start.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }
    if let Some(seed) = v.score.filter(|s| s.is_finite()) {
        output.push_str(&format!(" │ seed {}", format_score(seed)));
    }

    output
}

fn format_best_improved(v: &EventVisitor) -> String {
    format!(
        "{} {} New best {} │ #{} │ {}",
        format_elapsed(),
        "★".bright_green().bold(),
        format_score(v.score.unwrap_or(f64::INFINITY)),
        count(v.combo_index).white(),
        v.combo.as_deref().unwrap_or("").bright_black(),
    )
}

fn format_best_tied(v: &EventVisitor) -> String {
    format!(
        "{} {} Tie {} │ #{}",
        format_elapsed(),
        "=".bright_black(),
        format_score(v.score.unwrap_or(f64::INFINITY)).bright_black(),
        count(v.combo_index).bright_black(),
    )
}

fn format_progress(v: &EventVisitor) -> String {
    let evaluated = v.evaluated.unwrap_or(0);
    let total = v.total.unwrap_or(0);
    let percent = if total > 0 {
        evaluated as f64 * 100.0 / total as f64
    } else {
        0.0
    };

    let mut output = format!(
        "{} {} {:>14} / {} combos ({:.1}%) │ {:>12}/s │ best {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        evaluated.to_formatted_string(&Locale::en).white(),
        total.to_formatted_string(&Locale::en).white(),
        percent,
        count(v.speed).bright_magenta().bold(),
        format_score(v.score.unwrap_or(f64::INFINITY)),
    );

    if let Some(workers) = v.workers {
        output.push_str(&format!(" │ {} workers", workers));
    }

    output
}

fn format_worker_complete(v: &EventVisitor) -> String {
    format!(
        "{} {} Worker {} done │ {} combos",
        format_elapsed(),
        "✓".bright_black(),
        count(v.worker_id).white(),
        count(v.evaluated).white(),
    )
}

fn format_worker_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} Worker {} failed │ {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        count(v.worker_id).white().bold(),
        v.message.as_deref().unwrap_or("unknown error").bright_red(),
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    let complete = v.complete.unwrap_or(true);
    let score = v.score.unwrap_or(f64::INFINITY);

    let status = if complete {
        "COMPLETE".bright_green().bold().to_string()
    } else {
        "INCOMPLETE".bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {} Search finished │ {} │ {} combos │ {}/s │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        count(v.evaluated).white(),
        count(v.speed).bright_magenta().bold(),
        status,
    );

    let status_text = if complete {
        "BEST SCHEDULE FOUND"
    } else {
        "SEARCH INCOMPLETE (worker failure)"
    };
    let inner_width: usize = 58;
    let total_pad = inner_width.saturating_sub(status_text.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    let status_colored = if complete {
        status_text.bright_green().bold().to_string()
    } else {
        status_text.bright_red().bold().to_string()
    };

    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(
        &"╠══════════════════════════════════════════════════════════╣"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Best Score:",
        score_text(score),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn score_text(score: f64) -> String {
    if score.is_finite() {
        format!("{:.4}", score)
    } else {
        "none".to_string()
    }
}

// Zero is a perfectly fair schedule.
fn format_score(score: f64) -> String {
    let text = score_text(score);
    if !score.is_finite() {
        text.bright_black().to_string()
    } else if score == 0.0 {
        text.bright_green().to_string()
    } else {
        text.yellow().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Capture(Arc<Mutex<Vec<String>>>);

    impl<S: Subscriber> Layer<S> for Capture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = EventVisitor::default();
            event.record(&mut visitor);
            self.0.lock().unwrap().push(format_event(&visitor));
        }
    }

    fn capture(emit: impl FnOnce()) -> Vec<String> {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(Capture(Arc::clone(&lines)));
        tracing::subscriber::with_default(subscriber, emit);
        let captured = lines.lock().unwrap().clone();
        captured
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1_500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_score_text() {
        assert_eq!(score_text(1.23456), "1.2346");
        assert_eq!(score_text(f64::INFINITY), "none");
    }

    #[test]
    fn test_progress_line_uses_separators() {
        let v = EventVisitor {
            event: Some("progress".to_string()),
            evaluated: Some(1_234_567),
            total: Some(2_469_134),
            speed: Some(98_765),
            score: Some(2.5),
            workers: Some(8),
            ..EventVisitor::default()
        };
        let line = format_event(&v);
        assert!(line.contains("1,234,567"));
        assert!(line.contains("2,469,134"));
        assert!(line.contains("50.0%"));
        assert!(line.contains("98,765"));
        assert!(line.contains("8 workers"));
    }

    #[test]
    fn test_tie_line() {
        let v = EventVisitor {
            event: Some("best_tied".to_string()),
            score: Some(1.0),
            combo_index: Some(42),
            ..EventVisitor::default()
        };
        let line = format_event(&v);
        assert!(line.contains("Tie"));
        assert!(line.contains("42"));
    }

    #[test]
    fn test_unknown_event_ignored() {
        let v = EventVisitor {
            event: Some("phase_start".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&v).is_empty());
    }

    #[test]
    fn test_incomplete_search_end() {
        let v = EventVisitor {
            event: Some("search_end".to_string()),
            complete: Some(false),
            evaluated: Some(10),
            ..EventVisitor::default()
        };
        let output = format_event(&v);
        assert!(output.contains("INCOMPLETE"));
        assert!(output.contains("none"));
    }

    #[test]
    fn test_rejected_ordering_rendered() {
        let lines = capture(|| {
            let ordering = vec![2usize, 3, 1, 4];
            tracing::trace!(
                event = "lineup_rejected",
                round = 3usize,
                ordering = ?ordering,
                reason = %"team 3 sits 3 idle slots (max 2)",
            );
        });
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("[2, 3, 1, 4]"));
        assert!(lines[0].contains("team 3 sits 3 idle slots (max 2)"));
    }

    #[test]
    fn test_worker_complete_rendered() {
        let lines = capture(|| {
            tracing::debug!(event = "worker_complete", worker_id = 2usize, evaluated = 12_345u64);
        });
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Worker"));
        assert!(lines[0].contains("12,345"));
    }
}
