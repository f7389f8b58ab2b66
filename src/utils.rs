//! utils — logging setup and per-coordinate summaries of posterior draws.
//!
//! Purpose
//! -------
//! Keep two cross-cutting helpers out of the numerical modules:
//! - [`build_logger`] creates the `slog` logger used by Gibbs chains, either a
//!   non-blocking terminal logger (verbose runs) or a discarding one.
//! - [`summarize_draws`] reduces the values of one scalar quantity across
//!   draws to a point estimate and optional equal-tailed credible bounds.
//!
//! Conventions
//! -----------
//! - A credible level `c` (e.g. 0.95) yields the empirical `(1−c)/2` and
//!   `1 − (1−c)/2` quantiles.
//! - Quantiles and medians are computed with `statrs` order statistics; the
//!   mean with `statrs::statistics::Statistics`.
use slog::{Drain, Logger, o};
use statrs::statistics::{Data, OrderStatistics, Statistics};

/// Point estimate used when reducing draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointEstimate {
    #[default]
    Mean,
    Median,
}

/// Summary of one scalar quantity across draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawSummary {
    pub point: f64,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

/// Build the logger for a sampler run.
///
/// Parameters
/// ----------
/// - `verbose`: `bool`
///   `true` attaches a terminal drain behind an async (non-blocking) channel;
///   `false` returns a logger that drops every record.
///
/// Returns
/// -------
/// `slog::Logger`
///   Root logger; callers add key/value context with `logger.new(o!(...))`.
pub fn build_logger(verbose: bool) -> Logger {
    if verbose {
        let decorator = slog_term::TermDecorator::new().build();
        let drain = slog_term::FullFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        Logger::root(drain, o!("crate" => "rust_bvar"))
    } else {
        Logger::root(slog::Discard, o!())
    }
}

/// Reduce draws of one scalar to a point estimate and optional bounds.
///
/// Parameters
/// ----------
/// - `values`: `Vec<f64>`
///   One value per draw; must be non-empty and finite. Consumed because
///   order statistics sort in place.
/// - `point`: [`PointEstimate`]
/// - `ci_level`: `Option<f64>`
///   Coverage in (0, 1), already validated by the caller.
///
/// Returns
/// -------
/// [`DrawSummary`]
///
/// Panics
/// ------
/// - Never panics; an empty `values` yields NaN entries, which callers rule
///   out by requiring at least one draw.
pub fn summarize_draws(values: Vec<f64>, point: PointEstimate, ci_level: Option<f64>) -> DrawSummary {
    let mean = values.iter().mean();
    let mut data = Data::new(values);
    let point = match point {
        PointEstimate::Mean => mean,
        PointEstimate::Median => data.median(),
    };
    let (lower, upper) = match ci_level {
        Some(level) => {
            let tail = (1.0 - level) / 2.0;
            (Some(data.quantile(tail)), Some(data.quantile(1.0 - tail)))
        }
        None => (None, None),
    };
    DrawSummary { point, lower, upper }
}
