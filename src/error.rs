//! Error taxonomy for one hook dispatch.
//!
//! Two composition styles coexist and are deliberately kept apart:
//!
//! - [`combine`] attempts every sibling action and reports all failures
//!   together. CI triggers use it: skipping the premerge trigger because
//!   the verify trigger failed would lose a build.
//! - Fail-fast flows propagate the first error with `?`. Issue
//!   notifications use it: continuing after a partial failure risks
//!   posting duplicate comments on the next attempt.

use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can go wrong while handling one hook event.
///
/// Condition evaluation never errors; these all originate at a boundary
/// call, the configuration layer, or the dispatch deadline.
#[derive(Debug, Error)]
pub enum HookError {
    /// Network/HTTP failure or non-2xx status from an upstream query.
    #[error("fetch from {url} failed: {reason}")]
    UpstreamFetch { url: String, reason: String },

    /// The upstream answered but the body was not decodable.
    #[error("malformed response from {url}: {reason}")]
    UpstreamDecode { url: String, reason: String },

    /// The CI server refused or failed the job trigger.
    #[error("triggering job {job} failed: {reason}")]
    Trigger { job: String, reason: String },

    /// The issue tracker rejected a comment post.
    #[error("notifying {target} failed: {reason}")]
    Notify { target: String, reason: String },

    /// Missing credentials or an unusable configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The whole dispatch ran past its deadline.
    #[error("dispatch exceeded the {}s deadline", .0.as_secs())]
    DeadlineExceeded(Duration),

    /// Several independently attempted actions failed.
    #[error("{}", render_combined(.0))]
    Combined(Vec<HookError>),
}

/// Collects the outcomes of independently attempted actions.
///
/// Returns `Ok` when every action succeeded, the single error when exactly
/// one failed, and [`HookError::Combined`] otherwise. No error is dropped.
pub fn combine<I>(results: I) -> Result<(), HookError>
where
    I: IntoIterator<Item = Result<(), HookError>>,
{
    let mut errors: Vec<HookError> = results.into_iter().filter_map(Result::err).collect();
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(HookError::Combined(errors)),
    }
}

fn render_combined(errors: &[HookError]) -> String {
    let parts: Vec<String> = errors.iter().map(ToString::to_string).collect();
    format!("{} actions failed: {}", errors.len(), parts.join("; "))
}
