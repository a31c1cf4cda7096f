//! Hook invocation plumbing: argument parsing, typed events, and routing.

mod args;
mod events;
mod router;

pub use args::ArgMap;
pub use events::{CommentAdded, HookEvent, PatchsetCreated, parse_event};
pub use router::EventRouter;

use std::path::PathBuf;

use thiserror::Error;

/// Failures while decoding the hook invocation itself, before any boundary
/// call is made.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("{event} event is missing the --{attribute} attribute")]
    MissingAttribute {
        event: String,
        attribute: &'static str,
    },

    #[error("reading argument file {} failed", .path.display())]
    ArgFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
