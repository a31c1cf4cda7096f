use std::env;
use std::path::Path;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gerrit_hook::boundary::{GerritClient, GithubTracker, JenkinsClient};
use gerrit_hook::config::{Config, ConfigError};
use gerrit_hook::error::HookError;
use gerrit_hook::hook::{ArgMap, EventRouter, HookEvent, parse_event};

/// One deadline covers the whole event-handling sequence, every boundary
/// call included.
const DISPATCH_DEADLINE: Duration = Duration::from_secs(60);

/// Raw invocations are captured here when the directory exists.
const DEBUG_DIR: &str = "/tmp/gerrit-hook-debug";

/// Binary installed into Gerrit's hooks directory under the name of the
/// event it should receive; the hook name arrives as argv[0].
///
/// Errors are logged, never fatal: a failed dispatch must not fail the
/// hook call itself.
#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gerrit_hook=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let argv: Vec<String> = env::args().collect();
    dump_invocation(&argv);

    let binary = argv.first().map(String::as_str).unwrap_or_default();
    let mut action = Path::new(binary)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let mut args = ArgMap::from_argv(&argv);

    // Local development: replay a captured invocation from a file.
    if let Some(arg_file) = env::var("GERRIT_HOOK_ARGFILE").ok().filter(|p| !p.is_empty()) {
        match ArgMap::from_arg_file(Path::new(&arg_file)) {
            Ok((file_action, file_args)) => {
                action = file_action;
                args = file_args;
            }
            Err(err) => {
                tracing::error!(error = %err, "replaying argument file failed");
                return;
            }
        }
    }

    tracing::debug!(
        action = %action,
        project = args.get("project").unwrap_or_default(),
        change = args.get("change").unwrap_or_default(),
        "hook invoked"
    );

    let event = match parse_event(&action, &args) {
        Ok(Some(event)) => event,
        Ok(None) => {
            tracing::debug!(action = %action, "event kind is not handled");
            return;
        }
        Err(err) => {
            tracing::error!(error = %err, "invalid hook invocation");
            return;
        }
    };

    if let Err(err) = dispatch(&event).await {
        tracing::error!(error = %err, "handling hook event failed");
    }
}

async fn dispatch(event: &HookEvent) -> Result<(), HookError> {
    let config = Config::load()?;

    let gerrit = GerritClient::new(config.gerrit_url);
    let jenkins = JenkinsClient::new(config.jenkins_url, config.jenkins_user, config.jenkins_token);
    let github = GithubTracker::from_token(config.github_token)
        .map_err(|e| ConfigError::IssueTrackerClient(e.to_string()))?;

    let router = EventRouter::new(gerrit, jenkins, github, config.projects);
    match tokio::time::timeout(DISPATCH_DEADLINE, router.handle(event)).await {
        Ok(result) => result,
        Err(_) => Err(HookError::DeadlineExceeded(DISPATCH_DEADLINE)),
    }
}

/// Best-effort capture of the raw invocation for debugging.
fn dump_invocation(argv: &[String]) {
    let dir = Path::new(DEBUG_DIR);
    if !dir.is_dir() {
        return;
    }
    let name = format!(
        "{}-{}.txt",
        chrono::Utc::now().format("%Y%m%d-%H%M%S"),
        std::process::id()
    );
    if let Err(err) = std::fs::write(dir.join(name), argv.join("\n")) {
        tracing::error!(error = %err, "writing invocation capture failed");
    }
}
