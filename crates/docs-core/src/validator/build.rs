//! Optional site build phase
//!
//! Runs the configured build command from the CMS root with a time limit.
//! A failing, missing or timed-out build becomes a run-level issue at the
//! configured severity; it never aborts validation.

use std::process::Stdio;
use std::time::Duration;

use docs_schema::{BuildSettings, BuildSeverity};
use tokio::process::Command;

use crate::report::{Issue, Phase};
use crate::{Error, Result, RunConfig};

/// Outcome of one build command run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    /// Combined stderr and stdout, verbatim
    pub output: String,
}

fn shell(command: &str) -> Command {
    let mut cmd = if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C");
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c");
        cmd
    };
    cmd.arg(command);
    cmd
}

/// Kill the process group led by `pid`, including anything the shell
/// started in the background.
#[cfg(unix)]
fn kill_group(pid: u32) {
    let group = format!("-{pid}");
    let status = std::process::Command::new("kill")
        .args(["-KILL", "--", &group])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    if let Err(e) = status {
        tracing::warn!(pid, error = %e, "could not kill build process group");
    }
}

/// Without process groups only the shell itself is killed on timeout;
/// processes it spawned keep running.
#[cfg(not(unix))]
fn kill_group(_pid: u32) {}

async fn run_command(settings: &BuildSettings, config: &RunConfig) -> Result<BuildOutput> {
    let mut cmd = shell(&settings.command);
    cmd.current_dir(config.cms_root().to_native())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    #[cfg(unix)]
    cmd.process_group(0);

    let failed = |e: std::io::Error| Error::BuildFailed {
        command: settings.command.clone(),
        message: e.to_string(),
    };
    let child = cmd.spawn().map_err(failed)?;
    let pid = child.id();

    let limit = Duration::from_secs(settings.timeout_secs);
    let output = match tokio::time::timeout(limit, child.wait_with_output()).await {
        Ok(output) => output.map_err(failed)?,
        Err(_) => {
            if let Some(pid) = pid {
                kill_group(pid);
            }
            return Err(Error::BuildTimeout {
                seconds: settings.timeout_secs,
            });
        }
    };

    let mut text = String::from_utf8_lossy(&output.stderr).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stdout));
    Ok(BuildOutput {
        success: output.status.success(),
        exit_code: output.status.code(),
        output: text,
    })
}

/// Run the build command and wait for it.
///
/// On unix the command leads its own process group, and a timeout kills
/// the whole group. Elsewhere only the shell is killed.
pub fn run(config: &RunConfig) -> Result<BuildOutput> {
    let settings = &config.project().build;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::BuildFailed {
            command: settings.command.clone(),
            message: e.to_string(),
        })?;
    tracing::info!(command = %settings.command, "running site build");
    runtime.block_on(run_command(settings, config))
}

/// Run the build and turn any failure into issues.
pub fn check(config: &RunConfig) -> Vec<Issue> {
    let settings = &config.project().build;
    let issue = |message: String| match settings.failure_severity {
        BuildSeverity::Error => Issue::error(Phase::Build, message),
        BuildSeverity::Warning => Issue::warning(Phase::Build, message),
    };

    match run(config) {
        Ok(output) if output.success => Vec::new(),
        Ok(output) => {
            let code = output
                .exit_code
                .map_or_else(|| "killed by signal".to_string(), |c| format!("exit code {c}"));
            vec![issue(format!(
                "build command `{}` failed ({code}):\n{}",
                settings.command,
                output.output.trim_end()
            ))]
        }
        Err(e) => vec![issue(e.to_string())],
    }
}
