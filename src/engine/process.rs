// ABOUTME: Spawns external shell commands and streams their stdout back as events
// ABOUTME: Each run gets a unique id; output chunks always precede the single terminal event

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStdout, Command};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{timeout, Duration};
use tracing::debug;
use uuid::Uuid;

use super::error::ProcessFailure;

const CHUNK_SIZE: usize = 4096;

/// How trigger commands are run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessConfig {
    /// Shell used as `<shell> -c <command>` (default: /bin/sh)
    #[serde(default = "default_shell")]
    pub shell: String,

    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Extra environment variables for every command
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Kill the process after this many seconds (default: no limit)
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_shell() -> String {
    "/bin/sh".to_string()
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            working_dir: None,
            env: HashMap::new(),
            timeout_seconds: None,
        }
    }
}

impl ProcessConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A process that exited on its own with an exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    pub code: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEventKind {
    Output(Vec<u8>),
    Exited(ProcessExit),
    Failed(ProcessFailure),
}

impl ProcessEventKind {
    /// A status without an exit code means the process was killed by a signal
    pub fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => ProcessEventKind::Exited(ProcessExit { code }),
            None => ProcessEventKind::Failed(ProcessFailure::Crashed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEvent {
    pub run: RunId,
    pub kind: ProcessEventKind,
}

impl ProcessEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self.kind, ProcessEventKind::Output(_))
    }
}

/// Sending half of the process event channel plus the settings for new runs
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    config: ProcessConfig,
    sender: UnboundedSender<ProcessEvent>,
}

impl ProcessRunner {
    pub fn channel(config: ProcessConfig) -> (Self, UnboundedReceiver<ProcessEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { config, sender }, receiver)
    }

    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    /// Start `command` in the background. Must be called inside a tokio runtime.
    pub fn spawn(&self, command: &str) -> RunId {
        let run = RunId::new();
        debug!("Spawning run {}: {}", run, command);
        tokio::spawn(execute(
            run,
            command.to_string(),
            self.config.clone(),
            self.sender.clone(),
        ));
        run
    }
}

async fn execute(
    run: RunId,
    command: String,
    config: ProcessConfig,
    sender: UnboundedSender<ProcessEvent>,
) {
    let terminal = match spawn_child(&command, &config) {
        Ok(mut child) => match child.stdout.take() {
            Some(stdout) => supervise(run, &mut child, stdout, &config, &sender).await,
            None => ProcessEventKind::Failed(ProcessFailure::ReadError),
        },
        Err(e) => {
            debug!("Could not start '{}': {}", command, e);
            ProcessEventKind::Failed(ProcessFailure::FailedToStart)
        }
    };

    // The receiver is gone only when the engine was dropped
    let _ = sender.send(ProcessEvent {
        run,
        kind: terminal,
    });
}

fn spawn_child(command: &str, config: &ProcessConfig) -> std::io::Result<Child> {
    let mut cmd = Command::new(&config.shell);
    cmd.arg("-c").arg(command);

    for (key, value) in &config.env {
        cmd.env(key, value);
    }
    if let Some(ref working_dir) = config.working_dir {
        cmd.current_dir(working_dir);
    }

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
}

async fn supervise(
    run: RunId,
    child: &mut Child,
    stdout: ChildStdout,
    config: &ProcessConfig,
    sender: &UnboundedSender<ProcessEvent>,
) -> ProcessEventKind {
    let outcome = match config.timeout() {
        Some(limit) => {
            let waited = timeout(limit, drain(run, child, stdout, sender)).await;
            match waited {
                Ok(outcome) => outcome,
                Err(_) => {
                    debug!("Run {} timed out after {:?}", run, limit);
                    let _ = child.start_kill();
                    let _ = child.wait().await;
                    Err(ProcessFailure::Timeout)
                }
            }
        }
        None => drain(run, child, stdout, sender).await,
    };

    match outcome {
        Ok(status) => ProcessEventKind::from_status(status),
        Err(failure) => ProcessEventKind::Failed(failure),
    }
}

async fn drain(
    run: RunId,
    child: &mut Child,
    mut stdout: ChildStdout,
    sender: &UnboundedSender<ProcessEvent>,
) -> Result<ExitStatus, ProcessFailure> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = stdout
            .read(&mut buf)
            .await
            .map_err(|_| ProcessFailure::ReadError)?;
        if n == 0 {
            break;
        }
        let _ = sender.send(ProcessEvent {
            run,
            kind: ProcessEventKind::Output(buf[..n].to_vec()),
        });
    }

    child.wait().await.map_err(|_| ProcessFailure::UnknownError)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect(receiver: &mut UnboundedReceiver<ProcessEvent>) -> (Vec<u8>, ProcessEventKind) {
        let mut output = Vec::new();
        loop {
            let event = receiver.recv().await.unwrap();
            match event.kind {
                ProcessEventKind::Output(bytes) => output.extend(bytes),
                terminal => return (output, terminal),
            }
        }
    }

    #[tokio::test]
    async fn test_output_then_exit() {
        let (runner, mut receiver) = ProcessRunner::channel(ProcessConfig::default());
        runner.spawn("printf 'a\\nb\\n'");

        let (output, terminal) = collect(&mut receiver).await;
        assert_eq!(output, b"a\nb\n");
        assert_eq!(terminal, ProcessEventKind::Exited(ProcessExit { code: 0 }));
    }

    #[tokio::test]
    async fn test_non_zero_exit_code() {
        let (runner, mut receiver) = ProcessRunner::channel(ProcessConfig::default());
        runner.spawn("exit 2");

        let (output, terminal) = collect(&mut receiver).await;
        assert!(output.is_empty());
        assert_eq!(terminal, ProcessEventKind::Exited(ProcessExit { code: 2 }));
    }

    #[tokio::test]
    async fn test_killed_by_signal_is_a_crash() {
        let (runner, mut receiver) = ProcessRunner::channel(ProcessConfig::default());
        runner.spawn("printf partial; kill -9 $$");

        let (output, terminal) = collect(&mut receiver).await;
        assert_eq!(output, b"partial");
        assert_eq!(terminal, ProcessEventKind::Failed(ProcessFailure::Crashed));
    }

    #[tokio::test]
    async fn test_missing_shell_fails_to_start() {
        let config = ProcessConfig {
            shell: "/definitely/not/a/shell".to_string(),
            ..ProcessConfig::default()
        };
        let (runner, mut receiver) = ProcessRunner::channel(config);
        let run = runner.spawn("echo hi");

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.run, run);
        assert_eq!(
            event.kind,
            ProcessEventKind::Failed(ProcessFailure::FailedToStart)
        );
    }

    #[tokio::test]
    async fn test_timeout_kills_process() {
        let config = ProcessConfig {
            timeout_seconds: Some(1),
            ..ProcessConfig::default()
        };
        let (runner, mut receiver) = ProcessRunner::channel(config);
        runner.spawn("sleep 30");

        let (_, terminal) = collect(&mut receiver).await;
        assert_eq!(terminal, ProcessEventKind::Failed(ProcessFailure::Timeout));
    }

    #[tokio::test]
    async fn test_env_is_passed() {
        let mut env = HashMap::new();
        env.insert("FORMBIND_TEST_VALUE".to_string(), "42".to_string());
        let config = ProcessConfig {
            env,
            ..ProcessConfig::default()
        };
        let (runner, mut receiver) = ProcessRunner::channel(config);
        runner.spawn("printf %s \"$FORMBIND_TEST_VALUE\"");

        let (output, _) = collect(&mut receiver).await;
        assert_eq!(output, b"42");
    }
}
