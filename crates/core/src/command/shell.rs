use super::{CommandOutput, CommandRunner};
use crate::error::{Error, ExecutionFailure, Result};
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Exit codes POSIX shells use when the command itself could not be launched
const SHELL_NOT_EXECUTABLE: i32 = 126;
const SHELL_NOT_FOUND: i32 = 127;

#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Shell used to interpret command lines
    pub shell: String,
    /// Upper bound for a single command, output included; `None` waits forever
    pub timeout: Option<Duration>,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl RunnerOptions {
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }
}

/// [`CommandRunner`] that hands command lines to `sh -c`
///
/// On Unix the shell leads its own process group, so a timeout takes down
/// everything the command line started, background jobs included.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    options: RunnerOptions,
}

impl ShellRunner {
    pub fn new(options: RunnerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    fn spawn(&self, command: &str, working_dir: &Path) -> io::Result<Child> {
        let mut cmd = Command::new(&self.options.shell);
        cmd.arg("-c")
            .arg(command)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        cmd.spawn()
    }

    /// Wait for the child until `deadline`.
    ///
    /// Returns `Ok(None)` once the deadline passes. The child is left running;
    /// the caller tears it down.
    fn wait(&self, child: &mut Child, deadline: Option<Instant>) -> io::Result<Option<ExitStatus>> {
        let Some(deadline) = deadline else {
            return child.wait().map(Some);
        };

        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn timed_out(&self, command: &str, working_dir: &Path, child: &mut Child) -> Error {
        let timeout = self.options.timeout.unwrap_or_default();
        debug!("{:?} timed out after {:?}", command, timeout);
        terminate(child);
        Error::execution(command, working_dir, ExecutionFailure::TimedOut(timeout))
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, working_dir: &Path) -> Result<CommandOutput> {
        debug!("Running {:?} in {}", command, working_dir.display());
        let started = Instant::now();
        let deadline = self.options.timeout.map(|timeout| started + timeout);

        let mut child = self
            .spawn(command, working_dir)
            .map_err(|e| Error::execution(command, working_dir, ExecutionFailure::Spawn(e)))?;

        // Drain both pipes while waiting so a chatty child can't block on a full pipe
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = match self.wait(&mut child, deadline) {
            Ok(Some(status)) => status,
            Ok(None) => return Err(self.timed_out(command, working_dir, &mut child)),
            Err(e) => {
                terminate(&mut child);
                return Err(Error::execution(
                    command,
                    working_dir,
                    ExecutionFailure::Spawn(e),
                ));
            }
        };

        // Background jobs may still hold the pipes after the shell has exited
        let Some(stdout) = collect(stdout, deadline) else {
            return Err(self.timed_out(command, working_dir, &mut child));
        };
        let Some(stderr) = collect(stderr, deadline) else {
            return Err(self.timed_out(command, working_dir, &mut child));
        };

        let output = CommandOutput {
            status: status.code(),
            stdout: decode(command, "stdout", stdout),
            stderr: decode(command, "stderr", stderr),
        };
        trace!(
            "{:?} exited with {:?} after {:?}",
            command,
            output.status,
            started.elapsed()
        );

        match output.status {
            Some(SHELL_NOT_FOUND) => Err(Error::execution(
                command,
                working_dir,
                ExecutionFailure::NotFound,
            )),
            Some(SHELL_NOT_EXECUTABLE) => Err(Error::execution(
                command,
                working_dir,
                ExecutionFailure::NotExecutable,
            )),
            _ => Ok(output),
        }
    }
}

/// Kill the child's process group (Unix) and the child itself, then reap it
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
            // SAFETY: killpg has no memory-safety preconditions; the group was
            // created for this child by `process_group(0)`
            unsafe {
                libc::killpg(pgid, libc::SIGKILL);
            }
        }
    }

    child.kill().ok();
    child.wait().ok();
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf).ok();
        tx.send(buf).ok();
    });
    rx
}

/// Receive a pipe's contents, or `None` if `deadline` passes first
fn collect(pipe: Option<Receiver<Vec<u8>>>, deadline: Option<Instant>) -> Option<Vec<u8>> {
    let Some(rx) = pipe else {
        return Some(Vec::new());
    };

    let received = match deadline {
        Some(deadline) => rx.recv_timeout(deadline.saturating_duration_since(Instant::now())),
        None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
    };

    match received {
        Ok(bytes) => Some(bytes),
        Err(RecvTimeoutError::Timeout) => None,
        Err(RecvTimeoutError::Disconnected) => Some(Vec::new()),
    }
}

/// Decode captured output; invalid UTF-8 is replaced with U+FFFD
fn decode(command: &str, stream: &str, bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| {
        debug!(
            "{:?} wrote invalid UTF-8 to {}; replacing undecodable bytes",
            command, stream
        );
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    })
}
