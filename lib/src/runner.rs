//! Subprocess plumbing for external RDF tools.
//!
//! [`CommandRunner`] is the seam between the rapper bridge and the operating
//! system: the production [`SystemRunner`] spawns a real process, while
//! tests substitute a scripted runner. A run owns exactly one child process;
//! the child is always reaped and its pipes closed on every exit path,
//! including timeout and error.

use crate::errors::ParseError;
use log::debug;
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Captured outcome of one external command run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Spawn a command, feed it `stdin`, and capture both output streams.
pub trait CommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        stdin: &[u8],
        timeout: Duration,
    ) -> Result<RunOutput, ParseError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for std::sync::Arc<R> {
    fn run(
        &self,
        program: &str,
        args: &[String],
        stdin: &[u8],
        timeout: Duration,
    ) -> Result<RunOutput, ParseError> {
        (**self).run(program, args, stdin, timeout)
    }
}

/// Runs commands through `std::process`, enforcing a wall-clock timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        stdin: &[u8],
        timeout: Duration,
    ) -> Result<RunOutput, ParseError> {
        debug!("Running {} {:?}", program, args);
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|_| ParseError::ToolNotFound {
                command: program.to_string(),
            })?;

        let mut stdin_pipe = child.stdin.take().ok_or_else(|| missing_pipe("stdin"))?;
        let mut stdout_pipe = child.stdout.take().ok_or_else(|| missing_pipe("stdout"))?;
        let mut stderr_pipe = child.stderr.take().ok_or_else(|| missing_pipe("stderr"))?;

        // Write the input from its own thread so a child that emits output
        // before draining stdin cannot deadlock us. A broken pipe is not an
        // error here: the tool may legitimately exit before reading it all.
        let input = stdin.to_vec();
        let writer = thread::spawn(move || {
            let _ = stdin_pipe.write_all(&input);
            // dropping the handle closes the pipe
        });
        let stdout_reader = thread::spawn(move || {
            let mut buf = Vec::new();
            stdout_pipe.read_to_end(&mut buf).map(|_| buf)
        });
        let stderr_reader = thread::spawn(move || {
            let mut buf = Vec::new();
            stderr_pipe.read_to_end(&mut buf).map(|_| buf)
        });

        let deadline = Instant::now() + timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        let _ = writer.join();
                        let _ = stdout_reader.join();
                        let _ = stderr_reader.join();
                        return Err(ParseError::ToolTimedOut {
                            command: program.to_string(),
                            timeout,
                        });
                    }
                    thread::sleep(Duration::from_millis(10));
                }
                Err(err) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ParseError::Io(err));
                }
            }
        };

        let _ = writer.join();
        let stdout = join_reader(stdout_reader, "stdout")?;
        let stderr = join_reader(stderr_reader, "stderr")?;
        Ok(RunOutput {
            status: status.code(),
            stdout,
            stderr,
        })
    }
}

fn missing_pipe(name: &str) -> ParseError {
    ParseError::Io(std::io::Error::new(
        std::io::ErrorKind::BrokenPipe,
        format!("child {name} was not captured"),
    ))
}

fn join_reader(
    handle: thread::JoinHandle<std::io::Result<Vec<u8>>>,
    name: &str,
) -> Result<Vec<u8>, ParseError> {
    match handle.join() {
        Ok(Ok(buf)) => Ok(buf),
        Ok(Err(err)) => Err(ParseError::Io(err)),
        Err(_) => Err(ParseError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("{name} reader thread panicked"),
        ))),
    }
}
