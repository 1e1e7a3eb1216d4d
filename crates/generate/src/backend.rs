//! The generative text backend port.

use docforge_core::BackendError;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread;

/// A generative text backend: one prompt in, one completion out.
///
/// Calls block; callers in this crate run them on tokio's blocking pool.
/// Timeouts and retries are the implementation's concern.
pub trait TextBackend: Send + Sync {
    /// Produce a completion for `prompt`.
    fn complete(&self, prompt: &str) -> Result<String, BackendError>;
}

impl<F> TextBackend for F
where
    F: Fn(&str) -> Result<String, BackendError> + Send + Sync,
{
    fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        self(prompt)
    }
}

/// Run one backend call on the blocking pool and wait for it.
pub(crate) async fn complete_blocking(
    backend: &Arc<dyn TextBackend>,
    prompt: String,
) -> Result<String, BackendError> {
    let backend = Arc::clone(backend);
    tokio::task::spawn_blocking(move || backend.complete(&prompt))
        .await
        .map_err(|e| BackendError::new(format!("backend worker did not complete: {}", e)))?
}

/// Backend that runs an external program, writing the prompt to its stdin
/// and reading the completion from its stdout.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    program: String,
    args: Vec<String>,
}

impl CommandBackend {
    /// Create a backend running `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Parse a whitespace-separated command line such as `llm -m small`.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self {
            program: program.to_string(),
            args: parts.map(str::to_string).collect(),
        })
    }
}

impl TextBackend for CommandBackend {
    fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        log::debug!("Running backend command: {} {:?}", self.program, self.args);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BackendError::new(format!("failed to start '{}': {}", self.program, e)))?;

        // Feed the prompt from a scoped thread while stdout and stderr drain.
        let stdin = child.stdin.take();
        let (sent, output) = thread::scope(|scope| {
            let writer =
                stdin.map(|mut stdin| scope.spawn(move || stdin.write_all(prompt.as_bytes())));
            let output = child.wait_with_output();
            (writer.map(|writer| writer.join()), output)
        });

        let output =
            output.map_err(|e| BackendError::new(format!("failed to read completion: {}", e)))?;

        match sent {
            Some(Ok(Err(e))) if e.kind() == io::ErrorKind::BrokenPipe => {
                log::debug!("'{}' closed stdin before reading the whole prompt", self.program);
            }
            Some(Ok(Err(e))) => {
                return Err(BackendError::new(format!("failed to send prompt: {}", e)));
            }
            Some(Err(_)) => return Err(BackendError::new("prompt writer thread panicked")),
            Some(Ok(Ok(()))) | None => {}
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BackendError::new(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let completion = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if completion.is_empty() {
            return Err(BackendError::new(format!(
                "'{}' returned an empty completion",
                self.program
            )));
        }

        Ok(completion)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Backend replaying a fixed script of replies and recording prompts.
    #[derive(Default)]
    pub struct ScriptedBackend {
        replies: Mutex<VecDeque<Result<String, BackendError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, text: impl Into<String>) -> Self {
            self.replies.lock().unwrap().push_back(Ok(text.into()));
            self
        }

        pub fn fail(self, message: impl Into<String>) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(BackendError::new(message)));
            self
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    impl TextBackend for ScriptedBackend {
        fn complete(&self, prompt: &str) -> Result<String, BackendError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(BackendError::new("script exhausted")))
        }
    }
}
