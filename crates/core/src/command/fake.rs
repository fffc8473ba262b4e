//! Scripted [`CommandRunner`] for unit tests

use super::{CommandOutput, CommandRunner};
use crate::error::{Error, ExecutionFailure, Result};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Reply {
    Exit { status: i32, stdout: String },
    SpawnFailure,
}

/// Answers each command line with a canned reply and records every call
#[derive(Debug, Default)]
pub(crate) struct FakeRunner {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exits(mut self, command: &str, status: i32, stdout: &str) -> Self {
        self.replies.insert(
            command.to_string(),
            Reply::Exit {
                status,
                stdout: stdout.to_string(),
            },
        );
        self
    }

    pub fn fails_to_spawn(mut self, command: &str) -> Self {
        self.replies
            .insert(command.to_string(), Reply::SpawnFailure);
        self
    }

    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|(cmd, _)| cmd).collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &str, working_dir: &Path) -> Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), working_dir.to_path_buf()));

        match self.replies.get(command) {
            Some(Reply::Exit { status, stdout }) => Ok(CommandOutput {
                status: Some(*status),
                stdout: stdout.clone(),
                stderr: String::new(),
            }),
            Some(Reply::SpawnFailure) | None => Err(Error::execution(
                command,
                working_dir,
                ExecutionFailure::Spawn(io::Error::new(
                    io::ErrorKind::NotFound,
                    "no scripted reply",
                )),
            )),
        }
    }
}
