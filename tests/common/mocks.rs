//! Shared mock implementations for testing

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use sentinelle::infrastructure::scanners::{CommandError, CommandOutput, CommandRunner};

/// Scripted outcome for one external tool.
#[derive(Debug, Clone)]
pub enum ToolOutcome {
    Success(String),
    FailedExit(String),
    Timeout(u64),
}

/// Command runner scripted per program name. Records every invocation so
/// tests can assert on stage counts and ordering.
pub struct ToolRunner {
    outcomes: HashMap<String, ToolOutcome>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ToolRunner {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every tool succeeds with recognizable canned output.
    pub fn succeeding() -> Self {
        Self::new()
            .with_outcome("nmap", ToolOutcome::Success("80/tcp open http".to_string()))
            .with_outcome(
                "nuclei",
                ToolOutcome::Success("[CVE-2024-0001] [high] found".to_string()),
            )
            .with_outcome("nikto", ToolOutcome::Success("+ Server: nginx".to_string()))
            .with_outcome(
                "subfinder",
                ToolOutcome::Success(
                    "{\"host\":\"a.example.com\"}\n{\"host\":\"b.example.com\"}\n".to_string(),
                ),
            )
    }

    /// Every tool exits non-zero.
    pub fn all_failing() -> Self {
        let mut runner = Self::new();
        for tool in ["nmap", "nuclei", "nikto", "subfinder"] {
            runner = runner.with_outcome(tool, ToolOutcome::FailedExit("tool exploded".to_string()));
        }
        runner
    }

    pub fn with_outcome(mut self, program: &str, outcome: ToolOutcome) -> Self {
        self.outcomes.insert(program.to_string(), outcome);
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Program names in invocation order.
    pub fn programs(&self) -> Vec<String> {
        self.calls().into_iter().map(|(program, _)| program).collect()
    }

    pub fn invocations_of(&self, program: &str) -> usize {
        self.calls()
            .iter()
            .filter(|(name, _)| name == program)
            .count()
    }
}

impl Default for ToolRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ToolRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        _timeout: Duration,
    ) -> Result<CommandOutput, CommandError> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));

        match self.outcomes.get(program) {
            None => Ok(CommandOutput {
                success: true,
                exit_code: Some(0),
                stdout: String::new(),
                stderr: String::new(),
            }),
            Some(ToolOutcome::Success(stdout)) => Ok(CommandOutput {
                success: true,
                exit_code: Some(0),
                stdout: stdout.clone(),
                stderr: String::new(),
            }),
            Some(ToolOutcome::FailedExit(stderr)) => Ok(CommandOutput {
                success: false,
                exit_code: Some(1),
                stdout: String::new(),
                stderr: stderr.clone(),
            }),
            Some(ToolOutcome::Timeout(seconds)) => {
                Err(CommandError::Timeout { seconds: *seconds })
            }
        }
    }
}
