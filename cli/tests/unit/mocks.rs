//! Shared mock infrastructure for unit tests.
//!
//! Provides a recording [`CommandRunner`], a scripted [`Prompter`], a
//! recording [`ProgressReporter`] and in-memory stores so each test file
//! doesn't have to re-define the same boilerplate.

#![allow(clippy::expect_used, dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{ExitStatus, Output};
use std::time::Duration;

use anyhow::Result;
use wslkit_cli::application::ports::{
    CommandRunner, IpStore, LocalFs, MenuScreens, ProgressReporter, Prompter,
};
use wslkit_cli::domain::network::InstallSummary;
use wslkit_cli::domain::{ProcessError, PromptError};

// ── Output helpers ────────────────────────────────────────────────────────────

pub fn exit_status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(stderr: &[u8]) -> Output {
    Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Mock: command runner ──────────────────────────────────────────────────────

/// One recorded invocation.
#[derive(Debug, Clone)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<Vec<u8>>,
    pub envs: Vec<(String, String)>,
}

impl Call {
    /// `program arg arg ...`, unquoted.
    pub fn line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Records every call. Captured calls answer with the first canned output
/// whose key is a prefix of the call line, or an empty success.
#[derive(Default)]
pub struct MockRunner {
    pub calls: RefCell<Vec<Call>>,
    responses: Vec<(String, Output)>,
    spawn_failures: Vec<String>,
    stream_lines: Vec<String>,
    status_code: i32,
    interrupt_stream: bool,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer calls starting with `prefix` with `output`.
    pub fn respond(mut self, prefix: &str, output: Output) -> Self {
        self.responses.push((prefix.to_string(), output));
        self
    }

    /// Fail to spawn calls starting with `prefix`.
    pub fn fail_spawn(mut self, prefix: &str) -> Self {
        self.spawn_failures.push(prefix.to_string());
        self
    }

    /// Lines fed to `run_streaming` callbacks.
    pub fn stream(mut self, lines: &[&str]) -> Self {
        self.stream_lines = lines.iter().map(|l| (*l).to_string()).collect();
        self
    }

    /// Exit code for `run_status` and `run_streaming`.
    pub fn status(mut self, code: i32) -> Self {
        self.status_code = code;
        self
    }

    /// Ctrl-C arrives while `run_streaming` runs, after the scripted lines.
    pub fn interrupt(mut self) -> Self {
        self.interrupt_stream = true;
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(Call::line).collect()
    }

    pub fn call_starting_with(&self, prefix: &str) -> Option<Call> {
        self.calls
            .borrow()
            .iter()
            .find(|c| c.line().starts_with(prefix))
            .cloned()
    }

    fn record(
        &self,
        program: &str,
        args: &[&str],
        stdin: Option<&[u8]>,
        envs: &[(&str, &str)],
    ) -> Result<String> {
        let call = Call {
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            stdin: stdin.map(<[u8]>::to_vec),
            envs: envs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        };
        let line = call.line();
        self.calls.borrow_mut().push(call);
        if self.spawn_failures.iter().any(|p| line.starts_with(p.as_str())) {
            anyhow::bail!("failed to spawn {program}");
        }
        Ok(line)
    }

    fn output_for(&self, line: &str) -> Output {
        self.responses
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map_or_else(|| ok_output(b""), |(_, out)| out.clone())
    }
}

impl CommandRunner for MockRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        let line = self.record(program, args, None, &[])?;
        Ok(self.output_for(&line))
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<Output> {
        self.run(program, args).await
    }

    async fn run_with_stdin(&self, program: &str, args: &[&str], stdin: &[u8]) -> Result<Output> {
        let line = self.record(program, args, Some(stdin), &[])?;
        Ok(self.output_for(&line))
    }

    async fn run_status(
        &self,
        program: &str,
        args: &[&str],
        envs: &[(&str, &str)],
    ) -> Result<ExitStatus> {
        self.record(program, args, None, envs)?;
        Ok(exit_status(self.status_code))
    }

    async fn run_streaming(
        &self,
        program: &str,
        args: &[&str],
        on_line: &mut dyn FnMut(&str),
    ) -> Result<ExitStatus> {
        self.record(program, args, None, &[])?;
        for line in &self.stream_lines {
            on_line(line);
        }
        if self.interrupt_stream {
            return Err(ProcessError::Interrupted(program.to_string()).into());
        }
        Ok(exit_status(self.status_code))
    }
}

// ── Mock: prompter ────────────────────────────────────────────────────────────

pub enum Answer {
    Text(String),
    Interrupt,
}

/// Pops one scripted answer per prompt; an empty answer falls back to the
/// prompt's default. Running out of answers is an error.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    pub asked: RefCell<Vec<String>>,
    pub clears: RefCell<usize>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| Answer::Text((*a).to_string())).collect()),
            ..Self::default()
        }
    }

    /// Append a Ctrl-C after the scripted answers.
    pub fn then_interrupt(self) -> Self {
        self.answers.borrow_mut().push_back(Answer::Interrupt);
        self
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, prompt: &str) -> Result<String> {
        self.asked.borrow_mut().push(prompt.to_string());
        match self.answers.borrow_mut().pop_front() {
            Some(Answer::Text(text)) => Ok(text.trim().to_string()),
            Some(Answer::Interrupt) => Err(PromptError::Interrupted.into()),
            None => anyhow::bail!("no scripted answer for prompt `{prompt}`"),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let answer = self.next(prompt)?;
        Ok(match default {
            Some(default) if answer.is_empty() => default.to_string(),
            _ => answer,
        })
    }

    fn password(&self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn clear_screen(&self) {
        *self.clears.borrow_mut() += 1;
    }
}

// ── Mock: reporter ────────────────────────────────────────────────────────────

/// Records events as `"<kind>: <message>"`.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, kind: &str, message: &str) {
        self.events.borrow_mut().push(format!("{kind}: {message}"));
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.events.borrow().iter().any(|e| e.contains(needle))
    }

    pub fn of_kind(&self, kind: &str) -> Vec<String> {
        let prefix = format!("{kind}: ");
        self.events
            .borrow()
            .iter()
            .filter_map(|e| e.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.push("step", message);
    }
    fn success(&self, message: &str) {
        self.push("ok", message);
    }
    fn warn(&self, message: &str) {
        self.push("warn", message);
    }
    fn error(&self, message: &str) {
        self.push("error", message);
    }
    fn command(&self, command_line: &str) {
        self.push("cmd", command_line);
    }
    fn line(&self, text: &str) {
        self.push("line", text);
    }
    fn begin_busy(&self, message: &str) {
        self.push("busy", message);
    }
    fn end_busy(&self) {
        self.push("idle", "");
    }
}

/// Screens are recorded as `"screen: <name>"` in the same event log.
impl MenuScreens for RecordingReporter {
    fn transfer_banner(&self) {
        self.push("screen", "transfer_banner");
    }
    fn transfer_menu(&self) {
        self.push("screen", "transfer_menu");
    }
    fn transfer_tips(&self) {
        self.push("screen", "transfer_tips");
    }
    fn ssh_menu(&self) {
        self.push("screen", "ssh_menu");
    }
    fn ssh_summary(&self, summary: &InstallSummary) {
        self.push(
            "screen",
            &format!("ssh_summary {}:{}", summary.wsl_ip, summary.listen_port),
        );
    }
}

// ── Mock: IP store ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemIpStore {
    pub value: RefCell<Option<String>>,
}

impl MemIpStore {
    pub fn with(ip: &str) -> Self {
        Self {
            value: RefCell::new(Some(ip.to_string())),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl IpStore for MemIpStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.value.borrow().clone())
    }
    fn save(&self, ip: &str) -> Result<()> {
        *self.value.borrow_mut() = Some(ip.to_string());
        Ok(())
    }
    fn clear(&self) -> Result<()> {
        *self.value.borrow_mut() = None;
        Ok(())
    }
}

// ── Mock: local filesystem ────────────────────────────────────────────────────

/// `~` expands to `/home/me`; only the listed files exist.
#[derive(Default)]
pub struct FakeFs {
    files: HashMap<String, u64>,
}

impl FakeFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, size: u64) -> Self {
        self.files.insert(path.to_string(), size);
        self
    }
}

impl LocalFs for FakeFs {
    fn expand(&self, path: &str) -> String {
        match path.strip_prefix('~') {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => format!("/home/me{rest}"),
            _ => path.to_string(),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path.to_string_lossy().as_ref())
    }

    fn file_size(&self, path: &Path) -> Option<u64> {
        self.files.get(path.to_string_lossy().as_ref()).copied()
    }
}
