#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use odoo_tools::error::{Error, Result};
use odoo_tools::prompt::Prompter;
use odoo_tools::runner::{CommandRunner, OutputMode};

enum Response {
    Output(String),
    Failure(String),
}

/// Records the commands it is given and replays canned responses in order.
/// Once the responses run out, commands succeed with an empty output.
#[derive(Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<(String, OutputMode)>>,
    responses: RefCell<VecDeque<Response>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, output: &str) -> Self {
        self.responses.borrow_mut().push_back(Response::Output(output.to_string()));
        self
    }

    pub fn fail(self, stderr: &str) -> Self {
        self.responses.borrow_mut().push_back(Response::Failure(stderr.to_string()));
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(cmd, _)| cmd.clone()).collect()
    }

    pub fn modes(&self) -> Vec<OutputMode> {
        self.calls.borrow().iter().map(|(_, mode)| *mode).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str, mode: OutputMode) -> Result<String> {
        self.calls.borrow_mut().push((command.to_string(), mode));
        match self.responses.borrow_mut().pop_front() {
            None => Ok(String::new()),
            Some(Response::Output(output)) => Ok(output),
            Some(Response::Failure(stderr)) => Err(Error::CommandError {
                command: command.to_string(),
                status: "exit status: 1".to_string(),
                stderr,
            }),
        }
    }
}

/// Answers prompts from a fixed list and remembers what was asked.
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    pub asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::PromptError("no more answers".to_string()))
    }
}
