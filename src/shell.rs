use std::io::{BufRead, Write};

use anyhow::Result;

/// What the menu loop does when the user picks "launch"
pub trait LaunchAction {
    fn launch(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    MenuDisplayed,
    Running,
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Launch,
    Close,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Launch),
            "2" => Some(Self::Close),
            _ => None,
        }
    }
}

const MENU: &str = "Welcome to the FacePhoto program\n\n1. Launch program\n2. Close program\n";

/// Console menu over injectable input and output
pub struct Shell<R, W> {
    input: R,
    output: W,
    state: ShellState,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            state: ShellState::MenuDisplayed,
        }
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    /// Perform one transition and return the new state
    pub fn step<A: LaunchAction>(&mut self, action: &mut A) -> Result<ShellState> {
        self.state = match self.state {
            ShellState::MenuDisplayed => self.prompt()?,
            ShellState::Running => {
                if let Err(error) = action.launch() {
                    tracing::error!("launch failed: {:#}", error);
                    writeln!(self.output, "Launch failed: {:#}", error)?;
                }
                ShellState::MenuDisplayed
            }
            ShellState::Exited => ShellState::Exited,
        };
        Ok(self.state)
    }

    /// Loop until the user closes the program or input ends
    pub fn run<A: LaunchAction>(&mut self, action: &mut A) -> Result<()> {
        while self.step(action)? != ShellState::Exited {}
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self) -> Result<ShellState> {
        write!(self.output, "{}", MENU)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(ShellState::Exited);
        }

        Ok(match MenuChoice::parse(&line) {
            Some(MenuChoice::Launch) => ShellState::Running,
            Some(MenuChoice::Close) => ShellState::Exited,
            None => {
                writeln!(self.output, "Unknown option '{}', enter 1 or 2", line.trim())?;
                ShellState::MenuDisplayed
            }
        })
    }
}
