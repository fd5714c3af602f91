// Console prompts. The composer asks for missing text through the `Prompt`
// trait so tests can hand it fixed answers instead of a terminal.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Input;

use crate::error::ComposeError;

/// A source of one line of text per question.
pub trait Prompt {
    /// Show `message` and return the answer without its trailing newline.
    fn ask(&mut self, message: &str) -> Result<String, ComposeError>;
}

/// Asks on the terminal. With an interactive stderr the question goes
/// through `dialoguer`; otherwise (piped or redirected runs) one line is
/// read straight from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&mut self, message: &str) -> Result<String, ComposeError> {
        // dialoguer answers "" without reading anything when stderr is not a tty.
        if !io::stderr().is_terminal() {
            return LinePrompt::new(io::stdin().lock(), io::stdout()).ask(message);
        }

        // `Input` appends ": " to the prompt itself.
        Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .map_err(ComposeError::Prompt)
    }
}

/// Writes `"<message>: "` to `output` and reads one line from `input`.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LinePrompt { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, message: &str) -> Result<String, ComposeError> {
        write!(self.output, "{message}: ").map_err(ComposeError::Prompt)?;
        self.output.flush().map_err(ComposeError::Prompt)?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(ComposeError::Prompt)?;
        Ok(strip_newline(line))
    }
}

fn strip_newline(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
