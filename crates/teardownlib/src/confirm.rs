use std::io::{self, BufRead, Write};

use crate::error::Error;

/// The user's answer to "really tear down?".
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Declined,
}

/// Interpret one line of input.  `None` means ask again.
pub fn parse_answer(line: &str) -> Option<Confirmation> {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(Confirmation::Accepted),
        "n" | "no" => Some(Confirmation::Declined),
        _ => None,
    }
}

/// A yes/no prompt over line-oriented input.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask until a recognised answer is given.  Running out of input is an
    /// error: there is no one left to say yes.
    pub fn ask(&mut self) -> Result<Confirmation, Error> {
        let mut line = String::new();
        loop {
            writeln!(
                self.output,
                "Please type (y)es or (n)o and then press enter:"
            )?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "no confirmation given",
                )
                .into());
            }

            if let Some(answer) = parse_answer(&line) {
                return Ok(answer);
            }
        }
    }
}
