use std::process::Command;

use shlex::Shlex;

use crate::utils::errors::{OptionResultTrait as _, ResultWithError};

pub struct ShlexUtils {}

impl ShlexUtils {
    /// Splits a shell-style command line into a program and its arguments.
    /// No shell is involved: pipes and redirections are passed through verbatim.
    pub fn parse_command(input: &str) -> ResultWithError<Command> {
        let mut lexer = Shlex::new(input);
        let parts: Vec<_> = lexer.by_ref().collect();
        if lexer.had_error {
            return Err(format!("Unbalanced quotes in command: {input}").into());
        }

        let (program, args) = parts
            .split_first()
            .auto_err(&format!("Empty command: '{input}'"))?;
        let mut command = Command::new(program);
        command.args(args);
        Ok(command)
    }
}
