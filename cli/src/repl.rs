//! REPL for infix expressions.

use rustyline::{error::ReadlineError, DefaultEditor};

use crate::{common::Session, library::ReplLiteral};

pub fn repl<T: ReplLiteral>(session: &Session<T>) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;
    session.print_greeting()?;

    loop {
        match rl.readline(">>> ") {
            Ok(line) => {
                if session.process_line(&line)? && !line.trim().is_empty() {
                    rl.add_history_entry(line)?;
                }
            }

            Err(ReadlineError::Interrupted) => {
                println!("Bye");
                break Ok(());
            }

            Err(ReadlineError::Eof) => {
                break Ok(());
            }

            Err(err) => break Err(err.into()),
        }
    }
}
