//! Common utils shared by the REPL and non-interactive mode.

use log::debug;

use std::{
    cell::RefCell,
    collections::BTreeMap,
    io::{self, Write},
    rc::Rc,
};

use infix_eval::Environment;

use crate::library::ReplLiteral;

/// Exit code on evaluation failure in non-interactive mode.
pub const ERROR_EXIT_CODE: i32 = 2;

const HELP: &str = "\
Enter an expression to evaluate it, e.g. `sqrt(16) + 2 * $x`.
Commands:
    :vars             List defined variables
    :set NAME = TEXT  Define a variable; its text is substituted for `$NAME`
    :help             Print this message";

type Vars = Rc<RefCell<BTreeMap<String, String>>>;

/// Evaluation session: an environment together with the variables it resolves.
pub struct Session<T> {
    env: Environment<T>,
    vars: Vars,
}

impl<T: ReplLiteral> Session<T> {
    pub fn new(mut env: Environment<T>, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let vars: Vars = Rc::new(RefCell::new(vars.into_iter().collect()));
        let resolved_vars = Rc::clone(&vars);
        env.set_resolver(move |name: &str| {
            resolved_vars
                .borrow()
                .get(name)
                .cloned()
                .unwrap_or_default()
        });
        debug!("created session with {} variable(s)", vars.borrow().len());
        Self { env, vars }
    }

    pub fn print_greeting(&self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "infix-eval REPL v{}", env!("CARGO_PKG_VERSION"))?;
        writeln!(stdout, "Type `:help` for help. Press Ctrl+C or Ctrl+D to exit.")
    }

    /// Processes a single line of input, which is either a command or an expression.
    /// Blank lines are ignored. Returns `false` if processing failed.
    pub fn process_line(&self, line: &str) -> io::Result<bool> {
        let line = line.trim();
        if line.is_empty() {
            Ok(true)
        } else if let Some(command) = line.strip_prefix(':') {
            self.process_command(command)
        } else {
            self.evaluate_and_print(line)
        }
    }

    /// Evaluates an expression and prints the result to stdout, or the error to stderr.
    pub fn evaluate_and_print(&self, expression: &str) -> io::Result<bool> {
        match self.env.evaluate(expression) {
            Ok(value) => {
                writeln!(io::stdout().lock(), "{value}")?;
                Ok(true)
            }
            Err(err) => {
                writeln!(io::stderr().lock(), "error: {err}")?;
                Ok(false)
            }
        }
    }

    fn process_command(&self, command: &str) -> io::Result<bool> {
        let (name, rest) = command
            .split_once(char::is_whitespace)
            .unwrap_or((command, ""));
        match name {
            "vars" => {
                let mut stdout = io::stdout().lock();
                for (name, value) in &*self.vars.borrow() {
                    writeln!(stdout, "{name} = {value}")?;
                }
                Ok(true)
            }
            "set" => self.set_var(rest),
            "help" => {
                writeln!(io::stdout().lock(), "{HELP}")?;
                Ok(true)
            }
            _ => {
                writeln!(io::stderr().lock(), "error: unknown command `:{name}`")?;
                Ok(false)
            }
        }
    }

    fn set_var(&self, definition: &str) -> io::Result<bool> {
        match parse_definition(definition) {
            Some((name, value)) => {
                debug!("setting variable `{name}` to `{value}`");
                self.vars.borrow_mut().insert(name, value);
                Ok(true)
            }
            None => {
                writeln!(
                    io::stderr().lock(),
                    "error: invalid definition `{definition}`; expected `NAME = TEXT`"
                )?;
                Ok(false)
            }
        }
    }
}

/// Parses a variable definition like `name = text`. The name must be usable after `$`
/// in expressions.
pub fn parse_definition(definition: &str) -> Option<(String, String)> {
    let (name, value) = definition.split_once('=')?;
    let name = name.trim();
    let mut chars = name.chars();
    let first = chars.next()?;
    let is_valid = (first.is_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '.');
    is_valid.then(|| (name.to_owned(), value.trim().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_definitions() {
        assert_eq!(
            parse_definition("x = 1 + 2"),
            Some(("x".to_owned(), "1 + 2".to_owned()))
        );
        assert_eq!(
            parse_definition("foo.bar=baz"),
            Some(("foo.bar".to_owned(), "baz".to_owned()))
        );
        assert_eq!(parse_definition("x"), None);
        assert_eq!(parse_definition(" = 1"), None);
        assert_eq!(parse_definition("1x = 1"), None);
        assert_eq!(parse_definition("a b = 1"), None);
    }

    #[test]
    fn session_resolves_vars() {
        let env = Environment::<f64>::standard_float();
        let session = Session::new(env, [("x".to_owned(), "3".to_owned())]);
        assert!(session.set_var("y = $x").unwrap());
        assert_eq!(
            session.env.evaluate("$y * 2 + 1").unwrap(),
            infix_eval::Value::Number(7.0)
        );
        assert!(session.env.evaluate("$z").is_err());
        assert!(!session.set_var("nope").unwrap());
    }
}
