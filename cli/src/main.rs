//! Simple CLI / REPL for evaluating infix expressions.

use anyhow::format_err;
use clap::Parser;
use log::debug;
use num_bigint::BigInt;

use std::{
    io::{self, BufRead},
    process,
    str::FromStr,
};

use infix_eval::{
    arith::{Checked, NegateOnlyZero},
    Environment,
};

mod common;
mod library;
mod repl;

use crate::{
    common::{parse_definition, Session, ERROR_EXIT_CODE},
    library::{
        create_bigint_env, create_float_env, create_int_env, float_constants, ReplLiteral,
    },
    repl::repl,
};

const ABOUT: &str = "CLI and REPL for evaluating infix expressions.";

const AFTER_HELP: &str = "\
EXIT CODES:
    0    Normal exit
    1    Invalid command-line option
    2    Evaluation error in non-interactive mode";

#[derive(Debug, Clone, Copy)]
enum ArithmeticType {
    U64,
    I64,
    U128,
    I128,
    F32,
    F64,
    BigInt,
}

impl FromStr for ArithmeticType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "u64" => Ok(Self::U64),
            "i64" => Ok(Self::I64),
            "u128" => Ok(Self::U128),
            "i128" => Ok(Self::I128),
            "f32" => Ok(Self::F32),
            "f64" => Ok(Self::F64),
            "bigint" => Ok(Self::BigInt),
            _ => Err(format_err!(
                "Invalid arithmetic spec. Use one of `u64`, `i64`, `u128`, `i128`, \
                 `f32`, `f64` or `bigint`"
            )),
        }
    }
}

fn parse_var(definition: &str) -> anyhow::Result<(String, String)> {
    parse_definition(definition)
        .ok_or_else(|| format_err!("Invalid variable definition; expected `NAME=VALUE`"))
}

#[derive(Debug, Parser)]
#[command(about = ABOUT, after_help = AFTER_HELP, version)]
struct Args {
    /// Launch the REPL for infix expressions.
    #[arg(long, short)]
    interactive: bool,
    /// Type of numbers to use. Available values are `u64`, `i64`, `u128`, `i128`,
    /// `f32`, `f64` and `bigint`.
    #[arg(long, short, env = "INFIX_EVAL_ARITHMETIC", default_value = "f64")]
    arithmetic: ArithmeticType,
    /// Use wrapping semantics for integer arithmetic instead of the default checked semantics.
    /// Ignored if a non-integer number type is selected.
    #[arg(long, short)]
    wrapping: bool,
    /// Make division or remainder by zero return zero instead of an error
    /// (for integers) or a non-finite value (for floats).
    #[arg(long)]
    zero_div: bool,
    /// Variable available in expressions as `$NAME`. Can be specified multiple times.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    vars: Vec<(String, String)>,
    /// Expression to evaluate. If omitted, expressions are read from stdin, one per line.
    #[arg(conflicts_with = "interactive")]
    command: Option<String>,
}

impl Args {
    fn run(self) -> anyhow::Result<()> {
        let (wrapping, zero_div) = (self.wrapping, self.zero_div);
        match self.arithmetic {
            ArithmeticType::U64 => {
                let env = create_int_env::<u64, NegateOnlyZero>(wrapping, zero_div);
                self.run_inner(env, vec![])
            }
            ArithmeticType::I64 => {
                let env = create_int_env::<i64, Checked>(wrapping, zero_div);
                self.run_inner(env, vec![])
            }
            ArithmeticType::U128 => {
                let env = create_int_env::<u128, NegateOnlyZero>(wrapping, zero_div);
                self.run_inner(env, vec![])
            }
            ArithmeticType::I128 => {
                let env = create_int_env::<i128, Checked>(wrapping, zero_div);
                self.run_inner(env, vec![])
            }
            ArithmeticType::BigInt => {
                let env: Environment<BigInt> = create_bigint_env(zero_div);
                self.run_inner(env, vec![])
            }
            ArithmeticType::F32 => {
                let env = create_float_env::<f32>(zero_div);
                self.run_inner(env, float_constants())
            }
            ArithmeticType::F64 => {
                let env = create_float_env::<f64>(zero_div);
                self.run_inner(env, float_constants())
            }
        }
    }

    fn run_inner<T: ReplLiteral>(
        self,
        env: Environment<T>,
        predefined_vars: Vec<(String, String)>,
    ) -> anyhow::Result<()> {
        debug!("running with {:?} arithmetic", self.arithmetic);
        let vars = predefined_vars.into_iter().chain(self.vars);
        let session = Session::new(env, vars);

        if self.interactive {
            repl(&session)
        } else {
            let is_ok = match self.command {
                Some(command) => session.evaluate_and_print(&command)?,
                None => Self::run_lines(&session)?,
            };
            if !is_ok {
                process::exit(ERROR_EXIT_CODE);
            }
            Ok(())
        }
    }

    /// Processes stdin line by line. Processing continues after a failed line.
    fn run_lines<T: ReplLiteral>(session: &Session<T>) -> io::Result<bool> {
        let mut is_ok = true;
        for line in io::stdin().lock().lines() {
            is_ok &= session.process_line(&line?)?;
        }
        Ok(is_ok)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let exit_code = i32::from(err.use_stderr());
            err.print()?;
            process::exit(exit_code);
        }
    };
    args.run()
}
