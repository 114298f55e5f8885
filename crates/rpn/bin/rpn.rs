//! RPN command-line interpreter.
//!
//! Usage:
//!   rpn <file>        Evaluate a file line by line
//!   rpn -e <line>     Evaluate one line
//!   rpn               Read lines from stdin

use std::{
    env,
    io::{self, BufRead},
    path::PathBuf,
    process::ExitCode,
};

use rpn::{Session, SessionError, Value};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const USAGE: &str = "\
Usage: rpn [OPTIONS] [FILE]

Arguments:
  [FILE]  Word-source file to evaluate line by line

Options:
  -e <LINE>        Evaluate LINE
  --config <PATH>  Load interpreter settings from a TOML file
  -h, --help       Print this help message

If no FILE or -e is given, reads lines from stdin.
Set RUST_LOG to adjust diagnostics (default: warn,rpn::trace=info).";

const DEFAULT_FILTER: &str = "warn,rpn::trace=info";

enum Source {
    Line(String),
    File(PathBuf),
    Stdin,
}

enum Action {
    Run {
        source: Source,
        config: Option<PathBuf>,
    },
    Help,
}

fn parse_args(args: &[String]) -> Result<Action, String> {
    let mut source = None;
    let mut config = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let next = match arg.as_str() {
            "-h" | "--help" => return Ok(Action::Help),
            "-e" => Source::Line(iter.next().ok_or("-e needs a line")?.clone()),
            "--config" => {
                config = Some(PathBuf::from(iter.next().ok_or("--config needs a path")?));
                continue;
            }
            "-" => Source::Stdin,
            flag if flag.starts_with('-') => {
                return Err(format!("unknown option {flag}\n\n{USAGE}"));
            }
            file => Source::File(PathBuf::from(file)),
        };
        if source.replace(next).is_some() {
            return Err(USAGE.into());
        }
    }

    Ok(Action::Run {
        source: source.unwrap_or(Source::Stdin),
        config,
    })
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn print_stack(stack: &[Value]) {
    for value in stack {
        println!("{value}");
    }
}

/// Evaluate stdin a line at a time; a failing line is reported and the
/// next one still runs.
fn run_stdin(session: &mut Session) -> bool {
    let mut ok = true;
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                return false;
            }
        };
        if let Err(e) = session.eval(&line) {
            eprintln!("{e}");
            ok = false;
        }
    }
    ok
}

fn run(source: Source, config: Option<PathBuf>) -> Result<bool, SessionError> {
    let mut session = match config {
        Some(path) => Session::from_config_file(&path)?,
        None => Session::new()?,
    };

    let ok = match source {
        Source::Line(line) => session.eval(&line).map(|_| ()),
        Source::File(path) => session.run_file(&path).map(|_| ()),
        Source::Stdin => {
            let ok = run_stdin(&mut session);
            print_stack(session.stack().as_slice());
            return Ok(ok);
        }
    };

    print_stack(session.stack().as_slice());
    match ok {
        Ok(()) => return Ok(true),
        Err(SessionError::Eval { status, .. }) => println!("{status}"),
        Err(SessionError::File(e)) => {
            eprintln!("{e}");
            if e.line > 0 {
                println!("{}", session.status());
            }
        }
        Err(other) => eprintln!("{other}"),
    }
    Ok(false)
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    match parse_args(&args) {
        Ok(Action::Help) => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Action::Run { source, config }) => match run(source, config) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_reads_stdin() {
        let action = parse_args(&[]).unwrap();
        assert!(matches!(action, Action::Run { source: Source::Stdin, config: None }));
    }

    #[test]
    fn line_and_config() {
        let action = parse_args(&args(&["--config", "rpn.toml", "-e", "1 2 +"])).unwrap();
        match action {
            Action::Run { source: Source::Line(line), config: Some(path) } => {
                assert_eq!(line, "1 2 +");
                assert_eq!(path, PathBuf::from("rpn.toml"));
            }
            _ => panic!("expected a line with a config"),
        }
    }

    #[test]
    fn help_wins() {
        assert!(matches!(parse_args(&args(&["demo.rpn", "--help"])), Ok(Action::Help)));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(&args(&["--verbose"])).is_err());
        assert!(parse_args(&args(&["-e"])).is_err());
        assert!(parse_args(&args(&["a.rpn", "b.rpn"])).is_err());
    }
}
