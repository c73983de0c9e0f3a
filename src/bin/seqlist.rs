//! Runs a list script from a file (or stdin) and prints each output.
//!
//! Usage: `seqlist [--config <file.toml>] [script]`

use std::env;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use colored::Colorize;
use log::debug;
use seqlist::{ListConfig, ScriptError, Session};

struct Args {
    config: Option<PathBuf>,
    script: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        script: None,
    };
    let mut raw = env::args().skip(1);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = raw.next().ok_or("--config needs a file path")?;
                args.config = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                return Err("usage: seqlist [--config <file.toml>] [script]".to_string());
            }
            _ if args.script.is_none() => args.script = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument '{arg}'")),
        }
    }
    Ok(args)
}

fn run(args: Args) -> Result<Vec<String>, ScriptError> {
    let config = match &args.config {
        Some(path) => ListConfig::load(path)?,
        None => ListConfig::default(),
    };
    debug!("running with {config:?}");

    let mut session = Session::new(config);
    match &args.script {
        Some(path) => session.run_file(path),
        None => {
            let mut script = String::new();
            io::stdin().read_to_string(&mut script)?;
            session.run(&script)
        }
    }
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message.yellow());
            process::exit(2);
        }
    };

    match run(args) {
        Ok(outputs) => {
            for output in outputs {
                println!("{output}");
            }
        }
        Err(err) => {
            if let ScriptError::Command { outputs, .. } = &err {
                for output in outputs {
                    println!("{output}");
                }
            }
            eprintln!("{} {err}", "error:".red().bold());
            process::exit(1);
        }
    }
}
