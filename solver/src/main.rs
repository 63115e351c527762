use std::io::{self, stdout};
use std::path::Path;
use std::{env, process};

use crossterm::{cursor::Show, execute, style::ResetColor};

use maze::SearchOutcome;
use solver::{
    config::Config,
    input::{prompt_file_name, validate_file_name},
    run,
};

fn main() {
    env_logger::init();

    ctrlc::set_handler(move || {
        let _ = execute!(stdout(), ResetColor, Show);
        println!("\nSearch interrupted.");
        process::exit(130);
    })
    .expect("error setting Ctrl-C handler");

    let config = Config::from_env();

    let file_name = match input_file_name(&config) {
        Ok(Some(name)) => name,
        Ok(None) => {
            eprintln!("Error: No input file name given.");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: Failed to read the input file name.");
            eprintln!("Details: {}.", e);
            process::exit(1);
        }
    };

    match run::run(&config, Path::new(&file_name), &mut stdout()) {
        Ok(outcome) => match outcome {
            SearchOutcome::Found(paths) => println!(
                "Found {} path(s); written to {}.",
                paths.len(),
                config.output.display()
            ),
            SearchOutcome::NoPaths | SearchOutcome::Blocked => {
                println!("No possible paths; see {}.", config.output.display())
            }
        },
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(1);
        }
    }
}

/// The first command-line argument wins, then `MAZE_INPUT`, then a prompt.
fn input_file_name(config: &Config) -> io::Result<Option<String>> {
    let given = env::args().nth(1).or_else(|| config.input.clone());

    if let Some(name) = given {
        match validate_file_name(&name) {
            Ok(()) => return Ok(Some(name)),
            Err(e) => eprintln!("'{}' is not a valid file name ({}).", name, e),
        }
    }

    let stdin = io::stdin();
    prompt_file_name(&mut stdin.lock(), &mut stdout())
}
