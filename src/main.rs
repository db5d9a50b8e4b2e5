use bindweed::settings::{Config, OutputFormat, TREE_FILE_EXTENSION};
use bindweed::{Analyzer, print_errors, print_warnings};
use colour::{e_red_ln, green_ln_bold, grey_ln, red_ln};
use std::path::PathBuf;
use std::time::Instant;
use std::{env, fs};

enum Command {
    Analyze(PathBuf),
}

#[derive(PartialEq, Debug)]
pub enum Flag {
    Json,
    HideWarnings,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help(false);
        return;
    }

    let command = match get_command(&args[1..]) {
        Ok(command) => command,
        Err(e) => {
            red_ln!("{}", e);
            print_help(true);
            return;
        }
    };

    let flags = get_flags(&args);

    match command {
        Command::Analyze(path) => {
            let start = Instant::now();

            let mut config = Config::new(path);
            if flags.contains(&Flag::Json) {
                config.format = OutputFormat::Json;
            }
            config.hide_warnings = flags.contains(&Flag::HideWarnings);

            match analyze(&config) {
                Ok(had_errors) => {
                    if config.format == OutputFormat::Text {
                        let duration = start.elapsed();
                        grey_ln!("------------------------------------");
                        if had_errors {
                            e_red_ln!("Analyzed with errors in: {:?}", duration);
                        } else {
                            print!("\nAnalyzed in: ");
                            green_ln_bold!("{:?}", duration);
                        }
                    }
                }
                Err(e) => {
                    e_red_ln!("Error while analyzing: \n");
                    bindweed::print_formatted_error(&e);
                }
            }
        }
    }
}

/// Run one analysis. The Err case is a fatal file or front-end problem;
/// Ok(true) means body-scoped errors were reported but the run finished.
fn analyze(config: &Config) -> Result<bool, bindweed::AnalysisError> {
    let source = fs::read_to_string(&config.input_path)
        .map_err(|e| bindweed::AnalysisError::file_error(&config.input_path, e.to_string()))?;

    let analyzer = Analyzer::new(config);
    let program = analyzer.source_to_tree(&source)?;
    let report = analyzer.tree_to_report(&program);

    match config.format {
        OutputFormat::Json => {
            // One object on stdout so the report can be piped or diffed
            println!(
                "{}",
                serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Text => {
            if !config.hide_warnings {
                print_warnings(&report.warnings);
            }
            print_errors(&report.errors);

            for body in &report.bodies {
                grey_ln!("------------------------------------");
                println!("{}:", body.name);
                for binding in &body.bindings {
                    println!("  {}: {}", binding.name, binding.chain);
                }
            }
        }
    }

    Ok(report.has_errors())
}

fn get_command(args: &[String]) -> Result<Command, String> {
    let command = args.first().map(String::as_str);

    match command {
        Some("analyze") => match args.get(1).map(String::as_str) {
            Some(path) if !path.is_empty() => Ok(Command::Analyze(PathBuf::from(path))),
            _ => Err("'analyze' needs a path to a front-end tree file".to_string()),
        },

        // A bare path is treated as 'analyze <path>'
        Some(path) if path.ends_with(TREE_FILE_EXTENSION) => {
            Ok(Command::Analyze(PathBuf::from(path)))
        }

        _ => Err("Invalid command: expected 'analyze <path>'".to_string()),
    }
}

fn get_flags(args: &[String]) -> Vec<Flag> {
    let mut flags = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--json" => flags.push(Flag::Json),
            "--hide-warnings" => flags.push(Flag::HideWarnings),

            _ => {}
        }
    }

    flags
}

fn print_help(commands_only: bool) {
    if !commands_only {
        grey_ln!("------------------------------------");
        green_ln_bold!("bindweed - nested-list alias analyzer");
        println!("Usage: bindweed <command> <args>");
    }
    green_ln_bold!("Commands:");
    println!("  analyze <path>       - Analyzes a front-end tree file (.{TREE_FILE_EXTENSION})");
    println!("Flags:");
    println!("  --json               - Emit the whole report as JSON on stdout");
    println!("  --hide-warnings      - Only print errors and environment dumps");
}
