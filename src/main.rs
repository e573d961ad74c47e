//! cmdflow CLI Entry Point
//!
//! Command-line interface for inspecting, validating, and rendering
//! workflow definitions.
//!
//! # Usage
//!
//! ```bash
//! # Validate a workflow definition
//! cmdflow check deploy.yaml
//!
//! # Show the parsed model and its placeholders
//! cmdflow show deploy.yaml
//!
//! # Render the command with argument values
//! cmdflow render deploy.yaml --arg version=1.4.2
//!
//! # Reprint the definition in canonical form
//! cmdflow fmt deploy.yaml
//! ```

use std::env;
use std::process::ExitCode;

use colored::Colorize;
use log::warn;

use cmdflow::workflow::parser::{load_workflow, serialize_workflow};
use cmdflow::workflow::placeholder::{extract_placeholders, has_placeholders, substitute};
use cmdflow::workflow::validator::validate;
use cmdflow::{APP_NAME, VERSION};

/// What the invocation asked for.
#[derive(Debug)]
enum Command {
    Check { path: String },
    Show { path: String },
    Render { path: String, values: Vec<(String, String)> },
    Fmt { path: String },
}

/// Command-line configuration parsed from arguments.
#[derive(Debug)]
struct Config {
    command: Command,
    verbose: bool,
}

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{} v{}", APP_NAME, VERSION);
    println!("Shell Command Workflow Templates");
    println!();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: cmdflow [OPTIONS] <COMMAND> <WORKFLOW_FILE>");
    println!();
    println!("Commands:");
    println!("  check    Parse and validate a workflow definition");
    println!("  show     Show the parsed workflow and its placeholders");
    println!("  render   Substitute argument values into the command");
    println!("  fmt      Reprint the definition in canonical form");
    println!();
    println!("Options:");
    println!("  --arg NAME=VALUE    Value for a placeholder (render only, repeatable)");
    println!("  --verbose           Enable debug logging");
    println!("  --help              Show this help message");
    println!("  --version           Show version information");
    println!();
    println!("Examples:");
    println!("  cmdflow check deploy.yaml");
    println!("  cmdflow render deploy.yaml --arg version=1.4.2 --arg env=prod");
}

/// Parses command-line arguments into a Config struct.
fn parse_arguments(args: &[String]) -> Result<Config, String> {
    let mut verbose = false;
    let mut values: Vec<(String, String)> = Vec::new();
    let mut positionals: Vec<String> = Vec::new();
    let mut i = 1; // Skip program name

    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", APP_NAME, VERSION);
                std::process::exit(0);
            }
            "--verbose" | "-v" => {
                verbose = true;
            }
            "--arg" => {
                i += 1;
                if i >= args.len() {
                    return Err("--arg requires a NAME=VALUE argument".to_string());
                }
                let (name, value) = args[i]
                    .split_once('=')
                    .ok_or_else(|| format!("Invalid --arg '{}': expected NAME=VALUE", args[i]))?;
                values.push((name.to_string(), value.to_string()));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                positionals.push(arg.clone());
            }
        }
        i += 1;
    }

    let mut positionals = positionals.into_iter();
    let subcommand = positionals
        .next()
        .ok_or_else(|| "Missing command".to_string())?;
    let path = positionals
        .next()
        .ok_or_else(|| format!("The {} command requires a workflow file", subcommand))?;
    if let Some(extra) = positionals.next() {
        return Err(format!("Unexpected argument: {}", extra));
    }

    if subcommand != "render" && !values.is_empty() {
        return Err("--arg is only valid with the render command".to_string());
    }

    let command = match subcommand.as_str() {
        "check" => Command::Check { path },
        "show" => Command::Show { path },
        "render" => Command::Render { path, values },
        "fmt" => Command::Fmt { path },
        other => return Err(format!("Unknown command: {}", other)),
    };

    Ok(Config { command, verbose })
}

/// Parses and validates a definition, reporting every violation.
fn run_check(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    print_banner();

    let workflow = load_workflow(path)?;
    let violations = validate(&workflow);

    if violations.is_empty() {
        println!("{} '{}' is valid", "✓".green(), workflow.name);
        return Ok(());
    }

    for violation in &violations {
        eprintln!("{} {}", "✗".red(), violation);
    }

    Err(format!("{} problem(s) found in '{}'", violations.len(), path).into())
}

/// Prints the parsed model, its declared arguments, and the
/// placeholders actually used in the command.
fn run_show(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    print_banner();

    let workflow = load_workflow(path)?;

    println!("Name:         {}", workflow.name.bold());
    if let Some(description) = &workflow.description {
        println!("Description:  {}", description);
    }
    println!("Command:      {}", workflow.command);
    if !workflow.tags.is_empty() {
        println!("Tags:         {}", workflow.tags.join(", "));
    }
    if !workflow.shells.is_empty() {
        let shells: Vec<String> = workflow.shells.iter().map(|s| s.to_string()).collect();
        println!("Shells:       {}", shells.join(", "));
    }

    let placeholders = workflow.placeholders();
    if !placeholders.is_empty() {
        println!("Placeholders: {}", placeholders.join(", "));
    }

    if !workflow.arguments.is_empty() {
        println!();
        println!("Arguments:");
        for argument in &workflow.arguments {
            let mut line = format!("  {}", argument.name);
            if let Some(default) = &argument.default_value {
                line.push_str(&format!(" [default: {}]", default));
            }
            if let Some(description) = &argument.description {
                line.push_str(&format!(" - {}", description));
            }
            println!("{}", line);
        }
    }

    Ok(())
}

/// Renders the command with declared defaults and `--arg` overrides.
///
/// The rendered string is printed, never executed. Placeholders with no
/// value stay as literal `{{name}}` text and are reported as a warning.
fn run_render(path: &str, overrides: &[(String, String)]) -> Result<(), Box<dyn std::error::Error>> {
    let workflow = load_workflow(path)?;

    let mut values = workflow.default_values();
    for (name, value) in overrides {
        values.insert(name.clone(), value.clone());
    }

    let rendered = substitute(&workflow.command, &values);

    if has_placeholders(&rendered) {
        let unresolved = extract_placeholders(&rendered);
        warn!("Unresolved placeholders: {}", unresolved.join(", "));
    }

    println!("{}", rendered);
    Ok(())
}

/// Parses a definition and reprints it in canonical form.
fn run_fmt(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let workflow = load_workflow(path)?;
    print!("{}", serialize_workflow(&workflow)?);
    Ok(())
}

/// Main application entry point.
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let config = parse_arguments(&args).map_err(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage();
        e
    })?;

    // Setup logging
    setup_logging(config.verbose);

    match config.command {
        Command::Check { path } => run_check(&path),
        Command::Show { path } => run_show(&path),
        Command::Render { path, values } => run_render(&path, &values),
        Command::Fmt { path } => run_fmt(&path),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
