//! graphql-sock CLI
//!
//! Command-line interface for converting semantic-non-null GraphQL schemas.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use graphql_sock::{
    convert_schema, load_schema_auto, print_schema, validate, Mode, Schema, ValidateError,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "graphql-sock")]
#[command(about = "Convert semantic-non-null GraphQL schemas to strict or nullable SDL")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn semantic non-null positions into enforced non-null (`!`)
    Strict {
        /// Input schema: file path or URL (http:// or https://)
        #[arg(long, short)]
        input: String,

        /// Output file (stdout if not specified)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Remove semantic non-null annotations, leaving positions nullable
    Nullable {
        /// Input schema: file path or URL (http:// or https://)
        #[arg(long, short)]
        input: String,

        /// Output file (stdout if not specified)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Write both the strict and the nullable schema from one input
    Split {
        /// Input schema: file path or URL (http:// or https://)
        #[arg(long, short)]
        input: String,

        /// Output file for the strict schema
        #[arg(long)]
        strict_output: PathBuf,

        /// Output file for the nullable schema
        #[arg(long)]
        nullable_output: PathBuf,
    },

    /// Check a schema without converting it
    Validate {
        /// Schema source: file path or URL (http:// or https://)
        schema: String,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "graphql_sock=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Strict { input, output } => run_convert(&input, Mode::Strict, output.as_deref()),
        Commands::Nullable { input, output } => {
            run_convert(&input, Mode::Nullable, output.as_deref())
        }
        Commands::Split {
            input,
            strict_output,
            nullable_output,
        } => run_split(&input, &strict_output, &nullable_output),
        Commands::Validate { schema, json } => run_validate(&schema, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run_convert(source: &str, mode: Mode, output: Option<&Path>) -> Result<(), u8> {
    let schema = load_valid_schema(source)?;
    let sdl = convert_and_print(&schema, mode)?;

    match output {
        Some(path) => write_output(path, &sdl),
        None => {
            print!("{}", sdl);
            Ok(())
        }
    }
}

fn run_split(source: &str, strict_output: &Path, nullable_output: &Path) -> Result<(), u8> {
    let schema = load_valid_schema(source)?;

    // Both conversions start from the same loaded schema.
    let strict = convert_and_print(&schema, Mode::Strict)?;
    let nullable = convert_and_print(&schema, Mode::Nullable)?;

    write_output(strict_output, &strict)?;
    write_output(nullable_output, &nullable)
}

fn run_validate(source: &str, json_output: bool) -> Result<(), u8> {
    let result = load_schema_auto(source)
        .map_err(ValidateError::from)
        .and_then(|schema| validate(&schema));

    match result {
        Ok(()) => {
            if json_output {
                println!(r#"{{"valid":true}}"#);
            } else {
                println!("Valid");
            }
            Ok(())
        }
        Err(ValidateError::Invalid { errors }) => {
            if json_output {
                let output = serde_json::json!({
                    "valid": false,
                    "errors": errors
                });
                println!("{}", output);
            } else {
                eprintln!("Invalid schema:");
                for error in errors {
                    eprintln!("  {}", error);
                }
            }
            Err(1)
        }
        Err(ValidateError::Load(e)) => {
            if json_output {
                let output = serde_json::json!({
                    "valid": false,
                    "error": e.to_string()
                });
                println!("{}", output);
            } else {
                eprintln!("Error: {}", e);
            }
            Err(e.exit_code() as u8)
        }
    }
}

/// Load a schema and reject it if validation fails.
fn load_valid_schema(source: &str) -> Result<Schema, u8> {
    let schema = load_schema_auto(source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    validate(&schema).map_err(|e| {
        eprintln!("Error: {}", e);
        if let ValidateError::Invalid { errors } = &e {
            for error in errors {
                eprintln!("  {}", error);
            }
        }
        e.exit_code() as u8
    })?;

    Ok(schema)
}

fn convert_and_print(schema: &Schema, mode: Mode) -> Result<String, u8> {
    let converted = convert_schema(schema, mode);
    print_schema(&converted).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })
}

fn write_output(path: &Path, sdl: &str) -> Result<(), u8> {
    std::fs::write(path, sdl).map_err(|e| {
        eprintln!("Error writing to {}: {}", path.display(), e);
        3u8
    })
}
