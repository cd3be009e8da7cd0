//! Schema Stack CLI
//!
//! Generates schemas from JSON documents and resolves paths inside values
//! and schemas.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use schema_stack::{GeneratorConfig, OutputConfig, PathStack, SchemaGenerator};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-stack")]
#[command(about = "Generate JSON Schema from values and resolve paths against schemas")]
struct Cli {
    /// Config file (defaults to schema-stack.toml lookup)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print compact JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the schema describing a JSON document
    Generate {
        /// JSON file ("-" for stdin)
        file: PathBuf,
        /// List every object property as required
        #[arg(long)]
        require_all: bool,
        /// Infer string formats (date-time, email, ...)
        #[arg(long)]
        infer_formats: bool,
        /// Describe integral numbers as "number"
        #[arg(long)]
        no_convert_ints: bool,
    },

    /// Read the value at a path
    Get {
        /// JSON file ("-" for stdin)
        file: PathBuf,
        /// Slash-delimited path
        path: String,
        /// Print null instead of failing on a missing container
        #[arg(long)]
        lenient: bool,
        /// Treat all-digit segments as array indices
        #[arg(long)]
        indices: bool,
    },

    /// Write a JSON value at a path and print the updated document
    Set {
        /// JSON file ("-" for stdin)
        file: PathBuf,
        /// Slash-delimited path
        path: String,
        /// JSON value to write
        value: String,
        /// Treat all-digit segments as array indices
        #[arg(long)]
        indices: bool,
    },

    /// Find the subschema describing the value at a path
    Resolve {
        /// JSON Schema file ("-" for stdin)
        schema: PathBuf,
        /// Slash-delimited value path
        path: String,
        /// Treat all-digit segments as array indices
        #[arg(long)]
        indices: bool,
    },

    /// Print or save the effective configuration
    Config {
        /// Write the configuration to this file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref().map(path_str).transpose()?;
    let mut config = GeneratorConfig::load_from(config_path)
        .context("failed to load configuration")?;
    if cli.compact {
        config.output.format = schema_stack::OutputFormat::Compact;
    }

    match cli.command {
        Commands::Generate {
            file,
            require_all,
            infer_formats,
            no_convert_ints,
        } => {
            let value = read_json(&file)?;
            let mut options = config.generator.clone();
            options.require_all |= require_all;
            options.infer_string_format |= infer_formats;
            if no_convert_ints {
                options.convert_ints = false;
            }
            let schema = SchemaGenerator::new(options).generate(&value)?;
            print_json(&config.output, &schema)
        }

        Commands::Get {
            file,
            path,
            lenient,
            indices,
        } => {
            let value = read_json(&file)?;
            let stack = parse_path(&path, indices);
            let found = stack
                .access_on(&value, !lenient)
                .with_context(|| format!("cannot read \"{}\"", stack))?;
            print_json(&config.output, found.unwrap_or(&Value::Null))
        }

        Commands::Set {
            file,
            path,
            value,
            indices,
        } => {
            let mut document = read_json(&file)?;
            let new_value: Value =
                serde_json::from_str(&value).context("value is not valid JSON")?;
            let stack = parse_path(&path, indices);
            if stack.is_empty() {
                document = new_value;
            } else {
                let mut accessor = stack
                    .get_accessor(&mut document)
                    .with_context(|| format!("cannot write \"{}\"", stack))?;
                accessor.set(new_value);
            }
            print_json(&config.output, &document)
        }

        Commands::Resolve {
            schema,
            path,
            indices,
        } => {
            let schema = read_json(&schema)?;
            let stack = parse_path(&path, indices);
            let schema_path = stack.convert_for_schema(&schema)?;
            let subschema = schema_path.access_on(&schema, true)?;
            print_json(
                &config.output,
                &json!({
                    "path": schema_path,
                    "schema": subschema,
                }),
            )
        }

        Commands::Config { output } => match output {
            Some(output) => {
                config.save(path_str(&output)?)?;
                println!("Saved configuration to {}", output.display());
                Ok(())
            }
            None => {
                print!("{}", toml::to_string_pretty(&config)?);
                Ok(())
            }
        },
    }
}

fn parse_path(text: &str, indices: bool) -> PathStack {
    if indices {
        PathStack::from_string_with_indices(text)
    } else {
        PathStack::from_string(text)
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn print_json(output: &OutputConfig, value: &Value) -> Result<()> {
    println!("{}", output.render(value)?);
    Ok(())
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .with_context(|| format!("path is not valid UTF-8: {}", path.display()))
}
