// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member mapping plan CLI
//!
//! Inspects the mapping plans described by a mapping document.
//!
//! # Usage
//!
//! ```bash
//! # Print the plan of one pair
//! membermap plan --config membermap.toml --source User --target UserDto
//!
//! # Same, as JSON
//! membermap plan --config membermap.toml --source User --target UserDto --format json
//!
//! # Check that every declared pair resolves
//! membermap validate --config membermap.toml
//!
//! # Write an example document
//! membermap gen-config --output membermap.toml
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use membermap::{ConfigError, MappingDocument, MappingMemberBuilder, MappingMemberPath, TypePair};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Member mapping plan inspector
#[derive(Parser, Debug)]
#[command(name = "membermap")]
#[command(about = "Member mapping plans - resolve source-to-target member correspondences")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the mapping plan of one type pair
    Plan {
        /// Mapping document path
        #[arg(short, long)]
        config: PathBuf,

        /// Source type name
        #[arg(short, long)]
        source: String,

        /// Target type name
        #[arg(short, long)]
        target: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: FormatArg,
    },

    /// Validate a mapping document and build every declared pair
    Validate {
        /// Mapping document path
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Generate example mapping document
    GenConfig {
        /// Output file path
        #[arg(short, long, default_value = "membermap.toml")]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match args.command {
        Commands::Plan {
            config,
            source,
            target,
            format,
        } => cmd_plan(config, TypePair::new(source, target), format),
        Commands::Validate { config } => cmd_validate(config),
        Commands::GenConfig { output } => cmd_gen_config(output),
    }
}

fn cmd_plan(
    config_path: PathBuf,
    pair: TypePair,
    format: FormatArg,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = MappingDocument::from_file(&config_path)?;
    let (registry, mapper) = document.to_parts()?;
    let plan = MappingMemberBuilder::new(&registry, &mapper).build(&pair)?;

    match format {
        FormatArg::Text => print_plan(&pair, &plan),
        FormatArg::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
    }
    Ok(())
}

fn cmd_validate(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let document = match MappingDocument::from_file(&config_path) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Configuration invalid: {}", e);
            std::process::exit(1);
        }
    };

    let (report, valid) = validation_report(&document)?;
    print!("{}", report);

    if !valid {
        eprintln!("Configuration invalid: some pairs failed to resolve");
        std::process::exit(1);
    }
    Ok(())
}

/// Build every declared pair. The flag is false when any pair fails.
fn validation_report(document: &MappingDocument) -> Result<(String, bool), ConfigError> {
    let (registry, mapper) = document.to_parts()?;
    let builder = MappingMemberBuilder::new(&registry, &mapper);

    let mut report = format!(
        "Shapes: {}\nPairs: {}\n",
        registry.len(),
        document.pairs.len()
    );

    let mut failed = 0usize;
    for (i, pair) in document.pairs().iter().enumerate() {
        match builder.build(pair) {
            Ok(plan) => {
                report.push_str(&format!("  [{}] {} ({} member(s))\n", i, pair, plan.len()))
            }
            Err(e) => {
                report.push_str(&format!("  [{}] {} FAILED: {}\n", i, pair, e));
                failed += 1;
            }
        }
    }
    report.push('\n');

    if failed > 0 {
        report.push_str(&format!("{} pair(s) failed to resolve\n", failed));
        return Ok((report, false));
    }
    report.push_str("Configuration valid!\n");
    Ok((report, true))
}

fn cmd_gen_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let toml_str = MappingDocument::example().to_toml()?;

    // Add comments
    let content = format!(
        r#"# Member Mapping Document
# Generated by membermap gen-config

{}
"#,
        toml_str
    );

    std::fs::write(&output, content)?;
    println!("Generated mapping document: {}", output.display());
    Ok(())
}

fn print_plan(pair: &TypePair, plan: &[MappingMemberPath]) {
    println!("--- Mapping Plan: {} ---", pair);
    if plan.is_empty() {
        println!("  (no members mapped)");
    }
    for entry in plan {
        println!("  {}", entry);
    }
}
