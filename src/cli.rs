use crate::request::{RequestBuilder, RequestDescriptor, SuppliedValues};
use crate::runtime_config::RuntimeConfig;
use crate::spec::{find_operation, load_operations};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "reqwire")]
#[command(about = "OpenAPI request builder CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a wire-ready request descriptor for one operation
    Build {
        #[arg(short, long)]
        spec: PathBuf,

        /// Operation selector: an operationId or "VERB /path"
        #[arg(short, long)]
        operation: String,

        /// JSON file with parameter values (path, query, formData, body)
        #[arg(long)]
        values: Option<PathBuf>,

        /// JSON file with header values
        #[arg(long)]
        headers: Option<PathBuf>,

        /// Host header override
        #[arg(long)]
        host: Option<String>,
    },
    /// List the operation selectors a spec declares
    Operations {
        #[arg(short, long)]
        spec: PathBuf,
    },
}

fn read_supplied(path: Option<&Path>, source: &str) -> anyhow::Result<SuppliedValues> {
    let path = match path {
        Some(path) => path,
        None => return Ok(SuppliedValues::new()),
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {} file {}", source, path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {} file {}", source, path.display()))?;
    Ok(SuppliedValues::from_value(source, &value)?)
}

/// Build a descriptor for one operation of a spec file.
pub fn build_request(
    spec: &Path,
    operation: &str,
    values: Option<&Path>,
    headers: Option<&Path>,
    host: Option<&str>,
) -> anyhow::Result<RequestDescriptor> {
    let (doc, operations) = load_operations(spec)?;
    let op = find_operation(&operations, operation)
        .with_context(|| format!("operation `{operation}` not found in {}", spec.display()))?;

    let mut builder = RequestBuilder::new(&doc, op)
        .with_values(read_supplied(values, "request parameters")?)
        .with_headers(read_supplied(headers, "request headers")?)
        .with_max_ref_depth(RuntimeConfig::from_env().max_ref_depth);
    if let Some(host) = host {
        builder = builder.with_host(host);
    }
    Ok(builder.build()?)
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Build {
            spec,
            operation,
            values,
            headers,
            host,
        } => {
            let descriptor = build_request(
                spec,
                operation,
                values.as_deref(),
                headers.as_deref(),
                host.as_deref(),
            )?;
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
        }
        Commands::Operations { spec } => {
            let (_, operations) = load_operations(spec)?;
            for op in &operations {
                println!("{}", op.selector());
            }
        }
    }
    Ok(())
}
