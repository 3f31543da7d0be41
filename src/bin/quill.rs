//! Thin CLI glue around the `quill` library: read a template and zero or more environment
//! description files, render, write output. Not part of the CORE (spec §1/§6) - grounded on
//! `rhai-cli`'s `args.rs`/`execute/mod.rs`
//! (`examples/rhaiscript-lsp/crates/rhai-cli/src/{args,execute/mod}.rs`): `clap` derive for
//! argument parsing, `anyhow` for top-level error context, `tracing` for render spans.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info_span;

use quill::{InputStream, Scope};

#[derive(Parser)]
#[command(name = "quill", about = "A small text template engine")]
struct Args {
    /// Enable verbose render tracing.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a template against an environment.
    Render {
        /// Path to the template file.
        template: PathBuf,

        /// Environment description file(s); may repeat. Later files shadow earlier ones.
        #[arg(long = "env", value_name = "FILE")]
        env_files: Vec<PathBuf>,

        /// One inline `name = value` binding; may repeat. Applied after all `--env` files.
        #[arg(long = "set", value_name = "NAME=VALUE")]
        inline_bindings: Vec<String>,

        /// Output file; defaults to standard output.
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "quill=debug" } else { "quill=info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .without_time()
        .init();

    if let Err(e) = run(args) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let Command::Render { template, env_files, inline_bindings, output } = args.cmd;

    let mut scope = Scope::new();
    for env_file in &env_files {
        let _span = info_span!("load_env", file = %env_file.display()).entered();
        load_env_file(env_file, &mut scope)?;
    }
    for binding in &inline_bindings {
        load_inline_binding(binding, &mut scope)?;
    }

    let template_text = fs::read_to_string(&template)
        .with_context(|| format!("reading template file '{}'", template.display()))?;
    let source_name: Rc<str> = Rc::from(template.to_string_lossy().as_ref());

    let parsed = {
        let _span = info_span!("parse_template", file = %template.display()).entered();
        quill::Template::parse(InputStream::new(source_name, &template_text))
            .map_err(|e| anyhow::anyhow!("{e}"))?
    };

    let mut buffer = Vec::new();
    {
        let _span = info_span!("render").entered();
        parsed
            .render(&mut scope, &mut buffer)
            .map_err(|e| anyhow::anyhow!("{e}"))?;
    }

    match output {
        Some(path) => {
            fs::write(&path, &buffer)
                .with_context(|| format!("writing output file '{}'", path.display()))?;
        }
        None => {
            io::stdout().write_all(&buffer).context("writing to stdout")?;
        }
    }

    Ok(())
}

fn load_env_file(path: &PathBuf, scope: &mut Scope) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading environment file '{}'", path.display()))?;
    let source_name: Rc<str> = Rc::from(path.to_string_lossy().as_ref());
    let mut input = InputStream::new(source_name, &text);
    quill::env_parse::parse_description(&mut input, scope)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("parsing environment file '{}'", path.display()))
}

fn load_inline_binding(binding: &str, scope: &mut Scope) -> Result<()> {
    let text = format!("{binding};");
    let mut input = InputStream::new(Rc::from("<--set>"), &text);
    quill::env_parse::parse_description(&mut input, scope)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("parsing '--set {binding}'"))
}
