//! sheetsmith: build pipeline for code-snippet cheatsheets.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use sheetsmith::config::{Config, DEFAULT_CONFIG_FILE};
use sheetsmith::report::BatchReport;
use sheetsmith::store::{FsSource, SectionStore};
use sheetsmith::{convert, frontmatter, manifest, rewrite, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetsmith")]
#[command(about = "Convert, normalize and serve cheatsheet section data", long_about = None)]
struct Args {
    /// Configuration file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Move trailing comments in section JSON onto their own lines
    SplitComments,
    /// Write the Markdown layout from section JSON
    JsonToMd,
    /// Rebuild section JSON and the rich index from the Markdown layout
    MdToJson,
    /// Normalize section JSON and write served payloads plus the manifest
    Bundle,
    /// Replace YAML front matter in Markdown examples with the labelled header
    MigrateFrontmatter,
    /// List served sections in order
    Toc,
    /// Print one served section
    Show {
        /// Section id
        id: String,
    },
    /// List served sections mentioning a keyword
    Search {
        /// Case-insensitive keyword
        keyword: String,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let outcome = Config::load(&args.config).and_then(|cfg| run(&args.command, &cfg));
    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!(%err, "aborted");
            ExitCode::FAILURE
        }
    }
}

/// Run one command; `Ok(false)` means it finished but some files failed.
fn run(command: &Command, cfg: &Config) -> Result<bool> {
    let policy = cfg.retry_policy();
    let syntax = cfg.comment_syntax();
    let style = cfg.document_style();
    let json_dir = Path::new(&cfg.json_dir);
    let markdown_dir = Path::new(&cfg.markdown_dir);

    let (job, report) = match command {
        Command::SplitComments => (
            "split-comments",
            rewrite::split_comments_in_dir(json_dir, &syntax, &policy)?,
        ),
        Command::JsonToMd => (
            "json-to-md",
            convert::json_to_markdown(
                json_dir,
                markdown_dir,
                &cfg.section_order,
                &syntax,
                &style,
                &policy,
            )?,
        ),
        Command::MdToJson => (
            "md-to-json",
            convert::markdown_to_json(markdown_dir, &cfg.index_layout(), &style, &policy)?,
        ),
        Command::Bundle => (
            "bundle",
            manifest::bundle(
                json_dir,
                &cfg.section_order,
                &cfg.served_layout(),
                &syntax,
                &policy,
            )?,
        ),
        Command::MigrateFrontmatter => (
            "migrate-frontmatter",
            frontmatter::migrate_dir(markdown_dir, &style.labels, &policy)?,
        ),
        Command::Toc => return print_toc(cfg),
        Command::Show { id } => return print_section(cfg, id),
        Command::Search { keyword } => return print_search(cfg, keyword),
    };

    Ok(finish(job, &report))
}

fn finish(job: &str, report: &BatchReport) -> bool {
    report.log_summary(job);
    report.is_success()
}

fn open_store(cfg: &Config) -> Result<SectionStore<FsSource>> {
    SectionStore::open(FsSource::from_layout(&cfg.served_layout()))
}

fn print_toc(cfg: &Config) -> Result<bool> {
    let store = open_store(cfg)?;
    for entry in store.entries() {
        println!("{}\t{}", entry.id, entry.title);
    }
    Ok(true)
}

fn print_section(cfg: &Config, id: &str) -> Result<bool> {
    let mut store = open_store(cfg)?;
    let section = store.get(id)?;
    let (prev, next) = store.adjacent(id).unwrap_or_default();

    println!("# {}", section.title);
    for example in &section.code_examples {
        println!("\n## {}\n", example.title);
        if let Some(description) = &example.description {
            println!("{description}\n");
        }
        println!("{}", example.code);
    }
    println!(
        "\nprev: {}  next: {}",
        prev.unwrap_or("-"),
        next.unwrap_or("-")
    );
    Ok(true)
}

fn print_search(cfg: &Config, keyword: &str) -> Result<bool> {
    let mut store = open_store(cfg)?;
    let hits = store.search(keyword);
    if hits.is_empty() {
        tracing::info!(keyword, "no matching sections");
    }
    for hit in hits {
        println!("{}\t{}", hit.id, hit.section.title);
    }
    Ok(true)
}
