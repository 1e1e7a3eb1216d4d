//! CLI for outlining, generating, refining and exporting documents.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use docforge_core::{Document, DocumentKind, GenerationPolicy};
use docforge_export::ExportOrchestrator;
use docforge_generate::{
    CommandBackend, GenerationOrchestrator, OutlineSynthesizer, Refiner, TextBackend,
};
use docforge_ooxml::PackageReader;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Generate documents and slide decks from a topic with a text backend.
#[derive(Parser, Debug)]
#[command(name = "docforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Generation policy as a JSON file
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Propose section titles for a topic
    Outline {
        /// Topic to outline
        #[arg(short, long)]
        topic: String,

        /// Document kind (docx or pptx)
        #[arg(short, long, value_parser = parse_kind, default_value = "docx")]
        kind: DocumentKind,

        /// Number of sections
        #[arg(short, long, default_value = "5")]
        count: usize,

        #[command(flatten)]
        backend: BackendArgs,
    },

    /// Generate content for every section, or regenerate one
    Generate {
        /// Document JSON file
        document: PathBuf,

        /// Regenerate only this section
        #[arg(short, long)]
        section: Option<u64>,

        /// Pause between backend calls in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Word-count target for flow document sections
        #[arg(long)]
        target_words: Option<usize>,

        /// Output file (default: overwrite the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        backend: BackendArgs,
    },

    /// Rewrite one section following an instruction
    Refine {
        /// Document JSON file
        document: PathBuf,

        /// Section to refine
        #[arg(short, long)]
        section: u64,

        /// What to change
        #[arg(short, long)]
        instruction: String,

        /// Output file (default: overwrite the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        backend: BackendArgs,
    },

    /// Render a document to .docx or .pptx
    Export {
        /// Document JSON file
        document: PathBuf,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the text paragraphs of a rendered file
    Inspect {
        /// .docx or .pptx file
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct BackendArgs {
    /// Command that reads a prompt on stdin and prints a completion
    #[arg(long = "backend-cmd")]
    command: String,
}

impl BackendArgs {
    fn backend(&self) -> Result<Arc<dyn TextBackend>> {
        let backend = CommandBackend::from_command_line(&self.command)
            .ok_or_else(|| anyhow::anyhow!("Backend command must not be empty"))?;
        Ok(Arc::new(backend))
    }
}

fn parse_kind(value: &str) -> std::result::Result<DocumentKind, String> {
    DocumentKind::from_name(value)
        .ok_or_else(|| format!("unknown document kind '{}' (expected docx or pptx)", value))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let policy = load_policy(cli.policy.as_deref())?;

    match cli.command {
        Command::Outline {
            topic,
            kind,
            count,
            backend,
        } => {
            let entries = OutlineSynthesizer::new(backend.backend()?)
                .with_policy(policy)
                .synthesize_entries(&topic, kind, count)
                .await
                .context("Failed to synthesize outline")?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }

        Command::Generate {
            document,
            section,
            delay_ms,
            target_words,
            output,
            backend,
        } => {
            let mut doc = read_document(&document)?;
            let policy = match delay_ms {
                Some(ms) => policy.with_inter_call_delay(Duration::from_millis(ms)),
                None => policy,
            };
            let policy = match target_words {
                Some(words) => policy.with_flow_target_words(words),
                None => policy,
            };
            let orchestrator = GenerationOrchestrator::new(backend.backend()?).with_policy(policy);

            let outcome = match section {
                Some(id) => orchestrator.regenerate_section(&mut doc, id).await.map(|_| 1),
                None => orchestrator.run(&mut doc).await.map(|summary| summary.generated),
            };

            // Sections generated before a failure are kept.
            let target = output.as_deref().unwrap_or(document.as_path());
            write_document(target, &doc)?;

            let generated = outcome.context("Generation stopped")?;
            if cli.verbose {
                eprintln!("Generated {} sections into {}", generated, target.display());
            }
        }

        Command::Refine {
            document,
            section,
            instruction,
            output,
            backend,
        } => {
            let mut doc = read_document(&document)?;
            let record = Refiner::new(backend.backend()?)
                .refine(&mut doc, section, &instruction)
                .await
                .context("Refinement failed")?;

            write_document(output.as_deref().unwrap_or(document.as_path()), &doc)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Command::Export { document, output } => {
            let doc = read_document(&document)?;
            let rendered = ExportOrchestrator::new()
                .export(&doc)
                .with_context(|| format!("Failed to export {}", document.display()))?;

            let dir = output.unwrap_or_else(|| PathBuf::from("."));
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            let path = dir.join(&rendered.filename);
            fs::write(&path, &rendered.bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            println!("{} ({})", path.display(), rendered.media_type);
        }

        Command::Inspect { file } => {
            for paragraph in inspect(&file)? {
                println!("{}", paragraph);
            }
        }
    }

    Ok(())
}

fn load_policy(path: Option<&Path>) -> Result<GenerationPolicy> {
    let Some(path) = path else {
        return Ok(GenerationPolicy::default());
    };
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid policy file {}", path.display()))
}

fn read_document(path: &Path) -> Result<Document> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid document file {}", path.display()))
}

fn write_document(path: &Path, document: &Document) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Paragraph text of a rendered package: the body of a flow document, or
/// every slide of a deck in order.
fn inspect(path: &Path) -> Result<Vec<String>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader = PackageReader::new(BufReader::new(file))
        .with_context(|| format!("{} is not an Office package", path.display()))?;

    let parts = if reader.has_part("ppt/presentation.xml") {
        reader.slide_paths()?
    } else if reader.has_part("word/document.xml") {
        vec!["word/document.xml".to_string()]
    } else {
        anyhow::bail!("{} is neither a .docx nor a .pptx package", path.display());
    };

    let mut paragraphs = Vec::new();
    for part in parts {
        log::debug!("Reading {}", part);
        paragraphs.extend(
            reader
                .paragraphs(&part)?
                .into_iter()
                .filter(|p| !p.is_empty()),
        );
    }
    Ok(paragraphs)
}
