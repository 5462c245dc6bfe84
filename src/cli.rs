// Command-line host: discover sources, analyze them in parallel, and print
// what would be contributed to the project indexes.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::json;
use tracing::{info, warn};

use crate::analyzer::VueAnalyzer;
use crate::indexer::OccurrenceSink;
use crate::scanner::{ScanConfig, SourceScanner};
use crate::types::{FileAnalysis, FileContext, IndexKey};

#[derive(Parser)]
#[command(
    name = "vuelens",
    version,
    about = "Vue.js indexing support: descriptor recognition and implicit symbol extraction"
)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a directory and extract implicit elements from every source file
    Scan(ScanArgs),
    /// Analyze a single file and print the occurrences it would emit
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
pub struct ScanArgs {
    /// Directory (or single file) to scan
    pub path: PathBuf,

    /// Print the analyses as a JSON document
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// File to analyze
    pub file: PathBuf,

    /// Print the analysis as a JSON document
    #[arg(long)]
    pub json: bool,
}

#[derive(Default)]
struct CollectingSink {
    occurrences: Vec<(String, String)>,
}

impl OccurrenceSink for CollectingSink {
    fn occurrence(&mut self, index_id: &str, symbol_name: &str) {
        self.occurrences
            .push((index_id.to_string(), symbol_name.to_string()));
    }
}

pub struct CliApp {
    scanner: SourceScanner,
}

impl CliApp {
    pub fn new() -> Result<Self> {
        let scanner =
            SourceScanner::new(ScanConfig::default()).context("failed to build source scanner")?;
        Ok(Self { scanner })
    }

    pub fn run(&self, cli: Cli) -> Result<()> {
        match cli.command {
            Commands::Scan(args) => self.scan(args),
            Commands::Analyze(args) => self.analyze(args),
        }
    }

    fn scan(&self, args: ScanArgs) -> Result<()> {
        let started = Instant::now();
        let files = self
            .scanner
            .scan(&args.path)
            .with_context(|| format!("failed to scan {}", args.path.display()))?;
        info!(files = files.len(), "discovered sources");

        // Parser state is per-thread; files are independent of each other.
        let analyses: Vec<FileAnalysis> = files
            .par_iter()
            .filter_map(|path| {
                let mut analyzer = match VueAnalyzer::new() {
                    Ok(analyzer) => analyzer,
                    Err(error) => {
                        warn!(%error, "failed to initialize analyzer");
                        return None;
                    }
                };
                match analyzer.analyze_file(path) {
                    Ok(analysis) => Some(analysis),
                    Err(error) => {
                        warn!(path = %path.display(), %error, "analysis failed");
                        None
                    }
                }
            })
            .collect();

        if args.json {
            println!("{}", serde_json::to_string_pretty(&analyses)?);
            return Ok(());
        }

        for analysis in &analyses {
            if analysis.implicit_elements.is_empty() && analysis.stub_literals.is_empty() {
                continue;
            }
            println!("{}", analysis.file.bold());
            for element in &analysis.implicit_elements {
                print_element_line(element.line, element.index_key, &element.name);
            }
            if !analysis.stub_literals.is_empty() {
                println!(
                    "  {}",
                    format!("{} stub literal(s)", analysis.stub_literals.len()).dimmed()
                );
            }
        }

        let components = count_elements(&analyses, IndexKey::Components);
        let options = count_elements(&analyses, IndexKey::Options);
        println!(
            "\n{} file(s) | {} component(s) | {} linked instance(s) | {:.2?}",
            analyses.len(),
            components,
            options,
            started.elapsed()
        );
        Ok(())
    }

    fn analyze(&self, args: AnalyzeArgs) -> Result<()> {
        let source = fs::read_to_string(&args.file)
            .with_context(|| format!("failed to read {}", args.file.display()))?;
        let context = FileContext::from_path(&args.file);

        let mut analyzer = VueAnalyzer::new()?;
        let mut sink = CollectingSink::default();
        let mut analysis = analyzer.index_source(&source, &context, &mut sink)?;
        analysis.file = args.file.display().to_string();

        if args.json {
            let document = json!({
                "analysis": analysis,
                "occurrences": sink
                    .occurrences
                    .iter()
                    .map(|(index, name)| json!({"index": index, "name": name}))
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&document)?);
            return Ok(());
        }

        println!("{}", analysis.summary().bold());
        for element in &analysis.implicit_elements {
            print_element_line(element.line, element.index_key, &element.name);
        }
        for (index, name) in &sink.occurrences {
            println!("  {} {} <- {}", "occurrence".yellow(), index, display_name(name));
        }
        for stub in &analysis.stub_literals {
            println!("  {:>4}  {}  {}", stub.line, "stub".dimmed(), stub.value);
        }
        Ok(())
    }
}

fn print_element_line(line: usize, key: IndexKey, name: &str) {
    let tag = match key {
        IndexKey::Components => "component".green(),
        IndexKey::Options => "options".cyan(),
    };
    println!("  {:>4}  {}  {}", line, tag, display_name(name));
}

fn display_name(name: &str) -> String {
    if name.is_empty() {
        "(unnamed)".dimmed().to_string()
    } else {
        name.to_string()
    }
}

fn count_elements(analyses: &[FileAnalysis], key: IndexKey) -> usize {
    analyses
        .iter()
        .flat_map(|analysis| &analysis.implicit_elements)
        .filter(|element| element.index_key == key)
        .count()
}
