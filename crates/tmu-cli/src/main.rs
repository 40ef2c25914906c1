//! tmu CLI - requirement analysis and test design
//!
//! Usage:
//!   tmu analyze [TEXT]            Analyze a requirement
//!   tmu analyze --answer A ...    Analyze, answer clarifying questions, generate tests
//!   tmu design [TEXT]             Analyze and generate tests in one step
//!   tmu serve                     Launch the browser UI
//!   tmu init                      Write a default .tmu/config.toml

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tmu_core::{Mode, RequirementAnalysis, TestDesign, TmuConfig};
use tmu_planning::{
    export::ExportKind, pipeline, to_rows, FormState, PipelineOutput, TestCaseRow,
    DEFAULT_REQUIREMENT_TEXT,
};
use tmu_viz::VizConfig;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "tmu")]
#[command(author, version, about = "Turn free-text requirements into test designs")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a requirement (Requirement Analysis mode)
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: AnalyzeFormat,

        /// Answer to a clarifying question, in question order (repeatable)
        #[arg(short, long = "answer", value_name = "ANSWER")]
        answers: Vec<String>,

        /// Apply answers and generate tests even when none are given
        #[arg(long)]
        clarify: bool,

        /// Write exports to DIR (the configured output directory if DIR is omitted)
        #[arg(long, value_name = "DIR", num_args = 0..=1)]
        out: Option<Option<PathBuf>>,
    },

    /// Analyze a requirement and generate its test design (Test Design mode)
    Design {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: DesignFormat,

        /// Write exports to DIR (the configured output directory if DIR is omitted)
        #[arg(long, value_name = "DIR", num_args = 0..=1)]
        out: Option<Option<PathBuf>>,
    },

    /// Launch the browser UI
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to serve on
        #[arg(short, long)]
        port: Option<u16>,

        /// Do not open a browser
        #[arg(long)]
        no_open: bool,
    },

    /// Write a default .tmu/config.toml
    Init {
        /// Project path (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Where the requirement text comes from
#[derive(Args)]
struct InputArgs {
    /// Requirement text (defaults to the sample login requirement)
    text: Option<String>,

    /// Read the requirement text from a file
    #[arg(long, value_name = "FILE", conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl InputArgs {
    fn read(&self) -> Result<String> {
        match (&self.text, &self.file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(file)) => std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read requirement file {:?}", file)),
            (None, None) => Ok(DEFAULT_REQUIREMENT_TEXT.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AnalyzeFormat {
    Json,
    Table,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DesignFormat {
    Json,
    Table,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = TmuConfig::load_or_default(Path::new(".")).context("Failed to load config")?;
    debug!("Config: {:?}", config);

    match cli.command {
        Commands::Analyze {
            input,
            format,
            answers,
            clarify,
            out,
        } => {
            let mut form = FormState::new(Mode::RequirementAnalysis, input.read()?);
            if clarify || !answers.is_empty() {
                form = form.with_answers(answers);
            }
            let out = resolve_out(out, &config);
            cmd_analyze(form, format, out.as_deref())
        }
        Commands::Design { input, format, out } => {
            let form = FormState::new(Mode::TestDesign, input.read()?);
            let out = resolve_out(out, &config);
            cmd_design(form, format, out.as_deref())
        }
        Commands::Serve {
            host,
            port,
            no_open,
        } => cmd_serve(config, host, port, no_open).await,
        Commands::Init { path } => cmd_init(path),
    }
}

fn resolve_out(out: Option<Option<PathBuf>>, config: &TmuConfig) -> Option<PathBuf> {
    out.map(|dir| dir.unwrap_or_else(|| config.export.output_dir.clone()))
}

fn cmd_analyze(form: FormState, format: AnalyzeFormat, out: Option<&Path>) -> Result<()> {
    let output = pipeline::run(&form);
    info!("Analyzed requirement: {}", summarize(&output));

    match format {
        AnalyzeFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        AnalyzeFormat::Table => {
            print_requirement_tables(&output.requirement);
            if let Some(design) = &output.design {
                println!("Generated Tests (after clarification)");
                print_design_table(design);
            }
        }
    }

    if let Some(dir) = out {
        let mut kinds = vec![
            ExportKind::RequirementAnalysisJson,
            ExportKind::RequirementSummaryCsv,
        ];
        if output.design.is_some() {
            kinds.push(ExportKind::TestsCsv);
        }
        write_exports(&form, &kinds, dir)?;
    }

    Ok(())
}

fn cmd_design(form: FormState, format: DesignFormat, out: Option<&Path>) -> Result<()> {
    let output = pipeline::run(&form);
    info!("Designed tests: {}", summarize(&output));

    match format {
        DesignFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        DesignFormat::Table => {
            if let Some(design) = &output.design {
                print_design_table(design);
            }
        }
        DesignFormat::Csv => {
            print!("{}", pipeline::export(&form, ExportKind::TestsCsv)?.body);
        }
    }

    if let Some(dir) = out {
        write_exports(&form, &[ExportKind::TestsCsv, ExportKind::TestDesignJson], dir)?;
    }

    Ok(())
}

fn write_exports(form: &FormState, kinds: &[ExportKind], dir: &Path) -> Result<()> {
    for kind in kinds {
        let path = pipeline::export(form, *kind)?
            .write_to_dir(dir)
            .with_context(|| format!("Failed to write {} to {:?}", kind, dir))?;
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

async fn cmd_serve(
    config: TmuConfig,
    host: Option<String>,
    port: Option<u16>,
    no_open: bool,
) -> Result<()> {
    let mut viz = VizConfig::from(config.server);
    if let Some(host) = host {
        viz.host = host;
    }
    if let Some(port) = port {
        viz.port = port;
    }
    if no_open {
        viz.open_browser = false;
    }

    info!("Launching tmu UI...");
    tmu_viz::run(viz).await
}

fn cmd_init(path: PathBuf) -> Result<()> {
    info!("Initializing tmu in {:?}", path);
    let written = TmuConfig::write_default(&path).context("Failed to write config")?;

    println!("Initialized tmu in {:?}", path);
    println!("Created:");
    println!("  {}", written.display());
    Ok(())
}

fn print_requirement_tables(requirement: &RequirementAnalysis) {
    println!("{} (risk: {})", requirement.title, requirement.risk);
    println!();
    for (column, values) in [
        ("actors", &requirement.actors),
        ("acceptance_criteria", &requirement.acceptance_criteria),
        ("missing_info", &requirement.missing_info),
        ("clarifying_questions", &requirement.clarifying_questions),
    ] {
        let rows: Vec<Vec<String>> = values.iter().map(|v| vec![v.clone()]).collect();
        print_table(&[column], &rows);
        println!();
    }
}

fn print_design_table(design: &TestDesign) {
    let rows: Vec<Vec<String>> = to_rows(design)
        .into_iter()
        .map(|row| {
            vec![
                row.id,
                row.title,
                row.preconditions,
                row.steps,
                row.test_data,
                row.expected,
                row.risk.to_string(),
                row.automation_candidate.to_string(),
                row.automation_reason,
            ]
        })
        .collect();
    print_table(&TestCaseRow::COLUMNS, &rows);
    println!();
    println!("Summary: {}", design.summary);
    for assumption in &design.assumptions {
        println!("Assumption: {}", assumption);
    }
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", line(headers.to_vec()));
    println!(
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ")
    );
    for row in rows {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }
}

fn summarize(output: &PipelineOutput) -> String {
    match &output.design {
        Some(design) => format!("{} test cases ({})", design.test_cases.len(), design.summary),
        None => format!("{} gaps to clarify", output.requirement.missing_info.len()),
    }
}
