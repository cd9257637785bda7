use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use textmetrics_core::{
    Analyzer, AnalyzerConfig, Document, FetchConfig, HttpSource, Lexicon, LexiconPaths, LexiconScorer, Pipeline,
    Scorer, ScorerKind, StopwordFiltering, Workbook, article_text, ensure_word_lists, fetch_file,
    fetch_stdin,
};
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for a single scored document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Sentiment and readability metrics for spreadsheets of article URLs
#[derive(Parser, Debug)]
#[command(name = "textmetrics")]
#[command(author = "textmetrics contributors")]
#[command(version)]
#[command(about = "Sentiment and readability metrics for article text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score every URL in a workbook and write the metrics back into it
    Run {
        /// Input workbook (.xlsx) with URL_ID and URL columns
        #[arg(value_name = "WORKBOOK")]
        workbook: PathBuf,

        #[command(flatten)]
        scoring: ScoringArgs,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Score a single document and print its metrics
    Score {
        /// URL to fetch, local file, or "-" for stdin
        #[arg(value_name = "INPUT")]
        input: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text", value_name = "FORMAT")]
        format: OutputFormat,

        /// Treat file or stdin input as HTML and extract its article text
        #[arg(long)]
        html: bool,

        #[command(flatten)]
        scoring: ScoringArgs,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Write the built-in word lists into a lexicon directory
    InitLexicon {
        /// Lexicon directory (default: user data directory)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ScoringArgs {
    /// Sentiment scorer (lexicon, model)
    #[arg(long, default_value = "lexicon", value_name = "SCORER")]
    scorer: ScorerKind,

    /// Stopword filtering (enabled, disabled); follows the scorer when omitted
    #[arg(long, value_name = "MODE")]
    stopwords: Option<StopwordFiltering>,

    /// Directory holding MasterDictionary/ and StopWords/
    #[arg(long, value_name = "DIR")]
    lexicon_dir: Option<PathBuf>,

    /// Directory holding model.onnx and tokenizer.json (model scorer only)
    #[arg(long, value_name = "DIR")]
    model_dir: Option<PathBuf>,

    /// Maximum model input length in tokens
    #[arg(long, default_value = "512", value_name = "NUM")]
    max_tokens: usize,
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,
}

impl FetchArgs {
    fn config(&self) -> FetchConfig {
        let defaults = FetchConfig::default();
        FetchConfig { timeout: self.timeout, user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent) }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    match cli.command {
        Command::Run { workbook, scoring, fetch } => run_workbook(&workbook, &scoring, &fetch, cli.verbose),
        Command::Score { input, format, html, scoring, fetch } => {
            score_input(&input, format, html, &scoring, &fetch, cli.verbose)
        }
        Command::InitLexicon { dir } => init_lexicon(dir.as_deref()),
    }
}

fn lexicon_paths(dir: Option<&Path>) -> anyhow::Result<LexiconPaths> {
    match dir {
        Some(dir) => Ok(LexiconPaths::in_dir(dir)),
        None => LexiconPaths::user_default().context("Could not determine a data directory; pass --lexicon-dir"),
    }
}

fn load_lexicon(args: &ScoringArgs) -> anyhow::Result<Lexicon> {
    let paths = lexicon_paths(args.lexicon_dir.as_deref())?;
    ensure_word_lists(&paths)
        .with_context(|| format!("Failed to prepare word lists in {}", paths.master_dictionary.display()))?;
    Ok(Lexicon::load(&paths))
}

fn analyzer_config(args: &ScoringArgs) -> AnalyzerConfig {
    let mut builder = AnalyzerConfig::builder().scorer(args.scorer).max_model_tokens(args.max_tokens);
    if let Some(filtering) = args.stopwords {
        builder = builder.stopword_filtering(filtering);
    }
    builder.build()
}

fn build_scorer<'a>(
    args: &ScoringArgs, lexicon: &'a Lexicon, config: &AnalyzerConfig,
) -> anyhow::Result<Box<dyn Scorer + 'a>> {
    match config.scorer {
        ScorerKind::Lexicon => Ok(Box::new(LexiconScorer::new(lexicon).with_epsilon(config.epsilon))),
        ScorerKind::Model => Ok(load_model_scorer(args, config)?),
    }
}

#[cfg(feature = "model")]
fn load_model_scorer(args: &ScoringArgs, config: &AnalyzerConfig) -> anyhow::Result<Box<dyn Scorer>> {
    use textmetrics_core::{ModelScorer, OnnxStarClassifier};

    let model_dir = args.model_dir.as_deref().context("--model-dir is required with --scorer model")?;
    let classifier = OnnxStarClassifier::load(model_dir, config.max_model_tokens)
        .with_context(|| format!("Failed to load sentiment model from {}", model_dir.display()))?;
    Ok(Box::new(ModelScorer::new(classifier)))
}

#[cfg(not(feature = "model"))]
fn load_model_scorer(args: &ScoringArgs, _config: &AnalyzerConfig) -> anyhow::Result<Box<dyn Scorer>> {
    if let Some(dir) = &args.model_dir {
        tracing::debug!("Ignoring model directory {}", dir.display());
    }
    Err(textmetrics_core::MetricsError::FeatureDisabled("model")).context("textmetrics was built without model support")
}

fn run_workbook(path: &Path, scoring: &ScoringArgs, fetch: &FetchArgs, verbose: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    let mut timings: Vec<(String, Duration)> = Vec::new();

    if verbose {
        echo::print_step(1, 4, "Loading lexicon");
    }
    let step = Instant::now();
    let lexicon = load_lexicon(scoring)?;
    let config = analyzer_config(scoring);
    let scorer = build_scorer(scoring, &lexicon, &config)?;
    let analyzer = Analyzer::new(scorer.as_ref(), &lexicon, config);
    timings.push(("Setup".to_string(), step.elapsed()));

    if verbose {
        eprintln!("  {} {}", "Scorer:".dimmed(), analyzer.scorer_name().bright_white());
        eprintln!(
            "  {} {}",
            "Stopwords:".dimmed(),
            format!("{:?}", analyzer.config().stopword_filtering).bright_white()
        );
        eprintln!(
            "  {} {} positive, {} negative, {} stopwords",
            "Lexicon:".dimmed(),
            lexicon.positive_len(),
            lexicon.negative_len(),
            lexicon.stopwords().len()
        );
        eprintln!();
        echo::print_step(2, 4, &format!("Reading workbook {}", path.display().bright_white()));
    }

    let step = Instant::now();
    let mut workbook =
        Workbook::open(path).with_context(|| format!("Failed to open workbook: {}", path.display()))?;
    let records = workbook.records().context("Failed to read records")?;
    timings.push(("Read workbook".to_string(), step.elapsed()));

    let total = records.len();
    if total == 0 {
        echo::print_warning("Workbook has no records");
    }

    if verbose {
        eprintln!("  {} {}", "Records:".dimmed(), total.to_string().bright_white());
        eprintln!();
        echo::print_step(3, 4, "Scoring records");
    }

    let step = Instant::now();
    let source = HttpSource::new(fetch.config()).context("Failed to start HTTP client")?;
    let pipeline = Pipeline::new(&source, &analyzer);

    let mut results = Vec::with_capacity(total);
    for (index, outcome) in pipeline.analyze(records).enumerate() {
        let analyzed = outcome.context("Scoring aborted; workbook left unchanged")?;
        if verbose {
            echo::print_progress(index + 1, total, &analyzed.record.url, analyzed.scores().is_some());
        }
        results.push(analyzed);
    }
    timings.push(("Score records".to_string(), step.elapsed()));

    if verbose {
        eprintln!();
        echo::print_step(4, 4, "Writing results");
    }

    let step = Instant::now();
    workbook.write_results(&results).context("Failed to write results")?;
    workbook
        .save()
        .with_context(|| format!("Failed to save workbook: {}", workbook.path().display()))?;
    timings.push(("Write workbook".to_string(), step.elapsed()));

    let scored = results.iter().filter(|r| r.scores().is_some()).count();
    echo::print_success(&format!(
        "Scored {} of {} records, results written to {}",
        scored,
        total,
        path.display().bright_white()
    ));

    if verbose {
        eprintln!();
        echo::print_timing_summary(started.elapsed(), &timings);
    }

    Ok(())
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn score_input(
    input: &str, format: OutputFormat, html: bool, scoring: &ScoringArgs, fetch: &FetchArgs, verbose: bool,
) -> anyhow::Result<()> {
    let (content, is_html) = if input == "-" {
        if verbose {
            echo::print_step(1, 4, "Reading from stdin");
        }
        (fetch_stdin().context("Failed to read from stdin")?, html)
    } else if is_url(input) {
        if verbose {
            echo::print_step(1, 4, &format!("Fetching from {}", input.bright_white().underline()));
        }
        let source = HttpSource::new(fetch.config()).context("Failed to start HTTP client")?;
        (source.fetch_html(input).context("Failed to fetch URL")?, true)
    } else {
        if verbose {
            echo::print_step(1, 4, &format!("Reading from file {}", input.bright_white()));
        }
        let content = fetch_file(input).with_context(|| format!("Failed to read file: {}", input))?;
        let looks_like_html = input.ends_with(".html") || input.ends_with(".htm");
        (content, html || looks_like_html)
    };

    if verbose {
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(content.len()).bright_white());
        eprintln!();
    }

    let text = if is_html {
        if verbose {
            echo::print_step(2, 4, "Extracting article text");
            if let Some(title) = Document::parse(&content).title() {
                eprintln!("  {} {}", "Title:".dimmed(), title.bright_white());
            }
            eprintln!();
        }
        article_text(&content).context("Failed to extract article text")?
    } else {
        content
    };

    if verbose {
        echo::print_step(3, 4, "Scoring text");
    }

    let lexicon = load_lexicon(scoring)?;
    let config = analyzer_config(scoring);
    let scorer = build_scorer(scoring, &lexicon, &config)?;
    let analyzer = Analyzer::new(scorer.as_ref(), &lexicon, config);
    let scores = analyzer.calculate_scores(&text);

    if verbose {
        eprintln!("  {} {}", "Scorer:".dimmed(), analyzer.scorer_name().bright_white());
        eprintln!();
        echo::print_step(4, 4, "Writing output");
        eprintln!("  {} {}", "Format:".dimmed(), format!("{:?}", format).bright_white());
        eprintln!();
    }

    match format {
        OutputFormat::Text => print!("{}", echo::format_scores(&scores)),
        OutputFormat::Json => {
            let json = scores.to_json().context("Failed to serialize scores")?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

fn init_lexicon(dir: Option<&Path>) -> anyhow::Result<()> {
    let paths = lexicon_paths(dir)?;
    ensure_word_lists(&paths)
        .with_context(|| format!("Failed to write word lists under {}", paths.master_dictionary.display()))?;

    for file in [paths.positive_file(), paths.negative_file(), paths.stopword_file()] {
        println!("{}", file.display());
    }
    echo::print_success("Word lists ready");

    Ok(())
}
