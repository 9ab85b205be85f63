use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use feedbacklens::models::{DashboardData, SentimentLabel, WordFrequencyTable};
use feedbacklens::source::{write_analyzed_csv, write_sample_csv};
use feedbacklens::{
    AnalysisPipeline, Config, CsvFileSource, DatasetStore, Error, PipelineConfig, SampleSource,
    TableSource, ThresholdVariant, Thresholds,
};

#[derive(Parser, Debug)]
#[command(name = "feedbacklens")]
#[command(version = "0.1.0")]
#[command(about = "Score and summarize the sentiment of tabular feedback")]
struct Args {
    /// CSV file with a header row
    #[arg(short, long, conflicts_with = "sample")]
    input: Option<PathBuf>,

    /// Analyze the built-in policy feedback sample
    #[arg(long)]
    sample: bool,

    /// Column holding the feedback text
    #[arg(short, long)]
    text_column: Option<String>,

    /// Output format (text, markdown, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Labeling thresholds: granular (0.2) or permissive (0.1)
    #[arg(long)]
    variant: Option<ThresholdVariant>,

    /// Number of words per frequency table
    #[arg(long)]
    top_words: Option<usize>,

    /// Write analyzed rows to this CSV file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write the sample feedback to this CSV file
    #[arg(long)]
    write_sample: Option<PathBuf>,

    /// Show a progress bar while scoring
    #[arg(long)]
    progress: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("feedbacklens=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if let Some(ref path) = args.write_sample {
        write_sample_csv(path)?;
        if args.input.is_none() && !args.sample {
            return Ok(());
        }
    }

    // Load configuration, CLI flags win over the environment
    let mut config = Config::from_env()?;
    if let Some(ref column) = args.text_column {
        config.text_column = column.clone();
    }
    if let Some(variant) = args.variant {
        config.thresholds = Thresholds::for_variant(variant);
    }
    if let Some(k) = args.top_words {
        config.top_words_k = k;
    }
    config.validate()?;

    let source: Box<dyn TableSource> = match (&args.input, args.sample) {
        (Some(path), _) => Box::new(CsvFileSource::new(path)),
        (None, true) => Box::new(SampleSource),
        (None, false) => anyhow::bail!("nothing to analyze: pass --input <file> or --sample"),
    };

    tracing::info!("Processing: {}", source.name());
    let table = source.load().await?;

    let pipeline_config = PipelineConfig {
        show_progress: args.progress,
        ..PipelineConfig::from(&config)
    };
    let pipeline = Arc::new(AnalysisPipeline::new(pipeline_config));
    let store = DatasetStore::new();

    // Scoring is CPU-bound
    let text_column = config.text_column.clone();
    let worker = pipeline.clone();
    let mut dataset = tokio::task::spawn_blocking(move || worker.analyze(&table, &text_column))
        .await
        .map_err(|e| Error::Task(e.to_string()))?
        .map_err(|e| {
            if e.is_user_correctable() {
                tracing::error!("{}", e);
            }
            e
        })?;
    dataset.source = Some(source.name().to_string());
    store.replace(dataset);

    let Some(current) = store.current() else {
        anyhow::bail!("no dataset available");
    };

    if let Some(ref path) = args.export {
        write_analyzed_csv(path, &current)?;
    }

    let dashboard = pipeline.dashboard(&current)?;
    output_dashboard(&dashboard, &args)?;

    Ok(())
}

fn output_dashboard(dashboard: &DashboardData, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(dashboard)?,
        "markdown" => format_markdown(dashboard),
        _ => format_text(dashboard),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path.display());
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn label_tables(dashboard: &DashboardData) -> [(&'static str, &WordFrequencyTable); 4] {
    [
        ("All", &dashboard.top_words.all),
        ("Positive", &dashboard.top_words.positive),
        ("Neutral", &dashboard.top_words.neutral),
        ("Negative", &dashboard.top_words.negative),
    ]
}

fn format_text(dashboard: &DashboardData) -> String {
    let summary = &dashboard.summary;
    let mut output = String::new();

    output.push_str("\n=== Sentiment Analysis ===\n\n");
    if let Some(ref source) = dashboard.source {
        output.push_str(&format!("Source: {}\n", source));
    }
    output.push_str(&format!("Total feedback: {}\n\n", summary.total_feedback));

    for label in SentimentLabel::ALL {
        output.push_str(&format!(
            "  {:<9} {:>5} ({}%)\n",
            label,
            summary.count(label),
            summary.percentage(label)
        ));
    }

    output.push_str(&format!("\nAverage polarity: {}\n", summary.avg_polarity));
    output.push_str(&format!("Average subjectivity: {}\n", summary.avg_subjectivity));

    output.push_str("\nBreakdown:\n");
    for stats in &dashboard.breakdown {
        output.push_str(&format!(
            "  {:<9} polarity {:.3} (std {:.3}), subjectivity {:.3}\n",
            stats.label, stats.polarity_mean, stats.polarity_std, stats.subjectivity_mean
        ));
    }

    output.push_str("\nMost frequent words:\n");
    for (name, table) in label_tables(dashboard) {
        if table.is_empty() {
            output.push_str(&format!("  {}: no significant words found\n", name));
            continue;
        }
        let words: Vec<String> = table
            .words
            .iter()
            .map(|w| format!("{} ({})", w.word, w.count))
            .collect();
        output.push_str(&format!("  {}: {}\n", name, words.join(", ")));
    }

    output.push_str(&format!(
        "\nAnalyzed on: {}\n",
        summary.analysis_timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn format_markdown(dashboard: &DashboardData) -> String {
    let summary = &dashboard.summary;
    let mut output = String::new();

    output.push_str("# Sentiment Analysis\n\n");
    if let Some(ref source) = dashboard.source {
        output.push_str(&format!("**Source:** {}\n\n", source));
    }

    output.push_str("## Summary\n\n");
    output.push_str("| Sentiment | Count | Percentage |\n|-----------|-------|------------|\n");
    for label in SentimentLabel::ALL {
        output.push_str(&format!(
            "| {} | {} | {}% |\n",
            label,
            summary.count(label),
            summary.percentage(label)
        ));
    }
    output.push_str(&format!("| **Total** | {} | 100% |\n", summary.total_feedback));

    output.push_str("\n| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Average Polarity | {} |\n", summary.avg_polarity));
    output.push_str(&format!(
        "| Average Subjectivity | {} |\n",
        summary.avg_subjectivity
    ));

    output.push_str("\n## Breakdown\n\n");
    output.push_str("| Sentiment | Count | Mean Polarity | Polarity Std | Mean Subjectivity |\n");
    output.push_str("|-----------|-------|---------------|--------------|-------------------|\n");
    for stats in &dashboard.breakdown {
        output.push_str(&format!(
            "| {} | {} | {:.3} | {:.3} | {:.3} |\n",
            stats.label, stats.count, stats.polarity_mean, stats.polarity_std, stats.subjectivity_mean
        ));
    }

    output.push_str("\n## Most Frequent Words\n\n");
    for (name, table) in label_tables(dashboard) {
        output.push_str(&format!("### {}\n\n", name));
        if table.is_empty() {
            output.push_str("*No significant words found*\n\n");
            continue;
        }
        output.push_str("| Word | Count |\n|------|-------|\n");
        for w in &table.words {
            output.push_str(&format!("| {} | {} |\n", w.word, w.count));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "---\n*Analyzed on {}*\n",
        summary.analysis_timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
