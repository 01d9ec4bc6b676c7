use std::{
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use campaign_datastore::{sample_campaigns, write_campaigns, CsvDataStore, DataStore, SampleDataStore};
use campaign_pulse::{
    dashboard::render_dashboard,
    huggingface::{
        HuggingFaceClient, HuggingFaceConfig, DEFAULT_API_BASE, DEFAULT_CLASSIFIER_MODEL,
        DEFAULT_SUMMARIZER_MODEL,
    },
    tracing::init_tracing_subscriber,
    CampaignAnalysis, CampaignAnalyzerBuilder, SummaryResponse,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "campaign-pulse", about = "Marketing campaign performance analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the sample campaign CSV, a template for your own data
    Sample {
        /// Destination file, `-` for stdout
        #[arg(long, short, default_value = "sample_campaigns.csv")]
        output: PathBuf,
    },
    /// Compute campaign KPIs and optionally generate an AI executive summary
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Campaign CSV file; the sample dataset is analyzed when omitted
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Request an executive summary from the summarization model
    #[arg(long)]
    summarize: bool,

    /// Print the raw report text sent to the model
    #[arg(long)]
    show_report: bool,

    /// Emit the analysis as JSON instead of the dashboard
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    huggingface: HuggingFaceArgs,
}

#[derive(Args)]
struct HuggingFaceArgs {
    /// Hugging Face access token, required with --summarize
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    hf_token: Option<String>,

    /// Summarization model id
    #[arg(long, env = "SUMMARIZER_MODEL", default_value = DEFAULT_SUMMARIZER_MODEL)]
    summarizer_model: String,

    /// Classification model id
    #[arg(long, env = "CLASSIFIER_MODEL", default_value = DEFAULT_CLASSIFIER_MODEL)]
    classifier_model: String,

    /// Inference API base URL
    #[arg(long, env = "HF_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Request timeout in seconds, at least 1
    #[arg(
        long,
        env = "HF_TIMEOUT_SECS",
        default_value = "60",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,
}

impl HuggingFaceArgs {
    fn into_config(self) -> anyhow::Result<HuggingFaceConfig> {
        let token = self
            .hf_token
            .filter(|t| !t.is_empty())
            .context("HF_TOKEN must be set to generate a summary")?;

        Ok(HuggingFaceConfig::new(token)
            .with_api_base(self.api_base)
            .with_summarizer_model(self.summarizer_model)
            .with_classifier_model(self.classifier_model)
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum SummaryOutput {
    Ok { summary: String },
    Failed { message: String, transient: bool },
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    analysis: &'a CampaignAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<SummaryOutput>,
}

fn write_sample(output: &Path) -> anyhow::Result<()> {
    let campaigns = sample_campaigns();

    if output.as_os_str() == "-" {
        write_campaigns(io::stdout().lock(), &campaigns)?;
        return Ok(());
    }

    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_campaigns(file, &campaigns)?;
    tracing::info!(path = %output.display(), "Wrote sample campaigns");

    Ok(())
}

struct Flags {
    json: bool,
    show_report: bool,
}

fn print_analysis(
    analysis: &CampaignAnalysis,
    summary: Option<SummaryOutput>,
    args: &Flags,
) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();

    if args.json {
        let output = JsonOutput { analysis, summary };
        serde_json::to_writer_pretty(&mut stdout, &output)?;
        writeln!(stdout)?;
        return Ok(());
    }

    write!(stdout, "{}", render_dashboard(analysis))?;

    if let Some(summary) = summary {
        writeln!(stdout, "\nAI Executive Summary")?;
        match summary {
            SummaryOutput::Ok { summary } => writeln!(stdout, "{summary}")?,
            SummaryOutput::Failed { message, .. } => writeln!(stdout, "{message}")?,
        }
    }

    if args.show_report {
        writeln!(stdout, "\nRaw text sent to model\n{}", analysis.report_text)?;
    }

    Ok(())
}

async fn run_analysis<D>(store: D, args: AnalyzeArgs) -> anyhow::Result<()>
where
    D: DataStore + Send + Sync,
{
    let flags = Flags {
        json: args.json,
        show_report: args.show_report,
    };

    if !args.summarize {
        let analyzer = CampaignAnalyzerBuilder::new().store(store).build();
        let analysis = analyzer.analyze().await?;
        return print_analysis(&analysis, None, &flags);
    }

    let client = HuggingFaceClient::new(args.huggingface.into_config()?)?;
    let analyzer = CampaignAnalyzerBuilder::new()
        .store(store)
        .summarizer(client)
        .build();

    let analysis = analyzer.analyze().await?;

    tracing::info!("Summarizing campaign report, this may take a while on first run");
    let summary = match analyzer.summarize(&analysis).await {
        Ok(SummaryResponse { summary }) => SummaryOutput::Ok { summary },
        Err(e) => SummaryOutput::Failed {
            message: e.to_string(),
            transient: e.is_transient(),
        },
    };

    print_analysis(&analysis, Some(summary), &flags)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    match cli.command {
        Command::Sample { output } => write_sample(&output)?,
        Command::Analyze(args) => match args.input.clone() {
            Some(path) => run_analysis(CsvDataStore::new(path), args).await?,
            None => {
                tracing::info!("No input file given, analyzing sample campaigns");
                run_analysis(SampleDataStore, args).await?
            }
        },
    }

    Ok(())
}
