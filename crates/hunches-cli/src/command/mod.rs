use std::{fmt, path::PathBuf};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use clap::Parser;
use hunches_analysis::{
    config::AnalysisConfig,
    enrich::{EnrichedStory, Enricher},
};

use crate::{
    chart::{Chart, ChartSink, SvgChartSink},
    source::{
        RowSource, SqliteSource,
        stories::{self, StoryFilter},
    },
};

mod author;
mod domain;
mod karma;
mod time;
mod title;

/// Analyze dataset hunches
///
/// Runs every analysis when no analysis flag (or `--all`) is given.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Run all analyses
    #[arg(long)]
    all: bool,

    /// Analyze title length vs score
    #[arg(long)]
    title: bool,

    /// Analyze author activity vs score
    #[arg(long)]
    author: bool,

    /// Analyze domain popularity vs score
    #[arg(long)]
    domain: bool,

    /// Analyze time patterns vs score
    #[arg(long)]
    time: bool,

    /// Analyze karma vs score
    #[arg(long)]
    karma: bool,

    /// Path to the `SQLite` export of the story database
    #[arg(long, env = "HUNCHES_DATABASE", default_value = "hacker_news.db")]
    database: PathBuf,

    /// Directory charts are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Instant current karma values were observed at (RFC 3339)
    #[arg(long)]
    reference_time: Option<DateTime<Utc>>,

    /// News domains compared against other domains (comma-separated)
    #[arg(long, value_delimiter = ',')]
    news_domains: Vec<String>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Analysis {
    Title,
    Author,
    Domain,
    Time,
    Karma,
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.to_str(), f)
    }
}

impl Analysis {
    const ALL: [Analysis; 5] = [
        Analysis::Title,
        Analysis::Author,
        Analysis::Domain,
        Analysis::Time,
        Analysis::Karma,
    ];

    fn to_str(self) -> &'static str {
        match self {
            Analysis::Title => "title",
            Analysis::Author => "author",
            Analysis::Domain => "domain",
            Analysis::Time => "time",
            Analysis::Karma => "karma",
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Analysis::Title => "Analyzing title length vs score",
            Analysis::Author => "Analyzing author activity vs score",
            Analysis::Domain => "Analyzing domain popularity vs score",
            Analysis::Time => "Analyzing time patterns vs score",
            Analysis::Karma => "Analyzing karma vs score",
        }
    }

    fn run(self, ctx: &AnalysisContext<'_>) -> anyhow::Result<()> {
        match self {
            Analysis::Title => title::run(ctx),
            Analysis::Author => author::run(ctx),
            Analysis::Domain => domain::run(ctx),
            Analysis::Time => time::run(ctx),
            Analysis::Karma => karma::run(ctx),
        }
    }
}

impl CommandArgs {
    /// Analyses to run, in their fixed order
    fn selected(&self) -> Vec<Analysis> {
        let flags = [self.title, self.author, self.domain, self.time, self.karma];
        if self.all || !flags.contains(&true) {
            return Analysis::ALL.to_vec();
        }
        Analysis::ALL
            .into_iter()
            .zip(flags)
            .filter_map(|(analysis, selected)| selected.then_some(analysis))
            .collect()
    }

    fn config(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig::default();
        if let Some(reference_time) = self.reference_time {
            config.reference_time = reference_time;
        }
        if !self.news_domains.is_empty() {
            config.news_domains = self
                .news_domains
                .iter()
                .map(|domain| domain.trim().to_ascii_lowercase())
                .collect();
        }
        config
    }
}

/// Collaborators shared by the analyses of one run
pub(crate) struct AnalysisContext<'a> {
    pub source: &'a dyn RowSource,
    pub charts: &'a dyn ChartSink,
    pub config: &'a AnalysisConfig,
}

impl AnalysisContext<'_> {
    /// Fetches and enriches the story batch of one analysis.
    pub(crate) fn load(
        &self,
        filters: &[StoryFilter],
        enricher: Enricher,
    ) -> anyhow::Result<Vec<EnrichedStory>> {
        let records =
            stories::fetch_stories(self.source, filters).context("failed to fetch stories")?;
        let (stories, report) = enricher.enrich_batch(records);
        if report.karma_failures > 0 {
            tracing::warn!(
                failures = report.karma_failures,
                "karma estimated as 0 for some stories"
            );
        }
        Ok(stories)
    }

    /// Hands `chart` to the sink; a failed chart does not stop the report.
    pub(crate) fn render(&self, chart: &Chart) {
        match self.charts.render(chart) {
            Ok(Some(path)) => println!("Plot saved as '{}'", path.display()),
            Ok(None) => tracing::debug!(chart = %chart.name, "chart not written"),
            Err(err) => {
                tracing::error!(chart = %chart.name, error = %err, "chart failed");
                println!("Could not save plot {}: {err}", chart.name);
            }
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = args.config();
    let charts = SvgChartSink::new(&args.output_dir);
    let source = match SqliteSource::open(&args.database) {
        Ok(source) => source,
        Err(err) => {
            tracing::error!(error = %err, "story database unavailable");
            println!("Error: {err}");
            return Ok(());
        }
    };
    let ctx = AnalysisContext {
        source: &source,
        charts: &charts,
        config: &config,
    };
    run_selected(&ctx, &args.selected());
    Ok(())
}

/// Runs `analyses` in order; a failing analysis is reported and skipped.
fn run_selected(ctx: &AnalysisContext<'_>, analyses: &[Analysis]) -> Vec<Analysis> {
    let mut failed = vec![];
    for &analysis in analyses {
        println!("\n=== {} ===\n", analysis.heading());
        if let Err(err) = analysis.run(ctx) {
            tracing::error!(%analysis, error = %err, "analysis failed");
            println!("Error in {analysis} analysis: {err:#}");
            failed.push(analysis);
        }
    }
    failed
}
