use anyhow::Context as _;
use hunches_analysis::{analyses::karma::KarmaReport, enrich::Enricher};

use crate::{
    chart::{Chart, ChartData},
    report,
    source::stories::StoryFilter,
};

use super::AnalysisContext;

pub(crate) fn run(ctx: &AnalysisContext<'_>) -> anyhow::Result<()> {
    let config = ctx.config;
    tracing::info!(reference_time = %config.reference_time, "estimating karma at post time");
    let stories = ctx.load(
        &[StoryFilter::WithAuthorAccount],
        Enricher::with_karma(config.karma_model()),
    )?;
    let report =
        KarmaReport::compute(&stories, config).context("invalid karma bucket boundaries")?;

    println!("Total stories analyzed: {}", report.points.len());
    println!("Average score: {}", report::fmt_value(report.mean_score));
    println!(
        "Average interpolated karma at post time: {}",
        report::fmt_value(report.mean_karma)
    );
    println!(
        "Correlation between interpolated karma and score: {}",
        report::fmt_correlation(report.correlation)
    );

    ctx.render(&Chart {
        name: "karma_vs_score".to_owned(),
        title: "Relationship Between Author Karma (@ post time) and Post Score".to_owned(),
        x_label: "Interpolated Karma at Post Time".to_owned(),
        y_label: "Score".to_owned(),
        data: ChartData::Scatter {
            points: report.points.clone(),
            log_x: true,
        },
    });

    println!("\nScores by karma bins:");
    report::print_aggregate_table("Karma", &report.buckets);
    report::print_unassigned(report.unassigned);
    ctx.render(&Chart {
        name: "karma_bins_vs_score".to_owned(),
        title: "Average Score by Author Karma Level".to_owned(),
        x_label: "Karma Range".to_owned(),
        y_label: "Average Score".to_owned(),
        data: ChartData::Bar {
            bars: report
                .buckets
                .iter()
                .map(|row| (row.label.clone(), row.mean))
                .collect(),
        },
    });

    println!(
        "\nKarma-score correlation by year (years with at least {} stories):",
        config.yearly_min_samples
    );
    println!("  {:<8} {:>8} {:>12}", "Year", "Stories", "Correlation");
    println!("  {}", "-".repeat(30));
    for year in &report.yearly {
        println!(
            "  {:<8} {:>8} {:>12.4}",
            year.year, year.stories, year.correlation
        );
    }
    ctx.render(&Chart {
        name: "karma_correlation_by_year".to_owned(),
        title: "Karma-Score Correlation by Year".to_owned(),
        x_label: "Year".to_owned(),
        y_label: "Correlation Coefficient".to_owned(),
        data: ChartData::Line {
            points: report
                .yearly
                .iter()
                .map(|year| (f64::from(year.year), year.correlation))
                .collect(),
        },
    });
    Ok(())
}
