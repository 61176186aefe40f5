use anyhow::Context as _;
use hunches_analysis::{analyses::title::TitleReport, enrich::Enricher};

use crate::{
    chart::{Chart, ChartData},
    report,
    source::stories::StoryFilter,
};

use super::AnalysisContext;

pub(crate) fn run(ctx: &AnalysisContext<'_>) -> anyhow::Result<()> {
    let stories = ctx.load(&[StoryFilter::RequireTitle], Enricher::new())?;
    let report =
        TitleReport::compute(&stories, ctx.config).context("invalid bucket boundaries")?;

    println!("Total stories analyzed: {}", report.stories());
    println!(
        "Average title length: {} characters",
        report::fmt_value(report.mean_title_length)
    );
    println!("Average score: {}", report::fmt_value(report.mean_score));
    println!(
        "Correlation between title length and score: {}",
        report::fmt_correlation(report.correlation)
    );

    ctx.render(&Chart {
        name: "title_length_vs_score".to_owned(),
        title: "Relationship Between Title Length and Score".to_owned(),
        x_label: "Title Length (characters)".to_owned(),
        y_label: "Score".to_owned(),
        data: ChartData::Scatter {
            points: report.points.clone(),
            log_x: false,
        },
    });

    println!("\nScores by title length bins:");
    report::print_aggregate_table("Title length", &report.buckets);
    report::print_unassigned(report.unassigned);
    Ok(())
}
