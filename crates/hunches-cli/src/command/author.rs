use anyhow::Context as _;
use hunches_analysis::{analyses::author::AuthorReport, enrich::Enricher};

use crate::{
    chart::{Chart, ChartData},
    report,
    source::stories::StoryFilter,
};

use super::AnalysisContext;

pub(crate) fn run(ctx: &AnalysisContext<'_>) -> anyhow::Result<()> {
    let stories = ctx.load(&[StoryFilter::RequireAuthor], Enricher::new())?;
    let report =
        AuthorReport::compute(&stories, ctx.config).context("invalid bucket boundaries")?;

    println!("Total unique authors analyzed: {}", report.authors.len());
    println!(
        "Average posts per author: {}",
        report::fmt_value(report.mean_post_count)
    );
    println!(
        "Average score per author: {}",
        report::fmt_value(report.mean_avg_score)
    );
    println!(
        "Correlation between post count and average score: {}",
        report::fmt_correlation(report.correlation)
    );

    ctx.render(&Chart {
        name: "author_posts_vs_score".to_owned(),
        title: "Relationship Between Author Post Count and Average Score".to_owned(),
        x_label: "Number of Posts by Author".to_owned(),
        y_label: "Average Score".to_owned(),
        data: ChartData::Scatter {
            points: report.points(),
            log_x: true,
        },
    });

    println!("\nAverage author scores by post count bins:");
    report::print_aggregate_table("Posts", &report.buckets);

    println!(
        "\nTop {} authors by average score (with at least {} posts):",
        ctx.config.top_authors, ctx.config.min_author_stories
    );
    println!("  {:<24} {:>8} {:>12}", "Author", "Posts", "Avg score");
    println!("  {}", "-".repeat(46));
    for activity in &report.top_authors {
        println!(
            "  {:<24} {:>8} {:>12.2}",
            activity.author, activity.post_count, activity.avg_score
        );
    }
    Ok(())
}
