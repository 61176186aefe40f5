use hunches_analysis::{analyses::domain::DomainReport, enrich::Enricher};

use crate::{
    chart::{Chart, ChartData},
    report,
    source::stories::StoryFilter,
};

use super::AnalysisContext;

pub(crate) fn run(ctx: &AnalysisContext<'_>) -> anyhow::Result<()> {
    let stories = ctx.load(&[StoryFilter::RequireUrl], Enricher::new())?;
    let report = DomainReport::compute(&stories, ctx.config);
    let min_posts = ctx.config.min_domain_posts;

    println!("Total domains analyzed: {}", report.domains.len());
    println!("Domains with {min_posts}+ posts: {}", report.popular.len());
    report::print_unassigned(report.unassigned);

    let top = report.top();
    println!(
        "\nTop {} domains by average score (with at least {min_posts} posts):",
        top.len()
    );
    report::print_aggregate_table("Domain", top);

    let bars = top
        .iter()
        .map(|stats| (stats.key.clone(), stats.mean))
        .collect();
    ctx.render(&Chart {
        name: "domain_popularity".to_owned(),
        title: format!(
            "Average Score by Domain (Top {} Domains with {min_posts}+ Posts)",
            top.len()
        ),
        x_label: "Domain".to_owned(),
        y_label: "Average Score".to_owned(),
        data: ChartData::Bar { bars },
    });

    ctx.render(&Chart {
        name: "domain_count_vs_score".to_owned(),
        title: "Domain Popularity vs Average Score".to_owned(),
        x_label: "Number of Posts".to_owned(),
        y_label: "Average Score".to_owned(),
        data: ChartData::Scatter {
            points: report.points(),
            log_x: true,
        },
    });

    println!("\nComparison of official news sites vs other domains:");
    println!(
        "Average score for news sites: {}",
        report::fmt_value(report.news_avg_score)
    );
    println!(
        "Average score for other domains: {}",
        report::fmt_value(report.other_avg_score)
    );
    Ok(())
}
