use hunches_analysis::{
    aggregate::ScoreAggregate,
    analyses::time::{TimeReport, WindowCorrelations},
    enrich::Enricher,
};

use crate::{
    chart::{Chart, ChartData},
    report,
};

use super::AnalysisContext;

pub(crate) fn run(ctx: &AnalysisContext<'_>) -> anyhow::Result<()> {
    let stories = ctx.load(&[], Enricher::new())?;
    let report = TimeReport::compute(&stories, ctx.config);

    match (report.first_post, report.last_post) {
        (Some(first), Some(last)) => println!("Data date range: {first} to {last}"),
        _ => println!("Data date range: no dated stories"),
    }
    report::print_unassigned(report.unassigned);

    println!("\nScores by year:");
    report::print_aggregate_table("Year", &report.yearly);
    ctx.render(&Chart {
        name: "yearly_scores".to_owned(),
        title: "Average Score by Year".to_owned(),
        x_label: "Year".to_owned(),
        y_label: "Average Score".to_owned(),
        data: ChartData::Line {
            points: mean_by_key(&report.yearly, f64::from),
        },
    });

    println!("\nScores by hour of day (UTC):");
    report::print_aggregate_table("Hour", &report.hourly);
    ctx.render(&Chart {
        name: "hourly_scores".to_owned(),
        title: "Average Score by Hour of Day".to_owned(),
        x_label: "Hour (0-23, UTC)".to_owned(),
        y_label: "Average Score".to_owned(),
        data: ChartData::Line {
            points: mean_by_key(&report.hourly, f64::from),
        },
    });

    println!("\nScores by day of week:");
    report::print_aggregate_table("Day", &report.weekday);
    ctx.render(&Chart {
        name: "daily_scores".to_owned(),
        title: "Average Score by Day of Week".to_owned(),
        x_label: "Day of Week".to_owned(),
        y_label: "Average Score".to_owned(),
        data: ChartData::Bar {
            bars: report
                .weekday
                .iter()
                .map(|row| (row.label.clone(), row.mean))
                .collect(),
        },
    });

    let window = report
        .recent_from
        .map_or_else(String::new, |from| format!(", from {from}"));
    println!(
        "\nCorrelations for recent posts (last {} years{window}):",
        ctx.config.recent_years
    );
    print_correlations(&report.recent);
    println!("\nCorrelations for older posts:");
    print_correlations(&report.older);
    Ok(())
}

fn mean_by_key<K, F>(rows: &[ScoreAggregate<K>], to_x: F) -> Vec<(f64, f64)>
where
    K: Copy,
    F: Fn(K) -> f64,
{
    rows.iter().map(|row| (to_x(row.key), row.mean)).collect()
}

fn print_correlations(window: &WindowCorrelations) {
    println!("  stories                   {:>10}", window.stories);
    println!(
        "  title_length_correlation  {:>10}",
        report::fmt_correlation(window.title_length)
    );
    println!(
        "  hour_correlation          {:>10}",
        report::fmt_correlation(window.hour)
    );
    println!(
        "  day_of_week_correlation   {:>10}",
        report::fmt_correlation(window.day_of_week)
    );
}
