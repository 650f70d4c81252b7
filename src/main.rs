use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

mod error;
mod export;
mod format;
mod insight;
mod loader;
mod models;
mod rank;
mod report;
mod rollup;
mod seed;
mod sentiment;
mod trend;

use models::{CampaignRecord, Platform, RankMetric};

#[derive(Parser)]
#[command(name = "campaign-metrics")]
#[command(about = "Aggregate social campaign analytics into platform, trend and ranking views", long_about = None)]
struct Cli {
    /// Campaign file (JSON array, analysis JSON, or exported CSV)
    #[arg(long, global = true, env = "CAMPAIGN_METRICS_INPUT")]
    input: Option<PathBuf>,
    /// Generated insights (JSON array or object with `insights`)
    #[arg(long, global = true, env = "CAMPAIGN_METRICS_INSIGHTS")]
    insights: Option<PathBuf>,
    /// Print results as JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the bundled mock campaign dataset
    Seed {
        #[arg(long, default_value = "Acme")]
        company: String,
        #[arg(long, default_value = "campaigns.json")]
        out: PathBuf,
    },
    /// Headline totals and the best performing campaign
    Summary,
    /// Per-platform rollups, best engagement first
    Platforms,
    /// Month-by-month rollups with change against the previous month
    Trends,
    /// Rank campaigns by a metric
    Top {
        #[arg(long, value_enum, default_value_t = RankMetric::Engagement)]
        metric: RankMetric,
        #[arg(long, value_enum)]
        platform: Option<Platform>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        company: Option<String>,
        #[arg(long, default_value_t = 5)]
        top: usize,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Export campaigns as CSV or a JSON analysis document
    Export {
        #[arg(long, value_enum, default_value_t = export::ExportFormat::Json)]
        format: export::ExportFormat,
        #[arg(long)]
        company: Option<String>,
        #[arg(long, default_value_t = false)]
        without_campaigns: bool,
        #[arg(long, default_value_t = false)]
        without_insights: bool,
        #[arg(long)]
        out: PathBuf,
    },
    /// Comment sentiment for paid posts
    Sentiment {
        #[arg(long)]
        posts: PathBuf,
        #[arg(long, value_enum)]
        filter: Option<sentiment::Sentiment>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campaign_metrics=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Seed { company, out } => {
            let campaigns = seed::sample_campaigns(&company);
            let body = serde_json::to_string_pretty(&campaigns)?;
            std::fs::write(&out, body)
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(count = campaigns.len(), "seed data written");
            println!("Wrote {} campaigns to {}.", campaigns.len(), out.display());
        }
        Commands::Summary => {
            let campaigns = load_input(cli.input.as_deref())?;
            let summary = rank::summarize(&campaigns);
            if cli.json {
                return print_json(&summary);
            }
            println!(
                "{} campaigns, {} avg engagement, {} reach, {} impressions",
                summary.total_campaigns,
                format::format_percent(summary.avg_engagement_rate),
                format::format_number(summary.total_reach),
                format::format_number(summary.total_impressions)
            );
            if let Some(best) = summary.best_performing {
                println!(
                    "Best performer: {} on {} ({})",
                    best.title,
                    best.platform,
                    format::format_percent(best.engagement_rate)
                );
            }
        }
        Commands::Platforms => {
            let campaigns = load_input(cli.input.as_deref())?;
            let rollups = rollup::build_platform_rollups(&campaigns);
            if cli.json {
                return print_json(&rollups);
            }
            if rollups.is_empty() {
                println!("No campaigns found.");
                return Ok(());
            }
            let max_engagement = rollup::max_average_engagement(&rollups);
            for platform in &rollups {
                println!(
                    "- {:<10} {:>3} campaigns {:>7} engagement {:>8} reach {:>5.1}x ROI {:>14} budget  {}",
                    platform.platform,
                    platform.campaign_count,
                    format::format_percent(platform.average_engagement),
                    format::format_number(platform.total_reach),
                    platform.average_roi,
                    format::format_currency(platform.total_budget),
                    bar(rollup::bar_width(platform.average_engagement, max_engagement))
                );
            }
        }
        Commands::Trends => {
            let campaigns = load_input(cli.input.as_deref())?;
            let report = trend::build_monthly_trends(&campaigns);
            if cli.json {
                return print_json(&report);
            }
            if report.months.is_empty() {
                println!("No dated campaigns found.");
            }
            for month in &report.months {
                let change = month
                    .delta
                    .map(|d| {
                        format!(
                            "  {} / {}",
                            format::format_signed_percent(d.engagement),
                            format::format_signed_number(d.reach)
                        )
                    })
                    .unwrap_or_default();
                println!(
                    "- {:<9} {:>3} campaigns {:>7} engagement {:>8} reach{}",
                    month.rollup.label,
                    month.rollup.campaign_count,
                    format::format_percent(month.rollup.average_engagement),
                    format::format_number(month.rollup.total_reach),
                    change
                );
            }
            if !report.skipped.is_empty() {
                println!("Skipped {} campaigns without a usable start date.", report.skipped.len());
            }
        }
        Commands::Top {
            metric,
            platform,
            limit,
        } => {
            let campaigns = load_input(cli.input.as_deref())?;
            let query = rank::RankQuery {
                metric,
                platform,
                limit,
            };
            let ranked = rank::rank_campaigns(&campaigns, &query);
            if cli.json {
                return print_json(&ranked);
            }
            if ranked.is_empty() {
                println!("No campaigns match.");
                return Ok(());
            }
            for entry in &ranked {
                let campaign = entry.campaign;
                println!(
                    "{:>2}. {} ({}) {} engagement, {} reach, {:.1}x ROI",
                    entry.rank,
                    campaign.title,
                    campaign.platform,
                    format::format_percent(campaign.engagement_rate),
                    format::format_number(campaign.reach),
                    campaign.roi
                );
            }
        }
        Commands::Report { company, top, out } => {
            let campaigns = load_input(cli.input.as_deref())?;
            let company = company_name(company, &campaigns);
            let insights = load_optional_insights(cli.insights.as_deref())?;
            let report = report::build_report(&company, &campaigns, &insights, top);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export {
            format,
            company,
            without_campaigns,
            without_insights,
            out,
        } => {
            let campaigns = load_input(cli.input.as_deref())?;
            match format {
                export::ExportFormat::Csv => {
                    let file = std::fs::File::create(&out)
                        .with_context(|| format!("failed to create {}", out.display()))?;
                    export::write_csv(file, &campaigns)?;
                }
                export::ExportFormat::Json => {
                    let company = company_name(company, &campaigns);
                    let insights = load_optional_insights(cli.insights.as_deref())?;
                    let options = export::ExportOptions {
                        include_campaigns: !without_campaigns,
                        include_insights: !without_insights,
                        format,
                    };
                    let document = export::build_export(
                        &company,
                        &campaigns,
                        &insights,
                        options,
                        chrono::Utc::now(),
                    );
                    std::fs::write(&out, serde_json::to_string_pretty(&document)?)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                }
            }
            println!("Exported {} campaigns to {}.", campaigns.len(), out.display());
        }
        Commands::Sentiment { posts, filter } => {
            let posts = loader::load_paid_posts(&posts)?;
            let views: Vec<sentiment::PostSentiment<'_>> = posts
                .iter()
                .map(|post| sentiment::post_sentiment(post, filter))
                .collect();
            if cli.json {
                return print_json(&views);
            }
            for view in &views {
                println!(
                    "{} ({}, {:?} ROI tier, {} CTR): {} likes, {} shares, {} comments",
                    view.title,
                    view.platform,
                    view.roi_tier,
                    format::format_percent(view.ctr),
                    format::format_number(view.metrics.likes),
                    format::format_number(view.metrics.shares),
                    format::format_number(view.metrics.comments)
                );
                println!(
                    "    reported: {} positive / {} neutral / {} negative",
                    format::format_percent(view.reported.positive),
                    format::format_percent(view.reported.neutral),
                    format::format_percent(view.reported.negative)
                );
                println!(
                    "    computed from {} comments: {} positive / {} neutral / {} negative",
                    view.computed.total,
                    format::format_percent(view.computed.share.positive),
                    format::format_percent(view.computed.share.neutral),
                    format::format_percent(view.computed.share.negative)
                );
                if !view.top_demographics.is_empty() {
                    println!("    demographics: {}", view.top_demographics.join(", "));
                }
                if !view.top_locations.is_empty() {
                    println!("    locations: {}", view.top_locations.join(", "));
                }
                if filter.is_some() {
                    for comment in &view.comments {
                        println!("    {}: {}", comment.author, comment.content);
                    }
                } else {
                    for comment in view.top_comments {
                        println!("    * {}: {}", comment.author, comment.content);
                    }
                }
            }
        }
    }

    Ok(())
}

fn load_input(input: Option<&Path>) -> anyhow::Result<Vec<CampaignRecord>> {
    let path = input.context("--input or CAMPAIGN_METRICS_INPUT must point at a campaign file")?;
    loader::load_campaigns(path)
}

fn load_optional_insights(path: Option<&Path>) -> anyhow::Result<Vec<insight::Insight>> {
    match path {
        Some(path) => loader::load_insights(path),
        None => Ok(Vec::new()),
    }
}

fn company_name(flag: Option<String>, campaigns: &[CampaignRecord]) -> String {
    flag.or_else(|| {
        campaigns
            .iter()
            .map(|c| c.company_name.trim())
            .find(|name| !name.is_empty())
            .map(str::to_string)
    })
    .unwrap_or_else(|| "Unknown company".to_string())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn bar(percent: f64) -> String {
    "#".repeat((percent / 5.0).round() as usize)
}
