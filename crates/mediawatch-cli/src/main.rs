//! Command line front end for the media-monitoring news API.
//!
//! Plays the role of the dashboard view: searches articles with the full
//! filter set, pages through results manually (`--pages`) or to the end
//! (`--all`), and prints distinct filter values and sentiment aggregates.

use anyhow::{bail, Context};
use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use mediawatch_news::{
    ArticleFeed, DateRange, FilterState, LoadTrigger, NewsClient, Sentiment, DEFAULT_PAGE_SIZE,
};

#[derive(Debug, Parser)]
#[command(name = "mediawatch")]
#[command(about = "Search and monitor crawled news articles")]
struct Cli {
    /// Base URL of the news API, e.g. https://example.ngrok-free.app/api
    #[arg(long, env = "MEDIAWATCH_API_URL")]
    api_url: String,

    /// Bearer token attached to every request.
    #[arg(long, env = "MEDIAWATCH_API_TOKEN")]
    api_token: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search articles and page through the results.
    Search(SearchArgs),
    /// Count articles matching the filters.
    Count(FilterArgs),
    /// List distinct values of a field (country, language, sentiment, ...).
    Distinct {
        #[arg(long)]
        field: String,
    },
    /// List outlet names, optionally scoped to countries.
    Outlets {
        #[arg(long = "country")]
        countries: Vec<String>,
    },
    /// Sentiment aggregates: overall totals, daily series, or per country.
    Sentiment {
        /// Daily series instead of overall totals.
        #[arg(long, conflicts_with = "by_country")]
        by_date: bool,
        /// Per-country breakdown instead of overall totals.
        #[arg(long)]
        by_country: bool,
        /// Series start date; defaults to the first day of last month.
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// Free-text search across title and summary.
    #[arg(long)]
    query: Option<String>,
    /// Headline-only search (ignored when --query is given).
    #[arg(long)]
    headline: Option<String>,
    #[arg(long = "country")]
    countries: Vec<String>,
    #[arg(long = "language")]
    languages: Vec<String>,
    /// Sentiment categories: very_negative, negative, neutral, positive,
    /// very_positive.
    #[arg(long = "sentiment")]
    sentiments: Vec<Sentiment>,
    #[arg(long = "outlet")]
    outlets: Vec<String>,
    #[arg(long = "region")]
    regions: Vec<String>,
    #[arg(long = "tier")]
    tiers: Vec<String>,
    #[arg(long = "media-type")]
    media_types: Vec<String>,
    #[arg(long = "tag")]
    tags: Vec<String>,
    #[arg(long = "exclude-tag")]
    exclude_tags: Vec<String>,
    /// Only articles published on or after this date.
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Only articles published on or before this date.
    #[arg(long)]
    to: Option<NaiveDate>,
    #[arg(long)]
    critical: bool,
    #[arg(long)]
    verified: bool,
    #[arg(long)]
    premium: bool,
}

#[derive(Debug, Args)]
struct SearchArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Number of pages to fetch.
    #[arg(long, default_value_t = 1, conflicts_with = "all")]
    pages: u32,

    /// Keep fetching until the last page.
    #[arg(long)]
    all: bool,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u64,
}

impl FilterArgs {
    fn into_filter_state(self) -> FilterState {
        let mut filters = FilterState::new();
        filters.search_text = self.query.unwrap_or_default();
        filters.search_headlines = self.headline.unwrap_or_default();
        filters.outlet_countries = self.countries;
        filters.languages = self.languages;
        filters.sentiments = self.sentiments;
        filters.outlets = self.outlets;
        filters.outlet_regions = self.regions;
        filters.outlet_tiers = self.tiers;
        filters.media_types = self.media_types;
        filters.tags = self.tags;
        filters.exclude_tags = self.exclude_tags;
        filters.critical_only = self.critical;
        filters.verified_only = self.verified;
        filters.premium_only = self.premium;
        if let Some(from) = self.from {
            filters.date_range = Some(DateRange {
                from: from.and_time(NaiveTime::MIN).and_utc(),
                to: self.to.map(|to| to.and_time(NaiveTime::MIN).and_utc()),
            });
        }
        filters
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut client = NewsClient::new(&cli.api_url, cli.timeout_secs)
        .context("failed to construct news client")?;
    if let Some(token) = cli.api_token {
        client = client.with_token(token);
    }

    match cli.command {
        Commands::Search(args) => run_search(client, args).await,
        Commands::Count(args) => {
            let total = client.count(&args.into_filter_state()).await?;
            println!("{}", total.count);
            Ok(())
        }
        Commands::Distinct { field } => {
            for value in client.distinct_values(&field).await? {
                println!("{value}");
            }
            Ok(())
        }
        Commands::Outlets { countries } => {
            for outlet in client.distinct_outlets(&countries).await? {
                println!("{outlet}");
            }
            Ok(())
        }
        Commands::Sentiment {
            by_date,
            by_country,
            from,
            to,
        } => run_sentiment(client, by_date, by_country, from, to).await,
    }
}

async fn run_search(client: NewsClient, args: SearchArgs) -> anyhow::Result<()> {
    let mut feed = ArticleFeed::with_page_size(client, args.page_size);
    let mut trigger = LoadTrigger::new();

    feed.apply_filters(args.filters.into_filter_state()).await;
    if let Some(err) = feed.last_error() {
        bail!("failed to fetch articles: {err}");
    }
    let mut printed = print_articles(feed.items(), 0);

    loop {
        let enough_pages = !args.all && trigger.fetches_started() + 1 >= u64::from(args.pages);
        if enough_pages || !feed.has_more() {
            break;
        }
        trigger.on_load_more(&mut feed).await;
        if let Some(err) = feed.last_error() {
            bail!("failed to fetch more articles: {err}");
        }
        printed = print_articles(feed.items(), printed);
    }

    if feed.items().is_empty() {
        println!("no articles matched");
    } else if feed.has_more() {
        println!("-- more available --");
    }
    Ok(())
}

/// Prints articles starting at `from`, returns the new count printed.
fn print_articles(articles: &[mediawatch_news::Article], from: usize) -> usize {
    for (index, article) in articles.iter().enumerate().skip(from) {
        let outlet = article.meta_site_name.as_deref().unwrap_or("unknown outlet");
        let date = article
            .publish_date
            .map_or_else(|| "no date".to_owned(), |d| d.format("%Y-%m-%d").to_string());
        println!(
            "{:>4}. [{}] {} | {} ({})",
            index + 1,
            article.sentiment,
            article.title,
            outlet,
            date
        );
        println!("      {}", article.url);
    }
    articles.len()
}

async fn run_sentiment(
    client: NewsClient,
    by_date: bool,
    by_country: bool,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> anyhow::Result<()> {
    if by_date {
        let from = from.unwrap_or_else(|| first_day_of_previous_month(Utc::now().date_naive()));
        for day in client.sentiment_by_date(from, to).await? {
            println!(
                "{}  ++{} +{} ={} -{} --{}  (all {})",
                day.date,
                day.very_positive,
                day.positive,
                day.neutral,
                day.negative,
                day.very_negative,
                day.all
            );
        }
    } else if by_country {
        for entry in client.sentiment_by_country().await? {
            println!(
                "{}  ++{} +{} ={} -{} --{}  (all {})",
                entry.country,
                entry.very_positive,
                entry.positive,
                entry.neutral,
                entry.negative,
                entry.very_negative,
                entry.all
            );
        }
    } else {
        for bucket in client.sentiment_totals().await? {
            println!("{}: {}", bucket.name, bucket.count);
        }
    }
    Ok(())
}

fn first_day_of_previous_month(today: NaiveDate) -> NaiveDate {
    let (year, month) = if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_month_mid_year() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 25).unwrap();
        assert_eq!(
            first_day_of_previous_month(today),
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
        );
    }

    #[test]
    fn previous_month_wraps_january() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert_eq!(
            first_day_of_previous_month(today),
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
        );
    }

    #[test]
    fn filter_args_map_onto_filter_state() {
        let args = FilterArgs {
            query: Some("election".to_owned()),
            headline: None,
            countries: vec!["India".to_owned()],
            languages: vec![],
            sentiments: vec![Sentiment::Negative],
            outlets: vec![],
            regions: vec![],
            tiers: vec![],
            media_types: vec![],
            tags: vec![],
            exclude_tags: vec!["sports".to_owned()],
            from: NaiveDate::from_ymd_opt(2025, 1, 1),
            to: None,
            critical: true,
            verified: false,
            premium: false,
        };
        let filters = args.into_filter_state();
        assert_eq!(filters.search_text, "election");
        assert_eq!(filters.outlet_countries, vec!["India"]);
        assert_eq!(filters.sentiments, vec![Sentiment::Negative]);
        assert_eq!(filters.exclude_tags, vec!["sports"]);
        assert!(filters.critical_only);
        assert!(filters.date_range.is_some());
    }
}
