mod cli;

use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{BreweriesArgs, Cli, CountriesArgs, Report, Source};
use rest_tally::breweries::{BreweriesOptions, BreweryReport};
use rest_tally::countries::{CountriesOptions, CountryReport, CurrencyMatch};
use rest_tally::error::Error;
use rest_tally::fetcher::{Dataset, HttpRecordLoader};
use rest_tally::progress::SpinnerHelper;

#[tokio::main]
async fn main() -> Result<(), Error> {
  let filter = EnvFilter::try_from_env("REST_TALLY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();

  let stdout = io::stdout();
  let mut out = stdout.lock();

  match Cli::parse().report {
    Report::Countries(args) => countries(args, &mut out).await,
    Report::Breweries(args) => breweries(args, &mut out).await,
  }
}

async fn fetch<W: Write>(url: &str, source: &Source, out: &mut W) -> Result<Dataset, Error> {
  let mut dataset = Dataset::new(url);

  if let Some(path) = &source.input {
    dataset.load_file(path, out)?;
    return Ok(dataset);
  }

  let loader = match source.timeout {
    Some(seconds) => HttpRecordLoader::with_timeout(Duration::from_secs(seconds))?,
    None => HttpRecordLoader::new(),
  };
  let spinner = SpinnerHelper::create(format!("Fetching {url}"));
  let fetched = dataset.fetch_data(&loader, out).await;
  spinner.finish_and_clear();
  fetched?;

  Ok(dataset)
}

async fn countries<W: Write>(args: CountriesArgs, out: &mut W) -> Result<(), Error> {
  let dataset = fetch(&args.url, &args.source, out).await?;
  let options = CountriesOptions {
    currencies: args.currency,
    mode: if args.partial { CurrencyMatch::Contains } else { CurrencyMatch::Exact },
    usage: args.usage,
  };

  Ok(CountryReport { dataset: &dataset }.write_report(&options, out)?)
}

async fn breweries<W: Write>(args: BreweriesArgs, out: &mut W) -> Result<(), Error> {
  let dataset = fetch(&args.url, &args.source, out).await?;
  let options = BreweriesOptions { states: args.states, city_state: args.city_state };

  Ok(BreweryReport { dataset: &dataset }.write_report(&options, out)?)
}
