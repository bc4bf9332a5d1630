use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use rest_tally::breweries::BREWERIES_URL;
use rest_tally::countries::COUNTRIES_URL;

/// Fetches a JSON list from a public REST API once and prints grouped and counted views of it.
#[derive(Parser)]
#[clap(version)]
pub(crate) struct Cli {
  #[clap(subcommand)]
  pub(crate) report: Report,
}

#[derive(Subcommand)]
pub(crate) enum Report {
  /// Country names with their currencies, and the countries using Dollar or Euro.
  Countries(CountriesArgs),
  /// Breweries listed and counted per state, brewery types per city, breweries with websites.
  Breweries(BreweriesArgs),
}

#[derive(Args)]
pub(crate) struct Source {
  /// Optional request timeout in seconds. Without it the request waits as long as it takes.
  #[clap(long)]
  pub(crate) timeout: Option<u64>,
  /// Read the JSON array from this file instead of requesting the URL.
  #[clap(long, short)]
  pub(crate) input: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct CountriesArgs {
  /// Endpoint returning the list of countries.
  #[clap(long, env = "COUNTRIES_URL", default_value = COUNTRIES_URL)]
  pub(crate) url: String,
  #[clap(flatten)]
  pub(crate) source: Source,
  /// Additional currency names to list countries for, case-insensitive. Can be repeated.
  #[clap(long, short)]
  pub(crate) currency: Vec<String>,
  /// Match `--currency` values anywhere in the currency name (`dollar` finds `United States dollar`).
  #[clap(long)]
  pub(crate) partial: bool,
  /// Also print how many countries use each currency.
  #[clap(long)]
  pub(crate) usage: bool,
}

#[derive(Args)]
pub(crate) struct BreweriesArgs {
  /// Endpoint returning the list of breweries.
  #[clap(long, env = "BREWERIES_URL", default_value = BREWERIES_URL)]
  pub(crate) url: String,
  #[clap(flatten)]
  pub(crate) source: Source,
  /// State to list and count breweries for. Can be repeated. [default: Alaska, Maine, New York]
  #[clap(long = "state", short)]
  pub(crate) states: Vec<String>,
  /// State whose brewery types are counted per city.
  #[clap(long, default_value = "New York")]
  pub(crate) city_state: String,
}
