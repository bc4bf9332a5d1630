use std::io::{self, Write};

use serde_json::Value;

use crate::fetcher::Dataset;
use crate::model::{nested_text_field, Currency, Record};
use crate::report::with_records;

pub const COUNTRIES_URL: &str = "https://restcountries.com/v3/all";

const NAME_PATH: [&str; 2] = ["name", "common"];

/// How a requested currency name is compared to a country's currency names.
/// Both modes ignore case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyMatch {
    Exact,
    Contains,
}

impl CurrencyMatch {
    fn matches(self, currency_name: &str, wanted: &str) -> bool {
        let currency_name = currency_name.to_lowercase();
        let wanted = wanted.to_lowercase();
        match self {
            CurrencyMatch::Exact => currency_name == wanted,
            CurrencyMatch::Contains => currency_name.contains(&wanted),
        }
    }
}

fn currencies(country: &Record) -> Vec<(&str, Currency)> {
    match country.get("currencies") {
        Some(Value::Object(currencies)) => currencies
            .iter()
            .map(|(code, info)| (code.as_str(), Currency::from_value(info)))
            .collect(),
        _ => Vec::new(),
    }
}

/// Sections printed after the fixed Dollar and Euro listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountriesOptions {
    pub currencies: Vec<String>,
    pub mode: CurrencyMatch,
    pub usage: bool,
}

impl Default for CountriesOptions {
    fn default() -> Self {
        CountriesOptions { currencies: Vec::new(), mode: CurrencyMatch::Exact, usage: false }
    }
}

pub struct CountryReport<'a> {
    pub dataset: &'a Dataset,
}

impl CountryReport<'_> {
    /// The full `countries` report: every section under its header.
    pub fn write_report<W: Write>(&self, options: &CountriesOptions, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nCountries and their Currencies:")?;
        self.display_countries_and_currencies(out)?;

        writeln!(out, "\nCountries with Dollar as currency:")?;
        self.display_countries_with_dollar(out)?;

        writeln!(out, "\nCountries with Euro as currency:")?;
        self.display_countries_with_euro(out)?;

        for currency in &options.currencies {
            writeln!(out, "\nCountries with {currency} as currency:")?;
            self.display_countries_with_currency(currency, options.mode, out)?;
        }

        if options.usage {
            writeln!(out, "\nCountries per Currency:")?;
            self.display_currency_usage(out)?;
        }

        Ok(())
    }

    pub fn display_countries_and_currencies<W: Write>(&self, out: &mut W) -> io::Result<()> {
        with_records(self.dataset, out, |countries, out| {
            for country in countries {
                let name = nested_text_field(country, &NAME_PATH);
                let currencies = currencies(country);
                if currencies.is_empty() {
                    writeln!(out, "Country: {name}, Currency: None")?;
                }
                for (_code, currency) in currencies {
                    writeln!(
                        out,
                        "Country: {name}, Currency: {currency_name}, Symbol: {symbol}",
                        currency_name = currency.name_or_unknown(),
                        symbol = currency.symbol_or_unknown()
                    )?;
                }
            }
            Ok(())
        })
    }

    /// Common names of the countries using `currency_name`, each listed once.
    pub fn countries_with_currency(&self, currency_name: &str, mode: CurrencyMatch) -> Vec<String> {
        self.dataset
            .records()
            .unwrap_or_default()
            .iter()
            .filter(|country| {
                currencies(country).iter().any(|(_, currency)| {
                    currency
                        .name
                        .as_deref()
                        .map_or(false, |name| mode.matches(name, currency_name))
                })
            })
            .map(|country| nested_text_field(country, &NAME_PATH).into_owned())
            .collect()
    }

    pub fn display_countries_with_currency<W: Write>(
        &self,
        currency_name: &str,
        mode: CurrencyMatch,
        out: &mut W,
    ) -> io::Result<()> {
        with_records(self.dataset, out, |_, out| {
            writeln!(out, "Countries using {currency_name}:\n")?;
            for name in self.countries_with_currency(currency_name, mode) {
                writeln!(out, "{name}")?;
            }
            Ok(())
        })
    }

    pub fn display_countries_with_dollar<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.display_countries_with_currency("Dollar", CurrencyMatch::Exact, out)
    }

    pub fn display_countries_with_euro<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.display_countries_with_currency("Euro", CurrencyMatch::Exact, out)
    }

    /// Number of countries per currency name, most used first.
    pub fn currency_usage(&self) -> Vec<(String, usize)> {
        let mut usage: Vec<(String, usize)> = Vec::new();
        for country in self.dataset.records().unwrap_or_default() {
            let mut seen: Vec<String> = Vec::new();
            for (_code, currency) in currencies(country) {
                let name = currency.name_or_unknown().to_string();
                if seen.contains(&name) {
                    continue;
                }
                match usage.iter_mut().find(|(key, _)| *key == name) {
                    Some((_, count)) => *count += 1,
                    None => usage.push((name.clone(), 1)),
                }
                seen.push(name);
            }
        }
        usage.sort_by(|(a_name, a_count), (b_name, b_count)| {
            b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
        });
        usage
    }

    pub fn display_currency_usage<W: Write>(&self, out: &mut W) -> io::Result<()> {
        with_records(self.dataset, out, |_, out| {
            for (currency_name, count) in self.currency_usage() {
                writeln!(out, "{currency_name}: {count} countries")?;
            }
            Ok(())
        })
    }
}
