use std::io::{self, Write};

use serde_json::Value;

use crate::fetcher::Dataset;
use crate::model::Record;
use crate::report::{count_by, count_by_where, count_nested, group_names_by, with_records};

pub const BREWERIES_URL: &str = "https://api.openbrewerydb.org/breweries";

pub const DEFAULT_STATES: [&str; 3] = ["Alaska", "Maine", "New York"];

fn has_website(brewery: &Record) -> bool {
    matches!(brewery.get("website_url"), Some(Value::String(url)) if !url.is_empty())
}

/// States to list and count, and the state whose cities are broken down by brewery type.
/// An empty `states` falls back to [`DEFAULT_STATES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreweriesOptions {
    pub states: Vec<String>,
    pub city_state: String,
}

impl Default for BreweriesOptions {
    fn default() -> Self {
        BreweriesOptions { states: Vec::new(), city_state: "New York".to_string() }
    }
}

pub struct BreweryReport<'a> {
    pub dataset: &'a Dataset,
}

impl BreweryReport<'_> {
    /// The full `breweries` report: every section under its header.
    pub fn write_report<W: Write>(&self, options: &BreweriesOptions, out: &mut W) -> io::Result<()> {
        let states: Vec<&str> = if options.states.is_empty() {
            DEFAULT_STATES.to_vec()
        } else {
            options.states.iter().map(String::as_str).collect()
        };

        writeln!(out, "\nList of Breweries by State:")?;
        self.list_breweries_by_state(&states, out)?;

        writeln!(out, "\nCount of Breweries by State:")?;
        self.count_breweries_by_state(&states, out)?;

        writeln!(out, "\nBrewery Types by City in {city_state}:", city_state = options.city_state)?;
        self.count_brewery_types_by_city(&options.city_state, out)?;

        writeln!(out, "\nBreweries with Websites by State:")?;
        self.count_breweries_with_websites(&states, out)?;

        Ok(())
    }

    pub fn list_breweries_by_state<W: Write>(&self, states: &[&str], out: &mut W) -> io::Result<()> {
        with_records(self.dataset, out, |breweries, out| {
            for (state, names) in group_names_by(breweries, "state", states, "name") {
                writeln!(out, "\nBreweries in {state}:")?;
                for name in names {
                    writeln!(out, "- {name}")?;
                }
            }
            Ok(())
        })
    }

    pub fn count_breweries_by_state<W: Write>(&self, states: &[&str], out: &mut W) -> io::Result<()> {
        with_records(self.dataset, out, |breweries, out| {
            for (state, count) in count_by(breweries, "state", states) {
                writeln!(out, "{state}: {count} breweries")?;
            }
            Ok(())
        })
    }

    pub fn count_brewery_types_by_city<W: Write>(&self, state: &str, out: &mut W) -> io::Result<()> {
        with_records(self.dataset, out, |breweries, out| {
            for (city, types) in count_nested(breweries, ("state", state), "city", "brewery_type") {
                writeln!(out, "\nCity: {city}")?;
                for (brewery_type, count) in types {
                    writeln!(out, "  {brewery_type}: {count}")?;
                }
            }
            Ok(())
        })
    }

    pub fn count_breweries_with_websites<W: Write>(
        &self,
        states: &[&str],
        out: &mut W,
    ) -> io::Result<()> {
        with_records(self.dataset, out, |breweries, out| {
            for (state, count) in count_by_where(breweries, "state", states, has_website) {
                writeln!(out, "{state}: {count} breweries with websites")?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use mockito::{mock, server_url};
    use serde_json::json;

    use crate::breweries::{BreweriesOptions, BreweryReport, DEFAULT_STATES};
    use crate::fetcher::{Dataset, HttpRecordLoader};
    use crate::report::tests::records;
    use crate::report::NOT_FETCHED;

    fn breweries_json() -> serde_json::Value {
        json!([
            {
                "name": "Alaskan Brewing Co",
                "brewery_type": "regional",
                "city": "Juneau",
                "state": "Alaska",
                "website_url": "http://alaskanbeer.com"
            },
            {
                "name": "Devil's Foot Beverage",
                "brewery_type": "micro",
                "city": "Juneau",
                "state": "Alaska",
                "website_url": null
            },
            {
                "name": "Allagash Brewing",
                "brewery_type": "regional",
                "city": "Portland",
                "state": "Maine",
                "website_url": ""
            },
            {
                "name": "Other Half",
                "brewery_type": "micro",
                "city": "Brooklyn",
                "state": "New York",
                "website_url": "http://otherhalfbrewing.com"
            },
            {
                "name": "Brooklyn Brewery",
                "brewery_type": "regional",
                "city": "Brooklyn",
                "state": "New York"
            },
            {
                "name": "Threes Brewing",
                "brewery_type": "brewpub",
                "city": "Brooklyn",
                "state": "New York",
                "website_url": "http://threesbrewing.com"
            },
            {
                "name": "Suarez Family",
                "city": "Livingston",
                "state": "New York"
            },
            {
                "name": "Half Acre",
                "brewery_type": "regional",
                "city": "Chicago",
                "state": "Illinois"
            }
        ])
    }

    fn breweries() -> Dataset {
        Dataset::with_records("mock", records(breweries_json()))
    }

    fn render<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
    {
        let mut out = Vec::new();
        write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn given_states_when_list_breweries_by_state_then_names_under_each_state() {
        let dataset = breweries();
        let report = BreweryReport { dataset: &dataset };

        let output = render(|out| report.list_breweries_by_state(&["Alaska", "Texas"], out));

        assert_eq!(
            output,
            "\nBreweries in Alaska:\n\
             - Alaskan Brewing Co\n\
             - Devil's Foot Beverage\n\
             \nBreweries in Texas:\n"
        );
    }

    #[test]
    fn given_default_states_when_count_breweries_by_state_then_tallies() {
        let dataset = breweries();
        let report = BreweryReport { dataset: &dataset };

        let output = render(|out| report.count_breweries_by_state(&DEFAULT_STATES, out));

        assert_eq!(output, "Alaska: 2 breweries\nMaine: 1 breweries\nNew York: 4 breweries\n");
    }

    #[test]
    fn given_state_when_count_brewery_types_by_city_then_types_per_city() {
        let dataset = breweries();
        let report = BreweryReport { dataset: &dataset };

        let output = render(|out| report.count_brewery_types_by_city("New York", out));

        assert_eq!(
            output,
            "\nCity: Brooklyn\n  micro: 1\n  regional: 1\n  brewpub: 1\n\
             \nCity: Livingston\n  Unknown: 1\n"
        );
    }

    #[test]
    fn given_null_or_empty_website_when_count_breweries_with_websites_then_not_counted() {
        let dataset = breweries();
        let report = BreweryReport { dataset: &dataset };

        let output = render(|out| report.count_breweries_with_websites(&DEFAULT_STATES, out));

        assert_eq!(
            output,
            "Alaska: 1 breweries with websites\n\
             Maine: 0 breweries with websites\n\
             New York: 2 breweries with websites\n"
        );
    }

    #[tokio::test]
    async fn given_failed_fetch_when_any_query_then_fetch_first_message() {
        // Given
        let _m = mock("GET", "/breweries/failing").with_status(503).create();
        let mut dataset = Dataset::new(format!("{}/breweries/failing", server_url()));
        dataset.fetch_data(&HttpRecordLoader::new(), &mut std::io::sink()).await.unwrap();
        let report = BreweryReport { dataset: &dataset };
        let expected = format!("{NOT_FETCHED}\n");

        // Then
        assert_eq!(render(|out| report.list_breweries_by_state(&DEFAULT_STATES, out)), expected);
        assert_eq!(render(|out| report.count_breweries_by_state(&DEFAULT_STATES, out)), expected);
        assert_eq!(render(|out| report.count_brewery_types_by_city("Maine", out)), expected);
        assert_eq!(render(|out| report.count_breweries_with_websites(&DEFAULT_STATES, out)), expected);
    }

    #[tokio::test]
    async fn given_mocked_api_when_fetch_and_count_then_tallies_match() {
        // Given
        let _m = mock("GET", "/breweries/listing")
            .with_status(200)
            .with_header("content-type", "application/json; charset=utf-8")
            .with_body(breweries_json().to_string())
            .create();
        let mut dataset = Dataset::new(format!("{}/breweries/listing", server_url()));

        // When
        dataset.fetch_data(&HttpRecordLoader::new(), &mut std::io::sink()).await.unwrap();
        let report = BreweryReport { dataset: &dataset };
        let output = render(|out| report.count_breweries_by_state(&["Illinois", "Unknown"], out));

        // Then
        assert_eq!(output, "Illinois: 1 breweries\nUnknown: 0 breweries\n");
    }

    #[test]
    fn given_default_options_when_write_report_then_default_states_and_new_york_cities() {
        let dataset = breweries();
        let report = BreweryReport { dataset: &dataset };

        let output = render(|out| report.write_report(&BreweriesOptions::default(), out));

        assert_eq!(
            output,
            "\nList of Breweries by State:\n\
             \nBreweries in Alaska:\n\
             - Alaskan Brewing Co\n\
             - Devil's Foot Beverage\n\
             \nBreweries in Maine:\n\
             - Allagash Brewing\n\
             \nBreweries in New York:\n\
             - Other Half\n\
             - Brooklyn Brewery\n\
             - Threes Brewing\n\
             - Suarez Family\n\
             \nCount of Breweries by State:\n\
             Alaska: 2 breweries\n\
             Maine: 1 breweries\n\
             New York: 4 breweries\n\
             \nBrewery Types by City in New York:\n\
             \nCity: Brooklyn\n  micro: 1\n  regional: 1\n  brewpub: 1\n\
             \nCity: Livingston\n  Unknown: 1\n\
             \nBreweries with Websites by State:\n\
             Alaska: 1 breweries with websites\n\
             Maine: 0 breweries with websites\n\
             New York: 2 breweries with websites\n"
        );
    }

    #[test]
    fn given_custom_states_when_write_report_then_only_those_states() {
        let dataset = breweries();
        let report = BreweryReport { dataset: &dataset };
        let options = BreweriesOptions {
            states: vec!["Maine".to_string(), "Unknown".to_string()],
            city_state: "Maine".to_string(),
        };

        let output = render(|out| report.write_report(&options, out));

        assert_eq!(
            output,
            "\nList of Breweries by State:\n\
             \nBreweries in Maine:\n\
             - Allagash Brewing\n\
             \nBreweries in Unknown:\n\
             \nCount of Breweries by State:\n\
             Maine: 1 breweries\n\
             Unknown: 0 breweries\n\
             \nBrewery Types by City in Maine:\n\
             \nCity: Portland\n  regional: 1\n\
             \nBreweries with Websites by State:\n\
             Maine: 0 breweries with websites\n\
             Unknown: 0 breweries with websites\n"
        );
    }

    #[test]
    fn given_unfetched_dataset_when_write_report_then_fetch_first_under_every_header() {
        let dataset = Dataset::new("mock");
        let report = BreweryReport { dataset: &dataset };

        let output = render(|out| report.write_report(&BreweriesOptions::default(), out));

        assert_eq!(
            output,
            format!(
                "\nList of Breweries by State:\n{NOT_FETCHED}\n\
                 \nCount of Breweries by State:\n{NOT_FETCHED}\n\
                 \nBrewery Types by City in New York:\n{NOT_FETCHED}\n\
                 \nBreweries with Websites by State:\n{NOT_FETCHED}\n"
            )
        );
    }
}
