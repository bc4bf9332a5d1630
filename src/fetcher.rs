use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::Error;
use crate::model::{records_from_value, Record};

#[async_trait]
pub trait RecordLoader {
    async fn load(&self, url: &str) -> Result<Vec<Record>, Error>;
}

pub struct HttpRecordLoader {
    pub client: Client,
}

impl HttpRecordLoader {
    pub fn new() -> HttpRecordLoader {
        HttpRecordLoader { client: Client::new() }
    }

    pub fn with_timeout(timeout: Duration) -> Result<HttpRecordLoader, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpRecordLoader { client })
    }
}

impl Default for HttpRecordLoader {
    fn default() -> Self {
        HttpRecordLoader::new()
    }
}

#[async_trait]
impl RecordLoader for HttpRecordLoader {
    async fn load(&self, url: &str) -> Result<Vec<Record>, Error> {
        debug!(url, "requesting records");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            let response_body = response.text().await?;
            let records = records_from_value(serde_json::from_str(&response_body)?)?;
            debug!(url, count = records.len(), "received records");
            Ok(records)
        } else {
            Err(Error::Status(format!(
                "{status} for url: {url}. Body: {body}",
                body = response.text().await.unwrap_or_default()
            )))
        }
    }
}

/// Records of one API endpoint, fetched at most once and then queried.
#[derive(Debug)]
pub struct Dataset {
    url: String,
    data: Option<Vec<Record>>,
}

impl Dataset {
    pub fn new(url: impl Into<String>) -> Dataset {
        Dataset { url: url.into(), data: None }
    }

    pub fn with_records(url: impl Into<String>, records: Vec<Record>) -> Dataset {
        Dataset { url: url.into(), data: Some(records) }
    }

    /// Loads the records. A failure is written to `out` and leaves the dataset
    /// unfetched. Returns whether there is data to report on afterwards.
    pub async fn fetch_data<L, W>(&mut self, loader: &L, out: &mut W) -> io::Result<bool>
    where
        L: RecordLoader + ?Sized,
        W: Write,
    {
        let loaded = loader.load(&self.url).await;
        self.store(loaded, out)
    }

    /// Same as [`Dataset::fetch_data`] but reads the JSON array from a local file.
    pub fn load_file<W: Write>(&mut self, path: &Path, out: &mut W) -> io::Result<bool> {
        let loaded = fs::read_to_string(path)
            .map_err(Error::from)
            .and_then(|body| records_from_value(serde_json::from_str(&body)?));
        self.store(loaded, out)
    }

    fn store<W: Write>(&mut self, loaded: Result<Vec<Record>, Error>, out: &mut W) -> io::Result<bool> {
        match loaded {
            Ok(records) => self.data = Some(records),
            Err(e) => writeln!(out, "An error occurred while fetching data: {e}")?,
        }
        Ok(self.records().is_some())
    }

    /// `None` until a fetch succeeded with at least one record.
    pub fn records(&self) -> Option<&[Record]> {
        self.data.as_deref().filter(|records| !records.is_empty())
    }
}
