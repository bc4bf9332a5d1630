pub mod breweries;
pub mod countries;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod progress;
pub mod report;
