//! Grouping and counting over fetched records.
//!
//! Group keys requested by the caller come back in request order with duplicates
//! collapsed, keys discovered in the data come back in first-seen order.

use std::io::{self, Write};

use crate::fetcher::Dataset;
use crate::model::{text_field, Record};

pub const NOT_FETCHED: &str = "Data not fetched. Please call fetch_data() first.";

/// Runs `report` on the fetched records, or prints [`NOT_FETCHED`] when there are none.
pub fn with_records<W, F>(dataset: &Dataset, out: &mut W, report: F) -> io::Result<()>
where
    W: Write,
    F: FnOnce(&[Record], &mut W) -> io::Result<()>,
{
    match dataset.records() {
        Some(records) => report(records, out),
        None => writeln!(out, "{NOT_FETCHED}"),
    }
}

fn unique_keys(keys: &[&str]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(keys.len());
    for key in keys {
        if !unique.iter().any(|k| k.as_str() == *key) {
            unique.push(key.to_string());
        }
    }
    unique
}

/// Names (read from `name_field`) of the records whose `field` equals each of `keys`.
pub fn group_names_by(
    records: &[Record],
    field: &str,
    keys: &[&str],
    name_field: &str,
) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> =
        unique_keys(keys).into_iter().map(|key| (key, Vec::new())).collect();

    for record in records {
        let value = text_field(record, field);
        if let Some((_, names)) = groups.iter_mut().find(|(key, _)| *key == value) {
            names.push(text_field(record, name_field).into_owned());
        }
    }
    groups
}

pub fn count_by(records: &[Record], field: &str, keys: &[&str]) -> Vec<(String, usize)> {
    count_by_where(records, field, keys, |_| true)
}

/// Like [`count_by`], only counting records accepted by `predicate`.
pub fn count_by_where<P>(
    records: &[Record],
    field: &str,
    keys: &[&str],
    predicate: P,
) -> Vec<(String, usize)>
where
    P: Fn(&Record) -> bool,
{
    let mut counts: Vec<(String, usize)> =
        unique_keys(keys).into_iter().map(|key| (key, 0)).collect();

    for record in records.iter().filter(|record| predicate(record)) {
        let value = text_field(record, field);
        if let Some((_, count)) = counts.iter_mut().find(|(key, _)| *key == value) {
            *count += 1;
        }
    }
    counts
}

/// Two level tally of the records whose `filter.0` equals `filter.1`: by `outer`,
/// then by `inner`.
pub fn count_nested(
    records: &[Record],
    filter: (&str, &str),
    outer: &str,
    inner: &str,
) -> Vec<(String, Vec<(String, usize)>)> {
    let (filter_field, filter_value) = filter;
    let mut tally: Vec<(String, Vec<(String, usize)>)> = Vec::new();

    for record in records.iter().filter(|record| text_field(record, filter_field) == filter_value) {
        let outer_value = text_field(record, outer);
        let inner_value = text_field(record, inner);

        let existing = tally.iter().position(|(key, _)| *key == outer_value);
        let leaves = match existing {
            Some(index) => &mut tally[index].1,
            None => {
                tally.push((outer_value.into_owned(), Vec::new()));
                let last = tally.len() - 1;
                &mut tally[last].1
            }
        };
        match leaves.iter_mut().find(|(key, _)| *key == inner_value) {
            Some((_, count)) => *count += 1,
            None => leaves.push((inner_value.into_owned(), 1)),
        }
    }
    tally
}
