use bson::{Bson, Document};
use common::models::*;
use futures::TryStreamExt;
use mongodb::Client;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// An error raised while loading the disaster table. Any of these aborts startup.

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("document store error: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("couldn't read data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("couldn't parse data file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("couldn't convert extended json: {0}")]
    ExtJson(#[from] bson::extjson::de::Error),

    #[error("entry {0} of the data file is not a document")]
    NotADocument(usize),

    #[error("expected column {0} not found in collection")]
    MissingColumn(String),
}

/// The flattened disaster table, loaded once and shared read-only.

#[derive(Debug, Default)]
pub struct Dataset {
    /// Every flattened column name, in the order it was first seen.
    pub columns: Vec<String>,
    pub records: Vec<DisasterRecord>,
}

impl Dataset {

    /// Flattens and types a batch of raw documents.
    ///
    /// Fails if the batch is non-empty and one of the columns the views rely on
    /// never appears in it. A single document missing a column just leaves the
    /// corresponding field empty.

    pub fn from_documents<I>(documents: I) -> Result<Dataset, LoadError>
        where I: IntoIterator<Item = Document>
    {
        let mut columns = vec![];
        let mut seen = HashSet::new();
        let mut records = vec![];

        for document in documents {
            let flat = flatten(&document);
            for (name, _) in &flat {
                if seen.insert(name.clone()) {
                    columns.push(name.clone());
                }
            }
            records.push(to_record(flat));
        }

        if !records.is_empty() {
            if let Some(missing) = required_columns().find(|c| !seen.contains(*c)) {
                return Err(LoadError::MissingColumn(missing.to_owned()));
            }
        }

        Ok(Dataset { columns, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn required_columns() -> impl Iterator<Item = &'static str> {
    [DISASTER_TYPE_COLUMN, START_YEAR_COLUMN, COUNTRY_COLUMN, ISO_COLUMN]
        .into_iter()
        .chain(ImpactMetric::ALL.iter().map(|m| m.column()))
}

/// Fetches every document in the given collection and flattens it.

pub async fn load_collection(uri: &str, database: &str, collection: &str) -> Result<Dataset, LoadError> {
    let client = Client::with_uri_str(uri).await?;
    let documents: Vec<Document> = client
        .database(database)
        .collection::<Document>(collection)
        .find(bson::doc! {})
        .await?
        .try_collect()
        .await?;

    log::debug!("fetched {} documents from {}.{}", documents.len(), database, collection);
    Dataset::from_documents(documents)
}

/// Reads a json export of the collection from disk and flattens it.

pub async fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let content = tokio::fs::read_to_string(path).await?;
    Dataset::from_documents(parse_export(&content)?)
}

/// Parses a json export, either a single top-level array or one document per
/// line. Extended json wrappers like `{"$oid": ...}` are unwrapped.

pub fn parse_export(content: &str) -> Result<Vec<Document>, LoadError> {
    let values: Vec<serde_json::Value> = if content.trim_start().starts_with('[') {
        serde_json::from_str(content)?
    } else {
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str)
            .collect::<Result<_, _>>()?
    };

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| match Bson::try_from(value)? {
            Bson::Document(document) => Ok(document),
            _ => Err(LoadError::NotADocument(i)),
        })
        .collect()
}

/// Flattens nested documents into dotted column names. Arrays and scalars are
/// leaves, and so are empty documents.

pub fn flatten(document: &Document) -> Vec<(String, Bson)> {
    let mut flat = vec![];
    flatten_into("", document, &mut flat);
    flat
}

fn flatten_into(prefix: &str, document: &Document, flat: &mut Vec<(String, Bson)>) {
    for (key, value) in document {
        let name = if prefix.is_empty() { key.clone() } else { format!("{}.{}", prefix, key) };
        match value {
            Bson::Document(inner) if !inner.is_empty() => flatten_into(&name, inner, flat),
            _ => flat.push((name, value.clone())),
        }
    }
}

fn to_record(flat: Vec<(String, Bson)>) -> DisasterRecord {
    let mut record = DisasterRecord::default();
    for (name, value) in flat {
        match name.as_str() {
            DISASTER_TYPE_COLUMN => record.disaster_type = coerce_text(&value),
            START_YEAR_COLUMN => record.start_year = coerce_year(&value),
            COUNTRY_COLUMN => record.country = coerce_text(&value),
            ISO_COLUMN => record.iso = coerce_text(&value),
            column => {
                if let Some(metric) = ImpactMetric::ALL.iter().find(|m| m.column() == column) {
                    record.impact[metric.index()] = coerce_number(&value);
                }
            }
        }
        record.columns.insert(name, display(&value));
    }
    record
}

/// Coerces a value to a number. Anything that isn't numeric or a numeric
/// string becomes `None`, as does NaN.

pub fn coerce_number(value: &Bson) -> Option<f64> {
    let number = match value {
        Bson::Double(v) => *v,
        Bson::Int32(v) => *v as f64,
        Bson::Int64(v) => *v as f64,
        Bson::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    Some(number).filter(|n: &f64| !n.is_nan())
}

/// Coerces a value to a year, which must be a whole number that fits in an `i32`.

pub fn coerce_year(value: &Bson) -> Option<i32> {
    let number = coerce_number(value)?;
    if number.fract() == 0.0 && number >= i32::MIN as f64 && number <= i32::MAX as f64 {
        Some(number as i32)
    } else {
        None
    }
}

/// Coerces a categorical value to text. Null and undefined become `None`.

pub fn coerce_text(value: &Bson) -> Option<String> {
    match value {
        Bson::Null | Bson::Undefined => None,
        Bson::Double(v) if v.is_nan() => None,
        _ => Some(display(value)),
    }
}

fn display(value: &Bson) -> String {
    match value {
        Bson::String(s) => s.clone(),
        Bson::Null | Bson::Undefined => String::new(),
        Bson::ObjectId(id) => id.to_hex(),
        Bson::Double(v) if v.is_nan() => String::new(),
        Bson::Double(v) => v.to_string(),
        Bson::DateTime(dt) => dt.try_to_rfc3339_string().unwrap_or_else(|_| dt.to_string()),
        other => other.to_string(),
    }
}
