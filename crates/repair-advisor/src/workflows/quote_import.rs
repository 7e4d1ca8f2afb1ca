use crate::workflows::legitimacy::QuoteLineRequest;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum QuoteImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidPrice { line: u64, raw: String },
    MissingService { line: u64 },
}

impl std::fmt::Display for QuoteImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteImportError::Io(err) => write!(f, "failed to read quote export: {}", err),
            QuoteImportError::Csv(err) => write!(f, "invalid quote CSV data: {}", err),
            QuoteImportError::InvalidPrice { line, raw } => {
                write!(f, "line {}: price {:?} is not a non-negative amount", line, raw)
            }
            QuoteImportError::MissingService { line } => {
                write!(f, "line {}: service description is empty", line)
            }
        }
    }
}

impl std::error::Error for QuoteImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuoteImportError::Io(err) => Some(err),
            QuoteImportError::Csv(err) => Some(err),
            QuoteImportError::InvalidPrice { .. } | QuoteImportError::MissingService { .. } => {
                None
            }
        }
    }
}

impl From<std::io::Error> for QuoteImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for QuoteImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct QuoteRow {
    #[serde(rename = "Service")]
    service: String,
    #[serde(rename = "Price", default, deserialize_with = "empty_string_as_none")]
    price: Option<String>,
    #[serde(rename = "Symptoms", default, deserialize_with = "empty_string_as_none")]
    symptoms: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts `89.99`, `$89.99`, and `1,250.00`.
fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|ch| *ch != ',')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

fn split_symptoms(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|symptom| !symptom.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads shop quote exports with `Service`, `Price`, and `Symptoms` columns.
pub struct QuoteImporter;

impl QuoteImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<QuoteLineRequest>, QuoteImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<QuoteLineRequest>, QuoteImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut lines = Vec::new();
        for (index, row) in csv_reader.deserialize::<QuoteRow>().enumerate() {
            let row = row?;
            // Header is line 1.
            let line = index as u64 + 2;

            let service = row.service.split_whitespace().collect::<Vec<_>>().join(" ");
            if service.is_empty() {
                return Err(QuoteImportError::MissingService { line });
            }

            let quoted_price = match row.price.as_deref() {
                Some(raw) => Some(parse_price(raw).ok_or_else(|| {
                    QuoteImportError::InvalidPrice {
                        line,
                        raw: raw.to_string(),
                    }
                })?),
                None => None,
            };

            lines.push(QuoteLineRequest {
                service_description: service,
                quoted_price,
                symptoms: row.symptoms.as_deref().map(split_symptoms).unwrap_or_default(),
            });
        }

        Ok(lines)
    }
}
