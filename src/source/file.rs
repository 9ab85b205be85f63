use async_trait::async_trait;
use csv::{ReaderBuilder, Trim, Writer};
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{Dataset, FeedbackRow, FeedbackTable, FieldValue};
use crate::source::provider::TableSource;

const DERIVED_COLUMNS: [&str; 4] = ["sentiment", "sentiment_label", "polarity", "subjectivity"];

pub struct CsvFileSource {
    path: PathBuf,
    name: String,
}

impl CsvFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }
}

#[async_trait]
impl TableSource for CsvFileSource {
    async fn load(&self) -> Result<FeedbackTable> {
        let bytes = tokio::fs::read(&self.path).await?;
        let table = read_table(bytes.as_slice())?;
        tracing::info!(
            "Loaded {} rows from {}. Columns: {:?}",
            table.len(),
            self.name,
            table.columns()
        );
        Ok(table)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Parses CSV with a header row. Short records simply lack the trailing columns.
/// Cell types are inferred per column, and repeated header names get a `.1`, `.2`
/// suffix so no cell is shadowed.
pub fn read_table<R: Read>(reader: R) -> Result<FeedbackTable> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let columns = dedupe_headers(reader.headers()?.iter().map(String::from).collect());
    let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

    let mut rows = vec![FeedbackRow::new(); records.len()];
    for (index, column) in columns.iter().enumerate() {
        let present: Vec<usize> = (0..records.len())
            .filter(|&r| records[r].get(index).is_some())
            .collect();
        let values = FieldValue::infer_column(
            present.iter().filter_map(|&r| records[r].get(index)),
        );
        for (r, value) in present.into_iter().zip(values) {
            rows[r].insert(column.as_str(), value);
        }
    }

    Ok(FeedbackTable::new(columns, rows))
}

fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = headers.iter().cloned().collect();
    let mut columns = Vec::with_capacity(headers.len());

    for header in headers {
        let count = seen.entry(header.clone()).or_insert(0);
        if *count == 0 {
            *count = 1;
            columns.push(header);
            continue;
        }

        let mut renamed = format!("{}.{}", header, count);
        while taken.contains(&renamed) {
            *count += 1;
            renamed = format!("{}.{}", header, count);
        }
        *count += 1;
        tracing::warn!("Duplicate column '{}' renamed to '{}'", header, renamed);
        taken.insert(renamed.clone());
        columns.push(renamed);
    }

    columns
}

/// Writes the analyzed rows: original columns first, then the four derived ones.
pub fn write_analyzed_csv<P: AsRef<Path>>(path: P, dataset: &Dataset) -> Result<()> {
    let mut writer = Writer::from_path(&path)?;

    let originals: Vec<&String> = dataset
        .columns
        .iter()
        .filter(|c| !DERIVED_COLUMNS.contains(&c.as_str()))
        .collect();

    let mut header: Vec<&str> = originals.iter().map(|c| c.as_str()).collect();
    header.extend(DERIVED_COLUMNS);
    writer.write_record(&header)?;

    for row in &dataset.rows {
        let mut record: Vec<String> = originals
            .iter()
            .map(|c| row.row.text(c).unwrap_or_default())
            .collect();
        record.push(row.sentiment.to_string());
        record.push(row.sentiment_label.to_string());
        record.push(FieldValue::Float(row.polarity).to_string());
        record.push(FieldValue::Float(row.subjectivity).to_string());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    tracing::info!("Analyzed rows written to: {}", path.as_ref().display());
    Ok(())
}
