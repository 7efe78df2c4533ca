//! CSV export of enriched results.
//!
//! Fixed column order; absent values are empty cells and unavailable
//! enrichment fields carry the `N/A` sentinel.

use crate::enrich::{Enrichment, Field, UNAVAILABLE};
use crate::place::PlaceRecord;
use std::io::{Read, Write};

pub const EXPORT_FILENAME: &str = "geofinder_results.csv";
pub const EXPORT_MIME: &str = "text/csv";

pub const HEADER: [&str; 7] = [
    "Name",
    "Distance (m)",
    "Address",
    "City",
    "Currency",
    "Local Time",
    "Capital",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("row {row} has {found} columns, expected {expected}")]
    Shape {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// One record as export cells, in header order.
pub fn row(record: &PlaceRecord) -> [String; 7] {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    let enriched = |pick: fn(&Enrichment) -> &Field| {
        record
            .enrichment
            .as_ref()
            .map(|e| pick(e).as_display().to_string())
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    };
    [
        record.name.clone(),
        record.distance_m.map(|d| d.to_string()).unwrap_or_default(),
        opt(&record.address),
        opt(&record.city),
        enriched(|e| &e.currency),
        enriched(|e| &e.local_time),
        enriched(|e| &e.capital),
    ]
}

pub fn write_csv<W: Write>(records: &[PlaceRecord], out: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record(row(record))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv_bytes(records: &[PlaceRecord]) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    Ok(buf)
}

/// Parse an export back into string rows, header excluded.
pub fn read_csv<R: Read>(input: R) -> Result<Vec<Vec<String>>, ExportError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() != HEADER.len() {
            return Err(ExportError::Shape {
                row: i + 1,
                found: record.len(),
                expected: HEADER.len(),
            });
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::Unavailable;

    fn record(name: &str, enrichment: Option<Enrichment>) -> PlaceRecord {
        PlaceRecord {
            name: name.into(),
            distance_m: Some(87.0),
            address: Some("Rua Augusta 1, 1100-048 Lisboa, Portugal".into()),
            city: Some("Lisbon".into()),
            country: Some("Portugal".into()),
            lat: 38.7,
            lon: -9.1,
            enrichment,
        }
    }

    #[test]
    fn test_header_and_row_order() {
        let r = record(
            "Café \"Central\"",
            Some(Enrichment {
                local_time: Field::Resolved("14:32 (02:32 PM)".into()),
                currency: Field::Resolved("Euro".into()),
                capital: Field::Unavailable(Unavailable::NoCapital),
            }),
        );
        let text = String::from_utf8(to_csv_bytes(&[r.clone()]).unwrap()).unwrap();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "Name,Distance (m),Address,City,Currency,Local Time,Capital");

        let rows = read_csv(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], row(&r).to_vec());
        assert_eq!(rows[0][0], "Café \"Central\"");
        assert_eq!(rows[0][1], "87");
        assert_eq!(rows[0][6], "N/A");
    }

    #[test]
    fn test_absent_values_are_empty_cells() {
        let mut r = record("Unnamed", None);
        r.distance_m = None;
        r.address = None;
        r.city = None;
        let cells = row(&r);
        assert_eq!(cells[1], "");
        assert_eq!(cells[2], "");
        assert_eq!(cells[3], "");
        assert_eq!(&cells[4..], &["N/A", "N/A", "N/A"]);
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let bytes = to_csv_bytes(&[]).unwrap();
        assert!(read_csv(bytes.as_slice()).unwrap().is_empty());
        assert_eq!(String::from_utf8(bytes).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_read_rejects_wrong_shape() {
        let text = "Name,Distance (m),Address,City,Currency,Local Time,Capital\na,b\n";
        assert!(matches!(
            read_csv(text.as_bytes()),
            Err(ExportError::Shape { row: 1, found: 2, expected: 7 })
        ));
    }
}
