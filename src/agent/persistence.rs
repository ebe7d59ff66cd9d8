//! Value-table persistence.
//!
//! Tables are saved as CSV: one header row naming the state column and
//! the four category columns, then one row per observed state. Row order
//! is insignificant. Loading tolerates a missing file (an empty table —
//! an agent that has never trained) and skips malformed rows rather than
//! failing the whole load.

use std::path::Path;

use crate::agent::qtable::{QRow, QTable};
use crate::error::TableError;
use crate::rules::actions::ActionCategory;

const STATE_COLUMN: &str = "state";

/// Write a table to `path`, creating parent directories as needed.
pub fn save_table(table: &QTable, path: &Path) -> Result<(), TableError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| TableError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    let mut writer = csv::Writer::from_path(path).map_err(|source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let mut header = vec![STATE_COLUMN];
    header.extend(ActionCategory::ALL.iter().map(|c| c.name()));
    write_record(&mut writer, path, &header)?;

    for (state_key, row) in table.iter() {
        let values = row.values().map(|v| v.to_string());
        let mut record = vec![state_key];
        record.extend(values.iter().map(String::as_str));
        write_record(&mut writer, path, &record)?;
    }

    writer.flush().map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_record(
    writer: &mut csv::Writer<std::fs::File>,
    path: &Path,
    record: &[&str],
) -> Result<(), TableError> {
    writer.write_record(record).map_err(|source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a table from `path`.
///
/// A nonexistent file yields an empty table. A row missing a column or
/// holding an unparseable value is skipped; the rest of the file still
/// loads.
pub fn load_table(path: &Path) -> Result<QTable, TableError> {
    if !path.exists() {
        return Ok(QTable::new());
    }

    let mut reader = csv::Reader::from_path(path).map_err(|source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let headers = reader.headers().map_err(|source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    let column_of = |name: &str| headers.iter().position(|h| h == name);

    let state_column = column_of(STATE_COLUMN);
    let category_columns: Vec<Option<usize>> = ActionCategory::ALL
        .iter()
        .map(|c| column_of(c.name()))
        .collect();

    // Without the expected header every row is malformed, so the load
    // degenerates to an empty table.
    let (Some(state_column), true) = (state_column, category_columns.iter().all(Option::is_some))
    else {
        return Ok(QTable::new());
    };

    let mut table = QTable::new();
    for record in reader.records() {
        let Ok(record) = record else {
            continue;
        };
        let Some(state_key) = record.get(state_column) else {
            continue;
        };

        let mut values = [0.0_f64; 4];
        let mut malformed = false;
        for (category, column) in ActionCategory::ALL.iter().zip(&category_columns) {
            let parsed = column
                .and_then(|i| record.get(i))
                .and_then(|field| field.parse::<f64>().ok());
            match parsed {
                Some(value) => values[category.index()] = value,
                None => {
                    malformed = true;
                    break;
                }
            }
        }
        if malformed {
            continue;
        }

        table.insert(state_key.to_owned(), QRow::from_values(values));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let table = load_table(&dir.path().join("nope.csv")).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_round_trip_is_bit_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");

        let mut table = QTable::new();
        table.insert(
            "state-a".into(),
            QRow::from_values([0.1, -1.0, 20.0, std::f64::consts::PI]),
        );
        table.insert("state-b".into(), QRow::from_values([0.0, 0.3 + 0.4, -0.1, 1e-17]));

        save_table(&table, &path).unwrap();
        let loaded = load_table(&path).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        std::fs::write(
            &path,
            "state,reveal,move,capture,skip\n\
             good,1,2,3,4\n\
             bad-value,1,oops,3,4\n\
             also-good,0.5,0,0,-1\n",
        )
        .unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.row("good").is_some());
        assert!(table.row("also-good").is_some());
        assert!(table.row("bad-value").is_none());
    }

    #[test]
    fn test_unrecognized_header_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        std::fs::write(&path, "state,flip,move,capture,skip\ns,1,2,3,4\n").unwrap();

        let table = load_table(&path).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_column_order_in_file_is_insignificant() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        std::fs::write(
            &path,
            "skip,capture,move,reveal,state\n4,3,2,1,s\n",
        )
        .unwrap();

        let table = load_table(&path).unwrap();
        let row = table.row("s").unwrap();
        assert_eq!(row.get(ActionCategory::Reveal), 1.0);
        assert_eq!(row.get(ActionCategory::Move), 2.0);
        assert_eq!(row.get(ActionCategory::Capture), 3.0);
        assert_eq!(row.get(ActionCategory::Skip), 4.0);
    }
}
