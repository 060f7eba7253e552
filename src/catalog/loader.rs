//! Reference CSV loading
//!
//! Both reference lists come from third parties and carry noise: short rows,
//! odd widths, the occasional undecodable line. Rows that do not fit are
//! skipped; they never abort the load. A failing read does.

use crate::catalog::types::{LanguageRecord, Languoid};
use crate::CatalogError;
use csv::{ReaderBuilder, StringRecord};
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

/// Column holding the ISO code in the languoid list
pub const LANGUOID_ISO_COLUMN: usize = 9;

/// Languoid lookup tables
#[derive(Debug, Clone, Default)]
pub struct LanguoidTables {
    /// Every row, keyed by languoid id
    pub by_languoid_id: HashMap<String, Languoid>,

    /// Rows carrying an ISO code, keyed by that code
    pub by_iso_code: HashMap<String, Languoid>,
}

/// Loads the ISO language list from a file
pub fn load_languages(path: &Path) -> Result<BTreeMap<String, LanguageRecord>, CatalogError> {
    let file = open(path)?;
    let languages = read_languages(file).map_err(read_error(path))?;
    tracing::info!(
        "Loaded {} languages from {}",
        languages.len(),
        path.display()
    );
    Ok(languages)
}

/// Reads the ISO language list, keyed by language code
pub fn read_languages<R: Read>(
    reader: R,
) -> Result<BTreeMap<String, LanguageRecord>, csv::Error> {
    let mut languages = BTreeMap::new();

    for row in rows(reader)? {
        if let Some(record) = parse_language_row(&row) {
            languages.insert(record.code.clone(), record);
        }
    }

    Ok(languages)
}

/// Parses one row of the ISO language list
///
/// Two layouts are recognised: the current 10-column one with coordinates in
/// columns 8 and 9, and the legacy 8-column one with coordinates in columns
/// 4 and 6. Any other width yields no record.
pub fn parse_language_row(row: &StringRecord) -> Option<LanguageRecord> {
    let (lat, lon) = match row.len() {
        10 => (8, 9),
        8 => (4, 6),
        _ => return None,
    };

    Some(LanguageRecord::new(
        &row[0],
        &row[2],
        [row[lat].to_string(), row[lon].to_string()],
    ))
}

/// Loads the languoid classification list from a file
pub fn load_languoids(path: &Path) -> Result<LanguoidTables, CatalogError> {
    let file = open(path)?;
    let tables = read_languoids(file).map_err(read_error(path))?;
    tracing::info!(
        "Loaded {} languoids ({} with ISO codes) from {}",
        tables.by_languoid_id.len(),
        tables.by_iso_code.len(),
        path.display()
    );
    Ok(tables)
}

/// Reads the languoid classification list into its lookup tables
pub fn read_languoids<R: Read>(reader: R) -> Result<LanguoidTables, csv::Error> {
    let mut tables = LanguoidTables::default();

    for row in rows(reader)? {
        let languoid = parse_languoid_row(&row);

        if let Some(iso_code) = &languoid.iso_code {
            tables.by_iso_code.insert(iso_code.clone(), languoid.clone());
        }
        tables
            .by_languoid_id
            .insert(languoid.id.clone(), languoid);
    }

    Ok(tables)
}

/// Parses one row of the languoid list
///
/// Missing columns read as empty strings; the ISO code is only set when
/// column 9 exists and is non-empty.
pub fn parse_languoid_row(row: &StringRecord) -> Languoid {
    let column = |index: usize| row.get(index).unwrap_or_default().to_string();

    Languoid {
        id: column(0),
        family_id: column(1),
        parent_id: column(2),
        level: column(5),
        status: column(6),
        iso_code: row
            .get(LANGUOID_ISO_COLUMN)
            .filter(|code| !code.is_empty())
            .map(str::to_string),
    }
}

fn open(path: &Path) -> Result<std::fs::File, CatalogError> {
    std::fs::File::open(path).map_err(|e| CatalogError::Open {
        path: path.display().to_string(),
        source: csv::Error::from(e),
    })
}

fn read_error(path: &Path) -> impl FnOnce(csv::Error) -> CatalogError + '_ {
    move |source| CatalogError::Read {
        path: path.display().to_string(),
        source,
    }
}

/// Collects the decodable rows of a headerless CSV source
///
/// Malformed and undecodable rows are skipped; an I/O failure is returned.
fn rows<R: Read>(reader: R) -> Result<Vec<StringRecord>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => records.push(record),
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e),
            Err(e) => tracing::debug!("Skipping malformed reference row: {}", e),
        }
    }

    Ok(records)
}
