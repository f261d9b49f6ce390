//! Record parsers for the co-appearance and campus datasets
//!
//! All three formats are comma separated with optional double quotes
//! around a field. A quoted field may contain commas, and `""` inside
//! quotes stands for one literal quote.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DataError, Result};

/// Characters and the books they appear in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoAppearances {
    /// Every distinct character.
    pub characters: HashSet<String>,
    /// Book → characters in first-appearance order, without repeats.
    pub books: HashMap<String, Vec<String>>,
}

/// One row of the campus buildings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    pub short_name: String,
    pub long_name: String,
    pub x: f64,
    pub y: f64,
}

/// One row of the campus paths file.
///
/// `distance` is `None` when the row leaves it out; the campus map then
/// uses the straight-line length of the segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub distance: Option<f64>,
}

/// Parse `character,book` lines.
pub fn parse_co_appearances<R: BufRead>(reader: R) -> Result<CoAppearances> {
    let mut data = CoAppearances::default();

    for (line_no, fields) in records(reader) {
        let fields = fields?;
        let [character, book] = fields.as_slice() else {
            return Err(malformed(line_no, format!("expected 2 fields, found {}", fields.len())));
        };

        data.characters.insert(character.clone());
        let cast = data.books.entry(book.clone()).or_default();
        if !cast.contains(character) {
            cast.push(character.clone());
        }
    }

    debug!(
        "Parsed {} characters across {} books",
        data.characters.len(),
        data.books.len()
    );
    Ok(data)
}

/// Parse `shortName,longName,x,y` rows. A leading header row is skipped.
pub fn parse_buildings<R: BufRead>(reader: R) -> Result<Vec<BuildingRecord>> {
    let mut buildings = Vec::new();

    for (line_no, fields) in records(reader) {
        let fields = fields?;
        if line_no == 1 && is_header(&fields, "shortname") {
            continue;
        }
        let [short_name, long_name, x, y] = fields.as_slice() else {
            return Err(malformed(line_no, format!("expected 4 fields, found {}", fields.len())));
        };
        buildings.push(BuildingRecord {
            short_name: short_name.clone(),
            long_name: long_name.clone(),
            x: number(line_no, "x", x)?,
            y: number(line_no, "y", y)?,
        });
    }

    Ok(buildings)
}

/// Parse `x1,y1,x2,y2[,distance]` rows. A leading header row is skipped.
pub fn parse_paths<R: BufRead>(reader: R) -> Result<Vec<PathRecord>> {
    let mut paths = Vec::new();

    for (line_no, fields) in records(reader) {
        let fields = fields?;
        if line_no == 1 && is_header(&fields, "x1") {
            continue;
        }
        let (coords, distance) = match fields.as_slice() {
            [x1, y1, x2, y2] => ([x1, y1, x2, y2], None),
            [x1, y1, x2, y2, d] => ([x1, y1, x2, y2], Some(number(line_no, "distance", d)?)),
            _ => {
                return Err(malformed(
                    line_no,
                    format!("expected 4 or 5 fields, found {}", fields.len()),
                ))
            }
        };
        let [x1, y1, x2, y2] = coords;
        paths.push(PathRecord {
            x1: number(line_no, "x1", x1)?,
            y1: number(line_no, "y1", y1)?,
            x2: number(line_no, "x2", x2)?,
            y2: number(line_no, "y2", y2)?,
            distance,
        });
    }

    Ok(paths)
}

pub fn load_co_appearances(path: &Path) -> Result<CoAppearances> {
    info!("Loading co-appearance records from {}", path.display());
    parse_co_appearances(open(path)?)
}

pub fn load_buildings(path: &Path) -> Result<Vec<BuildingRecord>> {
    info!("Loading buildings from {}", path.display());
    parse_buildings(open(path)?)
}

pub fn load_paths(path: &Path) -> Result<Vec<PathRecord>> {
    info!("Loading campus paths from {}", path.display());
    parse_paths(open(path)?)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Non-blank lines split into fields, tagged with their 1-based line number.
fn records<R: BufRead>(reader: R) -> impl Iterator<Item = (usize, Result<Vec<String>>)> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !matches!(line, Ok(text) if text.trim().is_empty()))
        .map(|(line_no, line)| {
            let fields = line
                .map_err(DataError::from)
                .and_then(|text| split_fields(&text).map_err(|reason| malformed(line_no, reason)));
            (line_no, fields)
        })
}

/// Split one line on commas, honouring double quotes.
pub fn split_fields(line: &str) -> std::result::Result<Vec<String>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            ('"', true) => in_quotes = false,
            ('"', false) if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            (',', false) => fields.push(std::mem::take(&mut field).trim().to_string()),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field.trim().to_string());
    Ok(fields)
}

fn is_header(fields: &[String], first: &str) -> bool {
    fields
        .first()
        .is_some_and(|f| f.eq_ignore_ascii_case(first))
}

fn number(line: usize, column: &str, raw: &str) -> Result<f64> {
    raw.parse()
        .map_err(|_| malformed(line, format!("{} is not a number: {:?}", column, raw)))
}

fn malformed(line: usize, reason: String) -> DataError {
    DataError::Malformed { line, reason }
}
