//! Reading joint tables and writing trajectory tables.
//!
//! The input format is a plain-text reference configuration: one
//! tab-delimited `x`, `y` row per joint, `#` comment lines allowed. The
//! output format is the matching trajectory table: a `#` header line naming
//! each `name(x,y)` column pair, then one tab-delimited row per sample,
//! readable back by spreadsheet tools and [`parse_joints`] alike.
pub use csv::Error;
use crate::geom::Coord;
use crate::mech::{FourBar, GearedFiveBar, Klann, Table};
use csv::{ReaderBuilder, WriterBuilder};
use std::io::Cursor;

/// Error of the joint-table readers.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Malformed table text
    #[error(transparent)]
    Csv(#[from] Error),
    /// Wrong number of joint rows for the topology
    #[error("expected {expected} joint rows, got {got}")]
    RowCount {
        /// Rows the topology needs
        expected: usize,
        /// Rows found in the table
        got: usize,
    },
}

/// Parse a joint table into coordinates.
pub fn parse_joints(s: &str) -> Result<Vec<Coord>, Error> {
    ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(Cursor::new(s))
        .deserialize()
        .collect()
}

fn fixed_rows<const N: usize>(s: &str) -> Result<[Coord; N], TableError> {
    let rows = parse_joints(s)?;
    let got = rows.len();
    <[Coord; N]>::try_from(rows).map_err(|_| TableError::RowCount { expected: N, got })
}

/// Read a four-bar reference configuration.
///
/// Rows: `joint12`, `joint23`, `joint34`, `joint14`, then the coupler
/// point.
pub fn read_four_bar(s: &str) -> Result<FourBar, TableError> {
    let [joint12, joint23, joint34, joint14, coupler] = fixed_rows(s)?;
    Ok(FourBar { joint12, joint23, joint34, joint14, coupler })
}

/// Read a geared five-bar reference configuration.
///
/// Rows: `joint12`, `joint23`, `joint34`, `joint45`, `joint15`, then the
/// coupler point. The gear ratio is not part of the joint table.
pub fn read_five_bar(s: &str, ratio: f64) -> Result<GearedFiveBar, TableError> {
    let [joint12, joint23, joint34, joint45, joint15, coupler] = fixed_rows(s)?;
    Ok(GearedFiveBar { joint12, joint23, joint34, joint45, joint15, coupler, ratio })
}

/// Read a Klann-type six-bar reference configuration.
///
/// Rows: the fixed points `joint12`, `joint14`, `joint15`, then the moving
/// pose `joint23`, `joint34`, `joint36`, `joint56`, `foot`.
pub fn read_klann(s: &str) -> Result<Klann, TableError> {
    let [joint12, joint14, joint15, joint23, joint34, joint36, joint56, foot] = fixed_rows(s)?;
    Ok(Klann { joint12, joint14, joint15, joint23, joint34, joint36, joint56, foot })
}

/// Dump a solved trajectory table to tab-delimited text.
pub fn dump_table(table: &Table) -> Result<String, Box<dyn std::error::Error>> {
    let n = table.iter().map(|(_, c)| c.len()).min().unwrap_or(0);
    let mut w = WriterBuilder::new().delimiter(b'\t').from_writer(Vec::new());
    for i in 0..n {
        let row = table
            .iter()
            .flat_map(|(_, c)| c[i])
            .map(|v| format!("{v:4.2}"))
            .collect::<Vec<_>>();
        w.write_record(&row)?;
    }
    let header = table
        .iter()
        .map(|(name, _)| format!("{name}(x,y)"))
        .collect::<Vec<_>>()
        .join(",\t");
    Ok(format!("# {header}\n{}", String::from_utf8(w.into_inner()?)?))
}
