use serde::{Deserialize, Serialize};

use super::ChartError;

/// A table cell as written in the deck: either a bare string or a value
/// with emphasis flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Plain(String),
    Rich {
        value: String,
        #[serde(default)]
        highlight: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        positive: Option<bool>,
    },
}

impl Cell {
    pub fn plain(value: &str) -> Self {
        Cell::Plain(value.to_string())
    }
}

/// Color tone of a cell's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub text: String,
    pub highlight: bool,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

pub fn data_table(
    headers: &[String],
    rows: &[Vec<Cell>],
    highlight_last: bool,
) -> Result<DataTable, ChartError> {
    if let Some((row, cells)) = rows
        .iter()
        .enumerate()
        .find(|(_, cells)| cells.len() != headers.len())
    {
        return Err(ChartError::RowWidth {
            row,
            expected: headers.len(),
            got: cells.len(),
        });
    }

    let last = rows.len().checked_sub(1);
    let rows = rows
        .iter()
        .enumerate()
        .map(|(ri, cells)| TableRow {
            cells: cells.iter().map(table_cell).collect(),
            highlighted: highlight_last && Some(ri) == last,
        })
        .collect();

    Ok(DataTable {
        headers: headers.to_vec(),
        rows,
    })
}

fn table_cell(cell: &Cell) -> TableCell {
    match cell {
        Cell::Plain(text) => TableCell {
            text: text.clone(),
            highlight: false,
            tone: Tone::Neutral,
        },
        Cell::Rich {
            value,
            highlight,
            positive,
        } => TableCell {
            text: value.clone(),
            highlight: *highlight,
            tone: match positive {
                Some(true) => Tone::Positive,
                Some(false) => Tone::Negative,
                None => Tone::Neutral,
            },
        },
    }
}
