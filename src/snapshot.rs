use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::builder::SnapshotBuilder;
use crate::cell::{Cell, Color, DISABLED_DISPLAY, EMPTY_DISPLAY};
use crate::error::SnapshotError;
use crate::location::Location;

/// The snapshot format version this crate reads and writes.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Version 1 of the snapshot the hosting application hands over each decision.
///
/// `rows` is row-major with row 0 (the extraction row) first. Each cell is `null` when empty, `"X"` when
/// disabled, or a one-character color code:
///
/// ```json
/// { "version": 1, "width": 3, "height": 2, "rows": [["R", null, "X"], [null, "B", null]] }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SnapshotV1 {
    /// Must equal [`SNAPSHOT_VERSION`].
    pub version: u32,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Cell codes, one inner list per row.
    pub rows: Vec<Vec<Option<String>>>,
}

impl SnapshotV1 {
    /// Decode a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Malformed(e.to_string()))
    }

    /// Encode `board` as a snapshot.
    pub fn from_board(board: &Board) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            width: board.width(),
            height: board.height(),
            rows: board.cells.rows()
                .into_iter()
                .map(|row| row.iter().map(|cell| match cell {
                    Cell::Empty => None,
                    other => Some(other.to_string()),
                }).collect())
                .collect(),
        }
    }
}

impl TryFrom<SnapshotV1> for Board {
    type Error = SnapshotError;

    fn try_from(snapshot: SnapshotV1) -> Result<Self, Self::Error> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }
        if snapshot.rows.len() != snapshot.height {
            return Err(SnapshotError::RowCount { expected: snapshot.height, found: snapshot.rows.len() });
        }

        // the declared width is only trusted once every row agrees with it
        if let Some((y, row)) = snapshot.rows.iter().enumerate().find(|(_, row)| row.len() != snapshot.width) {
            return Err(SnapshotError::JaggedRow { row: y, expected: snapshot.width, found: row.len() });
        }

        let mut builder = SnapshotBuilder::with_dims(snapshot.width, snapshot.height);
        for (y, row) in snapshot.rows.iter().enumerate() {
            for (x, code) in row.iter().enumerate() {
                let location = Location(x, y);
                let Some(code) = code else { continue };
                let mut chars = code.chars();
                match (chars.next(), chars.next()) {
                    (Some(EMPTY_DISPLAY), None) => {}
                    (Some(DISABLED_DISPLAY), None) => { builder.disable(location); }
                    (Some(c), None) => match Color::new(c) {
                        Some(color) => { builder.add_token(color, location); }
                        None => return Err(SnapshotError::BadCellCode { location, code: code.clone() }),
                    },
                    _ => return Err(SnapshotError::BadCellCode { location, code: code.clone() }),
                }
            }
        }

        builder.build()
    }
}
