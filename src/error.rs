use std::path::PathBuf;

use crate::location::Location;

/// Reasons a snapshot can fail to become a [`Board`](crate::Board).
///
/// Every variant is fatal to the decision cycle that supplied the snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// Width or height was zero.
    #[error("board dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    /// Width times height does not fit in memory.
    #[error("board dimensions {width}x{height} are too large")]
    TooLarge { width: usize, height: usize },

    /// A row does not have the width the snapshot declared.
    #[error("row {row} has {found} cells, expected {expected}")]
    JaggedRow { row: usize, expected: usize, found: usize },

    /// The number of rows does not match the declared height.
    #[error("snapshot has {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },

    /// A feature was placed outside the bounds declared for the board.
    #[error("{0} is outside the board")]
    FeatureOutOfBounds(Location),

    /// Two features were placed on the same cell.
    #[error("{0} already holds a token or is disabled")]
    CellTaken(Location),

    /// A cell code is neither a legend character nor a valid color code.
    #[error("invalid cell code {code:?} at {location}")]
    BadCellCode { location: Location, code: String },

    /// The snapshot declares a format version this crate does not understand.
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    /// The snapshot could not be decoded at all.
    #[error("malformed snapshot: {0}")]
    Malformed(String),
}

/// Programming errors in how a [`Board`](crate::Board) is queried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The location is not on the board.
    #[error("{0} is outside the board")]
    OutOfBounds(Location),

    /// The location is disabled and cannot hold a token.
    #[error("{0} is disabled")]
    Disabled(Location),

    /// A search was started from a location that holds no token.
    #[error("{0} holds no token")]
    NoToken(Location),

    /// A passability mask does not match the board it is used with.
    #[error("mask is {mask_width}x{mask_height} but board is {board_width}x{board_height}")]
    MaskMismatch {
        mask_width: usize,
        mask_height: usize,
        board_width: usize,
        board_height: usize,
    },
}

/// Failures parsing an external decision service's reply.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The reply was empty or whitespace.
    #[error("reply is empty")]
    Empty,

    /// The reply is not a coordinate pair.
    #[error("expected `x,y` or `(x,y)`, got {0:?}")]
    NotACoordinate(String),

    /// A coordinate is not a non-negative integer.
    #[error("invalid coordinate {0:?}")]
    BadNumber(String),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`AgentConfig`](crate::AgentConfig).
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that end one decision cycle.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    /// Ranking failed.
    #[error("query error: {0}")]
    Query(#[from] QueryError),

    /// Every reply from the advisor was rejected and falling back was disabled.
    #[error("advisor reply rejected after {attempts} attempt(s): {reason}")]
    RejectedReply { attempts: usize, reason: String },

    /// A policy returned an index outside the ranking it was given.
    #[error("policy chose index {0}, which is not in the ranking")]
    InvalidChoice(usize),

    /// The advisor itself failed.
    #[error("advisor failed: {0}")]
    Advisor(String),
}
