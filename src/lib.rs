#![warn(missing_docs)]

//! # `unjam`
//!
//! Move planning for grid-based color extraction puzzles: a board of colored tokens, a few disabled cells, and an
//! extraction row (row 0) that tokens leave the board through. Each turn the game asks for a token of one color;
//! a token can only leave if it has an orthogonal path of free cells to the extraction row.
//!
//! Build a [`Board`] from the hosting application's state with a [`SnapshotBuilder`], [`Board::from_rows`] or a
//! versioned [`SnapshotV1`], then call [`rank()`] with the requested color. Every token of that color is priced by
//! the number of moves needed to free and extract it, cheapest first. [`decide()`] wraps this into one decision
//! cycle, letting a [`Policy`] (optionally backed by an external [`Advisor`]) pick the move.
//!
//! ```
//! use unjam::{rank, Board, Color, Location};
//!
//! let board: Board = "BB.\nRB.".parse().unwrap();
//! let ranking = rank(&board, Color::new('R').unwrap()).unwrap();
//! assert_eq!(ranking[0].source, Location(0, 1));
//! assert_eq!(ranking[0].blockers, vec![Location(0, 0)]);
//! assert_eq!(ranking[0].cost.get(), 2);
//! ```
//!
//! # Internals
//! Every non-disabled cell is a node in an undirected grid graph built once per snapshot. Occupancy is kept out of
//! the graph: each query derives a [`PassabilityMask`] where only empty cells and the query token itself are open,
//! and a breadth-first search runs over the graph filtered by that mask.
//!
//! To find blockers, the search widens deterministically. Every other token is cleared from the mask in turn; if
//! no single removal works, pairs are tried; failing that, everything in the column above the token is taken.
//! Pair search keeps the first working partner per anchor, so it finds *a* working pair rather than a proven
//! minimum, and the column fallback may overstate what needs to move.
//!
//! The crate logs through the [`log`] facade and never installs a logger.

pub use blockers::{find_blockers, BlockerSet, SearchDepth};
pub use board::Board;
pub use builder::SnapshotBuilder;
pub use cell::{Cell, Color};
pub use config::{AgentConfig, PolicyConfig, ReportConfig};
pub use context::{DecisionContext, ExtractionQueue, OverflowBuffer};
pub use error::{ConfigError, DecisionError, ParseError, QueryError, SnapshotError};
pub use location::{Location, EXTRACTION_ROW};
pub use mask::PassabilityMask;
pub use policy::{decide, AdvisedPolicy, Advisor, ChosenBy, Decision, DeterministicPolicy, Policy};
pub use ranker::{rank, MoveCost};
pub use reach::{reachable, reachable_now};
pub use reply::parse_reply;
pub use report::Report;
pub use snapshot::{SnapshotV1, SNAPSHOT_VERSION};

pub(crate) mod board;
pub(crate) mod location;
pub mod shape;
pub(crate) mod cell;
pub(crate) mod builder;
pub(crate) mod mask;
pub(crate) mod reach;
pub(crate) mod blockers;
pub(crate) mod ranker;
pub(crate) mod context;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod report;
pub(crate) mod reply;
pub(crate) mod policy;
pub(crate) mod snapshot;
#[cfg(feature = "wasm")]
pub mod wasm;
