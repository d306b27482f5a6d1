use std::num::NonZero;

use itertools::Itertools;
use log::{debug, trace, warn};

use crate::blockers::{find_blockers, SearchDepth};
use crate::board::Board;
use crate::cell::Color;
use crate::error::QueryError;
use crate::location::Location;

/// The cost of extracting one token of the target color.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MoveCost {
    /// Where the candidate token stands.
    pub source: Location,
    /// Number of moves: one per blocker, plus the candidate itself.
    pub cost: NonZero<usize>,
    /// Tokens to relocate first, in the order the blocker search reported them. Empty iff `cost` is 1.
    pub blockers: Vec<Location>,
    /// Which stage of the blocker search produced `blockers`.
    pub depth: SearchDepth,
}

impl MoveCost {
    /// Whether the candidate can leave without moving anything else.
    pub fn is_direct(&self) -> bool {
        self.blockers.is_empty()
    }
}

/// Rank every token of `target` by how many moves it takes to extract.
///
/// The result is sorted by cost, then by the source's reading order, so the first entry is the recommended move
/// and every directly reachable token comes before any blocked one. An absent color yields an empty list.
///
/// Tokens whose blocker search is [`Unresolved`](SearchDepth::Unresolved) have no plan and are left out.
pub fn rank(board: &Board, target: Color) -> Result<Vec<MoveCost>, QueryError> {
    let mut ranking = Vec::new();

    for source in board.tokens_of(target) {
        let set = find_blockers(board, source)?;
        let Some(cost) = set.cost() else {
            warn!("{} {} has no extraction plan, leaving it out", target, source);
            continue;
        };

        trace!("{} {}: {} via {}", target, source, cost, set.depth);
        ranking.push(MoveCost {
            source,
            cost,
            blockers: set.blockers,
            depth: set.depth,
        });
    }

    let ranking = ranking.into_iter()
        .sorted_by_key(|entry| (entry.cost, entry.source.reading_order()))
        .collect_vec();

    match ranking.first() {
        None => debug!("no {} tokens on the board", target),
        Some(best) => debug!("ranked {} {} token(s), best {} at cost {}", ranking.len(), target, best.source, best.cost),
    }

    Ok(ranking)
}
