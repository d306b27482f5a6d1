use std::collections::HashMap;
use std::num::NonZero;

use itertools::Itertools;
use log::debug;
use unordered_pair::UnorderedPair;

use crate::board::Board;
use crate::error::QueryError;
use crate::location::{Location, EXTRACTION_ROW};
use crate::mask::PassabilityMask;
use crate::reach::reachable;

/// How far the blocker search had to escalate before it produced an answer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SearchDepth {
    /// The token can already reach the extraction row.
    Direct,
    /// Removing one blocker opens a path.
    Single,
    /// Removing a pair of blockers opens a path.
    Pair,
    /// Neither one nor two removals helped; every token straight above was taken instead.
    ///
    /// This ignores sideways routes and may overstate the set, or fail to open a path at all if a disabled cell
    /// sits in the column.
    ColumnFallback,
    /// Every stage came up empty: no pair frees the token and the column above it holds no tokens.
    Unresolved,
}

/// An ordered set of tokens to relocate before the query token can leave.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BlockerSet {
    /// Blocker locations, in the order the search reports them.
    pub blockers: Vec<Location>,
    /// Which stage of the search produced [`Self::blockers`].
    pub depth: SearchDepth,
}

impl BlockerSet {
    /// Moves needed: every blocker, plus the query token itself.
    ///
    /// [`None`] for an [`Unresolved`](SearchDepth::Unresolved) search, which has no plan to price.
    pub fn cost(&self) -> Option<NonZero<usize>> {
        match self.depth {
            SearchDepth::Unresolved => None,
            _ => Some(NonZero::<usize>::MIN.saturating_add(self.blockers.len())),
        }
    }
}

/// Find tokens whose removal lets the token at `token` reach the extraction row.
///
/// The search escalates:
/// 1. if the token is reachable as is, no blockers;
/// 2. every other single token is tried; successes adjacent to the token are preferred, and the first in reading order wins;
/// 3. every ordered pair of other tokens is tried, stopping at the first working partner for each anchor;
///    each pair lists the blocker nearer to the token first, and the first pair in reading order wins;
/// 4. otherwise every token in the column between the token and the extraction row, top to bottom;
/// 5. if that column holds no tokens, the search is [`Unresolved`](SearchDepth::Unresolved).
///
/// Stage 3 yields *a* working pair, not a proven minimum, and stage 4 is a plain approximation.
pub fn find_blockers(board: &Board, token: Location) -> Result<BlockerSet, QueryError> {
    let base = PassabilityMask::for_token(board, token)?;

    if reachable(board, token, &base)? {
        return Ok(BlockerSet { blockers: Vec::new(), depth: SearchDepth::Direct });
    }

    let others = board.tokens()
        .map(|(location, _)| location)
        .filter(|location| *location != token)
        .collect_vec();

    if let Some(blocker) = single_blocker(board, token, &base, &others)? {
        debug!("{} is blocked by {}", token, blocker);
        return Ok(BlockerSet { blockers: vec![blocker], depth: SearchDepth::Single });
    }

    debug!("no single blocker frees {}, trying pairs of {} tokens", token, others.len());
    if let Some((near, far)) = blocker_pair(board, token, &base, &others)? {
        debug!("{} is blocked by {} and {}", token, near, far);
        return Ok(BlockerSet { blockers: vec![near, far], depth: SearchDepth::Pair });
    }

    let column = (EXTRACTION_ROW..token.1)
        .map(|y| Location(token.0, y))
        .filter(|location| board.cell(*location).is_ok_and(|cell| cell.color().is_some()))
        .collect_vec();
    if column.is_empty() {
        debug!("nothing to remove above {}, leaving it unresolved", token);
        return Ok(BlockerSet { blockers: column, depth: SearchDepth::Unresolved });
    }

    debug!("no pair frees {}, falling back to the {} token(s) above it", token, column.len());
    Ok(BlockerSet { blockers: column, depth: SearchDepth::ColumnFallback })
}

fn single_blocker(board: &Board, token: Location, base: &PassabilityMask, others: &[Location]) -> Result<Option<Location>, QueryError> {
    let mut opened = Vec::new();
    for candidate in others {
        if reachable(board, token, &base.cleared(&[*candidate])?)? {
            opened.push(*candidate);
        }
    }

    // a token right next to ours is taken to be the literal obstacle
    let adjacent = opened.iter()
        .copied()
        .filter(|location| location.manhattan(token) == 1)
        .collect_vec();
    let preferred = if adjacent.is_empty() { opened } else { adjacent };

    Ok(preferred.into_iter().min_by_key(Location::reading_order))
}

fn blocker_pair(board: &Board, token: Location, base: &PassabilityMask, others: &[Location]) -> Result<Option<(Location, Location)>, QueryError> {
    // (a, b) and (b, a) clear the same mask
    let mut tried: HashMap<UnorderedPair<Location>, bool> = HashMap::new();
    let mut pairs = Vec::new();

    for anchor in others {
        for partner in others {
            if partner == anchor {
                continue;
            }

            let key = UnorderedPair::from((*anchor, *partner));
            let opens = match tried.get(&key) {
                Some(opens) => *opens,
                None => {
                    let opens = reachable(board, token, &base.cleared(&[*anchor, *partner])?)?;
                    tried.insert(key, opens);
                    opens
                }
            };

            if opens {
                pairs.push(nearer_first(token, *anchor, *partner));
                break;
            }
        }
    }

    Ok(pairs.into_iter().min_by_key(|(near, far)| (near.reading_order(), far.reading_order())))
}

fn nearer_first(token: Location, a: Location, b: Location) -> (Location, Location) {
    if (a.manhattan(token), a.reading_order()) <= (b.manhattan(token), b.reading_order()) {
        (a, b)
    } else {
        (b, a)
    }
}
