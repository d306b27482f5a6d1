use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::board::Board;
use crate::cell::Color;
use crate::config::ReportConfig;
use crate::context::DecisionContext;
use crate::ranker::MoveCost;

/// The text form of a ranking, as handed to an external decision service.
///
/// External consumers parse this, so the layout is fixed:
///
/// ```text
/// target R
/// queue R 3
/// buffer 1/5
/// board
/// BB.
/// RB.
/// candidates 1
/// (0,1) cost 2 blockers (0,0)
/// ```
///
/// The `queue` and `buffer` lines appear only with a [`DecisionContext`], the `board` section only if
/// [`ReportConfig::include_board`] is set. Candidates without blockers print `blockers -`.
pub struct Report<'a> {
    board: &'a Board,
    target: Color,
    ranking: &'a [MoveCost],
    context: Option<&'a DecisionContext>,
    config: &'a ReportConfig,
}

impl<'a> Report<'a> {
    /// A report on `ranking`, which was computed for `target` on `board`.
    pub fn new(board: &'a Board, target: Color, ranking: &'a [MoveCost], config: &'a ReportConfig) -> Self {
        Self { board, target, ranking, context: None, config }
    }

    /// Also describe the queue and buffer from `context`.
    pub fn with_context(mut self, context: &'a DecisionContext) -> Self {
        self.context = Some(context);
        self
    }

    fn candidate_line(entry: &MoveCost) -> String {
        let blockers = if entry.blockers.is_empty() {
            "-".to_string()
        } else {
            entry.blockers.iter().join(" ")
        };
        format!("{} cost {} blockers {}", entry.source, entry.cost, blockers)
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "target {}", self.target)?;
        if let Some(context) = self.context {
            writeln!(f, "queue {} {}", context.queue.color, context.queue.remaining)?;
            writeln!(f, "buffer {}/{}", context.buffer.occupied(), context.buffer.capacity())?;
        }

        if self.config.include_board {
            writeln!(f, "board")?;
            // board display already terminates every row
            write!(f, "{}", self.board)?;
        }

        let shown = self.ranking.len().min(self.config.max_candidates.unwrap_or(usize::MAX));
        writeln!(f, "candidates {}", shown)?;
        for entry in &self.ranking[..shown] {
            writeln!(f, "{}", Self::candidate_line(entry))?;
        }

        Ok(())
    }
}
