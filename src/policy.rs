use std::fmt::Display;

use log::{debug, warn};

use crate::board::Board;
use crate::config::{PolicyConfig, ReportConfig};
use crate::context::DecisionContext;
use crate::error::DecisionError;
use crate::ranker::{rank, MoveCost};
use crate::reply::parse_reply;
use crate::report::Report;

/// Who picked the move in a [`Decision`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ChosenBy {
    /// The lowest-cost entry, taken without consulting anyone.
    Deterministic,
    /// An advisor named the move.
    Advisor,
    /// Every advisor reply was rejected; the lowest-cost entry was taken instead.
    Fallback,
}

/// Picks one entry out of a non-empty ranking.
pub trait Policy {
    /// Return the index into `ranking` of the move to make, and who chose it.
    fn choose(&mut self, board: &Board, context: &DecisionContext, ranking: &[MoveCost]) -> Result<(usize, ChosenBy), DecisionError>;
}

/// Always takes the recommended (lowest-cost) move.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeterministicPolicy;

impl Policy for DeterministicPolicy {
    fn choose(&mut self, _board: &Board, _context: &DecisionContext, _ranking: &[MoveCost]) -> Result<(usize, ChosenBy), DecisionError> {
        Ok((0, ChosenBy::Deterministic))
    }
}

/// An external decision service: handed the text [`Report`], it answers with free text naming a move.
pub trait Advisor {
    /// Transport or service failures.
    type Error: Display;

    /// Ask for a move given `report`.
    fn advise(&mut self, report: &str) -> Result<String, Self::Error>;
}

impl<F, E> Advisor for F
where
    F: FnMut(&str) -> Result<String, E>,
    E: Display,
{
    type Error = E;

    fn advise(&mut self, report: &str) -> Result<String, Self::Error> {
        self(report)
    }
}

/// Consults an [`Advisor`] and accepts its reply only if it names a ranked candidate.
pub struct AdvisedPolicy<A: Advisor> {
    advisor: A,
    report: ReportConfig,
    policy: PolicyConfig,
}

impl<A: Advisor> AdvisedPolicy<A> {
    /// Wrap `advisor`, rendering reports per `report` and retrying per `policy`.
    pub fn new(advisor: A, report: ReportConfig, policy: PolicyConfig) -> Self {
        Self { advisor, report, policy }
    }
}

impl<A: Advisor> Policy for AdvisedPolicy<A> {
    fn choose(&mut self, board: &Board, context: &DecisionContext, ranking: &[MoveCost]) -> Result<(usize, ChosenBy), DecisionError> {
        let report = Report::new(board, context.queue.color, ranking, &self.report)
            .with_context(context)
            .to_string();

        let attempts = self.policy.max_consultations.max(1);
        let mut reason = String::new();
        for attempt in 1..=attempts {
            let reply = self.advisor.advise(&report)
                .map_err(|e| DecisionError::Advisor(e.to_string()))?;

            match parse_reply(&reply) {
                Ok(location) => match ranking.iter().position(|entry| entry.source == location) {
                    Some(index) => return Ok((index, ChosenBy::Advisor)),
                    None => reason = format!("{} is not a ranked candidate", location),
                },
                Err(e) => reason = e.to_string(),
            }
            warn!("rejected advisor reply {}/{}: {}", attempt, attempts, reason);
        }

        if self.policy.fallback_on_rejected_reply {
            Ok((0, ChosenBy::Fallback))
        } else {
            Err(DecisionError::RejectedReply { attempts, reason })
        }
    }
}

/// The outcome of one decision cycle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Decision {
    /// The chosen candidate and its plan.
    pub choice: MoveCost,
    /// Who picked it.
    pub chosen_by: ChosenBy,
    /// State to pass into the next cycle.
    pub next: DecisionContext,
}

/// Run one decision cycle: rank tokens of the queue's color on `board` and let `policy` pick one.
///
/// Returns `Ok(None)` when no token of that color can be planned for; the caller decides what that means for the game.
/// That covers both an absent color and one whose every token is [`Unresolved`](crate::SearchDepth::Unresolved);
/// [`Board::tokens_of`] tells the two apart, and the second is logged at `warn` level.
pub fn decide<P: Policy>(board: &Board, context: &DecisionContext, policy: &mut P) -> Result<Option<Decision>, DecisionError> {
    let color = context.queue.color;
    let ranking = rank(board, color)?;
    if ranking.is_empty() {
        match board.tokens_of(color).count() {
            0 => debug!("level {} move {}: no {} tokens", context.level, context.move_count, color),
            stuck => warn!(
                "level {} move {}: {} {} token(s) on the board, none with an extraction plan",
                context.level, context.move_count, stuck, color
            ),
        }
        return Ok(None);
    }

    let (index, chosen_by) = policy.choose(board, context, &ranking)?;
    let Some(choice) = ranking.into_iter().nth(index) else {
        return Err(DecisionError::InvalidChoice(index));
    };

    debug!(
        "level {} move {}: {} {} at cost {} ({})",
        context.level, context.move_count, context.queue.color, choice.source, choice.cost, chosen_by
    );

    Ok(Some(Decision { choice, chosen_by, next: context.advanced() }))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use crate::board::Board;
    use crate::cell::Color;
    use crate::config::{PolicyConfig, ReportConfig};
    use crate::context::{DecisionContext, ExtractionQueue, OverflowBuffer};
    use crate::error::DecisionError;
    use crate::location::Location;
    use crate::policy::{decide, AdvisedPolicy, ChosenBy, DeterministicPolicy};

    fn context(color: char) -> DecisionContext {
        let queue = ExtractionQueue { color: Color::new(color).unwrap(), remaining: 3 };
        DecisionContext::new(1, queue, OverflowBuffer::with_capacity(4))
    }

    fn board() -> Board {
        "B..\nRB.\nRBR".parse().unwrap()
    }

    #[test]
    fn deterministic_takes_cheapest() {
        let decision = decide(&board(), &context('R'), &mut DeterministicPolicy).unwrap().unwrap();
        assert_eq!(decision.choice.source, Location(2, 2));
        assert_eq!(decision.chosen_by, ChosenBy::Deterministic);
        assert_eq!(decision.next.move_count, 1);
    }

    #[test]
    fn no_candidates() {
        assert_eq!(decide(&board(), &context('G'), &mut DeterministicPolicy).unwrap(), None);
    }

    #[test]
    fn unresolved_tokens_are_not_candidates() {
        // the R is sealed in by disabled cells, with nothing above it to remove
        let board: Board = "XBX\nXBX\nRXX".parse().unwrap();
        assert_eq!(decide(&board, &context('R'), &mut DeterministicPolicy).unwrap(), None);
        assert_eq!(board.tokens_of(Color::new('R').unwrap()).count(), 1);
        assert_eq!(board.tokens_of(Color::new('G').unwrap()).count(), 0);
    }

    #[test]
    fn advisor_choice_is_honored() {
        let seen = RefCell::new(String::new());
        let advisor = |report: &str| -> Result<String, String> {
            *seen.borrow_mut() = report.to_string();
            Ok(" (0,2) ".to_string())
        };
        let mut policy = AdvisedPolicy::new(advisor, ReportConfig::default(), PolicyConfig::default());
        let decision = decide(&board(), &context('R'), &mut policy).unwrap().unwrap();
        assert_eq!(decision.choice.source, Location(0, 2));
        assert_eq!(decision.choice.blockers, vec![Location(0, 1), Location(0, 0)]);
        assert_eq!(decision.chosen_by, ChosenBy::Advisor);
        assert!(seen.borrow().starts_with("target R\nqueue R 3\nbuffer 0/4\nboard\n"));
    }

    #[test]
    fn rejected_replies_are_retried_then_fall_back() {
        let mut replies = vec!["(1,1)", "the red one"].into_iter();
        let mut asked = 0;
        let advisor = |_: &str| -> Result<String, String> {
            asked += 1;
            Ok(replies.next().unwrap_or_default().to_string())
        };
        let config = PolicyConfig { fallback_on_rejected_reply: true, max_consultations: 2 };
        let mut policy = AdvisedPolicy::new(advisor, ReportConfig::default(), config);
        let decision = decide(&board(), &context('R'), &mut policy).unwrap().unwrap();
        drop(policy);
        assert_eq!(asked, 2);
        assert_eq!(decision.choice.source, Location(2, 2));
        assert_eq!(decision.chosen_by, ChosenBy::Fallback);
    }

    #[test]
    fn rejected_reply_without_fallback_fails() {
        let advisor = |_: &str| -> Result<String, String> { Ok("9,9".to_string()) };
        let config = PolicyConfig { fallback_on_rejected_reply: false, max_consultations: 1 };
        let mut policy = AdvisedPolicy::new(advisor, ReportConfig::default(), config);
        let err = decide(&board(), &context('R'), &mut policy).unwrap_err();
        assert_eq!(err.to_string(), "advisor reply rejected after 1 attempt(s): (9,9) is not a ranked candidate");
    }

    #[test]
    fn advisor_failure_propagates() {
        let advisor = |_: &str| -> Result<String, String> { Err("timed out".to_string()) };
        let mut policy = AdvisedPolicy::new(advisor, ReportConfig::default(), PolicyConfig::default());
        assert!(matches!(decide(&board(), &context('R'), &mut policy), Err(DecisionError::Advisor(e)) if e == "timed out"));
    }
}
