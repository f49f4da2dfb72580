//! Voice transition detection.
//!
//! Each member is either `Disconnected` or `Connected(channel)`. Only a move
//! into voice from no channel at all counts as a join under the strict rule.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{VoiceState, VoiceTransition};
use crate::domain::value_objects::Snowflake;

/// Which voice transitions count as a join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionRule {
    /// Disconnected -> Connected only
    #[default]
    Strict,
    /// Any change that ends connected, including channel-to-channel moves
    Loose,
}

/// Why a transition was not treated as a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The member is an automated agent
    Bot,
    /// The member left voice or was never in it
    Disconnect,
    /// The member moved between channels
    Move,
    /// Previous and new channel are identical
    Unchanged,
}

/// Result of evaluating one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionVerdict {
    Join { channel_id: Snowflake },
    Ignored(IgnoreReason),
}

/// Gate deciding whether a voice transition is a notifiable join.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionDetector {
    rule: TransitionRule,
}

impl TransitionDetector {
    pub fn new(rule: TransitionRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> TransitionRule {
        self.rule
    }

    /// Evaluate a transition. Bots are rejected before the state rule runs.
    pub fn evaluate(&self, transition: &VoiceTransition) -> TransitionVerdict {
        if transition.member.bot {
            return TransitionVerdict::Ignored(IgnoreReason::Bot);
        }

        match (transition.before, transition.after) {
            (_, VoiceState::Disconnected) => TransitionVerdict::Ignored(IgnoreReason::Disconnect),
            (VoiceState::Disconnected, VoiceState::Connected { channel_id }) => {
                TransitionVerdict::Join { channel_id }
            }
            (VoiceState::Connected { channel_id: from }, VoiceState::Connected { channel_id: to })
                if from == to =>
            {
                TransitionVerdict::Ignored(IgnoreReason::Unchanged)
            }
            (VoiceState::Connected { .. }, VoiceState::Connected { channel_id }) => {
                match self.rule {
                    TransitionRule::Strict => TransitionVerdict::Ignored(IgnoreReason::Move),
                    TransitionRule::Loose => TransitionVerdict::Join { channel_id },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Member;
    use test_case::test_case;

    const A: VoiceState = VoiceState::Connected {
        channel_id: Snowflake(100),
    };
    const B: VoiceState = VoiceState::Connected {
        channel_id: Snowflake(200),
    };
    const OFF: VoiceState = VoiceState::Disconnected;

    fn transition(before: VoiceState, after: VoiceState) -> VoiceTransition {
        let member = Member::new(Snowflake(1), Snowflake(2)).with_username("leon3to");
        VoiceTransition::new(member, before, after)
    }

    #[test_case(OFF, A, TransitionVerdict::Join { channel_id: Snowflake(100) } ; "join")]
    #[test_case(A, B, TransitionVerdict::Ignored(IgnoreReason::Move) ; "move")]
    #[test_case(A, OFF, TransitionVerdict::Ignored(IgnoreReason::Disconnect) ; "leave")]
    #[test_case(OFF, OFF, TransitionVerdict::Ignored(IgnoreReason::Disconnect) ; "still off")]
    #[test_case(A, A, TransitionVerdict::Ignored(IgnoreReason::Unchanged) ; "same channel")]
    fn test_strict_rule(before: VoiceState, after: VoiceState, expected: TransitionVerdict) {
        let detector = TransitionDetector::new(TransitionRule::Strict);
        assert_eq!(detector.evaluate(&transition(before, after)), expected);
    }

    #[test_case(OFF, A, TransitionVerdict::Join { channel_id: Snowflake(100) } ; "join")]
    #[test_case(A, B, TransitionVerdict::Join { channel_id: Snowflake(200) } ; "move")]
    #[test_case(A, OFF, TransitionVerdict::Ignored(IgnoreReason::Disconnect) ; "leave")]
    #[test_case(A, A, TransitionVerdict::Ignored(IgnoreReason::Unchanged) ; "same channel")]
    fn test_loose_rule(before: VoiceState, after: VoiceState, expected: TransitionVerdict) {
        let detector = TransitionDetector::new(TransitionRule::Loose);
        assert_eq!(detector.evaluate(&transition(before, after)), expected);
    }

    #[test_case(TransitionRule::Strict ; "strict")]
    #[test_case(TransitionRule::Loose ; "loose")]
    fn test_bot_never_qualifies(rule: TransitionRule) {
        let detector = TransitionDetector::new(rule);
        for (before, after) in [(OFF, A), (A, B), (A, OFF)] {
            let mut t = transition(before, after);
            t.member.bot = true;
            assert_eq!(
                detector.evaluate(&t),
                TransitionVerdict::Ignored(IgnoreReason::Bot)
            );
        }
    }

    #[test]
    fn test_default_rule_is_strict() {
        assert_eq!(TransitionDetector::default().rule(), TransitionRule::Strict);
    }
}
