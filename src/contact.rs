//! Contact classification
//!
//! Turns raw begin-of-contact pairs into deferred game outcomes. The
//! classifier never mutates the world from inside event handling; a head
//! impact only raises a one-shot pending-detach flag that the controller
//! drains after the physics step returns, since joint topology cannot
//! change mid-solve.

use crate::physics::{BodyKind, BodyTag};

/// A terminal or semi-terminal game event derived from contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    HeadFail,
    TireFail,
}

/// Attachment/progress state of the rig as the classifier sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigPhase {
    Riding,
    Detached,
    Finished,
}

/// Outcomes produced by one step, plus whether the rig should detach.
#[derive(Debug, Clone, Default)]
pub struct StepOutcomes {
    pub outcomes: Vec<Outcome>,
    pub detach: bool,
}

/// Classifies contact pairs against body tags.
///
/// Classification is stateless per contact (it reads only the two bodies'
/// tags) except for the phase gate: once the rider has detached, the head
/// keeps grinding along the ground every step, and without the gate that
/// would re-fire `HeadFail` endlessly. Emission is edge-triggered: at most
/// one `HeadFail` per fall.
#[derive(Debug)]
pub struct ContactClassifier {
    phase: RigPhase,
    win: bool,
    head_fail: bool,
    tire_fail: bool,
}

impl Default for ContactClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactClassifier {
    pub fn new() -> Self {
        Self {
            phase: RigPhase::Riding,
            win: false,
            head_fail: false,
            tire_fail: false,
        }
    }

    pub fn phase(&self) -> RigPhase {
        self.phase
    }

    /// Inspect one begin-of-contact pair. `a`/`b` are the bodies' tags (if
    /// tagged at all) and whether each body is static. Pairs matching no
    /// rule are ignored.
    pub fn on_begin_contact(
        &mut self,
        a: Option<&BodyTag>,
        a_static: bool,
        b: Option<&BodyTag>,
        b_static: bool,
    ) {
        if self.phase() != RigPhase::Riding {
            return;
        }

        // Finish takes precedence over everything else in the pair.
        if tagged(a, BodyKind::Finish) || tagged(b, BodyKind::Finish) {
            self.win = true;
            return;
        }
        if tagged(a, BodyKind::Hazard) || tagged(b, BodyKind::Hazard) {
            self.tire_fail = true;
            return;
        }
        // Either side may be the head; the engine reports pairs in
        // arbitrary order.
        if (tagged(a, BodyKind::Head) && b_static) || (tagged(b, BodyKind::Head) && a_static) {
            self.head_fail = true;
        }
    }

    /// Drain the outcomes accumulated over the step. A win in the step
    /// suppresses the failure outcomes and ends classification for the
    /// attempt; a head failure requests detachment and gates further
    /// classification until [`Self::reset`].
    pub fn finish_step(&mut self) -> StepOutcomes {
        let mut result = StepOutcomes::default();

        if self.win {
            result.outcomes.push(Outcome::Win);
            self.phase = RigPhase::Finished;
        } else {
            if self.tire_fail {
                result.outcomes.push(Outcome::TireFail);
            }
            if self.head_fail {
                result.outcomes.push(Outcome::HeadFail);
                result.detach = true;
                self.phase = RigPhase::Detached;
            }
        }

        self.win = false;
        self.head_fail = false;
        self.tire_fail = false;
        result
    }

    /// Back to riding for a fresh attempt.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

fn tagged(tag: Option<&BodyTag>, kind: BodyKind) -> bool {
    tag.is_some_and(|t| t.is(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(kind: BodyKind) -> BodyTag {
        BodyTag::new(kind)
    }

    #[test]
    fn finish_contact_wins() {
        let mut c = ContactClassifier::new();
        c.on_begin_contact(Some(&tag(BodyKind::Finish)), true, Some(&tag(BodyKind::Wheel)), false);
        let s = c.finish_step();
        assert_eq!(s.outcomes, vec![Outcome::Win]);
        assert!(!s.detach);
        assert_eq!(c.phase(), RigPhase::Finished);
    }

    #[test]
    fn hazard_contact_fails_the_tire() {
        let mut c = ContactClassifier::new();
        c.on_begin_contact(Some(&tag(BodyKind::Wheel)), false, Some(&tag(BodyKind::Hazard)), true);
        let s = c.finish_step();
        assert_eq!(s.outcomes, vec![Outcome::TireFail]);
        assert_eq!(c.phase(), RigPhase::Riding);
    }

    #[test]
    fn head_on_static_body_fails_and_requests_detach() {
        let mut c = ContactClassifier::new();
        // Both pair orders must classify.
        c.on_begin_contact(Some(&tag(BodyKind::Head)), false, Some(&tag(BodyKind::Ground)), true);
        let s = c.finish_step();
        assert_eq!(s.outcomes, vec![Outcome::HeadFail]);
        assert!(s.detach);

        let mut c = ContactClassifier::new();
        c.on_begin_contact(Some(&tag(BodyKind::Ground)), true, Some(&tag(BodyKind::Head)), false);
        let s = c.finish_step();
        assert_eq!(s.outcomes, vec![Outcome::HeadFail]);
        assert!(s.detach);
    }

    #[test]
    fn head_on_dynamic_body_is_ignored() {
        let mut c = ContactClassifier::new();
        c.on_begin_contact(Some(&tag(BodyKind::Head)), false, Some(&tag(BodyKind::Wheel)), false);
        let s = c.finish_step();
        assert!(s.outcomes.is_empty());
        assert!(!s.detach);
    }

    #[test]
    fn head_fail_is_edge_triggered_across_steps() {
        let mut c = ContactClassifier::new();
        let mut head_fails = 0;
        for _ in 0..10 {
            // The detached rider's head keeps hitting the ground each step.
            c.on_begin_contact(Some(&tag(BodyKind::Head)), false, Some(&tag(BodyKind::Ground)), true);
            c.on_begin_contact(Some(&tag(BodyKind::Head)), false, Some(&tag(BodyKind::Ground)), true);
            head_fails += c
                .finish_step()
                .outcomes
                .iter()
                .filter(|o| **o == Outcome::HeadFail)
                .count();
        }
        assert_eq!(head_fails, 1);
        assert_eq!(c.phase(), RigPhase::Detached);
    }

    #[test]
    fn win_beats_tire_fail_within_a_step() {
        for finish_first in [true, false] {
            let mut c = ContactClassifier::new();
            let finish = |c: &mut ContactClassifier| {
                c.on_begin_contact(Some(&tag(BodyKind::Finish)), true, Some(&tag(BodyKind::Wheel)), false)
            };
            let hazard = |c: &mut ContactClassifier| {
                c.on_begin_contact(Some(&tag(BodyKind::Hazard)), true, Some(&tag(BodyKind::Wheel)), false)
            };
            if finish_first {
                finish(&mut c);
                hazard(&mut c);
            } else {
                hazard(&mut c);
                finish(&mut c);
            }
            let s = c.finish_step();
            assert_eq!(s.outcomes, vec![Outcome::Win]);
        }
    }

    #[test]
    fn finish_precedence_within_a_single_pair() {
        // A pair that is simultaneously finish-tagged on one side and
        // hazard-tagged on the other resolves to a win.
        let mut c = ContactClassifier::new();
        c.on_begin_contact(Some(&tag(BodyKind::Hazard)), true, Some(&tag(BodyKind::Finish)), true);
        assert_eq!(c.finish_step().outcomes, vec![Outcome::Win]);
    }

    #[test]
    fn nothing_classifies_after_detach_or_finish() {
        let mut c = ContactClassifier::new();
        c.on_begin_contact(Some(&tag(BodyKind::Head)), false, Some(&tag(BodyKind::Ground)), true);
        c.finish_step();

        // Detached: even a finish contact is ignored.
        c.on_begin_contact(Some(&tag(BodyKind::Finish)), true, Some(&tag(BodyKind::Wheel)), false);
        assert!(c.finish_step().outcomes.is_empty());

        let mut c = ContactClassifier::new();
        c.on_begin_contact(Some(&tag(BodyKind::Finish)), true, None, false);
        c.finish_step();
        c.on_begin_contact(Some(&tag(BodyKind::Hazard)), true, None, false);
        assert!(c.finish_step().outcomes.is_empty());
    }

    #[test]
    fn untagged_pairs_are_ignored() {
        let mut c = ContactClassifier::new();
        c.on_begin_contact(None, true, None, false);
        c.on_begin_contact(Some(&tag(BodyKind::Wheel)), false, Some(&tag(BodyKind::Ground)), true);
        let s = c.finish_step();
        assert!(s.outcomes.is_empty());
        assert!(!s.detach);
    }

    #[test]
    fn reset_rearms_classification() {
        let mut c = ContactClassifier::new();
        c.on_begin_contact(Some(&tag(BodyKind::Head)), false, Some(&tag(BodyKind::Ground)), true);
        c.finish_step();
        assert_eq!(c.phase(), RigPhase::Detached);

        c.reset();
        assert_eq!(c.phase(), RigPhase::Riding);
        c.on_begin_contact(Some(&tag(BodyKind::Head)), false, Some(&tag(BodyKind::Ground)), true);
        let s = c.finish_step();
        assert_eq!(s.outcomes, vec![Outcome::HeadFail]);
        assert!(s.detach);
    }
}
