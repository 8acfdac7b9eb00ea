//! Crouch toggling.
//!
//! The crouch flag lives in a [`Replicated<bool>`]: toggles write the local
//! prediction and propose it, the collider follows the prediction right away,
//! and the authority's echo later becomes the canonical value.

use crate::{
    collision::ColliderShape,
    config::LocomotionConfig,
    effect::TransientEffect,
    replicated::Replicated,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RejectReason {
    Airborne,
    /// Crouched with no room to stand
    NoClearance,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CrouchOutcome {
    Toggled { crouched: bool },
    Rejected(RejectReason),
}

/// Handle a consumed crouch-toggle edge.
///
/// `can_stand_up` is only evaluated when standing up from a crouch.
pub fn toggle(
    record: &mut Replicated<bool>,
    vignette: &mut TransientEffect,
    grounded: bool,
    can_stand_up: impl FnOnce() -> bool,
    config: &LocomotionConfig,
) -> CrouchOutcome {
    if !grounded {
        return CrouchOutcome::Rejected(RejectReason::Airborne);
    }
    let crouched = *record.local();
    if crouched && !can_stand_up() {
        log::debug!("crouch toggle rejected, no room to stand");
        return CrouchOutcome::Rejected(RejectReason::NoClearance);
    }

    let crouched = !crouched;
    record.propose(crouched);
    vignette.start_transition(if crouched { config.vignette_intensity } else { 0. });
    CrouchOutcome::Toggled { crouched }
}

/// Force the actor to stand: nobody stays crouched through a jump, a fall or a sprint
pub fn reset_player_state(record: &mut Replicated<bool>, vignette: &mut TransientEffect) {
    record.propose(false);
    if vignette.target != 0. || vignette.is_running() {
        vignette.start_transition(0.);
    }
}

/// Sprint is allowed unless crouched under something too low to stand in
pub fn sprint_allowed(crouched: bool, can_stand_up: impl FnOnce() -> bool) -> bool {
    !crouched || can_stand_up()
}

/// Collider the local actor applies from its own prediction
pub fn predicted_collider(record: &Replicated<bool>, config: &LocomotionConfig) -> ColliderShape {
    config.collider(*record.local())
}

/// Collider every observer applies, this actor included once confirmed
pub fn confirmed_collider(record: &Replicated<bool>, config: &LocomotionConfig) -> ColliderShape {
    config.collider(*record.confirmed())
}
