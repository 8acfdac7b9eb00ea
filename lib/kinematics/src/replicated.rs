//! Client-side prediction for a single replicated field.
//!
//! The owner writes `local` optimistically and proposes it to the authority;
//! the authority stores it and notifies every replica, the proposer included,
//! which is the only path that writes `confirmed`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum FieldId {
    Crouched,
    Name,
}

/// Reliable, ordered-per-field outbound channel to the authority
pub trait ReplicationChannel<T> {
    fn send(&mut self, field: FieldId, value: T);
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Replicated<T> {
    field: FieldId,
    local: T,
    confirmed: T,
    /// Last value actually handed to the channel
    sent: T,
    pending: Option<T>,
}

impl<T: Clone + PartialEq + std::fmt::Debug> Replicated<T> {
    pub fn new(field: FieldId, value: T) -> Self {
        Self {
            field,
            local: value.clone(),
            confirmed: value.clone(),
            sent: value,
            pending: None,
        }
    }

    pub fn field(&self) -> FieldId {
        self.field
    }

    /// Predicted value, owned by this actor
    pub fn local(&self) -> &T {
        &self.local
    }

    /// Last value confirmed by the authority
    pub fn confirmed(&self) -> &T {
        &self.confirmed
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Apply `value` locally and queue it for the authority.
    ///
    /// Proposals are last-wins: a newer one replaces any unsent one, and a
    /// value equal to what was last sent queues nothing. Returns whether a
    /// send is pending afterwards.
    pub fn propose(&mut self, value: T) -> bool {
        self.local = value.clone();
        self.pending = if value == self.sent { None } else { Some(value) };
        self.pending.is_some()
    }

    /// Hand any pending proposal to the channel. Fire and forget.
    pub fn flush(&mut self, channel: &mut impl ReplicationChannel<T>) {
        if let Some(value) = self.pending.take() {
            log::trace!("propose {:?} = {value:?}", self.field);
            self.sent = value.clone();
            channel.send(self.field, value);
        }
    }

    /// Drop an unsent proposal, used once the channel is gone for good
    pub fn discard_pending(&mut self) {
        self.pending = None;
    }

    /// Change notification from the authority.
    ///
    /// Idempotent: returns `true` only when the confirmed value actually
    /// changed, in which case the caller must re-apply anything derived from
    /// it regardless of the local prediction.
    pub fn confirm(&mut self, old: T, new: T) -> bool {
        if new == self.confirmed { return false; }
        log::debug!("confirmed {:?}: {old:?} -> {new:?} (local {:?})", self.field, self.local);
        self.confirmed = new;
        true
    }

    /// No proposal in flight and the prediction matches the authority
    pub fn is_settled(&self) -> bool {
        self.pending.is_none() && self.local == self.confirmed && self.sent == self.confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Outbox(Vec<(FieldId, bool)>);

    impl ReplicationChannel<bool> for Outbox {
        fn send(&mut self, field: FieldId, value: bool) {
            self.0.push((field, value));
        }
    }

    #[test]
    fn test_propose_applies_locally_before_confirmation() {
        let mut crouched = Replicated::new(FieldId::Crouched, false);
        assert!(crouched.propose(true));
        assert!(*crouched.local());
        assert!(!*crouched.confirmed(), "Confirmed only changes through confirm()");
    }

    #[test]
    fn test_repeated_identical_proposals_send_once() {
        let mut crouched = Replicated::new(FieldId::Crouched, false);
        let mut outbox = Outbox::default();

        crouched.propose(true);
        crouched.propose(true);
        crouched.flush(&mut outbox);
        crouched.propose(true);
        crouched.flush(&mut outbox);

        assert_eq!(outbox.0, vec![(FieldId::Crouched, true)]);
        assert!(*crouched.local());
    }

    #[test]
    fn test_last_proposal_wins() {
        let mut crouched = Replicated::new(FieldId::Crouched, false);
        let mut outbox = Outbox::default();

        crouched.propose(true);
        crouched.flush(&mut outbox);
        crouched.propose(false);
        crouched.propose(true);
        crouched.propose(false);
        crouched.flush(&mut outbox);

        assert_eq!(outbox.0, vec![(FieldId::Crouched, true), (FieldId::Crouched, false)]);
    }

    #[test]
    fn test_proposal_reverted_before_flush_sends_nothing() {
        let mut crouched = Replicated::new(FieldId::Crouched, false);
        let mut outbox = Outbox::default();

        crouched.propose(true);
        crouched.propose(false);
        crouched.flush(&mut outbox);

        assert!(outbox.0.is_empty());
        assert!(crouched.is_settled());
    }

    #[test]
    fn test_confirm_is_idempotent() {
        let mut crouched = Replicated::new(FieldId::Crouched, false);
        assert!(crouched.confirm(false, true));
        assert!(!crouched.confirm(false, true), "Same confirmed value twice should not re-apply");
        assert!(*crouched.confirmed());
    }

    #[test]
    fn test_confirm_does_not_touch_prediction() {
        let mut crouched = Replicated::new(FieldId::Crouched, false);
        let mut outbox = Outbox::default();
        crouched.propose(true);
        crouched.flush(&mut outbox);
        crouched.propose(false);
        crouched.flush(&mut outbox);

        // echo of the first proposal arrives while the second is in flight
        assert!(crouched.confirm(false, true));
        assert!(!*crouched.local());
        assert!(*crouched.confirmed());
        assert!(!crouched.is_settled());

        assert!(crouched.confirm(true, false));
        assert!(crouched.is_settled());
    }

    #[test]
    fn test_discard_pending() {
        let mut crouched = Replicated::new(FieldId::Crouched, false);
        let mut outbox = Outbox::default();
        crouched.propose(true);
        crouched.discard_pending();
        crouched.flush(&mut outbox);
        assert!(outbox.0.is_empty());
        assert!(!*crouched.confirmed(), "Last confirmed state stays final");
    }
}
