//! Deferred add-button feedback with cancellation.
//!
//! After an add-to-cart the button shows a confirmation and asks to be
//! reverted after a delay. Each request to revert carries the ticket it was
//! scheduled with; only the newest ticket per sku is honoured, so a second
//! add during the delay window supersedes the first revert instead of
//! racing it.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use kiosk_core::Sku;

/// Identifies one scheduled revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackTicket(u64);

impl FeedbackTicket {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FeedbackTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FeedbackTicket {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Pending reverts of one page, newest ticket per sku.
#[derive(Debug, Default)]
pub struct FeedbackTimers {
    latest: HashMap<Sku, FeedbackTicket>,
    issued: u64,
}

impl FeedbackTimers {
    /// Schedule a revert for `sku`, cancelling any earlier one.
    pub fn schedule(&mut self, sku: &Sku) -> FeedbackTicket {
        self.issued += 1;
        let ticket = FeedbackTicket(self.issued);
        self.latest.insert(sku.clone(), ticket);
        ticket
    }

    /// Consume a revert. Returns false if the ticket was superseded or
    /// already settled, in which case the revert must be ignored.
    pub fn settle(&mut self, sku: &Sku, ticket: FeedbackTicket) -> bool {
        if self.latest.get(sku) == Some(&ticket) {
            self.latest.remove(sku);
            true
        } else {
            false
        }
    }

    /// The revert currently outstanding for `sku`, if any.
    #[must_use]
    pub fn pending(&self, sku: &Sku) -> Option<FeedbackTicket> {
        self.latest.get(sku).copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sku(s: &str) -> Sku {
        Sku::parse(s).unwrap()
    }

    #[test]
    fn test_settle_current_ticket() {
        let mut timers = FeedbackTimers::default();
        let ticket = timers.schedule(&sku("a"));

        assert_eq!(timers.pending(&sku("a")), Some(ticket));
        assert!(timers.settle(&sku("a"), ticket));
        assert_eq!(timers.pending(&sku("a")), None);
        assert!(!timers.settle(&sku("a"), ticket), "a ticket settles once");
    }

    #[test]
    fn test_superseded_ticket_is_ignored() {
        let mut timers = FeedbackTimers::default();
        let first = timers.schedule(&sku("a"));
        let second = timers.schedule(&sku("a"));

        assert_ne!(first, second);
        assert!(!timers.settle(&sku("a"), first));
        assert!(timers.settle(&sku("a"), second));
    }

    #[test]
    fn test_skus_are_independent() {
        let mut timers = FeedbackTimers::default();
        let a = timers.schedule(&sku("a"));
        let b = timers.schedule(&sku("b"));

        assert!(!timers.settle(&sku("b"), a));
        assert!(timers.settle(&sku("a"), a));
        assert!(timers.settle(&sku("b"), b));
    }

    #[test]
    fn test_ticket_parse() {
        assert_eq!("7".parse::<FeedbackTicket>().unwrap().get(), 7);
        assert!("x".parse::<FeedbackTicket>().is_err());
    }
}
