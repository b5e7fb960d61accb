//! Outcome map plus input order.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::resolve::{ResolutionOutcome, ResolveError};

/// Outcomes of one batch, keyed by the URL string as given.
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Non-blank input URLs in input order (duplicates kept).
    order: Vec<String>,
    outcomes: HashMap<String, ResolutionOutcome>,
    all_succeeded: bool,
}

impl BatchResult {
    pub(crate) fn new(order: Vec<String>, outcomes: HashMap<String, ResolutionOutcome>) -> Self {
        let all_succeeded = order
            .iter()
            .all(|u| matches!(outcomes.get(u), Some(Ok(_))));
        Self {
            order,
            outcomes,
            all_succeeded,
        }
    }

    /// True only if every non-blank URL resolved (vacuously true for an empty batch).
    pub fn all_succeeded(&self) -> bool {
        self.all_succeeded
    }

    /// Recorded outcome for `url`, if any.
    pub fn outcome(&self, url: &str) -> Option<&ResolutionOutcome> {
        self.outcomes.get(url)
    }

    /// Number of distinct URLs with a recorded outcome.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Non-blank input URLs in input order.
    pub fn urls(&self) -> &[String] {
        &self.order
    }

    /// One entry per non-blank input URL, in input order. A URL without a
    /// recorded outcome yields `Unexpected("Unknown")`.
    pub fn iter_ordered(&self) -> impl Iterator<Item = (&str, Cow<'_, ResolutionOutcome>)> {
        self.order.iter().map(move |url| {
            let outcome = match self.outcomes.get(url) {
                Some(o) => Cow::Borrowed(o),
                None => Cow::Owned(Err(ResolveError::unknown())),
            };
            (url.as_str(), outcome)
        })
    }
}
