//! Tri-state matcher chain deciding whether a candidate satisfies the search.
//!
//! Each matcher sees the status produced by the ones before it. A `Reject`
//! ends evaluation for that candidate; the chain accepts only when the final
//! status is `Accept`.

pub mod content;
pub mod context;
pub mod path;

pub use content::FileContentMatcher;
pub use context::{Candidate, MatchStatus, SearchConfig, SearchContext, SearchTerms};
pub use path::FilePathMatcher;

use crate::error::Result;

pub trait Matcher {
    /// Fill the per-search context before any candidate is evaluated
    fn prepare(&self, terms: &SearchTerms, context: &mut SearchContext);

    fn is_matching(
        &self,
        candidate: &Candidate,
        context: &SearchContext,
        status: MatchStatus,
    ) -> Result<MatchStatus>;
}

pub struct MatcherChain {
    matchers: Vec<Box<dyn Matcher>>,
}

impl MatcherChain {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// Path and name first, content last
    pub fn standard(config: &SearchConfig) -> Self {
        Self::new(vec![
            Box::new(FilePathMatcher::new(config.clone())),
            Box::new(FileContentMatcher::new(config.clone())),
        ])
    }

    pub fn prepare(&self, terms: &SearchTerms) -> SearchContext {
        let mut context = SearchContext::default();
        for matcher in &self.matchers {
            matcher.prepare(terms, &mut context);
        }
        context
    }

    pub fn evaluate(&self, candidate: &Candidate, context: &SearchContext) -> Result<MatchStatus> {
        let mut status = MatchStatus::Undecided;
        for matcher in &self.matchers {
            status = matcher.is_matching(candidate, context, status)?;
            if status.is_rejected() {
                break;
            }
        }
        Ok(status)
    }

    pub fn is_match(&self, candidate: &Candidate, context: &SearchContext) -> Result<bool> {
        Ok(self.evaluate(candidate, context)?.is_accepted())
    }
}
