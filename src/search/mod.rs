//! Search strategies: scan a prebuilt index or walk the tree live.

pub mod indexed;
pub mod live;

pub use indexed::IndexedSearch;
pub use live::LiveSearch;

use crate::error::{Result, SearchError};
use crate::index::build::index_exists;
use crate::matcher::{MatcherChain, SearchConfig, SearchTerms};
use crate::output::OutputSink;

/// What one search run produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSummary {
    pub candidates: usize,
    pub matches: usize,
}

pub trait SearchStrategy {
    fn name(&self) -> &'static str;

    fn search(
        &self,
        terms: &SearchTerms,
        chain: &MatcherChain,
        sink: &mut dyn OutputSink,
    ) -> Result<SearchSummary>;
}

/// Indexed search when an index file is present, live walk otherwise
pub fn select_strategy(config: &SearchConfig) -> Box<dyn SearchStrategy> {
    if index_exists(&config.index_path) {
        Box::new(IndexedSearch::new(config.clone()))
    } else {
        Box::new(LiveSearch::new(config.clone()))
    }
}

pub(crate) fn report(sink: &mut dyn OutputSink, message: &str) -> Result<()> {
    sink.status(message)
        .map_err(|e| SearchError::io("<output>", e))
}

/// Run a search end to end with the standard matcher chain
pub fn find(
    config: &SearchConfig,
    terms: &SearchTerms,
    sink: &mut dyn OutputSink,
) -> Result<SearchSummary> {
    if terms.is_empty() {
        return Err(SearchError::MissingTerms);
    }

    if !config.brief {
        report(
            sink,
            &format!(
                "Performing 'find' in dir [{}] for terms [{}]",
                config.root_dir.display(),
                terms.all_terms().join(", ")
            ),
        )?;
    }

    let strategy = select_strategy(config);
    tracing::info!("using {} search", strategy.name());

    let chain = MatcherChain::standard(config);
    let summary = strategy.search(terms, &chain, sink)?;
    tracing::debug!(
        "{} of {} candidates matched",
        summary.matches,
        summary.candidates
    );
    Ok(summary)
}
