use super::{SearchStrategy, SearchSummary};
use crate::error::{Result, SearchError};
use crate::matcher::{Candidate, MatcherChain, SearchConfig, SearchTerms};
use crate::output::OutputSink;
use crate::utils::progress::walk_spinner;
use crate::utils::walk_tree;

/// Walks the tree and evaluates every entry as it is found
pub struct LiveSearch {
    config: SearchConfig,
}

impl LiveSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

impl SearchStrategy for LiveSearch {
    fn name(&self) -> &'static str {
        "live"
    }

    fn search(
        &self,
        terms: &SearchTerms,
        chain: &MatcherChain,
        sink: &mut dyn OutputSink,
    ) -> Result<SearchSummary> {
        let context = chain.prepare(terms);
        let root = &self.config.root_dir;
        let spinner = walk_spinner(self.config.brief, "Searching...");
        let mut summary = SearchSummary::default();

        walk_tree(root, |path, is_dir| {
            summary.candidates += 1;
            if let Some(ref sp) = spinner {
                sp.inc(1);
            }

            let candidate = Candidate::live(path, is_dir, root);
            if chain.is_match(&candidate, &context)? {
                summary.matches += 1;
                let written = match &spinner {
                    Some(sp) => sp.suspend(|| sink.found(path)),
                    None => sink.found(path),
                };
                written.map_err(|e| SearchError::io("<output>", e))?;
            }
            Ok(())
        })?;

        if let Some(sp) = spinner {
            sp.finish_and_clear();
        }
        Ok(summary)
    }
}
