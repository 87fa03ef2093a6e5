//! Parallel splicing across independent documents.

use super::{SpliceEngine, SpliceReport};
use crate::error::Result;
use crate::model::Document;
use rayon::prelude::*;

/// Run `engine` against every document in parallel.
///
/// Documents share no state, so each one is spliced on its own worker;
/// results come back in input order.
pub fn splice_batch(
    engine: &SpliceEngine,
    documents: &mut [Document],
) -> Vec<Result<SpliceReport>> {
    log::debug!("Splicing {} documents in parallel", documents.len());
    documents
        .par_iter_mut()
        .map(|doc| engine.run(doc))
        .collect()
}
