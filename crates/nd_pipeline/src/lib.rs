//! The two periodic schedulers driving the pipeline: fetch-and-merge and
//! summarize-one. Each runs on its own fixed interval with an immediate
//! first tick, and every failure stays inside the cycle that produced it.

pub mod ingest;
pub mod summarize;

pub use ingest::{IngestOutcome, IngestScheduler, DEFAULT_FETCH_INTERVAL};
pub use summarize::{SummarizeOutcome, SummarizeScheduler, DEFAULT_SUMMARIZE_INTERVAL};
