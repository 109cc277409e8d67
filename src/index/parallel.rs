//! Concurrent passes over distinct indexes.
//!
//! Passes on different namespaces touch disjoint keys and may run side by
//! side. Two passes on the same namespace would race on its cursor, so a job
//! list naming a key twice is rejected before anything runs.

use std::collections::HashSet;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{ArgentError, Result};
use crate::index::indexer::{Indexer, PassReport};
use crate::record::FieldAccessor;
use crate::source::RecordSource;

/// One runnable indexing pass.
pub trait IndexPass: Send + Sync {
    /// Namespace the pass writes to.
    fn key(&self) -> &str;

    /// Run the pass.
    fn run(&self) -> Result<PassReport>;
}

/// An indexer paired with the accessor its passes use.
pub struct IndexJob<S: RecordSource, A> {
    indexer: Indexer<S>,
    accessor: A,
}

impl<S: RecordSource, A: FieldAccessor<S::Record>> IndexJob<S, A> {
    pub fn new(indexer: Indexer<S>, accessor: A) -> Self {
        IndexJob { indexer, accessor }
    }

    pub fn indexer(&self) -> &Indexer<S> {
        &self.indexer
    }
}

impl<S, A> IndexPass for IndexJob<S, A>
where
    S: RecordSource + Send + Sync,
    A: FieldAccessor<S::Record> + Send + Sync,
{
    fn key(&self) -> &str {
        self.indexer.key()
    }

    fn run(&self) -> Result<PassReport> {
        self.indexer.run_pass_report(&self.accessor)
    }
}

/// Result of one job of a parallel run.
#[derive(Debug)]
pub struct JobResult {
    pub key: String,
    pub result: Result<PassReport>,
}

/// Runs passes on a dedicated thread pool.
pub struct ParallelIndexer {
    thread_pool: ThreadPool,
}

impl ParallelIndexer {
    /// Create a runner. `None` lets rayon pick the number of threads.
    pub fn new(num_threads: Option<usize>) -> Result<Self> {
        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("argent-index-{i}"));
        if let Some(num_threads) = num_threads {
            builder = builder.num_threads(num_threads);
        }

        let thread_pool = builder.build().map_err(|e| {
            ArgentError::other(format!("Failed to create thread pool: {e}"))
        })?;

        Ok(ParallelIndexer { thread_pool })
    }

    pub fn num_threads(&self) -> usize {
        self.thread_pool.current_num_threads()
    }

    /// Run every job once, concurrently. Results come back in job order.
    pub fn run(&self, jobs: &[Box<dyn IndexPass>]) -> Result<Vec<JobResult>> {
        check_distinct_keys(jobs)?;
        Ok(self.thread_pool.install(|| run_jobs(jobs)))
    }
}

/// Run every job once on the global rayon pool. Results come back in job
/// order; one failing job does not stop the others.
pub fn run_parallel(jobs: &[Box<dyn IndexPass>]) -> Result<Vec<JobResult>> {
    check_distinct_keys(jobs)?;
    Ok(run_jobs(jobs))
}

fn run_jobs(jobs: &[Box<dyn IndexPass>]) -> Vec<JobResult> {
    jobs.par_iter()
        .map(|job| {
            let result = job.run();
            if let Err(e) = &result {
                log::error!("Pass on {} failed: {e}", job.key());
            }
            JobResult {
                key: job.key().to_string(),
                result,
            }
        })
        .collect()
}

fn check_distinct_keys(jobs: &[Box<dyn IndexPass>]) -> Result<()> {
    let mut seen = HashSet::new();
    for job in jobs {
        if !seen.insert(job.key()) {
            return Err(ArgentError::invalid_operation(format!(
                "Two passes on index {} cannot run concurrently",
                job.key()
            )));
        }
    }
    Ok(())
}
