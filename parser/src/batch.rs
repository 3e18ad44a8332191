//! Parallel parsing of independent listings.
//!
//! Each parse owns its own state and touches nothing shared, so a batch of
//! listings fans out across a thread pool with no locking. Results come
//! back in input order.

use rayon::prelude::*;

use ljob_core::ParseError;

use crate::{ParsedListing, parse_listing};

/// Parses every listing in parallel, one result per input in input order.
///
/// # Examples
///
/// ```
/// use ljob_parser::batch::parse_listings;
///
/// let listings = [
///     "------ PROSE ------\nFIRST JOB DOCUMENTATION.",
///     "------ PROSE ------\nSECOND JOB DOCUMENTATION.",
/// ];
/// let results = parse_listings(&listings);
/// assert_eq!(results.len(), 2);
/// assert_eq!(
///     results[0].as_ref().unwrap().store.get("PROSE"),
///     Some("FIRST JOB DOCUMENTATION.")
/// );
/// ```
pub fn parse_listings<S>(listings: &[S]) -> Vec<Result<ParsedListing, ParseError>>
where
    S: AsRef<str> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(default_parallel_jobs(listings.len()))
        .build()
        .expect("failed to build rayon thread pool");

    pool.install(|| {
        listings
            .par_iter()
            .map(|listing| parse_listing(listing.as_ref()))
            .collect()
    })
}

/// Pool size capped by the host and the amount of work.
fn default_parallel_jobs(listing_count: usize) -> usize {
    let cpu_count = std::thread::available_parallelism()
        .map(|parallelism| parallelism.get())
        .unwrap_or(4);
    cpu_count.clamp(1, 8).min(listing_count.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_matches_serial_results() {
        let listings = [
            "--------------------------- JOB INFORMATION ---------------------------\n. MSGCLASS=B",
            "",
            "------------------------- AGENT INFORMATION  -------------------------\nAgent   : USER023ESP",
        ];
        let parallel = parse_listings(&listings);
        let serial: Vec<_> = listings.iter().map(|listing| parse_listing(listing)).collect();
        assert_eq!(parallel, serial);
        assert!(parallel[1].is_err());
    }

    #[test]
    fn test_jobs_never_exceed_work_or_vanish() {
        assert_eq!(default_parallel_jobs(0), 1);
        assert_eq!(default_parallel_jobs(1), 1);
        assert!(default_parallel_jobs(100) >= 1);
        assert!(default_parallel_jobs(100) <= 8);
    }
}
