//! Run statistics
//!
//! Counters collected while a harvest or a replay runs, and their console
//! rendering.

/// Harvest run statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Languages in the crawl index
    pub languages_indexed: usize,

    /// ISO languages without a languoid match
    pub unclassified: usize,

    /// Languages whose resources were fetched this run
    pub processed: usize,

    /// Languages skipped because today's snapshot already exists
    pub already_processed: usize,

    /// Crawled codes missing from the ISO list
    pub unresolved: Vec<String>,

    /// Detail pages that could not be fetched
    pub unreachable_pages: usize,

    /// Submissions answered with 200
    pub submitted: usize,

    /// Submissions answered with another status
    pub rejected: usize,

    /// Submissions that failed in transport
    pub submission_errors: usize,
}

/// Replay statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayStatistics {
    /// Snapshot files found
    pub files: usize,

    /// Files that were not a JSON object
    pub malformed: usize,

    /// Submissions answered with 200
    pub submitted: usize,

    /// Submissions answered with another status
    pub rejected: usize,

    /// Submissions that failed in transport
    pub submission_errors: usize,

    /// Pacing pauses taken
    pub pauses: usize,
}

/// Prints harvest statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Catalog:");
    println!("  Languages indexed: {}", stats.languages_indexed);
    println!("  Without languoid match: {}", stats.unclassified);
    println!();

    println!("Languages:");
    println!("  Processed: {}", stats.processed);
    println!("  Already processed today: {}", stats.already_processed);
    println!("  Unreachable detail pages: {}", stats.unreachable_pages);
    println!();

    println!("Submissions:");
    println!("  Accepted: {}", stats.submitted);
    println!("  Rejected: {}", stats.rejected);
    println!("  Failed: {}", stats.submission_errors);
    println!();

    if !stats.unresolved.is_empty() {
        println!(
            "Unresolved Language Codes ({}):",
            stats.unresolved.len()
        );
        for code in &stats.unresolved {
            println!("  - {}", code);
        }
        println!();
    }
}

/// Prints replay statistics to stdout
pub fn print_replay_statistics(stats: &ReplayStatistics) {
    println!("=== Replay Statistics ===\n");
    println!("  Files: {}", stats.files);
    println!("  Malformed: {}", stats.malformed);
    println!("  Accepted: {}", stats.submitted);
    println!("  Rejected: {}", stats.rejected);
    println!("  Failed: {}", stats.submission_errors);
    println!("  Pauses: {}", stats.pauses);
}
