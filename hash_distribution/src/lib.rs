#![deny(clippy::disallowed_methods)]

use std::num::NonZeroUsize;

use itertools::Itertools;


/// Counts how many `items` land in each of `containers` buckets under
/// `hash_fn`. Buckets nothing hashes to are reported as zero.
pub fn distribute<I, F>(items: I, containers: NonZeroUsize, hash_fn: F) -> Vec<usize>
where
    I: IntoIterator,
    F: Fn(&I::Item) -> u64,
{
    let mut counts = vec![0; containers.get()];
    let modulus = containers.get() as u64;
    for item in items {
        counts[(hash_fn(&item) % modulus) as usize] += 1;
    }
    counts
}

// one bar per bucket, padded so the counts line up
pub fn plot(counts: &[usize]) -> String {
    let longest = counts.iter().copied().max().unwrap_or(0);
    counts
        .iter()
        .enumerate()
        .map(|(bucket, &count)| {
            format!(
                "{:>3} {}{} ({})",
                bucket,
                "■".repeat(count),
                " ".repeat(longest - count),
                count
            )
        })
        .join("\n")
}
