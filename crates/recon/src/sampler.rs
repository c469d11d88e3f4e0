//! Stratified sampling with a random top-up.
//!
//! Each class contributes up to `target / 3` posts. When a class is too
//! small to fill its share, the shortfall is drawn from every post not yet
//! taken, until `target` is reached or the corpus runs out.

use std::collections::HashSet;

use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::ValidationError;
use crate::label::Sentiment;
use crate::model::{Post, SampleRecord};

/// Seeded entry point. The same corpus, target and seed always yield the
/// same rows in the same order.
pub fn create_sample(
    corpus: &[Post],
    target: usize,
    seed: u64,
) -> Result<Vec<SampleRecord>, ValidationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    stratified_sample(corpus, target, &mut rng)
}

/// Draw a stratified sample using the caller's generator.
pub fn stratified_sample<R: Rng + ?Sized>(
    corpus: &[Post],
    target: usize,
    rng: &mut R,
) -> Result<Vec<SampleRecord>, ValidationError> {
    if corpus.is_empty() {
        return Err(ValidationError::InsufficientData(
            "corpus is empty, nothing to sample".into(),
        ));
    }
    if target == 0 {
        return Err(ValidationError::InvalidSampleSize(target));
    }

    // First occurrence of each id; later duplicates are never drawn.
    let mut seen: HashSet<&str> = HashSet::new();
    let candidates: Vec<usize> = (0..corpus.len())
        .filter(|&i| seen.insert(corpus[i].id.as_str()))
        .collect();
    if candidates.len() < corpus.len() {
        log::warn!(
            "{} posts share an id with an earlier post and are ignored",
            corpus.len() - candidates.len()
        );
    }

    let per_class = target / Sentiment::ALL.len();
    let mut picked: Vec<usize> = Vec::with_capacity(target.min(candidates.len()));

    for class in Sentiment::ALL {
        let members: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&i| corpus[i].sentiment == class)
            .collect();
        let take = members.len().min(per_class);
        let chosen = index::sample(rng, members.len(), take);
        picked.extend(chosen.iter().map(|i| members[i]));

        log::debug!("stratum {class}: {take} of {} drawn", members.len());
    }

    if picked.len() < target {
        let taken: HashSet<usize> = picked.iter().copied().collect();
        let remaining: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|i| !taken.contains(i))
            .collect();

        let shortfall = (target - picked.len()).min(remaining.len());
        let extra = index::sample(rng, remaining.len(), shortfall);
        picked.extend(extra.iter().map(|i| remaining[i]));

        log::debug!("top-up: {shortfall} of {} remaining drawn", remaining.len());
    }

    Ok(picked.into_iter().map(|i| SampleRecord::from_post(&corpus[i])).collect())
}

/// Count of sample rows per automated label, in alphabet order.
pub fn distribution(sample: &[SampleRecord]) -> Vec<(Sentiment, usize)> {
    Sentiment::ALL
        .iter()
        .map(|&label| {
            let count = sample
                .iter()
                .filter(|r| Sentiment::parse_label(&r.automated) == Some(label))
                .count();
            (label, count)
        })
        .collect()
}
