use std::path::PathBuf;

use rand::Rng;

use crate::foundation::error::{GazerError, GazerResult};

/// Split of a wallpaper set into images that get the chart and images copied untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    pub overlay: Vec<PathBuf>,
    pub passthrough: Vec<PathBuf>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.overlay.len() + self.passthrough.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn validate_frequency(frequency_percent: f64) -> GazerResult<()> {
    if !(0.0..=100.0).contains(&frequency_percent) {
        return Err(GazerError::config(format!(
            "appearance frequency must be within 0..=100, got {frequency_percent}"
        )));
    }
    Ok(())
}

/// `floor(frequency_percent / 100 * total)`, computed so that 100% of `n` is exactly `n`.
pub fn overlay_count(total: usize, frequency_percent: f64) -> usize {
    let n = (frequency_percent * total as f64 / 100.0).floor();
    (n.max(0.0) as usize).min(total)
}

/// Pick a uniformly random subset of `files`, without replacement, to receive the overlay.
///
/// Input order does not matter: the set is sorted and de-duplicated first, so the same seed
/// always picks the same files. Both halves of the result keep that sorted order.
pub fn select<R: Rng + ?Sized>(
    files: &[PathBuf],
    frequency_percent: f64,
    rng: &mut R,
) -> GazerResult<Partition> {
    validate_frequency(frequency_percent)?;

    let mut files = files.to_vec();
    files.sort();
    files.dedup();

    let amount = overlay_count(files.len(), frequency_percent);
    let mut chosen = vec![false; files.len()];
    for i in rand::seq::index::sample(rng, files.len(), amount) {
        chosen[i] = true;
    }

    let mut partition = Partition::default();
    for (path, pick) in files.into_iter().zip(chosen) {
        if pick {
            partition.overlay.push(path);
        } else {
            partition.passthrough.push(path);
        }
    }
    Ok(partition)
}

#[cfg(test)]
#[path = "../../tests/unit/batch/select.rs"]
mod tests;
