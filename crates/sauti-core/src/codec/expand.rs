//! Decode-side reconstruction: onset attribution and frame expansion.
//!
//! The wire format keeps segment codes and interleaving order but drops run
//! lengths, so expansion is a faithful resampling: segment boundaries are
//! placed consistently with the observed ordering, while within-run frame
//! counts are reconstructed, not recovered.

use super::align::ceil_frames;

/// Distribute `count` parsed primary events over `total_frames` frames.
///
/// Onset `i` lands at `floor(i * total / count)`, so spans differ by at most
/// one frame and the first onset is always 0. `total_frames` must be at
/// least `count` (the caller raises it beforehand).
pub(crate) fn primary_onsets(count: usize, total_frames: usize) -> Vec<usize> {
    (0..count).map(|i| i * total_frames / count).collect()
}

/// Convert attributed primary-timeline onsets back to a stream's native
/// frame indices.
///
/// `ceil(onset / ratio)` inverts the encode-side floor mapping exactly for
/// ratios >= 1; equal attributions (several events in one primary gap) are
/// bumped minimally so onsets stay strictly increasing.
pub(crate) fn native_onsets(attributed: &[usize], ratio: f64) -> Vec<usize> {
    let mut onsets = Vec::with_capacity(attributed.len());
    let mut previous: Option<usize> = None;
    for &primary in attributed {
        let mut frame = ceil_frames(primary as f64 / ratio);
        if let Some(prev) = previous {
            frame = frame.max(prev + 1);
        }
        previous = Some(frame);
        onsets.push(frame);
    }
    onsets
}

/// Expand `(code, onset)` spans into a frame-level sequence.
///
/// Span `i` covers `[onset_i, onset_{i+1})`; the first span is anchored at
/// frame 0 and the last extends to `total_frames` (raised if an onset would
/// overflow it). Onsets must be strictly increasing. No events means an
/// empty stream regardless of `total_frames`.
pub(crate) fn expand_spans(spans: &[(u32, usize)], total_frames: usize) -> Vec<u32> {
    let Some(&(_, last_onset)) = spans.last() else {
        return Vec::new();
    };
    let total = total_frames.max(last_onset + 1);

    let mut frames = Vec::with_capacity(total);
    for (i, &(code, _)) in spans.iter().enumerate() {
        let end = spans.get(i + 1).map_or(total, |&(_, onset)| onset);
        while frames.len() < end {
            frames.push(code);
        }
    }
    frames
}
