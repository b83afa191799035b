//! Run-length deduplication of raw code streams.

use serde::{Deserialize, Serialize};

use crate::config::StreamRole;

/// One stream's raw codes for a single utterance, in frame order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamBuffer {
    pub role: StreamRole,
    pub codes: Vec<u32>,
}

impl StreamBuffer {
    pub fn new(role: StreamRole, codes: Vec<u32>) -> Self {
        Self { role, codes }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Collapse consecutive repeats into maximal segments.
    ///
    /// Segments are contiguous, non-overlapping, and adjacent segments never
    /// share a code; replaying each code `run_length` times reproduces the
    /// buffer exactly. Codes compare by value only.
    pub fn deduplicate(&self) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut codes = self.codes.iter().copied().enumerate();
        let Some((_, mut current)) = codes.next() else {
            return segments;
        };
        let mut start = 0usize;

        for (frame, code) in codes {
            if code != current {
                segments.push(Segment {
                    role: self.role,
                    code: current,
                    start_frame: start,
                    run_length: frame - start,
                });
                current = code;
                start = frame;
            }
        }
        segments.push(Segment {
            role: self.role,
            code: current,
            start_frame: start,
            run_length: self.codes.len() - start,
        });

        segments
    }
}

/// A maximal run of one repeated code within a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub role: StreamRole,
    pub code: u32,
    /// Onset in the stream's own frame units.
    pub start_frame: usize,
    pub run_length: usize,
}
