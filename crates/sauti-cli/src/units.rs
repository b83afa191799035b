//! Units files: per-stream space-separated code strings.
//!
//! The exchange shape is a JSON object keyed by stream role, each value a
//! space-separated run of frame-level codes:
//! `{"content": "99 49 38 149", "pitch": "39 57", "style": "71"}`.
//! `hubert` is accepted as an input alias for `content`.

use std::collections::BTreeMap;

use sauti_core::{StreamBuffer, StreamRole};

use crate::error::{CliError, Result};

pub type UnitsMap = BTreeMap<StreamRole, String>;

pub fn to_streams(units: &UnitsMap) -> Result<Vec<StreamBuffer>> {
    units
        .iter()
        .map(|(role, line)| {
            let codes = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<u32>().map_err(|_| {
                        CliError::InvalidInput(format!(
                            "stream '{role}': code '{token}' is not a non-negative integer"
                        ))
                    })
                })
                .collect::<Result<Vec<u32>>>()?;
            Ok(StreamBuffer::new(*role, codes))
        })
        .collect()
}

pub fn from_streams(streams: &[StreamBuffer]) -> UnitsMap {
    streams
        .iter()
        .map(|stream| {
            let line = stream
                .codes
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            (stream.role, line)
        })
        .collect()
}
