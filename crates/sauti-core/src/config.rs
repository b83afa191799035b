//! Stream table configuration.
//!
//! The prefix table, frame durations, and tie-break priority order are part of
//! the wire contract: a sequence produced under one table is only meaningful
//! to consumers holding the same table, so configs are plain serde values that
//! can be versioned alongside a consuming model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Closed set of stream roles the codec understands.
///
/// `Content` is the primary stream by convention: the reference timeline all
/// other streams are aligned onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamRole {
    /// Phonetic/content units.
    #[serde(alias = "hubert")]
    Content,
    /// Prosody/pitch units.
    Pitch,
    /// Coarse style/expressivity units.
    Style,
}

impl StreamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamRole::Content => "content",
            StreamRole::Pitch => "pitch",
            StreamRole::Style => "style",
        }
    }
}

impl fmt::Display for StreamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stream's entry in the codec table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSpec {
    pub role: StreamRole,
    /// Short stable token prefix, e.g. "Hu". ASCII alphabetic so the rendered
    /// `<prefix><code>` body parses unambiguously.
    pub prefix: String,
    /// Seconds of audio covered by one code at the stream's native rate.
    pub frame_duration: f64,
}

impl StreamSpec {
    pub fn new(role: StreamRole, prefix: impl Into<String>, frame_duration: f64) -> Self {
        Self {
            role,
            prefix: prefix.into(),
            frame_duration,
        }
    }
}

/// Stream table plus token delimiters.
///
/// The declared order of `streams` is the tie-break priority order: when two
/// streams produce an event on the same primary frame, the one listed earlier
/// is rendered first. Conventionally coarse streams come before fine streams
/// before the primary stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodecConfig {
    pub streams: Vec<StreamSpec>,

    /// Role providing the reference timeline.
    #[serde(default = "default_primary")]
    pub primary: StreamRole,

    #[serde(default = "default_open_delimiter")]
    pub open_delimiter: char,

    #[serde(default = "default_close_delimiter")]
    pub close_delimiter: char,
}

fn default_primary() -> StreamRole {
    StreamRole::Content
}

fn default_open_delimiter() -> char {
    '['
}

fn default_close_delimiter() -> char {
    ']'
}

impl CodecConfig {
    /// Content-only table: 25 Hz phonetic units.
    pub fn base() -> Self {
        Self {
            streams: vec![StreamSpec::new(StreamRole::Content, "Hu", 0.04)],
            primary: default_primary(),
            open_delimiter: default_open_delimiter(),
            close_delimiter: default_close_delimiter(),
        }
    }

    /// Expressive table: 1 Hz style, 12.5 Hz pitch, 25 Hz content.
    pub fn expressive() -> Self {
        Self {
            streams: vec![
                StreamSpec::new(StreamRole::Style, "St", 1.0),
                StreamSpec::new(StreamRole::Pitch, "Pi", 0.08),
                StreamSpec::new(StreamRole::Content, "Hu", 0.04),
            ],
            primary: default_primary(),
            open_delimiter: default_open_delimiter(),
            close_delimiter: default_close_delimiter(),
        }
    }

    pub fn spec(&self, role: StreamRole) -> Option<&StreamSpec> {
        self.streams.iter().find(|s| s.role == role)
    }

    /// Check the table without compiling it.
    pub fn validate(&self) -> Result<()> {
        StreamTable::compile(self).map(|_| ())
    }
}

/// Immutable lookup tables compiled from a validated [`CodecConfig`].
///
/// Entries keep the config's declared order, so an entry's index doubles as
/// its tie-break priority.
#[derive(Debug, Clone)]
pub(crate) struct StreamTable {
    entries: Vec<TableEntry>,
    primary_index: usize,
    open_delimiter: char,
    close_delimiter: char,
}

#[derive(Debug, Clone)]
pub(crate) struct TableEntry {
    pub(crate) role: StreamRole,
    pub(crate) prefix: String,
    /// Native frame duration over the primary stream's frame duration.
    pub(crate) ratio: f64,
}

impl StreamTable {
    pub(crate) fn compile(config: &CodecConfig) -> Result<Self> {
        if config.streams.is_empty() {
            return Err(Error::Configuration(
                "stream table must declare at least one stream".to_string(),
            ));
        }
        if config.open_delimiter == config.close_delimiter {
            return Err(Error::Configuration(format!(
                "open and close delimiters must differ, both are '{}'",
                config.open_delimiter
            )));
        }
        for delimiter in [config.open_delimiter, config.close_delimiter] {
            if delimiter.is_alphanumeric() {
                return Err(Error::Configuration(format!(
                    "delimiter '{delimiter}' would be ambiguous with token bodies"
                )));
            }
        }

        let primary = config.spec(config.primary).ok_or_else(|| {
            Error::Configuration(format!(
                "primary stream '{}' is missing from the stream table",
                config.primary
            ))
        })?;
        check_duration(primary)?;

        let mut entries = Vec::with_capacity(config.streams.len());
        for spec in &config.streams {
            check_duration(spec)?;
            if spec.prefix.is_empty() || !spec.prefix.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(Error::Configuration(format!(
                    "stream '{}' prefix '{}' must be non-empty ASCII alphabetic",
                    spec.role, spec.prefix
                )));
            }
            if entries.iter().any(|e: &TableEntry| e.role == spec.role) {
                return Err(Error::Configuration(format!(
                    "stream '{}' is declared twice",
                    spec.role
                )));
            }
            if entries.iter().any(|e: &TableEntry| e.prefix == spec.prefix) {
                return Err(Error::Configuration(format!(
                    "prefix '{}' is declared twice",
                    spec.prefix
                )));
            }

            let ratio = spec.frame_duration / primary.frame_duration;
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(Error::Configuration(format!(
                    "stream '{}' rate ratio {ratio} is not positive",
                    spec.role
                )));
            }
            entries.push(TableEntry {
                role: spec.role,
                prefix: spec.prefix.clone(),
                ratio,
            });
        }

        let primary_index = entries
            .iter()
            .position(|e| e.role == config.primary)
            .expect("primary presence checked above");

        Ok(Self {
            entries,
            primary_index,
            open_delimiter: config.open_delimiter,
            close_delimiter: config.close_delimiter,
        })
    }

    pub(crate) fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub(crate) fn primary_role(&self) -> StreamRole {
        self.entries[self.primary_index].role
    }

    pub(crate) fn entry(&self, role: StreamRole) -> Option<&TableEntry> {
        self.entries.iter().find(|e| e.role == role)
    }

    pub(crate) fn role_for_prefix(&self, prefix: &str) -> Option<StreamRole> {
        self.entries
            .iter()
            .find(|e| e.prefix == prefix)
            .map(|e| e.role)
    }

    pub(crate) fn open_delimiter(&self) -> char {
        self.open_delimiter
    }

    pub(crate) fn close_delimiter(&self) -> char {
        self.close_delimiter
    }
}

fn check_duration(spec: &StreamSpec) -> Result<()> {
    if !spec.frame_duration.is_finite() || spec.frame_duration <= 0.0 {
        return Err(Error::Configuration(format!(
            "stream '{}' frame duration {} is not positive",
            spec.role, spec.frame_duration
        )));
    }
    Ok(())
}
