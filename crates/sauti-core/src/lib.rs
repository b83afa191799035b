//! Multi-stream discrete token codec for speech unit streams.
//!
//! Feature extractors emit parallel streams of discrete codes at different
//! native frame rates: phonetic content units, pitch units, and coarse style
//! units. This crate folds those streams into a single ordered, bracket-tagged
//! token string (`[St8][Pi3][Hu5]...`) suitable for conditioning a language
//! model, and unfolds such a string back into per-stream frame-level code
//! sequences for a downstream synthesizer.
//!
//! The transform is pure and synchronous: a [`SpeechTokenCodec`] is built once
//! from a validated [`CodecConfig`] and can then be shared freely across
//! threads; encode and decode calls on independent utterances need no
//! coordination.

#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod error;

pub use codec::{Event, Segment, SpeechTokenCodec, StreamBuffer, Token};
pub use config::{CodecConfig, StreamRole, StreamSpec};
pub use error::{Error, Result};
