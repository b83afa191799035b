use std::path::PathBuf;

use sauti_core::SpeechTokenCodec;

use crate::config::{self, Mode};
use crate::error::Result;
use crate::style::Theme;
use crate::units;
use crate::utils;

pub struct DecodeArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub mode: Mode,
    pub layout: Option<PathBuf>,
    /// Primary-stream frame count the synthesizer expects; defaults to one
    /// frame per primary token.
    pub frames: Option<usize>,
}

pub fn execute(args: DecodeArgs, theme: &Theme) -> Result<()> {
    let codec = SpeechTokenCodec::new(config::resolve(args.mode, args.layout.as_deref())?)?;

    let raw = utils::read_input(&args.input)?;
    let streams = codec.decode(raw.trim_end(), args.frames)?;
    let units = units::from_streams(&streams);
    let rendered = serde_json::to_string_pretty(&units)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &rendered)?;
            let frames: usize = streams.iter().map(|s| s.len()).sum();
            theme.success(&format!(
                "Decoded {} frames across {} streams to {}",
                frames,
                streams.len(),
                path.display()
            ));
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
