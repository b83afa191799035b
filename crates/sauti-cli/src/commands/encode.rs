use std::path::PathBuf;

use sauti_core::SpeechTokenCodec;

use crate::config::{self, Mode};
use crate::error::Result;
use crate::style::Theme;
use crate::units::{self, UnitsMap};
use crate::utils;

pub struct EncodeArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub mode: Mode,
    pub layout: Option<PathBuf>,
}

pub fn execute(args: EncodeArgs, theme: &Theme) -> Result<()> {
    let codec = SpeechTokenCodec::new(config::resolve(args.mode, args.layout.as_deref())?)?;

    let raw = utils::read_input(&args.input)?;
    let units: UnitsMap = serde_json::from_str(&raw)?;
    let streams = units::to_streams(&units)?;

    let events = codec.encode_events(&streams)?;
    let encoded = codec.render(&events)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &encoded)?;
            theme.success(&format!(
                "Encoded {} events from {} streams to {}",
                events.len(),
                streams.len(),
                path.display()
            ));
        }
        None => println!("{encoded}"),
    }

    Ok(())
}
