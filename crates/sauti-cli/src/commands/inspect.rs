use std::path::PathBuf;

use comfy_table::{Cell, CellAlignment, Color, Table};
use sauti_core::SpeechTokenCodec;

use crate::config::{self, Mode};
use crate::error::Result;
use crate::style::Theme;
use crate::utils;
use crate::OutputFormat;

pub struct InspectArgs {
    pub input: PathBuf,
    pub mode: Mode,
    pub layout: Option<PathBuf>,
    pub format: OutputFormat,
}

pub fn execute(args: InspectArgs, theme: &Theme) -> Result<()> {
    let codec = SpeechTokenCodec::new(config::resolve(args.mode, args.layout.as_deref())?)?;

    let raw = utils::read_input(&args.input)?;
    let tokens = codec.parse(raw.trim_end())?;

    let rows: Vec<(String, String, usize)> = codec
        .config()
        .streams
        .iter()
        .map(|spec| {
            let count = tokens.iter().filter(|t| t.role == spec.role).count();
            (spec.role.to_string(), spec.prefix.clone(), count)
        })
        .collect();

    match args.format {
        OutputFormat::Json => {
            let payload: Vec<serde_json::Value> = rows
                .iter()
                .map(|(role, prefix, count)| {
                    serde_json::json!({ "role": role, "prefix": prefix, "tokens": count })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Plain => {
            for (role, _, count) in &rows {
                println!("{role} {count}");
            }
        }
        OutputFormat::Table => {
            print_stream_table(&rows, tokens.len());
            theme.info(&format!("{} tokens total", tokens.len()));
        }
    }

    Ok(())
}

fn print_stream_table(rows: &[(String, String, usize)], total: usize) {
    let mut table = Table::new();
    table.set_header(vec!["Stream", "Prefix", "Tokens", "Share"]);

    for (role, prefix, count) in rows {
        let share = if total == 0 {
            "-".to_string()
        } else {
            format!("{:.1}%", *count as f64 * 100.0 / total as f64)
        };
        table.add_row(vec![
            Cell::new(role).fg(Color::Cyan),
            Cell::new(prefix),
            Cell::new(count).set_alignment(CellAlignment::Right),
            Cell::new(share).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{table}");
}
