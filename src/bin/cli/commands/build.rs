use anyhow::{Context, Result};

use vocab_deck_lib::package::ApkgWriter;
use vocab_deck_lib::pipeline;

use crate::app::App;
use crate::render::terminal::Color;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let config = &app.config;
    let writer = ApkgWriter::new().allow_missing_media(config.allow_missing_media);

    let summary = pipeline::run(config, &writer).with_context(|| {
        format!(
            "Failed to build {} from {}",
            config.output.display(),
            config.input.display()
        )
    })?;

    match format {
        OutputFormat::Json => {
            let media: Vec<String> = summary
                .manifest
                .paths()
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect();
            let output = serde_json::json!({
                "output": summary.output.to_string_lossy(),
                "deckName": config.identity.deck_name,
                "noteCount": summary.note_count,
                "mediaFiles": media,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let headline = format!(
                "Generated {} ({} notes, deck \"{}\")",
                summary.output.display(),
                summary.note_count,
                config.identity.deck_name
            );
            if use_color {
                println!("{}{}{}", Color::GREEN, headline, Color::RESET);
            } else {
                println!("{}", headline);
            }

            for path in summary.manifest.paths() {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
