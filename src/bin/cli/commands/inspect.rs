use std::path::Path;

use anyhow::{Context, Result};

use vocab_deck_lib::deck::template::FIELD_NAMES;
use vocab_deck_lib::package::read_package;

use crate::render::terminal::Color;
use crate::OutputFormat;

pub fn run(package: &Path, format: &OutputFormat, use_color: bool) -> Result<()> {
    let summary = read_package(package)
        .with_context(|| format!("Failed to read {}", package.display()))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Plain => {
            let title = format!(
                "{} ({})",
                summary.deck_names.join(", "),
                summary.model_names.join(", ")
            );
            if use_color {
                println!("{}{}{}", Color::BOLD, title, Color::RESET);
            } else {
                println!("{}", title);
            }
            println!(
                "{} notes, {} cards, {} media files",
                summary.notes.len(),
                summary.card_count,
                summary.media.len()
            );

            for note in &summary.notes {
                println!();
                for (name, value) in FIELD_NAMES.iter().zip(&note.fields) {
                    if use_color {
                        println!("  {}{:<14}{} {}", Color::DIM, name, Color::RESET, value);
                    } else {
                        println!("  {:<14} {}", name, value);
                    }
                }
                if !note.tags.is_empty() {
                    println!("  {:<14} {}", "Tags", note.tags.join(" "));
                }
            }
        }
    }

    Ok(())
}
