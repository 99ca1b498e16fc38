use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::deck::Deck;

pub fn run(file: &Path) -> Result<()> {
    let deck = Deck::load(file).with_context(|| format!("{} is not a valid deck", file.display()))?;

    let charts: usize = deck
        .slides
        .iter()
        .map(|s| s.blocks().filter(|b| b.is_chart()).count())
        .sum();
    println!(
        "{} {}: {} slides, {} charts",
        "✓".green().bold(),
        file.display(),
        deck.slide_count(),
        charts
    );
    if let Some((slide, items)) = deck.carousel() {
        println!(
            "  {}",
            format!(
                "feature carousel on slide {} ({items} items)",
                slide + 1
            )
            .dimmed()
        );
    }
    Ok(())
}
