use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::deck::{Deck, Slide};

fn kind_name(slide: &Slide) -> String {
    format!("{:?}", slide.kind).to_lowercase()
}

/// `NN  Title` lines, as shown in the index overlay.
pub fn index_lines(deck: &Deck) -> Vec<String> {
    let width = deck.slide_count().to_string().len().max(2);
    deck.slides
        .iter()
        .enumerate()
        .map(|(i, slide)| format!("{:0width$}  {}", i + 1, slide.display_title()))
        .collect()
}

pub fn run(deck: Option<&Path>) -> Result<()> {
    let deck = Deck::load_or_builtin(deck).context("Failed to load deck")?;

    println!("{}", deck.title.bold());
    if let Some(subtitle) = &deck.subtitle {
        println!("{}", subtitle.dimmed());
    }
    println!();

    for (line, slide) in index_lines(&deck).iter().zip(&deck.slides) {
        let charts = slide.blocks().filter(|b| b.is_chart()).count();
        let detail = if charts > 0 {
            format!("{}, {charts} chart(s)", kind_name(slide))
        } else {
            kind_name(slide)
        };
        println!("  {line}  {}", detail.dimmed());
    }
    Ok(())
}
