use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::chart::{self, svg};
use crate::deck::{Block, Deck};

/// Width used for bars and tables, which have no intrinsic size.
const BAR_WIDTH: f32 = 480.0;
const TABLE_WIDTH: f32 = 720.0;

/// One serialized chart and the file it belongs in.
#[derive(Debug)]
pub struct ChartFile {
    pub name: String,
    pub svg: String,
}

/// Serialize every chart in the deck. Files are named
/// `<slide-id>-<block>-<kind>[-<item>].svg`.
pub fn render_all(deck: &Deck) -> Result<Vec<ChartFile>> {
    let mut files = Vec::new();
    for slide in &deck.slides {
        for (bi, block) in slide.blocks().enumerate() {
            let prefix = format!("{}-{}", slide.id, bi + 1);
            let context = || format!("slide `{}`", slide.id);
            match block {
                Block::Sparklines { items, .. } => {
                    for (i, card) in items.iter().enumerate() {
                        let line =
                            chart::sparkline(&card.data, &card.style).with_context(context)?;
                        files.push(ChartFile {
                            name: format!("{prefix}-sparkline-{}.svg", i + 1),
                            svg: svg::sparkline(&line),
                        });
                    }
                }
                Block::Donut { segments, size, .. } => {
                    let donut = chart::donut(segments, *size).with_context(context)?;
                    files.push(ChartFile {
                        name: format!("{prefix}-donut.svg"),
                        svg: svg::donut(&donut),
                    });
                }
                Block::Bars { items, .. } => {
                    for (i, spec) in items.iter().enumerate() {
                        let bar = chart::horizontal_bar(spec).with_context(context)?;
                        files.push(ChartFile {
                            name: format!("{prefix}-bar-{}.svg", i + 1),
                            svg: svg::horizontal_bar(&bar, BAR_WIDTH),
                        });
                    }
                }
                Block::Table {
                    headers,
                    rows,
                    highlight_last,
                    ..
                } => {
                    let table =
                        chart::data_table(headers, rows, *highlight_last).with_context(context)?;
                    files.push(ChartFile {
                        name: format!("{prefix}-table.svg"),
                        svg: svg::data_table(&table, TABLE_WIDTH),
                    });
                }
                Block::Metrics { .. }
                | Block::Bullets { .. }
                | Block::Features { .. }
                | Block::Quote { .. } => {}
            }
        }
    }
    Ok(files)
}

pub fn run(deck: Option<&Path>, output_dir: &Path) -> Result<()> {
    let deck = Deck::load_or_builtin(deck).context("Failed to load deck")?;
    let files = render_all(&deck)?;
    if files.is_empty() {
        println!("{}", "The deck has no charts.".yellow());
        return Ok(());
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    for file in &files {
        let path: PathBuf = output_dir.join(&file.name);
        std::fs::write(&path, &file.svg)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote chart");
    }

    println!(
        "{}",
        format!("Wrote {} chart(s) to {}", files.len(), output_dir.display()).green()
    );
    Ok(())
}
