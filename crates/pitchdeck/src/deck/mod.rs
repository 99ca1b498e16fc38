use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chart::{self, BarSpec, Cell, ChartError, DonutSegment, SparklineStyle};

const BUILTIN_DECK: &str = include_str!("../../decks/panda.yaml");

fn default_donut_size() -> f32 {
    120.0
}

#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid deck file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("deck has no slides")]
    Empty,

    #[error("duplicate slide id `{0}`")]
    DuplicateId(String),

    #[error("slide `{slide}`: {source}")]
    Chart {
        slide: String,
        #[source]
        source: ChartError,
    },

    #[error("only one feature carousel is supported, found one on `{first}` and `{second}`")]
    MultipleCarousels { first: String, second: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    /// Preferred transition (`slide`, `fade`, `none`); overrides the config default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Hero,
    Problem,
    Solution,
    Product,
    Intelligence,
    Flagship,
    Trading,
    Market,
    Traction,
    Competition,
    Model,
    Team,
    Ask,
    Closing,
}

impl SlideKind {
    /// Title-style slides center their content instead of using two columns.
    pub fn is_centered(self) -> bool {
        matches!(self, SlideKind::Hero | SlideKind::Closing)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SlideKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub content: SlideContent,
}

impl Slide {
    /// Title shown in the index overlay.
    pub fn display_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| title_for(&self.id))
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.content.blocks.iter().chain(self.content.aside.iter())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlideContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub heading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Main column, under the heading.
    #[serde(default)]
    pub blocks: Vec<Block>,
    /// Right-hand panel.
    #[serde(default)]
    pub aside: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<Change>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub value: String,
    pub positive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparklineCard {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
    pub data: Vec<f64>,
    #[serde(flatten)]
    pub style: SparklineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Metrics {
        items: Vec<Metric>,
    },
    Bullets {
        items: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        marker: Option<String>,
    },
    Table {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        headers: Vec<String>,
        rows: Vec<Vec<Cell>>,
        #[serde(default)]
        highlight_last: bool,
    },
    Sparklines {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        items: Vec<SparklineCard>,
    },
    Donut {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        segments: Vec<DonutSegment>,
        #[serde(default = "default_donut_size")]
        size: f32,
    },
    Bars {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        items: Vec<BarSpec>,
    },
    /// The auto-advancing feature carousel.
    Features {
        items: Vec<Feature>,
    },
    Quote {
        text: String,
    },
}

impl Block {
    /// Run every chart this block contains through its primitive, so
    /// precondition violations surface at load time rather than paint time.
    pub fn check_charts(&self) -> Result<(), ChartError> {
        match self {
            Block::Table {
                headers,
                rows,
                highlight_last,
                ..
            } => chart::data_table(headers, rows, *highlight_last).map(drop),
            Block::Sparklines { items, .. } => items
                .iter()
                .try_for_each(|card| chart::sparkline(&card.data, &card.style).map(drop)),
            Block::Donut { segments, size, .. } => chart::donut(segments, *size).map(drop),
            Block::Bars { items, .. } => items
                .iter()
                .try_for_each(|spec| chart::horizontal_bar(spec).map(drop)),
            Block::Metrics { .. }
            | Block::Bullets { .. }
            | Block::Features { .. }
            | Block::Quote { .. } => Ok(()),
        }
    }

    pub fn is_chart(&self) -> bool {
        matches!(
            self,
            Block::Table { .. } | Block::Sparklines { .. } | Block::Donut { .. } | Block::Bars { .. }
        )
    }
}

impl Deck {
    /// The PANDA Terminal investor deck compiled into the binary.
    pub fn builtin() -> Result<Self, DeckError> {
        Self::parse(BUILTIN_DECK)
    }

    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let content = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let deck = Self::parse(&content)?;
        tracing::info!(path = %path.display(), slides = deck.slides.len(), "loaded deck");
        Ok(deck)
    }

    /// Built-in deck unless a file is given.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, DeckError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    pub fn parse(yaml: &str) -> Result<Self, DeckError> {
        let deck: Deck = serde_yaml::from_str(yaml)?;
        deck.validate()?;
        Ok(deck)
    }

    /// Fail fast on anything that would otherwise show up as a broken slide.
    pub fn validate(&self) -> Result<(), DeckError> {
        if self.slides.is_empty() {
            return Err(DeckError::Empty);
        }

        let mut seen = HashSet::new();
        for slide in &self.slides {
            if !seen.insert(slide.id.as_str()) {
                return Err(DeckError::DuplicateId(slide.id.clone()));
            }
        }

        for slide in &self.slides {
            for block in slide.blocks() {
                block.check_charts().map_err(|source| DeckError::Chart {
                    slide: slide.id.clone(),
                    source,
                })?;
            }
        }

        let mut carousels = self
            .slides
            .iter()
            .filter(|s| s.blocks().any(|b| matches!(b, Block::Features { .. })));
        if let (Some(first), Some(second)) = (carousels.next(), carousels.next()) {
            return Err(DeckError::MultipleCarousels {
                first: first.id.clone(),
                second: second.id.clone(),
            });
        }

        Ok(())
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Slide index and item count of the feature carousel, if the deck has one.
    pub fn carousel(&self) -> Option<(usize, usize)> {
        self.slides.iter().enumerate().find_map(|(i, slide)| {
            slide.blocks().find_map(|block| match block {
                Block::Features { items } => Some((i, items.len())),
                _ => None,
            })
        })
    }
}

/// Derive a display title from a slide id: `divine-dip` -> `Divine Dip`.
pub fn title_for(id: &str) -> String {
    id.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(slides: &str) -> String {
        format!("title: Test\nslides:\n{slides}")
    }

    #[test]
    fn builtin_deck_loads_and_validates() {
        let deck = Deck::builtin().unwrap();
        assert_eq!(deck.slide_count(), 14);
        assert_eq!(deck.title, "PANDA Terminal");
        let ids: Vec<&str> = deck.slides.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "title",
                "problem",
                "solution",
                "product",
                "intelligence",
                "divine-dip",
                "trading",
                "market",
                "traction",
                "competition",
                "model",
                "team",
                "ask",
                "closing"
            ]
        );
    }

    #[test]
    fn builtin_kinds_follow_ids() {
        let deck = Deck::builtin().unwrap();
        assert_eq!(deck.slides[0].kind, SlideKind::Hero);
        assert_eq!(deck.slides[5].kind, SlideKind::Flagship);
        assert_eq!(deck.slides[13].kind, SlideKind::Closing);
    }

    #[test]
    fn builtin_carousel_is_on_product_slide() {
        let deck = Deck::builtin().unwrap();
        assert_eq!(deck.carousel(), Some((3, 6)));
    }

    #[test]
    fn builtin_market_table_highlights_last_row() {
        let deck = Deck::builtin().unwrap();
        let market = deck.slides.iter().find(|s| s.id == "market").unwrap();
        let highlighted = market.blocks().any(|b| {
            matches!(
                b,
                Block::Table {
                    highlight_last: true,
                    ..
                }
            )
        });
        assert!(highlighted);
    }

    #[test]
    fn titles_from_ids() {
        assert_eq!(title_for("divine-dip"), "Divine Dip");
        assert_eq!(title_for("title"), "Title");
        assert_eq!(title_for("go-to-market"), "Go To Market");
        assert_eq!(title_for(""), "");
    }

    #[test]
    fn explicit_title_wins() {
        let deck = Deck::builtin().unwrap();
        assert_eq!(deck.slides[1].display_title(), "Problem");
        let yaml = minimal("  - { id: x, type: hero, title: Welcome }\n");
        let deck = Deck::parse(&yaml).unwrap();
        assert_eq!(deck.slides[0].display_title(), "Welcome");
    }

    #[test]
    fn empty_deck_is_rejected() {
        let err = Deck::parse("title: Empty\nslides: []\n").unwrap_err();
        assert!(matches!(err, DeckError::Empty));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let yaml = minimal("  - { id: a, type: hero }\n  - { id: a, type: closing }\n");
        match Deck::parse(&yaml).unwrap_err() {
            DeckError::DuplicateId(id) => assert_eq!(id, "a"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_sparkline_is_rejected() {
        let yaml = minimal(
            r#"  - id: traction
    type: traction
    blocks:
      - type: sparklines
        items:
          - { label: USERS, value: "1", data: [1] }
"#,
        );
        match Deck::parse(&yaml).unwrap_err() {
            DeckError::Chart { slide, source } => {
                assert_eq!(slide, "traction");
                assert_eq!(source, ChartError::TooFewPoints(1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_donut_is_rejected() {
        let yaml = minimal(
            r#"  - id: model
    type: model
    aside:
      - type: donut
        segments:
          - { value: 0, label: A }
          - { value: 0, label: B }
"#,
        );
        assert!(matches!(
            Deck::parse(&yaml).unwrap_err(),
            DeckError::Chart {
                source: ChartError::ZeroTotal,
                ..
            }
        ));
    }

    #[test]
    fn chart_sizes_are_checked() {
        let donut = minimal(
            r#"  - id: model
    type: model
    aside:
      - type: donut
        size: 16
        segments:
          - { value: 30, label: A }
          - { value: 70, label: B }
"#,
        );
        assert!(matches!(
            Deck::parse(&donut).unwrap_err(),
            DeckError::Chart {
                source: ChartError::DonutSize(_),
                ..
            }
        ));

        let sparkline = minimal(
            r#"  - id: traction
    type: traction
    blocks:
      - type: sparklines
        items:
          - label: Users
            value: "12,700"
            data: [1, 2, 3]
            width: .nan
"#,
        );
        assert!(matches!(
            Deck::parse(&sparkline).unwrap_err(),
            DeckError::Chart {
                source: ChartError::SparklineSize { .. },
                ..
            }
        ));
    }

    #[test]
    fn zero_bar_maximum_is_rejected() {
        let yaml = minimal(
            r#"  - id: ask
    type: ask
    blocks:
      - type: bars
        items:
          - { label: Engineering, value: 40, max: 0 }
"#,
        );
        assert!(matches!(
            Deck::parse(&yaml).unwrap_err(),
            DeckError::Chart {
                source: ChartError::ZeroMaximum,
                ..
            }
        ));
    }

    #[test]
    fn ragged_table_is_rejected() {
        let yaml = minimal(
            r#"  - id: market
    type: market
    blocks:
      - type: table
        headers: [A, B]
        rows:
          - [one, two]
          - [three]
"#,
        );
        assert!(matches!(
            Deck::parse(&yaml).unwrap_err(),
            DeckError::Chart {
                source: ChartError::RowWidth { row: 1, .. },
                ..
            }
        ));
    }

    #[test]
    fn second_carousel_is_rejected() {
        let yaml = minimal(
            r#"  - id: a
    type: product
    blocks:
      - type: features
        items: [{ title: One, description: first }]
  - id: b
    type: product
    aside:
      - type: features
        items: [{ title: Two, description: second }]
"#,
        );
        match Deck::parse(&yaml).unwrap_err() {
            DeckError::MultipleCarousels { first, second } => {
                assert_eq!((first.as_str(), second.as_str()), ("a", "b"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn sparkline_style_defaults_apply() {
        let yaml = minimal(
            r##"  - id: t
    type: traction
    blocks:
      - type: sparklines
        items:
          - { label: L, value: V, data: [1, 2], color: "#12B76A" }
"##,
        );
        let deck = Deck::parse(&yaml).unwrap();
        let Block::Sparklines { items, .. } = &deck.slides[0].content.blocks[0] else {
            panic!("expected sparklines");
        };
        assert_eq!(items[0].style.width, 120.0);
        assert_eq!(items[0].style.height, 40.0);
        assert_eq!(items[0].style.color, chart::Rgb::POSITIVE);
        assert!(!items[0].style.show_area);
    }

    #[test]
    fn unknown_slide_type_is_a_yaml_error() {
        let yaml = minimal("  - { id: a, type: appendix }\n");
        assert!(matches!(Deck::parse(&yaml).unwrap_err(), DeckError::Yaml(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Deck::load(Path::new("/nonexistent/deck.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/deck.yaml"));
    }
}
