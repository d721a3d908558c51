use crate::core::segments::lit_segments;
use crate::domain::model::{Segment, SegmentSet, TimeSnapshot};

pub const GLYPH_HEIGHT: usize = 7;
pub const GLYPH_WIDTH: usize = 6;

type Cell = (&'static str, Option<Segment>);

const TOP: &str = "━━━━";
const SIDE: &str = "┃";
const GAP: &str = "    ";

//  ━━━━      a
// ┃    ┃   f   b
// ┃    ┃
//  ━━━━      g
// ┃    ┃   e   c
// ┃    ┃
//  ━━━━      d
const GLYPH: [[Cell; 3]; GLYPH_HEIGHT] = [
    [(" ", None), (TOP, Some(Segment::A)), (" ", None)],
    [(SIDE, Some(Segment::F)), (GAP, None), (SIDE, Some(Segment::B))],
    [(SIDE, Some(Segment::F)), (GAP, None), (SIDE, Some(Segment::B))],
    [(" ", None), (TOP, Some(Segment::G)), (" ", None)],
    [(SIDE, Some(Segment::E)), (GAP, None), (SIDE, Some(Segment::C))],
    [(SIDE, Some(Segment::E)), (GAP, None), (SIDE, Some(Segment::C))],
    [(" ", None), (TOP, Some(Segment::D)), (" ", None)],
];

const COLON: [&str; GLYPH_HEIGHT] = [" ", " ", "●", " ", "●", " ", " "];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    /// Filler between segments.
    Blank(&'static str),
    Lit(&'static str),
    /// Unlit segment, drawn dim in the terminal UI.
    Ghost(&'static str),
}

impl Stroke {
    pub fn text(&self) -> &'static str {
        match self {
            Stroke::Blank(s) | Stroke::Lit(s) | Stroke::Ghost(s) => s,
        }
    }

    /// Plain-text form: ghosts become blanks of the same width.
    pub fn plain(&self) -> String {
        match self {
            Stroke::Ghost(s) => " ".repeat(s.chars().count()),
            other => other.text().to_string(),
        }
    }
}

pub fn glyph_row(segments: SegmentSet, row: usize) -> [Stroke; 3] {
    GLYPH[row].map(|(text, segment)| match segment {
        None => Stroke::Blank(text),
        Some(s) if segments.contains(s) => Stroke::Lit(text),
        Some(_) => Stroke::Ghost(text),
    })
}

pub fn colon_row(row: usize) -> &'static str {
    COLON[row]
}

pub fn render_digit_lines(ch: char) -> Vec<String> {
    let segments = lit_segments(ch);
    (0..GLYPH_HEIGHT)
        .map(|row| glyph_row(segments, row).iter().map(Stroke::plain).collect())
        .collect()
}

/// `HH:MM:SS` as big seven-segment text, one string per row.
pub fn render_clock_lines(snapshot: &TimeSnapshot) -> Vec<String> {
    let groups = [&snapshot.hours, &snapshot.minutes, &snapshot.seconds];
    let glyphs: Vec<Vec<Vec<String>>> = groups
        .iter()
        .map(|group| group.chars().map(render_digit_lines).collect())
        .collect();

    (0..GLYPH_HEIGHT)
        .map(|row| {
            let separator = format!(" {} ", colon_row(row));
            glyphs
                .iter()
                .map(|group| {
                    group
                        .iter()
                        .map(|lines| lines[row].as_str())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect::<Vec<_>>()
                .join(separator.as_str())
                .trim_end()
                .to_string()
        })
        .collect()
}
