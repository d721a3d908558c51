use crate::core::segments::lit_segments;
use crate::domain::model::TunerState;
use crate::ui::app::ClockApp;
use crate::ui::digits::{colon_row, glyph_row, Stroke, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::ui::theme::{Theme, ThemeStyle};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub const FOOTER: &str = "RETRO-CHRONOS SYSTEM v2.5 // ONLINE";
pub const AWAITING: &str = "AWAITING INPUT... PRESS \"TUNE IN\" TO SCAN MULTIVERSE FREQUENCIES.";
pub const TRIANGULATING: &str = "TRIANGULATING SIGNAL SOURCE...";

const GHOST: Color = Color::Rgb(38, 38, 38);
const MUTED: Color = Color::Rgb(115, 115, 115);

// 時分 + 分隔 + 秒 的寬度
const CLOCK_WIDTH_WITH_SECONDS: u16 = (GLYPH_WIDTH as u16 * 2 + 1) * 3 + 3 * 2;
const CLOCK_WIDTH: u16 = (GLYPH_WIDTH as u16 * 2 + 1) * 2 + 3;
const CLOCK_PANEL_HEIGHT: u16 = GLYPH_HEIGHT as u16 + 4;
const TUNER_PANEL_HEIGHT: u16 = 7;

pub fn draw(frame: &mut Frame, app: &ClockApp) {
    let style = app.theme.style();
    let area = frame.area();

    let main = if app.fullscreen {
        area
    } else {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
        frame.render_widget(controls(app), rows[0]);
        frame.render_widget(
            Paragraph::new(Span::styled(FOOTER, Style::default().fg(MUTED)))
                .alignment(Alignment::Center),
            rows[2],
        );
        rows[1]
    };

    let show_seconds = main.width >= CLOCK_WIDTH_WITH_SECONDS + 6;
    let clock_width = if show_seconds {
        CLOCK_WIDTH_WITH_SECONDS
    } else {
        CLOCK_WIDTH
    } + 4;

    let stack = centered(
        clock_width.max(60).min(main.width),
        CLOCK_PANEL_HEIGHT + 1 + TUNER_PANEL_HEIGHT,
        main,
    );
    let panels = Layout::vertical([
        Constraint::Length(CLOCK_PANEL_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(TUNER_PANEL_HEIGHT),
    ])
    .split(stack);

    draw_clock(frame, app, &style, show_seconds, panels[0]);
    draw_tuner(frame, app, &style, panels[2]);
}

fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn controls(app: &ClockApp) -> Paragraph<'static> {
    let key = Style::default().fg(Color::Gray);
    let hint = Style::default().fg(MUTED);

    let mut spans = vec![
        Span::styled("[H] ", hint),
        Span::styled(if app.use_24_hour { "24H" } else { "12H" }, key),
        Span::styled("  [F] ", hint),
        Span::styled(if app.fullscreen { "WINDOW" } else { "FULLSCREEN" }, key),
        Span::styled("  │ ", hint),
    ];

    for (i, theme) in Theme::ALL.iter().enumerate() {
        let mut dot = Style::default().fg(theme.style().fill);
        if *theme == app.theme {
            dot = dot.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        } else {
            dot = dot.add_modifier(Modifier::DIM);
        }
        spans.push(Span::styled(format!("[{}]", i + 1), hint));
        spans.push(Span::styled(format!("● {} ", theme.identifier()), dot));
    }
    spans.push(Span::styled(" [Q] QUIT", hint));

    Paragraph::new(Line::from(spans)).alignment(Alignment::Right)
}

fn digit_spans(ch: char, row: usize, style: &ThemeStyle) -> Vec<Span<'static>> {
    let lit = Style::default().fg(style.fill).add_modifier(Modifier::BOLD);
    let ghost = Style::default().fg(GHOST);

    glyph_row(lit_segments(ch), row)
        .into_iter()
        .map(|stroke| match stroke {
            Stroke::Blank(s) => Span::raw(s),
            Stroke::Lit(s) => Span::styled(s, lit),
            Stroke::Ghost(s) => Span::styled(s, ghost),
        })
        .collect()
}

fn draw_clock(
    frame: &mut Frame,
    app: &ClockApp,
    style: &ThemeStyle,
    show_seconds: bool,
    area: Rect,
) {
    let snapshot = &app.snapshot;
    let separator = if app.pulse {
        Style::default().fg(style.glow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(style.shadow)
    };

    let mut groups = vec![&snapshot.hours, &snapshot.minutes];
    if show_seconds {
        groups.push(&snapshot.seconds);
    }

    let mut lines = vec![
        Line::from(Span::styled(
            snapshot.full_date.clone(),
            Style::default().fg(style.text),
        )),
        Line::default(),
    ];

    for row in 0..GLYPH_HEIGHT {
        let mut spans = Vec::new();
        for (g, group) in groups.iter().enumerate() {
            if g > 0 {
                spans.push(Span::styled(format!(" {} ", colon_row(row)), separator));
            }
            for (d, ch) in group.chars().enumerate() {
                if d > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.extend(digit_spans(ch, row, style));
            }
        }
        lines.push(Line::from(spans));
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(style.border))
        .style(Style::default().bg(style.background));

    // 24 小時制完全不顯示 AM/PM
    if !app.use_24_hour {
        block = block.title(
            Line::from(Span::styled(
                format!(" {} ", snapshot.period),
                Style::default().fg(style.glow).add_modifier(Modifier::BOLD),
            ))
            .left_aligned(),
        );
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_tuner(frame: &mut Frame, app: &ClockApp, style: &ThemeStyle, area: Rect) {
    let accent = Style::default().fg(style.fill);
    let muted = Style::default().fg(MUTED);

    let button = if app.is_scanning() {
        Span::styled(" ⟳ SCANNING... ", muted)
    } else {
        Span::styled(" [SPACE] TUNE IN ", accent.add_modifier(Modifier::BOLD))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(accent)
        .title(
            Line::from(Span::styled(
                " FREQUENCY TUNER ",
                Style::default().fg(Color::Gray),
            ))
            .left_aligned(),
        )
        .title(Line::from(button).right_aligned());

    let body: Vec<Line> = match &app.tuner {
        TunerState::Idle => vec![Line::default(), Line::from(Span::styled(AWAITING, muted))],
        TunerState::Scanning => {
            let width = area.width.saturating_sub(4) as usize;
            let dim = accent.add_modifier(Modifier::DIM);
            vec![
                Line::from(Span::styled("─".repeat(width), accent)),
                Line::from(Span::styled("─".repeat(width * 3 / 4), dim)),
                Line::from(Span::styled("─".repeat(width / 2), dim)),
                Line::from(Span::styled(TRIANGULATING, muted)),
            ]
        }
        TunerState::Received(result) => vec![
            Line::from(vec![
                Span::styled(format!("FREQ: {}", result.frequency), muted),
                Span::raw("   "),
                Span::styled(format!("TS: {}", result.timestamp), muted),
            ]),
            Line::default(),
            Line::from(Span::styled(
                format!("\"{}\"", result.message),
                accent.add_modifier(Modifier::BOLD),
            )),
        ],
    };

    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{TimeSnapshot, TransmissionResult};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app(use_24_hour: bool) -> ClockApp {
        let snapshot = TimeSnapshot {
            hours: if use_24_hour { "13" } else { "01" }.to_string(),
            minutes: "05".to_string(),
            seconds: "09".to_string(),
            period: if use_24_hour { "" } else { "PM" }.to_string(),
            full_date: "SUNDAY, OCT 18, 2026".to_string(),
        };
        ClockApp::new(snapshot, use_24_hour, Theme::Cyan, false)
    }

    fn screen(app: &ClockApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_windowed_layout_shows_chrome() {
        let text = screen(&app(false));
        assert!(text.contains("SUNDAY, OCT 18, 2026"));
        assert!(text.contains(FOOTER));
        assert!(text.contains("12H"));
        assert!(text.contains(" PM "));
        assert!(text.contains("FREQUENCY TUNER"));
        assert!(text.contains("━━━━"));
    }

    #[test]
    fn test_fullscreen_hides_chrome() {
        let mut app = app(false);
        app.fullscreen = true;
        let text = screen(&app);
        assert!(!text.contains(FOOTER));
        assert!(!text.contains("[Q] QUIT"));
        assert!(text.contains("SUNDAY, OCT 18, 2026"));
    }

    #[test]
    fn test_twenty_four_hour_has_no_period() {
        let text = screen(&app(true));
        assert!(text.contains("24H"));
        assert!(!text.contains(" PM "));
        assert!(!text.contains(" AM "));
    }

    #[test]
    fn test_tuner_states() {
        let mut app = app(false);
        assert!(screen(&app).contains("AWAITING INPUT"));

        app.tuner = TunerState::Scanning;
        let text = screen(&app);
        assert!(text.contains(TRIANGULATING));
        assert!(text.contains("SCANNING"));

        app.tuner = TunerState::Received(TransmissionResult::signal_lost());
        let text = screen(&app);
        assert!(text.contains("FREQ: ERR-404"));
        assert!(text.contains("TS: UNKNOWN"));
        assert!(text.contains("SIGNAL LOST"));
    }
}
