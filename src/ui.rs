pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};
use sketchy::words::parse_words;
use unicode_width::UnicodeWidthStr;

use crate::{App, Field};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.game.phase()).render(self, area, buf);
    }
}

/// `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn legend(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(
        text,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
}

fn input_block(title: String, focused: bool) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(Color::Cyan))
    } else {
        block.border_style(Style::default().add_modifier(Modifier::DIM))
    }
}

pub fn render_setup(app: &App, area: Rect, buf: &mut Buffer) {
    let form = &app.form;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Min(4),    // words
            Constraint::Length(3), // seconds
            Constraint::Length(1), // notice
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(
        "Sketchy",
        bold().fg(Color::Cyan),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    let cursor = |field: Field, text: &str| {
        if form.focus == field {
            format!("{text}▏")
        } else {
            text.to_string()
        }
    };

    let word_count = parse_words(&form.words_input).len();
    Paragraph::new(cursor(Field::Words, &form.words_input))
        .wrap(Wrap { trim: false })
        .block(input_block(
            format!("Words list (split by comma) - {word_count} words"),
            form.focus == Field::Words,
        ))
        .render(chunks[1], buf);

    Paragraph::new(cursor(Field::Seconds, &form.seconds_input))
        .block(input_block(
            "Time to guess the word (in seconds)".to_string(),
            form.focus == Field::Seconds,
        ))
        .render(chunks[2], buf);

    if let Some(notice) = &form.notice {
        Paragraph::new(Span::styled(notice.as_str(), bold().fg(Color::Red)))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }

    legend("(tab) switch field / (enter) start / (esc)ape").render(chunks[5], buf);
}

pub fn render_playing(app: &App, area: Rect, buf: &mut Buffer) {
    let game = &app.game;
    let Some(round) = game.round() else {
        return;
    };
    let expired = round.has_expired();

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1) as usize;
    // never taller than the screen, however long the word
    let word_lines = round
        .word
        .width()
        .div_ceil(max_chars_per_line)
        .clamp(1, area.height.max(1) as usize) as u16;
    let gap = area.height.saturating_sub(word_lines.saturating_add(8)) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(1),          // score / time
            Constraint::Length(gap),        // padding
            Constraint::Length(word_lines), // word
            Constraint::Length(1),          // paused marker
            Constraint::Min(0),             // padding
            Constraint::Length(1),          // words left
            Constraint::Length(1),          // legend
        ])
        .split(area);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    let dim = Style::default().add_modifier(Modifier::DIM);
    Paragraph::new(Line::from(vec![
        Span::styled("SCORE ", dim),
        Span::styled(game.score().to_string(), bold()),
    ]))
    .render(header[0], buf);

    let time_style = match round.seconds_remaining {
        0 => bold().fg(Color::Red),
        1..=10 => bold().fg(Color::Yellow),
        _ => bold(),
    };
    Paragraph::new(Line::from(vec![
        Span::styled("TIME ", dim),
        Span::styled(format_clock(round.seconds_remaining), time_style),
    ]))
    .alignment(Alignment::Right)
    .render(header[1], buf);

    let word = if expired {
        Span::styled("TIME'S UP!", bold().fg(Color::Red))
    } else {
        Span::styled(round.word.as_str(), bold().fg(Color::Green))
    };
    Paragraph::new(word)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    if !expired && !round.is_counting_down {
        Paragraph::new(Span::styled(
            "PAUSED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);
    }

    Paragraph::new(Span::styled(
        format!("Words left: {} / {}", game.words_left(), game.total_words()),
        dim,
    ))
    .alignment(Alignment::Center)
    .render(chunks[5], buf);

    let keys = if expired {
        "(enter) next word / (esc) quit to setup"
    } else if round.is_counting_down {
        "(enter) guessed! +1 / (space) pause / (esc) quit to setup"
    } else {
        "(enter) guessed! +1 / (space) resume / (esc) quit to setup"
    };
    legend(keys).render(chunks[6], buf);
}

pub fn render_finished(app: &App, area: Rect, buf: &mut Buffer) {
    let top = area.height.saturating_sub(6) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(top),
            Constraint::Length(1), // heading
            Constraint::Length(1), // label
            Constraint::Length(1), // score
            Constraint::Length(2), // padding
            Constraint::Length(1), // legend
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        "Game Over!",
        bold().fg(Color::Magenta),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new("Final Score:")
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        app.game.score().to_string(),
        bold().fg(Color::Green),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    legend("(enter) play again / (q)uit").render(chunks[5], buf);
}
