use crate::app::App;
use crate::message::{Message, MessageRole};
use crate::meter::{METER_MAX, Meter, MeterState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::*,
};
use strum::IntoEnumIterator;

use super::constants::*;
use super::spinner::spinner_frame;
use super::textarea::input_block;

pub fn draw_in_game(f: &mut Frame, app: &mut App) {
    let can_report = app.session.can_report();

    let [header, meters, transcript, report, input, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Min(5),
        Constraint::Length(if can_report { 1 } else { 0 }),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(f.area());

    draw_header(f, header);
    draw_meters(f, &app.session.meters(), meters);
    draw_transcript(f, app, transcript);
    if can_report {
        let button = Paragraph::new(REPORT_BUTTON)
            .style(
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            )
            .alignment(Alignment::Center);
        f.render_widget(button, report);
    }
    draw_user_input(f, app, input);
    draw_footer(f, app, footer);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .style(Style::default().fg(Color::White).bg(Color::Rgb(30, 41, 59)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(inner);

    let name = Paragraph::new(vec![
        Line::styled(BOSS_NAME, Style::default().add_modifier(Modifier::BOLD)),
        Line::styled(BOSS_TITLE, Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(name, left);

    let status = Paragraph::new(vec![
        Line::styled("CURRENT STATUS", Style::default().fg(Color::Gray)),
        Line::styled(BOSS_STATUS, Style::default().fg(Color::Yellow)),
    ])
    .alignment(Alignment::Right);
    f.render_widget(status, right);
}

fn meter_color(meter: Meter) -> Color {
    match meter {
        Meter::Agitation => Color::LightRed,
        Meter::Mental => Color::Green,
        Meter::Evidence => Color::Blue,
    }
}

fn draw_meters(f: &mut Frame, meters: &MeterState, area: Rect) {
    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);

    for (meter, column) in Meter::iter().zip(columns.iter()) {
        let value = meters.value(meter);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {} {} ", meter.icon(), meter.label()))
            .title(
                Line::from(format!(" {} / {} ", value, METER_MAX)).alignment(Alignment::Right),
            );
        let inner = block.inner(*column);
        f.render_widget(block, *column);

        let [gauge_area, caption_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(meter_color(meter)).bg(Color::DarkGray))
            .ratio(f64::from(value) / f64::from(METER_MAX))
            .label("");
        f.render_widget(gauge, gauge_area);

        let caption = Paragraph::new(meter.caption()).style(
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        );
        f.render_widget(caption, caption_area);
    }
}

fn draw_transcript(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" 会話 ");
    let inner = block.inner(area);

    let mut lines = transcript_lines(app.session.messages(), inner.width as usize);
    if app.session.is_in_flight() {
        lines.push(Line::styled(
            spinner_frame(&app.spinner),
            Style::default().fg(Color::Green),
        ));
    }

    app.update_scroll(lines.len(), inner.height as usize);

    let transcript = Paragraph::new(lines)
        .block(block)
        .scroll((app.transcript_scroll.min(u16::MAX as usize) as u16, 0));
    f.render_widget(transcript, area);
}

/// Pre-wrapped chat lines: boss on the left, player on the right, notices centred.
pub fn transcript_lines(messages: &[Message], width: usize) -> Vec<Line<'static>> {
    let bubble_width = (width * 4 / 5).max(10);
    let mut lines = Vec::new();

    for message in messages {
        let (alignment, style) = match message.role {
            MessageRole::Boss => (Alignment::Left, Style::default().fg(Color::White)),
            MessageRole::Player => (Alignment::Right, Style::default().fg(Color::LightBlue)),
            MessageRole::System => (
                Alignment::Center,
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            ),
        };

        let time = Span::styled(message.formatted_time(), Style::default().fg(Color::DarkGray));
        let heading = match message.role {
            MessageRole::System => Line::from(time),
            role => Line::from(vec![
                Span::styled(
                    role.label(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                time,
            ]),
        };
        lines.push(heading.alignment(alignment));

        for wrapped in textwrap::wrap(&message.content, bubble_width) {
            lines.push(Line::styled(wrapped.into_owned(), style).alignment(alignment));
        }
        lines.push(Line::default());
    }

    lines
}

fn draw_user_input(f: &mut Frame, app: &mut App, area: Rect) {
    let enabled = app.session.accepts_input();
    app.input.set_block(input_block(enabled));
    f.render_widget(&app.input, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from(vec![
        Span::raw(HINT),
        Span::raw("   "),
        Span::raw(WARNING),
    ])];

    match &app.console_message {
        Some(message) => lines.push(Line::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        )),
        None => lines.push(Line::default()),
    }
    lines.push(Line::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)));

    let footer = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(footer, area);
}
