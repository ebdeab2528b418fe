// ui/overlay.rs

use crate::game::SessionStatus;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::*,
};

use super::{center_rect, constants::RESET_ACTION};

/// Title, description and colour of the card shown once a game is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ending {
    pub title: &'static str,
    pub description: &'static str,
    pub color: Color,
}

impl Ending {
    pub fn for_status(status: SessionStatus) -> Option<Self> {
        match status {
            SessionStatus::Playing => None,
            SessionStatus::Won => Some(Ending {
                title: "勝利：自爆",
                description: "逃男係長は自身の矛盾に耐えきれず、部長の前で失言し自爆しました。あなたの潔白が証明されました！",
                color: Color::Green,
            }),
            SessionStatus::Lost => Some(Ending {
                title: "敗北：退職",
                description: "降り注ぐ責任転嫁にあなたのメンタルは限界を迎えました。あなたは静かに退職届を提出しました。",
                color: Color::Red,
            }),
            SessionStatus::ComplianceReported => Some(Ending {
                title: "完全勝利：コンプラ通報",
                description: "蓄積した確固たる証拠をもとにコンプラ委員会へ通報。逃男係長は更迭され、平和なオフィスが戻りました。",
                color: Color::Blue,
            }),
        }
    }
}

pub fn draw_overlay(f: &mut Frame, ending: &Ending) {
    let area = center_rect(f.area(), Constraint::Percentage(70), Constraint::Length(12));
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::White))
        .padding(Padding::horizontal(2))
        .style(Style::default().bg(ending.color).fg(Color::White));

    let text = vec![
        Line::default(),
        Line::styled(
            ending.title,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::from(ending.description),
        Line::default(),
        Line::styled(RESET_ACTION, Style::default().add_modifier(Modifier::BOLD)),
    ];

    let card = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(card, area);
}
