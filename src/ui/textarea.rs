use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Borders};
use tui_textarea::TextArea;

use super::constants::INPUT_PLACEHOLDER;

pub fn new_textarea() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(INPUT_PLACEHOLDER);
    textarea.set_cursor_line_style(Style::default());
    textarea.set_placeholder_style(Style::default().fg(Color::DarkGray));
    textarea.set_selection_style(Style::new().bg(Color::LightCyan));
    textarea.set_block(input_block(true));
    textarea
}

// Greyed out while the boss is answering or once the game is over.
pub fn input_block(enabled: bool) -> Block<'static> {
    let color = if enabled { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(" あなた ")
}
