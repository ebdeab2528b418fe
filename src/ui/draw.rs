// ui/draw.rs

use crate::app::App;

use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Style},
    widgets::Paragraph,
};

use super::{MIN_HEIGHT, MIN_WIDTH, game, overlay};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        let warning = Paragraph::new("Terminal too small. Please resize.")
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(warning, size);
        return;
    }

    game::draw_in_game(f, app);

    if let Some(ending) = overlay::Ending::for_status(app.session.status()) {
        overlay::draw_overlay(f, &ending);
    }
}
