pub mod layout;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Clear, Paragraph, Widget},
};

use karrot::field::{ItemKind, ITEM_HEIGHT};

use crate::{ui::layout::Regions, App};

const LEGEND: &str = "(space) play/stop / (r)eplay / (q)uit   click the carrots, avoid the bugs";
const IDLE_HINT: &str = "press space or ▶ to start";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let regions = Regions::new(area);
        let hud = self.game.presenter();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        Block::bordered().title(" karrot ").render(regions.header, buf);

        let button_style = if self.game.is_running() {
            Style::default().patch(bold_style).fg(Color::Red)
        } else {
            Style::default().patch(bold_style).fg(Color::Green)
        };
        Paragraph::new(Span::styled(
            format!("[ {} ]", hud.button.symbol()),
            button_style,
        ))
        .render(regions.button, buf);

        if hud.visible {
            Paragraph::new(Span::styled(hud.timer_text.as_str(), bold_style))
                .alignment(Alignment::Center)
                .render(regions.timer, buf);

            Paragraph::new(Span::styled(
                format!("{} {}", ItemKind::Carrot.glyph(), hud.score_text),
                Style::default().patch(bold_style).fg(Color::LightRed),
            ))
            .alignment(Alignment::Right)
            .render(regions.score, buf);
        }

        Block::bordered().title(" field ").render(regions.field_block, buf);
        render_items(self, regions.field, buf);

        if !self.game.is_running() && !self.popup.is_visible() {
            Paragraph::new(Span::styled(IDLE_HINT, dim_style))
                .alignment(Alignment::Center)
                .render(layout::centered(regions.field, regions.field.width, 1), buf);
        }

        if let Some(message) = self.popup.message() {
            Clear.render(regions.popup, buf);
            Block::bordered()
                .border_style(Style::default().fg(Color::Yellow))
                .render(regions.popup, buf);
            Paragraph::new(Span::styled(message, bold_style))
                .alignment(Alignment::Center)
                .render(regions.popup_message, buf);
            Paragraph::new(Span::styled(
                layout::REPLAY_LABEL,
                Style::default().patch(bold_style).fg(Color::Yellow),
            ))
            .render(regions.replay, buf);
        }

        Paragraph::new(Span::styled(LEGEND, italic_style)).render(regions.legend, buf);
    }
}

/// Draw items that fit entirely inside both the field bounds and the
/// area on screen
fn render_items(app: &App, area: Rect, buf: &mut Buffer) {
    let (width, height) = app.game.field().size();
    let (width, height) = (width.min(area.width), height.min(area.height));
    for item in app.game.field().items() {
        let (x, y) = item.cell();
        if x.saturating_add(item.kind.width()) > width
            || y.saturating_add(ITEM_HEIGHT) > height
        {
            continue;
        }
        let style = match item.kind {
            ItemKind::Carrot => Style::default().fg(Color::LightRed),
            ItemKind::Bug => Style::default().fg(Color::Green),
        };
        buf.set_string(area.x + x, area.y + y, item.kind.glyph(), style);
    }
}
