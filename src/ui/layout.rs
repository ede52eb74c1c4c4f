use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Block,
};

const HEADER_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 5;
const SCORE_WIDTH: u16 = 8;
const POPUP_WIDTH: u16 = 34;
const POPUP_HEIGHT: u16 = 5;
pub const REPLAY_LABEL: &str = "[ REPLAY ]";

/// Screen regions, shared by rendering and mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Regions {
    pub header: Rect,
    pub button: Rect,
    pub timer: Rect,
    pub score: Rect,
    pub field_block: Rect,
    /// Inside of the field border; item coordinates are relative to this
    pub field: Rect,
    pub legend: Rect,
    pub popup: Rect,
    pub popup_message: Rect,
    pub replay: Rect,
}

impl Regions {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT), // button, timer, score
                Constraint::Min(3),                // field
                Constraint::Length(1),             // legend
            ])
            .split(area);

        let header = rows[0];
        let header_cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Min(0),
                Constraint::Length(SCORE_WIDTH),
            ])
            .split(Block::bordered().inner(header));

        let field_block = rows[1];
        let field = Block::bordered().inner(field_block);

        let popup = centered(field_block, POPUP_WIDTH, POPUP_HEIGHT);
        let popup_inner = Block::bordered().inner(popup);
        let popup_message = Rect {
            height: popup_inner.height.min(1),
            ..popup_inner
        };
        let last_row = Rect {
            y: popup_inner.y + popup_inner.height.saturating_sub(1),
            height: popup_inner.height.min(1),
            ..popup_inner
        };
        let replay = centered(last_row, REPLAY_LABEL.len() as u16, 1);

        Self {
            header,
            button: header_cols[0],
            timer: header_cols[1],
            score: header_cols[2],
            field_block,
            field,
            legend: rows[2],
            popup,
            popup_message,
            replay,
        }
    }
}

pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn hit(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
