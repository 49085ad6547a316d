#![allow(
    // Allow truncation when casting from usize to u16 since board dimensions are always small
    clippy::cast_possible_truncation,
    // Allow sign loss since only cells already checked to be on the board are drawn
    clippy::cast_sign_loss
)]

use crate::app::App;
use crate::components::{Piece, TetrominoType};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::state::Frame as GameFrame;
use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

// Each cell is 2 characters wide and 1 tall
const CELL_WIDTH: u16 = 2;
const BOARD_PANEL_WIDTH: u16 = BOARD_WIDTH as u16 * CELL_WIDTH + 2; // +2 for borders
const BOARD_PANEL_HEIGHT: u16 = BOARD_HEIGHT as u16 + 2;
const INFO_PANEL_WIDTH: u16 = 24;
const PREVIEW_HEIGHT: u16 = 6;

/// Smallest terminal that fits the board, the side panel and the title row.
#[must_use]
pub fn minimum_size() -> (u16, u16) {
    (BOARD_PANEL_WIDTH + INFO_PANEL_WIDTH, BOARD_PANEL_HEIGHT + 1)
}

pub fn render(f: &mut Frame, app: &App) {
    let (min_width, min_height) = minimum_size();
    if f.area().width < min_width || f.area().height < min_height {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Paused"));

        let warning_area = centered_rect(80, 60, f.area());
        f.render_widget(warning_text, warning_area);
        return;
    }

    let frame = app.frame();

    let [game_column, info_column] =
        Layout::horizontal([Constraint::Length(BOARD_PANEL_WIDTH), Constraint::Length(INFO_PANEL_WIDTH)])
            .flex(Flex::Center)
            .areas(f.area());

    let [title_area, board_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(BOARD_PANEL_HEIGHT)])
            .flex(Flex::Center)
            .areas(game_column);

    let title = Paragraph::new("BLOCKDROP")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(title, title_area);

    render_game_board(f, &frame, board_area, app.display.show_grid);

    let [_, info_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(BOARD_PANEL_HEIGHT)])
            .flex(Flex::Center)
            .areas(info_column);
    render_info_panel(f, app, &frame, info_area);
}

fn render_info_panel(f: &mut Frame, app: &App, frame: &GameFrame, area: Rect) {
    let show_next = app.display.show_next;
    let [stats_area, preview_area, status_area, controls_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(if show_next { PREVIEW_HEIGHT } else { 0 }),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    let stats = Paragraph::new(format!(
        "Score: {}\nLines: {}",
        app.scoreboard().score,
        frame.lines_cleared
    ))
    .block(Block::default().borders(Borders::ALL).title("Info"));
    f.render_widget(stats, stats_area);

    if show_next {
        render_next_piece(f, &frame.next, preview_area);
    }

    if let Some(final_score) = app.scoreboard().final_score {
        let status = Paragraph::new(format!("GAME OVER!\nFinal score: {final_score}\nPress R to restart"))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        f.render_widget(status, status_area);
    }

    let controls = Paragraph::new(
        "Controls:\n\
        ←/→: Move left/right\n\
        ↑: Rotate\n\
        ↓: Soft drop\n\
        Space: Hard drop\n\
        M: Music  N: Sound\n\
        +/-: Volume\n\
        R: Restart  Q: Quit",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, controls_area);
}

fn render_game_board(f: &mut Frame, frame: &GameFrame, area: Rect, show_grid: bool) {
    let block = Block::default().borders(Borders::ALL);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    for (y, row) in frame.board.rows().iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            match cell {
                Some(kind) => draw_cell(f, inner_area, x as i32, y as i32, *kind),
                None if show_grid => draw_grid_dot(f, inner_area, x as u16, y as u16),
                None => {}
            }
        }
    }

    for (x, y) in frame.active.cells() {
        draw_cell(f, inner_area, x, y, frame.active.kind);
    }

    // If game is over, overlay "GAME OVER" text
    if frame.game_over {
        let game_over = Paragraph::new("GAME OVER")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let game_over_area = Rect {
            x: inner_area.x,
            y: inner_area.y + inner_area.height / 2,
            width: inner_area.width,
            height: 1,
        };

        f.render_widget(game_over, game_over_area);
    }
}

/// Draws the preview piece centred in its own box.
pub fn render_next_piece(f: &mut Frame, piece: &Piece, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Next");
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let piece_width = piece.shape.width() as u16 * CELL_WIDTH;
    let piece_height = piece.shape.height() as u16;
    let offset_x = inner_area.width.saturating_sub(piece_width) / 2;
    let offset_y = inner_area.height.saturating_sub(piece_height) / 2;

    let color = piece.kind.get_color();
    for (dx, dy) in piece.shape.cells() {
        let x = inner_area.x + offset_x + dx as u16 * CELL_WIDTH;
        let y = inner_area.y + offset_y + dy as u16;
        paint_block(f, inner_area, x, y, color);
    }
}

fn draw_cell(f: &mut Frame, board_area: Rect, x: i32, y: i32, kind: TetrominoType) {
    // Cells above the top edge are not visible
    if x < 0 || y < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
        return;
    }
    let cell_x = board_area.left() + x as u16 * CELL_WIDTH;
    let cell_y = board_area.top() + y as u16;
    paint_block(f, board_area, cell_x, cell_y, kind.get_color());
}

fn draw_grid_dot(f: &mut Frame, board_area: Rect, x: u16, y: u16) {
    let cell_x = board_area.left() + x * CELL_WIDTH;
    let cell_y = board_area.top() + y;
    if cell_x < board_area.right() && cell_y < board_area.bottom() {
        if let Some(cell) = f.buffer_mut().cell_mut((cell_x, cell_y)) {
            cell.set_symbol("·");
            cell.set_fg(Color::DarkGray);
        }
    }
}

// Two characters per cell keeps blocks roughly square
fn paint_block(f: &mut Frame, bounds: Rect, x: u16, y: u16, color: Color) {
    if y >= bounds.bottom() {
        return;
    }
    for column in [x, x + 1] {
        if column >= bounds.right() {
            continue;
        }
        if let Some(cell) = f.buffer_mut().cell_mut((column, y)) {
            cell.set_symbol("█");
            cell.set_fg(color);
            cell.set_bg(Color::Black);
        }
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
