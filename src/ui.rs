//! Layout and drawing: the well, sidebar, start / pause / game-over messages, and the plant canvas.

use crate::app::PlantView;
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};
use std::time::Instant;
use tachyonfx::{Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx};
use wellblocks::{BlockColor, GameState, Status};

/// One well block is two terminal columns wide and one row tall, close to square.
const CELL_WIDTH: u16 = 2;
const CELL_HEIGHT: u16 = 1;
const BLOCK_SYMBOL: &str = "██";

const SIDEBAR_WIDTH: u16 = 24;

/// Duration of the row-clear flash (TachyonFX) in ms.
const LINE_CLEAR_FLASH_MS: u32 = 350;

/// Well size in terminal cells: (W+2) blocks across, (H+1) blocks down, walls included.
/// Saturates at `u16::MAX` rather than wrapping.
pub fn well_pixel_size(width: i32, height: i32) -> (u16, u16) {
    let blocks = |n: i32| u16::try_from(n.max(0)).unwrap_or(u16::MAX);
    let blocks_w = blocks(width.saturating_add(2));
    let blocks_h = blocks(height.saturating_add(1));
    (
        blocks_w.saturating_mul(CELL_WIDTH),
        blocks_h.saturating_mul(CELL_HEIGHT),
    )
}

/// Draw the game screen: well + sidebar, then whichever message the status calls for.
/// When `flash_row` is set and not yet flashed, starts a TachyonFX flash over that row.
pub fn draw(
    frame: &mut Frame,
    state: &GameState,
    theme: &Theme,
    paused: bool,
    flash_row: Option<i32>,
    area: Rect,
    line_clear_effect: &mut Option<Effect>,
    line_clear_process_time: &mut Option<Instant>,
    now: Instant,
) {
    let well_rect = draw_game(frame, state, theme, area);

    if let Some(row) = flash_row {
        apply_line_clear_effect(
            frame,
            state,
            well_rect,
            row,
            line_clear_effect,
            line_clear_process_time,
            now,
        );
    }

    match state.status {
        Status::Paused => draw_message(
            frame,
            theme,
            well_rect,
            &["keys:", "←↓→ to move", "↑ to rotate", "\"s\" to start"],
            Style::default().fg(theme.title).bold(),
        ),
        Status::GameOver => draw_message(
            frame,
            theme,
            well_rect,
            &["GAME OVER", "press \"s\"", "to restart"],
            Style::default().fg(Color::White).bg(Color::Red).bold(),
        ),
        Status::Running if paused => draw_message(
            frame,
            theme,
            well_rect,
            &["Paused", "P to resume"],
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        Status::Running => {}
    }
}

/// Centre the well and the sidebar in `area`. Returns the well's rect.
fn draw_game(frame: &mut Frame, state: &GameState, theme: &Theme, area: Rect) -> Rect {
    let (pw, ph) = well_pixel_size(state.well.width(), state.well.height());
    let total_w = pw.saturating_add(1).saturating_add(SIDEBAR_WIDTH);

    let horiz_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(ph),
            Constraint::Fill(1),
        ])
        .split(horiz_chunks[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(pw),
            Constraint::Length(1),
            Constraint::Length(SIDEBAR_WIDTH),
        ])
        .split(vert_chunks[1]);

    draw_well(frame, state, theme, inner[0]);
    draw_sidebar(frame, state, theme, inner[2]);
    inner[0]
}

/// Terminal rect of one well block, or None if it falls outside `area`.
fn block_rect(area: Rect, col: i32, row: i32) -> Option<Rect> {
    if col < 0 || row < 0 {
        return None;
    }
    let x = area.x.checked_add((col as u16).checked_mul(CELL_WIDTH)?)?;
    let y = area.y.checked_add((row as u16).checked_mul(CELL_HEIGHT)?)?;
    let r = Rect {
        x,
        y,
        width: CELL_WIDTH,
        height: CELL_HEIGHT,
    };
    (r.right() <= area.right() && r.bottom() <= area.bottom()).then_some(r)
}

fn draw_well(frame: &mut Frame, state: &GameState, theme: &Theme, area: Rect) {
    let buf = frame.buffer_mut();
    let bg = Style::default().bg(theme.bg);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            buf[(x, y)].set_symbol(" ").set_style(bg);
        }
    }

    let mut paint = |(col, row): (i32, i32), color: BlockColor| {
        if let Some(r) = block_rect(area, col, row) {
            let c = theme.block_color(color);
            buf.set_string(r.x, r.y, BLOCK_SYMBOL, Style::default().fg(c).bg(theme.bg));
        }
    };
    for (pos, color) in state.well.iter() {
        paint(pos, color);
    }
    for (pos, color) in state.piece.blocks() {
        paint(pos, color);
    }
}

fn draw_sidebar(frame: &mut Frame, state: &GameState, theme: &Theme, area: Rect) {
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let help_style = Style::default().fg(theme.inactive_fg);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Stats
            Constraint::Length(1), // gap
            Constraint::Length(9), // Keys
        ])
        .split(area);

    let status = match state.status {
        Status::Paused => "waiting",
        Status::Running => "running",
        Status::GameOver => "game over",
    };
    let stats_lines = vec![
        Line::from(vec![
            Span::styled("Score: ", title_style),
            Span::styled(state.score.to_string(), fg_style.bold()),
        ]),
        Line::from(vec![
            Span::styled("Pieces: ", title_style),
            Span::styled(state.pieces_locked.to_string(), fg_style),
        ]),
        Line::from(vec![
            Span::styled("Speed: ", title_style),
            Span::styled(format!("1/{} frames", state.frame_sample()), fg_style),
        ]),
        Line::from(vec![
            Span::styled("Status: ", title_style),
            Span::styled(status, fg_style),
        ]),
    ];
    Paragraph::new(Text::from(stats_lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
        )
        .render(chunks[0], frame.buffer_mut());

    let keys = [
        ("← →", "move"),
        ("↓", "down"),
        ("↑", "rotate"),
        ("s", "start / restart"),
        ("p", "pause"),
        ("q", "quit"),
    ];
    let mut key_lines = vec![Line::from(Span::styled("Keys", title_style))];
    key_lines.extend(keys.iter().map(|(key, what)| {
        Line::from(vec![
            Span::styled(format!("{key:>4} "), fg_style),
            Span::styled(*what, help_style),
        ])
    }));
    Paragraph::new(Text::from(key_lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
        )
        .render(chunks[2], frame.buffer_mut());
}

/// Centred message box over the well.
fn draw_message(frame: &mut Frame, theme: &Theme, well: Rect, lines: &[&str], head: Style) {
    let popup_w = lines
        .iter()
        .map(|l| l.chars().count() as u16)
        .max()
        .unwrap_or(0)
        + 4;
    let popup_h = lines.len() as u16 + 2;
    let popup = Rect {
        x: well.x + well.width.saturating_sub(popup_w) / 2,
        y: well.y + well.height.saturating_sub(popup_h) / 2,
        width: popup_w.min(well.width),
        height: popup_h.min(well.height),
    };
    let text: Vec<Line> = lines
        .iter()
        .enumerate()
        .map(|(i, l)| {
            let style = if i == 0 {
                head
            } else {
                Style::default().fg(theme.main_fg)
            };
            Line::from(Span::styled(*l, style))
        })
        .collect();
    Clear.render(popup, frame.buffer_mut());
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
        )
        .style(Style::default().bg(theme.bg))
        .render(popup, frame.buffer_mut());
}

/// Create or advance the row-clear flash (TachyonFX: the collapsed row fades in from white).
fn apply_line_clear_effect(
    frame: &mut Frame,
    state: &GameState,
    well_rect: Rect,
    row: i32,
    line_clear_effect: &mut Option<Effect>,
    line_clear_process_time: &mut Option<Instant>,
    now: Instant,
) {
    let Some(first) = block_rect(well_rect, 1, row) else {
        return;
    };
    let row_rect = Rect {
        width: (state.well.width().max(0) as u16 * CELL_WIDTH)
            .min(well_rect.right().saturating_sub(first.x)),
        ..first
    };

    let delta = line_clear_process_time
        .map(|t| now.saturating_duration_since(t))
        .unwrap_or(std::time::Duration::ZERO);
    let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
    *line_clear_process_time = Some(now);

    let effect = line_clear_effect.get_or_insert_with(|| {
        fx::fade_from(
            Color::White,
            Color::White,
            (LINE_CLEAR_FLASH_MS, Interpolation::Linear),
        )
        .with_area(row_rect)
    });
    frame.render_effect(effect, row_rect, TfxDuration::from_millis(delta_ms));
}

/// Plant viewer: the turtle drawing on a braille canvas plus a status line.
pub fn draw_plant(frame: &mut Frame, plant: &PlantView, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(3)])
        .split(area);

    let sys = &plant.system;
    let title = format!(
        " {} symbols  step {}  angle {}°  iterations {} ",
        plant.symbols, sys.step, sys.angle_deg, sys.iterations
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line))
        .title(Span::styled(title, Style::default().fg(theme.title)));
    let inner = block.inner(chunks[0]);
    let ([x0, x1], [y0, y1]) = fit_bounds(plant.drawing.bounds(), inner);

    let stem = theme.block_color(BlockColor::Green);
    let bud = theme.main_fg;
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(theme.bg)
        .x_bounds([x0, x1])
        .y_bounds([y0, y1])
        .paint(|ctx| {
            for s in &plant.drawing.segments {
                ctx.draw(&CanvasLine::new(s.from.0, s.from.1, s.to.0, s.to.1, stem));
            }
            for &(x, y) in &plant.drawing.dots {
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: sys.step,
                    color: bud,
                });
            }
        });
    frame.render_widget(canvas, chunks[0]);

    let status = plant.error.as_ref().map_or_else(
        || {
            Line::from(Span::styled(
                "z/x step ×2 ÷2   a/s angle   w/e iterations   q quit",
                Style::default().fg(theme.inactive_fg),
            ))
        },
        |err| Line::from(Span::styled(err.as_str(), Style::default().fg(Color::Red))),
    );
    Paragraph::new(status)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line)),
        )
        .render(chunks[1], frame.buffer_mut());
}

/// Pad the drawing bounds so braille dots (2 per cell across, 4 down) come out square.
fn fit_bounds(
    (min_x, max_x, min_y, max_y): (f64, f64, f64, f64),
    area: Rect,
) -> ([f64; 2], [f64; 2]) {
    let dots_w = f64::from(area.width.max(1)) * 2.0;
    let dots_h = f64::from(area.height.max(1)) * 4.0;
    let span_x = (max_x - min_x).max(1.0) * 1.05;
    let span_y = (max_y - min_y).max(1.0) * 1.05;
    let scale = f64::max(span_x / dots_w, span_y / dots_h);
    let (half_w, half_h) = (scale * dots_w / 2.0, scale * dots_h / 2.0);
    let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
    ([cx - half_w, cx + half_w], [cy - half_h, cy + half_h])
}
