//! Adventure map drawing with Ratatui.
//!
//! Panels are drawn bottom to top of the z-order, so whatever the runtime
//! routes a click to is also what the player sees on top.
use game_core::{Color as KingdomColor, Focus, Position, Terrain, TileAction};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};
use runtime::{
    Frame as AdventureFrame, PanelKind, ScreenRect,
    human::{
        PanelView, TILE_CELLS,
        interface::{BUTTONS, CONTROL_CELL_WIDTH, IconsPanel, StatusMode},
    },
};

/// Labels of the control panel cells, matching its click targets.
const CONTROL_LABELS: [&str; 5] = ["Rad", "Ico", "Btn", "Sta", "End"];

pub fn draw_adventure(frame: &mut Frame, view: &AdventureFrame<'_>) {
    let screen = frame.area();
    let panels = view.interface.panels();
    for panel in panels.iter().rev().filter(|panel| panel.visible) {
        let area = to_rect(panel.rect).intersection(screen);
        if area.is_empty() {
            continue;
        }
        draw_panel(frame.buffer_mut(), area, panel, view);
    }
}

/// Blank screen shown between two hot-seat players.
pub fn draw_hidden(frame: &mut Frame) {
    let area = frame.area();
    let line = Line::from("Please pass the keyboard to the next player")
        .style(Style::default().fg(Color::DarkGray));
    let middle = Rect::new(area.x, area.y + area.height / 2, area.width, 1).intersection(area);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), middle);
}

/// Flavor of a modal popup. Sets the border color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Warning,
    Question,
}

pub struct Popup<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub tone: Tone,
}

impl Popup<'_> {
    fn hint(&self) -> &'static str {
        match self.tone {
            Tone::Question => "[y] yes   [n] no",
            Tone::Info | Tone::Warning => "[Enter] continue",
        }
    }
}

pub fn draw_popup(frame: &mut Frame, popup: &Popup<'_>) {
    let screen = frame.area();
    let width = screen.width.min(56);
    // Border, text, a blank line and the hint.
    let text_width = usize::from(width.saturating_sub(4)).max(1);
    let lines = popup.text.len().div_ceil(text_width).max(1) as u16;
    let height = (lines + 4).min(screen.height);
    let area = Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + (screen.height - height) / 2,
        width,
        height,
    );

    let border = match popup.tone {
        Tone::Info => Color::Cyan,
        Tone::Warning => Color::Red,
        Tone::Question => Color::Yellow,
    };
    let block = Block::bordered()
        .title(format!(" {} ", popup.title))
        .border_style(Style::default().fg(border));
    let body = vec![
        Line::from(popup.text),
        Line::from(""),
        Line::from(Span::styled(
            popup.hint(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(body)
            .block(block)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_panel(buf: &mut Buffer, area: Rect, panel: &PanelView, view: &AdventureFrame<'_>) {
    if panel.kind == PanelKind::GameArea {
        draw_map(buf, area, view);
        return;
    }

    let title = match panel.kind {
        PanelKind::Status => format!(" {} ", view.interface.status().mode()),
        PanelKind::Buttons => String::new(),
        PanelKind::Icons => " Kingdom ".to_string(),
        PanelKind::Radar => " Radar ".to_string(),
        PanelKind::Control => String::new(),
        PanelKind::GameArea => return,
    };
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(kingdom_color(view.color)));
    let inner = block.inner(area);
    Clear.render(area, buf);
    block.render(area, buf);
    if inner.is_empty() {
        return;
    }

    match panel.kind {
        PanelKind::Status => draw_status(buf, inner, view),
        PanelKind::Buttons => draw_buttons(buf, inner),
        PanelKind::Icons => draw_icons(buf, inner, view),
        PanelKind::Radar => draw_radar(buf, inner, view),
        PanelKind::Control => draw_control(buf, inner),
        PanelKind::GameArea => {}
    }
}

fn draw_map(buf: &mut Buffer, area: Rect, view: &AdventureFrame<'_>) {
    let game_area = view.interface.game_area();
    let origin = game_area.viewport().origin();
    let cursor = game_area.cursor();
    let route = visible_route(view);

    for row in 0..area.height {
        for column in 0..area.width / TILE_CELLS {
            let position = origin.offset(i32::from(column), i32::from(row));
            let (symbol, mut style) = tile_glyph(view, position, &route);
            if cursor == Some(position) {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            buf.set_string(area.x + column * TILE_CELLS, area.y + row, symbol, style);
        }
    }
}

/// Remaining steps of the focused hero, if its route is shown.
fn visible_route(view: &AdventureFrame<'_>) -> Vec<Position> {
    let Focus::Hero(id) = view.focus else {
        return Vec::new();
    };
    match view.world.hero(id) {
        Ok(hero) if hero.route_visible => hero.route.steps().collect(),
        _ => Vec::new(),
    }
}

fn tile_glyph(
    view: &AdventureFrame<'_>,
    position: Position,
    route: &[Position],
) -> (String, Style) {
    let Some(tile) = view.world.map.tile(position) else {
        return ("  ".into(), Style::default());
    };
    if view.is_fogged(position) {
        return (
            "░░".into(),
            Style::default().fg(Color::DarkGray).bg(Color::Black),
        );
    }

    let base = Style::default()
        .bg(terrain_color(tile.terrain))
        .fg(Color::White);

    if let Some(id) = view.world.hero_at(position)
        && let Ok(hero) = view.world.hero(id)
    {
        let initial = hero.name.chars().next().unwrap_or('?');
        let mut style = base
            .fg(hero.owner.map_or(Color::White, kingdom_color))
            .add_modifier(Modifier::BOLD);
        if view.focus == Focus::Hero(id) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        return (format!("@{initial}"), style);
    }

    match &tile.action {
        Some(TileAction::Castle(id)) => {
            let owner = view.world.castle(*id).ok().and_then(|castle| castle.owner);
            let mut style = base
                .fg(owner.map_or(Color::Gray, kingdom_color))
                .add_modifier(Modifier::BOLD);
            if view.focus == Focus::Castle(*id) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ("##".into(), style)
        }
        Some(TileAction::Resource { .. }) => ("$ ".into(), base.fg(Color::Yellow)),
        Some(TileAction::Artifact(_)) => ("* ".into(), base.fg(Color::Magenta)),
        Some(TileAction::Event { .. }) => ("? ".into(), base),
        None if route.contains(&position) => ("··".into(), base),
        None if tile.blocked => ("^^".into(), base.fg(Color::Gray)),
        None if tile.terrain.is_water() => ("~~".into(), base.fg(Color::LightBlue)),
        None => ("  ".into(), base),
    }
}

fn draw_radar(buf: &mut Buffer, inner: Rect, view: &AdventureFrame<'_>) {
    let (width, height) = (view.world.map.width(), view.world.map.height());
    let viewport = view.interface.game_area().viewport();

    for y in 0..inner.height {
        for x in 0..inner.width {
            // Same scaling as the radar's click mapping.
            let position = Position::new(
                (u32::from(x) * width / u32::from(inner.width)) as i32,
                (u32::from(y) * height / u32::from(inner.height)) as i32,
            );
            let symbol = if viewport.contains(position) { "·" } else { " " };
            let style = Style::default()
                .bg(radar_color(view, position))
                .fg(Color::White);
            buf.set_string(inner.x + x, inner.y + y, symbol, style);
        }
    }
}

fn radar_color(view: &AdventureFrame<'_>, position: Position) -> Color {
    if view.is_fogged(position) {
        return Color::Black;
    }
    let world = view.world;
    if let Some(owner) = world
        .hero_at(position)
        .and_then(|id| world.hero(id).ok())
        .and_then(|hero| hero.owner)
    {
        return kingdom_color(owner);
    }
    if let Some(castle) = world
        .castle_at(position)
        .and_then(|id| world.castle(id).ok())
    {
        return castle.owner.map_or(Color::Gray, kingdom_color);
    }
    world
        .map
        .tile(position)
        .map_or(Color::Black, |tile| terrain_color(tile.terrain))
}

fn draw_icons(buf: &mut Buffer, inner: Rect, view: &AdventureFrame<'_>) {
    let world = view.world;
    let lines: Vec<Line> = IconsPanel::entries(world, view.color)
        .into_iter()
        .map(|entry| {
            let text = match entry {
                Focus::Hero(id) => world.hero(id).map_or_else(
                    |_| String::new(),
                    |hero| {
                        let sleeping = if hero.sleeping { " z" } else { "" };
                        format!(
                            "{} {}/{}{sleeping}",
                            hero.name, hero.move_points, hero.max_move_points
                        )
                    },
                ),
                Focus::Castle(id) => world
                    .castle(id)
                    .map_or_else(|_| String::new(), |castle| castle.name.clone()),
                Focus::None => String::new(),
            };
            let style = if entry == view.focus {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::styled(text, style)
        })
        .collect();
    Paragraph::new(lines).render(inner, buf);
}

fn draw_buttons(buf: &mut Buffer, inner: Rect) {
    let count = BUTTONS.len() as u16;
    for (index, (label, _)) in BUTTONS.iter().enumerate() {
        let index = index as u16;
        let start = inner.x + index * inner.width / count;
        let end = inner.x + (index + 1) * inner.width / count;
        let cell = Rect::new(start, inner.y, end - start, 1);
        Paragraph::new(*label)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .render(cell.intersection(inner), buf);
    }
}

fn draw_status(buf: &mut Buffer, inner: Rect, view: &AdventureFrame<'_>) {
    let world = view.world;
    let kingdom = world.kingdom(view.color);
    let lines = match view.interface.status().mode() {
        StatusMode::Day => vec![
            Line::from(format!("Day {}", world.day)),
            Line::from(Span::styled(
                format!("{} to move", view.color.name()),
                Style::default().fg(kingdom_color(view.color)),
            )),
        ],
        StatusMode::Funds => vec![
            Line::from(format!("Gold {}", kingdom.map_or(0, |k| k.gold))),
            Line::from(format!(
                "Castles {}  Heroes {}",
                kingdom.map_or(0, |k| k.castles.len()),
                kingdom.map_or(0, |k| k.heroes.len()),
            )),
        ],
        StatusMode::Focus => match view.focus {
            Focus::Hero(id) => match world.hero(id) {
                Ok(hero) => vec![
                    Line::from(hero.name.clone()),
                    Line::from(format!(
                        "Moves {}/{}",
                        hero.move_points, hero.max_move_points
                    )),
                    Line::from(format!("Artifacts {}", hero.artifacts.len())),
                ],
                Err(_) => Vec::new(),
            },
            Focus::Castle(id) => match world.castle(id) {
                Ok(castle) => vec![
                    Line::from(castle.name.clone()),
                    Line::from(format!("At {}", castle.position)),
                ],
                Err(_) => Vec::new(),
            },
            Focus::None => vec![Line::from("Nothing selected")],
        },
    };
    Paragraph::new(lines).render(inner, buf);
}

fn draw_control(buf: &mut Buffer, inner: Rect) {
    for (index, label) in CONTROL_LABELS.iter().enumerate() {
        let x = inner.x + index as u16 * CONTROL_CELL_WIDTH;
        if x >= inner.right() {
            break;
        }
        buf.set_string(x, inner.y, *label, Style::default().add_modifier(Modifier::BOLD));
    }
}

fn to_rect(rect: ScreenRect) -> Rect {
    Rect::new(rect.x, rect.y, rect.width, rect.height)
}

pub fn kingdom_color(color: KingdomColor) -> Color {
    match color {
        KingdomColor::Blue => Color::LightBlue,
        KingdomColor::Green => Color::LightGreen,
        KingdomColor::Red => Color::LightRed,
        KingdomColor::Yellow => Color::Yellow,
        KingdomColor::Orange => Color::Rgb(255, 150, 40),
        KingdomColor::Purple => Color::Magenta,
    }
}

fn terrain_color(terrain: Terrain) -> Color {
    match terrain {
        Terrain::Grass => Color::Rgb(40, 90, 40),
        Terrain::Dirt => Color::Rgb(110, 80, 50),
        Terrain::Rough => Color::Rgb(100, 95, 70),
        Terrain::Sand => Color::Rgb(170, 150, 95),
        Terrain::Snow => Color::Rgb(200, 200, 215),
        Terrain::Swamp => Color::Rgb(55, 75, 55),
        Terrain::Water => Color::Rgb(30, 60, 140),
    }
}
