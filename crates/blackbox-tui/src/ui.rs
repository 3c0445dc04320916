//! Rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, List, ListItem, ListState, Paragraph, Wrap},
};

use blackbox_core::selection::SelectionStore;

use crate::app::{App, Focus};

const HELP: &str =
    "Tab switch pane | ↑/↓ move | Enter add | d remove | c combined JSON | q quit";

pub fn draw<S: SelectionStore>(f: &mut Frame, app: &App<S>) {
    let [main, footer] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(2)]).areas(f.area());

    if app.show_combined() {
        let [palette, blackbox, combined] = Layout::horizontal([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .areas(main);
        draw_palette(f, app, palette);
        draw_blackbox(f, app, blackbox);
        draw_combined(f, app, combined);
    } else {
        let [palette, blackbox] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(main);
        draw_palette(f, app, palette);
        draw_blackbox(f, app, blackbox);
    }

    draw_footer(f, app, footer);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::new().fg(Color::Cyan)
    } else {
        Style::new().fg(Color::DarkGray)
    };
    Block::bordered().title(title).border_style(border)
}

fn highlight(focused: bool) -> Style {
    if focused {
        Style::new().add_modifier(Modifier::REVERSED)
    } else {
        Style::new()
    }
}

fn draw_palette<S: SelectionStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let focused = app.focus() == Focus::Palette;
    let items: Vec<ListItem> = app
        .catalog()
        .iter()
        .map(|server| {
            let marker = if app.selection().contains(&server.id) {
                "✓ "
            } else {
                "  "
            };
            ListItem::new(Line::from(vec![
                marker.green(),
                server.name.clone().bold(),
                format!("  {}", server.description).dark_gray(),
            ]))
        })
        .collect();

    let title = format!(" Palette ({}) ", app.catalog().len());
    let list = List::new(items)
        .block(pane_block(title, focused))
        .highlight_style(highlight(focused))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(
        (!app.catalog().is_empty()).then_some(app.palette_index()),
    );
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_blackbox<S: SelectionStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let focused = app.focus() == Focus::Blackbox;
    let selection = app.selection();
    let title = format!(" Blackbox ({}) ", selection.len());

    if selection.is_empty() {
        let hint = Paragraph::new("Drop servers here from the palette (Enter)")
            .dark_gray()
            .block(pane_block(title, focused))
            .centered();
        f.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = selection
        .ids()
        .iter()
        .map(|id| match app.descriptor(id) {
            Some(server) => ListItem::new(Line::from(vec![
                server.name.clone().bold(),
                format!("  {}", id).dark_gray(),
            ])),
            None => ListItem::new(Line::from(vec![
                id.clone().yellow(),
                "  not in catalog".dark_gray(),
            ])),
        })
        .collect();

    let list = List::new(items)
        .block(pane_block(title, focused))
        .highlight_style(highlight(focused))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.blackbox_index()));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_combined<S: SelectionStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let json = Paragraph::new(app.combined_json())
        .block(Block::bordered().title(" Combined configuration "))
        .wrap(Wrap { trim: false });
    f.render_widget(json, area);
}

fn draw_footer<S: SelectionStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let mut lines = vec![Line::from(HELP.dark_gray())];
    if let Some(status) = app.status() {
        lines.insert(0, Line::from(status.to_string().green()));
    }
    f.render_widget(Paragraph::new(lines), area);
}
