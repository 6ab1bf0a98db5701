use crate::ui::app::{App, FocusPanel};
use crate::ui::tree_view::{TreeView, VisibleRow};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
        Table,
    },
    Frame,
};

// Brandbook colors
const BRAND_DARK: Color = Color::Rgb(0x1F, 0x2F, 0x3C); // #1f2f3c
const BRAND_SELECT_BG: Color = Color::Rgb(0xC3, 0xD3, 0xE0); // #c3d3e0
const BRAND_GREEN: Color = Color::Rgb(0x82, 0x9A, 0x68); // #829a68
const BRAND_ORANGE: Color = Color::Rgb(0x9E, 0x68, 0x3C); // #9e683c
const BRAND_MUTED: Color = Color::Rgb(0x71, 0x65, 0x65); // #716565

const TITLE_STYLE: Style = Style::new().fg(BRAND_DARK).add_modifier(Modifier::BOLD);
const COLUMN_STYLE: Style = Style::new()
    .fg(BRAND_DARK)
    .add_modifier(Modifier::BOLD.union(Modifier::UNDERLINED));
const SELECTED_STYLE: Style = Style::new()
    .bg(BRAND_SELECT_BG)
    .fg(BRAND_DARK)
    .add_modifier(Modifier::BOLD);
const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
const VALUE_STYLE: Style = Style::new().fg(BRAND_GREEN);
const ID_STYLE: Style = Style::new().fg(BRAND_MUTED);
const HELP_STYLE: Style = Style::new().fg(BRAND_MUTED);

const INDENT: &str = "  ";
const TREE_WIDTHS: [Constraint; 3] = [
    Constraint::Percentage(45),
    Constraint::Percentage(25),
    Constraint::Percentage(30),
];

const HELP: &str =
    " ↑↓ Select | Space Add/Remove | ←→ Collapse/Expand | e Expand all | Tab Panel | q Quit ";

pub fn draw_viewer(frame: &mut Frame, app: &App) {
    let [title_area, objects_area, properties_area, help_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Percentage(50),
        Constraint::Min(6),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    draw_title(frame, title_area, app);
    draw_tree(
        frame,
        objects_area,
        &app.objects,
        app.focus_panel == FocusPanel::Objects,
    );
    draw_tree(
        frame,
        properties_area,
        &app.properties,
        app.focus_panel == FocusPanel::Properties,
    );
    draw_help(frame, help_area, app.objects.selected_rows().len());
}

fn draw_title(frame: &mut Frame, area: Rect, app: &App) {
    let model = &app.model;
    let text = format!(
        " IFC Tree View | {} | {} | {} instances ",
        model.file_name(),
        model.schema(),
        model.len()
    );

    let title = Paragraph::new(text)
        .style(TITLE_STYLE)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn draw_tree(frame: &mut Frame, area: Rect, view: &TreeView, is_focused: bool) {
    let visible = view.visible();
    let cursor = if is_focused { view.cursor_index() } else { None };

    // borders plus the column header row
    let page = usize::from(area.height).saturating_sub(3);
    let first = match view.cursor_index() {
        Some(index) if index >= page => index + 1 - page,
        _ => 0,
    };

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .skip(first)
        .take(page)
        .map(|(index, entry)| {
            let mut style = if view.is_selected(&entry.path) {
                SELECTED_STYLE
            } else {
                Style::default()
            };
            if cursor == Some(index) {
                style = style.patch(CURSOR_STYLE);
            }
            tree_row(entry).style(style)
        })
        .collect();

    let border_style = if is_focused {
        Style::new().fg(BRAND_ORANGE)
    } else {
        Style::new()
    };
    let table = Table::new(rows, TREE_WIDTHS)
        .header(Row::new(view.headers).style(COLUMN_STYLE))
        .block(
            Block::default()
                .title(Line::from(view.title))
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    frame.render_widget(table, area);

    if visible.len() > page && area.height > 3 {
        draw_scrollbar(frame, area, visible.len(), view.cursor_index().unwrap_or(0));
    }
}

fn tree_row<'a>(entry: &VisibleRow<'a>) -> Row<'a> {
    let marker = match (entry.row.children.is_empty(), entry.expanded) {
        (true, _) => "  ",
        (false, true) => "▾ ",
        (false, false) => "▸ ",
    };
    let label = format!("{}{marker}{}", INDENT.repeat(entry.depth()), entry.row.label);

    Row::new([
        Cell::from(label),
        Cell::from(Span::styled(entry.row.value.as_str(), VALUE_STYLE)),
        Cell::from(Span::styled(entry.row.id.as_str(), ID_STYLE)),
    ])
}

fn draw_scrollbar(frame: &mut Frame, area: Rect, len: usize, position: usize) {
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"));
    let mut state = ScrollbarState::new(len).position(position);

    // skip the top border and the column header
    let track = Rect {
        x: area.right() - 1,
        y: area.y + 2,
        width: 1,
        height: area.height - 3,
    };
    frame.render_stateful_widget(scrollbar, track, &mut state);
}

fn draw_help(frame: &mut Frame, area: Rect, selected: usize) {
    let line = Line::from(vec![
        Span::styled(HELP, HELP_STYLE),
        Span::styled(format!("| {selected} selected "), TITLE_STYLE),
    ]);

    let help = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}
