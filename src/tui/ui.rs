//! UI rendering

use super::app::{App, Picker, Screen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use sheetchart_extract::CellRef;

pub(crate) const TOP_BAR_HEIGHT: u16 = 3;
pub(crate) const BODY_MIN_HEIGHT: u16 = 10;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const ROW_HEADER_WIDTH: u16 = 5;
const MIN_COLUMN_WIDTH: usize = 6;
const MAX_COLUMN_WIDTH: usize = 24;

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TOP_BAR_HEIGHT),
            Constraint::Min(BODY_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Draw the application UI
pub fn draw(f: &mut Frame, app: &App) {
    let [top, body, status] = split_main_chunks(f.area());

    match app.screen {
        Screen::OpenFile => {
            draw_file_prompt(f, app, top);
            draw_intro(f, body);
        }
        Screen::Preview => {
            draw_picker_bar(f, app, top);
            draw_preview(f, app, body);
        }
        Screen::Chart => {
            draw_chart_bar(f, app, top);
            draw_chart(f, app, body);
        }
    }
    draw_status_bar(f, app, status);
}

fn draw_file_prompt(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Open file ")
        .border_style(Style::default().fg(Color::Yellow));
    let paragraph = Paragraph::new(format!("{}│", app.path_buffer)).block(block);
    f.render_widget(paragraph, area);
}

fn draw_intro(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("Type the path of an xlsx, xlsm, xlsb, xls or ods file and press Enter."),
        Line::from("The first sheet is previewed; its first row supplies the column keys."),
    ];
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Sheetchart "));
    f.render_widget(paragraph, area);
}

fn picker_span(label: &str, value: Option<&str>, focused: bool) -> Vec<Span<'static>> {
    let value_style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("◀ {} ▶", value.unwrap_or("-")), value_style),
    ]
}

fn draw_picker_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = picker_span(
        "Dimension",
        app.selected_dimension(),
        app.focus == Picker::Dimension,
    );
    spans.push(Span::raw("   "));
    spans.extend(picker_span(
        "Measure",
        app.selected_measure(),
        app.focus == Picker::Measure,
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Columns ")
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_preview(f: &mut Frame, app: &App, area: Rect) {
    let Some(preview) = app.preview() else {
        return;
    };
    let title = match &preview.range {
        Some(range) => format!(" {} ({}) ", preview.sheet_name, range),
        None => format!(" {} ", preview.sheet_name),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if preview.is_empty() {
        f.render_widget(Paragraph::new("Empty sheet").block(block), area);
        return;
    }

    let dimension = app.selected_dimension();
    let measure = app.selected_measure();
    let key_style = |key: &str| {
        if Some(key) == dimension || Some(key) == measure {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let mut header_cells = vec![Cell::from(" ")];
    header_cells.extend(
        preview
            .column_keys
            .iter()
            .map(|key| Cell::from(key.clone()).style(key_style(key))),
    );
    let header = Row::new(header_cells).height(1);

    let visible = area.height.saturating_sub(3) as usize;
    let rows: Vec<Row> = preview
        .rows
        .iter()
        .enumerate()
        .skip(app.row_offset)
        .take(visible.max(1))
        .map(|(idx, record)| {
            let mut cells = vec![
                Cell::from(format!("{}", idx + 1)).style(Style::default().fg(Color::DarkGray)),
            ];
            cells.extend(preview.column_keys.iter().map(|key| {
                let text = record.get(key).map(|v| v.to_label()).unwrap_or_default();
                Cell::from(text)
            }));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(ROW_HEADER_WIDTH)];
    widths.extend(preview.column_keys.iter().map(|key| {
        let width = key.chars().count().clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
        Constraint::Length(width as u16)
    }));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}

fn draw_chart_bar(f: &mut Frame, app: &App, area: Rect) {
    let config = app.session.config();
    let text = format!(
        "{} / {} - {}  [{}]",
        config.document_location,
        config.document_name,
        config.user.shown_name(),
        app.session.chart_type()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Chart ")
        .border_style(Style::default().fg(Color::Green));
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_chart(f: &mut Frame, app: &App, area: Rect) {
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    let text = app.chart_text(inner_width, inner_height);

    let title = match app.file_path.as_ref().and_then(|p| p.file_name()) {
        Some(name) => format!(" {} ", name.to_string_lossy()),
        None => " Chart ".to_string(),
    };
    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (mode, color) = match app.screen {
        Screen::OpenFile => (" OPEN ", Color::Yellow),
        Screen::Preview => (" PREVIEW ", Color::Cyan),
        Screen::Chart => (" CHART ", Color::Green),
    };

    let message = match &app.add_row_buffer {
        Some(buffer) => format!("label, value: {}│", buffer),
        None if app.status_message.is_empty() => hint(app).to_string(),
        None => app.status_message.clone(),
    };

    let position = match (app.screen, app.preview()) {
        (Screen::Preview, Some(preview)) if !preview.is_empty() => format!(
            " row {}/{} col {} ",
            app.row_offset + 1,
            preview.row_count(),
            CellRef::col_to_letters(match app.focus {
                Picker::Dimension => app.dimension_idx,
                Picker::Measure => app.measure_idx,
            })
        ),
        _ => String::new(),
    };

    let line = Line::from(vec![
        Span::styled(
            mode,
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(message),
        Span::styled(position, Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn hint(app: &App) -> &'static str {
    match app.screen {
        Screen::OpenFile => "Enter: open  Esc: quit",
        Screen::Preview => "Tab: switch picker  ←/→: column  ↑/↓: scroll  Enter: chart  q: back",
        Screen::Chart => "t: chart type  a: add row  q: back",
    }
}
