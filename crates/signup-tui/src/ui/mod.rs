use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use signup_core::{Field, OrderField, OrderRow};

use crate::app::{App, Focus};
use crate::util::mask_secret;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(size);

    render_header(frame, chunks[0], app);
    render_form(frame, chunks[1], app);
    render_footer(frame, chunks[2], app);

    if app.show_help {
        render_help(frame, size);
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let title = format!("Create user  orders: {}", app.form.orders().len());
    let block = Block::default().borders(Borders::ALL).title("signup");
    frame.render_widget(Paragraph::new(Line::from(title)).block(block), area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let hint = "tab/shift+tab move  enter select  ctrl+a add order  ctrl+d remove order  ctrl+s save  esc quit  F1 help";
    let mut lines = vec![Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    ))];

    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        )));
    }
    if let Some(err) = &app.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let form = &app.form;
    let mut lines = Vec::new();

    for field in Field::ALL {
        let raw = form.field(field);
        let value = if field == Field::Password && app.mask_password {
            mask_secret(raw)
        } else {
            raw.to_string()
        };
        lines.push(field_line(
            field_label(field),
            &value,
            app.focus == Focus::Field(field),
        ));
        push_error(&mut lines, form.field_error(field), 2);
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Orders  ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            "[Add new order]",
            button_style(app.focus == Focus::AddOrder, Color::LightGreen, Color::Green),
        ),
    ]));

    for (index, row) in form.orders().iter().enumerate() {
        lines.push(order_line(index, row, app.focus));
        push_error(&mut lines, form.row_error(row.id, OrderField::Title), 5);
        push_error(&mut lines, form.row_error(row.id, OrderField::Total), 5);
    }
    push_error(&mut lines, form.orders_error(), 2);

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Save]",
        button_style(app.focus == Focus::Save, Color::LightGreen, Color::Green),
    )));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Form"))
        .scroll((form_scroll(app, area), 0));
    frame.render_widget(paragraph, area);
}

// Keep the focused order row on screen when the list outgrows the area.
fn form_scroll(app: &App, area: Rect) -> u16 {
    let visible = area.height.saturating_sub(2) as usize;
    let Some(index) = app.focused_order_index() else {
        return 0;
    };
    let row_line = 11 + index * 3;
    row_line.saturating_sub(visible.saturating_sub(2)) as u16
}

fn field_label(field: Field) -> &'static str {
    match field {
        Field::Name => "Name",
        Field::Email => "E-mail",
        Field::Password => "Password",
    }
}

fn order_line(index: usize, row: &OrderRow, focus: Focus) -> Line<'static> {
    let title_focused = focus == Focus::Order(row.id, OrderField::Title);
    let total_focused = focus == Focus::Order(row.id, OrderField::Total);
    Line::from(vec![
        Span::raw(format!("  {}. ", index + 1)),
        Span::styled("Title: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("{:<20}", row.title), input_style(title_focused)),
        Span::styled("  Total: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(row.total.clone(), input_style(total_focused)),
    ])
}

fn push_error(lines: &mut Vec<Line<'static>>, message: Option<&str>, indent: usize) {
    if let Some(message) = message {
        lines.push(Line::from(Span::styled(
            format!("{}{}", " ".repeat(indent), message),
            Style::default().fg(Color::Red),
        )));
    }
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let modal = centered_rect(70, 60, area);
    frame.render_widget(Clear, modal);

    let text = vec![
        Line::from("Global: esc quit, Ctrl+C quit, F1 help"),
        Line::from("Move: tab/down next input, shift+tab/up previous input"),
        Line::from("Edit: type to insert, backspace delete, Ctrl+W delete word, Ctrl+U clear"),
        Line::from("Orders: Ctrl+A or enter on [Add new order] adds a row, Ctrl+D removes the focused row"),
        Line::from("Save: Ctrl+S or enter on [Save]"),
        Line::from(""),
        Line::from("Rules: name required, valid e-mail, password of 6+ characters, at least one order, totals between 1 and 100"),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal);
}

fn input_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn button_style(focused: bool, focus_bg: Color, idle_fg: Color) -> Style {
    if focused {
        Style::default().fg(Color::Black).bg(focus_bg)
    } else {
        Style::default().fg(idle_fg)
    }
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), input_style(focused)),
    ])
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
