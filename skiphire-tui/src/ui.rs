use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};
use rust_decimal::{Decimal, RoundingStrategy};
use skiphire_core::{
    model::{LoadStatus, Tag},
    view_model::{OfferingView, Snapshot},
};

use crate::app::{App, Pane};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let query = app.service.query();
    let header =
        Paragraph::new("Choose your skip size · select the one that best suits your needs").block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("skiphire – {} {}", query.postcode, query.area)),
        );
    frame.render_widget(header, *header_area);

    let snapshot = app.service.snapshot();

    match snapshot.load_status {
        LoadStatus::Loading => draw_notice(frame, *content_area, "Loading…"),
        LoadStatus::Failed => draw_notice(frame, *content_area, "No skips available."),
        LoadStatus::Ready if snapshot.offerings.is_empty() => {
            draw_notice(frame, *content_area, "No skips available.");
        }
        LoadStatus::Ready => draw_catalog(frame, app, &snapshot, *content_area),
    }

    // Status bar
    let nav_hint = if snapshot.details_visible {
        "↑/↓ move · Enter select · b book · c clear · Tab switch pane · q quit"
    } else {
        "↑/↓ move · Enter/Space select · q/Ctrl-C quit"
    };

    let status_text = match (&snapshot.load_status, &app.message) {
        (LoadStatus::Loading, _) => format!("Loading… · {nav_hint}"),
        (_, Some(msg)) => format!("{msg} · {nav_hint}"),
        (LoadStatus::Failed, None) => format!("Could not reach the skip catalog · {nav_hint}"),
        _ => nav_hint.to_owned(),
    };

    let status_style = match snapshot.load_status {
        LoadStatus::Loading => Style::default().fg(Color::Yellow),
        LoadStatus::Failed => Style::default().fg(Color::Red),
        LoadStatus::Ready if app.message.is_some() => Style::default().fg(Color::Cyan),
        LoadStatus::Ready => Style::default(),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_notice(frame: &mut Frame<'_>, area: Rect, text: &str) {
    let paragraph = Paragraph::new(text.to_owned())
        .block(Block::default().borders(Borders::ALL).title("Skips"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_catalog(frame: &mut Frame<'_>, app: &App, snapshot: &Snapshot<'_>, area: Rect) {
    let Some(selected) = &snapshot.selected else {
        draw_offerings(frame, app, snapshot, area);
        return;
    };

    let layout_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [list_area, details_area] = chunks else {
        return;
    };

    draw_offerings(frame, app, snapshot, *list_area);
    draw_details(frame, app, selected, *details_area);
}

fn draw_offerings(frame: &mut Frame<'_>, app: &App, snapshot: &Snapshot<'_>, area: Rect) {
    let rows = snapshot.offerings.iter().map(|view| {
        let offering = &view.offering.offering;
        let marker = if view.selected { "●" } else { " " };

        let style = if offering.forbidden {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT)
        } else if view.selected {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        Row::new(vec![
            Cell::from(marker),
            Cell::from(format!("{} Yard Skip", offering.size)),
            Cell::from(money(view.price_including_tax)),
            Cell::from(format!("{} days", offering.hire_period_days)),
            Cell::from(tag_line(&view.tags)),
        ])
        .style(style)
    });

    let column_widths = [
        Constraint::Length(1),
        Constraint::Length(13),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Min(10),
    ];

    let border_style = if app.focus == Pane::Offerings {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["", "Size", "inc VAT", "Hire", "Tags"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Skips (↑/↓, Enter to select)"),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .column_spacing(1);

    let mut state = TableState::default().with_selected(Some(app.cursor));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_details(frame: &mut Frame<'_>, app: &App, view: &OfferingView<'_>, area: Rect) {
    let offering = &view.offering.offering;

    let lines = vec![
        detail("Price (before VAT)", money(offering.price_before_tax)),
        detail("VAT", format!("{}%", offering.tax_rate_percent.normalize())),
        detail("Price (inc VAT)", money(view.price_including_tax)),
        detail("Hire period", format!("{} days", offering.hire_period_days)),
        detail("Allowed on road", yes_no(offering.allowed_on_road)),
        detail("Allows heavy waste", yes_no(offering.allows_heavy_waste)),
        detail("Per tonne cost", optional_money(offering.per_tonne_cost)),
        detail("Transport cost", optional_money(offering.transport_cost)),
        detail(
            "Location",
            format!("{} {}", offering.postcode, offering.area)
                .trim()
                .to_owned(),
        ),
        Line::default(),
        Line::from(tag_line(&view.tags)).style(Style::default().fg(Color::Magenta)),
        Line::default(),
        Line::from("b book now · c clear selection")
            .style(Style::default().add_modifier(Modifier::ITALIC)),
    ];

    let border_style = if app.focus == Pane::Details {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!("Details for {} Yard Skip", offering.size)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn detail(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

fn money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("£{rounded:.2}")
}

fn optional_money(value: Option<Decimal>) -> String {
    value.map_or_else(|| "Not specified".to_owned(), money)
}

fn yes_no(flag: bool) -> String {
    let answer = if flag { "Yes" } else { "No" };
    answer.to_owned()
}

fn tag_line(tags: &[Tag]) -> String {
    tags.iter()
        .map(|tag| tag_label(*tag))
        .collect::<Vec<_>>()
        .join(" · ")
}

fn tag_label(tag: Tag) -> &'static str {
    match tag {
        Tag::RoadApproved => "Road Approved",
        Tag::RoadDenied => "Not Road Approved",
        Tag::HeavyWasteAllowed => "Heavy Waste",
        Tag::MostPopular => "Most Popular",
        Tag::BestValue => "Best Value",
        Tag::Unavailable => "Unavailable",
    }
}
