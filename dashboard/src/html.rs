//! HTML rendering of a [`Page`].

use crate::chart::ChartRenderer;
use crate::page::{Card, Page, Section, Table};
use crate::state::NavEvent;

/// Seconds between reloads while data is loading.
const LOADING_REFRESH_SECS: u32 = 1;

const STYLE: &str = r#"
    :root {
      --bg: #f8fafc;
      --panel: #ffffff;
      --ink: #0f172a;
      --muted: #64748b;
      --border: #e2e8f0;
      --accent: #7c3aed;
      --danger: #b91c1c;
      --mono: ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, monospace;
      --sans: "Inter", "Segoe UI", sans-serif;
    }
    body { margin: 0; color: var(--ink); font-family: var(--sans); background: var(--bg); }
    .wrap { max-width: 1180px; margin: 0 auto; padding: 24px; }
    h1 { margin: 0; font-size: 30px; }
    h2 { margin: 24px 0 12px 0; font-size: 20px; }
    .subtitle { margin: 6px 0 18px 0; color: var(--muted); }
    .notice { display: inline-block; padding: 6px 12px; border-radius: 999px;
      background: #fef3c7; color: #92400e; font-size: 12px; margin-bottom: 12px; }
    .back, .retry { display: inline-block; margin-bottom: 16px; color: var(--accent);
      text-decoration: none; font-weight: 600; }
    .cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 12px; margin-bottom: 16px; }
    .card { background: var(--panel); border: 1px solid var(--border); border-radius: 12px; padding: 14px; }
    .card .label { color: var(--muted); font-size: 12px; text-transform: uppercase; }
    .card .value { font-size: 22px; font-weight: 700; margin-top: 6px; word-break: break-all; }
    .panel { background: var(--panel); border: 1px solid var(--border); border-radius: 12px;
      padding: 16px; margin-bottom: 16px; }
    .chart { display: flex; align-items: flex-end; gap: 8px; }
    .bar-slot { flex: 1; display: flex; flex-direction: column; justify-content: flex-end;
      height: 100%; text-align: center; }
    .bar { border-radius: 4px 4px 0 0; min-height: 1px; }
    .bar-label { font-size: 11px; color: var(--muted); margin-top: 4px; overflow: hidden;
      text-overflow: ellipsis; white-space: nowrap; }
    table { width: 100%; border-collapse: collapse; font-size: 14px; }
    th { text-align: left; color: var(--muted); font-weight: 600; padding: 8px;
      border-bottom: 1px solid var(--border); }
    td { padding: 8px; border-bottom: 1px solid var(--border); }
    td a { color: var(--accent); font-family: var(--mono); text-decoration: none; }
    .placeholder { color: var(--muted); padding: 48px 0; text-align: center; }
    .error { color: var(--danger); padding: 24px 0; }
"#;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Link target that applies `event` to the dashboard session.
pub fn nav_href(event: NavEvent) -> String {
    match event {
        NavEvent::SelectRound(i) => format!("/nav/round/{i}"),
        NavEvent::SelectDay(i) => format!("/nav/day/{i}"),
        NavEvent::SelectParty(i) => format!("/nav/party/{i}"),
        NavEvent::SelectTransaction(i) => format!("/nav/tx/{i}"),
        NavEvent::Back => "/nav/back".to_string(),
    }
}

/// Render a complete HTML document for `page`.
pub fn render_page(page: &Page, charts: &dyn ChartRenderer) -> String {
    let mut out = String::from("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\" />\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\" />\n");
    if page.view == "loading" {
        out.push_str(&format!(
            "<meta http-equiv=\"refresh\" content=\"{LOADING_REFRESH_SECS}\" />\n"
        ));
    }
    out.push_str(&format!("<title>{}</title>\n", escape(&page.heading)));
    out.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));
    out.push_str(&format!(
        "<div class=\"wrap\" data-view=\"{}\">\n",
        escape(page.view)
    ));

    if let Some(back) = &page.back {
        out.push_str(&format!(
            "<a class=\"back\" href=\"{}\">&larr; {}</a>\n",
            nav_href(NavEvent::Back),
            escape(back)
        ));
    }
    if let Some(notice) = &page.notice {
        out.push_str(&format!("<div class=\"notice\">{}</div>\n", escape(notice)));
    }
    out.push_str(&format!("<h1>{}</h1>\n", escape(&page.heading)));
    if let Some(subtitle) = &page.subtitle {
        out.push_str(&format!("<p class=\"subtitle\">{}</p>\n", escape(subtitle)));
    }

    for section in &page.sections {
        render_section(&mut out, section, charts);
    }

    if page.retry {
        out.push_str("<a class=\"retry\" href=\"/retry\">Retry</a>\n");
    }
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn render_section(out: &mut String, section: &Section, charts: &dyn ChartRenderer) {
    match section {
        Section::Placeholder { message } => {
            out.push_str(&format!("<div class=\"placeholder\">{}</div>\n", escape(message)));
        }
        Section::Error { message } => {
            out.push_str(&format!("<div class=\"error\">{}</div>\n", escape(message)));
        }
        Section::Heading { text } => {
            out.push_str(&format!("<h2>{}</h2>\n", escape(text)));
        }
        Section::Cards { cards } | Section::Fields { fields: cards } => render_cards(out, cards),
        Section::Chart { chart } => {
            out.push_str(&format!(
                "<div class=\"panel\"><h2>{}</h2>{}</div>\n",
                escape(&chart.title),
                charts.render(chart)
            ));
        }
        Section::Table { table } => render_table(out, table),
    }
}

fn render_cards(out: &mut String, cards: &[Card]) {
    out.push_str("<div class=\"cards\">");
    for card in cards {
        out.push_str(&format!(
            "<div class=\"card\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
            escape(&card.label),
            escape(&card.value)
        ));
    }
    out.push_str("</div>\n");
}

fn render_table(out: &mut String, table: &Table) {
    out.push_str("<div class=\"panel\"><table>\n<thead><tr>");
    for column in &table.columns {
        out.push_str(&format!("<th>{}</th>", escape(column)));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for (i, cell) in row.cells.iter().enumerate() {
            if i == 0 {
                out.push_str(&format!(
                    "<td><a href=\"{}\">{}</a></td>",
                    nav_href(row.event),
                    escape(cell)
                ));
            } else {
                out.push_str(&format!("<td>{}</td>", escape(cell)));
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table></div>\n");
}
