//! Page view-models.
//!
//! [`render`] projects a [`Dashboard`] into a [`Page`]: headings, summary
//! cards, charts and clickable tables. Derived values (percent of total,
//! chart points) are recomputed on every call; nothing is cached or mutated.

use feeburn_types::{BurnAggregate, Party, Transaction};
use feeburn_utils::{format_amount, format_count, format_percent};
use serde::Serialize;

use crate::chart::{Chart, ChartPoint};
use crate::error::DashboardError;
use crate::source::DataOrigin;
use crate::state::{Dashboard, DashboardData, DrillContext, LoadStatus, NavEvent, View};

pub const TITLE: &str = "Fee Burn Explorer";

const PARTY_CHART_COLOR: &str = "#7c3aed";
const TRANSACTION_CHART_COLOR: &str = "#059669";
const FEE_CHART_COLOR: &str = "#f59e0b";
const ROUND_CHART_COLOR: &str = "#2563eb";

/// A labelled value, used for summary cards and detail fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Card {
    pub label: String,
    pub value: String,
}

impl Card {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A table row. The first cell is the link that fires `event`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Row {
    pub cells: Vec<String>,
    pub event: NavEvent,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Row>,
}

/// One block of page content, rendered top to bottom.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "kebab-case")]
pub enum Section {
    Placeholder { message: String },
    Error { message: String },
    Heading { text: String },
    Cards { cards: Vec<Card> },
    Fields { fields: Vec<Card> },
    Chart { chart: Chart },
    Table { table: Table },
}

/// A fully projected page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page {
    /// Name of the view (`main`, `round-parties`, ...), or `loading` /
    /// `failed` before data is available.
    pub view: &'static str,
    pub heading: String,
    pub subtitle: Option<String>,
    pub notice: Option<String>,
    /// Label of the back action, when the view has one.
    pub back: Option<String>,
    /// Whether a retry action is offered.
    pub retry: bool,
    pub sections: Vec<Section>,
}

impl Page {
    fn new(view: &'static str, heading: impl Into<String>) -> Self {
        Self {
            view,
            heading: heading.into(),
            subtitle: None,
            notice: None,
            back: None,
            retry: false,
            sections: Vec::new(),
        }
    }

    fn subtitle(mut self, text: impl Into<String>) -> Self {
        self.subtitle = Some(text.into());
        self
    }

    fn back(mut self, label: &str) -> Self {
        self.back = Some(format!("Back to {label}"));
        self
    }

    fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    fn chart(mut self, chart: Option<Chart>) -> Self {
        if let Some(chart) = chart {
            self.sections.push(Section::Chart { chart });
        }
        self
    }
}

/// Project the dashboard state into a page.
pub fn render(dashboard: &Dashboard) -> Page {
    match dashboard.status() {
        LoadStatus::Loading => Page::new("loading", TITLE)
            .subtitle(match dashboard.origin() {
                DataOrigin::Demo => "Loading demo data...",
                DataOrigin::Live => "Loading live data...",
            })
            .section(Section::Placeholder {
                message: "Fetching burn data...".into(),
            }),
        LoadStatus::Failed(message) => {
            let mut page = Page::new("failed", TITLE)
                .subtitle("Unable to load data")
                .section(Section::Error {
                    message: message.clone(),
                });
            page.retry = true;
            page
        }
        LoadStatus::Ready(data) => {
            render_view(dashboard.view(), data, dashboard.origin()).unwrap_or_else(|_| {
                // Views only ever hold indices validated against this data.
                render_main(data, dashboard.origin())
            })
        }
    }
}

fn render_view(view: View, data: &DashboardData, origin: DataOrigin) -> Result<Page, DashboardError> {
    Ok(match view {
        View::Main => render_main(data, origin),
        View::RoundParties { round } => render_parties(view, data.source(DrillContext::Round, round)?),
        View::DayParties { day } => render_parties(view, data.source(DrillContext::Day, day)?),
        View::RoundTransactions { round: source, party }
        | View::DayTransactions { day: source, party } => {
            let context = view.drill_context().unwrap_or_default();
            render_transactions(
                view,
                data.source(context, source)?,
                data.party(context, source, party)?,
            )
        }
        View::RoundDetail { round: source, party, tx }
        | View::DayDetail { day: source, party, tx } => {
            let context = view.drill_context().unwrap_or_default();
            render_detail(
                view,
                data.source(context, source)?,
                data.party(context, source, party)?,
                data.transaction(context, source, party, tx)?,
            )
        }
    })
}

fn usd(value: f64) -> String {
    format!("${}", format_amount(value))
}

fn cc(value: f64) -> String {
    format!("{} CC", format_amount(value))
}

fn render_main(data: &DashboardData, origin: DataOrigin) -> Page {
    let total_usd = data.rounds.iter().fold(0.0, |acc, r| acc + r.total_burn_usd);
    let total_cc = data.rounds.iter().fold(0.0, |acc, r| acc + r.total_burn_cc);
    let total_events: u64 = data.rounds.iter().map(|r| r.burn_events).sum();
    let fee_generators = data.rounds.first().map_or(0, |r| r.parties.len());

    let mut page = Page::new("main", TITLE);
    page = match origin {
        DataOrigin::Demo => {
            page.notice = Some("Using demo data".into());
            page.subtitle("Demo data showing representative burn metrics")
        }
        DataOrigin::Live => page.subtitle("Fee burns aggregated from recent network updates"),
    };

    let rounds = Table {
        columns: vec![
            "Round",
            "Timestamp",
            "Total Burn (USD)",
            "Total Burn (CC)",
            "Burn Events",
            "Parties",
        ],
        rows: data
            .rounds
            .iter()
            .enumerate()
            .map(|(i, r)| Row {
                cells: vec![
                    r.round.to_string(),
                    r.timestamp.to_string(),
                    usd(r.total_burn_usd),
                    cc(r.total_burn_cc),
                    format_count(r.burn_events),
                    r.parties.len().to_string(),
                ],
                event: NavEvent::SelectRound(i),
            })
            .collect(),
    };

    page = page
        .section(Section::Heading {
            text: "Latest Round Activity".into(),
        })
        .section(Section::Cards {
            cards: vec![
                Card::new("Total Burned (USD)", usd(total_usd)),
                Card::new("Total Burned (CC)", cc(total_cc)),
                Card::new("Burn Events", format_count(total_events)),
                Card::new("Fee Generators", fee_generators.to_string()),
            ],
        })
        .chart(Chart::leading(
            "Burn by Round (USD)",
            "USD",
            ROUND_CHART_COLOR,
            data.rounds.iter().map(|r| ChartPoint {
                label: format!("Round {}", r.round),
                value: r.total_burn_usd,
            }),
        ))
        .section(Section::Table { table: rounds });

    if !data.days.is_empty() {
        let days = Table {
            columns: vec![
                "Date",
                "Total Burn (USD)",
                "Total Burn (CC)",
                "Burn Events",
                "Parties",
            ],
            rows: data
                .days
                .iter()
                .enumerate()
                .map(|(i, d)| Row {
                    cells: vec![
                        d.label(),
                        usd(d.total_burn_usd),
                        cc(d.total_burn_cc),
                        format_count(d.burn_events),
                        d.parties.len().to_string(),
                    ],
                    event: NavEvent::SelectDay(i),
                })
                .collect(),
        };
        page = page
            .section(Section::Heading {
                text: "Daily Activity".into(),
            })
            .section(Section::Table { table: days });
    }
    page
}

fn render_parties(view: View, source: &dyn BurnAggregate) -> Page {
    let back = match view.drill_context() {
        Some(DrillContext::Day) => "Days",
        _ => "Rounds",
    };
    let parties = source.parties();

    let table = Table {
        columns: vec![
            "Party ID",
            "Total Burn (USD)",
            "Total Burn (CC)",
            "Burn Events",
            "% of Total",
        ],
        rows: parties
            .iter()
            .enumerate()
            .map(|(i, p)| Row {
                cells: vec![
                    p.party_id.clone(),
                    usd(p.total_burn_usd),
                    cc(p.total_burn_cc),
                    format_count(p.burn_events),
                    format_percent(source.usd_share_percent(p)),
                ],
                event: NavEvent::SelectParty(i),
            })
            .collect(),
    };

    Page::new(view.name(), format!("{}: Fee Generators", source.label()))
        .subtitle("Click any party to see their transactions")
        .back(back)
        .section(Section::Cards {
            cards: vec![
                Card::new("Total Burn (USD)", usd(source.total_burn_usd())),
                Card::new("Total Burn (CC)", cc(source.total_burn_cc())),
                Card::new("Burn Events", format_count(source.burn_events())),
                Card::new("Active Parties", parties.len().to_string()),
            ],
        })
        .chart(Chart::leading(
            "Top Fee Generators by Burn (USD)",
            "USD",
            PARTY_CHART_COLOR,
            parties.iter().map(|p| ChartPoint {
                label: p.short_id().to_string(),
                value: p.total_burn_usd,
            }),
        ))
        .section(Section::Table { table })
}

fn render_transactions(view: View, source: &dyn BurnAggregate, party: &Party) -> Page {
    let table = Table {
        columns: vec!["Transaction ID", "Type", "Burn (USD)", "Burn (CC)", "Time"],
        rows: party
            .transactions
            .iter()
            .enumerate()
            .map(|(i, t)| Row {
                cells: vec![
                    t.id.clone(),
                    t.kind.clone(),
                    usd(t.burn_usd),
                    cc(t.burn_cc),
                    t.timestamp.to_string(),
                ],
                event: NavEvent::SelectTransaction(i),
            })
            .collect(),
    };

    Page::new(view.name(), format!("{}: Transactions", source.label()))
        .subtitle(format!("Party: {}", party.party_id))
        .back("Parties")
        .section(Section::Cards {
            cards: vec![
                Card::new("Party Total (USD)", usd(party.total_burn_usd)),
                Card::new("Party Total (CC)", cc(party.total_burn_cc)),
                Card::new("Burn Events", format_count(party.burn_events)),
            ],
        })
        .chart(Chart::leading(
            "Burn by Transaction (USD)",
            "USD",
            TRANSACTION_CHART_COLOR,
            party
                .transactions
                .iter()
                .enumerate()
                .map(|(i, t)| ChartPoint {
                    label: format!("TX {}", i + 1),
                    value: t.burn_usd,
                }),
        ))
        .section(Section::Table { table })
}

fn render_detail(
    view: View,
    source: &dyn BurnAggregate,
    party: &Party,
    tx: &Transaction,
) -> Page {
    let fee_cards = tx
        .fees
        .components()
        .iter()
        .map(|(name, value)| Card::new(format!("{name} Fee"), cc(*value)))
        .collect();

    Page::new(view.name(), "Transaction Detail")
        .subtitle("Full breakdown of fee burn data")
        .back("Transactions")
        .section(Section::Fields {
            fields: vec![
                Card::new("Transaction ID", tx.id.clone()),
                Card::new("Type", tx.kind.clone()),
                Card::new("Context", source.label()),
                Card::new("Timestamp", tx.timestamp.to_string()),
                Card::new("Party ID", party.short_id()),
                Card::new("Total Burn (USD)", usd(tx.burn_usd)),
                Card::new("Total Burn (CC)", cc(tx.burn_cc)),
            ],
        })
        .section(Section::Heading {
            text: "Fee Breakdown".into(),
        })
        .section(Section::Cards { cards: fee_cards })
        .chart(Chart::leading(
            "Fee Breakdown Chart",
            "CC",
            FEE_CHART_COLOR,
            tx.fees.components().iter().map(|(name, value)| ChartPoint {
                label: (*name).to_string(),
                value: *value,
            }),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use feeburn_types::{Day, Round, Timestamp};

    fn party(id: &str, n: usize, price: f64) -> Party {
        let txs = (0..n)
            .map(|i| {
                Transaction::new(
                    format!("{id}-tx{i}"),
                    "TrafficBurnEvent",
                    1.0,
                    price,
                    Timestamp::from_unix_secs(0),
                )
            })
            .collect();
        Party::from_transactions(id, txs)
    }

    fn dashboard(parties: Vec<Party>) -> Dashboard {
        let mut dashboard = Dashboard::new(DataOrigin::Live);
        dashboard
            .finish_load(Ok(Round::from_parties(
                1847392,
                Timestamp::from_unix_secs(0),
                parties,
            )))
            .unwrap();
        dashboard
    }

    fn dashboard_with_day(parties: Vec<Party>) -> Dashboard {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let data = DashboardData {
            rounds: vec![Round::from_parties(
                1847392,
                Timestamp::from_unix_secs(0),
                parties.clone(),
            )],
            days: vec![Day::from_parties(date, parties)],
        };
        let mut dashboard = Dashboard::new(DataOrigin::Live);
        dashboard.finish_load_data(Ok(data)).unwrap();
        dashboard
    }

    fn charts(page: &Page) -> Vec<&Chart> {
        page.sections
            .iter()
            .filter_map(|s| match s {
                Section::Chart { chart } => Some(chart),
                _ => None,
            })
            .collect()
    }

    fn tables(page: &Page) -> Vec<&Table> {
        page.sections
            .iter()
            .filter_map(|s| match s {
                Section::Table { table } => Some(table),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn loading_and_failed_pages() {
        let mut dashboard = Dashboard::new(DataOrigin::Demo);
        let page = dashboard.render();
        assert_eq!(page.view, "loading");
        assert_eq!(page.subtitle.as_deref(), Some("Loading demo data..."));
        assert!(!page.retry);

        dashboard.finish_load(Err("boom".into())).unwrap();
        let page = dashboard.render();
        assert_eq!(page.view, "failed");
        assert!(page.retry);
        assert_eq!(
            page.sections,
            vec![Section::Error {
                message: "boom".into()
            }]
        );
    }

    #[test]
    fn main_page_summarises_rounds() {
        let dashboard = dashboard(vec![party("A::1", 2, 0.5), party("B::2", 1, 0.5)]);
        let page = dashboard.render();
        assert_eq!(page.view, "main");
        assert_eq!(page.back, None);
        let rounds = tables(&page)[0];
        assert_eq!(rounds.rows.len(), 1);
        assert_eq!(rounds.rows[0].cells[0], "1847392");
        assert_eq!(rounds.rows[0].cells[4], "3");
        assert_eq!(rounds.rows[0].event, NavEvent::SelectRound(0));
        assert_eq!(tables(&page).len(), 1, "no day table without days");
    }

    #[test]
    fn main_page_lists_days_after_rounds() {
        let dashboard = dashboard_with_day(vec![party("A::1", 2, 0.5), party("B::2", 1, 0.5)]);
        let page = dashboard.render();
        let tables = tables(&page);
        assert_eq!(tables.len(), 2);
        assert!(page.sections.contains(&Section::Heading {
            text: "Daily Activity".into()
        }));
        let days = tables[1];
        assert_eq!(days.columns[0], "Date");
        assert_eq!(days.rows.len(), 1);
        assert_eq!(days.rows[0].cells[0], "2024-05-01");
        assert_eq!(days.rows[0].cells[4], "2");
        assert_eq!(days.rows[0].event, NavEvent::SelectDay(0));
    }

    #[test]
    fn day_pages_are_keyed_by_date() {
        let mut dashboard = dashboard_with_day(vec![party("A::1", 2, 1.0)]);
        dashboard.navigate(NavEvent::SelectDay(0)).unwrap();
        let page = dashboard.render();
        assert_eq!(page.view, "day-parties");
        assert_eq!(page.heading, "2024-05-01: Fee Generators");
        assert_eq!(page.back.as_deref(), Some("Back to Days"));

        dashboard.navigate(NavEvent::SelectParty(0)).unwrap();
        let page = dashboard.render();
        assert_eq!(page.view, "day-transactions");
        assert_eq!(page.heading, "2024-05-01: Transactions");
        assert_eq!(page.back.as_deref(), Some("Back to Parties"));

        dashboard.navigate(NavEvent::SelectTransaction(1)).unwrap();
        let page = dashboard.render();
        assert_eq!(page.view, "day-detail");
        let Section::Fields { fields } = &page.sections[0] else {
            panic!("detail page starts with fields");
        };
        assert_eq!(fields[2], Card::new("Context", "2024-05-01"));
    }

    #[test]
    fn party_chart_takes_first_ten_unsorted() {
        let parties: Vec<_> = (0..12).map(|i| party(&format!("P{i}::x"), i + 1, 1.0)).collect();
        let mut dashboard = dashboard(parties);
        dashboard.navigate(NavEvent::SelectRound(0)).unwrap();
        let page = dashboard.render();
        assert_eq!(page.view, "round-parties");
        assert_eq!(page.heading, "Round 1847392: Fee Generators");
        assert_eq!(page.back.as_deref(), Some("Back to Rounds"));

        let chart = charts(&page)[0];
        assert_eq!(chart.points.len(), 10);
        assert_eq!(chart.points[0].label, "P0");
        assert_eq!(chart.points[9].label, "P9");
        assert_eq!(tables(&page)[0].rows.len(), 12);
    }

    #[test]
    fn percent_of_total_has_one_decimal() {
        let mut dashboard = dashboard(vec![party("A", 1, 1.0), party("B", 2, 1.0)]);
        dashboard.navigate(NavEvent::SelectRound(0)).unwrap();
        let page = dashboard.render();
        let rows = &tables(&page)[0].rows;
        assert_eq!(rows[0].cells[4], "33.3%");
        assert_eq!(rows[1].cells[4], "66.7%");
    }

    #[test]
    fn transactions_page_labels_bars_by_position() {
        let mut dashboard = dashboard(vec![party("A::1", 3, 2.0)]);
        dashboard.navigate(NavEvent::SelectRound(0)).unwrap();
        dashboard.navigate(NavEvent::SelectParty(0)).unwrap();
        let page = dashboard.render();
        assert_eq!(page.heading, "Round 1847392: Transactions");
        assert_eq!(page.subtitle.as_deref(), Some("Party: A::1"));
        let labels: Vec<_> = charts(&page)[0].points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["TX 1", "TX 2", "TX 3"]);
        assert_eq!(
            tables(&page)[0].rows[2].event,
            NavEvent::SelectTransaction(2)
        );
    }

    #[test]
    fn detail_page_shows_even_fee_split() {
        let mut dashboard = dashboard(vec![party("Openvector-V1::1220", 1, 0.165)]);
        dashboard.navigate(NavEvent::SelectRound(0)).unwrap();
        dashboard.navigate(NavEvent::SelectParty(0)).unwrap();
        dashboard.navigate(NavEvent::SelectTransaction(0)).unwrap();
        let page = dashboard.render();
        assert_eq!(page.view, "round-detail");
        assert_eq!(page.back.as_deref(), Some("Back to Transactions"));

        let Section::Fields { fields } = &page.sections[0] else {
            panic!("detail page starts with fields");
        };
        assert_eq!(fields[2], Card::new("Context", "Round 1847392"));
        assert_eq!(fields[4], Card::new("Party ID", "Openvector-V1"));

        let chart = charts(&page)[0];
        assert!(chart.points.iter().all(|p| p.value == 0.25));
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut dashboard = dashboard(vec![party("A", 2, 1.0)]);
        dashboard.navigate(NavEvent::SelectRound(0)).unwrap();
        assert_eq!(dashboard.render(), dashboard.render());
    }

    #[test]
    fn demo_origin_adds_notice() {
        let mut dashboard = Dashboard::new(DataOrigin::Demo);
        dashboard
            .finish_load(Ok(Round::from_parties(1, Timestamp::from_unix_secs(0), vec![])))
            .unwrap();
        let page = dashboard.render();
        assert_eq!(page.notice.as_deref(), Some("Using demo data"));
        assert!(charts(&page).len() == 1);
    }
}
