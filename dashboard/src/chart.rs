//! Bar chart data and the capability that draws it.

use feeburn_utils::format_amount;
use serde::Serialize;

/// Maximum number of bars in the party and transaction charts.
pub const CHART_LIMIT: usize = 10;

/// One labelled bar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// A bar chart: title, value unit and bars in display order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    /// Unit shown next to values, `USD` or `CC`.
    pub unit: &'static str,
    /// CSS colour of the bars.
    pub color: &'static str,
    pub points: Vec<ChartPoint>,
}

impl Chart {
    /// Build a chart from the first [`CHART_LIMIT`] points, in the order
    /// given. Points are not ranked by value. Returns `None` when there is
    /// nothing to draw.
    pub fn leading(
        title: impl Into<String>,
        unit: &'static str,
        color: &'static str,
        points: impl IntoIterator<Item = ChartPoint>,
    ) -> Option<Self> {
        let points: Vec<_> = points.into_iter().take(CHART_LIMIT).collect();
        if points.is_empty() {
            return None;
        }
        Some(Self {
            title: title.into(),
            unit,
            color,
            points,
        })
    }

    fn max_value(&self) -> f64 {
        self.points.iter().fold(0.0, |max, p| p.value.max(max))
    }
}

/// Turns a [`Chart`] into markup.
pub trait ChartRenderer {
    fn render(&self, chart: &Chart) -> String;
}

/// Plain HTML/CSS bar chart, no scripting.
#[derive(Clone, Copy, Debug)]
pub struct HtmlBarChart {
    pub height_px: u32,
}

impl Default for HtmlBarChart {
    fn default() -> Self {
        Self { height_px: 200 }
    }
}

impl ChartRenderer for HtmlBarChart {
    fn render(&self, chart: &Chart) -> String {
        let max = chart.max_value();
        let mut out = format!(
            "<div class=\"chart\" style=\"height:{}px\">",
            self.height_px
        );
        for point in &chart.points {
            let pct = if max > 0.0 {
                (point.value / max * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            };
            let value = match chart.unit {
                "USD" => format!("${}", format_amount(point.value)),
                unit => format!("{} {unit}", format_amount(point.value)),
            };
            out.push_str(&format!(
                "<div class=\"bar-slot\" title=\"{value}\">\
                 <div class=\"bar\" style=\"height:{pct:.1}%;background:{}\"></div>\
                 <div class=\"bar-label\">{}</div></div>",
                chart.color,
                crate::html::escape(&point.label),
            ));
        }
        out.push_str("</div>");
        out
    }
}
