use crate::config::{AppConfig, PageConfig};
use crate::data;
use crate::errors::MapError;
use crate::html::{escape_html, escape_script_json, ERROR_HTML, PAGE_HTML};
use crate::processing::{group_records, GroupedAttractions};
use crate::render::{render_map, MapView};
use crate::types::AttractionRecord;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub label: &'static str,
    pub count: usize,
}

/// Statistics panel contents. Categories with no attractions are left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub by_category: Vec<CategoryCount>,
}

impl Statistics {
    pub fn from_grouped(grouped: &GroupedAttractions) -> Self {
        Statistics {
            total: grouped.total(),
            by_category: grouped
                .counts()
                .filter(|(_, count)| *count > 0)
                .map(|(category, count)| CategoryCount {
                    label: category.label(),
                    count,
                })
                .collect(),
        }
    }

    /// `label: count` per listed category.
    pub fn lines(&self) -> Vec<String> {
        self.by_category
            .iter()
            .map(|c| format!("{}: {}", c.label, c.count))
            .collect()
    }

    pub fn to_text(&self) -> String {
        let mut out = format!("Total Attractions: {}\n", self.total);
        for line in self.lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    fn to_html(&self) -> String {
        let mut out = String::from("      <h3>Statistics</h3>\n");
        out.push_str(&metric_html("Total Attractions", self.total));
        out.push_str("      <h3>Attractions by Type</h3>\n");
        for c in &self.by_category {
            out.push_str(&metric_html(c.label, c.count));
        }
        out
    }
}

fn metric_html(label: &str, value: usize) -> String {
    format!(
        "      <div class=\"metric\"><div class=\"metric-label\">{}</div><div class=\"metric-value\">{}</div></div>\n",
        escape_html(label),
        value
    )
}

/// Output of one load, group and render pass.
#[derive(Debug, Clone)]
pub struct MapBuild {
    pub grouped: GroupedAttractions,
    pub view: MapView,
    pub statistics: Statistics,
}

/// Run the whole pipeline against the configured CSV. Nothing is cached
/// between calls.
pub fn build_map(config: &AppConfig) -> Result<MapBuild, MapError> {
    let records = data::load_records(&config.input.data_csv)?;
    Ok(build_from_records(config, records))
}

pub fn build_from_records(config: &AppConfig, records: Vec<AttractionRecord>) -> MapBuild {
    let grouped = group_records(records);
    let view = render_map(&config.map, &grouped);
    let statistics = Statistics::from_grouped(&grouped);
    info!("Built map with {} attractions", statistics.total);

    MapBuild {
        grouped,
        view,
        statistics,
    }
}

/// Two-pane page: the map on the left, statistics on the right.
pub fn render_page(page: &PageConfig, view: &MapView, statistics: &Statistics) -> serde_json::Result<String> {
    let map_json = escape_script_json(&serde_json::to_string(view)?);

    Ok(PAGE_HTML
        .replace("{{title}}", &escape_html(&page.title))
        .replace("{{heading}}", &escape_html(&page.heading))
        .replace("{{description}}", &escape_html(&page.description))
        .replace("{{width}}", &view.width.to_string())
        .replace("{{height}}", &view.height.to_string())
        .replace("{{statistics}}", &statistics.to_html())
        .replace("{{map_json}}", &map_json))
}

/// Visible failure page shown instead of a blank or partial map.
pub fn render_error_page(page: &PageConfig, message: &str) -> String {
    ERROR_HTML
        .replace("{{title}}", &escape_html(&page.title))
        .replace("{{heading}}", &escape_html(&page.heading))
        .replace("{{message}}", &escape_html(message))
}
