//! Dashboard metrics derived from the catalog
//!
//! [`DashboardSummary::from_catalog`] computes the numbers behind the
//! dashboard widgets; [`render_dashboard_svgs`] turns them into SVG documents.

use crate::catalog::{Catalog, FormStatus, JobStatus, KgStatus};
use crate::charts::donut::DonutGeometry;
use crate::charts::progress::percent_of;
use crate::charts::svg::{
    render_donut_svg, render_gauge_svg, render_progress_svg, render_sparkline_svg,
};
use crate::charts::{ChartSegment, Palette};
use serde::Serialize;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// Conversion progress of one source system
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceProgress {
    pub name: String,
    /// Tables fully added to the knowledge graph
    pub mapped: usize,
    pub total: usize,
    /// Source rows across all tables of this source
    pub records: u64,
    /// Tables in error state
    pub errors: usize,
}

impl SourceProgress {
    pub fn percent(&self) -> f64 {
        percent_of(self.mapped as u64, self.total as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_tables: usize,
    pub contextualised_tables: usize,
    /// Table count per status, in declaration order, including zeros
    pub tables_by_status: Vec<(KgStatus, usize)>,
    pub total_forms: usize,
    pub converted_forms: usize,
    /// Share of tables mapped or partially mapped
    pub coverage: f64,
    /// Converted rows over source rows
    pub kg_conversion_rate: f64,
    pub forms_conversion_rate: f64,
    pub sources: Vec<SourceProgress>,
    /// Nodes upserted per job, oldest run first
    pub sync_activity: Vec<f64>,
    pub failed_jobs: usize,
}

impl DashboardSummary {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let total_tables = catalog.tables.len();
        let contextualised_tables = catalog
            .tables
            .iter()
            .filter(|t| t.kg_status.is_contextualised())
            .count();

        let tables_by_status = KgStatus::iter()
            .map(|status| {
                let count = catalog.tables.iter().filter(|t| t.kg_status == status).count();
                (status, count)
            })
            .collect();

        let records: u64 = catalog.tables.iter().filter_map(|t| t.records).sum();
        let kg_records: u64 = catalog.tables.iter().filter_map(|t| t.kg_records).sum();

        let total_forms = catalog.forms.len();
        let converted_forms = catalog
            .forms
            .iter()
            .filter(|f| f.kg_status == FormStatus::Converted)
            .count();

        let mut by_source: BTreeMap<&str, SourceProgress> = BTreeMap::new();
        for table in &catalog.tables {
            let entry = by_source
                .entry(table.source.as_str())
                .or_insert_with(|| SourceProgress {
                    name: table.source.clone(),
                    mapped: 0,
                    total: 0,
                    records: 0,
                    errors: 0,
                });
            entry.total += 1;
            entry.records += table.records.unwrap_or(0);
            match table.kg_status {
                KgStatus::Mapped => entry.mapped += 1,
                KgStatus::Error => entry.errors += 1,
                KgStatus::PartiallyMapped | KgStatus::Pending => {}
            }
        }

        let mut jobs: Vec<_> = catalog
            .sync_jobs
            .iter()
            .filter(|j| j.last_activity().is_some())
            .collect();
        jobs.sort_by_key(|j| j.last_activity());
        let sync_activity = jobs
            .iter()
            .map(|j| j.metrics.map_or(0.0, |m| m.nodes_upserted as f64))
            .collect();

        Self {
            total_tables,
            contextualised_tables,
            tables_by_status,
            total_forms,
            converted_forms,
            coverage: percent_of(contextualised_tables as u64, total_tables as u64),
            kg_conversion_rate: percent_of(kg_records, records),
            forms_conversion_rate: percent_of(converted_forms as u64, total_forms as u64),
            sources: by_source.into_values().collect(),
            sync_activity,
            failed_jobs: catalog
                .sync_jobs
                .iter()
                .filter(|j| j.status == JobStatus::Failed)
                .count(),
        }
    }

    /// Donut segments for the table status breakdown, skipping empty statuses
    pub fn status_segments(&self, palette: &Palette) -> Vec<ChartSegment> {
        self.tables_by_status
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(status, count)| {
                let color = match status {
                    KgStatus::Mapped => &palette.success,
                    KgStatus::PartiallyMapped => &palette.warning,
                    KgStatus::Pending => &palette.accent,
                    KgStatus::Error => &palette.danger,
                };
                ChartSegment::new(status.label(), *count as f64, color.as_str())
            })
            .collect()
    }
}

/// A rendered widget and the file name it is written under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedWidget {
    pub file_name: String,
    pub svg: String,
}

/// Renders every dashboard widget.
pub fn render_dashboard_svgs(
    summary: &DashboardSummary,
    palette: &Palette,
    chart_size: f64,
) -> Vec<RenderedWidget> {
    let mut widgets = vec![
        RenderedWidget {
            file_name: "coverage_gauge.svg".to_string(),
            svg: render_gauge_svg(
                summary.coverage.round(),
                "Contextualisation Coverage",
                chart_size,
                palette,
            ),
        },
        RenderedWidget {
            file_name: "kg_conversion_gauge.svg".to_string(),
            svg: render_gauge_svg(
                summary.kg_conversion_rate.round(),
                "KG Conversion Rate",
                chart_size,
                palette,
            ),
        },
        RenderedWidget {
            file_name: "forms_gauge.svg".to_string(),
            svg: render_gauge_svg(
                summary.forms_conversion_rate.round(),
                "Forms Converted",
                chart_size,
                palette,
            ),
        },
    ];

    let geometry = DonutGeometry {
        size: chart_size,
        ..DonutGeometry::default()
    };
    widgets.push(RenderedWidget {
        file_name: "status_donut.svg".to_string(),
        svg: render_donut_svg(
            &summary.status_segments(palette),
            &geometry,
            palette,
            "Table status breakdown",
        ),
    });

    if let Some(svg) = render_sparkline_svg(&summary.sync_activity, &palette.accent, "nodes") {
        widgets.push(RenderedWidget {
            file_name: "sync_activity.svg".to_string(),
            svg,
        });
    }

    for source in &summary.sources {
        widgets.push(RenderedWidget {
            file_name: format!("source_{}.svg", slug(&source.name)),
            svg: render_progress_svg(source.percent().round(), &source.name, palette),
        });
    }

    widgets
}

/// Lowercase ASCII file-name fragment
fn slug(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if slug.is_empty() { "unnamed".to_string() } else { slug }
}
