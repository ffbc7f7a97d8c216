//! Human-readable summary of a comparison.
//!
//! [`SummaryTable`] is the sortable, searchable list of differences a
//! reviewer works through; [`render_summary_markdown`] prints it.

use crate::diff::model::{CompareReport, DiffClassification, Difference, DifferenceId};
use crate::normalize::normalize_text;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sortable column of the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryColumn {
    /// The visual kind's icon
    Type,
    Category,
    Details,
}

impl FromStr for SummaryColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "type" => Ok(SummaryColumn::Type),
            "category" => Ok(SummaryColumn::Category),
            "details" => Ok(SummaryColumn::Details),
            other => Err(format!("unknown summary column: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub id: DifferenceId,
    pub icon: String,
    pub category: String,
    pub details: String,
    pub color: String,
}

impl SummaryRow {
    fn cell(&self, column: SummaryColumn) -> &str {
        match column {
            SummaryColumn::Type => &self.icon,
            SummaryColumn::Category => &self.category,
            SummaryColumn::Details => &self.details,
        }
    }

    /// Everything a search query is matched against.
    fn search_text(&self) -> String {
        format!("{} {} {}", self.icon, self.category, self.details)
    }
}

/// Rows keyed by [`DifferenceId`], in registration order until sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn from_differences<H>(differences: &[Difference<H>]) -> Self {
        let rows = differences
            .iter()
            .map(|d| SummaryRow {
                id: d.id,
                icon: d.visual_kind.icon().to_string(),
                category: d.category.label().to_string(),
                details: d.detail.clone(),
                color: d.visual_kind.color().to_string(),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, id: DifferenceId) -> Option<&SummaryRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Rows whose normalized content contains the normalized `query`.
    ///
    /// A blank query keeps every row.
    pub fn search(&self, query: &str) -> SummaryTable {
        let needle = normalize_text(query);
        let rows = self
            .rows
            .iter()
            .filter(|row| normalize_text(&row.search_text()).contains(&needle))
            .cloned()
            .collect();
        SummaryTable { rows }
    }

    /// Stable sort by a column, case-insensitively.
    pub fn sort_by(&mut self, column: SummaryColumn, ascending: bool) {
        self.rows.sort_by(|a, b| {
            let ord = compare_cells(a.cell(column), b.cell(column));
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }
}

fn compare_cells(a: &str, b: &str) -> Ordering {
    let (la, lb) = (a.trim().to_lowercase(), b.trim().to_lowercase());
    la.cmp(&lb).then_with(|| a.cmp(b))
}

/// Render a Markdown summary of `report` listing the rows of `table`.
///
/// `table` is usually built from the report and may have been searched or
/// sorted; the header always reflects the whole report.
pub fn render_summary_markdown<H>(report: &CompareReport<H>, table: &SummaryTable) -> String {
    let mut out = String::new();

    out.push_str("## Page Comparison\n\n");
    let class_label = match report.classification {
        DiffClassification::Identical => "Identical",
        DiffClassification::NoContentChange => "No Content Change",
        DiffClassification::Changed => "Changed",
    };
    out.push_str(&format!(
        "**Classification**: {class_label}  \n**Total differences**: {}\n\n",
        report.total()
    ));

    out.push_str(&format!(
        "| | Digest |\n|---|---|\n| Source | `{}` |\n| Current | `{}` |\n\n",
        short(&report.identity.source_digest),
        short(&report.identity.current_digest),
    ));

    if report.differences.is_empty() {
        out.push_str("_No differences detected._\n");
        return out;
    }

    if !report.counts.is_empty() {
        out.push_str("### Counts\n\n");
        for (category, count) in &report.counts {
            out.push_str(&format!("- **{}**: {}\n", category.label(), count));
        }
        out.push('\n');
    }

    out.push_str("### Differences\n\n");
    if table.is_empty() {
        out.push_str("_No rows match._\n");
        return out;
    }
    out.push_str("| # | Type | Category | Details |\n|---|---|---|---|\n");
    for row in table.rows() {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            row.id.value(),
            row.icon,
            row.category,
            escape_cell(&row.details)
        ));
    }
    out
}

fn short(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
