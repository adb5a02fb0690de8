//! Plain-text report rendering
//!
//! Renders an [`AggregateOutcome`](crate::aggregate::AggregateOutcome) as
//! fixed-width tables plus a bounded-width utilization bar. Output is plain
//! text with no color codes so it can be piped to a file or a pager; the
//! CLI layers color on top for interactive display.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, AggregateOutcome};
use crate::models::{GpuClaim, NodeGpuCapacity};

/// Default width of the utilization bar in glyphs.
pub const DEFAULT_BAR_WIDTH: usize = 40;

const RUNNING_GLYPH: char = '█';
const PENDING_GLYPH: char = '▓';
const AVAILABLE_GLYPH: char = '░';

/// A rendered usage report, one section per field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedReport {
    pub namespace_table: String,
    pub totals_block: String,
    pub utilization_bar: String,
}

impl fmt::Display for RenderedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n\n{}\n\n{}",
            self.namespace_table, self.totals_block, self.utilization_bar
        )
    }
}

/// Render a utilization bar of exactly `width` glyphs.
///
/// Running and pending segments are floor-scaled from their percentages and
/// the remainder is filled with the available glyph, so the total glyph
/// count is always exactly `width` regardless of rounding. Percentages are
/// clamped to 100 (and pending to the space left after running) so that
/// over-subscribed input cannot overflow the bar.
pub fn render_bar(running_pct: u64, pending_pct: u64, width: usize) -> String {
    let running = (running_pct.min(100) as usize) * width / 100;
    let pending = ((pending_pct.min(100) as usize) * width / 100).min(width - running);
    let available = width - running - pending;

    let mut bar = String::with_capacity(width * RUNNING_GLYPH.len_utf8());
    bar.extend(std::iter::repeat(RUNNING_GLYPH).take(running));
    bar.extend(std::iter::repeat(PENDING_GLYPH).take(pending));
    bar.extend(std::iter::repeat(AVAILABLE_GLYPH).take(available));
    bar
}

/// Aggregate a claim and capacity listing and render the full report.
pub fn generate_report(
    claims: &[GpuClaim],
    capacity: &[NodeGpuCapacity],
    bar_width: usize,
) -> RenderedReport {
    render_outcome(&aggregate(claims, capacity), bar_width)
}

/// Render an already-computed aggregation outcome.
pub fn render_outcome(outcome: &AggregateOutcome, bar_width: usize) -> RenderedReport {
    RenderedReport {
        namespace_table: render_namespace_table(outcome),
        totals_block: render_totals_block(outcome),
        utilization_bar: render_utilization_line(outcome, bar_width),
    }
}

fn render_namespace_table(outcome: &AggregateOutcome) -> String {
    let mut out = String::new();
    out.push_str("GPU Usage by Namespace\n");
    out.push_str(&"-".repeat(58));
    out.push('\n');

    if outcome.namespaces.is_empty() {
        out.push_str("(no GPU claims found)");
        return out;
    }

    out.push_str(&format!(
        "{:<28} {:>8} {:>10} {:>9}\n",
        "NAMESPACE", "RUNNING", "REQUESTED", "R/P/F"
    ));
    for (namespace, summary) in &outcome.namespaces {
        out.push_str(&format!(
            "{:<28} {:>8} {:>10} {:>9}\n",
            namespace,
            summary.running_gpus,
            summary.total_requested_gpus,
            format!(
                "{}/{}/{}",
                summary.phase_counts.running,
                summary.phase_counts.pending,
                summary.phase_counts.failed
            ),
        ));
    }
    // Trailing newline dropped so sections join cleanly.
    out.truncate(out.trim_end_matches('\n').len());
    out
}

fn render_totals_block(outcome: &AggregateOutcome) -> String {
    let t = &outcome.totals;
    let mut out = String::new();
    out.push_str("Cluster GPU Totals\n");
    out.push_str(&"-".repeat(58));
    out.push('\n');
    out.push_str(&format!("{:<16} {}\n", "Capacity:", t.total_capacity_gpus));
    out.push_str(&format!("{:<16} {}\n", "Running:", t.total_running_gpus));
    out.push_str(&format!("{:<16} {}\n", "Pending:", t.total_pending_gpus));
    out.push_str(&format!("{:<16} {}\n", "Requested:", t.total_requested_gpus));
    out.push_str(&format!("{:<16} {}\n", "Available:", t.available_gpus));
    out.push_str(&format!("{:<16} {}%", "Utilization:", t.utilization_pct));
    out
}

fn render_utilization_line(outcome: &AggregateOutcome, bar_width: usize) -> String {
    let t = &outcome.totals;
    let pending_pct = if t.total_capacity_gpus == 0 {
        0
    } else {
        t.total_pending_gpus * 100 / t.total_capacity_gpus
    };
    format!(
        "[{}] {}% used",
        render_bar(t.utilization_pct, pending_pct, bar_width),
        t.utilization_pct
    )
}
