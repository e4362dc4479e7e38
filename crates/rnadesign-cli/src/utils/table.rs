use rnadesign::engine::sort::SortOrder;
use rnadesign::workflows::browse::BrowseReport;
use rnadesign::workflows::check::SolutionCheck;
use std::fmt::Write;

const MARK: &str = "*";

fn sort_indicator(order: Option<SortOrder>) -> &'static str {
    match order {
        Some(SortOrder::Ascending) => " ^",
        Some(SortOrder::Descending) => " v",
        None => "",
    }
}

fn widths(header: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn render_grid(header: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let widths = widths(&header, &rows);
    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

/// Plain-text page for a browse report: one marker column, then the report's columns.
pub fn render_report(report: &BrowseReport) -> String {
    let mut header = vec![" ".to_string(), "#".to_string()];
    header.extend(
        report
            .columns
            .iter()
            .zip(&report.sort_states)
            .map(|(column, order)| format!("{}{}", column, sort_indicator(*order))),
    );

    let rows = report
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![
                if row.marked { MARK } else { "" }.to_string(),
                (row.position + 1).to_string(),
            ];
            cells.extend(row.cells.iter().cloned());
            cells
        })
        .collect();

    let mut out = render_grid(header, rows);
    let shown_to = report.first_visible_index + report.rows.len();
    let _ = writeln!(
        out,
        "Showing {}-{} of {} displayed ({} total).",
        if report.rows.is_empty() {
            0
        } else {
            report.first_visible_index + 1
        },
        shown_to,
        report.displayed,
        report.total
    );
    let _ = writeln!(out, "{}", report.votes_summary);
    out
}

pub fn render_checks(checks: &[SolutionCheck]) -> String {
    let constraint_count = checks.first().map_or(0, |c| c.descriptions.len());
    let mut header = vec![
        "Id".to_string(),
        "Title".to_string(),
        "GC".to_string(),
        "AU".to_string(),
        "GU".to_string(),
    ];
    if let Some(first) = checks.first() {
        header.extend(first.status.statuses.iter().map(|(req, _)| req.to_string()));
    }
    header.push("Result".to_string());

    let rows = checks
        .iter()
        .map(|check| {
            let mut cells = vec![
                check.solution_id.to_string(),
                check.title.clone(),
                check.stats.gc.to_string(),
                check.stats.au.to_string(),
                check.stats.gu.to_string(),
            ];
            cells.extend(check.descriptions.iter().take(constraint_count).map(|d| {
                format!(
                    "{} {} ({})",
                    if d.satisfied { "ok" } else { "FAIL" },
                    d.summary_text,
                    d.clarification_text
                )
            }));
            cells.push(if check.passed() { "PASS" } else { "FAIL" }.to_string());
            cells
        })
        .collect();

    let mut out = render_grid(header, rows);
    let passed = checks.iter().filter(|c| c.passed()).count();
    let _ = writeln!(out, "{} of {} solution(s) pass.", passed, checks.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rnadesign::core::constraints::pair::DisplayContext;
    use rnadesign::core::constraints::set::ConstraintSet;
    use rnadesign::core::models::category::DesignCategory;
    use rnadesign::core::models::ids::SolutionId;
    use rnadesign::core::models::solution::Solution;
    use rnadesign::engine::settings::BrowserSettings;
    use rnadesign::workflows::browse::BrowseRow;
    use rnadesign::workflows::check::{self, PairSource};

    fn report() -> BrowseReport {
        BrowseReport {
            columns: vec![DesignCategory::Title, DesignCategory::Votes],
            sort_states: vec![None, Some(SortOrder::Descending)],
            rows: vec![
                BrowseRow {
                    position: 0,
                    id: SolutionId(3),
                    marked: true,
                    cells: vec!["Hairpin".to_string(), "9".to_string()],
                },
                BrowseRow {
                    position: 1,
                    id: SolutionId(1),
                    marked: false,
                    cells: vec!["Loop".to_string(), "2".to_string()],
                },
            ],
            total: 5,
            displayed: 2,
            first_visible_index: 0,
            marked_indices: vec![0],
            votes_summary: "This puzzle has been cleared.".to_string(),
            settings: BrowserSettings::default(),
        }
    }

    #[test]
    fn report_shows_sort_indicators_marks_and_counts() {
        let text = render_report(&report());
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].contains("Votes v"));
        assert!(!lines[0].contains("Title ^"));
        assert!(lines[2].starts_with("*  1  Hairpin"));
        assert!(lines[3].starts_with("   2  Loop"));
        assert_eq!(lines[4], "Showing 1-2 of 2 displayed (5 total).");
        assert_eq!(lines[5], "This puzzle has been cleared.");
    }

    #[test]
    fn empty_report_shows_zero_range() {
        let mut report = report();
        report.rows.clear();
        report.displayed = 0;
        let text = render_report(&report);
        assert!(text.contains("Showing 0-0 of 0 displayed (5 total)."));
    }

    #[test]
    fn checks_list_each_constraint_and_the_verdict() {
        let constraints: ConstraintSet = "GCMIN,2".parse().unwrap();
        let solutions = [Solution {
            id: SolutionId(4),
            title: "Stem".to_string(),
            gc_pairs: 1,
            ..Default::default()
        }];
        let checks =
            check::run(&solutions, &constraints, DisplayContext::Puzzle, &PairSource::Recorded)
                .unwrap();
        let text = render_checks(&checks);
        assert!(text.contains("GC 2 or more"));
        assert!(text.contains("FAIL 1 (2 OR MORE)"));
        assert!(text.ends_with("0 of 1 solution(s) pass.\n"));
    }
}
