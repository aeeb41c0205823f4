use chrono_tz::Tz;
use serde::Serialize;

use studyplan_core::{Algorithm, ScheduleInsights, ScheduleResult, StudySession};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport<'a> {
    pub algorithm: Algorithm,
    pub timezone: String,
    pub result: &'a ScheduleResult,
    pub insights: &'a ScheduleInsights,
}

fn session_line(s: &StudySession, tz: Tz) -> String {
    let start = s.start.with_timezone(&tz);
    let end = s.end.with_timezone(&tz);
    let marker = if s.ai_optimized { " " } else { "!" };
    format!(
        "{marker} {} {}-{}  {:<32} {:>3.0}%  [{}]",
        start.format("%a %Y-%m-%d"),
        start.format("%H:%M"),
        end.format("%H:%M"),
        s.title,
        s.confidence,
        s.priority,
    )
}

pub fn render_plan(report: &PlanReport<'_>, tz: Tz) -> String {
    let mut out = String::new();
    let result = report.result;

    out.push_str(&format!(
        "# Study plan ({}, {})\n\n",
        report.algorithm, report.timezone
    ));

    if result.sessions.is_empty() {
        out.push_str("No sessions scheduled.\n");
    } else {
        for s in &result.sessions {
            out.push_str(&session_line(s, tz));
            out.push('\n');
            out.push_str(&format!("    {}\n", s.reasoning));
        }
        out.push_str(&format!(
            "\nOptimization score: {}/100\n",
            result.optimization_score
        ));
    }

    if !result.diagnostics.is_empty() {
        out.push_str("\n## Diagnostics\n\n");
        for d in &result.diagnostics {
            out.push_str(&format!("- {}\n", d.message));
        }
    }

    let insights = report.insights;
    out.push_str("\n## Insights\n\n");
    out.push_str(&format!(
        "Total: {:.1}h, average confidence {:.0}%\n",
        insights.total_hours, insights.average_confidence
    ));
    for (day, hours) in &insights.workload_by_day {
        out.push_str(&format!("  {} {:.1}h\n", day.format("%a %Y-%m-%d"), hours));
    }
    if let Some((day, hours)) = insights.busiest_day() {
        out.push_str(&format!(
            "Busiest day: {} ({:.1}h)\n",
            day.format("%a %Y-%m-%d"),
            hours
        ));
    }
    for r in &insights.recommendations {
        out.push_str(&format!("- {r}\n"));
    }

    out
}
