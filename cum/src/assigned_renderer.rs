use colored::{Colorize, CustomColor};

use crate::analyzer::{AnalysisResult, RankedTask, TaskInfo};
use crate::types::enums::Readiness;

// Nord color palette
// https://www.nordtheme.com/docs/colors-and-palettes

// Polar Night (dark)
const NORD3: CustomColor = CustomColor {
    r: 76,
    g: 86,
    b: 106,
};

// Snow Storm (light)
const NORD4: CustomColor = CustomColor {
    r: 216,
    g: 222,
    b: 233,
};
const NORD6: CustomColor = CustomColor {
    r: 236,
    g: 239,
    b: 244,
};

// Frost - used for depth coloring
const NORD7: CustomColor = CustomColor {
    r: 143,
    g: 188,
    b: 187,
}; // teal
const NORD8: CustomColor = CustomColor {
    r: 136,
    g: 192,
    b: 208,
}; // light blue
const NORD9: CustomColor = CustomColor {
    r: 129,
    g: 161,
    b: 193,
}; // blue
const NORD10: CustomColor = CustomColor {
    r: 94,
    g: 129,
    b: 172,
}; // dark blue

// Aurora - used for readiness
const NORD11: CustomColor = CustomColor {
    r: 191,
    g: 97,
    b: 106,
}; // red
const NORD13: CustomColor = CustomColor {
    r: 235,
    g: 203,
    b: 139,
}; // yellow
const NORD14: CustomColor = CustomColor {
    r: 163,
    g: 190,
    b: 140,
}; // green
const NORD15: CustomColor = CustomColor {
    r: 180,
    g: 142,
    b: 173,
}; // purple

/// Identifier colors by dependency depth
const DEPTH_COLORS: [CustomColor; 4] = [NORD8, NORD7, NORD9, NORD10];

fn readiness_color(readiness: Readiness) -> CustomColor {
    match readiness {
        Readiness::Ready => NORD14,
        Readiness::Blocked => NORD13,
        Readiness::Cyclic => NORD15,
    }
}

fn readiness_icon(readiness: Readiness) -> String {
    let icon = match readiness {
        Readiness::Ready => "[→]",
        Readiness::Blocked => "[·]",
        Readiness::Cyclic => "[↻]",
    };
    icon.custom_color(readiness_color(readiness)).to_string()
}

fn color_identifier(identifier: &str, depth: usize) -> String {
    let color = DEPTH_COLORS[depth % DEPTH_COLORS.len()];
    identifier.custom_color(color).bold().to_string()
}

/// Render the ranked view: parents with nested subtasks, then orphans.
pub fn render_assigned(result: &AnalysisResult<'_>) -> String {
    let mut lines: Vec<String> = Vec::new();

    let header = format!("Assigned tasks ({})", result.total());
    lines.push(header.custom_color(NORD6).bold().to_string());

    render_group(&result.parents, result, "", &mut lines);

    if !result.orphaned.is_empty() {
        lines.push(String::new());
        let header = format!(
            "Orphaned subtasks ({}) - parent not assigned to you",
            count_ranked(&result.orphaned)
        );
        lines.push(header.custom_color(NORD6).bold().to_string());
        render_group(&result.orphaned, result, "", &mut lines);
    }

    lines.join("\n")
}

fn count_ranked(group: &[RankedTask<'_>]) -> usize {
    group
        .iter()
        .map(|r| 1 + count_ranked(&r.subtasks))
        .sum()
}

fn render_group(
    group: &[RankedTask<'_>],
    result: &AnalysisResult<'_>,
    prefix: &str,
    lines: &mut Vec<String>,
) {
    for (i, ranked) in group.iter().enumerate() {
        let is_last = i == group.len() - 1;
        render_node(ranked, result, prefix, is_last, lines);
    }
}

fn render_node(
    ranked: &RankedTask<'_>,
    result: &AnalysisResult<'_>,
    prefix: &str,
    is_last: bool,
    lines: &mut Vec<String>,
) {
    let connector = if is_last { "└── " } else { "├── " };
    let colored_connector = connector.custom_color(NORD3).to_string();

    lines.push(format!(
        "{prefix}{colored_connector}{}",
        format_task_line(&ranked.info, result)
    ));

    if !ranked.subtasks.is_empty() {
        let child_prefix = if is_last { "    " } else { "│   " };
        let new_prefix = format!("{prefix}{}", child_prefix.custom_color(NORD3));
        render_group(&ranked.subtasks, result, &new_prefix, lines);
    }
}

fn format_task_line(info: &TaskInfo<'_>, result: &AnalysisResult<'_>) -> String {
    let icon = readiness_icon(info.readiness());
    let identifier = color_identifier(info.id(), info.depth);
    let name = info.task.name.custom_color(NORD4).to_string();
    let status = format!("[{}]", info.task.status_name()).custom_color(NORD3);
    let metrics = if info.cyclic {
        format!("d={} depth=? (cycle)", info.difficulty)
    } else {
        format!("d={} depth={}", info.difficulty, info.depth)
    }
    .custom_color(NORD3);

    format!(
        "{icon} {identifier}: {name} {status} {metrics}{}",
        format_blocker_suffix(info, result)
    )
}

/// "(blocked by: ...)" listing open blockers, by name when they are in the set.
fn format_blocker_suffix(info: &TaskInfo<'_>, result: &AnalysisResult<'_>) -> String {
    if info.open_blockers.is_empty() {
        return String::new();
    }

    let blockers: Vec<String> = info
        .open_blockers
        .iter()
        .map(|id| match result.task(id) {
            Some(task) if !task.name.is_empty() => format!("{} ({id})", task.name),
            _ => id.clone(),
        })
        .map(|label| label.custom_color(NORD11).to_string())
        .collect();

    let separator = ", ".custom_color(NORD3).to_string();
    format!(
        "{}{}{}",
        " (blocked by: ".custom_color(NORD3),
        blockers.join(&separator),
        ")".custom_color(NORD3)
    )
}

/// Render the legend explaining the icons
pub fn render_legend() -> String {
    let ready = "[→] Ready".custom_color(readiness_color(Readiness::Ready));
    let blocked = "[·] Blocked".custom_color(readiness_color(Readiness::Blocked));
    let cyclic = "[↻] Dependency cycle".custom_color(readiness_color(Readiness::Cyclic));

    format!(
        "{}{}  {}  {}  {}",
        "Legend: ".custom_color(NORD4),
        ready,
        blocked,
        cyclic,
        "d = open blockers".custom_color(NORD3)
    )
}

/// Render the ready/blocked summary line
pub fn render_summary(result: &AnalysisResult<'_>) -> String {
    let mut summary = format!(
        "{}{}  {}{}",
        "Ready: ".custom_color(NORD4),
        result.ready_count.to_string().custom_color(NORD14).bold(),
        "Blocked: ".custom_color(NORD4),
        result.blocked_count.to_string().custom_color(NORD13).bold(),
    );
    if result.cyclic_count > 0 {
        summary.push_str(&format!(
            "  {}{}",
            "In cycles: ".custom_color(NORD4),
            result.cyclic_count.to_string().custom_color(NORD15).bold()
        ));
    }
    summary
}

/// Render the complete output including legend and summary
pub fn render_full_output(result: &AnalysisResult<'_>, show_legend: bool) -> String {
    let mut parts = vec![render_assigned(result), String::new()];
    if show_legend {
        parts.push(render_legend());
    }
    parts.push(render_summary(result));
    parts.join("\n")
}
