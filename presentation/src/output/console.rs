//! Console output formatter for the dashboard

use architect_application::{DashboardSnapshot, FlowLayout, NodeView};
use architect_domain::{FlowGraph, Project, StageAvailability, StatusKind};
use colored::{ColoredString, Colorize};
use std::time::Duration;

/// Width of the diagram track in columns
const TRACK_WIDTH: usize = 60;

/// Formats dashboard state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Full view: status panel, plan and flow diagram
    pub fn format(snapshot: &DashboardSnapshot) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Architect Dashboard"));
        output.push('\n');

        match &snapshot.project {
            Some(project) => {
                output.push_str(&Self::project_panel(project, snapshot));
                if let Some(plan) = project.plan() {
                    output.push_str(&Self::section_header("Plan"));
                    output.push_str(&Self::indent(plan, "  "));
                    output.push('\n');
                }
            }
            None => {
                output.push_str(&format!(
                    "\n{}\n",
                    "No active project. Pass a prompt to create one.".dimmed()
                ));
            }
        }

        output.push_str(&Self::section_header(&format!(
            "Flow: {}",
            snapshot.flow.name
        )));
        if !snapshot.flow.description.is_empty() {
            output.push_str(&format!("{}\n", snapshot.flow.description.dimmed()));
        }
        output.push_str(&Self::flow_diagram(&snapshot.layout, snapshot.revealed_edges));

        output.push_str(&Self::footer());
        output
    }

    /// One line per update
    pub fn format_compact(snapshot: &DashboardSnapshot) -> String {
        let elapsed = Self::format_elapsed(snapshot.elapsed);
        match &snapshot.project {
            Some(project) => {
                let status = project.status();
                format!(
                    "[{}] {} {} {}{}",
                    elapsed,
                    project.id(),
                    Self::status_badge(status.kind()),
                    status.message(),
                    if snapshot.polling {
                        " (polling)".dimmed().to_string()
                    } else {
                        String::new()
                    }
                )
            }
            None => format!("[{}] {}", elapsed, "idle".dimmed()),
        }
    }

    /// Format as JSON
    pub fn format_json(snapshot: &DashboardSnapshot) -> String {
        serde_json::to_string_pretty(snapshot).unwrap_or_else(|_| "{}".to_string())
    }

    /// Pipeline overview shown when no project is being tracked
    pub fn format_architecture(graph: &FlowGraph, layout: &FlowLayout) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Architect Service Pipeline"));
        output.push('\n');

        for (i, stage) in graph.list_stages().iter().enumerate() {
            let availability = match stage.availability {
                StageAvailability::Active => "active".green(),
                StageAvailability::Conceptual => "conceptual".dimmed(),
            };
            output.push_str(&format!(
                "\n{} {} ({})\n",
                format!("{}.", i + 1).cyan().bold(),
                stage.title.bold(),
                availability
            ));
            output.push_str(&format!("   {}\n", stage.description));
            if !stage.endpoint.is_empty() {
                output.push_str(&format!("   {} {}\n", "Endpoint:".dimmed(), stage.endpoint));
            }
            for item in &stage.responsibilities {
                output.push_str(&format!("   * {}\n", item));
            }
        }

        output.push_str(&Self::section_header(&format!("Flow: {}", layout.flow)));
        output.push_str(&Self::flow_diagram(layout, layout.edges.edges.len()));
        output.push_str(&Self::footer());
        output
    }

    /// Known flows with their stage sequences
    pub fn format_flows(graph: &FlowGraph) -> String {
        let mut output = String::new();
        for flow in graph.list_flows() {
            output.push_str(&format!("{}\n", flow.name.cyan().bold()));
            if !flow.description.is_empty() {
                output.push_str(&format!("  {}\n", flow.description));
            }
            output.push_str(&format!("  {}\n", flow.stages.join(" -> ").dimmed()));
        }
        output
    }

    /// `MM:SS`; minutes keep counting past 59
    pub fn format_elapsed(elapsed: Duration) -> String {
        let secs = elapsed.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    pub fn status_badge(kind: StatusKind) -> ColoredString {
        let label = format!("[{}]", kind.as_str());
        match kind {
            StatusKind::Planning => label.yellow().bold(),
            StatusKind::Completed => label.green().bold(),
            StatusKind::Failed => label.red().bold(),
        }
    }

    fn project_panel(project: &Project, snapshot: &DashboardSnapshot) -> String {
        let status = project.status();
        let mut panel = String::new();

        panel.push_str(&format!(
            "{} {}   {} {}\n",
            "Project:".cyan().bold(),
            project.id(),
            "Elapsed:".cyan().bold(),
            Self::format_elapsed(snapshot.elapsed)
        ));
        panel.push_str(&format!(
            "{} {} {}\n",
            "Status: ".cyan().bold(),
            Self::status_badge(status.kind()),
            status.message()
        ));
        if let Some(user) = project.user_id() {
            panel.push_str(&format!("{} {}\n", "User:   ".cyan().bold(), user));
        }
        let refresh = if snapshot.polling {
            "automatic".green()
        } else if status.is_terminal() {
            "finished".dimmed()
        } else {
            "manual".yellow()
        };
        panel.push_str(&format!("{} {}\n", "Refresh:".cyan().bold(), refresh));
        panel
    }

    /// Node track, stage labels and the edge list
    fn flow_diagram(layout: &FlowLayout, revealed: usize) -> String {
        let mut output = String::new();

        let mut track: Vec<char> = vec!['-'; TRACK_WIDTH + 1];
        for node in &layout.nodes {
            track[Self::column(node)] = if node.highlight.is_active { '@' } else { 'o' };
        }
        output.push_str(&format!("{}\n", track.iter().collect::<String>().dimmed()));

        for node in &layout.nodes {
            let label = match node.highlight.sequence_index {
                Some(index) => format!("{} {}", index + 1, node.label).green().bold(),
                None => format!("- {}", node.label).dimmed(),
            };
            output.push_str(&format!("  {}\n", label));
        }

        if !layout.edges.edges.is_empty() {
            output.push('\n');
        }
        for (i, edge) in layout.edges.edges.iter().enumerate() {
            let arrow = if i < revealed {
                "-->".green().bold()
            } else {
                "...".dimmed()
            };
            output.push_str(&format!("  {} {} {}\n", edge.from, arrow, edge.to));
        }

        for err in &layout.edges.integrity_errors {
            output.push_str(&format!("  {} {}\n", "!".yellow().bold(), err));
        }

        output
    }

    fn column(node: &NodeView) -> usize {
        ((node.x.clamp(0.0, 1.0) * TRACK_WIDTH as f64).round() as usize).min(TRACK_WIDTH)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(TRACK_WIDTH);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(TRACK_WIDTH).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
