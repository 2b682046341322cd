use std::io::Write;

use unicode_width::UnicodeWidthStr;
use workboard_core::board::ColumnLayout;
use workboard_core::card::CardView;
use workboard_core::column::AddAffordance;
use workboard_core::stages::Stage;
use workboard_core::task::Priority;

const EMPTY_COLUMN_TEXT: &str = "Geen taken";
const ADD_TASK_TEXT: &str = "+ Taak toevoegen";

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    #[tracing::instrument(skip_all)]
    pub fn print_board<W: Write>(
        &self,
        out: &mut W,
        layouts: &[ColumnLayout],
    ) -> anyhow::Result<()> {
        for (idx, column) in layouts.iter().enumerate() {
            if idx > 0 {
                writeln!(out)?;
            }

            if !column.expanded {
                writeln!(out, "|| {} [{}]", column.collapsed_label, column.color)?;
                continue;
            }

            writeln!(
                out,
                "== {} ({}) [{}]",
                column.title, column.task_count, column.color
            )?;

            match column.add_affordance {
                AddAffordance::EmptyPlaceholder => {
                    writeln!(out, "   {EMPTY_COLUMN_TEXT}  {ADD_TASK_TEXT}")?;
                }
                AddAffordance::ListFooter => {
                    let rows = column
                        .cards
                        .iter()
                        .map(|card| self.card_row(card))
                        .collect::<Vec<_>>();
                    write_rows(out, rows)?;
                    writeln!(out, "   {ADD_TASK_TEXT}")?;
                }
            }
        }
        Ok(())
    }

    pub fn print_stages<W: Write>(&self, out: &mut W, stages: &[Stage]) -> anyhow::Result<()> {
        let rows = stages
            .iter()
            .map(|stage| vec![stage.id.clone(), stage.title.clone(), stage.color.clone()])
            .collect::<Vec<_>>();
        write_rows(out, rows)
    }

    fn card_row(&self, card: &CardView) -> Vec<String> {
        let priority = match card.priority.label {
            label if label == Priority::Urgent.label() => self.paint(label, "31"),
            label if label == Priority::High.label() => self.paint(label, "33"),
            label => label.to_string(),
        };

        let due = match &card.due_label {
            Some(label) if card.overdue => self.paint(&format!("{label} !"), "31"),
            Some(label) => label.clone(),
            None => String::new(),
        };

        let tags = card
            .tags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" ");

        vec![
            format!("- {}", card.title),
            priority,
            due,
            card.initials
                .as_deref()
                .map(|initials| format!("@{initials}"))
                .unwrap_or_default(),
            tags,
            card.comments
                .map(|count| format!("{count} reacties"))
                .unwrap_or_default(),
        ]
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_rows<W: Write>(out: &mut W, rows: Vec<Vec<String>>) -> anyhow::Result<()> {
    let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; column_count];

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for row in rows {
        let mut line = String::from("   ");
        for (idx, cell) in row.iter().enumerate() {
            let visible = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible);
            line.push_str(cell);
            line.push_str(&" ".repeat(padding + 1));
        }
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use workboard_core::board::Board;
    use workboard_core::column::Column;
    use workboard_core::datetime::parse_due_date;
    use workboard_core::task::Task;

    use super::*;

    fn render(board: &Board) -> String {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 19, 9, 0, 0)
            .single()
            .expect("valid now");
        let mut out = Vec::new();
        Renderer::new(false)
            .print_board(&mut out, &board.layout(now))
            .expect("render");
        String::from_utf8(out).expect("utf8")
    }

    fn board() -> Board {
        let mut task = Task::new("t1", "Write copy");
        task.priority = Priority::Urgent;
        task.due_date = parse_due_date("2020-01-01");
        task.assignee = Some("Sanne de Boer".into());
        task.tags = vec!["seo".into(), "copy".into()];
        task.comments_count = Some(2);
        Board::new(vec![
            Column::new("todo", "Te doen", "blue").with_tasks(vec![task]),
            Column::new("review", "Review", "amber"),
        ])
    }

    #[test]
    fn renders_cards_and_placeholder() {
        let text = render(&board());
        assert!(text.contains("== Te doen (1) [blue]"));
        assert!(text.contains("- Write copy"));
        assert!(text.contains("Urgent"));
        assert!(text.contains("01-01-2020 !"));
        assert!(text.contains("@SD"));
        assert!(text.contains("#seo #copy"));
        assert!(text.contains("2 reacties"));
        assert!(text.contains("Geen taken"));
        assert_eq!(
            text.matches(ADD_TASK_TEXT).count(),
            2,
            "one add affordance per column"
        );
    }

    #[test]
    fn collapsed_column_is_one_line() {
        let mut board = board();
        board.toggle_column("todo");
        let text = render(&board);
        assert!(text.contains("|| Te doen (1) [blue]"));
        assert!(!text.contains("Write copy"));
    }

    #[test]
    fn strips_escape_sequences() {
        assert_eq!(strip_ansi("\x1b[31mUrgent\x1b[0m"), "Urgent");
    }
}
