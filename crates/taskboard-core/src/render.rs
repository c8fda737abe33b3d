use std::io::{self, IsTerminal, Write};

use unicode_width::UnicodeWidthStr;

use crate::config::Settings;
use crate::stats::Stats;
use crate::task::{Priority, Task};

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            color: settings.color && io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip(self, out, tasks))]
    pub fn write_task_table<W: Write>(&self, out: W, tasks: &[Task]) -> anyhow::Result<()> {
        let headers = vec![
            "#".to_string(),
            "Pri".to_string(),
            "Done".to_string(),
            "Title".to_string(),
            "Id".to_string(),
        ];

        let rows = tasks
            .iter()
            .enumerate()
            .map(|(idx, task)| {
                let priority = match task.priority {
                    Priority::High => self.paint(task.priority.label(), "31"),
                    Priority::Medium => self.paint(task.priority.label(), "33"),
                    Priority::Low => self.paint(task.priority.label(), "32"),
                };
                let done = if task.completed { "✔" } else { "" };
                vec![
                    (idx + 1).to_string(),
                    priority,
                    done.to_string(),
                    task.title.clone(),
                    task.id.to_string(),
                ]
            })
            .collect();

        write_table(out, headers, rows)
    }

    pub fn write_stats<W: Write>(&self, mut out: W, stats: &Stats) -> anyhow::Result<()> {
        writeln!(out, "total      {}", stats.total)?;
        writeln!(out, "completed  {}", stats.completed)?;
        writeln!(out, "pending    {}", stats.pending)?;
        writeln!(out, "rate       {}", stats.completion_label())?;
        writeln!(out, "high       {}", stats.high_priority_label())?;
        writeln!(out, "latest     {}", stats.latest_label())?;
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for (header, &width) in headers.iter().zip(&widths) {
        write!(writer, "{header:width$} ")?;
    }
    writeln!(writer)?;

    for &width in &widths {
        write!(writer, "{:-<width$} ", "")?;
    }
    writeln!(writer)?;

    for row in rows {
        for (cell, width) in row.iter().zip(&widths) {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = width.saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
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
