use super::block::{Block, Metric};
use super::spec::{ChartSpec, Series};
use crate::store::QueryResult;
use colored::Colorize;
use std::io::{self, Write};
use tabled::builder::Builder;
use tabled::settings::Style;

const GLYPHS: [char; 2] = ['█', '▒'];

#[derive(Debug, Clone)]
pub struct TerminalSurface {
    chart_width: usize,
    max_rows: usize,
}

impl TerminalSurface {
    pub fn new(chart_width: usize, max_rows: usize) -> Self {
        Self {
            chart_width: chart_width.max(1),
            max_rows: max_rows.max(1),
        }
    }

    pub fn print(&self, blocks: &[Block]) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_blocks(&mut out, blocks)?;
        out.flush()
    }

    pub fn write_blocks<W: Write>(&self, out: &mut W, blocks: &[Block]) -> io::Result<()> {
        for block in blocks {
            self.write_block(out, block)?;
        }
        Ok(())
    }

    pub fn write_block<W: Write>(&self, out: &mut W, block: &Block) -> io::Result<()> {
        match block {
            Block::Heading(text) => writeln!(out, "\n{}", text.bold()),
            Block::Text(text) => writeln!(out, "{}", text),
            Block::Info(text) => writeln!(out, "{}", text.cyan()),
            Block::Success(text) => writeln!(out, "{}", text.green()),
            Block::Warning(text) => writeln!(out, "{}", text.yellow()),
            Block::Error(text) => writeln!(out, "{}", format!("Error: {}", text).red()),
            Block::Table(result) => writeln!(out, "{}", self.format_table(result)),
            Block::Metrics(metrics) => writeln!(out, "{}", format_metrics(metrics)),
            Block::Chart(spec) => writeln!(out, "{}", self.format_chart(spec)),
        }
    }

    pub fn format_table(&self, result: &QueryResult) -> String {
        if result.column_count() == 0 {
            return "(no columns)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(result.column_names().into_iter().map(String::from));
        let shown = result.row_count().min(self.max_rows);
        for i in 0..shown {
            if let Some(row) = result.row(i) {
                builder.push_record(row.into_iter().map(|v| v.to_string()));
            }
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        let mut text = table.to_string();

        if result.row_count() > shown {
            text.push_str(&format!(
                "\n(showing {} of {} rows)",
                shown,
                result.row_count()
            ));
        } else {
            text.push_str(&format!("\n({} rows)", result.row_count()));
        }
        text
    }

    pub fn format_chart(&self, spec: &ChartSpec) -> String {
        let mut lines = Vec::new();
        let title = spec.title.clone().unwrap_or_else(|| spec.x.clone());
        lines.push(format!("{} ({})", title.bold(), spec.mark.name()));

        if spec.series.len() > 1 {
            let legend: Vec<String> = spec
                .series
                .iter()
                .zip(GLYPHS)
                .map(|(s, g)| format!("{} {}", g, s.name))
                .collect();
            lines.push(format!("  {}", legend.join("   ")));
        }

        let label_width = spec
            .categories
            .iter()
            .map(|c| c.chars().count())
            .max()
            .unwrap_or(0);
        let scale = max_magnitude(&spec.series);
        let total: f64 = spec
            .series
            .first()
            .map(|s| s.values.iter().flatten().filter(|v| v.is_finite()).sum())
            .unwrap_or(0.0);

        for (i, category) in spec.categories.iter().enumerate() {
            for (n, (series, glyph)) in spec.series.iter().zip(GLYPHS).enumerate() {
                let label = if n == 0 { category.as_str() } else { "" };
                let value = series.values.get(i).copied().flatten();
                let bar = match value {
                    Some(v) if v.is_finite() && scale > 0.0 => {
                        let len = ((v.abs() / scale) * self.chart_width as f64).round() as usize;
                        glyph.to_string().repeat(len)
                    }
                    _ => String::new(),
                };
                let shown = match value {
                    Some(v) if spec.mark.is_share() && total > 0.0 => {
                        format!("{} ({:.1}%)", format_number(v), v / total * 100.0)
                    }
                    Some(v) => format_number(v),
                    None => "NULL".to_string(),
                };
                lines.push(format!(
                    "  {:<width$} │{} {}",
                    label,
                    bar,
                    shown,
                    width = label_width
                ));
            }
        }

        lines.join("\n")
    }
}

fn format_metrics(metrics: &[Metric]) -> String {
    let mut builder = Builder::default();
    builder.push_record(metrics.iter().map(|m| m.label.clone()));
    builder.push_record(metrics.iter().map(|m| m.value.to_string()));
    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

fn max_magnitude(series: &[Series]) -> f64 {
    series
        .iter()
        .flat_map(|s| s.values.iter().flatten())
        .filter(|v| v.is_finite())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{:.2}", v)
    }
}
