//! Terminal bar charts
//!
//! Horizontal bars scaled against the largest value in the chart.

use colored::*;
use std::fmt::Write;

const BAR_CHAR: char = '█';

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        bars: Vec<Bar>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            bars,
        }
    }

    /// Render the chart with the longest bar `width` characters wide
    pub fn render(&self, width: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title.bright_white().bold());

        if self.bars.is_empty() {
            let _ = writeln!(out, "  {}", "No data".bright_black());
            return out;
        }

        let label_width = self
            .bars
            .iter()
            .map(|bar| bar.label.chars().count())
            .chain(std::iter::once(self.x_label.chars().count()))
            .max()
            .unwrap_or(0);

        let _ = writeln!(
            out,
            "  {} {}",
            pad(&self.x_label, label_width).bright_cyan(),
            self.y_label.bright_cyan()
        );

        let max_value = self.bars.iter().map(|bar| bar.value).fold(0.0_f64, f64::max);
        for bar in &self.bars {
            let length = bar_length(bar.value, max_value, width);
            let _ = writeln!(
                out,
                "  {} {} {}",
                pad(&bar.label, label_width),
                BAR_CHAR.to_string().repeat(length).bright_green(),
                format_value(bar.value)
            );
        }

        out
    }
}

/// Bar length in characters; any positive value gets at least one
fn bar_length(value: f64, max_value: f64, width: usize) -> usize {
    if max_value <= 0.0 || value <= 0.0 {
        return 0;
    }
    let scaled = (value / max_value * width as f64).round() as usize;
    scaled.clamp(1, width)
}

fn pad(label: &str, width: usize) -> String {
    let padding = width.saturating_sub(label.chars().count());
    format!("{}{}", label, " ".repeat(padding))
}

/// Whole numbers without decimals, everything else to two places
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar_count(line: &str) -> usize {
        line.chars().filter(|c| *c == BAR_CHAR).count()
    }

    #[test]
    fn test_bars_scale_to_width() {
        let chart = BarChart::new(
            "Average price",
            "category",
            "price",
            vec![Bar::new("A", 100.0), Bar::new("B", 50.0)],
        );

        let rendered = chart.render(20);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(bar_count(lines[2]), 20);
        assert_eq!(bar_count(lines[3]), 10);
        assert!(lines[2].contains("100"));
        assert!(lines[3].contains("50"));
    }

    #[test]
    fn test_small_values_still_visible() {
        let chart = BarChart::new("t", "x", "y", vec![Bar::new("big", 1000.0), Bar::new("tiny", 1.0)]);
        let rendered = chart.render(10);
        let tiny_line = rendered.lines().find(|line| line.contains("tiny")).unwrap();
        assert_eq!(bar_count(tiny_line), 1);
    }

    #[test]
    fn test_empty_chart() {
        let chart = BarChart::new("Average price by district", "rayon", "price", vec![]);
        let rendered = chart.render(30);
        assert!(rendered.contains("Average price by district"));
        assert!(rendered.contains("No data"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1200.0), "1200");
        assert_eq!(format_value(1411.5), "1411.50");
        assert_eq!(format_value(0.0), "0");
    }
}
