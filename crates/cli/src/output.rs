//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use console::{Alignment, measure_text_width, pad_str};
use owo_colors::OwoColorize;
use searchdish_core::validation::ValidationResult;
use searchdish_core::{Error, ErrorCode};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a dimmed placeholder for an empty list
    pub fn empty(message: &str) {
        println!("{}", message.dimmed());
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(measure_text_width(message)));
    }
}

/// Print a failed command to stderr
pub fn report_error(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error.message);
    if let Some(context) = &error.context {
        eprintln!("  {}", context.dimmed());
    }
    if let Some(suggestion) = &error.suggestion {
        eprintln!("  {} {}", "→".cyan(), suggestion);
    }
    if error.code == ErrorCode::ValidationError {
        eprintln!("  {}", "Nothing was sent to the server.".dimmed());
    }
}

/// Print per-field validation errors
pub fn report_validation(result: &ValidationResult) {
    for error in result.errors() {
        eprintln!("  {} {}: {}", "✗".red(), error.field.bold(), error.message);
    }
}

/// Column-aligned plain-text table
///
/// Widths are measured on display width, so accented names and colored
/// cells line up.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given column headers
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells render blank and extra cells are dropped
    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
        self
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| measure_text_width(&row[i]))
                    .chain(std::iter::once(measure_text_width(header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render the table, one line per row, without trailing whitespace
    pub fn render(&self) -> String {
        let widths = self.widths();
        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| pad_str(cell, *width, Alignment::Left, None).into_owned())
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = Vec::with_capacity(self.rows.len() + 2);
        out.push(line(&self.headers));
        out.push(
            widths
                .iter()
                .map(|w| "─".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        out.extend(self.rows.iter().map(|row| line(row)));
        out.join("\n")
    }

    /// Print the table to stdout
    pub fn print(&self) {
        println!("{}", self.render());
    }
}

/// Format a price the way menus show it: `2 500 Fcfa`, `12.50 EUR`
pub fn format_price(amount: f64, currency: &str) -> String {
    let formatted = if amount.fract() == 0.0 {
        group_thousands(&format!("{amount:.0}"))
    } else {
        let fixed = format!("{amount:.2}");
        match fixed.split_once('.') {
            Some((whole, cents)) => format!("{}.{cents}", group_thousands(whole)),
            None => fixed,
        }
    };
    if currency.is_empty() {
        formatted
    } else {
        format!("{formatted} {currency}")
    }
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = digits
        .strip_prefix('-')
        .map_or(("", digits), |rest| ("-", rest));
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

/// Format the pager line under a list
pub fn format_page(page: u32, total_pages: u32, total: u64) -> String {
    format!("Page {page} of {} ({total} total)", total_pages.max(1))
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Shorten `text` to `max` display columns, ending with `…` when cut
pub fn truncate(text: &str, max: usize) -> String {
    console::truncate_str(text, max, "…").into_owned()
}
