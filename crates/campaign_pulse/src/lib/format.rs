//! Number and table formatting shared by the report text and the dashboard.

use std::iter::once;

use itertools::Itertools;

/// Inserts `,` every three digits of an unsigned integer string.
fn group_thousands(digits: &str) -> String {
    let len = digits.chars().count();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `255000` -> `255,000`
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Whole amounts print without decimals (`1,352,000`), others with two (`1,234.50`).
pub fn format_amount(value: f64) -> String {
    let formatted = if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    };

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };

    match unsigned.split_once('.') {
        Some((int_part, frac_part)) => format!("{sign}{}.{frac_part}", group_thousands(int_part)),
        None => format!("{sign}{}", group_thousands(unsigned)),
    }
}

/// Shortest decimal form with a unit suffix, `n/a` when undefined.
pub fn format_metric(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v}{suffix}"),
        None => "n/a".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Renders a plain-text table with a header row, columns separated by two spaces.
pub fn render_table(columns: &[(&str, Align)], rows: &[Vec<String>]) -> String {
    let widths = columns
        .iter()
        .enumerate()
        .map(|(idx, (header, _))| {
            rows.iter()
                .map(|row| row.get(idx).map_or(0, |cell| cell.chars().count()))
                .chain(once(header.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect_vec();

    let render_row = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(columns)
            .zip(&widths)
            .map(|((cell, (_, align)), &width)| match align {
                Align::Left => format!("{cell:<width$}"),
                Align::Right => format!("{cell:>width$}"),
            })
            .join("  ")
            .trim_end()
            .to_string()
    };

    once(render_row(columns.iter().map(|(header, _)| *header).collect()))
        .chain(
            rows.iter()
                .map(|row| render_row(row.iter().map(String::as_str).collect())),
        )
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_352_000), "1,352,000");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(255_000.0), "255,000");
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(-1_500.0), "-1,500");
        assert_eq!(format_amount(0.25), "0.25");
    }

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(Some(5.3), "x"), "5.3x");
        assert_eq!(format_metric(Some(18.0), "x"), "18x");
        assert_eq!(format_metric(None, "%"), "n/a");
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let table = render_table(
            &[("channel", Align::Left), ("spend", Align::Right)],
            &[
                vec!["Email".into(), "20,000".into()],
                vec!["Google Ads".into(), "5".into()],
            ],
        );

        assert_eq!(
            table,
            "channel      spend\n\
             Email       20,000\n\
             Google Ads       5"
        );
    }
}
