#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render an aligned table. Widths are measured in characters so accented
/// keywords line up.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_width(cell))
                .max()
                .unwrap_or(0)
                .max(display_width(header))
                .max(MIN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| pad_cell(&truncate_text(header, *width), "", *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(display_width(&header_line));

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("", String::as_str);
                let text = truncate_text(value, *width);
                let style = if options.color { tier_color(&text) } else { "" };
                pad_cell(&text, style, *width, looks_numeric(&text))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

const MIN_WIDTH: usize = 4;

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > display_width(headers[*idx]).max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if display_width(value) <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn pad_cell(value: &str, style: &str, width: usize, right_align: bool) -> String {
    let pad = " ".repeat(width.saturating_sub(display_width(value)));
    let styled = if style.is_empty() {
        value.to_string()
    } else {
        format!("\u{1b}[{style}m{value}\u{1b}[0m")
    };
    if right_align {
        format!("{pad}{styled}")
    } else {
        format!("{styled}{pad}")
    }
}

fn tier_color(value: &str) -> &'static str {
    match value {
        "highest priority" => "32",
        "high priority" => "36",
        "low priority" => "33",
        "deprioritized" => "90",
        "Pillar Page" => "1",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn columns_align_on_characters() {
        let rows = vec![
            vec!["áo dài".to_string(), "12".to_string()],
            vec!["running shoes".to_string(), "3".to_string()],
        ];
        let table = render_table(&["Keyword", "Volume"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Keyword        Volume");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "áo dài             12");
        assert_eq!(lines[3], "running shoes       3");
    }

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let rows = vec![vec![
            "a very long keyword phrase indeed".to_string(),
            "x".to_string(),
        ]];
        let table = render_table(
            &["Keyword", "Role"],
            &rows,
            TableOptions {
                max_width: Some(20),
                color: false,
            },
        );
        let row = table.lines().nth(2).unwrap();
        assert!(row.contains('…'));
        assert!(display_width(row) <= 20);
    }

    #[test]
    fn tiers_are_colored_when_enabled() {
        let rows = vec![vec!["highest priority".to_string()]];
        let table = render_table(
            &["Priority"],
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(table.contains("\u{1b}[32mhighest priority\u{1b}[0m"));
    }
}
