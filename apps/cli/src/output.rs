//! Plain-text rendering of items for the terminal.

use std::io::{self, Write};

use shopkeep_core::Item;

use crate::config::CliConfig;

/// Longest name or category shown in a table cell before truncation.
const MAX_CELL: usize = 24;

/// Terminal columns occupied by `text`.
///
/// Hangul, CJK and full-width forms take two columns; everything else one.
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

fn char_width(ch: char) -> usize {
    match ch as u32 {
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA960..=0xA97F
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6 => 2,
        _ => 1,
    }
}

/// Shortens `text` to at most `max` columns, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = char_width(ch);
        if width + w + 1 > max {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

/// Left-aligns `text` in `width` columns.
pub fn pad_right(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(fill))
}

/// Right-aligns `text` in `width` columns.
pub fn pad_left(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{}{}", " ".repeat(fill), text)
}

/// Writes `rows` under `headers`, sizing every column to its widest cell.
///
/// Columns flagged in `numeric` are right-aligned.
pub fn write_table<W: Write>(
    writer: &mut W,
    headers: &[&str],
    numeric: &[bool],
    rows: &[Vec<String>],
) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let render = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if numeric.get(i).copied().unwrap_or(false) {
                    pad_left(cell, widths[i])
                } else {
                    pad_right(cell, widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    writeln!(writer, "{}", render(&header_cells))?;
    let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    writeln!(writer, "{}", "-".repeat(rule_width))?;
    for row in rows {
        writeln!(writer, "{}", render(row))?;
    }
    Ok(())
}

/// Writes items as an ID / name / category / price / stock / value table.
pub fn write_item_table<W: Write>(writer: &mut W, items: &[&Item], config: &CliConfig) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(writer, "(no items)");
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                item.id.to_string(),
                truncate(&item.name, MAX_CELL),
                truncate(&item.category, MAX_CELL),
                config.format_money(item.price),
                item.stock.to_string(),
                config.format_money(item.value()),
            ]
        })
        .collect();

    write_table(
        writer,
        &["ID", "NAME", "CATEGORY", "PRICE", "STOCK", "VALUE"],
        &[true, false, false, true, true, true],
        &rows,
    )
}

/// Writes every field of one item, one per line.
pub fn write_item_detail<W: Write>(writer: &mut W, item: &Item, config: &CliConfig) -> io::Result<()> {
    writeln!(writer, "ID:          {}", item.id)?;
    writeln!(writer, "Name:        {}", item.name)?;
    writeln!(writer, "Category:    {}", item.category)?;
    writeln!(writer, "Description: {}", item.description_text())?;
    writeln!(writer, "Price:       {}", config.format_money(item.price))?;
    writeln!(writer, "Stock:       {}", item.stock)?;
    writeln!(writer, "Value:       {}", config.format_money(item.value()))?;
    writeln!(writer, "Created:     {}", item.created_at)?;
    writeln!(writer, "Updated:     {}", item.updated_at)?;
    Ok(())
}
