use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::table::Cell;

/// Parse column letters as a bijective base-26 numeral (A=1, ..., Z=26, AA=27)
/// and return the 0-indexed column. Returns `None` for empty, non-letter or
/// overflowing input.
pub fn col_from_letters(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut result = 0usize;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
        result = result.checked_mul(26)?.checked_add(digit)?;
    }
    Some(result - 1)
}

/// Convert a 0-indexed column to Excel-style letters (0 -> A, 25 -> Z, 26 -> AA)
pub fn letters_from_col(mut col: usize) -> String {
    col += 1;
    let mut buf = Vec::new();
    while col > 0 {
        col -= 1;
        buf.push((b'A' + (col % 26) as u8) as char);
        col /= 26;
    }
    buf.into_iter().rev().collect()
}

/// Spreadsheet-style reference for a 0-indexed position, e.g. (0, 0) -> "A1"
pub fn cell_ref(row: usize, col: usize) -> String {
    format!("{}{}", letters_from_col(col), row + 1)
}

/// Truncate to at most `max_width` display columns, ending in `...` when cut
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return take_width(s, max_width);
    }
    format!("{}...", take_width(s, max_width - 3))
}

/// Truncate to `width` display columns with a single-character ellipsis
pub fn truncate_ellipsis(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    format!("{}…", take_width(s, width - 1))
}

/// Fit text into exactly `width` columns: control whitespace flattened,
/// long text cut with `...`, short text padded on the right.
pub fn fit_to_width(s: &str, width: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if matches!(c, '\n' | '\t' | '\r') { ' ' } else { c })
        .collect();

    let cut = if flat.width() > width {
        if width <= 3 {
            ".".repeat(width)
        } else {
            format!("{}...", take_width(&flat, width - 3))
        }
    } else {
        flat
    };
    pad_right(&cut, width)
}

pub fn pad_right(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Center text in a field of the given width
pub fn pad_center(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        return fit_to_width(s, width);
    }
    let left = (width - w) / 2;
    let right = width - w - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

/// Greedy word wrap to lines no wider than `width` (long words are kept whole)
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if text.width() <= width {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.width() + 1 + word.width() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Classification shown in the cell detail view
pub fn cell_type(cell: &Cell) -> &'static str {
    if cell.formula.as_deref().is_some_and(|f| !f.is_empty()) {
        "Formula"
    } else if cell.value.is_empty() {
        "Empty"
    } else if cell.value.trim().parse::<f64>().is_ok() {
        "Number"
    } else {
        "Text"
    }
}

fn take_width(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_from_letters() {
        assert_eq!(col_from_letters("A"), Some(0));
        assert_eq!(col_from_letters("B"), Some(1));
        assert_eq!(col_from_letters("Z"), Some(25));
        assert_eq!(col_from_letters("AA"), Some(26));
        assert_eq!(col_from_letters("AB"), Some(27));
        assert_eq!(col_from_letters("AZ"), Some(51));
        assert_eq!(col_from_letters("BA"), Some(52));
        assert_eq!(col_from_letters("j"), Some(9));
    }

    #[test]
    fn test_col_from_letters_rejects_garbage() {
        assert_eq!(col_from_letters(""), None);
        assert_eq!(col_from_letters("A1"), None);
        assert_eq!(col_from_letters(&"Z".repeat(40)), None);
    }

    #[test]
    fn test_letters_from_col() {
        assert_eq!(letters_from_col(0), "A");
        assert_eq!(letters_from_col(25), "Z");
        assert_eq!(letters_from_col(26), "AA");
        assert_eq!(letters_from_col(51), "AZ");
        assert_eq!(letters_from_col(701), "ZZ");
        assert_eq!(letters_from_col(702), "AAA");
    }

    #[test]
    fn test_letters_inverse() {
        for col in [0, 7, 25, 26, 300, 16383] {
            assert_eq!(col_from_letters(&letters_from_col(col)), Some(col));
        }
    }

    #[test]
    fn test_cell_ref() {
        assert_eq!(cell_ref(0, 0), "A1");
        assert_eq!(cell_ref(99, 27), "AB100");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long value here", 10), "a long ...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_truncate_ellipsis() {
        assert_eq!(truncate_ellipsis("Revenue", 15), "Revenue");
        assert_eq!(truncate_ellipsis("Quarterly revenue total", 10), "Quarterly…");
    }

    #[test]
    fn test_fit_to_width() {
        assert_eq!(fit_to_width("ab", 5), "ab   ");
        assert_eq!(fit_to_width("a\tb", 4), "a b ");
        assert_eq!(fit_to_width("abcdefgh", 6), "abc...");
        assert_eq!(fit_to_width("abcdefgh", 2), "..");
    }

    #[test]
    fn test_pad_center() {
        assert_eq!(pad_center("A", 5), "  A  ");
        assert_eq!(pad_center("AB", 5), " AB  ");
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("fits", 10), vec!["fits"]);
        assert_eq!(
            wrap_text("one two three four", 9),
            vec!["one two", "three", "four"]
        );
    }

    #[test]
    fn test_cell_type() {
        let mut cell = Cell::new(0, 0, "");
        assert_eq!(cell_type(&cell), "Empty");
        cell.value = "3.5".to_string();
        assert_eq!(cell_type(&cell), "Number");
        cell.value = "abc".to_string();
        assert_eq!(cell_type(&cell), "Text");
        cell.formula = Some("SUM(A1:A3)".to_string());
        assert_eq!(cell_type(&cell), "Formula");
    }
}
