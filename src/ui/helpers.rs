use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Clip `text` to `width` characters, padding with spaces on the right so
/// table columns line up regardless of content length. Clipped values get an
/// ellipsis so the user can tell the cell is incomplete.
pub(crate) fn clip_pad(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut cell: String = if chars.len() > width {
        let mut clipped: String = chars[..width.saturating_sub(1)].iter().collect();
        clipped.push('…');
        clipped
    } else {
        text.to_string()
    };

    let cell_len = cell.chars().count();
    if cell_len < width {
        cell.push_str(&" ".repeat(width - cell_len));
    }
    cell
}

/// Split the table width into the four catalog columns: title gets the most
/// room, author comes next, year is short, and the isbn takes the remainder.
/// Separator gaps between columns are already subtracted by the caller.
pub(crate) fn column_widths(total: usize) -> [usize; 4] {
    let title = total * 35 / 100;
    let author = total * 25 / 100;
    let year = total * 10 / 100;
    let isbn = total.saturating_sub(title + author + year);
    [title, author, year, isbn]
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_pad_pads_short_values() {
        assert_eq!(clip_pad("abc", 6), "abc   ");
    }

    #[test]
    fn clip_pad_clips_long_values_with_ellipsis() {
        let cell = clip_pad("a very long title", 8);
        assert_eq!(cell.chars().count(), 8);
        assert!(cell.ends_with('…'));
    }

    #[test]
    fn clip_pad_handles_zero_width() {
        assert_eq!(clip_pad("abc", 0), "");
    }

    #[test]
    fn column_widths_cover_the_full_line() {
        for total in [20usize, 57, 80, 120] {
            let widths = column_widths(total);
            assert_eq!(widths.iter().sum::<usize>(), total);
        }
    }
}
