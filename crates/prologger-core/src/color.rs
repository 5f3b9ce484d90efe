//! Terminal color rendering

use colored::Colorize;
use prologger_core_types::Color;

fn ansi(color: Color) -> colored::Color {
    match color {
        Color::Black => colored::Color::Black,
        Color::Red => colored::Color::Red,
        Color::Green => colored::Color::Green,
        Color::Yellow => colored::Color::Yellow,
        Color::Blue => colored::Color::Blue,
        Color::Magenta => colored::Color::Magenta,
        Color::Cyan => colored::Color::Cyan,
        Color::White => colored::Color::White,
    }
}

/// Render `text` in `color` using ANSI escape sequences
///
/// Honors `colored`'s global switches (`NO_COLOR`, `CLICOLOR_FORCE`,
/// `colored::control::set_override`).
pub fn colorize(text: &str, color: Color) -> String {
    text.color(ansi(color)).to_string()
}

/// Render `text` in `color` whatever the terminal or `colored`'s switches say
pub fn paint(text: &str, color: Color) -> String {
    format!("\x1b[{}m{}\x1b[0m", ansi(color).to_fg_str(), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_emits_escape_sequences() {
        assert_eq!(paint("hello", Color::Red), "\x1b[31mhello\x1b[0m");
        assert_eq!(paint("hello", Color::Cyan), "\x1b[36mhello\x1b[0m");
    }

    #[test]
    fn test_paint_distinguishes_colors() {
        let all = [
            Color::Black,
            Color::Red,
            Color::Green,
            Color::Yellow,
            Color::Blue,
            Color::Magenta,
            Color::Cyan,
            Color::White,
        ];
        let mut rendered: Vec<String> = all.iter().map(|c| paint("x", *c)).collect();
        rendered.dedup();
        assert_eq!(rendered.len(), all.len());
    }

    #[test]
    fn test_colorize_keeps_text() {
        let out = colorize("hello", Color::Cyan);
        assert!(out.contains("hello"));
    }
}
