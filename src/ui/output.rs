use owo_colors::{OwoColorize, Style};
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

pub struct Icons;

impl Icons {
    pub const DATABASE: &str = "🗄️";
    pub const CHECK: &str = "✓";
    pub const CROSS: &str = "✗";
    pub const ERROR: &str = "❌";
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub present: Style,
    pub missing: Style,
    pub error: Style,
    pub dim: Style,
}

impl Theme {
    /// Colors on a terminal, plain text when piped
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self {
            header: Style::new().cyan().bold(),
            present: Style::new().green().bold(),
            missing: Style::new().red(),
            error: Style::new().red().bold(),
            dim: Style::new().white().dimmed(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            present: Style::new(),
            missing: Style::new(),
            error: Style::new(),
            dim: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

pub fn header(text: &str) {
    println!("{} {}", Icons::DATABASE, text.style(theme().header.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::ERROR, label.style(theme().error.clone()));
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

/// ✓ / ✗ marker for the database column
pub fn db_marker(has_db: bool) -> String {
    if has_db {
        Icons::CHECK.style(theme().present.clone()).to_string()
    } else {
        Icons::CROSS.style(theme().missing.clone()).to_string()
    }
}
