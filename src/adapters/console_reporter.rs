use colored::Colorize;

use crate::ports::Reporter;

/// Reporter that prints glyph-prefixed, colored lines to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    fn success(&self, message: &str) {
        println!("{} {}", "✔".green(), message);
    }

    fn warn(&self, message: &str) {
        println!("{} {}", "⚠".yellow(), message.yellow());
    }

    fn error(&self, message: &str) {
        println!("{} {}", "✖".red(), message.red());
    }

    fn item(&self, message: &str) {
        println!("  {} {}", "•".dimmed(), message);
    }

    fn raw(&self, message: &str) {
        println!("{}", message);
    }
}
