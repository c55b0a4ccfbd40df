//! `.env`-style file loading.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, EnvironmentValues};

/// Load `KEY=value` pairs from a dotenv file, preserving file order.
///
/// Values are taken verbatim: `$VAR` references are not expanded and nothing
/// is exported to the process environment.
pub fn load_env_file(path: &Path) -> Result<EnvironmentValues, AppError> {
    let content =
        fs::read_to_string(path).map_err(|e| env_file_error(path, dotenvy::Error::Io(e)))?;
    let escaped = escape_substitutions(&content);
    let mut values = EnvironmentValues::new();
    for item in dotenvy::from_read_iter(escaped.as_bytes()) {
        let (key, value) = item.map_err(|e| env_file_error(path, e))?;
        values.insert(key, value);
    }
    Ok(values)
}

/// Escape every `$` the dotenv parser would substitute.
///
/// Single-quoted values and comments are never substituted and pass through
/// untouched, as do existing escape sequences.
fn escape_substitutions(content: &str) -> String {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Plain,
        Single,
        Double,
        Comment,
    }

    let mut out = String::with_capacity(content.len());
    let mut state = State::Plain;
    let mut prev = '\n';
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        match (state, c) {
            (State::Comment, '\n') => state = State::Plain,
            (State::Comment, _) => {}
            (State::Single, '\'') => state = State::Plain,
            (State::Single, _) => {}
            (State::Plain | State::Double, '\\') => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                    prev = next;
                }
                continue;
            }
            (State::Plain | State::Double, '$') => out.push('\\'),
            (State::Plain, '\'') => state = State::Single,
            (State::Plain, '"') => state = State::Double,
            (State::Double, '"') => state = State::Plain,
            (State::Plain, '#') if prev.is_whitespace() => state = State::Comment,
            _ => {}
        }
        out.push(c);
        prev = c;
    }
    out
}

fn env_file_error(path: &Path, err: dotenvy::Error) -> AppError {
    match err {
        dotenvy::Error::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
            AppError::EnvFileNotFound(path.to_path_buf())
        }
        other => AppError::EnvFileParse { path: path.to_path_buf(), details: other.to_string() },
    }
}
