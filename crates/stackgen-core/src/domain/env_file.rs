//! Ordered line model for dotenv-style files with upsert semantics.
//!
//! # Design
//!
//! The template's `.env.example` is parsed once into an ordered sequence of
//! lines; key/value lines become addressable pairs, everything else (comments,
//! blank lines) is preserved verbatim. `upsert` is
//! replace-if-present-else-append on a single key and is idempotent: applying
//! the same key/value twice yields the same text as applying it once. This
//! replaces per-key regex surgery with one deterministic serialization pass.

/// One line of an environment file.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// A `KEY=value` assignment.
    Pair { key: String, value: String },
    /// Comment, blank line, or anything that is not an assignment.
    Raw(String),
}

/// An environment file as an ordered collection of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    lines: Vec<Line>,
}

impl EnvFile {
    /// Parse environment file text, preserving line order.
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|line| match split_assignment(line) {
                Some((key, value)) => Line::Pair {
                    key: key.to_string(),
                    value: value.to_string(),
                },
                None => Line::Raw(line.to_string()),
            })
            .collect();
        Self { lines }
    }

    /// Replace the value of `key` if an assignment exists, otherwise append
    /// a new `KEY=value` line.
    ///
    /// Duplicate assignments of the same key are collapsed to the first
    /// occurrence, so an upserted key always appears exactly once.
    pub fn upsert(&mut self, key: &str, value: &str) {
        let mut found = false;
        self.lines.retain_mut(|line| match line {
            Line::Pair { key: k, value: v } if k == key => {
                if found {
                    return false;
                }
                found = true;
                *v = value.to_string();
                true
            }
            _ => true,
        });

        if !found {
            self.lines.push(Line::Pair {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
    }

    /// Current value of `key`, if assigned.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            Line::Pair { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of assignments for `key` (for duplicate-detection in tests).
    pub fn count_key(&self, key: &str) -> usize {
        self.lines
            .iter()
            .filter(|line| matches!(line, Line::Pair { key: k, .. } if k == key))
            .count()
    }

    /// All assigned keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            Line::Pair { key, .. } => Some(key.as_str()),
            _ => None,
        })
    }

    /// Serialize back to text. Assignments render as `KEY=value`; raw lines
    /// render verbatim; output ends with a single trailing newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Pair { key, value } => {
                    out.push_str(key);
                    out.push('=');
                    out.push_str(value);
                }
                Line::Raw(raw) => out.push_str(raw),
            }
            out.push('\n');
        }
        out
    }
}

/// Split a line into `(key, value)` if it is an assignment.
///
/// A key is `[A-Za-z_][A-Za-z0-9_]*`, optionally surrounded by whitespace,
/// followed by `=`. Comment lines are never assignments.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return None;
    }
    let eq = line.find('=')?;
    let key = line[..eq].trim();
    let mut chars = key.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some((key, &line[eq + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_preserves_comments_and_blank_lines() {
        let text = "# app config\nPORT=3000\n\nAPP_NAME=demo\n";
        let env = EnvFile::parse(text);
        assert_eq!(env.render(), text);
    }

    #[test]
    fn upsert_replaces_existing_value_in_place() {
        let mut env = EnvFile::parse("PORT=3000\nAPP_NAME=demo\n");
        env.upsert("PORT", "8080");
        assert_eq!(env.render(), "PORT=8080\nAPP_NAME=demo\n");
    }

    #[test]
    fn upsert_appends_missing_key() {
        let mut env = EnvFile::parse("PORT=3000\n");
        env.upsert("APP_URL", "http://localhost:3000");
        assert_eq!(env.render(), "PORT=3000\nAPP_URL=http://localhost:3000\n");
    }

    #[test]
    fn upsert_is_idempotent_per_key() {
        let mut once = EnvFile::parse("PORT=3000\n# note\n");
        once.upsert("PORT", "9999");
        let mut twice = once.clone();
        twice.upsert("PORT", "9999");
        assert_eq!(once.render(), twice.render());
    }

    #[test]
    fn upsert_collapses_duplicate_assignments() {
        let mut env = EnvFile::parse("KEY=a\nKEY=b\nOTHER=x\n");
        env.upsert("KEY", "c");
        assert_eq!(env.count_key("KEY"), 1);
        assert_eq!(env.render(), "KEY=c\nOTHER=x\n");
    }

    #[test]
    fn upsert_matches_whitespace_padded_keys() {
        let mut env = EnvFile::parse("PORT  = 3000\n");
        env.upsert("PORT", "8080");
        assert_eq!(env.render(), "PORT=8080\n");
    }

    #[test]
    fn commented_assignment_is_not_a_pair() {
        let mut env = EnvFile::parse("# PORT=3000\n");
        env.upsert("PORT", "8080");
        assert_eq!(env.render(), "# PORT=3000\nPORT=8080\n");
    }

    #[test]
    fn value_may_contain_equals_signs() {
        let env = EnvFile::parse("URL=http://x?a=1&b=2\n");
        assert_eq!(env.get("URL"), Some("http://x?a=1&b=2"));
    }

    #[test]
    fn non_key_lines_are_raw() {
        let text = "export PATH something\n123=nope\n";
        let env = EnvFile::parse(text);
        assert_eq!(env.keys().count(), 0);
        assert_eq!(env.render(), text);
    }

    #[test]
    fn reparsing_rendered_output_is_stable() {
        let mut env = EnvFile::parse("# header\nPORT=3000\n");
        env.upsert("APP_NAME", "demo");
        let rendered = env.render();
        assert_eq!(EnvFile::parse(&rendered).render(), rendered);
    }
}
