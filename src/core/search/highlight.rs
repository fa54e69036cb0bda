//! Query highlighting for result fields.
//!
//! Every case-insensitive, non-overlapping occurrence of the query is
//! marked, scanning left to right. The query is matched literally;
//! regex metacharacters in user input carry no meaning.

use regex::RegexBuilder;
use serde::Serialize;
use std::fmt;

/// Placeholder rendered for absent or empty source text
pub const PLACEHOLDER: &str = "N/A";

/// A run of text, emphasized or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub text: String,
    pub marked: bool,
}

impl Fragment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            marked: false,
        }
    }

    fn marked(text: &str) -> Self {
        Self {
            text: text.to_string(),
            marked: true,
        }
    }
}

/// Text split into emphasized and literal fragments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlighted {
    pub fragments: Vec<Fragment>,
}

impl Highlighted {
    fn literal(text: &str) -> Self {
        Self {
            fragments: vec![Fragment::plain(text)],
        }
    }

    /// Emphasized substrings, in order
    pub fn marks(&self) -> Vec<&str> {
        self.fragments
            .iter()
            .filter(|f| f.marked)
            .map(|f| f.text.as_str())
            .collect()
    }

    pub fn has_marks(&self) -> bool {
        self.fragments.iter().any(|f| f.marked)
    }

    /// Render with `emphasize` applied to marked fragments
    pub fn render_with<F>(&self, mut emphasize: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        self.fragments
            .iter()
            .map(|f| {
                if f.marked {
                    emphasize(&f.text)
                } else {
                    f.text.clone()
                }
            })
            .collect()
    }
}

impl fmt::Display for Highlighted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            f.write_str(&fragment.text)?;
        }
        Ok(())
    }
}

/// Mark every occurrence of `query` in `text`.
///
/// Absent or empty `text` yields [`PLACEHOLDER`]; an empty `query`
/// leaves `text` unmarked.
pub fn highlight(text: Option<&str>, query: &str) -> Highlighted {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return Highlighted::literal(PLACEHOLDER),
    };

    if query.is_empty() {
        return Highlighted::literal(text);
    }

    let matcher = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(m) => m,
        Err(e) => {
            // Only reachable for absurdly long queries exceeding the size limit
            tracing::debug!("Highlight pattern rejected: {}", e);
            return Highlighted::literal(text);
        }
    };

    let mut fragments = Vec::new();
    let mut cursor = 0;
    for m in matcher.find_iter(text) {
        if m.start() > cursor {
            fragments.push(Fragment::plain(&text[cursor..m.start()]));
        }
        fragments.push(Fragment::marked(m.as_str()));
        cursor = m.end();
    }
    if cursor < text.len() {
        fragments.push(Fragment::plain(&text[cursor..]));
    }

    Highlighted { fragments }
}
