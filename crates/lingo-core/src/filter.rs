//! File-filter templates
//!
//! A file filter is a path template with a single `<lang>` placeholder,
//! e.g. `translations/<lang>/app.po`. Compilation turns it into a token
//! sequence the automaton consumes one character at a time; capture splits
//! a matched path back into its language code.

use lingo_fs::NormalizedPath;

use crate::resource::ResourceId;
use crate::{Error, Result};

/// The placeholder token marking the language segment of a template.
pub const LANG_PLACEHOLDER: &str = "<lang>";

/// One unit of a compiled template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    /// A literal path character
    Literal(char),
    /// The language placeholder: one or more non-separator characters
    Language,
}

/// A compiled file-naming template.
///
/// Invariant: the expression contains `<lang>` exactly once, so the
/// template splits into a literal prefix and a literal suffix around the
/// placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    expression: String,
    prefix: String,
    suffix: String,
}

impl FileFilter {
    /// Compile a template, rejecting zero or repeated placeholders.
    ///
    /// The error carries the resource identity; a malformed filter is fatal
    /// for that resource but must not abort the rest of the run.
    pub fn parse(resource: &ResourceId, expression: &str) -> Result<Self> {
        let mut parts = expression.split(LANG_PLACEHOLDER);
        let (prefix, suffix) = match (parts.next(), parts.next(), parts.next()) {
            (Some(prefix), Some(suffix), None) => (prefix, suffix),
            _ => {
                return Err(Error::MalformedFilter {
                    resource: resource.to_string(),
                    filter: expression.to_string(),
                });
            }
        };
        Ok(Self {
            expression: expression.to_string(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }

    /// The raw template string.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The token stream the automaton is built from.
    pub(crate) fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.prefix
            .chars()
            .map(Token::Literal)
            .chain(std::iter::once(Token::Language))
            .chain(self.suffix.chars().map(Token::Literal))
    }

    /// Extract the language code from a path this filter matched.
    ///
    /// The capture must be non-empty and must not cross a path separator;
    /// anything else means the path does not really belong to this filter.
    pub fn language_of<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        let lang = rest.strip_suffix(self.suffix.as_str())?;
        if lang.is_empty() || lang.contains('/') {
            return None;
        }
        Some(lang)
    }

    /// The path a translation for `lang` would live at.
    pub fn path_for(&self, lang: &str) -> NormalizedPath {
        NormalizedPath::new(format!("{}{}{}", self.prefix, lang, self.suffix))
    }
}
