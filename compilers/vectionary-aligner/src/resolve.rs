use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use vectionary_protocol::{strip_punctuation, DefinitionLink, Token};

/// Characters left alone by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Picks the link shown for a token.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    base_url: String,
    sentinel: String,
}

impl LinkResolver {
    pub fn new(base_url: impl Into<String>, sentinel: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), sentinel: sentinel.into() }
    }

    /// Whether a supplied definition is a usable link (non-empty, not the sentinel).
    pub fn is_available(&self, definition: &str) -> bool {
        let definition = definition.trim();
        !definition.is_empty() && definition != self.sentinel
    }

    /// Supplied link verbatim when available, else a dictionary lookup of the
    /// punctuation-stripped text. Tokens with no letters left get nothing.
    pub fn resolve(&self, token: &Token) -> DefinitionLink {
        if let Some(definition) = token.definition.as_deref() {
            if self.is_available(definition) {
                return DefinitionLink::Link(definition.to_string());
            }
        }
        self.dictionary_link(&token.text)
    }

    pub fn dictionary_link(&self, word: &str) -> DefinitionLink {
        let stripped = strip_punctuation(word);
        if stripped.is_empty() {
            return DefinitionLink::Unavailable;
        }
        DefinitionLink::Link(format!("{}{}", self.base_url, utf8_percent_encode(stripped, COMPONENT)))
    }
}
