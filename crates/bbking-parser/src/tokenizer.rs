//! Tokenizer for BBCode-style tags.

use std::collections::BTreeMap;

/// Token types produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Plain text content.
    Text(&'a str),
    /// Opening tag: `[name]`, `[name=value]` or `[name key=value]`.
    Open(OpenTag<'a>),
    /// Closing tag: `[/name]`
    Close { name: String, raw: &'a str },
    /// Invalid tag syntax (passed through as text).
    Invalid(&'a str),
}

/// A recognised opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OpenTag<'a> {
    /// The tag exactly as written, brackets included.
    pub raw: &'a str,
    /// Lowercased tag name.
    pub name: String,
    pub arg: Option<String>,
    pub kwargs: BTreeMap<String, String>,
}

/// Where the bracketed span starting at offset 0 ends.
enum TagEnd {
    /// Byte offset of the closing `]`.
    Close(usize),
    /// Another `[` opened before this one closed, at the given offset.
    Interrupted(usize),
    /// No closing bracket at all.
    Unterminated,
}

pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Checks if a string is a valid tag name.
    ///
    /// A name starts with an ASCII letter or underscore, followed by letters,
    /// digits, underscores or hyphens. Case is ignored.
    pub(crate) fn is_valid_tag_name(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
            _ => return false,
        }
        chars.all(is_name_char)
    }

    /// Finds the closing bracket of the span starting at `s[0] == '['`.
    ///
    /// Quotes only count when they open a value, i.e. directly after `=`, so
    /// apostrophes in unquoted text do not swallow the rest of the input. A
    /// quote only closes when followed by whitespace, `]` or the end of input.
    /// If it never closes, the first bracket seen inside it ends the span
    /// instead, which keeps a stray quote from eating later tags.
    fn find_tag_end(s: &str) -> TagEnd {
        let mut quote: Option<char> = None;
        let mut fallback: Option<TagEnd> = None;
        let mut prev_significant: Option<char> = None;

        for (idx, c) in s.char_indices().skip(1) {
            match quote {
                Some(q) if c == q && closes_quote(&s[idx + c.len_utf8()..]) => {
                    quote = None;
                    fallback = None;
                }
                Some(_) => {
                    if fallback.is_none() {
                        fallback = match c {
                            ']' => Some(TagEnd::Close(idx)),
                            '[' => Some(TagEnd::Interrupted(idx)),
                            _ => None,
                        };
                    }
                }
                None => match c {
                    ']' => return TagEnd::Close(idx),
                    '[' => return TagEnd::Interrupted(idx),
                    '"' | '\'' if prev_significant == Some('=') => quote = Some(c),
                    _ => {}
                },
            }
            if !c.is_whitespace() {
                prev_significant = Some(c);
            }
        }

        fallback.unwrap_or(TagEnd::Unterminated)
    }

    fn parse_open(raw: &'a str, content: &str) -> Option<OpenTag<'a>> {
        let name_len = content
            .find(|c: char| !is_name_char(c))
            .unwrap_or(content.len());
        let (name, rest) = content.split_at(name_len);
        if !Self::is_valid_tag_name(name) {
            return None;
        }

        let mut tag = OpenTag {
            raw,
            name: name.to_ascii_lowercase(),
            arg: None,
            kwargs: BTreeMap::new(),
        };

        if rest.is_empty() {
            return Some(tag);
        }

        if let Some(value) = rest.strip_prefix('=') {
            tag.arg = Some(unquote(value.trim()).to_string());
            return Some(tag);
        }

        if rest.starts_with(char::is_whitespace) {
            tag.kwargs = parse_kwargs(rest)?;
            return Some(tag);
        }

        None
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let remaining = &self.input[self.pos..];

        // Look for the next '['
        let Some(bracket_pos) = remaining.find('[') else {
            self.pos = self.input.len();
            return Some(Token::Text(remaining));
        };

        if bracket_pos > 0 {
            let text = &remaining[..bracket_pos];
            self.pos += bracket_pos;
            return Some(Token::Text(text));
        }

        match Self::find_tag_end(remaining) {
            TagEnd::Close(end) => {
                let full_tag = &remaining[..=end];
                let content = &remaining[1..end];
                self.pos += end + 1;

                if let Some(name) = content.strip_prefix('/') {
                    let name = name.trim();
                    if Self::is_valid_tag_name(name) {
                        return Some(Token::Close {
                            name: name.to_ascii_lowercase(),
                            raw: full_tag,
                        });
                    }
                    return Some(Token::Invalid(full_tag));
                }

                match Self::parse_open(full_tag, content) {
                    Some(tag) => Some(Token::Open(tag)),
                    None => Some(Token::Invalid(full_tag)),
                }
            }
            TagEnd::Interrupted(next) => {
                // The bracket never closed before another one opened
                let text = &remaining[..next];
                self.pos += next;
                Some(Token::Text(text))
            }
            TagEnd::Unterminated => {
                self.pos = self.input.len();
                Some(Token::Text(remaining))
            }
        }
    }
}

fn closes_quote(rest: &str) -> bool {
    rest.chars()
        .next()
        .map_or(true, |next| next == ']' || next.is_whitespace())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parses ` key=value other="two words"` into a map.
///
/// Returns `None` when any pair is malformed, which makes the whole tag
/// literal text.
fn parse_kwargs(input: &str) -> Option<BTreeMap<String, String>> {
    let mut kwargs = BTreeMap::new();
    let mut rest = input.trim_start();

    while !rest.is_empty() {
        let key_len = rest.find(|c: char| !is_name_char(c)).unwrap_or(rest.len());
        if key_len == 0 {
            return None;
        }
        let key = rest[..key_len].to_ascii_lowercase();
        rest = rest[key_len..].strip_prefix('=')?;

        let value = match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let close = rest[1..].find(quote)? + 1;
                let value = &rest[1..close];
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                    return None;
                }
                value
            }
            _ => {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                let value = &rest[..end];
                rest = &rest[end..];
                value
            }
        };

        kwargs.insert(key, value.to_string());
        rest = rest.trim_start();
    }

    Some(kwargs)
}
