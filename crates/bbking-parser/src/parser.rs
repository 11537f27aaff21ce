//! Nesting tokens into a parse-node tree.

use std::collections::HashMap;

use crate::node::{ParseNode, Tagged};
use crate::tokenizer::{OpenTag, Token, Tokenizer};

/// Default limit on tag nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// A BBCode-style markup parser.
///
/// The parser never fails: anything that does not form a well-balanced tag is
/// kept as literal text, so the output always accounts for every byte of the
/// input.
///
/// # Recovery rules
///
/// - An opening tag without a matching close tag is literal text.
/// - A closing tag that closes nothing is literal text.
/// - When a closing tag matches an outer tag, inner tags are closed implicitly.
/// - Tags nested deeper than [`max_depth`](Self::max_depth) are literal text.
#[derive(Debug, Clone)]
pub struct BBParser {
    max_depth: usize,
}

impl Default for BBParser {
    fn default() -> Self {
        Self::new()
    }
}

struct OpenFrame<'a> {
    tag: OpenTag<'a>,
    children: Vec<ParseNode>,
}

impl OpenFrame<'_> {
    fn into_node(self) -> ParseNode {
        ParseNode::Tagged(Tagged {
            name: self.tag.name,
            arg: self.tag.arg,
            kwargs: self.tag.kwargs,
            children: self.children,
        })
    }
}

impl BBParser {
    /// Creates a parser with the default nesting limit.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum tag nesting depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Parses the input into a sequence of nodes.
    ///
    /// Empty input yields an empty sequence.
    pub fn parse(&self, input: &str) -> Vec<ParseNode> {
        let tokens = Tokenizer::new(input).collect::<Vec<_>>();
        let closable = closable_opens(&tokens);

        let mut root: Vec<ParseNode> = Vec::new();
        let mut stack: Vec<OpenFrame> = Vec::new();

        for (token, closable) in tokens.into_iter().zip(closable) {
            match token {
                Token::Text(text) | Token::Invalid(text) => {
                    push_text(current(&mut root, &mut stack), text);
                }
                Token::Open(tag) => {
                    if closable && stack.len() < self.max_depth {
                        stack.push(OpenFrame {
                            tag,
                            children: Vec::new(),
                        });
                    } else {
                        // No matching close tag - treat as literal text
                        push_text(current(&mut root, &mut stack), tag.raw);
                    }
                }
                Token::Close { name, raw } => {
                    if stack.iter().any(|frame| frame.tag.name == name) {
                        // Close everything up to and including the matching tag
                        while let Some(frame) = stack.pop() {
                            let done = frame.tag.name == name;
                            let node = frame.into_node();
                            current(&mut root, &mut stack).push(node);
                            if done {
                                break;
                            }
                        }
                    } else {
                        // Orphan close tag - treat as literal text
                        push_text(current(&mut root, &mut stack), raw);
                    }
                }
            }
        }

        // Close any remaining unclosed tags
        while let Some(frame) = stack.pop() {
            let node = frame.into_node();
            current(&mut root, &mut stack).push(node);
        }

        root
    }
}

/// Marks every opening tag that has a matching close tag after it.
///
/// An open tag matches when, scanning forward, closes of its name outnumber
/// the further opens of that name at some point. Walking right to left and
/// keeping, per name, the largest such surplus seen so far answers this for
/// every token in one pass.
fn closable_opens(tokens: &[Token]) -> Vec<bool> {
    let mut surplus: HashMap<&str, usize> = HashMap::new();
    let mut closable = vec![false; tokens.len()];

    for (i, token) in tokens.iter().enumerate().rev() {
        match token {
            Token::Open(tag) => {
                let closes = surplus.entry(tag.name.as_str()).or_insert(0);
                closable[i] = *closes > 0;
                *closes = closes.saturating_sub(1);
            }
            Token::Close { name, .. } => *surplus.entry(name.as_str()).or_insert(0) += 1,
            _ => {}
        }
    }

    closable
}

fn current<'s>(root: &'s mut Vec<ParseNode>, stack: &'s mut [OpenFrame]) -> &'s mut Vec<ParseNode> {
    match stack.last_mut() {
        Some(frame) => &mut frame.children,
        None => root,
    }
}

/// Appends text, merging with a preceding literal.
fn push_text(nodes: &mut Vec<ParseNode>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(ParseNode::Literal(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(ParseNode::Literal(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<ParseNode> {
        BBParser::new().parse(input)
    }

    #[test]
    fn empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn plain_text_is_single_literal() {
        assert_eq!(parse("hello world"), vec![ParseNode::literal("hello world")]);
    }

    #[test]
    fn single_tag() {
        assert_eq!(
            parse("[b]hello[/b]"),
            vec![ParseNode::tagged("b", vec![ParseNode::literal("hello")])]
        );
    }

    #[test]
    fn nested_tags() {
        assert_eq!(
            parse("[b][i]x[/i][/b]"),
            vec![ParseNode::tagged(
                "b",
                vec![ParseNode::tagged("i", vec![ParseNode::literal("x")])]
            )]
        );
    }

    #[test]
    fn text_around_tags() {
        assert_eq!(
            parse("before [b]middle[/b] after"),
            vec![
                ParseNode::literal("before "),
                ParseNode::tagged("b", vec![ParseNode::literal("middle")]),
                ParseNode::literal(" after"),
            ]
        );
    }

    #[test]
    fn empty_tag_content() {
        assert_eq!(parse("[b][/b]"), vec![ParseNode::tagged("b", vec![])]);
    }

    #[test]
    fn arguments_are_carried() {
        let nodes = parse("[quote=Alice]hi[/quote][img width=10]a.png[/img]");
        assert_eq!(
            nodes,
            vec![
                Tagged::new("quote", vec![ParseNode::literal("hi")])
                    .with_arg("Alice")
                    .into(),
                Tagged::new("img", vec![ParseNode::literal("a.png")])
                    .with_kwarg("width", "10")
                    .into(),
            ]
        );
    }

    #[test]
    fn unclosed_tag_is_literal() {
        assert_eq!(parse("[b]hello"), vec![ParseNode::literal("[b]hello")]);
    }

    #[test]
    fn orphan_close_tag_is_literal() {
        assert_eq!(parse("hello[/b]"), vec![ParseNode::literal("hello[/b]")]);
    }

    #[test]
    fn mismatched_close_is_literal_inside_tag() {
        assert_eq!(
            parse("[b]hello[/i][/b]"),
            vec![ParseNode::tagged("b", vec![ParseNode::literal("hello[/i]")])]
        );
    }

    #[test]
    fn overlapping_tags_auto_close() {
        // [i] is closed implicitly by [/b]; the trailing [/i] is then an orphan
        assert_eq!(
            parse("[b][i]x[/b][/i]"),
            vec![
                ParseNode::tagged(
                    "b",
                    vec![ParseNode::tagged("i", vec![ParseNode::literal("x")])]
                ),
                ParseNode::literal("[/i]"),
            ]
        );
    }

    #[test]
    fn brackets_in_content() {
        assert_eq!(
            parse("[code]array[0][/code]"),
            vec![ParseNode::tagged(
                "code",
                vec![ParseNode::literal("array[0]")]
            )]
        );
    }

    #[test]
    fn same_name_nesting() {
        assert_eq!(
            parse("[quote][quote]a[/quote]b[/quote]"),
            vec![ParseNode::tagged(
                "quote",
                vec![
                    ParseNode::tagged("quote", vec![ParseNode::literal("a")]),
                    ParseNode::literal("b"),
                ]
            )]
        );
    }

    #[test]
    fn depth_limit_turns_deep_tags_into_text() {
        let nodes = BBParser::new().max_depth(1).parse("[b][i]x[/i][/b]");
        assert_eq!(
            nodes,
            vec![ParseNode::tagged(
                "b",
                vec![ParseNode::literal("[i]x[/i]")]
            )]
        );
    }

    #[test]
    fn closability_matches_forward_scan() {
        fn forward(tokens: &[Token], name: &str) -> bool {
            let mut depth = 1;
            for token in tokens {
                match token {
                    Token::Open(tag) if tag.name == name => depth += 1,
                    Token::Close { name: closing, .. } if closing == name => {
                        depth -= 1;
                        if depth == 0 {
                            return true;
                        }
                    }
                    _ => {}
                }
            }
            false
        }

        for input in [
            "[b][b][/b]",
            "[b][/b][b]",
            "[b][i][/b][/i][i]",
            "[b][b][/b][/b][/b][b]",
            "[i][b][/i][b][/b][/b][/i]",
            "[/b][b][i]x",
        ] {
            let tokens: Vec<_> = Tokenizer::new(input).collect();
            let expected: Vec<bool> = (0..tokens.len())
                .map(|i| match &tokens[i] {
                    Token::Open(tag) => forward(&tokens[i + 1..], &tag.name),
                    _ => false,
                })
                .collect();
            assert_eq!(closable_opens(&tokens), expected, "input: {}", input);
        }
    }

    #[test]
    fn many_unclosed_tags_stay_literal() {
        let input = "[b]".repeat(50_000);
        assert_eq!(parse(&input), vec![ParseNode::literal(input.clone())]);
    }

    #[test]
    fn multiline_content() {
        assert_eq!(
            parse("[b]line1\nline2[/b]"),
            vec![ParseNode::tagged(
                "b",
                vec![ParseNode::literal("line1\nline2")]
            )]
        );
    }
}
