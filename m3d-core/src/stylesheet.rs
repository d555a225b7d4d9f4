/// Rewrites `transform` declarations in stylesheet text
use std::ops::Range;

use cssparser::{ParseError, Parser, ParserInput, Token};

use crate::convert::Converter;

/// Property whose values are compiled
pub const TRANSFORM_PROPERTY: &str = "transform";

/// Blocks nested deeper than this are copied without looking inside
const MAX_BLOCK_DEPTH: usize = 32;

/// Result of rewriting one stylesheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    pub css: String,
    /// Declarations that now carry a `matrix3d()` value
    pub converted: usize,
    /// `transform` declarations left as they were
    pub unchanged: usize,
}

impl Rewrite {
    pub fn is_modified(&self) -> bool {
        self.converted > 0
    }
}

/// Rewrite every `transform` declaration in `css`.
///
/// Only the value itself is replaced: whitespace, comments and `!important`
/// around it are copied byte for byte, as are declarations the converter
/// cannot handle. Comments between the functions of a converted value are
/// dropped with the rest of the value. With `keep_original` the value is
/// left alone and a second `transform: matrix3d(...)` declaration is added
/// right after it.
#[tracing::instrument(skip_all, fields(len = css.len()))]
pub fn rewrite_stylesheet(css: &str, converter: &Converter) -> Rewrite {
    if !converter.options().enabled {
        return Rewrite {
            css: css.to_string(),
            ..Rewrite::default()
        };
    }

    let mut rewriter = Rewriter {
        css,
        converter,
        edits: Vec::new(),
        converted: 0,
        unchanged: 0,
    };

    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    walk_block(&mut parser, 0, &mut rewriter);

    let rewrite = rewriter.finish();
    tracing::debug!(
        converted = rewrite.converted,
        unchanged = rewrite.unchanged,
        "rewrote stylesheet"
    );
    rewrite
}

/// Walk one block (or the whole sheet), splitting it into declarations at
/// `;` and treating anything followed by `{...}` as a rule prelude.
fn walk_block(parser: &mut Parser<'_, '_>, depth: usize, rewriter: &mut Rewriter<'_>) {
    let mut decl = Declaration::at(parser.position().byte_index());

    loop {
        let start = parser.position().byte_index();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::Semicolon | Token::CloseCurlyBracket => {
                rewriter.declaration(decl);
                decl = Declaration::at(parser.position().byte_index());
            }
            Token::CurlyBracketBlock => {
                if depth < MAX_BLOCK_DEPTH {
                    let _: Result<(), ParseError<'_, ()>> = parser.parse_nested_block(|nested| {
                        walk_block(nested, depth + 1, rewriter);
                        Ok(())
                    });
                } else {
                    skip_block(parser);
                }
                decl = Declaration::at(parser.position().byte_index());
            }
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                skip_block(parser);
                decl.push(&token, start..parser.position().byte_index());
            }
            _ => decl.push(&token, start..parser.position().byte_index()),
        }
    }

    rewriter.declaration(decl);
}

/// Consume the block the last token opened, up to and including its close
fn skip_block(parser: &mut Parser<'_, '_>) {
    let _: Result<(), ParseError<'_, ()>> = parser.parse_nested_block(|_| Ok(()));
}

/// Byte spans of one `property: value` candidate
struct Declaration {
    start: usize,
    /// End of the whitespace the declaration starts with
    indent_end: usize,
    phase: Phase,
}

enum Phase {
    Lead,
    Property(Range<usize>),
    Value(Value),
    Invalid,
}

struct Value {
    property: Range<usize>,
    start: Option<usize>,
    /// End of the last token that is not whitespace or a comment
    end: usize,
    /// Value end before a trailing `!`
    bang: Option<usize>,
    /// Value end before a trailing `!important`
    important: Option<usize>,
}

impl Declaration {
    fn at(start: usize) -> Self {
        Self {
            start,
            indent_end: start,
            phase: Phase::Lead,
        }
    }

    fn push(&mut self, token: &Token<'_>, span: Range<usize>) {
        let trivia = matches!(token, Token::WhiteSpace(_) | Token::Comment(_));

        self.phase = match (std::mem::replace(&mut self.phase, Phase::Invalid), token) {
            (Phase::Lead, Token::WhiteSpace(_)) if span.start == self.start => {
                self.indent_end = span.end;
                Phase::Lead
            }
            (phase @ (Phase::Lead | Phase::Property(_)), _) if trivia => phase,
            (Phase::Lead, Token::Ident(_)) => Phase::Property(span),
            (Phase::Property(property), Token::Colon) => Phase::Value(Value {
                property,
                start: None,
                end: span.end,
                bang: None,
                important: None,
            }),
            (Phase::Value(value), _) if trivia => Phase::Value(value),
            (Phase::Value(mut value), token) => {
                value.push(token, span);
                Phase::Value(value)
            }
            _ => Phase::Invalid,
        };
    }
}

impl Value {
    fn push(&mut self, token: &Token<'_>, span: Range<usize>) {
        let before = self.end;
        self.start.get_or_insert(span.start);
        self.end = span.end;

        match token {
            Token::Delim('!') => {
                self.bang = Some(before);
                self.important = None;
            }
            Token::Ident(ident)
                if self.bang.is_some() && ident.eq_ignore_ascii_case("important") =>
            {
                self.important = self.bang.take();
            }
            _ => {
                self.bang = None;
                self.important = None;
            }
        }
    }

    /// The span handed to the converter, without `!important`
    fn span(&self) -> Option<Range<usize>> {
        let start = self.start?;
        let end = self.important.unwrap_or(self.end);
        (end > start).then_some(start..end)
    }
}

struct Rewriter<'a> {
    css: &'a str,
    converter: &'a Converter,
    /// Non-overlapping replacements in source order
    edits: Vec<(Range<usize>, String)>,
    converted: usize,
    unchanged: usize,
}

impl Rewriter<'_> {
    fn declaration(&mut self, decl: Declaration) {
        let Phase::Value(value) = decl.phase else {
            return;
        };
        if !self.css[value.property.clone()].eq_ignore_ascii_case(TRANSFORM_PROPERTY) {
            return;
        }

        let Some(span) = value.span() else {
            self.unchanged += 1;
            return;
        };
        let source = &self.css[span.clone()];
        let Some(matrix) = self.converter.convert(source) else {
            self.unchanged += 1;
            return;
        };

        tracing::debug!(from = source, to = %matrix, "converted declaration");
        self.converted += 1;

        if self.converter.options().keep_original {
            let mut copy = String::from(";");
            copy.push_str(&self.css[decl.start..decl.indent_end]);
            // property and colon
            copy.push_str(&self.css[value.property.start..span.start]);
            copy.push_str(&matrix);
            copy.push_str(&self.css[span.end..value.end]);
            self.edits.push((value.end..value.end, copy));
        } else {
            self.edits.push((span, matrix));
        }
    }

    fn finish(self) -> Rewrite {
        let mut css = String::with_capacity(self.css.len());
        let mut copied = 0;
        for (range, replacement) in &self.edits {
            css.push_str(&self.css[copied..range.start]);
            css.push_str(replacement);
            copied = range.end;
        }
        css.push_str(&self.css[copied..]);

        Rewrite {
            css,
            converted: self.converted,
            unchanged: self.unchanged,
        }
    }
}
