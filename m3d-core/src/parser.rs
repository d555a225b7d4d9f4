/// Tokenizer for CSS `transform` values
use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit0, digit1, one_of},
    combinator::{all_consuming, map, map_res, opt, recognize},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};

use crate::error::{Result, TransformError};
use crate::function::TransformKind;

/// Deepest parenthesis nesting accepted in one value
pub const MAX_NESTING: usize = 32;

/// One transform function found in the value, with its numeric arguments.
///
/// An argument is `None` when it was present but carried no leading number
/// (`var(--x)`, `auto`); generators treat that the same as a missing argument.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformCall {
    pub name: String,
    pub kind: TransformKind,
    pub args: Vec<Option<f64>>,
}

impl TransformCall {
    pub fn new(name: &str, args: Vec<Option<f64>>) -> Self {
        Self {
            name: name.to_string(),
            kind: TransformKind::from_name(name),
            args,
        }
    }

    /// Argument `index`, or `default` when missing or non-numeric
    pub fn arg(&self, index: usize, default: f64) -> f64 {
        self.args.get(index).copied().flatten().unwrap_or(default)
    }

    /// Argument `index` only when it is present and numeric
    pub fn numeric_arg(&self, index: usize) -> Option<f64> {
        self.args.get(index).copied().flatten()
    }
}

/// Transform calls in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformList {
    calls: Vec<TransformCall>,
}

impl TransformList {
    pub fn new(calls: Vec<TransformCall>) -> Self {
        Self { calls }
    }

    pub fn calls(&self) -> &[TransformCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransformCall> {
        self.calls.iter()
    }
}

impl<'a> IntoIterator for &'a TransformList {
    type Item = &'a TransformCall;
    type IntoIter = std::slice::Iter<'a, TransformCall>;

    fn into_iter(self) -> Self::IntoIter {
        self.calls.iter()
    }
}

/// Parse a transform value, returning an empty list if it cannot be tokenized
pub fn parse(value: &str) -> TransformList {
    match try_parse(value) {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!("{}", e);
            TransformList::default()
        }
    }
}

/// Parse a transform value, reporting values that cannot be tokenized
pub fn try_parse(value: &str) -> Result<TransformList> {
    let (_, nodes) = all_consuming(|input| parse_nodes(input, 0))(value)
        .map_err(|e| TransformError::parse(value, describe(&e)))?;

    let calls = nodes
        .into_iter()
        .filter_map(|node| match node {
            Node::Function(name, children) => Some(TransformCall::new(name, arguments(&children))),
            Node::Word(_) => None,
        })
        .collect();

    Ok(TransformList::new(calls))
}

/// A CSS component value as far as transforms care
#[derive(Debug, Clone, PartialEq)]
enum Node<'a> {
    Word(&'a str),
    Function(&'a str, Vec<Node<'a>>),
}

fn arguments(children: &[Node<'_>]) -> Vec<Option<f64>> {
    children
        .iter()
        .map(|child| match child {
            Node::Word(word) => leading_number(word),
            Node::Function(..) => None,
        })
        .collect()
}

fn describe(err: &nom::Err<nom::error::Error<&str>>) -> String {
    match err {
        nom::Err::Incomplete(_) => "unexpected end of input".to_string(),
        nom::Err::Failure(e) if e.code == ErrorKind::TooLarge => {
            format!("parentheses nested deeper than {} levels", MAX_NESTING)
        }
        nom::Err::Error(e) | nom::Err::Failure(e) if e.input.starts_with(')') => {
            "unbalanced parentheses".to_string()
        }
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let at: String = e.input.chars().take(32).collect();
            format!("unexpected input at {:?}", at)
        }
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == '/'
}

fn is_word_char(c: char) -> bool {
    !is_separator(c) && c != '(' && c != ')'
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '-' || c == '_' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

fn parse_nodes(input: &str, depth: usize) -> IResult<&str, Vec<Node<'_>>> {
    terminated(
        many0(preceded(take_while(is_separator), |i| parse_node(i, depth))),
        take_while(is_separator),
    )(input)
}

fn parse_node(input: &str, depth: usize) -> IResult<&str, Node<'_>> {
    alt((
        |i| parse_function(i, depth),
        map(take_while1(is_word_char), Node::Word),
    ))(input)
}

// A bare `( ... )` block is a function with an empty name.
fn parse_function(input: &str, depth: usize) -> IResult<&str, Node<'_>> {
    let (rest, name) = recognize(opt(pair(
        take_while1(is_ident_start),
        take_while(is_ident_char),
    )))(input)?;
    let (rest, _) = char('(')(rest)?;
    if depth >= MAX_NESTING {
        return Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)));
    }
    let (rest, children) = terminated(|i| parse_nodes(i, depth + 1), char(')'))(rest)?;
    Ok((rest, Node::Function(name, children)))
}

/// Leading numeric literal of a word, ignoring any unit that follows
fn leading_number(word: &str) -> Option<f64> {
    let number: IResult<&str, f64> = map_res(
        recognize(tuple((
            opt(one_of("+-")),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |literal: &str| literal.parse::<f64>(),
    )(word);

    number.ok().map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calls_in_order() {
        let list = parse("translateX(100px) scale(2)");
        assert_eq!(list.len(), 2);
        assert_eq!(list.calls()[0].kind, TransformKind::TranslateX);
        assert_eq!(list.calls()[0].args, vec![Some(100.0)]);
        assert_eq!(list.calls()[1].kind, TransformKind::Scale);
        assert_eq!(list.calls()[1].args, vec![Some(2.0)]);
    }

    #[test]
    fn test_comma_and_space_separated_args() {
        let list = parse("translate3d(1px, -2.5px,3e1px) scale3d(1 2 3)");
        assert_eq!(list.calls()[0].args, vec![Some(1.0), Some(-2.5), Some(30.0)]);
        assert_eq!(list.calls()[1].args, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_units_are_stripped() {
        let list = parse("rotate(45deg) translateX(1em) translateY(50%) skewX(.5rad)");
        let firsts: Vec<_> = list.iter().map(|c| c.args[0]).collect();
        assert_eq!(firsts, vec![Some(45.0), Some(1.0), Some(50.0), Some(0.5)]);
    }

    #[test]
    fn test_non_numeric_args_are_none() {
        let list = parse("translate(var(--x), auto) scale()");
        assert_eq!(list.calls()[0].args, vec![None, None]);
        assert!(list.calls()[1].args.is_empty());
        assert_eq!(list.calls()[0].arg(0, 7.0), 7.0);
        assert_eq!(list.calls()[1].arg(0, 1.0), 1.0);
    }

    #[test]
    fn test_nested_functions_are_not_top_level() {
        let list = parse("translateX(calc(10px + 5px))");
        assert_eq!(list.len(), 1);
        assert_eq!(list.calls()[0].kind, TransformKind::TranslateX);
        assert_eq!(list.calls()[0].args, vec![None]);
    }

    #[test]
    fn test_words_without_functions_yield_empty_list() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
        assert!(parse("none").is_empty());
        assert!(parse("invalid-transform").is_empty());
    }

    #[test]
    fn test_unknown_functions_are_kept() {
        let list = parse("perspective(500px) scale(2)");
        assert_eq!(list.len(), 2);
        assert!(!list.calls()[0].kind.is_known());
        assert_eq!(list.calls()[0].name, "perspective");
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        assert!(try_parse("scale(2").is_err());
        assert!(try_parse("scale(2))").is_err());
        assert!(try_parse(")").is_err());
        assert!(parse("translateX(10px").is_empty());
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let nested = |depth: usize| {
            format!("scale({}2{})", "(".repeat(depth), ")".repeat(depth))
        };
        assert_eq!(parse(&nested(MAX_NESTING - 1)).len(), 1);

        let err = try_parse(&nested(200_000)).unwrap_err();
        assert!(err.to_string().contains("nested deeper"));
        assert!(parse(&nested(200_000)).is_empty());
    }

    #[test]
    fn test_many_arguments() {
        let value = format!("matrix3d({})", vec!["1"; 10_000].join(", "));
        let list = parse(&value);
        assert_eq!(list.len(), 1);
        assert_eq!(list.calls()[0].args.len(), 10_000);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("100px"), Some(100.0));
        assert_eq!(leading_number("-1.5deg"), Some(-1.5));
        assert_eq!(leading_number("+.25"), Some(0.25));
        assert_eq!(leading_number("2."), Some(2.0));
        assert_eq!(leading_number("1e3"), Some(1000.0));
        assert_eq!(leading_number("1em"), Some(1.0));
        assert_eq!(leading_number("px"), None);
        assert_eq!(leading_number("-"), None);
        assert_eq!(leading_number("inf"), None);
    }
}
