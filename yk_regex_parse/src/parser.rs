/**
 * A simple parser to parse a string into a regex AST.
 */

use crate::ast::{Node, Quantifier, CharsetElement};
use crate::error::{ParseError, ParseErrorKind};

/*
 * Reference grammar for the parser:
 *
 * alternative ::=
 *               | sequence ('|' sequence)*
 *               ;
 *
 * sequence    ::=
 *               | quantified*
 *               ;
 *
 * quantified  ::=
 *               | atom quantifier
 *               | atom
 *               ;
 *
 * quantifier  ::=
 *               | '?' | '*' | '+'
 *               | '{' NUM '}' | '{' NUM ',' '}' | '{' NUM ',' NUM '}'
 *               ;
 *
 * atom        ::=
 *               | '(' alternative ')'
 *               | '[' '^'? charset ']'
 *               | '.' | '^' | '$'
 *               | ANY_NONSPECIAL_CHAR
 *               | '\' escape
 *               ;
 *
 * charset     ::=
 *               | charset_init charset_rem*
 *               ;
 *
 * charset_init ::=
 *               | charset_iatom '-' charset_atom
 *               | charset_iatom
 *               ;
 *
 * charset_rem ::=
 *               | charset_atom '-' charset_atom
 *               | charset_atom
 *               ;
 *
 * charset_iatom ::=
 *               | ']'
 *               | charset_atom
 *               ;
 *
 * charset_atom ::=
 *               | ANY_NONCONTROL_CHAR
 *               | '\' escape
 *               ;
 */

/// A small helper to ease the Chars interface a bit, also tracks the position
/// for error reporting
#[derive(Clone)]
struct Chars<'a> {
    chars: std::str::Chars<'a>,
    position: usize,
}

impl <'a> Chars<'a> {
    fn new(source: &'a str) -> Self {
        Self{ chars: source.chars(), position: 0 }
    }

    fn next(&self) -> Option<(char, Chars<'a>)> {
        let mut clone = self.clone();
        match clone.chars.next() {
            Some(c) => {
                clone.position += 1;
                Some((c, clone))
            },
            None => None,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError{ position: self.position, kind }
    }
}

/**
 * Actual parsing.
 */

pub fn parse(source: &str) -> Result<Node, ParseError> {
    let (node, it) = parse_alternative(Chars::new(source))?;
    match it.next() {
        None => Ok(node),
        Some((')', _)) => Err(it.error(ParseErrorKind::UnmatchedParen)),
        Some((c, _)) => Err(it.error(ParseErrorKind::UnexpectedChar(c))),
    }
}

type ParseResult<'a, T> = Result<(T, Chars<'a>), ParseError>;

fn parse_alternative(it: Chars<'_>) -> ParseResult<'_, Node> {
    let (first, mut it) = parse_sequence(it)?;
    let mut branches = vec![first];
    while let Some(('|', next)) = it.next() {
        let (branch, next) = parse_sequence(next)?;
        branches.push(branch);
        it = next;
    }

    if branches.len() == 1 {
        Ok((branches.remove(0), it))
    }
    else {
        Ok((Node::Alternative(branches), it))
    }
}

fn parse_sequence(mut it: Chars<'_>) -> ParseResult<'_, Node> {
    let mut elements = Vec::new();
    loop {
        match it.peek() {
            None | Some('|') | Some(')') => break,
            Some(_) => {
                let (element, next) = parse_quantified(it)?;
                push_merging_literals(&mut elements, element);
                it = next;
            },
        }
    }

    if elements.len() == 1 {
        Ok((elements.remove(0), it))
    }
    else {
        Ok((Node::Sequence(elements), it))
    }
}

/// Adjacent literals of a sequence are glued together into a single string.
fn push_merging_literals(elements: &mut Vec<Node>, element: Node) {
    if let (Some(Node::Literal(prev)), Node::Literal(s)) = (elements.last_mut(), &element) {
        prev.push_str(s);
        return;
    }
    elements.push(element);
}

fn parse_quantified(it: Chars<'_>) -> ParseResult<'_, Node> {
    let (subnode, it) = parse_atom(it)?;
    match parse_quantifier(it)? {
        (Some(quantifier), it) => Ok((Node::Quantified{ subnode: Box::new(subnode), quantifier }, it)),
        (None, it) => Ok((subnode, it)),
    }
}

fn parse_quantifier(it: Chars<'_>) -> ParseResult<'_, Option<Quantifier>> {
    match it.next() {
        Some(('?', rest)) => Ok((Some(Quantifier::Between(0, 1)), rest)),
        Some(('+', rest)) => Ok((Some(Quantifier::AtLeast(1)), rest)),
        Some(('*', rest)) => Ok((Some(Quantifier::AtLeast(0)), rest)),
        Some(('{', rest)) => {
            let (quantifier, rest) = parse_repetition_bounds(&it, rest)?;
            Ok((Some(quantifier), rest))
        },

        _ => Ok((None, it)),
    }
}

/// Parses the inside of `{...}`, `open` points at the opening brace.
fn parse_repetition_bounds<'a>(open: &Chars<'a>, it: Chars<'a>) -> ParseResult<'a, Quantifier> {
    let (least, it) = parse_number(it)?;
    match it.next() {
        Some(('}', rest)) => Ok((Quantifier::Between(least, least), rest)),

        Some((',', rest)) => {
            if let Some(('}', rest)) = rest.next() {
                return Ok((Quantifier::AtLeast(least), rest));
            }
            let (most, after) = parse_number(rest)?;
            match after.next() {
                Some(('}', _)) if least > most => Err(open.error(ParseErrorKind::InvalidRepetition)),
                Some(('}', rest)) => Ok((Quantifier::Between(least, most), rest)),
                Some(_) => Err(after.error(ParseErrorKind::InvalidRepetition)),
                None => Err(after.error(ParseErrorKind::UnexpectedEnd)),
            }
        },

        Some(_) => Err(it.error(ParseErrorKind::InvalidRepetition)),
        None => Err(it.error(ParseErrorKind::UnexpectedEnd)),
    }
}

fn parse_number(it: Chars<'_>) -> ParseResult<'_, usize> {
    let start = it.clone();
    let mut it = it;
    let mut value: Option<usize> = None;
    while let Some((c, next)) = it.next() {
        let digit = match c.to_digit(10) {
            Some(d) => d as usize,
            None => break,
        };
        match value.unwrap_or(0).checked_mul(10).and_then(|v| v.checked_add(digit)) {
            Some(v) => value = Some(v),
            None => return Err(start.error(ParseErrorKind::InvalidRepetition)),
        }
        it = next;
    }

    match value {
        Some(value) => Ok((value, it)),
        None => Err(it.error(ParseErrorKind::InvalidRepetition)),
    }
}

fn parse_atom(it: Chars<'_>) -> ParseResult<'_, Node> {
    match it.next() {
        Some(('(', rest)) => {
            let (node, rest) = parse_alternative(rest)?;
            if let Some((')', rest)) = rest.next() {
                Ok((Node::Group(Box::new(node)), rest))
            }
            else {
                Err(it.error(ParseErrorKind::UnmatchedParen))
            }
        },

        Some(('[', rest)) => {
            let (node, rest) = parse_charset(rest)?;
            if let Some((']', rest)) = rest.next() {
                Ok((node, rest))
            }
            else {
                Err(it.error(ParseErrorKind::UnterminatedCharset))
            }
        },

        Some(('.', rest)) => Ok((Node::AnyChar, rest)),
        Some(('^', rest)) => Ok((Node::StartAnchor, rest)),
        Some(('$', rest)) => Ok((Node::EndAnchor, rest)),

        Some(('\\', rest)) => {
            match parse_escape(rest)? {
                (Escape::Char(c), rest) => Ok((Node::Literal(c.to_string()), rest)),
                (Escape::Class{ negated, elements }, rest) => Ok((Node::Charset{ negated, elements }, rest)),
            }
        },

        Some((c, _)) if is_quantifier_char(c) => Err(it.error(ParseErrorKind::NothingToRepeat)),

        Some((c, rest)) => {
            if is_nonspecial_char(c) {
                Ok((Node::Literal(c.to_string()), rest))
            }
            else {
                Err(it.error(ParseErrorKind::UnexpectedChar(c)))
            }
        },

        None => Err(it.error(ParseErrorKind::UnexpectedEnd)),
    }
}

/**
 * Escape sequences.
 */

enum Escape {
    Char(char),
    Class{
        negated: bool,
        elements: Vec<CharsetElement>,
    },
}

fn parse_escape(it: Chars<'_>) -> ParseResult<'_, Escape> {
    match it.next() {
        Some(('n', rest)) => Ok((Escape::Char('\n'), rest)),
        Some(('t', rest)) => Ok((Escape::Char('\t'), rest)),
        Some(('r', rest)) => Ok((Escape::Char('\r'), rest)),

        Some((c, rest)) => {
            if let Some((negated, elements)) = class_escape(c) {
                Ok((Escape::Class{ negated, elements }, rest))
            }
            else if is_special_char(c) || c == '-' || c == '}' {
                Ok((Escape::Char(c), rest))
            }
            else {
                Err(it.error(ParseErrorKind::UnknownEscape(c)))
            }
        },

        None => Err(it.error(ParseErrorKind::UnexpectedEnd)),
    }
}

/// The shorthand classes, `\d`, `\w`, `\s` and their negated uppercase forms.
fn class_escape(c: char) -> Option<(bool, Vec<CharsetElement>)> {
    let elements = match c.to_ascii_lowercase() {
        'd' => vec![CharsetElement::Range('0', '9')],
        'w' => vec![
            CharsetElement::Range('a', 'z'),
            CharsetElement::Range('A', 'Z'),
            CharsetElement::Range('0', '9'),
            CharsetElement::Literal('_'),
        ],
        's' => vec![
            CharsetElement::Literal(' '),
            CharsetElement::Literal('\t'),
            CharsetElement::Literal('\n'),
            CharsetElement::Literal('\r'),
        ],
        _ => return None,
    };
    Some((c.is_ascii_uppercase(), elements))
}

/**
 * Character sets.
 */

fn parse_charset(it: Chars<'_>) -> ParseResult<'_, Node> {
    let (negated, it) = match it.next() {
        Some(('^', rest)) => (true, rest),
        _ => (false, it),
    };

    let (mut elements, mut it) = parse_charset_element(it, true)?;
    while let Some(c) = it.peek() {
        if c == ']' {
            break;
        }
        let (more, next) = parse_charset_element(it, false)?;
        elements.extend(more);
        it = next;
    }
    Ok((Node::Charset{ negated, elements }, it))
}

enum CharsetAtom {
    Char(char),
    Class(Vec<CharsetElement>),
}

fn parse_charset_element(it: Chars<'_>, initial: bool) -> ParseResult<'_, Vec<CharsetElement>> {
    let start = it.clone();
    let (left, it) = parse_charset_atom(it, initial)?;
    let lo = match left {
        CharsetAtom::Char(c) => c,
        CharsetAtom::Class(elements) => return Ok((elements, it)),
    };

    if let Some(('-', after_dash)) = it.next() {
        // A trailing '-' is a literal
        if after_dash.peek().map_or(false, |c| c != ']') {
            return match parse_charset_atom(after_dash.clone(), false)? {
                (CharsetAtom::Char(hi), rest) if lo <= hi => Ok((vec![CharsetElement::Range(lo, hi)], rest)),
                (CharsetAtom::Char(hi), _) => Err(start.error(ParseErrorKind::InvalidRange(lo, hi))),
                (CharsetAtom::Class(_), _) => Err(after_dash.error(ParseErrorKind::UnexpectedChar('\\'))),
            };
        }
    }
    Ok((vec![CharsetElement::Literal(lo)], it))
}

fn parse_charset_atom(it: Chars<'_>, initial: bool) -> ParseResult<'_, CharsetAtom> {
    match it.next() {
        Some((']', rest)) if initial => Ok((CharsetAtom::Char(']'), rest)),
        Some((']', _)) => Err(it.error(ParseErrorKind::UnexpectedChar(']'))),

        Some(('\\', rest)) => {
            match parse_escape(rest.clone())? {
                (Escape::Char(c), rest) => Ok((CharsetAtom::Char(c), rest)),
                (Escape::Class{ negated: false, elements }, rest) => Ok((CharsetAtom::Class(elements), rest)),
                // Negated shorthands can not be nested into a set
                (Escape::Class{ negated: true, .. }, _) => {
                    let c = rest.peek().unwrap_or('\\');
                    Err(rest.error(ParseErrorKind::UnknownEscape(c)))
                },
            }
        },

        Some((c, rest)) => {
            if !c.is_control() {
                Ok((CharsetAtom::Char(c), rest))
            }
            else {
                Err(it.error(ParseErrorKind::UnexpectedChar(c)))
            }
        },

        None => Err(it.error(ParseErrorKind::UnterminatedCharset)),
    }
}

fn is_nonspecial_char(c: char) -> bool {
    !c.is_control() && !is_special_char(c)
}

fn is_quantifier_char(c: char) -> bool {
    "?*+{".contains(c)
}

fn is_special_char(c: char) -> bool {
    "()[]?*+{|.^$\\".contains(c)
}

// Tests ///////////////////////////////////////////////////////////////////////
