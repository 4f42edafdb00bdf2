#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A recursive-descent parser for infix boolean expressions.
//!
//! The accepted language:
//!
//! ```text
//! expr    := and ( '|' and )*
//! and     := unary ( '&' unary )*
//! unary   := ( '~' | '!' ) unary | atom
//! atom    := NAME | '(' expr ')'
//! NAME    := [A-Za-z]+
//! ```
//!
//! Whitespace between tokens is ignored. Names are case-sensitive, and a name is a
//! *maximal* run of ASCII letters: `AB` is one variable, not `A` and `B`. Digits,
//! underscores and every other symbol are rejected.
//!
//! Variables are collected from the raw text before any syntax check, so an input
//! without a single letter reports [`ParseError::NoVariables`] even if it is also
//! syntactically broken.

use crate::error::ParseError;
use crate::sat::expr::Expr;
use crate::sat::variables::Variables;
use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Name(String),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Self::Name(name) => name.clone(),
            Self::And => "&".to_string(),
            Self::Or => "|".to_string(),
            Self::Not => "~".to_string(),
            Self::LParen => "(".to_string(),
            Self::RParen => ")".to_string(),
        }
    }
}

/// Every distinct variable name in `text`, in variable order.
#[must_use]
pub fn extract_variables(text: &str) -> Variables {
    Variables::new(
        text.split(|c: char| !c.is_ascii_alphabetic())
            .filter(|s| !s.is_empty()),
    )
}

fn tokenize(text: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars: Peekable<CharIndices<'_>> = text.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        let token = match ch {
            c if c.is_whitespace() => continue,
            '&' => Token::And,
            '|' => Token::Or,
            '~' | '!' => Token::Not,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_alphabetic() => {
                let mut name = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if !next.is_ascii_alphabetic() {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                Token::Name(name)
            }
            ch => return Err(ParseError::UnexpectedChar { ch, offset }),
        };
        tokens.push((token, offset));
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [(Token, usize)],
    pos: usize,
    vars: &'a Variables,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn bump(&mut self) -> Option<&(Token, usize)> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.and()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            let rhs = self.and()?;
            lhs = Expr::or(lhs, rhs);
        }
        Ok(lhs)
    }

    fn and(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.unary()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::and(lhs, rhs);
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.peek() == Some(&Token::Not) {
            self.pos += 1;
            return Ok(Expr::not(self.unary()?));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        const EXPECTED: &str = "a variable, '~' or '('";
        let vars = self.vars;

        match self.bump().cloned() {
            Some((Token::Name(name), offset)) => vars.index_of(&name).map(Expr::Var).ok_or(
                ParseError::UnexpectedToken {
                    found: name,
                    expected: EXPECTED,
                    offset,
                },
            ),
            Some((Token::LParen, open)) => {
                let inner = self.expr()?;
                match self.bump() {
                    Some((Token::RParen, _)) => Ok(inner),
                    Some((token, offset)) => Err(ParseError::UnexpectedToken {
                        found: token.describe(),
                        expected: "')'",
                        offset: *offset,
                    }),
                    None => Err(ParseError::UnclosedParen { offset: open }),
                }
            }
            Some((token, offset)) => Err(ParseError::UnexpectedToken {
                found: token.describe(),
                expected: EXPECTED,
                offset,
            }),
            None => Err(ParseError::UnexpectedEnd { expected: EXPECTED }),
        }
    }
}

/// Parses `text` into an expression over its variables.
///
/// # Errors
///
/// [`ParseError::NoVariables`] when `text` contains no letters, otherwise the first
/// lexical or syntactic error encountered.
pub fn parse_expression(text: &str) -> Result<(Expr, Variables), ParseError> {
    let vars = extract_variables(text);
    if vars.is_empty() {
        return Err(ParseError::NoVariables);
    }

    let tokens = tokenize(text)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        vars: &vars,
    };
    let expr = parser.expr()?;

    if let Some((token, offset)) = tokens.get(parser.pos) {
        return Err(ParseError::UnexpectedToken {
            found: token.describe(),
            expected: "'&', '|' or end of input",
            offset: *offset,
        });
    }

    Ok((expr, vars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::Assignment;

    fn truth_table(text: &str) -> Vec<bool> {
        let (expr, vars) = parse_expression(text).unwrap();
        (0..vars.search_space().unwrap())
            .map(|i| expr.eval(&Assignment::from_index(i, vars.len())))
            .collect()
    }

    #[test]
    fn test_simple_and() {
        let (expr, vars) = parse_expression("A & B").unwrap();
        assert_eq!(vars.len(), 2);
        assert_eq!(expr, Expr::and(Expr::Var(0), Expr::Var(1)));
    }

    #[test]
    fn test_precedence_not_and_or() {
        // ~A | B & C  ==  (~A) | (B & C)
        let (expr, _) = parse_expression("~A | B & C").unwrap();
        assert_eq!(
            expr,
            Expr::or(
                Expr::not(Expr::Var(0)),
                Expr::and(Expr::Var(1), Expr::Var(2))
            )
        );
    }

    #[test]
    fn test_left_associative() {
        let (expr, _) = parse_expression("A & B & C").unwrap();
        assert_eq!(
            expr,
            Expr::and(Expr::and(Expr::Var(0), Expr::Var(1)), Expr::Var(2))
        );
    }

    #[test]
    fn test_parentheses_and_bang() {
        assert_eq!(truth_table("!(A | B)"), vec![true, false, false, false]);
        assert_eq!(truth_table("(A | B) & ~A"), vec![false, true, false, false]);
    }

    #[test]
    fn test_case_sensitive_multi_letter_names() {
        let (_, vars) = parse_expression("foo & Foo | bar").unwrap();
        assert_eq!(vars.iter().collect::<Vec<_>>(), vec!["Foo", "bar", "foo"]);
    }

    #[test]
    fn test_no_variables() {
        assert_eq!(parse_expression(""), Err(ParseError::NoVariables));
        assert_eq!(parse_expression("( & )"), Err(ParseError::NoVariables));
        assert_eq!(parse_expression("1 | 0"), Err(ParseError::NoVariables));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(
            parse_expression("A &"),
            Err(ParseError::UnexpectedEnd {
                expected: "a variable, '~' or '('"
            })
        );
        assert_eq!(
            parse_expression("(A | B"),
            Err(ParseError::UnclosedParen { offset: 0 })
        );
        assert_eq!(
            parse_expression("A1"),
            Err(ParseError::UnexpectedChar { ch: '1', offset: 1 })
        );
        assert!(matches!(
            parse_expression("A B"),
            Err(ParseError::UnexpectedToken { offset: 2, .. })
        ));
        assert!(matches!(
            parse_expression("A | | B"),
            Err(ParseError::UnexpectedToken { offset: 4, .. })
        ));
        assert!(matches!(
            parse_expression("A )"),
            Err(ParseError::UnexpectedToken { offset: 2, .. })
        ));
    }
}
