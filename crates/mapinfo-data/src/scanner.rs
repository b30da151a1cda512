//! Token cursor over a lexed lump.
//!
//! The parser reads one token at a time and may push the last one back.
//! The `must_*` readers fail with a [`MapInfoError::Script`] that names the
//! lump, line and offending token.

use crate::lexer::{Located, Token, lex};
use crate::parser::MapInfoError;

pub struct Scanner {
    tokens: Vec<Located<Token>>,
    /// Index of the next unread token; the current token is `pos - 1`.
    pos: usize,
    lump: String,
}

impl Scanner {
    pub fn new(input: &str, lump: &str) -> Result<Self, MapInfoError> {
        let tokens = lex(input).map_err(|source| MapInfoError::Lex {
            lump: lump.to_string(),
            source,
        })?;
        Ok(Self::from_tokens(tokens, lump))
    }

    pub fn from_tokens(tokens: Vec<Located<Token>>, lump: &str) -> Self {
        Self {
            tokens,
            pos: 0,
            lump: lump.to_string(),
        }
    }

    pub fn lump(&self) -> &str {
        &self.lump
    }

    /// Advance to the next token; `None` at end of lump.
    pub fn get_token(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos)?.value.clone();
        self.pos += 1;
        Some(tok)
    }

    /// Push the current token back so the next [`get_token`](Self::get_token)
    /// returns it again.
    pub fn unget(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// The most recently read token.
    pub fn token(&self) -> Option<&Token> {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| &t.value)
    }

    /// Case-insensitive comparison of the current token's text.
    pub fn compare(&self, text: &str) -> bool {
        self.token()
            .is_some_and(|t| t.is_value() && t.text().eq_ignore_ascii_case(text))
    }

    /// Index of the current token in `keywords`, compared case-insensitively.
    pub fn match_keyword(&self, keywords: &[&str]) -> Option<usize> {
        let tok = self.token().filter(|t| t.is_value())?;
        keywords
            .iter()
            .position(|k| k.eq_ignore_ascii_case(tok.text()))
    }

    pub fn must_match_keyword(&self, keywords: &[&str]) -> Result<usize, MapInfoError> {
        self.match_keyword(keywords).ok_or_else(|| {
            let got = self.describe_current();
            self.error(format!(
                "expected one of {}, got {got}",
                keywords.join(", ")
            ))
        })
    }

    pub fn must_get_token(&mut self) -> Result<Token, MapInfoError> {
        self.get_token()
            .ok_or_else(|| self.error("unexpected end of lump"))
    }

    pub fn must_get_string(&mut self) -> Result<String, MapInfoError> {
        match self.must_get_token()? {
            Token::Word(s) | Token::String(s) => Ok(s),
            other => Err(self.error(format!("expected string, got {other}"))),
        }
    }

    /// Read the next token and require its text to be `name`.
    pub fn must_get_string_name(&mut self, name: &str) -> Result<(), MapInfoError> {
        let tok = self.must_get_token()?;
        if tok.text().eq_ignore_ascii_case(name) {
            Ok(())
        } else {
            Err(self.error(format!("expected \"{name}\", got {tok}")))
        }
    }

    /// Read an integer: decimal, or hexadecimal with a `0x` prefix.
    pub fn must_get_number(&mut self) -> Result<i32, MapInfoError> {
        let tok = self.must_get_token()?;
        let parsed = match &tok {
            Token::Word(s) | Token::String(s) => parse_int(s),
            _ => None,
        };
        parsed.ok_or_else(|| self.error(format!("expected number, got {tok}")))
    }

    pub fn must_get_float(&mut self) -> Result<f32, MapInfoError> {
        let tok = self.must_get_token()?;
        let parsed = match &tok {
            Token::Word(s) | Token::String(s) => s.parse::<f32>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| self.error(format!("expected float, got {tok}")))
    }

    /// A script error positioned at the current token.
    pub fn error(&self, msg: impl Into<String>) -> MapInfoError {
        let line = self
            .pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(0);
        MapInfoError::Script {
            lump: self.lump.clone(),
            line,
            msg: msg.into(),
        }
    }

    fn describe_current(&self) -> String {
        self.token()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "end of lump".into())
    }
}

fn parse_int(s: &str) -> Option<i32> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<i64>().ok()?,
    };
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner(input: &str) -> Scanner {
        Scanner::new(input, "TEST").expect("lex")
    }

    #[test]
    fn unget_returns_same_token() {
        let mut sc = scanner("a b");
        assert_eq!(sc.get_token(), Some(Token::Word("a".into())));
        sc.unget();
        assert_eq!(sc.get_token(), Some(Token::Word("a".into())));
        assert_eq!(sc.get_token(), Some(Token::Word("b".into())));
        assert_eq!(sc.get_token(), None);
    }

    #[test]
    fn keyword_matching_ignores_case() {
        let mut sc = scanner("DefaultMap {");
        sc.get_token();
        assert_eq!(sc.match_keyword(&["map", "defaultmap"]), Some(1));
        assert!(sc.compare("DEFAULTMAP"));
        sc.get_token();
        assert_eq!(sc.match_keyword(&["{"]), None);
        assert!(sc.must_match_keyword(&["map"]).is_err());
    }

    #[test]
    fn numbers() {
        let mut sc = scanner("42 -7 0x1F \"12\" 1.5 =");
        assert_eq!(sc.must_get_number().ok(), Some(42));
        assert_eq!(sc.must_get_number().ok(), Some(-7));
        assert_eq!(sc.must_get_number().ok(), Some(31));
        assert_eq!(sc.must_get_number().ok(), Some(12));
        assert!(sc.must_get_number().is_err());
        assert!(sc.must_get_number().is_err());
    }

    #[test]
    fn floats() {
        let mut sc = scanner("800 0.25 sky");
        assert_eq!(sc.must_get_float().ok(), Some(800.0));
        assert_eq!(sc.must_get_float().ok(), Some(0.25));
        assert!(sc.must_get_float().is_err());
    }

    #[test]
    fn string_name() {
        let mut sc = scanner("= ,");
        assert!(sc.must_get_string_name("=").is_ok());
        assert!(sc.must_get_string_name("=").is_err());
    }

    #[test]
    fn punctuation_is_not_a_string() {
        let mut sc = scanner("{");
        assert!(sc.must_get_string().is_err());
    }

    #[test]
    fn errors_carry_position() {
        let mut sc = scanner("one\ntwo\nthree");
        sc.get_token();
        sc.get_token();
        let err = sc.must_get_number().expect_err("not a number");
        assert_eq!(err.to_string(), "TEST:3: expected number, got three");
    }

    #[test]
    fn end_of_lump() {
        let mut sc = scanner("");
        assert!(sc.must_get_string().is_err());
    }
}
