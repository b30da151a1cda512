//! Tokenizer for MAPINFO descriptor lumps.
//!
//! Both the brace-less legacy dialect and the `{ key = value }` dialect share
//! one token grammar: whitespace separated words, quoted strings, and the
//! four single-character punctuators `{`, `}`, `=` and `,`.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare word, number or name.
    Word(String),
    /// Double-quoted string with escapes resolved.
    String(String),
    LBrace,
    RBrace,
    Equals,
    Comma,
}

impl Token {
    /// Text of the token as the scanner compares it.
    pub fn text(&self) -> &str {
        match self {
            Token::Word(s) | Token::String(s) => s,
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::Equals => "=",
            Token::Comma => ",",
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Token::Word(_) | Token::String(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::String(s) => write!(f, "\"{s}\""),
            other => f.write_str(other.text()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Located<T> {
    pub value: T,
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum LexError {
    #[error("line {line}, col {col}: {msg}")]
    Error {
        line: usize,
        col: usize,
        msg: String,
    },
}

fn is_punct(c: char) -> bool {
    matches!(c, '{' | '}' | '=' | ',')
}

pub fn lex(input: &str) -> Result<Vec<Located<Token>>, LexError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    let mut line = 1usize;
    let mut col = 1usize;

    while let Some(&ch) = chars.peek() {
        let start_line = line;
        let start_col = col;

        if ch == '\n' {
            chars.next();
            line += 1;
            col = 1;
            continue;
        }
        if ch.is_whitespace() {
            chars.next();
            col += 1;
            continue;
        }

        // Line comments: `;` or `//`
        let mut lookahead = chars.clone();
        lookahead.next();
        let next = lookahead.peek().copied();
        if ch == ';' || (ch == '/' && next == Some('/')) {
            while let Some(&c) = chars.peek() {
                if c == '\n' {
                    break;
                }
                chars.next();
                col += 1;
            }
            continue;
        }

        if ch == '/' && next == Some('*') {
            chars.next();
            chars.next();
            col += 2;
            let mut closed = false;
            while let Some(c) = chars.next() {
                if c == '\n' {
                    line += 1;
                    col = 1;
                    continue;
                }
                col += 1;
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    col += 1;
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(LexError::Error {
                    line: start_line,
                    col: start_col,
                    msg: "unterminated block comment".into(),
                });
            }
            continue;
        }

        if ch == '"' {
            chars.next();
            col += 1;
            let mut s = std::string::String::new();
            loop {
                match chars.next() {
                    Some('"') => {
                        col += 1;
                        break;
                    }
                    Some('\\') => {
                        col += 1;
                        match chars.next() {
                            Some('n') => s.push('\n'),
                            Some(c) => s.push(c),
                            None => {
                                return Err(LexError::Error {
                                    line: start_line,
                                    col: start_col,
                                    msg: "unterminated string".into(),
                                });
                            }
                        }
                        col += 1;
                    }
                    Some('\n') => {
                        s.push('\n');
                        line += 1;
                        col = 1;
                    }
                    Some(c) => {
                        s.push(c);
                        col += 1;
                    }
                    None => {
                        return Err(LexError::Error {
                            line: start_line,
                            col: start_col,
                            msg: "unterminated string".into(),
                        });
                    }
                }
            }
            tokens.push(Located {
                value: Token::String(s),
                line: start_line,
                col: start_col,
            });
            continue;
        }

        if is_punct(ch) {
            chars.next();
            col += 1;
            let value = match ch {
                '{' => Token::LBrace,
                '}' => Token::RBrace,
                '=' => Token::Equals,
                _ => Token::Comma,
            };
            tokens.push(Located {
                value,
                line: start_line,
                col: start_col,
            });
            continue;
        }

        let mut word = std::string::String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || is_punct(c) || c == '"' || c == ';' {
                break;
            }
            word.push(c);
            chars.next();
            col += 1;
        }
        tokens.push(Located {
            value: Token::Word(word),
            line: start_line,
            col: start_col,
        });
    }

    Ok(tokens)
}
