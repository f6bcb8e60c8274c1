//! Tokenizer for the snippet language.

use super::RunnerError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Str(String),
    Ident(String),

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Semi,
    Colon,
    Question,
    Arrow,

    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,

    EqEq,
    EqEqEq,
    NotEq,
    NotEqEq,
    Lt,
    Le,
    Gt,
    Ge,

    AndAnd,
    OrOr,
    NullishCoalesce,
    Bang,
}

/// Tokenize the whole snippet. Whitespace and `//` / `/* */` comments are
/// dropped; there is no newline token (no automatic semicolon insertion —
/// statement boundaries are handled leniently by the parser).
pub fn tokenize(source: &str) -> Result<Vec<Token>, RunnerError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    while pos < chars.len() {
        let ch = chars[pos];

        if ch.is_whitespace() {
            pos += 1;
            continue;
        }

        // Comments
        if ch == '/' && pos + 1 < chars.len() {
            if chars[pos + 1] == '/' {
                while pos < chars.len() && chars[pos] != '\n' {
                    pos += 1;
                }
                continue;
            }
            if chars[pos + 1] == '*' {
                pos += 2;
                loop {
                    if pos + 1 >= chars.len() {
                        return Err(RunnerError::Syntax("unterminated comment".into()));
                    }
                    if chars[pos] == '*' && chars[pos + 1] == '/' {
                        pos += 2;
                        break;
                    }
                    pos += 1;
                }
                continue;
            }
        }

        if ch.is_ascii_digit() || (ch == '.' && pos + 1 < chars.len() && chars[pos + 1].is_ascii_digit()) {
            let (value, next) = lex_number(&chars, pos)?;
            tokens.push(Token::Number(value));
            pos = next;
            continue;
        }

        if ch == '"' || ch == '\'' {
            let (value, next) = lex_string(&chars, pos)?;
            tokens.push(Token::Str(value));
            pos = next;
            continue;
        }

        if ch.is_alphabetic() || ch == '_' || ch == '$' {
            let start = pos;
            while pos < chars.len()
                && (chars[pos].is_alphanumeric() || chars[pos] == '_' || chars[pos] == '$')
            {
                pos += 1;
            }
            tokens.push(Token::Ident(chars[start..pos].iter().collect()));
            continue;
        }

        let (token, width) = lex_punct(&chars, pos)?;
        tokens.push(token);
        pos += width;
    }

    Ok(tokens)
}

fn lex_number(chars: &[char], start: usize) -> Result<(f64, usize), RunnerError> {
    let mut pos = start;
    while pos < chars.len() && chars[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos < chars.len() && chars[pos] == '.' {
        pos += 1;
        while pos < chars.len() && chars[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    if pos < chars.len() && (chars[pos] == 'e' || chars[pos] == 'E') {
        let mut lookahead = pos + 1;
        if lookahead < chars.len() && (chars[lookahead] == '+' || chars[lookahead] == '-') {
            lookahead += 1;
        }
        if lookahead < chars.len() && chars[lookahead].is_ascii_digit() {
            pos = lookahead;
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
        }
    }

    let text: String = chars[start..pos].iter().collect();
    text.parse::<f64>()
        .map(|value| (value, pos))
        .map_err(|_| RunnerError::Syntax(format!("invalid number literal {text}")))
}

fn lex_string(chars: &[char], start: usize) -> Result<(String, usize), RunnerError> {
    let quote = chars[start];
    let mut pos = start + 1;
    let mut value = String::new();

    while pos < chars.len() {
        let ch = chars[pos];
        if ch == quote {
            return Ok((value, pos + 1));
        }
        if ch == '\\' {
            pos += 1;
            let escaped = *chars
                .get(pos)
                .ok_or_else(|| RunnerError::Syntax("unterminated string literal".into()))?;
            match escaped {
                'n' => value.push('\n'),
                't' => value.push('\t'),
                'r' => value.push('\r'),
                '\\' => value.push('\\'),
                '\'' => value.push('\''),
                '"' => value.push('"'),
                '`' => value.push('`'),
                '0' => value.push('\0'),
                other => value.push(other),
            }
            pos += 1;
            continue;
        }
        value.push(ch);
        pos += 1;
    }

    Err(RunnerError::Syntax("unterminated string literal".into()))
}

fn lex_punct(chars: &[char], pos: usize) -> Result<(Token, usize), RunnerError> {
    let ch = chars[pos];
    let next = chars.get(pos + 1).copied();
    let third = chars.get(pos + 2).copied();

    let token = match (ch, next, third) {
        ('=', Some('='), Some('=')) => return Ok((Token::EqEqEq, 3)),
        ('!', Some('='), Some('=')) => return Ok((Token::NotEqEq, 3)),
        ('=', Some('='), _) => return Ok((Token::EqEq, 2)),
        ('!', Some('='), _) => return Ok((Token::NotEq, 2)),
        ('=', Some('>'), _) => return Ok((Token::Arrow, 2)),
        ('<', Some('='), _) => return Ok((Token::Le, 2)),
        ('>', Some('='), _) => return Ok((Token::Ge, 2)),
        ('&', Some('&'), _) => return Ok((Token::AndAnd, 2)),
        ('|', Some('|'), _) => return Ok((Token::OrOr, 2)),
        ('?', Some('?'), _) => return Ok((Token::NullishCoalesce, 2)),
        ('+', Some('+'), _) => return Ok((Token::PlusPlus, 2)),
        ('-', Some('-'), _) => return Ok((Token::MinusMinus, 2)),
        ('+', Some('='), _) => return Ok((Token::PlusAssign, 2)),
        ('-', Some('='), _) => return Ok((Token::MinusAssign, 2)),
        ('*', Some('='), _) => return Ok((Token::StarAssign, 2)),
        ('/', Some('='), _) => return Ok((Token::SlashAssign, 2)),
        ('(', _, _) => Token::LParen,
        (')', _, _) => Token::RParen,
        ('{', _, _) => Token::LBrace,
        ('}', _, _) => Token::RBrace,
        ('[', _, _) => Token::LBracket,
        (']', _, _) => Token::RBracket,
        (',', _, _) => Token::Comma,
        ('.', _, _) => Token::Dot,
        (';', _, _) => Token::Semi,
        (':', _, _) => Token::Colon,
        ('?', _, _) => Token::Question,
        ('=', _, _) => Token::Assign,
        ('+', _, _) => Token::Plus,
        ('-', _, _) => Token::Minus,
        ('*', _, _) => Token::Star,
        ('/', _, _) => Token::Slash,
        ('%', _, _) => Token::Percent,
        ('<', _, _) => Token::Lt,
        ('>', _, _) => Token::Gt,
        ('!', _, _) => Token::Bang,
        (other, _, _) => {
            return Err(RunnerError::Syntax(format!("Unexpected token {other}")));
        }
    };

    Ok((token, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_a_log_call() {
        let tokens = tokenize("console.log(\"hi\")").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("console".into()),
                Token::Dot,
                Token::Ident("log".into()),
                Token::LParen,
                Token::Str("hi".into()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn distinguishes_equality_depth() {
        let tokens = tokenize("a == b === c != d !== e").unwrap();
        let punct: Vec<&Token> = tokens
            .iter()
            .filter(|t| !matches!(t, Token::Ident(_)))
            .collect();
        assert_eq!(
            punct,
            vec![&Token::EqEq, &Token::EqEqEq, &Token::NotEq, &Token::NotEqEq]
        );
    }

    #[test]
    fn skips_comments_and_whitespace() {
        let tokens = tokenize("1 // one\n/* two */ 2").unwrap();
        assert_eq!(tokens, vec![Token::Number(1.0), Token::Number(2.0)]);
    }

    #[test]
    fn string_escapes() {
        let tokens = tokenize(r#"'a\nb\'c'"#).unwrap();
        assert_eq!(tokens, vec![Token::Str("a\nb'c".into())]);
    }

    #[test]
    fn numbers_with_fraction_and_exponent() {
        let tokens = tokenize("0.5 2e3 1.25e-2").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Number(0.5), Token::Number(2000.0), Token::Number(0.0125)]
        );
    }

    #[test]
    fn rejects_stray_characters() {
        assert!(tokenize("let a = #").is_err());
    }
}
