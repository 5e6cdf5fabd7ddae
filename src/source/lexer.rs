//! Tokenizer for the subset of C# the declaration parser looks at.
//!
//! Comments and preprocessor lines are dropped. String literals are decoded
//! so attribute arguments can be read as constants; interpolated strings are
//! scanned (holes included) but carry no value.
use crate::error::SyntaxError;

#[derive(Debug, Clone, PartialEq)]
pub enum Tok {
    Ident(String),
    /// `@class`: an identifier that is never a keyword.
    VerbatimIdent(String),
    Str(String),
    Interpolated,
    Char(char),
    Number(String),
    Punct(char),
    /// `::`
    ColonColon,
    /// `=>`
    Arrow,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub tok: Tok,
    pub line: u32,
}

impl Tok {
    pub fn describe(&self) -> String {
        match self {
            Tok::Ident(s) | Tok::VerbatimIdent(s) => format!("`{s}`"),
            Tok::Str(_) | Tok::Interpolated => "string literal".to_string(),
            Tok::Char(_) => "character literal".to_string(),
            Tok::Number(n) => format!("`{n}`"),
            Tok::Punct(c) => format!("`{c}`"),
            Tok::ColonColon => "`::`".to_string(),
            Tok::Arrow => "`=>`".to_string(),
            Tok::Eof => "end of file".to_string(),
        }
    }
}

pub fn tokenize(src: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lx = Lexer::new(src);
    let mut out = Vec::new();
    let mut line_start = true;
    while let Some(c) = lx.peek() {
        if c == '\n' {
            lx.bump();
            line_start = true;
            continue;
        }
        if c.is_whitespace() || c == '\u{feff}' {
            lx.bump();
            continue;
        }
        if c == '#' && line_start {
            lx.skip_line();
            continue;
        }
        line_start = false;
        if c == '/' && lx.peek_at(1) == Some('/') {
            lx.skip_line();
            continue;
        }
        if c == '/' && lx.peek_at(1) == Some('*') {
            lx.skip_block_comment()?;
            continue;
        }
        let line = lx.line;
        let tok = lx.token(c)?;
        out.push(Token { tok, line });
    }
    out.push(Token { tok: Tok::Eof, line: lx.line });
    Ok(out)
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
}

impl Lexer {
    fn new(src: &str) -> Self {
        Self { chars: src.chars().collect(), pos: 0, line: 1 }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), SyntaxError> {
        let line = self.line;
        self.bump();
        self.bump();
        loop {
            match self.bump() {
                None => return Err(SyntaxError::Unterminated { what: "block comment", line }),
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => {}
            }
        }
    }

    fn token(&mut self, c: char) -> Result<Tok, SyntaxError> {
        let line = self.line;
        let tok = match c {
            '@' => match (self.peek_at(1), self.peek_at(2)) {
                (Some('"'), _) => {
                    self.bump();
                    Tok::Str(self.verbatim_string()?)
                }
                (Some('$'), Some('"')) => {
                    self.bump();
                    self.bump();
                    self.interpolated(true)?;
                    Tok::Interpolated
                }
                (Some(n), _) if is_ident_start(n) => {
                    self.bump();
                    Tok::VerbatimIdent(self.ident())
                }
                _ => return Err(SyntaxError::UnexpectedChar { ch: c, line }),
            },
            '$' => {
                while self.peek() == Some('$') {
                    self.bump();
                }
                let verbatim = self.peek() == Some('@');
                if verbatim {
                    self.bump();
                }
                match self.peek() {
                    Some('"') if self.is_raw_start() => {
                        self.raw_string()?;
                    }
                    Some('"') => self.interpolated(verbatim)?,
                    _ => return Err(SyntaxError::UnexpectedChar { ch: c, line }),
                }
                Tok::Interpolated
            }
            '"' if self.is_raw_start() => Tok::Str(self.raw_string()?),
            '"' => Tok::Str(self.regular_string()?),
            '\'' => Tok::Char(self.char_literal()?),
            c if is_ident_start(c) => Tok::Ident(self.ident()),
            c if c.is_ascii_digit() => Tok::Number(self.number()),
            '.' if self.peek_at(1).is_some_and(|n| n.is_ascii_digit()) => Tok::Number(self.number()),
            ':' if self.peek_at(1) == Some(':') => {
                self.bump();
                self.bump();
                Tok::ColonColon
            }
            '=' if self.peek_at(1) == Some('>') => {
                self.bump();
                self.bump();
                Tok::Arrow
            }
            c if c.is_ascii_punctuation() => {
                self.bump();
                Tok::Punct(c)
            }
            _ => return Err(SyntaxError::UnexpectedChar { ch: c, line }),
        };
        if matches!(tok, Tok::Str(_) | Tok::Interpolated)
            && self.peek() == Some('u')
            && self.peek_at(1) == Some('8')
        {
            self.bump();
            self.bump();
        }
        Ok(tok)
    }

    fn ident(&mut self) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            s.push(c);
            self.bump();
        }
        s
    }

    fn number(&mut self) -> String {
        let mut s = String::new();
        let hex = self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X'));
        while let Some(c) = self.peek() {
            let exponent_sign = !hex && matches!(c, '+' | '-') && s.ends_with(['e', 'E']);
            let fraction = c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit());
            if !(c.is_ascii_alphanumeric() || c == '_' || fraction || exponent_sign) {
                break;
            }
            s.push(c);
            self.bump();
        }
        s
    }

    fn is_raw_start(&self) -> bool {
        self.peek() == Some('"') && self.peek_at(1) == Some('"') && self.peek_at(2) == Some('"')
    }

    fn regular_string(&mut self) -> Result<String, SyntaxError> {
        let line = self.line;
        self.bump();
        let mut s = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => {
                    return Err(SyntaxError::Unterminated { what: "string literal", line });
                }
                Some('"') => return Ok(s),
                Some('\\') => s.push(self.escape(line)?),
                Some(c) => s.push(c),
            }
        }
    }

    fn verbatim_string(&mut self) -> Result<String, SyntaxError> {
        let line = self.line;
        self.bump();
        let mut s = String::new();
        loop {
            match self.bump() {
                None => return Err(SyntaxError::Unterminated { what: "verbatim string literal", line }),
                Some('"') if self.peek() == Some('"') => {
                    self.bump();
                    s.push('"');
                }
                Some('"') => return Ok(s),
                Some(c) => s.push(c),
            }
        }
    }

    fn raw_string(&mut self) -> Result<String, SyntaxError> {
        let line = self.line;
        let mut quotes = 0;
        while self.peek() == Some('"') {
            self.bump();
            quotes += 1;
        }
        let mut raw = String::new();
        loop {
            match self.peek() {
                None => return Err(SyntaxError::Unterminated { what: "raw string literal", line }),
                Some('"') => {
                    let mut run = 0;
                    while self.peek_at(run) == Some('"') {
                        run += 1;
                    }
                    for _ in 0..run {
                        self.bump();
                    }
                    if run >= quotes {
                        return Ok(dedent_raw(&raw));
                    }
                    raw.extend(std::iter::repeat_n('"', run));
                }
                Some(_) => {
                    if let Some(c) = self.bump() {
                        raw.push(c);
                    }
                }
            }
        }
    }

    /// Scans `"..."` of an interpolated string, holes included.
    fn interpolated(&mut self, verbatim: bool) -> Result<(), SyntaxError> {
        let line = self.line;
        self.bump();
        loop {
            match self.bump() {
                None => return Err(SyntaxError::Unterminated { what: "interpolated string", line }),
                Some('\n') if !verbatim => {
                    return Err(SyntaxError::Unterminated { what: "interpolated string", line });
                }
                Some('"') if verbatim && self.peek() == Some('"') => {
                    self.bump();
                }
                Some('"') => return Ok(()),
                Some('\\') if !verbatim => {
                    self.bump();
                }
                Some('{') if self.peek() == Some('{') => {
                    self.bump();
                }
                Some('{') => self.interpolation_hole(line)?,
                Some(_) => {}
            }
        }
    }

    fn interpolation_hole(&mut self, line: u32) -> Result<(), SyntaxError> {
        let mut depth = 1usize;
        loop {
            match self.peek() {
                None => return Err(SyntaxError::Unterminated { what: "interpolation hole", line }),
                Some('{') => {
                    depth += 1;
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some('"') => {
                    self.regular_string()?;
                }
                Some('@') if self.peek_at(1) == Some('"') => {
                    self.bump();
                    self.verbatim_string()?;
                }
                Some('$') => {
                    while self.peek() == Some('$') {
                        self.bump();
                    }
                    let verbatim = self.peek() == Some('@');
                    if verbatim {
                        self.bump();
                    }
                    if self.peek() == Some('"') {
                        self.interpolated(verbatim)?;
                    }
                }
                Some('\'') => {
                    self.char_literal()?;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn char_literal(&mut self) -> Result<char, SyntaxError> {
        let line = self.line;
        self.bump();
        let c = match self.bump() {
            None | Some('\n') => return Err(SyntaxError::Unterminated { what: "character literal", line }),
            Some('\\') => self.escape(line)?,
            Some(c) => c,
        };
        if self.bump() != Some('\'') {
            return Err(SyntaxError::Unterminated { what: "character literal", line });
        }
        Ok(c)
    }

    fn escape(&mut self, line: u32) -> Result<char, SyntaxError> {
        let c = self
            .bump()
            .ok_or(SyntaxError::Unterminated { what: "escape sequence", line })?;
        Ok(match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            'a' => '\u{7}',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            'e' => '\u{1b}',
            'u' => self.hex_escape(4),
            'U' => self.hex_escape(8),
            'x' => self.hex_escape(4),
            other => other,
        })
    }

    fn hex_escape(&mut self, max: usize) -> char {
        let mut value = 0u32;
        for _ in 0..max {
            match self.peek().and_then(|c| c.to_digit(16)) {
                Some(d) => {
                    value = value * 16 + d;
                    self.bump();
                }
                None => break,
            }
        }
        char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Multi-line raw literals drop the opening and closing lines and strip the
/// closing line's indentation from every content line.
fn dedent_raw(raw: &str) -> String {
    if !raw.contains('\n') {
        return raw.to_string();
    }
    let mut lines: Vec<&str> = raw.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    lines.remove(0);
    let indent = lines.pop().unwrap_or("");
    lines
        .iter()
        .map(|l| l.strip_prefix(indent).unwrap_or(l))
        .collect::<Vec<_>>()
        .join("\n")
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(src: &str) -> Vec<Tok> {
        tokenize(src).unwrap().into_iter().map(|t| t.tok).collect()
    }

    #[test]
    fn skips_comments_and_preprocessor_lines() {
        let src = "#region Models\n// note\nclass /* inline */ A {}\n#endregion\n";
        assert_eq!(
            toks(src),
            vec![
                Tok::Ident("class".into()),
                Tok::Ident("A".into()),
                Tok::Punct('{'),
                Tok::Punct('}'),
                Tok::Eof,
            ]
        );
    }

    #[test]
    fn decodes_string_literal_forms() {
        let src = r#"[A("/a\"b", @"c""d", $"x{(y ? "}" : "z")}w")]"#;
        let t = toks(src);
        assert!(t.contains(&Tok::Str("/a\"b".into())));
        assert!(t.contains(&Tok::Str("c\"d".into())));
        assert!(t.contains(&Tok::Interpolated));
        assert_eq!(t[t.len() - 2], Tok::Punct(']'));
    }

    #[test]
    fn raw_string_is_dedented() {
        let src = "x = \"\"\"\n    /bifrost/a\n    \"\"\";";
        assert!(toks(src).contains(&Tok::Str("/bifrost/a".into())));
    }

    #[test]
    fn generic_close_is_never_a_shift() {
        let t = toks("List<List<int>> x;");
        let closes = t.iter().filter(|t| **t == Tok::Punct('>')).count();
        assert_eq!(closes, 2);
    }

    #[test]
    fn tracks_lines_and_reports_unterminated_strings() {
        let tokens = tokenize("a\n\nb").unwrap();
        assert_eq!(tokens[1].line, 3);
        let err = tokenize("x = \"open\n;").unwrap_err();
        assert_eq!(err, SyntaxError::Unterminated { what: "string literal", line: 1 });
    }

    #[test]
    fn verbatim_identifier_is_not_a_keyword_token() {
        assert_eq!(toks("@class")[0], Tok::VerbatimIdent("class".into()));
    }
}
