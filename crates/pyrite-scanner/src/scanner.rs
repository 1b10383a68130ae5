//! The Python tokenizer.
//!
//! `Scanner` is stateful rather than a free function, the same shape as the
//! teacher's `ScannerState`: the parser drives it one [`Token`] at a time
//! and can snapshot/restore its position for speculative lookahead (e.g.
//! trying to parse a `match` statement's soft-keyword head and backing out
//! if it turns out to be a plain assignment).
//!
//! Indentation, not brackets, is this tokenizer's defining wrinkle:
//! `Indent`/`Dedent`/`Newline` are synthesized from leading whitespace and
//! suppressed entirely while `paren_depth > 0` or the logical line ends in
//! a backslash continuation.

use crate::token::{StringPrefix, Token, TokenKind};
use pyrite_common::numeric::parse_numeric;
use pyrite_common::span::Span;

const TAB_STOP: u32 = 8;

/// Opaque snapshot of scanner position, restorable with
/// [`Scanner::restore_state`]. Kept separate from `Token` so the parser
/// doesn't have to reconstruct a whole token to rewind.
#[derive(Clone, Copy, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    at_line_start: bool,
    paren_depth: i32,
    indent_len: usize,
    pending_dedents: u32,
}

pub struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    at_line_start: bool,
    paren_depth: i32,
    indent_stack: Vec<u32>,
    pending_dedents: u32,
    /// Comment text (without the leading `#`) and its span, collected as a
    /// side channel for [`pyrite_common::pragmas::scan_pragmas`] — comments
    /// are not otherwise part of the token stream the parser sees.
    comments: Vec<(String, Span)>,
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            at_line_start: true,
            paren_depth: 0,
            indent_stack: vec![0],
            pending_dedents: 0,
            comments: Vec::new(),
        }
    }

    #[must_use]
    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            at_line_start: self.at_line_start,
            paren_depth: self.paren_depth,
            indent_len: self.indent_stack.len(),
            pending_dedents: self.pending_dedents,
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.at_line_start = snapshot.at_line_start;
        self.paren_depth = snapshot.paren_depth;
        self.indent_stack.truncate(snapshot.indent_len);
        self.pending_dedents = snapshot.pending_dedents;
    }

    /// Comments collected so far, ready to hand to `scan_pragmas`.
    #[must_use]
    pub fn comments(&self) -> &[(String, Span)] {
        &self.comments
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Produce the next token. Indentation bookkeeping happens here rather
    /// than in a wrapper so `save_state`/`restore_state` cover it uniformly.
    pub fn scan(&mut self) -> Token {
        if self.pending_dedents > 0 {
            self.pending_dedents -= 1;
            return Token::new(TokenKind::Dedent, Span::at(u32::try_from(self.pos).unwrap_or(u32::MAX)));
        }

        if self.at_line_start && self.paren_depth == 0 {
            if let Some(tok) = self.scan_indentation() {
                return tok;
            }
        }

        self.skip_intra_line_whitespace();

        let start = self.pos;
        let Some(b) = self.peek() else {
            return self.scan_end_of_file(start);
        };

        match b {
            b'\n' | b'\r' if self.paren_depth > 0 => {
                self.consume_newline_bytes();
                self.scan()
            }
            b'\n' | b'\r' => self.scan_newline(start),
            b'#' => self.scan_comment(start),
            b'\\' if matches!(self.peek_at(1), Some(b'\n') | Some(b'\r')) => {
                self.consume_line_continuation();
                self.scan()
            }
            b'0'..=b'9' => self.scan_number(start),
            b'.' if matches!(self.peek_at(1), Some(b'0'..=b'9')) => self.scan_number(start),
            b'"' | b'\'' => self.scan_string(start, StringPrefix::default()),
            b if is_ident_start(b) => self.scan_name_or_prefixed_string(start),
            _ => self.scan_operator(start),
        }
    }

    fn scan_end_of_file(&mut self, start: usize) -> Token {
        if self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.pending_dedents = u32::try_from(self.indent_stack.len() - 1).unwrap_or(0);
            return Token::new(TokenKind::Dedent, Span::at(u32::try_from(start).unwrap_or(u32::MAX)));
        }
        Token::new(TokenKind::EndOfFile, Span::at(u32::try_from(start).unwrap_or(u32::MAX)))
    }

    /// Compute leading whitespace width (tabs advance to the next multiple
    /// of 8) and diff it against the indent stack. Blank and comment-only
    /// lines are skipped without affecting indentation, matching CPython's
    /// tokenizer.
    fn scan_indentation(&mut self) -> Option<Token> {
        loop {
            let line_start = self.pos;
            let mut width = 0u32;
            loop {
                match self.peek() {
                    Some(b' ') => {
                        width += 1;
                        self.pos += 1;
                    }
                    Some(b'\t') => {
                        width += TAB_STOP - (width % TAB_STOP);
                        self.pos += 1;
                    }
                    _ => break,
                }
            }

            match self.peek() {
                None => {
                    self.pos = line_start;
                    self.at_line_start = false;
                    return None;
                }
                Some(b'\n') | Some(b'\r') | Some(b'#') => {
                    // Blank or comment-only line: consume it and retry,
                    // without ever touching the indent stack.
                    if self.peek() == Some(b'#') {
                        let comment_start = self.pos;
                        self.scan_comment(comment_start);
                    }
                    if matches!(self.peek(), Some(b'\n') | Some(b'\r')) {
                        self.consume_newline_bytes();
                    }
                    continue;
                }
                _ => {}
            }

            self.at_line_start = false;
            let current = *self.indent_stack.last().unwrap_or(&0);
            if width > current {
                self.indent_stack.push(width);
                return Some(Token::new(TokenKind::Indent, Span::new(u32::try_from(line_start).unwrap_or(0), u32::try_from(self.pos).unwrap_or(0))));
            }
            if width < current {
                let mut dedents = 0u32;
                while *self.indent_stack.last().unwrap_or(&0) > width {
                    self.indent_stack.pop();
                    dedents += 1;
                }
                self.pending_dedents = dedents.saturating_sub(1);
                return Some(Token::new(TokenKind::Dedent, Span::at(u32::try_from(self.pos).unwrap_or(0))));
            }
            return None;
        }
    }

    fn skip_intra_line_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ') | Some(b'\t') | Some(0x0c)) {
            self.pos += 1;
        }
    }

    fn consume_newline_bytes(&mut self) {
        if self.peek() == Some(b'\r') {
            self.pos += 1;
        }
        if self.peek() == Some(b'\n') {
            self.pos += 1;
        }
    }

    fn consume_line_continuation(&mut self) {
        self.pos += 1; // backslash
        self.consume_newline_bytes();
    }

    fn scan_newline(&mut self, start: usize) -> Token {
        self.consume_newline_bytes();
        self.at_line_start = self.paren_depth == 0;
        Token::new(TokenKind::Newline, Span::new(u32::try_from(start).unwrap_or(0), u32::try_from(self.pos).unwrap_or(0)))
    }

    fn scan_comment(&mut self, start: usize) -> Token {
        self.pos += 1; // '#'
        let text_start = self.pos;
        while !matches!(self.peek(), None | Some(b'\n') | Some(b'\r')) {
            self.pos += 1;
        }
        let span = Span::new(u32::try_from(start).unwrap_or(0), u32::try_from(self.pos).unwrap_or(0));
        let text = self.source.get(text_start..self.pos).unwrap_or("").to_string();
        self.comments.push((text, span));
        Token::new(TokenKind::Comment, span)
    }

    fn scan_number(&mut self, start: usize) -> Token {
        while matches!(self.peek(), Some(b'0'..=b'9' | b'_' | b'.' | b'x' | b'X' | b'o' | b'O' | b'b' | b'B' | b'e' | b'E' | b'a'..=b'f' | b'A'..=b'F')) {
            // Exponent sign handling: `1e+10`/`1e-10`.
            if matches!(self.peek(), Some(b'e' | b'E')) && matches!(self.peek_at(1), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            self.pos += 1;
        }
        if matches!(self.peek(), Some(b'j' | b'J')) {
            self.pos += 1;
        }
        let span = Span::new(u32::try_from(start).unwrap_or(0), u32::try_from(self.pos).unwrap_or(0));
        let text = span.slice(self.source);
        let mut token = Token::new(TokenKind::Number, span);
        token.numeric_kind = parse_numeric(text).map(|(kind, _)| kind);
        token
    }

    fn scan_name_or_prefixed_string(&mut self, start: usize) -> Token {
        while matches!(self.peek(), Some(b) if is_ident_continue(b)) {
            self.pos += 1;
        }
        let text = self.source.get(start..self.pos).unwrap_or("");

        if matches!(self.peek(), Some(b'"') | Some(b'\'')) {
            if let Some(prefix) = StringPrefix::parse(text) {
                return self.scan_string(start, prefix);
            }
        }

        let span = Span::new(u32::try_from(start).unwrap_or(0), u32::try_from(self.pos).unwrap_or(0));
        let kind = TokenKind::keyword_for(text).unwrap_or(TokenKind::Name);
        Token::new(kind, span)
    }

    fn scan_string(&mut self, start: usize, prefix: StringPrefix) -> Token {
        let quote = self.bump().expect("caller peeked a quote byte");
        let triple = self.peek() == Some(quote) && self.peek_at(1) == Some(quote);
        if triple {
            self.pos += 2;
        }

        let mut unterminated = true;
        loop {
            match self.peek() {
                None => break,
                Some(b'\\') if !prefix.raw => {
                    self.pos += 1;
                    if self.peek().is_some() {
                        self.pos += 1;
                    }
                }
                Some(b) if b == quote => {
                    if !triple {
                        self.pos += 1;
                        unterminated = false;
                        break;
                    }
                    if self.peek_at(1) == Some(quote) && self.peek_at(2) == Some(quote) {
                        self.pos += 3;
                        unterminated = false;
                        break;
                    }
                    self.pos += 1;
                }
                Some(b'\n') if !triple => break,
                _ => self.pos += 1,
            }
        }

        let span = Span::new(u32::try_from(start).unwrap_or(0), u32::try_from(self.pos).unwrap_or(0));
        let kind = if prefix.fstring { TokenKind::FString } else { TokenKind::String };
        let mut token = Token::new(kind, span);
        token.string_prefix = Some(prefix);
        token.unterminated = unterminated;
        token
    }

    /// Consume `=` if present and return `with_eq`, else `without_eq`.
    /// Covers the common "maybe augmented-assignment" operator shape
    /// (`+`/`+=`, `%`/`%=`, `&`/`&=`, ...).
    fn maybe_eq(&mut self, with_eq: TokenKind, without_eq: TokenKind) -> TokenKind {
        if self.peek() == Some(b'=') {
            self.pos += 1;
            with_eq
        } else {
            without_eq
        }
    }

    fn scan_operator(&mut self, start: usize) -> Token {
        let b = self.bump().expect("caller peeked a byte");
        let kind = match b {
            b'(' => {
                self.paren_depth += 1;
                TokenKind::LParen
            }
            b')' => {
                self.paren_depth -= 1;
                TokenKind::RParen
            }
            b'[' => {
                self.paren_depth += 1;
                TokenKind::LBracket
            }
            b']' => {
                self.paren_depth -= 1;
                TokenKind::RBracket
            }
            b'{' => {
                self.paren_depth += 1;
                TokenKind::LBrace
            }
            b'}' => {
                self.paren_depth -= 1;
                TokenKind::RBrace
            }
            b',' => TokenKind::Comma,
            b':' => self.maybe_eq(TokenKind::Walrus, TokenKind::Colon),
            b';' => TokenKind::Semicolon,
            b'~' => TokenKind::Tilde,
            b'.' => {
                if self.peek() == Some(b'.') && self.peek_at(1) == Some(b'.') {
                    self.pos += 2;
                    TokenKind::Ellipsis
                } else {
                    TokenKind::Dot
                }
            }
            b'+' => self.maybe_eq(TokenKind::PlusEq, TokenKind::Plus),
            b'-' => {
                if self.peek() == Some(b'>') {
                    self.pos += 1;
                    TokenKind::Arrow
                } else {
                    self.maybe_eq(TokenKind::MinusEq, TokenKind::Minus)
                }
            }
            b'%' => self.maybe_eq(TokenKind::PercentEq, TokenKind::Percent),
            b'@' => self.maybe_eq(TokenKind::AtEq, TokenKind::At),
            b'&' => self.maybe_eq(TokenKind::AmpEq, TokenKind::Amp),
            b'|' => self.maybe_eq(TokenKind::PipeEq, TokenKind::Pipe),
            b'^' => self.maybe_eq(TokenKind::CaretEq, TokenKind::Caret),
            b'=' => self.maybe_eq(TokenKind::EqEq, TokenKind::Eq),
            b'*' => {
                if self.peek() == Some(b'*') {
                    self.pos += 1;
                    self.maybe_eq(TokenKind::DoubleStarEq, TokenKind::DoubleStar)
                } else {
                    self.maybe_eq(TokenKind::StarEq, TokenKind::Star)
                }
            }
            b'/' => {
                if self.peek() == Some(b'/') {
                    self.pos += 1;
                    self.maybe_eq(TokenKind::DoubleSlashEq, TokenKind::DoubleSlash)
                } else {
                    self.maybe_eq(TokenKind::SlashEq, TokenKind::Slash)
                }
            }
            b'<' => {
                if self.peek() == Some(b'<') {
                    self.pos += 1;
                    self.maybe_eq(TokenKind::LtLtEq, TokenKind::LtLt)
                } else {
                    self.maybe_eq(TokenKind::LtEq, TokenKind::Lt)
                }
            }
            b'>' => {
                if self.peek() == Some(b'>') {
                    self.pos += 1;
                    self.maybe_eq(TokenKind::GtGtEq, TokenKind::GtGt)
                } else {
                    self.maybe_eq(TokenKind::GtEq, TokenKind::Gt)
                }
            }
            b'!' if self.peek() == Some(b'=') => {
                self.pos += 1;
                TokenKind::NotEq
            }
            _ => TokenKind::Unknown,
        };

        Token::new(kind, Span::new(u32::try_from(start).unwrap_or(0), u32::try_from(self.pos).unwrap_or(0)))
    }
}

fn is_ident_start(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphabetic() || b >= 0x80
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

/// Find the byte spans of `{expr}` interpolation regions inside an f-string
/// token's text, skipping doubled `{{`/`}}` escapes and respecting nested
/// brackets inside an expression (`f"{d['k']}"`). Each returned span is
/// relative to `base_offset` (the f-string token's own start) so the parser
/// can slice the original source and hand the substring to a fresh
/// [`Scanner`] for independent re-lexing — the same "re-scan a sub-region"
/// idea as a contextual token re-scan, just computed eagerly instead of
/// mutating scanner state in place.
#[must_use]
pub fn fstring_expression_spans(text: &str, base_offset: u32) -> Vec<Span> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => i += 2,
            b'}' if bytes.get(i + 1) == Some(&b'}') => i += 2,
            b'{' => {
                let expr_start = i + 1;
                let mut depth = 1i32;
                let mut j = expr_start;
                while j < bytes.len() && depth > 0 {
                    match bytes[j] {
                        b'{' | b'[' | b'(' => depth += 1,
                        b'}' if depth == 1 => depth -= 1,
                        b'}' | b']' | b')' => depth -= 1,
                        _ => {}
                    }
                    if depth > 0 {
                        j += 1;
                    }
                }
                if j > expr_start {
                    spans.push(Span::new(base_offset + u32::try_from(expr_start).unwrap_or(0), base_offset + u32::try_from(j).unwrap_or(0)));
                }
                i = j + 1;
            }
            _ => i += 1,
        }
    }
    spans
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
