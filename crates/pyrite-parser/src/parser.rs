//! Recursive-descent parser.
//!
//! Tokens are scanned eagerly into one `Vec` up front (rather than pulled
//! lazily from `Scanner`) so the parser can freely save/restore a token
//! cursor for the handful of constructs that need short lookahead (is this
//! `(` the start of a parenthesized tuple target or a call?) without
//! re-deriving indentation state. Comment tokens never reach the grammar —
//! they're filtered out of the stream here, but their text was already
//! captured by the scanner's side channel and is threaded through to
//! [`ParseResult::comments`] for `pyrite_common::pragmas::scan_pragmas`.

use crate::arena::{NodeArena, NodeIndex};
use crate::dialect::Dialect;
use crate::node::{
    BinaryOp, BoolOp, CompareOp, ComprehensionGenerator, ComprehensionKind, ExceptHandler, FStringPart, ImportAlias, MatchCase, Node, Param, ParamKind, TypeComment, UnaryOp, WithItem,
};
use pyrite_common::diagnostics::{Diagnostic, DiagnosticRule, Severity};
use pyrite_common::span::Span;
use pyrite_scanner::{fstring_expression_spans, Scanner, StringPrefix, Token, TokenKind};
use rustc_hash::FxHashSet;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ParseResult {
    pub arena: NodeArena,
    pub root: NodeIndex,
    pub diagnostics: Vec<Diagnostic>,
    /// Source lines carrying a blanket `# type: ignore` comment: the checker
    /// drops diagnostics anchored to these lines wholesale. Scoped
    /// `# type: ignore[codes]` suppression is resolved from `comments`
    /// instead, since it needs the specific rule list.
    pub type_ignore_lines: FxHashSet<u32>,
    pub comments: Vec<(String, Span)>,
}

/// Parse one file's token stream into a parse tree.
#[must_use]
pub fn parse(source: &str, file: &str, dialect: Dialect) -> ParseResult {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.scan();
        let is_eof = token.kind == TokenKind::EndOfFile;
        if token.kind != TokenKind::Comment {
            tokens.push(token);
        }
        if is_eof {
            break;
        }
    }
    let comments = scanner.comments().to_vec();
    let (_, type_comments) = pyrite_common::pragmas::scan_pragmas(comments.iter().map(|(t, s)| (t.as_str(), *s)));

    let mut parser = Parser {
        source,
        file,
        tokens,
        pos: 0,
        arena: NodeArena::new(),
        diagnostics: Vec::new(),
        dialect,
        type_comments,
    };
    let body = parser.parse_statements_until_eof();
    let root_span = if body.is_empty() {
        Span::at(0)
    } else {
        parser.arena.span(body[0]).merge(parser.arena.span(*body.last().unwrap()))
    };
    let root = parser.arena.alloc(Node::Module { body }, root_span);
    parser.arena.build_parent_table(root);

    let type_ignore_lines = collect_type_ignore_lines(&comments, source);

    ParseResult {
        arena: parser.arena,
        root,
        diagnostics: parser.diagnostics,
        type_ignore_lines,
        comments,
    }
}

fn collect_type_ignore_lines(comments: &[(String, Span)], source: &str) -> FxHashSet<u32> {
    let (ignores, _) = pyrite_common::pragmas::scan_pragmas(comments.iter().map(|(t, s)| (t.as_str(), *s)));
    let line_map = pyrite_common::position::LineMap::build(source);
    ignores.iter().map(|ignore| line_map.offset_to_position(ignore.span.start, source).line).collect()
}

struct Parser<'a> {
    source: &'a str,
    file: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    arena: NodeArena,
    diagnostics: Vec<Diagnostic>,
    dialect: Dialect,
    type_comments: Vec<pyrite_common::pragmas::TypeComment>,
}

impl<'a> Parser<'a> {
    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    fn span(&self) -> Span {
        self.current().span
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn text(&self, token: &Token) -> &'a str {
        token.span.slice(self.source)
    }

    fn error(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(self.file.to_string(), self.span(), Severity::Error, DiagnosticRule::SyntaxError, message.into()));
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {what}"));
            false
        }
    }

    /// Error recovery: skip tokens until a statement boundary (`Newline`,
    /// `Dedent`, `EndOfFile`) so one bad statement doesn't poison the rest
    /// of the file.
    fn recover_to_statement_boundary(&mut self) -> NodeIndex {
        let start = self.span();
        while !matches!(self.kind(), TokenKind::Newline | TokenKind::Dedent | TokenKind::EndOfFile) {
            self.advance();
        }
        self.eat(TokenKind::Newline);
        self.arena.alloc(Node::Error, start)
    }

    fn skip_newlines(&mut self) {
        while self.eat(TokenKind::Newline) {}
    }

    // ---------------- statements ----------------

    fn parse_statements_until_eof(&mut self) -> Vec<NodeIndex> {
        let mut body = Vec::new();
        self.skip_newlines();
        while !self.at(TokenKind::EndOfFile) {
            body.push(self.parse_statement());
            self.skip_newlines();
        }
        body
    }

    fn parse_block(&mut self) -> Vec<NodeIndex> {
        if !self.expect(TokenKind::Colon, "':'") {
            return vec![self.recover_to_statement_boundary()];
        }
        if self.eat(TokenKind::Newline) {
            if !self.expect(TokenKind::Indent, "an indented block") {
                return Vec::new();
            }
            let mut body = Vec::new();
            while !matches!(self.kind(), TokenKind::Dedent | TokenKind::EndOfFile) {
                body.push(self.parse_statement());
                self.skip_newlines();
            }
            self.eat(TokenKind::Dedent);
            body
        } else {
            // Single-line suite: `if x: return y`
            self.parse_simple_statement_line()
        }
    }

    fn parse_statement(&mut self) -> NodeIndex {
        match self.kind() {
            TokenKind::KwDef => self.parse_function_def(Vec::new(), false),
            TokenKind::KwAsync => self.parse_async_statement(),
            TokenKind::KwClass => self.parse_class_def(Vec::new()),
            TokenKind::At => self.parse_decorated(),
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwWhile => self.parse_while(),
            TokenKind::KwFor => self.parse_for(false),
            TokenKind::KwWith => self.parse_with(false),
            TokenKind::KwTry => self.parse_try(),
            TokenKind::SoftKwMatch if self.dialect.allows_match_statement() && self.looks_like_match_statement() => self.parse_match(),
            _ => {
                let stmts = self.parse_simple_statement_line();
                debug_assert!(!stmts.is_empty());
                stmts[0]
            }
        }
    }

    fn looks_like_match_statement(&self) -> bool {
        // `match` is a soft keyword; it only introduces a match statement
        // when followed by an expression and a colon that opens a suite.
        // A cheap, non-backtracking heuristic: the next token is not an
        // operator that would make `match` itself the subject of an
        // expression statement (`match = 1`, `match(x)` as a call, ...).
        !matches!(self.tokens.get(self.pos + 1).map(|t| t.kind), Some(TokenKind::Eq | TokenKind::Dot | TokenKind::LParen | TokenKind::LBracket | TokenKind::Comma))
    }

    fn parse_async_statement(&mut self) -> NodeIndex {
        self.advance(); // async
        match self.kind() {
            TokenKind::KwDef => self.parse_function_def(Vec::new(), true),
            TokenKind::KwFor => self.parse_for(true),
            TokenKind::KwWith => self.parse_with(true),
            _ => {
                self.error("expected 'def', 'for', or 'with' after 'async'");
                self.recover_to_statement_boundary()
            }
        }
    }

    fn parse_decorated(&mut self) -> NodeIndex {
        let mut decorators = Vec::new();
        while self.eat(TokenKind::At) {
            decorators.push(self.parse_expression());
            self.eat(TokenKind::Newline);
        }
        match self.kind() {
            TokenKind::KwDef => self.parse_function_def(decorators, false),
            TokenKind::KwAsync => {
                self.advance();
                self.parse_function_def(decorators, true)
            }
            TokenKind::KwClass => self.parse_class_def(decorators),
            _ => {
                self.error("expected a function or class definition after decorators");
                self.recover_to_statement_boundary()
            }
        }
    }

    fn parse_type_params(&mut self) -> Vec<String> {
        let mut params = Vec::new();
        if self.dialect.allows_pep695_generic_params() && self.eat(TokenKind::LBracket) {
            while !self.at(TokenKind::RBracket) && !self.at(TokenKind::EndOfFile) {
                self.eat(TokenKind::Star);
                self.eat(TokenKind::DoubleStar);
                if let TokenKind::Name = self.kind() {
                    let tok = self.advance();
                    params.push(self.text(&tok).to_string());
                }
                if self.eat(TokenKind::Colon) {
                    self.parse_expression();
                }
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RBracket, "']'");
        }
        params
    }

    fn parse_function_def(&mut self, decorators: Vec<NodeIndex>, is_async: bool) -> NodeIndex {
        let start = self.span();
        self.advance(); // def
        let name = self.expect_name();
        let type_params = self.parse_type_params();
        self.expect(TokenKind::LParen, "'('");
        let params = self.parse_param_list();
        self.expect(TokenKind::RParen, "')'");
        let returns = if self.eat(TokenKind::Arrow) { Some(self.parse_expression()) } else { None };
        let body = self.parse_block();
        let end = body.last().map(|b| self.arena.span(*b)).unwrap_or(start);
        self.arena.alloc(Node::FunctionDef { name, is_async, decorators, type_params, params, returns, body }, start.merge(end))
    }

    fn expect_name(&mut self) -> String {
        if matches!(self.kind(), TokenKind::Name | TokenKind::SoftKwMatch | TokenKind::SoftKwCase | TokenKind::SoftKwType) {
            let tok = self.advance();
            self.text(&tok).to_string()
        } else {
            self.error("expected a name");
            String::new()
        }
    }

    fn parse_param_list(&mut self) -> Vec<Param> {
        let mut params = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at(TokenKind::EndOfFile) {
            let start = self.span();
            if self.eat(TokenKind::Slash) {
                params.push(Param { name: "/".to_string(), annotation: None, default: None, kind: ParamKind::PositionalOnlyMarker, span: start });
            } else if self.eat(TokenKind::Star) {
                if matches!(self.kind(), TokenKind::Name) {
                    let name = self.expect_name();
                    let annotation = if self.eat(TokenKind::Colon) { Some(self.parse_expression()) } else { None };
                    params.push(Param { name, annotation, default: None, kind: ParamKind::VarArgs, span: start });
                } else {
                    params.push(Param { name: "*".to_string(), annotation: None, default: None, kind: ParamKind::KeywordOnlyMarker, span: start });
                }
            } else if self.eat(TokenKind::DoubleStar) {
                let name = self.expect_name();
                let annotation = if self.eat(TokenKind::Colon) { Some(self.parse_expression()) } else { None };
                params.push(Param { name, annotation, default: None, kind: ParamKind::KwArgs, span: start });
            } else {
                let name = self.expect_name();
                let annotation = if self.eat(TokenKind::Colon) { Some(self.parse_expression()) } else { None };
                let default = if self.eat(TokenKind::Eq) { Some(self.parse_expression()) } else { None };
                params.push(Param { name, annotation, default, kind: ParamKind::Normal, span: start });
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        params
    }

    fn parse_class_def(&mut self, decorators: Vec<NodeIndex>) -> NodeIndex {
        let start = self.span();
        self.advance(); // class
        let name = self.expect_name();
        let type_params = self.parse_type_params();
        let mut bases = Vec::new();
        let mut keywords = Vec::new();
        if self.eat(TokenKind::LParen) {
            while !self.at(TokenKind::RParen) && !self.at(TokenKind::EndOfFile) {
                if matches!(self.kind(), TokenKind::Name) && self.tokens.get(self.pos + 1).map(|t| t.kind) == Some(TokenKind::Eq) {
                    let key = self.expect_name();
                    self.advance(); // =
                    keywords.push((key, self.parse_expression()));
                } else {
                    bases.push(self.parse_expression());
                }
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen, "')'");
        }
        let body = self.parse_block();
        let end = body.last().map(|b| self.arena.span(*b)).unwrap_or(start);
        self.arena.alloc(Node::ClassDef { name, decorators, type_params, bases, keywords, body }, start.merge(end))
    }

    fn parse_if(&mut self) -> NodeIndex {
        let start = self.span();
        self.advance(); // if
        let test = self.parse_named_expr_or_expression();
        let body = self.parse_block();
        let or_else = if self.at(TokenKind::KwElif) {
            vec![self.parse_elif()]
        } else if self.eat(TokenKind::KwElse) {
            self.parse_block()
        } else {
            Vec::new()
        };
        let end = or_else.last().or(body.last()).map(|n| self.arena.span(*n)).unwrap_or(start);
        self.arena.alloc(Node::If { test, body, or_else }, start.merge(end))
    }

    fn parse_elif(&mut self) -> NodeIndex {
        let start = self.span();
        self.advance(); // elif
        let test = self.parse_named_expr_or_expression();
        let body = self.parse_block();
        let or_else = if self.at(TokenKind::KwElif) {
            vec![self.parse_elif()]
        } else if self.eat(TokenKind::KwElse) {
            self.parse_block()
        } else {
            Vec::new()
        };
        let end = or_else.last().or(body.last()).map(|n| self.arena.span(*n)).unwrap_or(start);
        self.arena.alloc(Node::If { test, body, or_else }, start.merge(end))
    }

    fn parse_while(&mut self) -> NodeIndex {
        let start = self.span();
        self.advance();
        let test = self.parse_named_expr_or_expression();
        let body = self.parse_block();
        let or_else = if self.eat(TokenKind::KwElse) { self.parse_block() } else { Vec::new() };
        let end = or_else.last().or(body.last()).map(|n| self.arena.span(*n)).unwrap_or(start);
        self.arena.alloc(Node::While { test, body, or_else }, start.merge(end))
    }

    fn parse_for(&mut self, is_async: bool) -> NodeIndex {
        let start = self.span();
        self.advance(); // for
        let target = self.parse_target_list();
        self.expect(TokenKind::KwIn, "'in'");
        let iter = self.parse_expression_list_as_tuple();
        let type_comment = self.take_trailing_type_comment_on_colon();
        let body = self.parse_block();
        let or_else = if self.eat(TokenKind::KwElse) { self.parse_block() } else { Vec::new() };
        let end = or_else.last().or(body.last()).map(|n| self.arena.span(*n)).unwrap_or(start);
        self.arena.alloc(Node::For { is_async, target, iter, body, or_else, type_comment }, start.merge(end))
    }

    fn parse_with(&mut self, is_async: bool) -> NodeIndex {
        let start = self.span();
        self.advance(); // with
        let parenthesized = self.eat(TokenKind::LParen);
        let mut items = Vec::new();
        loop {
            let context_expr = self.parse_expression();
            let optional_vars = if self.eat(TokenKind::KwAs) { Some(self.parse_target()) } else { None };
            items.push(WithItem { context_expr, optional_vars });
            if !self.eat(TokenKind::Comma) {
                break;
            }
            if parenthesized && self.at(TokenKind::RParen) {
                break;
            }
        }
        if parenthesized {
            self.expect(TokenKind::RParen, "')'");
        }
        let type_comment = self.take_trailing_type_comment_on_colon();
        let body = self.parse_block();
        let end = body.last().map(|b| self.arena.span(*b)).unwrap_or(start);
        self.arena.alloc(Node::With { is_async, items, body, type_comment }, start.merge(end))
    }

    /// Look up a `# type: T` comment trailing the current line (the scanner
    /// records comment text/spans independently of the token stream, so
    /// this is a proximity match against the next `Newline` token's offset
    /// rather than a grammar lookahead).
    fn take_trailing_type_comment_on_colon(&self) -> Option<TypeComment> {
        let line_start = self.span().start;
        let mut i = self.pos;
        while i < self.tokens.len() && !matches!(self.tokens[i].kind, TokenKind::Newline | TokenKind::EndOfFile) {
            i += 1;
        }
        let line_end = self.tokens[i].span.start;
        self.type_comments
            .iter()
            .find(|c| c.span.start >= line_start && c.span.start <= line_end)
            .map(|c| TypeComment { text: c.type_text.clone(), span: c.span })
    }

    fn parse_try(&mut self) -> NodeIndex {
        let start = self.span();
        self.advance(); // try
        let body = self.parse_block();
        let mut handlers = Vec::new();
        let mut is_star = false;
        while self.at(TokenKind::KwExcept) {
            let h_start = self.span();
            self.advance();
            is_star = self.eat(TokenKind::Star) || is_star;
            let exc_type = if !self.at(TokenKind::Colon) { Some(self.parse_expression()) } else { None };
            let name = if self.eat(TokenKind::KwAs) { Some(self.expect_name()) } else { None };
            let handler_body = self.parse_block();
            let h_end = handler_body.last().map(|b| self.arena.span(*b)).unwrap_or(h_start);
            handlers.push(ExceptHandler { exc_type, name, body: handler_body, span: h_start.merge(h_end) });
        }
        let or_else = if self.eat(TokenKind::KwElse) { self.parse_block() } else { Vec::new() };
        let finally = if self.eat(TokenKind::KwFinally) { self.parse_block() } else { Vec::new() };
        let end_span = finally
            .last()
            .map(|n| self.arena.span(*n))
            .or_else(|| or_else.last().map(|n| self.arena.span(*n)))
            .or_else(|| handlers.last().map(|h| h.span))
            .unwrap_or(start);
        self.arena.alloc(Node::Try { body, handlers, or_else, finally, is_star }, start.merge(end_span))
    }

    fn parse_match(&mut self) -> NodeIndex {
        let start = self.span();
        self.advance(); // match
        let subject = self.parse_expression_list_as_tuple();
        self.expect(TokenKind::Colon, "':'");
        self.eat(TokenKind::Newline);
        self.expect(TokenKind::Indent, "an indented block of case clauses");
        let mut cases = Vec::new();
        while self.at(TokenKind::SoftKwCase) {
            self.advance();
            let pattern = self.parse_pattern();
            let guard = if self.eat(TokenKind::KwIf) { Some(self.parse_expression()) } else { None };
            let body = self.parse_block();
            cases.push(MatchCase { pattern, guard, body });
            self.skip_newlines();
        }
        self.eat(TokenKind::Dedent);
        let end = cases.last().and_then(|c| c.body.last()).map(|n| self.arena.span(*n)).unwrap_or(start);
        self.arena.alloc(Node::Match { subject, cases }, start.merge(end))
    }

    fn parse_pattern(&mut self) -> NodeIndex {
        let start = self.span();
        let first = self.parse_pattern_atom();
        if self.at(TokenKind::Pipe) {
            let mut alternatives = vec![first];
            while self.eat(TokenKind::Pipe) {
                alternatives.push(self.parse_pattern_atom());
            }
            return self.arena.alloc(Node::PatternOr { alternatives }, start.merge(self.span()));
        }
        first
    }

    fn parse_pattern_atom(&mut self) -> NodeIndex {
        let start = self.span();
        match self.kind() {
            TokenKind::SoftKwUnderscore => {
                self.advance();
                self.arena.alloc(Node::PatternCapture { name: None }, start)
            }
            TokenKind::Name => {
                let name = self.expect_name();
                if self.at(TokenKind::LParen) {
                    let cls = self.arena.alloc(Node::Name { id: name }, start);
                    self.parse_pattern_class_trailer(cls, start)
                } else {
                    self.arena.alloc(Node::PatternCapture { name: Some(name) }, start)
                }
            }
            TokenKind::LBracket | TokenKind::LParen => {
                let close = if self.kind() == TokenKind::LBracket { TokenKind::RBracket } else { TokenKind::RParen };
                self.advance();
                let mut elements = Vec::new();
                while !self.at(close) && !self.at(TokenKind::EndOfFile) {
                    elements.push(self.parse_pattern());
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(close, "closing bracket");
                self.arena.alloc(Node::PatternSequence { elements }, start.merge(self.span()))
            }
            TokenKind::LBrace => {
                self.advance();
                let mut keys = Vec::new();
                let mut values = Vec::new();
                let mut rest = None;
                while !self.at(TokenKind::RBrace) && !self.at(TokenKind::EndOfFile) {
                    if self.eat(TokenKind::DoubleStar) {
                        rest = Some(self.expect_name());
                    } else {
                        keys.push(self.parse_expression());
                        self.expect(TokenKind::Colon, "':'");
                        values.push(self.parse_pattern());
                    }
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RBrace, "'}'");
                self.arena.alloc(Node::PatternMapping { keys, values, rest }, start.merge(self.span()))
            }
            _ => {
                let value = self.parse_expression();
                self.arena.alloc(Node::PatternValue { value }, start)
            }
        }
    }

    fn parse_pattern_class_trailer(&mut self, cls: NodeIndex, start: Span) -> NodeIndex {
        self.advance(); // (
        let mut positional = Vec::new();
        let mut keyword = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at(TokenKind::EndOfFile) {
            if matches!(self.kind(), TokenKind::Name) && self.tokens.get(self.pos + 1).map(|t| t.kind) == Some(TokenKind::Eq) {
                let key = self.expect_name();
                self.advance();
                keyword.push((key, self.parse_pattern()));
            } else {
                positional.push(self.parse_pattern());
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'");
        self.arena.alloc(Node::PatternClass { cls, positional, keyword }, start.merge(self.span()))
    }

    fn parse_simple_statement_line(&mut self) -> Vec<NodeIndex> {
        let mut stmts = Vec::new();
        loop {
            stmts.push(self.parse_small_statement());
            if !self.eat(TokenKind::Semicolon) {
                break;
            }
            if matches!(self.kind(), TokenKind::Newline | TokenKind::EndOfFile) {
                break;
            }
        }
        self.eat(TokenKind::Newline);
        stmts
    }

    fn parse_small_statement(&mut self) -> NodeIndex {
        let start = self.span();
        match self.kind() {
            TokenKind::KwPass => {
                self.advance();
                self.arena.alloc(Node::Pass, start)
            }
            TokenKind::KwBreak => {
                self.advance();
                self.arena.alloc(Node::Break, start)
            }
            TokenKind::KwContinue => {
                self.advance();
                self.arena.alloc(Node::Continue, start)
            }
            TokenKind::KwReturn => {
                self.advance();
                let value = if matches!(self.kind(), TokenKind::Newline | TokenKind::Semicolon | TokenKind::EndOfFile) { None } else { Some(self.parse_expression_list_as_tuple()) };
                self.arena.alloc(Node::Return { value }, start)
            }
            TokenKind::KwRaise => {
                self.advance();
                let exc = if matches!(self.kind(), TokenKind::Newline | TokenKind::Semicolon | TokenKind::EndOfFile) { None } else { Some(self.parse_expression()) };
                let cause = if exc.is_some() && self.eat(TokenKind::KwFrom) { Some(self.parse_expression()) } else { None };
                self.arena.alloc(Node::Raise { exc, cause }, start)
            }
            TokenKind::KwDel => {
                self.advance();
                let targets = self.parse_target_comma_list();
                self.arena.alloc(Node::Delete { targets }, start)
            }
            TokenKind::KwAssert => {
                self.advance();
                let test = self.parse_expression();
                let msg = if self.eat(TokenKind::Comma) { Some(self.parse_expression()) } else { None };
                self.arena.alloc(Node::Assert { test, msg }, start)
            }
            TokenKind::KwGlobal => {
                self.advance();
                let names = self.parse_name_comma_list();
                self.arena.alloc(Node::Global { names }, start)
            }
            TokenKind::KwNonlocal => {
                self.advance();
                let names = self.parse_name_comma_list();
                self.arena.alloc(Node::Nonlocal { names }, start)
            }
            TokenKind::KwImport => self.parse_import(),
            TokenKind::KwFrom => self.parse_import_from(),
            TokenKind::SoftKwType if self.dialect.allows_type_alias_statement() && self.tokens.get(self.pos + 1).map(|t| t.kind) == Some(TokenKind::Name) => self.parse_type_alias(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_name_comma_list(&mut self) -> Vec<String> {
        let mut names = vec![self.expect_name()];
        while self.eat(TokenKind::Comma) {
            names.push(self.expect_name());
        }
        names
    }

    fn parse_type_alias(&mut self) -> NodeIndex {
        let start = self.span();
        self.advance(); // type
        let name = self.expect_name();
        let type_params = self.parse_type_params();
        self.expect(TokenKind::Eq, "'='");
        let value = self.parse_expression();
        self.arena.alloc(Node::TypeAliasStatement { name, type_params, value }, start.merge(self.arena.span(value)))
    }

    fn parse_import(&mut self) -> NodeIndex {
        let start = self.span();
        self.advance(); // import
        let mut names = Vec::new();
        loop {
            let alias_start = self.span();
            let mut name = self.expect_name();
            while self.eat(TokenKind::Dot) {
                name.push('.');
                name.push_str(&self.expect_name());
            }
            let asname = if self.eat(TokenKind::KwAs) { Some(self.expect_name()) } else { None };
            names.push(ImportAlias { name, asname, span: alias_start.merge(self.span()) });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.arena.alloc(Node::Import { names }, start.merge(self.span()))
    }

    fn parse_import_from(&mut self) -> NodeIndex {
        let start = self.span();
        self.advance(); // from
        let mut level = 0u32;
        while matches!(self.kind(), TokenKind::Dot | TokenKind::Ellipsis) {
            level += if self.kind() == TokenKind::Ellipsis { 3 } else { 1 };
            self.advance();
        }
        let module = if matches!(self.kind(), TokenKind::Name) {
            let mut m = self.expect_name();
            while self.eat(TokenKind::Dot) {
                m.push('.');
                m.push_str(&self.expect_name());
            }
            Some(m)
        } else {
            None
        };
        self.expect(TokenKind::KwImport, "'import'");
        let mut names = Vec::new();
        if self.eat(TokenKind::Star) {
            names.push(ImportAlias { name: "*".to_string(), asname: None, span: self.span() });
        } else {
            let parenthesized = self.eat(TokenKind::LParen);
            loop {
                let alias_start = self.span();
                let name = self.expect_name();
                let asname = if self.eat(TokenKind::KwAs) { Some(self.expect_name()) } else { None };
                names.push(ImportAlias { name, asname, span: alias_start.merge(self.span()) });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
                if parenthesized && self.at(TokenKind::RParen) {
                    break;
                }
            }
            if parenthesized {
                self.expect(TokenKind::RParen, "')'");
            }
        }
        self.arena.alloc(Node::ImportFrom { module, level, names }, start.merge(self.span()))
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start = self.span();
        let first = self.parse_named_expr_or_expression();

        if self.at(TokenKind::Colon) {
            self.advance();
            let annotation = self.parse_expression();
            let value = if self.eat(TokenKind::Eq) { Some(self.parse_expression()) } else { None };
            return self.arena.alloc(Node::AnnAssign { target: first, annotation, value }, start.merge(self.span()));
        }

        if let Some(op) = self.aug_assign_op() {
            self.advance();
            let value = self.parse_expression_list_as_tuple();
            return self.arena.alloc(Node::AugAssign { target: first, op, value }, start.merge(self.span()));
        }

        if self.at(TokenKind::Eq) {
            let mut targets = vec![first];
            let mut value = first;
            while self.eat(TokenKind::Eq) {
                value = self.parse_expression_list_as_tuple();
                targets.push(value);
            }
            targets.pop();
            let type_comment = None;
            return self.arena.alloc(Node::Assign { targets, value, type_comment }, start.merge(self.span()));
        }

        self.arena.alloc(Node::ExprStatement { value: first }, start.merge(self.arena.span(first)))
    }

    fn aug_assign_op(&self) -> Option<BinaryOp> {
        Some(match self.kind() {
            TokenKind::PlusEq => BinaryOp::Add,
            TokenKind::MinusEq => BinaryOp::Sub,
            TokenKind::StarEq => BinaryOp::Mul,
            TokenKind::SlashEq => BinaryOp::Div,
            TokenKind::DoubleSlashEq => BinaryOp::FloorDiv,
            TokenKind::PercentEq => BinaryOp::Mod,
            TokenKind::DoubleStarEq => BinaryOp::Pow,
            TokenKind::AtEq => BinaryOp::MatMul,
            TokenKind::AmpEq => BinaryOp::BitAnd,
            TokenKind::PipeEq => BinaryOp::BitOr,
            TokenKind::CaretEq => BinaryOp::BitXor,
            TokenKind::LtLtEq => BinaryOp::LShift,
            TokenKind::GtGtEq => BinaryOp::RShift,
            _ => return None,
        })
    }

    fn parse_target(&mut self) -> NodeIndex {
        self.parse_or_expr()
    }

    fn parse_target_list(&mut self) -> NodeIndex {
        let start = self.span();
        let first = self.parse_target();
        if self.at(TokenKind::Comma) {
            let mut elements = vec![first];
            while self.eat(TokenKind::Comma) {
                if self.at(TokenKind::KwIn) {
                    break;
                }
                elements.push(self.parse_target());
            }
            return self.arena.alloc(Node::TupleExpr { elements }, start.merge(self.span()));
        }
        first
    }

    fn parse_target_comma_list(&mut self) -> Vec<NodeIndex> {
        let mut targets = vec![self.parse_target()];
        while self.eat(TokenKind::Comma) {
            targets.push(self.parse_target());
        }
        targets
    }

    // ---------------- expressions ----------------

    fn parse_expression_list_as_tuple(&mut self) -> NodeIndex {
        let start = self.span();
        let first = self.parse_star_or_expression();
        if self.at(TokenKind::Comma) {
            let mut elements = vec![first];
            while self.eat(TokenKind::Comma) {
                if matches!(self.kind(), TokenKind::Newline | TokenKind::EndOfFile | TokenKind::Eq | TokenKind::Colon | TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace) {
                    break;
                }
                elements.push(self.parse_star_or_expression());
            }
            return self.arena.alloc(Node::TupleExpr { elements }, start.merge(self.span()));
        }
        first
    }

    fn parse_star_or_expression(&mut self) -> NodeIndex {
        if self.at(TokenKind::Star) {
            let start = self.span();
            self.advance();
            let value = self.parse_expression();
            return self.arena.alloc(Node::Starred { value }, start.merge(self.arena.span(value)));
        }
        self.parse_expression()
    }

    fn parse_named_expr_or_expression(&mut self) -> NodeIndex {
        let start = self.span();
        let expr = self.parse_expression();
        if self.dialect.allows_walrus() && self.eat(TokenKind::Walrus) {
            let value = self.parse_expression();
            return self.arena.alloc(Node::NamedExpr { target: expr, value }, start.merge(self.arena.span(value)));
        }
        expr
    }

    /// `test: or_test ['if' or_test 'else' test] | lambdef`
    fn parse_expression(&mut self) -> NodeIndex {
        if self.at(TokenKind::KwLambda) {
            return self.parse_lambda();
        }
        let start = self.span();
        let body = self.parse_or_expr();
        if self.eat(TokenKind::KwIf) {
            let test = self.parse_or_expr();
            self.expect(TokenKind::KwElse, "'else'");
            let or_else = self.parse_expression();
            return self.arena.alloc(Node::IfExpr { test, body, or_else }, start.merge(self.arena.span(or_else)));
        }
        body
    }

    fn parse_lambda(&mut self) -> NodeIndex {
        let start = self.span();
        self.advance(); // lambda
        let mut params = Vec::new();
        while !self.at(TokenKind::Colon) && !self.at(TokenKind::EndOfFile) {
            let p_start = self.span();
            if self.eat(TokenKind::Star) {
                let name = self.expect_name();
                params.push(Param { name, annotation: None, default: None, kind: ParamKind::VarArgs, span: p_start });
            } else if self.eat(TokenKind::DoubleStar) {
                let name = self.expect_name();
                params.push(Param { name, annotation: None, default: None, kind: ParamKind::KwArgs, span: p_start });
            } else {
                let name = self.expect_name();
                let default = if self.eat(TokenKind::Eq) { Some(self.parse_expression()) } else { None };
                params.push(Param { name, annotation: None, default, kind: ParamKind::Normal, span: p_start });
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::Colon, "':'");
        let body = self.parse_expression();
        self.arena.alloc(Node::LambdaExpr { params, body }, start.merge(self.arena.span(body)))
    }

    fn parse_or_expr(&mut self) -> NodeIndex {
        let start = self.span();
        let first = self.parse_and_expr();
        if self.at(TokenKind::KwOr) {
            let mut values = vec![first];
            while self.eat(TokenKind::KwOr) {
                values.push(self.parse_and_expr());
            }
            return self.arena.alloc(Node::BoolOpExpr { op: BoolOp::Or, values }, start.merge(self.span()));
        }
        first
    }

    fn parse_and_expr(&mut self) -> NodeIndex {
        let start = self.span();
        let first = self.parse_not_expr();
        if self.at(TokenKind::KwAnd) {
            let mut values = vec![first];
            while self.eat(TokenKind::KwAnd) {
                values.push(self.parse_not_expr());
            }
            return self.arena.alloc(Node::BoolOpExpr { op: BoolOp::And, values }, start.merge(self.span()));
        }
        first
    }

    fn parse_not_expr(&mut self) -> NodeIndex {
        if self.at(TokenKind::KwNot) {
            let start = self.span();
            self.advance();
            let operand = self.parse_not_expr();
            return self.arena.alloc(Node::UnaryOpExpr { op: UnaryOp::Not, operand }, start.merge(self.arena.span(operand)));
        }
        self.parse_comparison()
    }

    /// Chained comparisons parse as one flat `Compare` node; the solver
    /// expands `a < b < c` to `a < b and b < c` during evaluation.
    fn parse_comparison(&mut self) -> NodeIndex {
        let start = self.span();
        let left = self.parse_bitor();
        let mut ops = Vec::new();
        let mut comparators = Vec::new();
        while let Some(op) = self.compare_op() {
            comparators.push(self.parse_bitor());
            ops.push(op);
        }
        if ops.is_empty() {
            return left;
        }
        self.arena.alloc(Node::Compare { left, ops, comparators }, start.merge(self.span()))
    }

    fn compare_op(&mut self) -> Option<CompareOp> {
        let op = match self.kind() {
            TokenKind::EqEq => CompareOp::Eq,
            TokenKind::NotEq => CompareOp::NotEq,
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::LtEq => CompareOp::LtEq,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::GtEq => CompareOp::GtEq,
            TokenKind::KwIn => CompareOp::In,
            TokenKind::KwIs => {
                self.advance();
                if self.eat(TokenKind::KwNot) {
                    return Some(CompareOp::IsNot);
                }
                return Some(CompareOp::Is);
            }
            TokenKind::KwNot if self.tokens.get(self.pos + 1).map(|t| t.kind) == Some(TokenKind::KwIn) => {
                self.advance();
                self.advance();
                return Some(CompareOp::NotIn);
            }
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn parse_bitor(&mut self) -> NodeIndex {
        self.parse_left_assoc_binop(Self::parse_bitxor, &[(TokenKind::Pipe, BinaryOp::BitOr)])
    }

    fn parse_bitxor(&mut self) -> NodeIndex {
        self.parse_left_assoc_binop(Self::parse_bitand, &[(TokenKind::Caret, BinaryOp::BitXor)])
    }

    fn parse_bitand(&mut self) -> NodeIndex {
        self.parse_left_assoc_binop(Self::parse_shift, &[(TokenKind::Amp, BinaryOp::BitAnd)])
    }

    fn parse_shift(&mut self) -> NodeIndex {
        self.parse_left_assoc_binop(Self::parse_arith, &[(TokenKind::LtLt, BinaryOp::LShift), (TokenKind::GtGt, BinaryOp::RShift)])
    }

    fn parse_arith(&mut self) -> NodeIndex {
        self.parse_left_assoc_binop(Self::parse_term, &[(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)])
    }

    fn parse_term(&mut self) -> NodeIndex {
        self.parse_left_assoc_binop(
            Self::parse_factor,
            &[(TokenKind::Star, BinaryOp::Mul), (TokenKind::Slash, BinaryOp::Div), (TokenKind::DoubleSlash, BinaryOp::FloorDiv), (TokenKind::Percent, BinaryOp::Mod), (TokenKind::At, BinaryOp::MatMul)],
        )
    }

    fn parse_left_assoc_binop(&mut self, mut next: impl FnMut(&mut Self) -> NodeIndex, ops: &[(TokenKind, BinaryOp)]) -> NodeIndex {
        let start = self.span();
        let mut left = next(self);
        loop {
            let matched = ops.iter().find(|(tok, _)| self.at(*tok)).map(|(_, op)| *op);
            let Some(op) = matched else { break };
            self.advance();
            let right = next(self);
            left = self.arena.alloc(Node::BinOpExpr { left, op, right }, start.merge(self.arena.span(right)));
        }
        left
    }

    fn parse_factor(&mut self) -> NodeIndex {
        let start = self.span();
        let op = match self.kind() {
            TokenKind::Plus => Some(UnaryOp::Pos),
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Tilde => Some(UnaryOp::Invert),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.parse_factor();
            return self.arena.alloc(Node::UnaryOpExpr { op, operand }, start.merge(self.arena.span(operand)));
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> NodeIndex {
        let start = self.span();
        let base = self.parse_await_expr();
        if self.eat(TokenKind::DoubleStar) {
            let exponent = self.parse_factor();
            return self.arena.alloc(Node::BinOpExpr { left: base, op: BinaryOp::Pow, right: exponent }, start.merge(self.arena.span(exponent)));
        }
        base
    }

    fn parse_await_expr(&mut self) -> NodeIndex {
        if self.at(TokenKind::KwAwait) {
            let start = self.span();
            self.advance();
            let value = self.parse_postfix();
            return self.arena.alloc(Node::Await { value }, start.merge(self.arena.span(value)));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> NodeIndex {
        let start = self.span();
        let mut expr = self.parse_atom();
        loop {
            match self.kind() {
                TokenKind::Dot => {
                    self.advance();
                    let attr = self.expect_name();
                    expr = self.arena.alloc(Node::Attribute { value: expr, attr }, start.merge(self.span()));
                }
                TokenKind::LParen => {
                    self.advance();
                    let (args, keywords) = self.parse_call_arguments();
                    self.expect(TokenKind::RParen, "')'");
                    expr = self.arena.alloc(Node::Call { func: expr, args, keywords }, start.merge(self.span()));
                }
                TokenKind::LBracket => {
                    self.advance();
                    let slice = self.parse_subscript_index();
                    self.expect(TokenKind::RBracket, "']'");
                    expr = self.arena.alloc(Node::Subscript { value: expr, slice }, start.merge(self.span()));
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_call_arguments(&mut self) -> (Vec<NodeIndex>, Vec<(Option<String>, NodeIndex)>) {
        let mut args = Vec::new();
        let mut keywords = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at(TokenKind::EndOfFile) {
            if self.at(TokenKind::DoubleStar) {
                self.advance();
                keywords.push((None, self.parse_expression()));
            } else if self.at(TokenKind::Star) {
                let start = self.span();
                self.advance();
                let value = self.parse_expression();
                args.push(self.arena.alloc(Node::Starred { value }, start.merge(self.arena.span(value))));
            } else if matches!(self.kind(), TokenKind::Name) && self.tokens.get(self.pos + 1).map(|t| t.kind) == Some(TokenKind::Eq) {
                let key = self.expect_name();
                self.advance(); // =
                keywords.push((Some(key), self.parse_expression()));
            } else {
                let expr = self.parse_expression();
                args.push(self.parse_comprehension_suffix_if_present(expr, ComprehensionKind::Generator));
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        (args, keywords)
    }

    /// If the next token starts a `for` clause, wrap `element` (already
    /// parsed) into a generator/list/set/dict comprehension node; otherwise
    /// return it unchanged.
    fn parse_comprehension_suffix_if_present(&mut self, element: NodeIndex, kind: ComprehensionKind) -> NodeIndex {
        if !matches!(self.kind(), TokenKind::KwFor) && !(self.at(TokenKind::KwAsync) && self.tokens.get(self.pos + 1).map(|t| t.kind) == Some(TokenKind::KwFor)) {
            return element;
        }
        let start = self.arena.span(element);
        let generators = self.parse_comprehension_generators();
        self.arena.alloc(Node::Comprehension { element, value_for_dict: None, kind, generators }, start.merge(self.span()))
    }

    fn parse_comprehension_generators(&mut self) -> Vec<ComprehensionGenerator> {
        let mut generators = Vec::new();
        while matches!(self.kind(), TokenKind::KwFor) || (self.at(TokenKind::KwAsync) && self.tokens.get(self.pos + 1).map(|t| t.kind) == Some(TokenKind::KwFor)) {
            let is_async = self.eat(TokenKind::KwAsync);
            self.advance(); // for
            let target = self.parse_target_list();
            self.expect(TokenKind::KwIn, "'in'");
            let iter = self.parse_or_expr();
            let mut ifs = Vec::new();
            while self.eat(TokenKind::KwIf) {
                ifs.push(self.parse_or_expr());
            }
            generators.push(ComprehensionGenerator { is_async, target, iter, ifs });
        }
        generators
    }

    fn parse_subscript_index(&mut self) -> NodeIndex {
        let start = self.span();
        let mut elements = vec![self.parse_slice_or_expression()];
        let mut is_tuple = false;
        while self.eat(TokenKind::Comma) {
            if self.at(TokenKind::RBracket) {
                is_tuple = true;
                break;
            }
            is_tuple = true;
            elements.push(self.parse_slice_or_expression());
        }
        if is_tuple {
            self.arena.alloc(Node::TupleExpr { elements }, start.merge(self.span()))
        } else {
            elements.remove(0)
        }
    }

    fn parse_slice_or_expression(&mut self) -> NodeIndex {
        let start = self.span();
        if self.at(TokenKind::Colon) {
            return self.parse_slice_tail(start, None);
        }
        let first = self.parse_star_or_expression();
        if self.at(TokenKind::Colon) {
            return self.parse_slice_tail(start, Some(first));
        }
        first
    }

    fn parse_slice_tail(&mut self, start: Span, lower: Option<NodeIndex>) -> NodeIndex {
        self.advance(); // ':'
        let upper = if matches!(self.kind(), TokenKind::Colon | TokenKind::RBracket | TokenKind::Comma) { None } else { Some(self.parse_expression()) };
        let step = if self.eat(TokenKind::Colon) {
            if matches!(self.kind(), TokenKind::RBracket | TokenKind::Comma) { None } else { Some(self.parse_expression()) }
        } else {
            None
        };
        self.arena.alloc(Node::Slice { lower, upper, step }, start.merge(self.span()))
    }

    fn parse_atom(&mut self) -> NodeIndex {
        let start = self.span();
        match self.kind() {
            TokenKind::Number => {
                let tok = self.advance();
                let text = tok.span.slice(self.source).to_string();
                let kind = tok.numeric_kind.unwrap_or(pyrite_common::numeric::NumericKind::Int);
                self.arena.alloc(Node::NumberLiteral { kind, text }, start)
            }
            TokenKind::String | TokenKind::FString => self.parse_string_literal_run(),
            TokenKind::KwTrue => {
                self.advance();
                self.arena.alloc(Node::BoolLiteral(true), start)
            }
            TokenKind::KwFalse => {
                self.advance();
                self.arena.alloc(Node::BoolLiteral(false), start)
            }
            TokenKind::KwNone => {
                self.advance();
                self.arena.alloc(Node::NoneLiteral, start)
            }
            TokenKind::Ellipsis => {
                self.advance();
                self.arena.alloc(Node::EllipsisLiteral, start)
            }
            TokenKind::Name | TokenKind::SoftKwMatch | TokenKind::SoftKwCase | TokenKind::SoftKwUnderscore | TokenKind::SoftKwType => {
                let tok = self.advance();
                self.arena.alloc(Node::Name { id: self.text(&tok).to_string() }, start)
            }
            TokenKind::KwYield => self.parse_yield(),
            TokenKind::LParen => self.parse_paren_group(),
            TokenKind::LBracket => self.parse_list_or_listcomp(),
            TokenKind::LBrace => self.parse_dict_or_set(),
            TokenKind::Star => {
                self.advance();
                let value = self.parse_or_expr();
                self.arena.alloc(Node::Starred { value }, start.merge(self.arena.span(value)))
            }
            _ => {
                self.error("expected an expression");
                // Always consume the offending token: every caller up the
                // expression chain just returns this node without advancing
                // itself, so skipping the `advance()` here would leave the
                // statement loop stuck re-parsing the same token forever.
                if !self.at(TokenKind::EndOfFile) {
                    self.advance();
                }
                self.arena.alloc(Node::Error, start)
            }
        }
    }

    fn parse_yield(&mut self) -> NodeIndex {
        let start = self.span();
        self.advance(); // yield
        if self.eat(TokenKind::KwFrom) {
            let value = self.parse_expression();
            return self.arena.alloc(Node::YieldFrom { value }, start.merge(self.arena.span(value)));
        }
        let value = if matches!(self.kind(), TokenKind::Newline | TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace | TokenKind::EndOfFile | TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression_list_as_tuple())
        };
        self.arena.alloc(Node::Yield { value }, start.merge(self.span()))
    }

    fn parse_paren_group(&mut self) -> NodeIndex {
        let start = self.span();
        self.advance(); // (
        if self.eat(TokenKind::RParen) {
            return self.arena.alloc(Node::TupleExpr { elements: Vec::new() }, start.merge(self.span()));
        }
        if self.at(TokenKind::KwYield) {
            let yield_expr = self.parse_yield();
            self.expect(TokenKind::RParen, "')'");
            return yield_expr;
        }
        let first = self.parse_named_expr_or_star();
        if matches!(self.kind(), TokenKind::KwFor) || (self.at(TokenKind::KwAsync) && self.tokens.get(self.pos + 1).map(|t| t.kind) == Some(TokenKind::KwFor)) {
            let generators = self.parse_comprehension_generators();
            self.expect(TokenKind::RParen, "')'");
            return self.arena.alloc(Node::Comprehension { element: first, value_for_dict: None, kind: ComprehensionKind::Generator, generators }, start.merge(self.span()));
        }
        if self.at(TokenKind::Comma) {
            let mut elements = vec![first];
            while self.eat(TokenKind::Comma) {
                if self.at(TokenKind::RParen) {
                    break;
                }
                elements.push(self.parse_named_expr_or_star());
            }
            self.expect(TokenKind::RParen, "')'");
            return self.arena.alloc(Node::TupleExpr { elements }, start.merge(self.span()));
        }
        self.expect(TokenKind::RParen, "')'");
        first
    }

    fn parse_named_expr_or_star(&mut self) -> NodeIndex {
        if self.at(TokenKind::Star) {
            return self.parse_star_or_expression();
        }
        self.parse_named_expr_or_expression()
    }

    fn parse_list_or_listcomp(&mut self) -> NodeIndex {
        let start = self.span();
        self.advance(); // [
        if self.eat(TokenKind::RBracket) {
            return self.arena.alloc(Node::ListExpr { elements: Vec::new() }, start.merge(self.span()));
        }
        let first = self.parse_star_or_expression();
        if matches!(self.kind(), TokenKind::KwFor) || (self.at(TokenKind::KwAsync) && self.tokens.get(self.pos + 1).map(|t| t.kind) == Some(TokenKind::KwFor)) {
            let generators = self.parse_comprehension_generators();
            self.expect(TokenKind::RBracket, "']'");
            return self.arena.alloc(Node::Comprehension { element: first, value_for_dict: None, kind: ComprehensionKind::List, generators }, start.merge(self.span()));
        }
        let mut elements = vec![first];
        while self.eat(TokenKind::Comma) {
            if self.at(TokenKind::RBracket) {
                break;
            }
            elements.push(self.parse_star_or_expression());
        }
        self.expect(TokenKind::RBracket, "']'");
        self.arena.alloc(Node::ListExpr { elements }, start.merge(self.span()))
    }

    fn parse_dict_or_set(&mut self) -> NodeIndex {
        let start = self.span();
        self.advance(); // {
        if self.eat(TokenKind::RBrace) {
            return self.arena.alloc(Node::DictExpr { keys: Vec::new(), values: Vec::new() }, start.merge(self.span()));
        }
        if self.eat(TokenKind::DoubleStar) {
            // Dict unpacking `{**a, ...}`: key slot stays `None`.
            let value = self.parse_or_expr();
            let mut keys = vec![None];
            let mut values = vec![value];
            while self.eat(TokenKind::Comma) {
                if self.at(TokenKind::RBrace) {
                    break;
                }
                if self.eat(TokenKind::DoubleStar) {
                    keys.push(None);
                    values.push(self.parse_or_expr());
                } else {
                    let k = self.parse_expression();
                    self.expect(TokenKind::Colon, "':'");
                    keys.push(Some(k));
                    values.push(self.parse_expression());
                }
            }
            self.expect(TokenKind::RBrace, "'}'");
            return self.arena.alloc(Node::DictExpr { keys, values }, start.merge(self.span()));
        }

        let first = self.parse_star_or_expression();
        if self.eat(TokenKind::Colon) {
            let first_value = self.parse_expression();
            if matches!(self.kind(), TokenKind::KwFor) || (self.at(TokenKind::KwAsync) && self.tokens.get(self.pos + 1).map(|t| t.kind) == Some(TokenKind::KwFor)) {
                let generators = self.parse_comprehension_generators();
                self.expect(TokenKind::RBrace, "'}'");
                return self.arena.alloc(Node::Comprehension { element: first, value_for_dict: Some(first_value), kind: ComprehensionKind::Dict, generators }, start.merge(self.span()));
            }
            let mut keys = vec![Some(first)];
            let mut values = vec![first_value];
            while self.eat(TokenKind::Comma) {
                if self.at(TokenKind::RBrace) {
                    break;
                }
                if self.eat(TokenKind::DoubleStar) {
                    keys.push(None);
                    values.push(self.parse_or_expr());
                    continue;
                }
                let k = self.parse_expression();
                self.expect(TokenKind::Colon, "':'");
                keys.push(Some(k));
                values.push(self.parse_expression());
            }
            self.expect(TokenKind::RBrace, "'}'");
            return self.arena.alloc(Node::DictExpr { keys, values }, start.merge(self.span()));
        }

        if matches!(self.kind(), TokenKind::KwFor) || (self.at(TokenKind::KwAsync) && self.tokens.get(self.pos + 1).map(|t| t.kind) == Some(TokenKind::KwFor)) {
            let generators = self.parse_comprehension_generators();
            self.expect(TokenKind::RBrace, "'}'");
            return self.arena.alloc(Node::Comprehension { element: first, value_for_dict: None, kind: ComprehensionKind::Set, generators }, start.merge(self.span()));
        }

        let mut elements = vec![first];
        while self.eat(TokenKind::Comma) {
            if self.at(TokenKind::RBrace) {
                break;
            }
            elements.push(self.parse_star_or_expression());
        }
        self.expect(TokenKind::RBrace, "'}'");
        self.arena.alloc(Node::SetExpr { elements }, start.merge(self.span()))
    }

    /// Adjacent string literals implicitly concatenate
    /// (`"a" "b"` == `"ab"`); f-strings in the run are parsed with inner
    /// expressions re-entered into a nested scanner/parser over the
    /// f-string's own token range.
    fn parse_string_literal_run(&mut self) -> NodeIndex {
        let start = self.span();
        let mut literal_text = String::new();
        let mut fstring_parts: Vec<FStringPart> = Vec::new();
        let mut is_fstring = false;
        let mut is_bytes = false;
        let mut end_span = start;

        while matches!(self.kind(), TokenKind::String | TokenKind::FString) {
            let tok = self.advance();
            end_span = tok.span;
            let prefix = tok.string_prefix.unwrap_or_default();
            let (quote_len, inner) = strip_string_delimiters(tok.span.slice(self.source));
            if prefix.fstring {
                is_fstring = true;
                let inner_offset = tok.span.start + quote_len;
                fstring_parts.extend(self.parse_fstring_parts(inner, inner_offset));
            } else {
                is_bytes |= prefix.bytes;
                literal_text.push_str(inner);
            }
        }

        let span = start.merge(end_span);
        if is_fstring {
            if !literal_text.is_empty() {
                fstring_parts.insert(0, FStringPart::Literal(literal_text));
            }
            self.arena.alloc(Node::FStringLiteral { parts: fstring_parts }, span)
        } else {
            self.arena.alloc(Node::StringLiteral { value: literal_text, is_bytes }, span)
        }
    }

    fn parse_fstring_parts(&mut self, inner: &'a str, inner_offset: u32) -> Vec<FStringPart> {
        let mut parts = Vec::new();
        let mut literal_start = 0usize;
        let spans = fstring_expression_spans(inner, 0);
        for expr_span in spans {
            let lit_end = expr_span.start as usize - 1; // exclude the '{'
            if lit_end > literal_start {
                parts.push(FStringPart::Literal(inner[literal_start..lit_end].to_string()));
            }
            let expr_text = expr_span.slice(inner);
            let (expr_only, format_spec) = split_format_spec(expr_text);
            let sub_dialect = self.dialect;
            let sub = parse(expr_only, self.file, sub_dialect);
            let value = self.graft(sub.arena, sub.root, sub.diagnostics, inner_offset + expr_span.start);
            parts.push(FStringPart::Expr { value, format_spec, conversion: None });
            literal_start = expr_span.end as usize + 1; // skip the '}'
        }
        if literal_start < inner.len() {
            parts.push(FStringPart::Literal(inner[literal_start..].to_string()));
        }
        parts
    }

    /// Splice a sub-parse (from an f-string interpolation, parsed as its
    /// own tiny `Module`) into this parser's arena, offsetting every span
    /// by where the interpolation sits in the outer file.
    fn graft(&mut self, mut sub_arena: NodeArena, sub_root: NodeIndex, sub_diagnostics: Vec<Diagnostic>, offset: u32) -> NodeIndex {
        self.diagnostics.extend(sub_diagnostics.into_iter().map(|mut d| {
            d.span = Span::new(d.span.start + offset, d.span.end + offset);
            for related in &mut d.related_information {
                related.span = Span::new(related.span.start + offset, related.span.end + offset);
            }
            d
        }));
        let Node::Module { body } = sub_arena.get(sub_root).clone() else {
            return self.arena.alloc(Node::Error, Span::at(offset));
        };
        let Some(first_stmt) = body.first().copied() else {
            return self.arena.alloc(Node::Error, Span::at(offset));
        };
        let Node::ExprStatement { value } = sub_arena.get(first_stmt).clone() else {
            return self.arena.alloc(Node::Error, Span::at(offset));
        };
        self.copy_node(&mut sub_arena, value, offset)
    }

    fn copy_node(&mut self, sub_arena: &mut NodeArena, index: NodeIndex, offset: u32) -> NodeIndex {
        // The sub-parser's arena only ever holds one small expression tree
        // for an f-string interpolation, so a direct span-shifted re-alloc
        // (rather than a generic arena-merge utility) keeps this simple.
        let node = sub_arena.get(index).clone();
        let span = sub_arena.span(index);
        let shifted_span = Span::new(span.start + offset, span.end + offset);
        let remapped = remap_children(node, sub_arena, self, offset);
        self.arena.alloc(remapped, shifted_span)
    }
}

fn remap_children(node: Node, sub_arena: &mut NodeArena, parser: &mut Parser<'_>, offset: u32) -> Node {
    // Re-home every child index by recursively copying it into the host
    // arena first, then rewriting this node's fields to point at the
    // fresh indices.
    let mut mapped: std::collections::HashMap<NodeIndex, NodeIndex> = std::collections::HashMap::new();
    for child in node.children() {
        let new_child = parser.copy_node(sub_arena, child, offset);
        mapped.insert(child, new_child);
    }
    remap_node_fields(node, &mapped)
}

/// f-string interpolations only ever hold an *expression* (never a
/// statement, pattern, or module), so this only needs to cover the
/// expression half of [`Node`] — the rest pass through `grafted_leaf`
/// below and are never produced by `parse_expression`.
fn remap_node_fields(node: Node, mapped: &std::collections::HashMap<NodeIndex, NodeIndex>) -> Node {
    let m = |idx: NodeIndex| -> NodeIndex { *mapped.get(&idx).unwrap_or(&idx) };
    let m_opt = |idx: Option<NodeIndex>| -> Option<NodeIndex> { idx.map(&m) };
    let m_vec = |v: Vec<NodeIndex>| -> Vec<NodeIndex> { v.into_iter().map(&m).collect() };
    match node {
        Node::BinOpExpr { left, op, right } => Node::BinOpExpr { left: m(left), op, right: m(right) },
        Node::UnaryOpExpr { op, operand } => Node::UnaryOpExpr { op, operand: m(operand) },
        Node::BoolOpExpr { op, values } => Node::BoolOpExpr { op, values: m_vec(values) },
        Node::Attribute { value, attr } => Node::Attribute { value: m(value), attr },
        Node::Subscript { value, slice } => Node::Subscript { value: m(value), slice: m(slice) },
        Node::Slice { lower, upper, step } => Node::Slice { lower: m_opt(lower), upper: m_opt(upper), step: m_opt(step) },
        Node::Call { func, args, keywords } => Node::Call { func: m(func), args: m_vec(args), keywords: keywords.into_iter().map(|(k, v)| (k, m(v))).collect() },
        Node::Name { id } => Node::Name { id },
        Node::NumberLiteral { kind, text } => Node::NumberLiteral { kind, text },
        Node::StringLiteral { value, is_bytes } => Node::StringLiteral { value, is_bytes },
        Node::FStringLiteral { parts } => Node::FStringLiteral {
            parts: parts
                .into_iter()
                .map(|p| match p {
                    FStringPart::Literal(s) => FStringPart::Literal(s),
                    FStringPart::Expr { value, format_spec, conversion } => FStringPart::Expr { value: m(value), format_spec, conversion },
                })
                .collect(),
        },
        Node::BoolLiteral(b) => Node::BoolLiteral(b),
        Node::NoneLiteral => Node::NoneLiteral,
        Node::EllipsisLiteral => Node::EllipsisLiteral,
        Node::Starred { value } => Node::Starred { value: m(value) },
        Node::Compare { left, ops, comparators } => Node::Compare { left: m(left), ops, comparators: m_vec(comparators) },
        Node::TupleExpr { elements } => Node::TupleExpr { elements: m_vec(elements) },
        Node::ListExpr { elements } => Node::ListExpr { elements: m_vec(elements) },
        Node::SetExpr { elements } => Node::SetExpr { elements: m_vec(elements) },
        Node::DictExpr { keys, values } => Node::DictExpr { keys: keys.into_iter().map(m_opt).collect(), values: m_vec(values) },
        Node::IfExpr { test, body, or_else } => Node::IfExpr { test: m(test), body: m(body), or_else: m(or_else) },
        Node::LambdaExpr { params, body } => Node::LambdaExpr {
            params: params.into_iter().map(|p| Param { default: m_opt(p.default), annotation: m_opt(p.annotation), ..p }).collect(),
            body: m(body),
        },
        Node::NamedExpr { target, value } => Node::NamedExpr { target: m(target), value: m(value) },
        Node::Await { value } => Node::Await { value: m(value) },
        Node::Yield { value } => Node::Yield { value: m_opt(value) },
        Node::YieldFrom { value } => Node::YieldFrom { value: m(value) },
        Node::Comprehension { element, value_for_dict, kind, generators } => Node::Comprehension {
            element: m(element),
            value_for_dict: m_opt(value_for_dict),
            kind,
            generators: generators
                .into_iter()
                .map(|g| ComprehensionGenerator { is_async: g.is_async, target: m(g.target), iter: m(g.iter), ifs: m_vec(g.ifs) })
                .collect(),
        },
        other => other,
    }
}

/// Strip the string's prefix letters and quote delimiters, returning
/// (quote-and-prefix byte length up to the content start, content slice).
/// Assumes the string is well-formed enough to have matching open quotes —
/// an unterminated literal's inner slice just runs to the literal's end.
fn strip_string_delimiters(text: &str) -> (u32, &str) {
    let quote_start = text.find(['\'', '"']).unwrap_or(0);
    let bytes = text.as_bytes();
    let triple = bytes.len() >= quote_start + 3 && bytes[quote_start] == bytes[quote_start + 1] && bytes[quote_start + 1] == bytes[quote_start + 2];
    let open_len = if triple { 3 } else { 1 };
    let content_start = quote_start + open_len;
    let content_end = text.len().saturating_sub(open_len).max(content_start);
    (u32::try_from(content_start).unwrap_or(0), text.get(content_start..content_end).unwrap_or(""))
}

/// Split `expr!r:>10` into its expression and optional `:format_spec` tail.
/// Conversion (`!r`/`!s`/`!a`) is dropped from the expression text but not
/// yet modeled as a separate field beyond `FStringPart::Expr::conversion`.
fn split_format_spec(text: &str) -> (&str, Option<String>) {
    match text.find(':') {
        Some(idx) => (&text[..idx], Some(text[idx + 1..].to_string())),
        None => (text, None),
    }
}

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod tests;
