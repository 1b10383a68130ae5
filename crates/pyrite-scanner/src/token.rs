//! Token kinds and the `Token` value produced by [`crate::scanner::Scanner::scan`].

use pyrite_common::numeric::NumericKind;
use pyrite_common::span::Span;

/// Every distinct kind of token the scanner can produce.
///
/// `Indent`/`Dedent`/`Newline` are synthesized from whitespace rather than
/// read literally off the source the way a punctuation token is; they only
/// appear outside of bracketed (`(`, `[`, `{`) contexts, matching Python's
/// implicit line-joining rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    EndOfFile,
    Newline,
    Indent,
    Dedent,
    Name,
    Number,
    String,
    /// An entire f-string literal, delimiters and all — the scanner never
    /// splits it into separate literal/expression tokens the way CPython's
    /// own tokenizer does for nested f-strings; the parser re-derives the
    /// `{expr}` boundaries itself from this token's source text
    /// (`Parser::parse_fstring_parts`) rather than consuming a token
    /// stream the scanner interleaved for it.
    FString,
    Comment,

    // Keywords
    KwFalse,
    KwNone,
    KwTrue,
    KwAnd,
    KwAs,
    KwAssert,
    KwAsync,
    KwAwait,
    KwBreak,
    KwClass,
    KwContinue,
    KwDef,
    KwDel,
    KwElif,
    KwElse,
    KwExcept,
    KwFinally,
    KwFor,
    KwFrom,
    KwGlobal,
    KwIf,
    KwImport,
    KwIn,
    KwIs,
    KwLambda,
    KwNonlocal,
    KwNot,
    KwOr,
    KwPass,
    KwRaise,
    KwReturn,
    KwTry,
    KwWhile,
    KwWith,
    KwYield,
    /// `match`/`case` are soft keywords: identifiers everywhere except when
    /// the parser recognizes a match-statement context.
    SoftKwMatch,
    SoftKwCase,
    SoftKwUnderscore,
    SoftKwType,

    // Operators and delimiters
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    At,
    Amp,
    Pipe,
    Caret,
    Tilde,
    LtLt,
    GtGt,
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    NotEq,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Dot,
    Ellipsis,
    Semicolon,
    Eq,
    Arrow,
    Walrus,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    DoubleSlashEq,
    PercentEq,
    AtEq,
    AmpEq,
    PipeEq,
    CaretEq,
    LtLtEq,
    GtGtEq,
    DoubleStarEq,

    /// Lexical error recovery: the scanner could not classify the text at
    /// this position (e.g. a stray `$`).
    Unknown,
}

impl TokenKind {
    /// Keyword lookup, used by the scanner once it has scanned a name.
    #[must_use]
    pub fn keyword_for(text: &str) -> Option<Self> {
        Some(match text {
            "False" => Self::KwFalse,
            "None" => Self::KwNone,
            "True" => Self::KwTrue,
            "and" => Self::KwAnd,
            "as" => Self::KwAs,
            "assert" => Self::KwAssert,
            "async" => Self::KwAsync,
            "await" => Self::KwAwait,
            "break" => Self::KwBreak,
            "class" => Self::KwClass,
            "continue" => Self::KwContinue,
            "def" => Self::KwDef,
            "del" => Self::KwDel,
            "elif" => Self::KwElif,
            "else" => Self::KwElse,
            "except" => Self::KwExcept,
            "finally" => Self::KwFinally,
            "for" => Self::KwFor,
            "from" => Self::KwFrom,
            "global" => Self::KwGlobal,
            "if" => Self::KwIf,
            "import" => Self::KwImport,
            "in" => Self::KwIn,
            "is" => Self::KwIs,
            "lambda" => Self::KwLambda,
            "nonlocal" => Self::KwNonlocal,
            "not" => Self::KwNot,
            "or" => Self::KwOr,
            "pass" => Self::KwPass,
            "raise" => Self::KwRaise,
            "return" => Self::KwReturn,
            "try" => Self::KwTry,
            "while" => Self::KwWhile,
            "with" => Self::KwWith,
            "yield" => Self::KwYield,
            _ => return None,
        })
    }

    /// Soft keywords remain `Name` tokens at the lexical level; the parser
    /// asks this only when it is in a grammar position where the word would
    /// be treated specially (start of a statement, a `case` pattern, ...).
    #[must_use]
    pub fn soft_keyword_for(text: &str) -> Option<Self> {
        Some(match text {
            "match" => Self::SoftKwMatch,
            "case" => Self::SoftKwCase,
            "_" => Self::SoftKwUnderscore,
            "type" => Self::SoftKwType,
            _ => return None,
        })
    }
}

/// String literal prefix flags (`r`, `b`, `u`, `f`), parsed once by the
/// scanner so the parser and binder never re-derive them from raw text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StringPrefix {
    pub raw: bool,
    pub bytes: bool,
    pub fstring: bool,
}

impl StringPrefix {
    #[must_use]
    pub fn parse(prefix: &str) -> Option<Self> {
        let mut flags = StringPrefix::default();
        for ch in prefix.chars() {
            match ch.to_ascii_lowercase() {
                'r' => flags.raw = true,
                'b' => flags.bytes = true,
                'u' => {}
                'f' => flags.fstring = true,
                _ => return None,
            }
        }
        if flags.bytes && flags.fstring {
            return None;
        }
        Some(flags)
    }
}

/// One scanned token: its kind, its span, and any payload the parser needs
/// without re-slicing the source text (numeric kind, string prefix flags).
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub numeric_kind: Option<NumericKind>,
    pub string_prefix: Option<StringPrefix>,
    /// Set on `Indent`/`Dedent` to the new/old column depth, and on
    /// unterminated strings/comments to flag recovery to the checker.
    pub unterminated: bool,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            numeric_kind: None,
            string_prefix: None,
            unterminated: false,
        }
    }
}
