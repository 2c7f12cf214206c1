//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived scanner output. It still contains
//! the shapes that are only there to be rejected (`!`, `&`, a lone
//! backslash...), so that the cooking pass in `lib.rs` can report them with
//! a precise error instead of a generic "unrecognized input".

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")] // Skip horizontal whitespace
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*")]
    Comment,

    #[token("\n")]
    Newline,
    #[token(";")]
    Semicolon,

    /// Identifier or keyword; classified by `keywords::lookup`.
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Word,

    #[regex(r"[0-9]+")]
    Int,
    #[regex(r"[0-9]+\.[0-9]+")]
    Float,

    #[regex(r#""[^"]*""#)]
    DoubleQuoted,
    #[regex(r"'[^']*'")]
    SingleQuoted,
    #[regex(r#""[^"]*"#)]
    UnterminatedDouble,
    #[regex(r"'[^']*")]
    UnterminatedSingle,

    #[regex(r"```([^`]|`[^`]|``[^`])*```")]
    Template,
    /// An opening fence with no closing one before end of input.
    #[regex(r"```([^`]|`[^`]|``[^`])*")]
    UnterminatedTemplate,
    #[token("`")]
    Backtick,

    #[token("==")]
    EqEq,
    #[token("=")]
    Assign,
    #[token("!=")]
    NotEq,
    #[token("!")]
    Bang,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token("->")]
    Arrow,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("...")]
    Ellipsis,
    #[token("..")]
    DotDot,
    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("&&")]
    AndAnd,
    #[token("&")]
    Amp,
    #[token("||")]
    OrOr,
    #[token("|")]
    Pipe,

    #[token("\\n")]
    NewlineMarker,
    #[token("\\t")]
    TabMarker,
    #[token("\\")]
    Backslash,
}
