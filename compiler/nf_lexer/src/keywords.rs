//! Keyword table.
//!
//! Words are scanned as a maximal identifier run first and classified here,
//! so `importer` stays an identifier while `import` is a keyword.

use nf_ir::TokenKind;

/// Classify a scanned word; `None` means a plain identifier.
#[inline]
pub(crate) fn lookup(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "import" => TokenKind::Import,
        "type" => TokenKind::Type,
        "task" => TokenKind::Task,
        "as" => TokenKind::As,
        "run" => TokenKind::Run,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "switch" => TokenKind::Switch,
        "case" => TokenKind::Case,
        "default" => TokenKind::Default,
        "while" => TokenKind::While,
        "do" => TokenKind::Do,
        "for" => TokenKind::For,
        "in" => TokenKind::In,
        "export" => TokenKind::Export,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "break" => TokenKind::Break,
        "breakall" => TokenKind::BreakAll,
        "continue" => TokenKind::Continue,
        "echo" => TokenKind::Echo,
        "new" => TokenKind::New,
        "fun" => TokenKind::Fun,
        "return" => TokenKind::Return,
        "var" => TokenKind::Var,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests;
