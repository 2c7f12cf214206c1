use super::*;
use pretty_assertions::assert_eq;

#[test]
fn comments_are_kept_apart() {
    let mut list = TokenList::new();
    list.push(Token::new(TokenKind::Ident, "x", 1));
    list.push(Token::new(TokenKind::Comment, "// note", 1));
    list.push(Token::new(TokenKind::LineEnd, "", 1));

    assert_eq!(list.kinds(), vec![TokenKind::Ident, TokenKind::LineEnd]);
    assert_eq!(list.comments().len(), 1);
    assert_eq!(&*list.comments()[0].text, "// note");
}

#[test]
fn token_debug_shows_kind_text_and_line() {
    let token = Token::new(TokenKind::Int, "42", 3);
    assert_eq!(format!("{token:?}"), "Int(\"42\")@3");
}

#[test]
fn display_name_for_multi_char_operators() {
    assert_eq!(TokenKind::Range.to_string(), "..");
    assert_eq!(TokenKind::Arrow.to_string(), "->");
    assert_eq!(TokenKind::BreakAll.to_string(), "breakall");
}
