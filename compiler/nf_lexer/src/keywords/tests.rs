use super::*;
use pretty_assertions::assert_eq;

#[test]
fn keywords_resolve() {
    assert_eq!(lookup("breakall"), Some(TokenKind::BreakAll));
    assert_eq!(lookup("break"), Some(TokenKind::Break));
    assert_eq!(lookup("fun"), Some(TokenKind::Fun));
    assert_eq!(lookup("true"), Some(TokenKind::True));
}

#[test]
fn near_misses_are_identifiers() {
    for word in ["importer", "Fun", "If", "breakAll", "$params", "_run"] {
        assert_eq!(lookup(word), None, "{word}");
    }
}
