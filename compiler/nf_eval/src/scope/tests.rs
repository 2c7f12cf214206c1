#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn alloc_and_get() {
    let (mut arena, root) = ScopeArena::with_root();
    let child = arena.alloc(Some(root), ScopeKind::Loop).unwrap();
    assert_eq!(arena.get(child).unwrap().parent, Some(root));
    assert_eq!(arena.get(child).unwrap().kind, ScopeKind::Loop);
    assert_eq!(arena.live_count(), 2);
}

#[test]
fn removed_handle_is_stale_even_after_slot_reuse() {
    let (mut arena, root) = ScopeArena::with_root();
    let first = arena.alloc(Some(root), ScopeKind::Block).unwrap();
    arena.remove(first).unwrap();
    assert_eq!(arena.get(first).unwrap_err(), ScopeError::Stale(first));

    let second = arena.alloc(Some(root), ScopeKind::Block).unwrap();
    assert_eq!(second.index(), first.index());
    assert_ne!(second.generation(), first.generation());
    assert!(arena.contains(second));
    assert!(!arena.contains(first));
    assert_eq!(arena.remove(first).unwrap_err(), ScopeError::Stale(first));
}

#[test]
fn remove_drops_variables() {
    let (mut arena, root) = ScopeArena::with_root();
    let child = arena.alloc(Some(root), ScopeKind::Block).unwrap();
    arena
        .get_mut(child)
        .unwrap()
        .variables
        .insert("x".into(), Binding::new(Value::Int(1)));
    arena.remove(child).unwrap();
    let reused = arena.alloc(Some(root), ScopeKind::Block).unwrap();
    assert!(arena.get(reused).unwrap().variables.is_empty());
}

#[test]
fn cleared_arena_rejects_everything() {
    let (mut arena, root) = ScopeArena::with_root();
    let child = arena.alloc(Some(root), ScopeKind::Block).unwrap();
    arena.clear();
    assert!(arena.is_cleared());
    assert_eq!(arena.get(root).unwrap_err(), ScopeError::Cleared);
    assert_eq!(arena.get_mut(child).unwrap_err(), ScopeError::Cleared);
    assert_eq!(
        arena.alloc(None, ScopeKind::Global).unwrap_err(),
        ScopeError::Cleared
    );
    assert_eq!(arena.live_count(), 0);
}

#[test]
fn error_codes() {
    let (_, root) = ScopeArena::with_root();
    assert_eq!(ScopeError::Cleared.code(), nf_diagnostic::ErrorCode::E2001);
    assert_eq!(ScopeError::Stale(root).code(), nf_diagnostic::ErrorCode::E2002);
    assert_eq!(ScopeError::Stale(root).to_string(), "scope#0.0 is no longer valid");
}

#[test]
fn binding_knows_function_references() {
    assert!(!Binding::new(Value::Int(1)).is_function_reference());
    assert!(Binding::typed(Value::Null, nf_ir::TypeRef::plain("Integer"))
        .declared
        .is_some());
}
