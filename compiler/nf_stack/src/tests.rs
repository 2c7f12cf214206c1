use super::*;

/// Mimics the interpreter walking `depth` nested blocks.
fn nested_blocks(depth: u32) -> Result<u32, String> {
    ensure_sufficient_stack(|| {
        if depth == 0 {
            Ok(0)
        } else {
            nested_blocks(depth - 1).map(|inner| inner + 1)
        }
    })
}

#[test]
fn shallow_nesting() {
    assert_eq!(nested_blocks(8), Ok(8));
}

#[test]
fn deep_nesting_grows_the_stack() {
    assert_eq!(nested_blocks(200_000), Ok(200_000));
}

#[test]
fn passes_errors_through() {
    let result: Result<u32, String> = ensure_sufficient_stack(|| Err("stale scope".to_string()));
    assert_eq!(result, Err("stale scope".to_string()));
}
