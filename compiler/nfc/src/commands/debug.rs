//! Debug commands: `lex` and `parse` for inspecting the front end.

use nf_diagnostic::emitter::ColorMode;

use super::{read_file, report_and_exit};
use crate::Problem;

/// Lex a file and display the token stream.
pub fn lex_file(path: &str, color: ColorMode) {
    let source = read_file(path);
    let tokens = match nf_lexer::lex(&source) {
        Ok(tokens) => tokens,
        Err(err) => report_and_exit(&Problem::from(err), &source, path, color),
    };

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in tokens.iter() {
        println!("  {token:?}");
    }
    if !tokens.comments().is_empty() {
        println!();
        println!("Comments: {}", tokens.comments().len());
    }
}

/// Build a file and display the node outline.
pub fn parse_file(path: &str, color: ColorMode) {
    let source = read_file(path);
    let program = match nf_lexer::lex(&source)
        .map_err(Problem::from)
        .and_then(|tokens| nf_parse::parse(&tokens).map_err(Problem::from))
    {
        Ok(program) => program,
        Err(problem) => report_and_exit(&problem, &source, path, color),
    };

    println!("Nodes for '{}' ({} top-level):", path, program.nodes.len());
    print!("{}", program.outline());
}
