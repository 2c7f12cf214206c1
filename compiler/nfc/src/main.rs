//! NF script runner CLI.

use nf_diagnostic::emitter::ColorMode;
use nfc::commands::{lex_file, parse_file, run_file, RunArgs};

fn main() {
    nfc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let run_args = parse_run_args(&args[2..]);
            run_file(run_args);
        }
        "lex" => {
            let (path, color) = parse_path_and_color(&args[2..], "lex");
            lex_file(&path, color);
        }
        "parse" => {
            let (path, color) = parse_path_and_color(&args[2..], "parse");
            parse_file(&path, color);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("NF {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare script path runs it
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("nf"))
            {
                run_file(parse_run_args(&args[1..]));
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn parse_color(arg: &str) -> Option<ColorMode> {
    let mode = arg.strip_prefix("--color=")?;
    let Some(mode) = ColorMode::parse(mode) else {
        eprintln!("error: invalid color mode '{mode}' (expected auto, always or never)");
        std::process::exit(1);
    };
    Some(mode)
}

fn parse_run_args(args: &[String]) -> RunArgs {
    let mut run_args = RunArgs::default();
    let mut path = None;
    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if arg == "--param" || arg == "-p" {
            let Some(param) = args.get(i + 1) else {
                eprintln!("error: --param needs a key=value argument");
                std::process::exit(1);
            };
            insert_param(&mut run_args, param);
            i += 2;
            continue;
        }
        if arg == "--script" || arg == "-s" {
            let Some(script) = args.get(i + 1) else {
                eprintln!("error: --script needs a [name=]path argument");
                std::process::exit(1);
            };
            insert_script(&mut run_args, script);
            i += 2;
            continue;
        }
        if let Some(param) = arg.strip_prefix("--param=") {
            insert_param(&mut run_args, param);
        } else if let Some(script) = arg.strip_prefix("--script=") {
            insert_script(&mut run_args, script);
        } else if let Some(color) = parse_color(arg) {
            run_args.color = color;
        } else if !arg.starts_with('-') && path.is_none() {
            path = Some(arg.clone());
        } else {
            eprintln!("warning: ignoring argument '{arg}'");
        }
        i += 1;
    }
    let Some(path) = path else {
        eprintln!("error: missing file path");
        eprintln!(
            "Usage: nf run <file.nf> [--param key=value]... [--script [name=]path]... \
             [--color=auto|always|never]"
        );
        std::process::exit(1);
    };
    run_args.path = path;
    run_args
}

fn insert_param(run_args: &mut RunArgs, param: &str) {
    let Some((key, value)) = nfc::parse_param(param) else {
        eprintln!("error: invalid parameter '{param}' (expected key=value)");
        std::process::exit(1);
    };
    run_args.params.insert(key, value);
}

fn insert_script(run_args: &mut RunArgs, script: &str) {
    let Some(script) = nfc::parse_script_arg(script) else {
        eprintln!("error: invalid script '{script}' (expected [name=]path)");
        std::process::exit(1);
    };
    run_args.scripts.push(script);
}

fn parse_path_and_color(args: &[String], command: &str) -> (String, ColorMode) {
    let mut color = ColorMode::default();
    let mut path = None;
    for arg in args {
        if let Some(mode) = parse_color(arg) {
            color = mode;
        } else if !arg.starts_with('-') && path.is_none() {
            path = Some(arg.clone());
        }
    }
    let Some(path) = path else {
        eprintln!("Usage: nf {command} <file.nf>");
        std::process::exit(1);
    };
    (path, color)
}

fn print_usage() {
    println!("NF script runner");
    println!();
    println!("Usage: nf <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.nf>        Run a script and print its export");
    println!("  lex <file.nf>        Tokenize and display tokens");
    println!("  parse <file.nf>      Build and display the node outline");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --param, -p <k=v>    Bind a value in the script's `$params` map");
    println!("  --script, -s <path>  Make a script importable with `import nf`;");
    println!("                       `name=path` picks the name, else the file stem");
    println!("  --color=<mode>       Diagnostic colors: auto, always, never");
    println!();
    println!("Logging:");
    println!("  NF_LOG=<filter>      Enable tracing output, e.g. NF_LOG=nf_eval=debug");
    println!("  NF_LOG_TREE=1        Show tracing output as an indented span tree");
}
