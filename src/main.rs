use std::{
    env,
    error::Error,
    fs,
    path::{Path, PathBuf},
    process,
    time::Instant,
};

use fcc::{display_error, emitter::emitter::Emitter, lexer::lexer::Lexer, transpile};
use log::{error, info, LevelFilter};

static USAGE: &str = r#"
usage: fcc FILE [-o OUTPUT] [-v]

options:
    -o OUTPUT   Write the generated C here (default: FILE with a .c extension)
    -v          Trace every grammar rule

examples:
    fcc hello.fc
    fcc hello.fc -o build/hello.c
"#;

struct Args {
    input: PathBuf,
    output: PathBuf,
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let Some(args) = parse_args(env::args().skip(1)) else {
        print_usage();
        // FreeBSD EX_USAGE (64)
        process::exit(64)
    };

    let level = if args.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .env()
        .init()?;

    let start = Instant::now();
    let source = fs::read_to_string(&args.input)?;

    let lexer = Lexer::new(source.clone(), Some(file_name(&args.input)));
    let mut emitter = Emitter::new(&args.output);

    if let Err(err) = transpile(lexer, &mut emitter) {
        error!("{} failed to compile", args.input.display());
        display_error(&err, &source);
        process::exit(1)
    }

    emitter.write_file()?;
    info!(
        "compiled {} to {} in {:?}",
        args.input.display(),
        args.output.display(),
        start.elapsed()
    );

    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Option<Args> {
    let mut input = None;
    let mut output = None;
    let mut verbose = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" => output = Some(PathBuf::from(args.next()?)),
            "-v" => verbose = true,
            _ if arg.starts_with('-') => return None,
            _ if input.is_none() => input = Some(PathBuf::from(arg)),
            _ => return None,
        }
    }

    let input = input?;
    let output = output.unwrap_or_else(|| input.with_extension("c"));

    Some(Args {
        input,
        output,
        verbose,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_usage() {
    println!("fcc v{}", env!("CARGO_PKG_VERSION"));
    println!("{USAGE}");
}
