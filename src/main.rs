// bipc: bip to C translator

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crossterm::style::Stylize;
use log::{debug, info, LevelFilter};
use simple_logger::SimpleLogger;

static USAGE: &str = r#"
usage: bipc [OPTIONS] FILE...

options:
    -o DIR      Write generated C files into DIR (default: next to each input)
    --tokens    Print the token list of each input
    --ast       Print the parsed program and struct declarations of each input
    -v, -vv     More logging (-vvv also traces parser recovery)

examples:
    bipc basic.bip
    bipc -o build/ first.bip second.bip
"#;

#[derive(Debug, Default)]
struct Options {
    verbosity: u8,
    dump_tokens: bool,
    dump_ast: bool,
    out_dir: Option<PathBuf>,
    inputs: Vec<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" => options.verbosity += 1,
            "-vv" => options.verbosity += 2,
            "-vvv" => options.verbosity += 3,
            "--tokens" => options.dump_tokens = true,
            "--ast" => options.dump_ast = true,
            "-o" => {
                let dir = args.next().ok_or("option '-o' needs a directory")?;
                options.out_dir = Some(PathBuf::from(dir));
            }
            flag if flag.starts_with('-') => return Err(format!("unknown option '{}'", flag)),
            file => options.inputs.push(PathBuf::from(file)),
        }
    }

    if options.inputs.is_empty() {
        return Err("no input file provided".to_string());
    }

    Ok(options)
}

fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    match (out_dir, input.file_stem()) {
        (Some(dir), Some(stem)) => dir.join(format!("{}.c", stem.to_string_lossy())),
        _ => input.with_extension("c"),
    }
}

/// Translate one input file. Returns whether it was free of syntax errors.
///
/// A fatal error is returned as `Err` and no output file is written.
fn translate(input: &Path, options: &Options) -> Result<bool, Box<dyn Error>> {
    info!("translating {}", input.display());

    let source = fs::read_to_string(input)?;
    let tokens = bipc::scan(&source)?;
    if options.dump_tokens {
        println!("{:#?}", tokens);
    }

    let parsed = bipc::parse(tokens)?;
    if options.dump_ast {
        println!("{:#?}", parsed.program);
        println!("{:#?}", parsed.declarations);
    }

    for error in &parsed.errors {
        eprintln!("{} {}: {}", "error:".red().bold(), input.display(), error);
    }

    let c_source = bipc::generate(&parsed.program, &parsed.declarations);
    let output = output_path(input, options.out_dir.as_deref());
    fs::write(&output, c_source)?;
    debug!("wrote {}", output.display());

    if parsed.has_errors() {
        eprintln!(
            "{} {}: {} syntax error(s), output written anyway",
            "warning:".yellow().bold(),
            input.display(),
            parsed.errors.len()
        );
    }

    Ok(!parsed.has_errors())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{} {}", "error:".red().bold(), message);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    SimpleLogger::new()
        .with_level(log_level(options.verbosity))
        .init()?;

    if let Some(dir) = &options.out_dir {
        fs::create_dir_all(dir)?;
    }

    // Every input is its own run; a failure does not stop the others
    let mut failed = 0;
    for input in &options.inputs {
        match translate(input, &options) {
            Ok(true) => {}
            Ok(false) => failed += 1,
            Err(err) => {
                eprintln!("{} {}: {}", "fatal:".red().bold(), input.display(), err);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&["-v", "--ast", "-o", "out", "a.bip", "b.bip"])).unwrap();
        assert_eq!(options.verbosity, 1);
        assert!(options.dump_ast);
        assert!(!options.dump_tokens);
        assert_eq!(options.out_dir, Some(PathBuf::from("out")));
        assert_eq!(options.inputs.len(), 2);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["-o"])).is_err());
        assert!(parse_args(&args(&["--bogus", "a.bip"])).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        let verbosity = |flags: &[&str]| {
            let mut list = flags.to_vec();
            list.push("a.bip");
            log_level(parse_args(&args(&list)).unwrap().verbosity)
        };
        assert_eq!(verbosity(&[]), LevelFilter::Warn);
        assert_eq!(verbosity(&["-v"]), LevelFilter::Info);
        assert_eq!(verbosity(&["-vv"]), LevelFilter::Debug);
        assert_eq!(verbosity(&["-vvv"]), LevelFilter::Trace);
        assert_eq!(verbosity(&["-v", "-vv"]), LevelFilter::Trace);
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("dir/basic.bip"), None),
            PathBuf::from("dir/basic.c")
        );
        assert_eq!(
            output_path(Path::new("dir/basic.bip"), Some(Path::new("build"))),
            PathBuf::from("build/basic.c")
        );
    }
}
