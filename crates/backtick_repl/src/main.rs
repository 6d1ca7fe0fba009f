use std::{env, fs, path::PathBuf, process};

use ansi_term::Colour;
use backtick_eval::{Error, EvalCtx, Segment, Value};
use backtick_parser::{
    error::{Error as ParseError, Malformed, SyntaxError},
    parse_module,
    source::{Source, SourceName},
};
use rustyline::{error::ReadlineError, DefaultEditor};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "backtick", about = "Evaluates template literals and the expressions in them")]
struct Opt {
    #[structopt(parse(from_os_str), help = "Input file name")]
    file: Option<PathBuf>,

    #[structopt(long, help = "Show the segments of template results")]
    segments: bool,
}

fn main() {
    env_logger::init();
    color_backtrace::install();

    let opt = Opt::from_args();
    match opt.file {
        Some(file) => {
            if !run(file, opt.segments) {
                process::exit(1);
            }
        }
        None => repl(opt.segments),
    }
}

fn run(file: PathBuf, segments: bool) -> bool {
    let text = match fs::read_to_string(&file) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("{}: {}: {err}", error_label(), file.display());
            return false;
        }
    };
    let source = Source::new(SourceName::FileName(file.display().to_string()), text);

    let result = parse_module(&source)
        .map_err(Error::from)
        .and_then(|module| EvalCtx::new().eval_module(&module));
    match result {
        Ok(value) => {
            show_value(&value, segments);
            true
        }
        Err(err) => {
            show_error(&source, &err);
            false
        }
    }
}

fn repl(segments: bool) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("{}: cannot start line editor: {err}", error_label());
            return;
        }
    };
    let history = history_path();
    if let Some(path) = &history {
        if rl.load_history(path).is_err() {
            log::debug!("no history at {}", path.display());
        }
    }

    let mut ctx = EvalCtx::new();
    let mut lines = String::new();

    loop {
        let prompt = if lines.is_empty() { "> " } else { "... " };
        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                lines.clear();
                continue;
            }
            Err(_) => break,
        };
        if let Err(err) = rl.add_history_entry(line.as_str()) {
            log::warn!("cannot record history: {err}");
        }

        lines.push_str(&line);
        lines.push('\n');

        let source = Source::new(SourceName::Custom("repl".into()), lines.as_str());
        match parse_module(&source) {
            // Keep reading until the input is complete.
            Err(err) if is_incomplete(&err) => continue,
            Err(err) => show_error(&source, &err.into()),
            Ok(module) => match ctx.eval_module(&module) {
                Ok(value) => show_value(&value, segments),
                Err(err) => show_error(&source, &err),
            },
        }
        lines.clear();
    }

    if let Some(path) = &history {
        if let Err(err) = rl.save_history(path) {
            log::warn!("cannot save history to {}: {err}", path.display());
        }
    }
}

fn is_incomplete(err: &ParseError) -> bool {
    match err {
        ParseError::SyntaxError(err) => matches!(
            err,
            SyntaxError::UnexpectedEndOfInput(_) | SyntaxError::UnterminatedString(_)
        ),
        ParseError::Malformed(err) => matches!(
            err.kind(),
            Malformed::UnterminatedTemplate | Malformed::UnterminatedHole
        ),
    }
}

fn history_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(".backtick_history"))
}

fn show_value(value: &Value, segments: bool) {
    match value {
        Value::Template(tmpl) if segments => {
            println!("{}", Colour::Fixed(8).paint(format!("`{}`", tmpl.raw())));
            for (i, segment) in tmpl.segments().enumerate() {
                match segment {
                    Segment::Literal(lit) => {
                        println!("{i:>3} {} {:?}", Colour::Green.paint("literal"), lit.cooked().as_str())
                    }
                    Segment::Value(value) => {
                        println!("{i:>3} {} {value:?}", Colour::Cyan.paint("value  "))
                    }
                }
            }
        }
        Value::Null => println!("{}", Colour::Fixed(8).paint("null")),
        value => println!("{value}"),
    }
}

fn show_error(source: &Source, err: &Error) {
    match err {
        Error::Parse(err) => {
            let (line, col) = source.line_col(err.offset());
            eprintln!("{}: {}:{line}:{col}: {err}", error_label(), source.name);
        }
        err => eprintln!("{}: {err}", error_label()),
    }
}

fn error_label() -> ansi_term::ANSIString<'static> {
    Colour::Red.bold().paint("error")
}
