use std::{fs, path::PathBuf};

use backtick_eval::{EvalCtx, Segment, Value};
use backtick_parser::{
    parse_module,
    source::{Source, SourceName},
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "eval")]
pub struct Opt {
    #[structopt(parse(from_os_str), help = "File path to evaluate")]
    pub filepath: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    color_backtrace::install();

    let opt = Opt::from_args();

    let source = match opt.filepath {
        Some(filepath) => {
            let text = fs::read_to_string(&filepath).expect("Failed to read file");
            Source::new(SourceName::FileName(filepath.display().to_string()), text)
        }
        None => Source::new(
            SourceName::Custom("example".into()),
            "let items = ['a', 'b']; `{len(items)} item(s): {join(items, ', ')} at {now()}`",
        ),
    };

    let result = parse_module(&source)
        .map_err(Into::into)
        .and_then(|module| EvalCtx::new().eval_module(&module));
    match result {
        Ok(Value::Template(tmpl)) => {
            println!("raw: {:?}", tmpl.raw().as_str());
            for segment in tmpl.segments() {
                match segment {
                    Segment::Literal(lit) => println!("  literal {:?}", lit.cooked().as_str()),
                    Segment::Value(value) => println!("  value   {value:?}"),
                }
            }
        }
        Ok(value) => println!("Result: {value:#?}"),
        Err(err) => eprintln!("{}: {err}", source.name),
    }
}
