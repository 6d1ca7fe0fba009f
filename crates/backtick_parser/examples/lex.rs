use std::{fs, path::PathBuf};

use backtick_parser::{
    lexer::{
        template::lex_template,
        Input, Lexer,
    },
    source::{Source, SourceName},
    token::{template::Piece, Token},
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "lex")]
pub struct Opt {
    #[structopt(parse(from_os_str), help = "File containing a module to lex")]
    pub file: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    color_backtrace::install();

    let opt = Opt::from_args();
    let source = match opt.file {
        Some(file) => {
            let text = fs::read_to_string(&file).expect("Failed to read file");
            Source::new(SourceName::FileName(file.display().to_string()), text)
        }
        None => Source::new(
            SourceName::Custom("example".into()),
            r#"let user = {name: "world"};
`Hello, {user.name}! {{braces}} and {`nested {1 + 2}`}`"#,
        ),
    };
    let mut lexer = Lexer::new(Input::from(&source));

    loop {
        match lexer.read_token() {
            Ok(Some(token)) => {
                log::info!("{:?} @ {:?}", token.inner_ref(), token.span());
                if let Token::Template(_) = token.inner_ref() {
                    let text = token.span().slice(&source.text);
                    for piece in lex_template(text).expect("already lexed").pieces() {
                        match piece {
                            Piece::Text { cooked, .. } => println!("  text {cooked:?}"),
                            Piece::Hole(span) => println!("  hole {:?}", span.slice(text)),
                        }
                    }
                }
            }
            Ok(None) => break,
            Err(err) => {
                let (line, col) = source.line_col(err.offset());
                eprintln!("{}:{line}:{col}: {err}", source.name);
                break;
            }
        }
    }
}
