use std::fs;
use std::path::Path;

use sketcher::{
    Frame, FrameTuning, ParseError, export_frame, extract_beams, extract_nodes,
    extract_triangles, parse_str,
};

const USAGE: &str = "usage: sketcher -f <input_filename> -m <model_name> -n <author_name>";

// Exit codes are a stable surface, one per failure stage:
// 1 usage, 2 unreadable input, 3 unparsable XML, 4 missing COLLADA root,
// 5 missing mesh, 6 missing float_array, 7 missing triangles block,
// 8 missing vertex indices, 9 export failure.
const EXIT_USAGE: i32 = 1;
const EXIT_UNREADABLE: i32 = 2;
const EXIT_EXPORT: i32 = 9;

fn main() {
    env_logger::init();
    if let Err(failure) = run() {
        eprintln!("sketcher: {}", failure.message);
        std::process::exit(failure.code);
    }
}

struct Failure {
    code: i32,
    message: String,
}

impl Failure {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

fn run() -> Result<(), Failure> {
    let mut args = Args::new(std::env::args().skip(1).collect());

    let mut fname: Option<String> = None;
    let mut model: Option<String> = None;
    let mut author: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-f" => fname = Some(args.value("-f")?),
            "-m" => model = Some(args.value("-m")?),
            "-n" => author = Some(args.value("-n")?),
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            other => {
                return Err(Failure::new(
                    EXIT_USAGE,
                    format!("unknown option `{other}`\n{USAGE}"),
                ));
            }
        }
    }

    let (Some(fname), Some(model), Some(author)) = (fname, model, author) else {
        return Err(Failure::new(EXIT_USAGE, USAGE));
    };

    println!("loading {fname}");
    let input = fs::read_to_string(&fname)
        .map_err(|err| Failure::new(EXIT_UNREADABLE, format!("unable to read {fname}: {err}")))?;

    let arrays =
        parse_str(&input).map_err(|err| Failure::new(parse_exit_code(&err), err.to_string()))?;
    println!("found {} node elements", arrays.positions.len());
    println!("found {} triangle indices", arrays.indices.len());

    let nodes = extract_nodes(&arrays.positions);
    println!("extracted {} nodes", nodes.len());

    let triangles = extract_triangles(&arrays.indices, &nodes);
    println!("extracted {} triangles", triangles.len());

    let beams = extract_beams(&triangles);
    println!("extracted {} beams", beams.len());

    let frame = Frame::new(nodes, beams);
    export_frame(
        Path::new("."),
        &model,
        &author,
        &frame,
        &FrameTuning::default(),
    )
    .map_err(|err| Failure::new(EXIT_EXPORT, err.to_string()))?;

    println!("successfully exported model {model}");
    Ok(())
}

fn parse_exit_code(err: &ParseError) -> i32 {
    match err {
        ParseError::Xml(_) | ParseError::Number(_) | ParseError::Index(_) => 3,
        ParseError::MissingRoot => 4,
        ParseError::MissingMesh => 5,
        ParseError::MissingFloatArray => 6,
        ParseError::MissingTriangles => 7,
        ParseError::MissingVertexIndices => 8,
    }
}

struct Args {
    args: Vec<String>,
    pos: usize,
}

impl Args {
    fn new(args: Vec<String>) -> Self {
        Self { args, pos: 0 }
    }

    fn next(&mut self) -> Option<String> {
        let arg = self.args.get(self.pos)?.clone();
        self.pos += 1;
        Some(arg)
    }

    fn value(&mut self, flag: &str) -> Result<String, Failure> {
        self.next()
            .ok_or_else(|| Failure::new(EXIT_USAGE, format!("missing value for {flag}\n{USAGE}")))
    }
}
