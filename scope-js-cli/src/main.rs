use clap::builder::PossibleValuesParser;
use clap::builder::TypedValueParser;
use clap::Parser;
use scope_js::Program;
use scope_js::ProgramSnapshot;
use scope_js::ScopeOptions;
use scope_js::TopLevelMode;
use serde::Serialize;
use std::fs::File;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;
use tree_js::loc::LineIndex;

#[derive(Parser)]
#[command(
  name = "scope-js",
  about = "Print the scopes and bindings of a JS file as JSON"
)]
struct Cli {
  /// File to analyze; omit for stdin.
  input: Option<PathBuf>,

  /// Whether file is a module or global script.
  #[arg(
    short,
    long,
    default_value = "module",
    value_parser = PossibleValuesParser::new(["global", "module"])
        .map(|s| match s.as_str() {
          "global" => TopLevelMode::Global,
          _ => TopLevelMode::Module,
        }),
  )]
  mode: TopLevelMode,

  /// Hoist function declarations inside blocks to the enclosing function, like `var`.
  #[arg(long)]
  hoist_block_functions: bool,

  /// Rename a top-level-visible binding; without `=NEW` a fresh name is generated. Repeatable.
  #[arg(long = "rename", value_name = "OLD[=NEW]", value_parser = parse_rename)]
  renames: Vec<RenameArg>,

  /// Generate a unique name in the top-level scope from BASE. Repeatable.
  #[arg(long = "uid", value_name = "BASE")]
  uids: Vec<String>,

  /// Pretty-print the JSON output.
  #[arg(long)]
  pretty: bool,
}

#[derive(Clone)]
struct RenameArg {
  old: String,
  new: Option<String>,
}

fn parse_rename(arg: &str) -> Result<RenameArg, String> {
  let (old, new) = match arg.split_once('=') {
    Some((old, new)) => (old, Some(new)),
    None => (arg, None),
  };
  if old.is_empty() {
    return Err("OLD name must not be empty".to_string());
  }
  if new == Some("") {
    return Err("NEW name must not be empty; omit `=` to generate one".to_string());
  }
  Ok(RenameArg {
    old: old.to_string(),
    new: new.map(str::to_string),
  })
}

#[derive(Serialize)]
struct Renamed {
  old: String,
  /// `null` when `old` didn't resolve.
  new: Option<String>,
}

#[derive(Serialize)]
struct Output {
  renamed: Vec<Renamed>,
  uids: Vec<String>,
  #[serde(flatten)]
  snapshot: ProgramSnapshot,
}

fn install_subscriber() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

fn exit_with_error(message: impl AsRef<str>) -> ! {
  eprintln!("error: {}", message.as_ref());
  process::exit(1);
}

fn read_input(input: Option<&PathBuf>) -> String {
  let mut bytes = Vec::new();
  let result = match input {
    Some(path) => File::open(path)
      .and_then(|mut f| f.read_to_end(&mut bytes))
      .map_err(|err| format!("failed to read {}: {err}", path.display())),
    None => stdin()
      .read_to_end(&mut bytes)
      .map_err(|err| format!("failed to read stdin: {err}")),
  };
  if let Err(message) = result {
    exit_with_error(message);
  }
  String::from_utf8(bytes)
    .unwrap_or_else(|err| exit_with_error(format!("input is not valid UTF-8: {err}")))
}

fn main() {
  install_subscriber();
  let args = Cli::parse();
  let input_name = args
    .input
    .as_ref()
    .map(|p| p.to_string_lossy().into_owned())
    .unwrap_or_else(|| "<stdin>".to_string());
  let source = read_input(args.input.as_ref());
  debug!(input = %input_name, bytes = source.len(), "read input");

  let options = ScopeOptions {
    top_level_mode: args.mode,
    block_scoped_functions: !args.hoist_block_functions,
  };
  let mut program = match Program::parse(&source, &options) {
    Ok(program) => program,
    Err(err) => {
      let pos = LineIndex::new(&source).line_col(&source, err.loc.0);
      eprintln!("error[{}]: {}", err.code(), err.message());
      eprintln!("  --> {}:{}:{}", input_name, pos.line, pos.column + 1);
      process::exit(1);
    }
  };

  let root = program.scopes().root();
  let renamed = args
    .renames
    .iter()
    .map(|arg| Renamed {
      old: arg.old.clone(),
      new: program.rename(root, &arg.old, arg.new.as_deref()),
    })
    .collect();
  let uids = args
    .uids
    .iter()
    .map(|base| program.generate_uid(root, base))
    .collect();

  let output = Output {
    renamed,
    uids,
    snapshot: program.snapshot(),
  };
  let mut out = stdout().lock();
  let written = if args.pretty {
    serde_json::to_writer_pretty(&mut out, &output)
  } else {
    serde_json::to_writer(&mut out, &output)
  };
  if let Err(err) = written
    .map_err(|err| err.to_string())
    .and_then(|()| writeln!(out).map_err(|err| err.to_string()))
  {
    exit_with_error(format!("failed to write output: {err}"));
  }
}
