use anyhow::{anyhow, bail, Context, Result};
use std::io;
use std::path::PathBuf;

use wehi::color::Color;
use wehi::detect::FileType;
use wehi::highlight::{BaseHighlighter, Highlighter};
use wehi::metrics::MonoMetrics;
use wehi::render::Preview;
use wehi::{Config, HighlightTextArea, TextBuffer};

const HELP: &str = "\
wehi - A minimalist text highlight resolver and render chunk compiler

USAGE:
  wehi [OPTIONS] FILE

OPTIONS:
  --word COLOR=TEXT      Highlight every occurrence of TEXT (repeatable)
  --regex COLOR=PATTERN  Highlight every match of PATTERN (repeatable)
  --color NAME           Default text color (name or #rrggbb, default: white)
  --tab N                Tab width in cells (default: 4)
  --no-line-numbers      Hide line numbers
  --plain                Disable file-type preset rules
  --chunks               Print the compiled chunk table instead of rendering
  --json                 Print the compiled chunks as JSON
  --debug                Enable debug logging
  -h, --help             Print this help

COLORS:
  white black red green blue yellow cyan magenta orange gray darkgreen
  or hex: #rrggbb

EXAMPLES:
  wehi src/main.rs
  wehi --word red=TODO --word yellow=FIXME notes.txt
  wehi --regex 'blue=[0-9]+' --chunks data.log
";

struct Args {
    file: PathBuf,
    words: Vec<String>,
    regexes: Vec<String>,
    default_color: Option<Color>,
    tab_width: Option<usize>,
    no_line_numbers: bool,
    plain: bool,
    chunks: bool,
    json: bool,
    debug: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let args = Args {
        words: pargs.values_from_str("--word")?,
        regexes: pargs.values_from_str("--regex")?,
        default_color: pargs.opt_value_from_fn("--color", Color::parse)?,
        tab_width: pargs.opt_value_from_str("--tab")?,
        no_line_numbers: pargs.contains("--no-line-numbers"),
        plain: pargs.contains("--plain"),
        chunks: pargs.contains("--chunks"),
        json: pargs.contains("--json"),
        debug: pargs.contains("--debug"),
        file: pargs
            .free_from_str()
            .context("missing FILE argument (see --help)")?,
    };

    let rest = pargs.finish();
    if !rest.is_empty() {
        bail!("unexpected arguments: {:?}", rest);
    }

    Ok(Some(args))
}

/// 解析 "COLOR=VALUE" 規格
fn split_spec(spec: &str) -> Result<(Color, &str)> {
    let (color, value) = spec
        .split_once('=')
        .ok_or_else(|| anyhow!("expected COLOR=VALUE, got: {}", spec))?;
    Ok((Color::parse(color)?, value))
}

fn build_highlighter(args: &Args) -> Result<Option<Box<dyn Highlighter>>> {
    // 明確給了規則就用規則；否則按文件類型套預設
    if !args.words.is_empty() || !args.regexes.is_empty() {
        let mut highlighter = BaseHighlighter::new();
        for spec in &args.words {
            let (color, word) = split_spec(spec)?;
            highlighter.word(color, word);
        }
        for spec in &args.regexes {
            let (color, pattern) = split_spec(spec)?;
            highlighter
                .regex(color, pattern)
                .with_context(|| format!("bad --regex {}", spec))?;
        }
        return Ok(Some(Box::new(highlighter)));
    }

    if args.plain {
        return Ok(None);
    }

    Ok(FileType::from_path(&args.file)
        .preset()
        .map(|h| Box::new(h) as Box<dyn Highlighter>))
}

fn main() -> Result<()> {
    let args = match parse_args()? {
        Some(args) => args,
        None => {
            print!("{}", HELP);
            return Ok(());
        }
    };

    // 初始化日誌
    wehi::utils::init_logger(args.debug);

    let mut config = Config::new();
    if let Some(tab) = args.tab_width {
        config.tab_width = tab.max(1);
    }
    if let Some(color) = args.default_color {
        config.default_color = color;
    }
    if args.no_line_numbers {
        config.line_numbers = false;
    }

    let buffer = TextBuffer::from_file(&args.file)?;
    let highlighter = build_highlighter(&args)?;

    let metrics = MonoMetrics::terminal().with_tab_width(config.tab_width);
    let mut area = HighlightTextArea::new(buffer.text(), Box::new(metrics));
    area.set_default_color(config.default_color);
    area.set_highlighter(highlighter);

    let line_count = area.line_count();
    let chunks = area.chunks();

    if args.json {
        println!("{}", serde_json::to_string_pretty(chunks)?);
        return Ok(());
    }

    if args.chunks {
        println!("{:>5} {:>9} {:>6} {:>8}  text", "line", "offset_x", "width", "color");
        for chunk in chunks {
            println!(
                "{:>5} {:>9.1} {:>6}  #{:02x}{:02x}{:02x}  {:?}",
                chunk.line_index,
                chunk.offset_x,
                wehi::metrics::visual_width(&chunk.text),
                chunk.color.r,
                chunk.color.g,
                chunk.color.b,
                chunk.text
            );
        }
        return Ok(());
    }

    let preview = Preview::new(config.line_numbers, config.tab_width);
    let mut stdout = io::stdout();
    preview.render(&mut stdout, chunks, line_count)?;
    preview.status(
        &mut stdout,
        &buffer.file_name(),
        line_count,
        buffer.len_chars(),
        buffer.encoding().name(),
    )?;

    Ok(())
}
