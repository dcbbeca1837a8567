// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#![allow(clippy::uninlined_format_args)]

use std::path;

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn timed<F, T>(perf: bool, name: &str, mut f: F) -> T
where
    F: FnMut() -> T,
{
    let now = std::time::Instant::now();
    let result = f();
    if perf {
        let elapsed = now.elapsed().as_micros() as f64 / 1000.0;
        eprintln!("{}: {:.2}ms", name, elapsed);
    }

    result
}

fn process() -> Result<(), String> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            println!("{}", HELP);
            return Err(e);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    let svg_data = timed(args.perf, "Reading", || -> Result<Vec<u8>, &str> {
        if let InputFrom::File(ref file) = args.in_svg {
            std::fs::read(file).map_err(|_| "failed to open the provided file")
        } else {
            use std::io::Read;
            let mut buf = Vec::new();
            let stdin = std::io::stdin();
            let mut handle = stdin.lock();
            handle
                .read_to_end(&mut buf)
                .map_err(|_| "failed to read stdin")?;
            Ok(buf)
        }
    })?;

    let request = svg2png::RenderRequest {
        svg_data,
        width: args.width,
        height: args.height,
        scale: args.scale,
        dpi: args.dpi,
        background: args.background.clone(),
    };

    // Reject bad parameters before the expensive parsing.
    svg2png::check_dpi(request.dpi).map_err(|e| e.to_string())?;

    let tree = timed(args.perf, "SVG Parsing", || {
        svg2png::parse_tree(&request.svg_data, request.dpi, &args.options).map_err(|e| e.to_string())
    })?;

    let resolved = request.resolve(tree.size()).map_err(|e| e.to_string())?;

    if args.query_size {
        println!("{}x{}", resolved.width, resolved.height);
        return Ok(());
    }

    let img = timed(args.perf, "Rendering", || {
        svg2png::render_tree(&tree, resolved).map_err(|e| e.to_string())
    })?;

    let buf = timed(args.perf, "Encoding", || {
        img.encode_png().map_err(|e| e.to_string())
    })?;

    let out_png = match args.out_png {
        Some(ref v) => v,
        None => return Err("<out-png> must be set".to_string()),
    };

    match out_png {
        OutputTo::Stdout => {
            use std::io::Write;
            std::io::stdout()
                .write_all(&buf)
                .map_err(|_| "failed to write to stdout")?;
        }
        OutputTo::File(ref file) => {
            timed(args.perf, "Saving", || {
                std::fs::write(file, &buf)
                    .map_err(|e| format!("failed to write {:?} cause {}", file, e))
            })?;
        }
    };

    Ok(())
}

const HELP: &str = "\
svg2png renders an SVG image into a PNG file.

USAGE:
  svg2png [OPTIONS] <in-svg> [<out-png>]

  svg2png logo.svg                        # writes logo.png
  svg2png -s 4 logo.svg big.png
  svg2png -w 512 --background '#ffffff' logo.svg icon.png
  cat logo.svg | svg2png - -c > logo.png

SIZE:
  Only one sizing mode is used. --scale wins over --width/--height,
  both sides stretch to an exact size, a single side keeps the aspect ratio.

  -w, --width PX                Output width, 1..=10000
  -h, --height PX               Output height, 1..=10000
  -s, --scale FACTOR            Multiplies the SVG size, 0.1..=10 (alias: -z, --zoom)

OUTPUT:
      --dpi DPI                 Resolution for physical units, stored in the PNG,
                                72..=600 [default: 96]
      --background COLOR        'transparent' or #rgb, #rgba, #rrggbb, #rrggbbaa
                                (alias: --background-color) [default: transparent]
  -c                            Writes the PNG to stdout instead of <out-png>
      --query-size              Prints WIDTHxHEIGHT and exits without rendering

RESOURCES:
      --resources-dir DIR       Base for relative hrefs [default: input directory]
      --font-family FAMILY      Fallback font family [default: Times New Roman]
      --use-font-file PATH      Loads a font file, can be repeated
      --use-fonts-dir DIR       Loads all fonts from a directory, can be repeated
      --skip-system-fonts       Does not load system fonts

MISC:
      --perf                    Prints stage timings to stderr
      --quiet                   Disables warnings
      --help                    Prints this help
  -V, --version                 Prints version

ARGS:
  <in-svg>                      SVG or SVGZ file, '-' for stdin
  <out-png>                     PNG file [default: <in-svg> with a 'png' extension]
";

#[derive(Clone, PartialEq, Debug)]
enum InputFrom {
    Stdin,
    File(path::PathBuf),
}

#[derive(Clone, PartialEq, Debug)]
enum OutputTo {
    Stdout,
    File(path::PathBuf),
}

struct Args {
    in_svg: InputFrom,
    out_png: Option<OutputTo>,
    width: Option<u32>,
    height: Option<u32>,
    scale: Option<f32>,
    dpi: u32,
    background: String,
    query_size: bool,
    perf: bool,
    quiet: bool,
    options: svg2png::Options,
}

/// Returns the first alias that was set.
fn opt_alias<T>(
    input: &mut pico_args::Arguments,
    keys: &[&'static str],
) -> Result<Option<T>, pico_args::Error>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    for key in keys {
        if let Some(v) = input.opt_value_from_str(*key)? {
            return Ok(Some(v));
        }
    }

    Ok(None)
}

fn parse_args() -> Result<Args, String> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    let e = |e: pico_args::Error| e.to_string();

    // Range checks are left to the library, so both surfaces report the same errors.
    let width = input.opt_value_from_str(["-w", "--width"]).map_err(e)?;
    let height = input.opt_value_from_str(["-h", "--height"]).map_err(e)?;
    let scale = opt_alias(&mut input, &["-s", "--scale", "-z", "--zoom"]).map_err(e)?;
    let dpi = input.opt_value_from_str("--dpi").map_err(e)?;
    let background = opt_alias(&mut input, &["--background", "--background-color"]).map_err(e)?;
    let to_stdout = input.contains("-c");
    let query_size = input.contains("--query-size");

    let mut options = svg2png::Options::default();
    let resources_dir: Option<path::PathBuf> =
        input.opt_value_from_str("--resources-dir").map_err(e)?;
    if let Some(family) = input.opt_value_from_str("--font-family").map_err(e)? {
        options.font_family = family;
    }
    options.fonts.font_files = input.values_from_str("--use-font-file").map_err(e)?;
    options.fonts.font_dirs = input.values_from_str("--use-fonts-dir").map_err(e)?;
    options.fonts.skip_system_fonts = input.contains("--skip-system-fonts");

    let perf = input.contains("--perf");
    let quiet = input.contains("--quiet");

    let in_svg: String = input.free_from_str().map_err(e)?;
    let out_file: Option<path::PathBuf> = input.opt_free_from_str().map_err(e)?;

    let remaining = input.finish();
    if !remaining.is_empty() {
        return Err(format!("unexpected arguments: {:?}", remaining));
    }

    let in_svg = match in_svg.as_str() {
        "-" => InputFrom::Stdin,
        file => InputFrom::File(file.into()),
    };

    let out_png = match (to_stdout, out_file, &in_svg) {
        (true, Some(_), _) => return Err("-c and <out-png> cannot be used together".to_string()),
        (true, None, _) => Some(OutputTo::Stdout),
        (false, Some(file), _) => Some(OutputTo::File(file)),
        (false, None, InputFrom::File(file)) => Some(OutputTo::File(file.with_extension("png"))),
        (false, None, InputFrom::Stdin) => None,
    };

    if !query_size && out_png.is_none() {
        return Err("<out-png> or -c must be set when reading from stdin".to_string());
    }

    if let (InputFrom::File(input), Some(OutputTo::File(output))) = (&in_svg, &out_png) {
        if input == output {
            return Err("<out-png> must differ from <in-svg>".to_string());
        }
    }

    if scale.is_some() && (width.is_some() || height.is_some()) {
        eprintln!("Warning: --width and --height have no effect when --scale is set.");
    }

    options.resources_dir = match (resources_dir, &in_svg) {
        (Some(dir), _) => Some(dir),
        (None, InputFrom::File(file)) => std::fs::canonicalize(file)
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf())),
        (None, InputFrom::Stdin) => {
            eprintln!("Warning: relative hrefs cannot be resolved without --resources-dir.");
            None
        }
    };

    Ok(Args {
        in_svg,
        out_png,
        width,
        height,
        scale,
        dpi: dpi.unwrap_or(svg2png::DEFAULT_DPI),
        background: background.unwrap_or_else(|| svg2png::TRANSPARENT.to_string()),
        query_size,
        perf,
        quiet,
        options,
    })
}

/// Prints warnings to stderr.
static LOGGER: StderrLogger = StderrLogger;
struct StderrLogger;
impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = match record.level() {
            log::Level::Error => "Error",
            log::Level::Warn => "Warning",
            log::Level::Info => "Info",
            log::Level::Debug => "Debug",
            log::Level::Trace => "Trace",
        };

        eprintln!("{} ({}): {}", level, record.target(), record.args());
    }

    fn flush(&self) {}
}
