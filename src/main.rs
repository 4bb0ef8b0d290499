use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;

use alt::{Config, OutputFormat};

#[derive(Parser)]
#[command(name = "alt")]
#[command(about = "Render alt markup to HTML or Markdown")]
struct Cli {
    /// Input alt file
    input: PathBuf,

    /// Output file, `-` for stdout (defaults to input name with the format's extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (defaults to the config file's setting)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Config file
    #[arg(short, long, default_value = alt::CONFIG_FILE)]
    config: PathBuf,
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let format = cli.format.unwrap_or(config.output.format);
    log::info!("rendering {} as {:?}", cli.input.display(), format);

    // Render input
    let mut rendered = match render(&cli.input, format) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if config.output.trailing_newline && !rendered.ends_with(b"\n") {
        rendered.push(b'\n');
    }

    // Determine output path
    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension(format.extension()));

    if output == Path::new("-") {
        if let Err(e) = io::stdout().lock().write_all(&rendered) {
            eprintln!("Error writing output: {}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = fs::write(&output, rendered) {
        eprintln!("Error writing {}: {}", output.display(), e);
        std::process::exit(1);
    }

    println!("Created {}", output.display());
}

fn render(input: &Path, format: OutputFormat) -> Result<Vec<u8>, String> {
    let file = File::open(input).map_err(|e| format!("reading {}: {}", input.display(), e))?;
    let name = input.display().to_string();
    alt::render_file_as(file, &name, format).map_err(|e| e.to_string())
}
