use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use word_html_sections::decode::DEFAULT_ENCODING_LABEL;
use word_html_sections::extract::DEFAULT_HEADING_LEVEL;
use word_html_sections::{export, extract_sections_from_path, render, Layout, RunConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Split a Word web-page export into heading sections")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every section with tagged content lines.
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Write the sections as JSON.
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Output path (default: sections.json next to the input).
        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = LayoutArg::Sections)]
        layout: LayoutArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LayoutArg {
    /// `index`, `title` and a typed `content` array.
    Sections,
    /// `index`, `title`, flat `text_blocks` and `images` arrays.
    Guide,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Sections => Layout::Sections,
            LayoutArg::Guide => Layout::Guide,
        }
    }
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input HTML file saved by Word ("Web Page" or "Web Page, Filtered").
    input: PathBuf,

    /// Encoding label of the input bytes.
    #[arg(long, default_value = DEFAULT_ENCODING_LABEL)]
    encoding: String,

    /// Heading level that starts a new section (1-6).
    #[arg(
        long,
        default_value_t = DEFAULT_HEADING_LEVEL,
        value_parser = clap::value_parser!(u8).range(1..=6)
    )]
    heading_level: u8,
}

impl InputArgs {
    fn into_config(self, out: Option<PathBuf>) -> Result<RunConfig> {
        RunConfig::new(self.input, out, &self.encoding, self.heading_level)
            .context("invalid configuration")
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Inspect { input } => {
            let cfg = input.into_config(None)?;
            let sections =
                extract_sections_from_path(&cfg.input_path, cfg.encoding, &cfg.extract_options())
                    .with_context(|| format!("extract {}", cfg.input_path.display()))?;
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            render::write_sections(&mut lock, &sections).context("write to stdout")?;
            lock.flush().context("flush stdout")?;
        }
        Command::Export { input, out, layout } => {
            let cfg = input.into_config(out)?;
            let sections =
                extract_sections_from_path(&cfg.input_path, cfg.encoding, &cfg.extract_options())
                    .with_context(|| format!("extract {}", cfg.input_path.display()))?;
            export::write_json(&cfg.output_path, &sections, layout.into())
                .with_context(|| format!("export {}", cfg.output_path.display()))?;
        }
    }
    Ok(())
}
