//! CLI command definitions, routing, and tracing setup.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use coursefmt::{ContentInput, DocumentKind, FormatOptions, Formatter};
use coursefmt_core::{StyleMarkers, TemplateContext};
use coursefmt_paste::PasteSerializer;
use tracing::debug;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// coursefmt - turn instructor text into institutional course pages.
#[derive(Parser)]
#[command(
    name = "coursefmt",
    version,
    about = "Format instructor-authored course content into institutional HTML pages.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Render a page for a document kind.
    Render {
        /// Document kind tag (see `coursefmt kinds`).
        #[arg(short, long)]
        kind: String,

        /// Treat the input as a pasted HTML fragment.
        #[arg(long)]
        html: bool,

        /// Template context JSON file.
        #[arg(short, long)]
        context: Option<PathBuf>,

        /// Page title (overrides the context file).
        #[arg(long)]
        title: Option<String>,

        /// Course name (overrides the context file).
        #[arg(long)]
        course_name: Option<String>,

        /// Module number for the banner (overrides the context file).
        #[arg(long)]
        module_number: Option<u32>,

        /// Skip the final sanitizer pass.
        #[arg(long)]
        no_sanitize: bool,

        /// Strip video embeds during sanitization.
        #[arg(long)]
        no_embeds: bool,

        /// Input file (reads stdin when omitted).
        file: Option<PathBuf>,
    },

    /// Serialize a pasted HTML fragment to annotated text.
    Paste {
        /// Emphasis marker style.
        #[arg(long, default_value = "asterisk")]
        markers: Markers,

        /// Input file (reads stdin when omitted).
        file: Option<PathBuf>,
    },

    /// List recognized document-kind tags.
    Kinds,
}

/// Emphasis marker style for `paste`.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum Markers {
    Asterisk,
    Markup,
}

impl From<Markers> for StyleMarkers {
    fn from(markers: Markers) -> Self {
        match markers {
            Markers::Asterisk => StyleMarkers::Asterisk,
            Markers::Markup => StyleMarkers::Markup,
        }
    }
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so stdout
/// stays clean for the rendered output.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match cli.verbose {
        0 => "warn",
        1 => "coursefmt=debug",
        _ => "coursefmt=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render {
            kind,
            html,
            context,
            title,
            course_name,
            module_number,
            no_sanitize,
            no_embeds,
            file,
        } => {
            let mut ctx = match context {
                Some(path) => load_context(&path)?,
                None => TemplateContext::default(),
            };
            if title.is_some() {
                ctx.title = title;
            }
            if course_name.is_some() {
                ctx.course_name = course_name;
            }
            if module_number.is_some() {
                ctx.module_number = module_number;
            }

            let raw = read_input(file.as_deref())?;
            let input = if html {
                ContentInput::Html(raw)
            } else {
                ContentInput::Text(raw)
            };
            let formatter = Formatter::with_options(FormatOptions {
                sanitize: !no_sanitize,
                allow_embeds: !no_embeds,
            });
            write_output(&formatter.format(input, &kind, &ctx))
        }
        Command::Paste { markers, file } => {
            let raw = read_input(file.as_deref())?;
            let serializer = PasteSerializer::with_markers(markers.into());
            write_output(&serializer.serialize_html(&raw))
        }
        Command::Kinds => {
            for kind in DocumentKind::ALL {
                println!("{kind}");
            }
            Ok(())
        }
    }
}

fn load_context(path: &Path) -> Result<TemplateContext> {
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read context file {}", path.display()))?;
    let ctx = TemplateContext::from_json(&json)
        .wrap_err_with(|| format!("failed to parse context file {}", path.display()))?;
    debug!(path = %path.display(), "loaded template context");
    Ok(ctx)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .wrap_err("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}").wrap_err("failed to write output")?;
    Ok(())
}
