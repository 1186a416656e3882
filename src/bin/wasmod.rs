use anyhow::Result;
use clap::Parser;
use owo_colors::{OwoColorize, Stream, Style};
use wasmod_cli::commands::{ExportsCommand, ParseCommand, SectionsCommand};

fn version() -> &'static str {
    option_env!("CARGO_VERSION_INFO").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Tool for inspecting modules in the WebAssembly binary format.
#[derive(Parser)]
#[clap(
    bin_name = "wasmod",
    version,
    propagate_version = true,
    arg_required_else_help = true
)]
#[command(version = version())]
enum Wasmod {
    Parse(ParseCommand),
    Sections(SectionsCommand),
    Exports(ExportsCommand),
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    if let Err(err) = match Wasmod::parse() {
        Wasmod::Parse(cmd) => cmd.exec(),
        Wasmod::Sections(cmd) => cmd.exec(),
        Wasmod::Exports(cmd) => cmd.exec(),
    } {
        eprintln!(
            "{error}: {err:?}",
            error = "error".if_supports_color(Stream::Stderr, |text| {
                text.style(Style::new().red().bold())
            })
        );
        std::process::exit(1);
    }

    Ok(())
}
