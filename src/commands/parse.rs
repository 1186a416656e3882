use crate::decode_from;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Decodes a module file into a JSON representation.
#[derive(Args)]
#[clap(disable_version_flag = true)]
pub struct ParseCommand {
    /// The path to the module file.
    #[clap(value_name = "PATH")]
    pub path: PathBuf,
}

impl ParseCommand {
    /// Executes the command.
    pub fn exec(self) -> Result<()> {
        log::debug!("executing parse command");

        let module = decode_from(&self.path)?;

        serde_json::to_writer_pretty(std::io::stdout(), &module)?;
        println!();

        Ok(())
    }
}
