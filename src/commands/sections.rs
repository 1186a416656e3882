use crate::decode_from;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use wasmod_types::Section;

/// Lists the sections of a module file.
#[derive(Args)]
#[clap(disable_version_flag = true)]
pub struct SectionsCommand {
    /// The path to the module file.
    #[clap(value_name = "PATH")]
    pub path: PathBuf,
}

impl SectionsCommand {
    /// Executes the command.
    pub fn exec(self) -> Result<()> {
        log::debug!("executing sections command");

        let module = decode_from(&self.path)?;

        for section in &module.sections {
            match section {
                Section::Custom(s) => {
                    println!(
                        "custom `{name}`: {len} payload byte(s)",
                        name = s.name,
                        len = s.data.len()
                    )
                }
                Section::Type(s) => println!("type: {len} type(s)", len = s.types.len()),
                Section::Function(s) => {
                    println!("function: {len} function(s)", len = s.type_indices.len())
                }
                Section::Export(s) => println!("export: {len} export(s)", len = s.exports.len()),
                Section::Code(s) => println!("code: {len} body(s)", len = s.functions.len()),
            }
        }

        Ok(())
    }
}
