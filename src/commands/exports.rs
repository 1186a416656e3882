use crate::decode_from;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use wasmod_types::{ExportDesc, FunctionType, Module};

/// Lists the exports of a module file.
#[derive(Args)]
#[clap(disable_version_flag = true)]
pub struct ExportsCommand {
    /// The path to the module file.
    #[clap(value_name = "PATH")]
    pub path: PathBuf,
}

impl ExportsCommand {
    /// Executes the command.
    pub fn exec(self) -> Result<()> {
        log::debug!("executing exports command");

        let module = decode_from(&self.path)?;
        let Some(section) = module.exports() else {
            return Ok(());
        };

        for export in &section.exports {
            let name = &export.name;
            let kind = &export.desc;
            let index = export.desc.index();
            match function_type(&module, &export.desc) {
                Some(ty) => println!("{name}: {kind} {index} {ty}"),
                None => println!("{name}: {kind} {index}"),
            }
        }

        Ok(())
    }
}

/// Resolves the signature of an exported function via the function and type
/// sections, when both are present and the indices are in range.
fn function_type<'a>(module: &'a Module, desc: &ExportDesc) -> Option<&'a FunctionType> {
    let ExportDesc::Func(index) = desc else {
        return None;
    };

    let type_index = *module.functions()?.type_indices.get(*index as usize)?;
    module.types()?.types.get(type_index as usize)
}
