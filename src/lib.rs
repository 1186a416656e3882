//! A library for inspecting modules in the WebAssembly binary format.

#![deny(missing_docs)]

use anyhow::{Context, Result};
use std::{fs::File, io::BufReader, path::Path};
use wasmod_types::Module;

pub mod commands;

fn decode_from(path: &Path) -> Result<Module> {
    let file = File::open(path)
        .with_context(|| format!("failed to open file `{path}`", path = path.display()))?;

    wasmod_parser::decode_module(BufReader::new(file))
        .with_context(|| format!("failed to decode module `{path}`", path = path.display()))
}
