use anyhow::{bail, Context, Result};

use std::{env, fs, path::PathBuf};

const WIDTH_VAR: &str = "CAFBERIHT_WIDTH";
const DEFAULT_WIDTH: u64 = 10;

fn main() -> Result<()> {
    println!("cargo:rerun-if-env-changed={}", WIDTH_VAR);
    println!("cargo:rerun-if-changed=build.rs");

    let width = match env::var(WIDTH_VAR) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{} must be an integer, got `{}`", WIDTH_VAR, raw))?,
        Err(env::VarError::NotPresent) => DEFAULT_WIDTH,
        Err(e) => return Err(e).context(format!("Failed to read {}", WIDTH_VAR)),
    };
    if width == 0 {
        bail!("{} must be at least 1", WIDTH_VAR);
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").context("OUT_DIR is not set")?);
    let path = out_dir.join("cafberiht_config.rs");
    fs::write(&path, config_source(width))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

fn config_source(width: u64) -> String {
    format!(
        "/// Number of enumerators the default container holds.\n\
         pub const CAFBERIHT_WIDTH: u64 = {width};\n\
         \n\
         /// The first `CAFBERIHT_WIDTH` operations, in graph order.\n\
         pub type CoreAggregator = ::cafberiht::FirstN<crate::ops::CoreType, {width}>;\n\
         \n\
         ::cafberiht::cafberiht! {{\n\
         \x20   /// One `CoreInterface` per operation of `CoreAggregator`.\n\
         \x20   #[derive(Debug)]\n\
         \x20   pub struct CoreCafberiht: crate::mixin::CoreInterface<crate::ops::CoreType> = first({width}) as CoreAggregator;\n\
         }}\n"
    )
}
