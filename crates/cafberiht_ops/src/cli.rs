use crate::layout::LayoutFormat;

use clap::{Parser, ValueEnum};

/// Output formats accepted by `--format`.
///
/// Kept separate from `LayoutFormat` so the renderer does not depend on
/// `clap`.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum CliFormat {
    /// Aligned columns.
    Table,
    /// Comma-separated values.
    Csv,
}

impl From<CliFormat> for LayoutFormat {
    fn from(cli_format: CliFormat) -> Self {
        match cli_format {
            CliFormat::Table => LayoutFormat::Table,
            CliFormat::Csv => LayoutFormat::Csv,
        }
    }
}

/// Prints the layout of the build-configured container.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Log every stage to stderr.
    #[clap(long)]
    pub verbose: bool,

    /// How to print the layout.
    #[clap(long, value_enum, default_value_t = CliFormat::Table)]
    pub format: CliFormat,

    /// Print only the position of this operation (or `absent`) and stop.
    #[clap(long, value_name = "NAME")]
    pub enumerator: Option<String>,

    /// Only list operations the addition mixin acts on.
    #[clap(long)]
    pub admitted_only: bool,

    /// Run the kernel-tick visitor this many times before inspecting.
    #[clap(long, default_value_t = 0)]
    pub ticks: u64,
}

impl Args {
    pub fn from_cli() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["cafberiht-layout"]).unwrap();
        assert!(!args.verbose);
        assert!(!args.admitted_only);
        assert!(matches!(args.format, CliFormat::Table));
        assert_eq!(args.enumerator, None);
        assert_eq!(args.ticks, 0);
    }

    #[test]
    fn parses_every_flag() {
        let args = Args::try_parse_from([
            "cafberiht-layout",
            "--verbose",
            "--format",
            "csv",
            "--enumerator",
            "attn_v",
            "--admitted-only",
            "--ticks",
            "3",
        ])
        .unwrap();
        assert!(args.verbose);
        assert!(args.admitted_only);
        assert_eq!(LayoutFormat::from(args.format), LayoutFormat::Csv);
        assert_eq!(args.enumerator.as_deref(), Some("attn_v"));
        assert_eq!(args.ticks, 3);
    }

    #[test]
    fn rejects_unknown_formats() {
        assert!(Args::try_parse_from(["cafberiht-layout", "--format", "xml"]).is_err());
    }
}
