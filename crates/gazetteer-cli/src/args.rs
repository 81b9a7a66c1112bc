use clap::Parser;
use gazetteer_core::DEFAULT_OUTPUT_DIR;
use std::path::PathBuf;

/// CLI arguments for gazetteer
///
/// Every argument is optional; with none given the tool reads the standard
/// dump names from the working directory and writes into `jsonFiles/`.
#[derive(Debug, Parser)]
#[command(
    name = "gazetteer",
    version,
    about = "Convert GeoNames dumps into countries, states and cities JSON"
)]
pub struct CliArgs {
    /// Directory holding alternateNames.txt, countryInfo.txt,
    /// admin1CodesASCII.txt and cities500.txt (default: working directory)
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Directory the JSON collections are written to (created if missing)
    #[arg(short = 'o', long = "output-dir", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Write single-line JSON instead of indented output
    #[arg(long)]
    pub compact: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_fixed_defaults() {
        let args = CliArgs::parse_from(["gazetteer"]);
        assert_eq!(args.data_dir, None);
        assert_eq!(args.output_dir, PathBuf::from("jsonFiles"));
        assert!(!args.compact);
    }

    #[test]
    fn overrides() {
        let args = CliArgs::parse_from([
            "gazetteer",
            "-d",
            "/srv/geonames",
            "--output-dir",
            "out",
            "--compact",
        ]);
        assert_eq!(args.data_dir, Some(PathBuf::from("/srv/geonames")));
        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert!(args.compact);
    }
}
