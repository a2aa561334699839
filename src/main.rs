//! Native globe viewer: `hexglobe [DATA] [--options FILE]`.

use std::path::PathBuf;

use clap::Parser;
use hexglobe::{options::Options, Viewer};

/// Interactive globe with hexagonal point-density bins.
#[derive(Parser, Debug)]
#[command(name = "hexglobe", version, about)]
struct Cli {
    /// CSV point data: URL or local path. Overrides `data.url` from the
    /// options file.
    data: Option<String>,

    /// Options file (TOML). Missing fields use defaults.
    #[arg(short, long, value_name = "FILE")]
    options: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let options = match cli.options.as_deref().map(Options::load) {
        Some(Ok(options)) => options,
        Some(Err(e)) => {
            log::error!("{e}");
            std::process::exit(1);
        }
        None => Options::default(),
    };

    let mut builder = Viewer::builder().with_options(options);
    if let Some(data) = cli.data {
        builder = builder.with_data(data);
    }
    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn data_and_options_are_optional() {
        let cli = Cli::try_parse_from(["hexglobe"]).unwrap();
        assert!(cli.data.is_none());
        assert!(cli.options.is_none());
    }

    #[test]
    fn positional_data_and_short_options() {
        let cli =
            Cli::try_parse_from(["hexglobe", "pop.csv", "-o", "globe.toml"])
                .unwrap();
        assert_eq!(cli.data.as_deref(), Some("pop.csv"));
        assert_eq!(cli.options, Some(PathBuf::from("globe.toml")));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["hexglobe", "--bogus"]).is_err());
        assert!(Cli::try_parse_from(["hexglobe", "a.csv", "b.csv"]).is_err());
    }
}
