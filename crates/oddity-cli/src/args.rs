//! Arguments of the `oddity` command.

use clap::Parser;

/// `oddity <description.toml> [-o out.svg] [-c settings.toml] [-s seed]`
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram description (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seed for motif placement
    #[arg(short, long, default_value_t = 0)]
    pub seed: u64,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["oddity", "diagram.toml"]).unwrap();
        assert_eq!(args.input, "diagram.toml");
        assert_eq!(args.output, "out.svg");
        assert_eq!(args.config, None);
        assert_eq!(args.seed, 0);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "oddity",
            "diagram.toml",
            "-o",
            "q1.svg",
            "-c",
            "style.toml",
            "--seed",
            "42",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.output, "q1.svg");
        assert_eq!(args.config.as_deref(), Some("style.toml"));
        assert_eq!(args.seed, 42);
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_seed_must_be_a_number() {
        assert!(Args::try_parse_from(["oddity", "diagram.toml", "--seed", "abc"]).is_err());
    }
}
