use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON config file, re-read before every cycle.
    #[arg(default_value = "config.json")]
    pub config: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_defaults_to_config_json() {
        let cli = Cli::try_parse_from(["stock-lens"]).unwrap();
        assert_eq!(cli.config, "config.json");
    }

    #[test]
    fn test_config_path_from_argument() {
        let cli = Cli::try_parse_from(["stock-lens", "conf/asx.json"]).unwrap();
        assert_eq!(cli.config, "conf/asx.json");
    }

    #[test]
    fn test_extra_arguments_rejected() {
        assert!(Cli::try_parse_from(["stock-lens", "a.json", "b.json"]).is_err());
    }
}
