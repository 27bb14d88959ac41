//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
///
/// The duration components are taken as raw text and run through the
/// same sanitization as any other input source, so `--minutes abc12`
/// counts as 12 and `--hours 99` clamps to 24.
#[derive(Parser, Debug)]
#[command(name = "countdown")]
#[command(about = "Count down from a HH:MM:SS duration, one tick per second")]
#[command(version)]
pub struct Config {
    /// Hours component of the countdown (0-24)
    #[arg(short = 'H', long, default_value = "0")]
    pub hours: String,

    /// Minutes component of the countdown (0-60)
    #[arg(short = 'M', long, default_value = "0")]
    pub minutes: String,

    /// Seconds component of the countdown (0-60)
    #[arg(short = 'S', long, default_value = "0")]
    pub seconds: String,

    /// Print each frame as a JSON object instead of plain HH:MM:SS
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_zero_duration() {
        let config = Config::parse_from(["countdown"]);
        assert_eq!(config.hours, "0");
        assert_eq!(config.minutes, "0");
        assert_eq!(config.seconds, "0");
        assert!(!config.json);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn verbose_raises_log_level() {
        let config = Config::parse_from(["countdown", "--verbose"]);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn accepts_raw_component_text() {
        let config = Config::parse_from(["countdown", "-M", "1", "-S", "30"]);
        assert_eq!(config.minutes, "1");
        assert_eq!(config.seconds, "30");
    }
}
