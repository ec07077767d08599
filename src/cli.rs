use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "phonochart",
    version,
    about = "Interactive phonetic chart with follow-along replay"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the chart window.
    Chart(ChartArgs),
    /// Print the catalog symbols and their audio paths.
    List(CatalogArgs),
    /// Replay the given symbols in order without opening a window.
    Play(PlayArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// JSON catalog replacing the built-in symbol set.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct PlaybackArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
    /// Directory that relative audio paths are resolved against.
    #[arg(long = "assets-path", value_name = "DIR")]
    pub assets_path: Option<PathBuf>,
    /// Pause after each clip during follow-along replay, in milliseconds.
    #[arg(long = "pause-ms", default_value_t = 500)]
    pub pause_ms: u64,
}

#[derive(Args, Debug, Clone)]
pub struct ChartArgs {
    #[command(flatten)]
    pub playback: PlaybackArgs,
    /// How often to check for speech voices, in milliseconds.
    #[arg(long = "voice-poll-ms", default_value_t = 100)]
    pub voice_poll_ms: u64,
    /// Give up on the spoken welcome after this many milliseconds.
    #[arg(long = "voice-timeout-ms", default_value_t = 5_000)]
    pub voice_timeout_ms: u64,
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub playback: PlaybackArgs,
    /// Symbols to replay, e.g. `a b e`.
    #[arg(required = true, value_name = "SYMBOL")]
    pub symbols: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn chart_defaults() {
        let cli = Cli::try_parse_from(["phonochart", "chart"]).unwrap();
        let Command::Chart(args) = cli.command else {
            panic!("expected chart command");
        };
        assert_eq!(args.playback.pause_ms, 500);
        assert_eq!(args.voice_poll_ms, 100);
        assert_eq!(args.voice_timeout_ms, 5_000);
        assert!(args.playback.assets_path.is_none());
        assert!(args.playback.catalog.catalog.is_none());
    }

    #[test]
    fn play_collects_symbols_in_order() {
        let cli = Cli::try_parse_from([
            "phonochart",
            "play",
            "--pause-ms",
            "50",
            "--catalog",
            "custom.json",
            "b",
            "a",
            "b",
        ])
        .unwrap();
        let Command::Play(args) = cli.command else {
            panic!("expected play command");
        };
        assert_eq!(args.symbols, ["b", "a", "b"]);
        assert_eq!(args.playback.pause_ms, 50);
        assert_eq!(
            args.playback.catalog.catalog.as_deref(),
            Some(std::path::Path::new("custom.json"))
        );
    }

    #[test]
    fn play_requires_symbols() {
        assert!(Cli::try_parse_from(["phonochart", "play"]).is_err());
    }
}
