//! Command-line surface.

use clap::Parser;
use spawnwatch_watcher::WatchConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spawnwatch")]
#[command(author = "Spawnwatch Contributors")]
#[command(version)]
#[command(
    about = "Run a command for every file created under a directory tree",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Trigger the command for new directories too
    #[arg(long)]
    pub include_dirs: bool,

    /// Ignore hidden files and directories
    #[arg(long)]
    pub ignore_hidden: bool,

    /// Directory to watch, recursively
    #[arg(value_name = "DIRECTORY_TO_WATCH")]
    pub directory: PathBuf,

    /// Command to run, followed by its leading arguments. Everything
    /// from the command name on is passed through untouched; the new
    /// path is appended as the last argument.
    #[arg(
        value_name = "COMMAND",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// Splits the trailing vector into program and arguments.
    pub fn into_config(self) -> WatchConfig {
        let mut command = self.command.into_iter();
        let program = command.next().unwrap_or_default();

        WatchConfig {
            root: self.directory,
            command: program,
            args: command.collect(),
            include_dirs: self.include_dirs,
            ignore_hidden: self.ignore_hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("spawnwatch").chain(args.iter().copied()))
    }

    #[test]
    fn test_minimal_invocation() {
        let config = parse(&["/tmp/root", "echo", "hello"]).unwrap().into_config();
        assert_eq!(config.root, PathBuf::from("/tmp/root"));
        assert_eq!(config.command, "echo");
        assert_eq!(config.args, vec!["hello"]);
        assert!(!config.include_dirs);
        assert!(!config.ignore_hidden);
    }

    #[test]
    fn test_flags() {
        let config = parse(&["--include-dirs", "--ignore-hidden", "/tmp/root", "mycmd"])
            .unwrap()
            .into_config();
        assert!(config.include_dirs);
        assert!(config.ignore_hidden);
        assert!(config.args.is_empty());
    }

    #[test]
    fn test_command_arguments_are_passed_through() {
        let config = parse(&["/tmp/root", "ls", "-l"]).unwrap().into_config();
        assert_eq!(config.command, "ls");
        assert_eq!(config.args, vec!["-l"]);
    }

    #[test]
    fn test_own_flags_after_command_belong_to_command() {
        let cli = parse(&["/tmp/root", "grep", "-v", "foo"]).unwrap();
        assert!(!cli.verbose);
        let config = cli.into_config();
        assert_eq!(config.command, "grep");
        assert_eq!(config.args, vec!["-v", "foo"]);

        let config = parse(&["/tmp/root", "cmd", "--ignore-hidden", "--include-dirs"])
            .unwrap()
            .into_config();
        assert!(!config.ignore_hidden);
        assert!(!config.include_dirs);
        assert_eq!(config.args, vec!["--ignore-hidden", "--include-dirs"]);
    }

    #[test]
    fn test_help_and_version_after_command_belong_to_command() {
        let config = parse(&["/tmp/root", "ls", "--help"]).unwrap().into_config();
        assert_eq!(config.command, "ls");
        assert_eq!(config.args, vec!["--help"]);

        let config = parse(&["/tmp/root", "grep", "-V"]).unwrap().into_config();
        assert_eq!(config.args, vec!["-V"]);
    }

    #[test]
    fn test_missing_command_is_an_error() {
        let err = parse(&["/tmp/root"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.use_stderr());
    }

    #[test]
    fn test_help_is_not_an_error() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());
    }
}
