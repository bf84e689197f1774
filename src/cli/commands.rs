use clap::{Args, Parser, ValueEnum};
use mdhelp::config::Mode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mdhelp")]
#[command(version)]
#[command(disable_help_subcommand = true)]
#[command(about = "Render markdown help pages in the terminal")]
#[command(
    long_about = "mdhelp - Render a project's markdown help in the terminal.\n\n\
    Headings, lists, quotes, code blocks and tables are drawn with ANSI styling\n\
    sized to the terminal. Images are shown inline where the terminal supports it.\n\n\
    Examples:\n  \
    mdhelp help                    # Render ./README.md\n  \
    mdhelp help docs/plan.md       # Render another file\n  \
    mdhelp help --titles           # Print the heading outline\n  \
    mdhelp help --titles -o json   # Outline as JSON"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// Diagnostics go to stderr. MDHELP_LOG overrides this flag.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Show the help document
    ///
    /// Renders the markdown file to the terminal, or prints its heading
    /// outline with --titles.
    Help(HelpArgs),
}

#[derive(Debug, Args)]
pub struct HelpArgs {
    /// Markdown file to show (default: README.md in the root directory)
    pub file: Option<PathBuf>,

    /// Print the heading outline instead of the rendered document
    #[arg(long = "titles")]
    pub titles: bool,

    /// Output format for --titles
    ///
    ///   plain - Indented bullet list (default)
    ///   json  - JSON array with name, subTitles, location and level
    #[arg(short = 'o', long = "output", default_value = "plain", requires = "titles")]
    pub output: OutputFormat,

    /// Directory relative image paths are resolved against
    ///
    /// Defaults to the directory containing the markdown file.
    #[arg(short = 'C', long = "root", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Render for a fixed width instead of querying the terminal
    #[arg(long = "columns", value_name = "N")]
    pub columns: Option<u16>,

    /// When to emit ANSI colors
    #[arg(long = "color", value_name = "WHEN")]
    pub color: Option<Mode>,

    /// When to draw images inline
    #[arg(long = "images", value_name = "WHEN")]
    pub images: Option<Mode>,
}

impl HelpArgs {
    /// The markdown file and the root directory it is rendered against.
    pub fn locate(&self) -> (PathBuf, PathBuf) {
        match (&self.file, &self.root) {
            (Some(file), Some(root)) => (file.clone(), root.clone()),
            (Some(file), None) => {
                let root = file
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("."));
                (file.clone(), root)
            }
            (None, Some(root)) => (root.join("README.md"), root.clone()),
            (None, None) => (PathBuf::from("README.md"), PathBuf::from(".")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn help(args: &[&str]) -> HelpArgs {
        let cli = Cli::try_parse_from(std::iter::once("mdhelp").chain(args.iter().copied())).unwrap();
        match cli.command {
            Command::Help(args) => args,
        }
    }

    #[test]
    fn test_defaults_to_readme_in_cwd() {
        let (file, root) = help(&["help"]).locate();
        assert_eq!(file, Path::new("README.md"));
        assert_eq!(root, Path::new("."));
    }

    #[test]
    fn test_root_comes_from_file_parent() {
        let (file, root) = help(&["help", "plan/docs/guide.md"]).locate();
        assert_eq!(file, Path::new("plan/docs/guide.md"));
        assert_eq!(root, Path::new("plan/docs"));
    }

    #[test]
    fn test_root_flag_picks_readme() {
        let (file, root) = help(&["help", "-C", "plan"]).locate();
        assert_eq!(file, Path::new("plan/README.md"));
        assert_eq!(root, Path::new("plan"));
    }

    #[test]
    fn test_flags_parse() {
        let args = help(&[
            "help", "--titles", "-o", "json", "--columns", "60", "--color", "never", "--images",
            "always",
        ]);
        assert!(args.titles);
        assert_eq!(args.output, OutputFormat::Json);
        assert_eq!(args.columns, Some(60));
        assert_eq!(args.color, Some(Mode::Never));
        assert_eq!(args.images, Some(Mode::Always));
    }

    #[test]
    fn test_help_subcommand_takes_titles_and_file() {
        let args = help(&["help", "--titles", "x.md"]);
        assert!(args.titles);
        assert_eq!(args.file.as_deref(), Some(Path::new("x.md")));
    }

    #[test]
    fn test_help_subcommand_takes_columns() {
        let args = help(&["help", "--columns", "30", "x.md"]);
        assert!(!args.titles);
        assert_eq!(args.columns, Some(30));
    }

    #[test]
    fn test_output_format_requires_titles() {
        assert!(Cli::try_parse_from(["mdhelp", "help", "-o", "json", "x.md"]).is_err());
        assert_eq!(help(&["help", "x.md"]).output, OutputFormat::Plain);
    }

    #[test]
    fn test_command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["mdhelp", "help", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
