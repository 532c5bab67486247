use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// "0.3.2" for release builds, "0.3.2@abc1234" when built from a git checkout.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "scriptdeck", bin_name = "scriptdeck", version = get_version())]
#[command(about = "Outline a screenplay on a fixed deck of 70 cards", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project directory (defaults to the last opened project)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the project layout and set title/author
    Init {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,
    },

    /// List the cards
    #[command(alias = "ls")]
    List {
        /// Only cards with a title or body
        #[arg(short, long)]
        authored: bool,
    },

    /// Show one or more cards in full
    View {
        #[arg(required = true, num_args = 1..)]
        positions: Vec<usize>,
    },

    /// Set a card's title
    Rename {
        position: usize,

        /// New title; words are joined with spaces. Omit to clear it.
        title: Vec<String>,
    },

    /// Exchange the contents of two cards
    Swap { a: usize, b: usize },

    /// Edit a card in $EDITOR
    Edit { position: usize },

    /// Replace a card's body
    Write {
        position: usize,

        text: Option<String>,

        /// Read the body from stdin
        #[arg(long, conflicts_with = "text")]
        stdin: bool,
    },

    /// Print the outline
    Outline {
        /// Without written markers, exactly as exported
        #[arg(long)]
        plain: bool,
    },

    /// Export to screenplay, fountain or outline
    Export {
        #[arg(default_value = "screenplay")]
        format: String,
    },

    /// Copy a card body, or the outline, to the clipboard
    Copy {
        /// Card position or "outline"
        target: String,
    },

    /// Print the file path of a card
    Path { position: usize },

    /// Manage known projects
    Projects {
        #[command(subcommand)]
        action: Option<ProjectsAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectsAction {
    /// List known projects
    List,

    /// Remove a project from the list (files are kept)
    Forget { name: String },

    /// Delete a project directory and remove it from the list
    Delete {
        name: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rename_joins_words() {
        let cli = Cli::parse_from(["scriptdeck", "rename", "1", "Opening", "Image"]);
        match cli.command {
            Some(Commands::Rename { position, title }) => {
                assert_eq!(position, 1);
                assert_eq!(title.join(" "), "Opening Image");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_global_project_flag_after_subcommand() {
        let cli = Cli::parse_from(["scriptdeck", "list", "-p", "/tmp/script"]);
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/script")));
    }

    #[test]
    fn test_write_text_conflicts_with_stdin() {
        assert!(Cli::try_parse_from(["scriptdeck", "write", "3", "hello", "--stdin"]).is_err());
    }

    #[test]
    fn test_projects_forget() {
        let cli = Cli::parse_from(["scriptdeck", "projects", "forget", "night-train"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Projects {
                action: Some(ProjectsAction::Forget { .. })
            })
        ));
    }
}
