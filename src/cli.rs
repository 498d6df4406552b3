//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, ValueEnum};
use modelcards::CardKind;
use std::path::PathBuf;

/// modelcards - model and dataset card tool
///
/// Read, create, validate and publish Hugging Face repo cards.
#[derive(Parser, Debug)]
#[command(
    name = "modelcards",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Read, create, validate and publish model and dataset cards",
    long_about = "modelcards works with the README.md cards of Hugging Face model and dataset \
                  repositories: YAML metadata between two `---` lines followed by Markdown.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  modelcards show ./README.md\n    \
                  modelcards show user/my-model --format yaml\n    \
                  modelcards new --license mit --tag pytorch --output README.md\n    \
                  modelcards validate ./README.md\n    \
                  modelcards push ./README.md user/my-model --create-pr"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Hub base URL
    #[arg(long, global = true, env = "HF_ENDPOINT", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Hub access token
    #[arg(long, global = true, env = "HF_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a card from a local file or a Hub repository
    Show(ShowArgs),

    /// Create a card from a template
    New(NewArgs),

    /// Validate card metadata against the Hub schema
    Validate(ValidateArgs),

    /// Push a card to a Hub repository
    Push(PushArgs),
}

/// Card subject, as accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KindArg {
    #[default]
    Model,
    Dataset,
}

impl From<KindArg> for CardKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Model => CardKind::Model,
            KindArg::Dataset => CardKind::Dataset,
        }
    }
}

/// Output format of the show command
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShowFormat {
    #[default]
    Summary,
    Yaml,
    Json,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show a local card:\n    modelcards show ./README.md\n\n\
                  Show a dataset card from the Hub:\n    modelcards show user/my-dataset --kind dataset\n\n\
                  Print metadata as JSON:\n    modelcards show ./README.md --format json")]
pub struct ShowArgs {
    /// Local path or repository id
    pub source: String,

    /// Card subject
    #[arg(long, value_enum, default_value_t)]
    pub kind: KindArg,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: ShowFormat,

    /// Revision to download (branch, tag or commit)
    #[arg(long)]
    pub revision: Option<String>,
}

/// Arguments for the new command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Create a model card from the bundled template:\n    modelcards new --license mit --language en --output README.md\n\n\
                  Use a custom template with extra variables:\n    modelcards new --template card.md --var model_id=my-model --output README.md\n\n\
                  Create a dataset card:\n    modelcards new --kind dataset --var pretty_name=Beans --output README.md")]
pub struct NewArgs {
    /// Card subject
    #[arg(long, value_enum, default_value_t)]
    pub kind: KindArg,

    /// Template file (defaults to the bundled template)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Language code (repeatable)
    #[arg(long = "language", value_name = "LANG")]
    pub languages: Vec<String>,

    /// License identifier
    #[arg(long)]
    pub license: Option<String>,

    /// Library name
    #[arg(long)]
    pub library_name: Option<String>,

    /// Tag (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Dataset id (repeatable)
    #[arg(long = "dataset", value_name = "DATASET")]
    pub datasets: Vec<String>,

    /// Metric id (repeatable)
    #[arg(long = "metric", value_name = "METRIC")]
    pub metrics: Vec<String>,

    /// Template variable (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Where to write the card
    #[arg(long, short = 'o')]
    pub output: PathBuf,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Validate a local card:\n    modelcards validate ./README.md\n\n\
                  Validate a dataset card on the Hub:\n    modelcards validate user/my-dataset --kind dataset")]
pub struct ValidateArgs {
    /// Local path or repository id
    pub source: String,

    /// Card subject
    #[arg(long, value_enum, default_value_t)]
    pub kind: KindArg,
}

/// Arguments for the push command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Push a card:\n    modelcards push ./README.md user/my-model\n\n\
                  Open a pull request instead:\n    modelcards push ./README.md user/my-model --create-pr\n\n\
                  Push to a branch with a message:\n    modelcards push ./README.md user/my-model --revision dev -m \"Update card\"")]
pub struct PushArgs {
    /// Local card file
    pub path: PathBuf,

    /// Target repository id
    pub repo_id: String,

    /// Card subject
    #[arg(long, value_enum, default_value_t)]
    pub kind: KindArg,

    /// Branch to commit to
    #[arg(long)]
    pub revision: Option<String>,

    /// Commit message
    #[arg(long, short = 'm')]
    pub commit_message: Option<String>,

    /// Commit description
    #[arg(long)]
    pub commit_description: Option<String>,

    /// Open a pull request instead of committing directly
    #[arg(long)]
    pub create_pr: bool,
}
