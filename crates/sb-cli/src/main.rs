//! CLI frontend for the Storybuilder story compiler.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{KindArg, NodeArg};

#[derive(Parser)]
#[command(
    name = "storybuilder",
    about = "Storybuilder: compile story projects into outline, plot, script and novel",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log build progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project with template files
    #[command(visible_alias = "i")]
    Init {
        /// Project directory (created if missing)
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Book title (default: the directory name)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Render the project into build/
    #[command(visible_alias = "b")]
    Build {
        /// Build the outline
        #[arg(long)]
        outline: bool,

        /// Build the plot
        #[arg(long)]
        plot: bool,

        /// Build the script
        #[arg(long)]
        script: bool,

        /// Build the novel
        #[arg(long)]
        novel: bool,

        /// Add year, date and camera to script scene headings
        #[arg(long)]
        detail: bool,

        /// Project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Create a new file from its template
    #[command(visible_alias = "n")]
    Add {
        /// File kind
        kind: KindArg,

        /// File id
        name: String,

        /// Project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Open a file in $EDITOR
    #[command(visible_alias = "e")]
    Edit {
        /// File kind (book and order need no name)
        kind: KindArg,

        /// File id (default: main)
        name: Option<String>,

        /// Project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Move a file into trash/
    #[command(visible_alias = "t")]
    Delete {
        /// File kind
        kind: KindArg,

        /// File id
        name: String,

        /// Project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Rename a file (and its entry in the order document)
    #[command(visible_alias = "c")]
    Rename {
        /// File kind
        kind: KindArg,

        /// Current id
        old: String,

        /// New id
        new: String,

        /// Project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// List files of a kind, or print the order document
    #[command(visible_alias = "l")]
    List {
        /// File kind, or `order`
        kind: KindArg,

        /// Project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Append a chapter, episode or scene to the order document
    #[command(visible_alias = "p")]
    Push {
        /// Node level
        kind: NodeArg,

        /// Node id
        name: String,

        /// Parent chapter (for an episode) or episode (for a scene)
        #[arg(long)]
        to: Option<String>,

        /// Chapter holding the parent episode, when its id is not unique
        #[arg(long)]
        chapter: Option<String>,

        /// Project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Remove a chapter, episode or scene from the order document
    #[command(visible_alias = "r")]
    Reject {
        /// Node level
        kind: NodeArg,

        /// Node id
        name: String,

        /// Project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Permanently remove everything in trash/
    #[command(visible_alias = "w")]
    ClearTrash {
        /// Project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init { dir, title } => commands::init::run(&dir, title.as_deref()),
        Commands::Build {
            outline,
            plot,
            script,
            novel,
            detail,
            dir,
        } => commands::build::run(
            &dir,
            commands::build::Selection {
                outline,
                plot,
                script,
                novel,
                detail,
            },
        ),
        Commands::Add { kind, name, dir } => commands::add::run(&dir, kind, &name),
        Commands::Edit { kind, name, dir } => commands::edit::run(&dir, kind, name.as_deref()),
        Commands::Delete { kind, name, dir } => commands::delete::run(&dir, kind, &name),
        Commands::Rename { kind, old, new, dir } => commands::rename::run(&dir, kind, &old, &new),
        Commands::List { kind, dir } => commands::list::run(&dir, kind),
        Commands::Push {
            kind,
            name,
            to,
            chapter,
            dir,
        } => commands::order::push(&dir, kind, &name, to.as_deref(), chapter.as_deref()),
        Commands::Reject { kind, name, dir } => commands::order::reject(&dir, kind, &name),
        Commands::ClearTrash { dir } => commands::clear_trash::run(&dir),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
