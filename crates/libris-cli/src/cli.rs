use clap::{Args, Parser, Subcommand};
use libris_shared::id::DbId;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(
        short = 's',
        long = "stdout",
        action,
        help = "Controls if it logs to stderr instead of to a file"
    )]
    pub is_to_std_out: bool,

    #[arg(long, help = "Overrides the configured server address")]
    pub server: Option<String>,

    #[arg(long, help = "Overrides the configured folder the session is stored in")]
    pub storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Logs in and stores the session
    Login {
        username: String,
        #[arg(long, env = "LIBRIS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Clears the stored session
    Logout,
    /// Shows the stored user
    Whoami,
    /// Shows where navigating to a path would end up
    Navigate { path: String },
    /// Creates a new patron account
    Register {
        username: String,
        #[arg(long, env = "LIBRIS_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    /// Shows open loans and unpaid fines
    Dashboard,
    #[command(subcommand)]
    Books(BooksCommand),
    Hold { book_id: DbId },
    Borrow { book_id: DbId },
    Return { loan_id: DbId },
    PayFine { fine_id: DbId },
    #[command(subcommand)]
    Users(UsersCommand),
    Reports,
}

#[derive(Subcommand, Debug)]
pub enum BooksCommand {
    /// Matches title or author, lists all without a query
    Search {
        #[arg(default_value = "")]
        query: String,
    },
    Show { id: DbId },
    Add(BookArgs),
    Update {
        id: DbId,
        #[command(flatten)]
        book: BookArgs,
    },
    Delete { id: DbId },
}

#[derive(Args, Debug, Clone)]
pub struct BookArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author: String,
    #[arg(long)]
    pub isbn: String,
    #[arg(long)]
    pub publisher: String,
    #[arg(long)]
    pub year: i32,
    #[arg(long)]
    pub copies: i64,
    #[arg(long)]
    pub location: String,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List,
    Show {
        id: DbId,
    },
    /// Only the given fields are changed
    Update {
        id: DbId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    Delete {
        id: DbId,
    },
}
