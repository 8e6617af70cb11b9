use anyhow::{bail, Context as _};
use futures::channel::oneshot;
use libris_client_core::{Client, LoginOutcome, Navigation};
use libris_shared::{
    req_args::{api::BookDraft, LoginReqArgs, RegisterReqArgs},
    uac::{MessageResponse, UserProfileDiff, Username},
};
use secrecy::SecretString;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{BookArgs, BooksCommand, Command, UsersCommand};

/// Runs a single command against `client`, writing the result to stdout
// Arguments may hold a password so none are recorded
#[tracing::instrument(skip_all)]
pub async fn run(command: Command, client: &Client) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => {
            let args = LoginReqArgs::new(username, SecretString::from(password));
            let outcome = receive(client.login(args, no_cb)).await?;
            match outcome {
                LoginOutcome::Authenticated(user) => {
                    println!("Logged in as {} ({})", user.name, user.role);
                }
                LoginOutcome::TokenOnly(e) => {
                    warn!(?e, "logged in without a profile");
                    println!("Logged in but the profile could not be loaded: {e}");
                }
            }
        }
        Command::Logout => {
            client.logout()?;
            println!("Logged out");
        }
        Command::Whoami => match (client.user(), client.is_authenticated()) {
            (Some(user), _) => print_json(user.as_ref())?,
            (None, true) => println!("Logged in but the profile has not been loaded"),
            (None, false) => println!("Not logged in"),
        },
        Command::Navigate { path } => println!("{}", describe_navigation(&client.navigate(&path))),
        Command::Register {
            username,
            password,
            name,
            email,
            phone,
        } => {
            let username: Username = username
                .try_into()
                .map_err(|e| anyhow::anyhow!("invalid username: {e}"))?;
            let args = RegisterReqArgs {
                username,
                password: SecretString::from(password),
                name,
                email,
                phone,
            };
            print_message(receive(client.register(args, no_cb)).await?);
        }
        Command::Dashboard => {
            let dashboard = receive(client.dashboard(no_cb)).await?;
            print_json(&dashboard)?;
            println!(
                "Outstanding fines: {:.2}",
                dashboard.outstanding_fines_total()
            );
        }
        Command::Books(books) => run_books(books, client).await?,
        Command::Hold { book_id } => {
            print_message(receive(client.place_hold(book_id, no_cb)).await?)
        }
        Command::Borrow { book_id } => {
            print_message(receive(client.borrow_book(book_id, no_cb)).await?)
        }
        Command::Return { loan_id } => {
            print_message(receive(client.return_book(loan_id, no_cb)).await?)
        }
        Command::PayFine { fine_id } => {
            print_message(receive(client.pay_fine(fine_id, no_cb)).await?)
        }
        Command::Users(users) => run_users(users, client).await?,
        Command::Reports => print_json(&receive(client.reports(no_cb)).await?)?,
    }
    Ok(())
}

async fn run_books(command: BooksCommand, client: &Client) -> anyhow::Result<()> {
    match command {
        BooksCommand::Search { query } => {
            let books = receive(client.search_books(query, no_cb)).await?;
            info!(count = books.len(), "books found");
            print_json(&books)?;
        }
        BooksCommand::Show { id } => print_json(&receive(client.get_book(id, no_cb)).await?)?,
        BooksCommand::Add(book) => {
            print_message(receive(client.add_book(book.into(), no_cb)).await?)
        }
        BooksCommand::Update { id, book } => {
            print_message(receive(client.update_book(id, book.into(), no_cb)).await?)
        }
        BooksCommand::Delete { id } => {
            print_message(receive(client.delete_book(id, no_cb)).await?)
        }
    }
    Ok(())
}

async fn run_users(command: UsersCommand, client: &Client) -> anyhow::Result<()> {
    match command {
        UsersCommand::List => print_json(&receive(client.list_users(no_cb)).await?)?,
        UsersCommand::Show { id } => print_json(&receive(client.get_user(id, no_cb)).await?)?,
        UsersCommand::Update {
            id,
            name,
            email,
            phone,
        } => {
            let diff = UserProfileDiff { name, email, phone };
            if diff == UserProfileDiff::default() {
                bail!("nothing to update, pass at least one of --name, --email or --phone");
            }
            print_message(receive(client.update_user(id, diff, no_cb)).await?)
        }
        UsersCommand::Delete { id } => {
            print_message(receive(client.delete_user(id, no_cb)).await?)
        }
    }
    Ok(())
}

impl From<BookArgs> for BookDraft {
    fn from(value: BookArgs) -> Self {
        Self {
            title: value.title,
            author: value.author,
            isbn: value.isbn,
            publisher: value.publisher,
            publication_year: value.year,
            total_copies: value.copies,
            location: value.location,
        }
    }
}

/// Nothing to redraw on the command line
fn no_cb() {}

async fn receive<T>(rx: oneshot::Receiver<anyhow::Result<T>>) -> anyhow::Result<T> {
    rx.await.context("response channel closed before a result was sent")?
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to format output")?;
    println!("{text}");
    Ok(())
}

fn print_message(response: MessageResponse) {
    println!("{}", response.message);
}

fn describe_navigation(navigation: &Navigation) -> String {
    match navigation {
        Navigation::Show { view, params } if params.is_empty() => format!("{view:?}"),
        Navigation::Show { view, params } => {
            let params: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
            format!("{view:?} ({})", params.join(", "))
        }
        Navigation::Redirect { to } => format!("Redirected to {to}"),
    }
}
