mod admin;
mod books;
mod circulation;
mod helpers;
mod login;
mod persistence;
