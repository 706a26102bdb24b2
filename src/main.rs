use std::{
    env,
    error::Error,
    io::{self, Write},
};

use library_ledger::{CatalogueItem, Genre, Library, LibraryConfig, Person, Summary};
use tracing_subscriber::EnvFilter;

/// Load the configuration named on the command line, or fall back to defaults
fn load_config() -> Result<LibraryConfig, Box<dyn Error>> {
    let Some(path) = env::args().nth(1) else {
        return Ok(LibraryConfig::named("Sheffield Central Library"));
    };
    Ok(LibraryConfig::from_file(path)?)
}

/// Wire up a demo library and print its reports
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let mut library = Library::from_config(load_config()?);

    let clean_code = CatalogueItem::book("Clean Code", Person::parse("Robert Martin")?)
        .with_isbn("9780136083238")
        .with_year(2008)
        .with_genre(Genre::Unspecified)
        .with_copies(1)?;
    let isbn = clean_code.isbn().to_string();
    library.add_item(clean_code);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    library.print_catalogue(&mut out)?;

    let borrower = Person::parse("Michael Udo")?;
    let first = library.loan_item(&isbn, borrower.clone())?;
    if let Some(loan) = library.loan(first) {
        write!(out, "{}", loan.receipt())?;
    }
    library.return_item(first)?;
    library.print_overdue(&mut out)?;

    library.add_item(CatalogueItem::magazine("Sports Today", 2024, 1));
    match library.loan_item("Sports Today", borrower) {
        Ok(id) => {
            if let Some(loan) = library.loan(id) {
                writeln!(out, "Magazine loaned successfully: {}", loan.summary())?;
            }
        }
        Err(e) => writeln!(out, "Failed to loan magazine: {e}")?,
    }

    Ok(())
}
