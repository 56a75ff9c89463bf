use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use sea_orm::prelude::Uuid;
use sea_orm::*;
use tracing_subscriber::EnvFilter;

use crud_server::database;
use crud_server::entity::{note, person};
use crud_server::models::note::NoteRequest;
use crud_server::models::person::{PersonRequest, duplicate_name};

#[derive(Parser)]
#[command(name = "crud", version, about = "Seed and query the resource collections")]
struct Cli {
    /// Database connection string
    #[arg(
        long,
        global = true,
        env = "DATABASE_URL",
        default_value = "sqlite://crud.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Phonebook entries
    #[command(subcommand)]
    Persons(PersonsCommand),
    /// Notes
    #[command(subcommand)]
    Notes(NotesCommand),
}

#[derive(Subcommand)]
enum PersonsCommand {
    /// Add a person to the phonebook
    Add { name: String, number: String },
    /// Print every phonebook entry
    List,
}

#[derive(Subcommand)]
enum NotesCommand {
    /// Save a note
    Add {
        content: String,
        #[arg(long)]
        important: bool,
    },
    /// Print every note
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let db = database::init_db(&cli.database_url)
        .await
        .context("Failed to open database")?;
    database::create_tables(&db)
        .await
        .context("Failed to connect to database")?;

    let result = match cli.command {
        Command::Persons(PersonsCommand::Add { name, number }) => add_person(&db, name, number).await,
        Command::Persons(PersonsCommand::List) => list_persons(&db).await,
        Command::Notes(NotesCommand::Add { content, important }) => {
            add_note(&db, content, important).await
        }
        Command::Notes(NotesCommand::List) => list_notes(&db).await,
    };

    db.close().await.context("Failed to close database")?;
    result
}

async fn add_person(db: &DatabaseConnection, name: String, number: String) -> Result<()> {
    let new_person = PersonRequest {
        name: Some(name),
        number: Some(number),
    }
    .validate()?;

    let taken = person::Entity::find()
        .filter(person::Column::Name.eq(new_person.name.as_str()))
        .one(db)
        .await?;
    if taken.is_some() {
        bail!(duplicate_name(&new_person.name));
    }

    let saved = person::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(new_person.name),
        number: Set(new_person.number),
        version: Set(0),
    }
    .insert(db)
    .await?;

    println!("added {} number {} to phonebook", saved.name, saved.number);
    Ok(())
}

async fn list_persons(db: &DatabaseConnection) -> Result<()> {
    let persons = person::Entity::find()
        .order_by_asc(person::Column::Id)
        .all(db)
        .await?;

    println!("phonebook:");
    for p in &persons {
        println!("{}", person_line(p));
    }
    Ok(())
}

async fn add_note(db: &DatabaseConnection, content: String, important: bool) -> Result<()> {
    let new_note = NoteRequest {
        content: Some(content),
        important: Some(important),
    }
    .validate()?;

    note::ActiveModel {
        id: Set(Uuid::now_v7()),
        content: Set(new_note.content),
        important: Set(new_note.important),
        version: Set(0),
    }
    .insert(db)
    .await?;

    println!("note saved!");
    Ok(())
}

async fn list_notes(db: &DatabaseConnection) -> Result<()> {
    let notes = note::Entity::find()
        .order_by_asc(note::Column::Id)
        .all(db)
        .await?;

    for n in &notes {
        println!("{}", note_line(n));
    }
    Ok(())
}

fn person_line(p: &person::Model) -> String {
    format!("* {} | {}", p.name, p.number)
}

fn note_line(n: &note::Model) -> String {
    let marker = if n.important { "!" } else { "-" };
    format!("{marker} {} ({})", n.content, n.id)
}
