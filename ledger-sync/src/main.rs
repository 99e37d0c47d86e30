//! `ledger`: dispatch one sync operation against the remote API and print the
//! resulting entity state.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ledger_sync::core::entity::{Entity, EntityId};
use ledger_sync::core::ordering::SortDirective;
use ledger_sync::exit_codes;
use ledger_sync::io::config::load_config;
use ledger_sync::io::gateway::Gateway;
use ledger_sync::logging;
use ledger_sync::slice::{EntitySlice, Settled};
use ledger_sync::store::Store;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Synchronize expenses, groups and user profiles with the remote API"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "ledger.toml")]
    config: PathBuf,

    /// Override the API origin from the configuration file.
    #[arg(long)]
    base_url: Option<String>,

    #[arg(value_enum)]
    entity: EntityKind,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum EntityKind {
    Expense,
    Group,
    UserProfile,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Action {
    /// Fetch the collection, optionally ordered by `field,asc|desc`.
    List {
        #[arg(long)]
        sort: Option<String>,
    },
    /// Fetch one record.
    Get { id: EntityId },
    /// Create a record from JSON.
    Create { json: String },
    /// Replace a record from JSON (must carry its id).
    Update { json: String },
    /// Partially update a record from JSON (must carry its id).
    Patch { json: String },
    /// Delete a record.
    Delete { id: EntityId },
}

#[tokio::main]
async fn main() {
    logging::init();
    let code = match run(Cli::parse()).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<i32> {
    let mut config = load_config(&cli.config)?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    let store = Store::connect(&config)?;
    debug!(entity = ?cli.entity, action = ?cli.action, "dispatching");

    let (settled, state) = match cli.entity {
        EntityKind::Expense => dispatch(store.expenses(), cli.action).await?,
        EntityKind::Group => dispatch(store.groups(), cli.action).await?,
        EntityKind::UserProfile => dispatch(store.user_profiles(), cli.action).await?,
    };
    println!("{state}");

    Ok(match settled {
        Settled::Fulfilled(()) => exit_codes::OK,
        Settled::Rejected { message } => {
            eprintln!("error: {message}");
            exit_codes::REJECTED
        }
    })
}

/// Run `action` on `slice`, wait for dependent refetches and render the state.
async fn dispatch<T: Entity, G: Gateway>(
    slice: &EntitySlice<T, G>,
    action: Action,
) -> Result<(Settled, String)> {
    let settled = match action {
        Action::List { sort } => {
            let sort = sort.as_deref().and_then(SortDirective::parse);
            slice.fetch_list(sort).await
        }
        Action::Get { id } => discard(slice.fetch_one(id).await),
        Action::Create { json } => discard(slice.create(parse_record(&json)?).await),
        Action::Update { json } => discard(slice.update(parse_record(&json)?).await),
        Action::Patch { json } => discard(slice.partial_update(parse_record(&json)?).await),
        Action::Delete { id } => slice.delete(id).await,
    };
    slice.settle_dependents().await;
    let state =
        serde_json::to_string_pretty(&slice.snapshot()).context("serialize entity state")?;
    Ok((settled, state))
}

fn parse_record<T: Entity>(json: &str) -> Result<T> {
    serde_json::from_str(json).with_context(|| format!("parse {} record json", T::NAME))
}

fn discard<P>(settled: Settled<P>) -> Settled {
    match settled {
        Settled::Fulfilled(_) => Settled::Fulfilled(()),
        Settled::Rejected { message } => Settled::Rejected { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_with_sort() {
        let cli = Cli::parse_from(["ledger", "expense", "list", "--sort", "amount,desc"]);
        assert_eq!(cli.entity, EntityKind::Expense);
        assert_eq!(
            cli.action,
            Action::List {
                sort: Some("amount,desc".to_string())
            }
        );
    }

    #[test]
    fn parse_kebab_entity_and_numeric_id() {
        let cli = Cli::parse_from(["ledger", "user-profile", "delete", "7"]);
        assert_eq!(cli.entity, EntityKind::UserProfile);
        assert_eq!(cli.action, Action::Delete { id: EntityId::Number(7) });
    }

    #[test]
    fn parse_base_url_override() {
        let cli = Cli::parse_from([
            "ledger",
            "--base-url",
            "http://localhost:1",
            "group",
            "get",
            "abc",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:1"));
        assert_eq!(cli.action, Action::Get { id: EntityId::Text("abc".to_string()) });
    }

    #[test]
    fn parse_record_reports_entity_name() {
        let err = parse_record::<ledger_sync::model::Group>("{").expect_err("invalid json");
        assert!(format!("{err:#}").contains("group"));
    }
}
