use super::*;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["pizzadb-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["pizzadb-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["pizzadb-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn run_defaults_to_the_rest_store() {
    let cli = Cli::try_parse_from(["pizzadb-cli", "run"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            dry_run: false,
            postgres: false
        })
    ));
}

#[test]
fn run_accepts_dry_run() {
    let cli =
        Cli::try_parse_from(["pizzadb-cli", "run", "--dry-run"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            dry_run: true,
            postgres: false
        })
    ));
}

#[test]
fn run_rejects_dry_run_with_postgres() {
    let result = Cli::try_parse_from(["pizzadb-cli", "run", "--dry-run", "--postgres"]);
    assert!(result.is_err());
}

#[test]
fn vendors_list_defaults_limit() {
    let cli =
        Cli::try_parse_from(["pizzadb-cli", "vendors", "list"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Vendors {
            command: VendorsCommands::List {
                limit: 50,
                postgres: false
            }
        })
    ));
}

#[test]
fn vendors_list_with_limit_and_postgres() {
    let cli = Cli::try_parse_from(["pizzadb-cli", "vendors", "list", "--limit", "5", "--postgres"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Vendors {
            command: VendorsCommands::List {
                limit: 5,
                postgres: true
            }
        })
    ));
}

#[test]
fn vendors_list_rejects_non_numeric_limit() {
    let result = Cli::try_parse_from(["pizzadb-cli", "vendors", "list", "--limit", "many"]);
    assert!(result.is_err());
}
