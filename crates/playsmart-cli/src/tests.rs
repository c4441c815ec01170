use super::*;

#[test]
fn parses_run_command() {
    let cli = Cli::try_parse_from(["playsmart", "run"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Run));
}

#[test]
fn show_defaults_to_twenty_rows_without_filters() {
    let cli = Cli::try_parse_from(["playsmart", "show"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Show {
            min_discount: None,
            max_price: None,
            limit: 20
        }
    ));
}

#[test]
fn show_parses_decimal_filters() {
    let cli = Cli::try_parse_from([
        "playsmart",
        "show",
        "--min-discount",
        "50",
        "--max-price",
        "9.99",
        "--limit",
        "5",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Show {
            min_discount,
            max_price,
            limit,
        } => {
            assert_eq!(min_discount, Some(Decimal::new(50, 0)));
            assert_eq!(max_price, Some(Decimal::new(999, 2)));
            assert_eq!(limit, 5);
        }
        other => panic!("expected Show, got {other:?}"),
    }
}

#[test]
fn show_rejects_non_numeric_discount() {
    let result = Cli::try_parse_from(["playsmart", "show", "--min-discount", "lots"]);
    assert!(result.is_err());
}

#[test]
fn parses_stores_command() {
    let cli = Cli::try_parse_from(["playsmart", "stores"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Stores));
}

#[test]
fn game_requires_an_id() {
    assert!(Cli::try_parse_from(["playsmart", "game"]).is_err());

    let cli = Cli::try_parse_from(["playsmart", "game", "612"]).expect("expected valid cli args");
    match cli.command {
        Commands::Game { id } => assert_eq!(id, "612"),
        other => panic!("expected Game, got {other:?}"),
    }
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["playsmart"]).is_err());
}
