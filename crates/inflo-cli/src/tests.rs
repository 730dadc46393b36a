use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["inflo"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_create_with_defaults() {
    let cli = Cli::try_parse_from(["inflo", "create", "--name", "Spring Launch"])
        .expect("expected valid cli args");
    let Some(Commands::Create(args)) = cli.command else {
        panic!("expected create");
    };
    let draft = args.into_draft();
    assert_eq!(draft.campaign_name, "Spring Launch");
    assert_eq!(draft.platform, "Instagram");
    assert!(draft.goal.is_empty());
    assert!(draft.budget.is_none());
}

#[test]
fn parses_create_budget_as_decimal() {
    let cli = Cli::try_parse_from([
        "inflo", "create", "--name", "X", "--brand", "Acme", "--budget", "2500.50",
    ])
    .unwrap();
    let Some(Commands::Create(args)) = cli.command else {
        panic!("expected create");
    };
    assert_eq!(args.brand_name, "Acme");
    assert_eq!(args.budget.map(|b| b.to_string()).as_deref(), Some("2500.50"));
}

#[test]
fn rejects_non_numeric_budget() {
    assert!(Cli::try_parse_from(["inflo", "create", "--name", "X", "--budget", "lots"]).is_err());
}

#[test]
fn create_requires_a_name() {
    assert!(Cli::try_parse_from(["inflo", "create"]).is_err());
}

#[test]
fn parses_search_filters() {
    let cli = Cli::try_parse_from([
        "inflo",
        "search",
        "--campaign",
        "c-1",
        "--niche",
        "tech",
        "--followers-max",
        "50000",
        "--age-range",
        "18-24",
        "--location",
        "US",
    ])
    .unwrap();
    let Some(Commands::Search(args)) = cli.command else {
        panic!("expected search");
    };
    let (choice, filters) = args.into_parts();
    assert_eq!(choice.as_deref(), Some("c-1"));
    assert_eq!(filters.niche.as_deref(), Some("tech"));
    assert_eq!(filters.followers_max, Some(50_000));
    assert_eq!(filters.audience_age_range.as_deref(), Some("18-24"));
    assert_eq!(filters.audience_location.as_deref(), Some("US"));
    assert!(filters.platform.is_none());
}

#[test]
fn add_collects_repeated_ids() {
    let cli = Cli::try_parse_from(["inflo", "add", "--id", "a", "--id", "b"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Add { ref ids, campaign: None }) if ids == &["a", "b"]
    ));
}

#[test]
fn add_requires_an_id() {
    assert!(Cli::try_parse_from(["inflo", "add"]).is_err());
}

#[test]
fn email_takes_optional_template() {
    let cli = Cli::try_parse_from(["inflo", "email", "--id", "a", "--template", "Hi there"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Email { template: Some(ref t), .. }) if t == "Hi there"
    ));
}

#[test]
fn open_defaults_to_instagram() {
    let cli = Cli::try_parse_from(["inflo", "open", "bob"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Open { ref username, ref platform })
            if username == "bob" && platform == "Instagram"
    ));
}

#[test]
fn parses_session_clear() {
    let cli = Cli::try_parse_from(["inflo", "session", "clear"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Session {
            command: SessionCommands::Clear
        })
    ));
}

#[test]
fn parses_avatar_output_path() {
    let cli = Cli::try_parse_from([
        "inflo",
        "avatar",
        "https://cdn.example.com/a.jpg",
        "-o",
        "a.jpg",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Avatar { ref out, .. }) if out == &PathBuf::from("a.jpg")
    ));
}
