use artworks_core::{
    ArticClient, ArtworkTable, CatalogConfig, CatalogError, DEFAULT_BASE_URL, PageSource,
    SelectionFill, render_page, render_records,
};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "artworks-cli")]
#[command(about = "Browse and select artworks from the Art Institute of Chicago catalog")]
struct Cli {
    /// Catalog API base URL
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Per-request timeout in seconds (0 disables it)
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,
    /// Print every HTTP request made before exiting
    #[arg(long, global = true)]
    show_requests: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of artworks
    Page {
        /// Page number, starting at 1
        page: usize,
        /// Print the records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Select the first N artworks across all pages
    Select {
        /// Number of rows to select
        count: usize,
        /// Print the selected records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Browse pages interactively and build a selection
    Browse,
}

const BROWSE_HELP: &str = "\
Commands:
  n, next        next page
  p, prev        previous page
  g <page>       go to page
  t <row>        toggle row on this page (1-12)
  a              toggle every row on this page
  s <count>      select the first <count> rows across all pages
  l              list selected rows
  h              this help
  q              quit";

#[derive(Debug, PartialEq)]
enum BrowseCommand {
    Next,
    Prev,
    Goto(usize),
    Toggle(usize),
    ToggleAll,
    SelectCount(usize),
    List,
    Help,
    Quit,
}

impl BrowseCommand {
    fn parse(line: &str) -> Result<BrowseCommand, String> {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("").to_lowercase();
        let argument = parts.next();

        let number = |name: &str| -> Result<usize, String> {
            argument
                .ok_or_else(|| format!("'{}' needs a number", name))?
                .parse::<usize>()
                .map_err(|_| format!("'{}' is not a number", argument.unwrap_or_default()))
        };

        match command.as_str() {
            "n" | "next" => Ok(BrowseCommand::Next),
            "p" | "prev" => Ok(BrowseCommand::Prev),
            "g" | "goto" => number("g").map(BrowseCommand::Goto),
            "t" | "toggle" => number("t").map(BrowseCommand::Toggle),
            "a" | "all" => Ok(BrowseCommand::ToggleAll),
            "s" | "select" => number("s").map(BrowseCommand::SelectCount),
            "l" | "list" => Ok(BrowseCommand::List),
            "h" | "help" | "?" => Ok(BrowseCommand::Help),
            "q" | "quit" | "exit" => Ok(BrowseCommand::Quit),
            "" => Err("Type 'h' for help".to_string()),
            other => Err(format!("Unknown command '{}'. Type 'h' for help", other)),
        }
    }
}

async fn browse(client: &ArticClient) -> Result<(), Box<dyn std::error::Error>> {
    let mut table = ArtworkTable::new(client.config().page_size);
    if let Err(e) = table.go_to_page(client, 1).await {
        eprintln!("Failed to load the first page: {}", e);
    }
    println!("{}", render_page(&table));
    println!("{}", BROWSE_HELP);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match BrowseCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => println!("{}", BROWSE_HELP),
            BrowseCommand::List => {
                println!("{} selected:", table.selection().len());
                println!("{}", render_records(table.selected_records()));
            }
            command => {
                let outcome = apply_command(&mut table, client, command).await;
                if let Some(notice) = &outcome.notice {
                    println!("{}", notice);
                }
                if outcome.redraw {
                    println!("{}", render_page(&table));
                }
            }
        }
    }

    println!("{} rows selected", table.selection().len());
    Ok(())
}

/// What the browse loop should show after a table command.
#[derive(Debug, Default, PartialEq)]
struct CommandOutcome {
    notice: Option<String>,
    redraw: bool,
}

impl CommandOutcome {
    fn redraw() -> Self {
        Self {
            notice: None,
            redraw: true,
        }
    }

    fn redraw_with(notice: String) -> Self {
        Self {
            notice: Some(notice),
            redraw: true,
        }
    }
}

/// Run a command that reads or changes `table`. Navigation failures are
/// reported in the notice and leave the table on its current page.
async fn apply_command<S>(
    table: &mut ArtworkTable,
    source: &S,
    command: BrowseCommand,
) -> CommandOutcome
where
    S: PageSource + Sync,
{
    match command {
        BrowseCommand::Next => match table.next_page(source).await {
            Ok(true) => CommandOutcome::redraw(),
            Ok(false) => CommandOutcome::redraw_with("Already on the last page".to_string()),
            Err(e) => navigation_failed(table.current_page() + 1, &e),
        },
        BrowseCommand::Prev => match table.prev_page(source).await {
            Ok(true) => CommandOutcome::redraw(),
            Ok(false) => CommandOutcome::redraw_with("Already on the first page".to_string()),
            Err(e) => navigation_failed(table.current_page().saturating_sub(1), &e),
        },
        BrowseCommand::Goto(page) => match table.go_to_page(source, page).await {
            Ok(()) => CommandOutcome::redraw(),
            Err(e) => navigation_failed(page, &e),
        },
        BrowseCommand::Toggle(row) => {
            if row == 0 || table.toggle_row_at(row - 1).is_none() {
                CommandOutcome {
                    notice: Some(format!("No row {} on this page", row)),
                    redraw: false,
                }
            } else {
                CommandOutcome::redraw()
            }
        }
        BrowseCommand::ToggleAll => {
            table.toggle_select_all();
            CommandOutcome::redraw()
        }
        BrowseCommand::SelectCount(count) => {
            let fill = table.submit_select_count(source, count).await;
            log_fill(&fill);
            CommandOutcome::redraw_with(format!(
                "Selected {} of {} rows ({} pages fetched)",
                fill.records.len(),
                count,
                fill.pages_fetched.len()
            ))
        }
        BrowseCommand::List | BrowseCommand::Help | BrowseCommand::Quit => {
            CommandOutcome::default()
        }
    }
}

fn navigation_failed(page: usize, error: &CatalogError) -> CommandOutcome {
    warn!("Browse navigation to page {} failed: {}", page, error);
    CommandOutcome::redraw_with(format!("Failed to load page {}: {}", page, error))
}

fn log_fill(fill: &SelectionFill) {
    match &fill.error {
        Some(e) => warn!(
            "Selected {} of {} rows before an error: {}",
            fill.records.len(),
            fill.requested,
            e
        ),
        None => info!(
            "Selected {} rows after fetching pages {:?}",
            fill.records.len(),
            fill.pages_fetched
        ),
    }
}

fn print_requests(client: &ArticClient) {
    let history = client.call_history();
    println!("{} requests:", history.len());
    for call in history {
        let timestamp = call
            .timestamp
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "unknown time".to_string());
        println!("  {} {} {}", timestamp, call.status_code, call.url);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let timeout = (cli.timeout > 0).then(|| Duration::from_secs(cli.timeout));
    let config = CatalogConfig::default()
        .with_base_url(cli.base_url)
        .with_timeout(timeout);
    let client = ArticClient::new(config)?;
    info!("Using catalog at {}", client.config().base_url);

    let mut failed = false;
    match cli.command {
        Commands::Page { page, json } => {
            let mut table = ArtworkTable::new(client.config().page_size);
            match table.go_to_page(&client, page).await {
                Ok(()) if json => println!("{}", serde_json::to_string_pretty(table.rows())?),
                Ok(()) => println!("{}", render_page(&table)),
                Err(e) => {
                    warn!("Page command failed: {}", e);
                    eprintln!("Failed to load page {}: {}", page, e);
                    failed = true;
                }
            }
        }
        Commands::Select { count, json } => {
            let mut table = ArtworkTable::new(client.config().page_size);
            let fill = table.submit_select_count(&client, count).await;
            log_fill(&fill);

            if json {
                println!("{}", serde_json::to_string_pretty(&fill.records)?);
            } else {
                println!("{}", render_records(&fill.records));
                println!(
                    "Selected {} of {} requested rows; pages fetched: {:?}",
                    fill.records.len(),
                    fill.requested,
                    fill.pages_fetched
                );
            }
            if let Some(e) = &fill.error {
                eprintln!("Selection stopped early: {}", e);
                failed = true;
            }
        }
        Commands::Browse => browse(&client).await?,
    }

    if cli.show_requests {
        print_requests(&client);
    }
    if failed {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use artworks_core::InMemoryCatalog;

    #[test]
    fn test_parse_browse_commands() {
        assert_eq!(BrowseCommand::parse("n\n"), Ok(BrowseCommand::Next));
        assert_eq!(BrowseCommand::parse("  PREV "), Ok(BrowseCommand::Prev));
        assert_eq!(BrowseCommand::parse("g 4"), Ok(BrowseCommand::Goto(4)));
        assert_eq!(BrowseCommand::parse("t 12"), Ok(BrowseCommand::Toggle(12)));
        assert_eq!(BrowseCommand::parse("a"), Ok(BrowseCommand::ToggleAll));
        assert_eq!(
            BrowseCommand::parse("select 30"),
            Ok(BrowseCommand::SelectCount(30))
        );
        assert_eq!(BrowseCommand::parse("q"), Ok(BrowseCommand::Quit));
    }

    #[test]
    fn test_parse_browse_errors() {
        assert_eq!(
            BrowseCommand::parse("s"),
            Err("'s' needs a number".to_string())
        );
        assert_eq!(
            BrowseCommand::parse("g x"),
            Err("'x' is not a number".to_string())
        );
        assert!(BrowseCommand::parse("dance").is_err());
        assert!(BrowseCommand::parse("").is_err());
    }

    #[tokio::test]
    async fn test_failed_goto_is_reported() {
        let catalog = InMemoryCatalog::generated(40).failing_on(3);
        let mut table = ArtworkTable::default();
        table.go_to_page(&catalog, 1).await.unwrap();

        let outcome = apply_command(&mut table, &catalog, BrowseCommand::Goto(3)).await;
        let notice = outcome.notice.unwrap();
        assert!(notice.starts_with("Failed to load page 3: "));
        assert!(notice.contains("500"));
        assert_eq!(table.current_page(), 1);

        let outcome = apply_command(&mut table, &catalog, BrowseCommand::Goto(usize::MAX)).await;
        assert_eq!(
            outcome.notice,
            Some(format!(
                "Failed to load page {}: Invalid page number: {}",
                usize::MAX,
                usize::MAX
            ))
        );

        let outcome = apply_command(&mut table, &catalog, BrowseCommand::Goto(2)).await;
        assert_eq!(outcome, CommandOutcome::redraw());
        assert_eq!(table.current_page(), 2);
    }

    #[tokio::test]
    async fn test_failed_next_names_the_target_page() {
        let catalog = InMemoryCatalog::generated(40).failing_on(2);
        let mut table = ArtworkTable::default();
        table.go_to_page(&catalog, 1).await.unwrap();

        let outcome = apply_command(&mut table, &catalog, BrowseCommand::Next).await;
        assert!(outcome.notice.unwrap().starts_with("Failed to load page 2: "));

        let outcome = apply_command(&mut table, &catalog, BrowseCommand::Prev).await;
        assert_eq!(outcome.notice.as_deref(), Some("Already on the first page"));

        let outcome = apply_command(&mut table, &catalog, BrowseCommand::Toggle(13)).await;
        assert!(!outcome.redraw);
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from([
            "artworks-cli",
            "select",
            "25",
            "--json",
            "--base-url",
            "http://127.0.0.1:8080",
        ])
        .unwrap();
        assert_eq!(cli.base_url, "http://127.0.0.1:8080");
        assert_eq!(cli.timeout, 30);
        assert!(matches!(
            cli.command,
            Commands::Select {
                count: 25,
                json: true
            }
        ));
    }
}
