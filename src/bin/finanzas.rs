//! CLI binary for browsing movements and budget reports.

use std::io::{self, Write as _};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use finanzas_rs::client::FinanzasBlockingClient;
use finanzas_rs::models::{
    Category, Decimal, Goal, Movement, MovementFilter, MovementType, NaiveDate,
};
use finanzas_rs::report::{
    BudgetSplit, ChartPoint, Locale, MonthlySummary, RankingEntry, Report, ReportParams,
    YearMonth, budget_split, expense_ranking, income_ranking, monthly_series, monthly_summary,
};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use rust_decimal::RoundingStrategy;
use serde::Serialize;

/// Environment variable name for the API token.
const TOKEN_ENV: &str = "FINANZAS_TOKEN";

/// Environment variable name for the API base URL.
const API_URL_ENV: &str = "FINANZAS_API_URL";

/// Placeholder for empty table cells.
const EMPTY_CELL: &str = "\u{2014}";

/// Personal finance CLI: movements, monthly summaries and budget reports.
#[derive(Debug, Parser)]
#[command(name = "finanzas", version, about)]
struct Cli {
    /// Override the API base URL (default: $FINANZAS_API_URL or localhost).
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,
    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// List movements, optionally filtered by type and date range.
    Movements(MovementArgs),
    /// Income, expense and savings for a month, plus the all-time balance.
    Summary(MonthArgs),
    /// Rank a month's expenses by category (or incomes by source).
    Ranking {
        /// Month options.
        #[command(flatten)]
        month: MonthArgs,
        /// Rank incomes by source instead of expenses by category.
        #[arg(long)]
        income: bool,
    },
    /// Six months of income and expense ending at a month.
    Series {
        /// Month options.
        #[command(flatten)]
        month: MonthArgs,
        /// Language of month labels.
        #[arg(long, value_enum, default_value_t = LocaleArg::Es)]
        locale: LocaleArg,
    },
    /// Suggested needs/wants/savings split.
    Budget(BudgetArgs),
    /// Every view for a month at once.
    Report {
        /// Budget options.
        #[command(flatten)]
        budget: BudgetArgs,
        /// Language of month labels.
        #[arg(long, value_enum, default_value_t = LocaleArg::Es)]
        locale: LocaleArg,
    },
    /// List savings goals and their progress.
    Goals,
    /// List expense categories.
    Categories,
    /// Check that the backend is reachable.
    Ping,
}

/// Arguments for the `movements` subcommand.
#[derive(Debug, Args)]
struct MovementArgs {
    /// Movement type (income, expense, savings, loan, transfer).
    #[arg(long = "type", value_parser = parse_movement_type)]
    kind: Option<MovementType>,
    /// Start date (inclusive, YYYY-MM-DD). Requires --to.
    #[arg(long, requires = "to", value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// End date (inclusive, YYYY-MM-DD). Requires --from.
    #[arg(long, requires = "from", value_parser = parse_date)]
    to: Option<NaiveDate>,
}

/// Month selection shared by the report subcommands.
#[derive(Debug, Args)]
struct MonthArgs {
    /// Month to report on (YYYY-MM, default: current month).
    #[arg(long, value_parser = parse_month)]
    month: Option<YearMonth>,
}

impl MonthArgs {
    /// The selected month, or the current one.
    fn resolve(&self) -> YearMonth {
        self.month.unwrap_or_else(YearMonth::current)
    }
}

/// Arguments for the `budget` subcommand.
#[derive(Debug, Args)]
struct BudgetArgs {
    /// Month options.
    #[command(flatten)]
    month: MonthArgs,
    /// Amount to split (default: the month's income).
    #[arg(long, value_parser = parse_amount)]
    base: Option<Decimal>,
    /// Savings rate in percent (default: from the financial context).
    #[arg(long, value_parser = parse_amount)]
    rate: Option<Decimal>,
}

/// Chart label language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LocaleArg {
    /// Spanish month names.
    Es,
    /// English month names.
    En,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::Es => Self::Es,
            LocaleArg::En => Self::En,
        }
    }
}

/// Parses a date string in `YYYY-MM-DD` format for clap.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|err| format!("{err}"))
}

/// Parses a `YYYY-MM` month for clap.
fn parse_month(s: &str) -> Result<YearMonth, String> {
    s.parse::<YearMonth>().map_err(|err| format!("{err}"))
}

/// Parses a decimal amount or percentage for clap.
fn parse_amount(s: &str) -> Result<Decimal, String> {
    s.parse::<Decimal>().map_err(|err| format!("{err}"))
}

/// Parses a movement type name (case-insensitive) for clap.
fn parse_movement_type(s: &str) -> Result<MovementType, String> {
    MovementType::from_name(s).ok_or_else(|| format!("unknown movement type: {s}"))
}

/// Reads the API token from the environment.
fn read_token() -> io::Result<Option<String>> {
    match std::env::var(TOKEN_ENV) {
        Ok(val) if !val.is_empty() => Ok(Some(val)),
        _ => {
            let mut err = io::stderr().lock();
            writeln!(
                err,
                "{} {} environment variable is not set",
                "error:".red().bold(),
                TOKEN_ENV.bold()
            )?;
            writeln!(
                err,
                "  {} create a .env file with {}=<your_token>",
                "hint:".cyan(),
                TOKEN_ENV
            )?;
            Ok(None)
        }
    }
}

/// Picks the base URL from the flag, then the environment.
fn resolve_api_url(flag: Option<String>) -> Option<String> {
    flag.or_else(|| std::env::var(API_URL_ENV).ok())
        .filter(|url| !url.is_empty())
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let Some(token) = read_token()? else {
        return Ok(ExitCode::FAILURE);
    };

    let mut builder = FinanzasBlockingClient::builder().token(token);
    if let Some(url) = resolve_api_url(cli.api_url) {
        builder = builder.base_url(url);
    }
    let client = match builder.build() {
        Ok(client) => client,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to build client: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    dispatch(&client, cli.command, cli.json)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch(client: &FinanzasBlockingClient, command: Command, json: bool) -> io::Result<ExitCode> {
    match command {
        Command::Movements(args) => cmd_movements(client, &args, json),
        Command::Summary(args) => cmd_summary(client, &args, json),
        Command::Ranking { month, income } => cmd_ranking(client, &month, income, json),
        Command::Series { month, locale } => cmd_series(client, &month, locale.into(), json),
        Command::Budget(args) => cmd_budget(client, &args, json),
        Command::Report { budget, locale } => cmd_report(client, &budget, locale.into(), json),
        Command::Goals => cmd_goals(client, json),
        Command::Categories => cmd_categories(client, json),
        Command::Ping => cmd_ping(client),
    }
}

/// Runs `request` behind a spinner, printing an error on failure.
///
/// Returns `Ok(Some(value))` on success, `Ok(None)` if the request failed
/// (error already printed), or `Err` on I/O failure.
fn fetch<T, F>(message: &str, what: &str, request: F) -> io::Result<Option<T>>
where
    F: FnOnce() -> finanzas_rs::error::Result<T>,
{
    let spinner = make_spinner(message);
    let result = request();
    spinner.finish_and_clear();
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to {what}: {err}",
                "error:".red().bold()
            )?;
            Ok(None)
        }
    }
}

/// Fetches every movement; aggregation scopes by month itself.
fn fetch_all_movements(client: &FinanzasBlockingClient) -> io::Result<Option<Vec<Movement>>> {
    fetch("Fetching movements...", "fetch movements", || {
        client.movements(&MovementFilter::new())
    })
}

/// Uses `rate` if given, otherwise asks the backend for the configured one.
fn resolve_savings_rate(
    client: &FinanzasBlockingClient,
    rate: Option<Decimal>,
) -> io::Result<Option<Decimal>> {
    match rate {
        Some(value) => Ok(Some(value)),
        None => fetch("Fetching financial context...", "fetch savings rate", || {
            client.savings_rate()
        }),
    }
}

/// Builds a [`MovementFilter`] from CLI arguments.
fn build_movement_filter(args: &MovementArgs) -> MovementFilter {
    let mut filter = MovementFilter::new();
    if let Some(kind) = args.kind {
        filter = filter.movement_type(kind);
    }
    if let Some((from_date, to_date)) = args.from.zip(args.to) {
        filter = filter.date_range(from_date, to_date);
    }
    filter
}

/// Executes the `movements` subcommand.
fn cmd_movements(
    client: &FinanzasBlockingClient,
    args: &MovementArgs,
    json: bool,
) -> io::Result<ExitCode> {
    let filter = build_movement_filter(args);
    let Some(movements) = fetch("Fetching movements...", "fetch movements", || {
        client.movements(&filter)
    })?
    else {
        return Ok(ExitCode::FAILURE);
    };
    if json {
        print_json(&movements)?;
    } else {
        print_movements_table(&movements)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `summary` subcommand.
fn cmd_summary(
    client: &FinanzasBlockingClient,
    args: &MonthArgs,
    json: bool,
) -> io::Result<ExitCode> {
    let Some(movements) = fetch_all_movements(client)? else {
        return Ok(ExitCode::FAILURE);
    };
    let month = args.resolve();
    let summary = monthly_summary(&movements, month);
    if json {
        print_json(&summary)?;
    } else {
        print_summary(month, &summary)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `ranking` subcommand.
fn cmd_ranking(
    client: &FinanzasBlockingClient,
    args: &MonthArgs,
    income: bool,
    json: bool,
) -> io::Result<ExitCode> {
    let Some(movements) = fetch_all_movements(client)? else {
        return Ok(ExitCode::FAILURE);
    };
    let month = args.resolve();
    let (title, entries) = if income {
        ("Income by source", income_ranking(&movements, month))
    } else {
        ("Expenses by category", expense_ranking(&movements, month))
    };
    if json {
        print_json(&entries)?;
    } else {
        print_ranking_table(title, &entries)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `series` subcommand.
fn cmd_series(
    client: &FinanzasBlockingClient,
    args: &MonthArgs,
    locale: Locale,
    json: bool,
) -> io::Result<ExitCode> {
    let Some(movements) = fetch_all_movements(client)? else {
        return Ok(ExitCode::FAILURE);
    };
    let series = monthly_series(&movements, args.resolve(), locale);
    if json {
        print_json(&series)?;
    } else {
        print_series_table(&series)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `budget` subcommand.
fn cmd_budget(
    client: &FinanzasBlockingClient,
    args: &BudgetArgs,
    json: bool,
) -> io::Result<ExitCode> {
    let Some(rate) = resolve_savings_rate(client, args.rate)? else {
        return Ok(ExitCode::FAILURE);
    };
    let base = match args.base {
        Some(base) => base,
        None => {
            let Some(movements) = fetch_all_movements(client)? else {
                return Ok(ExitCode::FAILURE);
            };
            monthly_summary(&movements, args.month.resolve()).income
        }
    };
    let split = budget_split(base, rate);
    if json {
        print_json(&split)?;
    } else {
        print_budget_table(base, &split)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `report` subcommand.
fn cmd_report(
    client: &FinanzasBlockingClient,
    args: &BudgetArgs,
    locale: Locale,
    json: bool,
) -> io::Result<ExitCode> {
    let Some(rate) = resolve_savings_rate(client, args.rate)? else {
        return Ok(ExitCode::FAILURE);
    };
    let month = args.month.resolve();
    let mut params = ReportParams::new(month)
        .anchor(month)
        .locale(locale)
        .savings_rate(rate);
    if let Some(base) = args.base {
        params = params.base_amount(base);
    }
    let Some(report) = fetch("Building report...", "build report", || client.report(&params))?
    else {
        return Ok(ExitCode::FAILURE);
    };
    if json {
        print_json(&report)?;
    } else {
        print_report(&report)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `goals` subcommand.
fn cmd_goals(client: &FinanzasBlockingClient, json: bool) -> io::Result<ExitCode> {
    let Some(goals) = fetch("Fetching goals...", "fetch goals", || client.goals())? else {
        return Ok(ExitCode::FAILURE);
    };
    if json {
        print_json(&goals)?;
    } else {
        print_goals_table(&goals)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `categories` subcommand.
fn cmd_categories(client: &FinanzasBlockingClient, json: bool) -> io::Result<ExitCode> {
    let Some(categories) = fetch("Fetching categories...", "fetch categories", || {
        client.categories()
    })?
    else {
        return Ok(ExitCode::FAILURE);
    };
    if json {
        print_json(&categories)?;
    } else {
        print_categories_table(&categories)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `ping` subcommand.
fn cmd_ping(client: &FinanzasBlockingClient) -> io::Result<ExitCode> {
    let Some(()) = fetch("Pinging backend...", "reach backend", || client.ping())? else {
        return Ok(ExitCode::FAILURE);
    };
    writeln!(
        io::stdout().lock(),
        "{} {}",
        "Backend is up".green().bold(),
        format_args!("({})", client.base_url()).dimmed()
    )?;
    Ok(ExitCode::SUCCESS)
}

// ── Output formatting ────────────────────────────────────────────────

/// Formats a money amount with two decimals, halves rounded away from
/// zero.
fn money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Prints any serializable value as pretty JSON.
fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Creates a table with the standard preset and cyan headers.
fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(
        headers
            .iter()
            .map(|header| Cell::new(header).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

/// Colour used for a movement type's amount.
const fn type_color(movement_type: MovementType) -> Color {
    match movement_type {
        MovementType::Income => Color::Green,
        MovementType::Expense => Color::Red,
        MovementType::Savings => Color::Blue,
        MovementType::Loan => Color::Yellow,
        MovementType::Transfer => Color::DarkGrey,
    }
}

/// Prints movements in a table.
fn print_movements_table(movements: &[Movement]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if movements.is_empty() {
        writeln!(out, "{}", "No movements found.".dimmed())?;
        return Ok(());
    }

    let mut table = new_table(&["Date", "Type", "Label", "Description", "Amount"]);
    for movement in movements {
        let date = movement
            .local_date()
            .map_or_else(|| EMPTY_CELL.to_owned(), |date| date.to_string());
        let label = movement
            .category_name()
            .or_else(|| movement.income_source_name())
            .or_else(|| movement.goal_name())
            .unwrap_or(EMPTY_CELL);
        let movement_type = movement.movement_type();
        _ = table.add_row(vec![
            Cell::new(date),
            Cell::new(movement_type),
            Cell::new(label),
            Cell::new(&movement.description),
            Cell::new(money(movement.amount)).fg(type_color(movement_type)),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Movements".green().bold(),
        format_args!("({})", movements.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints a monthly summary.
fn print_summary(month: YearMonth, summary: &MonthlySummary) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let mut table = new_table(&["", "Amount"]);
    let net = summary.net_flow();
    let rows = [
        ("Income", summary.income, Color::Green),
        ("Expense", summary.expense, Color::Red),
        ("Savings", summary.savings, Color::Blue),
        (
            "Net flow",
            net,
            if net.is_sign_negative() {
                Color::Red
            } else {
                Color::Green
            },
        ),
    ];
    for (name, amount, color) in rows {
        _ = table.add_row(vec![Cell::new(name), Cell::new(money(amount)).fg(color)]);
    }
    _ = table.add_row(vec![
        Cell::new("Balance (all time)"),
        Cell::new(money(summary.balance)),
    ]);

    writeln!(
        out,
        "{} {}",
        "Summary".green().bold(),
        format_args!("({month})").dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints a ranking in a table.
fn print_ranking_table(title: &str, entries: &[RankingEntry]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if entries.is_empty() {
        writeln!(out, "{} {}", title.bold(), "(nothing this month)".dimmed())?;
        return Ok(());
    }

    let mut table = new_table(&["Name", "Total", "Movements", "%", "Colour"]);
    for entry in entries {
        _ = table.add_row(vec![
            Cell::new(&entry.name),
            Cell::new(money(entry.total_amount)),
            Cell::new(entry.movement_count),
            Cell::new(format!("{:.2}", entry.percent)),
            Cell::new(entry.color()),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        title.green().bold(),
        format_args!("({})", entries.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints a chart series in a table.
fn print_series_table(series: &[ChartPoint]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let mut table = new_table(&["Month", "", "Income", "Expense"]);
    for point in series {
        _ = table.add_row(vec![
            Cell::new(point.month),
            Cell::new(point.month_label),
            Cell::new(money(point.income)).fg(Color::Green),
            Cell::new(money(point.expense)).fg(Color::Red),
        ]);
    }
    writeln!(out, "{}", "Last six months".green().bold())?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints a budget split in a table.
fn print_budget_table(base: Decimal, split: &BudgetSplit) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let mut table = new_table(&["Bucket", "%", "Amount"]);
    let rows = [
        ("Needs", split.needs_percent, split.needs_amount),
        ("Wants", split.wants_percent, split.wants_amount),
        ("Savings", split.savings_percent, split.savings_amount),
    ];
    for (name, percent, amount) in rows {
        _ = table.add_row(vec![
            Cell::new(name),
            Cell::new(percent),
            Cell::new(money(amount)),
        ]);
    }
    writeln!(
        out,
        "{} {}",
        "Budget".green().bold(),
        format_args!("(base {})", money(base)).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints every section of a report.
fn print_report(report: &Report) -> io::Result<()> {
    print_summary(report.month, &report.summary)?;
    writeln!(io::stdout().lock())?;
    print_ranking_table("Expenses by category", &report.rankings.expenses_by_category)?;
    writeln!(io::stdout().lock())?;
    print_ranking_table("Income by source", &report.rankings.income_by_source)?;
    writeln!(io::stdout().lock())?;
    print_series_table(&report.series)?;
    writeln!(io::stdout().lock())?;
    print_budget_table(report.budget_base, &report.budget)
}

/// Prints goals in a table.
fn print_goals_table(goals: &[Goal]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if goals.is_empty() {
        writeln!(out, "{}", "No goals found.".dimmed())?;
        return Ok(());
    }

    let mut table = new_table(&["Name", "Target", "Saved", "Progress", "Deadline"]);
    for goal in goals {
        let progress = Cell::new(format!("{:.1}%", goal.progress_percent()));
        _ = table.add_row(vec![
            Cell::new(&goal.name),
            Cell::new(money(goal.target_amount)),
            Cell::new(money(goal.current_amount)),
            if goal.is_complete() {
                progress.fg(Color::Green)
            } else {
                progress
            },
            Cell::new(goal.deadline.as_deref().unwrap_or(EMPTY_CELL)),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Goals".green().bold(),
        format_args!("({})", goals.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints categories in a table.
fn print_categories_table(categories: &[Category]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if categories.is_empty() {
        writeln!(out, "{}", "No categories found.".dimmed())?;
        return Ok(());
    }

    let mut table = new_table(&["Name", "Description"]);
    for category in categories {
        _ = table.add_row(vec![
            Cell::new(&category.name),
            Cell::new(category.description.as_deref().unwrap_or(EMPTY_CELL)),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Categories".green().bold(),
        format_args!("({})", categories.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Creates a spinner with the given message.
fn make_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(core::time::Duration::from_millis(80));
    spinner
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
