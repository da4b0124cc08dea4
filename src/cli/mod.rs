//! Command-line front end over the planning services.

pub mod output;
pub mod render;
pub mod table;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use strsim::levenshtein;

use crate::{
    calendar::WeekBucket,
    config::{ConfigManager, MAX_HORIZON_WEEKS, SUPPORTED_HORIZONS},
    core::{
        clock::{Clock, FixedClock, SystemClock},
        services::{
            category_breakdown, get_subscription_statistics, roll_forward_all, spend_summary,
            summarize_requirements, CategorySpend, PayPeriodService, PriceChangeAlert,
            RequirementSummary, ServiceError, SpendSummary, SubscriptionStatistics,
            UpcomingRenewal,
        },
    },
    currency::CurrencyCode,
    domain::Subscription,
    errors::SubTrackerError,
    storage::{JsonSubscriptionStore, SubscriptionStore},
    utils::build_info,
};

/// Overrides the system date, `YYYY-MM-DD`.
pub const TODAY_ENV: &str = "SUBTRACKER_TODAY";

const COMMANDS: [&str; 7] = [
    "plan", "stats", "week", "month", "alerts", "renew", "version",
];
const MAX_SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] SubTrackerError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("{0}")]
    Usage(String),
}

struct Invocation {
    command: String,
    args: Vec<String>,
    json: bool,
}

impl Invocation {
    fn parse(raw: impl IntoIterator<Item = String>) -> Result<Self, CliError> {
        let mut json = false;
        let mut positional = Vec::new();
        for arg in raw {
            if arg == "--json" {
                json = true;
            } else {
                positional.push(arg);
            }
        }
        if positional.is_empty() {
            return Err(CliError::Usage(usage()));
        }
        let command = positional.remove(0).to_lowercase();
        Ok(Self {
            command,
            args: positional,
            json,
        })
    }

    fn arg(&self, index: usize, name: &str) -> Result<&str, CliError> {
        self.args
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| CliError::Usage(format!("missing <{name}>\n{}", usage())))
    }
}

#[derive(Serialize)]
struct PlanOutput<'a> {
    weeks: &'a [WeekBucket],
    summary: &'a RequirementSummary,
}

#[derive(Serialize)]
struct StatsOutput<'a> {
    statistics: &'a SubscriptionStatistics,
    spend: &'a SpendSummary,
    categories: &'a [CategorySpend],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AlertsOutput<'a> {
    price_changes: &'a [PriceChangeAlert],
    renewals: &'a [UpcomingRenewal],
}

/// Runs one command given the process arguments (program name excluded).
pub fn run(raw_args: impl IntoIterator<Item = String>) -> Result<(), CliError> {
    let invocation = Invocation::parse(raw_args)?;
    let config = ConfigManager::new()?.load()?;
    let today = resolve_today()?;
    let service = PayPeriodService::with_clock(config.partitioner(), FixedClock(today));
    let code = CurrencyCode::new(&config.currency);
    tracing::debug!(command = %invocation.command, %today, "dispatching command");

    match invocation.command.as_str() {
        "plan" => {
            let subs = load_subscriptions(Path::new(invocation.arg(0, "file")?))?;
            let weeks = match invocation.args.get(1) {
                Some(raw) => parse_weeks(raw)?,
                None => config.default_horizon_weeks,
            };
            if !SUPPORTED_HORIZONS.contains(&weeks) {
                output::warning(format!(
                    "{weeks} weeks is outside the usual horizons {SUPPORTED_HORIZONS:?}"
                ));
            }
            let buckets = service.calculate_pay_period_requirements(&subs, weeks)?;
            let summary = summarize_requirements(&buckets);
            if invocation.json {
                print_json(&PlanOutput {
                    weeks: &buckets,
                    summary: &summary,
                })?;
            } else {
                output::section(format!("Pay periods from {today}"));
                println!("{}", render::week_table(&buckets, &code));
                let details = render::week_details(&buckets, &code);
                if !details.is_empty() {
                    println!("\n{details}");
                }
                println!("\n{}", render::plan_summary(&summary, &buckets, &code));
            }
        }
        "stats" => {
            let subs = load_subscriptions(Path::new(invocation.arg(0, "file")?))?;
            let stats = get_subscription_statistics(&subs);
            let spend = spend_summary(&subs);
            let categories = category_breakdown(&subs);
            if invocation.json {
                print_json(&StatsOutput {
                    statistics: &stats,
                    spend: &spend,
                    categories: &categories,
                })?;
            } else {
                println!(
                    "{}",
                    render::statistics_report(&stats, &spend, &categories, &code)
                );
            }
        }
        "week" => {
            let week = service.current_week();
            if invocation.json {
                print_json(&week)?;
            } else {
                println!(
                    "{}",
                    output::highlight(&format!(
                        "{}: {} to {}",
                        week.label(),
                        week.start_date,
                        week.end_date
                    ))
                );
            }
        }
        "month" => {
            let year: i32 = parse_number(invocation.arg(0, "year")?, "year")?;
            let month: u32 = parse_number(invocation.arg(1, "month")?, "month")?;
            if !(1..=12).contains(&month) {
                return Err(CliError::Usage(format!("month must be 1-12, got {month}")));
            }
            let weeks = service.weeks_for_month(year, month);
            if invocation.json {
                print_json(&weeks)?;
            } else {
                println!("{}", render::week_table(&weeks, &code));
            }
        }
        "alerts" => {
            let subs = load_subscriptions(Path::new(invocation.arg(0, "file")?))?;
            let alerts = service.price_change_alerts(&subs, config.price_alert_days)?;
            let renewals = service.upcoming_renewals(&subs, config.renewal_window_days)?;
            if invocation.json {
                print_json(&AlertsOutput {
                    price_changes: &alerts,
                    renewals: &renewals,
                })?;
            } else {
                println!("{}", render::alert_report(&alerts, &renewals, &code));
            }
        }
        "renew" => {
            let path = PathBuf::from(invocation.arg(0, "file")?);
            let store = open_store(&path)?;
            let mut subs = store.load()?;
            let changed = roll_forward_all(&mut subs, today);
            if changed > 0 {
                store.save(&subs)?;
            }
            if invocation.json {
                print_json(&serde_json::json!({ "rolledForward": changed }))?;
            } else if changed == 0 {
                output::info("All payment dates are current.");
            } else {
                output::success(format!("Rolled {changed} payment date(s) forward."));
            }
        }
        "version" => println!("{}", build_info::current().summary()),
        other => {
            let mut message = format!("unknown command `{other}`");
            if let Some(best) = suggest(other) {
                message.push_str(&format!("; did you mean `{best}`?"));
            }
            return Err(CliError::Usage(format!("{message}\n{}", usage())));
        }
    }
    Ok(())
}

fn resolve_today() -> Result<NaiveDate, CliError> {
    match std::env::var(TODAY_ENV) {
        Ok(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| CliError::Core(SubTrackerError::MalformedDate(raw))),
        Err(_) => Ok(SystemClock.today()),
    }
}

fn open_store(path: &Path) -> Result<JsonSubscriptionStore, CliError> {
    if !path.exists() {
        return Err(CliError::Usage(format!(
            "subscription file `{}` not found",
            path.display()
        )));
    }
    Ok(JsonSubscriptionStore::new(path))
}

fn load_subscriptions(path: &Path) -> Result<Vec<Subscription>, CliError> {
    Ok(open_store(path)?.load()?)
}

fn parse_weeks(raw: &str) -> Result<u32, CliError> {
    let weeks: u32 = parse_number(raw, "weeks")?;
    if weeks == 0 {
        return Err(SubTrackerError::InvalidHorizon(weeks).into());
    }
    if weeks > MAX_HORIZON_WEEKS {
        return Err(CliError::Usage(format!(
            "<weeks> must be at most {MAX_HORIZON_WEEKS}, got {weeks}"
        )));
    }
    Ok(weeks)
}

fn parse_number<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, CliError> {
    raw.parse()
        .map_err(|_| CliError::Usage(format!("<{name}> must be a number, got `{raw}`")))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(SubTrackerError::from)?;
    println!("{json}");
    Ok(())
}

fn suggest(input: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|name| (levenshtein(name, input), *name))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .map(|(_, name)| name)
}

pub fn usage() -> String {
    "Usage: subtracker_cli <command> [--json]\n\
     Commands:\n  \
     plan <file.json> [weeks]\n  \
     stats <file.json>\n  \
     week\n  \
     month <year> <month>\n  \
     alerts <file.json>\n  \
     renew <file.json>\n  \
     version"
        .to_string()
}
