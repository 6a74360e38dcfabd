#![deny(warnings)]

//! Headless CLI for the store calculator.
//!
//! Resolves a city-tier preset plus free-form overrides into one parameter
//! snapshot, runs the financial engine, renders the report or sensitivity
//! table, and logs successful profit calculations to the history file.

mod report;

use anyhow::{bail, Context, Result};
use history::{HistoryRecord, HistoryStore};
use serde::Deserialize;
use std::collections::BTreeMap;
use store_core::{CityTier, ParameterOverrides};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

const DEFAULT_HISTORY_FILE: &str = "store_history.json";

const USAGE: &str = "usage: cli [--tier tier1|tier2|tier3|custom] [--scenario file.yaml]
           [--price N] [--orders N] [--days N] [--rent N] [--staff N]
           [--utility N] [--cost-rate PCT] [--var-cost N]
           [--sweep] [--history PATH] [--no-history]";

#[derive(Debug, Default)]
struct CliArgs {
    tier: Option<String>,
    scenario: Option<String>,
    /// Field overrides in the order given, applied after the scenario file.
    fields: Vec<(&'static str, String)>,
    sweep: bool,
    history_path: Option<String>,
    no_history: bool,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = CliArgs::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--tier" => args.tier = it.next(),
            "--scenario" => args.scenario = it.next(),
            "--sweep" => args.sweep = true,
            "--history" => args.history_path = it.next(),
            "--no-history" => args.no_history = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => {
                let Some(key) = field_key(other) else {
                    bail!("unknown argument: {other}\n{USAGE}");
                };
                let Some(value) = it.next() else {
                    bail!("{other} requires a value");
                };
                args.fields.push((key, value));
            }
        }
    }
    Ok(args)
}

fn field_key(flag: &str) -> Option<&'static str> {
    Some(match flag {
        "--price" => "price",
        "--orders" => "orders",
        "--days" => "days",
        "--rent" => "rent",
        "--staff" => "staff",
        "--utility" => "utility",
        "--cost-rate" => "cost_rate",
        "--var-cost" => "var_cost",
        _ => return None,
    })
}

/// A scenario file: an optional tier plus field overrides keyed by the
/// short field names. Values may be numbers or strings; either way they
/// go through the same parse boundary as command-line flags.
#[derive(Debug, Deserialize)]
struct Scenario {
    tier: Option<String>,
    #[serde(flatten)]
    fields: BTreeMap<String, serde_yaml::Value>,
}

fn load_scenario(path: &str) -> Result<Scenario> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading scenario {path}"))?;
    serde_yaml::from_str(&text).with_context(|| format!("parsing scenario {path}"))
}

fn value_to_text(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args()?;
    info!(git_sha = env!("GIT_SHA"), "starting store calculator");

    let mut tier_text = args.tier.clone();
    let mut overrides = ParameterOverrides::default();
    if let Some(path) = &args.scenario {
        let scenario = load_scenario(path)?;
        if tier_text.is_none() {
            tier_text = scenario.tier.clone();
        }
        for (key, value) in &scenario.fields {
            let Some(text) = value_to_text(value) else {
                bail!("scenario field '{key}' must be a number or a string");
            };
            if !overrides.set(key, text) {
                bail!("scenario field '{key}' is not a known parameter");
            }
        }
    }
    // explicit flags win over the scenario file
    for (key, value) in args.fields {
        overrides.set(key, value);
    }

    let tier: CityTier = tier_text.as_deref().unwrap_or("tier2").parse()?;
    let params = overrides.resolve(tier)?;
    info!(city = %params.city, orders = params.daily_orders, "parameters resolved");

    if args.sweep {
        let cells = store_econ::sweep_sensitivity(&params);
        print!("{}", report::render_sweep(&params, &cells));
        return Ok(());
    }

    let result = store_econ::compute_financials(&params);
    print!("{}", report::render_report(&params, &result));

    if !args.no_history {
        let path = args
            .history_path
            .unwrap_or_else(|| DEFAULT_HISTORY_FILE.to_string());
        let mut store = HistoryStore::open(&path)?;
        store.append(HistoryRecord::profit_calculation(&params, &result))?;
        info!(records = store.len(), path = %store.path().display(), "calculation logged");
    }

    Ok(())
}
