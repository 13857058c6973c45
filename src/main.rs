use std::error::Error;
use std::path::PathBuf;

use tracing::info;

use carbon_footprint::logging::init_tracing;
use carbon_footprint::{
    round2, CoefficientTable, Domain, FootprintConfig, NutritionTable, Scenario,
    GRAMS_PER_SERVING,
};

const USAGE: &str =
    "usage: carbon-footprint [SCENARIO.json] [--config CONFIG.json] [--strict] [--check-tables]";

#[derive(Debug, Default)]
struct Args {
    scenario: Option<PathBuf>,
    config: Option<PathBuf>,
    strict: bool,
    check_tables: bool,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => {
                let path = it.next().ok_or("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "--strict" => args.strict = true,
            "--check-tables" => args.check_tables = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown flag {other}\n{USAGE}").into());
            }
            other => args.scenario = Some(PathBuf::from(other)),
        }
    }
    Ok(args)
}

fn check_tables() {
    for domain in Domain::ALL {
        let legacy = CoefficientTable::legacy(domain);
        let diffs = CoefficientTable::builtin(domain).discrepancies(&legacy);
        println!("{domain}: {} discrepancies against legacy table", diffs.len());
        for d in diffs {
            println!(
                "  {}: builtin={} legacy={}",
                d.category,
                d.ours.map_or("-".to_string(), |v| v.to_string()),
                d.theirs.map_or("-".to_string(), |v| v.to_string()),
            );
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let args = parse_args()?;

    if args.check_tables {
        check_tables();
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => FootprintConfig::from_path(path)?,
        None => FootprintConfig::builtin(),
    };
    let scenario = match &args.scenario {
        Some(path) => Scenario::from_path(path)?,
        None => {
            info!("no scenario given, using demo day");
            Scenario::demo()
        }
    };

    let day = if args.strict {
        scenario.evaluate_strict(&config)?
    } else {
        scenario.evaluate(&config)?
    };
    println!("{day}");

    // Food quantities are servings; macros are tabulated per 250 g.
    let nutrition = NutritionTable::builtin();
    for input in scenario.inputs.iter().filter(|i| i.domain == Domain::Food) {
        for meal in &input.selection {
            let servings = input.quantities.get(meal).copied().unwrap_or(0.0);
            if let Some(m) = nutrition.scaled(meal, servings * GRAMS_PER_SERVING) {
                println!(
                    "{meal},{:.2} kcal,{:.2} g carbs,{:.2} g fats,{:.2} g proteins",
                    round2(m.energy_kcal),
                    round2(m.carbs_g),
                    round2(m.fats_g),
                    round2(m.proteins_g),
                );
            }
        }
    }

    Ok(())
}
