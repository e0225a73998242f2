//! stalker-sim - run a stalker agent scenario headless
//!
//! Usage: `stalker-sim [scenario.toml] [--json]`

use stalker_sim::{Result, ScenarioConfig, Simulation};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let path = args.iter().find(|a| !a.starts_with("--")).map(String::as_str);

    let scenario = ScenarioConfig::load(path)?;
    let mut simulation = Simulation::from_scenario(&scenario)?;
    let summary = simulation.run(scenario.run.ticks);

    match summary.captured_at {
        Some(time) => log::info!("Target captured at {:.2}s", time),
        None => log::info!(
            "No capture after {} ticks ({:.2}s), agent {}",
            summary.ticks,
            summary.elapsed,
            summary.final_state.state
        ),
    }
    if let Some(time) = summary.spotted_at {
        log::info!("Target first spotted at {:.2}s", time);
    }
    log::info!("Rounds completed: {}", summary.rounds_completed);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
