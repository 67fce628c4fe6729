use fossil_cleaning::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

const FRAME: f32 = 1.0 / 30.0;
const MAX_FRAMES: usize = 1_000_000;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;

    let mut bot_rng = SmallRng::seed_from_u64(seed);
    let session_rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
    let mut session = CleaningSession::simulated(CleaningConfig::default(), session_rng)?;

    let results = CleaningBot::new().play(&mut session, &mut bot_rng, FRAME, MAX_FRAMES)?;

    let result = json!({
        "seed": seed,
        "results": results,
        "time_left": session.timer().current_time_left(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
