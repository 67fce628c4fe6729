use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fossil_cleaning::{
    init_logging, subdivide, CleaningBot, CleaningConfig, CleaningEvent, CleaningSession,
    CleaningState, Rect, ScoreEvent, Tick, Vec2,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::time::{interval, Duration};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the bot clean rocks against the clock.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible sessions (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "JSON configuration file")]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 16)]
        frame_ms: u64,
        #[arg(long, default_value_t = 10.0, help = "Game seconds per real second")]
        time_scale: f32,
    },
    /// Print a mine layout as JSON.
    Mines {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..=4096))]
        count: u16,
        #[arg(long, default_value_t = 100.0)]
        width: f32,
        #[arg(long, default_value_t = 100.0)]
        height: f32,
    },
    /// Validate a configuration and print its generation bracket.
    Bracket {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (session will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<CleaningConfig> {
    match path {
        Some(p) => Ok(CleaningConfig::load(p)?),
        None => Ok(CleaningConfig::default()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            seed,
            config,
            frame_ms,
            time_scale,
        } => {
            let config = load_config(config)?;
            let mut rng = make_rng(seed);
            let session_rng = SmallRng::from_rng(&mut rng);
            let mut session = CleaningSession::simulated(config, session_rng)?;
            let mut cleaning_events = session.cleaning_mut().events_mut().subscribe();
            let mut score_events = session.score_mut().events_mut().subscribe();
            let bot = CleaningBot::new();

            session.start()?;
            println!(
                "Cleaning started: {}s on the clock",
                session.timer().current_time_left()
            );
            let dt = frame_ms as f32 / 1000.0 * time_scale;
            let mut ticker = interval(Duration::from_millis(frame_ms.max(1)));
            loop {
                ticker.tick().await;
                let (_, tick) = bot.step(&mut session, &mut rng, dt)?;

                for event in cleaning_events.drain() {
                    match event {
                        CleaningEvent::Started | CleaningEvent::NextArtefactRockStarted => {
                            if let Some(rock) = session.cleaning().current_rock() {
                                println!(
                                    "New rock: {} in a {} ({} layers)",
                                    rock.antiquity.display_name,
                                    rock.rock_shape.name,
                                    rock.chunk_description.layers
                                );
                            }
                        }
                        CleaningEvent::Won => println!(
                            "Rock cleaned! +{:.1}s bonus, took {:.1}s",
                            session.timer().bonus_time(),
                            session.timer().time_taken()
                        ),
                        CleaningEvent::Lost => println!("The fossil crumbled..."),
                        _ => {}
                    }
                }
                for ScoreEvent::Updated(score) in score_events.drain() {
                    println!("Score: {}", score);
                }

                if tick == Tick::Expired {
                    println!("Time's up!");
                    break;
                }
                if session.state() == CleaningState::Lost {
                    break;
                }
            }
            println!("{}", session.results());
        }
        Commands::Mines {
            seed,
            count,
            width,
            height,
        } => {
            let mut rng = make_rng(seed);
            let root = Rect::centred(Vec2::default(), Vec2::new(width, height));
            let regions = subdivide(root, usize::from(count), &mut rng)?;
            println!("{}", serde_json::to_string_pretty(&regions)?);
        }
        Commands::Bracket { config } => {
            let config = load_config(config)?;
            config.validate()?;
            println!("{}", serde_json::to_string_pretty(&config.bracket)?);
        }
    }
    Ok(())
}
