#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use wumpus_rust::simulation::{
    agent::{Agent, PlanningAgent},
    environment::WumpusWorld,
    params::{DEFAULT_TRIES, DEFAULT_WORLD_SIZE, TICK_RATE_MS},
    reflex::ReflexAgent,
    trial::{evaluate_batch, run_trial},
};
use wumpus_rust::ui::{
    field::{compute_belief_grid, compute_world_grid},
    render::draw_ui,
    Session,
};

#[derive(Debug, Parser)]
#[command(name = "wumpus_rust", about = "Knowledge-based Wumpus World agent")]
struct Args {
    /// Side length of the generated world
    #[arg(long, default_value_t = DEFAULT_WORLD_SIZE)]
    size: i32,

    /// Seed for world generation (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Lives played on the same world
    #[arg(long, default_value_t = DEFAULT_TRIES)]
    tries: u32,

    /// Run without the terminal view and print a summary
    #[arg(long)]
    headless: bool,

    /// Evaluate this many seeded worlds in parallel and print their scores
    #[arg(long)]
    batch: Option<u64>,

    /// Use the random reflex baseline instead of the planning agent
    #[arg(long)]
    reflex: bool,

    /// Milliseconds between steps in the terminal view
    #[arg(long, default_value_t = TICK_RATE_MS)]
    tick_ms: u64,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();
}

fn build_agent(args: &Args, seed: u64) -> Box<dyn Agent> {
    if args.reflex {
        Box::new(ReflexAgent::new(StdRng::seed_from_u64(seed), args.size))
    } else {
        Box::new(PlanningAgent::new())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    if let Some(count) = args.batch {
        init_logging();
        let seeds: Vec<u64> = (0..count).map(|i| seed.wrapping_add(i)).collect();
        let results = evaluate_batch(&seeds, args.size, args.tries);
        let mut total = 0.0;
        for (seed, result) in &results {
            match result {
                Ok(summary) => {
                    println!(
                        "seed {seed}: avg {:.1}, wins {}/{}",
                        summary.average_score(),
                        summary.wins(),
                        summary.episodes.len()
                    );
                    total += summary.average_score();
                }
                Err(err) => println!("seed {seed}: error: {err}"),
            }
        }
        println!("mean score over {count} worlds: {:.1}", total / count.max(1) as f64);
        return Ok(());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = WumpusWorld::random(args.size, &mut rng)?;
    let mut agent = build_agent(&args, seed);

    if args.headless {
        init_logging();
        let summary = run_trial(&mut world, agent.as_mut(), args.tries)?;
        for (i, e) in summary.episodes.iter().enumerate() {
            println!("try {}: {:?}, score {}, moves {}", i + 1, e.outcome, e.score, e.moves);
        }
        println!("average score: {:.1}", summary.average_score());
        return Ok(());
    }

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut session = Session::new(world, agent, args.tries);
    let res = run_app(&mut terminal, &mut session, Duration::from_millis(args.tick_ms));

    // Restore Terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        // 1. Update
        if last_tick.elapsed() >= tick_rate {
            session.tick();
            last_tick = Instant::now();
        }

        // 2. Render
        terminal.draw(|f| {
            let world_lines = compute_world_grid(&session.world);
            let belief_lines = session
                .agent
                .knowledge()
                .map(|kb| compute_belief_grid(kb, session.world.layout().size))
                .unwrap_or_default();
            draw_ui(f, world_lines, belief_lines, &session.hud());
        })?;

        // 3. Input
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }
    }
}
