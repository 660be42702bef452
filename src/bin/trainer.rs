//! Trainer Binary
//!
//! Evolves neural gin players, or solves a single hand for inspection.
//!
//! Subcommands: train, deadwood

use clap::Parser;
use colored::Colorize;
use robogin::gin::Hand;
use robogin::gin::Solver;
use robogin::training::Config;
use robogin::training::Trainer;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
enum Command {
    #[command(about = "Evolve a population of neural players", alias = "t")]
    Train {
        #[arg(long, default_value_t = robogin::POPULATION_SIZE)]
        population: usize,
        #[arg(long, default_value_t = robogin::MATCHES_PER_MEMBER)]
        matches: usize,
        #[arg(long, default_value_t = robogin::GENERATIONS)]
        generations: usize,
        #[arg(long, default_value_t = robogin::SURVIVOR_FRACTION)]
        survivors: f32,
        #[arg(long, default_value_t = robogin::MUTATION_RATE)]
        mutation: f32,
        #[arg(long, default_value_t = robogin::HIDDEN_WIDTH)]
        hidden: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, help = "worker threads, defaults to one per core")]
        threads: Option<usize>,
        #[arg(long, help = "write the final snapshot here")]
        output: Option<PathBuf>,
        #[arg(long, help = "continue from a saved snapshot")]
        resume: Option<PathBuf>,
    },
    #[command(about = "Find the minimum deadwood of a hand", alias = "dw")]
    Deadwood {
        #[arg(required = true, help = "cards such as \"9h 9c 9s Ts Js Qs\"")]
        hand: String,
    },
}

fn main() -> anyhow::Result<()> {
    match Command::parse() {
        Command::Deadwood { hand } => deadwood(&hand),
        Command::Train {
            population,
            matches,
            generations,
            survivors,
            mutation,
            hidden,
            seed,
            threads,
            output,
            resume,
        } => {
            robogin::log();
            robogin::brb();
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads.unwrap_or_else(num_cpus::get))
                .build_global()?;
            let config = Config {
                population,
                matches,
                generations,
                survivors,
                mutation,
                hidden,
                seed,
            };
            let mut trainer = match resume {
                Some(ref path) => Trainer::resume(path, config)?,
                None => Trainer::new(config)?,
            };
            trainer.train()?;
            match output {
                Some(ref path) => trainer.save(path),
                None => Ok(()),
            }
        }
    }
}

fn deadwood(hand: &str) -> anyhow::Result<()> {
    let ref hand = Hand::try_from(hand)?;
    let ref mut solver = Solver::default();
    let arrangement = hand.arrangement_with(solver);
    for grouping in arrangement.groupings() {
        println!("{}", grouping.to_string().green());
    }
    println!("{}", arrangement.deadwood().to_string().red());
    println!("deadwood {}", arrangement.points().to_string().bold());
    Ok(())
}
