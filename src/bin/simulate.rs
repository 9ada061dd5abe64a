use darts::simulation::{estimate_hit_rate, simulate_batch};
use darts::types::{DartsContext, Target};

struct Args {
    num_legs: usize,
    skill: i32,
    seed: u64,
    hit_rate: Option<String>,
    trials: usize,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut num_legs = 1000usize;
    let mut skill = 80i32;
    let mut seed = 42u64;
    let mut hit_rate: Option<String> = None;
    let mut trials = 100_000usize;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--legs" => {
                i += 1;
                if i < args.len() {
                    num_legs = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --legs value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--skill" => {
                i += 1;
                if i < args.len() {
                    skill = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --skill value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --seed value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--hit-rate" => {
                i += 1;
                if i < args.len() {
                    hit_rate = Some(args[i].clone());
                }
            }
            "--trials" => {
                i += 1;
                if i < args.len() {
                    trials = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --trials value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--help" | "-h" => {
                println!(
                    "Usage: darts-sim [--legs N] [--skill S] [--seed SEED] [--hit-rate TARGET] [--trials N]"
                );
                println!();
                println!("Options:");
                println!("  --legs N           Number of 501 legs to simulate (default: 1000)");
                println!("  --skill S          Player skill 0-100 (default: 80)");
                println!("  --seed SEED        RNG seed (default: 42)");
                println!("  --hit-rate TARGET  Estimate hit rate for a target (e.g. T20, D16, Bull)");
                println!("  --trials N         Throws per hit-rate estimate (default: 100000)");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!(
                    "Usage: darts-sim [--legs N] [--skill S] [--seed SEED] [--hit-rate TARGET] [--trials N]"
                );
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if num_legs == 0 {
        eprintln!("Error: --legs must be at least 1");
        std::process::exit(1);
    }

    if !(0..=100).contains(&skill) {
        eprintln!("Error: --skill must be between 0 and 100");
        std::process::exit(1);
    }

    Args { num_legs, skill, seed, hit_rate, trials }
}

fn main() {
    let args = parse_args();
    let num_threads = darts::env_config::init_rayon_threads_lenient();

    // ── Hit-rate mode ───────────────────────────────────────────────────────
    if let Some(ref code) = args.hit_rate {
        let Some(target) = Target::parse(code) else {
            eprintln!("Unknown target: '{}'. Use codes like T20, D16, S7, 25, Bull.", code);
            std::process::exit(1);
        };

        println!(
            "Hit rate for {} at skill {} ({} throws)",
            target.code(),
            args.skill,
            args.trials
        );
        let rate = estimate_hit_rate(target, args.skill, args.trials, args.seed);
        println!("  Hit rate:    {:.2}%", rate * 100.0);
        println!("  Score/throw: {:.2} (on a hit)", target.score() as f64 * rate);
        return;
    }

    // ── Leg simulation mode ─────────────────────────────────────────────────
    println!("Darts 501 Simulation ({} legs)", args.num_legs);
    println!("  Skill:       {}", args.skill);
    println!();

    let ctx = DartsContext::new();

    println!(
        "Simulating {} legs ({} threads)...",
        args.num_legs, num_threads
    );
    let result = simulate_batch(&ctx, args.num_legs, args.skill, args.seed);

    let per_leg_us = result.elapsed.as_secs_f64() * 1e6 / args.num_legs as f64;
    let throughput = args.num_legs as f64 / result.elapsed.as_secs_f64();

    println!(
        "  Elapsed:     {:.1} ms",
        result.elapsed.as_secs_f64() * 1000.0
    );
    println!("  Per leg:     {:.1} \u{00b5}s", per_leg_us);
    println!("  Throughput:  {:.0} legs/sec", throughput);
    println!();

    println!("Results:");
    println!("  Mean darts:  {:.2}", result.mean);
    println!("  Std dev:     {:.1}", result.std_dev);
    println!("  Min:         {}", result.min);
    println!("  Max:         {}", result.max);
    println!("  Median:      {}", result.median);
    println!("  3-dart avg:  {:.1}", result.three_dart_average);
}
