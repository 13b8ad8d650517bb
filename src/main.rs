use clap::Parser;
use gift_draw::utils::progress::BarProgress;
use gift_draw::utils::{logger, validation::Validate};
use gift_draw::{build_search, CliConfig, DrawConfig, DrawError, SolutionFinder};

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting gift-draw");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    if config.first && config.strategy != gift_draw::StrategyKind::Exhaustive {
        tracing::warn!("--first only applies to the exhaustive strategy, ignoring it");
    }

    tracing::info!("Loading configuration from: {}", config.config);
    let problem = match DrawConfig::from_file(&config.config).and_then(DrawConfig::into_problem) {
        Ok(problem) => problem,
        Err(e) => exit_with(&e),
    };

    let seed = config.resolve_seed();
    tracing::info!("Using seed {} (pass --seed {} to repeat this draw)", seed, seed);

    let search = build_search(config.strategy, seed, config.first, config.max_attempts);
    let mut finder = SolutionFinder::new_with_monitoring(search, config.monitor);
    let mut progress = BarProgress::new();

    match finder.run(&problem, &mut progress) {
        Ok(solution) => {
            if config.json {
                match solution.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(e) => exit_with(&e),
                }
            } else {
                print!("{}", solution);
            }
        }
        Err(e) => exit_with(&e),
    }
}

fn exit_with(e: &DrawError) -> ! {
    tracing::error!(
        "{} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code())
}
