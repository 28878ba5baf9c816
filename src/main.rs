use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;

use greedycover::generator::{self, GeneratorConfig};
use greedycover::{Layout, Strategy};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// Set costs first, then the sets containing each element
    Rows,
    /// Each set's cost followed by its elements
    Cols,
}

impl From<LayoutArg> for Layout {
    fn from(val: LayoutArg) -> Self {
        match val {
            LayoutArg::Rows => Layout::Rows,
            LayoutArg::Cols => Layout::Cols,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Recompute every unit cost in every iteration
    Naive,
    /// Incrementally maintained unit costs
    Optimized,
}

impl From<StrategyArg> for Strategy {
    fn from(val: StrategyArg) -> Self {
        match val {
            StrategyArg::Naive => Strategy::Naive,
            StrategyArg::Optimized => Strategy::Optimized,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "greedycover")]
#[command(about = "Greedy approximation for weighted set cover", long_about = None)]
#[command(version)]
struct Args {
    /// Enable verbose logging (every greedy step)
    #[arg(short = 'v', long = "verbose", global = true, conflicts_with = "debug")]
    verbose: bool,

    /// Turn on debugging information
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve an instance file
    Solve {
        /// Input instance
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Input layout
        #[arg(short = 'l', long = "layout", value_enum, default_value = "cols")]
        layout: LayoutArg,

        /// Greedy strategy
        #[arg(short = 's', long = "strategy", value_enum, default_value = "optimized")]
        strategy: StrategyArg,

        /// Output file (writes to stdout if not specified)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
    /// Write a random feasible instance
    Generate {
        /// Number of elements
        #[arg(short = 'n', long = "elements")]
        n: usize,

        /// Number of sets
        #[arg(short = 'm', long = "sets")]
        m: usize,

        /// Costs are drawn from 1..=MAX_COST
        #[arg(long = "max-cost", default_value_t = 100)]
        max_cost: u32,

        /// Probability of each element being in each set
        #[arg(long = "density", default_value_t = 0.1)]
        density: f64,

        #[arg(long = "seed", default_value_t = 1)]
        seed: u64,

        /// Output layout
        #[arg(short = 'l', long = "layout", value_enum, default_value = "cols")]
        layout: LayoutArg,

        /// Output file (writes to stdout if not specified)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
}

fn output_writer(path: Option<&PathBuf>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
        Some(path) => {
            let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Solve { input, layout, strategy, output } => {
            let strategy = Strategy::from(strategy);
            tracing::debug!("Running {} greedy on {}", strategy, input.display());
            // The solution is buffered so a failed solve leaves no partial output file.
            let mut buf = Vec::new();
            let summary = greedycover::solve_file(&input, layout.into(), strategy, &mut buf)
                .with_context(|| format!("failed to solve {}", input.display()))?;
            let mut out = output_writer(output.as_ref())?;
            out.write_all(&buf)?;
            out.flush()?;
            summary.log();
        }
        Command::Generate { n, m, max_cost, density, seed, layout, output } => {
            let config = GeneratorConfig { n, m, max_cost, density, seed };
            let layout = Layout::from(layout);
            tracing::debug!("Generating instance {}", generator::instance_name(&config, layout));
            let model = generator::generate(&config)?;
            generator::write_instance(&model, layout, output_writer(output.as_ref())?)?;
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(args.command) {
        tracing::error!("{:#}", e);
        process::exit(1);
    }
}
