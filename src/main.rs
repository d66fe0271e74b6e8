use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};

use reflang::interpreter::{Machine, MachineConfig};
use reflang::programs::Program;
use reflang::types::{TypeEnv, type_of};

#[derive(Parser)]
#[command(name = "reflang", about = "Run a bundled reflang sample program")]
struct Cli {
    /// Sample program to run
    #[arg(value_enum, default_value = "countdown")]
    program: Program,
    /// Stop after this many reduction steps
    #[arg(long)]
    fuel: Option<usize>,
    /// Skip the type check
    #[arg(long)]
    no_check: bool,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let expr = cli.program.build();
    info!(program = ?cli.program, "built");

    if !cli.no_check {
        match type_of(&TypeEnv::empty(), &expr) {
            Ok(ty) => println!("type: {}", ty),
            Err(err) => println!("ill-typed, running anyway: {}", err),
        }
    }

    let config = MachineConfig { fuel: cli.fuel };
    let mut machine = Machine::with_config(expr, config);
    let value = machine
        .run()
        .with_context(|| format!("running {:?}", cli.program))?;

    println!("{}", value);
    println!("steps: {}", machine.steps_taken());

    Ok(())
}
