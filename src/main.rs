use clap::{Parser, ValueEnum};
use tracing_subscriber::filter::LevelFilter;

use bitsy::env::lookup;
use bitsy::primitives::{environment_with, ground_environment};
use bitsy::{BitsyResult, Config, Machine, WordWidth};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Width {
    #[value(name = "8")]
    Eight,
    #[value(name = "16")]
    Sixteen,
}

#[derive(Parser, Debug)]
#[command(name = "bitsy", about = "Build a few values on the Bitsy runtime core and print them")]
struct Cli {
    /// Tag word width in bits
    #[arg(long, value_enum, default_value = "16")]
    width: Width,

    /// Pair arena capacity (defaults to the largest the width allows, up to 8192)
    #[arg(long)]
    pairs: Option<usize>,

    /// Symbol arena capacity
    #[arg(long)]
    symbols: Option<usize>,

    /// Sundry arena capacity
    #[arg(long)]
    sundries: Option<usize>,

    /// Guard equality and printing against cyclic structures
    #[arg(long)]
    cycle_guard: bool,

    /// Print every arena slot after the demo
    #[arg(long)]
    dump: bool,

    /// Log every arena allocation (same as BITSY_TRACE=1)
    #[arg(long)]
    trace: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let base = match self.width {
            Width::Eight => Config::tiny(),
            Width::Sixteen => Config::default(),
        };
        Config {
            pair_capacity: self.pairs.unwrap_or(base.pair_capacity),
            symbol_capacity: self.symbols.unwrap_or(base.symbol_capacity),
            sundry_capacity: self.sundries.unwrap_or(base.sundry_capacity),
            ..base
        }
        .with_cycle_guard(self.cycle_guard)
    }
}

fn main() {
    let cli = Cli::parse();

    let trace = cli.trace
        || std::env::var("BITSY_TRACE")
            .map(|v| v == "1")
            .unwrap_or(false);
    tracing_subscriber::fmt()
        .with_max_level(if trace {
            LevelFilter::TRACE
        } else {
            LevelFilter::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> BitsyResult<()> {
    let (machine, printed) = demo(cli.config())?;
    println!("{}", printed);
    println!("{}", machine.stats());
    if cli.dump {
        print!("{}", machine.dump());
    }
    Ok(())
}

/// Apply `cons` to `(1 (2 3))` and return the printed result. 8-bit arenas
/// are too small for the whole primitive table, so they only get `cons`.
fn demo(config: Config) -> BitsyResult<(Machine, String)> {
    let mut machine = Machine::new(config)?;
    let ground = match machine.config().word_width {
        WordWidth::Eight => environment_with(&mut machine, &["cons"])?,
        WordWidth::Sixteen => ground_environment(&mut machine)?,
    };

    let list23 = machine.int_list(&[2, 3])?;
    let one = machine.make_int(1)?;
    let args = machine.list(&[one, list23])?;
    let cons_sym = machine.intern("cons")?;
    let cons = lookup(&machine, ground, cons_sym)?;
    let result = machine.call(cons, args)?;

    let printed = machine.display(result).to_string();
    Ok((machine, printed))
}
