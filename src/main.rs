use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{debug, error, Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use signalc::driver::{CompileOptions, Compiler};
use signalc::report::{self, ReportOptions};
use signalc::toolchain::MasmToolchain;
use signalc::utils::config::driver::{DEFAULT_ASSEMBLER, DEFAULT_LINKER, INFO_FILE};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Signal compiler that generates 32-bit MASM assembly",
    long_about = "Signal compiler that generates 32-bit MASM assembly.\n\
                 It performs lexical analysis, parsing and code generation, then hands the\n\
                 listing to the MASM assembler and linker.\n\
                 \n\
                 Example usage:\n\
                 signalc input.sig                    # Compile, assemble and link\n\
                 signalc input.sig -o out.asm         # Specify output file\n\
                 signalc input.sig -S                 # Only write the listing\n\
                 signalc input.sig --show-ast         # Display abstract syntax tree\n\
                 signalc input.sig --timing           # Show compilation timing"
)]
struct Cli {
    // The path to the .sig file to compile
    path: PathBuf,

    // Output listing path (defaults to input file with .asm extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    // Skip assembly and linking (only generate the .asm file)
    #[arg(short = 'S', long)]
    listing_only: bool,

    // Print the token sequence
    #[arg(long)]
    show_tokens: bool,

    // Print the identifier, constant and keyword tables
    #[arg(long)]
    show_tables: bool,

    // Show AST after parsing
    #[arg(long)]
    show_ast: bool,

    // Where to persist the report
    #[arg(long, default_value = INFO_FILE)]
    info_file: PathBuf,

    // Do not persist the report
    #[arg(long)]
    no_info_file: bool,

    // Show compilation timing
    #[arg(short, long)]
    timing: bool,

    // Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(long, default_value = DEFAULT_ASSEMBLER)]
    assembler: String,

    #[arg(long, default_value = DEFAULT_LINKER)]
    linker: String,
}

impl Cli {
    fn log_level_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn init_logging(level_filter: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level_filter)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}]: {}",
                record.level().if_supports_color(Stderr, |text| match text {
                    Level::Error => text.bright_red().to_string(),
                    Level::Warn => text.bright_yellow().to_string(),
                    Level::Info => text.green().to_string(),
                    Level::Debug => text.blue().to_string(),
                    Level::Trace => text.purple().to_string(),
                }),
                record.args()
            )
        })
        .init();
}

fn main() {
    let args = Cli::parse();
    init_logging(args.log_level_filter());
    debug!("starting signalc with args: {args:?}");

    let options = CompileOptions {
        source: args.path.clone(),
        output: args.output.clone(),
        listing_only: args.listing_only,
    };
    let toolchain = MasmToolchain::new(args.assembler.clone(), args.linker.clone());
    let mut compiler = Compiler::new(options);
    let succeeded = compiler.run(&toolchain);

    let report_options = ReportOptions {
        show_tokens: args.show_tokens,
        show_tables: args.show_tables,
        show_ast: args.show_ast,
    };
    let mut rendered = match report::render(&compiler, report_options) {
        Ok(rendered) => rendered,
        Err(e) => {
            error!("could not render report: {}", e);
            String::new()
        }
    };
    if args.timing {
        match report::render_stats(compiler.stats()) {
            Ok(stats) => {
                rendered.push('\n');
                rendered.push_str(&stats);
            }
            Err(e) => error!("could not render statistics: {}", e),
        }
    }

    if std::io::stdout().is_terminal() {
        print!("{}", rendered);
    } else {
        print!("{}", report::strip_ansi(&rendered));
    }
    if !args.no_info_file {
        if let Err(e) = report::write_info_file(&args.info_file, &rendered) {
            error!("{}", e);
        }
    }

    if succeeded {
        if compiler.is_built() {
            println!("Build succeeded: {}", compiler.options().output_path().display());
        } else {
            println!("Listing written: {}", compiler.options().output_path().display());
        }
    } else {
        std::process::exit(1);
    }
}
