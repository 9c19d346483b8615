use anyhow::Result;
use clap::{Parser, Subcommand};
use hamming_cli::{commands, OnUncorrectable};
use hamming_core::constants::{
    DEFAULT_DATA_PER_BLOCK, DEFAULT_FLIP_PROBABILITY, DEFAULT_GROUPS_PER_INTERLEAVING,
    DEFAULT_NOISE_BUFFER_SIZE,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "hamming")]
#[command(about = "SEC-DED Hamming codec with block interleaving", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file into interleaved Hamming frames
    Encode {
        /// Input file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Output file ("-" for stdout)
        #[arg(short, long)]
        output: String,

        /// Data bytes per code block (8 gives the (72,64) code)
        #[arg(long, default_value_t = DEFAULT_DATA_PER_BLOCK)]
        data_per_block: usize,

        /// Code blocks interleaved per frame
        #[arg(long, default_value_t = DEFAULT_GROUPS_PER_INTERLEAVING)]
        groups: usize,

        /// Show a progress bar
        #[arg(long)]
        progress: bool,
    },

    /// Correct and decode interleaved Hamming frames
    Decode {
        /// Input file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Output file ("-" for stdout)
        #[arg(short, long)]
        output: String,

        /// Data bytes per code block used when encoding
        #[arg(long, default_value_t = DEFAULT_DATA_PER_BLOCK)]
        data_per_block: usize,

        /// Code blocks per frame used when encoding
        #[arg(long, default_value_t = DEFAULT_GROUPS_PER_INTERLEAVING)]
        groups: usize,

        /// What to do with blocks that have two flipped bits
        #[arg(long, value_enum, default_value_t = OnUncorrectable::Abort)]
        on_uncorrectable: OnUncorrectable,

        /// Write decode statistics as JSON
        #[arg(long)]
        report: Option<String>,

        /// Show a progress bar
        #[arg(long)]
        progress: bool,
    },

    /// Flip random bits to simulate a noisy channel
    Distort {
        /// Input file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Output file ("-" for stdout)
        #[arg(short, long)]
        output: String,

        /// Overall bit flip probability
        #[arg(short, long, default_value_t = DEFAULT_FLIP_PROBABILITY)]
        probability: f64,

        /// Flip contiguous bursts of up to this many bits
        #[arg(long)]
        max_burst: Option<usize>,

        /// Buffer size in bytes for independent flips
        #[arg(long, default_value_t = DEFAULT_NOISE_BUFFER_SIZE)]
        buffer_size: usize,

        /// Seed for reproducible noise
        #[arg(long)]
        seed: Option<u64>,

        /// Write noise statistics as JSON
        #[arg(long)]
        report: Option<String>,
    },

    /// Print the first bytes of a file in binary
    Inspect {
        /// Input file
        #[arg(short, long)]
        input: String,

        /// Number of bytes to show
        #[arg(short, long, default_value_t = commands::inspect::DEFAULT_PREVIEW_BYTES)]
        bytes: usize,
    },

    /// Show the code and frame geometry for a block size
    Layout {
        /// Data bytes per code block
        #[arg(long, default_value_t = DEFAULT_DATA_PER_BLOCK)]
        data_per_block: usize,

        /// Code blocks interleaved per frame
        #[arg(long, default_value_t = DEFAULT_GROUPS_PER_INTERLEAVING)]
        groups: usize,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout may carry codec output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Encode {
            input,
            output,
            data_per_block,
            groups,
            progress,
        } => commands::encode::execute(&input, &output, data_per_block, groups, progress)
            .map(|_| ()),

        Commands::Decode {
            input,
            output,
            data_per_block,
            groups,
            on_uncorrectable,
            report,
            progress,
        } => commands::decode::execute(
            &input,
            &output,
            data_per_block,
            groups,
            on_uncorrectable,
            report.as_deref(),
            progress,
        )
        .map(|_| ()),

        Commands::Distort {
            input,
            output,
            probability,
            max_burst,
            buffer_size,
            seed,
            report,
        } => commands::distort::execute(
            &input,
            &output,
            probability,
            max_burst,
            buffer_size,
            seed,
            report.as_deref(),
        )
        .map(|_| ()),

        Commands::Inspect { input, bytes } => commands::inspect::execute(&input, bytes),

        Commands::Layout {
            data_per_block,
            groups,
            json,
        } => commands::layout::execute(data_per_block, groups, json),
    }
}
