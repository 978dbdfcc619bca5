use clap::Parser;
use hmmer2fsm::cli::{run, OutputFormat};
use hmmer2fsm::io::hmmoc::RealType;
use hmmer2fsm::params::ConvertParams;
use log::{error, info};

/// Translates HMMER2 .hmm file into HMMoC .xml file
#[derive(Parser, Debug)]
#[clap(author, version, about, arg_required_else_help = true)]
struct Opts {
    /// Generate log-space arithmetic instead of bfloat
    #[clap(long)]
    logspace: bool,
    /// Output document: hmmoc, json or dot
    #[clap(short, long, default_value = "hmmoc")]
    format: OutputFormat,
    /// Output filename. stdout if not specified
    #[clap(short, long)]
    output: Option<std::path::PathBuf>,
    /// Transitions with probability at most this value are removed
    #[clap(long, default_value_t = 1.0e-6)]
    purge_epsilon: f64,
    /// Input HMMER2 (plan-7) hmm file, optionally gzipped
    input: std::path::PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts: Opts = Opts::parse();
    info!("started_at={}", chrono::Local::now());
    info!("opts={:?}", opts);

    let realtype = if opts.logspace {
        RealType::LogSpace
    } else {
        RealType::BFloat
    };
    let params = ConvertParams::with_purge_epsilon(opts.purge_epsilon);
    if let Err(e) = run(
        &opts.input,
        opts.output.as_deref(),
        opts.format,
        realtype,
        &params,
    ) {
        error!("{}", e);
        std::process::exit(1);
    }
    info!("finished_at={}", chrono::Local::now());
}
