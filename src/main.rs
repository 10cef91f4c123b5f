//! Wordle VOI - CLI
//!
//! Evaluates guess-selection strategies over a corpus, or plays a single
//! target and prints the attempt trace.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wordle_voi::{
    commands::{EvaluationConfig, play_target, run_evaluation},
    core::Word,
    game::EnvironmentConfig,
    output::{print_evaluation_summary, print_play_result},
    solver::{RewardConfig, Schedule, StrategyKind, StrategyType},
    wordlists::{default_corpus, loader::load_from_file},
};

#[derive(Parser)]
#[command(
    name = "wordle_voi",
    about = "Evaluate Wordle guess-selection strategies (entropy, value of information, random, hybrids)",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    strategy: StrategyArgs,

    /// Wordlist: 'all' (default, embedded corpus) or path to a file
    #[arg(short = 'w', long, global = true, default_value = "all")]
    wordlist: String,
}

#[derive(Args, Clone, Copy)]
struct StrategyArgs {
    /// Strategy: css (default), voi, random, pure-random
    #[arg(short, long, global = true, default_value = "css")]
    strategy: StrategyKind,

    /// Seed for every random source (OS entropy if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Cost of one more attempt in the expected-reward terms
    #[arg(long, global = true, default_value_t = -1.0, allow_hyphen_values = true)]
    attempt_penalty: f64,

    /// Payoff for hitting the target in the expected-reward terms
    #[arg(long, global = true, default_value_t = 10.0)]
    success_reward: f64,

    /// Pair the strategy with a second one to form a hybrid
    #[arg(long, global = true)]
    hybrid_with: Option<StrategyKind>,

    /// Hybrid routing: switch:K, alt-a or alt-b
    #[arg(long, global = true, default_value = "switch:2")]
    schedule: Schedule,
}

impl StrategyArgs {
    fn build(&self, seed: Option<u64>) -> StrategyType {
        let rewards = RewardConfig::new(self.attempt_penalty, self.success_reward);
        match self.hybrid_with {
            Some(other) => self.strategy.build_hybrid(other, self.schedule, rewards, seed),
            None => self.strategy.build(rewards, seed),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play every corpus word as a target and report statistics (default)
    Evaluate {
        /// Limit number of targets
        #[arg(short, long)]
        limit: Option<usize>,

        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Play a single target word and print the trace
    Play {
        /// The target word
        word: String,

        /// Show candidate counts, information gain and violations per turn
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Load the corpus selected by the -w flag
fn load_corpus(wordlist: &str) -> Result<Vec<Word>> {
    let corpus = match wordlist {
        "all" => default_corpus(),
        path => load_from_file(path).with_context(|| format!("failed to read wordlist '{path}'"))?,
    };
    anyhow::ensure!(!corpus.is_empty(), "wordlist '{wordlist}' contains no valid words");
    Ok(corpus)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let corpus = load_corpus(&cli.wordlist)?;
    let command = cli.command.unwrap_or(Commands::Evaluate {
        limit: None,
        quiet: false,
    });

    match command {
        Commands::Evaluate { limit, quiet } => run_evaluate_command(cli.strategy, &corpus, limit, quiet),
        Commands::Play { word, verbose } => run_play_command(cli.strategy, &corpus, &word, verbose),
    }
}

fn run_evaluate_command(
    args: StrategyArgs,
    corpus: &[Word],
    limit: Option<usize>,
    quiet: bool,
) -> Result<()> {
    let config = EvaluationConfig {
        environment: EnvironmentConfig::default(),
        seed: args.seed,
        limit,
        show_progress: !quiet,
    };

    println!(
        "\n🎯 Evaluating against {} targets",
        limit.unwrap_or(corpus.len()).min(corpus.len())
    );
    let summary = run_evaluation(|seed| args.build(seed), corpus, corpus, &config)?;
    print_evaluation_summary(&summary);
    Ok(())
}

fn run_play_command(args: StrategyArgs, corpus: &[Word], word: &str, verbose: bool) -> Result<()> {
    let mut strategy = args.build(args.seed);
    let result = play_target(&mut strategy, corpus, word, EnvironmentConfig::default())?;
    print_play_result(&result, verbose);
    Ok(())
}
