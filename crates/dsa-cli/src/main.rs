//! DSA CLI
//!
//! Command-line interface for the DSA engine:
//! - Domain parameter generation
//! - End-to-end demo (parameters, keys, signature, verification)
//! - Signing and verification with supplied values

mod report;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dsa_core::{
    params, verify, Digest, DomainParams, DsaConfig, KeyPair, ParamStrategy, Signature, Signer,
};
use num_bigint_dig::BigUint;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::path::PathBuf;
use tracing::{info, Level};

use report::{DemoReport, ParamsReport, SignatureReport, VerificationReport};

/// DSA - Digital Signature Algorithm toolkit
#[derive(Parser)]
#[command(name = "dsa-cli")]
#[command(about = "Arbitrary-precision DSA parameter generation, signing and verification")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, env = "DSA_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for a reproducible run (OS entropy when absent)
    #[arg(long, env = "DSA_SEED")]
    seed: Option<u64>,

    /// Bit length of p (overrides the configuration file)
    #[arg(long, env = "DSA_P_BITS")]
    p_bits: Option<usize>,

    /// Bit length of q (overrides the configuration file)
    #[arg(long, env = "DSA_Q_BITS")]
    q_bits: Option<usize>,

    /// p/q construction (overrides the configuration file)
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    BottomUp,
    TopDown,
}

impl From<Strategy> for ParamStrategy {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::BottomUp => ParamStrategy::BottomUp,
            Strategy::TopDown => ParamStrategy::TopDown,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate parameters and keys, sign a random digest and verify it
    Demo,

    /// Generate domain parameters
    Params,

    /// Sign a digest with a known private key
    Sign {
        #[command(flatten)]
        domain: DomainArgs,

        /// Private key x (decimal)
        #[arg(short, long)]
        x: String,

        /// Message digest (decimal)
        #[arg(short, long)]
        digest: String,
    },

    /// Verify a signature
    Verify {
        #[command(flatten)]
        domain: DomainArgs,

        /// Public key y (decimal)
        #[arg(short, long)]
        y: String,

        /// Message digest (decimal)
        #[arg(short, long)]
        digest: String,

        /// Signature r (decimal)
        #[arg(short, long)]
        r: String,

        /// Signature s (decimal)
        #[arg(short, long)]
        s: String,
    },
}

/// Domain parameters given on the command line
#[derive(clap::Args)]
struct DomainArgs {
    /// Modulus p (decimal)
    #[arg(short, long)]
    p: String,

    /// Subgroup order q (decimal)
    #[arg(short, long)]
    q: String,

    /// Generator g (decimal)
    #[arg(short, long)]
    g: String,
}

impl DomainArgs {
    fn parse(&self) -> Result<DomainParams> {
        Ok(DomainParams::new(
            parse_decimal("p", &self.p)?,
            parse_decimal("q", &self.q)?,
            parse_decimal("g", &self.g)?,
        ))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into());
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = load_config(&cli)?;
    let mut rng = match cli.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    match cli.command {
        Commands::Demo => run_demo(&cli, &config, &mut rng),
        Commands::Params => run_params(&cli, &config, &mut rng),
        Commands::Sign {
            ref domain,
            ref x,
            ref digest,
        } => run_sign(&cli, &config, &mut rng, domain, x, digest),
        Commands::Verify {
            ref domain,
            ref y,
            ref digest,
            ref r,
            ref s,
        } => run_verify(&cli, domain, y, digest, r, s),
    }
}

fn load_config(cli: &Cli) -> Result<DsaConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            DsaConfig::from_json_str(&json)?
        }
        None => DsaConfig::default(),
    };

    if let Some(p_bits) = cli.p_bits {
        config.p_bits = p_bits;
    }
    if let Some(q_bits) = cli.q_bits {
        config.q_bits = q_bits;
    }
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy.into();
    }

    config.validate()?;
    Ok(config)
}

fn run_demo(cli: &Cli, config: &DsaConfig, rng: &mut ChaCha20Rng) -> Result<()> {
    info!(
        p_bits = config.p_bits,
        q_bits = config.q_bits,
        strategy = ?config.strategy,
        "Starting demo"
    );

    let domain = params::generate(config, rng)?;
    let key = KeyPair::generate(&domain, rng)?;
    let digest = Digest::random(rng, domain.p_bits());
    let signature = Signer::from_config(config).sign(&domain, &key, &digest, rng)?;
    let verification = verify::verify_detailed(&domain, key.public_key(), &digest, &signature);

    let report = DemoReport::new(&domain, &key, &digest, &signature, &verification);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }

    if !verification.valid {
        bail!("demo signature failed to verify");
    }
    Ok(())
}

fn run_params(cli: &Cli, config: &DsaConfig, rng: &mut ChaCha20Rng) -> Result<()> {
    let domain = params::generate(config, rng)?;

    let report = ParamsReport::new(&domain);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }
    Ok(())
}

fn run_sign(
    cli: &Cli,
    config: &DsaConfig,
    rng: &mut ChaCha20Rng,
    domain: &DomainArgs,
    x: &str,
    digest: &str,
) -> Result<()> {
    let domain = domain.parse()?;
    domain
        .validate(&config.primality_test())
        .context("rejecting supplied domain parameters")?;

    let key = KeyPair::from_private(&domain, parse_decimal("x", x)?)?;
    let digest = Digest::from(parse_decimal("digest", digest)?);

    info!(q_bits = domain.q_bits(), "Signing digest");
    let signature = Signer::from_config(config).sign(&domain, &key, &digest, rng)?;

    let report = SignatureReport::new(&key, &signature);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }
    Ok(())
}

fn run_verify(
    cli: &Cli,
    domain: &DomainArgs,
    y: &str,
    digest: &str,
    r: &str,
    s: &str,
) -> Result<()> {
    let domain = domain.parse()?;
    let y = parse_decimal("y", y)?;
    let digest = Digest::from(parse_decimal("digest", digest)?);
    let signature = Signature::new(parse_decimal("r", r)?, parse_decimal("s", s)?);

    let verification = verify::verify_detailed(&domain, &y, &digest, &signature);

    let report = VerificationReport::new(&verification);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }

    if !verification.valid {
        std::process::exit(1);
    }
    Ok(())
}

fn parse_decimal(name: &str, value: &str) -> Result<BigUint> {
    BigUint::parse_bytes(value.trim().as_bytes(), 10)
        .with_context(|| format!("{} must be a non-negative decimal integer", name))
}
