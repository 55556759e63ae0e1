use pokemon_skill_battle::{log_filter, run, CliOptions};
use std::env;
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!(
        "Usage: cargo run --release -- [--script battle.json] [--seed SEED] [--log-json out.json] [--quiet]"
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut opts = CliOptions::default();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--script" => {
                opts.script_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--script requires a path (e.g. --script battle.json)")
                })?);
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                opts.seed = Some(val.parse()?);
            }
            "--log-json" => {
                opts.log_json = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--log-json requires a path (e.g. --log-json log.json)")
                })?);
            }
            "--quiet" | "-q" => opts.quiet = true,
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }
    Ok(opts)
}

fn main() -> anyhow::Result<()> {
    let directives = env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let opts = parse_args()?;
    run(opts)?;
    Ok(())
}
