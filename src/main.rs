use clap::Parser;

use cv_match::cli::{Cli, build_scorer, run};
use cv_match::errors::ScoreResult;
use cv_match::repository::FsDocumentRepository;

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    if let Err(e) = execute(&cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn execute(cli: &Cli) -> ScoreResult<()> {
    let config = cli.load_config()?;
    let scorer = build_scorer(&config)?;
    let mut stdout = std::io::stdout().lock();

    run(cli, &config, &FsDocumentRepository::default(), &scorer, &mut stdout)?;
    Ok(())
}
