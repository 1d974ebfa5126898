//! `omo-installer` 바이너리 진입점.

use omo_installer::application::availability::availability_from_args;
use omo_installer::application::ports::ConfigRepository;
use omo_installer::infrastructure::adapters::JsonConfigRepository;
use omo_installer::interface::cli::{Cli, CliAction, run_install};
use omo_installer::interface::composition::AppComposition;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    let config = match JsonConfigRepository.load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    };
    let composition = AppComposition::new(config);

    let result = match action {
        CliAction::InspectConfig { config_dir } => composition
            .context(config_dir.as_deref())
            .and_then(|ctx| composition.inspect_config_usecase().execute(&ctx))
            .map(|json| {
                println!("{json}");
                0
            }),
        CliAction::Resolve {
            providers,
            config_dir,
        } => composition.context(config_dir.as_deref()).and_then(|ctx| {
            let detected = composition.detect_providers_usecase().execute(&ctx);
            let availability = availability_from_args(&providers, detected.as_ref())?;
            let json = composition.resolve_models_usecase().execute(&availability)?;
            println!("{json}");
            Ok(0)
        }),
        CliAction::Install(options) => run_install(&composition, options).await,
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}
