use std::process::ExitCode;

use clap::Parser;

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod http_probe;
pub mod input;
pub mod logging;
pub mod report;
pub mod store;
#[cfg(test)]
mod test_support;

use cli::{Cli, Command, DashboardFormat, TargetsAction};
use config::{app_config, probe_config::Settings};
use error::AppError;
use export::{RowOptions, console::render_table, export_report, to_rows};
use http_probe::prelude::{HttpProber, ProbeResult, report as error_report};
use report::{ReportBuilder, aggregate::aggregate};
use store::{TargetStore, YamlTargetStore};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    app_config::load_dotenv();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", error_report(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut settings = app_config::load_settings(&cli.config)?;
    cli.apply_overrides(&mut settings);
    app_config::validate(&settings)?;
    let mut store = YamlTargetStore::new(&settings.store_path);

    match cli.command {
        Command::Check { file } => {
            let block = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => std::io::read_to_string(std::io::stdin())?,
            };
            let results = check(&settings, &input::parse_url_block(&block)).await?;
            print!("{}", render_table(&to_rows(&results, row_options(&settings))));
        }
        Command::CheckAll => {
            let results = check(&settings, &store.urls()?).await?;
            print!("{}", render_table(&to_rows(&results, row_options(&settings))));
        }
        Command::Dashboard { format } => {
            let results = check(&settings, &store.urls()?).await?;
            let summary = aggregate(&results);
            match format {
                DashboardFormat::Text => print!("{summary}"),
                DashboardFormat::Yaml => print!("{}", serde_yaml::to_string(&summary)?),
            }
        }
        Command::Export { format, output } => {
            let results = check(&settings, &store.urls()?).await?;
            let rows = to_rows(&results, row_options(&settings));

            let (destination, document) =
                export_report(format, &rows, output, &std::env::temp_dir())?;
            log::info!(
                "Exported {} row(s) as {} to {}",
                rows.len(),
                document.mime,
                destination.display()
            );
        }
        Command::Targets { action } => match action {
            TargetsAction::List => {
                for target in store.list()? {
                    println!("{:>4}  {}", target.id, target.url);
                }
            }
            TargetsAction::Add { url } => {
                let target = store.add(&url)?;
                println!("Added {} as #{}", target.url, target.id);
            }
            TargetsAction::Remove { id } => {
                let target = store.remove(id)?;
                println!("Removed #{} {}", target.id, target.url);
            }
        },
    }
    Ok(())
}

async fn check(settings: &Settings, urls: &[String]) -> Result<Vec<ProbeResult>, AppError> {
    let prober = HttpProber::from_settings(&settings.probe)?;
    let builder = ReportBuilder::new(prober).with_concurrency(settings.probe.concurrency);
    Ok(builder.build(urls).await)
}

fn row_options(settings: &Settings) -> RowOptions {
    RowOptions {
        locale: settings.report.locale,
        label_policy: settings.report.label_policy,
    }
}
