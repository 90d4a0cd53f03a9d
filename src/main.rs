use clap::Parser;
use deal_finder::config::{Command, OutputFormat};
use deal_finder::core::{Presenter, Region};
use deal_finder::utils::error::ErrorCategory;
use deal_finder::utils::{logger, validation::Validate};
use deal_finder::{
    ApiSettings, CliConfig, DealError, DealFinder, HtmlPresenter, InMemoryPage, InPageFailure,
    RequestDispatcher, TextPresenter, UiAction, ViewId,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting deal-finder");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let settings = match config.validate().and_then(|_| config.resolve_settings()) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    let page = Arc::new(InMemoryPage::new());
    let outcome = match config.format {
        OutputFormat::Html => run(&config, &settings, page.clone(), HtmlPresenter).await,
        OutputFormat::Text => run(&config, &settings, page.clone(), TextPresenter).await,
    };
    let view = match outcome {
        Ok(view) => view,
        Err(e) => exit_with(&e),
    };

    let rendered = match config.format {
        OutputFormat::Html => page.render_document(),
        OutputFormat::Text => Ok(visible_text(&page, view)),
    };
    let rendered = match rendered {
        Ok(rendered) => rendered,
        Err(e) => exit_with(&e),
    };

    match &config.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, rendered) {
                exit_with(&DealError::Io(e));
            }
            tracing::info!("📁 Output saved to: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    if view == ViewId::Error {
        tracing::error!("❌ No deals could be shown");
        std::process::exit(2);
    }

    tracing::info!("✅ Done, showing {}", view);
    Ok(())
}

async fn run<P: Presenter>(
    config: &CliConfig,
    settings: &ApiSettings,
    page: Arc<InMemoryPage>,
    presenter: P,
) -> deal_finder::Result<ViewId> {
    let dispatcher = RequestDispatcher::new(&settings.base_url)?;
    let finder = DealFinder::init(
        dispatcher,
        page.clone(),
        presenter,
        InPageFailure::default(),
        settings,
    );

    let view = match &config.command {
        Command::All => finder.handle(UiAction::ShowAllDeals).await,
        Command::Search { name } => {
            finder.handle(UiAction::OpenSearch).await;
            page.set_game_name(name);
            finder.handle(UiAction::SubmitSearch).await
        }
    };
    Ok(view)
}

fn visible_text(page: &InMemoryPage, view: ViewId) -> String {
    let region = match view {
        ViewId::Error => Region::ErrorPanel,
        _ => Region::DealsContainer,
    };
    page.content(region).unwrap_or_default()
}

fn exit_with(e: &DealError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.category() {
        ErrorCategory::Fetch | ErrorCategory::Input => 2,
        ErrorCategory::Configuration => 1,
        ErrorCategory::Presentation | ErrorCategory::System => 3,
    };
    std::process::exit(exit_code)
}
