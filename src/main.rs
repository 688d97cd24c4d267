use bannergen::{
    config::{BannerConfig, ProviderKind},
    create_generator, export,
    logger::{self, LogLevel, LoggerConfig},
    BannerStudio, RoundOutcome, SkipReason, DESIGN_TEMPLATES,
};
use clap::Parser;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "bannergen")]
#[command(about = "Generate advertising banners in every common aspect ratio")]
struct Cli {
    /// What the product is and who it is for
    #[arg(long, short, required_unless_present = "list_templates")]
    description: Option<String>,

    /// Product landing page
    #[arg(long)]
    url: Option<String>,

    /// Design template name (see --list-templates)
    #[arg(long, short)]
    template: Option<String>,

    /// Image provider: gemini or bedrock (overrides BANNER_PROVIDER)
    #[arg(long)]
    provider: Option<ProviderKind>,

    /// Where to write the generated images (overrides BANNER_OUTPUT_DIR)
    #[arg(long, short)]
    output_dir: Option<PathBuf>,

    /// Print the available design templates and exit
    #[arg(long)]
    list_templates: bool,

    /// Log at debug level with source locations
    #[arg(long, short)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Also append logs to this file
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let dotenv_loaded = dotenv::dotenv().is_ok();

    let mut logger_config = if cli.verbose {
        LoggerConfig::development()
    } else {
        LoggerConfig::default().with_level(LogLevel::Info)
    };
    if cli.json_logs {
        logger_config = logger_config.with_json_output(true).with_colors(false);
    }
    if let Some(path) = &cli.log_file {
        logger_config = logger_config.with_file_output(path);
    }
    if let Err(e) = logger::init_with_config(logger_config) {
        eprintln!("{}", e);
        process::exit(1);
    }

    if dotenv_loaded {
        log::debug!("✅ .env file loaded");
    } else {
        log::debug!("No .env file found, using system environment variables");
    }

    if cli.list_templates {
        for template in DESIGN_TEMPLATES.iter() {
            println!("{:<22} {}", template.name, template.description);
        }
        return;
    }

    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> bannergen::Result<()> {
    let mut config = BannerConfig::from_env()?;
    if let Some(provider) = cli.provider {
        config = config.with_provider(provider);
    }
    if let Some(dir) = cli.output_dir {
        config = config.with_output_dir(dir);
    }
    logger::log_config_info(&config);

    let generator = create_generator(&config).await?;
    let studio = BannerStudio::new(generator);
    studio.set_description(cli.description.unwrap_or_default());
    if let Some(url) = cli.url {
        studio.set_url(url);
    }
    if let Some(template) = cli.template {
        studio.select_template(&template)?;
    }

    match studio.generate().await {
        RoundOutcome::Skipped(SkipReason::EmptyDescription) => {
            log::warn!("Product description is empty, nothing to generate");
            return Ok(());
        }
        RoundOutcome::Skipped(SkipReason::AlreadyRunning) => return Ok(()),
        RoundOutcome::Completed { succeeded, total } => {
            log::info!("✅ {} of {} banners generated", succeeded, total);
        }
        RoundOutcome::Failed(_) => {}
    }

    if let Some(error) = studio.error() {
        log::error!("{}", error);
    }

    let banners = studio.banners();
    for path in export::save_banners(&banners, &config.output_dir)? {
        println!("{}", path.display());
    }

    Ok(())
}
