use clap::Parser;
use pubcost::utils::{logger, validation::Validate};
use pubcost::{
    AnalysisEngine, CliConfig, LocalStorage, OpenAlexClient, TablesConfig, TrackerError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting pubcost");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }
    let query = config.author_query()?;

    let tables_config = match &config.tables {
        Some(path) => TablesConfig::from_file(path)?,
        None => TablesConfig::builtin()?,
    };
    let tables = tables_config.build()?;

    let client = OpenAlexClient::with_base_url(config.api_base_url.clone(), config.mailto.clone());
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = AnalysisEngine::new(client.clone(), client, storage, tables, config.max_works);

    let analysis = match engine.run(&query).await {
        Ok(analysis) => analysis,
        Err(TrackerError::AmbiguousAuthor { query, candidates }) => {
            eprintln!("Multiple authors match \"{}\":", query);
            for candidate in candidates {
                eprintln!("  {}", candidate);
            }
            eprintln!("Re-run with --author-id or --orcid to pick one.");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Analysis failed: {}", e);
            eprintln!("Analysis failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", pubcost::report::render_text(&analysis));

    let bundle_name = engine.export(&analysis).await?;
    tracing::info!("Report bundle saved to {}/{}", config.output_path, bundle_name);
    println!("Report bundle saved to {}/{}", config.output_path, bundle_name);

    Ok(())
}
