use std::sync::Arc;

use clap::{Parser, crate_version};
use tokio::net::TcpListener;
use wattwise::{
    api,
    cli::{Args, CompareArgs, Command, ServeArgs},
    config::Config,
    core::{reading::MeterReadings, service::EnergyService, store::ReadingStore},
    prelude::*,
    tables::build_recommendation_table,
};

#[tokio::main]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let (catalog, accounts) = Config::load(args.catalog_path.as_deref())?.into_parts()?;
    let service =
        EnergyService::new(Arc::new(ReadingStore::new()), Arc::new(catalog), Arc::new(accounts));

    match args.command {
        Command::Serve(args) => serve(args, service).await?,
        Command::Compare(args) => compare(&args, &service)?,
    }

    info!("done!");
    Ok(())
}

async fn serve(args: ServeArgs, service: EnergyService) -> Result {
    let listener = TcpListener::bind(&args.bind_address)
        .await
        .with_context(|| format!("failed to bind to `{}`", args.bind_address))?;
    info!(args.bind_address, "serving…");
    axum::serve(listener, api::router(Arc::new(service)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Per <https://github.com/tokio-rs/axum/blob/main/examples/graceful-shutdown/src/main.rs>.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutting down…");
}

#[instrument(skip_all, fields(path = %args.readings_path.display()))]
fn compare(args: &CompareArgs, service: &EnergyService) -> Result {
    let contents = std::fs::read_to_string(&args.readings_path)
        .with_context(|| format!("failed to read `{}`", args.readings_path.display()))?;
    let MeterReadings { smart_meter_id, electricity_readings } =
        serde_json::from_str(&contents).context("failed to parse the readings")?;
    let meter_id = smart_meter_id.context("the document has no smart meter ID")?;
    service.store_readings(Some(&meter_id), electricity_readings)?;

    let recommendations =
        service.recommend(&meter_id, args.limit)?.context("no readings for the smart meter")?;
    let current_plan_id = service.accounts().price_plan_id(&meter_id);
    info!(%meter_id, ?current_plan_id, n_plans = recommendations.len(), "compared");
    let table = build_recommendation_table(&recommendations, service.catalog(), current_plan_id);
    println!("{table}");
    Ok(())
}
