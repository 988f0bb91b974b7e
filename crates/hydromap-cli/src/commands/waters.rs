use crate::cli::WatersArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use hydromap::engine::config::WatersConfigBuilder;
use hydromap::engine::progress::ProgressReporter;
use hydromap::workflows;
use tracing::info;

pub fn run(args: WatersArgs) -> Result<()> {
    let mut builder = WatersConfigBuilder::new()
        .log_path(args.input.clone())
        .plot_path(args.output.clone())
        .dpi(args.dpi);
    if let Some(time) = args.avg_start {
        builder = builder.avg_start(time);
    }
    if let Some(time) = args.avg_end {
        builder = builder.avg_end(time);
    }
    if let Some(path) = &args.avg_to {
        builder = builder.append_path(path.clone());
    }
    let config = builder.build()?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the waters workflow...");
    let result = workflows::waters::run(&config, &reporter)?;

    println!(
        "Averaged over frames {} to {}.",
        result.window_start, result.window_end
    );
    println!(
        "<N> = {:.4}, std = {:.4}",
        result.mean_waters, result.std_waters
    );
    println!(
        "<Ntw> = {:.4}, std = {:.4}",
        result.mean_coarse, result.std_coarse
    );
    if let Some(path) = &result.appended {
        println!("✓ Averages appended to: {}", path.display());
    }
    println!("✓ Time series written to: {}", result.plot_path.display());

    Ok(())
}
