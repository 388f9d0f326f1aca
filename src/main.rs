use clap::Parser;
use csv_comparator::CompareError;
use csv_comparator::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    let args = Args::parse();

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Cancelled on CTRL+C; the engine checks it between rows
        let cancellation_token = CancellationToken::new();

        let signal_token = cancellation_token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nReceived CTRL+C, stopping comparison...");
                signal_token.cancel();
            }
        });

        commands::run(args, cancellation_token).await
    });

    match result {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            let user_error = error
                .downcast_ref::<CompareError>()
                .is_some_and(CompareError::is_user_correctable);
            process::exit(if user_error { 2 } else { 1 });
        }
    }
}
