//! The `linguist-rs` management utility.

use std::process::ExitCode;

use linguist_rs_cli::{build_registry, run};

#[tokio::main]
async fn main() -> ExitCode {
    let registry = build_registry();
    let matches = registry.build_cli().get_matches();

    match run(&registry, &matches).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("Error: {err}");
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}
