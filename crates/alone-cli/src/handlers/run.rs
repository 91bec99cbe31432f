//! Run command handler.
//!
//! Claims the single-instance lock and holds it until shutdown, reporting
//! each duplicate launch as it arrives.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use alone_core::{DuplicateLaunchHandler, LaunchDecision};
use alone_runtime::InstanceCoordinator;

use crate::commands::InstanceArgs;
use crate::error::CliError;

/// Hold the lock until Ctrl-C.
pub async fn execute(args: &InstanceArgs) -> Result<(), CliError> {
    execute_until(args, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            debug!(error = %e, "Ctrl-C handler unavailable, exiting");
        }
    })
    .await
}

/// Hold the lock until `shutdown` completes.
///
/// Returns [`CliError::AlreadyRunning`] when another instance owns the lock;
/// that instance has been asked to come to the foreground.
pub async fn execute_until<F>(args: &InstanceArgs, shutdown: F) -> Result<(), CliError>
where
    F: Future<Output = ()>,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let on_duplicate: DuplicateLaunchHandler = Arc::new(move || {
        let _ = tx.send(());
    });

    let mut coordinator = InstanceCoordinator::from_config(&args.config(), on_duplicate)?;
    match coordinator.check_and_run()? {
        LaunchDecision::Owner => {}
        LaunchDecision::AlreadyRunning { owner_pid } => {
            return Err(CliError::AlreadyRunning { owner_pid });
        }
    }

    println!(
        "Running as the single instance of {} (lock: {})",
        args.config().app_id,
        coordinator.lock_path().display()
    );

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            () = &mut shutdown => break,
            Some(()) = rx.recv() => {
                println!("Another launch was requested; bringing this instance forward");
            }
        }
    }

    coordinator.dispose();
    info!("Shut down cleanly");
    Ok(())
}
