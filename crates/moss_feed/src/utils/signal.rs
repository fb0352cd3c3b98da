use std::io;

use tokio::signal;

#[cfg(target_family = "windows")]
pub async fn terminate() -> io::Result<()> {
    signal::ctrl_c().await
}

/// ctrl + c 或 SIGTERM 任一到达时返回
#[cfg(target_family = "unix")]
pub async fn terminate() -> io::Result<()> {
    use tokio::select;

    let mut term = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    select! {
        _ = signal::ctrl_c() => Ok(()),
        _ = term.recv() => Ok(()),
    }
}
