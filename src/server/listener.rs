use anyhow::Context;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpSocket};
use tokio::sync::watch;
use tokio::task::{JoinError, JoinSet};
use tokio::time::Instant;
use tracing::{info, Instrument};

use crate::config::Config;
use crate::files::FileService;
use crate::http::connection::Connection;

/// Pause before retrying accept after running out of file descriptors.
pub const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accept loop plus the set of in-flight connection tasks.
///
/// Each accepted socket is moved into its own task; the listener never
/// waits on those tasks, it only collects them once they finish.
pub struct Server {
    listener: TcpListener,
    files: Arc<FileService>,
    tasks: JoinSet<()>,
    live: watch::Sender<usize>,
}

impl Server {
    /// Binds and starts listening on the configured address.
    pub async fn bind(cfg: &Config) -> anyhow::Result<Self> {
        let addr: SocketAddr = tokio::net::lookup_host(&cfg.server.listen_addr)
            .await
            .with_context(|| format!("resolving {}", cfg.server.listen_addr))?
            .next()
            .with_context(|| format!("no address for {}", cfg.server.listen_addr))?;

        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .context("creating socket")?;

        socket.set_reuseaddr(true)?;
        socket
            .bind(addr)
            .with_context(|| format!("binding {}", addr))?;
        let listener = socket
            .listen(cfg.server.backlog)
            .with_context(|| format!("listening on {}", addr))?;

        let (live, _) = watch::channel(0);

        Ok(Self {
            listener,
            files: Arc::new(FileService::from_config(&cfg.static_files)),
            tasks: JoinSet::new(),
            live,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Number of connection tasks spawned and not yet reaped.
    pub fn live_units(&self) -> watch::Receiver<usize> {
        self.live.subscribe()
    }

    /// Runs until a fatal accept error.
    ///
    /// Running out of file descriptors is not fatal: accepting pauses for
    /// `ACCEPT_BACKOFF` while finished connections keep being reaped.
    pub async fn run(mut self) -> anyhow::Result<()> {
        info!(
            addr = %self.local_addr()?,
            root = %self.files.root().display(),
            "Listening"
        );

        // Set while accepting is paused for lack of descriptors.
        let mut resume_at: Option<Instant> = None;

        loop {
            tokio::select! {
                accepted = self.listener.accept(), if resume_at.is_none() => {
                    match accepted {
                        Ok((socket, peer)) => self.dispatch(socket, peer),
                        Err(e) if is_transient(&e) => {
                            tracing::warn!(error = %e, "Accept failed, continuing");
                        }
                        Err(e) if is_fd_exhaustion(&e) => {
                            tracing::warn!(
                                error = %e,
                                live = self.tasks.len(),
                                backoff_ms = ACCEPT_BACKOFF.as_millis() as u64,
                                "Out of file descriptors, pausing accept"
                            );
                            resume_at = Some(Instant::now() + ACCEPT_BACKOFF);
                        }
                        Err(e) => return Err(e).context("accepting connection"),
                    }
                }

                _ = tokio::time::sleep_until(resume_at.unwrap_or_else(Instant::now)), if resume_at.is_some() => {
                    resume_at = None;
                }

                Some(done) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    reap(done);
                    while let Some(done) = self.tasks.try_join_next() {
                        reap(done);
                    }
                    self.publish();
                }
            }
        }
    }

    fn dispatch(&mut self, socket: tokio::net::TcpStream, peer: SocketAddr) {
        info!("Accepted connection from {}", peer);

        let files = Arc::clone(&self.files);
        let span = tracing::info_span!("conn", %peer);

        self.tasks.spawn(
            async move {
                let mut conn = Connection::new(socket, files);
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {}", peer, e);
                }
            }
            .instrument(span),
        );
        self.publish();
    }

    fn publish(&self) {
        self.live.send_replace(self.tasks.len());
    }
}

fn reap(done: Result<(), JoinError>) {
    if let Err(e) = done {
        tracing::error!(error = %e, "Connection task died");
    }
}

// Failures that belong to one half-open client, not to the listener.
fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::Interrupted
    )
}

// The process or the system is out of descriptors. Clears as connections close.
fn is_fd_exhaustion(e: &io::Error) -> bool {
    matches!(e.raw_os_error(), Some(libc::EMFILE) | Some(libc::ENFILE))
}
