use may::coroutine::JoinHandle;
use may_minihttp::{HttpServer as MiniHttpServer, HttpService};
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

const READY_PROBES: u32 = 50;
const READY_PROBE_INTERVAL: Duration = Duration::from_millis(5);

/// Binds a `may_minihttp` service to a socket address.
pub struct HttpServer<T>(pub T);

/// A bound server and its accept coroutine.
pub struct ServerHandle {
    addr: SocketAddr,
    accept_loop: JoinHandle<()>,
}

impl ServerHandle {
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Block until a TCP connect to [`addr`](Self::addr) succeeds.
    ///
    /// # Errors
    ///
    /// `TimedOut` after 50 probes 5 ms apart.
    pub fn wait_ready(&self) -> io::Result<()> {
        for _ in 0..READY_PROBES {
            if TcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            thread::sleep(READY_PROBE_INTERVAL);
        }
        Err(io::Error::new(
            io::ErrorKind::TimedOut,
            format!("server on {} did not accept connections", self.addr),
        ))
    }

    /// Stop accepting connections.
    ///
    /// Cancels the accept coroutine and waits for it to finish. Requests
    /// already in flight are not drained.
    #[allow(unsafe_code)]
    pub fn stop(self) {
        // SAFETY: the handle is owned here and the coroutine is never resumed
        // after cancellation; cancel only schedules an unwind at its next
        // yield point.
        unsafe {
            self.accept_loop.coroutine().cancel();
        }
        if let Err(panic) = self.accept_loop.join() {
            debug!(addr = %self.addr, panic = ?panic, "Accept loop ended by cancellation");
        }
        info!(addr = %self.addr, "Server stopped");
    }

    /// Serve until the accept coroutine exits.
    ///
    /// # Errors
    ///
    /// The panic payload if the accept coroutine panicked.
    pub fn join(self) -> std::thread::Result<()> {
        self.accept_loop.join()
    }
}

impl<T> HttpServer<T>
where
    T: HttpService + Clone + Send + Sync + 'static,
{
    /// Bind the first address `addr` resolves to and spawn the accept loop.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `addr` resolves to nothing, or the bind error.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let Some(addr) = addr.to_socket_addrs()?.next() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "address resolved to nothing",
            ));
        };
        let accept_loop = MiniHttpServer(self.0).start(addr)?;
        info!(addr = %addr, "Server listening");
        Ok(ServerHandle { addr, accept_loop })
    }
}
