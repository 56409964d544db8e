use std::net::SocketAddr;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, instrument};

use crate::aof::Aof;
use crate::commands::executable::Executable;
use crate::commands::Command;
use crate::connection::Connection;
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

pub async fn run(port: u16, aof_path: impl AsRef<Path>) -> Result<(), Error> {
    let _ = tracing_subscriber::fmt()
        .try_init()
        .map_err(|e| debug!("Failed to initialize global tracing: {}", e));

    let listener = TcpListener::bind(("127.0.0.1", port)).await?;
    let store = Store::new();
    let aof = Aof::open(aof_path).await?;

    info!("Server listening on {}", listener.local_addr()?);

    tokio::select! {
        res = accept_loop(listener, store, aof.clone()) => res,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
            aof.close().await?;
            Ok(())
        }
    }
}

async fn accept_loop(listener: TcpListener, store: Store, aof: Aof) -> Result<(), Error> {
    loop {
        let (socket, client_address) = listener.accept().await?;
        let store = store.clone();
        let aof = aof.clone();
        info!("Accepted connection from {:?}", client_address);

        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, client_address, store, aof).await {
                error!("Connection error: {}", e);
            }
        });
    }
}

#[instrument(
    name = "connection",
    skip(stream, store, aof),
    fields(connection_id, client_address)
)]
async fn handle_connection(
    stream: TcpStream,
    client_address: SocketAddr,
    store: Store,
    aof: Aof,
) -> Result<(), Error> {
    let mut conn = Connection::new(stream, client_address);

    tracing::Span::current()
        .record("connection_id", conn.id.to_string())
        .record("client_address", client_address.to_string());

    while let Some(frame) = conn.read_frame().await? {
        info!("Received frame from client: {:?}", frame);

        // Requests are RESP arrays carrying at least the command name.
        // Anything else is dropped without a reply.
        let is_request = matches!(frame, Frame::Array(ref items) if !items.is_empty());
        if !is_request {
            debug!("Ignoring malformed request: {:?}", frame);
            continue;
        }

        // Keep the original request around: write commands go to the
        // append-only file as received, before they touch the store.
        let request = frame.clone();

        let res = match Command::try_from(frame) {
            Ok(cmd) => {
                if cmd.is_write() {
                    if let Err(e) = aof.append(&request).await {
                        error!("Failed to append to the aof: {}", e);
                    }
                }

                cmd.exec(store.clone())?
            }
            Err(e) => Frame::Error(e.to_string()),
        };

        info!("Sending response to client: {:?}", res);
        let res: Vec<u8> = res.into();

        conn.writer.write_all(&res).await?;
    }

    info!("Connection closed");
    Ok(())
}
