use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;
use tokio::time::{interval_at, Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::frame::Frame;

const FLUSH_INTERVAL: Duration = Duration::from_secs(5);

/// Append-only file holding every write command the server accepted, in wire
/// format. Appends go through a buffered writer and reach the disk when the
/// background flush task runs, or on `close`. It is thread-safe and can be
/// shared and cloned cheaply using reference counting.
#[derive(Clone)]
pub struct Aof {
    // `None` once the log has been closed. Appends and flushes are serialized
    // by the mutex, so frames never interleave mid-write.
    writer: Arc<Mutex<Option<BufWriter<File>>>>,
    shutdown: CancellationToken,
}

impl Aof {
    /// Opens the log at `path`, creating the file if it does not exist and
    /// appending to it if it does. Also starts the periodic flush task, which
    /// runs until `close` is called.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Aof> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .await?;

        let aof = Aof {
            writer: Arc::new(Mutex::new(Some(BufWriter::new(file)))),
            shutdown: CancellationToken::new(),
        };

        tokio::spawn(flush_periodically(aof.clone()));

        Ok(aof)
    }

    /// Appends one frame to the log. The bytes land in the writer's buffer;
    /// durability comes from the next flush.
    pub async fn append(&self, frame: &Frame) -> io::Result<()> {
        let mut writer = self.writer.lock().await;
        let writer = writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "append-only file is closed"))?;

        writer.write_all(&frame.serialize()).await
    }

    /// Writes buffered data through to the file and fsyncs it.
    pub async fn flush(&self) -> io::Result<()> {
        let mut writer = self.writer.lock().await;

        if let Some(writer) = writer.as_mut() {
            writer.flush().await?;
            writer.get_ref().sync_all().await?;
        }

        Ok(())
    }

    /// Stops the flush task, flushes outstanding data and fsyncs one last
    /// time. Further appends fail; further closes are no-ops.
    pub async fn close(&self) -> io::Result<()> {
        self.shutdown.cancel();

        let mut writer = self.writer.lock().await;

        if let Some(mut writer) = writer.take() {
            writer.flush().await?;
            writer.into_inner().sync_all().await?;
        }

        Ok(())
    }
}

async fn flush_periodically(aof: Aof) {
    let mut interval = interval_at(Instant::now() + FLUSH_INTERVAL, FLUSH_INTERVAL);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(err) = aof.flush().await {
                    error!("failed to flush append-only file: {}", err);
                }
            }
            _ = aof.shutdown.cancelled() => return,
        }
    }
}
