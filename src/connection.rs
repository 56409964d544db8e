use futures::StreamExt;
use std::net::SocketAddr;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio_util::codec::FramedRead;
use uuid::Uuid;

use crate::codec::FrameCodec;
use crate::frame::Frame;
use crate::Result;

pub struct Connection {
    pub id: Uuid,
    pub client_address: SocketAddr,
    // Inbound bytes are buffered and framed by the codec; outbound frames are
    // serialized in one shot, so the raw write half is enough.
    reader: FramedRead<OwnedReadHalf, FrameCodec>,
    pub writer: OwnedWriteHalf,
}

impl Connection {
    pub fn new(stream: TcpStream, client_address: SocketAddr) -> Connection {
        let (read_half, write_half) = stream.into_split();

        Connection {
            id: Uuid::new_v4(),
            client_address,
            reader: FramedRead::new(read_half, FrameCodec),
            writer: write_half,
        }
    }

    /// Reads the next frame off the socket. `None` means the client closed
    /// the connection.
    pub async fn read_frame(&mut self) -> Result<Option<Frame>> {
        self.reader.next().await.transpose()
    }
}
