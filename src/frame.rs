// https://redis.io/docs/reference/protocol-spec

use std::fmt;

use bytes::Buf;
use bytes::Bytes;
use std::io::Cursor;
use std::string::FromUtf8Error;
use thiserror::Error as ThisError;

static CRLF: &[u8; 2] = b"\r\n";

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("not enough data is available to parse an entire frame")]
    Incomplete,
    #[error("invalid frame data type: {0}")]
    InvalidDataType(u8),
    #[error("bulk frame payload is not followed by CRLF")]
    MissingFrameTerminator,
    /// Invalid message encoding.
    #[error("{0}")]
    Other(crate::Error),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Simple(String),
    Error(String),
    Integer(i64),
    Bulk(Bytes),
    /// Null bulk string, `$-1`. The protocol's "no value".
    Null,
    /// Null array, `*-1`. Stands for absence just like `Null`, but the two
    /// are distinct on the wire and must stay distinct here.
    NullArray,
    Array(Vec<Frame>),
}

// Protocol specification: https://redis.io/docs/reference/protocol-spec/
impl Frame {
    /// Parses exactly one frame out of `src`, leaving the cursor on the first
    /// byte after it. Returns `Error::Incomplete` when the buffer does not
    /// yet hold a whole frame.
    pub fn parse(src: &mut Cursor<&[u8]>) -> Result<Self, Error> {
        // The first byte in an RESP-serialized payload always identifies its type.
        // Subsequent bytes constitute the type's contents.
        let first_byte = get_byte(src)?;
        let data_type = DataType::try_from(first_byte)?;

        match data_type {
            DataType::SimpleString => {
                let bytes = get_frame_bytes(src)?.to_vec();
                let string = String::from_utf8(bytes)?;
                Ok(Frame::Simple(string))
            }
            DataType::SimpleError => {
                let bytes = get_frame_bytes(src)?.to_vec();
                let string = String::from_utf8(bytes)?;
                Ok(Frame::Error(string))
            }
            DataType::Integer => {
                let bytes = get_frame_bytes(src)?.to_vec();
                let string = String::from_utf8(bytes)?;
                let integer = string
                    .parse::<i64>()
                    .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> { Box::new(e) })
                    .map_err(Error::Other)?;

                Ok(Frame::Integer(integer))
            }
            // $<length>\r\n<data>\r\n
            DataType::BulkString => {
                let length = get_decimal(src)?;

                if length < 0 {
                    return Ok(Frame::Null);
                }

                let data = get_exact_bytes(src, length as usize)?;
                let data = Bytes::from(data.to_vec());

                Ok(Frame::Bulk(data))
            }
            // *<number-of-elements>\r\n<element-1>...<element-n>
            DataType::Array => {
                let length = get_decimal(src)?;

                if length < 0 {
                    return Ok(Frame::NullArray);
                }

                let items = parse_items(src, length as usize)?;

                Ok(Frame::Array(items))
            }
        }
    }

    pub fn serialize(&self) -> Vec<u8> {
        match self {
            Frame::Simple(s) => {
                let mut bytes = Vec::with_capacity(1 + s.len() + CRLF.len());
                bytes.push(u8::from(DataType::SimpleString));
                bytes.extend_from_slice(s.as_bytes());
                bytes.extend_from_slice(CRLF);
                bytes
            }
            Frame::Error(s) => {
                let mut bytes = Vec::with_capacity(1 + s.len() + CRLF.len());
                bytes.push(u8::from(DataType::SimpleError));
                bytes.extend_from_slice(s.as_bytes());
                bytes.extend_from_slice(CRLF);
                bytes
            }
            Frame::Integer(i) => {
                let repr = i.to_string();
                let mut bytes = Vec::with_capacity(1 + repr.len() + CRLF.len());
                bytes.push(u8::from(DataType::Integer));
                bytes.extend_from_slice(repr.as_bytes());
                bytes.extend_from_slice(CRLF);
                bytes
            }
            Frame::Bulk(data) => {
                let length = data.len().to_string();
                let mut bytes =
                    Vec::with_capacity(1 + length.len() + CRLF.len() + data.len() + CRLF.len());
                bytes.push(u8::from(DataType::BulkString));
                bytes.extend_from_slice(length.as_bytes());
                bytes.extend_from_slice(CRLF);
                bytes.extend_from_slice(data);
                bytes.extend_from_slice(CRLF);
                bytes
            }
            Frame::Null => b"$-1\r\n".to_vec(),
            Frame::NullArray => b"*-1\r\n".to_vec(),
            Frame::Array(items) => {
                let length = items.len().to_string();
                let mut bytes = Vec::with_capacity(1 + length.len() + CRLF.len());
                bytes.push(u8::from(DataType::Array));
                bytes.extend_from_slice(length.as_bytes());
                bytes.extend_from_slice(CRLF);
                for item in items {
                    bytes.extend(item.serialize());
                }
                bytes
            }
        }
    }
}

impl From<Frame> for Vec<u8> {
    fn from(frame: Frame) -> Self {
        frame.serialize()
    }
}

// Single-line preview for logs and error replies. Payloads are escaped:
// whatever bytes a frame carries, the preview never contains CR or LF.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Simple(s) => write!(f, "+{}", s.escape_debug()),
            Frame::Error(s) => write!(f, "-{}", s.escape_debug()),
            Frame::Integer(i) => write!(f, ":{}", i),
            Frame::Bulk(bytes) => write!(f, "${}", String::from_utf8_lossy(bytes).escape_debug()),
            Frame::Null => write!(f, "$-1"),
            Frame::NullArray => write!(f, "*-1"),
            Frame::Array(items) => {
                write!(f, "*{}", items.len())?;
                for item in items {
                    write!(f, " {}", item)?;
                }
                Ok(())
            }
        }
    }
}

/// Reads `count` consecutive frames: the body of an array whose count header
/// has already been consumed.
fn parse_items(src: &mut Cursor<&[u8]>, count: usize) -> Result<Vec<Frame>, Error> {
    // The count comes straight off the wire. Size the preallocation by what
    // the buffer can actually hold (a frame takes at least three bytes);
    // counts beyond that run out of data and surface as `Incomplete`.
    let remaining = src.get_ref().len().saturating_sub(src.position() as usize);
    let mut frames = Vec::with_capacity(count.min(remaining / 3));

    for _ in 0..count {
        let frame = Frame::parse(src)?;
        frames.push(frame);
    }

    Ok(frames)
}

/// Reads the remainder of a `$`/`*` header line as a signed decimal: the
/// declared length of a bulk string or the element count of an array.
fn get_decimal(src: &mut Cursor<&[u8]>) -> Result<isize, Error> {
    let line = get_frame_bytes(src)?.to_vec();
    let string = String::from_utf8(line)?;

    string
        .parse::<isize>()
        .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> { Box::new(e) })
        .map_err(Error::Other)
}

fn get_frame_bytes<'a>(src: &mut Cursor<&'a [u8]>) -> Result<&'a [u8], Error> {
    let start = src.position() as usize;
    let end = src.get_ref().len();

    let frame_end_position = src.get_ref()[start..end]
        .windows(2)
        .enumerate()
        .position(|(_, window)| window == CRLF)
        .ok_or(Error::Incomplete)
        .map(|index| start + index)?;

    src.set_position((frame_end_position + CRLF.len()) as u64);

    Ok(&src.get_ref()[start..frame_end_position])
}

/// Reads exactly `len` payload bytes plus the CRLF that must follow them.
/// A bulk payload may itself contain CRLF, so scanning for the terminator
/// would be wrong here; the declared length is authoritative and the
/// terminator is only verified.
fn get_exact_bytes<'a>(src: &mut Cursor<&'a [u8]>, len: usize) -> Result<&'a [u8], Error> {
    let start = src.position() as usize;
    let end = start + len;

    if src.get_ref().len() < end + CRLF.len() {
        return Err(Error::Incomplete);
    }

    if &src.get_ref()[end..end + CRLF.len()] != CRLF {
        return Err(Error::MissingFrameTerminator);
    }

    src.set_position((end + CRLF.len()) as u64);

    Ok(&src.get_ref()[start..end])
}

fn get_byte(src: &mut Cursor<&[u8]>) -> Result<u8, Error> {
    if !src.has_remaining() {
        return Err(Error::Incomplete);
    }
    Ok(src.get_u8())
}

#[derive(Debug)]
enum DataType {
    SimpleString, // '+'
    SimpleError,  // '-'
    Integer,      // ':'
    BulkString,   // '$'
    Array,        // '*'
}

impl TryFrom<u8> for DataType {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            b'+' => Ok(Self::SimpleString),
            b'-' => Ok(Self::SimpleError),
            b':' => Ok(Self::Integer),
            b'$' => Ok(Self::BulkString),
            b'*' => Ok(Self::Array),
            _ => Err(Error::InvalidDataType(byte)),
        }
    }
}

impl From<DataType> for u8 {
    fn from(value: DataType) -> Self {
        match value {
            DataType::SimpleString => b'+',
            DataType::SimpleError => b'-',
            DataType::Integer => b':',
            DataType::BulkString => b'$',
            DataType::Array => b'*',
        }
    }
}

impl From<FromUtf8Error> for Error {
    fn from(_src: FromUtf8Error) -> Error {
        "protocol error; invalid frame format".into()
    }
}

impl From<&str> for Error {
    fn from(src: &str) -> Error {
        src.to_string().into()
    }
}

impl From<String> for Error {
    fn from(src: String) -> Error {
        Error::Other(src.into())
    }
}
