pub mod executable;
pub mod get;
pub mod hget;
pub mod hgetall;
pub mod hset;
pub mod mget;
pub mod mset;
pub mod ping;
pub mod set;
pub mod unknown;

use bytes::Bytes;
use std::{str, vec};
use thiserror::Error as ThisError;

use crate::commands::executable::Executable;
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

use get::Get;
use hget::Hget;
use hgetall::Hgetall;
use hset::Hset;
use mget::Mget;
use mset::Mset;
use ping::Ping;
use set::Set;
use unknown::Unknown;

#[derive(Debug, PartialEq)]
pub enum Command {
    Get(Get),
    Hget(Hget),
    Hgetall(Hgetall),
    Hset(Hset),
    Mget(Mget),
    Mset(Mset),
    Ping(Ping),
    Set(Set),

    /// Any command name the server does not implement.
    Unknown(Unknown),
}

impl Command {
    /// Commands that mutate the store, and therefore belong in the
    /// append-only file.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::Set(_) | Command::Mset(_) | Command::Hset(_)
        )
    }
}

impl Executable for Command {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        match self {
            Command::Get(cmd) => cmd.exec(store),
            Command::Hget(cmd) => cmd.exec(store),
            Command::Hgetall(cmd) => cmd.exec(store),
            Command::Hset(cmd) => cmd.exec(store),
            Command::Mget(cmd) => cmd.exec(store),
            Command::Mset(cmd) => cmd.exec(store),
            Command::Ping(cmd) => cmd.exec(store),
            Command::Set(cmd) => cmd.exec(store),
            Command::Unknown(cmd) => cmd.exec(store),
        }
    }
}

impl TryFrom<Frame> for Command {
    type Error = Error;

    fn try_from(frame: Frame) -> Result<Self, Self::Error> {
        // Clients send commands to the server as RESP arrays.
        let frames = match frame {
            Frame::Array(array) => array,
            frame => {
                return Err(CommandParserError::InvalidFrame {
                    expected: "array".to_string(),
                    actual: frame,
                }
                .into())
            }
        };

        let parser = &mut CommandParser {
            parts: frames.into_iter(),
        };

        let command_name = parser.parse_command_name()?;

        match &command_name[..] {
            "get" => Get::try_from(parser).map(Command::Get),
            "hget" => Hget::try_from(parser).map(Command::Hget),
            "hgetall" => Hgetall::try_from(parser).map(Command::Hgetall),
            "hset" => Hset::try_from(parser).map(Command::Hset),
            "mget" => Mget::try_from(parser).map(Command::Mget),
            "mset" => Mset::try_from(parser).map(Command::Mset),
            "ping" => Ping::try_from(parser).map(Command::Ping),
            "set" => Set::try_from(parser).map(Command::Set),
            _ => Ok(Command::Unknown(Unknown {
                command: command_name,
            })),
        }
    }
}

pub(crate) struct CommandParser {
    parts: vec::IntoIter<Frame>,
}

impl CommandParser {
    fn parse_command_name(&mut self) -> Result<String, CommandParserError> {
        let command_name = self
            .parts
            .next()
            .ok_or_else(|| CommandParserError::EndOfStream)?;

        match command_name {
            Frame::Simple(s) => Ok(s.to_lowercase()),
            // Lossy on purpose: an undecodable name cannot match any known
            // command, so it dispatches to `Unknown`.
            Frame::Bulk(bytes) => Ok(String::from_utf8_lossy(&bytes).to_lowercase()),
            frame => Err(CommandParserError::InvalidFrame {
                expected: "simple string".to_string(),
                actual: frame,
            }),
        }
    }

    /// How many argument frames have not been consumed yet.
    fn remaining(&self) -> usize {
        self.parts.len()
    }

    fn next_string(&mut self) -> Result<String, CommandParserError> {
        let frame = self
            .parts
            .next()
            .ok_or_else(|| CommandParserError::EndOfStream)?;

        match frame {
            // Both `Simple` and `Bulk` representation may be strings. Strings are parsed to UTF-8.
            // While errors are stored as strings, they are considered separate types.
            Frame::Simple(s) => Ok(s),
            Frame::Bulk(bytes) => str::from_utf8(&bytes[..])
                .map(|s| s.to_string())
                .map_err(CommandParserError::InvalidUTF8String),
            frame => Err(CommandParserError::InvalidFrame {
                expected: "simple or bulk string".to_string(),
                actual: frame,
            }),
        }
    }

    fn next_bytes(&mut self) -> Result<Bytes, CommandParserError> {
        let frame = self
            .parts
            .next()
            .ok_or_else(|| CommandParserError::EndOfStream)?;

        match frame {
            // Both `Simple` and `Bulk` representation may be strings. Strings are parsed to UTF-8.
            // While errors are stored as strings, they are considered separate types.
            Frame::Simple(s) => Ok(Bytes::from(s)),
            Frame::Bulk(bytes) => Ok(bytes),
            frame => Err(CommandParserError::InvalidFrame {
                expected: "simple or bulk string".to_string(),
                actual: frame,
            }),
        }
    }
}

#[derive(Debug, ThisError, PartialEq)]
pub(crate) enum CommandParserError {
    #[error("protocol error; invalid frame, expected {expected}, got {actual}")]
    InvalidFrame { expected: String, actual: Frame },
    #[error("ERR wrong number of arguments for '{command}' command")]
    WrongNumberOfArguments { command: String },
    #[error("protocol error; invalid UTF-8 string")]
    InvalidUTF8String(#[from] str::Utf8Error),
    #[error("protocol error; attempting to extract a value failed due to the frame being fully consumed")]
    EndOfStream,
}
