use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Returns PONG if no argument is provided, otherwise echoes the first
/// argument back as a simple string.
///
/// Ref: <https://redis.io/docs/latest/commands/ping>
#[derive(Debug, PartialEq)]
pub struct Ping {
    pub message: Option<String>,
}

impl Executable for Ping {
    fn exec(self, _store: Store) -> Result<Frame, Error> {
        let res = self
            .message
            .map_or_else(|| Frame::Simple("PONG".to_string()), Frame::Simple);

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Ping {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let message = match parser.next_string() {
            Ok(message) => Some(message),
            Err(CommandParserError::EndOfStream) => None,
            Err(err) => return Err(err.into()),
        };

        Ok(Self { message })
    }
}
