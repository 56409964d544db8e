use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Set `key` to hold `value`. If the key already holds a value, it is overwritten.
///
/// Ref: <https://redis.io/docs/latest/commands/set/>
#[derive(Debug, PartialEq)]
pub struct Set {
    pub key: String,
    pub value: Bytes,
}

impl Executable for Set {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        store.set(self.key, self.value);

        let res = Frame::Simple("OK".to_string());
        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Set {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        if parser.remaining() != 2 {
            return Err(CommandParserError::WrongNumberOfArguments {
                command: "set".to_string(),
            }
            .into());
        }

        let key = parser.next_string()?;
        let value = parser.next_bytes()?;

        Ok(Self { key, value })
    }
}
