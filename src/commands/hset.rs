use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Sets one field of the hash stored at `key`, creating the hash if it does
/// not exist yet. Takes exactly one field/value pair and replies OK.
///
/// Ref: <https://redis.io/docs/latest/commands/hset/>
#[derive(Debug, PartialEq)]
pub struct Hset {
    pub key: String,
    pub field: String,
    pub value: Bytes,
}

impl Executable for Hset {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        store.hset(self.key, self.field, self.value);

        Ok(Frame::Simple("OK".to_string()))
    }
}

impl TryFrom<&mut CommandParser> for Hset {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        if parser.remaining() != 3 {
            return Err(CommandParserError::WrongNumberOfArguments {
                command: "hset".to_string(),
            }
            .into());
        }

        let key = parser.next_string()?;
        let field = parser.next_string()?;
        let value = parser.next_bytes()?;

        Ok(Self { key, field, value })
    }
}
