use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Returns every field and value of the hash stored at `key` as a flat
/// array, or `nil` when the key does not exist. Field order is unspecified.
///
/// Ref: <https://redis.io/docs/latest/commands/hgetall/>
#[derive(Debug, PartialEq)]
pub struct Hgetall {
    pub key: String,
}

impl Executable for Hgetall {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let fields = match store.hgetall(&self.key) {
            Some(fields) => fields,
            None => return Ok(Frame::Null),
        };

        let mut items = Vec::with_capacity(fields.len() * 2);
        for (field, value) in fields {
            items.push(Frame::Bulk(Bytes::from(field)));
            items.push(Frame::Bulk(value));
        }

        Ok(Frame::Array(items))
    }
}

impl TryFrom<&mut CommandParser> for Hgetall {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        if parser.remaining() != 1 {
            return Err(CommandParserError::WrongNumberOfArguments {
                command: "hgetall".to_string(),
            }
            .into());
        }

        let key = parser.next_string()?;
        Ok(Self { key })
    }
}
