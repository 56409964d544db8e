use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Get the value of `key`. If the key does not exist the special value `nil` is returned.
///
/// Ref: <https://redis.io/docs/latest/commands/get/>
#[derive(Debug, PartialEq)]
pub struct Get {
    pub key: String,
}

impl Executable for Get {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let value = store.get(&self.key);

        match value {
            Some(value) => Ok(Frame::Bulk(value)),
            None => Ok(Frame::Null),
        }
    }
}

impl TryFrom<&mut CommandParser> for Get {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        if parser.remaining() != 1 {
            return Err(CommandParserError::WrongNumberOfArguments {
                command: "get".to_string(),
            }
            .into());
        }

        let key = parser.next_string()?;
        Ok(Self { key })
    }
}
