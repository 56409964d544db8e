use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Returns the values of all specified keys, with a null entry for every key
/// that does not exist. Called without keys it returns an empty array.
///
/// Ref: <https://redis.io/docs/latest/commands/mget/>
#[derive(Debug, PartialEq)]
pub struct Mget {
    pub keys: Vec<String>,
}

impl Executable for Mget {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let values = self
            .keys
            .iter()
            .map(|key| store.get(key))
            .map(|value| value.map_or(Frame::Null, Frame::Bulk))
            .collect::<Vec<_>>();

        Ok(Frame::Array(values))
    }
}

impl TryFrom<&mut CommandParser> for Mget {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let mut keys = vec![];

        loop {
            match parser.next_string() {
                Ok(key) => keys.push(key),
                Err(CommandParserError::EndOfStream) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(Self { keys })
    }
}
