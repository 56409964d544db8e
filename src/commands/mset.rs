use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Sets the given keys to their respective values. Replaces existing values
/// with new values. An empty argument list is accepted and leaves the store
/// untouched.
///
/// Ref: <https://redis.io/docs/latest/commands/mset/>
#[derive(Debug, PartialEq)]
pub struct Mset {
    pub pairs: Vec<(String, Bytes)>,
}

impl Executable for Mset {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        for (key, value) in self.pairs {
            store.set(key, value);
        }

        Ok(Frame::Simple("OK".to_string()))
    }
}

impl TryFrom<&mut CommandParser> for Mset {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        if parser.remaining() % 2 != 0 {
            return Err(CommandParserError::WrongNumberOfArguments {
                command: "mset".to_string(),
            }
            .into());
        }

        let mut pairs = vec![];

        while parser.remaining() != 0 {
            let key = parser.next_string()?;
            let value = parser.next_bytes()?;
            pairs.push((key, value));
        }

        Ok(Self { pairs })
    }
}
