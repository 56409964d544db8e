use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Returns the value of `field` within the hash stored at `key`, or `nil`
/// when either the key or the field is missing.
///
/// Ref: <https://redis.io/docs/latest/commands/hget/>
#[derive(Debug, PartialEq)]
pub struct Hget {
    pub key: String,
    pub field: String,
}

impl Executable for Hget {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let value = store.hget(&self.key, &self.field);

        match value {
            Some(value) => Ok(Frame::Bulk(value)),
            None => Ok(Frame::Null),
        }
    }
}

impl TryFrom<&mut CommandParser> for Hget {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        if parser.remaining() != 2 {
            return Err(CommandParserError::WrongNumberOfArguments {
                command: "hget".to_string(),
            }
            .into());
        }

        let key = parser.next_string()?;
        let field = parser.next_string()?;

        Ok(Self { key, field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use bytes::Bytes;

    #[test]
    fn existing_field() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("HGET")),
            Frame::Bulk(Bytes::from("user:1")),
            Frame::Bulk(Bytes::from("name")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        assert_eq!(
            cmd,
            Command::Hget(Hget {
                key: String::from("user:1"),
                field: String::from("name")
            })
        );

        let store = Store::new();
        store.hset(
            String::from("user:1"),
            String::from("name"),
            Bytes::from("ana"),
        );

        let res = cmd.exec(store.clone()).unwrap();

        assert_eq!(res, Frame::Bulk(Bytes::from("ana")));
    }

    #[test]
    fn missing_field() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("HGET")),
            Frame::Bulk(Bytes::from("user:1")),
            Frame::Bulk(Bytes::from("age")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        let store = Store::new();
        store.hset(
            String::from("user:1"),
            String::from("name"),
            Bytes::from("ana"),
        );

        let res = cmd.exec(store.clone()).unwrap();

        assert_eq!(res, Frame::Null);
    }

    #[test]
    fn missing_key() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("HGET")),
            Frame::Bulk(Bytes::from("user:1")),
            Frame::Bulk(Bytes::from("name")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        let res = cmd.exec(Store::new()).unwrap();

        assert_eq!(res, Frame::Null);
    }

    #[test]
    fn missing_field_argument() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("HGET")),
            Frame::Bulk(Bytes::from("user:1")),
        ]);

        let err = Command::try_from(frame).unwrap_err();

        assert_eq!(
            err.to_string(),
            "ERR wrong number of arguments for 'hget' command"
        );
    }
}
