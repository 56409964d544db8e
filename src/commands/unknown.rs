use tracing::warn;

use crate::commands::executable::Executable;
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Fallback for command names the server does not implement. Replies with an
/// empty simple string instead of an error, so simple clients keep working.
#[derive(Debug, PartialEq)]
pub struct Unknown {
    pub command: String,
}

impl Executable for Unknown {
    fn exec(self, _store: Store) -> Result<Frame, Error> {
        warn!("unknown command: {}", self.command);

        Ok(Frame::Simple(String::new()))
    }
}
