//! RFC 3339 timestamp parsing helpers.

use jiff::Timestamp;
use salvo::prelude::StatusError;

use crate::extensions::*;

pub(crate) trait TimestampExt {
    /// Parse an RFC 3339 instant, naming `field` in the 400 on failure.
    fn parse_timestamp(&self, field: &str) -> Result<Timestamp, StatusError>;
}

impl TimestampExt for str {
    fn parse_timestamp(&self, field: &str) -> Result<Timestamp, StatusError> {
        self.parse::<Timestamp>()
            .or_400(&format!("could not parse \"{field}\", expected an RFC 3339 timestamp"))
    }
}
