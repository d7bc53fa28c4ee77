use serde::Deserialize;
use time::OffsetDateTime;

//--------------------------------------------------------------------------------------------------
// Unix Timestamp handling
//--------------------------------------------------------------------------------------------------

/// Seconds since the epoch, as carried by the `exp` and `nbf` claims. Fractional values are
/// allowed and floored to the whole second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnixTimestamp(OffsetDateTime);

impl<'de> Deserialize<'de> for UnixTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let timestamp = f64::deserialize(deserializer)?;
        if !timestamp.is_finite() {
            return Err(serde::de::Error::custom("timestamp is not a finite number"));
        }

        // Out of range values saturate here and are then rejected by from_unix_timestamp
        let datetime = OffsetDateTime::from_unix_timestamp(timestamp.floor() as i64)
            .map_err(serde::de::Error::custom)?;
        Ok(UnixTimestamp(datetime))
    }
}

impl From<UnixTimestamp> for OffsetDateTime {
    fn from(ts: UnixTimestamp) -> Self {
        ts.0
    }
}

#[cfg(test)]
impl From<OffsetDateTime> for UnixTimestamp {
    fn from(datetime: OffsetDateTime) -> Self {
        UnixTimestamp(datetime)
    }
}

impl UnixTimestamp {
    /// True when this moment lies strictly before `now`
    pub fn is_before(self, now: OffsetDateTime) -> bool {
        self.0 < now
    }

    /// True when this moment lies strictly after `now`
    pub fn is_after(self, now: OffsetDateTime) -> bool {
        self.0 > now
    }
}

//--------------------------------------------------------------------------------------------------
