use time::{format_description::FormatItem, macros::format_description, Duration, OffsetDateTime, PrimitiveDateTime};

/// `YYYY-MM-DD HH:MM:SS`, the layout timestamps are stored and rendered in.
pub const SQL_DATETIME: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Current UTC wall-clock time at second precision.
pub fn now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    truncate_to_seconds(PrimitiveDateTime::new(now.date(), now.time()))
}

fn truncate_to_seconds(t: PrimitiveDateTime) -> PrimitiveDateTime {
    t - Duration::nanoseconds(i64::from(t.nanosecond()))
}

/// Serde adapter rendering timestamps with [`SQL_DATETIME`].
pub mod sql_format {
    use serde::Serializer;
    use time::PrimitiveDateTime;

    use super::SQL_DATETIME;

    pub fn serialize<S: Serializer>(value: &PrimitiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        let text = value.format(SQL_DATETIME).map_err(serde::ser::Error::custom)?;
        s.serialize_str(&text)
    }

    /// Nullable variant: an unset timestamp is written as `null`, never a zero date.
    pub mod option {
        use serde::Serializer;
        use time::PrimitiveDateTime;

        pub fn serialize<S: Serializer>(
            value: &Option<PrimitiveDateTime>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(t) => super::serialize(t, s),
                None => s.serialize_none(),
            }
        }
    }
}
