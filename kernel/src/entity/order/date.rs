use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Fromln, AsRefln, Serialize, Deserialize)]
pub struct OrderDate(Date);

impl OrderDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }

    pub fn today() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    /// Parses `YYYY-MM-DD`.
    pub fn parse(value: &str) -> Result<Self, time::error::Parse> {
        Date::parse(value, format_description!("[year]-[month]-[day]")).map(Self)
    }

    pub fn is_future(&self) -> bool {
        self.0 > OffsetDateTime::now_utc().date()
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use super::OrderDate;

    #[test]
    fn parse_iso_date() {
        assert_eq!(
            OrderDate::parse("2024-03-15").unwrap(),
            OrderDate::new(date!(2024 - 03 - 15))
        );
        assert!(OrderDate::parse("15.03.2024").is_err());
    }

    #[test]
    fn serialized_as_iso_date() {
        let json = serde_json::to_string(&OrderDate::new(date!(2024 - 03 - 15))).unwrap();
        assert_eq!(json, r#""2024-03-15""#);
    }
}
