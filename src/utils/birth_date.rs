use chrono::NaiveDate;

/// Parses a `dd/mm/yyyy` birth date as typed in the registration form.
///
/// Anything that is not exactly 10 characters or does not parse yields `None`.
pub fn parse_birth_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_date() {
        assert_eq!(
            parse_birth_date(Some("05/03/2016")),
            NaiveDate::from_ymd_opt(2016, 3, 5)
        );
    }

    #[test]
    fn test_reject_wrong_length_or_format() {
        assert_eq!(parse_birth_date(None), None);
        assert_eq!(parse_birth_date(Some("")), None);
        assert_eq!(parse_birth_date(Some("5/3/2016")), None);
        assert_eq!(parse_birth_date(Some("2016-03-05")), None);
        assert_eq!(parse_birth_date(Some("31/02/2016")), None);
        assert_eq!(parse_birth_date(Some("05/03/2016 ")), None);
    }
}
