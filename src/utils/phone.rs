/// Normalises a Brazilian phone number to E.164 (`+55` + DDD + number).
///
/// Numbers that do not look Brazilian are returned unchanged.
pub fn format_br_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        10 | 11 => format!("+55{digits}"),
        12 | 13 if digits.starts_with("55") => format!("+{digits}"),
        _ => phone.to_string(),
    }
}
