use phonenumber::country::Id as CountryId;
use phonenumber::Mode;

/// Validate and normalize a Brazilian phone number.
///
/// Parses with the BR region (so "(11) 98765-4321" and "+55 11 98765-4321"
/// are both understood) and returns the E.164 form (`+5511987654321`) when
/// libphonenumber considers the number valid.
pub fn normalize_br_phone(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.len() < 8 {
        return None;
    }

    match phonenumber::parse(Some(CountryId::BR), raw) {
        Ok(number) if phonenumber::is_valid(&number) => {
            let formatted = number.format().mode(Mode::E164).to_string();
            tracing::debug!("Valid BR phone: {} → {}", raw, formatted);
            Some(formatted)
        }
        Ok(_) => {
            tracing::warn!("Invalid BR phone number: {}", raw);
            None
        }
        Err(e) => {
            tracing::warn!("Failed to parse BR phone '{}': {:?}", raw, e);
            None
        }
    }
}

/// Phone value to store for a lead: E.164 when valid, otherwise the trimmed
/// input as submitted. Leads are never rejected over a phone number.
pub fn phone_for_storage(raw: Option<String>) -> Option<String> {
    let raw = raw?;
    Some(normalize_br_phone(&raw).unwrap_or_else(|| raw.trim().to_string()))
}
