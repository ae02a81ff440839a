use serde_json::Value as JsonValue;

/// Masks the local part of an email for log output: `jane.doe@acme.io`
/// becomes `j***@acme.io`. Strings without an `@` are fully masked.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{first}***@{domain}")
        }
        _ => "***".to_string(),
    }
}

/// Returns a copy of a lead payload with personal fields redacted, for logs.
pub fn redact_personal_data(data: &JsonValue) -> JsonValue {
    match data {
        JsonValue::Object(map) => {
            let mut redacted_map = serde_json::Map::new();
            for (key, val) in map {
                let redacted_val = if is_email_field(key) {
                    match val {
                        JsonValue::String(s) => JsonValue::String(mask_email(s)),
                        other => other.clone(),
                    }
                } else if is_personal_field(key) {
                    redact_string_value(val)
                } else {
                    redact_personal_data(val)
                };
                redacted_map.insert(key.clone(), redacted_val);
            }
            JsonValue::Object(redacted_map)
        }
        JsonValue::Array(arr) => JsonValue::Array(arr.iter().map(redact_personal_data).collect()),
        _ => data.clone(),
    }
}

fn is_email_field(field_name: &str) -> bool {
    field_name.eq_ignore_ascii_case("email")
}

fn is_personal_field(field_name: &str) -> bool {
    let lower = field_name.to_lowercase();
    matches!(
        lower.as_str(),
        "name" | "phone" | "message" | "notes" | "topic"
    )
}

fn redact_string_value(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::String(s) if !s.is_empty() => JsonValue::String("[REDACTED]".to_string()),
        _ => value.clone(),
    }
}
