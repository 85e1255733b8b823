use validator::ValidateEmail;

/// Uppercases the first character of every whitespace-delimited word and
/// joins the words with single spaces. The rest of each word is untouched.
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lowercase_email(value: &str) -> String {
    value.to_lowercase()
}

/// Base address syntax from `validator`, narrowed to hostnames: the domain
/// must be dotted and end in an alphabetic label of two or more letters.
/// Single-label hosts and bracketed IP literals are rejected.
pub fn is_valid_email(value: &str) -> bool {
    if !value.validate_email() {
        return false;
    }
    match value.rsplit_once('@') {
        Some((_, domain)) => has_hostname_tld(domain),
        None => false,
    }
}

fn has_hostname_tld(domain: &str) -> bool {
    if domain.starts_with('[') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

/// Converts form text into a number. Returns `None` when the text is blank
/// or not numeric.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if !value.is_nan() => Some(value),
        _ => None,
    }
}
