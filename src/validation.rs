//! Request-shape checks applied before anything reaches the services.

use url::Url;

use crate::error::AppError;

pub fn min_len(field: &str, value: &str, min: usize) -> Result<(), AppError> {
    if value.trim().chars().count() < min {
        return Err(AppError::validation(format!(
            "{field} must be at least {min} characters long"
        )));
    }
    Ok(())
}

pub fn email(field: &str, value: &str) -> Result<(), AppError> {
    let Some((local, domain)) = value.split_once('@') else {
        return Err(invalid_email(field, value));
    };
    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@');
    if local.is_empty() || !domain_ok || value.chars().any(char::is_whitespace) {
        return Err(invalid_email(field, value));
    }
    Ok(())
}

pub fn http_url(field: &str, value: &str) -> Result<(), AppError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(AppError::validation(format!("{field} must be a valid URL"))),
    }
}

fn invalid_email(field: &str, value: &str) -> AppError {
    AppError::validation(format!("{field} is not a valid email: '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(email("email", "a@example.com").is_ok());
        assert!(email("email", "first.last+trip@mail.example.co").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "plain", "@example.com", "a@localhost", "a@b@c.com", "a @b.com", "a@.com"] {
            assert!(email("email", bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn min_len_counts_characters() {
        assert!(min_len("destination", "Rome", 4).is_ok());
        assert!(min_len("destination", "Rio", 4).is_err());
        assert!(min_len("destination", "   Rio   ", 4).is_err());
        assert!(min_len("destination", "Köln", 4).is_ok());
    }

    #[test]
    fn url_needs_http_scheme() {
        assert!(http_url("url", "https://booking.example.com/r/1").is_ok());
        assert!(http_url("url", "javascript:alert(1)").is_err());
        assert!(http_url("url", "nope").is_err());
    }
}
