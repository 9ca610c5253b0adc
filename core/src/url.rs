use crate::error::{DragyError, Result};

const LEADERBOARDS: &str = "/leaderboards/";

/// Henter kjørings-ID fra en delbar leaderboard-URL, f.eks.
/// `https://www.godragy.com/leaderboards/Brand/Name-123456/?rankIndex=1` -> `123456`.
///
/// Etter første `/leaderboards/` brukes siste `-` som etterfølges av et siffer
/// (minst ett tegn må stå foran bindestreken), og hele sifferrekken fanges.
pub fn extract_run_id(url: &str) -> Option<String> {
    let start = url.find(LEADERBOARDS)? + LEADERBOARDS.len();
    let rest = url[start..].lines().next().unwrap_or("");
    let bytes = rest.as_bytes();

    let dash = (1..bytes.len())
        .rev()
        .find(|&i| bytes[i] == b'-' && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit()))?;

    let digits: String = rest[dash + 1..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    Some(digits)
}

/// Som `extract_run_id`, men manglende treff er en `InvalidUrl`-feil.
pub fn parse_run_url(url: &str) -> Result<String> {
    extract_run_id(url).ok_or_else(|| DragyError::InvalidUrl(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_trailing_id() {
        let url = "https://www.godragy.com/leaderboards/Brand/Name-123456/?rankIndex=123";
        assert_eq!(extract_run_id(url).as_deref(), Some("123456"));
        assert_eq!(
            extract_run_id("https://www.godragy.com/leaderboards/BMW/M3-G80-98765").as_deref(),
            Some("98765")
        );
    }

    #[test]
    fn uses_last_dash_followed_by_digit() {
        let url = "https://x/leaderboards/Audi/RS3-2022-55501-edit";
        assert_eq!(extract_run_id(url).as_deref(), Some("55501"));
    }

    #[test]
    fn missing_pattern_is_none() {
        assert_eq!(extract_run_id("https://www.godragy.com/profile/123"), None);
        assert_eq!(extract_run_id("https://www.godragy.com/leaderboards/-123"), None);
        assert_eq!(extract_run_id("https://www.godragy.com/leaderboards/Brand/Name"), None);
        assert!(matches!(
            parse_run_url("not a url"),
            Err(DragyError::InvalidUrl(_))
        ));
    }
}
