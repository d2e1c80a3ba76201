use crate::error::AssetRejection;
use crate::model::ExpectedOutput;

/// Parse the spreadsheet spelling of an expected output, e.g. `1_TopAnswer`.
///
/// Only the five prioritized tokens are accepted; the numeric prefix is
/// dropped.
pub fn parse_expected_output(token: Option<&str>) -> Result<ExpectedOutput, AssetRejection> {
    let token = token.unwrap_or_default();
    let invalid = || AssetRejection::InvalidExpectedOutput(token.to_string());

    let (priority, label) = token.split_once('_').ok_or_else(invalid)?;
    let label: ExpectedOutput = label.parse().map_err(|_| invalid())?;

    if priority != label.priority().to_string() {
        return Err(invalid());
    }
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_prioritized_tokens() {
        for label in ExpectedOutput::ALL {
            let token = format!("{}_{}", label.priority(), label);
            assert_eq!(parse_expected_output(Some(&token)).unwrap(), label);
        }
    }

    #[test]
    fn test_rejections() {
        for bad in ["TopAnswer", "2_TopAnswer", "1_topanswer", "1_TopAnswer ", "", "6_Other"] {
            assert_eq!(
                parse_expected_output(Some(bad)),
                Err(AssetRejection::InvalidExpectedOutput(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
        assert!(parse_expected_output(None).is_err());
    }
}
