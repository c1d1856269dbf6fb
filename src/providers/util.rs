use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// Deserializes an amount field that upstreams return either as a JSON
/// number or as a numeric string. Non-finite values are rejected so a
/// `"NaN"` payload surfaces as a parse failure, not a bogus quote.
pub(crate) fn amount_from_any<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let amount = match &value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("amount out of f64 range"))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| de::Error::custom(format!("invalid amount '{s}': {e}")))?,
        other => {
            return Err(de::Error::custom(format!(
                "expected numeric amount, got {other}"
            )));
        }
    };

    if !amount.is_finite() {
        return Err(de::Error::custom(format!("amount is not finite: {value}")));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "amount_from_any")]
        amount: f64,
    }

    #[test]
    fn test_amount_from_number() {
        let w: Wrapper = serde_json::from_str(r#"{"amount": 0.0015}"#).unwrap();
        assert_eq!(w.amount, 0.0015);
    }

    #[test]
    fn test_amount_from_string() {
        let w: Wrapper = serde_json::from_str(r#"{"amount": "0.0015"}"#).unwrap();
        assert_eq!(w.amount, 0.0015);

        let w: Wrapper = serde_json::from_str(r#"{"amount": " 42 "}"#).unwrap();
        assert_eq!(w.amount, 42.0);
    }

    #[test]
    fn test_amount_rejects_garbage() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount": true}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount": null}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount": "NaN"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount": "inf"}"#).is_err());
    }
}
