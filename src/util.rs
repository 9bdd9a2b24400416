use serde_json::{Map, Value};

/// Convert an identifier to snake_case by inserting an underscore before
/// every uppercase letter past the first character.
pub fn to_snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for (i, ch) in input.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Recursively rewrite every object key in a JSON tree to snake_case.
/// Applied at the serialization boundary only; non-object values pass
/// through untouched.
pub fn snake_case_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, inner) in map {
                out.insert(to_snake_case(&key), snake_case_keys(inner));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(snake_case_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("riskScore"), "risk_score");
        assert_eq!(to_snake_case("CryptocurrencyType"), "cryptocurrency_type");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_snake_case_keys_walks_nested_structures() {
        let input = json!({
            "riskScore": 0.5,
            "additionalInfo": {
                "transactionsCount": 3,
                "topTransactions": [
                    { "txHash": "abc", "txValue": 1 }
                ]
            }
        });

        let expected = json!({
            "risk_score": 0.5,
            "additional_info": {
                "transactions_count": 3,
                "top_transactions": [
                    { "tx_hash": "abc", "tx_value": 1 }
                ]
            }
        });

        assert_eq!(snake_case_keys(input), expected);
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(snake_case_keys(json!(42)), json!(42));
        assert_eq!(snake_case_keys(json!("CamelCase")), json!("CamelCase"));
    }
}
