use ethers::abi::Token;
use ethers::types::{I256, U256};
use serde_json::{json, Value};

use crate::hashes::Hashes;

/// Normalizes a decoded parameter to a JSON-representable value: byte
/// payloads become `0x`-prefixed lowercase hex, integers stay numbers while
/// they fit 64 bits and fall back to decimal strings beyond that, and
/// composite values convert recursively.
pub fn to_json(token: Token) -> Value {
    match token {
        Token::Address(address) => Value::String(Hashes::h160_to_string(&address)),
        Token::FixedBytes(bytes) | Token::Bytes(bytes) => {
            Value::String(Hashes::bytes_to_string(&bytes))
        }
        Token::Uint(value) => uint_to_json(value),
        Token::Int(value) => int_to_json(value),
        Token::Bool(value) => Value::Bool(value),
        Token::String(value) => Value::String(value),
        Token::Array(tokens) | Token::FixedArray(tokens) | Token::Tuple(tokens) => {
            Value::Array(tokens.into_iter().map(to_json).collect())
        }
    }
}

fn uint_to_json(value: U256) -> Value {
    let text = value.to_string();

    match text.parse::<u64>() {
        Ok(small) => json!(small),
        Err(_) => Value::String(text),
    }
}

fn int_to_json(value: U256) -> Value {
    let text = I256::from_raw(value).to_string();

    match text.parse::<i64>() {
        Ok(small) => json!(small),
        Err(_) => Value::String(text),
    }
}
