use std::str::FromStr;

use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Exchange trading pair such as `BTCUSDT`. Always upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Validate, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(#[garde(alphanumeric, length(min = 2, max = 20))] String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        return &self.0;
    }
}

impl Default for Symbol {
    fn default() -> Self {
        return Symbol("BTCUSDT".to_owned());
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return f.write_str(&self.0);
    }
}

impl FromStr for Symbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = Symbol(s.trim().to_ascii_uppercase());
        symbol
            .validate(&())
            .map_err(|err| Error::SymbolError(format!("{s}: {err}")))?;
        return Ok(symbol);
    }
}

impl TryFrom<String> for Symbol {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        return value.parse();
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        return value.0;
    }
}
