//! SDK types

use bach_primitives::{Address, U256};
use serde::Serialize;

/// Block identifier for RPC queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockId {
    /// Block number
    Number(u64),
    /// Latest block
    #[default]
    Latest,
    /// Pending block (includes pending transactions)
    Pending,
    /// Earliest block (genesis)
    Earliest,
}

impl Serialize for BlockId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            BlockId::Number(n) => serializer.serialize_str(&format!("0x{:x}", n)),
            BlockId::Latest => serializer.serialize_str("latest"),
            BlockId::Pending => serializer.serialize_str("pending"),
            BlockId::Earliest => serializer.serialize_str("earliest"),
        }
    }
}

impl std::str::FromStr for BlockId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(BlockId::Latest),
            "pending" => Ok(BlockId::Pending),
            "earliest" => Ok(BlockId::Earliest),
            other => {
                let parsed = match other.strip_prefix("0x") {
                    Some(hex) => u64::from_str_radix(hex, 16),
                    None => other.parse(),
                };
                parsed
                    .map(BlockId::Number)
                    .map_err(|_| format!("invalid block tag: {}", other))
            }
        }
    }
}

/// Transaction parameters for `eth_call` and `eth_sendTransaction`.
///
/// `data` is owned by the contract client, which overwrites it with the
/// encoded call data on every invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionParams {
    /// Sender address
    pub from: Option<Address>,
    /// Recipient address (None for contract creation)
    pub to: Option<Address>,
    /// Sender nonce
    pub nonce: Option<u64>,
    /// Gas limit
    pub gas: Option<u64>,
    /// Gas price
    pub gas_price: Option<u128>,
    /// Value to transfer
    pub value: Option<U256>,
    /// `0x`-prefixed input data
    pub data: Option<String>,
}

impl TransactionParams {
    /// Parameters sent from `from`
    pub fn from(from: Address) -> Self {
        Self {
            from: Some(from),
            ..Default::default()
        }
    }

    /// Drop any input data left from a previous invocation
    pub fn clear_data(&mut self) {
        self.data = None;
    }
}

impl Serialize for TransactionParams {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let count = [
            self.from.is_some(),
            self.to.is_some(),
            self.nonce.is_some(),
            self.gas.is_some(),
            self.gas_price.is_some(),
            self.value.is_some(),
            self.data.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count();

        let mut map = serializer.serialize_map(Some(count))?;

        if let Some(from) = &self.from {
            map.serialize_entry("from", &from.to_hex())?;
        }
        if let Some(to) = &self.to {
            map.serialize_entry("to", &to.to_hex())?;
        }
        if let Some(nonce) = &self.nonce {
            map.serialize_entry("nonce", &format!("0x{:x}", nonce))?;
        }
        if let Some(gas) = &self.gas {
            map.serialize_entry("gas", &format!("0x{:x}", gas))?;
        }
        if let Some(gas_price) = &self.gas_price {
            map.serialize_entry("gasPrice", &format!("0x{:x}", gas_price))?;
        }
        if let Some(value) = &self.value {
            map.serialize_entry("value", &format!("0x{:x}", value))?;
        }
        if let Some(data) = &self.data {
            map.serialize_entry("data", data)?;
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_id_serialize() {
        assert_eq!(serde_json::to_value(BlockId::Latest).unwrap(), "latest");
        assert_eq!(serde_json::to_value(BlockId::Number(255)).unwrap(), "0xff");
    }

    #[test]
    fn test_block_id_parse() {
        assert_eq!("pending".parse::<BlockId>().unwrap(), BlockId::Pending);
        assert_eq!("0x10".parse::<BlockId>().unwrap(), BlockId::Number(16));
        assert_eq!("12".parse::<BlockId>().unwrap(), BlockId::Number(12));
        assert!("soon".parse::<BlockId>().is_err());
    }

    #[test]
    fn test_params_skip_missing_fields() {
        let params = TransactionParams {
            to: Some(Address::from_bytes([0x11; 20])),
            gas: Some(21000),
            value: Some(U256::from(0)),
            data: Some("0x1234".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["to"], "0x1111111111111111111111111111111111111111");
        assert_eq!(json["gas"], "0x5208");
        assert_eq!(json["value"], "0x0");
        assert_eq!(json["data"], "0x1234");
        assert!(json.get("from").is_none());
        assert!(json.get("nonce").is_none());
    }

    #[test]
    fn test_clear_data() {
        let mut params = TransactionParams {
            data: Some("0xdead".to_string()),
            ..Default::default()
        };
        params.clear_data();
        assert!(params.data.is_none());
    }
}
