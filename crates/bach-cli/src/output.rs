//! Output formatting

use bach_abi::Value;
use serde::Serialize;
use serde_json::{Map, Value as Json};

/// Command result, printed either as a JSON object or as plain text
pub struct Output {
    json_mode: bool,
    fields: Map<String, Json>,
    lines: Vec<String>,
}

impl Output {
    pub fn new(json_mode: bool) -> Self {
        Self {
            json_mode,
            fields: Map::new(),
            lines: Vec::new(),
        }
    }

    /// Add a field to the JSON object
    pub fn field<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Json::Null);
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Decoded values: a `values` array in JSON, one `[i] value` line each in text
    pub fn values(mut self, values: &[Value]) -> Self {
        let rendered: Vec<Json> = values.iter().map(Value::to_json).collect();
        self.lines.extend(
            rendered
                .iter()
                .enumerate()
                .map(|(i, v)| format!("[{}] {}", i, v)),
        );
        self.fields.insert("values".to_string(), Json::Array(rendered));
        self
    }

    /// Append a plain-text line
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    fn render(&self) -> String {
        if self.json_mode {
            serde_json::to_string_pretty(&self.fields).unwrap_or_default()
        } else {
            self.lines.join("\n")
        }
    }

    pub fn print(self) {
        let rendered = self.render();
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_text() {
        let out = Output::new(false)
            .field("member", "balanceOf")
            .values(&[Value::uint(7), Value::Bool(true)]);
        assert_eq!(out.render(), "[0] \"7\"\n[1] true");
    }

    #[test]
    fn test_values_json() {
        let out = Output::new(true)
            .field("member", "balanceOf")
            .values(&[Value::int(-3)])
            .line("ignored in json");
        let json: Json = serde_json::from_str(&out.render()).unwrap();
        assert_eq!(json["member"], "balanceOf");
        assert_eq!(json["values"], serde_json::json!(["-3"]));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(Output::new(false).field("count", &0u64).render(), "");
    }
}
