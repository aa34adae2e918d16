use std::collections::HashMap;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = pairs.into_iter().collect();

        QueryString { items }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(|value| value.as_str())
    }

    pub fn get_limit(&self, default: usize) -> usize {
        match self.items.get("limit") {
            Some(value) => value.parse().unwrap_or(default),
            None => default,
        }
    }
}
