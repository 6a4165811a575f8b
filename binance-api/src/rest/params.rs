use url::Url;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn push(&mut self, key: &'static str, value: impl ToString) -> &mut Self {
        self.params.push((key, value.to_string()));
        return self;
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        return self
            .params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str());
    }

    pub fn add_to_url(&self, url: &mut Url) {
        if self.params.is_empty() {
            return;
        }
        let mut pairs = url.query_pairs_mut();
        for (key, value) in self.params.iter() {
            pairs.append_pair(key, value);
        }
    }
}
