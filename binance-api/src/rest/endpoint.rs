use std::borrow::Cow;

use super::params::QueryParams;

pub trait Endpoint {
    /// Path relative to the client's base url, without a leading slash.
    fn endpoint(&self) -> Cow<'static, str>;

    fn params(&self) -> QueryParams {
        return QueryParams::default();
    }
}
