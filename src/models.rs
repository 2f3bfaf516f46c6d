use serde::Deserialize;

/// Creation payload: a movie without an id. The store assigns the id.
#[derive(Clone, Debug, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    pub description: Option<String>,
    pub director: Option<String>,
    pub country: Option<String>,
}
