use serde::Deserialize;

/// One page of search results as returned by the upstream API.
///
/// Both fields tolerate absence: a response missing `articles` yields an
/// empty page, a response missing `totalResults` yields zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResponse {
    pub articles: Vec<WireArticle>,
    pub total_results: u64,
}

/// An article record on the wire.
///
/// Only `url` is required; every other field may be null or missing and the
/// renderer supplies display fallbacks. `source` in particular is known to
/// be absent on malformed records, so it is never assumed present.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireArticle {
    #[serde(default)]
    pub source: Option<WireSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

/// The nested source object on a wire article.
#[derive(Debug, Clone, Deserialize)]
pub struct WireSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// An article as the rest of the crate sees it.
///
/// Optional fields stay optional here; display fallbacks ("No Title",
/// "unknown author", the placeholder image) are applied at render time,
/// not at decode time.
#[derive(Debug, Clone)]
pub struct Article {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// List key and outbound link target. Uniqueness is assumed upstream
    /// but not enforced here.
    pub url: String,
    pub author: Option<String>,
    /// Raw timestamp string; parsed to a GMT display string at render time.
    pub published_at: Option<String>,
    pub source_name: Option<String>,
}

impl From<WireArticle> for Article {
    fn from(wire: WireArticle) -> Self {
        Self {
            title: wire.title,
            description: wire.description,
            image_url: wire.url_to_image,
            url: wire.url,
            author: wire.author,
            published_at: wire.published_at,
            source_name: wire.source.and_then(|s| s.name),
        }
    }
}

/// A decoded page of articles plus the upstream's total-result count.
#[derive(Debug, Clone, Default)]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    pub total_results: u64,
}

impl From<SearchResponse> for ArticlePage {
    fn from(response: SearchResponse) -> Self {
        Self {
            total_results: response.total_results,
            articles: response.articles.into_iter().map(Article::from).collect(),
        }
    }
}
