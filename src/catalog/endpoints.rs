use crate::config::ApiConfig;

/// URL templates of the two catalog endpoints.
///
/// The URL doubles as the request key: two requests for the same URL are
/// the same logical request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base_url: String,
    image_limit: u32,
    page_size: u32,
}

impl ApiEndpoints {
    pub fn new(base_url: &str, image_limit: u32, page_size: u32) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            image_limit,
            page_size,
        }
    }

    pub fn images_url(&self) -> String {
        format!("{}/images/search?limit={}", self.base_url, self.image_limit)
    }

    pub fn breeds_url(&self, page: u32) -> String {
        format!(
            "{}/breeds?page={}&limit={}",
            self.base_url, page, self.page_size
        )
    }
}

impl From<&ApiConfig> for ApiEndpoints {
    fn from(config: &ApiConfig) -> Self {
        Self::new(&config.base_url, config.image_limit, config.page_size)
    }
}
