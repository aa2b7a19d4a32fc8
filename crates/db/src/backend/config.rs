use sustaineco_core::media::DEFAULT_IMAGE_BUCKET;

/// Connection settings for the hosted backend project.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project base URL, without a trailing slash.
    pub url: String,
    /// Public (anon) API key sent with every request.
    pub anon_key: String,
    /// HMAC secret the backend signs access tokens with.
    pub jwt_secret: String,
    /// Bucket holding uploaded images.
    pub bucket: String,
}

impl BackendConfig {
    /// Load backend configuration from environment variables.
    ///
    /// | Env Var              | Required | Default       |
    /// |----------------------|----------|---------------|
    /// | `BACKEND_URL`        | **yes**  | --            |
    /// | `BACKEND_ANON_KEY`   | **yes**  | --            |
    /// | `BACKEND_JWT_SECRET` | **yes**  | --            |
    /// | `BACKEND_BUCKET`     | no       | `hero-images` |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is not set or is empty.
    pub fn from_env() -> Self {
        let url = required("BACKEND_URL");
        let anon_key = required("BACKEND_ANON_KEY");
        let jwt_secret = required("BACKEND_JWT_SECRET");
        let bucket =
            std::env::var("BACKEND_BUCKET").unwrap_or_else(|_| DEFAULT_IMAGE_BUCKET.into());

        Self::new(url, anon_key, jwt_secret, bucket)
    }

    pub fn new(url: String, anon_key: String, jwt_secret: String, bucket: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
            jwt_secret,
            bucket,
        }
    }
}

fn required(name: &str) -> String {
    let value = std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set"));
    assert!(!value.is_empty(), "{name} must not be empty");
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = BackendConfig::new(
            "https://abc.example.co/".into(),
            "anon".into(),
            "secret".into(),
            "hero-images".into(),
        );
        assert_eq!(config.url, "https://abc.example.co");
    }
}
