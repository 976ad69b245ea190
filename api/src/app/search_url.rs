//! Upstream search URL construction

use crate::config::Config;

/// Template for the upstream `site:` search feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchUrl {
    base: String,
    hl: String,
    gl: String,
    ceid: String,
}

impl SearchUrl {
    pub fn new(base: &str, hl: &str, gl: &str, ceid: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            hl: hl.to_string(),
            gl: gl.to_string(),
            ceid: ceid.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.search_base_url,
            &config.search_hl,
            &config.search_gl,
            &config.search_ceid,
        )
    }

    /// Search feed URL for `site`.
    ///
    /// `site` is substituted verbatim; characters such as `&` or spaces are
    /// not percent-encoded.
    pub fn for_site(&self, site: &str) -> String {
        format!(
            "{}?q=site:{}&hl={}&gl={}&ceid={}",
            self.base, site, self.hl, self.gl, self.ceid
        )
    }
}

impl Default for SearchUrl {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
