/// External scraper-process provider
///
/// Each lookup spawns one short-lived process:
///
///   <command> <script> <productName> <filtersJSON>
///
/// Contract with the process: on success it prints a single JSON object
/// matching `ProductRecord` on stdout and exits 0; on failure it exits
/// non-zero (stdout, if any, is ignored). Anything that deviates from that
/// contract is treated uniformly as "no result" and logged, never surfaced
/// as a fatal error.
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::{
    error::AppResult,
    models::{FilterSpec, ProductRecord},
    services::providers::ProductProvider,
};

#[derive(Debug, Clone)]
pub struct ScraperProvider {
    command: String,
    script: String,
    timeout: Duration,
}

impl ScraperProvider {
    pub fn new(command: String, script: String, timeout: Duration) -> Self {
        Self {
            command,
            script,
            timeout,
        }
    }

    /// Parse the process stdout into a product record.
    ///
    /// Empty output and a literal `null` document both mean "nothing found".
    fn parse_output(stdout: &[u8]) -> Option<ProductRecord> {
        let text = String::from_utf8_lossy(stdout);
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return None;
        }
        match serde_json::from_str::<ProductRecord>(trimmed) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "Scraper output failed to parse as a product record");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl ProductProvider for ScraperProvider {
    async fn lookup_product(
        &self,
        name: &str,
        filters: &FilterSpec,
    ) -> AppResult<Option<ProductRecord>> {
        let filters_json = serde_json::to_string(filters)?;

        let child = Command::new(&self.command)
            .arg(&self.script)
            .arg(name)
            .arg(&filters_json)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => {
                tracing::warn!(
                    product = %name,
                    timeout_secs = self.timeout.as_secs(),
                    "Scraper process timed out"
                );
                return Ok(None);
            }
        };

        if !output.status.success() {
            tracing::warn!(
                product = %name,
                status = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr),
                "Scraper process exited with failure"
            );
            return Ok(None);
        }

        Ok(Self::parse_output(&output.stdout))
    }

    fn name(&self) -> &'static str {
        "scraper-process"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters() -> FilterSpec {
        FilterSpec {
            min_price: 1000,
            max_price: 10000,
            min_rating: 4.0,
        }
    }

    /// Writes a shell script standing in for the scraper and returns a
    /// provider invoking it as `sh <script> <productName> <filtersJSON>`.
    fn provider_with_script(label: &str, body: &str) -> ScraperProvider {
        let path = std::env::temp_dir().join(format!("fake_scraper_{label}_{}.sh", std::process::id()));
        std::fs::write(&path, body).unwrap();
        ScraperProvider::new(
            "sh".to_string(),
            path.to_string_lossy().into_owned(),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_valid_json_output_yields_record() {
        let provider = provider_with_script(
            "ok",
            r#"echo '{"title":"Yoga Mat","price":"1,499","rating":"4.6 out of 5 stars","image_url":"https://example.com/m.jpg","product_link":"https://example.com/m"}'"#,
        );
        let result = provider
            .lookup_product("yoga mat", &filters())
            .await
            .unwrap();
        let record = result.expect("expected a product record");
        assert_eq!(record.title.as_deref(), Some("Yoga Mat"));
        assert_eq!(record.price, "1,499");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_a_miss() {
        let provider = provider_with_script("fail", "exit 3");
        let result = provider.lookup_product("anything", &filters()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_garbage_stdout_is_a_miss() {
        let provider = provider_with_script("garbage", "echo 'not json at all'");
        let result = provider.lookup_product("anything", &filters()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_null_stdout_is_a_miss() {
        let provider = provider_with_script("null", "echo null");
        let result = provider.lookup_product("anything", &filters()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_filters_passed_as_json_argument() {
        // The script succeeds only when its second argument carries the
        // filters JSON, so a hit proves the argument contract.
        let provider = provider_with_script(
            "args",
            r#"case "$2" in
  *'"min_price":1000'*) echo '{"title":null,"price":"0","rating":"0","image_url":"","product_link":""}' ;;
  *) exit 1 ;;
esac"#,
        );
        let result = provider
            .lookup_product("desk lamp", &filters())
            .await
            .unwrap();
        assert!(result.is_some());
    }

    #[test]
    fn test_parse_output_empty_is_none() {
        assert!(ScraperProvider::parse_output(b"").is_none());
        assert!(ScraperProvider::parse_output(b"  \n").is_none());
    }
}
