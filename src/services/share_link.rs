/*
 * Responsibility
 * - Business の共有 URL (QR コードに入れる文字列) の組み立て
 * - PUBLIC_BASE_URL の検証はここに閉じ込める
 *
 * Notes
 * - QR 画像のエンコード自体はクライアント側 (外部ライブラリ) の責務。
 *   サーバはエンコード対象のデータだけを返す。
 */
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ShareLinkError {
    #[error("invalid PUBLIC_BASE_URL: {0}")]
    InvalidBaseUrl(String),
}

/// Builds `{PUBLIC_BASE_URL}/b/{publicId}` links for QR payloads.
#[derive(Clone, Debug)]
pub struct ShareLinkBuilder {
    base: Url,
}

impl ShareLinkBuilder {
    pub fn new(public_base_url: &str) -> Result<Self, ShareLinkError> {
        let base = Url::parse(public_base_url)
            .map_err(|e| ShareLinkError::InvalidBaseUrl(e.to_string()))?;

        if base.cannot_be_a_base() {
            return Err(ShareLinkError::InvalidBaseUrl(
                "must be an absolute http(s) URL".to_string(),
            ));
        }

        Ok(Self { base })
    }

    /// Share URL for a business public id. Infallible once the builder exists:
    /// public ids come out of the sqids alphabet, which is always path-safe.
    pub fn business_url(&self, public_id: &str) -> String {
        let mut url = self.base.clone();
        {
            // Scoped: path_segments_mut borrows the Url.
            let mut segments = url
                .path_segments_mut()
                .expect("base validated as absolute in new()");
            segments.pop_if_empty().push("b").push(public_id);
        }
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_share_url() {
        let links = ShareLinkBuilder::new("https://trustnet.example").expect("builder");
        assert_eq!(links.business_url("aZ3kQ9"), "https://trustnet.example/b/aZ3kQ9");
    }

    #[test]
    fn trailing_slash_does_not_double_up() {
        let links = ShareLinkBuilder::new("https://trustnet.example/app/").expect("builder");
        assert_eq!(
            links.business_url("aZ3kQ9"),
            "https://trustnet.example/app/b/aZ3kQ9"
        );
    }

    #[test]
    fn rejects_relative_base() {
        assert!(ShareLinkBuilder::new("not a url").is_err());
    }
}
