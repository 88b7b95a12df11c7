use crate::core::days::not_blank;
use crate::domain::model::Product;
use std::borrow::Cow;

const WEBP_EXT: &str = ".webp";
const PNG_EXT: &str = ".png";

/// 顯示器不支援 webp：以 `.webp` 結尾的 URL 將所有 `.webp` 換成 `.png`
pub fn fix_ext(url: &str) -> Cow<'_, str> {
    if url.ends_with(WEBP_EXT) {
        Cow::Owned(url.replace(WEBP_EXT, PNG_EXT))
    } else {
        Cow::Borrowed(url)
    }
}

/// `image_small` → `image_medium` → `url`, first non-blank wins.
pub fn best_image_url(product: &Product) -> Option<String> {
    [&product.image_small, &product.image_medium, &product.url]
        .into_iter()
        .map(Option::as_deref)
        .find(|candidate| not_blank(*candidate))
        .flatten()
        .map(|url| fix_ext(url).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(small: Option<&str>, medium: Option<&str>, url: Option<&str>) -> Product {
        Product {
            image_small: small.map(String::from),
            image_medium: medium.map(String::from),
            url: url.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_fix_ext_webp() {
        assert_eq!(fix_ext("image.webp"), "image.png");
        assert_eq!(fix_ext("a.webp"), "a.png");
        assert_eq!(
            fix_ext("https://example.com/donut.webp"),
            "https://example.com/donut.png"
        );
    }

    #[test]
    fn test_fix_ext_replaces_every_occurrence() {
        assert_eq!(
            fix_ext("https://cdn.example.com/x.webp/donut.webp"),
            "https://cdn.example.com/x.png/donut.png"
        );
        assert_eq!(fix_ext("a.webp.webp"), "a.png.png");
        // 只有結尾是 .webp 才轉換
        assert_eq!(fix_ext("x.webp/donut.jpg"), "x.webp/donut.jpg");
    }

    #[test]
    fn test_fix_ext_idempotent() {
        for url in [
            "image.png",
            "image.jpg",
            "image.jpeg",
            "image.gif",
            "",
            "image.webp?size=small",
            "a.webp",
            "a.webp.webp",
            "https://cdn.example.com/x.webp/donut.webp",
        ] {
            let once = fix_ext(url).into_owned();
            assert_eq!(fix_ext(&once), once.as_str(), "{:?}", url);
            assert!(!once.ends_with(".webp"), "{:?}", url);
            if !url.ends_with(".webp") {
                assert_eq!(once, url);
                assert!(matches!(fix_ext(url), Cow::Borrowed(_)));
            }
        }
    }

    #[test]
    fn test_best_image_url_precedence() {
        let small = Some("https://example.com/small.png");
        let medium = Some("https://example.com/medium.png");
        let url = Some("https://example.com/original.png");
        let blanks: [Option<&str>; 2] = [None, Some("   ")];

        for s in [small, blanks[0], blanks[1]] {
            for m in [medium, blanks[0], blanks[1]] {
                for u in [url, blanks[0], blanks[1]] {
                    let expected = [s, m, u]
                        .into_iter()
                        .find(|c| not_blank(*c))
                        .flatten()
                        .map(String::from);
                    assert_eq!(
                        best_image_url(&product(s, m, u)),
                        expected,
                        "small={:?} medium={:?} url={:?}",
                        s,
                        m,
                        u
                    );
                }
            }
        }
    }

    #[test]
    fn test_best_image_url_all_blank_is_none() {
        assert_eq!(best_image_url(&Product::default()), None);
        assert_eq!(best_image_url(&product(Some(""), Some(" "), None)), None);
    }

    #[test]
    fn test_best_image_url_converts_webp() {
        let p = product(Some("https://example.com/small.webp"), None, None);
        assert_eq!(
            best_image_url(&p).as_deref(),
            Some("https://example.com/small.png")
        );
        let p = product(Some("  "), Some("https://example.com/medium.webp"), None);
        assert_eq!(
            best_image_url(&p).as_deref(),
            Some("https://example.com/medium.png")
        );
    }
}
