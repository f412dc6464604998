//! # 絶対 URL の生成
//!
//! メール内のリンクはアプリケーションの公開 URL を基点とした絶対 URL にする。

use url::Url;

/// 相対パスを公開 URL 配下の絶対 URL に変換する
///
/// ```
/// use agenda_notifier::absolute_url::AbsoluteUrl;
///
/// let urls = AbsoluteUrl::parse("https://agenda.example.com/app").unwrap();
/// assert_eq!(urls.resolve("E1"), "https://agenda.example.com/app/E1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsoluteUrl {
    base: Url,
}

impl AbsoluteUrl {
    /// 公開 URL をパースする
    ///
    /// 末尾の `/` の有無は問わない。
    pub fn parse(base: &str) -> Result<Self, url::ParseError> {
        let mut base = base.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            base: Url::parse(&base)?,
        })
    }

    /// 相対パスを絶対 URL に変換する
    ///
    /// 呼び出し側はパスセグメントをエンコード済みで渡すこと。
    pub fn resolve(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        match self.base.join(path) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.base, path),
        }
    }

    pub fn base(&self) -> &str {
        self.base.as_str()
    }
}
