//! # Notifier 設定
//!
//! 環境変数から通知サービスの設定を読み込む。
//!
//! ## 環境変数
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|-----------|------|
//! | `NOTIFIER_HOST` | `0.0.0.0` | バインドアドレス |
//! | `NOTIFIER_PORT` | `3100` | ポート番号 |
//! | `NOTIFICATION_BACKEND` | `noop` | `smtp` または `noop` |
//! | `SMTP_USER` / `SMTP_PWD` | なし | SMTP 認証情報 |
//! | `SMTP_SERVICE` | なし | 既知のメールサービス名（指定時は host/port/secure を無視） |
//! | `SMTP_HOST` | `localhost` | SMTP ホスト |
//! | `SMTP_PORT` | `1025` | SMTP ポート |
//! | `SMTP_SECURE` | `false` | 接続時から TLS を使うか |
//! | `SMTP_FROM` | `AgendaBDE <noreply@agendabde.example.com>` | 送信元 |
//! | `ABSOLUTE_URL` | `http://localhost:3000` | メール内リンクの基点 URL |
//! | `EVENT_BUS_CAPACITY` | `256` | イベントバスのバッファ長 |

use std::{env, str::FromStr};

use agenda_infra::notification::{SmtpSettings, SmtpTarget, WellKnownService};
use thiserror::Error;

use crate::absolute_url::AbsoluteUrl;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 値の形式が不正
    #[error("{key} の値が不正です: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// 送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationBackend {
    /// SMTP サーバー経由で送信
    Smtp,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// 通知サービスの設定
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub host:         String,
    pub port:         u16,
    pub backend:      NotificationBackend,
    pub smtp:         SmtpSettings,
    pub absolute_url: AbsoluteUrl,
    pub bus_capacity: usize,
}

impl NotifierConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let smtp_target = match var("SMTP_SERVICE") {
            Some(service) => SmtpTarget::Service(parse("SMTP_SERVICE", service)?),
            None => SmtpTarget::Host {
                host:   var("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
                port:   parse_or("SMTP_PORT", var("SMTP_PORT"), 1025)?,
                secure: parse_bool("SMTP_SECURE", var("SMTP_SECURE"))?,
            },
        };

        let absolute_url_value =
            var("ABSOLUTE_URL").unwrap_or_else(|| "http://localhost:3000".to_string());
        let absolute_url =
            AbsoluteUrl::parse(&absolute_url_value).map_err(|_| ConfigError::Invalid {
                key:   "ABSOLUTE_URL",
                value: absolute_url_value.clone(),
            })?;

        Ok(Self {
            host: var("NOTIFIER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("NOTIFIER_PORT", var("NOTIFIER_PORT"), 3100)?,
            backend: parse_or(
                "NOTIFICATION_BACKEND",
                var("NOTIFICATION_BACKEND"),
                NotificationBackend::Noop,
            )?,
            smtp: SmtpSettings {
                user: var("SMTP_USER"),
                password: var("SMTP_PWD"),
                target: smtp_target,
                from: var("SMTP_FROM")
                    .unwrap_or_else(|| "AgendaBDE <noreply@agendabde.example.com>".to_string()),
            },
            absolute_url,
            bus_capacity: parse_or("EVENT_BUS_CAPACITY", var("EVENT_BUS_CAPACITY"), 256)?,
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

fn parse_or<T: FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    value.map_or(Ok(default), |v| parse(key, v))
}

fn parse_bool(key: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::trim) {
        None => Ok(false),
        Some("true" | "1" | "yes") => Ok(true),
        Some("false" | "0" | "no") => Ok(false),
        Some(other) => Err(ConfigError::Invalid {
            key,
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<NotifierConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NotifierConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_未設定ならデフォルト値を使う() {
        let config = load(&[]).unwrap();

        assert_eq!(config.port, 3100);
        assert_eq!(config.backend, NotificationBackend::Noop);
        assert_eq!(
            config.smtp.target,
            SmtpTarget::Host {
                host:   "localhost".to_string(),
                port:   1025,
                secure: false,
            }
        );
        assert_eq!(config.absolute_url.base(), "http://localhost:3000/");
        assert_eq!(config.bus_capacity, 256);
    }

    #[test]
    fn test_smtp_serviceが設定されていればホスト指定より優先する() {
        let config = load(&[
            ("SMTP_SERVICE", "Gmail"),
            ("SMTP_HOST", "mail.example.com"),
            ("SMTP_PORT", "2525"),
        ])
        .unwrap();

        assert_eq!(
            config.smtp.target,
            SmtpTarget::Service(WellKnownService::Gmail)
        );
    }

    #[test]
    fn test_ホスト指定の設定を読み込む() {
        let config = load(&[
            ("NOTIFICATION_BACKEND", "smtp"),
            ("SMTP_USER", "agenda"),
            ("SMTP_PWD", "secret"),
            ("SMTP_HOST", "mail.example.com"),
            ("SMTP_PORT", "465"),
            ("SMTP_SECURE", "true"),
            ("SMTP_FROM", "BDE <bde@example.com>"),
        ])
        .unwrap();

        assert_eq!(config.backend, NotificationBackend::Smtp);
        assert_eq!(config.smtp.user.as_deref(), Some("agenda"));
        assert_eq!(config.smtp.password.as_deref(), Some("secret"));
        assert_eq!(config.smtp.from, "BDE <bde@example.com>");
        assert_eq!(
            config.smtp.target,
            SmtpTarget::Host {
                host:   "mail.example.com".to_string(),
                port:   465,
                secure: true,
            }
        );
    }

    #[test]
    fn test_空文字列は未設定として扱う() {
        let config = load(&[("SMTP_SERVICE", ""), ("SMTP_USER", "  ")]).unwrap();

        assert!(matches!(config.smtp.target, SmtpTarget::Host { .. }));
        assert!(config.smtp.user.is_none());
    }

    #[test]
    fn test_不正なポートはエラーになる() {
        let result = load(&[("SMTP_PORT", "smtp")]);

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "SMTP_PORT",
                ..
            })
        ));
    }

    #[test]
    fn test_未知のサービス名と不正なsecureはエラーになる() {
        assert!(load(&[("SMTP_SERVICE", "pigeon")]).is_err());
        assert!(load(&[("SMTP_SECURE", "maybe")]).is_err());
        assert!(load(&[("NOTIFICATION_BACKEND", "ses")]).is_err());
    }
}
