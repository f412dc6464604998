//! # Observability 基盤
//!
//! トレーシング初期化とログ出力形式の設定を提供する。
//!
//! - `LOG_FORMAT=json` では 1 行 1 JSON。すべての行に `service` フィールドを付ける
//! - `RUST_LOG` 未設定時のフィルタは [`DEFAULT_FILTER`]
//!
//! ```json
//! {"service":"notifier","timestamp":"...","level":"INFO","event.kind":"business_event", ...}
//! ```

use std::str::FromStr;

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_FILTER: &str = "info,agenda=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// JSON 形式（本番環境向け）
    Json,
    /// 人間が読みやすい形式（開発環境向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// 環境変数 `LOG_FORMAT` から読み取る
    ///
    /// 未設定なら [`Pretty`](LogFormat::Pretty)。不正な値も `Pretty` として扱い、stderr に警告する。
    /// トレーシング初期化前に呼ばれるため tracing は使えない。
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(value) => Self::from_str(value.trim()).unwrap_or_else(|_| {
                eprintln!("WARNING: unknown LOG_FORMAT={value:?}, falling back to pretty");
                Self::Pretty
            }),
            Err(_) => Self::default(),
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// JSON 出力の `service` フィールド
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    /// 環境変数から設定を読み取る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// トレーシングを初期化する
///
/// プロセスで 1 度だけ呼ぶこと。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer(&config, std::io::stdout))
        .init();

    tracing::debug!(log_format = %config.log_format, "トレーシングを初期化しました");
}

#[cfg(feature = "observability")]
mod fmt {
    use std::fmt::Write as _;

    use tracing::{Event, Subscriber};
    use tracing_subscriber::{
        Layer,
        fmt::{
            FmtContext,
            FormatEvent,
            FormatFields,
            MakeWriter,
            format::{self, Format, Json, Writer},
        },
        registry::LookupSpan,
    };

    use super::{LogFormat, TracingConfig};

    /// 出力形式に応じたフォーマットレイヤーを作る
    pub(super) fn layer<S, W>(
        config: &TracingConfig,
        make_writer: W,
    ) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        match config.log_format {
            LogFormat::Json => {
                let inner = format::format()
                    .json()
                    .flatten_event(true)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(false);

                tracing_subscriber::fmt::layer()
                    .json()
                    .event_format(ServiceJson {
                        service: config.service_name.clone(),
                        inner,
                    })
                    .with_writer(make_writer)
                    .boxed()
            }
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .with_writer(make_writer)
                .boxed(),
        }
    }

    /// JSON 行の先頭に `"service"` を差し込むフォーマッター
    struct ServiceJson {
        service: String,
        inner:   Format<Json>,
    }

    impl<S, N> FormatEvent<S, N> for ServiceJson
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
        N: for<'a> FormatFields<'a> + 'static,
    {
        fn format_event(
            &self,
            ctx: &FmtContext<'_, S, N>,
            mut writer: Writer<'_>,
            event: &Event<'_>,
        ) -> std::fmt::Result {
            let mut line = String::new();
            self.inner.format_event(ctx, Writer::new(&mut line), event)?;

            let service = serde_json::to_string(&self.service).map_err(|_| std::fmt::Error)?;
            match line.strip_prefix('{') {
                Some(rest) => write!(writer, "{{\"service\":{service},{rest}"),
                None => writer.write_str(&line),
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("JSON", LogFormat::Json)]
    #[case("pretty", LogFormat::Pretty)]
    fn test_ログ形式は大文字小文字を区別せずにパースできる(
        #[case] input: &str,
        #[case] expected: LogFormat,
    ) {
        assert_eq!(LogFormat::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_不正なログ形式はパースエラーになる() {
        assert!(LogFormat::from_str("yaml").is_err());
        assert!(LogFormat::from_str("").is_err());
    }

    #[test]
    fn test_newでフィールドが正しく設定される() {
        let config = TracingConfig::new("notifier", LogFormat::Json);

        assert_eq!(config.service_name, "notifier");
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
