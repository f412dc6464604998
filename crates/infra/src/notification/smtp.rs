//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 接続先は既知のメールサービス名、またはホスト・ポート・TLS 指定のいずれかで与える。

use agenda_domain::notification::{EmailMessage, NotificationError, SendReceipt};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart, header::ContentType},
    transport::smtp::{
        AsyncSmtpTransportBuilder,
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};

use super::NotificationSender;

/// 既知のメールサービス
///
/// `SMTP_SERVICE` に指定された名前（大文字小文字を区別しない）から接続先を解決する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WellKnownService {
    Gmail,
    Outlook365,
    Hotmail,
    Yahoo,
    ICloud,
    Zoho,
    SendGrid,
    Mailgun,
    Ovh,
    Gandi,
}

impl WellKnownService {
    /// 接続先（ホスト、ポート、暗黙的 TLS か）を返す
    pub fn endpoint(self) -> (&'static str, u16, bool) {
        match self {
            Self::Gmail => ("smtp.gmail.com", 465, true),
            Self::Outlook365 => ("smtp.office365.com", 587, false),
            Self::Hotmail => ("smtp-mail.outlook.com", 587, false),
            Self::Yahoo => ("smtp.mail.yahoo.com", 465, true),
            Self::ICloud => ("smtp.mail.me.com", 587, false),
            Self::Zoho => ("smtp.zoho.com", 465, true),
            Self::SendGrid => ("smtp.sendgrid.net", 587, false),
            Self::Mailgun => ("smtp.mailgun.org", 465, true),
            Self::Ovh => ("ssl0.ovh.net", 465, true),
            Self::Gandi => ("mail.gandi.net", 587, false),
        }
    }
}

/// SMTP 接続先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmtpTarget {
    /// 既知のメールサービス
    Service(WellKnownService),
    /// ホストを直接指定
    ///
    /// `secure` が真なら接続時から TLS（SMTPS）、偽ならサーバーが対応していれば STARTTLS。
    Host {
        host:   String,
        port:   u16,
        secure: bool,
    },
}

/// SMTP 送信設定
#[derive(Clone)]
pub struct SmtpSettings {
    pub user:     Option<String>,
    pub password: Option<String>,
    pub target:   SmtpTarget,
    /// 送信元（`"AgendaBDE <noreply@example.com>"` 形式も可）
    pub from:     String,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("target", &self.target)
            .field("from", &self.from)
            .finish()
    }
}

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
pub struct SmtpNotificationSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from:      Mailbox,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// 接続は行わない。疎通確認は [`NotificationSender::verify_connection`] で行う。
    pub fn new(settings: &SmtpSettings) -> Result<Self, NotificationError> {
        let from: Mailbox = settings
            .from
            .parse()
            .map_err(|e| NotificationError::ConnectionFailed(format!("送信元アドレス不正: {e}")))?;

        let mut builder = transport_builder(&settings.target)?;
        if let Some(user) = settings.user.as_deref().filter(|u| !u.is_empty()) {
            builder = builder.credentials(Credentials::new(
                user.to_string(),
                settings.password.clone().unwrap_or_default(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(
        &self,
        email: &EmailMessage,
        message_id: &str,
    ) -> Result<Message, NotificationError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| NotificationError::SendFailed(format!("宛先アドレス不正: {e}")))?;

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .message_id(Some(message_id.to_string()))
            .subject(&email.subject);

        if let Some(reply_to) = &email.reply_to {
            let reply_to: Mailbox = reply_to
                .parse()
                .map_err(|e| NotificationError::SendFailed(format!("返信先アドレス不正: {e}")))?;
            builder = builder.reply_to(reply_to);
        }

        builder
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )
            .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
    }

    fn next_message_id(&self) -> String {
        format!("<{}@{}>", uuid::Uuid::new_v4(), self.from.email.domain())
    }
}

fn transport_builder(target: &SmtpTarget) -> Result<AsyncSmtpTransportBuilder, NotificationError> {
    let tls_error = |e: lettre::transport::smtp::Error| {
        NotificationError::ConnectionFailed(format!("TLS 設定失敗: {e}"))
    };

    match target {
        SmtpTarget::Service(service) => {
            let (host, port, secure) = service.endpoint();
            let builder = if secure {
                AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            };
            Ok(builder.map_err(tls_error)?.port(port))
        }
        SmtpTarget::Host { host, port, secure } => {
            if *secure {
                Ok(AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                    .map_err(tls_error)?
                    .port(*port))
            } else {
                let parameters = TlsParameters::new(host.clone()).map_err(tls_error)?;
                Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                    .port(*port)
                    .tls(Tls::Opportunistic(parameters)))
            }
        }
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<SendReceipt, NotificationError> {
        let message_id = self.next_message_id();
        let message = self.build_message(email, &message_id)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(SendReceipt {
            message_id,
            response: format!(
                "{} {}",
                response.code(),
                response
                    .message()
                    .map(|line| line.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            ),
        })
    }

    async fn verify_connection(&self) -> Result<(), NotificationError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(NotificationError::ConnectionFailed(
                "サーバーが NOOP に応答しません".to_string(),
            )),
            Err(e) => Err(NotificationError::ConnectionFailed(e.to_string())),
        }
    }
}
