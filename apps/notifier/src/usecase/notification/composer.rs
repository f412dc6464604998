//! # 送信依頼の組み立て
//!
//! ドメインイベントごとに、誰にどの文面を送るかを決める。
//! 送信可否は [`Event`] の判定メソッドに委ね、ここでは文面とリンクを組み立てる。
//!
//! | イベント | 条件 | 送信内容 |
//! |---|---|---|
//! | `event:create` | サンプルでない | 招待先ごとに招待メール（返信先 = 主催者） |
//! | `event:create` | [`Event::allows_creator_confirmation`] | 主催者にアドレス確認メール |
//! | `event:update:creator.email` | [`Event::allows_creator_confirmation`] | 新しいアドレスに再検証メール |
//! | `participant:add` | [`Event::allows_creator_updates`] | 主催者に新しい参加者の通知 |
//! | `comment:add` | [`Event::allows_creator_updates`] | 主催者に新しいコメントの通知 |

use agenda_domain::{
    DomainEvent,
    event::{Comment, Event, Participant},
    notification::EmailRequest,
};

use crate::absolute_url::AbsoluteUrl;

const VIEW_EVENT: &str = "Voir l'Event";
const VIEW_UPDATES: &str =
    "Clique sur le bouton ci-dessous pour voir les mises à jour apportées à la page de votre event!";

/// 送信依頼の組み立て
#[derive(Debug, Clone)]
pub struct NotificationComposer {
    urls: AbsoluteUrl,
}

impl NotificationComposer {
    pub fn new(urls: AbsoluteUrl) -> Self {
        Self { urls }
    }

    /// ドメインイベントから送信依頼を組み立てる
    ///
    /// 送信対象がなければ空の Vec を返す。
    pub fn compose(&self, domain_event: &DomainEvent) -> Vec<EmailRequest> {
        match domain_event {
            DomainEvent::EventCreated { event } => self.for_event_created(event),
            DomainEvent::CreatorEmailChanged { event, .. } => {
                self.for_creator_email_changed(event)
            }
            DomainEvent::ParticipantAdded { event, participant } => {
                self.for_participant_added(event, participant)
            }
            DomainEvent::CommentAdded { event, comment } => self.for_comment_added(event, comment),
        }
    }

    /// `event:create`: 招待メールと、許可されていれば主催者の確認メール
    pub fn for_event_created(&self, event: &Event) -> Vec<EmailRequest> {
        let mut requests = self.invites(event);
        if event.allows_creator_confirmation() {
            requests.extend(self.creator_confirmation(event));
        }
        requests
    }

    /// `event:update:creator.email`: 新しいアドレスへの再検証メール
    pub fn for_creator_email_changed(&self, event: &Event) -> Vec<EmailRequest> {
        if !event.allows_creator_confirmation() {
            return Vec::new();
        }
        self.email_verification(event).into_iter().collect()
    }

    /// `participant:add`: 主催者への新しい参加者の通知
    pub fn for_participant_added(
        &self,
        event: &Event,
        participant: &Participant,
    ) -> Vec<EmailRequest> {
        if !event.allows_creator_updates() {
            return Vec::new();
        }
        vec![self.new_participant(event, participant)]
    }

    /// `comment:add`: 主催者への新しいコメントの通知
    pub fn for_comment_added(&self, event: &Event, comment: &Comment) -> Vec<EmailRequest> {
        if !event.allows_creator_updates() {
            return Vec::new();
        }
        vec![self.new_comment(event, comment)]
    }

    /// 招待先ごとの招待メール
    fn invites(&self, event: &Event) -> Vec<EmailRequest> {
        if !event.allows_invites() {
            return Vec::new();
        }

        event
            .emails
            .iter()
            .map(|invitee| EmailRequest {
                to:          invitee.email.clone(),
                subject:     subject(event, None),
                title:       format!(
                    "{} vous a invité à participer à leur event: {}",
                    event.creator.name, event.title
                ),
                button_text: VIEW_EVENT.to_string(),
                button_url:  self.event_url(event),
                message:     "AgendaBDE est un outil de planification collaborative gratuit qui \
                              vous permet, ainsi qu'à votre team, de voter sur une date pour \
                              organiser un événement. Clique sur le bouton ci-dessous pour visiter \
                              la page de l'event et voter sur les dates qui vous conviennent le \
                              mieux."
                    .to_string(),
                reply_to:    Some(event.creator.email.clone()),
            })
            .collect()
    }

    /// イベント作成直後の主催者アドレス確認メール
    ///
    /// 検証コードがなければ組み立てない。
    fn creator_confirmation(&self, event: &Event) -> Option<EmailRequest> {
        Some(EmailRequest {
            to:          event.creator.email.clone(),
            subject:     subject(event, Some("Vérification de l'adresse e-mail")),
            title:       format!("Votre event {} a été créé avec succès.", event.title),
            button_text: "Vérification de l'adresse e-mail".to_string(),
            button_url:  self.verification_url(event)?,
            message:     format!(
                "Hi {},<br /><br />Un email a été envoyé à chaque participant avec un lien vers \
                 l'événement.<br /><br />Important: Pour continuer à recevoir des notifications \
                 par e-mail concernant cet event, veuillez cliquer sur le bouton ci-dessous pour \
                 valider votre adresse e-mail.",
                event.creator.name
            ),
            reply_to:    None,
        })
    }

    /// 主催者メールアドレス変更後の再検証メール
    ///
    /// 検証コードがなければ組み立てない。件名のアポストロフィは作成時と異なり `’`。
    fn email_verification(&self, event: &Event) -> Option<EmailRequest> {
        Some(EmailRequest {
            to:          event.creator.email.clone(),
            subject:     subject(event, Some("Vérification de l’adresse e-mail")),
            title:       "Veuillez vérifier votre adresse email pour recevoir les mises à jour de \
                          cet événement."
                .to_string(),
            button_text: "Vérifier l'adresse e-mail".to_string(),
            button_url:  self.verification_url(event)?,
            message:     format!(
                "Bonjour {},<br /><br />Si vous souhaitez recevoir des mises à jour par email de \
                 cet event, cliquer sur le bouton ci-dessous pour confirmer votre adresse email.",
                event.creator.name
            ),
            reply_to:    None,
        })
    }

    fn new_participant(&self, event: &Event, participant: &Participant) -> EmailRequest {
        EmailRequest {
            to:          event.creator.email.clone(),
            subject:     subject(event, Some("Nouveau Participant")),
            title:       format!("{} a voté!", participant.name),
            button_text: VIEW_EVENT.to_string(),
            button_url:  self.event_url(event),
            message:     format!("Bonjour {},<br /><br />{VIEW_UPDATES}", event.creator.name),
            reply_to:    None,
        }
    }

    fn new_comment(&self, event: &Event, comment: &Comment) -> EmailRequest {
        EmailRequest {
            to:          event.creator.email.clone(),
            subject:     subject(event, Some("Nouveau Commentaire")),
            title:       format!("{} has commented on your event!", comment.author.name),
            button_text: VIEW_EVENT.to_string(),
            button_url:  self.event_url(event),
            message:     format!("Hi {},<br /><br />{VIEW_UPDATES}", event.creator.name),
            reply_to:    None,
        }
    }

    fn event_url(&self, event: &Event) -> String {
        self.urls.resolve(&urlencoding::encode(event.id.as_str()))
    }

    fn verification_url(&self, event: &Event) -> Option<String> {
        let Some(code) = event.verification_code() else {
            tracing::warn!(
                event_id = %event.id,
                "検証コードがないため、主催者へのアドレス確認メールを送りません"
            );
            return None;
        };

        Some(self.urls.resolve(&format!(
            "verify/{}/code/{}",
            urlencoding::encode(event.id.as_str()),
            urlencoding::encode(code.as_str())
        )))
    }
}

fn subject(event: &Event, suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) => format!("AgendaBDE: {} - {suffix}", event.title),
        None => format!("AgendaBDE: {}", event.title),
    }
}
