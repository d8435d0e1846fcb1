use anyhow::Context as _;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use crate::domain::repository::ResetNotifier;
use crate::domain::types::{Account, RESET_CODE_TTL_MINUTES};
use crate::error::PortalError;

type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

pub const RESET_EMAIL_SUBJECT: &str = "Code de réinitialisation de mot de passe";

/// Sends reset codes as plain-text e-mail over STARTTLS.
///
/// Building the transport does not open a connection; the first send does.
/// It must happen inside a Tokio runtime.
#[derive(Clone)]
pub struct SmtpResetNotifier {
    mailer: SmtpTransport,
    from: Mailbox,
}

impl SmtpResetNotifier {
    pub fn new(
        host: &str,
        port: u16,
        username: &str,
        password: &str,
        from: &str,
    ) -> anyhow::Result<Self> {
        // Checked before `build`, which spawns the pool task on the runtime.
        let from: Mailbox = from
            .parse()
            .with_context(|| format!("invalid sender address {from}"))?;
        let creds = Credentials::new(username.to_owned(), password.to_owned());
        let mailer = SmtpTransport::starttls_relay(host)
            .with_context(|| format!("invalid SMTP relay {host}"))?
            .credentials(creds)
            .port(port)
            .build();
        Ok(Self { mailer, from })
    }
}

impl ResetNotifier for SmtpResetNotifier {
    async fn send_reset_code(&self, recipient: &Account, code: &str) -> Result<(), PortalError> {
        let to: Mailbox = recipient
            .email
            .parse()
            .with_context(|| format!("invalid recipient address for account {}", recipient.id))?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(RESET_EMAIL_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(reset_email_body(recipient, code))
            .context("build reset e-mail")?;
        self.mailer
            .send(message)
            .await
            .context("send reset e-mail")?;
        Ok(())
    }
}

pub fn reset_email_body(recipient: &Account, code: &str) -> String {
    let name = match recipient.full_name() {
        n if n.is_empty() => recipient.username.clone(),
        n => n,
    };
    format!(
        "Bonjour {name},\n\n\
         Votre code de réinitialisation est : {code}\n\n\
         Valable {RESET_CODE_TTL_MINUTES} minutes.\n\n\
         Si vous n'êtes pas à l'origine de cette demande, ignorez ce message.\n"
    )
}
