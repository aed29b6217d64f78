use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, Message,
    SmtpTransport, Transport,
};
use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

/// Outbound mail collaborator. Sending is synchronous and unretried; a
/// transport failure surfaces directly to the caller.
pub trait MailSender: Send + Sync {
    fn send_password_reset(&self, to: &str, reset_link: &str) -> AppResult<()>;
}

pub struct SmtpMailSender {
    transport: SmtpTransport,
    from: String,
}

impl SmtpMailSender {
    pub fn new(
        host: &str,
        username: &str,
        password: &SecretString,
        from: &str,
    ) -> AppResult<Self> {
        let mut builder = SmtpTransport::relay(host)
            .map_err(|e| AppError::InternalError(format!("Invalid SMTP relay '{}': {}", host, e)))?;

        if !username.is_empty() {
            builder = builder.credentials(Credentials::new(
                username.to_string(),
                password.expose_secret().to_string(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from: from.to_string(),
        })
    }
}

impl MailSender for SmtpMailSender {
    fn send_password_reset(&self, to: &str, reset_link: &str) -> AppResult<()> {
        let body = format!(
            "<html><body><p>Bonjour,<br>\
             voila le lien pour modifier votre mot de passe:<br><br>\
             <a href=\"{link}\">{link}</a><br>\
             Ce lien expire dans une heure.<br>\
             Cordialement,</p></body></html>",
            link = reset_link
        );

        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| AppError::InternalError(format!("Bad sender address: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| AppError::ValidationError(format!("Bad recipient address: {}", e)))?)
            .subject("Rénitialiser Mot de passe")
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| AppError::InternalError(format!("Failed to build mail: {}", e)))?;

        self.transport
            .send(&message)
            .map(|_| ())
            .map_err(|e| AppError::UpstreamError(format!("Mail delivery failed: {}", e)))
    }
}
