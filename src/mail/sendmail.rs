use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, Message,
    SmtpTransport, Transport,
};

use crate::config::Config;

/// Fire-and-forget SMTP sender. Notifications are a courtesy, never part of
/// an operation's correctness, so sends run on a blocking task and failures
/// are only logged.
#[derive(Debug, Clone)]
pub struct Mailer {
    smtp_host: String,
    smtp_username: String,
    smtp_password: String,
    smtp_from: String,
}

impl Mailer {
    pub fn from_config(config: &Config) -> Self {
        Self {
            smtp_host: config.smtp_host.clone(),
            smtp_username: config.smtp_username.clone(),
            smtp_password: config.smtp_password.clone(),
            smtp_from: config.smtp_from.clone(),
        }
    }

    pub fn send_in_background(&self, to_email: String, subject: String, html_body: String) {
        let mailer = self.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(err) = mailer.send_blocking(&to_email, &subject, &html_body) {
                tracing::error!("Failed to send email to {}: {}", to_email, err);
            } else {
                tracing::info!("Email sent to {}: {}", to_email, subject);
            }
        });
    }

    fn send_blocking(
        &self,
        to_email: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if to_email.is_empty() || !to_email.contains('@') {
            return Err(format!("Invalid email address: {}", to_email).into());
        }

        let email = Message::builder()
            .from(self.smtp_from.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())?;

        let credentials =
            Credentials::new(self.smtp_username.clone(), self.smtp_password.clone());

        let transport = SmtpTransport::relay(&self.smtp_host)?
            .credentials(credentials)
            .build();

        transport.send(&email)?;
        Ok(())
    }
}
