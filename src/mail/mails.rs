use crate::{
    mail::sendmail::Mailer,
    models::withdrawalmodel::{Withdrawal, WithdrawalStatus},
    utils::currency::from_cents,
};

pub fn send_order_activated_email(
    mailer: &Mailer,
    to_email: &str,
    channel_name: &str,
    subscriber_target: i32,
) {
    let subject = "Your order is now live".to_string();
    let html = format!(
        r#"
        <h2>Order verified</h2>
        <p>Your funding proof for <strong>{}</strong> has been verified.</p>
        <p>The order is now active and will collect up to {} subscribers.</p>
        "#,
        channel_name, subscriber_target
    );

    mailer.send_in_background(to_email.to_string(), subject, html);
}

pub fn send_withdrawal_processed_email(mailer: &Mailer, to_email: &str, withdrawal: &Withdrawal) {
    let (subject, body_line) = match withdrawal.status {
        WithdrawalStatus::Approved => (
            "Your withdrawal was approved",
            format!(
                "Your withdrawal of {:.2} has been approved and is on its way.",
                from_cents(withdrawal.amount)
            ),
        ),
        WithdrawalStatus::Rejected => (
            "Your withdrawal was rejected",
            "Your withdrawal request was rejected and the deducted balances have been restored."
                .to_string(),
        ),
        WithdrawalStatus::Pending => return,
    };

    let note = withdrawal
        .verification_note
        .as_deref()
        .map(|note| format!("<p>Note from the reviewer: {}</p>", note))
        .unwrap_or_default();

    let html = format!(
        r#"
        <h2>Withdrawal update</h2>
        <p>{}</p>
        {}
        "#,
        body_line, note
    );

    mailer.send_in_background(to_email.to_string(), subject.to_string(), html);
}
