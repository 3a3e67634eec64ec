//! 外部协作者服务
//!
//! - [`mailer`] - 邮件派发 (确认码投递)

pub mod mailer;

pub use mailer::{LogMailer, MailError, Mailer, SmtpMailer};
