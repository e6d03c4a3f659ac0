pub mod batch;
pub mod composer;
pub mod config;
pub mod mailer;
pub mod notifier;
pub mod recipient;
pub mod testing;

pub use batch::{BatchConfig, BatchError, BatchRunner, Pacing, RunReport};
pub use composer::MessageComposer;
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    SmtpConfig, SmtpSecurity, TelegramConfig,
};
pub use mailer::{build_mailers, Mailer, MailerError, MailerRotation, OutgoingEmail};
pub use notifier::{Channel, NoneNotifier, Notifier, TelegramNotifier};
pub use recipient::{
    DeliveryStatus, MatchKey, RecipientRecord, RecipientStore, SqliteRecipientStore, StatusUpdate,
    StoreError,
};
