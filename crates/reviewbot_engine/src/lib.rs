//! Reviewbot engine: HTTP collaborators for polling and notification.
mod client;
mod notify;
mod types;

pub use client::{ClientSettings, ReqwestStatusApi, StatusApi};
pub use notify::{DeliveryError, Notifier, NotifierSettings, TelegramNotifier};
pub use types::{ApiError, ApiFailure};
