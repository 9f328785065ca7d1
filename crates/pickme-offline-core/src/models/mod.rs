//! Data models for the offline worker.
//!
//! - `Request`, `Method`, `Destination`, `RequestKey`: intercepted requests
//!   and the identity they are cached under
//! - `Response`, `ResponseType`: response snapshots as stored in a cache
//! - `WorkerMessage`: structured messages posted by controlled pages
//! - `Notification`, `NotificationData`, `WindowClient`: host notification
//!   and window types

pub mod client;
pub mod message;
pub mod request;
pub mod response;

pub use client::{Notification, NotificationData, WindowClient};
pub use message::WorkerMessage;
pub use request::{Destination, Method, Request, RequestKey};
pub use response::{Response, ResponseType};
