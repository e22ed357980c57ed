mod authority;
mod cookie;
mod events;
mod token;

pub use authority::SessionAuthority;
pub use cookie::{expire_cookie, extract_token, extract_token_from_headers, frame_cookie};
pub use events::{RejectReason, SessionEvent, SessionObserver, log_session_event};
pub use token::{issue_token, verify_token};
