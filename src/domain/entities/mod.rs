pub mod attachment;
pub mod kind;
pub mod notice;
pub mod pet;
pub mod pet_type;
pub mod record_id;
pub mod session;
pub mod user;
pub mod vlog;

pub use attachment::*;
pub use kind::{EntityKind, EntityRoutes};
pub use notice::*;
pub use pet::*;
pub use pet_type::*;
pub use record_id::*;
pub use session::*;
pub use user::*;
pub use vlog::*;
