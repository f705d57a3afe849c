pub mod member;
pub mod status;

pub use member::{MemberSpec, PartyMember, MAX_HUNGER};
pub use status::StatusEffect;
