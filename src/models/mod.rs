mod community;
mod competition;
mod save;
mod user;

pub use community::{CommunityTotal, GLOBAL_COMMUNITY_ID, NewCommunityTotal};
pub use competition::{CompetitionMember, DEFAULT_COMPETITION_ID, NewCompetitionMember};
pub use save::{NewSave, Save};
pub use user::{NewUser, UpdateUserTotals, User};
