pub mod comment;
pub mod identity;
pub mod row;
pub mod section;
pub mod splice;
pub mod standup;
pub mod text;
