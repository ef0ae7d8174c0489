pub mod standup;
