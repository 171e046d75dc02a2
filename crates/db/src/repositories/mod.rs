//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_log_repo;
pub mod comment_repo;
pub mod expenditure_repo;
pub mod member_repo;
pub mod project_repo;
pub mod risk_issue_repo;
pub mod task_file_repo;
pub mod task_repo;
pub mod user_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use comment_repo::CommentRepo;
pub use expenditure_repo::ExpenditureRepo;
pub use member_repo::MemberRepo;
pub use project_repo::ProjectRepo;
pub use risk_issue_repo::RiskIssueRepo;
pub use task_file_repo::TaskFileRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
