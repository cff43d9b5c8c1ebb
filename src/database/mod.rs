pub mod activities_repo;
pub mod current_user_repo;
