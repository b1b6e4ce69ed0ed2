pub mod admin;
pub mod contact;
pub mod history;
pub mod home;
pub mod login;
pub mod not_found;
pub mod plans;
pub mod register;
