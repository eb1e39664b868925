pub mod contracts;
pub mod home;
pub mod login;
pub mod profile;
pub mod transactions;
pub mod wallet;
